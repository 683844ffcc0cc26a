//! Viewer configuration from `--key=value` command-line flags.

use std::path::PathBuf;

pub const DEFAULT_MODEL: &str = "models/tape.obj";

#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub model: PathBuf,
    pub width: u32,
    pub height: u32,
    pub fov_deg: f32,
    pub z_near: f32,
    pub z_far: f32,
    /// Scale change per wheel notch.
    pub zoom_factor: f32,
    /// Degrees of rotation per dragged pixel.
    pub rotation_factor: f32,
    /// Initial drag applied to the model, in pixels.
    pub turn: (f32, f32),
    /// Initial wheel notches; positive scrolls down, negative scrolls up.
    pub scroll: i32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from(DEFAULT_MODEL),
            width: 1200,
            height: 900,
            fov_deg: 45.0,
            z_near: 0.1,
            z_far: 50.0,
            zoom_factor: 1.1,
            rotation_factor: 0.2,
            turn: (0.0, 0.0),
            scroll: 0,
        }
    }
}

impl ViewerConfig {
    pub fn from_env() -> Self {
        Self::from_args(std::env::args().skip(1))
    }

    /// Accepts: --model=PATH (or a bare PATH), --size=WxH, --width=, --height=,
    /// --fov=, --near=, --far=, --zoom-factor=, --rotation-factor=,
    /// --turn=DX,DY, --scroll=N
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cfg = Self::default();
        for arg in args {
            let arg = arg.as_ref();
            if let Some(v) = arg.strip_prefix("--model=") {
                cfg.model = PathBuf::from(v);
            } else if let Some(v) = arg.strip_prefix("--size=") {
                match v.split_once('x').or_else(|| v.split_once('X')) {
                    Some((sw, sh)) => {
                        set_positive(&mut cfg.width, "--size width", sw);
                        set_positive(&mut cfg.height, "--size height", sh);
                    }
                    None => log::warn!("Ignoring malformed --size='{}', expected WxH", v),
                }
            } else if let Some(v) = arg.strip_prefix("--width=") {
                set_positive(&mut cfg.width, "--width", v);
            } else if let Some(v) = arg.strip_prefix("--height=") {
                set_positive(&mut cfg.height, "--height", v);
            } else if let Some(v) = arg.strip_prefix("--fov=") {
                set_positive_f32(&mut cfg.fov_deg, "--fov", v);
            } else if let Some(v) = arg.strip_prefix("--near=") {
                set_positive_f32(&mut cfg.z_near, "--near", v);
            } else if let Some(v) = arg.strip_prefix("--far=") {
                set_positive_f32(&mut cfg.z_far, "--far", v);
            } else if let Some(v) = arg.strip_prefix("--zoom-factor=") {
                set_positive_f32(&mut cfg.zoom_factor, "--zoom-factor", v);
            } else if let Some(v) = arg.strip_prefix("--rotation-factor=") {
                set_positive_f32(&mut cfg.rotation_factor, "--rotation-factor", v);
            } else if let Some(v) = arg.strip_prefix("--turn=") {
                match v.split_once(',').map(|(x, y)| (x.parse::<f32>(), y.parse::<f32>())) {
                    Some((Ok(dx), Ok(dy))) if dx.is_finite() && dy.is_finite() => {
                        cfg.turn = (dx, dy)
                    }
                    _ => log::warn!("Ignoring malformed --turn='{}', expected DX,DY", v),
                }
            } else if let Some(v) = arg.strip_prefix("--scroll=") {
                match v.parse::<i32>() {
                    Ok(n) => cfg.scroll = n,
                    Err(_) => log::warn!("Ignoring malformed --scroll='{}'", v),
                }
            } else if !arg.starts_with("--") {
                cfg.model = PathBuf::from(arg);
            } else {
                log::warn!("Unknown argument '{}', ignoring.", arg);
            }
        }

        if cfg.z_far <= cfg.z_near {
            log::warn!(
                "Far plane {} is not beyond near plane {}, using defaults.",
                cfg.z_far,
                cfg.z_near
            );
            let defaults = Self::default();
            cfg.z_near = defaults.z_near;
            cfg.z_far = defaults.z_far;
        }
        cfg
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

fn set_positive(slot: &mut u32, what: &str, value: &str) {
    match value.parse::<u32>() {
        Ok(v) if v > 0 => *slot = v,
        _ => log::warn!("Invalid {} '{}', keeping {}.", what, value, slot),
    }
}

fn set_positive_f32(slot: &mut f32, what: &str, value: &str) {
    match value.parse::<f32>() {
        Ok(v) if v.is_finite() && v > 0.0 => *slot = v,
        _ => log::warn!("Invalid {} '{}', keeping {}.", what, value, slot),
    }
}
