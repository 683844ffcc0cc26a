use crate::{Mat4, Quat, Vec2, Vec3, input::Scroll};

/// Scale bounds; zooming saturates instead of reaching 0 or infinity.
pub const MIN_SCALE: f32 = 1e-4;
pub const MAX_SCALE: f32 = 1e4;

/// Model orientation and zoom accumulated from user input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelTransform {
    pub orientation: Quat,
    /// Uniform scale; zooming multiplies it.
    pub scale: f32,
}

impl ModelTransform {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            orientation: Quat::IDENTITY,
            scale: 1.0,
        }
    }

    /// Apply a mouse drag of `delta` pixels.
    ///
    /// Horizontal motion turns the model around its own up axis; vertical
    /// motion tilts it around the camera's right axis. `degrees_per_pixel`
    /// scales both.
    pub fn orbit(&mut self, delta: Vec2, degrees_per_pixel: f32, camera_right: Vec3) {
        let yaw = Quat::from_axis_angle(Vec3::Y, (degrees_per_pixel * delta.x).to_radians());
        self.orientation *= yaw;
        if camera_right != Vec3::ZERO {
            let pitch =
                Quat::from_axis_angle(camera_right, (degrees_per_pixel * delta.y).to_radians());
            self.orientation = pitch * self.orientation;
        }
        self.orientation = self.orientation.normalize();
    }

    /// Scrolling up shrinks the model by `factor`, scrolling down grows it.
    pub fn zoom(&mut self, scroll: Scroll, factor: f32) {
        match scroll {
            Scroll::Up => self.zoom_notches(-1, factor),
            Scroll::Down => self.zoom_notches(1, factor),
        }
    }

    /// Apply `notches` wheel steps at once; positive is scrolling down.
    pub fn zoom_notches(&mut self, notches: i32, factor: f32) {
        let scaled = self.scale * factor.powi(notches);
        self.scale = if scaled.is_nan() {
            self.scale
        } else {
            scaled.clamp(MIN_SCALE, MAX_SCALE)
        };
    }

    /// Build matrix = R * S (column-major Mat4 per glam).
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.orientation, Vec3::ZERO)
    }
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self::identity()
    }
}
