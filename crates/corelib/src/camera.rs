use crate::{Mat4, Vec3};

/// Fixed perspective camera (right-handed) looking at the scene center.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_rad: f32,
    pub z_near: f32,
    pub z_far: f32,
    pub aspect: f32,
}

impl Camera {
    /// Viewer default: eye at (2, 2, 2) looking at the origin, +Y up.
    pub fn viewer(fov_y_deg: f32, aspect: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            eye: Vec3::splat(2.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_rad: fov_y_deg.to_radians(),
            z_near,
            z_far,
            aspect,
        }
    }

    #[inline]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// Screen-right direction in world space. Vertical mouse drags pitch
    /// the model around this axis.
    #[inline]
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize_or_zero()
    }

    #[inline]
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// OpenGL-style projection (z in [-1, 1]).
    #[inline]
    pub fn proj(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_y_rad,
            self.aspect.max(1e-6),
            self.z_near,
            self.z_far,
        )
    }

    #[inline]
    pub fn proj_view(&self) -> Mat4 {
        self.proj() * self.view()
    }
}
