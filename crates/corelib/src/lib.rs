//! Core viewer types: math re-exports, camera, model transform, input state.

pub use glam::{Mat4, Quat, Vec2, Vec3, vec2, vec3};

pub mod camera;
pub mod input;
pub mod transform;
