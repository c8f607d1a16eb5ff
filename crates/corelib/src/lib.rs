//! Core types: math re-exports, camera, model transforms, lighting.

pub use glam::{EulerRot, Mat3, Mat4, Quat, Vec3, vec3};

pub mod camera;
pub mod color;
pub mod light;
pub mod transform;
