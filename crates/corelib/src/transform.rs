use crate::{EulerRot, Mat3, Mat4, Quat, Vec3, vec3};

/// Rigid transform with uniform or non-uniform scale (Euler XYZ).
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    pub translation: Vec3,
    /// Euler angles in radians (XYZ order).
    pub rotation_euler: Vec3,
    pub scale: Vec3,
}

impl Transform {
    #[inline]
    pub const fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation_euler: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    #[inline]
    pub fn from_trs(translation: Vec3, rotation_euler: Vec3, scale: Vec3) -> Self {
        Self {
            translation,
            rotation_euler,
            scale,
        }
    }

    /// Build matrix = T * R * S (column-major Mat4 per glam).
    #[inline]
    pub fn matrix(&self) -> Mat4 {
        let q = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation_euler.x,
            self.rotation_euler.y,
            self.rotation_euler.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, q, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Model spinning about the Y axis through `pivot`.
///
/// `matrix(t) = T(pivot) * R_y(-angular_speed * t) * local`, so `local` is
/// applied in the spinning frame (offset from the axis, model scale).
#[derive(Clone, Copy, Debug)]
pub struct Turntable {
    pub pivot: Vec3,
    /// Radians per second, clockwise seen from +Y.
    pub angular_speed: f32,
    pub local: Transform,
}

impl Turntable {
    pub fn matrix(&self, time_secs: f32) -> Mat4 {
        Mat4::from_translation(self.pivot)
            * Mat4::from_rotation_y(-self.angular_speed * time_secs)
            * self.local.matrix()
    }
}

impl Default for Turntable {
    /// Framing for the Utah teapot at its native size.
    fn default() -> Self {
        Self {
            pivot: vec3(-0.01, 0.0, 0.0),
            angular_speed: 0.25,
            local: Transform::from_trs(vec3(0.08, 0.0, 0.0), Vec3::ZERO, Vec3::splat(0.075)),
        }
    }
}

/// Matrix for transforming normals: inverse-transpose of the upper 3x3.
pub fn normal_matrix(model: Mat4) -> Mat3 {
    let m = Mat3::from_mat4(model);
    if m.determinant().abs() <= f32::EPSILON {
        return Mat3::IDENTITY;
    }
    m.inverse().transpose()
}
