use crate::{Vec3, vec3};

/// One directional light plus a constant ambient term, and the object's base color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lighting {
    /// Direction *towards* the light, normalized.
    pub direction: Vec3,
    pub color: Vec3,
    pub object_color: Vec3,
    pub ambient: Vec3,
}

impl Lighting {
    pub fn new(direction: Vec3, color: Vec3, object_color: Vec3, ambient: Vec3) -> Self {
        Self {
            direction: direction.normalize_or(Vec3::Y),
            color,
            object_color,
            ambient,
        }
    }
}

impl Default for Lighting {
    /// White light from straight above on a red object.
    fn default() -> Self {
        Self::new(
            Vec3::Y,
            Vec3::ONE,
            vec3(1.0, 0.0, 0.0),
            Vec3::splat(0.1),
        )
    }
}
