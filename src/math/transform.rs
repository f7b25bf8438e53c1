use crate::math::{Mat22, Vec2};

/// Rigid transform: rotate, then translate.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub rotation: Mat22,
}

impl Transform {
    #[inline]
    pub fn new(position: Vec2, angle: f32) -> Self {
        Self {
            position,
            rotation: Mat22::from_angle(angle),
        }
    }

    /// Local point to world point.
    #[inline]
    pub fn apply(&self, v: Vec2) -> Vec2 {
        self.position + self.rotation * v
    }

    /// World point to local point.
    #[inline]
    pub fn apply_inverse(&self, v: Vec2) -> Vec2 {
        self.rotation.transpose() * (v - self.position)
    }

    /// Local direction to world direction (no translation).
    #[inline]
    pub fn rotate(&self, v: Vec2) -> Vec2 {
        self.rotation * v
    }
}
