use core::ops::Mul;

use crate::math::Vec2;

/// Column-major 2x2 matrix, used here only as a rotation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Mat22 {
    pub col1: Vec2,
    pub col2: Vec2,
}

impl Default for Mat22 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat22 {
    pub const IDENTITY: Self = Self::new(Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0));

    #[inline]
    pub const fn new(col1: Vec2, col2: Vec2) -> Self {
        Self { col1, col2 }
    }

    #[inline]
    pub fn from_angle(angle: f32) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self::new(Vec2::new(c, s), Vec2::new(-s, c))
    }

    #[inline]
    pub fn transpose(self) -> Self {
        Self::new(
            Vec2::new(self.col1.x, self.col2.x),
            Vec2::new(self.col1.y, self.col2.y),
        )
    }
}

impl Mul<Vec2> for Mat22 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: Vec2) -> Vec2 {
        self.col1 * rhs.x + self.col2 * rhs.y
    }
}

impl Mul for Mat22 {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::new(self * rhs.col1, self * rhs.col2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn from_angle_zero_is_identity() {
        assert_eq!(Mat22::from_angle(0.0), Mat22::IDENTITY);
        assert_eq!(Mat22::default(), Mat22::IDENTITY);
    }

    #[test]
    fn rotation_90_deg() {
        let r = Mat22::from_angle(core::f32::consts::FRAC_PI_2);
        let out = r * Vec2::new(1.0, 0.0);

        assert_relative_eq!(out.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(out.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn transpose_undoes_rotation() {
        let r = Mat22::from_angle(0.3);
        let v = Vec2::new(2.0, -1.0);
        let out = r.transpose() * (r * v);

        assert_relative_eq!(out.x, v.x, epsilon = 1e-5);
        assert_relative_eq!(out.y, v.y, epsilon = 1e-5);
    }

    #[test]
    fn product_composes_angles() {
        let ab = Mat22::from_angle(0.4) * Mat22::from_angle(0.6);
        let c = Mat22::from_angle(1.0);

        assert_relative_eq!(ab.col1.x, c.col1.x, epsilon = 1e-5);
        assert_relative_eq!(ab.col1.y, c.col1.y, epsilon = 1e-5);
        assert_relative_eq!(ab.col2.x, c.col2.x, epsilon = 1e-5);
        assert_relative_eq!(ab.col2.y, c.col2.y, epsilon = 1e-5);
    }
}
