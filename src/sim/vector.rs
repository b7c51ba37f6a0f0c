use macroquad::prelude::Vec2;

/// The two operations the flocking math needs on top of glam's `Vec2`.
pub trait VecExt {
    /// Direction of the vector; the zero vector stays zero instead of going NaN.
    fn unit(self) -> Self;
    /// Quarter turn counter-clockwise, `(-y, x)`.
    fn normal(self) -> Self;
}

impl VecExt for Vec2 {
    #[inline]
    fn unit(self) -> Self {
        self.normalize_or_zero()
    }

    #[inline]
    fn normal(self) -> Self {
        self.perp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_of_zero_is_zero() {
        let u = Vec2::ZERO.unit();
        assert_eq!(u, Vec2::ZERO);
        assert!(!u.x.is_nan() && !u.y.is_nan());
    }

    #[test]
    fn unit_has_length_one() {
        let u = Vec2::new(3.0, -4.0).unit();
        assert!((u.length() - 1.0).abs() < 1e-6);
        assert!((u - Vec2::new(0.6, -0.8)).length() < 1e-6);
    }

    #[test]
    fn normal_is_perpendicular() {
        let v = Vec2::new(2.0, 5.0);
        assert_eq!(v.normal(), Vec2::new(-5.0, 2.0));
        assert_eq!(v.dot(v.normal()), 0.0);
    }
}
