use serde::{Deserialize, Serialize};

use super::Vec3;

/// Rotation quaternion stored as `(x, y, z, w)`, `w` being the scalar part.
///
/// Defaults to the identity `(0, 0, 0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Rotation of `angle` radians around `axis` (need not be unit length).
    pub fn from_axis_angle(axis: Vec3, angle: f64) -> Self {
        let n = axis.norm();
        if n == 0.0 {
            return Self::identity();
        }
        let (s, c) = (angle / 2.0).sin_cos();
        let a = axis.scale(1.0 / n);
        Self::new(a.x * s, a.y * s, a.z * s, c)
    }

    pub fn norm_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    pub fn conjugate(&self) -> Quaternion {
        Quaternion::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Multiplicative inverse; `None` for the zero quaternion.
    pub fn inverse(&self) -> Option<Quaternion> {
        let n2 = self.norm_squared();
        if n2 == 0.0 || !n2.is_finite() {
            return None;
        }
        let c = self.conjugate();
        Some(Quaternion::new(c.x / n2, c.y / n2, c.z / n2, c.w / n2))
    }

    /// Hamilton product `self * other`.
    pub fn multiply(&self, other: &Quaternion) -> Quaternion {
        Quaternion {
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            z: self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
        }
    }

    /// Rotate `v` by the sandwich product `q * v * q⁻¹`.
    ///
    /// A zero quaternion has no inverse and leaves `v` unchanged.
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let Some(inv) = self.inverse() else {
            return v;
        };
        let p = Quaternion::new(v.x, v.y, v.z, 0.0);
        let r = self.multiply(&p).multiply(&inv);
        Vec3::new(r.x, r.y, r.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!(a.distance(&b) < 1e-12, "{:?} != {:?}", a, b);
    }

    #[test]
    fn test_identity_rotation_is_noop() {
        let v = Vec3::new(1.0, -2.0, 0.5);
        assert_vec_eq(Quaternion::identity().rotate(v), v);
        assert_eq!(Quaternion::default(), Quaternion::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_quarter_turn_about_z() {
        let q = Quaternion::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_2);
        assert_vec_eq(q.rotate(Vec3::new(1.0, 0.0, 0.0)), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_non_unit_quaternion_rotates_like_unit() {
        let q = Quaternion::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.7);
        let scaled = Quaternion::new(q.x * 3.0, q.y * 3.0, q.z * 3.0, q.w * 3.0);
        let v = Vec3::new(0.2, 0.4, -1.0);
        assert_vec_eq(scaled.rotate(v), q.rotate(v));
    }

    #[test]
    fn test_zero_quaternion_leaves_vector() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Quaternion::new(0.0, 0.0, 0.0, 0.0).rotate(v), v);
    }
}
