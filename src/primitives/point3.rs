//! 3D integer point type.

use super::Vector3;
use num_traits::{NumCast, PrimInt, Signed};
use std::ops::{Add, Sub};

/// A 3D point with integer x, y, and z coordinates.
///
/// Generic over signed integer types (`i32` or `i64`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: PrimInt + Signed> Point3<T> {
    /// Creates a new point.
    #[inline]
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Creates a point at the origin (0, 0, 0).
    #[inline]
    pub fn origin() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    /// Computes the squared Euclidean distance to another point, widened
    /// to `f64`.
    #[inline]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = to_f64(other.x) - to_f64(self.x);
        let dy = to_f64(other.y) - to_f64(self.y);
        let dz = to_f64(other.z) - to_f64(self.z);
        dx * dx + dy * dy + dz * dz
    }

    /// Computes the Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Converts this point to a vector from the origin.
    #[inline]
    pub fn to_vector(self) -> Vector3<T> {
        Vector3::new(self.x, self.y, self.z)
    }
}

#[inline]
fn to_f64<T: NumCast>(v: T) -> f64 {
    num_traits::cast(v).unwrap_or(0.0)
}

// Point - Point = Vector3
impl<T: PrimInt + Signed> Sub for Point3<T> {
    type Output = Vector3<T>;

    #[inline]
    fn sub(self, other: Self) -> Vector3<T> {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

// Point + Vector3 = Point
impl<T: PrimInt + Signed> Add<Vector3<T>> for Point3<T> {
    type Output = Self;

    #[inline]
    fn add(self, v: Vector3<T>) -> Self {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Point3::new(0_i64, 0, 0);
        let b = Point3::new(2, 3, 6);
        assert_eq!(a.distance(b), 7.0);
    }

    #[test]
    fn test_sub_gives_vector() {
        let a = Point3::new(5_i64, 5, 5);
        let b = Point3::new(1, 2, 3);
        assert_eq!(a - b, Vector3::new(4, 3, 2));
    }
}
