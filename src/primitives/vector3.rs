//! 3D integer vector type.

use num_traits::{PrimInt, Signed};
use std::ops::{Add, Neg, Sub};

/// A 3D vector representing an offset.
///
/// Generic over signed integer types (`i32` or `i64`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector3<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: PrimInt + Signed> Vector3<T> {
    /// Creates a new vector.
    #[inline]
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Creates a zero vector.
    #[inline]
    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    /// Computes the dot product with another vector.
    ///
    /// The products are taken in the scalar type; callers working near the
    /// extremes of `i64` should widen first.
    #[inline]
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Computes the cross product with another vector.
    ///
    /// The component products are taken in the scalar type, since the
    /// result must itself be a vector of `T`; callers working near the
    /// extremes of `i64` should widen first.
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }
}

impl<T: PrimInt + Signed> Add for Vector3<T> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl<T: PrimInt + Signed> Sub for Vector3<T> {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl<T: PrimInt + Signed> Neg for Vector3<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_is_orthogonal() {
        let a = Vector3::new(1_i64, 2, 3);
        let b = Vector3::new(4, 5, 6);
        let c = a.cross(b);
        assert_eq!(a.dot(c), 0);
        assert_eq!(b.dot(c), 0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Vector3::new(1_i64, 1, 1);
        let b = Vector3::new(2, 3, 4);
        assert_eq!(a + b, Vector3::new(3, 4, 5));
        assert_eq!(b - a, Vector3::new(1, 2, 3));
        assert_eq!(-b, Vector3::new(-2, -3, -4));
    }
}
