//! 2D integer vector type for offsets and edge directions.

use num_traits::{NumCast, PrimInt, Signed};
use std::ops::{Add, Mul, Neg, Sub};

/// A 2D vector representing an offset or edge direction.
///
/// Generic over signed integer types (`i32` or `i64`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector2<T> {
    pub x: T,
    pub y: T,
}

impl<T: PrimInt + Signed> Vector2<T> {
    /// Creates a new vector.
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Creates a zero vector.
    #[inline]
    pub fn zero() -> Self {
        Self {
            x: T::zero(),
            y: T::zero(),
        }
    }

    /// Computes the dot product with another vector.
    ///
    /// The product is taken in the scalar type; callers working near the
    /// extremes of `i64` should widen first.
    #[inline]
    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y
    }

    /// Computes the 2D cross product (perpendicular dot product).
    ///
    /// Positive means `other` turns counter-clockwise from `self` when the
    /// Y axis grows upward. The products are widened to `i128`, so the
    /// result is exact for the full coordinate range.
    #[inline]
    pub fn cross(self, other: Self) -> i128 {
        to_i128(self.x) * to_i128(other.y) - to_i128(self.y) * to_i128(other.x)
    }

    /// Returns the squared magnitude, widened to `f64`.
    #[inline]
    pub fn magnitude_squared(self) -> f64 {
        let x = to_f64(self.x);
        let y = to_f64(self.y);
        x * x + y * y
    }

    /// Returns the magnitude (length) of the vector.
    #[inline]
    pub fn magnitude(self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// Returns a vector perpendicular to this one (rotated 90 degrees
    /// counter-clockwise for an upward-growing Y axis).
    #[inline]
    pub fn perpendicular(self) -> Self {
        Self {
            x: -self.y,
            y: self.x,
        }
    }
}

#[inline]
fn to_f64<T: NumCast>(v: T) -> f64 {
    num_traits::cast(v).unwrap_or(0.0)
}

#[inline]
fn to_i128<T: NumCast>(v: T) -> i128 {
    // every signed primitive scalar widens losslessly into i128
    num_traits::cast(v).unwrap_or(0)
}

impl<T: PrimInt + Signed> Add for Vector2<T> {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl<T: PrimInt + Signed> Sub for Vector2<T> {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl<T: PrimInt + Signed> Neg for Vector2<T> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl<T: PrimInt + Signed> Mul<T> for Vector2<T> {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: T) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_and_cross() {
        let a = Vector2::new(3_i64, 4);
        let b = Vector2::new(-4, 3);
        assert_eq!(a.dot(b), 0);
        assert_eq!(a.cross(b), 25);
        assert_eq!(b.cross(a), -25);
    }

    #[test]
    fn test_cross_exact_at_extremes() {
        let m = 4_000_000_000_i64;
        let a = Vector2::new(m, 0);
        let b = Vector2::new(0, m);
        // the product exceeds i64 but the widened cross stays exact
        assert_eq!(a.cross(b), 16_000_000_000_000_000_000_i128);
        assert_eq!(b.cross(a), -16_000_000_000_000_000_000_i128);
    }

    #[test]
    fn test_perpendicular() {
        let v = Vector2::new(2_i64, 0);
        assert_eq!(v.perpendicular(), Vector2::new(0, 2));
        assert_eq!(v.dot(v.perpendicular()), 0);
    }

    #[test]
    fn test_magnitude() {
        let v = Vector2::new(3_i64, 4);
        assert_eq!(v.magnitude(), 5.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Vector2::new(1_i64, 2);
        let b = Vector2::new(10, 20);
        assert_eq!(a + b, Vector2::new(11, 22));
        assert_eq!(b - a, Vector2::new(9, 18));
        assert_eq!(-a, Vector2::new(-1, -2));
        assert_eq!(a * 3, Vector2::new(3, 6));
    }
}
