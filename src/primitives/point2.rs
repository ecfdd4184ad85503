//! 2D integer point type.

use super::Vector2;
use num_traits::{NumCast, PrimInt, Signed};
use std::fmt;
use std::ops::{Add, Sub};

/// A 2D point with integer x and y coordinates.
///
/// Generic over signed integer types (`i32` or `i64`). All arithmetic on
/// points is exact; there is no rounding and no epsilon.
///
/// With the `z` cargo feature enabled, every point also carries a user
/// `z` coordinate that is passed through geometric operations untouched
/// and never consulted by any predicate.
#[derive(Debug, Clone, Copy)]
pub struct Point2<T> {
    pub x: T,
    pub y: T,
    #[cfg(feature = "z")]
    pub z: T,
}

/// The coordinate type used by the clipping engine.
pub type Point64 = Point2<i64>;

impl<T: PrimInt + Signed> Point2<T> {
    /// Creates a new point.
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Self {
            x,
            y,
            #[cfg(feature = "z")]
            z: T::zero(),
        }
    }

    /// Creates a new point with an explicit user `z` coordinate.
    #[cfg(feature = "z")]
    #[inline]
    pub fn with_z(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Creates a point at the origin (0, 0).
    #[inline]
    pub fn origin() -> Self {
        Self::new(T::zero(), T::zero())
    }

    /// Computes the squared Euclidean distance to another point.
    ///
    /// Widens to `f64` so the result cannot overflow for any pair of
    /// representable points.
    #[inline]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = to_f64(other.x) - to_f64(self.x);
        let dy = to_f64(other.y) - to_f64(self.y);
        dx * dx + dy * dy
    }

    /// Computes the Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Returns the midpoint between `self` and `other`, rounded toward
    /// zero on odd sums.
    #[inline]
    pub fn midpoint(self, other: Self) -> Self {
        let two = T::one() + T::one();
        Self::new((self.x + other.x) / two, (self.y + other.y) / two)
    }

    /// Converts this point to a vector from the origin.
    #[inline]
    pub fn to_vector(self) -> Vector2<T> {
        Vector2::new(self.x, self.y)
    }
}

#[inline]
fn to_f64<T: NumCast>(v: T) -> f64 {
    // Every primitive integer converts to f64 (possibly losing low bits,
    // which is fine for distance measures).
    num_traits::cast(v).unwrap_or(0.0)
}

// Equality ignores the pass-through z coordinate: two points at the same
// planar location are the same point to every geometric predicate.
impl<T: PartialEq> PartialEq for Point2<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl<T: Eq> Eq for Point2<T> {}

impl<T: fmt::Display> fmt::Display for Point2<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

// Point - Point = Vector2
impl<T: PrimInt + Signed> Sub for Point2<T> {
    type Output = Vector2<T>;

    #[inline]
    fn sub(self, other: Self) -> Vector2<T> {
        Vector2::new(self.x - other.x, self.y - other.y)
    }
}

// Point + Vector2 = Point
impl<T: PrimInt + Signed> Add<Vector2<T>> for Point2<T> {
    type Output = Self;

    #[inline]
    fn add(self, v: Vector2<T>) -> Self {
        let mut result = self;
        result.x = self.x + v.x;
        result.y = self.y + v.y;
        result
    }
}

// Point - Vector2 = Point
impl<T: PrimInt + Signed> Sub<Vector2<T>> for Point2<T> {
    type Output = Self;

    #[inline]
    fn sub(self, v: Vector2<T>) -> Self {
        let mut result = self;
        result.x = self.x - v.x;
        result.y = self.y - v.y;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_origin() {
        let p = Point2::new(3_i64, -4);
        assert_eq!(p.x, 3);
        assert_eq!(p.y, -4);
        let o: Point2<i64> = Point2::origin();
        assert_eq!(o, Point2::new(0, 0));
    }

    #[test]
    fn test_point_sub_point_is_vector() {
        let a = Point2::new(10_i64, 20);
        let b = Point2::new(3, 5);
        let v = a - b;
        assert_eq!(v, Vector2::new(7, 15));
    }

    #[test]
    fn test_point_vector_roundtrip() {
        let p = Point2::new(1_i64, 2);
        let v = Vector2::new(5, -7);
        assert_eq!((p + v) - v, p);
    }

    #[test]
    fn test_distance() {
        let a = Point2::new(0_i64, 0);
        let b = Point2::new(3, 4);
        assert_eq!(a.distance_squared(b), 25.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn test_distance_no_overflow_at_extremes() {
        let a = Point2::new(-4_000_000_000_i64, -4_000_000_000);
        let b = Point2::new(4_000_000_000, 4_000_000_000);
        assert!(a.distance(b) > 1.1e10);
    }

    #[test]
    fn test_midpoint() {
        let a = Point2::new(0_i64, 0);
        let b = Point2::new(10, 5);
        assert_eq!(a.midpoint(b), Point2::new(5, 2));
    }

    #[test]
    fn test_i32_scalar() {
        let p: Point2<i32> = Point2::new(7, 9);
        assert_eq!(p.to_vector(), Vector2::new(7, 9));
    }
}
