//! Axis-aligned integer rectangle.

use super::Point2;
use num_traits::{PrimInt, Signed};

/// An axis-aligned rectangle spanning `min` to `max` inclusive.
///
/// `Rect2` is used as a cheap pre-test before exact containment checks:
/// if one path's rectangle does not contain another's, no point-by-point
/// test is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect2<T> {
    pub min: Point2<T>,
    pub max: Point2<T>,
}

/// The rectangle type used by the clipping engine.
pub type Rect64 = Rect2<i64>;

impl<T: PrimInt + Signed> Rect2<T> {
    /// Creates a rectangle from its corner points.
    #[inline]
    pub fn new(min: Point2<T>, max: Point2<T>) -> Self {
        Self { min, max }
    }

    /// Creates an inverted rectangle that contains nothing; growing it to
    /// include any point makes it valid.
    #[inline]
    pub fn inverted() -> Self {
        Self {
            min: Point2::new(T::max_value(), T::max_value()),
            max: Point2::new(T::min_value(), T::min_value()),
        }
    }

    /// Returns true if the rectangle spans no area (including the
    /// inverted state).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// Grows the rectangle to include `pt`.
    #[inline]
    pub fn include(&mut self, pt: Point2<T>) {
        if pt.x < self.min.x {
            self.min.x = pt.x;
        }
        if pt.y < self.min.y {
            self.min.y = pt.y;
        }
        if pt.x > self.max.x {
            self.max.x = pt.x;
        }
        if pt.y > self.max.y {
            self.max.y = pt.y;
        }
    }

    /// Tests whether a point lies inside or on the rectangle.
    #[inline]
    pub fn contains_point(&self, pt: Point2<T>) -> bool {
        pt.x >= self.min.x && pt.x <= self.max.x && pt.y >= self.min.y && pt.y <= self.max.y
    }

    /// Tests whether `other` lies entirely inside or on this rectangle.
    #[inline]
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.y >= self.min.y
            && other.max.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_and_contains() {
        let mut r: Rect2<i64> = Rect2::inverted();
        assert!(r.is_empty());
        r.include(Point2::new(0, 0));
        r.include(Point2::new(10, 5));
        assert!(!r.is_empty());
        assert!(r.contains_point(Point2::new(5, 3)));
        assert!(r.contains_point(Point2::new(10, 5)));
        assert!(!r.contains_point(Point2::new(11, 3)));
    }

    #[test]
    fn test_contains_rect() {
        let outer = Rect2::new(Point2::new(0_i64, 0), Point2::new(100, 100));
        let inner = Rect2::new(Point2::new(10_i64, 10), Point2::new(90, 90));
        assert!(outer.contains_rect(&inner));
        assert!(!inner.contains_rect(&outer));
    }
}
