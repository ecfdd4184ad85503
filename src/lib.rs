//! exactum - Exact integer computational geometry
//!
//! Where approximation is not an option. This library provides geometric
//! types and algorithms over 64-bit integer coordinates, where every
//! predicate is evaluated exactly and results are bit-for-bit reproducible.
//!
//! The centerpiece is a scanline polygon clipping engine supporting
//! intersection, union, difference, and symmetric difference of arbitrary
//! (convex, concave, self-intersecting, multiply-connected) polygons under
//! the even-odd, non-zero, positive, and negative filling rules, plus
//! clipping of open polylines against closed regions.
//!
//! # Example
//!
//! ```
//! use exactum::clip::{paths_intersection, FillRule};
//! use exactum::Point64;
//!
//! let subject = vec![vec![
//!     Point64::new(0, 0),
//!     Point64::new(100, 0),
//!     Point64::new(100, 100),
//!     Point64::new(0, 100),
//! ]];
//! let clip = vec![vec![
//!     Point64::new(50, 50),
//!     Point64::new(150, 50),
//!     Point64::new(150, 150),
//!     Point64::new(50, 150),
//! ]];
//!
//! let solution = paths_intersection(&subject, &clip, FillRule::EvenOdd).unwrap();
//! assert_eq!(solution.len(), 1);
//! ```

pub mod clip;
pub mod error;
pub mod path;
pub mod primitives;

pub use error::ExactError;
pub use path::{
    cross_product, point_in_path, signed_area, Path64, Paths64, PointInPathResult,
};
pub use primitives::{Point2, Point3, Point64, Rect2, Rect64, Vector2, Vector3};
