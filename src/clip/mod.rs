//! Polygon boolean clipping over integer coordinates.
//!
//! A scanline implementation of Vatti polygon clipping: subject and clip
//! path sets are swept bottom to top through a sorted active-edge
//! structure, edge crossings are resolved in occurrence order, and output
//! contours are assembled with correct winding and hole topology. Both
//! closed polygons and open polylines are supported as subjects.
//!
//! The engine works entirely in 64-bit integer space; intersection points
//! are rounded to integers, and all orientation predicates are exact.
//!
//! # Example
//!
//! ```
//! use exactum::clip::{Clipper64, ClipType, FillRule};
//! use exactum::Point64;
//!
//! let mut clipper = Clipper64::new();
//! clipper.add_subject(&vec![vec![
//!     Point64::new(0, 0),
//!     Point64::new(100, 0),
//!     Point64::new(100, 100),
//!     Point64::new(0, 100),
//! ]]);
//! clipper.add_clip(&vec![vec![
//!     Point64::new(50, 50),
//!     Point64::new(150, 50),
//!     Point64::new(150, 150),
//!     Point64::new(50, 150),
//! ]]);
//!
//! let solution = clipper.execute(ClipType::Intersection, FillRule::EvenOdd).unwrap();
//! assert_eq!(solution.len(), 1);
//! assert_eq!(exactum::signed_area(&solution[0]).abs(), 2500.0);
//! ```

mod clipper;
mod engine;
mod horizontals;
mod output;
mod polytree;
mod splice;
mod vertex;

pub use clipper::{
    paths_difference, paths_intersection, paths_union, paths_xor, ClipType, Clipper64, FillRule,
};
pub use polytree::{PolyPath64, PolyTree64};

#[cfg(feature = "z")]
pub use clipper::ZCallback64;
