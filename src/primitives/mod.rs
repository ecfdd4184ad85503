//! Integer geometric primitives and operations.

mod point2;
mod point3;
mod rect2;
mod vector2;
mod vector3;

pub use point2::{Point2, Point64};
pub use point3::Point3;
pub use rect2::{Rect2, Rect64};
pub use vector2::Vector2;
pub use vector3::Vector3;
