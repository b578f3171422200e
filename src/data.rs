mod bounding_box;
pub(crate) mod point;
pub mod polygon;
mod segment;

pub use bounding_box::BoundingBox;
pub use point::Point;
pub use polygon::{Contour, Mix, Multipoint, Multipolygon, Multisegment, Polygon};
pub use segment::Segment;
