pub mod boolean;

#[doc(inline)]
pub use boolean::{
  complete_intersect, complete_intersect_multisegment_with_multipolygon,
  complete_intersect_multisegments, intersect, intersect_multisegment_with_multipolygon,
  intersect_multisegments, segments_to_multisegment, subtract,
  subtract_multipolygon_from_multisegment, subtract_multisegments, symmetric_subtract,
  symmetric_subtract_multisegments, unite, unite_multisegments, OperationKind,
};
