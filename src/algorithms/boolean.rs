//! Boolean operations on polygons, multisegments and their mixtures in the
//! plane, based on the algorithm by F. Martinez et al.
//!
//! The sweep runs in `O((n + k) log n)` time for `n` input edges and `k`
//! intersections and uses `O(n + k)` memory.
//!
//! Reference:
//!   <https://doi.org/10.1016/j.advengsoft.2013.04.004>
//!
//! # Coordinate backends
//!
//! Every entry point is generic over [`ClipScalar`]. `BigRational`
//! coordinates give exact results. `NotNan<f64>` / `OrderedFloat<f64>` run
//! directly on doubles when `accurate` is `false`; with `accurate` set the
//! operands are promoted to rationals for the duration of the sweep and the
//! result is rounded back, which trades speed for topological soundness.
//!
//! # Operand conventions
//!
//! Multipolygon operands are sequences of polygons with non-overlapping
//! boundaries per operand; ring orientation does not matter. Multisegment
//! operands must not contain overlapping segments. Violations surface as
//! [`Error::OverlappingEdges`].

mod event;
mod events_queue;
mod linear;
mod mixed;
mod shaped;
mod sweep_line;

use claims::debug_assert_ok;
use num_rational::BigRational;

use crate::data::{BoundingBox, Mix, Multipolygon, Multisegment, Point, Segment};
use crate::{ClipScalar, Error};
use linear::{LinearSweep, NarySweep};
use mixed::MixedSweep;
use shaped::ShapedSweep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
  Intersection,
  Union,
  Difference,
  SymmetricDifference,
}

/// Intersection of two multipolygons.
///
/// ```rust
/// # use num_rational::BigRational;
/// # use polybool::algorithms::intersect;
/// # use polybool::data::{Contour, Multipolygon, Point, Polygon};
/// fn square(x: i64, y: i64, size: i64) -> Polygon<BigRational> {
///   let corners = [(x, y), (x + size, y), (x + size, y + size), (x, y + size)];
///   let vertices = corners
///     .iter()
///     .map(|&(x, y)| Point::from(Point::new([x, y])))
///     .collect();
///   Polygon::new_unchecked(Contour::new_unchecked(vertices), vec![])
/// }
/// let left = Multipolygon::new(vec![square(0, 0, 2)]);
/// let right = Multipolygon::new(vec![square(1, 1, 2)]);
/// let result = intersect(&left, &right, true).unwrap();
/// assert_eq!(result.polygons.len(), 1);
/// assert_eq!(result.polygons[0].border.len(), 4);
/// ```
pub fn intersect<T: ClipScalar>(
  left: &Multipolygon<T>,
  right: &Multipolygon<T>,
  accurate: bool,
) -> Result<Multipolygon<T>, Error> {
  compute_shaped(OperationKind::Intersection, left, right, accurate)
}

/// Union of two multipolygons.
pub fn unite<T: ClipScalar>(
  left: &Multipolygon<T>,
  right: &Multipolygon<T>,
  accurate: bool,
) -> Result<Multipolygon<T>, Error> {
  compute_shaped(OperationKind::Union, left, right, accurate)
}

/// Difference of the minuend multipolygon with the subtrahend multipolygon.
pub fn subtract<T: ClipScalar>(
  minuend: &Multipolygon<T>,
  subtrahend: &Multipolygon<T>,
  accurate: bool,
) -> Result<Multipolygon<T>, Error> {
  compute_shaped(OperationKind::Difference, minuend, subtrahend, accurate)
}

/// Symmetric difference of two multipolygons.
pub fn symmetric_subtract<T: ClipScalar>(
  left: &Multipolygon<T>,
  right: &Multipolygon<T>,
  accurate: bool,
) -> Result<Multipolygon<T>, Error> {
  compute_shaped(OperationKind::SymmetricDifference, left, right, accurate)
}

/// Intersection of two multipolygons split into its dimensional parts:
/// isolated corner touches, shared boundary segments and area overlap.
pub fn complete_intersect<T: ClipScalar>(
  left: &Multipolygon<T>,
  right: &Multipolygon<T>,
  accurate: bool,
) -> Result<Mix<T>, Error> {
  if left.is_empty() || right.is_empty() {
    return Ok(Mix::empty());
  }
  match (multipolygon_bbox(left), multipolygon_bbox(right)) {
    (Some(first), Some(second)) if first.disjoint_with(&second) => {
      return Ok(Mix::empty());
    }
    _ => {}
  }
  if accurate && !T::EXACT {
    let mix = complete_intersect(&left.to_rational(), &right.to_rational(), false)?;
    return Ok(mix.map(|value| T::from_rational(&value)));
  }
  let mut sweep = ShapedSweep::new(OperationKind::Intersection);
  sweep.register(left, true);
  sweep.register(right, false);
  let stop_x = minimum_x_max(left.x_max(), right.x_max());
  let log = sweep.sweep(stop_x)?;
  Ok(shaped::events_to_mix(&mut sweep.events, &log))
}

fn compute_shaped<T: ClipScalar>(
  kind: OperationKind,
  left: &Multipolygon<T>,
  right: &Multipolygon<T>,
  accurate: bool,
) -> Result<Multipolygon<T>, Error> {
  if left.is_empty() || right.is_empty() {
    return Ok(match kind {
      OperationKind::Intersection => Multipolygon::empty(),
      OperationKind::Difference => left.clone(),
      OperationKind::Union | OperationKind::SymmetricDifference => {
        if left.is_empty() {
          right.clone()
        } else {
          left.clone()
        }
      }
    });
  }
  match (multipolygon_bbox(left), multipolygon_bbox(right)) {
    (Some(first), Some(second)) if first.disjoint_with(&second) => {
      return Ok(match kind {
        OperationKind::Intersection => Multipolygon::empty(),
        OperationKind::Difference => left.clone(),
        OperationKind::Union | OperationKind::SymmetricDifference => {
          concatenated(left, right)
        }
      });
    }
    _ => {}
  }
  if accurate && !T::EXACT {
    let promoted = sweep_shaped(kind, &left.to_rational(), &right.to_rational())?;
    return Ok(promoted.map(|value| T::from_rational(&value)));
  }
  sweep_shaped(kind, left, right)
}

fn sweep_shaped<T: ClipScalar>(
  kind: OperationKind,
  left: &Multipolygon<T>,
  right: &Multipolygon<T>,
) -> Result<Multipolygon<T>, Error> {
  let mut sweep = ShapedSweep::new(kind);
  sweep.register(left, true);
  sweep.register(right, false);
  let stop_x = match kind {
    OperationKind::Intersection => minimum_x_max(left.x_max(), right.x_max()),
    OperationKind::Difference => left.x_max(),
    OperationKind::Union | OperationKind::SymmetricDifference => None,
  };
  let log = sweep.sweep(stop_x)?;
  let result = shaped::events_to_multipolygon(&mut sweep.events, &log);
  for polygon in result.iter() {
    debug_assert_ok!(polygon.validate());
  }
  Ok(result)
}

/// Intersection of two multisegments.
pub fn intersect_multisegments<T: ClipScalar>(
  left: &Multisegment<T>,
  right: &Multisegment<T>,
  accurate: bool,
) -> Result<Multisegment<T>, Error> {
  compute_linear(OperationKind::Intersection, left, right, accurate)
}

/// Union of two multisegments.
pub fn unite_multisegments<T: ClipScalar>(
  left: &Multisegment<T>,
  right: &Multisegment<T>,
  accurate: bool,
) -> Result<Multisegment<T>, Error> {
  compute_linear(OperationKind::Union, left, right, accurate)
}

/// Difference of the minuend multisegment with the subtrahend multisegment.
pub fn subtract_multisegments<T: ClipScalar>(
  minuend: &Multisegment<T>,
  subtrahend: &Multisegment<T>,
  accurate: bool,
) -> Result<Multisegment<T>, Error> {
  compute_linear(OperationKind::Difference, minuend, subtrahend, accurate)
}

/// Symmetric difference of two multisegments.
pub fn symmetric_subtract_multisegments<T: ClipScalar>(
  left: &Multisegment<T>,
  right: &Multisegment<T>,
  accurate: bool,
) -> Result<Multisegment<T>, Error> {
  compute_linear(OperationKind::SymmetricDifference, left, right, accurate)
}

/// Intersection of two multisegments split into shared segments and
/// isolated crossing points.
pub fn complete_intersect_multisegments<T: ClipScalar>(
  left: &Multisegment<T>,
  right: &Multisegment<T>,
  accurate: bool,
) -> Result<Mix<T>, Error> {
  if left.is_empty() || right.is_empty() {
    return Ok(Mix::empty());
  }
  match (multisegment_bbox(left), multisegment_bbox(right)) {
    (Some(first), Some(second)) if first.disjoint_with(&second) => {
      return Ok(Mix::empty());
    }
    _ => {}
  }
  if accurate && !T::EXACT {
    let mix =
      complete_intersect_multisegments(&left.to_rational(), &right.to_rational(), false)?;
    return Ok(mix.map(|value| T::from_rational(&value)));
  }
  let mut sweep = LinearSweep::new();
  sweep.register(left, true);
  sweep.register(right, false);
  let stop_x = minimum_x_max(left.x_max(), right.x_max());
  let log = sweep.sweep(stop_x)?;
  let (points, segments) = linear::linear_mix_components(&sweep.events, &log);
  Ok(Mix::new(points, segments, Multipolygon::empty()))
}

/// Normalizes raw segments into a multisegment: crossings split the
/// participants, collinear overlaps collapse onto a single subsegment and
/// duplicates disappear.
pub fn segments_to_multisegment<T: ClipScalar>(
  segments: &[Segment<T>],
  accurate: bool,
) -> Result<Multisegment<T>, Error> {
  if segments.is_empty() {
    return Ok(Multisegment::empty());
  }
  if accurate && !T::EXACT {
    let promoted: Vec<Segment<BigRational>> = segments
      .iter()
      .map(|segment| segment.map(|value| value.to_rational()))
      .collect();
    let merged = segments_to_multisegment(&promoted, false)?;
    return Ok(merged.map(|value| T::from_rational(&value)));
  }
  let mut sweep = NarySweep::new();
  sweep.register(segments);
  let mut merged = sweep.sweep()?;
  merged.sort();
  Ok(Multisegment::new(merged))
}

fn compute_linear<T: ClipScalar>(
  kind: OperationKind,
  left: &Multisegment<T>,
  right: &Multisegment<T>,
  accurate: bool,
) -> Result<Multisegment<T>, Error> {
  if left.is_empty() || right.is_empty() {
    return Ok(match kind {
      OperationKind::Intersection => Multisegment::empty(),
      OperationKind::Difference => left.clone(),
      OperationKind::Union | OperationKind::SymmetricDifference => {
        if left.is_empty() {
          right.clone()
        } else {
          left.clone()
        }
      }
    });
  }
  match (multisegment_bbox(left), multisegment_bbox(right)) {
    (Some(first), Some(second)) if first.disjoint_with(&second) => {
      return Ok(match kind {
        OperationKind::Intersection => Multisegment::empty(),
        OperationKind::Difference => left.clone(),
        OperationKind::Union | OperationKind::SymmetricDifference => {
          let mut segments = left.segments.clone();
          segments.extend(right.segments.iter().cloned());
          segments.sort();
          Multisegment::new(segments)
        }
      });
    }
    _ => {}
  }
  if accurate && !T::EXACT {
    let promoted = sweep_linear(kind, &left.to_rational(), &right.to_rational())?;
    return Ok(promoted.map(|value| T::from_rational(&value)));
  }
  sweep_linear(kind, left, right)
}

fn sweep_linear<T: ClipScalar>(
  kind: OperationKind,
  left: &Multisegment<T>,
  right: &Multisegment<T>,
) -> Result<Multisegment<T>, Error> {
  let mut sweep = LinearSweep::new();
  sweep.register(left, true);
  sweep.register(right, false);
  let stop_x = match kind {
    OperationKind::Intersection => minimum_x_max(left.x_max(), right.x_max()),
    OperationKind::Difference => left.x_max(),
    OperationKind::Union | OperationKind::SymmetricDifference => None,
  };
  let log = sweep.sweep(stop_x)?;
  let mut segments: Vec<Segment<T>> = linear::completed_groups(&sweep.events, &log)
    .into_iter()
    .filter(|(_, operands)| match kind {
      OperationKind::Intersection => operands.iter().any(|&from_first| !from_first),
      OperationKind::Union => true,
      OperationKind::Difference => operands.iter().all(|&from_first| from_first),
      OperationKind::SymmetricDifference => {
        operands.iter().all(|&from_first| from_first == operands[0])
      }
    })
    .map(|(segment, _)| segment)
    .collect();
  segments.sort();
  Ok(Multisegment::new(segments))
}

/// The parts of the multisegment lying inside the multipolygon, boundary
/// overlaps included.
pub fn intersect_multisegment_with_multipolygon<T: ClipScalar>(
  multisegment: &Multisegment<T>,
  multipolygon: &Multipolygon<T>,
  accurate: bool,
) -> Result<Multisegment<T>, Error> {
  if multisegment.is_empty() || multipolygon.is_empty() {
    return Ok(Multisegment::empty());
  }
  match (multisegment_bbox(multisegment), multipolygon_bbox(multipolygon)) {
    (Some(first), Some(second)) if first.disjoint_with(&second) => {
      return Ok(Multisegment::empty());
    }
    _ => {}
  }
  if accurate && !T::EXACT {
    let promoted = intersect_multisegment_with_multipolygon(
      &multisegment.to_rational(),
      &multipolygon.to_rational(),
      false,
    )?;
    return Ok(promoted.map(|value| T::from_rational(&value)));
  }
  let mut sweep = MixedSweep::new(true);
  sweep.register_multisegment(multisegment);
  sweep.register_multipolygon(multipolygon);
  let stop_x = minimum_x_max(multisegment.x_max(), multipolygon.x_max());
  let log = sweep.sweep(stop_x)?;
  Ok(mixed::result_multisegment(&sweep.events, &log))
}

/// The parts of the multisegment lying strictly outside the multipolygon.
pub fn subtract_multipolygon_from_multisegment<T: ClipScalar>(
  multisegment: &Multisegment<T>,
  multipolygon: &Multipolygon<T>,
  accurate: bool,
) -> Result<Multisegment<T>, Error> {
  if multisegment.is_empty() || multipolygon.is_empty() {
    return Ok(multisegment.clone());
  }
  match (multisegment_bbox(multisegment), multipolygon_bbox(multipolygon)) {
    (Some(first), Some(second)) if first.disjoint_with(&second) => {
      return Ok(multisegment.clone());
    }
    _ => {}
  }
  if accurate && !T::EXACT {
    let promoted = subtract_multipolygon_from_multisegment(
      &multisegment.to_rational(),
      &multipolygon.to_rational(),
      false,
    )?;
    return Ok(promoted.map(|value| T::from_rational(&value)));
  }
  let mut sweep = MixedSweep::new(false);
  sweep.register_multisegment(multisegment);
  sweep.register_multipolygon(multipolygon);
  let log = sweep.sweep(multisegment.x_max())?;
  Ok(mixed::result_multisegment(&sweep.events, &log))
}

/// Intersection of a multisegment with a multipolygon split into the
/// segments inside and the isolated boundary touch points.
pub fn complete_intersect_multisegment_with_multipolygon<T: ClipScalar>(
  multisegment: &Multisegment<T>,
  multipolygon: &Multipolygon<T>,
  accurate: bool,
) -> Result<Mix<T>, Error> {
  if multisegment.is_empty() || multipolygon.is_empty() {
    return Ok(Mix::empty());
  }
  match (multisegment_bbox(multisegment), multipolygon_bbox(multipolygon)) {
    (Some(first), Some(second)) if first.disjoint_with(&second) => {
      return Ok(Mix::empty());
    }
    _ => {}
  }
  if accurate && !T::EXACT {
    let mix = complete_intersect_multisegment_with_multipolygon(
      &multisegment.to_rational(),
      &multipolygon.to_rational(),
      false,
    )?;
    return Ok(mix.map(|value| T::from_rational(&value)));
  }
  let mut sweep = MixedSweep::new(true);
  sweep.register_multisegment(multisegment);
  sweep.register_multipolygon(multipolygon);
  let stop_x = minimum_x_max(multisegment.x_max(), multipolygon.x_max());
  let log = sweep.sweep(stop_x)?;
  let (points, segments) = mixed::mixed_mix_components(&sweep.events, &log);
  Ok(Mix::new(points, segments, Multipolygon::empty()))
}

fn multipolygon_bbox<T: ClipScalar>(operand: &Multipolygon<T>) -> Option<BoundingBox<T>> {
  BoundingBox::from_points(
    operand
      .polygons
      .iter()
      .flat_map(|polygon| polygon.border.vertices.iter()),
  )
}

fn multisegment_bbox<T: ClipScalar>(operand: &Multisegment<T>) -> Option<BoundingBox<T>> {
  BoundingBox::from_points(operand.segments.iter().flat_map(|segment| {
    std::iter::once(&segment.start).chain(std::iter::once(&segment.end))
  }))
}

fn minimum_x_max<T: Ord>(left: Option<T>, right: Option<T>) -> Option<T> {
  match (left, right) {
    (Some(left), Some(right)) => Some(std::cmp::min(left, right)),
    _ => None,
  }
}

fn concatenated<T: ClipScalar>(
  left: &Multipolygon<T>,
  right: &Multipolygon<T>,
) -> Multipolygon<T> {
  let mut polygons = left.polygons.clone();
  polygons.extend(right.polygons.iter().cloned());
  polygons.sort_by(|a, b| first_border_vertex(a).cmp(first_border_vertex(b)));
  Multipolygon::new(polygons)
}

fn first_border_vertex<T>(polygon: &crate::data::Polygon<T>) -> &Point<T, 2> {
  &polygon.border.vertices[0]
}
