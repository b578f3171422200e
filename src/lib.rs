//! Boolean operations on planar polygonal and linear geometry.
//!
//! The crate computes intersections, unions, differences and symmetric
//! differences of multipolygons, multisegments and their mixtures with a
//! single Martinez-Rueda sweep-line engine. Coordinates are generic: exact
//! results come from `num::BigRational`, approximate ones from `NotNan<f64>`
//! with an optional promotion to rationals for robustness.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{NumOps, ToPrimitive, Zero};
use ordered_float::{NotNan, OrderedFloat};
use rand::Rng;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::ops::Neg;

pub mod algorithms;
pub mod data;
mod intersection;
mod orientation;
#[cfg(test)]
pub(crate) mod testing;

pub use intersection::{Intersects, SegmentsIntersection};
pub use orientation::Orientation;

use data::{Contour, Multipolygon, Point, Polygon};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// A contour has fewer than three vertices.
  InsufficientVertices,
  /// Two edges of the same operand overlap collinearly.
  OverlappingEdges,
  /// The geometric predicates contradicted each other. Only reachable with
  /// inexact coordinates under floating-point rounding.
  NumericInconsistency,
}

/// Scalars that support an exact orientation test.
///
/// `cmp_slope` compares the slopes of `p->q` and `p->r`:
/// `Ordering::Greater` means the walk `p`, `q`, `r` turns counter-clockwise,
/// `Ordering::Equal` that the three points are colinear.
///
/// Fixed-precision integers widen before multiplying and never overflow.
/// `NotNan<f64>` and `OrderedFloat<f64>` use the adaptive-precision
/// `geometry_predicates::orient2d` and are exact for any pair of doubles.
pub trait PolygonScalar:
  Debug + Clone + Ord + NumOps<Self, Self> + Neg<Output = Self> + Zero
{
  fn cmp_slope(p: &[Self; 2], q: &[Self; 2], r: &[Self; 2]) -> Ordering;
}

macro_rules! fixed_precision {
  ($ty:ty, $wide:ty) => {
    impl PolygonScalar for $ty {
      fn cmp_slope(p: &[$ty; 2], q: &[$ty; 2], r: &[$ty; 2]) -> Ordering {
        let ux = q[0] as $wide - p[0] as $wide;
        let uy = q[1] as $wide - p[1] as $wide;
        let vx = r[0] as $wide - p[0] as $wide;
        let vy = r[1] as $wide - p[1] as $wide;
        (ux * vy).cmp(&(uy * vx))
      }
    }
  };
}

fixed_precision!(i8, i64);
fixed_precision!(i16, i64);
fixed_precision!(i32, i128);

impl PolygonScalar for i64 {
  fn cmp_slope(p: &[i64; 2], q: &[i64; 2], r: &[i64; 2]) -> Ordering {
    let ux = BigInt::from(q[0]) - BigInt::from(p[0]);
    let uy = BigInt::from(q[1]) - BigInt::from(p[1]);
    let vx = BigInt::from(r[0]) - BigInt::from(p[0]);
    let vy = BigInt::from(r[1]) - BigInt::from(p[1]);
    (ux * vy).cmp(&(uy * vx))
  }
}

impl PolygonScalar for BigInt {
  fn cmp_slope(p: &[BigInt; 2], q: &[BigInt; 2], r: &[BigInt; 2]) -> Ordering {
    let ux = q[0].clone() - &p[0];
    let uy = q[1].clone() - &p[1];
    let vx = r[0].clone() - &p[0];
    let vy = r[1].clone() - &p[1];
    (ux * vy).cmp(&(uy * vx))
  }
}

impl PolygonScalar for BigRational {
  fn cmp_slope(
    p: &[BigRational; 2],
    q: &[BigRational; 2],
    r: &[BigRational; 2],
  ) -> Ordering {
    let ux = q[0].clone() - &p[0];
    let uy = q[1].clone() - &p[1];
    let vx = r[0].clone() - &p[0];
    let vy = r[1].clone() - &p[1];
    (ux * vy).cmp(&(uy * vx))
  }
}

fn cmp_slope_f64(p: [f64; 2], q: [f64; 2], r: [f64; 2]) -> Ordering {
  let det = geometry_predicates::orient2d(p, q, r);
  if det > 0.0 {
    Ordering::Greater
  } else if det < 0.0 {
    Ordering::Less
  } else {
    Ordering::Equal
  }
}

impl PolygonScalar for NotNan<f64> {
  fn cmp_slope(
    p: &[NotNan<f64>; 2],
    q: &[NotNan<f64>; 2],
    r: &[NotNan<f64>; 2],
  ) -> Ordering {
    cmp_slope_f64(
      [p[0].into_inner(), p[1].into_inner()],
      [q[0].into_inner(), q[1].into_inner()],
      [r[0].into_inner(), r[1].into_inner()],
    )
  }
}

impl PolygonScalar for OrderedFloat<f64> {
  fn cmp_slope(
    p: &[OrderedFloat<f64>; 2],
    q: &[OrderedFloat<f64>; 2],
    r: &[OrderedFloat<f64>; 2],
  ) -> Ordering {
    cmp_slope_f64(
      [p[0].into_inner(), p[1].into_inner()],
      [q[0].into_inner(), q[1].into_inner()],
      [r[0].into_inner(), r[1].into_inner()],
    )
  }
}

/// Coordinate backends accepted by the clipping engine.
///
/// The sweep divides edges at intersection points, so the scalar has to be a
/// field: integers can describe the inputs but not the subdivision points.
/// Inexact backends advertise `EXACT = false` and can be promoted to
/// `BigRational` for the duration of an operation.
pub trait ClipScalar: PolygonScalar {
  const EXACT: bool;

  fn to_rational(&self) -> BigRational;
  fn from_rational(value: &BigRational) -> Self;
}

impl ClipScalar for BigRational {
  const EXACT: bool = true;

  fn to_rational(&self) -> BigRational {
    self.clone()
  }

  fn from_rational(value: &BigRational) -> BigRational {
    value.clone()
  }
}

impl ClipScalar for NotNan<f64> {
  const EXACT: bool = false;

  fn to_rational(&self) -> BigRational {
    BigRational::from_float(self.into_inner()).unwrap()
  }

  fn from_rational(value: &BigRational) -> NotNan<f64> {
    NotNan::new(value.to_f64().unwrap()).unwrap()
  }
}

impl ClipScalar for OrderedFloat<f64> {
  const EXACT: bool = false;

  fn to_rational(&self) -> BigRational {
    BigRational::from_float(self.into_inner()).unwrap()
  }

  fn from_rational(value: &BigRational) -> OrderedFloat<f64> {
    OrderedFloat(value.to_f64().unwrap())
  }
}

/// Random multipolygon of `count` axis-aligned rectangles placed on disjoint
/// grid cells, handy for fuzzing the boolean operations.
pub fn random_rectangles<R>(count: usize, cells: i64, rng: &mut R) -> Multipolygon<i64>
where
  R: Rng + ?Sized,
{
  let cells = std::cmp::max(cells, 1);
  let mut picked = BTreeSet::new();
  while (picked.len() as i64) < std::cmp::min(count as i64, cells * cells) {
    picked.insert((rng.gen_range(0..cells), rng.gen_range(0..cells)));
  }
  let mut polygons = Vec::with_capacity(picked.len());
  for (column, row) in picked {
    let x = column * 3;
    let y = row * 3;
    let width = rng.gen_range(1..=2);
    let height = rng.gen_range(1..=2);
    let border = Contour::new_unchecked(vec![
      Point::new([x, y]),
      Point::new([x + width, y]),
      Point::new([x + width, y + height]),
      Point::new([x, y + height]),
    ]);
    polygons.push(Polygon::new_unchecked(border, vec![]));
  }
  Multipolygon::new(polygons)
}
