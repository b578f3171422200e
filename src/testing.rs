// Strategies and helpers shared by the clipping test modules:
//  * axis-aligned rectangle operands with exact coordinates
//  * canonical forms for comparing multipolygons up to vertex rotation
use num_rational::BigRational;
use proptest::prelude::*;

use crate::data::{Contour, Multipolygon, Multisegment, Point, Polygon, Segment};

pub(crate) fn rational(value: i64) -> BigRational {
  BigRational::from_integer(value.into())
}

pub(crate) fn rational_point(x: i64, y: i64) -> Point<BigRational, 2> {
  Point::new([rational(x), rational(y)])
}

pub(crate) fn rectangle(x: i64, y: i64, width: i64, height: i64) -> Polygon<BigRational> {
  Polygon::new_unchecked(
    Contour::new_unchecked(vec![
      rational_point(x, y),
      rational_point(x + width, y),
      rational_point(x + width, y + height),
      rational_point(x, y + height),
    ]),
    vec![],
  )
}

pub(crate) fn rectangle_multipolygon(
  x: i64,
  y: i64,
  width: i64,
  height: i64,
) -> Multipolygon<BigRational> {
  Multipolygon::new(vec![rectangle(x, y, width, height)])
}

pub(crate) fn segment(a: (i64, i64), b: (i64, i64)) -> Segment<BigRational> {
  Segment::new(rational_point(a.0, a.1), rational_point(b.0, b.1))
}

pub(crate) fn multisegment(endpoints: &[((i64, i64), (i64, i64))]) -> Multisegment<BigRational> {
  Multisegment::new(endpoints.iter().map(|&(a, b)| segment(a, b)).collect())
}

/// A single random rectangle within a small grid.
pub(crate) fn arb_rectangle() -> impl Strategy<Value = Multipolygon<BigRational>> {
  (0i64..6, 0i64..6, 1i64..5, 1i64..5)
    .prop_map(|(x, y, width, height)| rectangle_multipolygon(x, y, width, height))
}

fn canonical_contour(contour: &Contour<BigRational>) -> Contour<BigRational> {
  let n = contour.len();
  if n == 0 {
    return contour.clone();
  }
  let pivot = (0..n)
    .min_by(|&a, &b| contour.vertices[a].cmp(&contour.vertices[b]))
    .unwrap();
  let mut vertices = Vec::with_capacity(n);
  for index in 0..n {
    vertices.push(contour.vertices[(pivot + index) % n].clone());
  }
  Contour::new_unchecked(vertices)
}

/// Rotates every ring to its minimum vertex and orders rings and polygons,
/// so that structurally equal results compare equal.
pub(crate) fn canonical(multipolygon: &Multipolygon<BigRational>) -> Multipolygon<BigRational> {
  let mut polygons: Vec<Polygon<BigRational>> = multipolygon
    .iter()
    .map(|polygon| {
      let border = canonical_contour(&polygon.border);
      let mut holes: Vec<Contour<BigRational>> =
        polygon.holes.iter().map(canonical_contour).collect();
      holes.sort_by(|a, b| a.vertices.cmp(&b.vertices));
      Polygon::new_unchecked(border, holes)
    })
    .collect();
  polygons.sort_by(|a, b| a.border.vertices.cmp(&b.border.vertices));
  Multipolygon::new(polygons)
}

pub(crate) fn assert_equivalent(
  left: &Multipolygon<BigRational>,
  right: &Multipolygon<BigRational>,
) {
  assert_eq!(canonical(left), canonical(right));
}

fn signed_area_doubled(contour: &Contour<BigRational>) -> BigRational {
  let n = contour.len();
  let mut total = rational(0);
  for index in 0..n {
    let p = &contour.vertices[index];
    let q = &contour.vertices[(index + 1) % n];
    total = total + (p.x_coord().clone() * q.y_coord().clone()
      - q.x_coord().clone() * p.y_coord().clone());
  }
  total
}

/// Area enclosed by the multipolygon. Relies on the output conventions:
/// borders counter-clockwise, holes clockwise.
pub(crate) fn area(multipolygon: &Multipolygon<BigRational>) -> BigRational {
  let mut doubled = rational(0);
  for polygon in multipolygon.iter() {
    doubled = doubled + signed_area_doubled(&polygon.border);
    for hole in &polygon.holes {
      doubled = doubled + signed_area_doubled(hole);
    }
  }
  doubled / rational(2)
}
