use num_rational::BigRational;

use crate::data::{Point, Segment};
use crate::{ClipScalar, Error, Orientation, PolygonScalar};

/// A closed vertex loop. The edge from the last vertex back to the first is
/// implicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour<T> {
  pub vertices: Vec<Point<T, 2>>,
}

impl<T> Contour<T> {
  pub fn new(vertices: Vec<Point<T, 2>>) -> Result<Contour<T>, Error> {
    if vertices.len() < 3 {
      return Err(Error::InsufficientVertices);
    }
    Ok(Contour { vertices })
  }

  pub fn new_unchecked(vertices: Vec<Point<T, 2>>) -> Contour<T> {
    Contour { vertices }
  }

  pub fn len(&self) -> usize {
    self.vertices.len()
  }

  pub fn is_empty(&self) -> bool {
    self.vertices.is_empty()
  }

  pub fn iter_edges(&self) -> impl Iterator<Item = Segment<T>> + '_
  where
    T: Clone,
  {
    let n = self.vertices.len();
    (0..n).map(move |index| {
      Segment::new(
        self.vertices[index].clone(),
        self.vertices[(index + 1) % n].clone(),
      )
    })
  }

  /// Orientation of the loop, decided at its lexicographic minimum vertex.
  pub fn orientation(&self) -> Orientation
  where
    T: PolygonScalar,
  {
    let n = self.vertices.len();
    if n < 3 {
      return Orientation::CoLinear;
    }
    let index = (0..n)
      .min_by(|&a, &b| self.vertices[a].cmp(&self.vertices[b]))
      .unwrap();
    Point::orient(
      &self.vertices[(index + n - 1) % n],
      &self.vertices[index],
      &self.vertices[(index + 1) % n],
    )
  }

  pub fn reverse(&mut self) {
    self.vertices.reverse();
  }

  pub fn reversed(mut self) -> Contour<T> {
    self.reverse();
    self
  }

  pub fn map<U, F>(&self, f: F) -> Contour<U>
  where
    T: Clone,
    F: Fn(T) -> U,
  {
    Contour {
      vertices: self.vertices.iter().map(|pt| pt.map(&f)).collect(),
    }
  }
}

/// A border with zero or more holes. Borders of well-formed polygons are
/// counter-clockwise and holes clockwise, but the clipping operations accept
/// either orientation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon<T> {
  pub border: Contour<T>,
  pub holes: Vec<Contour<T>>,
}

impl<T> Polygon<T> {
  pub fn new(border: Contour<T>, holes: Vec<Contour<T>>) -> Result<Polygon<T>, Error> {
    let polygon = Polygon::new_unchecked(border, holes);
    polygon.validate()?;
    Ok(polygon)
  }

  pub fn new_unchecked(border: Contour<T>, holes: Vec<Contour<T>>) -> Polygon<T> {
    Polygon { border, holes }
  }

  pub fn validate(&self) -> Result<(), Error> {
    if self.border.len() < 3 {
      return Err(Error::InsufficientVertices);
    }
    for hole in &self.holes {
      if hole.len() < 3 {
        return Err(Error::InsufficientVertices);
      }
    }
    Ok(())
  }

  pub fn iter_contours(&self) -> impl Iterator<Item = &Contour<T>> {
    std::iter::once(&self.border).chain(self.holes.iter())
  }

  pub fn map<U, F>(&self, f: F) -> Polygon<U>
  where
    T: Clone,
    F: Fn(T) -> U,
  {
    Polygon {
      border: self.border.map(&f),
      holes: self.holes.iter().map(|hole| hole.map(&f)).collect(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Multipolygon<T> {
  pub polygons: Vec<Polygon<T>>,
}

impl<T> Multipolygon<T> {
  pub fn new(polygons: Vec<Polygon<T>>) -> Multipolygon<T> {
    Multipolygon { polygons }
  }

  pub fn empty() -> Multipolygon<T> {
    Multipolygon { polygons: vec![] }
  }

  pub fn is_empty(&self) -> bool {
    self.polygons.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Polygon<T>> {
    self.polygons.iter()
  }

  /// Largest x-coordinate over the borders. Holes lie inside their border
  /// and cannot extend it.
  pub fn x_max(&self) -> Option<T>
  where
    T: Clone + Ord,
  {
    self
      .polygons
      .iter()
      .flat_map(|polygon| polygon.border.vertices.iter())
      .map(|vertex| vertex.x_coord().clone())
      .max()
  }

  pub fn map<U, F>(&self, f: F) -> Multipolygon<U>
  where
    T: Clone,
    F: Fn(T) -> U,
  {
    Multipolygon {
      polygons: self.polygons.iter().map(|polygon| polygon.map(&f)).collect(),
    }
  }

  pub fn to_rational(&self) -> Multipolygon<BigRational>
  where
    T: ClipScalar,
  {
    self.map(|value| value.to_rational())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Multisegment<T> {
  pub segments: Vec<Segment<T>>,
}

impl<T> Multisegment<T> {
  pub fn new(segments: Vec<Segment<T>>) -> Multisegment<T> {
    Multisegment { segments }
  }

  pub fn empty() -> Multisegment<T> {
    Multisegment { segments: vec![] }
  }

  pub fn is_empty(&self) -> bool {
    self.segments.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Segment<T>> {
    self.segments.iter()
  }

  pub fn x_max(&self) -> Option<T>
  where
    T: Clone + Ord,
  {
    self
      .segments
      .iter()
      .map(|segment| {
        std::cmp::max(segment.start.x_coord(), segment.end.x_coord()).clone()
      })
      .max()
  }

  pub fn map<U, F>(&self, f: F) -> Multisegment<U>
  where
    T: Clone,
    F: Fn(T) -> U,
  {
    Multisegment {
      segments: self.segments.iter().map(|segment| segment.map(&f)).collect(),
    }
  }

  pub fn to_rational(&self) -> Multisegment<BigRational>
  where
    T: ClipScalar,
  {
    self.map(|value| value.to_rational())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Multipoint<T> {
  pub points: Vec<Point<T, 2>>,
}

impl<T> Multipoint<T> {
  pub fn new(points: Vec<Point<T, 2>>) -> Multipoint<T> {
    Multipoint { points }
  }

  pub fn empty() -> Multipoint<T> {
    Multipoint { points: vec![] }
  }

  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }

  pub fn map<U, F>(&self, f: F) -> Multipoint<U>
  where
    T: Clone,
    F: Fn(T) -> U,
  {
    Multipoint {
      points: self.points.iter().map(|pt| pt.map(&f)).collect(),
    }
  }
}

/// The dimensional components of a complete intersection: isolated touch
/// points, shared boundary segments and regions of area overlap.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mix<T> {
  pub points: Multipoint<T>,
  pub segments: Multisegment<T>,
  pub polygons: Multipolygon<T>,
}

impl<T> Mix<T> {
  pub fn new(
    points: Multipoint<T>,
    segments: Multisegment<T>,
    polygons: Multipolygon<T>,
  ) -> Mix<T> {
    Mix {
      points,
      segments,
      polygons,
    }
  }

  pub fn empty() -> Mix<T> {
    Mix {
      points: Multipoint::empty(),
      segments: Multisegment::empty(),
      polygons: Multipolygon::empty(),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.points.is_empty() && self.segments.is_empty() && self.polygons.is_empty()
  }

  pub fn map<U, F>(&self, f: F) -> Mix<U>
  where
    T: Clone,
    F: Fn(T) -> U,
  {
    Mix {
      points: self.points.map(&f),
      segments: self.segments.map(&f),
      polygons: self.polygons.map(&f),
    }
  }
}

#[cfg(test)]
pub mod tests {
  use super::*;

  fn square(origin: (i64, i64), size: i64) -> Contour<i64> {
    let (x, y) = origin;
    Contour::new_unchecked(vec![
      Point::new([x, y]),
      Point::new([x + size, y]),
      Point::new([x + size, y + size]),
      Point::new([x, y + size]),
    ])
  }

  #[test]
  fn orientation_of_square() {
    assert_eq!(square((0, 0), 2).orientation(), Orientation::CounterClockWise);
    assert_eq!(
      square((0, 0), 2).reversed().orientation(),
      Orientation::ClockWise
    );
  }

  #[test]
  fn validate_rejects_degenerate_rings() {
    let stub = Contour::new_unchecked(vec![Point::new([0, 0]), Point::new([1, 0])]);
    assert_eq!(
      Polygon::new(stub, vec![]).err(),
      Some(Error::InsufficientVertices)
    );
    let flat = Contour::new_unchecked(vec![Point::new([1, 1]), Point::new([2, 2])]);
    assert_eq!(
      Polygon::new(square((0, 0), 4), vec![flat]).err(),
      Some(Error::InsufficientVertices)
    );
  }

  #[test]
  fn x_max_ignores_holes() {
    let polygon = Polygon::new_unchecked(square((0, 0), 4), vec![square((1, 1), 2)]);
    let multipolygon = Multipolygon::new(vec![polygon]);
    assert_eq!(multipolygon.x_max(), Some(4));
  }

  #[test]
  fn iter_edges_wraps_around() {
    let contour = square((0, 0), 1);
    let edges: Vec<Segment<i64>> = contour.iter_edges().collect();
    assert_eq!(edges.len(), 4);
    assert_eq!(edges[3].start, Point::new([0, 1]));
    assert_eq!(edges[3].end, Point::new([0, 0]));
  }
}
