use crate::data::{Point, Segment};
use crate::ClipScalar;

pub trait Intersects<T = Self> {
  type Result;
  fn intersect(self, other: T) -> Option<Self::Result>;
}

/// How two segments meet: in a single point (a proper crossing or an
/// endpoint touch) or in a collinear overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentsIntersection<T> {
  Point(Point<T, 2>),
  Overlap(Point<T, 2>, Point<T, 2>),
}

// Crossing of the supporting lines. Exact whenever the scalar divides
// exactly.
fn cross_point<T: ClipScalar>(
  a1: &Point<T, 2>,
  a2: &Point<T, 2>,
  b1: &Point<T, 2>,
  b2: &Point<T, 2>,
) -> Point<T, 2> {
  let dx1 = a2.x_coord().clone() - a1.x_coord().clone();
  let dy1 = a2.y_coord().clone() - a1.y_coord().clone();
  let dx2 = b2.x_coord().clone() - b1.x_coord().clone();
  let dy2 = b2.y_coord().clone() - b1.y_coord().clone();
  let denominator = dx1.clone() * dy2.clone() - dy1.clone() * dx2.clone();
  let shift_x = b1.x_coord().clone() - a1.x_coord().clone();
  let shift_y = b1.y_coord().clone() - a1.y_coord().clone();
  let t = (shift_x * dy2 - shift_y * dx2) / denominator;
  Point::new([
    a1.x_coord().clone() + t.clone() * dx1,
    a1.y_coord().clone() + t * dy1,
  ])
}

fn contains_colinear<T: Ord>(
  point: &Point<T, 2>,
  start: &Point<T, 2>,
  end: &Point<T, 2>,
) -> bool {
  start <= point && point <= end
}

impl<'a, T> Intersects for &'a Segment<T>
where
  T: ClipScalar,
{
  type Result = SegmentsIntersection<T>;

  fn intersect(self, other: &'a Segment<T>) -> Option<SegmentsIntersection<T>> {
    let (a1, a2) = if self.start <= self.end {
      (&self.start, &self.end)
    } else {
      (&self.end, &self.start)
    };
    let (b1, b2) = if other.start <= other.end {
      (&other.start, &other.end)
    } else {
      (&other.end, &other.start)
    };
    let a_to_b1 = Point::orient(a1, a2, b1);
    let a_to_b2 = Point::orient(a1, a2, b2);
    if a_to_b1.is_colinear() && a_to_b2.is_colinear() {
      let start = std::cmp::max(a1, b1);
      let end = std::cmp::min(a2, b2);
      return match start.cmp(end) {
        std::cmp::Ordering::Less => Some(SegmentsIntersection::Overlap(
          start.clone(),
          end.clone(),
        )),
        std::cmp::Ordering::Equal => Some(SegmentsIntersection::Point(start.clone())),
        std::cmp::Ordering::Greater => None,
      };
    }
    let b_to_a1 = Point::orient(b1, b2, a1);
    let b_to_a2 = Point::orient(b1, b2, a2);
    if a_to_b1.is_colinear() {
      return if contains_colinear(b1, a1, a2) {
        Some(SegmentsIntersection::Point(b1.clone()))
      } else {
        None
      };
    }
    if a_to_b2.is_colinear() {
      return if contains_colinear(b2, a1, a2) {
        Some(SegmentsIntersection::Point(b2.clone()))
      } else {
        None
      };
    }
    if b_to_a1.is_colinear() {
      return if contains_colinear(a1, b1, b2) {
        Some(SegmentsIntersection::Point(a1.clone()))
      } else {
        None
      };
    }
    if b_to_a2.is_colinear() {
      return if contains_colinear(a2, b1, b2) {
        Some(SegmentsIntersection::Point(a2.clone()))
      } else {
        None
      };
    }
    if a_to_b1 == a_to_b2.reverse() && b_to_a1 == b_to_a2.reverse() {
      return Some(SegmentsIntersection::Point(cross_point(a1, a2, b1, b2)));
    }
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use num_rational::BigRational;
  use proptest::prelude::*;
  use test_strategy::proptest;

  fn rational(value: i64) -> BigRational {
    BigRational::from_integer(value.into())
  }

  fn segment(a: (i64, i64), b: (i64, i64)) -> Segment<BigRational> {
    Segment::new(
      Point::new([rational(a.0), rational(a.1)]),
      Point::new([rational(b.0), rational(b.1)]),
    )
  }

  fn point(p: (i64, i64)) -> Point<BigRational, 2> {
    Point::new([rational(p.0), rational(p.1)])
  }

  #[test]
  fn proper_crossing() {
    let l1 = segment((0, 0), (2, 2));
    let l2 = segment((0, 2), (2, 0));
    assert_eq!(
      l1.intersect(&l2),
      Some(SegmentsIntersection::Point(point((1, 1))))
    );
  }

  #[test]
  fn disjoint_segments() {
    let l1 = segment((0, 0), (1, 0));
    let l2 = segment((2, 1), (3, 1));
    assert_eq!(l1.intersect(&l2), None);
  }

  #[test]
  fn shared_endpoint() {
    let l1 = segment((0, 0), (2, 0));
    let l2 = segment((2, 0), (2, 2));
    assert_eq!(
      l1.intersect(&l2),
      Some(SegmentsIntersection::Point(point((2, 0))))
    );
  }

  #[test]
  fn endpoint_on_interior() {
    let l1 = segment((0, 0), (4, 0));
    let l2 = segment((2, 0), (2, 2));
    assert_eq!(
      l1.intersect(&l2),
      Some(SegmentsIntersection::Point(point((2, 0))))
    );
  }

  #[test]
  fn colinear_overlap() {
    let l1 = segment((0, 0), (3, 3));
    let l2 = segment((1, 1), (5, 5));
    assert_eq!(
      l1.intersect(&l2),
      Some(SegmentsIntersection::Overlap(point((1, 1)), point((3, 3))))
    );
  }

  #[test]
  fn colinear_touch() {
    let l1 = segment((0, 0), (1, 1));
    let l2 = segment((1, 1), (2, 2));
    assert_eq!(
      l1.intersect(&l2),
      Some(SegmentsIntersection::Point(point((1, 1))))
    );
  }

  #[test]
  fn colinear_disjoint() {
    let l1 = segment((0, 0), (1, 1));
    let l2 = segment((2, 2), (3, 3));
    assert_eq!(l1.intersect(&l2), None);
  }

  #[test]
  fn near_miss() {
    let l1 = segment((0, 0), (1, 0));
    let l2 = segment((1, 1), (0, 1));
    assert_eq!(l1.intersect(&l2), None);
  }

  #[test]
  fn crossing_point_is_rational() {
    let l1 = segment((0, 0), (3, 1));
    let l2 = segment((0, 1), (3, 0));
    let expected = Point::new([
      BigRational::new(3.into(), 2.into()),
      BigRational::new(1.into(), 2.into()),
    ]);
    assert_eq!(l1.intersect(&l2), Some(SegmentsIntersection::Point(expected)));
  }

  #[proptest]
  fn intersection_is_symmetric(a: [i8; 2], b: [i8; 2], c: [i8; 2], d: [i8; 2]) {
    prop_assume!(a != b && c != d);
    let l1 = segment((a[0] as i64, a[1] as i64), (b[0] as i64, b[1] as i64));
    let l2 = segment((c[0] as i64, c[1] as i64), (d[0] as i64, d[1] as i64));
    prop_assert_eq!(l1.intersect(&l2), l2.intersect(&l1));
  }
}
