use array_init::array_init;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Float;
use ordered_float::NotNan;
use std::ops::Deref;
use std::ops::Index;

use crate::{Orientation, PolygonScalar};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Point<T, const N: usize = 2> {
  pub array: [T; N],
}

// Methods on N-dimensional points.
impl<T, const N: usize> Point<T, N> {
  pub const fn new(array: [T; N]) -> Point<T, N> {
    Point { array }
  }

  /// # Panics
  ///
  /// Panics if any of the inputs are NaN.
  pub fn new_nn(array: [T; N]) -> Point<NotNan<T>, N>
  where
    T: Float + ordered_float::FloatCore,
  {
    Point::new(array_init(|i| NotNan::new(array[i]).unwrap()))
  }

  pub fn map<U, F>(&self, f: F) -> Point<U, N>
  where
    T: Clone,
    F: Fn(T) -> U,
  {
    Point {
      array: array_init(|i| f(self.array[i].clone())),
    }
  }

  pub fn cast<U>(&self) -> Point<U, N>
  where
    T: Clone + Into<U>,
  {
    Point {
      array: array_init(|i| self.array[i].clone().into()),
    }
  }
}

impl<T, const N: usize> Index<usize> for Point<T, N> {
  type Output = T;
  fn index(&self, key: usize) -> &T {
    self.array.index(key)
  }
}

impl<T> From<(T, T)> for Point<T, 2> {
  fn from(point: (T, T)) -> Point<T, 2> {
    Point {
      array: [point.0, point.1],
    }
  }
}

impl From<Point<i64, 2>> for Point<BigInt, 2> {
  fn from(point: Point<i64, 2>) -> Point<BigInt, 2> {
    Point {
      array: [point.array[0].into(), point.array[1].into()],
    }
  }
}

impl From<Point<i64, 2>> for Point<BigRational, 2> {
  fn from(point: Point<i64, 2>) -> Point<BigRational, 2> {
    Point {
      array: [
        BigRational::from_integer(point.array[0].into()),
        BigRational::from_integer(point.array[1].into()),
      ],
    }
  }
}

// Methods on two-dimensional points.
impl<T: PolygonScalar> Point<T> {
  /// Determine the direction you have to turn if you walk from `p1`
  /// to `p2` to `p3`.
  ///
  /// # Examples
  ///
  /// ```rust
  /// # use polybool::data::Point;
  /// # use polybool::Orientation;
  /// let p1 = Point::new([ 0, 0 ]);
  /// let p2 = Point::new([ 0, 1 ]); // One unit above p1.
  /// // (0,0) -> (0,1) -> (0,2) == Orientation::CoLinear
  /// assert!(Point::orient(&p1, &p2, &Point::new([ 0, 2 ])).is_colinear());
  /// // (0,0) -> (0,1) -> (-1,2) == Orientation::CounterClockWise
  /// assert!(Point::orient(&p1, &p2, &Point::new([ -1, 2 ])).is_ccw());
  /// // (0,0) -> (0,1) -> (1,2) == Orientation::ClockWise
  /// assert!(Point::orient(&p1, &p2, &Point::new([ 1, 2 ])).is_cw());
  /// ```
  pub fn orient(p1: &Point<T, 2>, p2: &Point<T, 2>, p3: &Point<T, 2>) -> Orientation {
    Orientation::new(&p1.array, &p2.array, &p3.array)
  }

  pub fn all_colinear(pts: &[Point<T>]) -> bool {
    if pts.len() < 3 {
      return true;
    }
    pts
      .iter()
      .all(|pt| Point::orient(&pts[0], &pts[1], pt).is_colinear())
  }
}

impl<T> Point<T, 2> {
  pub fn x_coord(&self) -> &T {
    &self.array[0]
  }
  pub fn y_coord(&self) -> &T {
    &self.array[1]
  }
}

impl<T, const N: usize> Deref for Point<T, N> {
  type Target = [T; N];
  fn deref(&self) -> &[T; N] {
    &self.array
  }
}

#[cfg(test)]
pub mod tests {
  use super::*;
  use crate::Orientation::*;

  use num_rational::BigRational;
  use proptest::prelude::*;
  use test_strategy::proptest;

  #[proptest]
  fn orient_bigint_i8_prop(pt1: [i8; 2], pt2: [i8; 2], pt3: [i8; 2]) {
    let narrow = |a: [i8; 2]| Point::new(a);
    let wide = |a: [i8; 2]| Point::<BigInt, 2>::new([a[0].into(), a[1].into()]);
    prop_assert_eq!(
      Point::orient(&narrow(pt1), &narrow(pt2), &narrow(pt3)),
      Point::orient(&wide(pt1), &wide(pt2), &wide(pt3))
    )
  }

  #[proptest]
  fn orient_rational_i8_prop(pt1: [i8; 2], pt2: [i8; 2], pt3: [i8; 2]) {
    let narrow = |a: [i8; 2]| Point::new(a);
    let wide = |a: [i8; 2]| {
      Point::<BigRational, 2>::new([
        BigRational::from_integer(a[0].into()),
        BigRational::from_integer(a[1].into()),
      ])
    };
    prop_assert_eq!(
      Point::orient(&narrow(pt1), &narrow(pt2), &narrow(pt3)),
      Point::orient(&wide(pt1), &wide(pt2), &wide(pt3))
    )
  }

  #[proptest]
  fn orientation_reverse(pt1: [i64; 2], pt2: [i64; 2], pt3: [i64; 2]) {
    let abc = Point::orient(&Point::new(pt1), &Point::new(pt2), &Point::new(pt3));
    let cba = Point::orient(&Point::new(pt3), &Point::new(pt2), &Point::new(pt1));
    prop_assert_eq!(abc, cba.reverse())
  }

  #[test]
  fn test_turns() {
    assert_eq!(
      Point::orient(
        &Point::new([0, 0]),
        &Point::new([1, 1]),
        &Point::new([2, 2])
      ),
      CoLinear
    );
    assert_eq!(
      Point::orient(
        &Point::new_nn([0.0, 0.0]),
        &Point::new_nn([1.0, 1.0]),
        &Point::new_nn([2.0, 2.0])
      ),
      CoLinear
    );

    assert_eq!(
      Point::orient(
        &Point::new([0, 0]),
        &Point::new([0, 1]),
        &Point::new([2, 2])
      ),
      ClockWise
    );
    assert_eq!(
      Point::orient(
        &Point::new([0, 0]),
        &Point::new([0, 1]),
        &Point::new([-2, 2])
      ),
      CounterClockWise
    );
  }

  #[test]
  fn lexicographic_order() {
    assert!(Point::new([0, 5]) < Point::new([1, 0]));
    assert!(Point::new([1, 0]) < Point::new([1, 1]));
    assert_eq!(Point::new([2, 2]), Point::new([2, 2]));
  }
}
