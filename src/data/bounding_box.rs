use super::Point;

/// Axis-aligned bounding box used by the trivial-rejection shortcuts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundingBox<T> {
  pub x_min: T,
  pub x_max: T,
  pub y_min: T,
  pub y_max: T,
}

impl<T> BoundingBox<T>
where
  T: Clone + Ord,
{
  pub fn from_points<'a, I>(points: I) -> Option<BoundingBox<T>>
  where
    T: 'a,
    I: IntoIterator<Item = &'a Point<T, 2>>,
  {
    let mut points = points.into_iter();
    let first = points.next()?;
    let mut result = BoundingBox {
      x_min: first.x_coord().clone(),
      x_max: first.x_coord().clone(),
      y_min: first.y_coord().clone(),
      y_max: first.y_coord().clone(),
    };
    for point in points {
      if point.x_coord() < &result.x_min {
        result.x_min = point.x_coord().clone();
      }
      if point.x_coord() > &result.x_max {
        result.x_max = point.x_coord().clone();
      }
      if point.y_coord() < &result.y_min {
        result.y_min = point.y_coord().clone();
      }
      if point.y_coord() > &result.y_max {
        result.y_max = point.y_coord().clone();
      }
    }
    Some(result)
  }

  pub fn disjoint_with(&self, other: &BoundingBox<T>) -> bool {
    self.x_min > other.x_max
      || self.x_max < other.x_min
      || self.y_min > other.y_max
      || self.y_max < other.y_min
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn boxed(points: &[(i64, i64)]) -> BoundingBox<i64> {
    let points: Vec<Point<i64, 2>> = points.iter().map(|&p| p.into()).collect();
    BoundingBox::from_points(points.iter()).unwrap()
  }

  #[test]
  fn from_points_tracks_extremes() {
    let bbox = boxed(&[(1, 7), (-2, 3), (5, -1)]);
    assert_eq!(bbox.x_min, -2);
    assert_eq!(bbox.x_max, 5);
    assert_eq!(bbox.y_min, -1);
    assert_eq!(bbox.y_max, 7);
  }

  #[test]
  fn disjoint_with_separated_boxes() {
    assert!(boxed(&[(0, 0), (1, 1)]).disjoint_with(&boxed(&[(2, 2), (3, 3)])));
    assert!(!boxed(&[(0, 0), (2, 2)]).disjoint_with(&boxed(&[(1, 1), (3, 3)])));
    // touching boxes intersect
    assert!(!boxed(&[(0, 0), (1, 1)]).disjoint_with(&boxed(&[(1, 1), (2, 2)])));
  }
}
