use std::cmp::Ordering;

use super::event::{EventId, Events};
use crate::data::Point;
use crate::{ClipScalar, Orientation};

/// The sweep-line status: the left events whose edges currently cross the
/// sweep line, ordered from bottom to top in a sorted vector.
///
/// Edges are subdivided at every discovered crossing, so two active edges
/// never swap while both remain in the status.
#[derive(Debug)]
pub(crate) struct SweepLine<T> {
  current_x: Option<T>,
  active: Vec<EventId>,
}

impl<T: ClipScalar> SweepLine<T> {
  pub fn new() -> SweepLine<T> {
    SweepLine {
      current_x: None,
      active: Vec::new(),
    }
  }

  pub fn move_to(&mut self, x: T) {
    self.current_x = Some(x);
  }

  pub fn insert(&mut self, events: &Events<T>, event: EventId) -> usize {
    let slot = match self.search(events, event) {
      Ok(slot) => slot,
      Err(slot) => slot,
    };
    self.active.insert(slot, event);
    slot
  }

  /// Like `insert`, but leaves an edge with an order-equal twin out of the
  /// status. The n-ary merge drops duplicate subsegments this way.
  pub fn insert_if_absent(&mut self, events: &Events<T>, event: EventId) -> Option<usize> {
    match self.search(events, event) {
      Ok(_) => None,
      Err(slot) => {
        self.active.insert(slot, event);
        Some(slot)
      }
    }
  }

  fn search(&self, events: &Events<T>, event: EventId) -> Result<usize, usize> {
    let x = self
      .current_x
      .as_ref()
      .expect("the sweep position is set before the first insertion");
    self
      .active
      .binary_search_by(|&probe| sweep_order(events, x, probe, event))
  }

  pub fn position(&self, event: EventId) -> Option<usize> {
    self.active.iter().position(|&active| active == event)
  }

  pub fn remove(&mut self, slot: usize) {
    self.active.remove(slot);
  }

  pub fn above(&self, slot: usize) -> Option<EventId> {
    self.active.get(slot + 1).copied()
  }

  pub fn below(&self, slot: usize) -> Option<EventId> {
    slot.checked_sub(1).map(|below| self.active[below])
  }
}

// The y-coordinate of the edge at the given sweep position.
fn y_at<T: ClipScalar>(events: &Events<T>, event: EventId, x: &T) -> T {
  let start = &events[event].start;
  let end = events.end(event);
  if start.x_coord() == end.x_coord() || start.y_coord() == end.y_coord() {
    return start.y_coord().clone();
  }
  if x == start.x_coord() {
    return start.y_coord().clone();
  }
  if x == end.x_coord() {
    return end.y_coord().clone();
  }
  let run = end.x_coord().clone() - start.x_coord().clone();
  let rise = end.y_coord().clone() - start.y_coord().clone();
  start.y_coord().clone() + (x.clone() - start.x_coord().clone()) * rise / run
}

/// Is the edge of `a` below the edge of `b` at the current sweep position?
///
/// Mirrors the queue order's glossary: `Less` means below. Endpoint
/// orientations decide whenever one edge lies entirely on one side of the
/// other; the remaining genuinely crossing configurations fall back to the
/// y-coordinates at the sweep position.
pub(crate) fn sweep_order<T: ClipScalar>(
  events: &Events<T>,
  current_x: &T,
  a: EventId,
  b: EventId,
) -> Ordering {
  if a == b {
    return Ordering::Equal;
  }
  let start = &events[a].start;
  let end = events.end(a);
  let other_start = &events[b].start;
  let other_end = events.end(b);
  let other_start_orientation = Point::orient(start, end, other_start);
  let other_end_orientation = Point::orient(start, end, other_end);
  if other_start_orientation == other_end_orientation {
    if !other_start_orientation.is_colinear() {
      // the other edge lies entirely on one side
      return side_to_ordering(other_start_orientation);
    }
    // collinear edges
    if events[a].from_first != events[b].from_first {
      return if events[a].from_first {
        Ordering::Less
      } else {
        Ordering::Greater
      };
    }
    return if start.x_coord() == other_start.x_coord() {
      if start.y_coord() != other_start.y_coord() {
        // vertical edges
        start.y_coord().cmp(other_start.y_coord())
      } else {
        end.y_coord().cmp(other_end.y_coord())
      }
    } else if start.y_coord() != other_start.y_coord() {
      start.y_coord().cmp(other_start.y_coord())
    } else {
      // horizontal edges
      start.x_coord().cmp(other_start.x_coord())
    };
  }
  let start_orientation = Point::orient(other_start, other_end, start);
  let end_orientation = Point::orient(other_start, other_end, end);
  if start_orientation == end_orientation {
    return side_to_ordering(start_orientation.reverse());
  }
  if other_start_orientation.is_colinear() {
    return side_to_ordering(other_end_orientation);
  }
  if start_orientation.is_colinear() {
    return side_to_ordering(end_orientation.reverse());
  }
  if events.is_vertical(a) {
    return side_to_ordering(start_orientation.reverse());
  }
  if events.is_vertical(b) {
    return side_to_ordering(other_start_orientation);
  }
  if other_end_orientation.is_colinear() {
    return side_to_ordering(other_start_orientation);
  }
  if end_orientation.is_colinear() {
    return side_to_ordering(start_orientation.reverse());
  }
  y_at(events, a, current_x).cmp(&y_at(events, b, current_x))
}

// CounterClockWise answers map to Less, ClockWise ones to Greater.
fn side_to_ordering(orientation: Orientation) -> Ordering {
  match orientation {
    Orientation::CounterClockWise => Ordering::Less,
    Orientation::ClockWise => Ordering::Greater,
    Orientation::CoLinear => Ordering::Equal,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use num_rational::BigRational;

  fn rational(value: i64) -> BigRational {
    BigRational::from_integer(value.into())
  }

  fn point(x: i64, y: i64) -> Point<BigRational, 2> {
    Point::new([rational(x), rational(y)])
  }

  fn edge(
    events: &mut Events<BigRational>,
    a: (i64, i64),
    b: (i64, i64),
    from_first: bool,
  ) -> EventId {
    let (left, _) = events.add_edge(point(a.0, a.1), point(b.0, b.1), from_first);
    left
  }

  #[test]
  fn stacks_parallel_edges_by_height() {
    let mut events = Events::new();
    let bottom = edge(&mut events, (0, 0), (4, 0), true);
    let top = edge(&mut events, (0, 2), (4, 2), true);
    let x = rational(0);
    assert_eq!(sweep_order(&events, &x, bottom, top), Ordering::Less);
    assert_eq!(sweep_order(&events, &x, top, bottom), Ordering::Greater);
  }

  #[test]
  fn shared_start_orders_by_slope() {
    let mut events = Events::new();
    let shallow = edge(&mut events, (0, 0), (4, 1), true);
    let steep = edge(&mut events, (0, 0), (4, 4), true);
    let x = rational(0);
    assert_eq!(sweep_order(&events, &x, shallow, steep), Ordering::Less);
  }

  #[test]
  fn collinear_edges_order_by_operand() {
    let mut events = Events::new();
    let first = edge(&mut events, (0, 0), (4, 0), true);
    let second = edge(&mut events, (0, 0), (4, 0), false);
    let x = rational(0);
    assert_eq!(sweep_order(&events, &x, first, second), Ordering::Less);
    assert_eq!(sweep_order(&events, &x, second, first), Ordering::Greater);
  }

  #[test]
  fn insert_keeps_vertical_order() {
    let mut events = Events::new();
    let bottom = edge(&mut events, (0, 0), (4, 0), true);
    let middle = edge(&mut events, (0, 1), (4, 2), false);
    let top = edge(&mut events, (0, 3), (4, 3), true);
    let mut sweep_line = SweepLine::new();
    sweep_line.move_to(rational(0));
    sweep_line.insert(&events, top);
    sweep_line.insert(&events, bottom);
    let slot = sweep_line.insert(&events, middle);
    assert_eq!(slot, 1);
    assert_eq!(sweep_line.below(slot), Some(bottom));
    assert_eq!(sweep_line.above(slot), Some(top));
    assert_eq!(sweep_line.position(middle), Some(1));
  }

  #[test]
  fn crossing_edges_fall_back_to_sweep_position() {
    let mut events = Events::new();
    // the edges cross at (2, 2); left of the crossing the first is lower
    let rising = edge(&mut events, (0, 0), (4, 4), true);
    let falling = edge(&mut events, (0, 3), (4, 1), false);
    let x = rational(1);
    assert_eq!(sweep_order(&events, &x, rising, falling), Ordering::Less);
  }
}
