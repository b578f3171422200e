use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::event::{order_endpoints, EventId, Events};
use crate::data::Point;
use crate::PolygonScalar;

/// Min-priority queue over the event-processing order.
///
/// Keys are snapshots taken when an event is pushed; a later subdivision
/// only moves the recorded end along the event's own carrier line.
#[derive(Debug)]
pub(crate) struct EventsQueue<T> {
  heap: BinaryHeap<Reverse<QueueKey<T>>>,
}

impl<T: PolygonScalar> EventsQueue<T> {
  pub fn new() -> EventsQueue<T> {
    EventsQueue {
      heap: BinaryHeap::new(),
    }
  }

  pub fn push(&mut self, events: &Events<T>, event: EventId) {
    self.heap.push(Reverse(QueueKey {
      start: events[event].start.clone(),
      end: events.end(event).clone(),
      is_left: events[event].is_left,
      from_first: events[event].from_first,
      event,
    }));
  }

  pub fn pop(&mut self) -> Option<EventId> {
    self.heap.pop().map(|Reverse(key)| key.event)
  }

  pub fn is_empty(&self) -> bool {
    self.heap.is_empty()
  }
}

#[derive(Debug)]
struct QueueKey<T> {
  start: Point<T, 2>,
  end: Point<T, 2>,
  is_left: bool,
  from_first: bool,
  event: EventId,
}

impl<T: PolygonScalar> Ord for QueueKey<T> {
  fn cmp(&self, other: &QueueKey<T>) -> Ordering {
    order_endpoints(
      &self.start,
      &self.end,
      self.is_left,
      self.from_first,
      &other.start,
      &other.end,
      other.is_left,
      other.from_first,
    )
    .then_with(|| self.event.cmp(&other.event))
  }
}

impl<T: PolygonScalar> PartialOrd for QueueKey<T> {
  fn partial_cmp(&self, other: &QueueKey<T>) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl<T: PolygonScalar> PartialEq for QueueKey<T> {
  fn eq(&self, other: &QueueKey<T>) -> bool {
    self.cmp(other) == Ordering::Equal
  }
}

impl<T: PolygonScalar> Eq for QueueKey<T> {}

#[cfg(test)]
mod tests {
  use super::*;

  fn point(x: i64, y: i64) -> Point<i64, 2> {
    Point::new([x, y])
  }

  #[test]
  fn pops_in_event_order() {
    let mut events = Events::new();
    let mut queue = EventsQueue::new();
    let (a_left, a_right) = events.add_edge(point(0, 0), point(2, 2), true);
    let (b_left, b_right) = events.add_edge(point(1, 0), point(1, 2), false);
    for &event in &[a_left, a_right, b_left, b_right] {
      queue.push(&events, event);
    }
    assert_eq!(queue.pop(), Some(a_left));
    assert_eq!(queue.pop(), Some(b_left));
    assert_eq!(queue.pop(), Some(b_right));
    assert_eq!(queue.pop(), Some(a_right));
    assert_eq!(queue.pop(), None);
    assert!(queue.is_empty());
  }

  #[test]
  fn lower_y_pops_first_at_equal_x() {
    let mut events = Events::new();
    let mut queue = EventsQueue::new();
    let (upper, _) = events.add_edge(point(0, 5), point(1, 6), true);
    let (lower, _) = events.add_edge(point(0, 1), point(1, 0), true);
    queue.push(&events, upper);
    queue.push(&events, lower);
    assert_eq!(queue.pop(), Some(lower));
    assert_eq!(queue.pop(), Some(upper));
  }
}
