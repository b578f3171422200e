//! The segment-against-polygon sweep.
//!
//! The polygon operand registers oriented edges (border counter-clockwise,
//! holes clockwise) so that every edge knows on which side the interior
//! lies. Segment events then inherit "am I inside the polygon" from the
//! edge directly below instead of tracking full winding parity.

use super::event::{divide_edge, event_order, EdgeKind, EventId, Events};
use super::events_queue::EventsQueue;
use super::sweep_line::SweepLine;
use crate::data::{Contour, Multipoint, Multipolygon, Multisegment, Polygon};
use crate::{ClipScalar, Error, Intersects, Orientation, SegmentsIntersection};

pub(crate) struct MixedSweep<T> {
  /// Keep the parts of the multisegment inside the polygon; otherwise keep
  /// the parts outside.
  keep_inside: bool,
  pub events: Events<T>,
  queue: EventsQueue<T>,
}

impl<T: ClipScalar> MixedSweep<T> {
  pub fn new(keep_inside: bool) -> MixedSweep<T> {
    MixedSweep {
      keep_inside,
      events: Events::new(),
      queue: EventsQueue::new(),
    }
  }

  pub fn register_multisegment(&mut self, operand: &Multisegment<T>) {
    for segment in operand.iter() {
      if segment.is_degenerate() {
        continue;
      }
      let (left, right) =
        self
          .events
          .add_edge(segment.start.clone(), segment.end.clone(), true);
      self.queue.push(&self.events, left);
      self.queue.push(&self.events, right);
    }
  }

  pub fn register_multipolygon(&mut self, operand: &Multipolygon<T>) {
    for polygon in operand.iter() {
      self.register_polygon(polygon);
    }
  }

  fn register_polygon(&mut self, polygon: &Polygon<T>) {
    self.register_ring(&polygon.border, Orientation::CounterClockWise);
    for hole in &polygon.holes {
      self.register_ring(hole, Orientation::ClockWise);
    }
  }

  fn register_ring(&mut self, ring: &Contour<T>, target: Orientation) {
    let forward = ring.orientation() == target;
    for edge in ring.iter_edges() {
      if edge.is_degenerate() {
        continue;
      }
      let edge = if forward { edge } else { edge.reversed() };
      let (left, right) = self.events.add_edge(edge.start, edge.end, false);
      self.queue.push(&self.events, left);
      self.queue.push(&self.events, right);
    }
  }

  pub fn sweep(&mut self, stop_x: Option<T>) -> Result<Vec<EventId>, Error> {
    let mut log = Vec::with_capacity(self.events.len());
    let mut sweep_line = SweepLine::new();
    while let Some(event) = self.queue.pop() {
      if let Some(limit) = &stop_x {
        if self.events[event].start.x_coord() > limit {
          break;
        }
      }
      sweep_line.move_to(self.events[event].start.x_coord().clone());
      log.push(event);
      if self.events[event].is_left {
        let slot = sweep_line.insert(&self.events, event);
        let below = sweep_line.below(slot);
        let above = sweep_line.above(slot);
        self.compute_fields(event, below);
        if let Some(above) = above {
          if self.detect_intersection(event, above)? {
            self.compute_fields(event, below);
            self.compute_fields(above, Some(event));
          }
        }
        if let Some(below) = below {
          if self.detect_intersection(below, event)? {
            let below_below = sweep_line.below(slot - 1);
            self.compute_fields(below, below_below);
            self.compute_fields(event, Some(below));
          }
        }
      } else {
        let partner = self.events[event].partner;
        if let Some(slot) = sweep_line.position(partner) {
          let below = sweep_line.below(slot);
          let above = sweep_line.above(slot);
          sweep_line.remove(slot);
          if let (Some(below), Some(above)) = (below, above) {
            self.detect_intersection(below, above)?;
          }
        }
      }
    }
    Ok(log)
  }

  fn compute_fields(&mut self, event: EventId, below: Option<EventId>) {
    if let Some(below) = below {
      let other_interior_to_left =
        if self.events[event].from_first == self.events[below].from_first {
          self.events[below].other_interior_to_left
        } else {
          self.events[below].interior_to_left
        };
      self.events[event].other_interior_to_left = other_interior_to_left;
    }
    self.events[event].in_result = self.in_result(event);
  }

  fn in_result(&self, event: EventId) -> bool {
    let event = &self.events[event];
    if !event.from_first {
      return false;
    }
    let inside_or_overlap =
      event.other_interior_to_left || event.edge_kind != EdgeKind::Normal;
    if self.keep_inside {
      inside_or_overlap
    } else {
      !inside_or_overlap
    }
  }

  fn detect_intersection(&mut self, first: EventId, second: EventId) -> Result<bool, Error> {
    let first_segment = self.events.segment(first);
    let second_segment = self.events.segment(second);
    match (&first_segment).intersect(&second_segment) {
      None => Ok(false),
      Some(SegmentsIntersection::Point(point)) => {
        if self.events[first].start == self.events[second].start
          || self.events.end(first) == self.events.end(second)
        {
          return Ok(false);
        }
        if point != self.events[first].start && &point != self.events.end(first) {
          divide_edge(&mut self.events, &mut self.queue, first, point.clone())?;
        }
        if point != self.events[second].start && &point != self.events.end(second) {
          divide_edge(&mut self.events, &mut self.queue, second, point)?;
        }
        Ok(false)
      }
      Some(SegmentsIntersection::Overlap(_, _)) => {
        if self.events[first].from_first == self.events[second].from_first {
          return Err(Error::OverlappingEdges);
        }
        self.divide_overlapping(first, second)
      }
    }
  }

  fn divide_overlapping(&mut self, first: EventId, second: EventId) -> Result<bool, Error> {
    let starts_equal = self.events[first].start == self.events[second].start;
    let ends_equal = self.events.end(first) == self.events.end(second);
    let first_right = self.events[first].partner;
    let second_right = self.events[second].partner;
    if starts_equal {
      // the segment now runs along the polygon boundary
      let kind = if self.events[first].interior_to_left == self.events[second].interior_to_left
      {
        EdgeKind::SameTransition
      } else {
        EdgeKind::DifferentTransition
      };
      self.events[first].edge_kind = kind;
      self.events[second].edge_kind = kind;
      if !ends_equal {
        let (end_min, end_max) = self.order_pair(first_right, second_right);
        let split = self.events[end_min].start.clone();
        let longer = self.events[end_max].partner;
        divide_edge(&mut self.events, &mut self.queue, longer, split)?;
      }
      return Ok(true);
    }
    if ends_equal {
      let (start_min, start_max) = self.order_pair(first, second);
      let split = self.events[start_max].start.clone();
      divide_edge(&mut self.events, &mut self.queue, start_min, split)?;
      return Ok(false);
    }
    let (start_min, start_max) = self.order_pair(first, second);
    let (end_min, end_max) = self.order_pair(first_right, second_right);
    if self.events[end_max].partner == start_min {
      let inner_end = self.events[end_min].start.clone();
      divide_edge(&mut self.events, &mut self.queue, start_min, inner_end)?;
      let inner_start = self.events[start_max].start.clone();
      divide_edge(&mut self.events, &mut self.queue, start_min, inner_start)?;
    } else {
      let overlap_end = self.events[end_min].start.clone();
      divide_edge(&mut self.events, &mut self.queue, start_max, overlap_end)?;
      let overlap_start = self.events[start_max].start.clone();
      divide_edge(&mut self.events, &mut self.queue, start_min, overlap_start)?;
    }
    Ok(false)
  }

  fn order_pair(&self, a: EventId, b: EventId) -> (EventId, EventId) {
    if event_order(&self.events, a, b) == std::cmp::Ordering::Less {
      (a, b)
    } else {
      (b, a)
    }
  }
}

/// Multisegment made of the in-result subsegments, in sweep order.
pub(crate) fn result_multisegment<T: ClipScalar>(
  events: &Events<T>,
  log: &[EventId],
) -> Multisegment<T> {
  let segments = log
    .iter()
    .copied()
    .filter(|&event| events[event].is_left && events[event].in_result)
    .map(|event| events.segment(event))
    .collect();
  Multisegment::new(segments)
}

/// The point and segment components of a complete mixed intersection.
pub(crate) fn mixed_mix_components<T: ClipScalar>(
  events: &Events<T>,
  log: &[EventId],
) -> (Multipoint<T>, Multisegment<T>) {
  let mut sorted = log.to_vec();
  sorted.sort_by(|&a, &b| event_order(events, a, b));

  let mut points = Vec::new();
  let mut lower = 0;
  while lower < sorted.len() {
    let start = &events[sorted[lower]].start;
    let mut upper = lower;
    while upper < sorted.len() && &events[sorted[upper]].start == start {
      upper += 1;
    }
    let group = &sorted[lower..upper];
    let mixed_operands = group
      .iter()
      .any(|&event| events[event].from_first != events[group[0]].from_first);
    let nothing_in_result = group.iter().all(|&event| {
      !(events[event].in_result
        || !events[event].is_left && events[events[event].partner].in_result)
    });
    if mixed_operands && nothing_in_result {
      points.push(events[sorted[lower]].start.clone());
    }
    lower = upper;
  }

  let segments = sorted
    .iter()
    .copied()
    .filter(|&event| events[event].is_left && events[event].in_result)
    .map(|event| events.segment(event))
    .collect();
  (Multipoint::new(points), Multisegment::new(segments))
}
