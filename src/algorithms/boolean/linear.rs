//! The segment-against-segment sweep.
//!
//! Multisegments carry no interior, so the sweep only has to subdivide at
//! crossings and overlaps. Afterwards every surviving subsegment is known
//! by both operands under the same endpoints and plain grouping decides
//! membership per operation.

use super::event::{divide_edge, EventId, Events};
use super::events_queue::EventsQueue;
use super::sweep_line::SweepLine;
use crate::data::{Multipoint, Multisegment, Segment};
use crate::{ClipScalar, Error, Intersects, SegmentsIntersection};

pub(crate) struct LinearSweep<T> {
  pub events: Events<T>,
  queue: EventsQueue<T>,
}

impl<T: ClipScalar> LinearSweep<T> {
  pub fn new() -> LinearSweep<T> {
    LinearSweep {
      events: Events::new(),
      queue: EventsQueue::new(),
    }
  }

  pub fn register(&mut self, operand: &Multisegment<T>, from_first: bool) {
    for segment in operand.iter() {
      if segment.is_degenerate() {
        continue;
      }
      let (left, right) =
        self
          .events
          .add_edge(segment.start.clone(), segment.end.clone(), from_first);
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
        if let Some(above) = sweep_line.above(slot) {
          self.detect_intersection(event, above)?;
        }
        if let Some(below) = sweep_line.below(slot) {
          self.detect_intersection(below, event)?;
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

  fn detect_intersection(&mut self, first: EventId, second: EventId) -> Result<(), Error> {
    let first_segment = self.events.segment(first);
    let second_segment = self.events.segment(second);
    match (&first_segment).intersect(&second_segment) {
      None => Ok(()),
      Some(SegmentsIntersection::Point(point)) => {
        if self.events[first].start == self.events[second].start
          || self.events.end(first) == self.events.end(second)
        {
          return Ok(());
        }
        if point != self.events[first].start && &point != self.events.end(first) {
          divide_edge(&mut self.events, &mut self.queue, first, point.clone())?;
        }
        if point != self.events[second].start && &point != self.events.end(second) {
          divide_edge(&mut self.events, &mut self.queue, second, point)?;
        }
        Ok(())
      }
      Some(SegmentsIntersection::Overlap(_, _)) => {
        if self.events[first].from_first == self.events[second].from_first {
          return Err(Error::OverlappingEdges);
        }
        self.divide_overlapping(first, second)
      }
    }
  }

  // After the divisions the shared part exists once per operand with the
  // same endpoints.
  fn divide_overlapping(&mut self, first: EventId, second: EventId) -> Result<(), Error> {
    let starts_equal = self.events[first].start == self.events[second].start;
    let ends_equal = self.events.end(first) == self.events.end(second);
    if starts_equal && ends_equal {
      return Ok(());
    }
    let first_right = self.events[first].partner;
    let second_right = self.events[second].partner;
    if starts_equal {
      let (end_min, end_max) = self.order_pair(first_right, second_right);
      let split = self.events[end_min].start.clone();
      let longer = self.events[end_max].partner;
      return divide_edge(&mut self.events, &mut self.queue, longer, split);
    }
    if ends_equal {
      let (start_min, start_max) = self.order_pair(first, second);
      let split = self.events[start_max].start.clone();
      return divide_edge(&mut self.events, &mut self.queue, start_min, split);
    }
    let (start_min, start_max) = self.order_pair(first, second);
    let (end_min, end_max) = self.order_pair(first_right, second_right);
    if self.events[end_max].partner == start_min {
      let inner_end = self.events[end_min].start.clone();
      divide_edge(&mut self.events, &mut self.queue, start_min, inner_end)?;
      let inner_start = self.events[start_max].start.clone();
      divide_edge(&mut self.events, &mut self.queue, start_min, inner_start)
    } else {
      let overlap_end = self.events[end_min].start.clone();
      divide_edge(&mut self.events, &mut self.queue, start_max, overlap_end)?;
      let overlap_start = self.events[start_max].start.clone();
      divide_edge(&mut self.events, &mut self.queue, start_min, overlap_start)
    }
  }

  fn order_pair(&self, a: EventId, b: EventId) -> (EventId, EventId) {
    if super::event::event_order(&self.events, a, b) == std::cmp::Ordering::Less {
      (a, b)
    } else {
      (b, a)
    }
  }
}

/// Sweep over a single segment collection: subdivides at crossings and
/// collapses collinear overlaps onto one subsegment. Duplicates never enter
/// the status, so each surviving subsegment completes exactly once.
pub(crate) struct NarySweep<T> {
  events: Events<T>,
  queue: EventsQueue<T>,
}

impl<T: ClipScalar> NarySweep<T> {
  pub fn new() -> NarySweep<T> {
    NarySweep {
      events: Events::new(),
      queue: EventsQueue::new(),
    }
  }

  pub fn register(&mut self, segments: &[Segment<T>]) {
    for segment in segments {
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

  pub fn sweep(&mut self) -> Result<Vec<Segment<T>>, Error> {
    let mut merged = Vec::new();
    let mut sweep_line = SweepLine::new();
    while let Some(event) = self.queue.pop() {
      sweep_line.move_to(self.events[event].start.x_coord().clone());
      if self.events[event].is_left {
        if let Some(slot) = sweep_line.insert_if_absent(&self.events, event) {
          if let Some(above) = sweep_line.above(slot) {
            self.detect_intersection(event, above)?;
          }
          if let Some(below) = sweep_line.below(slot) {
            self.detect_intersection(below, event)?;
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
          merged.push(self.events.segment(partner));
        }
      }
    }
    Ok(merged)
  }

  fn detect_intersection(&mut self, first: EventId, second: EventId) -> Result<(), Error> {
    let first_segment = self.events.segment(first);
    let second_segment = self.events.segment(second);
    match (&first_segment).intersect(&second_segment) {
      None => Ok(()),
      Some(SegmentsIntersection::Point(point)) => {
        if self.events[first].start == self.events[second].start
          || self.events.end(first) == self.events.end(second)
        {
          return Ok(());
        }
        if point != self.events[first].start && &point != self.events.end(first) {
          divide_edge(&mut self.events, &mut self.queue, first, point.clone())?;
        }
        if point != self.events[second].start && &point != self.events.end(second) {
          divide_edge(&mut self.events, &mut self.queue, second, point)?;
        }
        Ok(())
      }
      // overlaps are legal here; the duplicated subsegments fall out at
      // insertion time
      Some(SegmentsIntersection::Overlap(_, _)) => self.divide_overlapping(first, second),
    }
  }

  fn divide_overlapping(&mut self, first: EventId, second: EventId) -> Result<(), Error> {
    let starts_equal = self.events[first].start == self.events[second].start;
    let ends_equal = self.events.end(first) == self.events.end(second);
    if starts_equal && ends_equal {
      return Ok(());
    }
    let first_right = self.events[first].partner;
    let second_right = self.events[second].partner;
    if starts_equal {
      let (end_min, end_max) = self.order_pair(first_right, second_right);
      let split = self.events[end_min].start.clone();
      let longer = self.events[end_max].partner;
      return divide_edge(&mut self.events, &mut self.queue, longer, split);
    }
    if ends_equal {
      let (start_min, start_max) = self.order_pair(first, second);
      let split = self.events[start_max].start.clone();
      return divide_edge(&mut self.events, &mut self.queue, start_min, split);
    }
    let (start_min, start_max) = self.order_pair(first, second);
    let (end_min, end_max) = self.order_pair(first_right, second_right);
    if self.events[end_max].partner == start_min {
      let inner_end = self.events[end_min].start.clone();
      divide_edge(&mut self.events, &mut self.queue, start_min, inner_end)?;
      let inner_start = self.events[start_max].start.clone();
      divide_edge(&mut self.events, &mut self.queue, start_min, inner_start)
    } else {
      let overlap_end = self.events[end_min].start.clone();
      divide_edge(&mut self.events, &mut self.queue, start_max, overlap_end)?;
      let overlap_start = self.events[start_max].start.clone();
      divide_edge(&mut self.events, &mut self.queue, start_min, overlap_start)
    }
  }

  fn order_pair(&self, a: EventId, b: EventId) -> (EventId, EventId) {
    if super::event::event_order(&self.events, a, b) == std::cmp::Ordering::Less {
      (a, b)
    } else {
      (b, a)
    }
  }
}

/// Final subsegments in completion order, grouped by equal endpoints
/// together with the operands that produced them.
pub(crate) fn completed_groups<T: ClipScalar>(
  events: &Events<T>,
  log: &[EventId],
) -> Vec<(Segment<T>, Vec<bool>)> {
  let mut groups: Vec<(Segment<T>, Vec<bool>)> = Vec::new();
  for &event in log {
    if events[event].is_left {
      continue;
    }
    let left = events[event].partner;
    let segment = events.segment(left);
    match groups.last_mut() {
      Some((last, operands)) if *last == segment => operands.push(events[left].from_first),
      _ => groups.push((segment, vec![events[left].from_first])),
    }
  }
  groups
}

/// The point and segment components of a complete multisegment
/// intersection.
pub(crate) fn linear_mix_components<T: ClipScalar>(
  events: &Events<T>,
  log: &[EventId],
) -> (Multipoint<T>, Multisegment<T>) {
  let mut sorted = log.to_vec();
  sorted.sort_by(|&a, &b| {
    events[a]
      .start
      .cmp(&events[b].start)
      .then_with(|| events.end(a).cmp(events.end(b)))
  });

  let mut points = Vec::new();
  let mut segments = Vec::new();
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
    if mixed_operands {
      let mut shared_segment = false;
      for pair in group.windows(2) {
        let (event, next) = (pair[0], pair[1]);
        if events[event].from_first != events[next].from_first
          && events.segment(event) == events.segment(next)
        {
          shared_segment = true;
          if events[event].is_left {
            segments.push(events.segment(event));
          }
        }
      }
      if !shared_segment {
        points.push(events[sorted[lower]].start.clone());
      }
    }
    lower = upper;
  }
  (Multipoint::new(points), Multisegment::new(segments))
}
