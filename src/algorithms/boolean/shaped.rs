//! The polygon-against-polygon sweep.
//!
//! Every input edge contributes a pair of endpoint events. The queue hands
//! the events over from left to right; left endpoints enter the status,
//! meet their vertical neighbours, and either subdivide at discovered
//! crossings or pick up their winding flags from the edge directly below.
//! Right endpoints retire their edge and let the edges around the gap meet.
//! When the queue runs dry the surviving events are stitched back into
//! contours, holes are attached to the contour below their leftmost vertex,
//! and odd nesting depths are flipped clockwise.

use log::debug;

use super::event::{divide_edge, event_order, EdgeKind, EventId, Events};
use super::events_queue::EventsQueue;
use super::sweep_line::SweepLine;
use super::OperationKind;
use crate::data::{Contour, Mix, Multipoint, Multipolygon, Multisegment, Point, Polygon};
use crate::{ClipScalar, Error, Intersects, SegmentsIntersection};

pub(crate) struct ShapedSweep<T> {
  kind: OperationKind,
  pub events: Events<T>,
  queue: EventsQueue<T>,
}

impl<T: ClipScalar> ShapedSweep<T> {
  pub fn new(kind: OperationKind) -> ShapedSweep<T> {
    ShapedSweep {
      kind,
      events: Events::new(),
      queue: EventsQueue::new(),
    }
  }

  pub fn register(&mut self, operand: &Multipolygon<T>, from_first: bool) {
    for polygon in operand.iter() {
      for contour in polygon.iter_contours() {
        for edge in contour.iter_edges() {
          if edge.is_degenerate() {
            continue;
          }
          let (left, right) = self.events.add_edge(edge.start, edge.end, from_first);
          self.queue.push(&self.events, left);
          self.queue.push(&self.events, right);
        }
      }
    }
  }

  /// Runs the queue dry and returns every processed event in pop order.
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
    if self.queue.is_empty() {
      debug!("swept {} events", log.len());
    } else {
      debug!("swept {} events, stopped early", log.len());
    }
    Ok(log)
  }

  /// Winding flags of a freshly inserted left event, derived from the edge
  /// directly below it.
  fn compute_fields(&mut self, event: EventId, below: Option<EventId>) {
    match below {
      None => {
        self.events[event].in_out = false;
        self.events[event].other_in_out = true;
      }
      Some(below) => {
        let same_operand = self.events[event].from_first == self.events[below].from_first;
        let below_vertical = self.events.is_vertical(below);
        let (in_out, other_in_out) = if same_operand {
          (!self.events[below].in_out, self.events[below].other_in_out)
        } else {
          (
            !self.events[below].other_in_out,
            if below_vertical {
              !self.events[below].in_out
            } else {
              self.events[below].in_out
            },
          )
        };
        let below_in_result = if !self.in_result(below) || below_vertical {
          self.events[below].below_in_result
        } else {
          Some(below)
        };
        self.events[event].in_out = in_out;
        self.events[event].other_in_out = other_in_out;
        self.events[event].below_in_result = below_in_result;
      }
    }
    self.events[event].in_result = self.in_result(event);
  }

  fn in_result(&self, event: EventId) -> bool {
    let event = &self.events[event];
    match event.edge_kind {
      EdgeKind::Normal => match self.kind {
        OperationKind::Intersection => !event.other_in_out,
        OperationKind::Union => event.other_in_out,
        OperationKind::Difference => event.from_first == event.other_in_out,
        OperationKind::SymmetricDifference => true,
      },
      EdgeKind::SameTransition => matches!(
        self.kind,
        OperationKind::Intersection | OperationKind::Union
      ),
      EdgeKind::DifferentTransition => matches!(self.kind, OperationKind::Difference),
      EdgeKind::NonContributing => false,
    }
  }

  /// Handles the meeting of two edges that just became vertical neighbours.
  /// Returns `true` when the edges turned out to be overlapping duplicates
  /// whose flags have to be recomputed.
  fn detect_intersection(&mut self, first: EventId, second: EventId) -> Result<bool, Error> {
    let first_segment = self.events.segment(first);
    let second_segment = self.events.segment(second);
    match (&first_segment).intersect(&second_segment) {
      None => Ok(false),
      Some(SegmentsIntersection::Point(point)) => {
        if self.events[first].start == self.events[second].start
          || self.events.end(first) == self.events.end(second)
        {
          // a shared endpoint is not a crossing
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
      // the shared part is carried by `second` alone
      self.events[first].edge_kind = EdgeKind::NonContributing;
      self.events[second].edge_kind =
        if self.events[first].in_out == self.events[second].in_out {
          EdgeKind::SameTransition
        } else {
          EdgeKind::DifferentTransition
        };
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
      // one edge contains the other
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

/// Picks the events that survived into the result, sorted by the event
/// order, with each event's `position` pointing at its partner's slot.
fn collect_result_events<T: ClipScalar>(
  events: &mut Events<T>,
  log: &[EventId],
) -> Vec<EventId> {
  let mut collected: Vec<EventId> = log
    .iter()
    .copied()
    .filter(|&event| {
      if events[event].is_left {
        events[event].in_result
      } else {
        events[events[event].partner].in_result
      }
    })
    .collect();
  collected.sort_by(|&a, &b| event_order(events, a, b));
  for (index, &event) in collected.iter().enumerate() {
    events[event].position = index;
  }
  for (index, &event) in collected.iter().enumerate() {
    if !events[event].is_left {
      let partner = events[event].partner;
      let left_slot = events[partner].position;
      events[partner].position = index;
      events[event].position = left_slot;
    }
  }
  collected
}

// The next unprocessed event at the same vertex: forward over the run of
// equal starts, then backwards. A result below `original_index` ends the
// contour walk.
fn next_position<T: ClipScalar>(
  position: usize,
  events: &Events<T>,
  collected: &[EventId],
  processed: &[bool],
  original_index: usize,
) -> isize {
  let point = &events[collected[position]].start;
  let mut candidate = position + 1;
  while candidate < collected.len() && &events[collected[candidate]].start == point {
    if !processed[candidate] {
      return candidate as isize;
    }
    candidate += 1;
  }
  let mut candidate = position as isize - 1;
  while candidate >= original_index as isize && processed[candidate as usize] {
    candidate -= 1;
  }
  candidate
}

// Drops the middle vertex of every run of three collinear neighbours,
// wrapping around the seam.
fn shrink_collinear<T: ClipScalar>(vertices: &mut Vec<Point<T, 2>>) {
  loop {
    let mut changed = false;
    let mut index = 0;
    while vertices.len() > 2 && index < vertices.len() {
      let previous = if index == 0 { vertices.len() - 1 } else { index - 1 };
      let next = if index + 1 == vertices.len() { 0 } else { index + 1 };
      if Point::orient(&vertices[previous], &vertices[index], &vertices[next]).is_colinear() {
        vertices.remove(index);
        changed = true;
      } else {
        index += 1;
      }
    }
    if !changed || vertices.len() < 3 {
      break;
    }
  }
}

/// Stitches the surviving events into oriented contours and groups them
/// into polygons with their holes.
pub(crate) fn events_to_multipolygon<T: ClipScalar>(
  events: &mut Events<T>,
  log: &[EventId],
) -> Multipolygon<T> {
  let collected = collect_result_events(events, log);
  let mut processed = vec![false; collected.len()];
  let mut contours: Vec<Contour<T>> = Vec::new();
  let mut depths: Vec<usize> = Vec::new();
  let mut parents: Vec<Option<usize>> = Vec::new();
  let mut are_internal: Vec<bool> = Vec::new();
  let mut holes: Vec<Vec<usize>> = Vec::new();

  for index in 0..collected.len() {
    if processed[index] {
      continue;
    }
    let initial = events[collected[index]].start.clone();
    let mut vertices = vec![initial.clone()];
    let mut steps = vec![collected[index]];
    let mut position = index as isize;
    while position >= index as isize {
      let step = collected[position as usize];
      if events.end(step) == &initial {
        break;
      }
      processed[position as usize] = true;
      steps.push(step);
      position = events[step].position as isize;
      processed[position as usize] = true;
      vertices.push(events[collected[position as usize]].start.clone());
      position = next_position(position as usize, events, &collected, &processed, index);
    }
    let position = if position < 0 { index } else { position as usize };
    let closing = collected[position];
    processed[position] = true;
    processed[events[closing].position] = true;

    shrink_collinear(&mut vertices);
    if vertices.len() < 3 {
      continue;
    }

    let contour_id = contours.len();
    let mut depth = 0;
    let mut parent = None;
    let mut is_internal = false;
    if let Some(below) = events[collected[index]].below_in_result {
      if let Some(below_contour) = events[below].contour_id {
        if !events[below].result_in_out {
          if !are_internal[below_contour] {
            // directly above the lower boundary of the contour below
            holes[below_contour].push(contour_id);
            parent = Some(below_contour);
            depth = depths[below_contour] + 1;
            is_internal = true;
          }
        } else if are_internal[below_contour] {
          // sibling of the hole below: both hang off the same border
          if let Some(grandparent) = parents[below_contour] {
            holes[grandparent].push(contour_id);
            parent = Some(grandparent);
            depth = depths[below_contour];
            is_internal = true;
          }
        }
      }
    }
    depths.push(depth);
    parents.push(parent);
    are_internal.push(is_internal);
    holes.push(Vec::new());

    for &step in &steps {
      if events[step].is_left {
        events[step].result_in_out = false;
        events[step].contour_id = Some(contour_id);
      } else {
        let partner = events[step].partner;
        events[partner].result_in_out = true;
        events[partner].contour_id = Some(contour_id);
      }
    }
    let closing_partner = events[closing].partner;
    events[closing_partner].result_in_out = true;
    events[closing_partner].contour_id = Some(contour_id);

    if depth % 2 == 1 {
      // holes run clockwise
      vertices.reverse();
    }
    contours.push(Contour::new_unchecked(vertices));
  }

  debug!("stitched {} contours", contours.len());
  let mut polygons = Vec::new();
  for (index, contour) in contours.iter().enumerate() {
    if are_internal[index] {
      continue;
    }
    let contour_holes = holes[index]
      .iter()
      .map(|&hole| contours[hole].clone())
      .collect();
    polygons.push(Polygon::new_unchecked(contour.clone(), contour_holes));
  }
  Multipolygon::new(polygons)
}

/// Splits the sweep output of a complete intersection into its dimensional
/// parts: isolated touch points, shared boundary pieces and area overlap.
pub(crate) fn events_to_mix<T: ClipScalar>(events: &mut Events<T>, log: &[EventId]) -> Mix<T> {
  let mut sorted = log.to_vec();
  sorted.sort_by(|&a, &b| event_order(events, a, b));

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
    let no_left_result_event = group
      .iter()
      .all(|&event| !events[event].is_left || !events[event].in_result);
    let mixed_operands = group
      .iter()
      .any(|&event| events[event].from_first != events[group[0]].from_first);
    if no_left_result_event && mixed_operands {
      let mut shared_segment = false;
      for pair in group.windows(2) {
        let (event, next) = (pair[0], pair[1]);
        if events[event].from_first != events[next].from_first
          && events.segment(event) == events.segment(next)
        {
          shared_segment = true;
          if events[event].is_left {
            segments.push(events.segment(next));
          }
        }
      }
      let nothing_in_result = group.iter().all(|&event| {
        if events[event].is_left {
          !events[event].in_result
        } else {
          !events[events[event].partner].in_result
        }
      });
      if !shared_segment && nothing_in_result {
        points.push(events[sorted[lower]].start.clone());
      }
    }
    lower = upper;
  }

  let polygons = events_to_multipolygon(events, &sorted);
  Mix::new(
    Multipoint::new(points),
    Multisegment::new(segments),
    polygons,
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::{rational, rational_point, rectangle_multipolygon};
  use num_rational::BigRational;

  fn run(
    kind: OperationKind,
    left: &Multipolygon<BigRational>,
    right: &Multipolygon<BigRational>,
  ) -> (ShapedSweep<BigRational>, Vec<EventId>) {
    let mut sweep = ShapedSweep::new(kind);
    sweep.register(left, true);
    sweep.register(right, false);
    let log = sweep.sweep(None).unwrap();
    (sweep, log)
  }

  #[test]
  fn sweep_subdivides_crossing_edges() {
    let left = rectangle_multipolygon(0, 0, 2, 2);
    let right = rectangle_multipolygon(1, 1, 2, 2);
    let (sweep, log) = run(OperationKind::Intersection, &left, &right);
    // the boundaries cross twice, dividing both edges at each crossing
    assert_eq!(sweep.events.len(), 16 + 8);
    assert_eq!(log.len(), sweep.events.len());
  }

  #[test]
  fn duplicate_cross_operand_edges_are_classified() {
    let left = rectangle_multipolygon(0, 0, 2, 2);
    let (sweep, log) = run(OperationKind::Intersection, &left, &left.clone());
    let mut non_contributing = 0;
    let mut same_transition = 0;
    for &event in &log {
      if !sweep.events[event].is_left {
        continue;
      }
      match sweep.events[event].edge_kind {
        EdgeKind::NonContributing => non_contributing += 1,
        EdgeKind::SameTransition => same_transition += 1,
        _ => {}
      }
    }
    // each of the four duplicated edges keeps one carrier
    assert_eq!(non_contributing, 4);
    assert_eq!(same_transition, 4);
  }

  #[test]
  fn winding_flags_of_stacked_edges() {
    let left = rectangle_multipolygon(0, 0, 4, 4);
    let right = rectangle_multipolygon(1, 1, 2, 2);
    let (sweep, log) = run(OperationKind::Intersection, &left, &right);
    let mut checked = false;
    for &id in &log {
      let event = &sweep.events[id];
      if !event.is_left || event.from_first || event.start != rational_point(1, 1) {
        continue;
      }
      // the inner bottom edge sits inside the outer operand
      if sweep.events.end(id) == &rational_point(3, 1) {
        assert!(!event.in_out);
        assert!(!event.other_in_out);
        assert!(event.in_result);
        checked = true;
      }
    }
    assert!(checked);
  }

  #[test]
  fn reconstruction_closes_contours() {
    let left = rectangle_multipolygon(0, 0, 2, 2);
    let right = rectangle_multipolygon(1, 1, 2, 2);
    let (mut sweep, log) = run(OperationKind::Intersection, &left, &right);
    let result = events_to_multipolygon(&mut sweep.events, &log);
    assert_eq!(result.polygons.len(), 1);
    let border = &result.polygons[0].border;
    assert_eq!(border.len(), 4);
    assert!(border.vertices.contains(&rational_point(1, 1)));
    assert!(border.vertices.contains(&rational_point(2, 2)));
  }

  #[test]
  fn early_termination_stops_the_log() {
    let left = rectangle_multipolygon(0, 0, 1, 1);
    let right = rectangle_multipolygon(10, 0, 1, 1);
    let mut sweep = ShapedSweep::new(OperationKind::Intersection);
    sweep.register(&left, true);
    sweep.register(&right, false);
    let log = sweep.sweep(Some(rational(1))).unwrap();
    // only the left operand's events fit under the stop line
    assert_eq!(log.len(), 8);
  }
}
