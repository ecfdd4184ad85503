//! Deferred ring splices.
//!
//! During the sweep, pairs of ring nodes that should end up topologically
//! joined (or that reveal a ring touching itself) are only *recorded*: a
//! later edge can still rearrange the rings and invalidate the pair. After
//! the sweep, every recorded splice is re-validated and then performed as
//! a ring merge or a ring split. Horizontal edges get a lighter-weight
//! "trial" record first, promoted to a real splice only when two
//! horizontal segments actually overlap.
//!
//! This stage also owns ring hygiene: removal of collinear runs and
//! spikes, and splitting rings that cross themselves.

use crate::path::{cross_product, distance_from_line_squared, dot_product};
use crate::primitives::Point64;

use super::clipper::Clipper64;
use super::engine::NONE;
use super::output::ContourState;

/// A pending or trial splice between two ring nodes.
///
/// `op2 == NONE` marks a horizontal trial, anchored only at `op1` and
/// linked through `next_h`. Each node's pending splices form a chain
/// through `next1`/`next2` depending on which anchor the node is.
#[derive(Debug, Clone)]
pub(crate) struct Splice {
    pub(crate) op1: usize,
    pub(crate) op2: usize,
    pub(crate) next1: usize,
    pub(crate) next2: usize,
    pub(crate) next_h: usize,
    /// Position in the scheduled-splice list; `NONE` for trials.
    pub(crate) list_idx: usize,
}

#[inline]
fn value_between(val: i64, end1: i64, end2: i64) -> bool {
    // also handles the axis-aligned case where end1 == end2
    ((val != end1) == (val != end2)) && ((val > end1) == (val < end2))
}

#[inline]
fn value_equal_or_between(val: i64, end1: i64, end2: i64) -> bool {
    val == end1 || val == end2 || ((val > end1) == (val < end2))
}

#[inline]
fn point_between(pt: Point64, corner1: Point64, corner2: Point64) -> bool {
    value_between(pt.x, corner1.x, corner2.x) && value_between(pt.y, corner1.y, corner2.y)
}

#[inline]
fn point_equal_or_between(pt: Point64, corner1: Point64, corner2: Point64) -> bool {
    value_equal_or_between(pt.x, corner1.x, corner2.x)
        && value_equal_or_between(pt.y, corner1.y, corner2.y)
}

/// Overlap test for two horizontal spans; spans shorter than the minimum
/// are ignored.
fn horz_edges_overlap(x1a: i64, x1b: i64, x2a: i64, x2b: i64) -> bool {
    const MIN_OVERLAP: i64 = 2;
    if x1a > x1b + MIN_OVERLAP {
        if x2a > x2b + MIN_OVERLAP {
            !((x1a <= x2b) || (x2a <= x1b))
        } else {
            !((x1a <= x2a) || (x2b <= x1b))
        }
    } else if x1b > x1a + MIN_OVERLAP {
        if x2a > x2b + MIN_OVERLAP {
            !((x1b <= x2b) || (x2a <= x1a))
        } else {
            !((x1b <= x2a) || (x2b <= x1a))
        }
    } else {
        false
    }
}

/// Overlap test for two collinear segments.
fn collinear_segs_overlap(s1a: Point64, s1b: Point64, s2a: Point64, s2b: Point64) -> bool {
    if s1a.x == s1b.x {
        if s2a.x != s1a.x || s2a.x != s2b.x {
            return false;
        }
    } else if s1a.x < s1b.x {
        if s2a.x < s2b.x {
            if s2a.x >= s1b.x || s2b.x <= s1a.x {
                return false;
            }
        } else if s2b.x >= s1b.x || s2a.x <= s1a.x {
            return false;
        }
    } else if s2a.x < s2b.x {
        if s2a.x >= s1a.x || s2b.x <= s1b.x {
            return false;
        }
    } else if s2b.x >= s1a.x || s2a.x <= s1b.x {
        return false;
    }

    if s1a.y == s1b.y {
        if s2a.y != s1a.y || s2a.y != s2b.y {
            return false;
        }
    } else if s1a.y < s1b.y {
        if s2a.y < s2b.y {
            if s2a.y >= s1b.y || s2b.y <= s1a.y {
                return false;
            }
        } else if s2b.y >= s1b.y || s2a.y <= s1a.y {
            return false;
        }
    } else if s2a.y < s2b.y {
        if s2a.y >= s1a.y || s2b.y <= s1b.y {
            return false;
        }
    } else if s2b.y >= s1a.y || s2a.y <= s1b.y {
        return false;
    }
    true
}

/// Proper (interior) crossing test for two segments.
fn segments_cross(seg1a: Point64, seg1b: Point64, seg2a: Point64, seg2b: Point64) -> bool {
    let dx1 = (seg1a.x - seg1b.x) as f64;
    let dy1 = (seg1a.y - seg1b.y) as f64;
    let dx2 = (seg2a.x - seg2b.x) as f64;
    let dy2 = (seg2a.y - seg2b.y) as f64;
    ((dy1 * (seg2a.x - seg1a.x) as f64 - dx1 * (seg2a.y - seg1a.y) as f64)
        * (dy1 * (seg2b.x - seg1a.x) as f64 - dx1 * (seg2b.y - seg1a.y) as f64)
        < 0.0)
        && ((dy2 * (seg1a.x - seg2a.x) as f64 - dx2 * (seg1a.y - seg2a.y) as f64)
            * (dy2 * (seg1b.x - seg2a.x) as f64 - dx2 * (seg1b.y - seg2a.y) as f64)
            < 0.0)
}

/// Intersection of the infinite lines through two segments, rounded to
/// integer coordinates. `None` when parallel.
fn line_intersect_pt(
    ln1a: Point64,
    ln1b: Point64,
    ln2a: Point64,
    ln2b: Point64,
) -> Option<Point64> {
    if ln1b.x == ln1a.x {
        if ln2b.x == ln2a.x {
            return None;
        }
        let m2 = (ln2b.y - ln2a.y) as f64 / (ln2b.x - ln2a.x) as f64;
        let b2 = ln2a.y as f64 - m2 * ln2a.x as f64;
        Some(Point64::new(
            ln1a.x,
            (m2 * ln1a.x as f64 + b2).round() as i64,
        ))
    } else if ln2b.x == ln2a.x {
        let m1 = (ln1b.y - ln1a.y) as f64 / (ln1b.x - ln1a.x) as f64;
        let b1 = ln1a.y as f64 - m1 * ln1a.x as f64;
        Some(Point64::new(
            ln2a.x,
            (m1 * ln2a.x as f64 + b1).round() as i64,
        ))
    } else {
        let m1 = (ln1b.y - ln1a.y) as f64 / (ln1b.x - ln1a.x) as f64;
        let b1 = ln1a.y as f64 - m1 * ln1a.x as f64;
        let m2 = (ln2b.y - ln2a.y) as f64 / (ln2b.x - ln2a.x) as f64;
        let b2 = ln2a.y as f64 - m2 * ln2a.x as f64;
        if m1 == m2 {
            return None;
        }
        let x = (b2 - b1) / (m1 - m2);
        Some(Point64::new(x.round() as i64, (m1 * x + b1).round() as i64))
    }
}

fn area_triangle(pt1: Point64, pt2: Point64, pt3: Point64) -> f64 {
    let d = |a: Point64, b: Point64| (a.y as f64 + b.y as f64) * (a.x as f64 - b.x as f64);
    (d(pt3, pt1) + d(pt1, pt2) + d(pt2, pt3)) * 0.5
}

impl Clipper64 {
    fn new_splice(&mut self, op1: usize, op2: usize, next_h: usize) -> usize {
        let id = self.splices.len();
        let next1 = self.ring_nodes[op1].splice;
        self.ring_nodes[op1].splice = id;
        let next2 = if op2 != NONE {
            let n = self.ring_nodes[op2].splice;
            self.ring_nodes[op2].splice = id;
            n
        } else {
            NONE
        };
        self.splices.push(Splice {
            op1,
            op2,
            next1,
            next2,
            next_h,
            list_idx: NONE,
        });
        id
    }

    #[inline]
    fn is_trial_splice(&self, j: usize) -> bool {
        self.splices[j].list_idx == NONE
    }

    /// Schedules a splice between two ring nodes, unless the pair is
    /// trivially adjacent within one ring.
    pub(crate) fn add_splice(&mut self, op1: usize, op2: usize) {
        let same_ring = self.ring_nodes[op1].contour == self.ring_nodes[op2].contour;
        if same_ring {
            let pts = self.contours[self.ring_nodes[op1].contour].pts;
            // adjacent nodes need no splice unless they straddle the seam
            if op1 == op2
                || (self.ring_nodes[op1].next == op2 && op1 != pts)
                || (self.ring_nodes[op2].next == op1 && op2 != pts)
            {
                return;
            }
        }
        let id = self.new_splice(op1, op2, NONE);
        self.splices[id].list_idx = self.splice_list.len();
        self.splice_list.push(id);
    }

    /// Walks `op`'s splice chain for the entry whose link points at
    /// `splice`. Returns `NONE` when the chain is inconsistent.
    fn find_splice_parent(&self, splice: usize, op: usize) -> usize {
        let mut result = self.ring_nodes[op].splice;
        loop {
            if result == NONE {
                return NONE;
            }
            let s = &self.splices[result];
            if op == s.op1 {
                if s.next1 == splice {
                    return result;
                }
                result = s.next1;
            } else {
                if s.next2 == splice {
                    return result;
                }
                result = s.next2;
            }
        }
    }

    fn unlink_splice_from(&mut self, splice: usize, op: usize, replacement: usize) {
        if self.ring_nodes[op].splice == splice {
            self.ring_nodes[op].splice = replacement;
            return;
        }
        let parent = self.find_splice_parent(splice, op);
        if parent == NONE {
            return;
        }
        if self.splices[parent].op1 == op {
            self.splices[parent].next1 = replacement;
        } else {
            self.splices[parent].next2 = replacement;
        }
    }

    /// Removes a scheduled (non-trial) splice from both node chains and
    /// from the schedule.
    pub(crate) fn delete_splice(&mut self, splice: usize) {
        let op1 = self.splices[splice].op1;
        let op2 = self.splices[splice].op2;
        let next1 = self.splices[splice].next1;
        let next2 = self.splices[splice].next2;

        self.unlink_splice_from(splice, op1, next1);
        if op2 != NONE {
            self.unlink_splice_from(splice, op2, next2);
        }

        let idx = self.splices[splice].list_idx;
        if idx != NONE {
            self.splice_list[idx] = NONE;
        }
    }

    // ------------------------------------------------------------------
    // Horizontal trials
    // ------------------------------------------------------------------

    fn get_horz_trial_parent(&self, op: usize) -> usize {
        let mut j = self.ring_nodes[op].splice;
        while j != NONE {
            let s = &self.splices[j];
            if s.op1 == op {
                if s.next1 != NONE && self.is_trial_splice(s.next1) {
                    return j;
                }
                j = s.next1;
            } else {
                if s.next2 != NONE && self.is_trial_splice(s.next2) {
                    return j;
                }
                j = s.next2;
            }
        }
        NONE
    }

    fn in_trial_horz_list(&self, op: usize) -> bool {
        let j = self.ring_nodes[op].splice;
        j != NONE && (self.is_trial_splice(j) || self.get_horz_trial_parent(op) != NONE)
    }

    /// Records a candidate endpoint of a horizontal ring segment.
    pub(crate) fn add_trial_horz_splice(&mut self, op: usize) {
        if self.in_trial_horz_list(op) {
            return;
        }
        let head = self.horz_splice_first;
        let id = self.new_splice(op, NONE, head);
        self.horz_splice_first = id;
    }

    fn delete_trial_horz_splice(&mut self, op: usize) {
        if self.horz_splice_first == NONE {
            return;
        }
        let mut parent_op = NONE;
        let mut j = self.ring_nodes[op].splice;
        while j != NONE {
            if self.is_trial_splice(j) {
                // unlink from the trial list
                if j == self.horz_splice_first {
                    self.horz_splice_first = self.splices[j].next_h;
                } else {
                    let mut ph = self.horz_splice_first;
                    while ph != NONE && self.splices[ph].next_h != j {
                        ph = self.splices[ph].next_h;
                    }
                    if ph != NONE {
                        self.splices[ph].next_h = self.splices[j].next_h;
                    }
                }
                // trials are anchored at op1 only
                let next = self.splices[j].next1;
                if parent_op == NONE {
                    self.ring_nodes[op].splice = next;
                } else if self.splices[parent_op].op1 == op {
                    self.splices[parent_op].next1 = next;
                } else {
                    self.splices[parent_op].next2 = next;
                }
                j = next;
            } else {
                parent_op = j;
                j = if self.splices[j].op1 == op {
                    self.splices[j].next1
                } else {
                    self.splices[j].next2
                };
            }
        }
    }

    /// Severs every splice that references `op` before its ring node is
    /// discarded.
    pub(crate) fn safe_delete_ring_splices(&mut self, op: usize) {
        loop {
            let j = self.ring_nodes[op].splice;
            if j == NONE {
                return;
            }
            if self.is_trial_splice(j) {
                self.delete_trial_horz_splice(op);
            } else if self.horz_splice_first != NONE {
                let op1 = self.splices[j].op1;
                let op2 = self.splices[j].op2;
                if self.in_trial_horz_list(op1) {
                    self.delete_trial_horz_splice(op1);
                }
                if op2 != NONE && self.in_trial_horz_list(op2) {
                    self.delete_trial_horz_splice(op2);
                }
                self.delete_splice(j);
            } else {
                self.delete_splice(j);
            }
        }
    }

    /// The maximal run of same-Y ring nodes containing `op`; `None` when
    /// `op` is not part of a horizontal segment at least one edge long.
    fn get_extended_horz_seg(&self, mut op: usize) -> Option<(usize, usize)> {
        let contour = self.get_real_contour(self.ring_nodes[op].contour);
        if contour == NONE {
            return None;
        }
        let pts = self.contours[contour].pts;
        if pts == NONE {
            return None;
        }
        let mut op2 = op;
        let y = |n: &Self, i: usize| n.ring_nodes[i].pt.y;

        if self.contours[contour].front_edge != NONE {
            while self.ring_nodes[op].prev != pts && y(self, self.ring_nodes[op].prev) == y(self, op)
            {
                op = self.ring_nodes[op].prev;
            }
            while op2 != pts && y(self, self.ring_nodes[op2].next) == y(self, op2) {
                op2 = self.ring_nodes[op2].next;
            }
            if op2 != op {
                Some((op, op2))
            } else {
                None
            }
        } else {
            while self.ring_nodes[op].prev != op2 && y(self, self.ring_nodes[op].prev) == y(self, op)
            {
                op = self.ring_nodes[op].prev;
            }
            while self.ring_nodes[op2].next != op && y(self, self.ring_nodes[op2].next) == y(self, op2)
            {
                op2 = self.ring_nodes[op2].next;
            }
            if op2 != op && self.ring_nodes[op2].next != op {
                Some((op, op2))
            } else {
                None
            }
        }
    }

    /// Promotes overlapping horizontal trials into real splices.
    pub(crate) fn convert_horz_trials_to_splices(&mut self) {
        while self.horz_splice_first != NONE {
            let j = self.horz_splice_first;
            self.horz_splice_first = self.splices[j].next_h;
            let op1a = self.splices[j].op1;
            self.unlink_splice_from(j, op1a, self.splices[j].next1);

            let Some((op1a, op1b)) = self.get_extended_horz_seg(op1a) else {
                let contour = self.get_real_contour(self.ring_nodes[op1a].contour);
                if contour != NONE {
                    self.clean_collinear(contour);
                }
                continue;
            };

            let mut joined = false;
            let mut j2 = self.horz_splice_first;
            while j2 != NONE {
                let op2a = self.splices[j2].op1;
                if let Some((op2a, op2b)) = self.get_extended_horz_seg(op2a) {
                    let x1a = self.ring_nodes[op1a].pt.x;
                    let x1b = self.ring_nodes[op1b].pt.x;
                    let x2a = self.ring_nodes[op2a].pt.x;
                    let x2b = self.ring_nodes[op2b].pt.x;
                    if horz_edges_overlap(x1a, x1b, x2a, x2b) {
                        joined = true;
                        let p1a = self.ring_nodes[op1a].pt;
                        let p1b = self.ring_nodes[op1b].pt;
                        let p2a = self.ring_nodes[op2a].pt;
                        let p2b = self.ring_nodes[op2b].pt;
                        if p1a == p2b {
                            self.add_splice(op1a, op2b);
                        } else if p1b == p2a {
                            self.add_splice(op1b, op2a);
                        } else if p1a == p2a {
                            self.add_splice(op1a, op2a);
                        } else if p1b == p2b {
                            self.add_splice(op1b, op2b);
                        } else if value_between(p1a.x, p2a.x, p2b.x) {
                            let op = self.insert_ring_node(p1a, op2a);
                            self.add_splice(op1a, op);
                        } else if value_between(p1b.x, p2a.x, p2b.x) {
                            let op = self.insert_ring_node(p1b, op2a);
                            self.add_splice(op1b, op);
                        } else if value_between(p2a.x, p1a.x, p1b.x) {
                            let op = self.insert_ring_node(p2a, op1a);
                            self.add_splice(op2a, op);
                        } else if value_between(p2b.x, p1a.x, p1b.x) {
                            let op = self.insert_ring_node(p2b, op1a);
                            self.add_splice(op2b, op);
                        }
                        break;
                    }
                }
                j2 = self.splices[j2].next_h;
            }
            if !joined {
                let contour = self.get_real_contour(self.ring_nodes[op1a].contour);
                if contour != NONE {
                    self.clean_collinear(contour);
                }
            }
        }
    }

    // ------------------------------------------------------------------
    // Post-sweep resolution
    // ------------------------------------------------------------------

    pub(crate) fn process_splice_list(&mut self) {
        for i in 0..self.splice_list.len() {
            let j = self.splice_list[i];
            if j == NONE || self.error_found {
                continue;
            }
            let contour = self.process_splice(j);
            if contour != NONE {
                self.clean_collinear(contour);
            }
        }
        self.splice_list.clear();
    }

    /// Drops duplicate neighbours of `op` that carry no splice of their
    /// own, so the splice about to be performed sees clean geometry.
    fn check_dispose_adjacent(&mut self, op: &mut usize, guard: usize, contour: usize) -> bool {
        let mut result = false;
        while self.ring_nodes[*op].prev != *op {
            let prev = self.ring_nodes[*op].prev;
            if self.ring_nodes[*op].pt == self.ring_nodes[prev].pt
                && *op != guard
                && self.ring_nodes[prev].splice != NONE
                && self.ring_nodes[*op].splice == NONE
            {
                if *op == self.contours[contour].pts {
                    self.contours[contour].pts = prev;
                }
                self.dispose_ring_node(*op);
                *op = prev;
                result = true;
            } else {
                break;
            }
        }
        while self.ring_nodes[*op].next != *op {
            let next = self.ring_nodes[*op].next;
            if self.ring_nodes[*op].pt == self.ring_nodes[next].pt
                && *op != guard
                && self.ring_nodes[next].splice != NONE
                && self.ring_nodes[*op].splice == NONE
            {
                if *op == self.contours[contour].pts {
                    self.contours[contour].pts = next;
                }
                self.dispose_ring_node(*op);
                *op = next;
                result = true;
            } else {
                break;
            }
        }
        result
    }

    /// Performs one recorded splice: a merge of two rings, a split of a
    /// self-touching ring, or (when the geometry moved on) nothing.
    fn process_splice(&mut self, splice: usize) -> usize {
        let mut op1 = self.splices[splice].op1;
        let mut op2 = self.splices[splice].op2;
        let or1 = self.get_real_contour(self.ring_nodes[op1].contour);
        let mut or2 = self.get_real_contour(self.ring_nodes[op2].contour);
        self.delete_splice(splice);

        if or2 == NONE || self.contours[or2].pts == NONE {
            return or1;
        }
        if !self.is_valid_closed_ring(op2) {
            self.safe_dispose_ring(op2);
            return or1;
        }
        if or1 == NONE || self.contours[or1].pts == NONE || !self.is_valid_closed_ring(op1) {
            if op1 != NONE {
                self.safe_dispose_ring(op1);
            }
            return or2;
        }
        if or1 == or2
            && (op1 == op2
                || self.ring_nodes[op1].next == op2
                || self.ring_nodes[op1].prev == op2)
        {
            return or1;
        }

        self.check_dispose_adjacent(&mut op1, op2, or1);
        self.check_dispose_adjacent(&mut op2, op1, or2);
        if self.ring_nodes[op1].next == op2 || self.ring_nodes[op2].next == op1 {
            return or1;
        }
        or2 = self.get_real_contour(self.ring_nodes[op2].contour);

        let mut result = or1;
        loop {
            if !self.is_valid_ring(op1)
                || !self.is_valid_ring(op2)
                || (or1 == or2
                    && (self.ring_nodes[op1].prev == op2 || self.ring_nodes[op1].next == op2))
            {
                return or1;
            }

            let p1 = self.ring_nodes[op1].pt;
            let p2 = self.ring_nodes[op2].pt;
            let p1_prev = self.ring_nodes[self.ring_nodes[op1].prev].pt;
            let p1_next = self.ring_nodes[self.ring_nodes[op1].next].pt;
            let p2_prev = self.ring_nodes[self.ring_nodes[op2].prev].pt;
            let p2_next = self.ring_nodes[self.ring_nodes[op2].next].pt;

            if p1_prev == p2_next
                || (cross_product(p1_prev, p1, p2_next) == 0.0
                    && collinear_segs_overlap(p1_prev, p1, p2, p2_next))
            {
                if or1 == or2 {
                    // split the ring in two
                    if p1_prev != p2_next {
                        // make the seam endpoints coincide first
                        if point_equal_or_between(p1_prev, p2, p2_next) {
                            self.insert_ring_node(p1_prev, op2);
                        } else {
                            let prev1 = self.ring_nodes[op1].prev;
                            self.insert_ring_node(p2_next, prev1);
                        }
                    }
                    let op_a = self.ring_nodes[op1].prev;
                    let op_b = self.ring_nodes[op2].next;
                    self.ring_nodes[op_a].next = op_b;
                    self.ring_nodes[op_b].prev = op_a;
                    self.ring_nodes[op1].prev = op2;
                    self.ring_nodes[op2].next = op1;
                    self.complete_split(op1, op_a, or1);
                } else {
                    // merge the rings
                    let op_a = self.ring_nodes[op1].prev;
                    let op_b = self.ring_nodes[op2].next;
                    self.ring_nodes[op_a].next = op_b;
                    self.ring_nodes[op_b].prev = op_a;
                    self.ring_nodes[op1].prev = op2;
                    self.ring_nodes[op2].next = op1;
                    if or1 < or2 {
                        self.contours[or1].pts = op1;
                        self.contours[or2].pts = NONE;
                        self.contours[or2].owner = or1;
                    } else {
                        result = or2;
                        self.contours[or2].pts = op1;
                        self.contours[or1].pts = NONE;
                        self.contours[or1].owner = or2;
                    }
                    self.update_ring_contour(result);
                }
                break;
            } else if p1_next == p2_prev
                || (cross_product(p1_next, p2, p2_prev) == 0.0
                    && collinear_segs_overlap(p1_next, p1, p2, p2_prev))
            {
                if or1 == or2 {
                    // split
                    if p1_next != p2_prev {
                        if point_equal_or_between(p2_prev, p1, p1_next) {
                            self.insert_ring_node(p2_prev, op1);
                        } else {
                            let prev2 = self.ring_nodes[op2].prev;
                            self.insert_ring_node(p1_next, prev2);
                        }
                    }
                    let op_a = self.ring_nodes[op1].next;
                    let op_b = self.ring_nodes[op2].prev;
                    self.ring_nodes[op_a].prev = op_b;
                    self.ring_nodes[op_b].next = op_a;
                    self.ring_nodes[op1].next = op2;
                    self.ring_nodes[op2].prev = op1;
                    self.complete_split(op1, op_a, or1);
                } else {
                    // merge
                    let op_a = self.ring_nodes[op1].next;
                    let op_b = self.ring_nodes[op2].prev;
                    self.ring_nodes[op_a].prev = op_b;
                    self.ring_nodes[op_b].next = op_a;
                    self.ring_nodes[op1].next = op2;
                    self.ring_nodes[op2].prev = op1;
                    if or1 < or2 {
                        self.contours[or1].pts = op1;
                        self.contours[or2].pts = NONE;
                        self.contours[or2].owner = or1;
                    } else {
                        result = or2;
                        self.contours[or2].pts = op1;
                        self.contours[or1].pts = NONE;
                        self.contours[or1].owner = or2;
                    }
                    self.update_ring_contour(result);
                }
                break;
            } else if point_between(p1_next, p2, p2_prev)
                && distance_from_line_squared(p1_next, p2, p2_prev) < 2.01
            {
                let prev2 = self.ring_nodes[op2].prev;
                self.insert_ring_node(p1_next, prev2);
            } else if point_between(p2_next, p1, p1_prev)
                && distance_from_line_squared(p2_next, p1, p1_prev) < 2.01
            {
                let prev1 = self.ring_nodes[op1].prev;
                self.insert_ring_node(p2_next, prev1);
            } else if point_between(p1_prev, p2, p2_next)
                && distance_from_line_squared(p1_prev, p2, p2_next) < 2.01
            {
                self.insert_ring_node(p1_prev, op2);
            } else if point_between(p2_prev, p1, p1_next)
                && distance_from_line_squared(p2_prev, p1, p1_next) < 2.01
            {
                self.insert_ring_node(p2_prev, op1);
            } else {
                // the rings wandered apart: nudge near-coincident ends
                // together or give up and tidy both
                if self.check_dispose_adjacent(&mut op1, op2, or1) {
                    continue;
                }
                if self.check_dispose_adjacent(&mut op2, op1, or2) {
                    continue;
                }
                if p1_prev != p2_next && p1_prev.distance_squared(p2_next) < 2.01 {
                    let prev1 = self.ring_nodes[op1].prev;
                    let next2 = self.ring_nodes[op2].next;
                    self.ring_nodes[prev1].pt = self.ring_nodes[next2].pt;
                    continue;
                }
                if p1_next != p2_prev && p1_next.distance_squared(p2_prev) < 2.01 {
                    let next1 = self.ring_nodes[op1].next;
                    let prev2 = self.ring_nodes[op2].prev;
                    self.ring_nodes[prev2].pt = self.ring_nodes[next1].pt;
                    continue;
                }
                self.contours[or1].pts = op1;
                if or2 != or1 {
                    self.contours[or2].pts = op2;
                    self.clean_collinear(or2);
                }
                break;
            }
        }
        result
    }

    /// Repoints every node of `contour`'s ring at `contour`.
    pub(crate) fn update_ring_contour(&mut self, contour: usize) {
        let pts = self.contours[contour].pts;
        if pts == NONE {
            return;
        }
        let mut op = pts;
        loop {
            self.ring_nodes[op].contour = contour;
            op = self.ring_nodes[op].next;
            if op == pts {
                break;
            }
        }
    }

    /// After a ring was cut in two at a shared point, decides which half
    /// survives as `contour` and whether the other half becomes a new
    /// contour or is discarded as sliver.
    fn complete_split(&mut self, op1: usize, op2: usize, contour: usize) {
        let area1 = self.ring_area(op1);
        let area2 = self.ring_area(op2);
        let signs_change = (area1 > 0.0) == (area2 < 0.0);

        if area1 == 0.0 || (signs_change && area1.abs() < 2.0) {
            self.safe_dispose_ring(op1);
            self.contours[contour].pts = op2;
            self.update_ring_contour(contour);
        } else if area2 == 0.0 || (signs_change && area2.abs() < 2.0) {
            self.safe_dispose_ring(op2);
            self.contours[contour].pts = op1;
            self.update_ring_contour(contour);
        } else {
            let new_contour = self.new_contour();
            if self.using_polytree {
                self.contours[contour].splits.push(new_contour);
            }

            if area1.abs() >= area2.abs() {
                self.contours[contour].pts = op1;
                self.contours[new_contour].pts = op2;
            } else {
                self.contours[contour].pts = op2;
                self.contours[new_contour].pts = op1;
            }

            if (area1 > 0.0) == (area2 > 0.0) {
                self.contours[new_contour].owner = self.contours[contour].owner;
            } else {
                self.contours[new_contour].owner = contour;
            }
            self.contours[new_contour].state = self.contours[contour].state;

            self.update_ring_contour(contour);
            self.update_ring_contour(new_contour);
            self.clean_collinear(new_contour);
        }
    }

    // ------------------------------------------------------------------
    // Ring hygiene
    // ------------------------------------------------------------------

    /// Removes collinear runs (or, when preserving collinear points, only
    /// 180-degree spikes) from a finished ring, then repairs any
    /// self-intersections the removal exposed.
    pub(crate) fn clean_collinear(&mut self, contour: usize) {
        let contour = self.get_real_contour(contour);
        if contour == NONE
            || self.contours[contour].state == ContourState::Open
            || !self.is_valid_closed_ring(self.contours[contour].pts)
        {
            return;
        }

        let mut start_op = self.contours[contour].pts;
        let mut op2 = start_op;
        loop {
            if self.ring_nodes[op2].splice != NONE {
                return; // postpone until the splice resolves
            }
            let prev = self.ring_nodes[op2].prev;
            let next = self.ring_nodes[op2].next;
            let p = self.ring_nodes[op2].pt;
            let pp = self.ring_nodes[prev].pt;
            let pn = self.ring_nodes[next].pt;

            let collinear = cross_product(pp, p, pn) == 0.0;
            if collinear
                && (p == pp
                    || p == pn
                    || !self.preserve_collinear
                    || dot_product(pp, p, pn) < 0.0)
            {
                if op2 == self.contours[contour].pts {
                    self.contours[contour].pts = prev;
                }
                let next_op = self.dispose_ring_node(op2);
                if !self.is_valid_closed_ring(next_op) {
                    self.contours[contour].pts = NONE;
                    return;
                }
                op2 = next_op;
                start_op = op2;
                continue;
            }
            op2 = next;
            if op2 == start_op {
                break;
            }
        }
        self.fix_self_intersects(contour);
    }

    /// Splits a ring wherever two of its edges properly cross.
    fn fix_self_intersects(&mut self, contour: usize) {
        let mut op2 = self.contours[contour].pts;
        loop {
            // three-node rings cannot self-intersect
            if self.ring_nodes[self.ring_nodes[op2].next].next == self.ring_nodes[op2].prev {
                break;
            }
            let prev = self.ring_nodes[op2].prev;
            let next = self.ring_nodes[op2].next;
            let next2 = self.ring_nodes[next].next;
            if segments_cross(
                self.ring_nodes[prev].pt,
                self.ring_nodes[op2].pt,
                self.ring_nodes[next].pt,
                self.ring_nodes[next2].pt,
            ) {
                let pts = self.contours[contour].pts;
                if op2 == pts || next == pts {
                    self.contours[contour].pts = self.ring_nodes[pts].prev;
                }
                op2 = self.do_split_op(contour, op2);
                self.contours[contour].pts = op2;
                continue;
            } else {
                op2 = next;
            }
            if op2 == self.contours[contour].pts {
                break;
            }
        }
    }

    /// Cuts the crossing out of the ring: the two crossing edges are
    /// replaced by their intersection point, and the loop they enclosed
    /// either becomes a new contour or is dropped as a sliver.
    fn do_split_op(&mut self, contour: usize, split_op: usize) -> usize {
        let prev_op = self.ring_nodes[split_op].prev;
        let next_op = self.ring_nodes[split_op].next;
        let next_next_op = self.ring_nodes[next_op].next;
        let result = prev_op;

        let ip = line_intersect_pt(
            self.ring_nodes[prev_op].pt,
            self.ring_nodes[split_op].pt,
            self.ring_nodes[next_op].pt,
            self.ring_nodes[next_next_op].pt,
        )
        .unwrap_or(self.ring_nodes[split_op].pt);

        let anchor = self.contours[contour].pts;
        let area1 = self.ring_area(anchor);
        let area2 = area_triangle(ip, self.ring_nodes[split_op].pt, self.ring_nodes[next_op].pt);

        if ip == self.ring_nodes[prev_op].pt || ip == self.ring_nodes[next_next_op].pt {
            self.ring_nodes[next_next_op].prev = prev_op;
            self.ring_nodes[prev_op].next = next_next_op;
        } else {
            let new_op2 = self.new_ring_node(ip, contour);
            self.ring_nodes[new_op2].prev = prev_op;
            self.ring_nodes[new_op2].next = next_next_op;
            self.ring_nodes[next_next_op].prev = new_op2;
            self.ring_nodes[prev_op].next = new_op2;
        }

        self.safe_delete_ring_splices(next_op);
        self.safe_delete_ring_splices(split_op);

        let keep_loop = area2.abs() >= 1.0
            && (area2.abs() > area1.abs() || (area2 > 0.0) == (area1 > 0.0));
        if keep_loop {
            let new_contour = self.new_contour();
            self.contours[new_contour].owner = self.contours[contour].owner;
            self.contours[new_contour].state = self.contours[contour].state;
            if self.using_polytree {
                self.contours[contour].splits.push(new_contour);
            }
            let new_op = self.new_ring_node(ip, new_contour);
            self.ring_nodes[new_op].prev = next_op;
            self.ring_nodes[new_op].next = split_op;
            self.contours[new_contour].pts = new_op;
            self.ring_nodes[split_op].prev = new_op;
            self.ring_nodes[split_op].next = next_op;
            self.ring_nodes[next_op].prev = split_op;
            self.ring_nodes[next_op].next = new_op;
            self.ring_nodes[split_op].contour = new_contour;
            self.ring_nodes[next_op].contour = new_contour;
        } else {
            // the enclosed sliver vanishes
            self.ring_nodes[split_op].next = split_op;
            self.ring_nodes[split_op].prev = split_op;
            self.ring_nodes[next_op].next = next_op;
            self.ring_nodes[next_op].prev = next_op;
        }
        result
    }
}
