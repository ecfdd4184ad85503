//! Output ring store: contours under construction and their vertex rings.
//!
//! Every contour in the solution is a `Contour` owning a circular
//! doubly-linked ring of `RingNode`s. While a contour is still being
//! built it is tied to the two active edges that delimit it (its front
//! and back sides); ring nodes are appended at the seam between the two.
//! Rings support O(1) splice and split, which the deferred-splice
//! resolver relies on.

use crate::path::Path64;
use crate::primitives::{Point64, Rect64};

use super::clipper::Clipper64;
use super::engine::NONE;

/// Construction state of a contour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContourState {
    Undefined,
    /// An open polyline; never becomes a hole.
    Open,
    /// An outer boundary (even hole depth).
    Outer,
    /// A hole boundary (odd hole depth).
    Inner,
}

/// One vertex of an output ring.
#[derive(Debug, Clone)]
pub(crate) struct RingNode {
    pub(crate) pt: Point64,
    pub(crate) next: usize,
    pub(crate) prev: usize,
    pub(crate) contour: usize,
    /// Head of this node's pending-splice chain.
    pub(crate) splice: usize,
}

/// An output contour: one ring of the solution, possibly still growing.
#[derive(Debug, Clone)]
pub(crate) struct Contour {
    pub(crate) owner: usize,
    /// Contours birthed from this one by self-intersection splits.
    pub(crate) splits: Vec<usize>,
    pub(crate) front_edge: usize,
    pub(crate) back_edge: usize,
    /// Any node of the ring, or `NONE` once pruned.
    pub(crate) pts: usize,
    pub(crate) state: ContourState,
    /// Node index in the containment tree being built, if any.
    pub(crate) tree_node: usize,
    /// Extracted path and bounds, cached during tree construction.
    pub(crate) path: Path64,
    pub(crate) bounds: Rect64,
}

impl Contour {
    pub(crate) fn new() -> Self {
        Self {
            owner: NONE,
            splits: Vec::new(),
            front_edge: NONE,
            back_edge: NONE,
            pts: NONE,
            state: ContourState::Undefined,
            tree_node: NONE,
            path: Path64::new(),
            bounds: Rect64::inverted(),
        }
    }
}

impl Clipper64 {
    pub(crate) fn new_contour(&mut self) -> usize {
        self.contours.push(Contour::new());
        self.contours.len() - 1
    }

    pub(crate) fn new_ring_node(&mut self, pt: Point64, contour: usize) -> usize {
        let id = self.ring_nodes.len();
        self.ring_nodes.push(RingNode {
            pt,
            next: id,
            prev: id,
            contour,
            splice: NONE,
        });
        id
    }

    /// Inserts a new node carrying `pt` immediately after `after`.
    pub(crate) fn insert_ring_node(&mut self, pt: Point64, after: usize) -> usize {
        let id = self.new_ring_node(pt, self.ring_nodes[after].contour);
        let next = self.ring_nodes[after].next;
        self.ring_nodes[id].next = next;
        self.ring_nodes[id].prev = after;
        self.ring_nodes[next].prev = id;
        self.ring_nodes[after].next = id;
        id
    }

    /// Unlinks `op` from its ring, returning the following node (or `NONE`
    /// if `op` was the last one).
    pub(crate) fn dispose_ring_node(&mut self, op: usize) -> usize {
        let next = self.ring_nodes[op].next;
        let prev = self.ring_nodes[op].prev;
        let result = if next == op { NONE } else { next };
        self.ring_nodes[prev].next = next;
        self.ring_nodes[next].prev = prev;
        self.ring_nodes[op].next = op;
        self.ring_nodes[op].prev = op;
        result
    }

    // ------------------------------------------------------------------
    // Active-edge / contour relationships
    // ------------------------------------------------------------------

    /// A "hot" edge is one currently laying down a contour side.
    #[inline]
    pub(crate) fn is_hot(&self, e: usize) -> bool {
        self.actives[e].outrec != NONE
    }

    #[inline]
    pub(crate) fn is_front(&self, e: usize) -> bool {
        let c = self.actives[e].outrec;
        c != NONE && self.contours[c].front_edge == e
    }

    pub(crate) fn get_prev_hot_edge(&self, e: usize) -> usize {
        let mut prev = self.actives[e].prev_in_ael;
        while prev != NONE && (self.is_open(prev) || !self.is_hot(prev)) {
            prev = self.actives[prev].prev_in_ael;
        }
        prev
    }

    pub(crate) fn set_sides(&mut self, contour: usize, start_edge: usize, end_edge: usize) {
        self.contours[contour].front_edge = start_edge;
        self.contours[contour].back_edge = end_edge;
    }

    pub(crate) fn swap_contour_sides(&mut self, contour: usize) {
        let front = self.contours[contour].front_edge;
        let back = self.contours[contour].back_edge;
        self.contours[contour].front_edge = back;
        self.contours[contour].back_edge = front;
        let pts = self.contours[contour].pts;
        self.contours[contour].pts = self.ring_nodes[pts].next;
    }

    /// Detaches a completed contour from both of its active edges.
    pub(crate) fn uncouple_contour(&mut self, e: usize) {
        let contour = self.actives[e].outrec;
        if contour == NONE {
            return;
        }
        let front = self.contours[contour].front_edge;
        let back = self.contours[contour].back_edge;
        self.actives[front].outrec = NONE;
        self.actives[back].outrec = NONE;
        self.contours[contour].front_edge = NONE;
        self.contours[contour].back_edge = NONE;
    }

    /// Exchanges contour attachment between two edges crossing each other.
    pub(crate) fn swap_contour_edges(&mut self, e1: usize, e2: usize) {
        let or1 = self.actives[e1].outrec;
        let or2 = self.actives[e2].outrec;
        if or1 == or2 {
            if or1 != NONE {
                let c = &mut self.contours[or1];
                std::mem::swap(&mut c.front_edge, &mut c.back_edge);
            }
            return;
        }
        if or1 != NONE {
            if self.contours[or1].front_edge == e1 {
                self.contours[or1].front_edge = e2;
            } else {
                self.contours[or1].back_edge = e2;
            }
        }
        if or2 != NONE {
            if self.contours[or2].front_edge == e2 {
                self.contours[or2].front_edge = e1;
            } else {
                self.contours[or2].back_edge = e1;
            }
        }
        self.actives[e1].outrec = or2;
        self.actives[e2].outrec = or1;
    }

    /// Follows the owner chain past contours whose rings were absorbed.
    pub(crate) fn get_real_contour(&self, mut contour: usize) -> usize {
        while contour != NONE && self.contours[contour].pts == NONE {
            contour = self.contours[contour].owner;
        }
        contour
    }

    pub(crate) fn is_valid_ring(&self, op: usize) -> bool {
        op != NONE && self.ring_nodes[op].next != op
    }

    /// A closed ring needs at least three nodes to bound area.
    pub(crate) fn is_valid_closed_ring(&self, op: usize) -> bool {
        op != NONE
            && self.ring_nodes[op].next != op
            && self.ring_nodes[op].next != self.ring_nodes[op].prev
    }

    /// Signed ring area via the shoelace formula (f64 measure).
    pub(crate) fn ring_area(&self, op: usize) -> f64 {
        if op == NONE {
            return 0.0;
        }
        let mut area = 0.0;
        let mut op2 = op;
        loop {
            let prev = self.ring_nodes[op2].prev;
            let p = self.ring_nodes[op2].pt;
            let q = self.ring_nodes[prev].pt;
            area += (q.y as f64 + p.y as f64) * (q.x as f64 - p.x as f64);
            op2 = self.ring_nodes[op2].next;
            if op2 == op {
                break;
            }
        }
        area * 0.5
    }

    // ------------------------------------------------------------------
    // Ring building
    // ------------------------------------------------------------------

    /// Appends `pt` to the contour side laid down by `e`.
    ///
    /// Points land at the seam between the front and back halves of the
    /// ring; duplicate seam points are coalesced.
    pub(crate) fn add_out_pt(&mut self, e: usize, pt: Point64) -> usize {
        let contour = self.actives[e].outrec;
        let to_front = self.is_front(e);
        let op_front = self.contours[contour].pts;
        let op_back = self.ring_nodes[op_front].next;

        if to_front && pt == self.ring_nodes[op_front].pt {
            return op_front;
        }
        if !to_front && pt == self.ring_nodes[op_back].pt {
            return op_back;
        }

        let new_op = self.new_ring_node(pt, contour);
        self.ring_nodes[op_back].prev = new_op;
        self.ring_nodes[new_op].prev = op_front;
        self.ring_nodes[new_op].next = op_back;
        self.ring_nodes[op_front].next = new_op;
        if to_front {
            self.contours[contour].pts = new_op;
        }
        new_op
    }

    /// Assigns a freshly opened contour its owner and inner/outer state by
    /// looking left along the AEL for the nearest hot edge.
    fn set_owner_and_state(&mut self, e: usize) {
        let contour = self.actives[e].outrec;
        if self.is_open(e) {
            self.contours[contour].owner = NONE;
            self.contours[contour].state = ContourState::Open;
            return;
        }

        let owner = if self.is_heading_left_horz(e) {
            // a leftward horizontal start: assess from the opposite side
            let mut e2 = self.actives[e].next_in_ael;
            while e2 != NONE && (!self.is_hot(e2) || self.is_open(e2)) {
                e2 = self.actives[e2].next_in_ael;
            }
            if e2 == NONE {
                NONE
            } else {
                let c2 = self.actives[e2].outrec;
                let outer = self.contours[c2].state == ContourState::Outer;
                if outer == (self.contours[c2].front_edge == e2) {
                    self.contours[c2].owner
                } else {
                    c2
                }
            }
        } else {
            let e2 = self.get_prev_hot_edge(e);
            if e2 == NONE {
                NONE
            } else {
                let c2 = self.actives[e2].outrec;
                let outer = self.contours[c2].state == ContourState::Outer;
                if outer == (self.contours[c2].back_edge == e2) {
                    self.contours[c2].owner
                } else {
                    c2
                }
            }
        };

        self.contours[contour].owner = owner;
        if owner == NONE || self.contours[owner].state == ContourState::Inner {
            self.contours[contour].state = ContourState::Outer;
        } else {
            self.contours[contour].state = ContourState::Inner;
        }
    }

    /// Opens a new contour where the edge pair `e1`/`e2` meets at `pt`.
    pub(crate) fn add_local_min_poly(
        &mut self,
        e1: usize,
        e2: usize,
        pt: Point64,
        is_new: bool,
    ) -> usize {
        let contour = self.new_contour();
        self.actives[e1].outrec = contour;
        self.set_owner_and_state(e1);
        self.actives[e2].outrec = contour;

        if !self.is_open(e1) {
            // Owner/state decide which active becomes the front side, and
            // with it the orientation of the finished ring.
            let outer = self.contours[contour].state == ContourState::Outer;
            if outer == is_new {
                self.set_sides(contour, e1, e2);
            } else {
                self.set_sides(contour, e2, e1);
            }
        }

        let op = self.new_ring_node(pt, contour);
        self.contours[contour].pts = op;
        op
    }

    /// Closes the contour(s) delimited by `e1` and `e2` meeting at `pt`.
    ///
    /// Returns `NONE` (with the error flag raised) if the two edges claim
    /// the same ring side, which means the ring graph is inconsistent.
    pub(crate) fn add_local_max_poly(&mut self, e1: usize, e2: usize, pt: Point64) -> usize {
        if self.is_front(e1) == self.is_front(e2) {
            if self.is_open_end(e1) {
                self.swap_contour_sides(self.actives[e1].outrec);
            } else if self.is_open_end(e2) {
                self.swap_contour_sides(self.actives[e2].outrec);
            } else {
                self.error_found = true;
                return NONE;
            }
        }

        let mut result = self.add_out_pt(e1, pt);
        let or1 = self.actives[e1].outrec;
        let or2 = self.actives[e2].outrec;
        if or1 == or2 {
            self.contours[or1].pts = result;
            self.uncouple_contour(e1);
            if !self.is_open(e1) {
                self.clean_collinear(or1);
            }
            result = self.contours[or1].pts;
        } else if or1 < or2 {
            self.join_contour_paths(e1, e2);
        } else {
            self.join_contour_paths(e2, e1);
        }
        result
    }

    /// Splices e2's ring onto e1's ring; e2's contour is left empty and
    /// owned by e1's.
    pub(crate) fn join_contour_paths(&mut self, e1: usize, e2: usize) {
        let or1 = self.actives[e1].outrec;
        let or2 = self.actives[e2].outrec;
        let p1_st = self.contours[or1].pts;
        let p2_st = self.contours[or2].pts;
        let p1_end = self.ring_nodes[p1_st].next;
        let p2_end = self.ring_nodes[p2_st].next;

        if self.is_front(e1) {
            self.ring_nodes[p2_end].prev = p1_st;
            self.ring_nodes[p1_st].next = p2_end;
            self.ring_nodes[p2_st].next = p1_end;
            self.ring_nodes[p1_end].prev = p2_st;
            self.contours[or1].pts = p2_st;
            let fe2 = self.contours[or2].front_edge;
            self.contours[or1].front_edge = fe2;
            if fe2 != NONE {
                self.actives[fe2].outrec = or1;
            }
        } else {
            self.ring_nodes[p1_end].prev = p2_st;
            self.ring_nodes[p2_st].next = p1_end;
            self.ring_nodes[p1_st].next = p2_end;
            self.ring_nodes[p2_end].prev = p1_st;
            let be2 = self.contours[or2].back_edge;
            self.contours[or1].back_edge = be2;
            if be2 != NONE {
                self.actives[be2].outrec = or1;
            }
        }

        self.contours[or2].front_edge = NONE;
        self.contours[or2].back_edge = NONE;
        self.contours[or2].pts = NONE;
        self.contours[or2].owner = or1;

        if self.is_open_end(e1) {
            self.contours[or2].pts = self.contours[or1].pts;
            self.contours[or1].pts = NONE;
        }

        self.actives[e1].outrec = NONE;
        self.actives[e2].outrec = NONE;
    }

    /// Starts recording an open path at `pt`.
    pub(crate) fn start_open_path(&mut self, e: usize, pt: Point64) -> usize {
        let contour = self.new_contour();
        self.contours[contour].state = ContourState::Open;
        self.actives[e].outrec = contour;

        let op = self.new_ring_node(pt, contour);
        self.contours[contour].pts = op;
        op
    }

    // ------------------------------------------------------------------
    // Path extraction
    // ------------------------------------------------------------------

    /// Extracts the ring starting at `op` as a path, skipping coincident
    /// consecutive points. Returns `None` for degenerate rings.
    pub(crate) fn extract_path(&self, op: usize, is_open: bool) -> Option<Path64> {
        if op == NONE || self.ring_nodes[op].next == op {
            return None;
        }
        if !is_open && self.ring_nodes[op].next == self.ring_nodes[op].prev {
            return None;
        }

        let start = if is_open {
            op
        } else {
            self.ring_nodes[op].next
        };
        let mut path = Path64::new();
        let mut last_pt = self.ring_nodes[start].pt;
        path.push(last_pt);
        let mut op2 = self.ring_nodes[start].next;
        while op2 != start {
            let pt = self.ring_nodes[op2].pt;
            if pt != last_pt {
                path.push(pt);
                last_pt = pt;
            }
            op2 = self.ring_nodes[op2].next;
        }
        if path.len() > 1 && path[0] == path[path.len() - 1] {
            path.pop();
        }

        let min_len = if is_open { 2 } else { 3 };
        if path.len() < min_len {
            None
        } else {
            Some(path)
        }
    }

    /// Disposes every node of `op`'s ring, first severing any splices that
    /// reference them, and detaches the owning contour from its edges.
    pub(crate) fn safe_dispose_ring(&mut self, op: usize) {
        let contour = self.get_real_contour(self.ring_nodes[op].contour);
        if contour != NONE {
            let front = self.contours[contour].front_edge;
            let back = self.contours[contour].back_edge;
            if front != NONE {
                self.actives[front].outrec = NONE;
            }
            if back != NONE {
                self.actives[back].outrec = NONE;
            }
            self.contours[contour].front_edge = NONE;
            self.contours[contour].back_edge = NONE;
            self.contours[contour].pts = NONE;
        }

        let mut curr = op;
        loop {
            let next = self.ring_nodes[curr].next;
            self.safe_delete_ring_splices(curr);
            self.ring_nodes[curr].next = curr;
            self.ring_nodes[curr].prev = curr;
            if next == curr || next == op {
                break;
            }
            curr = next;
        }
    }
}
