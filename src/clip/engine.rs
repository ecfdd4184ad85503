//! The scanline sweep: active edges, winding, and crossing resolution.
//!
//! The sweep walks scanbeams from the bottom of the input to the top,
//! keeping every edge that crosses the current beam in a left-to-right
//! Active Edge List (AEL). Between two scanlines the AEL order can only
//! change where edges cross, so each beam is settled by finding those
//! crossings (via a merge sort over a Sorted Edge List mirror), replaying
//! them bottom-up, and then advancing every edge to the beam top.
//!
//! Edges, like every other linked structure in the engine, live in
//! Vec-backed arenas and reference each other by index; `NONE` is the
//! null link.

use crate::path::cross_product;
use crate::primitives::Point64;

use super::clipper::{ClipType, Clipper64, FillRule};
use super::vertex::PathKind;

/// Null value for arena links.
pub(crate) const NONE: usize = usize::MAX;

/// One side of a path bound currently crossing the scanbeam.
#[derive(Debug, Clone)]
pub(crate) struct ActiveEdge {
    pub(crate) bot: Point64,
    pub(crate) top: Point64,
    /// X at the bottom of the current scanbeam.
    pub(crate) curr_x: i64,
    /// Inverse slope: dx per unit dy. Horizontals get ±infinity so the
    /// heading survives in the sign.
    pub(crate) dx: f64,
    /// +1 or −1 depending on winding direction.
    pub(crate) wind_dx: i32,
    pub(crate) wind_cnt: i32,
    /// Winding count of the opposite path kind.
    pub(crate) wind_cnt2: i32,
    /// Owning contour while contributing, else `NONE`.
    pub(crate) outrec: usize,
    pub(crate) prev_in_ael: usize,
    pub(crate) next_in_ael: usize,
    pub(crate) prev_in_sel: usize,
    pub(crate) next_in_sel: usize,
    /// Merge-sort partner link used during intersection detection.
    pub(crate) jump: usize,
    pub(crate) vertex_top: usize,
    /// Index of the local minimum this bound rises from.
    pub(crate) local_min: usize,
    pub(crate) is_left_bound: bool,
}

impl ActiveEdge {
    fn new(bot: Point64, local_min: usize) -> Self {
        Self {
            bot,
            top: bot,
            curr_x: bot.x,
            dx: 0.0,
            wind_dx: 1,
            wind_cnt: 0,
            wind_cnt2: 0,
            outrec: NONE,
            prev_in_ael: NONE,
            next_in_ael: NONE,
            prev_in_sel: NONE,
            next_in_sel: NONE,
            jump: NONE,
            vertex_top: NONE,
            local_min,
            is_left_bound: false,
        }
    }
}

/// A scheduled crossing between two adjacent edges within a scanbeam.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Crossing {
    pub(crate) edge1: usize,
    pub(crate) edge2: usize,
    pub(crate) pt: Point64,
}

#[inline]
fn get_dx(pt1: Point64, pt2: Point64) -> f64 {
    let dy = pt2.y - pt1.y;
    if dy != 0 {
        (pt2.x - pt1.x) as f64 / dy as f64
    } else if pt2.x > pt1.x {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    }
}

impl Clipper64 {
    // ------------------------------------------------------------------
    // Edge accessors
    // ------------------------------------------------------------------

    #[inline]
    pub(crate) fn is_open(&self, e: usize) -> bool {
        self.minima[self.actives[e].local_min].is_open
    }

    /// True when the edge's top vertex terminates an open path.
    pub(crate) fn is_open_end(&self, e: usize) -> bool {
        if !self.is_open(e) {
            return false;
        }
        let v = &self.vertices[self.actives[e].vertex_top];
        v.open_start || v.open_end
    }

    #[inline]
    pub(crate) fn kind_of(&self, e: usize) -> PathKind {
        self.minima[self.actives[e].local_min].kind
    }

    #[inline]
    pub(crate) fn is_same_kind(&self, e1: usize, e2: usize) -> bool {
        self.kind_of(e1) == self.kind_of(e2)
    }

    #[inline]
    pub(crate) fn is_horizontal(&self, e: usize) -> bool {
        self.actives[e].top.y == self.actives[e].bot.y
    }

    #[inline]
    pub(crate) fn is_heading_right_horz(&self, e: usize) -> bool {
        self.actives[e].dx == f64::NEG_INFINITY
    }

    #[inline]
    pub(crate) fn is_heading_left_horz(&self, e: usize) -> bool {
        self.actives[e].dx == f64::INFINITY
    }

    #[inline]
    pub(crate) fn set_dx(&mut self, e: usize) {
        self.actives[e].dx = get_dx(self.actives[e].bot, self.actives[e].top);
    }

    /// X of the edge at scanline `y`, rounded to nearest.
    pub(crate) fn top_x(&self, e: usize, y: i64) -> i64 {
        let edge = &self.actives[e];
        if y == edge.top.y || edge.top.x == edge.bot.x {
            edge.top.x
        } else if y == edge.bot.y {
            edge.bot.x
        } else {
            edge.bot.x + (edge.dx * (y - edge.bot.y) as f64).round() as i64
        }
    }

    /// The vertex the bound continues to beyond its current top.
    #[inline]
    pub(crate) fn next_vertex(&self, e: usize) -> usize {
        let v = self.actives[e].vertex_top;
        if self.actives[e].wind_dx > 0 {
            self.vertices[v].next
        } else {
            self.vertices[v].prev
        }
    }

    #[inline]
    pub(crate) fn prev_prev_vertex(&self, e: usize) -> usize {
        let v = self.actives[e].vertex_top;
        if self.actives[e].wind_dx > 0 {
            self.vertices[self.vertices[v].prev].prev
        } else {
            self.vertices[self.vertices[v].next].next
        }
    }

    #[inline]
    pub(crate) fn is_maxima(&self, e: usize) -> bool {
        self.vertices[self.actives[e].vertex_top].local_max
    }

    /// Finds the other active edge terminating at the same maxima vertex,
    /// searching rightward along the AEL.
    pub(crate) fn get_maxima_pair(&self, e: usize) -> usize {
        let mut e2 = self.actives[e].next_in_ael;
        while e2 != NONE {
            if self.actives[e2].vertex_top == self.actives[e].vertex_top {
                return e2;
            }
            e2 = self.actives[e2].next_in_ael;
        }
        NONE
    }

    // ------------------------------------------------------------------
    // Scanline queue and minima
    // ------------------------------------------------------------------

    pub(crate) fn insert_scanline(&mut self, y: i64) {
        self.scanlines.push(y);
    }

    pub(crate) fn pop_scanline(&mut self) -> Option<i64> {
        let y = self.scanlines.pop()?;
        while self.scanlines.peek() == Some(&y) {
            self.scanlines.pop();
        }
        Some(y)
    }

    fn pop_local_minima(&mut self, y: i64) -> Option<usize> {
        if self.cur_min == self.minima.len() {
            return None;
        }
        let lm = self.cur_min;
        if self.vertices[self.minima[lm].vertex].pt.y != y {
            return None;
        }
        self.cur_min += 1;
        Some(lm)
    }

    /// Rebuilds sweep state from the preserved vertex rings.
    pub(crate) fn reset_sweep(&mut self) {
        if !self.minima_sorted {
            let vertices = &self.vertices;
            self.minima.sort_by(|a, b| {
                let pa = vertices[a.vertex].pt;
                let pb = vertices[b.vertex].pt;
                pb.y.cmp(&pa.y).then(pa.x.cmp(&pb.x))
            });
            self.minima_sorted = true;
        }

        self.scanlines.clear();
        for i in 0..self.minima.len() {
            let y = self.vertices[self.minima[i].vertex].pt.y;
            self.insert_scanline(y);
        }

        self.cur_min = 0;
        self.actives.clear();
        self.ring_nodes.clear();
        self.contours.clear();
        self.splices.clear();
        self.splice_list.clear();
        self.crossings.clear();
        self.ael_first = NONE;
        self.sel_first = NONE;
        self.horz_splice_first = NONE;
        self.error_found = false;
    }

    // ------------------------------------------------------------------
    // AEL maintenance
    // ------------------------------------------------------------------

    /// Decides whether `newcomer` belongs to the right of `resident` at
    /// the scanline where the newcomer starts.
    fn is_valid_ael_order(&self, resident: usize, newcomer: usize) -> bool {
        let r = &self.actives[resident];
        let n = &self.actives[newcomer];

        if n.curr_x != r.curr_x {
            return n.curr_x > r.curr_x;
        }

        // same X: rank by the turning direction toward the newcomer's top
        let d = cross_product(r.top, n.bot, n.top);
        if d != 0.0 {
            return d < 0.0;
        }

        // edges are collinear at the insertion point; rank by where the
        // shorter bound turns next
        if !self.is_maxima(resident) && r.top.y > n.top.y {
            return cross_product(n.bot, r.top, self.vertices[self.next_vertex(resident)].pt)
                <= 0.0;
        }
        if !self.is_maxima(newcomer) && n.top.y > r.top.y {
            return cross_product(n.bot, n.top, self.vertices[self.next_vertex(newcomer)].pt)
                >= 0.0;
        }

        let y = n.bot.y;
        let newcomer_is_left = n.is_left_bound;

        if r.bot.y != y || self.vertices[self.minima[r.local_min].vertex].pt.y != y {
            return n.is_left_bound;
        }
        // resident must also have just been inserted
        if r.is_left_bound != newcomer_is_left {
            return newcomer_is_left;
        }
        if cross_product(self.vertices[self.prev_prev_vertex(resident)].pt, r.bot, r.top) == 0.0 {
            return true;
        }
        // compare the turning direction of the alternate bounds
        (cross_product(
            self.vertices[self.prev_prev_vertex(resident)].pt,
            n.bot,
            self.vertices[self.prev_prev_vertex(newcomer)].pt,
        ) > 0.0)
            == newcomer_is_left
    }

    fn insert_left_edge(&mut self, e: usize) {
        if self.ael_first == NONE {
            self.actives[e].prev_in_ael = NONE;
            self.actives[e].next_in_ael = NONE;
            self.ael_first = e;
        } else if !self.is_valid_ael_order(self.ael_first, e) {
            self.actives[e].prev_in_ael = NONE;
            self.actives[e].next_in_ael = self.ael_first;
            self.actives[self.ael_first].prev_in_ael = e;
            self.ael_first = e;
        } else {
            let mut e2 = self.ael_first;
            while self.actives[e2].next_in_ael != NONE
                && self.is_valid_ael_order(self.actives[e2].next_in_ael, e)
            {
                e2 = self.actives[e2].next_in_ael;
            }
            let next = self.actives[e2].next_in_ael;
            self.actives[e].next_in_ael = next;
            if next != NONE {
                self.actives[next].prev_in_ael = e;
            }
            self.actives[e].prev_in_ael = e2;
            self.actives[e2].next_in_ael = e;
        }
    }

    fn insert_right_edge(&mut self, e: usize, e2: usize) {
        let next = self.actives[e].next_in_ael;
        self.actives[e2].next_in_ael = next;
        if next != NONE {
            self.actives[next].prev_in_ael = e2;
        }
        self.actives[e2].prev_in_ael = e;
        self.actives[e].next_in_ael = e2;
    }

    /// Swaps two edges that are adjacent in the AEL (`e1` directly left
    /// of `e2`).
    pub(crate) fn swap_positions_in_ael(&mut self, e1: usize, e2: usize) {
        let next = self.actives[e2].next_in_ael;
        if next != NONE {
            self.actives[next].prev_in_ael = e1;
        }
        let prev = self.actives[e1].prev_in_ael;
        if prev != NONE {
            self.actives[prev].next_in_ael = e2;
        }
        self.actives[e2].prev_in_ael = prev;
        self.actives[e2].next_in_ael = e1;
        self.actives[e1].prev_in_ael = e2;
        self.actives[e1].next_in_ael = next;
        if prev == NONE {
            self.ael_first = e2;
        }
    }

    pub(crate) fn delete_from_ael(&mut self, e: usize) {
        let prev = self.actives[e].prev_in_ael;
        let next = self.actives[e].next_in_ael;
        if prev == NONE && next == NONE && self.ael_first != e {
            return; // already deleted
        }
        if prev != NONE {
            self.actives[prev].next_in_ael = next;
        } else {
            self.ael_first = next;
        }
        if next != NONE {
            self.actives[next].prev_in_ael = prev;
        }
        self.actives[e].prev_in_ael = NONE;
        self.actives[e].next_in_ael = NONE;
    }

    // The SEL doubles as the pending-horizontals stack between beams.

    pub(crate) fn push_horz(&mut self, e: usize) {
        self.actives[e].next_in_sel = self.sel_first;
        self.sel_first = e;
    }

    pub(crate) fn pop_horz(&mut self) -> Option<usize> {
        let e = self.sel_first;
        if e == NONE {
            return None;
        }
        self.sel_first = self.actives[e].next_in_sel;
        Some(e)
    }

    // ------------------------------------------------------------------
    // Winding
    // ------------------------------------------------------------------

    fn set_wind_count_closed(&mut self, e: usize) {
        // An edge's winding count is taken from the region on the higher
        // side of it; neighbouring regions differ by exactly one winding.
        let kind = self.kind_of(e);
        let mut e2 = self.actives[e].prev_in_ael;
        while e2 != NONE && (self.kind_of(e2) != kind || self.is_open(e2)) {
            e2 = self.actives[e2].prev_in_ael;
        }

        if e2 == NONE {
            self.actives[e].wind_cnt = self.actives[e].wind_dx;
            e2 = self.ael_first;
        } else if self.fill_rule == FillRule::EvenOdd {
            self.actives[e].wind_cnt = self.actives[e].wind_dx;
            self.actives[e].wind_cnt2 = self.actives[e2].wind_cnt2;
            e2 = self.actives[e2].next_in_ael;
        } else {
            // NonZero, Positive or Negative filling
            let e2_wc = self.actives[e2].wind_cnt;
            let e2_dx = self.actives[e2].wind_dx;
            let e_dx = self.actives[e].wind_dx;
            if e2_wc * e2_dx < 0 {
                // e is outside the region bounded by e2
                if e2_wc.abs() > 1 {
                    if e2_dx * e_dx < 0 {
                        self.actives[e].wind_cnt = e2_wc;
                    } else {
                        self.actives[e].wind_cnt = e2_wc + e_dx;
                    }
                } else {
                    self.actives[e].wind_cnt = if self.is_open(e) { 1 } else { e_dx };
                }
            } else {
                // e is inside the region bounded by e2
                if e2_dx * e_dx < 0 {
                    self.actives[e].wind_cnt = e2_wc;
                } else {
                    self.actives[e].wind_cnt = e2_wc + e_dx;
                }
            }
            self.actives[e].wind_cnt2 = self.actives[e2].wind_cnt2;
            e2 = self.actives[e2].next_in_ael;
        }

        // accumulate the opposite kind's winding up to e
        if self.fill_rule == FillRule::EvenOdd {
            while e2 != e {
                if self.kind_of(e2) != kind && !self.is_open(e2) {
                    self.actives[e].wind_cnt2 = if self.actives[e].wind_cnt2 == 0 { 1 } else { 0 };
                }
                e2 = self.actives[e2].next_in_ael;
            }
        } else {
            while e2 != e {
                if self.kind_of(e2) != kind && !self.is_open(e2) {
                    self.actives[e].wind_cnt2 += self.actives[e2].wind_dx;
                }
                e2 = self.actives[e2].next_in_ael;
            }
        }
    }

    fn set_wind_count_open(&mut self, e: usize) {
        let mut e2 = self.ael_first;
        if self.fill_rule == FillRule::EvenOdd {
            let mut cnt1 = 0;
            let mut cnt2 = 0;
            while e2 != e {
                if self.kind_of(e2) == PathKind::Clip {
                    cnt2 += 1;
                } else if !self.is_open(e2) {
                    cnt1 += 1;
                }
                e2 = self.actives[e2].next_in_ael;
            }
            self.actives[e].wind_cnt = if cnt1 % 2 == 1 { 1 } else { 0 };
            self.actives[e].wind_cnt2 = if cnt2 % 2 == 1 { 1 } else { 0 };
        } else {
            let mut wc = 0;
            let mut wc2 = 0;
            while e2 != e {
                if self.kind_of(e2) == PathKind::Clip {
                    wc2 += self.actives[e2].wind_dx;
                } else if !self.is_open(e2) {
                    wc += self.actives[e2].wind_dx;
                }
                e2 = self.actives[e2].next_in_ael;
            }
            self.actives[e].wind_cnt = wc;
            self.actives[e].wind_cnt2 = wc2;
        }
    }

    fn is_contributing_closed(&self, e: usize) -> bool {
        let edge = &self.actives[e];
        match self.fill_rule {
            FillRule::EvenOdd => {}
            FillRule::NonZero => {
                if edge.wind_cnt.abs() != 1 {
                    return false;
                }
            }
            FillRule::Positive => {
                if edge.wind_cnt != 1 {
                    return false;
                }
            }
            FillRule::Negative => {
                if edge.wind_cnt != -1 {
                    return false;
                }
            }
        }

        match self.clip_type {
            ClipType::Intersection => match self.fill_rule {
                FillRule::Positive => edge.wind_cnt2 > 0,
                FillRule::Negative => edge.wind_cnt2 < 0,
                _ => edge.wind_cnt2 != 0,
            },
            ClipType::Union => match self.fill_rule {
                FillRule::Positive => edge.wind_cnt2 <= 0,
                FillRule::Negative => edge.wind_cnt2 >= 0,
                _ => edge.wind_cnt2 == 0,
            },
            ClipType::Difference => {
                let outside_clip = match self.fill_rule {
                    FillRule::Positive => edge.wind_cnt2 <= 0,
                    FillRule::Negative => edge.wind_cnt2 >= 0,
                    _ => edge.wind_cnt2 == 0,
                };
                if self.kind_of(e) == PathKind::Subject {
                    outside_clip
                } else {
                    !outside_clip
                }
            }
            ClipType::Xor => true,
            ClipType::None => false,
        }
    }

    fn is_contributing_open(&self, e: usize) -> bool {
        let edge = &self.actives[e];
        match self.clip_type {
            ClipType::Intersection => edge.wind_cnt2 != 0,
            ClipType::Union => edge.wind_cnt == 0 && edge.wind_cnt2 == 0,
            ClipType::Difference => edge.wind_cnt2 == 0,
            ClipType::Xor => (edge.wind_cnt != 0) != (edge.wind_cnt2 != 0),
            ClipType::None => false,
        }
    }

    // ------------------------------------------------------------------
    // Opening bounds at local minima
    // ------------------------------------------------------------------

    pub(crate) fn insert_minima_into_ael(&mut self, bot_y: i64) {
        while let Some(lm) = self.pop_local_minima(bot_y) {
            let vertex = self.minima[lm].vertex;
            let vpt = self.vertices[vertex].pt;

            // the descending side of the pair
            let mut left_bound = if self.vertices[vertex].open_start {
                NONE
            } else {
                let e = self.actives.len();
                self.actives.push(ActiveEdge::new(vpt, lm));
                self.actives[e].wind_dx = -1;
                self.actives[e].vertex_top = self.vertices[vertex].prev;
                self.actives[e].top = self.vertices[self.actives[e].vertex_top].pt;
                self.set_dx(e);
                e
            };

            // the ascending side
            let mut right_bound = if self.vertices[vertex].open_end {
                NONE
            } else {
                let e = self.actives.len();
                self.actives.push(ActiveEdge::new(vpt, lm));
                self.actives[e].wind_dx = 1;
                self.actives[e].vertex_top = self.vertices[vertex].next;
                self.actives[e].top = self.vertices[self.actives[e].vertex_top].pt;
                self.set_dx(e);
                e
            };

            if left_bound != NONE && right_bound != NONE {
                // order the pair so left really is on the left
                let swap = if self.is_horizontal(left_bound) {
                    self.is_heading_right_horz(left_bound)
                } else if self.is_horizontal(right_bound) {
                    self.is_heading_left_horz(right_bound)
                } else {
                    self.actives[left_bound].dx < self.actives[right_bound].dx
                };
                if swap {
                    std::mem::swap(&mut left_bound, &mut right_bound);
                }
            } else if left_bound == NONE {
                left_bound = right_bound;
                right_bound = NONE;
            }

            self.actives[left_bound].is_left_bound = true;
            self.insert_left_edge(left_bound);

            let contributing = if self.is_open(left_bound) {
                self.set_wind_count_open(left_bound);
                self.is_contributing_open(left_bound)
            } else {
                self.set_wind_count_closed(left_bound);
                self.is_contributing_closed(left_bound)
            };

            if right_bound != NONE {
                self.actives[right_bound].wind_cnt = self.actives[left_bound].wind_cnt;
                self.actives[right_bound].wind_cnt2 = self.actives[left_bound].wind_cnt2;
                self.insert_right_edge(left_bound, right_bound);

                if contributing {
                    self.add_local_min_poly(
                        left_bound,
                        right_bound,
                        self.actives[left_bound].bot,
                        true,
                    );
                    if !self.is_horizontal(left_bound)
                        && self.test_join_with_prev1(left_bound, bot_y)
                    {
                        let prev = self.actives[left_bound].prev_in_ael;
                        let bot = self.actives[left_bound].bot;
                        let op = self.add_out_pt(prev, bot);
                        let pts = self.contours[self.actives[left_bound].outrec].pts;
                        self.add_splice(op, pts);
                    }
                }

                while self.actives[right_bound].next_in_ael != NONE
                    && self.is_valid_ael_order(self.actives[right_bound].next_in_ael, right_bound)
                {
                    let next = self.actives[right_bound].next_in_ael;
                    let bot = self.actives[right_bound].bot;
                    self.intersect_edges(right_bound, next, bot);
                    self.swap_positions_in_ael(right_bound, next);
                }

                if !self.is_horizontal(right_bound)
                    && self.test_join_with_next1(right_bound, bot_y)
                {
                    let next = self.actives[right_bound].next_in_ael;
                    let bot = self.actives[right_bound].bot;
                    let op = self.add_out_pt(next, bot);
                    let pts = self.contours[self.actives[right_bound].outrec].pts;
                    self.add_splice(pts, op);
                }

                if self.is_horizontal(right_bound) {
                    self.push_horz(right_bound);
                } else {
                    let top_y = self.actives[right_bound].top.y;
                    self.insert_scanline(top_y);
                }
            } else if contributing {
                let bot = self.actives[left_bound].bot;
                self.start_open_path(left_bound, bot);
            }

            if self.is_horizontal(left_bound) {
                self.push_horz(left_bound);
            } else {
                let top_y = self.actives[left_bound].top.y;
                self.insert_scanline(top_y);
            }
        }
    }

    // ------------------------------------------------------------------
    // Structural-join predicates
    // ------------------------------------------------------------------

    /// An edge and its AEL predecessor have converged onto the same
    /// point along collinear directions: schedule a splice.
    pub(crate) fn test_join_with_prev1(&self, e: usize, curr_y: i64) -> bool {
        let prev = self.actives[e].prev_in_ael;
        self.is_hot(e)
            && !self.is_open(e)
            && prev != NONE
            && self.actives[prev].curr_x == self.actives[e].curr_x
            && self.is_hot(prev)
            && !self.is_open(prev)
            && (curr_y - self.actives[e].top.y > 1)
            && (curr_y - self.actives[prev].top.y > 1)
            && cross_product(
                self.actives[prev].top,
                self.actives[e].bot,
                self.actives[e].top,
            ) == 0.0
    }

    pub(crate) fn test_join_with_prev2(&self, e: usize, curr_pt: Point64) -> bool {
        let prev = self.actives[e].prev_in_ael;
        self.is_hot(e)
            && !self.is_open(e)
            && prev != NONE
            && !self.is_open(prev)
            && self.is_hot(prev)
            && self.actives[prev].top.y < self.actives[e].bot.y
            && (self.top_x(prev, curr_pt.y) - curr_pt.x).abs() < 2
            && cross_product(self.actives[prev].top, curr_pt, self.actives[e].top) == 0.0
    }

    pub(crate) fn test_join_with_next1(&self, e: usize, curr_y: i64) -> bool {
        let next = self.actives[e].next_in_ael;
        self.is_hot(e)
            && !self.is_open(e)
            && next != NONE
            && self.actives[next].curr_x == self.actives[e].curr_x
            && self.is_hot(next)
            && !self.is_open(next)
            && (curr_y - self.actives[e].top.y > 1)
            && (curr_y - self.actives[next].top.y > 1)
            && cross_product(
                self.actives[next].top,
                self.actives[e].bot,
                self.actives[e].top,
            ) == 0.0
    }

    pub(crate) fn test_join_with_next2(&self, e: usize, curr_pt: Point64) -> bool {
        let next = self.actives[e].next_in_ael;
        self.is_hot(e)
            && !self.is_open(e)
            && next != NONE
            && !self.is_open(next)
            && self.is_hot(next)
            && self.actives[next].top.y < curr_pt.y
            && (self.top_x(next, curr_pt.y) - curr_pt.x).abs() < 2
            && cross_product(self.actives[next].top, curr_pt, self.actives[e].top) == 0.0
    }

    // ------------------------------------------------------------------
    // Edge crossings
    // ------------------------------------------------------------------

    /// Computes the crossing point of two non-parallel edges using f64
    /// line forms; exact enough because results are clamped back into
    /// the scanbeam by the caller.
    fn get_intersect_point(&self, e1: usize, e2: usize) -> Point64 {
        let a = &self.actives[e1];
        let b = &self.actives[e2];
        if a.dx == b.dx {
            return a.top;
        }

        if a.dx == 0.0 {
            if self.is_horizontal(e2) {
                return Point64::new(a.bot.x, b.bot.y);
            }
            let b2 = b.bot.y as f64 - b.bot.x as f64 / b.dx;
            return Point64::new(a.bot.x, (a.bot.x as f64 / b.dx + b2).round() as i64);
        }
        if b.dx == 0.0 {
            if self.is_horizontal(e1) {
                return Point64::new(b.bot.x, a.bot.y);
            }
            let b1 = a.bot.y as f64 - a.bot.x as f64 / a.dx;
            return Point64::new(b.bot.x, (b.bot.x as f64 / a.dx + b1).round() as i64);
        }

        let b1 = a.bot.x as f64 - a.bot.y as f64 * a.dx;
        let b2 = b.bot.x as f64 - b.bot.y as f64 * b.dx;
        let q = (b2 - b1) / (a.dx - b.dx);
        if a.dx.abs() < b.dx.abs() {
            Point64::new((a.dx * q + b1).round() as i64, q.round() as i64)
        } else {
            Point64::new((b.dx * q + b2).round() as i64, q.round() as i64)
        }
    }

    fn add_new_crossing(&mut self, e1: usize, e2: usize, top_y: i64) {
        let mut pt = self.get_intersect_point(e1, e2);

        // rounding can land the point outside the scanbeam; clamp it back
        if pt.y > self.bot_y {
            // curr_x is still at the bottom of the beam here
            pt.y = self.bot_y;
            let src = if self.actives[e1].dx.abs() < self.actives[e2].dx.abs() {
                e1
            } else {
                e2
            };
            pt.x = self.top_x(src, self.bot_y);
        } else if pt.y < top_y {
            pt.y = top_y;
            if self.actives[e1].top.y == top_y {
                pt.x = self.actives[e1].top.x;
            } else if self.actives[e2].top.y == top_y {
                pt.x = self.actives[e2].top.x;
            } else if self.actives[e1].dx.abs() < self.actives[e2].dx.abs() {
                pt.x = self.actives[e1].curr_x;
            } else {
                pt.x = self.actives[e2].curr_x;
            }
        }

        self.crossings.push(Crossing {
            edge1: e1,
            edge2: e2,
            pt,
        });
    }

    fn adjust_curr_x_and_copy_to_sel(&mut self, top_y: i64) {
        let mut e = self.ael_first;
        self.sel_first = e;
        while e != NONE {
            let prev = self.actives[e].prev_in_ael;
            let next = self.actives[e].next_in_ael;
            self.actives[e].prev_in_sel = prev;
            self.actives[e].next_in_sel = next;
            self.actives[e].jump = next;
            self.actives[e].curr_x = self.top_x(e, top_y);
            e = next;
        }
    }

    fn extract_from_sel(&mut self, e: usize) -> usize {
        let res = self.actives[e].next_in_sel;
        if res != NONE {
            self.actives[res].prev_in_sel = self.actives[e].prev_in_sel;
        }
        let prev = self.actives[e].prev_in_sel;
        self.actives[prev].next_in_sel = res;
        res
    }

    fn insert_before_in_sel(&mut self, e1: usize, e2: usize) {
        let prev = self.actives[e2].prev_in_sel;
        self.actives[e1].prev_in_sel = prev;
        if prev != NONE {
            self.actives[prev].next_in_sel = e1;
        }
        self.actives[e1].next_in_sel = e2;
        self.actives[e2].prev_in_sel = e1;
    }

    /// Finds every pair of edges that swap order between the bottom and
    /// the top of the scanbeam, using a bottom-up merge over the SEL so
    /// only adjacent pairs ever compare.
    fn build_crossing_list(&mut self, top_y: i64) -> bool {
        if self.ael_first == NONE || self.actives[self.ael_first].next_in_ael == NONE {
            return false;
        }

        self.adjust_curr_x_and_copy_to_sel(top_y);

        let mut left = self.sel_first;
        while self.actives[left].jump != NONE {
            let mut prev_base = NONE;
            while left != NONE && self.actives[left].jump != NONE {
                let mut curr_base = left;
                let mut right = self.actives[left].jump;
                let mut l_end = right;
                let r_end = self.actives[right].jump;
                self.actives[left].jump = r_end;
                while left != l_end && right != r_end {
                    if self.actives[right].curr_x < self.actives[left].curr_x {
                        // every edge from `left` to just before `right`
                        // crosses `right` within this beam
                        let mut tmp = self.actives[right].prev_in_sel;
                        loop {
                            self.add_new_crossing(tmp, right, top_y);
                            if tmp == left {
                                break;
                            }
                            tmp = self.actives[tmp].prev_in_sel;
                        }

                        let tmp = right;
                        right = self.extract_from_sel(tmp);
                        l_end = right;
                        self.insert_before_in_sel(tmp, left);
                        if left == curr_base {
                            curr_base = tmp;
                            self.actives[curr_base].jump = r_end;
                            if prev_base == NONE {
                                self.sel_first = curr_base;
                            } else {
                                self.actives[prev_base].jump = curr_base;
                            }
                        }
                    } else {
                        left = self.actives[left].next_in_sel;
                    }
                }
                prev_base = curr_base;
                left = r_end;
            }
            left = self.sel_first;
        }
        !self.crossings.is_empty()
    }

    fn edges_adjacent(&self, c: &Crossing) -> bool {
        self.actives[c.edge1].next_in_ael == c.edge2
            || self.actives[c.edge1].prev_in_ael == c.edge2
    }

    /// Replays the scheduled crossings bottom-up, promoting any crossing
    /// whose edges are momentarily non-adjacent. Failing to find an
    /// adjacent crossing means the schedule cannot be serialized, which
    /// is an internal inconsistency.
    fn process_crossing_list(&mut self) {
        self.crossings.sort_by(|a, b| {
            b.pt.y.cmp(&a.pt.y).then(a.pt.x.cmp(&b.pt.x))
        });

        for i in 0..self.crossings.len() {
            if !self.edges_adjacent(&self.crossings[i]) {
                let mut j = i + 1;
                while j < self.crossings.len() && !self.edges_adjacent(&self.crossings[j]) {
                    j += 1;
                }
                if j == self.crossings.len() {
                    self.error_found = true;
                    return;
                }
                self.crossings.swap(i, j);
            }

            let Crossing { edge1, edge2, pt } = self.crossings[i];
            self.intersect_edges(edge1, edge2, pt);
            self.swap_positions_in_ael(edge1, edge2);

            if self.test_join_with_prev2(edge2, pt) {
                let prev = self.actives[edge2].prev_in_ael;
                let op1 = self.add_out_pt(prev, pt);
                let op2 = self.add_out_pt(edge2, pt);
                if op1 != op2 {
                    self.add_splice(op1, op2);
                }
            } else if self.test_join_with_next2(edge1, pt) {
                let next = self.actives[edge1].next_in_ael;
                let op1 = self.add_out_pt(edge1, pt);
                let op2 = self.add_out_pt(next, pt);
                if op1 != op2 {
                    self.add_splice(op1, op2);
                }
            }
        }
    }

    pub(crate) fn do_intersections(&mut self, top_y: i64) {
        if self.build_crossing_list(top_y) {
            self.process_crossing_list();
        }
        self.crossings.clear();
    }

    /// Resolves one crossing: updates windings, opens or closes contours,
    /// and emits ring nodes. Returns the ring node created, if any.
    pub(crate) fn intersect_edges(&mut self, e1: usize, e2: usize, pt: Point64) -> usize {
        #[cfg(feature = "z")]
        let pt = self.fill_z(e1, e2, pt);

        // open paths only ever interact with closed boundaries
        if self.has_open_paths && (self.is_open(e1) || self.is_open(e2)) {
            if self.is_open(e1) && self.is_open(e2) {
                return NONE;
            }
            let (edge_o, edge_c) = if self.is_open(e1) { (e1, e2) } else { (e2, e1) };

            if self.actives[edge_c].wind_cnt.abs() != 1 {
                return NONE;
            }
            match self.clip_type {
                ClipType::Union => {
                    if !self.is_hot(edge_o) {
                        return NONE;
                    }
                }
                _ => {
                    if self.kind_of(edge_c) == PathKind::Subject {
                        return NONE;
                    }
                }
            }
            match self.fill_rule {
                FillRule::Positive => {
                    if self.actives[edge_c].wind_cnt != 1 {
                        return NONE;
                    }
                }
                FillRule::Negative => {
                    if self.actives[edge_c].wind_cnt != -1 {
                        return NONE;
                    }
                }
                _ => {}
            }

            // toggle the open edge's contribution
            return if self.is_hot(edge_o) {
                let result = self.add_out_pt(edge_o, pt);
                let contour = self.actives[edge_o].outrec;
                if self.is_front(edge_o) {
                    self.contours[contour].front_edge = NONE;
                } else {
                    self.contours[contour].back_edge = NONE;
                }
                self.actives[edge_o].outrec = NONE;
                result
            } else if pt == self.vertices[self.minima[self.actives[edge_o].local_min].vertex].pt
                && !self.open_path_terminates_here(edge_o)
            {
                // a horizontal passing under the open path's own start
                NONE
            } else {
                self.start_open_path(edge_o, pt)
            };
        }

        // update winding counts: both edges are from closed paths
        let old_e1_windcnt;
        let old_e2_windcnt;
        if self.is_same_kind(e1, e2) {
            if self.fill_rule == FillRule::EvenOdd {
                let tmp = self.actives[e1].wind_cnt;
                self.actives[e1].wind_cnt = self.actives[e2].wind_cnt;
                self.actives[e2].wind_cnt = tmp;
            } else {
                if self.actives[e1].wind_cnt + self.actives[e2].wind_dx == 0 {
                    self.actives[e1].wind_cnt = -self.actives[e1].wind_cnt;
                } else {
                    self.actives[e1].wind_cnt += self.actives[e2].wind_dx;
                }
                if self.actives[e2].wind_cnt - self.actives[e1].wind_dx == 0 {
                    self.actives[e2].wind_cnt = -self.actives[e2].wind_cnt;
                } else {
                    self.actives[e2].wind_cnt -= self.actives[e1].wind_dx;
                }
            }
        } else {
            if self.fill_rule != FillRule::EvenOdd {
                self.actives[e1].wind_cnt2 += self.actives[e2].wind_dx;
            } else {
                self.actives[e1].wind_cnt2 = if self.actives[e1].wind_cnt2 == 0 { 1 } else { 0 };
            }
            if self.fill_rule != FillRule::EvenOdd {
                self.actives[e2].wind_cnt2 -= self.actives[e1].wind_dx;
            } else {
                self.actives[e2].wind_cnt2 = if self.actives[e2].wind_cnt2 == 0 { 1 } else { 0 };
            }
        }

        match self.fill_rule {
            FillRule::Positive => {
                old_e1_windcnt = self.actives[e1].wind_cnt;
                old_e2_windcnt = self.actives[e2].wind_cnt;
            }
            FillRule::Negative => {
                old_e1_windcnt = -self.actives[e1].wind_cnt;
                old_e2_windcnt = -self.actives[e2].wind_cnt;
            }
            _ => {
                old_e1_windcnt = self.actives[e1].wind_cnt.abs();
                old_e2_windcnt = self.actives[e2].wind_cnt.abs();
            }
        }

        let e1_in_01 = old_e1_windcnt == 0 || old_e1_windcnt == 1;
        let e2_in_01 = old_e2_windcnt == 0 || old_e2_windcnt == 1;
        if (!self.is_hot(e1) && !e1_in_01) || (!self.is_hot(e2) && !e2_in_01) {
            return NONE;
        }

        // now process the crossing itself
        if self.is_hot(e1) && self.is_hot(e2) {
            if (old_e1_windcnt != 0 && old_e1_windcnt != 1)
                || (old_e2_windcnt != 0 && old_e2_windcnt != 1)
                || (!self.is_same_kind(e1, e2) && self.clip_type != ClipType::Xor)
            {
                self.add_local_max_poly(e1, e2, pt)
            } else if self.is_front(e1) || self.actives[e1].outrec == self.actives[e2].outrec {
                // the polygons touch at a single vertex: close both and
                // immediately reopen so they stay separable
                let result = self.add_local_max_poly(e1, e2, pt);
                let op2 = self.add_local_min_poly(e1, e2, pt, false);
                if result != NONE
                    && self.ring_nodes[result].pt == self.ring_nodes[op2].pt
                    && !self.is_horizontal(e1)
                    && !self.is_horizontal(e2)
                    && cross_product(
                        self.actives[e1].bot,
                        self.ring_nodes[result].pt,
                        self.actives[e2].bot,
                    ) == 0.0
                {
                    self.add_splice(result, op2);
                }
                result
            } else {
                let result = self.add_out_pt(e1, pt);
                self.add_out_pt(e2, pt);
                self.swap_contour_edges(e1, e2);
                result
            }
        } else if self.is_hot(e1) {
            let result = self.add_out_pt(e1, pt);
            self.swap_contour_edges(e1, e2);
            result
        } else if self.is_hot(e2) {
            let result = self.add_out_pt(e2, pt);
            self.swap_contour_edges(e1, e2);
            result
        } else {
            // neither edge is hot: the crossing may still open a region
            let e1_wc2;
            let e2_wc2;
            match self.fill_rule {
                FillRule::Positive => {
                    e1_wc2 = self.actives[e1].wind_cnt2;
                    e2_wc2 = self.actives[e2].wind_cnt2;
                }
                FillRule::Negative => {
                    e1_wc2 = -self.actives[e1].wind_cnt2;
                    e2_wc2 = -self.actives[e2].wind_cnt2;
                }
                _ => {
                    e1_wc2 = self.actives[e1].wind_cnt2.abs();
                    e2_wc2 = self.actives[e2].wind_cnt2.abs();
                }
            }

            if !self.is_same_kind(e1, e2) {
                self.add_local_min_poly(e1, e2, pt, false)
            } else if old_e1_windcnt == 1 && old_e2_windcnt == 1 {
                match self.clip_type {
                    ClipType::Union => {
                        if e1_wc2 <= 0 && e2_wc2 <= 0 {
                            self.add_local_min_poly(e1, e2, pt, false)
                        } else {
                            NONE
                        }
                    }
                    ClipType::Difference => {
                        let wanted = (self.kind_of(e1) == PathKind::Clip
                            && e1_wc2 > 0
                            && e2_wc2 > 0)
                            || (self.kind_of(e1) == PathKind::Subject
                                && e1_wc2 <= 0
                                && e2_wc2 <= 0);
                        if wanted {
                            self.add_local_min_poly(e1, e2, pt, false)
                        } else {
                            NONE
                        }
                    }
                    ClipType::Xor => self.add_local_min_poly(e1, e2, pt, false),
                    _ => {
                        if e1_wc2 > 0 && e2_wc2 > 0 {
                            self.add_local_min_poly(e1, e2, pt, false)
                        } else {
                            NONE
                        }
                    }
                }
            } else {
                NONE
            }
        }
    }

    /// True when the open edge's seed vertex is one of its path endpoints.
    fn open_path_terminates_here(&self, e: usize) -> bool {
        let v = &self.vertices[self.minima[self.actives[e].local_min].vertex];
        v.open_start || v.open_end
    }

    #[cfg(feature = "z")]
    fn fill_z(&mut self, e1: usize, e2: usize, mut pt: Point64) -> Point64 {
        let a = &self.actives[e1];
        let b = &self.actives[e2];
        if pt == a.bot {
            pt.z = a.bot.z;
        } else if pt == a.top {
            pt.z = a.top.z;
        } else if pt == b.bot {
            pt.z = b.bot.z;
        } else if pt == b.top {
            pt.z = b.top.z;
        }
        if let Some(cb) = self.z_callback.as_ref() {
            pt.z = cb(a.bot, a.top, b.bot, b.top, pt);
        }
        pt
    }

    // ------------------------------------------------------------------
    // Top of scanbeam
    // ------------------------------------------------------------------

    /// Moves the bound on to its next vertex once the current top vertex
    /// has been reached.
    pub(crate) fn update_edge_into_ael(&mut self, e: usize) {
        let top = self.actives[e].top;
        self.actives[e].bot = top;
        let vt = self.next_vertex(e);
        self.actives[e].vertex_top = vt;
        self.actives[e].top = self.vertices[vt].pt;
        self.actives[e].curr_x = self.actives[e].bot.x;
        self.set_dx(e);
        if self.is_horizontal(e) {
            return;
        }
        let top_y = self.actives[e].top.y;
        self.insert_scanline(top_y);
        let bot = self.actives[e].bot;
        if self.test_join_with_prev1(e, bot.y) {
            let prev = self.actives[e].prev_in_ael;
            let op1 = self.add_out_pt(prev, bot);
            let op2 = self.add_out_pt(e, bot);
            self.add_splice(op1, op2);
        }
    }

    pub(crate) fn do_top_of_scanbeam(&mut self, y: i64) {
        self.sel_first = NONE; // the SEL becomes the horizontal stack again
        let mut e = self.ael_first;
        while e != NONE {
            // an edge in the AEL is never horizontal here
            if self.actives[e].top.y == y {
                self.actives[e].curr_x = self.actives[e].top.x;
                if self.is_maxima(e) {
                    e = self.do_maxima(e);
                    continue;
                }
                // intermediate vertex: record it and continue the bound
                if self.is_hot(e) {
                    let top = self.actives[e].top;
                    self.add_out_pt(e, top);
                }
                self.update_edge_into_ael(e);
                if self.is_horizontal(e) {
                    self.push_horz(e);
                }
            } else {
                self.actives[e].curr_x = self.top_x(e, y);
            }
            e = self.actives[e].next_in_ael;
        }
    }

    /// Closes the bound pair ending at `e`'s maxima vertex; returns the
    /// next edge to examine.
    fn do_maxima(&mut self, e: usize) -> usize {
        let prev_e = self.actives[e].prev_in_ael;
        let next_e = self.actives[e].next_in_ael;

        if self.is_open_end(e) {
            if self.is_hot(e) {
                let top = self.actives[e].top;
                self.add_out_pt(e, top);
            }
            if !self.is_horizontal(e) {
                if self.is_hot(e) {
                    let contour = self.actives[e].outrec;
                    if self.is_front(e) {
                        self.contours[contour].front_edge = NONE;
                    } else {
                        self.contours[contour].back_edge = NONE;
                    }
                    self.actives[e].outrec = NONE;
                }
                self.delete_from_ael(e);
            }
            return next_e;
        }

        let max_pair = self.get_maxima_pair(e);
        if max_pair == NONE {
            return next_e; // the pair is a not-yet-processed horizontal
        }

        // resolve every edge caught between the maxima pair
        let mut next_e = next_e;
        while next_e != max_pair {
            let top = self.actives[e].top;
            self.intersect_edges(e, next_e, top);
            self.swap_positions_in_ael(e, next_e);
            next_e = self.actives[e].next_in_ael;
        }

        if self.is_open(e) {
            if self.is_hot(e) {
                let top = self.actives[e].top;
                self.add_local_max_poly(e, max_pair, top);
            }
            self.delete_from_ael(max_pair);
            self.delete_from_ael(e);
        } else {
            if self.is_hot(e) {
                let top = self.actives[e].top;
                self.add_local_max_poly(e, max_pair, top);
            }
            self.delete_from_ael(e);
            self.delete_from_ael(max_pair);
        }
        if prev_e != NONE {
            self.actives[prev_e].next_in_ael
        } else {
            self.ael_first
        }
    }

    // ------------------------------------------------------------------
    // Sweep driver
    // ------------------------------------------------------------------

    pub(crate) fn execute_internal(&mut self, ct: ClipType, fill_rule: FillRule) -> bool {
        self.clip_type = ct;
        self.fill_rule = fill_rule;
        if ct == ClipType::None {
            return true;
        }

        self.reset_sweep();
        let Some(mut y) = self.pop_scanline() else {
            return true;
        };

        while !self.error_found {
            self.insert_minima_into_ael(y);
            while let Some(e) = self.pop_horz() {
                self.do_horizontal(e);
            }
            if self.horz_splice_first != NONE {
                self.convert_horz_trials_to_splices();
            }
            self.bot_y = y; // the bottom of the scanbeam
            let Some(top_y) = self.pop_scanline() else {
                break;
            };
            y = top_y;
            self.do_intersections(y);
            self.do_top_of_scanbeam(y);
            while let Some(e) = self.pop_horz() {
                self.do_horizontal(e);
            }
            if self.horz_splice_first != NONE {
                self.convert_horz_trials_to_splices();
            }
        }

        if !self.error_found {
            self.process_splice_list();
        }
        !self.error_found
    }
}
