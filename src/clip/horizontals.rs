//! Horizontal-edge processing.
//!
//! Horizontal edges cannot be ordered by slope inside a scanbeam, so they
//! are walked separately at the beam boundary: the horizontal exchanges
//! places with every edge whose current X lies along its span, emitting a
//! ring node (and possibly a trial splice) at each exchange. Consecutive
//! horizontals in the same bound are promoted and walked in one pass.

use crate::primitives::Point64;

use super::clipper::Clipper64;
use super::engine::NONE;

impl Clipper64 {
    /// Finds the end vertex of a run of same-Y vertices continuing from
    /// `e`'s top, if that run ends in this bound's maxima.
    fn get_curr_y_maxima_vertex(&self, e: usize) -> usize {
        let mut result = self.actives[e].vertex_top;
        if self.actives[e].wind_dx > 0 {
            while self.vertices[self.vertices[result].next].pt.y == self.vertices[result].pt.y {
                result = self.vertices[result].next;
            }
        } else {
            while self.vertices[self.vertices[result].prev].pt.y == self.vertices[result].pt.y {
                result = self.vertices[result].prev;
            }
        }
        if self.vertices[result].local_max {
            result
        } else {
            NONE
        }
    }

    /// Finds the active edge that terminates at `vert_max`, which may sit
    /// on either side of the horizontal.
    fn get_horz_maxima_pair(&self, horz: usize, vert_max: usize) -> usize {
        let vmax_x = self.vertices[vert_max].pt.x;
        let mut e = self.actives[horz].prev_in_ael;
        while e != NONE && self.actives[e].curr_x >= vmax_x {
            if self.actives[e].vertex_top == vert_max {
                return e;
            }
            e = self.actives[e].prev_in_ael;
        }
        let mut e = self.actives[horz].next_in_ael;
        while e != NONE && self.top_x(e, self.actives[horz].top.y) <= vmax_x {
            if self.actives[e].vertex_top == vert_max {
                return e;
            }
            e = self.actives[e].next_in_ael;
        }
        NONE
    }

    /// Swallows following same-Y vertices into the horizontal: 180-degree
    /// spikes always, plain collinear runs only when collinear points are
    /// not being preserved.
    fn trim_horz(&mut self, horz: usize, preserve_collinear: bool) {
        let mut trimmed = false;
        let mut pt = self.vertices[self.next_vertex(horz)].pt;
        while pt.y == self.actives[horz].top.y {
            if preserve_collinear
                && (pt.x < self.actives[horz].top.x)
                    != (self.actives[horz].bot.x < self.actives[horz].top.x)
            {
                break;
            }
            self.actives[horz].vertex_top = self.next_vertex(horz);
            self.actives[horz].top = pt;
            trimmed = true;
            if self.is_maxima(horz) {
                break;
            }
            pt = self.vertices[self.next_vertex(horz)].pt;
        }
        if trimmed {
            self.set_dx(horz); // keeps the heading in the sign
        }
    }

    /// True when the vertex after the horizontal's top doubles straight
    /// back over it.
    fn horz_is_spike(&self, horz: usize) -> bool {
        let next_pt = self.vertices[self.next_vertex(horz)].pt;
        let e = &self.actives[horz];
        next_pt.y == e.top.y && (e.bot.x < e.top.x) != (e.top.x < next_pt.x)
    }

    /// Fixes the walking direction and span of the horizontal; returns
    /// true when walking left to right.
    fn reset_horz_direction(&self, horz: usize, max_pair: usize) -> (bool, i64, i64) {
        let e = &self.actives[horz];
        if e.bot.x == e.top.x {
            // the horizontal is going nowhere: direction is whatever side
            // its maxima pair is on
            let left = e.curr_x;
            let right = e.curr_x;
            let mut e2 = e.next_in_ael;
            while e2 != NONE && e2 != max_pair {
                e2 = self.actives[e2].next_in_ael;
            }
            (e2 != NONE, left, right)
        } else if e.curr_x < e.top.x {
            (true, e.curr_x, e.top.x)
        } else {
            (false, e.top.x, e.curr_x)
        }
    }

    pub(crate) fn do_horizontal(&mut self, horz: usize) {
        let horz_is_open = self.is_open(horz);
        let y = self.actives[horz].bot.y;

        let mut vertex_max = NONE;
        let mut max_pair = NONE;
        if !horz_is_open {
            vertex_max = self.get_curr_y_maxima_vertex(horz);
            if vertex_max != NONE {
                max_pair = self.get_horz_maxima_pair(horz, vertex_max);
                // trim consecutive horizontals and 180-degree spikes
                if vertex_max != self.actives[horz].vertex_top {
                    let pc = self.preserve_collinear;
                    self.trim_horz(horz, pc);
                }
            }
        }

        let (mut is_left_to_right, mut horz_left, mut horz_right) =
            self.reset_horz_direction(horz, max_pair);

        if self.is_hot(horz) {
            let pt = Point64::new(self.actives[horz].curr_x, y);
            self.add_out_pt(horz, pt);
        }

        loop {
            // loops through consecutive horizontal edges
            if horz_is_open && self.is_maxima(horz) && !self.is_open_end(horz) {
                vertex_max = self.get_curr_y_maxima_vertex(horz);
                if vertex_max != NONE {
                    max_pair = self.get_horz_maxima_pair(horz, vertex_max);
                }
            }

            let mut e = if is_left_to_right {
                self.actives[horz].next_in_ael
            } else {
                self.actives[horz].prev_in_ael
            };

            while e != NONE {
                if e == max_pair {
                    // the horizontal bound ends here
                    if self.is_hot(horz) {
                        while self.actives[horz].vertex_top != self.actives[e].vertex_top {
                            let top = self.actives[horz].top;
                            self.add_out_pt(horz, top);
                            self.update_edge_into_ael(horz);
                        }
                        let top = self.actives[horz].top;
                        let op = self.add_local_max_poly(horz, e, top);
                        if op != NONE
                            && !self.is_open(horz)
                            && self.ring_nodes[op].pt == self.actives[horz].top
                        {
                            self.add_trial_horz_splice(op);
                        }
                    }
                    self.delete_from_ael(e);
                    self.delete_from_ael(horz);
                    return;
                }

                // when the horizontal is a maxima, keep going until its
                // pair; otherwise check the span and slope break rules
                if vertex_max != self.actives[horz].vertex_top || self.is_open_end(horz) {
                    if (is_left_to_right && self.actives[e].curr_x > horz_right)
                        || (!is_left_to_right && self.actives[e].curr_x < horz_left)
                    {
                        break;
                    }

                    if self.actives[e].curr_x == self.actives[horz].top.x
                        && !self.is_horizontal(e)
                    {
                        let pt = self.vertices[self.next_vertex(horz)].pt;
                        if is_left_to_right {
                            // with open paths, only break once past the end
                            if self.is_open(horz)
                                && !self.is_same_kind(horz, e)
                                && !self.is_hot(e)
                            {
                                if self.top_x(e, pt.y) > pt.x {
                                    break;
                                }
                            } else if self.top_x(e, pt.y) >= pt.x {
                                break;
                            }
                        } else if self.is_open(horz)
                            && !self.is_same_kind(horz, e)
                            && !self.is_hot(e)
                        {
                            if self.top_x(e, pt.y) < pt.x {
                                break;
                            }
                        } else if self.top_x(e, pt.y) <= pt.x {
                            break;
                        }
                    }
                }

                let pt = Point64::new(self.actives[e].curr_x, y);

                if is_left_to_right {
                    let op = self.intersect_edges(horz, e, pt);
                    self.swap_positions_in_ael(horz, e);
                    if self.is_hot(horz)
                        && op != NONE
                        && !self.is_open(horz)
                        && self.ring_nodes[op].pt == pt
                    {
                        self.add_trial_horz_splice(op);
                    }
                    if !self.is_horizontal(e) && self.test_join_with_prev1(e, y) {
                        let prev = self.actives[e].prev_in_ael;
                        let op1 = self.add_out_pt(prev, pt);
                        let op2 = self.add_out_pt(e, pt);
                        self.add_splice(op1, op2);
                    }
                    self.actives[horz].curr_x = self.actives[e].curr_x;
                    e = self.actives[horz].next_in_ael;
                } else {
                    let op = self.intersect_edges(e, horz, pt);
                    self.swap_positions_in_ael(e, horz);
                    if self.is_hot(horz)
                        && op != NONE
                        && !self.is_open(horz)
                        && self.ring_nodes[op].pt == pt
                    {
                        self.add_trial_horz_splice(op);
                    }
                    if !self.is_horizontal(e) && self.test_join_with_next1(e, y) {
                        let next = self.actives[e].next_in_ael;
                        let op1 = self.add_out_pt(e, pt);
                        let op2 = self.add_out_pt(next, pt);
                        self.add_splice(op1, op2);
                    }
                    self.actives[horz].curr_x = self.actives[e].curr_x;
                    e = self.actives[horz].prev_in_ael;
                }

                if self.error_found {
                    return;
                }
            }

            // an open horizontal ending mid-air finishes here
            if horz_is_open && self.is_open_end(horz) {
                if self.is_hot(horz) {
                    let top = self.actives[horz].top;
                    self.add_out_pt(horz, top);
                    let contour = self.actives[horz].outrec;
                    if self.is_front(horz) {
                        self.contours[contour].front_edge = NONE;
                    } else {
                        self.contours[contour].back_edge = NONE;
                    }
                    self.actives[horz].outrec = NONE;
                }
                self.delete_from_ael(horz);
                return;
            }

            if self.vertices[self.next_vertex(horz)].pt.y != self.actives[horz].top.y {
                break;
            }

            // there is a following consecutive horizontal
            if self.is_hot(horz) {
                let top = self.actives[horz].top;
                self.add_out_pt(horz, top);
            }
            self.update_edge_into_ael(horz);

            if self.preserve_collinear && !horz_is_open && self.horz_is_spike(horz) {
                self.trim_horz(horz, true);
            }

            let reset = self.reset_horz_direction(horz, max_pair);
            is_left_to_right = reset.0;
            horz_left = reset.1;
            horz_right = reset.2;
        }

        let op = if self.is_hot(horz) {
            let top = self.actives[horz].top;
            let op = self.add_out_pt(horz, top);
            if !self.is_open(horz) {
                self.add_trial_horz_splice(op);
            }
            op
        } else {
            NONE
        };

        if (horz_is_open && !self.is_open_end(horz))
            || (!horz_is_open && vertex_max != self.actives[horz].vertex_top)
        {
            // the end of an intermediate horizontal
            self.update_edge_into_ael(horz);
            if self.is_open(horz) {
                return;
            }
            if is_left_to_right && self.test_join_with_next1(horz, y) {
                let next = self.actives[horz].next_in_ael;
                let bot = self.actives[horz].bot;
                let op2 = self.add_out_pt(next, bot);
                self.add_splice(op, op2);
            } else if !is_left_to_right && self.test_join_with_prev1(horz, y) {
                let prev = self.actives[horz].prev_in_ael;
                let bot = self.actives[horz].bot;
                let op2 = self.add_out_pt(prev, bot);
                self.add_splice(op2, op);
            }
        } else if self.is_hot(horz) {
            if max_pair == NONE {
                self.error_found = true;
                return;
            }
            let top = self.actives[horz].top;
            self.add_local_max_poly(horz, max_pair, top);
        } else {
            if max_pair != NONE {
                self.delete_from_ael(max_pair);
            }
            self.delete_from_ael(horz);
        }
    }
}
