//! The public clipping driver.
//!
//! [`Clipper64`] accumulates subject and clip paths, runs the scanline
//! sweep on demand, and returns either flat path lists or a containment
//! tree. Input paths survive an execution, so several operations can be
//! run against the same path sets without re-adding them.

use std::collections::BinaryHeap;

use crate::error::ExactError;
use crate::path::Paths64;
#[cfg(feature = "z")]
use crate::primitives::Point64;

use super::engine::{ActiveEdge, Crossing, NONE};
use super::output::{Contour, ContourState, RingNode};
use super::polytree::PolyTree64;
use super::splice::Splice;
use super::vertex::{LocalMin, PathKind, VertexNode};

/// The boolean operation to perform.
///
/// All operations except `Difference` are commutative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipType {
    /// No operation; yields an empty solution.
    None,
    /// Regions covered by both subject and clip.
    Intersection,
    /// Regions covered by either subject or clip.
    Union,
    /// Regions covered by the subject but not the clip.
    Difference,
    /// Regions covered by exactly one of subject and clip.
    Xor,
}

/// How winding numbers decide which regions are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillRule {
    /// A region is filled when its winding parity is odd.
    EvenOdd,
    /// A region is filled when its winding number is non-zero.
    NonZero,
    /// A region is filled when its winding number is greater than zero.
    Positive,
    /// A region is filled when its winding number is less than zero.
    Negative,
}

/// Callback filling the user Z coordinate of every ring node created at
/// an edge intersection: `(e1_bot, e1_top, e2_bot, e2_top, pt) -> z`.
#[cfg(feature = "z")]
pub type ZCallback64 = Box<dyn Fn(Point64, Point64, Point64, Point64, Point64) -> i64>;

/// A polygon clipping engine over 64-bit integer coordinates.
///
/// # Example
///
/// ```
/// use exactum::clip::{Clipper64, ClipType, FillRule};
/// use exactum::Point64;
///
/// let mut clipper = Clipper64::new();
/// clipper.add_subject(&vec![vec![
///     Point64::new(0, 0),
///     Point64::new(10, 0),
///     Point64::new(10, 10),
///     Point64::new(0, 10),
/// ]]);
/// let solution = clipper.execute(ClipType::Union, FillRule::NonZero).unwrap();
/// assert_eq!(solution.len(), 1);
/// ```
pub struct Clipper64 {
    /// Keep collinear output vertices instead of merging runs of them.
    /// Spikes (180-degree reversals) are always removed.
    pub preserve_collinear: bool,
    reverse_orientation: bool,
    #[cfg(feature = "z")]
    pub(crate) z_callback: Option<ZCallback64>,

    // input graph, preserved across executions
    pub(crate) vertices: Vec<VertexNode>,
    pub(crate) minima: Vec<LocalMin>,
    pub(crate) minima_sorted: bool,
    pub(crate) has_open_paths: bool,

    // sweep state
    pub(crate) clip_type: ClipType,
    pub(crate) fill_rule: FillRule,
    pub(crate) bot_y: i64,
    pub(crate) error_found: bool,
    pub(crate) using_polytree: bool,
    pub(crate) actives: Vec<ActiveEdge>,
    pub(crate) ael_first: usize,
    pub(crate) sel_first: usize,
    pub(crate) cur_min: usize,
    pub(crate) scanlines: BinaryHeap<i64>,
    pub(crate) crossings: Vec<Crossing>,

    // output state
    pub(crate) ring_nodes: Vec<RingNode>,
    pub(crate) contours: Vec<Contour>,
    pub(crate) splices: Vec<Splice>,
    pub(crate) splice_list: Vec<usize>,
    pub(crate) horz_splice_first: usize,
}

impl Default for Clipper64 {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipper64 {
    /// Creates an engine with the default orientation convention:
    /// emitted outer contours have positive signed area.
    pub fn new() -> Self {
        Self {
            preserve_collinear: true,
            reverse_orientation: false,
            #[cfg(feature = "z")]
            z_callback: None,
            vertices: Vec::new(),
            minima: Vec::new(),
            minima_sorted: false,
            has_open_paths: false,
            clip_type: ClipType::None,
            fill_rule: FillRule::EvenOdd,
            bot_y: 0,
            error_found: false,
            using_polytree: false,
            actives: Vec::new(),
            ael_first: NONE,
            sel_first: NONE,
            cur_min: 0,
            scanlines: BinaryHeap::new(),
            crossings: Vec::new(),
            ring_nodes: Vec::new(),
            contours: Vec::new(),
            splices: Vec::new(),
            splice_list: Vec::new(),
            horz_splice_first: NONE,
        }
    }

    /// Creates an engine with the orientation convention reversed:
    /// outer contours come out with negative signed area, and the
    /// `Positive`/`Negative` fill rules swap meaning accordingly.
    pub fn with_reversed_orientation() -> Self {
        let mut c = Self::new();
        c.reverse_orientation = true;
        c
    }

    /// Sets the callback deriving the user Z coordinate of intersection
    /// points.
    #[cfg(feature = "z")]
    pub fn set_z_callback(&mut self, callback: ZCallback64) {
        self.z_callback = Some(callback);
    }

    /// Adds closed subject paths.
    pub fn add_subject(&mut self, paths: &Paths64) {
        self.add_paths_internal(paths, PathKind::Subject, false);
    }

    /// Adds open subject paths (polylines).
    pub fn add_open_subject(&mut self, paths: &Paths64) {
        self.add_paths_internal(paths, PathKind::Subject, true);
    }

    /// Adds closed clip paths.
    pub fn add_clip(&mut self, paths: &Paths64) {
        self.add_paths_internal(paths, PathKind::Clip, false);
    }

    /// Removes all paths and all residual state.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.minima.clear();
        self.minima_sorted = false;
        self.has_open_paths = false;
        self.cleanup_sweep();
    }

    /// Frees sweep/output state while keeping the input vertex rings, so
    /// another operation can run without re-adding paths.
    fn cleanup_sweep(&mut self) {
        self.actives.clear();
        self.ring_nodes.clear();
        self.contours.clear();
        self.splices.clear();
        self.splice_list.clear();
        self.crossings.clear();
        self.scanlines.clear();
        self.ael_first = NONE;
        self.sel_first = NONE;
        self.horz_splice_first = NONE;
        self.cur_min = 0;
        self.error_found = false;
    }

    /// With the reversed orientation convention, `Positive` and
    /// `Negative` trade places; the parity rules are direction-free.
    fn effective_fill_rule(&self, fill_rule: FillRule) -> FillRule {
        if !self.reverse_orientation {
            return fill_rule;
        }
        match fill_rule {
            FillRule::Positive => FillRule::Negative,
            FillRule::Negative => FillRule::Positive,
            other => other,
        }
    }

    /// Performs a boolean operation, returning the closed solution paths.
    pub fn execute(
        &mut self,
        clip_type: ClipType,
        fill_rule: FillRule,
    ) -> Result<Paths64, ExactError> {
        self.execute_with_open(clip_type, fill_rule).map(|r| r.0)
    }

    /// Performs a boolean operation, returning closed solution paths and
    /// clipped open (polyline) paths separately.
    pub fn execute_with_open(
        &mut self,
        clip_type: ClipType,
        fill_rule: FillRule,
    ) -> Result<(Paths64, Paths64), ExactError> {
        self.using_polytree = false;
        let fill_rule = self.effective_fill_rule(fill_rule);
        let result = if self.execute_internal(clip_type, fill_rule) {
            let mut closed = Paths64::new();
            let mut open = Paths64::new();
            for i in 0..self.contours.len() {
                let pts = self.contours[i].pts;
                if pts == NONE {
                    continue;
                }
                if self.contours[i].state == ContourState::Open {
                    if let Some(path) = self.extract_path(pts, true) {
                        open.push(path);
                    }
                } else if let Some(mut path) = self.extract_path(pts, false) {
                    if self.reverse_orientation {
                        path.reverse();
                    }
                    closed.push(path);
                }
            }
            Ok((closed, open))
        } else {
            Err(ExactError::InternalInconsistency)
        };
        self.cleanup_sweep();
        result
    }

    /// Performs a boolean operation, returning the closed solution as a
    /// containment tree along with any clipped open paths.
    pub fn execute_tree(
        &mut self,
        clip_type: ClipType,
        fill_rule: FillRule,
    ) -> Result<(PolyTree64, Paths64), ExactError> {
        self.using_polytree = true;
        let fill_rule = self.effective_fill_rule(fill_rule);
        let result = if self.execute_internal(clip_type, fill_rule) {
            let (mut tree, open) = self.build_tree_result();
            if self.reverse_orientation {
                tree.reverse_recursive();
            }
            Ok((tree, open))
        } else {
            Err(ExactError::InternalInconsistency)
        };
        self.cleanup_sweep();
        result
    }
}

// ----------------------------------------------------------------------
// One-shot conveniences
// ----------------------------------------------------------------------

fn boolean_op(
    clip_type: ClipType,
    subjects: &Paths64,
    clips: &Paths64,
    fill_rule: FillRule,
) -> Result<Paths64, ExactError> {
    let mut clipper = Clipper64::new();
    clipper.add_subject(subjects);
    clipper.add_clip(clips);
    clipper.execute(clip_type, fill_rule)
}

/// Intersects subject paths with clip paths.
///
/// # Example
///
/// ```
/// use exactum::clip::{paths_intersection, FillRule};
/// use exactum::Point64;
///
/// let a = vec![vec![
///     Point64::new(0, 0),
///     Point64::new(2, 0),
///     Point64::new(2, 2),
///     Point64::new(0, 2),
/// ]];
/// let b = vec![vec![
///     Point64::new(1, 1),
///     Point64::new(3, 1),
///     Point64::new(3, 3),
///     Point64::new(1, 3),
/// ]];
///
/// let result = paths_intersection(&a, &b, FillRule::NonZero).unwrap();
/// assert_eq!(result.len(), 1);
/// ```
pub fn paths_intersection(
    subjects: &Paths64,
    clips: &Paths64,
    fill_rule: FillRule,
) -> Result<Paths64, ExactError> {
    boolean_op(ClipType::Intersection, subjects, clips, fill_rule)
}

/// Unites subject paths with clip paths.
pub fn paths_union(
    subjects: &Paths64,
    clips: &Paths64,
    fill_rule: FillRule,
) -> Result<Paths64, ExactError> {
    boolean_op(ClipType::Union, subjects, clips, fill_rule)
}

/// Subtracts clip paths from subject paths.
pub fn paths_difference(
    subjects: &Paths64,
    clips: &Paths64,
    fill_rule: FillRule,
) -> Result<Paths64, ExactError> {
    boolean_op(ClipType::Difference, subjects, clips, fill_rule)
}

/// Symmetric difference of subject and clip paths.
pub fn paths_xor(
    subjects: &Paths64,
    clips: &Paths64,
    fill_rule: FillRule,
) -> Result<Paths64, ExactError> {
    boolean_op(ClipType::Xor, subjects, clips, fill_rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::{signed_area, Path64};
    use crate::primitives::Point64;

    fn rect(l: i64, b: i64, r: i64, t: i64) -> Path64 {
        vec![
            Point64::new(l, b),
            Point64::new(r, b),
            Point64::new(r, t),
            Point64::new(l, t),
        ]
    }

    fn total_area(paths: &Paths64) -> f64 {
        paths.iter().map(|p| signed_area(p)).sum()
    }

    fn total_abs_area(paths: &Paths64) -> f64 {
        paths.iter().map(|p| signed_area(p).abs()).sum()
    }

    #[test]
    fn test_intersection_overlapping_squares() {
        let subject = vec![rect(0, 0, 100, 100)];
        let clip = vec![rect(50, 50, 150, 150)];
        let solution = paths_intersection(&subject, &clip, FillRule::EvenOdd).unwrap();

        assert_eq!(solution.len(), 1);
        assert_eq!(signed_area(&solution[0]), 2500.0);
        let bounds = crate::path::path_bounds(&solution[0]);
        assert_eq!(bounds.min, Point64::new(50, 50));
        assert_eq!(bounds.max, Point64::new(100, 100));
    }

    #[test]
    fn test_union_disjoint_squares() {
        let subject = vec![rect(0, 0, 10, 10)];
        let clip = vec![rect(100, 0, 110, 10)];
        let solution = paths_union(&subject, &clip, FillRule::NonZero).unwrap();

        assert_eq!(solution.len(), 2);
        assert_eq!(total_area(&solution), 200.0);
    }

    #[test]
    fn test_difference_donut() {
        let subject = vec![rect(0, 0, 100, 100)];
        let clip = vec![rect(25, 25, 75, 75)];
        let solution = paths_difference(&subject, &clip, FillRule::EvenOdd).unwrap();

        assert_eq!(solution.len(), 2);
        // one outer ring, one hole with opposite orientation
        let mut areas: Vec<f64> = solution.iter().map(|p| signed_area(p)).collect();
        areas.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(areas[0], -2500.0);
        assert_eq!(areas[1], 10000.0);
    }

    #[test]
    fn test_difference_donut_tree() {
        let mut clipper = Clipper64::new();
        clipper.add_subject(&vec![rect(0, 0, 100, 100)]);
        clipper.add_clip(&vec![rect(25, 25, 75, 75)]);
        let (tree, open) = clipper
            .execute_tree(ClipType::Difference, FillRule::EvenOdd)
            .unwrap();

        assert!(open.is_empty());
        assert_eq!(tree.child_count(), 1);
        let outer = &tree.children()[0];
        assert!(!outer.is_hole());
        assert_eq!(outer.child_count(), 1);
        let hole = &outer.children()[0];
        assert!(hole.is_hole());
        assert!(signed_area(hole.polygon()) < 0.0);
        assert_eq!(tree.area(), 7500.0);

        // every hole vertex lies inside or on the outer ring
        for &pt in hole.polygon() {
            assert_ne!(
                crate::path::point_in_path(pt, outer.polygon()),
                crate::path::PointInPathResult::Outside
            );
        }
    }

    #[test]
    fn test_bowtie_even_odd_two_triangles() {
        let bowtie = vec![vec![
            Point64::new(0, 0),
            Point64::new(100, 100),
            Point64::new(100, 0),
            Point64::new(0, 100),
        ]];
        let solution = paths_union(&bowtie, &Paths64::new(), FillRule::EvenOdd).unwrap();

        assert_eq!(solution.len(), 2);
        for path in &solution {
            assert_eq!(signed_area(path), 2500.0);
        }
    }

    #[test]
    fn test_bowtie_positive_keeps_positive_lobe() {
        // only one lobe of a bowtie winds positively
        let bowtie = vec![vec![
            Point64::new(0, 0),
            Point64::new(100, 100),
            Point64::new(100, 0),
            Point64::new(0, 100),
        ]];
        let solution = paths_union(&bowtie, &Paths64::new(), FillRule::Positive).unwrap();

        assert_eq!(solution.len(), 1);
        assert_eq!(signed_area(&solution[0]), 2500.0);
    }

    #[test]
    fn test_open_polyline_clipped_by_square() {
        let mut clipper = Clipper64::new();
        clipper.add_open_subject(&vec![vec![Point64::new(-10, 50), Point64::new(110, 50)]]);
        clipper.add_clip(&vec![rect(0, 0, 100, 100)]);
        let (closed, open) = clipper
            .execute_with_open(ClipType::Intersection, FillRule::EvenOdd)
            .unwrap();

        assert!(closed.is_empty());
        assert_eq!(open.len(), 1);
        let seg = &open[0];
        assert_eq!(seg.len(), 2);
        assert!(seg.iter().all(|p| p.y == 50));
        let mut xs: Vec<i64> = seg.iter().map(|p| p.x).collect();
        xs.sort_unstable();
        assert_eq!(xs, vec![0, 100]);
    }

    #[test]
    fn test_xor_cross_four_regions() {
        let subject = vec![rect(40, 0, 60, 100)];
        let clip = vec![rect(0, 40, 100, 60)];
        let solution = paths_xor(&subject, &clip, FillRule::EvenOdd).unwrap();

        // |A| + |B| - 2|A∩B| = 2000 + 2000 - 800
        assert_eq!(total_abs_area(&solution), 3200.0);
        assert_eq!(solution.len(), 4);
    }

    #[test]
    fn test_union_with_empty_preserves_area() {
        let subject = vec![rect(3, 7, 103, 57)];
        for fill_rule in [
            FillRule::EvenOdd,
            FillRule::NonZero,
            FillRule::Positive,
            FillRule::Negative,
        ] {
            let solution = paths_union(&subject, &Paths64::new(), fill_rule).unwrap();
            if fill_rule == FillRule::Negative {
                // the subject winds positively, so Negative sees nothing
                assert!(solution.is_empty());
            } else {
                assert_eq!(total_abs_area(&solution), 5000.0, "{:?}", fill_rule);
            }
        }
    }

    #[test]
    fn test_union_idempotent() {
        let a = vec![rect(0, 0, 50, 50)];
        let b = vec![rect(25, 25, 75, 75)];
        let once = paths_union(&a, &b, FillRule::NonZero).unwrap();
        let twice = paths_union(&once, &Paths64::new(), FillRule::NonZero).unwrap();

        assert_eq!(once.len(), twice.len());
        assert_eq!(total_area(&once), total_area(&twice));
    }

    #[test]
    fn test_commutative_ops() {
        let a = vec![rect(0, 0, 60, 60)];
        let b = vec![rect(30, 30, 90, 90)];
        for clip_type in [ClipType::Intersection, ClipType::Union, ClipType::Xor] {
            let ab = boolean_op(clip_type, &a, &b, FillRule::NonZero).unwrap();
            let ba = boolean_op(clip_type, &b, &a, FillRule::NonZero).unwrap();
            assert_eq!(ab.len(), ba.len(), "{:?}", clip_type);
            assert_eq!(total_area(&ab), total_area(&ba), "{:?}", clip_type);
        }
    }

    #[test]
    fn test_difference_self_is_empty() {
        let a = vec![rect(0, 0, 80, 40)];
        let solution = paths_difference(&a, &a, FillRule::NonZero).unwrap();
        assert!(solution.is_empty());
    }

    #[test]
    fn test_de_morgan_under_bounding_box() {
        let bounds = vec![rect(-10, -10, 110, 110)];
        let a1 = vec![rect(0, 0, 50, 50)];
        let a2 = vec![rect(30, 30, 90, 90)];

        let union = paths_union(&a1, &a2, FillRule::NonZero).unwrap();
        let lhs = paths_difference(&bounds, &union, FillRule::NonZero).unwrap();

        let d1 = paths_difference(&bounds, &a1, FillRule::NonZero).unwrap();
        let d2 = paths_difference(&bounds, &a2, FillRule::NonZero).unwrap();
        let rhs = paths_intersection(&d1, &d2, FillRule::NonZero).unwrap();

        assert_eq!(total_area(&lhs), total_area(&rhs));
    }

    #[test]
    fn test_clip_type_none_is_empty() {
        let mut clipper = Clipper64::new();
        clipper.add_subject(&vec![rect(0, 0, 10, 10)]);
        let solution = clipper.execute(ClipType::None, FillRule::EvenOdd).unwrap();
        assert!(solution.is_empty());
    }

    #[test]
    fn test_empty_inputs() {
        let solution =
            paths_intersection(&Paths64::new(), &Paths64::new(), FillRule::EvenOdd).unwrap();
        assert!(solution.is_empty());
    }

    #[test]
    fn test_reexecute_without_readding() {
        let mut clipper = Clipper64::new();
        clipper.add_subject(&vec![rect(0, 0, 100, 100)]);
        clipper.add_clip(&vec![rect(50, 0, 150, 100)]);

        let inter = clipper
            .execute(ClipType::Intersection, FillRule::NonZero)
            .unwrap();
        assert_eq!(total_area(&inter), 5000.0);

        // same inputs, different operation
        let union = clipper.execute(ClipType::Union, FillRule::NonZero).unwrap();
        assert_eq!(total_area(&union), 15000.0);
    }

    #[test]
    fn test_clear_resets_engine() {
        let mut clipper = Clipper64::new();
        clipper.add_subject(&vec![rect(0, 0, 10, 10)]);
        clipper.clear();
        let solution = clipper.execute(ClipType::Union, FillRule::NonZero).unwrap();
        assert!(solution.is_empty());
    }

    #[test]
    fn test_reversed_orientation_flips_signs() {
        let mut clipper = Clipper64::with_reversed_orientation();
        clipper.add_subject(&vec![rect(0, 0, 100, 100)]);
        clipper.add_clip(&vec![rect(25, 25, 75, 75)]);
        let solution = clipper
            .execute(ClipType::Difference, FillRule::EvenOdd)
            .unwrap();

        assert_eq!(solution.len(), 2);
        let mut areas: Vec<f64> = solution.iter().map(|p| signed_area(p)).collect();
        areas.sort_by(|a, b| a.partial_cmp(b).unwrap());
        // outer negative, hole positive under the reversed convention
        assert_eq!(areas[0], -10000.0);
        assert_eq!(areas[1], 2500.0);
    }

    #[test]
    fn test_preserve_collinear() {
        let subject = vec![vec![
            Point64::new(0, 0),
            Point64::new(50, 0), // collinear midpoint
            Point64::new(100, 0),
            Point64::new(100, 100),
            Point64::new(0, 100),
        ]];

        let mut keeping = Clipper64::new();
        keeping.add_subject(&subject);
        let kept = keeping.execute(ClipType::Union, FillRule::NonZero).unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].len(), 5);

        let mut merging = Clipper64::new();
        merging.preserve_collinear = false;
        merging.add_subject(&subject);
        let merged = merging.execute(ClipType::Union, FillRule::NonZero).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].len(), 4);
    }

    #[test]
    fn test_nested_rings_tree_depth() {
        // three concentric squares: filled, hole, filled
        let mut clipper = Clipper64::new();
        clipper.add_subject(&vec![
            rect(0, 0, 90, 90),
            rect(10, 10, 80, 80),
            rect(20, 20, 70, 70),
        ]);
        let (tree, _) = clipper
            .execute_tree(ClipType::Union, FillRule::EvenOdd)
            .unwrap();

        assert_eq!(tree.child_count(), 1);
        let outer = &tree.children()[0];
        assert_eq!(outer.child_count(), 1);
        let hole = &outer.children()[0];
        assert!(hole.is_hole());
        assert_eq!(hole.child_count(), 1);
        let island = &hole.children()[0];
        assert!(!island.is_hole());
        assert_eq!(island.child_count(), 0);
    }

    #[test]
    fn test_polyline_multiple_crossings() {
        // zig-zag polyline crossing a square twice
        let mut clipper = Clipper64::new();
        clipper.add_open_subject(&vec![vec![
            Point64::new(-20, 20),
            Point64::new(120, 20),
            Point64::new(120, 80),
            Point64::new(-20, 80),
        ]]);
        clipper.add_clip(&vec![rect(0, 0, 100, 100)]);
        let (_, open) = clipper
            .execute_with_open(ClipType::Intersection, FillRule::NonZero)
            .unwrap();

        assert_eq!(open.len(), 2);
        let length: i64 = open
            .iter()
            .map(|p| (p[p.len() - 1].x - p[0].x).abs() + (p[p.len() - 1].y - p[0].y).abs())
            .sum();
        assert_eq!(length, 200);
    }

    #[test]
    fn test_open_path_difference() {
        let mut clipper = Clipper64::new();
        clipper.add_open_subject(&vec![vec![Point64::new(-10, 50), Point64::new(110, 50)]]);
        clipper.add_clip(&vec![rect(0, 0, 100, 100)]);
        let (_, open) = clipper
            .execute_with_open(ClipType::Difference, FillRule::NonZero)
            .unwrap();

        // the two stubs outside the square survive
        assert_eq!(open.len(), 2);
        let total: i64 = open.iter().map(|p| (p[1].x - p[0].x).abs()).sum();
        assert_eq!(total, 20);
    }

    #[test]
    fn test_intersection_no_overlap_is_empty() {
        let a = vec![rect(0, 0, 10, 10)];
        let b = vec![rect(20, 20, 30, 30)];
        let solution = paths_intersection(&a, &b, FillRule::NonZero).unwrap();
        assert!(solution.is_empty());
    }

    #[test]
    fn test_touching_squares_union() {
        // squares sharing one edge merge into a single ring
        let a = vec![rect(0, 0, 50, 100)];
        let b = vec![rect(50, 0, 100, 100)];
        let solution = paths_union(&a, &b, FillRule::NonZero).unwrap();

        assert_eq!(total_area(&solution), 10000.0);
        assert_eq!(solution.len(), 1);
    }

    #[test]
    fn test_degenerate_subject_ignored() {
        // fewer than three distinct vertices
        let a = vec![vec![Point64::new(0, 0), Point64::new(10, 10)]];
        let solution = paths_union(&a, &Paths64::new(), FillRule::NonZero).unwrap();
        assert!(solution.is_empty());
    }

    #[test]
    fn test_negative_fill_on_reversed_subject() {
        let mut reversed = rect(0, 0, 100, 100);
        reversed.reverse();
        let solution = paths_union(&vec![reversed], &Paths64::new(), FillRule::Negative).unwrap();
        assert_eq!(solution.len(), 1);
        assert_eq!(signed_area(&solution[0]).abs(), 10000.0);
    }

    #[cfg(feature = "z")]
    #[test]
    fn test_z_callback_runs_on_intersections() {
        let mut clipper = Clipper64::new();
        clipper.set_z_callback(Box::new(|_, _, _, _, _| 7));
        clipper.add_subject(&vec![rect(0, 0, 100, 100)]);
        clipper.add_clip(&vec![rect(50, 50, 150, 150)]);
        let solution = clipper
            .execute(ClipType::Intersection, FillRule::NonZero)
            .unwrap();

        assert!(solution[0].iter().any(|p| p.z == 7));
    }
}
