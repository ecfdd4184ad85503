//! Containment tree output.
//!
//! Instead of a flat path list, the engine can report the solution as a
//! tree in which every contour is parented by the contour that most
//! tightly contains it. Hole status then falls out of tree depth: outer
//! boundaries sit at even depth, holes at odd depth.

use crate::path::{point_in_path, signed_area, path_bounds, Path64, Paths64, PointInPathResult};

use super::clipper::Clipper64;
use super::engine::NONE;
use super::output::ContourState;

/// Marker for a contour currently being attached (cycle guard).
const PENDING: usize = usize::MAX - 1;

/// One node of a [`PolyTree64`]: a contour plus the contours it directly
/// contains.
#[derive(Debug, Clone, Default)]
pub struct PolyPath64 {
    polygon: Path64,
    is_hole: bool,
    children: Vec<PolyPath64>,
}

impl PolyPath64 {
    /// The contour at this node.
    pub fn polygon(&self) -> &Path64 {
        &self.polygon
    }

    /// True when this contour is a hole (odd depth in the tree).
    pub fn is_hole(&self) -> bool {
        self.is_hole
    }

    /// Contours directly contained by this one.
    pub fn children(&self) -> &[PolyPath64] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Net area of this contour and everything below it (holes count
    /// negatively).
    pub fn area(&self) -> f64 {
        let mut result = signed_area(&self.polygon);
        for child in &self.children {
            result += child.area();
        }
        result
    }

    pub(crate) fn reverse_recursive(&mut self) {
        self.polygon.reverse();
        for child in &mut self.children {
            child.reverse_recursive();
        }
    }
}

/// The root of a containment tree. The root itself carries no contour;
/// its children are the solution's outermost boundaries.
#[derive(Debug, Clone, Default)]
pub struct PolyTree64 {
    children: Vec<PolyPath64>,
}

impl PolyTree64 {
    /// The outermost contours of the solution.
    pub fn children(&self) -> &[PolyPath64] {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Net area of the whole solution.
    pub fn area(&self) -> f64 {
        self.children.iter().map(PolyPath64::area).sum()
    }

    /// Flattens the tree back into a path list, depth first.
    pub fn to_paths(&self) -> Paths64 {
        let mut paths = Paths64::new();
        fn walk(node: &PolyPath64, out: &mut Paths64) {
            out.push(node.polygon.clone());
            for child in node.children() {
                walk(child, out);
            }
        }
        for child in &self.children {
            walk(child, &mut paths);
        }
        paths
    }

    pub(crate) fn reverse_recursive(&mut self) {
        for child in &mut self.children {
            child.reverse_recursive();
        }
    }
}

struct FlatNode {
    path: Path64,
    children: Vec<usize>,
}

impl Clipper64 {
    /// Extracts and caches a contour's path and bounds; false when the
    /// ring is degenerate.
    fn ensure_path_cached(&mut self, contour: usize) -> bool {
        if !self.contours[contour].path.is_empty() {
            return true;
        }
        let pts = self.contours[contour].pts;
        match self.extract_path(pts, false) {
            Some(path) => {
                self.contours[contour].bounds = path_bounds(&path);
                self.contours[contour].path = path;
                true
            }
            None => false,
        }
    }

    /// Every ring vertex of `child` must sit inside (or on) `owner`; the
    /// first decisive vertex settles it.
    fn contour_contains(&mut self, owner: usize, child: usize) -> bool {
        if owner == child || !self.ensure_path_cached(owner) || !self.ensure_path_cached(child) {
            return false;
        }
        let owner_bounds = self.contours[owner].bounds;
        let child_bounds = self.contours[child].bounds;
        if !owner_bounds.contains_rect(&child_bounds) {
            return false;
        }
        for i in 0..self.contours[child].path.len() {
            let pt = self.contours[child].path[i];
            match point_in_path(pt, &self.contours[owner].path) {
                PointInPathResult::OnEdge => continue,
                PointInPathResult::Inside => return true,
                PointInPathResult::Outside => return false,
            }
        }
        // fully on the boundary counts as contained
        true
    }

    /// Searches `owner`'s split contours, depth first, for one that
    /// contains `outrec` more tightly than `owner` itself.
    fn find_containing_split(&mut self, owner: usize, outrec: usize) -> usize {
        let splits = self.contours[owner].splits.clone();
        for split in splits {
            let split = self.get_real_contour(split);
            if split == NONE || split == outrec || split == owner || split <= owner {
                continue;
            }
            let deeper = self.find_containing_split(split, outrec);
            if deeper != NONE {
                return deeper;
            }
            if self.contour_contains(split, outrec) {
                return split;
            }
        }
        NONE
    }

    /// Walks the owner chain (checking splits at every level) until an
    /// owner verifiably contains `i`.
    fn resolve_owner(&mut self, i: usize) {
        let mut owner = self.get_real_contour(self.contours[i].owner);
        let mut steps = self.contours.len() + 1;
        let mut verified = false;
        while owner != NONE && steps > 0 {
            steps -= 1;
            if owner == i {
                owner = NONE;
                break;
            }
            let split = self.find_containing_split(owner, i);
            if split != NONE {
                owner = split;
                verified = true;
                break;
            }
            if self.contour_contains(owner, i) {
                verified = true;
                break;
            }
            owner = self.get_real_contour(self.contours[owner].owner);
        }
        if !verified {
            owner = NONE;
        }
        self.contours[i].owner = owner;
    }

    fn attach_to_tree(&mut self, i: usize, nodes: &mut Vec<FlatNode>, roots: &mut Vec<usize>) {
        if self.contours[i].tree_node != NONE {
            return;
        }
        self.contours[i].tree_node = PENDING;

        let owner = self.contours[i].owner;
        let parent = if owner != NONE {
            if self.contours[owner].tree_node == NONE {
                self.attach_to_tree(owner, nodes, roots);
            }
            match self.contours[owner].tree_node {
                PENDING => NONE, // ownership cycle: hoist to the root
                n => n,
            }
        } else {
            NONE
        };

        let node = nodes.len();
        nodes.push(FlatNode {
            path: std::mem::take(&mut self.contours[i].path),
            children: Vec::new(),
        });
        if parent == NONE {
            roots.push(node);
        } else {
            nodes[parent].children.push(node);
        }
        self.contours[i].tree_node = node;
    }

    /// Builds the containment tree and collects open polylines.
    pub(crate) fn build_tree_result(&mut self) -> (PolyTree64, Paths64) {
        let mut open_paths = Paths64::new();

        // cache paths and resolve verified owners, parents first
        let mut closed: Vec<usize> = Vec::new();
        for i in 0..self.contours.len() {
            if self.contours[i].pts == NONE {
                continue;
            }
            if self.contours[i].state == ContourState::Open {
                if let Some(path) = self.extract_path(self.contours[i].pts, true) {
                    open_paths.push(path);
                }
                continue;
            }
            if self.ensure_path_cached(i) {
                closed.push(i);
            }
        }
        for &i in &closed {
            self.resolve_owner(i);
        }

        let mut nodes: Vec<FlatNode> = Vec::new();
        let mut roots: Vec<usize> = Vec::new();
        for &i in &closed {
            self.attach_to_tree(i, &mut nodes, &mut roots);
        }

        fn assemble(nodes: &mut Vec<FlatNode>, idx: usize, depth: usize) -> PolyPath64 {
            let children_idx = std::mem::take(&mut nodes[idx].children);
            let polygon = std::mem::take(&mut nodes[idx].path);
            let children = children_idx
                .into_iter()
                .map(|c| assemble(nodes, c, depth + 1))
                .collect();
            PolyPath64 {
                polygon,
                is_hole: depth % 2 == 1,
                children,
            }
        }

        let children = roots
            .iter()
            .map(|&r| assemble(&mut nodes, r, 0))
            .collect();

        (PolyTree64 { children }, open_paths)
    }
}
