//! # Spatial index (octree)
//!
//! A bounding-box octree rebuilt every step over the non-primary bodies. It
//! answers one question: which bodies lie inside an axis-aligned box? The
//! culled gravity term uses it to find planet-planet pairs within the cutoff
//! radius instead of testing all `O(N²)` pairs.
//!
//! ## Layout
//!
//! - The root covers a cube enclosing every indexed position.
//! - Nodes are stored flat in `nodes` and link to children by index.
//! - A leaf holds up to [`LEAF_CAPACITY`] points; inserting one more splits it
//!   into 8 octants and pushes its points down.
//! - Splitting stops at [`MAX_DEPTH`]. Collocated bodies would otherwise
//!   subdivide forever, so the deepest leaves simply grow.
//!
//! The index keeps its own copy of each position, so it borrows nothing from
//! the bodies and the caller is free to mutate them (apply forces) while
//! querying.
//!
//! Query results are sorted by body index. Force accumulation order is then a
//! function of body order alone, which keeps repeated runs bit-identical.

use crate::simulation::states::{Body, NVec3};

/// Points a leaf may hold before it is split
pub const LEAF_CAPACITY: usize = 4;
/// Depth at which leaves stop splitting
pub const MAX_DEPTH: usize = 32;

/// An indexed position: the body's index in the owning `System`
#[derive(Debug, Clone, Copy)]
struct Point {
    body: usize,
    position: NVec3,
}

/// A single octree node.
///
/// Either a leaf (`children` all `None`, `points` in use) or an internal node
/// (all 8 `children` present, `points` empty).
#[derive(Debug)]
pub struct OctreeNode {
    pub bbox_min: NVec3,
    pub bbox_max: NVec3,
    pub children: [Option<usize>; 8], // indices into SpatialIndex::nodes
    pub depth: usize,
    points: Vec<usize>, // indices into SpatialIndex::points
}

impl OctreeNode {
    fn new(bbox_min: NVec3, bbox_max: NVec3, depth: usize) -> Self {
        Self {
            bbox_min,
            bbox_max,
            children: [None; 8],
            depth,
            points: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(|c| c.is_none())
    }
}

/// Octree over a subset of a system's bodies
#[derive(Debug, Default)]
pub struct SpatialIndex {
    nodes: Vec<OctreeNode>,
    points: Vec<Point>,
}

impl SpatialIndex {
    /// Build an index over `bodies[i]` for every `i` in `members`.
    ///
    /// An empty member list gives an empty index whose queries return nothing.
    pub fn build<I>(bodies: &[Body], members: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let points: Vec<Point> = members
            .into_iter()
            .map(|i| Point { body: i, position: bodies[i].position })
            .collect();

        let mut index = SpatialIndex { nodes: Vec::new(), points };
        if index.points.is_empty() {
            return index;
        }

        let (bbox_min, bbox_max) = compute_global_bbox(&index.points);
        index.nodes.push(OctreeNode::new(bbox_min, bbox_max, 0));

        for p in 0..index.points.len() {
            index.insert_point(0, p);
        }

        index
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Collect body indices whose position lies in `[min, max]` (inclusive)
    /// into `out`, sorted ascending. `out` is cleared first.
    pub fn query_box(&self, min: &NVec3, max: &NVec3, out: &mut Vec<usize>) {
        out.clear();
        if !self.nodes.is_empty() {
            self.query_node(0, min, max, out);
        }
        out.sort_unstable();
    }

    /// Bodies inside the cube of side `2 * half_extent` centred on `center`
    pub fn query_around(&self, center: &NVec3, half_extent: f64, out: &mut Vec<usize>) {
        let half = NVec3::repeat(half_extent);
        self.query_box(&(center - half), &(center + half), out);
    }

    // helpers ==============================================================================

    fn insert_point(&mut self, node_idx: usize, point_idx: usize) {
        let node = &self.nodes[node_idx];

        if node.is_leaf() {
            // room left, or too deep to split any further
            if node.points.len() < LEAF_CAPACITY || node.depth >= MAX_DEPTH {
                self.nodes[node_idx].points.push(point_idx);
                return;
            }

            // full leaf -> split and push the existing points down
            let existing = std::mem::take(&mut self.nodes[node_idx].points);
            self.subdivide(node_idx);
            for p in existing {
                self.insert_into_child(node_idx, p);
            }
        }

        self.insert_into_child(node_idx, point_idx);
    }

    fn insert_into_child(&mut self, node_idx: usize, point_idx: usize) {
        let node = &self.nodes[node_idx];
        let octant = child_index_for_point(&self.points[point_idx].position, &node.bbox_min, &node.bbox_max);
        // subdivide() always creates all 8 children
        let child = node.children[octant];
        if let Some(child) = child {
            self.insert_point(child, point_idx);
        }
    }

    fn subdivide(&mut self, node_idx: usize) {
        let bbox_min = self.nodes[node_idx].bbox_min;
        let bbox_max = self.nodes[node_idx].bbox_max;
        let depth = self.nodes[node_idx].depth + 1;

        for octant in 0..8 {
            let (cmin, cmax) = child_bbox(&bbox_min, &bbox_max, octant);
            let new_idx = self.nodes.len();
            self.nodes.push(OctreeNode::new(cmin, cmax, depth));
            self.nodes[node_idx].children[octant] = Some(new_idx);
        }
    }

    fn query_node(&self, node_idx: usize, min: &NVec3, max: &NVec3, out: &mut Vec<usize>) {
        let node = &self.nodes[node_idx];
        if !boxes_overlap(&node.bbox_min, &node.bbox_max, min, max) {
            return;
        }

        if node.is_leaf() {
            for &p in &node.points {
                let point = &self.points[p];
                if contains(min, max, &point.position) {
                    out.push(point.body);
                }
            }
            return;
        }

        for child in node.children.iter().flatten() {
            self.query_node(*child, min, max, out);
        }
    }
}

// helpers ===========================================================================

/// Cubic bounding box enclosing every point. A cube keeps octants uniform.
fn compute_global_bbox(points: &[Point]) -> (NVec3, NVec3) {
    let mut min = NVec3::repeat(f64::INFINITY);
    let mut max = NVec3::repeat(f64::NEG_INFINITY);

    for p in points {
        min = min.inf(&p.position);
        max = max.sup(&p.position);
    }

    let center = (min + max) * 0.5;
    let half = (max - min) * 0.5;
    let max_half = half.x.max(half.y).max(half.z);
    let half = NVec3::repeat(max_half);

    (center - half, center + half)
}

/// Octant of `p` in a node's box.
///
/// Bit 0 is x, bit 1 is y, bit 2 is z; a set bit means `>= center` on that axis.
fn child_index_for_point(p: &NVec3, bbox_min: &NVec3, bbox_max: &NVec3) -> usize {
    let center = (bbox_min + bbox_max) * 0.5;
    let mut idx = 0;

    if p.x >= center.x { idx |= 1; }
    if p.y >= center.y { idx |= 2; }
    if p.z >= center.z { idx |= 4; }

    idx
}

/// Box of octant `child_idx`, same bit encoding as `child_index_for_point`
fn child_bbox(parent_min: &NVec3, parent_max: &NVec3, child_idx: usize) -> (NVec3, NVec3) {
    let center = (parent_min + parent_max) * 0.5;

    let mut min = *parent_min;
    let mut max = *parent_max;

    for axis in 0..3 {
        if (child_idx >> axis) & 1 == 0 {
            max[axis] = center[axis];
        } else {
            min[axis] = center[axis];
        }
    }

    (min, max)
}

fn boxes_overlap(a_min: &NVec3, a_max: &NVec3, b_min: &NVec3, b_max: &NVec3) -> bool {
    (0..3).all(|axis| a_min[axis] <= b_max[axis] && b_min[axis] <= a_max[axis])
}

fn contains(min: &NVec3, max: &NVec3, p: &NVec3) -> bool {
    (0..3).all(|axis| min[axis] <= p[axis] && p[axis] <= max[axis])
}
