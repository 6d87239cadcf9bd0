//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree over scene elements, stored as a flat arena of nodes that
//! reference their children and elements by index. Leaves hold exactly one
//! element; every internal node has exactly two children.
//!
//! Construction splits the leaf set at the center of the box around the leaf
//! midpoints, along its longest axis. Traversal is front-to-back: the nearer
//! child is visited first and the farther one only when its box starts before
//! the best hit found so far.

use std::fmt;

use glint_math::{Aabb, Interval, Ray, Vec3};

use crate::Element;

/// Leaf boxes are grown by this much (relative to their magnitude) so that
/// rounding in the element transform never lets a hit escape its box.
const LEAF_PADDING: f32 = 1e-4;

/// Closest intersection found by a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Index of the element in the scene's element list
    pub index: usize,
    /// World-space distance along the ray
    pub t: f32,
    /// World-space unit normal
    pub normal: Vec3,
}

#[derive(Debug, Clone, Copy)]
enum BvhNode {
    Leaf { element: usize, bounds: Aabb },
    Branch { bounds: Aabb, children: [usize; 2] },
}

impl BvhNode {
    fn bounds(&self) -> Aabb {
        match self {
            BvhNode::Leaf { bounds, .. } | BvhNode::Branch { bounds, .. } => *bounds,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct LeafInfo {
    element: usize,
    bounds: Aabb,
    midpoint: Vec3,
}

/// BVH over a slice of elements.
///
/// The tree stores element indices only; pass the same slice it was built
/// from to [`Bvh::trace`].
#[derive(Debug, Clone, Default)]
pub struct Bvh {
    nodes: Vec<BvhNode>,
    root: Option<usize>,
}

impl Bvh {
    /// Build the tree over all elements with valid world bounds.
    pub fn build(elements: &[Element]) -> Self {
        let leaves: Vec<LeafInfo> = elements
            .iter()
            .enumerate()
            .filter_map(|(element, e)| {
                let bounds = e.world_bounds();
                if !bounds.is_valid() {
                    log::warn!("Element {} has no valid bounds, left out of the BVH", element);
                    return None;
                }
                Some(LeafInfo {
                    element,
                    bounds: pad(bounds),
                    midpoint: bounds.center(),
                })
            })
            .collect();

        let mut bvh = Bvh {
            nodes: Vec::with_capacity(leaves.len() * 2),
            root: None,
        };
        bvh.root = bvh.build_recursive(leaves);

        log::debug!(
            "BVH built: {} nodes, {} leaves, depth {}",
            bvh.node_count(),
            bvh.leaf_count(),
            bvh.depth()
        );
        bvh
    }

    fn build_recursive(&mut self, mut leaves: Vec<LeafInfo>) -> Option<usize> {
        match leaves.len() {
            0 => None,
            1 => Some(self.push_leaf(&leaves[0])),
            2 => {
                let a = self.push_leaf(&leaves[0]);
                let b = self.push_leaf(&leaves[1]);
                Some(self.push_branch(a, b))
            }
            _ => {
                let mut midpoints = Aabb::INVALID;
                for leaf in &leaves {
                    midpoints.expand_to_point(leaf.midpoint);
                }
                let axis = midpoints.largest_axis();
                let pivot = midpoints.center_axis(axis);

                let mut left = Vec::with_capacity(leaves.len() / 2 + 1);
                let mut right = Vec::with_capacity(leaves.len() / 2 + 1);
                for leaf in leaves.drain(..) {
                    let m = leaf.midpoint[axis];
                    if m < pivot {
                        left.push(leaf);
                    } else if m > pivot {
                        right.push(leaf);
                    } else if left.len() <= right.len() {
                        left.push(leaf);
                    } else {
                        right.push(leaf);
                    }
                }

                // Rounding can put every midpoint on one side; halve instead.
                if left.is_empty() || right.is_empty() {
                    let mut all = if left.is_empty() { right } else { left };
                    right = all.split_off(all.len() / 2);
                    left = all;
                }

                let l = self.build_recursive(left);
                let r = self.build_recursive(right);
                match (l, r) {
                    (Some(l), Some(r)) => Some(self.push_branch(l, r)),
                    (Some(n), None) | (None, Some(n)) => Some(n),
                    (None, None) => None,
                }
            }
        }
    }

    fn push_leaf(&mut self, leaf: &LeafInfo) -> usize {
        self.nodes.push(BvhNode::Leaf {
            element: leaf.element,
            bounds: leaf.bounds,
        });
        self.nodes.len() - 1
    }

    fn push_branch(&mut self, a: usize, b: usize) -> usize {
        let bounds = Aabb::surrounding(&self.nodes[a].bounds(), &self.nodes[b].bounds());
        self.nodes.push(BvhNode::Branch {
            bounds,
            children: [a, b],
        });
        self.nodes.len() - 1
    }

    /// Find the nearest hit with `t` in `ray_t` (strictly below `ray_t.max`).
    ///
    /// With `shortcircuit` set the first hit found is returned, which is all
    /// an occlusion test needs.
    pub fn trace(
        &self,
        ray: &Ray,
        shortcircuit: bool,
        ray_t: Interval,
        elements: &[Element],
    ) -> Option<Hit> {
        let root = self.root?;
        let mut best = None;
        self.trace_node(root, ray, shortcircuit, ray_t, elements, &mut best);
        best
    }

    fn trace_node(
        &self,
        node: usize,
        ray: &Ray,
        shortcircuit: bool,
        ray_t: Interval,
        elements: &[Element],
        best: &mut Option<Hit>,
    ) {
        let t_best = best.map_or(ray_t.max, |hit| hit.t);

        match self.nodes[node] {
            BvhNode::Leaf { element, .. } => {
                if let Some(hit) = elements[element].intersects(ray, ray_t.with_max(t_best)) {
                    if hit.t < t_best {
                        *best = Some(Hit {
                            index: element,
                            t: hit.t,
                            normal: hit.normal,
                        });
                    }
                }
            }
            BvhNode::Branch { children, .. } => {
                let range = ray_t.with_max(t_best);
                let mut candidates: [Option<(usize, f32)>; 2] = [None; 2];
                for (slot, &child) in candidates.iter_mut().zip(&children) {
                    *slot = self.nodes[child]
                        .bounds()
                        .intersects(ray, range)
                        .filter(|hit| hit.t < t_best)
                        .map(|hit| (child, hit.t));
                }

                // nearer entry first
                if let [Some(a), Some(b)] = candidates {
                    if b.1 < a.1 {
                        candidates.swap(0, 1);
                    }
                }

                for (child, entry) in candidates.into_iter().flatten() {
                    if shortcircuit && best.is_some() {
                        return;
                    }
                    let t_best = best.map_or(ray_t.max, |hit| hit.t);
                    if entry < t_best {
                        self.trace_node(child, ray, shortcircuit, ray_t, elements, best);
                    }
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, BvhNode::Leaf { .. }))
            .count()
    }

    /// Number of levels (0 for an empty tree, 1 for a single leaf).
    pub fn depth(&self) -> usize {
        self.root.map_or(0, |root| self.depth_of(root))
    }

    fn depth_of(&self, node: usize) -> usize {
        match self.nodes[node] {
            BvhNode::Leaf { .. } => 1,
            BvhNode::Branch { children, .. } => {
                1 + self.depth_of(children[0]).max(self.depth_of(children[1]))
            }
        }
    }

    /// Bounds of the whole tree, or [`Aabb::INVALID`] if empty.
    pub fn bounds(&self) -> Aabb {
        self.root.map_or(Aabb::INVALID, |root| self.nodes[root].bounds())
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, node: usize, indent: usize) -> fmt::Result {
        let pad = "  ".repeat(indent);
        match self.nodes[node] {
            BvhNode::Leaf { element, bounds } => {
                writeln!(f, "{pad}leaf {element} [{} .. {}]", bounds.min, bounds.max)
            }
            BvhNode::Branch { bounds, children } => {
                writeln!(f, "{pad}node [{} .. {}]", bounds.min, bounds.max)?;
                self.fmt_node(f, children[0], indent + 1)?;
                self.fmt_node(f, children[1], indent + 1)
            }
        }
    }
}

impl fmt::Display for Bvh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => self.fmt_node(f, root, 0),
            None => writeln!(f, "empty"),
        }
    }
}

fn pad(bounds: Aabb) -> Aabb {
    let magnitude = bounds.min.abs().max(bounds.max.abs()).max_element();
    bounds.padded(LEAF_PADDING * magnitude.max(1.0))
}
