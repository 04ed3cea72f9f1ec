//! Octree acceleration structure.
//!
//! Nodes live in a flat arena and address their children by index. Leaves
//! store indices into the scene's geometry list, which the octree does not
//! own. An object straddling an octant boundary is referenced from every
//! octant it overlaps, so leaves may share objects.

use std::ops::ControlFlow;

use crate::{Geometry, Hittable, ShadePoint, HIT_EPSILON};
use rex_math::{BoundingBox, ContainmentType, Interval, Ray};

/// Maximum objects per node before splitting.
pub const SPLIT_THRESHOLD: usize = 8;

/// Maximum subdivision depth (root is depth 0).
pub const MAX_DEPTH: u32 = 8;

/// Each level pops one node and pushes at most eight children.
const STACK_SIZE: usize = 8 * (MAX_DEPTH as usize + 1);

const ROOT: usize = 0;

#[derive(Debug, Clone)]
enum NodeContent {
    /// Internal node with up to eight non-empty octants.
    Branch { children: Vec<usize> },
    /// Leaf node referencing scene geometry.
    Leaf { objects: Vec<usize> },
}

#[derive(Debug, Clone)]
struct OctreeNode {
    bounds: BoundingBox,
    content: NodeContent,
}

/// Spatial index answering nearest-hit and any-hit ray queries.
#[derive(Debug, Clone, Default)]
pub struct Octree {
    nodes: Vec<OctreeNode>,
    max_depth: u32,
}

impl Octree {
    /// Build an octree over `geometry`.
    ///
    /// Degenerate shapes can never be hit and are left out of the tree.
    pub fn build(geometry: &[Geometry]) -> Self {
        let objects: Vec<usize> = geometry
            .iter()
            .enumerate()
            .filter(|(_, g)| !g.is_degenerate())
            .map(|(i, _)| i)
            .collect();

        let mut tree = Self::default();
        if objects.is_empty() {
            return tree;
        }

        let bounds = objects.iter().fold(BoundingBox::EMPTY, |acc, &i| {
            BoundingBox::surrounding(&acc, &geometry[i].bounding_box())
        });

        tree.build_node(geometry, bounds, objects, 0);
        tree
    }

    /// Recursive construction; returns the arena index of the new node.
    fn build_node(
        &mut self,
        geometry: &[Geometry],
        bounds: BoundingBox,
        objects: Vec<usize>,
        depth: u32,
    ) -> usize {
        let index = self.nodes.len();
        self.max_depth = self.max_depth.max(depth);
        self.nodes.push(OctreeNode {
            bounds,
            content: NodeContent::Leaf {
                objects: Vec::new(),
            },
        });

        if objects.len() <= SPLIT_THRESHOLD || depth >= MAX_DEPTH {
            self.nodes[index].content = NodeContent::Leaf { objects };
            return index;
        }

        let octants: Vec<(BoundingBox, Vec<usize>)> = (0..8)
            .map(|i| {
                let octant = bounds.octant(i);
                let members: Vec<usize> = objects
                    .iter()
                    .copied()
                    .filter(|&o| {
                        octant.contains(&geometry[o].bounding_box()) != ContainmentType::Disjoint
                    })
                    .collect();
                (octant, members)
            })
            .filter(|(_, members)| !members.is_empty())
            .collect();

        // Every octant would get every object: splitting separates nothing
        if octants.len() > 1 && octants.iter().all(|(_, m)| m.len() == objects.len()) {
            log::debug!(
                "Octree node at depth {} keeps {} overlapping objects unsplit",
                depth,
                objects.len()
            );
            self.nodes[index].content = NodeContent::Leaf { objects };
            return index;
        }

        log::debug!(
            "Octree node at depth {} splits {} objects into {} octants",
            depth,
            objects.len(),
            octants.len()
        );

        let children = octants
            .into_iter()
            .map(|(octant, members)| self.build_node(geometry, octant, members, depth + 1))
            .collect();
        self.nodes[index].content = NodeContent::Branch { children };

        index
    }

    /// Find the nearest object hit by `ray`.
    ///
    /// Children are not visited nearest-first, so the whole set of nodes the
    /// ray passes through may be searched. Returns a shade point with
    /// `has_hit == false` when nothing is hit.
    pub fn intersect(&self, ray: &Ray, geometry: &[Geometry]) -> ShadePoint {
        let mut sp = ShadePoint::miss(ray);
        let mut ray_t = Interval::from_min(HIT_EPSILON);

        self.walk(ray, ray_t.max, |objects| {
            for &object in objects {
                // Open upper bound: a duplicate at the same distance never replaces the hit
                if geometry[object].hit(ray, ray_t, &mut sp) {
                    ray_t = ray_t.with_max(sp.t);
                    sp.geometry = Some(object);
                }
            }
            ControlFlow::Continue(ray_t.max)
        });

        sp
    }

    /// Returns true if anything blocks `ray` closer than `max_distance`.
    pub fn occluded(&self, ray: &Ray, max_distance: f32, geometry: &[Geometry]) -> bool {
        let mut scratch = ShadePoint::miss(ray);
        let ray_t = Interval::new(HIT_EPSILON, max_distance);
        let mut blocked = false;

        self.walk(ray, max_distance, |objects| {
            if objects
                .iter()
                .any(|&object| geometry[object].hit(ray, ray_t, &mut scratch))
            {
                blocked = true;
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(max_distance)
            }
        });

        blocked
    }

    /// Depth-first traversal over every leaf whose box `ray` enters before `limit`.
    ///
    /// `visit_leaf` returns the (possibly tightened) distance limit, or breaks
    /// to stop the walk.
    fn walk<F>(&self, ray: &Ray, mut limit: f32, mut visit_leaf: F)
    where
        F: FnMut(&[usize]) -> ControlFlow<(), f32>,
    {
        if self.nodes.is_empty() || ray.is_degenerate() {
            return;
        }

        let mut stack = [0usize; STACK_SIZE];
        let mut len = 1;
        stack[0] = ROOT;

        while len > 0 {
            len -= 1;
            let node = &self.nodes[stack[len]];

            match node.bounds.intersects(ray) {
                Some(entry) if entry <= limit => {}
                _ => continue,
            }

            match &node.content {
                NodeContent::Branch { children } => {
                    for &child in children {
                        stack[len] = child;
                        len += 1;
                    }
                }
                NodeContent::Leaf { objects } => match visit_leaf(objects) {
                    ControlFlow::Continue(new_limit) => limit = new_limit,
                    ControlFlow::Break(()) => return,
                },
            }
        }
    }

    /// Returns true if the tree indexes no geometry.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bounding box of the root node.
    pub fn bounds(&self) -> BoundingBox {
        self.nodes
            .first()
            .map_or(BoundingBox::EMPTY, |root| root.bounds)
    }

    /// Total number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaf nodes.
    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n.content, NodeContent::Leaf { .. }))
            .count()
    }

    /// Deepest level created during the build.
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Objects referenced by the leaf nodes, counting duplicates.
    pub fn reference_count(&self) -> usize {
        self.nodes
            .iter()
            .map(|n| match &n.content {
                NodeContent::Leaf { objects } => objects.len(),
                NodeContent::Branch { .. } => 0,
            })
            .sum()
    }
}
