use crate::{Ray, Vec3};

/// Direction components smaller than this are treated as parallel to a slab.
const PARALLEL_EPSILON: f32 = 1e-8;

/// How one bounding box relates to another. (Inspired by XNA.)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ContainmentType {
    /// The boxes share no volume.
    Disjoint,
    /// The other box lies entirely inside this one.
    Contains,
    /// The boxes overlap without full containment.
    Intersects,
}

/// Axis-aligned bounding box used by geometry and the octree.
///
/// Invariant: `min <= max` component-wise for any non-empty box. `EMPTY`
/// is the identity for [`BoundingBox::surrounding`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Create a bounding box from two corners, ordering them component-wise.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create the smallest bounding box enclosing all `points`.
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        points.into_iter().fold(Self::EMPTY, |acc, p| Self {
            min: acc.min.min(p),
            max: acc.max.max(p),
        })
    }

    /// Create a bounding box that surrounds two other boxes.
    pub fn surrounding(box0: &BoundingBox, box1: &BoundingBox) -> Self {
        Self {
            min: box0.min.min(box1.min),
            max: box0.max.max(box1.max),
        }
    }

    /// Returns true if this box contains no volume at all (min > max on some axis).
    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    /// Returns the center point of the bounding box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Returns the extent of the box along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Grow the box by `delta / 2` on every side.
    pub fn expand(&self, delta: f32) -> Self {
        let padding = Vec3::splat(delta * 0.5);
        Self {
            min: self.min - padding,
            max: self.max + padding,
        }
    }

    /// Returns the `index`-th of the eight boxes obtained by splitting at the center.
    ///
    /// Bit 0 of `index` selects the upper half on X, bit 1 on Y, bit 2 on Z.
    pub fn octant(&self, index: usize) -> Self {
        let center = self.center();
        let pick = |bit: usize, lo: f32, mid: f32, hi: f32| {
            if index & bit == 0 {
                (lo, mid)
            } else {
                (mid, hi)
            }
        };
        let (x0, x1) = pick(1, self.min.x, center.x, self.max.x);
        let (y0, y1) = pick(2, self.min.y, center.y, self.max.y);
        let (z0, z1) = pick(4, self.min.z, center.z, self.max.z);
        Self {
            min: Vec3::new(x0, y0, z0),
            max: Vec3::new(x1, y1, z1),
        }
    }

    /// Classify how `other` relates to this box by comparing corners axis-wise.
    pub fn contains(&self, other: &BoundingBox) -> ContainmentType {
        if other.max.cmplt(self.min).any() || other.min.cmpgt(self.max).any() {
            return ContainmentType::Disjoint;
        }
        if other.min.cmpge(self.min).all() && other.max.cmple(self.max).all() {
            return ContainmentType::Contains;
        }
        ContainmentType::Intersects
    }

    /// Test if a ray intersects this box.
    ///
    /// Uses the slab method, keeping a running `[t_near, t_far]` interval.
    /// Returns the entry distance, or 0 when the origin is inside the box.
    pub fn intersects(&self, ray: &Ray) -> Option<f32> {
        if ray.is_degenerate() || self.is_empty() {
            return None;
        }

        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if dir.abs() < PARALLEL_EPSILON {
                // Parallel to this slab: only a hit if we start inside it
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let mut t0 = (lo - origin) * inv;
            let mut t1 = (hi - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far || t_far < 0.0 {
                return None;
            }
        }

        Some(t_near.max(0.0))
    }

    /// An empty box (contains nothing).
    pub const EMPTY: BoundingBox = BoundingBox {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };
}
