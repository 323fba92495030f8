//! Tree queries
//!
//! Every query is a recursive descent over the frozen node array. Boolean
//! queries stop at the first hit, left child before right. Nearest-hit
//! queries always visit both children since node order says nothing about
//! distance along the ray.

use crate::foundation::math::Vec3;
use crate::physics::collision::{
    aabb_overlap,
    ray_aabb_overlap,
    ray_triangle,
    sphere_triangle_overlap,
    sphere_triangle_sweep,
    triangle_triangle_overlap,
    Aabb,
    RayBBox,
    RaySegment,
    SphereShape,
    TraceHit,
};
use super::node::NodeKind;
use super::tree::MeshTree;

/// Shapes that can be tested against a [`MeshTree`] for any overlap
pub trait CollisionQuery {
    /// True if this shape touches any triangle of `tree`
    fn any_hit_in(&self, tree: &MeshTree<'_>) -> bool;
}

impl CollisionQuery for SphereShape {
    fn any_hit_in(&self, tree: &MeshTree<'_>) -> bool {
        tree.any_hit_sphere(self)
    }
}

impl CollisionQuery for RaySegment {
    fn any_hit_in(&self, tree: &MeshTree<'_>) -> bool {
        tree.any_hit_ray(self)
    }
}

impl CollisionQuery for MeshTree<'_> {
    fn any_hit_in(&self, tree: &MeshTree<'_>) -> bool {
        tree.any_hit_mesh(self)
    }
}

impl<'a> MeshTree<'a> {
    /// Any-hit test against a sphere, segment or other mesh
    pub fn any_hit<Q: CollisionQuery + ?Sized>(&self, query: &Q) -> bool {
        query.any_hit_in(self)
    }

    /// True if the sphere overlaps any triangle
    pub fn any_hit_sphere(&self, sphere: &SphereShape) -> bool {
        let bounds = sphere.aabb();
        self.root()
            .is_some_and(|root| self.sphere_any(root, sphere, &bounds))
    }

    fn sphere_any(&self, index: usize, sphere: &SphereShape, bounds: &Aabb) -> bool {
        let node = &self.nodes()[index];
        if !aabb_overlap(&node.aabb, bounds) {
            return false;
        }

        match node.kind() {
            NodeKind::Leaf(t) => {
                sphere_triangle_overlap(&sphere.center, sphere.radius, &self.triangle(t))
            }
            NodeKind::Internal(left, right) => {
                self.sphere_any(left, sphere, bounds) || self.sphere_any(right, sphere, bounds)
            }
        }
    }

    /// Every triangle the sphere overlaps, in left-to-right tree order
    pub fn all_hits(&self, sphere: &SphereShape) -> Vec<usize> {
        let mut results = Vec::new();
        if let Some(root) = self.root() {
            self.sphere_all(root, sphere, &sphere.aabb(), &mut results);
        }
        results
    }

    fn sphere_all(&self, index: usize, sphere: &SphereShape, bounds: &Aabb, results: &mut Vec<usize>) {
        let node = &self.nodes()[index];
        if !aabb_overlap(&node.aabb, bounds) {
            return;
        }

        match node.kind() {
            NodeKind::Leaf(t) => {
                if sphere_triangle_overlap(&sphere.center, sphere.radius, &self.triangle(t)) {
                    results.push(t);
                }
            }
            NodeKind::Internal(left, right) => {
                self.sphere_all(left, sphere, bounds, results);
                self.sphere_all(right, sphere, bounds, results);
            }
        }
    }

    /// Dual-tree overlap test against another mesh.
    ///
    /// Descends the node with the larger box volume first. Relies on
    /// [`triangle_triangle_overlap`], which is not implemented yet, so this
    /// currently always returns `false`.
    pub fn any_hit_mesh(&self, other: &MeshTree<'_>) -> bool {
        match (self.root(), other.root()) {
            (Some(a), Some(b)) => self.mesh_any(a, other, b),
            _ => false,
        }
    }

    fn mesh_any(&self, a: usize, other: &MeshTree<'_>, b: usize) -> bool {
        let node_a = &self.nodes()[a];
        let node_b = &other.nodes()[b];
        if !aabb_overlap(&node_a.aabb, &node_b.aabb) {
            return false;
        }

        match (node_a.kind(), node_b.kind()) {
            (NodeKind::Leaf(ta), NodeKind::Leaf(tb)) => {
                triangle_triangle_overlap(&self.triangle(ta), &other.triangle(tb))
            }
            (NodeKind::Internal(left, right), NodeKind::Leaf(_)) => {
                self.mesh_any(left, other, b) || self.mesh_any(right, other, b)
            }
            (NodeKind::Leaf(_), NodeKind::Internal(left, right)) => {
                self.mesh_any(a, other, left) || self.mesh_any(a, other, right)
            }
            (NodeKind::Internal(a_left, a_right), NodeKind::Internal(b_left, b_right)) => {
                if node_a.aabb.volume_metric() >= node_b.aabb.volume_metric() {
                    self.mesh_any(a_left, other, b) || self.mesh_any(a_right, other, b)
                } else {
                    self.mesh_any(a, other, b_left) || self.mesh_any(a, other, b_right)
                }
            }
        }
    }

    /// True if the segment crosses any triangle
    pub fn any_hit_ray(&self, ray: &RaySegment) -> bool {
        let bbox = ray.bbox();
        self.root()
            .is_some_and(|root| self.ray_any(root, ray, &bbox))
    }

    fn ray_any(&self, index: usize, ray: &RaySegment, bbox: &RayBBox) -> bool {
        let node = &self.nodes()[index];
        if !ray_aabb_overlap(bbox, &node.aabb) {
            return false;
        }

        match node.kind() {
            NodeKind::Leaf(t) => ray_triangle(&ray.start, &ray.end, &self.triangle(t)).is_some(),
            NodeKind::Internal(left, right) => {
                self.ray_any(left, ray, bbox) || self.ray_any(right, ray, bbox)
            }
        }
    }

    /// Nearest triangle along the segment.
    ///
    /// Returns [`TraceHit::MISS`] when nothing is crossed. Callers casting
    /// long rays should split them first, see [`super::raycast`].
    pub fn first_hit(&self, ray: &RaySegment) -> TraceHit {
        let mut best = TraceHit::MISS;
        if let Some(root) = self.root() {
            self.ray_first(root, ray, &ray.bbox(), &mut best);
        }
        best
    }

    fn ray_first(&self, index: usize, ray: &RaySegment, bbox: &RayBBox, best: &mut TraceHit) {
        let node = &self.nodes()[index];
        if !ray_aabb_overlap(bbox, &node.aabb) {
            return;
        }

        match node.kind() {
            NodeKind::Leaf(t) => {
                if let Some(hit) = ray_triangle(&ray.start, &ray.end, &self.triangle(t)) {
                    if hit.t < best.fraction {
                        *best = TraceHit {
                            fraction: hit.t,
                            triangle: t,
                            b: hit.u,
                            c: hit.v,
                        };
                    }
                }
            }
            NodeKind::Internal(left, right) => {
                self.ray_first(left, ray, bbox, best);
                self.ray_first(right, ray, bbox, best);
            }
        }
    }

    /// Sweep `sphere` from its center to `target`.
    ///
    /// The result's `fraction` is the earliest time of impact over all
    /// triangles, `1.0` if the path is clear. Barycentrics are left at zero.
    pub fn sweep(&self, sphere: &SphereShape, target: &Vec3) -> TraceHit {
        let mut best = TraceHit::MISS;
        if let Some(root) = self.root() {
            let bbox = RayBBox::new(sphere.center, *target);
            self.sweep_node(root, sphere, target, &bbox, &mut best);
        }
        best
    }

    fn sweep_node(
        &self,
        index: usize,
        sphere: &SphereShape,
        target: &Vec3,
        bbox: &RayBBox,
        best: &mut TraceHit,
    ) {
        let node = &self.nodes()[index];
        if !ray_aabb_overlap(bbox, &node.aabb.expanded(sphere.radius)) {
            return;
        }

        match node.kind() {
            NodeKind::Leaf(t) => {
                let toi = sphere_triangle_sweep(&sphere.center, target, sphere.radius, &self.triangle(t));
                if toi < best.fraction {
                    *best = TraceHit {
                        fraction: toi,
                        triangle: t,
                        b: 0.0,
                        c: 0.0,
                    };
                }
            }
            NodeKind::Internal(left, right) => {
                self.sweep_node(left, sphere, target, bbox, best);
                self.sweep_node(right, sphere, target, bbox, best);
            }
        }
    }
}
