//! Sphere-triangle tests
//!
//! [`sphere_triangle_overlap`] is the static separating-axis test from
//! Ericson ("Real-Time Collision Detection", sphere-triangle SAT).
//! [`sphere_triangle_sweep`] finds the earliest time of impact of a moving
//! sphere against a static triangle by testing the face, then the edges,
//! then the vertices of the Minkowski sum.

use crate::foundation::math::{constants::EPSILON, Vec2, Vec3};
use super::primitives::Triangle;

/// Squared relative slack on the separating tests, so that a point computed
/// on a tilted triangle still counts as touching it.
const OVERLAP_SLACK: f32 = 1.0e-10;

/// Static sphere-triangle overlap.
///
/// The shapes overlap unless one of seven axes separates them: the
/// triangle plane, one per vertex and one per edge. Everything is computed
/// relative to the sphere center. The squared radius is widened by a slack
/// proportional to the squared coordinate scale, which absorbs rounding in
/// points that lie exactly on the surface.
pub fn sphere_triangle_overlap(center: &Vec3, radius: f32, triangle: &Triangle) -> bool {
    let a = triangle.v0 - center;
    let b = triangle.v1 - center;
    let c = triangle.v2 - center;

    let aa = a.dot(&a);
    let bb = b.dot(&b);
    let cc = c.dot(&c);
    let scale = aa.max(bb).max(cc).max(center.dot(center));
    let rr = radius * radius + OVERLAP_SLACK * scale;

    // Plane
    let v = (b - a).cross(&(c - a));
    let d = a.dot(&v);
    let e = v.dot(&v);
    let sep_plane = d * d > rr * e;

    // Vertices
    let ab = a.dot(&b);
    let ac = a.dot(&c);
    let bc = b.dot(&c);
    let sep_a = aa > rr && ab > aa && ac > aa;
    let sep_b = bb > rr && ab > bb && bc > bb;
    let sep_c = cc > rr && ac > cc && bc > cc;

    // Edges
    let edge_ab = b - a;
    let edge_bc = c - b;
    let edge_ca = a - c;
    let d1 = ab - aa;
    let d2 = bc - bb;
    let d3 = ac - cc;
    let e1 = edge_ab.dot(&edge_ab);
    let e2 = edge_bc.dot(&edge_bc);
    let e3 = edge_ca.dot(&edge_ca);
    let q1 = a * e1 - edge_ab * d1;
    let q2 = b * e2 - edge_bc * d2;
    let q3 = c * e3 - edge_ca * d3;
    let qc = c * e1 - q1;
    let qa = a * e2 - q2;
    let qb = b * e3 - q3;
    let sep_ab = q1.dot(&q1) > rr * e1 * e1 && q1.dot(&qc) > 0.0;
    let sep_bc = q2.dot(&q2) > rr * e2 * e2 && q2.dot(&qa) > 0.0;
    let sep_ca = q3.dot(&q3) > rr * e3 * e3 && q3.dot(&qb) > 0.0;

    !(sep_plane || sep_a || sep_b || sep_c || sep_ab || sep_bc || sep_ca)
}

/// Earliest time of impact of a sphere of `radius` moving from `start` to
/// `end` against a static triangle.
///
/// Returns a time in `[0, 1]`, or `1.0` for no contact. The face is tried
/// first, then the three edges, then the three vertices; the first phase
/// that produces a contact decides the result. A sphere that already touches
/// the triangle at `start` reports `0.0`.
pub fn sphere_triangle_sweep(start: &Vec3, end: &Vec3, radius: f32, triangle: &Triangle) -> f32 {
    let delta = end - start;

    if let Some(normal) = triangle.normal() {
        let d0 = normal.dot(&(start - triangle.v0));
        let d1 = normal.dot(&(end - triangle.v0));

        // Never comes within reach of the plane
        if (d0 > radius && d1 > radius) || (d0 < -radius && d1 < -radius) {
            return 1.0;
        }

        let (t, contact) = if d0.abs() <= radius {
            (0.0, start - normal * d0)
        } else {
            let side = d0.signum();
            let t = (d0 - side * radius) / (d0 - d1);
            (t, start + delta * t - normal * (side * radius))
        };

        if point_in_triangle(&contact, triangle) {
            return t;
        }
    }

    let edges = [
        (triangle.v0, triangle.v1),
        (triangle.v1, triangle.v2),
        (triangle.v2, triangle.v0),
    ];
    for (p0, p1) in &edges {
        if let Some(t) = sweep_edge(start, &delta, radius, p0, p1) {
            return t;
        }
    }

    for vertex in [triangle.v0, triangle.v1, triangle.v2] {
        if let Some(t) = sweep_vertex(start, &delta, radius, &vertex) {
            return t;
        }
    }

    1.0
}

/// Time at which the moving sphere first touches the segment `p0 -> p1`
fn sweep_edge(start: &Vec3, delta: &Vec3, radius: f32, p0: &Vec3, p1: &Vec3) -> Option<f32> {
    let edge = p1 - p0;
    let m = start - p0;

    let ee = edge.dot(&edge);
    if ee == 0.0 {
        return None;
    }
    let ed = edge.dot(delta);
    let em = edge.dot(&m);
    let dd = delta.dot(delta);

    // |m + t*delta|^2 minus its projection on the edge, equal to r^2
    let a = ee * dd - ed * ed;
    let b = 2.0 * (ee * m.dot(delta) - ed * em);
    let c = ee * (m.dot(&m) - radius * radius) - em * em;

    let t = if c <= 0.0 {
        0.0
    } else if a <= EPSILON * ee * dd {
        // Moving parallel to the edge line; never reaches it
        return None;
    } else {
        smallest_root_in_unit(a, b, c)?
    };

    let s = (em + t * ed) / ee;
    (0.0..=1.0).contains(&s).then_some(t)
}

/// Time at which the moving sphere first touches `vertex`
fn sweep_vertex(start: &Vec3, delta: &Vec3, radius: f32, vertex: &Vec3) -> Option<f32> {
    let m = start - vertex;
    let c = m.dot(&m) - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }

    // Stationary
    let a = delta.dot(delta);
    if a == 0.0 {
        return None;
    }
    let b = 2.0 * m.dot(delta);
    smallest_root_in_unit(a, b, c)
}

/// Smaller root of `a*t^2 + b*t + c` that lies in `[0, 1]`, `a > 0`.
///
/// Uses the cancellation-free form: `q = -(b + sign(b) * sqrt(disc)) / 2`,
/// roots `q / a` and `c / q`.
fn smallest_root_in_unit(a: f32, b: f32, c: f32) -> Option<f32> {
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }

    let q = -0.5 * (b + disc.sqrt().copysign(b));
    let (r0, r1) = if q == 0.0 {
        (0.0, 0.0)
    } else {
        let x0 = q / a;
        let x1 = c / q;
        (x0.min(x1), x0.max(x1))
    };

    [r0, r1].into_iter().find(|t| (0.0..=1.0).contains(t))
}

/// Whether a point on the triangle plane lies inside the triangle.
///
/// The point is expressed in the triangle's `(edge1, edge2)` parametric
/// basis and tested against the unit right triangle by crossing number.
fn point_in_triangle(point: &Vec3, triangle: &Triangle) -> bool {
    let e1 = triangle.v1 - triangle.v0;
    let e2 = triangle.v2 - triangle.v0;
    let w = point - triangle.v0;

    let d00 = e1.dot(&e1);
    let d01 = e1.dot(&e2);
    let d11 = e2.dot(&e2);
    let d20 = w.dot(&e1);
    let d21 = w.dot(&e2);
    let denom = d00 * d11 - d01 * d01;
    if denom <= EPSILON * d00 * d11 {
        return false;
    }

    let uv = Vec2::new(
        (d11 * d20 - d01 * d21) / denom,
        (d00 * d21 - d01 * d20) / denom,
    );
    let polygon = [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];
    crossing_number(&uv, &polygon)
}

/// Even-odd crossing test of a point against a closed polygon
fn crossing_number(point: &Vec2, polygon: &[Vec2]) -> bool {
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let pi = &polygon[i];
        let pj = &polygon[j];
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_zero_radius_on_surface_overlaps() {
        let tri = unit_triangle();
        assert!(sphere_triangle_overlap(&Vec3::new(0.25, 0.25, 0.0), 0.0, &tri));
        assert!(sphere_triangle_overlap(&Vec3::new(0.5, 0.25, 0.0), 0.0, &tri));
    }

    #[test]
    fn test_zero_radius_on_tilted_surface_overlaps() {
        for k in 0..200 {
            let f = k as f32;
            let origin = Vec3::new((f * 0.37).sin() * 8.0, (f * 0.91).cos() * 8.0, (f * 1.3).sin() * 8.0);
            let tri = Triangle::new(
                origin,
                origin + Vec3::new(1.0 + (f * 0.7).sin().abs(), 0.3 * (f * 1.1).sin(), 0.7 * (f * 0.5).cos()),
                origin + Vec3::new(0.2 * (f * 2.3).cos(), 1.0 + (f * 0.2).cos().abs(), 0.9 * (f * 1.9).sin()),
            );
            let normal = tri.normal().unwrap();

            let on_surface = tri.point_from_barycentric(0.3, 0.3);
            assert!(sphere_triangle_overlap(&on_surface, 0.0, &tri), "triangle {k}");

            let lifted = on_surface + normal * 0.05;
            assert!(!sphere_triangle_overlap(&lifted, 0.0, &tri), "triangle {k}");
            assert!(sphere_triangle_overlap(&lifted, 0.06, &tri), "triangle {k}");
        }
    }

    #[test]
    fn test_overlap_each_feature() {
        let tri = unit_triangle();
        // Face
        assert!(sphere_triangle_overlap(&Vec3::new(0.2, 0.2, 0.4), 0.5, &tri));
        assert!(!sphere_triangle_overlap(&Vec3::new(0.2, 0.2, 0.6), 0.5, &tri));
        // Vertex
        assert!(sphere_triangle_overlap(&Vec3::new(-0.3, -0.3, 0.0), 0.5, &tri));
        assert!(!sphere_triangle_overlap(&Vec3::new(-0.4, -0.4, 0.0), 0.5, &tri));
        // Edge
        assert!(sphere_triangle_overlap(&Vec3::new(0.5, -0.4, 0.0), 0.5, &tri));
        assert!(!sphere_triangle_overlap(&Vec3::new(0.5, -0.6, 0.0), 0.5, &tri));
        // Hypotenuse edge
        assert!(sphere_triangle_overlap(&Vec3::new(0.8, 0.8, 0.0), 0.5, &tri));
        assert!(!sphere_triangle_overlap(&Vec3::new(1.0, 1.0, 0.0), 0.5, &tri));
    }

    #[test]
    fn test_far_sphere_does_not_overlap() {
        let tri = unit_triangle();
        // Circumradius of the unit right triangle is sqrt(2)/2
        let far = 0.5_f32.sqrt() + 1.0 + 0.5;
        assert!(!sphere_triangle_overlap(&Vec3::new(far, far, far), 1.0, &tri));
    }

    #[test]
    fn test_sweep_face_hit() {
        let t = sphere_triangle_sweep(
            &Vec3::new(0.25, 0.25, 2.0),
            &Vec3::new(0.25, 0.25, -2.0),
            0.5,
            &unit_triangle(),
        );
        assert_relative_eq!(t, 0.375, epsilon = 1e-5);
    }

    #[test]
    fn test_sweep_from_below_hits_back_face() {
        let t = sphere_triangle_sweep(
            &Vec3::new(0.25, 0.25, -2.0),
            &Vec3::new(0.25, 0.25, 2.0),
            0.5,
            &unit_triangle(),
        );
        assert_relative_eq!(t, 0.375, epsilon = 1e-5);
    }

    #[test]
    fn test_sweep_edge_hit() {
        let t = sphere_triangle_sweep(
            &Vec3::new(0.5, -0.3, 2.0),
            &Vec3::new(0.5, -0.3, -2.0),
            0.5,
            &unit_triangle(),
        );
        assert_relative_eq!(t, 0.4, epsilon = 1e-5);
    }

    #[test]
    fn test_sweep_vertex_hit() {
        let t = sphere_triangle_sweep(
            &Vec3::new(3.0, 0.0, 0.0),
            &Vec3::new(1.0, 0.0, 0.0),
            0.5,
            &unit_triangle(),
        );
        assert_relative_eq!(t, 0.75, epsilon = 1e-5);
    }

    #[test]
    fn test_short_sweep_reaches_vertex() {
        // Touches (1, 0, 0) halfway through a 2e-4 long move
        let t = sphere_triangle_sweep(
            &Vec3::new(1.5001, 0.0, 0.0),
            &Vec3::new(1.4999, 0.0, 0.0),
            0.5,
            &unit_triangle(),
        );
        assert_relative_eq!(t, 0.5, epsilon = 1e-3);
    }

    #[test]
    fn test_sweep_face_hit_on_small_triangle() {
        let tri = Triangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.01, 0.0, 0.0),
            Vec3::new(0.0, 0.01, 0.0),
        );
        let t = sphere_triangle_sweep(
            &Vec3::new(0.0025, 0.0025, 0.01),
            &Vec3::new(0.0025, 0.0025, -0.01),
            0.001,
            &tri,
        );
        assert_relative_eq!(t, 0.45, epsilon = 1e-4);
    }

    #[test]
    fn test_sweep_already_overlapping_is_zero() {
        let t = sphere_triangle_sweep(
            &Vec3::new(0.2, 0.2, 0.1),
            &Vec3::new(5.0, 5.0, 5.0),
            0.5,
            &unit_triangle(),
        );
        assert_relative_eq!(t, 0.0);
    }

    #[test]
    fn test_sweep_misses() {
        let tri = unit_triangle();
        // Stays above the plane
        assert_eq!(
            sphere_triangle_sweep(&Vec3::new(0.0, 0.0, 3.0), &Vec3::new(1.0, 1.0, 2.0), 0.5, &tri),
            1.0
        );
        // Crosses the plane well outside the triangle
        assert_eq!(
            sphere_triangle_sweep(&Vec3::new(5.0, 5.0, 2.0), &Vec3::new(5.0, 5.0, -2.0), 0.5, &tri),
            1.0
        );
    }

    #[test]
    fn test_quadratic_root_selection() {
        // (t - 0.25)(t - 0.75)
        assert_relative_eq!(smallest_root_in_unit(1.0, -1.0, 0.1875).unwrap(), 0.25);
        // Both roots negative
        assert!(smallest_root_in_unit(1.0, 3.0, 2.0).is_none());
        // Complex roots
        assert!(smallest_root_in_unit(1.0, 0.0, 1.0).is_none());
    }

    #[test]
    fn test_crossing_number() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        assert!(crossing_number(&Vec2::new(0.5, 0.5), &square));
        assert!(!crossing_number(&Vec2::new(1.5, 0.5), &square));
    }
}
