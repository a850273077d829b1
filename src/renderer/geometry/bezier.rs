//! Cubic bezier-triangle surface patch.
//!
//! A triangular Bézier patch of degree 3 has ten control points indexed by
//! barycentric exponents `(i, j, k)` with `i + j + k = 3`. Evaluation uses
//! de Casteljau reduction: three rounds of barycentric interpolation
//! collapse the control net to a single surface point.

use glam::Vec3;

use super::Vertex;

/// Flat index of control/net point `(i, j)` for a triangular net of
/// degree `d` (the third exponent is implied: `k = d - i - j`). Points are
/// laid out row-major in `i`, then `j`.
fn net_index(d: usize, i: usize, j: usize) -> usize {
    i * (2 * (d + 1) - i + 1) / 2 + j
}

/// One de Casteljau round: reduce a degree-`d` net to degree `d - 1` at
/// barycentric coordinates `(u, v, w)`.
fn reduce(points: &[Vec3], d: usize, u: f32, v: f32, w: f32) -> Vec<Vec3> {
    let nd = d - 1;
    let mut out = Vec::with_capacity((nd + 1) * (nd + 2) / 2);
    for i in 0..=nd {
        for j in 0..=(nd - i) {
            out.push(
                u * points[net_index(d, i + 1, j)]
                    + v * points[net_index(d, i, j + 1)]
                    + w * points[net_index(d, i, j)],
            );
        }
    }
    out
}

/// A cubic triangular Bézier patch.
///
/// Control points are ordered row-major in the `u` exponent: index 0 is
/// the `w` corner `b003`, index 3 is the `v` corner `b030`, and index 9 is
/// the `u` corner `b300`.
#[derive(Debug, Clone)]
pub struct BezierTrianglePatch {
    /// The ten control points.
    pub control: [Vec3; 10],
}

impl Default for BezierTrianglePatch {
    /// A dome-shaped patch spanning a right triangle of side 10 in the XY
    /// plane, with edge control points lifted to z = 2 and the center
    /// point to z = 5.
    fn default() -> Self {
        let corner_u = Vec3::new(10.0, 0.0, 0.0);
        let corner_v = Vec3::new(0.0, 10.0, 0.0);
        let corner_w = Vec3::ZERO;

        let mut control = [Vec3::ZERO; 10];
        for i in 0..=3usize {
            for j in 0..=(3 - i) {
                let k = 3 - i - j;
                let base = (i as f32 * corner_u
                    + j as f32 * corner_v
                    + k as f32 * corner_w)
                    / 3.0;
                let lift = if i == 1 && j == 1 && k == 1 {
                    5.0
                } else if i == 3 || j == 3 || k == 3 {
                    0.0
                } else {
                    2.0
                };
                control[net_index(3, i, j)] = base + lift * Vec3::Z;
            }
        }
        Self { control }
    }
}

impl BezierTrianglePatch {
    /// Evaluate the surface at barycentric coordinates `(u, v, w)`.
    ///
    /// The coordinates are expected to sum to 1.
    #[must_use]
    pub fn evaluate(&self, u: f32, v: f32, w: f32) -> Vec3 {
        let l2 = reduce(&self.control, 3, u, v, w);
        let l1 = reduce(&l2, 2, u, v, w);
        reduce(&l1, 1, u, v, w)[0]
    }

    /// Tessellate the patch into a flat-shaded triangle list with
    /// `subdivisions` splits per edge.
    #[must_use]
    pub fn tessellate(&self, subdivisions: u32) -> Vec<Vertex> {
        let n = subdivisions.max(1) as usize;
        let step = 1.0 / n as f32;

        // Sample grid: point (a, b) at u = a/n, v = b/n.
        let sample = |a: usize, b: usize| {
            let u = a as f32 * step;
            let v = b as f32 * step;
            self.evaluate(u, v, 1.0 - u - v)
        };

        let mut vertices = Vec::with_capacity(n * n * 3);
        let mut emit = |tri: [Vec3; 3]| {
            let normal =
                (tri[1] - tri[0]).cross(tri[2] - tri[0]).normalize_or_zero();
            for p in tri {
                vertices.push(Vertex {
                    position: p.to_array(),
                    normal: normal.to_array(),
                });
            }
        };

        for a in 0..n {
            for b in 0..(n - a) {
                emit([sample(a, b), sample(a + 1, b), sample(a, b + 1)]);
                if a + b + 2 <= n {
                    emit([
                        sample(a + 1, b),
                        sample(a + 1, b + 1),
                        sample(a, b + 1),
                    ]);
                }
            }
        }
        vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_interpolate_control_points() {
        let patch = BezierTrianglePatch::default();
        let u_corner = patch.evaluate(1.0, 0.0, 0.0);
        let v_corner = patch.evaluate(0.0, 1.0, 0.0);
        let w_corner = patch.evaluate(0.0, 0.0, 1.0);
        assert!((u_corner - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5);
        assert!((v_corner - Vec3::new(0.0, 10.0, 0.0)).length() < 1e-5);
        assert!(w_corner.length() < 1e-5);
    }

    #[test]
    fn center_is_lifted() {
        let patch = BezierTrianglePatch::default();
        let center = patch.evaluate(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0);
        assert!(center.z > 1.0);
    }

    #[test]
    fn tessellation_emits_full_triangle_grid() {
        let patch = BezierTrianglePatch::default();
        let n = 8usize;
        let verts = patch.tessellate(n as u32);
        // n^2 small triangles cover a subdivided triangle.
        assert_eq!(verts.len(), n * n * 3);
    }

    #[test]
    fn tessellated_boundary_follows_patch_edges() {
        let patch = BezierTrianglePatch::default();
        let verts = patch.tessellate(4);
        // The w-corner (first emitted vertex) is on the surface.
        let first = Vec3::from_array(verts[0].position);
        assert!((first - patch.evaluate(0.0, 0.0, 1.0)).length() < 1e-5);
    }
}
