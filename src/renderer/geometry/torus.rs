//! Torus mesh generation.

use glam::Vec3;

use super::Vertex;

/// Distance from the torus center to the tube center.
pub const MAJOR_RADIUS: f32 = 5.0;
/// Tube radius.
pub const MINOR_RADIUS: f32 = 1.7;

/// Ring segments around the main axis.
const RINGS: u32 = 48;
/// Segments around the tube cross-section.
const SIDES: u32 = 24;

/// Point and outward normal on the torus surface at ring angle `theta`,
/// tube angle `phi`.
fn surface_point(theta: f32, phi: f32) -> (Vec3, Vec3) {
    let (sin_t, cos_t) = theta.sin_cos();
    let (sin_p, cos_p) = phi.sin_cos();
    let ring_center = Vec3::new(MAJOR_RADIUS * cos_t, MAJOR_RADIUS * sin_t, 0.0);
    let normal =
        Vec3::new(cos_t * cos_p, sin_t * cos_p, sin_p);
    (ring_center + MINOR_RADIUS * normal, normal)
}

/// Generate the torus as a triangle list.
///
/// The torus lies in the XY plane around the Z axis, so viewed down -Z its
/// silhouette is a circle of radius `MAJOR_RADIUS + MINOR_RADIUS` — the
/// physical radius the default calibration reference assumes.
#[must_use]
pub fn generate_torus() -> Vec<Vertex> {
    let mut vertices =
        Vec::with_capacity((RINGS * SIDES * 6) as usize);
    let ring_step = std::f32::consts::TAU / RINGS as f32;
    let side_step = std::f32::consts::TAU / SIDES as f32;

    for ring in 0..RINGS {
        let t0 = ring as f32 * ring_step;
        let t1 = (ring + 1) as f32 * ring_step;
        for side in 0..SIDES {
            let p0 = side as f32 * side_step;
            let p1 = (side + 1) as f32 * side_step;

            let (a, an) = surface_point(t0, p0);
            let (b, bn) = surface_point(t1, p0);
            let (c, cn) = surface_point(t1, p1);
            let (d, dn) = surface_point(t0, p1);

            for (pos, normal) in [(a, an), (b, bn), (c, cn)] {
                vertices.push(Vertex {
                    position: pos.to_array(),
                    normal: normal.to_array(),
                });
            }
            for (pos, normal) in [(a, an), (c, cn), (d, dn)] {
                vertices.push(Vertex {
                    position: pos.to_array(),
                    normal: normal.to_array(),
                });
            }
        }
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_count_matches_quad_grid() {
        let verts = generate_torus();
        assert_eq!(verts.len(), (RINGS * SIDES * 6) as usize);
    }

    #[test]
    fn outer_radius_is_major_plus_minor() {
        let verts = generate_torus();
        let max_r = verts
            .iter()
            .map(|v| {
                (v.position[0] * v.position[0]
                    + v.position[1] * v.position[1])
                    .sqrt()
            })
            .fold(0.0f32, f32::max);
        assert!((max_r - (MAJOR_RADIUS + MINOR_RADIUS)).abs() < 1e-3);
    }

    #[test]
    fn normals_are_unit_length() {
        for v in generate_torus() {
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn tube_stays_within_minor_radius_of_ring() {
        for v in generate_torus() {
            let p = Vec3::from_array(v.position);
            let ring_dist =
                (p.truncate().length() - MAJOR_RADIUS).hypot(p.z);
            assert!((ring_dist - MINOR_RADIUS).abs() < 1e-4);
        }
    }
}
