//! UV-sphere tessellation with a fixed, documented vertex traversal order.

use std::f64::consts::{PI, TAU};

use glam::{DVec2, DVec3};

use crate::mesh::SphereMesh;

/// Tessellates a latitude/longitude sphere with the Y axis as the polar axis.
///
/// Produces `(width_segments + 1) × (height_segments + 1)` vertices laid out
/// in rings from the north pole (`y = +radius`) down to the south pole
/// (`y = -radius`). Each ring holds `width_segments + 1` vertices: the seam
/// column is duplicated so the texture can wrap without a visible join.
/// Consumers that post-process vertices may rely on this ordering staying
/// stable across releases.
///
/// UVs cover `[0, 1]²` with `u` increasing around the ring and `v = 1` at the
/// north pole. The pole rows shift `u` by half a segment so the pole texel is
/// sampled at the center of its triangle fan. Normals are the unit radial
/// direction. Indices form a triangle list; the degenerate triangle touching
/// each pole is skipped, giving `2 · width_segments · (height_segments - 1)`
/// triangles.
///
/// The ring at `u = 0` faces -X, which lines an equirectangular texture's
/// horizontal center up with +Z.
///
/// Callers must pass a positive radius and non-zero segment counts; this is
/// enforced upstream where user input enters the system.
pub fn tessellate_uv_sphere(radius: f64, width_segments: u32, height_segments: u32) -> SphereMesh {
    debug_assert!(radius > 0.0, "radius must be positive, got {radius}");
    debug_assert!(width_segments > 0, "width_segments must be non-zero");
    debug_assert!(height_segments > 0, "height_segments must be non-zero");

    let vertex_count = ((width_segments + 1) * (height_segments + 1)) as usize;
    let index_count = (6 * width_segments * (height_segments - 1)) as usize;
    let mut mesh = SphereMesh::with_capacity(vertex_count, index_count);

    // Vertices, ring by ring from pole to pole.
    for iy in 0..=height_segments {
        let v = iy as f64 / height_segments as f64;
        let theta = v * PI;
        let (sin_theta, cos_theta) = theta.sin_cos();

        // Pole rings collapse to a point; nudge u so each fan triangle samples
        // the texel at its center rather than its edge.
        let u_offset = if iy == 0 {
            0.5 / width_segments as f64
        } else if iy == height_segments {
            -0.5 / width_segments as f64
        } else {
            0.0
        };

        for ix in 0..=width_segments {
            let u = ix as f64 / width_segments as f64;
            let phi = u * TAU;
            let (sin_phi, cos_phi) = phi.sin_cos();

            let normal = DVec3::new(-cos_phi * sin_theta, cos_theta, sin_phi * sin_theta);
            mesh.push_vertex(normal * radius, normal, DVec2::new(u + u_offset, 1.0 - v));
        }
    }

    // Triangles. Each quad between adjacent rings splits in two, except at the
    // poles where one of the pair is degenerate and gets dropped.
    let stride = width_segments + 1;
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = iy * stride + ix + 1;
            let b = iy * stride + ix;
            let c = (iy + 1) * stride + ix;
            let d = (iy + 1) * stride + ix + 1;

            if iy != 0 {
                mesh.push_triangle(a, b, d);
            }
            if iy != height_segments - 1 {
                mesh.push_triangle(b, c, d);
            }
        }
    }

    mesh
}
