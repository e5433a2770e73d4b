//! Ground projection: the radial warp that flattens a sphere's lower
//! hemisphere into a floor plane while keeping the sky a true sphere.

use horizon_geometry::{SphereMesh, tessellate_uv_sphere};

/// Radial scale factor for a vertex at height `y` on the unwarped sphere.
///
/// `height` is how far the camera that took the environment photo was above
/// the ground. Vertices deeper than `y1 = -1.5 · height` are projected onto
/// the plane `y = -height`; vertices in the band `[y1, 0)` get a quadratic
/// blend that matches the plane branch at `y1` and approaches 1 toward the
/// horizon, so the floor meets the sphere without a seam.
///
/// Only meaningful for `y < 0`; the upper hemisphere is never scaled.
pub fn ground_scale(y: f64, height: f64) -> f64 {
    let y1 = -1.5 * height;
    if y < y1 {
        -height / y
    } else {
        1.0 - y * y / (3.0 * y1 * y1)
    }
}

/// Warps the lower hemisphere of `mesh` in place.
///
/// Every vertex with `y < 0` is scaled uniformly toward or away from the
/// origin by [`ground_scale`], preserving its direction from the center.
/// Vertices with `y >= 0` are left bit-identical. Normals and UVs are not
/// touched: they stay index-aligned with the original sphere, which is what
/// keeps the texture mapping intact across the warp.
pub fn apply_ground_projection(mesh: &mut SphereMesh, height: f64) {
    for p in mesh.positions_mut() {
        if p.y < 0.0 {
            *p *= ground_scale(p.y, height);
        }
    }
}

/// Builds the complete ground-projected skybox mesh.
///
/// Tessellates a UV-sphere with `width_segments = 2 · resolution` and
/// `height_segments = resolution`, mirrors it along z so the winding matches
/// an interior view, then applies the ground projection.
///
/// Inputs are assumed positive; [`GroundedSkybox`](crate::GroundedSkybox)
/// validates them before calling in.
pub fn build_geometry(height: f64, radius: f64, resolution: u32) -> SphereMesh {
    let mut mesh = tessellate_uv_sphere(radius, 2 * resolution, resolution);
    mesh.mirror_z();
    apply_ground_projection(&mut mesh, height);
    mesh
}
