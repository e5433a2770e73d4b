//! The mutable skybox builder: parameters, owned geometry, and the revision
//! counter renderers watch for re-upload.

use horizon_geometry::SphereMesh;
use log::debug;

use crate::error::SkyboxError;
use crate::projection::build_geometry;

/// Geometry resolution used when the caller does not specify one.
pub const DEFAULT_RESOLUTION: u32 = 128;

/// Outcome of a parameter setter call.
///
/// Setters never fail: an out-of-range value leaves the skybox in its prior
/// valid state. The enum makes that policy, and the cost of a rebuild,
/// visible at the call site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamUpdate {
    /// The value was stored and the geometry was regenerated.
    Applied,
    /// The value equals the current one; nothing was reallocated.
    Unchanged,
    /// The value was non-positive (or not finite) and was ignored.
    Rejected,
}

impl ParamUpdate {
    /// Returns `true` if the call regenerated the geometry.
    pub fn applied(self) -> bool {
        self == ParamUpdate::Applied
    }
}

/// A ground-projected skybox mesh builder.
///
/// Holds `{height, radius, resolution}` and exactly one generated mesh. The
/// mesh is always consistent with the stored parameters: every successful
/// setter regenerates it synchronously before returning, bumping
/// [`revision`](Self::revision) so a renderer can tell its uploaded copy has
/// gone stale.
///
/// `height` is how far the camera that took the environment photo was above
/// the ground; `radius` must be large enough that the scene's camera stays
/// inside the sphere.
#[derive(Clone, Debug)]
pub struct GroundedSkybox {
    height: f64,
    radius: f64,
    resolution: u32,
    mesh: SphereMesh,
    revision: u64,
}

impl GroundedSkybox {
    /// Constructs a skybox and generates its initial geometry.
    ///
    /// All three parameters must be positive (and the float parameters
    /// finite); violation is reported before any geometry is allocated.
    pub fn new(height: f64, radius: f64, resolution: u32) -> Result<Self, SkyboxError> {
        if !(height > 0.0 && height.is_finite()) {
            return Err(SkyboxError::InvalidParameter {
                name: "height",
                value: height,
            });
        }
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(SkyboxError::InvalidParameter {
                name: "radius",
                value: radius,
            });
        }
        if resolution == 0 {
            return Err(SkyboxError::InvalidParameter {
                name: "resolution",
                value: 0.0,
            });
        }

        let mesh = build_geometry(height, radius, resolution);
        debug!(
            "generated skybox geometry: height={height} radius={radius} resolution={resolution} ({} vertices)",
            mesh.vertex_count()
        );

        Ok(Self {
            height,
            radius,
            resolution,
            mesh,
            revision: 1,
        })
    }

    /// Constructs a skybox with the default resolution of 128.
    pub fn with_default_resolution(height: f64, radius: f64) -> Result<Self, SkyboxError> {
        Self::new(height, radius, DEFAULT_RESOLUTION)
    }

    /// Camera height above the ground in the environment photo.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Radius of the sky sphere.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Tessellation density (rings per hemisphere).
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// The current geometry. Always consistent with the stored parameters.
    pub fn mesh(&self) -> &SphereMesh {
        &self.mesh
    }

    /// Monotonically increasing geometry generation counter.
    ///
    /// Starts at 1 and is bumped on every rebuild. A renderer records the
    /// revision it uploaded and re-uploads when [`is_stale`](Self::is_stale)
    /// reports a mismatch.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` if geometry uploaded at `uploaded_revision` no longer
    /// matches the current mesh.
    pub fn is_stale(&self, uploaded_revision: u64) -> bool {
        self.revision != uploaded_revision
    }

    /// Updates the height and regenerates the geometry.
    ///
    /// Non-positive or non-finite values are ignored; setting the current
    /// value is a no-op.
    pub fn set_height(&mut self, value: f64) -> ParamUpdate {
        if !(value > 0.0 && value.is_finite()) {
            return ParamUpdate::Rejected;
        }
        if value == self.height {
            return ParamUpdate::Unchanged;
        }
        self.height = value;
        self.rebuild();
        ParamUpdate::Applied
    }

    /// Updates the radius and regenerates the geometry.
    ///
    /// Non-positive or non-finite values are ignored; setting the current
    /// value is a no-op.
    pub fn set_radius(&mut self, value: f64) -> ParamUpdate {
        if !(value > 0.0 && value.is_finite()) {
            return ParamUpdate::Rejected;
        }
        if value == self.radius {
            return ParamUpdate::Unchanged;
        }
        self.radius = value;
        self.rebuild();
        ParamUpdate::Applied
    }

    /// Updates the resolution and regenerates the geometry.
    ///
    /// Zero is ignored; setting the current value is a no-op.
    pub fn set_resolution(&mut self, value: u32) -> ParamUpdate {
        if value == 0 {
            return ParamUpdate::Rejected;
        }
        if value == self.resolution {
            return ParamUpdate::Unchanged;
        }
        self.resolution = value;
        self.rebuild();
        ParamUpdate::Applied
    }

    /// Replaces the mesh with a fresh build of the current parameters.
    ///
    /// The old mesh is dropped when the new one is installed, so repeated
    /// parameter changes never accumulate buffers.
    fn rebuild(&mut self) {
        self.mesh = build_geometry(self.height, self.radius, self.resolution);
        self.revision += 1;
        debug!(
            "rebuilt skybox geometry: height={} radius={} resolution={} revision={} ({} vertices)",
            self.height,
            self.radius,
            self.resolution,
            self.revision,
            self.mesh.vertex_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Valid parameters produce the UV-sphere vertex count
    /// `(2·resolution + 1) × (resolution + 1)`.
    #[test]
    fn test_construction_vertex_count() {
        let skybox = GroundedSkybox::new(15.0, 100.0, 128).unwrap();
        assert_eq!(skybox.mesh().vertex_count(), 257 * 129);
        assert_eq!(skybox.mesh().vertex_count(), 33153);

        let small = GroundedSkybox::new(2.0, 10.0, 4).unwrap();
        assert_eq!(small.mesh().vertex_count(), 9 * 5);
    }

    /// Any non-positive constructor argument is rejected before allocation.
    #[test]
    fn test_construction_rejects_non_positive() {
        for (h, r, res) in [
            (0.0, 100.0, 128),
            (-15.0, 100.0, 128),
            (15.0, 0.0, 128),
            (15.0, -1.0, 128),
            (15.0, 100.0, 0),
            (f64::NAN, 100.0, 128),
            (15.0, f64::INFINITY, 128),
        ] {
            let result = GroundedSkybox::new(h, r, res);
            assert!(
                matches!(result, Err(SkyboxError::InvalidParameter { .. })),
                "expected InvalidParameter for ({h}, {r}, {res})"
            );
        }
    }

    /// The error names the offending parameter.
    #[test]
    fn test_error_names_parameter() {
        let err = GroundedSkybox::new(15.0, -3.0, 128).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("radius"), "unexpected message: {msg}");
        assert!(msg.contains("-3"), "unexpected message: {msg}");
    }

    /// The default-resolution constructor uses 128.
    #[test]
    fn test_default_resolution() {
        let skybox = GroundedSkybox::with_default_resolution(15.0, 100.0).unwrap();
        assert_eq!(skybox.resolution(), DEFAULT_RESOLUTION);
        assert_eq!(skybox.mesh().vertex_count(), 33153);
    }

    /// Setting a parameter to its current value performs no rebuild.
    #[test]
    fn test_setter_idempotence() {
        let mut skybox = GroundedSkybox::new(15.0, 100.0, 16).unwrap();
        let revision = skybox.revision();

        assert_eq!(skybox.set_height(15.0), ParamUpdate::Unchanged);
        assert_eq!(skybox.set_radius(100.0), ParamUpdate::Unchanged);
        assert_eq!(skybox.set_resolution(16), ParamUpdate::Unchanged);
        assert_eq!(
            skybox.revision(),
            revision,
            "no-op setters must not touch the geometry"
        );
    }

    /// Invalid setter values are silently ignored, preserving prior state.
    #[test]
    fn test_setter_rejects_silently() {
        let mut skybox = GroundedSkybox::new(15.0, 100.0, 16).unwrap();
        let before = skybox.mesh().clone();
        let revision = skybox.revision();

        assert_eq!(skybox.set_radius(0.0), ParamUpdate::Rejected);
        assert_eq!(skybox.set_radius(-50.0), ParamUpdate::Rejected);
        assert_eq!(skybox.set_height(f64::NAN), ParamUpdate::Rejected);
        assert_eq!(skybox.set_resolution(0), ParamUpdate::Rejected);

        assert_eq!(skybox.radius(), 100.0, "radius must keep its prior value");
        assert_eq!(skybox.revision(), revision);
        assert_eq!(
            *skybox.mesh(),
            before,
            "geometry must be unchanged after rejected updates"
        );
    }

    /// A successful setter regenerates the geometry before returning.
    #[test]
    fn test_setter_regenerates_synchronously() {
        let mut skybox = GroundedSkybox::new(15.0, 100.0, 16).unwrap();
        assert_eq!(skybox.set_resolution(32), ParamUpdate::Applied);
        assert_eq!(skybox.mesh().vertex_count(), 65 * 33);
        assert_eq!(skybox.revision(), 2);
        assert!(skybox.is_stale(1));
        assert!(!skybox.is_stale(2));
    }

    /// Toggling height 15 → 25 → 15 rebuilds twice and matches a fresh build.
    #[test]
    fn test_height_round_trip_is_deterministic() {
        let mut skybox = GroundedSkybox::new(15.0, 100.0, 32).unwrap();

        assert!(skybox.set_height(25.0).applied());
        assert!(skybox.set_height(15.0).applied());
        assert_eq!(skybox.revision(), 3, "two rebuilds expected");

        let fresh = GroundedSkybox::new(15.0, 100.0, 32).unwrap();
        assert_eq!(
            skybox.mesh(),
            fresh.mesh(),
            "round-tripped geometry must match a fresh construction"
        );
    }

    /// Radius changes rescale the horizon ring.
    #[test]
    fn test_radius_change_rescales_geometry() {
        let mut skybox = GroundedSkybox::new(15.0, 100.0, 16).unwrap();
        skybox.set_radius(200.0);
        let (_, max) = skybox.mesh().bounding_box();
        assert!(
            (max.y - 200.0).abs() < 1e-9,
            "sky apex should sit at the new radius, got {}",
            max.y
        );
    }

    /// The floor plane sits at -height for every valid height.
    #[test]
    fn test_floor_plane_tracks_height() {
        for height in [5.0, 15.0, 25.0] {
            let skybox = GroundedSkybox::new(height, 100.0, 32).unwrap();
            let (min, _) = skybox.mesh().bounding_box();
            assert!(
                (min.y + height).abs() < 1e-9,
                "floor should sit at -{height}, got {}",
                min.y
            );
        }
    }
}
