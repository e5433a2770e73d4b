//! Ground-projected skybox: a sphere whose lower hemisphere is warped so an
//! equirectangular environment texture appears to meet a flat ground plane.
//!
//! [`GroundedSkybox`] owns the warped mesh and regenerates it synchronously
//! whenever one of its parameters changes; renderers watch the geometry
//! [revision](GroundedSkybox::revision) to know when to re-upload.

mod error;
mod projection;
mod skybox;

pub use error::SkyboxError;
pub use projection::{apply_ground_projection, build_geometry, ground_scale};
pub use skybox::{DEFAULT_RESOLUTION, GroundedSkybox, ParamUpdate};
