//! Rendering collaborator for the grounded skybox: GPU vertex format, buffer
//! upload keyed off the skybox geometry revision, the equirectangular
//! environment map container, and the skybox render pipeline.

pub mod buffer;
pub mod env_map;
pub mod node;
pub mod pipeline;
pub mod vertex;

pub use buffer::{BufferAllocator, IndexData, MeshBuffer};
pub use env_map::{EnvironmentMap, TextureError, environment_map_bind_group_layout};
pub use node::SkyboxNode;
pub use pipeline::{CameraUniform, SKYBOX_SHADER_SOURCE, SkyboxPipeline, draw_skybox};
pub use vertex::{SkyVertex, interleave};
