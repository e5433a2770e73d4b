//! The renderable skybox object: a [`GroundedSkybox`] paired with its
//! environment map and GPU buffers.
//!
//! The builder never talks to the GPU directly: it bumps its revision when
//! it regenerates geometry, and [`SkyboxNode::sync`] re-uploads when the
//! uploaded copy has gone stale. Callers mutate parameters through
//! [`SkyboxNode::skybox_mut`] and call `sync` once per frame before drawing.

use horizon_skybox::GroundedSkybox;
use log::debug;

use crate::buffer::{BufferAllocator, IndexData, MeshBuffer};
use crate::env_map::EnvironmentMap;
use crate::pipeline::{SkyboxPipeline, draw_skybox};
use crate::vertex::interleave;

/// A grounded skybox ready for rendering.
pub struct SkyboxNode {
    skybox: GroundedSkybox,
    env_map: EnvironmentMap,
    mesh_buffer: MeshBuffer,
    uploaded_revision: u64,
}

impl SkyboxNode {
    /// Pair a skybox with its environment map and upload the initial geometry.
    pub fn new(device: &wgpu::Device, skybox: GroundedSkybox, env_map: EnvironmentMap) -> Self {
        let mesh_buffer = upload(device, &skybox);
        let uploaded_revision = skybox.revision();
        Self {
            skybox,
            env_map,
            mesh_buffer,
            uploaded_revision,
        }
    }

    /// The wrapped skybox builder.
    pub fn skybox(&self) -> &GroundedSkybox {
        &self.skybox
    }

    /// Mutable access for parameter updates. Call [`sync`](Self::sync) before
    /// the next draw.
    pub fn skybox_mut(&mut self) -> &mut GroundedSkybox {
        &mut self.skybox
    }

    /// The environment map this skybox samples.
    pub fn env_map(&self) -> &EnvironmentMap {
        &self.env_map
    }

    /// Re-upload the mesh if the geometry changed since the last upload.
    ///
    /// Returns `true` if an upload happened. The previous GPU buffers are
    /// dropped when the new ones are installed.
    pub fn sync(&mut self, device: &wgpu::Device) -> bool {
        if !self.skybox.is_stale(self.uploaded_revision) {
            return false;
        }
        self.mesh_buffer = upload(device, &self.skybox);
        self.uploaded_revision = self.skybox.revision();
        debug!(
            "re-uploaded skybox geometry at revision {}",
            self.uploaded_revision
        );
        true
    }

    /// Record the draw into a render pass.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        pipeline: &SkyboxPipeline,
        camera_bind_group: &'a wgpu::BindGroup,
    ) {
        draw_skybox(
            render_pass,
            pipeline,
            camera_bind_group,
            &self.env_map.bind_group,
            &self.mesh_buffer,
        );
    }
}

/// Interleave and upload the skybox mesh, narrowing indices to u16 when the
/// vertex count allows it.
fn upload(device: &wgpu::Device, skybox: &GroundedSkybox) -> MeshBuffer {
    let mesh = skybox.mesh();
    let vertices = interleave(mesh);
    let allocator = BufferAllocator::new(device);

    if mesh.vertex_count() <= (u16::MAX as usize) + 1 {
        let narrow: Vec<u16> = mesh.indices().iter().map(|&i| i as u16).collect();
        allocator.create_mesh(
            "grounded-skybox",
            bytemuck::cast_slice(&vertices),
            IndexData::U16(&narrow),
        )
    } else {
        allocator.create_mesh(
            "grounded-skybox",
            bytemuck::cast_slice(&vertices),
            IndexData::U32(mesh.indices()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_device() -> Option<(wgpu::Device, wgpu::Queue)> {
        pollster::block_on(async {
            let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
                backends: wgpu::Backends::all(),
                ..Default::default()
            });

            let adapter = instance
                .request_adapter(&wgpu::RequestAdapterOptions {
                    power_preference: wgpu::PowerPreference::default(),
                    compatible_surface: None,
                    force_fallback_adapter: false,
                })
                .await
                .ok()?;

            adapter
                .request_device(&wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                    experimental_features: Default::default(),
                    ..Default::default()
                })
                .await
                .ok()
        })
    }

    fn test_env_map(device: &wgpu::Device, queue: &wgpu::Queue) -> EnvironmentMap {
        let (w, h) = (8u32, 4u32);
        let data = vec![200u8; (w * h * 4) as usize];
        EnvironmentMap::from_rgba8(device, queue, "test-env", &data, w, h).unwrap()
    }

    /// Sync is a no-op while the geometry is unchanged.
    #[test]
    fn test_sync_noop_when_fresh() {
        let Some((device, queue)) = create_test_device() else {
            return;
        };
        let skybox = GroundedSkybox::new(15.0, 100.0, 8).unwrap();
        let mut node = SkyboxNode::new(&device, skybox, test_env_map(&device, &queue));

        assert!(!node.sync(&device), "nothing changed, nothing to upload");
    }

    /// A parameter change makes the next sync re-upload exactly once.
    #[test]
    fn test_sync_reuploads_after_change() {
        let Some((device, queue)) = create_test_device() else {
            return;
        };
        let skybox = GroundedSkybox::new(15.0, 100.0, 8).unwrap();
        let mut node = SkyboxNode::new(&device, skybox, test_env_map(&device, &queue));

        node.skybox_mut().set_height(25.0);
        assert!(node.sync(&device), "stale geometry should re-upload");
        assert!(!node.sync(&device), "second sync should be a no-op");
    }

    /// A rejected parameter change uploads nothing.
    #[test]
    fn test_rejected_update_skips_upload() {
        let Some((device, queue)) = create_test_device() else {
            return;
        };
        let skybox = GroundedSkybox::new(15.0, 100.0, 8).unwrap();
        let mut node = SkyboxNode::new(&device, skybox, test_env_map(&device, &queue));

        node.skybox_mut().set_radius(0.0);
        assert!(!node.sync(&device), "rejected update must not re-upload");
    }

    /// Index width follows the vertex count.
    #[test]
    fn test_index_width_selection() {
        let Some((device, queue)) = create_test_device() else {
            return;
        };
        // 17 × 9 vertices fits u16 indices.
        let small = GroundedSkybox::new(15.0, 100.0, 8).unwrap();
        let node = SkyboxNode::new(&device, small, test_env_map(&device, &queue));
        assert_eq!(node.mesh_buffer.index_format, wgpu::IndexFormat::Uint16);

        // 513 × 257 vertices exceeds u16.
        let large = GroundedSkybox::new(15.0, 100.0, 256).unwrap();
        let node = SkyboxNode::new(&device, large, test_env_map(&device, &queue));
        assert_eq!(node.mesh_buffer.index_format, wgpu::IndexFormat::Uint32);
    }
}
