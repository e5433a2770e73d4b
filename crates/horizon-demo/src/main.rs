//! Headless demo driving the grounded skybox the way a live control panel
//! would: construct from config, sweep the height and radius sliders, and
//! report rebuild timings.
//!
//! Run with `cargo run -p horizon-demo`. When a GPU adapter is available the
//! demo also uploads each rebuild the way the renderer does per frame;
//! without one it exercises the CPU path only.

use std::time::Instant;

use horizon_config::Config;
use horizon_log::init_logging;
use horizon_render::{EnvironmentMap, SkyboxNode};
use horizon_skybox::GroundedSkybox;
use tracing::{error, info, warn};

fn main() {
    let config_dir = Config::default_dir();
    let config = match Config::load_or_create(&config_dir) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("falling back to default config: {err}");
            Config::default()
        }
    };

    init_logging(None, cfg!(debug_assertions), Some(&config));

    if let Err(err) = config.skybox.validate() {
        error!("invalid skybox config: {err}");
        std::process::exit(1);
    }

    let start = Instant::now();
    let mut skybox = match GroundedSkybox::new(
        config.skybox.height,
        config.skybox.radius,
        config.skybox.resolution,
    ) {
        Ok(skybox) => skybox,
        Err(err) => {
            error!("failed to construct skybox: {err}");
            std::process::exit(1);
        }
    };
    info!(
        vertices = skybox.mesh().vertex_count(),
        triangles = skybox.mesh().triangle_count(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1e3,
        "constructed grounded skybox"
    );

    // The control-panel sweep: height slider up and back, then the radius
    // slider, then an invalid drag to zero that the builder must shrug off.
    for height in [25.0, 15.0] {
        let t = Instant::now();
        let outcome = skybox.set_height(height);
        if config.debug.log_rebuild_timings {
            info!(
                height,
                ?outcome,
                elapsed_ms = t.elapsed().as_secs_f64() * 1e3,
                "height update"
            );
        } else {
            info!(height, ?outcome, "height update");
        }
    }

    let outcome = skybox.set_radius(150.0);
    info!(radius = 150.0, ?outcome, "radius update");

    let outcome = skybox.set_radius(0.0);
    info!(
        radius = 0.0,
        ?outcome,
        "invalid radius update left geometry at revision {}",
        skybox.revision()
    );

    if config.skybox.grounded {
        let (min, _) = skybox.mesh().bounding_box();
        info!(floor_y = min.y, "ground plane height");
    }

    info!(
        vsync = config.render.vsync,
        msaa_samples = config.render.msaa_samples,
        "render settings"
    );

    match request_device() {
        Some((device, queue)) => drive_gpu(&device, &queue, skybox),
        None => warn!("no GPU adapter available, skipping upload demo"),
    }
}

/// Upload the skybox and run the per-frame sync loop a renderer would.
fn drive_gpu(device: &wgpu::Device, queue: &wgpu::Queue, skybox: GroundedSkybox) {
    let env_map = match EnvironmentMap::from_rgba8(
        device,
        queue,
        "demo-panorama",
        &gradient_panorama(512, 256),
        512,
        256,
    ) {
        Ok(env_map) => env_map,
        Err(err) => {
            error!("failed to upload environment map: {err}");
            return;
        }
    };

    let mut node = SkyboxNode::new(device, skybox, env_map);
    info!("uploaded initial skybox geometry");

    node.skybox_mut().set_height(20.0);
    let uploaded = node.sync(device);
    info!(uploaded, "frame sync after height change");

    let uploaded = node.sync(device);
    info!(uploaded, "frame sync with no change");
}

fn request_device() -> Option<(wgpu::Device, wgpu::Queue)> {
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
                label: Some("horizon-demo-device"),
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

/// A synthetic 2:1 panorama: sky blue fading through a horizon band into
/// ground brown, good enough to see the projection without shipping an HDR.
fn gradient_panorama(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        let t = y as f32 / (height - 1) as f32;
        let (r, g, b) = if t < 0.5 {
            let s = t * 2.0;
            (
                (40.0 + 60.0 * s) as u8,
                (90.0 + 80.0 * s) as u8,
                (200.0 - 30.0 * s) as u8,
            )
        } else {
            let s = (t - 0.5) * 2.0;
            (
                (130.0 - 40.0 * s) as u8,
                (110.0 - 50.0 * s) as u8,
                (80.0 - 40.0 * s) as u8,
            )
        };
        for _ in 0..width {
            data.extend_from_slice(&[r, g, b, 255]);
        }
    }
    data
}
