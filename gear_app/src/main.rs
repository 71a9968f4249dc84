//! Embedded gear viewer demo
//!
//! Drives the viewer controller with reference host collaborators: a
//! logging render surface, a worker thread that resolves a procedural gear
//! model after a short delay (standing in for asynchronous asset
//! retrieval), and scripted layout and visibility events that exercise the
//! resize, suspend, and teardown paths.

use std::thread;
use std::time::{Duration, Instant};

use viewer_engine::prelude::*;
use viewer_engine::render::primitives::spur_gear;

/// Host region the demo pretends to be embedded in.
const REGION_WIDTH: u32 = 1280;
const REGION_HEIGHT: u32 = 540;
const DEVICE_PIXEL_RATIO: f32 = 2.0;

/// Frames driven before the demo tears itself down (~10s at 60 Hz).
const DEMO_FRAMES: u32 = 600;

/// Rendering surface that reports what it is asked to do
struct ConsoleSurface {
    extent: Option<SurfaceExtent>,
    frames: u64,
}

impl ConsoleSurface {
    fn new() -> Self {
        Self {
            extent: None,
            frames: 0,
        }
    }
}

impl RenderTarget for ConsoleSurface {
    fn resize(&mut self, extent: SurfaceExtent) {
        log::info!("Surface sized to {}x{} physical pixels", extent.width, extent.height);
        self.extent = Some(extent);
    }

    fn draw(
        &mut self,
        scene: &SceneFragment,
        camera: &Camera,
        _lights: &LightRig,
    ) -> Result<(), DrawError> {
        let extent = self
            .extent
            .ok_or_else(|| DrawError::SurfaceUnavailable("never sized".into()))?;
        self.frames += 1;
        if self.frames % 60 == 0 {
            log::info!(
                "Frame {} at {}x{}: spin {:.2} rad, camera {:.2} units from target",
                self.frames,
                extent.width,
                extent.height,
                scene.spin_angle(),
                camera.target_distance()
            );
        }
        Ok(())
    }

    fn dispose(&mut self) {
        log::info!("Surface disposed after {} frames", self.frames);
    }
}

/// Resolve the gear model off the frame loop
///
/// A real host fetches and parses an authored asset here; the demo builds
/// one procedurally and applies the brushed-metal look to every drawable.
fn resolve_gear_model(sender: ModelSender) {
    thread::sleep(Duration::from_millis(150));

    let mesh = spur_gear(13, 0.78, 1.0, 0.3);
    let material = Material::new()
        .with_color(0.69, 0.69, 0.69)
        .with_metallic(1.0)
        .with_roughness(0.35)
        .with_clearcoat(0.9, 0.15);
    let fragment =
        SceneFragment::new(SceneNode::Drawable(Drawable::new(mesh, material))).with_spin_axis(Vec3::z());

    if !sender.send(Ok(fragment)) {
        log::warn!("Viewer went away before the model resolved");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let (size_tx, size_source) = size_channel();
    let (visibility_tx, visibility_source) = visibility_channel();
    let (model_tx, model) = model_channel();
    thread::spawn(move || resolve_gear_model(model_tx));

    let mut viewer = ViewerController::new(
        ViewerConfig::default(),
        HostBindings {
            render_target: Some(Box::new(ConsoleSurface::new())),
            region: HostRegion {
                kind: RegionKind::Bounded,
                width: REGION_WIDTH,
                height: REGION_HEIGHT,
                device_pixel_ratio: DEVICE_PIXEL_RATIO,
            },
            size_source: Box::new(size_source),
            visibility_source: Box::new(visibility_source),
            model,
            on_ready: Some(Box::new(|| log::info!("Gear viewer ready"))),
        },
    )?;

    let epoch = Instant::now();
    for frame in 0..DEMO_FRAMES {
        // Scripted host events: the page narrows the region, scrolls the
        // viewer out of sight, then brings it back.
        match frame {
            240 => size_tx.send((960, 420))?,
            360 => visibility_tx.send(0.0)?,
            480 => visibility_tx.send(1.0)?,
            _ => {}
        }

        if viewer.tick(epoch.elapsed()) == TickOutcome::Halted {
            break;
        }
        thread::sleep(Duration::from_millis(16));
    }

    viewer.dispose();
    Ok(())
}
