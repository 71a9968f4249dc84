//! Viewer controller
//!
//! Coordinates every subsystem: it owns the viewport, camera, scene, light
//! rig, controls, and loop state, polls the host collaborator endpoints at
//! tick boundaries, and tears everything down exactly once. Construction is
//! performed exactly once by the surrounding system; there is no ambient
//! global state.

use std::time::Duration;

use thiserror::Error;

use crate::assets::ModelReceiver;
use crate::config::{ConfigError, ViewerConfig};
use crate::controls::OrbitControls;
use crate::foundation::math::Vec3;
use crate::render::camera::Camera;
use crate::render::fit::CameraFitter;
use crate::render::lighting::LightRig;
use crate::render::target::RenderTarget;
use crate::render_loop::{RenderLoop, TickOutcome};
use crate::scene::bounds::{estimate, BoundingSphere};
use crate::scene::node::SceneFragment;
use crate::viewport::visibility::{VisibilityGate, VisibilitySource};
use crate::viewport::{HostRegion, RegionKind, SizeSource, SizingReactor, Viewport};

/// One-shot notification fired when the viewer becomes ready
pub type ReadyCallback = Box<dyn FnOnce()>;

/// Errors that prevent the controller from initializing
#[derive(Error, Debug)]
pub enum ControllerError {
    /// No rendering surface was available; the viewer must not proceed
    #[error("no render target available; viewer cannot start")]
    MissingRenderTarget,

    /// The configuration failed validation
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Everything the surrounding system wires into the controller
///
/// The handles are created by setup code outside this crate: the rendering
/// surface, the host-region description, the observer endpoints, and the
/// asset-resolution endpoint.
pub struct HostBindings {
    /// The rendering surface, if setup managed to create one
    pub render_target: Option<Box<dyn RenderTarget>>,

    /// The host region the viewer is embedded in
    pub region: HostRegion,

    /// Size-change notification endpoint (the active sizing source)
    pub size_source: Box<dyn SizeSource>,

    /// Visibility notification endpoint
    pub visibility_source: Box<dyn VisibilitySource>,

    /// Asset-resolution endpoint
    pub model: ModelReceiver,

    /// Fired exactly once, after the object is loaded and first fitted
    pub on_ready: Option<ReadyCallback>,
}

/// The adaptive viewport controller
///
/// Owns the scene, camera, and loop state exclusively; all work happens on
/// the thread driving [`tick`](Self::tick), and observer updates take
/// effect on the tick after they arrive, never mid-tick.
pub struct ViewerController {
    config: ViewerConfig,
    fitter: CameraFitter,
    target: Box<dyn RenderTarget>,
    sizing: SizingReactor,
    gate: VisibilityGate,
    controls: OrbitControls,
    lights: LightRig,
    render_loop: RenderLoop,
    model: ModelReceiver,
    scene: Option<SceneFragment>,
    bounds: Option<BoundingSphere>,
    camera: Camera,
    on_ready: Option<ReadyCallback>,
    disposed: bool,
}

impl ViewerController {
    /// Build the controller and start the render loop
    ///
    /// Fails when the configuration is invalid or no render target exists;
    /// in both cases no loop is started and nothing needs disposal.
    pub fn new(config: ViewerConfig, host: HostBindings) -> Result<Self, ControllerError> {
        config.validate()?;
        let Some(mut target) = host.render_target else {
            log::error!("No render target available; viewer cannot start");
            return Err(ControllerError::MissingRenderTarget);
        };

        let viewport = Viewport::new(
            host.region.width,
            host.region.height,
            host.region.device_pixel_ratio,
            config.pixel_ratio_cap,
        );
        target.resize(viewport.physical_extent());

        match host.region.kind {
            RegionKind::Bounded => log::info!(
                "Viewer observing bounded host region, {}x{} at scale {:.1}",
                viewport.width(),
                viewport.height(),
                viewport.pixel_ratio()
            ),
            RegionKind::WholeWindow => log::info!(
                "Viewer tracking whole window, {}x{} at scale {:.1}",
                viewport.width(),
                viewport.height(),
                viewport.pixel_ratio()
            ),
        }

        let fitter = CameraFitter::default();
        // Default framing until the model arrives and the fit runs.
        let camera = Camera::perspective(
            Vec3::new(2.2, 1.8, 2.2),
            config.fov_degrees,
            viewport.aspect_ratio(),
            0.1,
            100.0,
        );
        let controls = OrbitControls::new(&config.interaction);
        let gate = VisibilityGate::new(host.visibility_source, config.visibility_threshold);
        let sizing = SizingReactor::new(host.size_source, viewport);

        let mut render_loop = RenderLoop::new();
        render_loop.start();

        Ok(Self {
            config,
            fitter,
            target,
            sizing,
            gate,
            controls,
            lights: LightRig::default(),
            render_loop,
            model: host.model,
            scene: None,
            bounds: None,
            camera,
            on_ready: host.on_ready,
            disposed: false,
        })
    }

    /// Run one scheduled tick
    ///
    /// The host frame primitive calls this once per frame with its
    /// monotonic timestamp. Collaborator endpoints are polled first, so
    /// size, visibility, and the loaded model all take effect on this tick
    /// at the earliest and never pre-empt one. A closed gate or a missing
    /// model yields [`TickOutcome::Idle`]: the chain stays alive but no
    /// simulation or draw work runs and the clock re-anchors instead of
    /// accumulating.
    pub fn tick(&mut self, now: Duration) -> TickOutcome {
        if !self.render_loop.is_running() {
            return TickOutcome::Halted;
        }

        self.poll_model();
        self.poll_layout();
        self.gate.poll();

        let Some(scene) = self.scene.as_mut() else {
            self.render_loop.skip(now);
            return TickOutcome::Idle;
        };
        if !self.gate.should_render() {
            self.render_loop.skip(now);
            return TickOutcome::Idle;
        }

        let delta = self.render_loop.advance(now);
        scene.spin_by(self.config.spin_rate * delta);
        self.lights.animate(self.render_loop.clock().elapsed());
        self.controls.update(&mut self.camera, delta);

        if let Err(error) = self.target.draw(scene, &self.camera, &self.lights) {
            log::error!("Draw failed: {error}");
        }
        TickOutcome::Rendered
    }

    /// Tear the viewer down
    ///
    /// Cancels the frame chain, detaches both observers, releases the
    /// controls, every GPU-backed scene resource, and the render target.
    /// Calling it a second time is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            log::debug!("Dispose called again; ignoring");
            return;
        }
        self.disposed = true;
        self.render_loop.stop();
        self.sizing.detach();
        self.gate.detach();
        self.controls.dispose();
        if let Some(scene) = self.scene.as_mut() {
            scene.dispose();
        }
        self.target.dispose();
        log::info!("Viewer disposed");
    }

    /// Whether the model has been loaded into the scene
    pub fn is_loaded(&self) -> bool {
        self.scene.is_some()
    }

    /// Whether the viewer has been disposed
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Current camera state
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current viewport state
    pub fn viewport(&self) -> &Viewport {
        self.sizing.viewport()
    }

    /// The loaded scene fragment, if any
    pub fn scene(&self) -> Option<&SceneFragment> {
        self.scene.as_ref()
    }

    /// Interactive controls, for the host's input plumbing
    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.controls
    }

    fn poll_model(&mut self) {
        if self.scene.is_some() {
            return;
        }
        match self.model.poll() {
            Some(Ok(fragment)) => {
                let sphere = estimate(&fragment);
                if sphere.is_degenerate() {
                    log::debug!("Fragment has no drawable geometry; keeping default framing");
                } else {
                    self.bounds = Some(sphere);
                    self.refit();
                }
                log::info!(
                    "Model loaded ({} drawables, radius {:.3})",
                    fragment.drawable_count(),
                    sphere.radius
                );
                self.scene = Some(fragment);
                if let Some(on_ready) = self.on_ready.take() {
                    on_ready();
                }
            }
            Some(Err(error)) => {
                // Recoverable: the loop keeps running against an empty
                // scene and the ready signal never fires.
                log::error!("Model resolution failed: {error}");
            }
            None => {}
        }
    }

    fn poll_layout(&mut self) {
        if self.sizing.poll(self.target.as_mut(), &mut self.camera) {
            self.refit();
        }
    }

    fn refit(&mut self) {
        let Some(sphere) = self.bounds else {
            return;
        };
        match self.fitter.fit(
            &sphere,
            self.sizing.viewport().aspect_ratio(),
            self.config.fov_degrees,
            self.config.fit_margin,
        ) {
            Ok(camera) => self.camera = camera,
            Err(error) => log::warn!("Camera fit rejected: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{model_channel, AssetError, ModelSender};
    use crate::render::lighting::LightRig;
    use crate::render::material::Material;
    use crate::render::primitives::uv_sphere;
    use crate::render::target::{DrawError, SurfaceExtent};
    use crate::scene::node::{Drawable, SceneNode};
    use crate::viewport::size_channel;
    use crate::viewport::visibility::visibility_channel;
    use approx::assert_relative_eq;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::mpsc;

    #[derive(Default)]
    struct TargetLog {
        resizes: Vec<SurfaceExtent>,
        draws: usize,
        disposals: usize,
        fail_draws: bool,
    }

    struct SharedTarget(Rc<RefCell<TargetLog>>);

    impl RenderTarget for SharedTarget {
        fn resize(&mut self, extent: SurfaceExtent) {
            self.0.borrow_mut().resizes.push(extent);
        }

        fn draw(
            &mut self,
            _scene: &SceneFragment,
            _camera: &Camera,
            _lights: &LightRig,
        ) -> Result<(), DrawError> {
            let mut log = self.0.borrow_mut();
            log.draws += 1;
            if log.fail_draws {
                Err(DrawError::Device("lost".into()))
            } else {
                Ok(())
            }
        }

        fn dispose(&mut self) {
            self.0.borrow_mut().disposals += 1;
        }
    }

    struct Rig {
        controller: ViewerController,
        target: Rc<RefCell<TargetLog>>,
        size_tx: mpsc::Sender<(u32, u32)>,
        visibility_tx: mpsc::Sender<f32>,
        model_tx: Option<ModelSender>,
        ready_count: Rc<RefCell<u32>>,
    }

    fn rig_with(config: ViewerConfig, width: u32, height: u32) -> Rig {
        let target = Rc::new(RefCell::new(TargetLog::default()));
        let (size_tx, size_source) = size_channel();
        let (visibility_tx, visibility_source) = visibility_channel();
        let (model_tx, model) = model_channel();
        let ready_count = Rc::new(RefCell::new(0));
        let ready = Rc::clone(&ready_count);

        let controller = ViewerController::new(
            config,
            HostBindings {
                render_target: Some(Box::new(SharedTarget(Rc::clone(&target)))),
                region: HostRegion {
                    kind: RegionKind::Bounded,
                    width,
                    height,
                    device_pixel_ratio: 2.0,
                },
                size_source: Box::new(size_source),
                visibility_source: Box::new(visibility_source),
                model,
                on_ready: Some(Box::new(move || *ready.borrow_mut() += 1)),
            },
        )
        .unwrap();

        Rig {
            controller,
            target,
            size_tx,
            visibility_tx,
            model_tx: Some(model_tx),
            ready_count,
        }
    }

    fn rig() -> Rig {
        rig_with(ViewerConfig::default(), 1600, 900)
    }

    fn sphere_fragment() -> SceneFragment {
        SceneFragment::new(SceneNode::Drawable(Drawable::new(
            uv_sphere(1.0, 24, 16),
            Material::new().with_metallic(1.0).with_roughness(0.35),
        )))
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_missing_render_target_is_fatal() {
        let (_size_tx, size_source) = size_channel();
        let (_visibility_tx, visibility_source) = visibility_channel();
        let (_model_tx, model) = model_channel();
        let result = ViewerController::new(
            ViewerConfig::default(),
            HostBindings {
                render_target: None,
                region: HostRegion {
                    kind: RegionKind::WholeWindow,
                    width: 800,
                    height: 600,
                    device_pixel_ratio: 1.0,
                },
                size_source: Box::new(size_source),
                visibility_source: Box::new(visibility_source),
                model,
                on_ready: None,
            },
        );
        assert!(matches!(result, Err(ControllerError::MissingRenderTarget)));
    }

    #[test]
    fn test_idles_until_model_arrives_then_renders() {
        let mut rig = rig();
        assert_eq!(rig.controller.tick(ms(0)), TickOutcome::Idle);
        assert_eq!(rig.target.borrow().draws, 0);
        assert_eq!(*rig.ready_count.borrow(), 0);

        rig.model_tx.take().unwrap().send(Ok(sphere_fragment()));
        assert_eq!(rig.controller.tick(ms(16)), TickOutcome::Rendered);
        assert!(rig.controller.is_loaded());
        assert_eq!(rig.target.borrow().draws, 1);
        assert_eq!(*rig.ready_count.borrow(), 1);

        // The ready signal is one-shot.
        assert_eq!(rig.controller.tick(ms(32)), TickOutcome::Rendered);
        assert_eq!(*rig.ready_count.borrow(), 1);
    }

    #[test]
    fn test_camera_framed_to_model_bounds() {
        let mut rig = rig();
        rig.model_tx.take().unwrap().send(Ok(sphere_fragment()));
        rig.controller.tick(ms(0));

        // The sphere's box has corners at sqrt(3) from its center.
        let radius = 3.0_f32.sqrt();
        let half_v = 30.0_f32.to_radians();
        let half_h = (half_v.tan() * (16.0 / 9.0)).atan();
        let expected = (radius * 1.28 / half_v.tan()).max(radius * 1.28 / half_h.tan());
        assert_relative_eq!(rig.controller.camera().target_distance(), expected, epsilon = 1e-3);
        assert_relative_eq!(rig.controller.camera().aspect, 16.0 / 9.0, epsilon = 1e-6);
    }

    #[test]
    fn test_spin_is_scaled_by_wall_clock() {
        let mut rig = rig();
        rig.model_tx.take().unwrap().send(Ok(sphere_fragment()));
        rig.controller.tick(ms(0));
        rig.controller.tick(ms(500));
        let scene = rig.controller.scene().unwrap();
        // Default spin rate is 0.1 rad/s; half a second has passed.
        assert_relative_eq!(scene.spin_angle(), 0.05, epsilon = 1e-5);
    }

    #[test]
    fn test_hidden_viewer_pauses_without_catchup_burst() {
        let mut rig = rig();
        rig.model_tx.take().unwrap().send(Ok(sphere_fragment()));
        rig.controller.tick(ms(0));
        rig.controller.tick(ms(2000));
        let angle_at_hide = rig.controller.scene().unwrap().spin_angle();

        rig.visibility_tx.send(0.0).unwrap();
        // Three seconds of gated ticks: no draws, no spin, no elapsed time.
        for stamp in [2016, 3000, 4000, 5000] {
            assert_eq!(rig.controller.tick(ms(stamp)), TickOutcome::Idle);
        }
        assert_relative_eq!(rig.controller.scene().unwrap().spin_angle(), angle_at_hide);
        let draws_while_hidden = rig.target.borrow().draws;

        rig.visibility_tx.send(1.0).unwrap();
        assert_eq!(rig.controller.tick(ms(5016)), TickOutcome::Rendered);
        let angle_after = rig.controller.scene().unwrap().spin_angle();
        // One real frame interval of spin, not three seconds of catch-up.
        assert_relative_eq!(angle_after - angle_at_hide, 0.1 * 0.016, epsilon = 1e-5);
        assert_eq!(rig.target.borrow().draws, draws_while_hidden + 1);
    }

    #[test]
    fn test_resize_updates_projection_and_backing_surface() {
        let mut rig = rig_with(ViewerConfig::default(), 400, 300);
        rig.model_tx.take().unwrap().send(Ok(sphere_fragment()));
        rig.controller.tick(ms(0));
        let distance_before = rig.controller.camera().target_distance();

        rig.size_tx.send((800, 300)).unwrap();
        rig.controller.tick(ms(16));

        assert_relative_eq!(rig.controller.camera().aspect, 8.0 / 3.0, epsilon = 1e-6);
        let resizes = &rig.target.borrow().resizes;
        assert_eq!(resizes.last(), Some(&SurfaceExtent { width: 1600, height: 600 }));
        // Wider region, same tight vertical axis: the fit distance holds.
        assert_relative_eq!(
            rig.controller.camera().target_distance(),
            distance_before,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_asset_failure_keeps_loop_alive_and_ready_unfired() {
        let mut rig = rig();
        rig.model_tx
            .take()
            .unwrap()
            .send(Err(AssetError::Fetch("unreachable".into())));
        for stamp in [0, 16, 32] {
            assert_eq!(rig.controller.tick(ms(stamp)), TickOutcome::Idle);
        }
        assert!(!rig.controller.is_loaded());
        assert_eq!(*rig.ready_count.borrow(), 0);
    }

    #[test]
    fn test_draw_failure_does_not_stop_the_loop() {
        let mut rig = rig();
        rig.target.borrow_mut().fail_draws = true;
        rig.model_tx.take().unwrap().send(Ok(sphere_fragment()));
        assert_eq!(rig.controller.tick(ms(0)), TickOutcome::Rendered);
        assert_eq!(rig.controller.tick(ms(16)), TickOutcome::Rendered);
        assert_eq!(rig.target.borrow().draws, 2);
    }

    #[test]
    fn test_dispose_tears_down_once() {
        let mut rig = rig();
        rig.model_tx.take().unwrap().send(Ok(sphere_fragment()));
        rig.controller.tick(ms(0));

        rig.controller.dispose();
        assert!(rig.controller.is_disposed());
        assert_eq!(rig.target.borrow().disposals, 1);
        assert_eq!(rig.controller.tick(ms(16)), TickOutcome::Halted);
        assert_eq!(rig.target.borrow().draws, 1);

        // Second disposal is a no-op, not an error.
        rig.controller.dispose();
        assert_eq!(rig.target.borrow().disposals, 1);

        let scene = rig.controller.scene().unwrap();
        assert!(scene.is_disposed());
        scene.visit_drawables(&mut |drawable| {
            assert!(drawable.mesh.is_released());
            assert!(drawable.materials.iter().all(Material::is_released));
        });
    }

    #[test]
    fn test_late_model_after_dispose_is_ignored() {
        let mut rig = rig();
        rig.controller.dispose();
        rig.model_tx.take().unwrap().send(Ok(sphere_fragment()));
        assert_eq!(rig.controller.tick(ms(0)), TickOutcome::Halted);
        assert!(!rig.controller.is_loaded());
        assert_eq!(*rig.ready_count.borrow(), 0);
    }

    #[test]
    fn test_degenerate_fragment_keeps_default_framing_but_fires_ready() {
        let mut rig = rig();
        let default_distance = rig.controller.camera().target_distance();
        rig.model_tx
            .take()
            .unwrap()
            .send(Ok(SceneFragment::new(SceneNode::Group(Vec::new()))));
        assert_eq!(rig.controller.tick(ms(0)), TickOutcome::Rendered);
        assert_relative_eq!(rig.controller.camera().target_distance(), default_distance);
        assert_eq!(*rig.ready_count.borrow(), 1);
    }
}
