//! # Viewer Engine
//!
//! Adaptive viewport controller for embedding a single rotating 3D object
//! inside a variably-sized host region and keeping it framed, performant,
//! and cleanly torn down.
//!
//! ## Features
//!
//! - **Aspect-proof framing**: the camera distance is computed from the
//!   object's bounding sphere against the tighter of the vertical and
//!   horizontal fields of view, so the object never clips in tall or wide
//!   containers
//! - **Layout reactive**: host-region size changes update the backing
//!   resolution and projection and re-run the fit, with bursts collapsed
//!   to the latest value
//! - **Suspend aware**: an off-screen region suspends all simulation and
//!   draw work; reopening resumes without a catch-up burst
//! - **Deterministic teardown**: one `dispose` call cancels the frame
//!   chain, detaches every observer, and releases every GPU-backed
//!   resource
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Instant;
//! use viewer_engine::prelude::*;
//!
//! # struct MySurface;
//! # impl RenderTarget for MySurface {
//! #     fn resize(&mut self, _extent: SurfaceExtent) {}
//! #     fn draw(&mut self, _s: &SceneFragment, _c: &Camera, _l: &LightRig) -> Result<(), DrawError> { Ok(()) }
//! #     fn dispose(&mut self) {}
//! # }
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (size_tx, size_source) = size_channel();
//!     let (visibility_tx, visibility_source) = visibility_channel();
//!     let (model_tx, model) = model_channel();
//!     // Hand size_tx/visibility_tx to layout observers and model_tx to
//!     // the asset loader, then drive ticks from the frame callback.
//!     let mut viewer = ViewerController::new(
//!         ViewerConfig::default(),
//!         HostBindings {
//!             render_target: Some(Box::new(MySurface)),
//!             region: HostRegion {
//!                 kind: RegionKind::Bounded,
//!                 width: 800,
//!                 height: 600,
//!                 device_pixel_ratio: 2.0,
//!             },
//!             size_source: Box::new(size_source),
//!             visibility_source: Box::new(visibility_source),
//!             model,
//!             on_ready: Some(Box::new(|| println!("ready"))),
//!         },
//!     )?;
//!     let epoch = Instant::now();
//!     loop {
//!         if viewer.tick(epoch.elapsed()) == TickOutcome::Halted {
//!             break;
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;

pub mod assets;
pub mod config;
pub mod controls;
pub mod render;
pub mod scene;
pub mod viewport;

mod controller;
mod render_loop;

pub use controller::{ControllerError, HostBindings, ReadyCallback, ViewerController};
pub use render_loop::{RenderLoop, TickOutcome};

/// Common imports for viewer users
pub mod prelude {
    pub use crate::{
        assets::{model_channel, AssetError, ModelReceiver, ModelSender},
        config::{Config, ConfigError, InteractionConfig, ViewerConfig},
        controls::OrbitControls,
        foundation::{
            math::{Mat4, Vec3},
            time::FrameClock,
        },
        render::{
            Camera, CameraFitter, DrawError, FitError, Light, LightRig, Material, Mesh,
            RenderTarget, SurfaceExtent, Vertex,
        },
        scene::{estimate, BoundingSphere, Drawable, SceneFragment, SceneNode},
        viewport::{
            size_channel,
            visibility::{visibility_channel, VisibilityGate, VisibilitySource},
            HostRegion, RegionKind, SizeSource, SizingReactor, Viewport,
        },
        ControllerError, HostBindings, ReadyCallback, TickOutcome, ViewerController,
    };
}
