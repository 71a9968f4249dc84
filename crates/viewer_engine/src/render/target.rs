//! Rendering-surface collaborator boundary
//!
//! The viewer does not own a GPU backend. The surrounding setup code
//! creates whatever surface it renders into and hands it across this trait;
//! the controller only sizes it, draws through it, and disposes it.

use thiserror::Error;

use crate::render::camera::Camera;
use crate::render::lighting::LightRig;
use crate::scene::node::SceneFragment;

/// Physical size of the backing surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceExtent {
    /// Backing width in physical pixels
    pub width: u32,
    /// Backing height in physical pixels
    pub height: u32,
}

/// Errors a render target may report from a draw
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrawError {
    /// The backing surface is temporarily or permanently gone
    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// The underlying device rejected the frame
    #[error("device error: {0}")]
    Device(String),
}

/// The rendering surface the viewer draws into
///
/// Implementations are expected to be cheap to `resize` (bursts collapse
/// upstream, but consecutive calls with the same extent may still occur)
/// and to tolerate `dispose` being their final call.
pub trait RenderTarget {
    /// Resize the backing surface
    fn resize(&mut self, extent: SurfaceExtent);

    /// Draw one frame of the scene through the camera
    fn draw(
        &mut self,
        scene: &SceneFragment,
        camera: &Camera,
        lights: &LightRig,
    ) -> Result<(), DrawError>;

    /// Release the surface's GPU resources
    ///
    /// Called exactly once, at controller teardown.
    fn dispose(&mut self);
}
