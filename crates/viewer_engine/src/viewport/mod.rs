//! Viewport sizing
//!
//! Tracks the host region's pixel dimensions and keeps the rendering
//! surface resolution and the camera's projection aspect in step with them.
//! Size changes are delivered asynchronously by the host and drained to the
//! latest value at tick boundaries, so bursts of layout notifications never
//! accumulate work.

pub mod visibility;

use std::sync::mpsc;

use crate::render::camera::Camera;
use crate::render::target::{RenderTarget, SurfaceExtent};

/// Whether the viewer fills the whole window or a bounded sub-region
///
/// Exactly one sizing source is active per controller, chosen at
/// construction from this kind: a bounded region is measured by a layout
/// observer on the region itself, the whole window by window metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    /// A bounded element inside the page, measured by a layout observer
    Bounded,
    /// The entire window
    WholeWindow,
}

/// Description of the host region the viewer is embedded in
#[derive(Debug, Clone, Copy)]
pub struct HostRegion {
    /// Which sizing source the host wired up
    pub kind: RegionKind,
    /// Initial logical width in pixels
    pub width: u32,
    /// Initial logical height in pixels
    pub height: u32,
    /// Device pixel ratio reported by the host (uncapped)
    pub device_pixel_ratio: f32,
}

/// Current viewport state
///
/// Logical dimensions are floored to 1 pixel so aspect-ratio math stays
/// defined even when the host region collapses; the device pixel scale is
/// capped to bound GPU cost on high-density displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    pixel_ratio: f32,
}

impl Viewport {
    /// Create a viewport, clamping size and capping the pixel ratio
    ///
    /// Ratios below the cap pass through unchanged (hosts may report values
    /// under 1 when zoomed out); a non-positive ratio falls back to 1.
    pub fn new(width: u32, height: u32, device_pixel_ratio: f32, pixel_ratio_cap: f32) -> Self {
        let pixel_ratio = if device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(pixel_ratio_cap.max(1.0))
        } else {
            1.0
        };
        Self {
            width: width.max(1),
            height: height.max(1),
            pixel_ratio,
        }
    }

    /// Logical width in pixels (>= 1)
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Logical height in pixels (>= 1)
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Capped device pixel scale applied to the backing resolution
    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Projection aspect ratio (width / height)
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Backing resolution: logical size scaled by the capped pixel ratio
    pub fn physical_extent(&self) -> SurfaceExtent {
        SurfaceExtent {
            width: ((self.width as f32 * self.pixel_ratio).round() as u32).max(1),
            height: ((self.height as f32 * self.pixel_ratio).round() as u32).max(1),
        }
    }

    /// Update the logical size, flooring both axes to 1 pixel
    ///
    /// Returns true when the stored size actually changed.
    pub fn set_logical_size(&mut self, width: u32, height: u32) -> bool {
        let (width, height) = (width.max(1), height.max(1));
        if width == self.width && height == self.height {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }
}

/// Source of host-region size notifications
pub trait SizeSource {
    /// Latest size observed since the last poll, if any
    ///
    /// Implementations collapse bursts: only the newest value is returned
    /// and everything older is discarded.
    fn poll_latest(&mut self) -> Option<(u32, u32)>;

    /// Stop observing; subsequent polls return nothing
    fn detach(&mut self);
}

/// Channel-backed size source fed by host layout callbacks
pub struct ChannelSizeSource {
    receiver: Option<mpsc::Receiver<(u32, u32)>>,
}

impl SizeSource for ChannelSizeSource {
    fn poll_latest(&mut self) -> Option<(u32, u32)> {
        self.receiver.as_ref().and_then(|rx| rx.try_iter().last())
    }

    fn detach(&mut self) {
        self.receiver = None;
    }
}

/// Create a connected sender/source pair for size notifications
pub fn size_channel() -> (mpsc::Sender<(u32, u32)>, ChannelSizeSource) {
    let (sender, receiver) = mpsc::channel();
    (
        sender,
        ChannelSizeSource {
            receiver: Some(receiver),
        },
    )
}

/// Keeps surface resolution and camera aspect in step with the host region
///
/// The reactor owns the viewport state and the active sizing source. It
/// never touches the camera's distance; refitting after a layout change is
/// the caller's concern, once a usable bounding sphere exists.
pub struct SizingReactor {
    source: Box<dyn SizeSource>,
    viewport: Viewport,
}

impl SizingReactor {
    /// Create a reactor over the active sizing source
    pub fn new(source: Box<dyn SizeSource>, viewport: Viewport) -> Self {
        Self { source, viewport }
    }

    /// Current viewport state
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Drain pending size notifications and apply the newest one
    ///
    /// Returns true when the viewport changed, in which case the target has
    /// been resized and the camera's aspect ratio updated.
    pub fn poll(&mut self, target: &mut dyn RenderTarget, camera: &mut Camera) -> bool {
        let Some((width, height)) = self.source.poll_latest() else {
            return false;
        };
        if !self.viewport.set_logical_size(width, height) {
            return false;
        }
        let extent = self.viewport.physical_extent();
        log::debug!(
            "Host region resized to {}x{} (backing {}x{})",
            self.viewport.width(),
            self.viewport.height(),
            extent.width,
            extent.height
        );
        target.resize(extent);
        camera.set_aspect_ratio(self.viewport.aspect_ratio());
        true
    }

    /// Detach the underlying size observer
    pub fn detach(&mut self) {
        self.source.detach();
    }
}
