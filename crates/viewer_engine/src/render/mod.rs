//! Rendering module
//!
//! Camera math, scene resources, and the boundary trait for the external
//! rendering surface. No GPU backend lives in this crate; everything here
//! is backend-agnostic state the surface consumes per frame.

pub mod camera;
pub mod fit;
pub mod lighting;
pub mod material;
pub mod mesh;
pub mod primitives;
pub mod target;

pub use camera::Camera;
pub use fit::{CameraFitter, FitError};
pub use lighting::{Light, LightRig, LightType};
pub use material::Material;
pub use mesh::{Mesh, Vertex};
pub use target::{DrawError, RenderTarget, SurfaceExtent};
