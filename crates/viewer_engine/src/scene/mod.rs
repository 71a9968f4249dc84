//! Scene management
//!
//! The loaded object and its bounding volumes. The scene is owned
//! exclusively by the controller; nothing outside it mutates the fragment.

pub mod bounds;
pub mod node;

pub use bounds::{estimate, BoundingSphere, AABB};
pub use node::{Drawable, SceneFragment, SceneNode};
