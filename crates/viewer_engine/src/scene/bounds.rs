//! Bounding volume estimation for scene fragments
//!
//! The camera fit works from a single enclosing sphere, computed once after
//! the object settles into its rest orientation and treated as constant
//! until the fragment structurally changes.

use crate::foundation::math::Vec3;
use crate::scene::node::SceneFragment;

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy)]
pub struct AABB {
    /// Minimum corner of the bounding box
    pub min: Vec3,
    /// Maximum corner of the bounding box
    pub max: Vec3,
}

impl AABB {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box enclosing a set of points, or `None` for an empty set
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut aabb = Self::new(first, first);
        for point in points {
            aabb.grow(point);
        }
        Some(aabb)
    }

    /// Expand the box to include a point
    pub fn grow(&mut self, point: Vec3) {
        self.min = self.min.inf(&point);
        self.max = self.max.sup(&point);
    }

    /// Expand the box to include another box
    pub fn union(&mut self, other: &Self) {
        self.min = self.min.inf(&other.min);
        self.max = self.max.sup(&other.max);
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the extents (half-size) of the AABB
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }
}

/// Minimal enclosing sphere used to size the camera's framing distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Sphere center in fragment space
    pub center: Vec3,
    /// Sphere radius, `>= 0`
    pub radius: f32,
}

impl BoundingSphere {
    /// Zero-radius sphere at the origin ("nothing to frame")
    pub fn empty() -> Self {
        Self {
            center: Vec3::zeros(),
            radius: 0.0,
        }
    }

    /// Whether the sphere encloses no volume
    ///
    /// Callers skip camera fitting for degenerate spheres and keep the
    /// default framing instead.
    pub fn is_degenerate(&self) -> bool {
        self.radius <= 0.0
    }
}

/// Estimate the enclosing sphere of a fragment
///
/// Accumulates the axis-aligned box over all drawable geometry, then takes
/// the box center and the distance to the farthest box corner as the sphere.
/// A fragment with no drawable geometry yields a zero-radius sphere at the
/// origin rather than an error.
pub fn estimate(fragment: &SceneFragment) -> BoundingSphere {
    let mut bounds: Option<AABB> = None;
    fragment.visit_drawables(&mut |drawable| {
        let points = drawable
            .mesh
            .vertices()
            .iter()
            .map(|vertex| Vec3::from(vertex.position));
        if let Some(mesh_bounds) = AABB::from_points(points) {
            match bounds.as_mut() {
                Some(all) => all.union(&mesh_bounds),
                None => bounds = Some(mesh_bounds),
            }
        }
    });

    match bounds {
        Some(aabb) => BoundingSphere {
            center: aabb.center(),
            radius: aabb.extents().norm(),
        },
        None => BoundingSphere::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::material::Material;
    use crate::render::mesh::{Mesh, Vertex};
    use crate::scene::node::{Drawable, SceneNode};
    use approx::assert_relative_eq;

    fn cube_mesh(center: [f32; 3], half: f32) -> Mesh {
        let mut vertices = Vec::new();
        for corner in 0..8u32 {
            let x = if corner & 1 == 0 { -half } else { half };
            let y = if corner & 2 == 0 { -half } else { half };
            let z = if corner & 4 == 0 { -half } else { half };
            vertices.push(Vertex::new(
                [center[0] + x, center[1] + y, center[2] + z],
                [0.0, 1.0, 0.0],
                [0.0, 0.0],
            ));
        }
        // Index data is irrelevant to bounds; one face is enough.
        Mesh::new(vertices, vec![0, 1, 2, 2, 1, 3])
    }

    fn fragment_of(nodes: Vec<SceneNode>) -> SceneFragment {
        SceneFragment::new(SceneNode::Group(nodes))
    }

    #[test]
    fn test_unit_cube_sphere() {
        let fragment = fragment_of(vec![SceneNode::Drawable(Drawable::new(
            cube_mesh([0.0, 0.0, 0.0], 1.0),
            Material::new(),
        ))]);
        let sphere = estimate(&fragment);
        assert_relative_eq!(sphere.center, Vec3::zeros(), epsilon = 1e-6);
        assert_relative_eq!(sphere.radius, 3.0_f32.sqrt(), epsilon = 1e-6);
        assert!(!sphere.is_degenerate());
    }

    #[test]
    fn test_offset_geometry_offsets_center() {
        let fragment = fragment_of(vec![SceneNode::Drawable(Drawable::new(
            cube_mesh([2.0, 0.0, 0.0], 0.5),
            Material::new(),
        ))]);
        let sphere = estimate(&fragment);
        assert_relative_eq!(sphere.center, Vec3::new(2.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_multiple_drawables_union() {
        let fragment = fragment_of(vec![
            SceneNode::Drawable(Drawable::new(cube_mesh([-1.0, 0.0, 0.0], 0.5), Material::new())),
            SceneNode::Group(vec![SceneNode::Drawable(Drawable::new(
                cube_mesh([1.0, 0.0, 0.0], 0.5),
                Material::new(),
            ))]),
        ]);
        let sphere = estimate(&fragment);
        assert_relative_eq!(sphere.center, Vec3::zeros(), epsilon = 1e-6);
        // Box spans [-1.5, 1.5] x [-0.5, 0.5] x [-0.5, 0.5].
        let expected = Vec3::new(1.5, 0.5, 0.5).norm();
        assert_relative_eq!(sphere.radius, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_empty_fragment_is_degenerate() {
        let sphere = estimate(&fragment_of(Vec::new()));
        assert!(sphere.is_degenerate());
        assert_relative_eq!(sphere.center, Vec3::zeros());
    }
}
