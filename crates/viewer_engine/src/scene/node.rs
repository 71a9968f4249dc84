//! Scene-graph fragment delivered by the asset collaborator
//!
//! The fragment is a tree of tagged nodes: drawables carrying geometry and
//! one or more materials, and groups carrying children. A closed variant set
//! keeps disposal and material handling exhaustive, with no runtime type
//! probing during traversal.

use crate::foundation::math::{Mat4, Unit, Vec3};
use crate::render::material::Material;
use crate::render::mesh::Mesh;

/// A drawable leaf: geometry plus the materials applied to it
///
/// Multi-material drawables are the norm for authored assets, so materials
/// are always a list even when there is only one entry.
#[derive(Debug, Clone)]
pub struct Drawable {
    /// Geometry buffers for this node
    pub mesh: Mesh,

    /// Materials applied to the geometry (at least one for visible output)
    pub materials: Vec<Material>,
}

impl Drawable {
    /// Create a drawable with a single material
    pub fn new(mesh: Mesh, material: Material) -> Self {
        Self {
            mesh,
            materials: vec![material],
        }
    }

    /// Create a drawable with several materials
    pub fn with_materials(mesh: Mesh, materials: Vec<Material>) -> Self {
        Self { mesh, materials }
    }

    fn dispose(&mut self) {
        self.mesh.dispose();
        for material in &mut self.materials {
            material.dispose();
        }
    }
}

/// A node in the scene-graph fragment
#[derive(Debug, Clone)]
pub enum SceneNode {
    /// Leaf node with drawable geometry
    Drawable(Drawable),

    /// Interior node grouping child nodes
    Group(Vec<SceneNode>),
}

impl SceneNode {
    /// Visit every drawable in the subtree, depth-first
    pub fn visit_drawables(&self, visit: &mut dyn FnMut(&Drawable)) {
        match self {
            Self::Drawable(drawable) => visit(drawable),
            Self::Group(children) => {
                for child in children {
                    child.visit_drawables(visit);
                }
            }
        }
    }

    /// Number of drawables in the subtree
    pub fn drawable_count(&self) -> usize {
        let mut count = 0;
        self.visit_drawables(&mut |_| count += 1);
        count
    }

    fn dispose(&mut self) {
        match self {
            Self::Drawable(drawable) => drawable.dispose(),
            Self::Group(children) => {
                for child in children {
                    child.dispose();
                }
            }
        }
    }
}

/// The loaded object: a node tree plus the spin state the loop animates
///
/// The tree arrives already centered at the origin in its final rest
/// orientation; the only transform the viewer applies afterwards is the
/// accumulated spin around a single axis.
#[derive(Debug, Clone)]
pub struct SceneFragment {
    root: SceneNode,
    spin_axis: Unit<Vec3>,
    spin_angle: f32,
    disposed: bool,
}

impl SceneFragment {
    /// Wrap a node tree, spinning around the Z axis
    pub fn new(root: SceneNode) -> Self {
        Self {
            root,
            spin_axis: Vec3::z_axis(),
            spin_angle: 0.0,
            disposed: false,
        }
    }

    /// Use a custom spin axis
    ///
    /// A zero-length axis is rejected and the current axis kept.
    pub fn with_spin_axis(mut self, axis: Vec3) -> Self {
        match Unit::try_new(axis, 1e-6) {
            Some(unit) => self.spin_axis = unit,
            None => log::warn!("Ignoring degenerate spin axis {:?}", axis),
        }
        self
    }

    /// The root of the node tree
    pub fn root(&self) -> &SceneNode {
        &self.root
    }

    /// Accumulated spin angle in radians
    pub fn spin_angle(&self) -> f32 {
        self.spin_angle
    }

    /// Advance the spin angle
    pub fn spin_by(&mut self, radians: f32) {
        self.spin_angle += radians;
    }

    /// Model matrix for the current spin state
    pub fn model_matrix(&self) -> Mat4 {
        nalgebra::Rotation3::from_axis_angle(&self.spin_axis, self.spin_angle).to_homogeneous()
    }

    /// Visit every drawable in the fragment, depth-first
    pub fn visit_drawables(&self, visit: &mut dyn FnMut(&Drawable)) {
        self.root.visit_drawables(visit);
    }

    /// Number of drawables in the fragment
    pub fn drawable_count(&self) -> usize {
        self.root.drawable_count()
    }

    /// Release every GPU-backed resource owned by the fragment
    ///
    /// Walks the whole tree, releasing geometry buffers and every material
    /// on every drawable. Calling it again is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        log::debug!("Disposing scene fragment ({} drawables)", self.drawable_count());
        self.root.dispose();
        self.disposed = true;
    }

    /// Whether the fragment's resources have been released
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::mesh::Vertex;
    use approx::assert_relative_eq;

    fn tri_mesh() -> Mesh {
        let vertices = vec![
            Vertex::new([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
            Vertex::new([1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
            Vertex::new([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
        ];
        Mesh::new(vertices, vec![0, 1, 2])
    }

    fn nested_fragment() -> SceneFragment {
        let multi = Drawable::with_materials(
            tri_mesh(),
            vec![Material::new(), Material::new().with_metallic(1.0)],
        );
        let root = SceneNode::Group(vec![
            SceneNode::Drawable(Drawable::new(tri_mesh(), Material::new())),
            SceneNode::Group(vec![SceneNode::Drawable(multi)]),
        ]);
        SceneFragment::new(root)
    }

    #[test]
    fn test_drawable_count_traverses_groups() {
        assert_eq!(nested_fragment().drawable_count(), 2);
    }

    #[test]
    fn test_spin_accumulates() {
        let mut fragment = nested_fragment();
        fragment.spin_by(0.25);
        fragment.spin_by(0.25);
        assert_relative_eq!(fragment.spin_angle(), 0.5);
    }

    #[test]
    fn test_dispose_releases_every_material() {
        let mut fragment = nested_fragment();
        fragment.dispose();
        assert!(fragment.is_disposed());

        let mut released = 0;
        fragment.visit_drawables(&mut |drawable| {
            assert!(drawable.mesh.is_released());
            for material in &drawable.materials {
                assert!(material.is_released());
                released += 1;
            }
        });
        assert_eq!(released, 3);

        // Second disposal must not panic or release again.
        fragment.dispose();
    }

    #[test]
    fn test_degenerate_spin_axis_is_ignored() {
        let fragment = nested_fragment().with_spin_axis(Vec3::zeros());
        assert_relative_eq!(fragment.model_matrix(), Mat4::identity());
    }
}
