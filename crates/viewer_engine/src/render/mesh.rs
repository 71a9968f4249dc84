//! Mesh representation for 3D models
//!
//! Geometry is delivered by the asset collaborator already placed in its
//! final local transform. The mesh owns its vertex and index buffers and
//! releases them exactly once on disposal.

/// 3D vertex data structure for rendering
///
/// Standard vertex layout with position, normal, and texture coordinate
/// data. The `#[repr(C)]` attribute keeps the memory layout stable for GPU
/// buffer uploads performed by the rendering surface.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in 3D space
    pub position: [f32; 3],

    /// Normal vector
    pub normal: [f32; 3],

    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Indexed triangle mesh owning its geometry buffers
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    released: bool,
}

impl Mesh {
    /// Create a mesh from vertex and index buffers
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self {
            vertices,
            indices,
            released: false,
        }
    }

    /// Vertex buffer contents
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Index buffer contents
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of triangles in the mesh
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Release the geometry buffers
    ///
    /// Safe to call more than once; only the first call frees anything.
    pub fn dispose(&mut self) {
        if self.released {
            return;
        }
        log::trace!(
            "Releasing mesh buffers ({} vertices, {} indices)",
            self.vertices.len(),
            self.indices.len()
        );
        self.vertices = Vec::new();
        self.indices = Vec::new();
        self.released = true;
    }

    /// Whether the geometry buffers have been released
    pub fn is_released(&self) -> bool {
        self.released
    }
}
