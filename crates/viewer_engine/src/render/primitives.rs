//! Procedural mesh primitives
//!
//! Generators for geometry used by demos and tests. Real deployments feed
//! the viewer an externally resolved asset; these exist so the pipeline can
//! be exercised without one.

use crate::foundation::math::constants::TAU;
use crate::render::mesh::{Mesh, Vertex};

/// Generate a UV sphere
///
/// `segments` is the longitude count (minimum 3), `rings` the latitude
/// count (minimum 2). Normals point radially outward.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> Mesh {
    let segments = segments.max(3);
    let rings = rings.max(2);

    let mut vertices = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
    for ring in 0..=rings {
        let theta = std::f32::consts::PI * ring as f32 / rings as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for segment in 0..=segments {
            let phi = TAU * segment as f32 / segments as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let normal = [sin_theta * cos_phi, cos_theta, sin_theta * sin_phi];
            vertices.push(Vertex::new(
                [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                normal,
                [
                    segment as f32 / segments as f32,
                    ring as f32 / rings as f32,
                ],
            ));
        }
    }

    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);
    let stride = segments + 1;
    for ring in 0..rings {
        for segment in 0..segments {
            let a = ring * stride + segment;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }

    Mesh::new(vertices, indices)
}

/// Generate a flat spur gear extruded along the Z axis
///
/// The silhouette alternates between the root and tip radii with slanted
/// tooth flanks; the caps get axial normals and the walls get flat outward
/// normals per face.
pub fn spur_gear(teeth: u32, root_radius: f32, tip_radius: f32, depth: f32) -> Mesh {
    let teeth = teeth.max(3);
    let tip_radius = tip_radius.max(root_radius);
    let half_depth = depth.abs() * 0.5;

    // Four silhouette points per tooth: root shelf, rising flank, tip
    // shelf, falling flank.
    let step = TAU / teeth as f32;
    let mut silhouette = Vec::with_capacity((teeth * 4) as usize);
    for tooth in 0..teeth {
        let base = tooth as f32 * step;
        for (offset, radius) in [
            (0.0, root_radius),
            (0.4, root_radius),
            (0.5, tip_radius),
            (0.9, tip_radius),
        ] {
            let angle = base + offset * step;
            silhouette.push([angle.cos() * radius, angle.sin() * radius]);
        }
    }

    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let rim = silhouette.len() as u32;

    // Front and back caps as fans around a center vertex.
    for (z, normal) in [(half_depth, [0.0, 0.0, 1.0]), (-half_depth, [0.0, 0.0, -1.0])] {
        let center = vertices.len() as u32;
        vertices.push(Vertex::new([0.0, 0.0, z], normal, [0.5, 0.5]));
        for point in &silhouette {
            vertices.push(Vertex::new([point[0], point[1], z], normal, [0.0, 0.0]));
        }
        for k in 0..rim {
            let next = (k + 1) % rim;
            if z > 0.0 {
                indices.extend_from_slice(&[center, center + 1 + k, center + 1 + next]);
            } else {
                indices.extend_from_slice(&[center, center + 1 + next, center + 1 + k]);
            }
        }
    }

    // Side walls, one flat-shaded quad per silhouette edge.
    for k in 0..rim as usize {
        let next = (k + 1) % rim as usize;
        let [x0, y0] = silhouette[k];
        let [x1, y1] = silhouette[next];
        let (dx, dy) = (x1 - x0, y1 - y0);
        let length = (dx * dx + dy * dy).sqrt().max(1e-6);
        // Outward normal of a counter-clockwise silhouette edge.
        let normal = [dy / length, -dx / length, 0.0];

        let base = vertices.len() as u32;
        vertices.push(Vertex::new([x0, y0, half_depth], normal, [0.0, 0.0]));
        vertices.push(Vertex::new([x1, y1, half_depth], normal, [1.0, 0.0]));
        vertices.push(Vertex::new([x1, y1, -half_depth], normal, [1.0, 1.0]));
        vertices.push(Vertex::new([x0, y0, -half_depth], normal, [0.0, 1.0]));
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Mesh::new(vertices, indices)
}
