use anyhow::{ensure, Context, Result};
use glam::{Mat3, Mat4, Vec3, Vec4};
use log::{debug, info, warn};
use std::path::Path;

use crate::error::ViewerError;
use crate::math::AABB;
use crate::types::Vertex;

/// A glTF document flattened into one indexed triangle mesh
#[derive(Debug, Clone)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub bounds: AABB,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Loads a .gltf or .glb file from disk
pub fn load_gltf_mesh(path: impl AsRef<Path>) -> Result<MeshData> {
    let path = path.as_ref();
    info!("Loading glTF file: {:?}", path);

    let (document, buffers, _images) =
        gltf::import(path).with_context(|| format!("Failed to load glTF file: {:?}", path))?;

    mesh_from_document(&document, &buffers)
}

/// Loads a glTF document held in memory (JSON with embedded buffers, or GLB)
pub fn load_gltf_mesh_from_slice(bytes: &[u8]) -> Result<MeshData> {
    let (document, buffers, _images) =
        gltf::import_slice(bytes).context("Failed to parse in-memory glTF document")?;

    mesh_from_document(&document, &buffers)
}

fn mesh_from_document(document: &gltf::Document, buffers: &[gltf::buffer::Data]) -> Result<MeshData> {
    debug!(
        "glTF document: {} scenes, {} nodes, {} meshes, {} materials",
        document.scenes().count(),
        document.nodes().count(),
        document.meshes().count(),
        document.materials().count()
    );

    let mut mesh = MeshData {
        vertices: Vec::new(),
        indices: Vec::new(),
        bounds: AABB::empty(),
    };

    // Only the default scene is shown when the document names one
    let scenes: Vec<gltf::Scene> = match document.default_scene() {
        Some(scene) => vec![scene],
        None => document.scenes().collect(),
    };

    for scene in scenes {
        for node in scene.nodes() {
            process_node(&node, buffers, &Mat4::IDENTITY, &mut mesh)?;
        }
    }

    if mesh.indices.is_empty() {
        return Err(ViewerError::NoGeometry.into());
    }

    info!(
        "Extracted {} vertices / {} triangles from glTF",
        mesh.vertices.len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    mesh: &mut MeshData,
) -> Result<()> {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(node_mesh) = node.mesh() {
        process_mesh(&node_mesh, buffers, &global_transform, mesh)?;
    }

    for child in node.children() {
        process_node(&child, buffers, &global_transform, mesh)?;
    }

    Ok(())
}

fn process_mesh(
    node_mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    transform: &Mat4,
    mesh: &mut MeshData,
) -> Result<()> {
    let normal_matrix = Mat3::from_mat4(*transform).inverse().transpose();

    for primitive in node_mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            warn!(
                "Skipping {:?} primitive in mesh {:?}",
                primitive.mode(),
                node_mesh.name()
            );
            continue;
        }

        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions: Vec<Vec3> = reader
            .read_positions()
            .context("Mesh primitive has no positions")?
            .map(|p| transform.transform_point3(Vec3::from_array(p)))
            .collect();
        let vertex_count = positions.len();

        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..vertex_count as u32).collect(),
        };
        let indices = &indices[..indices.len() - indices.len() % 3];
        ensure!(
            indices.iter().all(|&i| (i as usize) < vertex_count),
            "Mesh {:?} references a vertex outside its {} positions",
            node_mesh.name(),
            vertex_count
        );

        let normals: Vec<Vec3> = match reader.read_normals() {
            Some(normals) => normals
                .map(|n| (normal_matrix * Vec3::from_array(n)).normalize_or_zero())
                .collect(),
            None => smooth_normals(&positions, indices),
        };

        let base_color = Vec4::from_array(primitive.material().pbr_metallic_roughness().base_color_factor());
        let colors: Vec<Vec4> = match reader.read_colors(0) {
            Some(colors) => colors
                .into_rgba_f32()
                .map(|c| Vec4::from_array(c) * base_color)
                .collect(),
            None => vec![base_color; vertex_count],
        };

        for &p in &positions {
            mesh.bounds.include(p);
        }

        let base_vertex = mesh.vertices.len() as u32;
        mesh.vertices.extend((0..vertex_count).map(|i| {
            Vertex::new(
                positions[i].to_array(),
                normals.get(i).copied().unwrap_or(Vec3::Y).to_array(),
                colors.get(i).copied().unwrap_or(base_color).to_array(),
            )
        }));
        mesh.indices.extend(indices.iter().map(|&i| base_vertex + i));
    }

    Ok(())
}

/// Area-weighted vertex normals for primitives that ship without them
fn smooth_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }

    normals.into_iter().map(|n| n.normalize_or_zero()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smooth_normals_of_a_flat_quad_point_up_the_z_axis() {
        let positions = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let normals = smooth_normals(&positions, &[0, 1, 2, 0, 2, 3]);
        for n in normals {
            assert!((n - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn unreferenced_vertices_get_a_zero_normal() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::splat(5.0)];
        let normals = smooth_normals(&positions, &[0, 1, 2]);
        assert_eq!(normals[3], Vec3::ZERO);
    }
}
