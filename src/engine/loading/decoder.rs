use bevy::prelude::*;
use thiserror::Error;

use crate::engine::scene::bounds::SceneBounds;

/// Terminal decode failures. Exactly one of `Ok`/`Err` comes out of
/// [`decode_scene`] per submission; progress may interleave before it.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to parse GLB container: {0}")]
    Parse(#[from] gltf::Error),
    #[error("mesh primitive has no vertex positions")]
    MissingPositions,
    #[error("scene contains no renderable geometry")]
    EmptyScene,
}

/// One triangle-list primitive with its vertex streams and local bounds.
pub struct DecodedPrimitive {
    pub positions: Vec<[f32; 3]>,
    pub normals: Option<Vec<[f32; 3]>>,
    pub uvs: Option<Vec<[f32; 2]>>,
    pub indices: Option<Vec<u32>>,
    pub material: Option<usize>,
    pub bounds: SceneBounds,
}

pub struct DecodedMesh {
    pub primitives: Vec<DecodedPrimitive>,
}

/// PBR factors plus an optional base-colour texture reference.
pub struct DecodedMaterial {
    pub base_colour: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub base_colour_texture: Option<usize>,
    pub double_sided: bool,
}

/// RGBA8 pixels ready for GPU upload.
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// A scene node that references a mesh, flattened to its world transform.
pub struct DecodedNode {
    pub transform: Mat4,
    pub mesh: usize,
}

/// Flattened decode output: everything the spawner needs, nothing owned by
/// the importer any more.
pub struct DecodedScene {
    pub meshes: Vec<DecodedMesh>,
    pub materials: Vec<DecodedMaterial>,
    pub images: Vec<Option<DecodedImage>>,
    pub nodes: Vec<DecodedNode>,
}

impl DecodedScene {
    /// World-space bounds over every node's geometry.
    pub fn bounds(&self) -> Option<SceneBounds> {
        let mut bounds: Option<SceneBounds> = None;
        for node in &self.nodes {
            for primitive in &self.meshes[node.mesh].primitives {
                let world = primitive.bounds.transformed(&node.transform);
                bounds = Some(match bounds {
                    Some(current) => current.union(&world),
                    None => world,
                });
            }
        }
        bounds
    }
}

/// Decode a GLB byte buffer into a flattened scene.
///
/// `on_progress` receives fractions in [0, 1] as primitives are extracted;
/// it is never called when the primitive count is unknown or zero.
pub fn decode_scene(
    bytes: &[u8],
    on_progress: &mut dyn FnMut(f32),
) -> Result<DecodedScene, DecodeError> {
    let (document, buffers, images) = gltf::import_slice(bytes)?;

    let materials = document
        .materials()
        .map(|material| {
            let pbr = material.pbr_metallic_roughness();
            DecodedMaterial {
                base_colour: pbr.base_color_factor(),
                metallic: pbr.metallic_factor(),
                roughness: pbr.roughness_factor(),
                base_colour_texture: pbr
                    .base_color_texture()
                    .map(|info| info.texture().source().index()),
                double_sided: material.double_sided(),
            }
        })
        .collect();

    let images = images.iter().map(convert_image).collect();

    let total: usize = document.meshes().map(|mesh| mesh.primitives().len()).sum();
    let mut done = 0usize;

    let mut meshes = Vec::new();
    for mesh in document.meshes() {
        let mut primitives = Vec::new();
        for primitive in mesh.primitives() {
            if let Some(decoded) = decode_primitive(&primitive, &buffers)? {
                primitives.push(decoded);
            }
            done += 1;
            if total > 0 {
                on_progress(done as f32 / total as f32);
            }
        }
        meshes.push(DecodedMesh { primitives });
    }

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or(DecodeError::EmptyScene)?;

    let mut nodes = Vec::new();
    for node in scene.nodes() {
        flatten_node(&node, Mat4::IDENTITY, &mut nodes);
    }

    let renderable = nodes
        .iter()
        .any(|node| !meshes[node.mesh].primitives.is_empty());
    if !renderable {
        return Err(DecodeError::EmptyScene);
    }

    Ok(DecodedScene {
        meshes,
        materials,
        images,
        nodes,
    })
}

/// Depth-first walk accumulating world transforms; only mesh-bearing nodes
/// are kept.
fn flatten_node(node: &gltf::Node, parent: Mat4, out: &mut Vec<DecodedNode>) {
    let transform = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        out.push(DecodedNode {
            transform,
            mesh: mesh.index(),
        });
    }

    for child in node.children() {
        flatten_node(&child, transform, out);
    }
}

/// Extract one primitive's vertex streams. Non-triangle primitives are
/// skipped; a triangle primitive without positions fails the load.
fn decode_primitive(
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
) -> Result<Option<DecodedPrimitive>, DecodeError> {
    if primitive.mode() != gltf::mesh::Mode::Triangles {
        warn!("skipping non-triangle primitive ({:?})", primitive.mode());
        return Ok(None);
    }

    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

    let positions: Vec<[f32; 3]> = reader
        .read_positions()
        .ok_or(DecodeError::MissingPositions)?
        .collect();
    let bounds = SceneBounds::from_points(positions.iter().map(|p| Vec3::from(*p)))
        .ok_or(DecodeError::MissingPositions)?;

    let normals = reader.read_normals().map(|normals| normals.collect());
    let uvs = reader
        .read_tex_coords(0)
        .map(|uvs| uvs.into_f32().collect());
    let indices = reader.read_indices().map(|indices| indices.into_u32().collect());

    Ok(Some(DecodedPrimitive {
        positions,
        normals,
        uvs,
        indices,
        material: primitive.material().index(),
        bounds,
    }))
}

/// Normalise importer pixel formats to RGBA8. Formats outside the 8-bit
/// RGB family lose their texture (factors still apply) rather than failing
/// the whole load.
fn convert_image(data: &gltf::image::Data) -> Option<DecodedImage> {
    use gltf::image::Format;

    let rgba = match data.format {
        Format::R8G8B8A8 => data.pixels.clone(),
        Format::R8G8B8 => data
            .pixels
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], u8::MAX])
            .collect(),
        other => {
            warn!("skipping texture with unsupported pixel format {other:?}");
            return None;
        }
    };

    Some(DecodedImage {
        width: data.width,
        height: data.height,
        rgba,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Builds a minimal valid GLB: one triangle-list primitive spanning
    /// x in [0,10], y in [0,2], z in [0,4].
    fn triangle_glb() -> Vec<u8> {
        let positions: [f32; 9] = [
            0.0, 0.0, 0.0, //
            10.0, 2.0, 0.0, //
            0.0, 0.0, 4.0,
        ];
        let indices: [u16; 3] = [0, 1, 2];

        let mut bin: Vec<u8> = Vec::new();
        bin.extend_from_slice(bytemuck::cast_slice(&positions));
        bin.extend_from_slice(bytemuck::cast_slice(&indices));
        let bin_len = bin.len();
        while bin.len() % 4 != 0 {
            bin.push(0);
        }

        let json = serde_json::json!({
            "asset": { "version": "2.0" },
            "buffers": [{ "byteLength": bin_len }],
            "bufferViews": [
                { "buffer": 0, "byteOffset": 0, "byteLength": 36, "target": 34962 },
                { "buffer": 0, "byteOffset": 36, "byteLength": 6, "target": 34963 }
            ],
            "accessors": [
                {
                    "bufferView": 0,
                    "componentType": 5126,
                    "count": 3,
                    "type": "VEC3",
                    "min": [0.0, 0.0, 0.0],
                    "max": [10.0, 2.0, 4.0]
                },
                { "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" }
            ],
            "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 }, "indices": 1 }] }],
            "nodes": [{ "mesh": 0 }],
            "scenes": [{ "nodes": [0] }],
            "scene": 0
        });
        let mut json_bytes = serde_json::to_vec(&json).unwrap();
        while json_bytes.len() % 4 != 0 {
            json_bytes.push(b' ');
        }

        let total_len = 12 + 8 + json_bytes.len() + 8 + bin.len();

        let mut glb: Vec<u8> = Vec::with_capacity(total_len);
        glb.extend_from_slice(&0x4654_6C67u32.to_le_bytes()); // "glTF"
        glb.extend_from_slice(&2u32.to_le_bytes());
        glb.extend_from_slice(&(total_len as u32).to_le_bytes());
        glb.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
        glb.extend_from_slice(&0x4E4F_534Au32.to_le_bytes()); // "JSON"
        glb.extend_from_slice(&json_bytes);
        glb.extend_from_slice(&(bin.len() as u32).to_le_bytes());
        glb.extend_from_slice(&0x004E_4942u32.to_le_bytes()); // "BIN\0"
        glb.extend_from_slice(&bin);
        glb
    }

    #[test]
    fn test_decodes_triangle_scene() {
        let glb = triangle_glb();
        let mut fractions = Vec::new();
        let scene = decode_scene(&glb, &mut |fraction| fractions.push(fraction)).unwrap();

        assert_eq!(scene.meshes.len(), 1);
        assert_eq!(scene.meshes[0].primitives.len(), 1);
        assert_eq!(scene.nodes.len(), 1);
        assert_eq!(scene.meshes[0].primitives[0].positions.len(), 3);
        assert_eq!(
            scene.meshes[0].primitives[0].indices.as_deref(),
            Some(&[0u32, 1, 2][..])
        );

        // Terminal progress reaches 1.0 exactly once per primitive.
        assert_eq!(fractions, vec![1.0]);

        let bounds = scene.bounds().unwrap();
        assert_relative_eq!(bounds.min.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(bounds.max.x, 10.0, epsilon = 1e-6);
        assert_relative_eq!(bounds.max.y, 2.0, epsilon = 1e-6);
        assert_relative_eq!(bounds.max.z, 4.0, epsilon = 1e-6);
    }

    #[test]
    fn test_garbage_bytes_fail_with_parse_error() {
        let mut calls = 0usize;
        let result = decode_scene(b"not a glb at all", &mut |_| calls += 1);

        assert!(matches!(result, Err(DecodeError::Parse(_))));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_scene_without_geometry_is_rejected() {
        let json = serde_json::json!({
            "asset": { "version": "2.0" },
            "nodes": [{}],
            "scenes": [{ "nodes": [0] }],
            "scene": 0
        });
        let mut json_bytes = serde_json::to_vec(&json).unwrap();
        while json_bytes.len() % 4 != 0 {
            json_bytes.push(b' ');
        }

        let total_len = 12 + 8 + json_bytes.len();
        let mut glb: Vec<u8> = Vec::with_capacity(total_len);
        glb.extend_from_slice(&0x4654_6C67u32.to_le_bytes());
        glb.extend_from_slice(&2u32.to_le_bytes());
        glb.extend_from_slice(&(total_len as u32).to_le_bytes());
        glb.extend_from_slice(&(json_bytes.len() as u32).to_le_bytes());
        glb.extend_from_slice(&0x4E4F_534Au32.to_le_bytes());
        glb.extend_from_slice(&json_bytes);

        let result = decode_scene(&glb, &mut |_| {});
        assert!(matches!(result, Err(DecodeError::EmptyScene)));
    }

    #[test]
    fn test_decode_succeeds_after_a_failed_attempt() {
        // A failed parse leaves nothing behind that affects the next call.
        assert!(decode_scene(&[0u8; 16], &mut |_| {}).is_err());
        assert!(decode_scene(&triangle_glb(), &mut |_| {}).is_ok());
    }

    #[test]
    fn test_world_bounds_follow_node_transform() {
        let glb = triangle_glb();
        let mut scene = decode_scene(&glb, &mut |_| {}).unwrap();
        scene.nodes[0].transform = Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0));

        let bounds = scene.bounds().unwrap();
        assert_relative_eq!(bounds.min.x, 5.0, epsilon = 1e-6);
        assert_relative_eq!(bounds.max.x, 15.0, epsilon = 1e-6);
    }
}
