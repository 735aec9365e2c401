use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_resource::{Extent3d, Face, TextureDimension, TextureFormat};

use crate::engine::loading::decoder::{DecodedImage, DecodedPrimitive, DecodedScene};
use crate::engine::scene::normalise::NormaliseTransform;

/// Marker for the normalisation root of every inserted model.
#[derive(Component)]
pub struct ViewerAsset;

/// Insert a decoded scene under a normalisation root.
///
/// Hierarchy: root (uniform fit scale) → pivot (centring offset) → one
/// entity per mesh-bearing node at its world transform → one entity per
/// primitive. Insertion is additive; earlier models stay in the scene.
pub fn spawn_decoded_scene(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    images: &mut Assets<Image>,
    scene: &DecodedScene,
    normalise: &NormaliseTransform,
) -> Entity {
    // Upload textures once; handles stay aligned with decoder indices.
    let image_handles: Vec<Option<Handle<Image>>> = scene
        .images
        .iter()
        .map(|image| {
            image
                .as_ref()
                .map(|image| images.add(create_image(image)))
        })
        .collect();

    let material_handles: Vec<Handle<StandardMaterial>> = scene
        .materials
        .iter()
        .map(|material| {
            let base_colour_texture = material
                .base_colour_texture
                .and_then(|index| image_handles.get(index).cloned().flatten());

            materials.add(StandardMaterial {
                base_color: Color::srgba(
                    material.base_colour[0],
                    material.base_colour[1],
                    material.base_colour[2],
                    material.base_colour[3],
                ),
                base_color_texture: base_colour_texture,
                metallic: material.metallic,
                perceptual_roughness: material.roughness,
                double_sided: material.double_sided,
                cull_mode: if material.double_sided {
                    None
                } else {
                    Some(Face::Back)
                },
                ..default()
            })
        })
        .collect();
    let fallback_material = materials.add(StandardMaterial::default());

    let root = commands
        .spawn((
            ViewerAsset,
            Transform::from_scale(Vec3::splat(normalise.scale)),
            Visibility::default(),
        ))
        .id();

    let pivot = commands
        .spawn((
            Transform::from_translation(normalise.offset),
            Visibility::default(),
        ))
        .id();
    commands.entity(root).add_child(pivot);

    for node in &scene.nodes {
        let node_entity = commands
            .spawn((Transform::from_matrix(node.transform), Visibility::default()))
            .id();
        commands.entity(pivot).add_child(node_entity);

        for primitive in &scene.meshes[node.mesh].primitives {
            let material = primitive
                .material
                .and_then(|index| material_handles.get(index).cloned())
                .unwrap_or_else(|| fallback_material.clone());

            let primitive_entity = commands
                .spawn((
                    Mesh3d(meshes.add(create_mesh(primitive))),
                    MeshMaterial3d(material),
                    Transform::default(),
                    Visibility::default(),
                ))
                .id();
            commands.entity(node_entity).add_child(primitive_entity);
        }
    }

    root
}

fn create_mesh(primitive: &DecodedPrimitive) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, primitive.positions.clone());

    if let Some(uvs) = &primitive.uvs {
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs.clone());
    }
    if let Some(indices) = &primitive.indices {
        mesh.insert_indices(Indices::U32(indices.clone()));
    }

    match &primitive.normals {
        Some(normals) => mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals.clone()),
        None => mesh.compute_normals(),
    }

    mesh
}

fn create_image(image: &DecodedImage) -> Image {
    Image::new(
        Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        image.rgba.clone(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::default(),
    )
}
