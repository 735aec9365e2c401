use bevy::prelude::*;
use serde::Deserialize;

use crate::constants::ENVIRONMENT_MANIFEST_PATH;

/// Environment lighting manifest loaded from `assets/environment/manifest.json`.
///
/// Points at pre-filtered diffuse/specular light probes (KTX2) and carries
/// the lighting intensity applied to compatible materials.
#[derive(Debug, Clone, Deserialize, Asset, TypePath)]
pub struct EnvironmentManifest {
    pub diffuse_map: String,
    pub specular_map: String,
    pub intensity: f32,
}

#[derive(Resource, Default)]
pub struct EnvironmentLoader {
    handle: Option<Handle<EnvironmentManifest>>,
    applied: bool,
}

/// Start loading the environment manifest at startup.
pub fn start_environment_load(
    mut loader: ResMut<EnvironmentLoader>,
    asset_server: Res<AssetServer>,
) {
    loader.handle = Some(asset_server.load(ENVIRONMENT_MANIFEST_PATH));
}

/// Attach the environment map to the viewer camera once the manifest is in.
///
/// Runs until applied; a missing or malformed manifest is logged once and
/// the viewer stays on the fallback fill light.
pub fn apply_environment_when_ready(
    mut loader: ResMut<EnvironmentLoader>,
    manifests: Res<Assets<EnvironmentManifest>>,
    asset_server: Res<AssetServer>,
    camera: Query<Entity, With<Camera3d>>,
    mut commands: Commands,
) {
    if loader.applied {
        return;
    }

    let Some(handle) = loader.handle.clone() else {
        return;
    };

    if matches!(
        asset_server.get_load_state(&handle),
        Some(bevy::asset::LoadState::Failed(_))
    ) {
        warn!("environment manifest failed to load, continuing without image-based lighting");
        loader.applied = true;
        return;
    }

    if let Some(manifest) = manifests.get(&handle) {
        let Ok(camera_entity) = camera.single() else {
            return;
        };

        commands.entity(camera_entity).insert(EnvironmentMapLight {
            diffuse_map: asset_server.load(&manifest.diffuse_map),
            specular_map: asset_server.load(&manifest.specular_map),
            intensity: manifest.intensity,
            ..default()
        });

        loader.applied = true;
        info!(
            "✓ Environment probes applied (intensity {})",
            manifest.intensity
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_deserialises() {
        let manifest: EnvironmentManifest = serde_json::from_str(
            r#"{
                "diffuse_map": "environment/diffuse_rgb9e5_zstd.ktx2",
                "specular_map": "environment/specular_rgb9e5_zstd.ktx2",
                "intensity": 900.0
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.diffuse_map, "environment/diffuse_rgb9e5_zstd.ktx2");
        assert_eq!(manifest.specular_map, "environment/specular_rgb9e5_zstd.ktx2");
        assert_eq!(manifest.intensity, 900.0);
    }
}
