// Standard library and external crates
use bevy::asset::AssetMetaCheck;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

// Crate engine modules
use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, INITIAL_ORBIT_DISTANCE};
use crate::engine::camera::orbit_camera::{OrbitCamera, camera_controller};
use crate::engine::core::app_state::LoadState;
use crate::engine::core::window_config::create_window_config;
use crate::engine::intake::{IntakeQueue, drain_intake};
use crate::engine::loading::decode_task::{
    ActiveDecode, PendingSubmission, poll_decode, start_decode,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::environment::{
    EnvironmentLoader, EnvironmentManifest, apply_environment_when_ready, start_environment_load,
};
use crate::engine::ui::overlay::{
    StatusNotice, fps_text_update_system, hide_loading_overlay, show_loading_overlay,
    spawn_overlay, sync_status_notice, update_progress_bar,
};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers EnvironmentManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<EnvironmentManifest>::new(&["json"]))
        .init_state::<LoadState>()
        .insert_resource(ClearColor(Color::WHITE));

    // Initialise resources early
    app.init_resource::<IntakeQueue>()
        .init_resource::<LoadingProgress>()
        .init_resource::<EnvironmentLoader>()
        .init_resource::<OrbitCamera>()
        .init_resource::<StatusNotice>();

    app.add_systems(Startup, (setup, spawn_overlay, start_environment_load));

    #[cfg(target_arch = "wasm32")]
    {
        app.add_systems(Startup, crate::engine::intake::web::setup_dom_intake);
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(
            Update,
            (
                crate::engine::intake::native::handle_dropped_files,
                crate::engine::intake::native::open_file_dialog,
            ),
        );
    }

    // Load pipeline and runtime systems
    app.add_systems(
        Update,
        (
            drain_intake,
            start_decode.run_if(resource_exists::<PendingSubmission>),
            poll_decode.run_if(resource_exists::<ActiveDecode>),
            apply_environment_when_ready,
            update_progress_bar.run_if(in_state(LoadState::Loading)),
            sync_status_notice,
            camera_controller,
            fps_text_update_system,
        ),
    )
    .add_systems(OnEnter(LoadState::Loading), show_loading_overlay)
    .add_systems(OnExit(LoadState::Loading), hide_loading_overlay);

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}

/// Camera and fallback lighting. Image-based lighting is attached once the
/// environment manifest resolves.
fn setup(mut commands: Commands) {
    spawn_viewer_camera(&mut commands);
    spawn_fill_lighting(&mut commands);
}

fn spawn_viewer_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Tonemapping::AcesFitted,
        Transform::from_xyz(0.0, 0.0, INITIAL_ORBIT_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn spawn_fill_lighting(commands: &mut Commands) {
    // Soft fill so a model dropped before the environment resolves is visible.
    commands.spawn((
        DirectionalLight {
            illuminance: 2_500.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(
            EulerRot::ZYX,
            0.0,
            1.0,
            -std::f32::consts::FRAC_PI_4,
        )),
    ));
}
