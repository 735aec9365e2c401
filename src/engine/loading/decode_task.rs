use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use bevy::tasks::futures_lite::future;
use bevy::tasks::{AsyncComputeTaskPool, Task, block_on};

use crate::constants::FIT_RADIUS;
use crate::engine::core::app_state::LoadState;
use crate::engine::intake::file_gate::SubmittedFile;
use crate::engine::loading::decoder::{DecodeError, DecodedScene, decode_scene};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::loading::scene_spawner::spawn_decoded_scene;
use crate::engine::scene::bounds::SceneBounds;
use crate::engine::scene::normalise::fit_to_radius;
use crate::engine::ui::overlay::StatusNotice;

/// Submission accepted by the intake gate, waiting for a decode task.
#[derive(Resource)]
pub struct PendingSubmission(pub SubmittedFile);

/// The in-flight decode. Presence of this resource is the busy flag that
/// serialises loads.
#[derive(Resource)]
pub struct ActiveDecode {
    file_name: String,
    progress: Arc<Mutex<f32>>,
    task: Task<Result<DecodedScene, DecodeError>>,
}

/// Move the pending submission onto the async compute pool.
pub fn start_decode(mut commands: Commands, mut pending: ResMut<PendingSubmission>) {
    let SubmittedFile { name, bytes } = SubmittedFile {
        name: std::mem::take(&mut pending.0.name),
        bytes: std::mem::take(&mut pending.0.bytes),
    };
    commands.remove_resource::<PendingSubmission>();

    info!("Decoding {} ({} bytes)", name, bytes.len());

    let progress = Arc::new(Mutex::new(0.0f32));
    let progress_cell = progress.clone();
    let task = AsyncComputeTaskPool::get().spawn(async move {
        decode_scene(&bytes, &mut |fraction| {
            if let Ok(mut value) = progress_cell.lock() {
                *value = fraction;
            }
        })
    });

    commands.insert_resource(ActiveDecode {
        file_name: name,
        progress,
        task,
    });
}

/// Poll the decode task: mirror its progress, and on the terminal result
/// either normalise-and-insert the scene or record the failure. Exactly one
/// of the two outcomes fires per submission.
pub fn poll_decode(
    mut commands: Commands,
    mut active: ResMut<ActiveDecode>,
    mut progress: ResMut<LoadingProgress>,
    mut notice: ResMut<StatusNotice>,
    mut next_state: ResMut<NextState<LoadState>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut images: ResMut<Assets<Image>>,
) {
    if let Ok(value) = active.progress.lock() {
        progress.fraction = *value;
    }

    let Some(result) = block_on(future::poll_once(&mut active.task)) else {
        return;
    };

    match result {
        Ok(scene) => {
            let bounds = scene
                .bounds()
                .unwrap_or_else(|| SceneBounds::new(Vec3::ZERO, Vec3::ZERO));
            let normalise = fit_to_radius(&bounds, FIT_RADIUS);
            spawn_decoded_scene(
                &mut commands,
                &mut meshes,
                &mut materials,
                &mut images,
                &scene,
                &normalise,
            );
            info!("✓ {} loaded and fitted to view", active.file_name);
            next_state.set(LoadState::Loaded);
        }
        Err(error) => {
            error!("failed to decode {}: {error}", active.file_name);
            notice.0 = format!("Could not load {}.", active.file_name);
            next_state.set(LoadState::Failed);
        }
    }

    commands.remove_resource::<ActiveDecode>();
}
