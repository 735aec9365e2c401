//! File intake: drag-drop and picker submissions feeding the load pipeline.
//!
//! Platform event sources (DOM listeners on web, winit drop events and a
//! file dialog natively) push messages into a shared queue; a single
//! orchestrator system drains it, applies the extension gate and the busy
//! check, and drives the load-session state machine.

/// Extension gating and the intake error taxonomy.
pub mod file_gate;

/// Native drop events and the `O` file-dialog shortcut.
#[cfg(not(target_arch = "wasm32"))]
pub mod native;

/// DOM drag-drop and `#file-input` listeners with a `FileReader` read.
#[cfg(target_arch = "wasm32")]
pub mod web;

use std::sync::{Arc, Mutex};

use bevy::prelude::*;

use crate::engine::core::app_state::LoadState;
use crate::engine::loading::decode_task::{ActiveDecode, PendingSubmission};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::ui::overlay::StatusNotice;
use self::file_gate::{IntakeError, SubmittedFile};

/// Messages produced by the platform intake sources.
pub enum IntakeMessage {
    /// A byte read has started for a file that passed the extension gate.
    ReadStarted { name: String },
    /// Read progress as a fraction in [0, 1]; unknown totals are never sent.
    ReadProgress { fraction: f32 },
    /// Read finished; the file is ready for the decode gate.
    Submitted(SubmittedFile),
    /// The byte read failed after it had started.
    ReadFailed { name: String },
    /// The file failed the extension gate.
    Rejected { name: String },
}

/// Thread-safe intake queue shared with the platform event sources.
#[derive(Resource, Clone, Default)]
pub struct IntakeQueue(Arc<Mutex<Vec<IntakeMessage>>>);

impl IntakeQueue {
    pub fn push(&self, message: IntakeMessage) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push(message);
        }
    }

    fn drain(&self) -> Vec<IntakeMessage> {
        match self.0.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(_) => Vec::new(),
        }
    }
}

/// Drains the intake queue and sequences accepted submissions into the
/// decode pipeline. Loads are serialised: while a decode is active, a new
/// submission is rejected with a notice instead of racing the one in
/// flight.
pub fn drain_intake(
    queue: Res<IntakeQueue>,
    active: Option<Res<ActiveDecode>>,
    pending: Option<Res<PendingSubmission>>,
    mut progress: ResMut<LoadingProgress>,
    mut notice: ResMut<StatusNotice>,
    mut next_state: ResMut<NextState<LoadState>>,
    mut commands: Commands,
) {
    let mut busy = active.is_some() || pending.is_some();

    for message in queue.drain() {
        match message {
            IntakeMessage::ReadStarted { name } => {
                info!("Reading {name}");
                progress.fraction = 0.0;
                next_state.set(LoadState::Loading);
            }
            IntakeMessage::ReadProgress { fraction } => {
                progress.fraction = fraction.clamp(0.0, 1.0);
            }
            IntakeMessage::Submitted(file) => {
                if busy {
                    warn!("ignoring {}: {}", file.name, IntakeError::LoadInFlight);
                    notice.0 = IntakeError::LoadInFlight.to_string();
                    continue;
                }
                busy = true;
                next_state.set(LoadState::Loading);
                commands.insert_resource(PendingSubmission(file));
            }
            IntakeMessage::ReadFailed { name } => {
                error!("failed to read {name}");
                notice.0 = format!("Failed to read {name}.");
                next_state.set(LoadState::Failed);
            }
            IntakeMessage::Rejected { name } => {
                let error = IntakeError::UnsupportedFormat(name);
                warn!("{error}");
                notice.0 = error.to_string();
            }
        }
    }
}
