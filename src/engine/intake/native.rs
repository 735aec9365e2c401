use std::fs;
use std::path::Path;

use bevy::prelude::*;
use bevy::window::FileDragAndDrop;

use super::file_gate::{SubmittedFile, extension_accepted};
use super::{IntakeMessage, IntakeQueue};
use crate::constants::ACCEPTED_EXTENSION;

/// Window drop events: gate on the file name, then read the bytes.
pub fn handle_dropped_files(mut events: EventReader<FileDragAndDrop>, queue: Res<IntakeQueue>) {
    for event in events.read() {
        if let FileDragAndDrop::DroppedFile { path_buf, .. } = event {
            submit_path(&queue, path_buf);
        }
    }
}

/// `O` opens a native file dialog as the picker counterpart to drag-drop.
pub fn open_file_dialog(keyboard: Res<ButtonInput<KeyCode>>, queue: Res<IntakeQueue>) {
    if !keyboard.just_pressed(KeyCode::KeyO) {
        return;
    }

    if let Some(path) = rfd::FileDialog::new()
        .add_filter("GLB scene", &[ACCEPTED_EXTENSION])
        .pick_file()
    {
        submit_path(&queue, &path);
    }
}

fn submit_path(queue: &IntakeQueue, path: &Path) {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    if !extension_accepted(&name) {
        queue.push(IntakeMessage::Rejected { name });
        return;
    }

    queue.push(IntakeMessage::ReadStarted { name: name.clone() });

    match fs::read(path) {
        Ok(bytes) => queue.push(IntakeMessage::Submitted(SubmittedFile { name, bytes })),
        Err(error) => {
            error!("failed to read {}: {error}", path.display());
            queue.push(IntakeMessage::ReadFailed { name });
        }
    }
}
