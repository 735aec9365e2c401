use bevy::prelude::*;

/// Latest progress fraction for the in-flight load, in [0, 1].
///
/// Written by the byte-read and decode stages, read by the overlay
/// progress bar. Reset to zero when a new load begins.
#[derive(Resource, Default)]
pub struct LoadingProgress {
    pub fraction: f32,
}
