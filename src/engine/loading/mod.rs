//! Asset loading pipeline from submitted bytes to scene entities.
//!
//! Manages the staged flow from an accepted submission through background
//! GLB decoding to normalised insertion, with progress tracking throughout.

/// Background decode task lifecycle: spawn, poll, terminal handling.
///
/// Normalises and inserts the decoded scene on success, records the failure
/// and releases the session on error.
pub mod decode_task;

/// GLB container decoding into flattened scene data.
///
/// Wraps the `gltf` importer and extracts vertex streams, materials,
/// textures and world-space node transforms.
pub mod decoder;

/// Loading progress resource for the overlay progress bar.
pub mod progress;

/// Decoded scene to entity-hierarchy insertion under a normalisation root.
pub mod scene_spawner;
