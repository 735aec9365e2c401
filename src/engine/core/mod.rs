//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, load-session state
//! transitions, and plugin initialisation for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the loading pipeline, camera, environment
/// and overlay systems wired to the load-session state machine.
pub mod app_setup;

/// Load-session state machine driving overlay visibility and intake gating.
///
/// Tracks a submission from idle through loading to loaded or failed.
pub mod app_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
