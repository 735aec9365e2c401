//! Viewer camera control.

/// Orbit rig around the origin with damped follow and dolly limits.
pub mod orbit_camera;
