//! Scene-space maths and environment lighting.
//!
//! Provides bounding-volume algebra for decoded geometry, origin-fit
//! normalisation, and the one-shot image-based lighting setup.

/// Axis-aligned bounding volumes for decoded scene geometry.
pub mod bounds;

/// Environment manifest loading and light-probe attachment.
///
/// Loads a JSON manifest at startup and applies an environment map to the
/// viewer camera once the referenced probes resolve.
pub mod environment;

/// Centre-to-origin translation and uniform fit scaling for dropped models.
pub mod normalise;
