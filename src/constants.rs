/// Shared configuration for the viewer

/// File extension accepted by the drop/picker intake (matched case-insensitively)
pub const ACCEPTED_EXTENSION: &str = "glb";

/// Radius of the sphere a dropped model is translated and scaled to fit
pub const FIT_RADIUS: f32 = 2.0;

/// Relative path (under assets/) of the environment manifest JSON
pub const ENVIRONMENT_MANIFEST_PATH: &str = "environment/manifest.json";

/// Orbit camera dolly limits (world units from the focus point)
pub const MIN_ORBIT_DISTANCE: f32 = 2.0;
pub const MAX_ORBIT_DISTANCE: f32 = 15.0;

/// Initial orbit camera distance
pub const INITIAL_ORBIT_DISTANCE: f32 = 10.0;

/// Vertical field of view in degrees (narrow, long-lens framing)
pub const CAMERA_FOV_DEGREES: f32 = 20.0;

/// Near/far clip planes
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
