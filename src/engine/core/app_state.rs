use bevy::prelude::*;

/// Load-session state. One linear machine per page lifetime:
/// `Idle → Loading → {Loaded, Failed}`, where `Loaded` and `Failed` both
/// accept a new submission and re-enter `Loading`.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}
