use bevy::prelude::States;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub(crate) enum AppState {
    /// Globe and grid are being built; lasts a single frame.
    #[default]
    Generating,
    Viewing,
}
