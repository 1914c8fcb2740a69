pub(crate) mod components;
pub(crate) mod logic;
mod systems;

use crate::core::camera::components::*;
use crate::core::camera::systems::*;
use crate::core::state::AppState;
use bevy::prelude::*;

pub(crate) struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<MainCamera>()
            .register_type::<OrbitCamera>()
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, camera_control.run_if(in_state(AppState::Viewing)));
    }
}
