mod core;
mod globe;
mod helpers;

use crate::core::camera::CameraPlugin;
use crate::core::state::AppState;
use crate::globe::GlobePlugin;
use bevy::app::{App, AppExit};
#[cfg(debug_assertions)]
use bevy::diagnostic::LogDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub struct GlobeAppPlugin;

impl Plugin for GlobeAppPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .add_plugins((EguiPlugin::default(), CameraPlugin, GlobePlugin))
            .add_systems(Update, exit_on_esc);

        #[cfg(debug_assertions)]
        {
            app.add_plugins(LogDiagnosticsPlugin::default());
        }
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
