pub mod components;
pub mod events;
mod logic;
mod moon;
mod power_grid;
pub mod resources;
mod systems;
mod ui;

use crate::core::state::AppState;
use crate::globe::events::*;
use crate::globe::moon::*;
use crate::globe::power_grid::*;
use crate::globe::resources::*;
use crate::globe::systems::*;
use crate::globe::ui::render_globe_ui;
use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub struct GlobePlugin;

impl Plugin for GlobePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<RegenerateGridEvent>()
            .add_message::<SetMoonVisibleEvent>()
            .init_resource::<GlobeSettings>()
            .init_resource::<CurrentGlobeData>()
            .init_resource::<UiPointerCapture>()
            .add_systems(OnEnter(AppState::Generating), spawn_globe)
            .add_systems(
                Update,
                (
                    handle_keyboard,
                    regenerate_grid_on_event,
                    handle_moon_visibility,
                    rotate_globe,
                    animate_particles,
                    orbit_moon,
                    spin_moon,
                )
                    .chain()
                    .run_if(in_state(AppState::Viewing)),
            )
            .add_systems(
                EguiPrimaryContextPass,
                render_globe_ui.run_if(in_state(AppState::Viewing)),
            );
    }
}
