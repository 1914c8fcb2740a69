use crate::core::state::AppState;
use crate::globe::events::*;
use crate::globe::resources::*;
use bevy::app::AppExit;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};
use globegen::biome::Biome;

pub fn render_globe_ui(
    mut contexts: EguiContexts,
    mut settings: ResMut<GlobeSettings>,
    mut pointer_capture: ResMut<UiPointerCapture>,
    current: Res<CurrentGlobeData>,
    mut regenerate_events: MessageWriter<RegenerateGridEvent>,
    mut moon_events: MessageWriter<SetMoonVisibleEvent>,
    mut app_exit_events: MessageWriter<AppExit>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::SidePanel::right("globe_panel")
        .default_width(260.0)
        .resizable(true)
        .show(ctx, |ui| {
            ui.heading("Voxel Globe");
            ui.add_space(10.0);

            ui.checkbox(&mut settings.interactive, "Mouse controls");
            ui.checkbox(&mut settings.auto_rotate, "Auto-rotate");
            let mut show_moon = settings.show_moon;
            if ui.checkbox(&mut show_moon, "Moon").changed() {
                settings.show_moon = show_moon;
                moon_events.write(SetMoonVisibleEvent { visible: show_moon });
            }

            ui.add_space(10.0);
            ui.separator();
            ui.label("Power grid");

            let mut fixed_seed = settings.grid_seed.is_some();
            if ui.checkbox(&mut fixed_seed, "Fixed seed").changed() {
                settings.grid_seed = fixed_seed.then_some(0);
            }
            if let Some(seed) = settings.grid_seed.as_mut() {
                ui.add(egui::DragValue::new(seed).prefix("Seed: "));
            }
            if ui.button("Regenerate (R)").clicked() {
                regenerate_events.write(RegenerateGridEvent);
            }

            ui.add_space(10.0);
            ui.separator();
            render_stats(ui, &current);

            ui.add_space(20.0);
            if ui.button("Reload config").clicked() {
                match globegen::reload_config() {
                    Ok(()) => {
                        settings.config = globegen::get_config();
                        info!("Config reloaded, rebuilding the globe");
                        next_state.set(AppState::Generating);
                    }
                    Err(err) => warn!("Config not reloaded: {err}"),
                }
            }
            if ui.button("Quit").clicked() {
                app_exit_events.write(AppExit::Success);
            }
        });

    pointer_capture.0 = ctx.wants_pointer_input() || ctx.is_pointer_over_area();
}

fn render_stats(ui: &mut egui::Ui, current: &CurrentGlobeData) {
    let Some(globe) = current.globe.as_ref() else {
        ui.label("Generating...");
        return;
    };

    ui.label(format!("Voxels: {}", globe.voxels.len()));
    for biome in Biome::ALL {
        ui.label(format!("  {biome:?}: {}", globe.count(biome)));
    }

    if let Some(grid) = current.grid.as_ref() {
        ui.label(format!("Towers: {}", grid.nodes.len()));
        ui.label(format!("Lines: {}", grid.edges.len()));
        ui.label(format!("Particles: {}", grid.particles.len()));
    }
}
