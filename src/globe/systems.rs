use crate::core::state::AppState;
use crate::globe::components::*;
use crate::globe::events::*;
use crate::globe::logic::load_biome_map;
use crate::globe::power_grid::spawn_power_grid;
use crate::globe::resources::*;
use crate::helpers::mesh::mesh_from_data;
use bevy::prelude::*;
use globegen::globe::GlobeGenerator;
use globegen::mesh_data::MeshData;
use globegen::tools::grid_rng;

/// Samples the globe, builds its single voxel mesh and the first power grid.
pub fn spawn_globe(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut current: ResMut<CurrentGlobeData>,
    mut next_state: ResMut<NextState<AppState>>,
    mut moon_events: MessageWriter<SetMoonVisibleEvent>,
    settings: Res<GlobeSettings>,
    existing: Query<Entity, With<GlobeRoot>>,
) {
    for entity in existing.iter() {
        commands.entity(entity).despawn();
    }

    let config = &settings.config;
    let generator = GlobeGenerator::from_config(config, load_biome_map(config));
    let globe = generator.generate();
    let grid = generator.generate_grid(&globe, &mut grid_rng(settings.grid_seed));

    let globe_mesh = meshes.add(mesh_from_data(MeshData::from_instances(&globe.instances)));
    // vertex colours carry the biome, the base colour only tints
    let voxel_material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: 0.9,
        ..default()
    });

    let root = commands
        .spawn((
            Transform::default(),
            Visibility::default(),
            GlobeRoot,
            Name::new("Globe"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(globe_mesh),
                MeshMaterial3d(voxel_material),
                Transform::default(),
                GlobeMesh,
            ));
        })
        .id();

    spawn_power_grid(
        &mut commands,
        root,
        &grid,
        globe.shell.block_size,
        &mut meshes,
        &mut materials,
    );

    info!(
        "Globe ready: {} voxels, {} on land",
        globe.voxels.len(),
        globe.land.len()
    );

    current.globe = Some(globe);
    current.grid = Some(grid);

    if settings.show_moon {
        moon_events.write(SetMoonVisibleEvent { visible: true });
    }
    next_state.set(AppState::Viewing);
}

pub fn rotate_globe(
    time: Res<Time>,
    settings: Res<GlobeSettings>,
    mut globe: Query<&mut Transform, With<GlobeRoot>>,
) {
    if !settings.auto_rotate {
        return;
    }
    let angle = settings.config.motion.globe_spin_speed * time.delta_secs();
    for mut transform in globe.iter_mut() {
        transform.rotate_y(angle);
    }
}

/// R regenerates the grid, Space toggles spinning, M toggles the moon.
pub fn handle_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    mut settings: ResMut<GlobeSettings>,
    mut regenerate_events: MessageWriter<RegenerateGridEvent>,
    mut moon_events: MessageWriter<SetMoonVisibleEvent>,
) {
    if keys.just_pressed(KeyCode::KeyR) {
        regenerate_events.write(RegenerateGridEvent);
    }
    if keys.just_pressed(KeyCode::Space) {
        settings.auto_rotate = !settings.auto_rotate;
        info!("Auto-rotate {}", if settings.auto_rotate { "on" } else { "off" });
    }
    if keys.just_pressed(KeyCode::KeyM) {
        settings.show_moon = !settings.show_moon;
        moon_events.write(SetMoonVisibleEvent {
            visible: settings.show_moon,
        });
    }
}
