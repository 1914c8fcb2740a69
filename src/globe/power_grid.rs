use crate::globe::components::*;
use crate::globe::events::RegenerateGridEvent;
use crate::globe::logic::{particle_radius, tower_size};
use crate::globe::resources::*;
use crate::helpers::mesh::line_mesh;
use bevy::color::{Color, LinearRgba};
use bevy::prelude::*;
use globegen::mesh_data::LineData;
use globegen::particles::pulse;
use globegen::power_grid::PowerGrid;
use globegen::tools::grid_rng;

const TOWER_COLOR: Color = Color::srgb_u8(0x55, 0x55, 0x55);
const LINE_COLOR: Color = Color::srgba_u8(0xff, 0xaa, 0x00, 102);
const PARTICLE_COLOR: Color = Color::srgb_u8(0xff, 0xff, 0x00);
const TOWER_GLOW: f32 = 0.3;

/// Spawns towers, lines and particles for `grid` under the globe root.
pub fn spawn_power_grid(
    commands: &mut Commands,
    globe_root: Entity,
    grid: &PowerGrid,
    block_size: f32,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let tower_mesh = meshes.add(Cuboid::from_size(tower_size(block_size)));
    let tower_material = materials.add(StandardMaterial {
        base_color: TOWER_COLOR,
        emissive: LinearRgba::rgb(1.0, 0.4, 0.0) * TOWER_GLOW,
        ..default()
    });
    let line_handle = meshes.add(line_mesh(LineData::from_edges(&grid.edges)));
    let line_material = materials.add(StandardMaterial {
        base_color: LINE_COLOR,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    let particle_mesh = meshes.add(Sphere::new(particle_radius(block_size)).mesh().uv(4, 4));
    let particle_material = materials.add(StandardMaterial {
        base_color: PARTICLE_COLOR,
        unlit: true,
        ..default()
    });

    commands.entity(globe_root).with_children(|parent| {
        parent
            .spawn((
                Transform::default(),
                Visibility::default(),
                PowerGridRoot,
                Name::new("Power grid"),
            ))
            .with_children(|grid_parent| {
                for tower in grid.towers() {
                    grid_parent.spawn((
                        Mesh3d(tower_mesh.clone()),
                        MeshMaterial3d(tower_material.clone()),
                        Transform::from_translation(tower.position).with_rotation(tower.rotation),
                        TowerMarker,
                    ));
                }

                grid_parent.spawn((
                    Mesh3d(line_handle),
                    MeshMaterial3d(line_material),
                    Transform::default(),
                    PowerLineMesh,
                ));

                for (index, particle) in grid.particles.iter().enumerate() {
                    let position = grid.particle_position(particle).unwrap_or_default();
                    grid_parent.spawn((
                        Mesh3d(particle_mesh.clone()),
                        MeshMaterial3d(particle_material.clone()),
                        Transform::from_translation(position),
                        GridParticleMarker { index },
                    ));
                }
            });
    });

    info!(
        "Spawned power grid: {} towers, {} lines, {} particles",
        grid.nodes.len(),
        grid.edges.len(),
        grid.particles.len()
    );
}

pub fn regenerate_grid_on_event(
    mut commands: Commands,
    mut events: MessageReader<RegenerateGridEvent>,
    mut current: ResMut<CurrentGlobeData>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<GlobeSettings>,
    globe_root: Query<Entity, With<GlobeRoot>>,
    grid_roots: Query<Entity, With<PowerGridRoot>>,
) {
    // several requests in one frame still rebuild once
    if events.read().count() == 0 {
        return;
    }
    let Ok(root) = globe_root.single() else {
        return;
    };
    let Some(globe) = current.globe.as_ref() else {
        return;
    };

    for entity in grid_roots.iter() {
        commands.entity(entity).despawn();
    }

    let mut rng = grid_rng(settings.grid_seed);
    let grid = PowerGrid::generate(&globe.land, &settings.config.grid_settings(), &mut rng);
    spawn_power_grid(
        &mut commands,
        root,
        &grid,
        globe.shell.block_size,
        &mut meshes,
        &mut materials,
    );
    current.grid = Some(grid);
}

/// Moves every particle along its line and pulses its size.
pub fn animate_particles(
    time: Res<Time>,
    settings: Res<GlobeSettings>,
    mut current: ResMut<CurrentGlobeData>,
    mut particles: Query<(&GridParticleMarker, &mut Transform)>,
) {
    let Some(grid) = current.grid.as_mut() else {
        return;
    };
    grid.advance(time.delta_secs());

    let motion = &settings.config.motion;
    let elapsed = time.elapsed_secs();
    for (marker, mut transform) in particles.iter_mut() {
        let Some(particle) = grid.particles.get(marker.index) else {
            continue;
        };
        if let Some(position) = grid.particle_position(particle) {
            transform.translation = position;
        }
        let scale = pulse(
            elapsed,
            marker.index,
            motion.pulse_frequency,
            motion.pulse_phase_step,
        );
        transform.scale = Vec3::splat(scale);
    }
}
