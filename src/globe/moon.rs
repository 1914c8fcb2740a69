use crate::globe::components::*;
use crate::globe::events::SetMoonVisibleEvent;
use crate::globe::logic::{advance_angle, moon_orbit_rotation};
use crate::globe::resources::GlobeSettings;
use crate::helpers::mesh::mesh_from_data;
use bevy::prelude::*;
use globegen::globe::{moon_instances, shuttle_instances};
use globegen::mesh_data::MeshData;

const SHUTTLE_BLOCK_SIZE: f32 = 0.07;
const SHUTTLE_OFFSET: Vec3 = Vec3::new(0.6, 0.12, 0.0);

pub fn handle_moon_visibility(
    mut commands: Commands,
    mut events: MessageReader<SetMoonVisibleEvent>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<GlobeSettings>,
    orbits: Query<Entity, With<MoonOrbit>>,
) {
    let Some(visible) = events.read().last().map(|event| event.visible) else {
        return;
    };

    if !visible {
        for entity in orbits.iter() {
            commands.entity(entity).despawn();
        }
        info!("Moon hidden");
        return;
    }
    if !orbits.is_empty() {
        return;
    }

    let moon = &settings.config.moon;
    let overlap = settings.config.globe.block_overlap;
    let moon_mesh = meshes.add(mesh_from_data(MeshData::from_instances(&moon_instances(
        &settings.config.moon_shell_settings(),
        moon.color,
        overlap,
    ))));
    let shuttle_mesh = meshes.add(mesh_from_data(MeshData::from_instances(
        &shuttle_instances(SHUTTLE_BLOCK_SIZE, overlap),
    )));
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        perceptual_roughness: 0.9,
        ..default()
    });

    commands
        .spawn((
            Transform::from_rotation(moon_orbit_rotation(0.0, moon.orbit_tilt)),
            Visibility::default(),
            MoonOrbit::default(),
            Name::new("Moon orbit"),
        ))
        .with_children(|orbit| {
            orbit
                .spawn((
                    Transform::from_xyz(moon.orbit_distance, 0.0, 0.0),
                    Visibility::default(),
                ))
                .with_children(|anchor| {
                    anchor.spawn((
                        Mesh3d(moon_mesh),
                        MeshMaterial3d(material.clone()),
                        Transform::default(),
                        MoonBody,
                    ));
                    anchor.spawn((
                        Mesh3d(shuttle_mesh),
                        MeshMaterial3d(material),
                        Transform::from_translation(SHUTTLE_OFFSET).with_rotation(
                            Quat::from_euler(EulerRot::XYZ, 0.0, std::f32::consts::FRAC_PI_4, -0.1),
                        ),
                        ShuttleModel,
                    ));
                });
        });

    info!("Moon shown at orbit distance {}", moon.orbit_distance);
}

pub fn orbit_moon(
    time: Res<Time>,
    settings: Res<GlobeSettings>,
    mut orbits: Query<(&mut MoonOrbit, &mut Transform)>,
) {
    let motion = &settings.config.motion;
    for (mut orbit, mut transform) in orbits.iter_mut() {
        orbit.angle = advance_angle(orbit.angle, motion.moon_orbit_speed, time.delta_secs());
        transform.rotation = moon_orbit_rotation(orbit.angle, settings.config.moon.orbit_tilt);
    }
}

pub fn spin_moon(
    time: Res<Time>,
    settings: Res<GlobeSettings>,
    mut bodies: Query<&mut Transform, With<MoonBody>>,
) {
    let angle = settings.config.motion.moon_spin_speed * time.delta_secs();
    for mut transform in bodies.iter_mut() {
        transform.rotate_y(angle);
    }
}
