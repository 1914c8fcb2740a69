use crate::core::camera::components::{MainCamera, OrbitCamera};
use crate::core::camera::logic::{OrbitInput, apply_orbit_input, calculate_camera_transform};
use crate::globe::resources::GlobeSettings;
use crate::globe::resources::UiPointerCapture;
use bevy::input::ButtonInput;
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::log::info;
use bevy::math::{Vec2, Vec3};
use bevy::prelude::*;

const PIXELS_PER_LINE: f32 = 100.0;

pub fn spawn_camera(mut commands: Commands, settings: Res<GlobeSettings>) {
    let view = &settings.config.view;
    let orbit = OrbitCamera::new(view.camera_distance);
    let update = calculate_camera_transform(&orbit);

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: view.fov.to_radians(),
            ..default()
        }),
        Transform::from_translation(update.translation).with_rotation(update.rotation),
        AmbientLight {
            brightness: 600.0,
            ..default()
        },
        MainCamera,
        orbit,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 6000.0,
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 3000.0,
            ..default()
        },
        Transform::from_xyz(-10.0, 5.0, -5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    info!("Camera spawned at distance {}", view.camera_distance);
}

/// Left drag orbits, right drag pans, the wheel zooms.
pub fn camera_control(
    settings: Res<GlobeSettings>,
    pointer_capture: Res<UiPointerCapture>,
    mouse_input: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    mut camera_q: Query<(&mut Transform, &mut OrbitCamera), With<MainCamera>>,
) {
    if !settings.interactive || pointer_capture.0 {
        mouse_motion.clear();
        mouse_wheel.clear();
        return;
    }

    let Ok((mut transform, mut orbit)) = camera_q.single_mut() else {
        return;
    };

    let motion: Vec2 = mouse_motion.read().map(|ev| ev.delta).sum();
    let zoom: f32 = mouse_wheel
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / PIXELS_PER_LINE,
        })
        .sum();

    let input = OrbitInput {
        rotate: if mouse_input.pressed(MouseButton::Left) {
            motion
        } else {
            Vec2::ZERO
        },
        pan: if mouse_input.pressed(MouseButton::Right) {
            motion
        } else {
            Vec2::ZERO
        },
        zoom,
    };
    if input.is_idle() {
        return;
    }

    *orbit = apply_orbit_input(&orbit, &input);
    let update = calculate_camera_transform(&orbit);
    transform.translation = update.translation;
    transform.rotation = update.rotation;
}
