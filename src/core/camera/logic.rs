use crate::core::camera::components::OrbitCamera;
use bevy::math::{EulerRot, Quat, Vec2, Vec3};
use std::f32::consts::FRAC_PI_2;

const ROTATE_SENSITIVITY: f32 = 0.005;
const PAN_SENSITIVITY: f32 = 0.0015;
const ZOOM_STEP: f32 = 0.1;
const PITCH_MARGIN: f32 = 0.05;

pub struct OrbitInput {
    /// Pointer delta while the rotate button is held.
    pub rotate: Vec2,
    /// Pointer delta while the pan button is held.
    pub pan: Vec2,
    /// Scroll amount in lines, positive zooms in.
    pub zoom: f32,
}

impl OrbitInput {
    pub fn is_idle(&self) -> bool {
        self.rotate == Vec2::ZERO && self.pan == Vec2::ZERO && self.zoom == 0.0
    }
}

pub struct CameraTransformUpdate {
    pub translation: Vec3,
    pub rotation: Quat,
}

/// Apply one frame of pointer input to the orbit state
pub fn apply_orbit_input(orbit: &OrbitCamera, input: &OrbitInput) -> OrbitCamera {
    let mut next = *orbit;

    next.yaw -= input.rotate.x * ROTATE_SENSITIVITY;
    let pitch_limit = FRAC_PI_2 - PITCH_MARGIN;
    next.pitch = (next.pitch - input.rotate.y * ROTATE_SENSITIVITY).clamp(-pitch_limit, pitch_limit);

    // Zoom is multiplicative so it feels the same close up and far away
    if input.zoom != 0.0 {
        next.distance *= (1.0 - ZOOM_STEP).powf(input.zoom);
    }
    next.distance = next.distance.clamp(orbit.min_distance, orbit.max_distance);

    if input.pan != Vec2::ZERO {
        let rotation = orbit_rotation(&next);
        let right = rotation * Vec3::X;
        let up = rotation * Vec3::Y;
        let scale = next.distance * PAN_SENSITIVITY;
        next.focus += (-input.pan.x * right + input.pan.y * up) * scale;
    }

    next
}

pub fn orbit_rotation(orbit: &OrbitCamera) -> Quat {
    Quat::from_euler(EulerRot::YXZ, orbit.yaw, orbit.pitch, 0.0)
}

/// Camera transform for an orbit state: on a sphere around the focus, facing it.
pub fn calculate_camera_transform(orbit: &OrbitCamera) -> CameraTransformUpdate {
    let rotation = orbit_rotation(orbit);
    CameraTransformUpdate {
        translation: orbit.focus + rotation * Vec3::new(0.0, 0.0, orbit.distance),
        rotation,
    }
}
