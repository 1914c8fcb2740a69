use bevy::prelude::*;

#[derive(Component, Reflect)]
pub struct MainCamera;

/// Orbit state of the main camera around its focus point.
#[derive(Component, Reflect, Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl OrbitCamera {
    pub fn new(distance: f32) -> Self {
        Self {
            focus: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance,
            min_distance: distance * 0.3,
            max_distance: distance * 3.0,
        }
    }
}
