use bevy::math::{Quat, Vec3};
use globegen::biome_map::BiomeMap;
use globegen::config::GlobeGenConfig;
use std::f32::consts::TAU;

const TOWER_FOOTPRINT: f32 = 0.6;
const TOWER_HEIGHT: f32 = 2.5;
const PARTICLE_RADIUS: f32 = 0.8;

/// Map named in the config, or the built-in Earth map when there is none or it fails to load.
pub fn load_biome_map(config: &GlobeGenConfig) -> BiomeMap {
    let Some(path) = &config.globe.map_path else {
        return BiomeMap::earth();
    };

    match BiomeMap::load_from_file(path, config.globe.map_width, config.globe.map_height) {
        Ok(map) => map,
        Err(err) => {
            bevy::log::warn!("Falling back to the built-in map: {err}");
            BiomeMap::earth()
        }
    }
}

/// Next value of a spin angle, kept in `[0, TAU)`.
pub fn advance_angle(angle: f32, speed: f32, dt: f32) -> f32 {
    (angle + speed * dt).rem_euclid(TAU)
}

/// Orbit plane tilted around Z, then turned around Y by the orbit angle.
pub fn moon_orbit_rotation(angle: f32, tilt: f32) -> Quat {
    Quat::from_rotation_y(angle) * Quat::from_rotation_z(tilt)
}

pub fn tower_size(block_size: f32) -> Vec3 {
    Vec3::new(TOWER_FOOTPRINT, TOWER_HEIGHT, TOWER_FOOTPRINT) * block_size
}

pub fn particle_radius(block_size: f32) -> f32 {
    block_size * PARTICLE_RADIUS
}
