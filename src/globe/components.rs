use bevy::prelude::*;

/// Parent of everything that spins with the globe.
#[derive(Component)]
pub struct GlobeRoot;

#[derive(Component)]
pub struct GlobeMesh;

/// Parent of towers, lines and particles so a new grid can replace the old one.
#[derive(Component)]
pub struct PowerGridRoot;

#[derive(Component)]
pub struct TowerMarker;

#[derive(Component)]
pub struct PowerLineMesh;

/// Links a particle entity to its entry in `PowerGrid::particles`.
#[derive(Component)]
pub struct GridParticleMarker {
    pub index: usize,
}

#[derive(Component, Default)]
pub struct MoonOrbit {
    pub angle: f32,
}

#[derive(Component)]
pub struct MoonBody;

#[derive(Component)]
pub struct ShuttleModel;
