//! Voxel shell sampling.
//!
//! Keeps the integer lattice points inside a thin band just below the target
//! radius, then colours each one by projecting its direction onto the biome map.

use crate::biome::Biome;
use crate::biome_map::BiomeMap;
use glam::{IVec3, Vec3};
use std::f32::consts::{PI, TAU};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellSettings {
    /// Outer radius in lattice units.
    pub radius: i32,
    /// Band width factor: a point is kept when `R² - R·thickness < d² <= R²`.
    pub thickness: f32,
    /// World-space distance between neighbouring lattice points.
    pub block_size: f32,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            radius: 20,
            thickness: 3.5,
            block_size: 0.11,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voxel {
    pub lattice: IVec3,
    pub position: Vec3,
    pub biome: Biome,
    pub is_land: bool,
}

/// Returns `true` when the squared distance lies in the half-open shell band.
pub fn in_shell(dist_sq: i32, radius: i32, thickness: f32) -> bool {
    let r_sq = radius * radius;
    dist_sq <= r_sq && dist_sq as f32 > r_sq as f32 - radius as f32 * thickness
}

/// Lattice points of the shell, x outermost and z innermost.
pub fn shell_points(radius: i32, thickness: f32) -> impl Iterator<Item = IVec3> {
    let range = if radius > 0 { -radius..=radius } else { 1..=0 };
    range.clone().flat_map(move |x| {
        let range = range.clone();
        range.clone().flat_map(move |y| {
            range
                .clone()
                .map(move |z| IVec3::new(x, y, z))
                .filter(move |p| in_shell(p.length_squared(), radius, thickness))
        })
    })
}

/// Maps a unit direction to equirectangular texture coordinates.
///
/// `u` follows the azimuth `atan2(x, z)` and `v` the inclination from +Y, so
/// `v = 0` is the north pole.
pub fn direction_to_uv(direction: Vec3) -> (f32, f32) {
    let inclination = direction.y.clamp(-1.0, 1.0).acos();
    let azimuth = direction.x.atan2(direction.z);
    ((azimuth + PI) / TAU, inclination / PI)
}

pub fn sample_shell(shell: &ShellSettings, map: &BiomeMap) -> Vec<Voxel> {
    let voxels: Vec<Voxel> = shell_points(shell.radius, shell.thickness)
        .map(|lattice| {
            let (u, v) = direction_to_uv(lattice.as_vec3().normalize());
            let biome = map.sample_uv(u, v);
            Voxel {
                lattice,
                position: lattice.as_vec3() * shell.block_size,
                biome,
                is_land: biome.is_land(),
            }
        })
        .collect();

    log::debug!(
        "sampled {} voxels for radius {} (thickness {})",
        voxels.len(),
        shell.radius,
        shell.thickness
    );
    voxels
}

/// Positions of every land voxel, in sampling order.
pub fn land_positions(voxels: &[Voxel]) -> Vec<Vec3> {
    voxels
        .iter()
        .filter(|voxel| voxel.is_land)
        .map(|voxel| voxel.position)
        .collect()
}
