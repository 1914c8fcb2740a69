//! Small hand-placed voxel models that decorate the globe scene.

use crate::sampler::{ShellSettings, shell_points};
use glam::{IVec3, Vec3};

const HULL: [u8; 3] = [0xf5, 0xf5, 0xf5];
const NOSE: [u8; 3] = [0x1a, 0x1a, 0x1a];
const COCKPIT: [u8; 3] = [0x4a, 0x90, 0xd9];
const WING: [u8; 3] = [0xe8, 0xe8, 0xe8];
const FIN: [u8; 3] = [0xf0, 0xf0, 0xf0];
const STRIPE: [u8; 3] = [0xcc, 0x33, 0x33];
const ENGINE: [u8; 3] = [0xff, 0x66, 0x00];
const BAY_DOOR: [u8; 3] = [0x33, 0x33, 0x33];
const FLAG: [u8; 3] = [0x1a, 0x4a, 0x8a];

/// A voxel with a fixed sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelVoxel {
    pub lattice: IVec3,
    pub color: [u8; 3],
}

impl ModelVoxel {
    fn new(x: i32, y: i32, z: i32, color: [u8; 3]) -> Self {
        Self {
            lattice: IVec3::new(x, y, z),
            color,
        }
    }

    pub fn position(&self, block_size: f32) -> Vec3 {
        self.lattice.as_vec3() * block_size
    }
}

/// Uniformly coloured voxel shell, used for the moon.
pub fn moon_voxels(shell: &ShellSettings, color: [u8; 3]) -> Vec<ModelVoxel> {
    shell_points(shell.radius, shell.thickness)
        .map(|lattice| ModelVoxel { lattice, color })
        .collect()
}

/// Space shuttle standing nose-up along +Y, wings along X.
pub fn shuttle_voxels() -> Vec<ModelVoxel> {
    let mut voxels = Vec::new();

    // fuselage, three blocks wide in the middle
    for y in 0..7 {
        voxels.push(ModelVoxel::new(0, y, 0, HULL));
        if (1..=5).contains(&y) {
            voxels.push(ModelVoxel::new(1, y, 0, HULL));
            voxels.push(ModelVoxel::new(-1, y, 0, HULL));
        }
    }

    voxels.push(ModelVoxel::new(0, 7, 0, NOSE));
    voxels.push(ModelVoxel::new(0, 6, 1, COCKPIT));
    voxels.push(ModelVoxel::new(0, 5, 1, COCKPIT));

    // delta wings step down as they reach outward
    for i in 0..4 {
        voxels.push(ModelVoxel::new(-2 - i, 2 - i / 2, 0, WING));
        voxels.push(ModelVoxel::new(2 + i, 2 - i / 2, 0, WING));
    }
    voxels.push(ModelVoxel::new(-2, 3, 0, WING));
    voxels.push(ModelVoxel::new(2, 3, 0, WING));

    for y in 2..=4 {
        voxels.push(ModelVoxel::new(0, y, -1, FIN));
    }
    voxels.push(ModelVoxel::new(0, 3, -2, STRIPE));

    voxels.push(ModelVoxel::new(0, -1, 0, ENGINE));
    voxels.push(ModelVoxel::new(1, 0, 0, ENGINE));
    voxels.push(ModelVoxel::new(-1, 0, 0, ENGINE));

    voxels.push(ModelVoxel::new(0, 4, 1, BAY_DOOR));
    voxels.push(ModelVoxel::new(0, 3, 1, BAY_DOOR));

    voxels.push(ModelVoxel::new(-2, 2, 1, FLAG));
    voxels.push(ModelVoxel::new(2, 2, 1, FLAG));

    voxels
}

/// Scaled positions paired with colours, ready for an instance buffer.
pub fn placed(voxels: &[ModelVoxel], block_size: f32) -> impl Iterator<Item = (Vec3, [u8; 3])> + '_ {
    voxels
        .iter()
        .map(move |voxel| (voxel.position(block_size), voxel.color))
}
