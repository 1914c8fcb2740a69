use crate::biome::srgb_to_linear_rgba;
use crate::sampler::Voxel;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Per-instance data for a batched voxel draw.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct VoxelInstance {
    /// Column-major model matrix: translation and uniform scale only.
    pub transform: [[f32; 4]; 4],
    /// Linear RGBA.
    pub color: [f32; 4],
}

impl VoxelInstance {
    pub fn new(translation: Vec3, scale: f32, color: [f32; 4]) -> Self {
        let transform = Mat4::from_scale_rotation_translation(
            Vec3::splat(scale),
            glam::Quat::IDENTITY,
            translation,
        );
        Self {
            transform: transform.to_cols_array_2d(),
            color,
        }
    }

    pub fn translation(&self) -> Vec3 {
        let [x, y, z, _] = self.transform[3];
        Vec3::new(x, y, z)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.transform)
    }
}

/// One transform and one colour per voxel, in voxel order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstanceBuffer {
    instances: Vec<VoxelInstance>,
    scale: f32,
}

impl InstanceBuffer {
    pub fn from_voxels(voxels: &[Voxel], scale: f32) -> Self {
        let instances = voxels
            .iter()
            .map(|voxel| VoxelInstance::new(voxel.position, scale, voxel.biome.linear_rgba()))
            .collect();
        Self { instances, scale }
    }

    /// Builds a buffer for voxel models with explicit sRGB colours.
    pub fn from_colored(voxels: impl IntoIterator<Item = (Vec3, [u8; 3])>, scale: f32) -> Self {
        let instances = voxels
            .into_iter()
            .map(|(position, srgb)| VoxelInstance::new(position, scale, srgb_to_linear_rgba(srgb)))
            .collect();
        Self { instances, scale }
    }

    /// Replaces the contents with a fresh build from `voxels`.
    pub fn rebuild(&mut self, voxels: &[Voxel]) {
        *self = Self::from_voxels(voxels, self.scale);
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn instances(&self) -> &[VoxelInstance] {
        &self.instances
    }

    /// The packed per-instance layout, one transform and colour per voxel.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }
}
