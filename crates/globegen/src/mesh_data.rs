use crate::instances::InstanceBuffer;
use crate::power_grid::GridEdge;
use glam::Vec3;

/// Engine-agnostic triangle mesh with per-vertex colours.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 4]>,
    pub indices: Vec<u32>,
}

// Face normal plus the four corners of the unit cube face, counter-clockwise
// seen from outside.
const CUBE_FACES: [(Vec3, [Vec3; 4]); 6] = [
    (
        Vec3::X,
        [
            Vec3::new(0.5, -0.5, -0.5),
            Vec3::new(0.5, 0.5, -0.5),
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(0.5, -0.5, 0.5),
        ],
    ),
    (
        Vec3::NEG_X,
        [
            Vec3::new(-0.5, -0.5, 0.5),
            Vec3::new(-0.5, 0.5, 0.5),
            Vec3::new(-0.5, 0.5, -0.5),
            Vec3::new(-0.5, -0.5, -0.5),
        ],
    ),
    (
        Vec3::Y,
        [
            Vec3::new(-0.5, 0.5, -0.5),
            Vec3::new(-0.5, 0.5, 0.5),
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(0.5, 0.5, -0.5),
        ],
    ),
    (
        Vec3::NEG_Y,
        [
            Vec3::new(-0.5, -0.5, 0.5),
            Vec3::new(-0.5, -0.5, -0.5),
            Vec3::new(0.5, -0.5, -0.5),
            Vec3::new(0.5, -0.5, 0.5),
        ],
    ),
    (
        Vec3::Z,
        [
            Vec3::new(-0.5, -0.5, 0.5),
            Vec3::new(0.5, -0.5, 0.5),
            Vec3::new(0.5, 0.5, 0.5),
            Vec3::new(-0.5, 0.5, 0.5),
        ],
    ),
    (
        Vec3::NEG_Z,
        [
            Vec3::new(0.5, -0.5, -0.5),
            Vec3::new(-0.5, -0.5, -0.5),
            Vec3::new(-0.5, 0.5, -0.5),
            Vec3::new(0.5, 0.5, -0.5),
        ],
    ),
];

pub const VERTICES_PER_CUBE: usize = 24;
pub const INDICES_PER_CUBE: usize = 36;

impl MeshData {
    /// Merges every instance into one cube mesh so the whole buffer is a single draw.
    pub fn from_instances(buffer: &InstanceBuffer) -> Self {
        let count = buffer.len();
        let mut mesh = MeshData {
            positions: Vec::with_capacity(count * VERTICES_PER_CUBE),
            normals: Vec::with_capacity(count * VERTICES_PER_CUBE),
            colors: Vec::with_capacity(count * VERTICES_PER_CUBE),
            indices: Vec::with_capacity(count * INDICES_PER_CUBE),
        };

        for instance in buffer.instances() {
            let matrix = instance.matrix();
            for (normal, corners) in CUBE_FACES.iter() {
                let base = mesh.positions.len() as u32;
                for corner in corners {
                    mesh.positions.push(matrix.transform_point3(*corner).to_array());
                    mesh.normals.push(normal.to_array());
                    mesh.colors.push(instance.color);
                }
                mesh.indices
                    .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
            }
        }

        mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}

/// Line-list geometry: every pair of indices is one segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineData {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl LineData {
    /// Joins each edge's sampled curve into consecutive segments.
    pub fn from_edges(edges: &[GridEdge]) -> Self {
        let mut lines = LineData::default();
        for edge in edges {
            let base = lines.positions.len() as u32;
            lines
                .positions
                .extend(edge.points.iter().map(|p| p.to_array()));
            for i in 1..edge.points.len() as u32 {
                lines.indices.extend_from_slice(&[base + i - 1, base + i]);
            }
        }
        lines
    }

    pub fn segment_count(&self) -> usize {
        self.indices.len() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instances::VoxelInstance;
    use crate::sampler::Voxel;
    use crate::biome::Biome;
    use glam::IVec3;

    fn voxel_at(lattice: IVec3, biome: Biome) -> Voxel {
        Voxel {
            lattice,
            position: lattice.as_vec3(),
            biome,
            is_land: biome.is_land(),
        }
    }

    #[test]
    fn test_one_cube_per_instance() {
        let voxels = [
            voxel_at(IVec3::new(1, 0, 0), Biome::Ocean),
            voxel_at(IVec3::new(0, 1, 0), Biome::Land),
        ];
        let mesh = MeshData::from_instances(&InstanceBuffer::from_voxels(&voxels, 1.0));

        assert_eq!(mesh.vertex_count(), 2 * VERTICES_PER_CUBE);
        assert_eq!(mesh.normals.len(), mesh.positions.len());
        assert_eq!(mesh.colors.len(), mesh.positions.len());
        assert_eq!(mesh.indices.len(), 2 * INDICES_PER_CUBE);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn test_cube_is_centred_on_instance_and_scaled() {
        let voxels = [voxel_at(IVec3::new(2, 0, 0), Biome::Ice)];
        let mesh = MeshData::from_instances(&InstanceBuffer::from_voxels(&voxels, 0.5));

        let centre = mesh
            .positions
            .iter()
            .fold(Vec3::ZERO, |acc, p| acc + Vec3::from_array(*p))
            / mesh.vertex_count() as f32;
        assert!((centre - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);

        for p in &mesh.positions {
            let offset = Vec3::from_array(*p) - centre;
            assert!((offset.abs() - Vec3::splat(0.25)).length() < 1e-5);
        }
        assert!(mesh.colors.iter().all(|c| *c == Biome::Ice.linear_rgba()));
    }

    #[test]
    fn test_faces_wind_outward() {
        let buffer = InstanceBuffer::from_colored([(Vec3::ZERO, [255, 255, 255])], 1.0);
        let mesh = MeshData::from_instances(&buffer);
        for tri in mesh.indices.chunks(3) {
            let a = Vec3::from_array(mesh.positions[tri[0] as usize]);
            let b = Vec3::from_array(mesh.positions[tri[1] as usize]);
            let c = Vec3::from_array(mesh.positions[tri[2] as usize]);
            let normal = Vec3::from_array(mesh.normals[tri[0] as usize]);
            assert!((b - a).cross(c - a).dot(normal) > 0.0);
        }
    }

    #[test]
    fn test_empty_buffer_gives_empty_mesh() {
        let mesh = MeshData::from_instances(&InstanceBuffer::default());
        assert_eq!(mesh, MeshData::default());
    }

    #[test]
    fn test_instance_matrix_is_used_verbatim() {
        let instance = VoxelInstance::new(Vec3::new(0.0, 0.0, -3.0), 1.0, [0.0; 4]);
        assert_eq!(
            instance.matrix().transform_point3(Vec3::ZERO),
            Vec3::new(0.0, 0.0, -3.0)
        );
    }

    #[test]
    fn test_lines_join_consecutive_curve_points() {
        let edges = vec![
            GridEdge {
                from: 0,
                to: 1,
                points: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            },
            GridEdge {
                from: 1,
                to: 0,
                points: vec![Vec3::Z, Vec3::ONE],
            },
        ];
        let lines = LineData::from_edges(&edges);
        assert_eq!(lines.positions.len(), 5);
        assert_eq!(lines.indices, vec![0, 1, 1, 2, 3, 4]);
        assert_eq!(lines.segment_count(), 3);
    }
}
