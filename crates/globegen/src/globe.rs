use crate::biome::Biome;
use crate::biome_map::BiomeMap;
use crate::config::GlobeGenConfig;
use crate::instances::InstanceBuffer;
use crate::models::{moon_voxels, placed, shuttle_voxels};
use crate::power_grid::{GridSettings, PowerGrid};
use crate::sampler::{ShellSettings, Voxel, land_positions, sample_shell};
use glam::Vec3;
use rand::Rng;

/// Everything computed once per globe: voxels, land candidates and the packed instances.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeData {
    pub shell: ShellSettings,
    pub voxels: Vec<Voxel>,
    pub land: Vec<Vec3>,
    pub instances: InstanceBuffer,
}

impl GlobeData {
    pub fn count(&self, biome: Biome) -> usize {
        self.voxels.iter().filter(|v| v.biome == biome).count()
    }
}

pub struct GlobeGenerator {
    pub shell: ShellSettings,
    /// Cube edge relative to `block_size`.
    pub block_overlap: f32,
    pub grid: GridSettings,
    map: BiomeMap,
}

impl GlobeGenerator {
    pub fn new(map: BiomeMap) -> Self {
        Self {
            shell: ShellSettings::default(),
            block_overlap: 1.05,
            grid: GridSettings::default(),
            map,
        }
    }

    pub fn from_config(config: &GlobeGenConfig, map: BiomeMap) -> Self {
        Self {
            shell: config.shell_settings(),
            block_overlap: config.globe.block_overlap,
            grid: config.grid_settings(),
            map,
        }
    }

    pub fn generate(&self) -> GlobeData {
        let voxels = sample_shell(&self.shell, &self.map);
        let land = land_positions(&voxels);
        let instances = InstanceBuffer::from_voxels(&voxels, self.shell.block_size * self.block_overlap);
        log::debug!(
            "globe generated: {} voxels, {} on land",
            voxels.len(),
            land.len()
        );
        GlobeData {
            shell: self.shell,
            voxels,
            land,
            instances,
        }
    }

    pub fn generate_grid<R: Rng + ?Sized>(&self, globe: &GlobeData, rng: &mut R) -> PowerGrid {
        PowerGrid::generate(&globe.land, &self.grid, rng)
    }
}

/// Instances for the moon shell.
pub fn moon_instances(shell: &ShellSettings, color: [u8; 3], block_overlap: f32) -> InstanceBuffer {
    let voxels = moon_voxels(shell, color);
    InstanceBuffer::from_colored(placed(&voxels, shell.block_size), shell.block_size * block_overlap)
}

/// Instances for the shuttle model at the given block size.
pub fn shuttle_instances(block_size: f32, block_overlap: f32) -> InstanceBuffer {
    let voxels = shuttle_voxels();
    InstanceBuffer::from_colored(placed(&voxels, block_size), block_size * block_overlap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome_map::{EARTH_MAP_HEIGHT, EARTH_MAP_WIDTH};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_all_ocean_radius_twenty() {
        let map = BiomeMap::uniform(EARTH_MAP_WIDTH, EARTH_MAP_HEIGHT, Biome::Ocean);
        let generator = GlobeGenerator::new(map);
        let globe = generator.generate();

        assert!(!globe.voxels.is_empty());
        assert_eq!(globe.count(Biome::Ocean), globe.voxels.len());
        assert!(globe.land.is_empty());

        let grid = generator.generate_grid(&globe, &mut StdRng::seed_from_u64(1));
        assert!(grid.nodes.is_empty());
        assert!(grid.particles.is_empty());
    }

    #[test]
    fn test_instances_match_voxels() {
        let globe = GlobeGenerator::new(BiomeMap::earth()).generate();
        assert_eq!(globe.instances.len(), globe.voxels.len());
        assert!((globe.instances.scale() - 0.11 * 1.05).abs() < 1e-6);
    }

    #[test]
    fn test_land_is_the_land_voxel_subset() {
        let globe = GlobeGenerator::new(BiomeMap::earth()).generate();
        let land_count = globe.voxels.iter().filter(|v| v.is_land).count();
        assert_eq!(globe.land.len(), land_count);
    }

    #[test]
    fn test_config_drives_the_generator() {
        let mut config = GlobeGenConfig::default();
        config.globe.radius = 10;
        config.grid.num_towers = 4;

        let generator = GlobeGenerator::from_config(&config, BiomeMap::earth());
        assert_eq!(generator.shell.radius, 10);
        assert_eq!(generator.grid.num_towers, 4);

        let globe = generator.generate();
        let grid = generator.generate_grid(&globe, &mut StdRng::seed_from_u64(2));
        assert!(grid.nodes.len() <= 4);
    }

    #[test]
    fn test_moon_and_shuttle_build() {
        let config = GlobeGenConfig::default();
        let moon = moon_instances(&config.moon_shell_settings(), config.moon.color, 1.05);
        assert!(!moon.is_empty());

        let shuttle = shuttle_instances(0.07, 1.05);
        assert_eq!(shuttle.len(), shuttle_voxels().len());
    }
}
