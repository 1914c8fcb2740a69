//! Decorative power grid laid over the land voxels.
//!
//! Towers are picked from land positions by rejection sampling, joined to
//! their nearest neighbours with gently arched Bezier curves, and populated
//! with particles that travel along those curves.

use crate::particles::GridParticle;
use glam::{Quat, Vec3};
use rand::Rng;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct GridSettings {
    pub num_towers: usize,
    pub connections_per_tower: usize,
    pub particles_per_line: usize,
    /// Hard cap on random draws while picking towers.
    pub max_attempts: usize,
    /// Radial multiplier lifting towers above the voxel surface.
    pub tower_lift: f32,
    /// Arc height as a fraction of the chord length.
    pub arc_height: f32,
    pub curve_segments: usize,
    pub min_speed: f32,
    pub max_speed: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            num_towers: 20,
            connections_per_tower: 2,
            particles_per_line: 2,
            max_attempts: 2000,
            tower_lift: 1.04,
            arc_height: 0.08,
            curve_segments: 20,
            min_speed: 0.15,
            max_speed: 0.35,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerNode {
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridEdge {
    pub from: usize,
    pub to: usize,
    /// Sampled curve, `curve_segments + 1` points from `from` to `to`.
    pub points: Vec<Vec3>,
}

/// Where to draw a tower marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TowerPlacement {
    pub position: Vec3,
    /// Rotates local +Y onto the outward radial direction.
    pub rotation: Quat,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PowerGrid {
    pub nodes: Vec<PowerNode>,
    pub edges: Vec<GridEdge>,
    pub particles: Vec<GridParticle>,
}

impl PowerGrid {
    pub fn generate<R: Rng + ?Sized>(land: &[Vec3], settings: &GridSettings, rng: &mut R) -> Self {
        let nodes = select_nodes(
            land,
            settings.num_towers,
            settings.max_attempts,
            settings.tower_lift,
            rng,
        );
        let edges = connect_nodes(
            &nodes,
            settings.connections_per_tower,
            settings.arc_height,
            settings.curve_segments,
        );
        let particles = spawn_particles(&edges, settings, rng);

        log::debug!(
            "power grid: {} towers, {} lines, {} particles from {} land voxels",
            nodes.len(),
            edges.len(),
            particles.len(),
            land.len()
        );

        Self {
            nodes,
            edges,
            particles,
        }
    }

    pub fn towers(&self) -> Vec<TowerPlacement> {
        self.nodes.iter().map(|node| tower_placement(node.position)).collect()
    }

    /// Current world position of a particle, if its edge exists.
    pub fn particle_position(&self, particle: &GridParticle) -> Option<Vec3> {
        self.edges
            .get(particle.edge)
            .map(|edge| particle.position_on(&edge.points))
    }

    /// Advances every particle by one frame.
    pub fn advance(&mut self, dt: f32) {
        for particle in &mut self.particles {
            particle.advance(dt);
        }
    }
}

/// Picks up to `target` distinct land positions, giving up after `max_attempts` draws.
pub fn select_nodes<R: Rng + ?Sized>(
    land: &[Vec3],
    target: usize,
    max_attempts: usize,
    lift: f32,
    rng: &mut R,
) -> Vec<PowerNode> {
    let mut nodes = Vec::with_capacity(target.min(land.len()));
    if land.is_empty() {
        return nodes;
    }

    let mut used = HashSet::new();
    let mut attempts = 0;
    while nodes.len() < target && attempts < max_attempts {
        attempts += 1;
        let idx = rng.random_range(0..land.len());
        if used.insert(idx) {
            nodes.push(PowerNode {
                position: land[idx] * lift,
            });
        }
    }

    if nodes.len() < target {
        log::debug!(
            "placed {} of {} towers after {} attempts",
            nodes.len(),
            target,
            attempts
        );
    }
    nodes
}

/// Evaluates a quadratic Bezier curve at `t`.
pub fn quadratic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, t: f32) -> Vec3 {
    let s = 1.0 - t;
    p0 * (s * s) + p1 * (2.0 * s * t) + p2 * (t * t)
}

/// Control point lifted along the averaged radial direction by a fraction of the chord.
pub fn arc_control_point(start: Vec3, end: Vec3, arc_height: f32) -> Vec3 {
    let chord = start.distance(end);
    ((start + end) * 0.5).normalize_or_zero() * (start.length() + chord * arc_height)
}

/// Samples the arc from `start` to `end` into `segments + 1` points.
pub fn arc_points(start: Vec3, end: Vec3, arc_height: f32, segments: usize) -> Vec<Vec3> {
    let control = arc_control_point(start, end, arc_height);
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| quadratic_bezier(start, control, end, i as f32 / segments as f32))
        .collect()
}

/// Connects each node to its `k` nearest neighbours.
///
/// Every node contributes its own edges, so mutual neighbours are joined twice,
/// once in each direction.
pub fn connect_nodes(
    nodes: &[PowerNode],
    k: usize,
    arc_height: f32,
    segments: usize,
) -> Vec<GridEdge> {
    let mut edges = Vec::with_capacity(nodes.len() * k);
    for (i, start) in nodes.iter().enumerate() {
        for j in nearest_neighbors(nodes, i, k) {
            edges.push(GridEdge {
                from: i,
                to: j,
                points: arc_points(start.position, nodes[j].position, arc_height, segments),
            });
        }
    }
    edges
}

/// Indices of the `k` nodes closest to `nodes[index]`, nearest first. Ties keep index order.
pub fn nearest_neighbors(nodes: &[PowerNode], index: usize, k: usize) -> Vec<usize> {
    let origin = nodes[index].position;
    let mut ranked: Vec<(usize, f32)> = nodes
        .iter()
        .enumerate()
        .filter(|(j, _)| *j != index)
        .map(|(j, node)| (j, origin.distance(node.position)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked.into_iter().take(k).map(|(j, _)| j).collect()
}

pub fn spawn_particles<R: Rng + ?Sized>(
    edges: &[GridEdge],
    settings: &GridSettings,
    rng: &mut R,
) -> Vec<GridParticle> {
    let mut particles = Vec::with_capacity(edges.len() * settings.particles_per_line);
    for edge in 0..edges.len() {
        for _ in 0..settings.particles_per_line {
            let speed = if settings.max_speed > settings.min_speed {
                rng.random_range(settings.min_speed..settings.max_speed)
            } else {
                settings.min_speed
            };
            particles.push(GridParticle::new(edge, rng.random::<f32>(), speed));
        }
    }
    particles
}

pub fn tower_placement(position: Vec3) -> TowerPlacement {
    let up = position.normalize_or_zero();
    let rotation = if up == Vec3::ZERO {
        Quat::IDENTITY
    } else {
        Quat::from_rotation_arc(Vec3::Y, up)
    };
    TowerPlacement { position, rotation }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::Biome;
    use crate::biome_map::{BiomeMap, EARTH_MAP_HEIGHT, EARTH_MAP_WIDTH};
    use crate::sampler::{ShellSettings, land_positions, sample_shell};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::rstest;

    fn ring(count: usize) -> Vec<Vec3> {
        (0..count)
            .map(|i| {
                let angle = i as f32 / count as f32 * std::f32::consts::TAU;
                Vec3::new(angle.cos(), 0.0, angle.sin())
            })
            .collect()
    }

    fn nodes_at(points: &[Vec3]) -> Vec<PowerNode> {
        points.iter().map(|&position| PowerNode { position }).collect()
    }

    #[rstest]
    #[case(50, 20)]
    #[case(20, 20)]
    #[case(5, 20)]
    #[case(1, 3)]
    fn test_selection_never_duplicates_or_overshoots(#[case] land: usize, #[case] target: usize) {
        let land = ring(land);
        let mut rng = StdRng::seed_from_u64(3);
        let nodes = select_nodes(&land, target, 2000, 1.0, &mut rng);

        assert!(nodes.len() <= target);
        assert!(nodes.len() <= land.len());
        for (i, a) in nodes.iter().enumerate() {
            for b in &nodes[i + 1..] {
                assert_ne!(a.position, b.position);
            }
        }
    }

    #[test]
    fn test_selection_fills_small_land_completely() {
        let land = ring(5);
        let mut rng = StdRng::seed_from_u64(11);
        let nodes = select_nodes(&land, 20, 2000, 1.0, &mut rng);
        assert_eq!(nodes.len(), 5);
    }

    #[test]
    fn test_selection_on_empty_land_terminates_empty() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(select_nodes(&[], 20, usize::MAX, 1.04, &mut rng).is_empty());
    }

    #[test]
    fn test_selection_respects_attempt_cap() {
        let land = ring(1000);
        let mut rng = StdRng::seed_from_u64(5);
        let nodes = select_nodes(&land, 20, 3, 1.0, &mut rng);
        assert!(nodes.len() <= 3);
    }

    #[test]
    fn test_selected_nodes_are_lifted() {
        let land = vec![Vec3::new(2.0, 0.0, 0.0)];
        let mut rng = StdRng::seed_from_u64(1);
        let nodes = select_nodes(&land, 1, 10, 1.04, &mut rng);
        assert_eq!(nodes, vec![PowerNode { position: Vec3::new(2.08, 0.0, 0.0) }]);
    }

    #[test]
    fn test_arc_midpoint_bulges_outward() {
        let a = Vec3::X;
        let b = Vec3::Y;
        let points = arc_points(a, b, 0.08, 20);
        let mid = points[10];
        let chord_midpoint = (a + b) * 0.5;
        assert!(mid.length() > chord_midpoint.length());
        assert!(arc_control_point(a, b, 0.08).length() > 1.0);
    }

    #[test]
    fn test_arc_control_point_offset_scales_with_chord() {
        let control = arc_control_point(Vec3::X, Vec3::Y, 0.08);
        let chord = std::f32::consts::SQRT_2;
        assert!((control.length() - (1.0 + chord * 0.08)).abs() < 1e-6);
        assert!((control.normalize() - Vec3::new(1.0, 1.0, 0.0).normalize()).length() < 1e-6);
    }

    #[test]
    fn test_arc_starts_and_ends_on_nodes() {
        let start = Vec3::new(1.0, 0.5, 0.0);
        let end = Vec3::new(0.0, 0.5, 1.0);
        let points = arc_points(start, end, 0.08, 20);
        assert_eq!(points.len(), 21);
        assert!((points[0] - start).length() < 1e-6);
        assert!((points[20] - end).length() < 1e-6);
    }

    #[test]
    fn test_zero_segments_still_yields_a_line() {
        assert_eq!(arc_points(Vec3::X, Vec3::Y, 0.08, 0).len(), 2);
    }

    #[test]
    fn test_nearest_neighbors_are_ranked_by_distance() {
        let nodes = nodes_at(&[
            Vec3::ZERO,
            Vec3::new(3.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ]);
        assert_eq!(nearest_neighbors(&nodes, 0, 2), vec![2, 3]);
        assert_eq!(nearest_neighbors(&nodes, 0, 10), vec![2, 3, 1]);
    }

    #[test]
    fn test_nearest_neighbor_ties_keep_index_order() {
        let nodes = nodes_at(&[Vec3::ZERO, Vec3::X, Vec3::NEG_X, Vec3::Y]);
        assert_eq!(nearest_neighbors(&nodes, 0, 2), vec![1, 2]);
    }

    #[test]
    fn test_each_node_gets_k_edges() {
        let nodes = nodes_at(&ring(6));
        let edges = connect_nodes(&nodes, 2, 0.08, 20);
        assert_eq!(edges.len(), 12);
        for (i, _) in nodes.iter().enumerate() {
            assert_eq!(edges.iter().filter(|e| e.from == i).count(), 2);
        }
        assert!(edges.iter().all(|e| e.from != e.to && e.points.len() == 21));
    }

    #[test]
    fn test_single_node_has_no_edges() {
        let nodes = nodes_at(&[Vec3::X]);
        assert!(connect_nodes(&nodes, 2, 0.08, 20).is_empty());
    }

    #[test]
    fn test_all_ocean_globe_has_empty_grid() {
        let map = BiomeMap::uniform(EARTH_MAP_WIDTH, EARTH_MAP_HEIGHT, Biome::Ocean);
        let voxels = sample_shell(&ShellSettings::default(), &map);
        let land = land_positions(&voxels);
        let mut rng = StdRng::seed_from_u64(42);

        let grid = PowerGrid::generate(&land, &GridSettings::default(), &mut rng);
        assert!(grid.nodes.is_empty());
        assert!(grid.edges.is_empty());
        assert!(grid.particles.is_empty());
    }

    #[test]
    fn test_earth_grid_matches_settings() {
        let voxels = sample_shell(&ShellSettings::default(), &BiomeMap::earth());
        let land = land_positions(&voxels);
        let settings = GridSettings::default();
        let mut rng = StdRng::seed_from_u64(42);

        let grid = PowerGrid::generate(&land, &settings, &mut rng);
        assert_eq!(grid.nodes.len(), settings.num_towers);
        assert_eq!(
            grid.edges.len(),
            settings.num_towers * settings.connections_per_tower
        );
        assert_eq!(
            grid.particles.len(),
            grid.edges.len() * settings.particles_per_line
        );
        for particle in &grid.particles {
            assert!((0.0..1.0).contains(&particle.progress));
            assert!(particle.speed >= settings.min_speed && particle.speed < settings.max_speed);
            assert!(grid.particle_position(particle).is_some());
        }
    }

    #[test]
    fn test_same_seed_same_grid() {
        let voxels = sample_shell(&ShellSettings::default(), &BiomeMap::earth());
        let land = land_positions(&voxels);
        let settings = GridSettings::default();

        let a = PowerGrid::generate(&land, &settings, &mut StdRng::seed_from_u64(9));
        let b = PowerGrid::generate(&land, &settings, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_advance_moves_every_particle() {
        let nodes = nodes_at(&ring(4));
        let edges = connect_nodes(&nodes, 1, 0.08, 4);
        let mut grid = PowerGrid {
            particles: vec![GridParticle::new(0, 0.1, 0.2), GridParticle::new(1, 0.5, 0.1)],
            nodes,
            edges,
        };
        grid.advance(1.0);
        assert!((grid.particles[0].progress - 0.3).abs() < 1e-6);
        assert!((grid.particles[1].progress - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_particle_on_missing_edge_has_no_position() {
        let grid = PowerGrid::default();
        assert!(grid.particle_position(&GridParticle::new(3, 0.0, 0.1)).is_none());
    }

    #[rstest]
    #[case(Vec3::new(0.0, 2.0, 0.0))]
    #[case(Vec3::new(1.0, 0.0, 0.0))]
    #[case(Vec3::new(0.0, -3.0, 0.0))]
    #[case(Vec3::new(1.0, 1.0, -1.0))]
    fn test_towers_point_away_from_centre(#[case] position: Vec3) {
        let tower = tower_placement(position);
        let up = tower.rotation * Vec3::Y;
        assert!((up - position.normalize()).length() < 1e-5);
        assert_eq!(tower.position, position);
    }
}
