use glam::Vec2;
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::TAU;

use crate::config::CircuitConfig;

pub type Path = SmallVec<[Vec2; 3]>;

#[derive(Debug, Clone)]
pub struct CircuitNode {
    pub pos: Vec2,
    pub connections: SmallVec<[usize; 3]>,
    pub brightness: f32,
    pub pulse_phase: f32,
}

#[derive(Debug, Clone)]
pub struct CircuitSegment {
    pub from: usize,
    pub to: usize,
    /// Corner of the L-shaped trace, if any.
    pub waypoint: Option<Vec2>,
    pub brightness: f32,
}

impl CircuitSegment {
    /// from -> waypoint -> to. Indices must belong to `nodes`.
    pub fn path(&self, nodes: &[CircuitNode]) -> Path {
        let mut path = Path::new();
        path.push(nodes[self.from].pos);
        if let Some(w) = self.waypoint {
            path.push(w);
        }
        path.push(nodes[self.to].pos);
        path
    }
}

#[derive(Debug, Clone, Default)]
pub struct Circuit {
    pub nodes: Vec<CircuitNode>,
    pub segments: Vec<CircuitSegment>,
    pub rows: usize,
    pub cols: usize,
}

pub fn grid_spacing(cfg: &CircuitConfig, layer_scale: f32, compact: bool) -> f32 {
    let base = if compact {
        cfg.grid_spacing * 2.0
    } else {
        cfg.grid_spacing
    };
    (base / layer_scale.max(0.05)).max(1.0)
}

pub fn generate<R: Rng + ?Sized>(
    width: f32,
    height: f32,
    layer_scale: f32,
    compact: bool,
    cfg: &CircuitConfig,
    rng: &mut R,
) -> Circuit {
    let spacing = grid_spacing(cfg, layer_scale, compact);
    let cols = (width.max(0.0) / spacing).ceil() as usize + 2;
    let rows = (height.max(0.0) / spacing).ceil() as usize + 2;

    let mut nodes: Vec<CircuitNode> = Vec::new();
    let mut grid: Vec<Option<usize>> = vec![None; rows * cols];

    for row in 0..rows {
        for col in 0..cols {
            if rng.gen::<f32>() < cfg.node_chance {
                grid[row * cols + col] = Some(nodes.len());
                nodes.push(CircuitNode {
                    pos: Vec2::new(
                        col as f32 * spacing - spacing,
                        row as f32 * spacing - spacing,
                    ),
                    connections: SmallVec::new(),
                    brightness: 0.0,
                    pulse_phase: rng.gen::<f32>() * TAU,
                });
            }
        }
    }

    let max_dist = cfg.connection_max_dist as isize;
    let max_conn = cfg.max_connections;
    let mut segments = Vec::new();

    for row in 0..rows {
        for col in 0..cols {
            let Some(from) = grid[row * cols + col] else {
                continue;
            };

            // Forward offsets only (right / down) so each pair is visited once:
            // on the node's own row dc starts at 1, lower rows span -max..=max.
            for dr in 0..=max_dist {
                let dc_start = if dr == 0 { 1 } else { -max_dist };
                for dc in dc_start..=max_dist {
                    let tr = row as isize + dr;
                    let tc = col as isize + dc;
                    if tr < 0 || tr >= rows as isize || tc < 0 || tc >= cols as isize {
                        continue;
                    }
                    let Some(to) = grid[tr as usize * cols + tc as usize] else {
                        continue;
                    };

                    if nodes[from].connections.len() >= max_conn
                        || nodes[to].connections.len() >= max_conn
                    {
                        continue;
                    }
                    if rng.gen::<f32>() > cfg.connection_chance {
                        continue;
                    }

                    nodes[from].connections.push(to);
                    nodes[to].connections.push(from);

                    let a = nodes[from].pos;
                    let b = nodes[to].pos;
                    let waypoint = if (a.x - b.x).abs() > 1.0 && (a.y - b.y).abs() > 1.0 {
                        if rng.gen::<f32>() > 0.5 {
                            Some(Vec2::new(b.x, a.y))
                        } else {
                            Some(Vec2::new(a.x, b.y))
                        }
                    } else {
                        None
                    };

                    segments.push(CircuitSegment {
                        from,
                        to,
                        waypoint,
                        brightness: 0.0,
                    });
                }
            }
        }
    }

    Circuit {
        nodes,
        segments,
        rows,
        cols,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn build(seed: u64, cfg: &CircuitConfig, compact: bool) -> Circuit {
        let mut rng = StdRng::seed_from_u64(seed);
        generate(1200.0, 800.0, 1.0, compact, cfg, &mut rng)
    }

    #[test]
    fn connection_cap_and_valid_indices_hold() {
        let cfg = CircuitConfig::default();
        for seed in 0..20 {
            let c = build(seed, &cfg, false);
            assert!(!c.nodes.is_empty());
            for n in &c.nodes {
                assert!(n.connections.len() <= 3);
                assert!(n.connections.iter().all(|&i| i < c.nodes.len()));
            }
            for s in &c.segments {
                assert!(s.from < c.nodes.len());
                assert!(s.to < c.nodes.len());
                assert_ne!(s.from, s.to);
                assert!(c.nodes[s.from].connections.contains(&s.to));
                assert!(c.nodes[s.to].connections.contains(&s.from));
            }
        }
    }

    #[test]
    fn dense_graph_saturates_at_three_connections() {
        let cfg = CircuitConfig {
            node_chance: 1.0,
            connection_chance: 1.0,
            ..CircuitConfig::default()
        };
        let c = build(7, &cfg, false);
        assert_eq!(c.nodes.len(), c.rows * c.cols);
        assert!(c.nodes.iter().all(|n| n.connections.len() <= 3));
        let total: usize = c.nodes.iter().map(|n| n.connections.len()).sum();
        assert_eq!(total, c.segments.len() * 2);
    }

    #[test]
    fn waypoints_form_right_angles_only_for_diagonals() {
        let cfg = CircuitConfig::default();
        let c = build(3, &cfg, false);
        assert!(!c.segments.is_empty());
        for s in &c.segments {
            let a = c.nodes[s.from].pos;
            let b = c.nodes[s.to].pos;
            let diagonal = (a.x - b.x).abs() > 1.0 && (a.y - b.y).abs() > 1.0;
            match s.waypoint {
                Some(w) => {
                    assert!(diagonal);
                    let h_first = w == Vec2::new(b.x, a.y);
                    let v_first = w == Vec2::new(a.x, b.y);
                    assert!(h_first || v_first);
                }
                None => assert!(!diagonal),
            }
            let path = s.path(&c.nodes);
            assert_eq!(path.len(), if s.waypoint.is_some() { 3 } else { 2 });
            assert_eq!(path[0], a);
            assert_eq!(path[path.len() - 1], b);
        }
    }

    #[test]
    fn no_nodes_means_no_segments() {
        let cfg = CircuitConfig {
            node_chance: 0.0,
            ..CircuitConfig::default()
        };
        let c = build(1, &cfg, false);
        assert!(c.nodes.is_empty());
        assert!(c.segments.is_empty());
    }

    #[test]
    fn forward_search_visits_each_pair_once() {
        let cfg = CircuitConfig {
            node_chance: 1.0,
            connection_chance: 1.0,
            connection_max_dist: 1,
            max_connections: 100,
            ..CircuitConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(6);
        let c = generate(80.0, 80.0, 1.0, false, &cfg, &mut rng);
        assert_eq!((c.rows, c.cols), (3, 3));

        // king-move neighbourhood of a full 3x3 grid: 6 + 6 + 8
        assert_eq!(c.segments.len(), 20);
        let pairs: std::collections::HashSet<(usize, usize)> = c
            .segments
            .iter()
            .map(|s| (s.from.min(s.to), s.from.max(s.to)))
            .collect();
        assert_eq!(pairs.len(), 20);
        // never looks back to an earlier row
        assert!(c.segments.iter().all(|s| c.nodes[s.to].pos.y >= c.nodes[s.from].pos.y));
    }

    #[test]
    fn compact_mode_doubles_spacing_and_thins_the_grid() {
        let cfg = CircuitConfig::default();
        assert_eq!(grid_spacing(&cfg, 1.0, true), 2.0 * grid_spacing(&cfg, 1.0, false));
        let full = build(11, &cfg, false);
        let compact = build(11, &cfg, true);
        assert!(compact.rows * compact.cols < full.rows * full.cols);
        assert!(compact.nodes.len() < full.nodes.len());
    }

    #[test]
    fn nodes_sit_on_grid_offset_by_one_cell() {
        let cfg = CircuitConfig {
            node_chance: 1.0,
            connection_chance: 0.0,
            ..CircuitConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let c = generate(160.0, 80.0, 1.0, false, &cfg, &mut rng);
        assert_eq!(c.cols, 4);
        assert_eq!(c.rows, 3);
        assert_eq!(c.nodes[0].pos, Vec2::new(-80.0, -80.0));
        assert_eq!(c.nodes[5].pos, Vec2::new(0.0, 0.0));
        assert!(c.segments.is_empty());
    }
}
