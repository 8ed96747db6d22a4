use serde::{Deserialize, Serialize};

/// One depth slice of the circuit background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    pub opacity: f32,
    pub scale: f32,
    pub speed: f32,
    pub line_width: f32,
}

impl LayerConfig {
    pub const fn new(opacity: f32, scale: f32, speed: f32, line_width: f32) -> Self {
        Self {
            opacity,
            scale,
            speed,
            line_width,
        }
    }
}

pub fn default_layers() -> Vec<LayerConfig> {
    // back -> front
    vec![
        LayerConfig::new(0.08, 0.6, 0.3, 0.3),
        LayerConfig::new(0.2, 0.8, 0.6, 0.5),
        LayerConfig::new(0.45, 1.0, 1.0, 0.8),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircuitConfig {
    pub grid_spacing: f32,
    pub node_chance: f32,
    pub connection_chance: f32,
    /// Neighborhood searched for connections, in grid cells.
    pub connection_max_dist: usize,
    pub max_connections: usize,
    pub max_pulses: usize,
    pub spawn_interval_ms: f64,
    pub scanner_radius: f32,
    pub node_base_radius: f32,
    pub node_glow_radius: f32,
    /// Draw the square grid + scan line behind the traces.
    pub backdrop: bool,
    #[serde(default = "default_layers")]
    pub layers: Vec<LayerConfig>,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            grid_spacing: 80.0,
            node_chance: 0.35,
            connection_chance: 0.3,
            connection_max_dist: 3,
            max_connections: 3,
            max_pulses: 25,
            spawn_interval_ms: 400.0,
            scanner_radius: 70.0,
            node_base_radius: 2.0,
            node_glow_radius: 12.0,
            backdrop: false,
            layers: default_layers(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeteorConfig {
    pub enabled: bool,
    pub spawn_interval_ms: f64,
    /// Pixels per frame.
    pub speed: f32,
    pub force_radius: f32,
    pub strength: f32,
    /// Tangential share of the push, relative to the radial part.
    pub swirl: f32,
    pub trail_len: usize,
    /// How far past the surface edge the meteor travels before it retires.
    pub margin: f32,
    pub head_radius: f32,
}

impl Default for MeteorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spawn_interval_ms: 7000.0,
            speed: 9.0,
            force_radius: 140.0,
            strength: 0.45,
            swirl: 0.6,
            trail_len: 28,
            margin: 120.0,
            head_radius: 2.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    pub connection_distance: f32,
    pub pointer_radius: f32,
    pub base_speed: f32,
    /// Connections are only drawn when their midpoint is within
    /// `pointer_radius * link_radius_factor` of the pointer.
    pub link_radius_factor: f32,
    /// Per-frame damping applied to velocity above `base_speed`.
    pub damping: f32,
    pub min_speed_factor: f32,
    pub grid_spacing: f32,
    pub meteor: MeteorConfig,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 80,
            connection_distance: 130.0,
            pointer_radius: 220.0,
            base_speed: 0.25,
            link_radius_factor: 1.5,
            damping: 0.96,
            min_speed_factor: 0.2,
            grid_spacing: 60.0,
            meteor: MeteorConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizonConfig {
    pub spacing: f32,
    pub horizon_ratio: f32,
    pub cycle: f32,
    pub fade: f32,
    pub time_step: f32,
    pub sub_segments: usize,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            spacing: 150.0,
            horizon_ratio: 0.6,
            cycle: 4.0,
            fade: 2.0,
            time_step: 0.01,
            sub_segments: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub speed: f32,
    pub hover_slowdown: f32,
    pub amplitude_y: f32,
    pub time_step: f32,
    pub vertical_squash: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            speed: 0.001,
            hover_slowdown: 0.05,
            amplitude_y: 15.0,
            time_step: 0.03,
            vertical_squash: 0.7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layers_are_back_to_front() {
        let layers = default_layers();
        assert_eq!(layers.len(), 3);
        assert!(layers.windows(2).all(|w| w[0].opacity < w[1].opacity));
        assert!(layers.windows(2).all(|w| w[0].scale < w[1].scale));
    }

    #[test]
    fn defaults_match_documented_tunables() {
        let c = CircuitConfig::default();
        assert_eq!(c.max_connections, 3);
        assert_eq!(c.max_pulses, 25);
        assert_eq!(c.spawn_interval_ms, 400.0);
        let p = ParticleConfig::default();
        assert_eq!(p.count, 80);
        assert_eq!(p.connection_distance, 130.0);
    }
}
