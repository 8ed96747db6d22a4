use anyhow::Context;
use directories::ProjectDirs;
use neonfield_core::{CircuitConfig, HorizonConfig, OrbitConfig, ParticleConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Circuit,
    Quantum,
    Horizon,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Circuit, ViewMode::Quantum, ViewMode::Horizon];

    pub fn label(self) -> &'static str {
        match self {
            Self::Circuit => "Circuit",
            Self::Quantum => "Quantum",
            Self::Horizon => "Horizon",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Circuit => Self::Quantum,
            Self::Quantum => Self::Horizon,
            Self::Horizon => Self::Circuit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub view_mode: ViewMode,
    pub show_panel: bool,
    pub show_hud: bool,
    pub show_orbit: bool,
    pub circuit: CircuitConfig,
    pub particles: ParticleConfig,
    pub horizon: HorizonConfig,
    pub orbit: OrbitConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Circuit,
            show_panel: true,
            show_hud: true,
            show_orbit: true,
            circuit: CircuitConfig::default(),
            particles: ParticleConfig::default(),
            horizon: HorizonConfig::default(),
            orbit: OrbitConfig::default(),
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "neonfield")?;
    Some(proj.config_dir().join("viewer.toml"))
}

pub fn load_or_default() -> ViewerConfig {
    let Some(path) = config_file_path() else {
        tracing::warn!("no config directory available, using defaults");
        return ViewerConfig::default();
    };
    load_or_default_from_path(&path)
}

fn load_or_default_from_path(path: &Path) -> ViewerConfig {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return ViewerConfig::default(),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to read viewer config");
            return ViewerConfig::default();
        }
    };
    match toml::from_str(&contents) {
        Ok(cfg) => {
            tracing::info!(path = %path.display(), "loaded viewer config");
            cfg
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "malformed viewer config, using defaults");
            ViewerConfig::default()
        }
    }
}

pub fn save(cfg: &ViewerConfig) -> anyhow::Result<PathBuf> {
    let Some(path) = config_file_path() else {
        return Err(anyhow::anyhow!("no config directory available"));
    };
    save_to_path(cfg, &path)?;
    Ok(path)
}

fn save_to_path(cfg: &ViewerConfig, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    let data = toml::to_string_pretty(cfg).context("failed to serialize viewer config")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write viewer config {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn viewer_config_roundtrip_save_load() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("viewer.toml");
        let mut cfg = ViewerConfig::default();
        cfg.view_mode = ViewMode::Horizon;
        cfg.circuit.max_pulses = 12;
        cfg.particles.meteor.enabled = false;

        save_to_path(&cfg, &path).expect("save config");
        let loaded = load_or_default_from_path(&path);

        assert_eq!(cfg, loaded);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("viewer.toml");
        fs::write(
            &path,
            r#"
view_mode = "quantum"

[particles]
count = 40

[particles.meteor]
speed = 12.0
"#,
        )
        .expect("write");

        let cfg = load_or_default_from_path(&path);
        assert_eq!(cfg.view_mode, ViewMode::Quantum);
        assert_eq!(cfg.particles.count, 40);
        assert_eq!(cfg.particles.meteor.speed, 12.0);
        assert_eq!(cfg.particles.meteor.trail_len, 28);
        assert_eq!(cfg.circuit, CircuitConfig::default());
        assert!(cfg.show_panel);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("viewer.toml");
        fs::write(&path, "view_mode = [not toml").expect("write");
        assert_eq!(load_or_default_from_path(&path), ViewerConfig::default());
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempdir().expect("tempdir");
        let loaded = load_or_default_from_path(&dir.path().join("absent.toml"));
        assert_eq!(loaded, ViewerConfig::default());
    }

    #[test]
    fn unknown_view_mode_is_rejected() {
        let decoded: Result<ViewerConfig, _> = toml::from_str(r#"view_mode = "tunnel""#);
        assert!(decoded.is_err());
    }

    #[test]
    fn view_cycle_visits_every_mode() {
        let mut mode = ViewMode::Circuit;
        let mut seen = Vec::new();
        for _ in 0..ViewMode::ALL.len() {
            seen.push(mode);
            mode = mode.next();
        }
        assert_eq!(seen, ViewMode::ALL);
        assert_eq!(mode, ViewMode::Circuit);
    }
}
