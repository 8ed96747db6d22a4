use bevy::prelude::Resource;
use neonfield_core::{
    AnimationContext, CircuitField, HorizonGrid, OrbitRing, QuantumField, Surface, Vec2, Viewport,
};

use crate::util::config::{ViewMode, ViewerConfig};

/// Items on the orbiting menu; the last one toggles the settings panel.
pub const ORBIT_ITEMS: usize = ViewMode::ALL.len() + 1;

#[derive(Default)]
pub struct UiState {
    pub view_mode: ViewMode,
    pub show_panel: bool,
    pub show_hud: bool,
    pub show_orbit: bool,
    pub help_open: bool,
}

#[derive(Default)]
pub struct PerfState {
    pub fps: f32,
    pub frame_total: u64,
}

/// What the HUD shows about the running effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneStats {
    Circuit {
        nodes: usize,
        segments: usize,
        pulses: usize,
    },
    Quantum {
        particles: usize,
        meteor_active: bool,
        meteors: u64,
    },
    Horizon {
        brightness: f32,
    },
}

#[derive(Resource)]
pub struct SceneState {
    pub circuit: AnimationContext<CircuitField>,
    pub quantum: AnimationContext<QuantumField>,
    pub horizon: AnimationContext<HorizonGrid>,
    pub orbit: OrbitRing,
    /// Tunables as edited in the panel; pushed to the effects by
    /// [`SceneState::sync_tunables`].
    pub cfg: ViewerConfig,
    pub ui: UiState,
    pub perf: PerfState,
    pub clock_ms: f64,
    viewport: Option<Viewport>,
}

impl SceneState {
    pub fn from_config(cfg: &ViewerConfig) -> Self {
        Self {
            circuit: AnimationContext::new(CircuitField::new(cfg.circuit.clone())),
            quantum: AnimationContext::new(QuantumField::new(cfg.particles.clone())),
            horizon: AnimationContext::new(HorizonGrid::new(cfg.horizon.clone())),
            orbit: OrbitRing::new(ORBIT_ITEMS, cfg.orbit.clone()),
            cfg: cfg.clone(),
            ui: UiState {
                view_mode: cfg.view_mode,
                show_panel: cfg.show_panel,
                show_hud: cfg.show_hud,
                show_orbit: cfg.show_orbit,
                help_open: false,
            },
            perf: PerfState::default(),
            clock_ms: 0.0,
            viewport: None,
        }
    }

    pub fn to_viewer_config(&self) -> ViewerConfig {
        ViewerConfig {
            view_mode: self.ui.view_mode,
            show_panel: self.ui.show_panel,
            show_hud: self.ui.show_hud,
            show_orbit: self.ui.show_orbit,
            ..self.cfg.clone()
        }
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn mount(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
        self.orbit.resize(viewport);
        match self.ui.view_mode {
            ViewMode::Circuit => self.circuit.mount(viewport),
            ViewMode::Quantum => self.quantum.mount(viewport),
            ViewMode::Horizon => self.horizon.mount(viewport),
        }
    }

    fn unmount_active(&mut self) {
        match self.ui.view_mode {
            ViewMode::Circuit => self.circuit.unmount(),
            ViewMode::Quantum => self.quantum.unmount(),
            ViewMode::Horizon => self.horizon.unmount(),
        }
    }

    /// Tears down the running effect and starts `mode` in its place.
    pub fn switch_to(&mut self, mode: ViewMode) {
        if mode == self.ui.view_mode && self.is_running() {
            return;
        }
        self.unmount_active();
        tracing::info!(from = ?self.ui.view_mode, to = ?mode, "switching view");
        self.ui.view_mode = mode;
        if let Some(vp) = self.viewport {
            self.mount(vp);
        }
    }

    pub fn is_running(&self) -> bool {
        match self.ui.view_mode {
            ViewMode::Circuit => self.circuit.is_running(),
            ViewMode::Quantum => self.quantum.is_running(),
            ViewMode::Horizon => self.horizon.is_running(),
        }
    }

    pub fn pointer_moved(&mut self, p: Vec2) {
        self.circuit.pointer_moved(p);
        self.quantum.pointer_moved(p);
        self.horizon.pointer_moved(p);
    }

    pub fn pointer_left(&mut self) {
        self.circuit.pointer_left();
        self.quantum.pointer_left();
        self.horizon.pointer_left();
    }

    pub fn pointer(&self) -> Option<Vec2> {
        match self.ui.view_mode {
            ViewMode::Circuit => self.circuit.pointer(),
            ViewMode::Quantum => self.quantum.pointer(),
            ViewMode::Horizon => self.horizon.pointer(),
        }
    }

    /// A minimized window reports a zero-area size; the last real one is kept.
    pub fn resized(&mut self, viewport: Viewport) {
        if viewport.is_empty() || self.viewport == Some(viewport) {
            return;
        }
        self.viewport = Some(viewport);
        self.orbit.resize(viewport);
        match self.ui.view_mode {
            ViewMode::Circuit => self.circuit.resized(viewport),
            ViewMode::Quantum => self.quantum.resized(viewport),
            ViewMode::Horizon => self.horizon.resized(viewport),
        }
    }

    /// Pushes panel edits into the effects. Circuit changes that affect
    /// generation show up on the next regenerate.
    pub fn sync_tunables(&mut self) {
        if self.circuit.effect().config() != &self.cfg.circuit {
            self.circuit.effect_mut().set_config(self.cfg.circuit.clone());
        }
        if self.quantum.effect().config() != &self.cfg.particles {
            self.quantum.effect_mut().set_config(self.cfg.particles.clone());
        }
        if self.horizon.effect().config() != &self.cfg.horizon {
            self.horizon.effect_mut().set_config(self.cfg.horizon.clone());
        }
        self.orbit.set_config(self.cfg.orbit.clone());
    }

    pub fn regenerate(&mut self) {
        let Some(vp) = self.viewport else {
            return;
        };
        self.sync_tunables();
        match self.ui.view_mode {
            ViewMode::Circuit => self.circuit.effect_mut().regenerate(vp),
            ViewMode::Quantum => self.quantum.effect_mut().reseed(),
            ViewMode::Horizon => {}
        }
    }

    pub fn launch_meteor(&mut self) {
        if self.ui.view_mode == ViewMode::Quantum && self.quantum.is_running() {
            self.quantum.effect_mut().launch_meteor();
        }
    }

    /// Runs one frame of the active effect at the current clock.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> bool {
        let t = self.clock_ms;
        let requested = match self.ui.view_mode {
            ViewMode::Circuit => self.circuit.tick(t, surface),
            ViewMode::Quantum => self.quantum.tick(t, surface),
            ViewMode::Horizon => self.horizon.tick(t, surface),
        };
        if requested {
            self.perf.frame_total += 1;
        }
        requested
    }

    pub fn stats(&self) -> SceneStats {
        match self.ui.view_mode {
            ViewMode::Circuit => {
                let layers = self.circuit.effect().layers();
                SceneStats::Circuit {
                    nodes: layers.node_count(),
                    segments: layers.segment_count(),
                    pulses: layers.pulse_count(),
                }
            }
            ViewMode::Quantum => {
                let q = self.quantum.effect();
                SceneStats::Quantum {
                    particles: q.particles().len(),
                    meteor_active: q.meteor().is_active(),
                    meteors: q.meteor().launches(),
                }
            }
            ViewMode::Horizon => SceneStats::Horizon {
                brightness: self.horizon.effect().brightness(),
            },
        }
    }
}
