use bevy::prelude::{EventWriter, ResMut};
use bevy_egui::{egui, EguiContexts};
use neonfield_core::{CircuitConfig, HorizonConfig, MeteorConfig, OrbitConfig, ParticleConfig};

use crate::app::events::{MeteorRequested, RegenerateRequested, ViewSwitched};
use crate::scene::SceneState;
use crate::ui::PANEL_W;
use crate::util::config::{self, ViewMode};

pub fn ui_panel(
    mut contexts: EguiContexts,
    mut st: ResMut<SceneState>,
    mut switched: EventWriter<ViewSwitched>,
    mut regenerate: EventWriter<RegenerateRequested>,
    mut meteor: EventWriter<MeteorRequested>,
) {
    if !st.ui.show_panel {
        return;
    }
    let st = &mut *st;

    egui::SidePanel::left("left")
        .exact_width(PANEL_W)
        .resizable(false)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Neonfield");
            ui.separator();

            let mut mode = st.ui.view_mode;
            ui.horizontal(|ui| {
                ui.label("View:");
                for m in ViewMode::ALL {
                    ui.selectable_value(&mut mode, m, m.label());
                }
            });
            if mode != st.ui.view_mode {
                switched.send(ViewSwitched(mode));
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.checkbox(&mut st.ui.show_hud, "HUD");
                ui.checkbox(&mut st.ui.show_orbit, "Orbit menu");
            });

            ui.add_space(8.0);
            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| match st.ui.view_mode {
                ViewMode::Circuit => circuit_section(ui, &mut st.cfg.circuit),
                ViewMode::Quantum => particle_section(ui, &mut st.cfg.particles),
                ViewMode::Horizon => horizon_section(ui, &mut st.cfg.horizon),
            });

            ui.add_space(8.0);
            ui.separator();
            ui.collapsing("Orbit", |ui| orbit_section(ui, &mut st.cfg.orbit));

            ui.add_space(10.0);
            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Regenerate (R)").clicked() {
                    regenerate.send(RegenerateRequested);
                }
                if st.ui.view_mode == ViewMode::Quantum && ui.button("Meteor (M)").clicked() {
                    meteor.send(MeteorRequested);
                }
            });
            ui.horizontal(|ui| {
                if ui.button("Save settings").clicked() {
                    match config::save(&st.to_viewer_config()) {
                        Ok(path) => tracing::info!(path = %path.display(), "saved viewer config"),
                        Err(err) => tracing::warn!("failed to save viewer config: {err:#}"),
                    }
                }
                if ui.button("Reset").clicked() {
                    st.cfg = config::ViewerConfig {
                        view_mode: st.ui.view_mode,
                        ..config::ViewerConfig::default()
                    };
                    regenerate.send(RegenerateRequested);
                }
            });
        });
}

fn circuit_section(ui: &mut egui::Ui, cfg: &mut CircuitConfig) {
    ui.heading("Circuit");
    ui.add(egui::Slider::new(&mut cfg.grid_spacing, 30.0..=200.0).text("grid spacing"));
    ui.add(egui::Slider::new(&mut cfg.node_chance, 0.0..=1.0).text("node chance"));
    ui.add(egui::Slider::new(&mut cfg.connection_chance, 0.0..=1.0).text("connection chance"));
    ui.add(egui::Slider::new(&mut cfg.connection_max_dist, 1..=6).text("search cells"));
    ui.add(egui::Slider::new(&mut cfg.max_connections, 1..=6).text("max connections"));
    ui.label("Regenerate to apply the values above.");

    ui.add_space(6.0);
    ui.add(egui::Slider::new(&mut cfg.max_pulses, 0..=100).text("max pulses / layer"));
    ui.add(egui::Slider::new(&mut cfg.spawn_interval_ms, 50.0..=3000.0).text("spawn every (ms)"));
    ui.add(egui::Slider::new(&mut cfg.scanner_radius, 20.0..=200.0).text("scanner radius"));
    ui.checkbox(&mut cfg.backdrop, "Grid + scan line");

    for (i, layer) in cfg.layers.iter_mut().enumerate() {
        ui.collapsing(format!("Layer {i}"), |ui| {
            ui.add(egui::Slider::new(&mut layer.opacity, 0.0..=1.0).text("opacity"));
            ui.add(egui::Slider::new(&mut layer.scale, 0.2..=2.0).text("scale"));
            ui.add(egui::Slider::new(&mut layer.speed, 0.0..=3.0).text("pulse speed"));
            ui.add(egui::Slider::new(&mut layer.line_width, 0.1..=3.0).text("line width"));
        });
    }
}

fn particle_section(ui: &mut egui::Ui, cfg: &mut ParticleConfig) {
    ui.heading("Quantum field");
    ui.add(egui::Slider::new(&mut cfg.count, 0..=400).text("particles (regenerate)"));
    ui.add(egui::Slider::new(&mut cfg.connection_distance, 20.0..=300.0).text("link distance"));
    ui.add(egui::Slider::new(&mut cfg.pointer_radius, 50.0..=500.0).text("pointer radius"));
    ui.add(egui::Slider::new(&mut cfg.base_speed, 0.0..=2.0).text("base speed"));
    ui.add(egui::Slider::new(&mut cfg.damping, 0.8..=1.0).text("damping"));

    ui.add_space(6.0);
    meteor_section(ui, &mut cfg.meteor);
}

fn meteor_section(ui: &mut egui::Ui, cfg: &mut MeteorConfig) {
    ui.heading("Meteor");
    ui.checkbox(&mut cfg.enabled, "enabled");
    ui.add(egui::Slider::new(&mut cfg.spawn_interval_ms, 1000.0..=30_000.0).text("every (ms)"));
    ui.add(egui::Slider::new(&mut cfg.speed, 1.0..=30.0).text("speed"));
    ui.add(egui::Slider::new(&mut cfg.force_radius, 20.0..=400.0).text("force radius"));
    ui.add(egui::Slider::new(&mut cfg.strength, 0.0..=2.0).text("strength"));
    ui.add(egui::Slider::new(&mut cfg.swirl, 0.0..=2.0).text("swirl"));
    ui.add(egui::Slider::new(&mut cfg.trail_len, 1..=120).text("trail"));
}

fn horizon_section(ui: &mut egui::Ui, cfg: &mut HorizonConfig) {
    ui.heading("Horizon");
    ui.add(egui::Slider::new(&mut cfg.spacing, 40.0..=400.0).text("spacing"));
    ui.add(egui::Slider::new(&mut cfg.horizon_ratio, 0.1..=0.9).text("horizon"));
    ui.add(egui::Slider::new(&mut cfg.cycle, 0.5..=10.0).text("cycle"));
    ui.add(egui::Slider::new(&mut cfg.fade, 0.0..=10.0).text("fade"));
}

fn orbit_section(ui: &mut egui::Ui, cfg: &mut OrbitConfig) {
    ui.add(egui::Slider::new(&mut cfg.speed, 0.0..=0.02).text("speed"));
    ui.add(egui::Slider::new(&mut cfg.hover_slowdown, 0.0..=1.0).text("hover slowdown"));
    ui.add(egui::Slider::new(&mut cfg.amplitude_y, 0.0..=60.0).text("bob"));
}
