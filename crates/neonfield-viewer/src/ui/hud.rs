use bevy::prelude::Res;
use bevy_egui::{egui, EguiContexts};

use crate::scene::{SceneState, SceneStats};
use crate::ui::{HUD_EDGE_PADDING, HUD_PANEL_GAP, PANEL_W};

pub fn hud_overlay(mut contexts: EguiContexts, st: Res<SceneState>) {
    if !st.ui.show_hud {
        return;
    }
    let ctx = contexts.ctx_mut();
    let screen = ctx.screen_rect();
    let x = if st.ui.show_panel {
        screen.min.x + PANEL_W + HUD_PANEL_GAP
    } else {
        screen.min.x + HUD_EDGE_PADDING
    };
    let y = screen.min.y + HUD_EDGE_PADDING;

    egui::Area::new("hud".into())
        .order(egui::Order::Foreground)
        .fixed_pos(egui::pos2(x, y))
        .show(ctx, |ui| {
            ui.group(|ui| {
                ui.label(format!("FPS: {:.0}", st.perf.fps));
                ui.label(format!("View: {}", st.ui.view_mode.label()));
                if let Some(vp) = st.viewport() {
                    let compact = if vp.is_compact() { " (compact)" } else { "" };
                    ui.label(format!("Surface: {:.0}x{:.0}{compact}", vp.width, vp.height));
                }
                match st.stats() {
                    SceneStats::Circuit {
                        nodes,
                        segments,
                        pulses,
                    } => {
                        ui.label(format!("Nodes / segments: {nodes} / {segments}"));
                        ui.label(format!("Pulses: {pulses}"));
                    }
                    SceneStats::Quantum {
                        particles,
                        meteor_active,
                        meteors,
                    } => {
                        ui.label(format!("Particles: {particles}"));
                        ui.label(format!(
                            "Meteor: {} ({meteors} so far)",
                            if meteor_active { "active" } else { "idle" }
                        ));
                    }
                    SceneStats::Horizon { brightness } => {
                        ui.label(format!("Brightness: {:.2}", brightness));
                    }
                }
                ui.label(format!("Frames: {}", st.perf.frame_total));
                if !st.is_running() {
                    ui.label("Animation stopped");
                }
            });
        });
}
