use bevy::prelude::Res;
use bevy_egui::{egui, EguiContexts};

use crate::scene::SceneState;

pub fn help_overlay(mut contexts: EguiContexts, st: Res<SceneState>) {
    if !st.ui.help_open {
        return;
    }

    egui::Window::new("Help / Shortcuts")
        .collapsible(false)
        .resizable(false)
        .show(contexts.ctx_mut(), |ui| {
            ui.label("Tab: next view (Circuit / Quantum / Horizon)");
            ui.label("R: regenerate the current view");
            ui.label("M: launch a meteor (Quantum)");
            ui.label("H: toggle settings panel");
            ui.label("O: toggle orbit menu");
            ui.label("?: toggle help");
            ui.label("Esc: close help");
        });
}
