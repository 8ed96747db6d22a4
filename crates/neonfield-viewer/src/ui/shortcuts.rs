use bevy::prelude::{EventWriter, ResMut};
use bevy_egui::{egui, EguiContexts};

use crate::app::events::{MeteorRequested, RegenerateRequested, ViewSwitched};
use crate::scene::SceneState;

pub fn handle_shortcuts(
    mut contexts: EguiContexts,
    mut st: ResMut<SceneState>,
    mut switched: EventWriter<ViewSwitched>,
    mut regenerate: EventWriter<RegenerateRequested>,
    mut meteor: EventWriter<MeteorRequested>,
) {
    let ctx = contexts.ctx_mut();
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        st.ui.help_open = false;
    }

    if ctx.wants_keyboard_input() {
        return;
    }

    if ctx.input(|i| i.key_pressed(egui::Key::Questionmark)) {
        st.ui.help_open = !st.ui.help_open;
    }
    if ctx.input(|i| i.key_pressed(egui::Key::Tab)) {
        switched.send(ViewSwitched(st.ui.view_mode.next()));
    }
    if ctx.input(|i| i.key_pressed(egui::Key::R)) {
        regenerate.send(RegenerateRequested);
    }
    if ctx.input(|i| i.key_pressed(egui::Key::M)) {
        meteor.send(MeteorRequested);
    }
    if ctx.input(|i| i.key_pressed(egui::Key::H)) {
        st.ui.show_panel = !st.ui.show_panel;
    }
    if ctx.input(|i| i.key_pressed(egui::Key::O)) {
        st.ui.show_orbit = !st.ui.show_orbit;
    }
}
