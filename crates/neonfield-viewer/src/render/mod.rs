pub mod camera;
pub mod painter;

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::scene::SceneState;

pub use camera::setup_scene;
pub use painter::PainterSurface;

/// Draws the active effect on egui's background layer, under every panel.
pub fn draw_scene(mut contexts: EguiContexts, mut st: ResMut<SceneState>) {
    let ctx = contexts.ctx_mut();
    let painter = ctx.layer_painter(egui::LayerId::background());
    let mut surface = PainterSurface::new(painter);
    if st.tick(&mut surface) {
        ctx.request_repaint();
    }
}
