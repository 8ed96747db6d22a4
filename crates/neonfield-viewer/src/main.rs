mod app;
mod render;
mod scene;
mod ui;
mod util;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use crate::app::NeonfieldViewerPlugin;

fn init_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

fn main() {
    init_tracing();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Neonfield".into(),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<LogPlugin>(),
        )
        .add_plugins(EguiPlugin)
        .add_plugins(NeonfieldViewerPlugin)
        .run();
}
