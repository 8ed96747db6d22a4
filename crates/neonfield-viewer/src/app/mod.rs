use bevy::prelude::*;

use crate::app::events::{MeteorRequested, RegenerateRequested, ViewSwitched};
use crate::scene::SceneState;
use crate::util::config;

pub mod events;

pub struct NeonfieldViewerPlugin;

impl Plugin for NeonfieldViewerPlugin {
    fn build(&self, app: &mut App) {
        let cfg = config::load_or_default();
        let st = SceneState::from_config(&cfg);
        app.add_event::<ViewSwitched>()
            .add_event::<RegenerateRequested>()
            .add_event::<MeteorRequested>()
            .insert_resource(st)
            .add_systems(
                Startup,
                (crate::render::setup_scene, crate::scene::mount_scenes).chain(),
            )
            .add_systems(
                Update,
                (
                    crate::scene::track_pointer,
                    crate::scene::handle_resize,
                    crate::ui::handle_shortcuts,
                    crate::ui::ui_panel,
                    crate::ui::help_overlay,
                    crate::ui::hud_overlay,
                    crate::ui::orbit_menu,
                    crate::scene::apply_view_switch,
                    crate::scene::apply_scene_requests,
                    crate::scene::tick_housekeeping,
                    crate::render::draw_scene,
                )
                    .chain(),
            );
    }
}
