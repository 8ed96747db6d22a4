use bevy::prelude::*;
use neonfield_core::color::BACKGROUND;

pub fn setup_scene(mut commands: Commands) {
    commands.insert_resource(ClearColor(Color::srgb_u8(
        BACKGROUND.r,
        BACKGROUND.g,
        BACKGROUND.b,
    )));
    commands.spawn(Camera2dBundle::default());
}
