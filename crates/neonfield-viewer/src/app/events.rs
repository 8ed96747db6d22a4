use bevy::prelude::Event;

use crate::util::config::ViewMode;

#[derive(Event)]
pub struct ViewSwitched(pub ViewMode);

#[derive(Event)]
pub struct RegenerateRequested;

#[derive(Event)]
pub struct MeteorRequested;
