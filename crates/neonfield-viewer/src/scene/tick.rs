use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};
use neonfield_core::Viewport;

use crate::app::events::{MeteorRequested, RegenerateRequested, ViewSwitched};
use crate::scene::SceneState;

fn window_viewport(window: &Window) -> Viewport {
    Viewport::new(window.width(), window.height())
}

pub fn mount_scenes(mut st: ResMut<SceneState>, windows: Query<&Window, With<PrimaryWindow>>) {
    let Ok(window) = windows.get_single() else {
        tracing::warn!("no primary window, animation not started");
        return;
    };
    st.mount(window_viewport(window));
}

/// Samples the cursor once per frame, so the latest position wins.
pub fn track_pointer(mut st: ResMut<SceneState>, windows: Query<&Window, With<PrimaryWindow>>) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    match window.cursor_position() {
        Some(p) => st.pointer_moved(p),
        None => {
            if st.pointer().is_some() {
                st.pointer_left();
            }
        }
    }
}

pub fn handle_resize(mut st: ResMut<SceneState>, mut resized: EventReader<WindowResized>) {
    let Some(last) = resized.read().last() else {
        return;
    };
    let vp = Viewport::new(last.width, last.height);
    tracing::debug!(width = vp.width, height = vp.height, "window resized");
    st.resized(vp);
}

pub fn apply_view_switch(mut st: ResMut<SceneState>, mut switched: EventReader<ViewSwitched>) {
    if let Some(ViewSwitched(mode)) = switched.read().last() {
        st.switch_to(*mode);
    }
}

pub fn apply_scene_requests(
    mut st: ResMut<SceneState>,
    mut regenerate: EventReader<RegenerateRequested>,
    mut meteor: EventReader<MeteorRequested>,
) {
    if regenerate.read().count() > 0 {
        st.regenerate();
    }
    if meteor.read().count() > 0 {
        st.launch_meteor();
    }
}

pub fn tick_housekeeping(time: Res<Time>, mut st: ResMut<SceneState>) {
    let dt = time.delta_seconds().max(0.0001);
    st.perf.fps = 1.0 / dt;
    st.clock_ms += time.delta_seconds_f64() * 1000.0;

    st.sync_tunables();
    st.orbit.step();
}
