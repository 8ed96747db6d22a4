pub mod state;
pub mod tick;

pub use state::{SceneState, SceneStats, ORBIT_ITEMS};
pub use tick::{
    apply_scene_requests, apply_view_switch, handle_resize, mount_scenes, tick_housekeeping,
    track_pointer,
};
