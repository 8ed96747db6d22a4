pub mod help;
pub mod hud;
pub mod orbit;
pub mod panel;
pub mod shortcuts;

pub use help::help_overlay;
pub use hud::hud_overlay;
pub use orbit::orbit_menu;
pub use panel::ui_panel;
pub use shortcuts::handle_shortcuts;

pub const PANEL_W: f32 = 280.0;
pub const HUD_PANEL_GAP: f32 = 12.0;
pub const HUD_EDGE_PADDING: f32 = 8.0;
