use glam::Vec2;

use crate::color::{self, Rgb};
use crate::context::Viewport;
use crate::surface::{GradientStop, Surface};

const SCAN_BAND: f32 = 40.0;

/// Pulsing square grid, sweeping scan line and pointer halo drawn behind
/// the foreground effects.
#[derive(Debug, Clone)]
pub struct Backdrop {
    spacing: f32,
    halo_radius: f32,
}

impl Backdrop {
    pub fn new(spacing: f32, halo_radius: f32) -> Self {
        Self {
            spacing: spacing.max(4.0),
            halo_radius,
        }
    }

    pub fn grid_alpha(t: f64) -> f32 {
        ((t * 0.001) as f32).sin() * 0.02 + 0.04
    }

    /// Top edge of the scan band; wraps from just above to just below the surface.
    pub fn scan_y(t: f64, height: f32) -> f32 {
        let period = (height + SCAN_BAND) as f64;
        ((t * 0.05) % period) as f32 - SCAN_BAND * 0.5
    }

    pub fn draw_grid(&self, surface: &mut dyn Surface, vp: Viewport, t: f64, rgb: Rgb) {
        let c = rgb.alpha(Self::grid_alpha(t));
        let mut y = 0.0;
        while y < vp.height {
            surface.stroke_line(Vec2::new(0.0, y), Vec2::new(vp.width, y), 0.5, c);
            y += self.spacing;
        }
        let mut x = 0.0;
        while x < vp.width {
            surface.stroke_line(Vec2::new(x, 0.0), Vec2::new(x, vp.height), 0.5, c);
            x += self.spacing;
        }
    }

    pub fn draw_scan_line(&self, surface: &mut dyn Surface, vp: Viewport, t: f64, rgb: Rgb) {
        let y = Self::scan_y(t, vp.height);
        surface.fill_vertical_gradient(
            Vec2::new(0.0, y - SCAN_BAND * 0.5),
            Vec2::new(vp.width, y + SCAN_BAND * 0.5),
            &[
                GradientStop::new(0.0, rgb.alpha(0.0)),
                GradientStop::new(0.5, rgb.alpha(0.06)),
                GradientStop::new(1.0, rgb.alpha(0.0)),
            ],
        );
    }

    pub fn draw_halo(&self, surface: &mut dyn Surface, pointer: Option<Vec2>) {
        let Some(p) = pointer else {
            return;
        };
        surface.radial_glow(
            p,
            self.halo_radius,
            &[
                GradientStop::new(0.0, color::VIOLET.alpha(0.08)),
                GradientStop::new(0.4, color::CYAN.alpha(0.04)),
                GradientStop::new(1.0, color::BACKGROUND.alpha(0.0)),
            ],
        );
    }
}
