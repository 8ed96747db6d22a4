//! Synthwave perspective floor grid below a horizon line.

use glam::Vec2;

use crate::color;
use crate::config::HorizonConfig;
use crate::context::{Effect, FrameInput, Viewport};
use crate::surface::Surface;

const LINE_WIDTH: f32 = 1.0;
/// Share of the spacing the converging lines keep at the horizon.
const VANISHING_SPREAD: f32 = 0.05;
/// How far the fan of vertical lines reaches past the surface edges.
const FAN_OVERSCAN: f32 = 1.25;

/// Brightness within a cycle: linear fade in over the first half of `fade`,
/// hold, linear fade out over the last half.
pub fn pulse_level(time: f32, cycle: f32, fade: f32) -> f32 {
    if cycle <= 0.0 {
        return 1.0;
    }
    let half = (fade * 0.5).clamp(0.0, cycle * 0.5);
    if half <= 0.0 {
        return 1.0;
    }
    let t = time.rem_euclid(cycle);
    if t < half {
        t / half
    } else if t > cycle - half {
        (cycle - t) / half
    } else {
        1.0
    }
}

pub struct HorizonGrid {
    cfg: HorizonConfig,
    time: f32,
}

impl HorizonGrid {
    pub fn new(cfg: HorizonConfig) -> Self {
        Self { cfg, time: 0.0 }
    }

    pub fn config(&self) -> &HorizonConfig {
        &self.cfg
    }

    pub fn set_config(&mut self, cfg: HorizonConfig) {
        self.cfg = cfg;
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn brightness(&self) -> f32 {
        pulse_level(self.time, self.cfg.cycle, self.cfg.fade)
    }

    pub fn horizon_y(&self, vp: Viewport) -> f32 {
        vp.height * self.cfg.horizon_ratio.clamp(0.0, 1.0)
    }

    pub fn advance(&mut self) {
        self.time += self.cfg.time_step;
    }

    pub fn render(&self, vp: Viewport, surface: &mut dyn Surface) {
        surface.clear(vp.width, vp.height);
        let horizon = self.horizon_y(vp);
        let depth = vp.height - horizon;
        let spacing = self.cfg.spacing.max(4.0);
        if vp.is_empty() || depth <= 0.0 {
            return;
        }
        let level = self.brightness();

        let mut y = 0.0;
        while y <= depth {
            let alpha = y / depth * level;
            surface.stroke_line(
                Vec2::new(0.0, horizon + y),
                Vec2::new(vp.width, horizon + y),
                LINE_WIDTH,
                color::PINK.alpha(alpha),
            );
            y += spacing;
        }

        let segments = self.cfg.sub_segments.max(1);
        let fan = (vp.width / spacing).ceil() * FAN_OVERSCAN;
        let cx = vp.width * 0.5;
        let mut i = -fan;
        while i <= fan {
            let start = Vec2::new(cx + i * spacing + spacing * 0.5, vp.height);
            let end = Vec2::new(cx + i * spacing * VANISHING_SPREAD, horizon);
            for s in 0..segments {
                let a = start.lerp(end, s as f32 / segments as f32);
                let b = start.lerp(end, (s + 1) as f32 / segments as f32);
                let alpha = ((a.y - horizon) / depth).clamp(0.0, 1.0) * level;
                surface.stroke_line(a, b, LINE_WIDTH, color::PINK.alpha(alpha));
            }
            i += 1.0;
        }
    }
}

impl Effect for HorizonGrid {
    fn name(&self) -> &'static str {
        "horizon"
    }

    fn resize(&mut self, _viewport: Viewport) {}

    fn frame(&mut self, input: &FrameInput, surface: &mut dyn Surface) {
        self.advance();
        self.render(input.viewport, surface);
    }

    fn teardown(&mut self) {
        self.time = 0.0;
    }
}
