use glam::Vec2;
use std::f32::consts::TAU;

use crate::config::OrbitConfig;
use crate::context::Viewport;

/// Orbit radius and horizontal stretch for a surface width.
pub fn orbit_shape(width: f32) -> (f32, f32) {
    if width <= 550.0 {
        (290.0, 0.5)
    } else if width <= 1365.0 {
        (290.0, 1.0)
    } else {
        (310.0, 2.0)
    }
}

/// Evenly spaced items circling a center on a squashed ellipse, bobbing
/// vertically and slowing down while one of them is hovered.
#[derive(Debug, Clone)]
pub struct OrbitRing {
    cfg: OrbitConfig,
    angles: Vec<f32>,
    time: f32,
    hovered: bool,
    center: Vec2,
    radius: f32,
    ellipse: f32,
}

impl OrbitRing {
    pub fn new(count: usize, cfg: OrbitConfig) -> Self {
        let n = count.max(1) as f32;
        let angles = (0..count).map(|i| i as f32 / n * TAU).collect();
        let (radius, ellipse) = orbit_shape(0.0);
        Self {
            cfg,
            angles,
            time: 0.0,
            hovered: false,
            center: Vec2::ZERO,
            radius,
            ellipse,
        }
    }

    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    pub fn set_config(&mut self, cfg: OrbitConfig) {
        self.cfg = cfg;
    }

    pub fn resize(&mut self, vp: Viewport) {
        self.center = vp.center();
        (self.radius, self.ellipse) = orbit_shape(vp.width);
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn slowdown(&self) -> f32 {
        if self.hovered {
            self.cfg.hover_slowdown
        } else {
            1.0
        }
    }

    pub fn angles(&self) -> &[f32] {
        &self.angles
    }

    pub fn step(&mut self) {
        let delta = self.cfg.speed * self.slowdown();
        for a in self.angles.iter_mut() {
            *a = (*a + delta).rem_euclid(TAU);
        }
        self.time += self.cfg.time_step;
    }

    pub fn position(&self, i: usize) -> Option<Vec2> {
        let a = *self.angles.get(i)?;
        let bob = (self.time + i as f32).sin() * self.cfg.amplitude_y;
        Some(Vec2::new(
            self.center.x + a.cos() * self.radius * self.ellipse,
            self.center.y + a.sin() * self.radius * self.cfg.vertical_squash + bob,
        ))
    }

    pub fn positions(&self) -> Vec<Vec2> {
        (0..self.angles.len()).filter_map(|i| self.position(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoints() {
        assert_eq!(orbit_shape(375.0), (290.0, 0.5));
        assert_eq!(orbit_shape(550.0), (290.0, 0.5));
        assert_eq!(orbit_shape(551.0), (290.0, 1.0));
        assert_eq!(orbit_shape(1365.0), (290.0, 1.0));
        assert_eq!(orbit_shape(1920.0), (310.0, 2.0));
    }

    #[test]
    fn first_orbiter_starts_on_the_right() {
        let mut ring = OrbitRing::new(4, OrbitConfig::default());
        ring.resize(Viewport::new(1000.0, 800.0));
        let p = ring.positions();
        assert_eq!(p.len(), 4);
        assert!((p[0].x - (500.0 + 290.0)).abs() < 1e-3);
        assert!((p[0].y - 400.0).abs() < 1e-3);
        // a quarter turn later, bobbing phase offset by one
        let bob = 1.0f32.sin() * 15.0;
        assert!((p[1].x - 500.0).abs() < 1e-3);
        assert!((p[1].y - (400.0 + 290.0 * 0.7 + bob)).abs() < 1e-3);
        assert!((p[2].x - (500.0 - 290.0)).abs() < 1e-3);
    }

    #[test]
    fn hover_slows_rotation() {
        let cfg = OrbitConfig::default();
        let mut free = OrbitRing::new(4, cfg.clone());
        let mut held = OrbitRing::new(4, cfg);
        held.set_hovered(true);
        let start = free.angles()[1];
        for _ in 0..100 {
            free.step();
            held.step();
        }
        let moved_free = free.angles()[1] - start;
        let moved_held = held.angles()[1] - start;
        assert!((moved_free - 0.1).abs() < 1e-4);
        assert!((moved_held - 0.005).abs() < 1e-4);
    }

    #[test]
    fn out_of_range_index() {
        let ring = OrbitRing::new(2, OrbitConfig::default());
        assert!(ring.position(2).is_none());
    }
}
