use glam::Vec2;
use rand::Rng;
use std::collections::VecDeque;
use std::f32::consts::FRAC_PI_4;

use crate::color::{self, WHITE};
use crate::config::MeteorConfig;
use crate::context::Viewport;
use crate::particles::Particle;
use crate::surface::{GradientStop, Surface};

const HEADING_JITTER: f32 = 0.35;
const SPEED_JITTER: f32 = 0.2;
/// Slowest launch speed in pixels per frame, so an active meteor always exits.
const MIN_SPEED: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeteorPhase {
    /// Waiting for the next launch; holds the accumulated time.
    Idle { waited_ms: f64 },
    Active,
}

#[derive(Debug, Clone)]
pub struct Meteor {
    cfg: MeteorConfig,
    phase: MeteorPhase,
    pub pos: Vec2,
    pub vel: Vec2,
    trail: VecDeque<Vec2>,
    launches: u64,
}

impl Meteor {
    pub fn new(cfg: MeteorConfig) -> Self {
        let cap = cfg.trail_len.max(1);
        Self {
            cfg,
            phase: MeteorPhase::Idle { waited_ms: 0.0 },
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            trail: VecDeque::with_capacity(cap),
            launches: 0,
        }
    }

    pub fn config(&self) -> &MeteorConfig {
        &self.cfg
    }

    pub fn set_config(&mut self, cfg: MeteorConfig) {
        self.cfg = cfg;
        while self.trail.len() > self.cfg.trail_len {
            self.trail.pop_front();
        }
    }

    pub fn phase(&self) -> MeteorPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == MeteorPhase::Active
    }

    pub fn launches(&self) -> u64 {
        self.launches
    }

    pub fn trail(&self) -> impl ExactSizeIterator<Item = &Vec2> {
        self.trail.iter()
    }

    /// Enters the active phase from the top or left edge, heading down-right.
    pub fn launch<R: Rng + ?Sized>(&mut self, vp: Viewport, rng: &mut R) {
        let inset = self.cfg.margin * 0.5;
        self.pos = if rng.gen_bool(0.5) {
            Vec2::new(rng.gen::<f32>() * vp.width * 0.6, -inset)
        } else {
            Vec2::new(-inset, rng.gen::<f32>() * vp.height * 0.5)
        };
        let heading = FRAC_PI_4 + rng.gen_range(-HEADING_JITTER..=HEADING_JITTER);
        let jitter = 1.0 + rng.gen_range(-SPEED_JITTER..=SPEED_JITTER);
        let speed = self.cfg.speed.max(MIN_SPEED) * jitter;
        self.vel = Vec2::new(heading.cos(), heading.sin()) * speed;
        self.trail.clear();
        self.phase = MeteorPhase::Active;
        self.launches += 1;
        tracing::debug!(x = self.pos.x, y = self.pos.y, heading, speed, "meteor launched");
    }

    fn out_of_bounds(&self, vp: Viewport) -> bool {
        let m = self.cfg.margin;
        self.pos.x > vp.width + m
            || self.pos.y > vp.height + m
            || self.pos.x < -m
            || self.pos.y < -m
    }

    /// Advances the state machine by one frame of `dt_ms`.
    pub fn step<R: Rng + ?Sized>(&mut self, dt_ms: f64, vp: Viewport, rng: &mut R) {
        match self.phase {
            MeteorPhase::Idle { waited_ms } => {
                if !self.cfg.enabled {
                    return;
                }
                let waited_ms = waited_ms + dt_ms.max(0.0);
                if waited_ms >= self.cfg.spawn_interval_ms {
                    self.launch(vp, rng);
                } else {
                    self.phase = MeteorPhase::Idle { waited_ms };
                }
            }
            MeteorPhase::Active => {
                self.pos += self.vel;
                if self.trail.len() >= self.cfg.trail_len.max(1) {
                    self.trail.pop_front();
                }
                self.trail.push_back(self.pos);
                if self.out_of_bounds(vp) {
                    self.trail.clear();
                    self.phase = MeteorPhase::Idle { waited_ms: 0.0 };
                }
            }
        }
    }

    /// Radial push plus a tangential swirl, fading linearly with distance.
    /// Returns whether the particle was within reach.
    pub fn apply_force(&self, p: &mut Particle) -> bool {
        if !self.is_active() {
            return false;
        }
        let d = p.pos - self.pos;
        let dist = d.length();
        if dist >= self.cfg.force_radius || dist <= f32::EPSILON {
            return false;
        }
        let dir = d / dist;
        let falloff = 1.0 - dist / self.cfg.force_radius;
        let tangent = dir.perp();
        p.vel += (dir + tangent * self.cfg.swirl) * self.cfg.strength * falloff;
        true
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        if !self.is_active() {
            return;
        }
        let n = self.trail.len();
        let r = self.cfg.head_radius;
        for (i, p) in self.trail.iter().enumerate() {
            let k = (i + 1) as f32 / n as f32;
            surface.fill_circle(*p, r * (0.3 + 0.7 * k), color::CYAN.alpha(k * k * 0.5));
        }
        surface.radial_glow(
            self.pos,
            r * 6.0,
            &[
                GradientStop::new(0.0, color::VIOLET.alpha(0.5)),
                GradientStop::new(1.0, color::VIOLET.alpha(0.0)),
            ],
        );
        surface.fill_circle(self.pos, r, WHITE.alpha(0.95));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::ParticleHue;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn vp() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    fn particle_at(pos: Vec2) -> Particle {
        Particle {
            pos,
            vel: Vec2::ZERO,
            radius: 1.0,
            opacity: 0.5,
            hue: ParticleHue::Cyan,
        }
    }

    #[test]
    fn idle_until_interval_then_active() {
        let cfg = MeteorConfig {
            spawn_interval_ms: 1000.0,
            ..MeteorConfig::default()
        };
        let mut m = Meteor::new(cfg);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..62 {
            m.step(16.0, vp(), &mut rng);
        }
        assert!(matches!(m.phase(), MeteorPhase::Idle { waited_ms } if waited_ms == 992.0));
        m.step(16.0, vp(), &mut rng);
        assert!(m.is_active());
        assert_eq!(m.launches(), 1);
        assert!(m.vel.x > 0.0 && m.vel.y > 0.0);
    }

    #[test]
    fn leaves_the_surface_and_resets_timer() {
        let mut m = Meteor::new(MeteorConfig::default());
        let mut rng = StdRng::seed_from_u64(2);
        m.launch(vp(), &mut rng);

        let mut frames = 0;
        while m.is_active() {
            m.step(16.0, vp(), &mut rng);
            assert!(m.trail().len() <= m.config().trail_len);
            frames += 1;
            assert!(frames < 10_000, "meteor never left the surface");
        }
        assert_eq!(m.phase(), MeteorPhase::Idle { waited_ms: 0.0 });
        assert_eq!(m.trail().len(), 0);
    }

    #[test]
    fn disabled_meteor_never_launches() {
        let cfg = MeteorConfig {
            enabled: false,
            spawn_interval_ms: 10.0,
            ..MeteorConfig::default()
        };
        let mut m = Meteor::new(cfg);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            m.step(16.0, vp(), &mut rng);
        }
        assert_eq!(m.launches(), 0);
    }

    #[test]
    fn force_pushes_nearby_particles_away() {
        let mut m = Meteor::new(MeteorConfig {
            swirl: 0.0,
            ..MeteorConfig::default()
        });
        m.phase = MeteorPhase::Active;
        m.pos = Vec2::new(100.0, 100.0);

        let mut near = particle_at(Vec2::new(130.0, 100.0));
        let mut far = particle_at(Vec2::new(400.0, 100.0));
        assert!(m.apply_force(&mut near));
        assert!(!m.apply_force(&mut far));

        assert!(near.vel.x > 0.0);
        assert!(near.vel.y.abs() < 1e-6);
        assert_eq!(far.vel, Vec2::ZERO);
    }

    #[test]
    fn swirl_adds_tangential_component() {
        let mut m = Meteor::new(MeteorConfig::default());
        m.phase = MeteorPhase::Active;
        m.pos = Vec2::ZERO;
        let mut p = particle_at(Vec2::new(50.0, 0.0));
        assert!(m.apply_force(&mut p));
        assert!(p.vel.x > 0.0);
        assert!(p.vel.y > 0.0);
    }

    #[test]
    fn zero_speed_config_still_leaves_the_surface() {
        let mut m = Meteor::new(MeteorConfig {
            speed: 0.0,
            ..MeteorConfig::default()
        });
        let mut rng = StdRng::seed_from_u64(4);
        m.launch(vp(), &mut rng);
        assert!(m.vel.length() >= MIN_SPEED * (1.0 - SPEED_JITTER) - 1e-4);

        let mut frames = 0;
        while m.is_active() {
            m.step(16.0, vp(), &mut rng);
            frames += 1;
            assert!(frames < 20_000, "meteor never left the surface");
        }
    }
}
