//! Free-floating particle field with pointer glow, proximity links and a
//! periodic meteor.

pub mod meteor;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::backdrop::Backdrop;
use crate::color::{self, Rgb, WHITE};
use crate::config::ParticleConfig;
use crate::context::{Effect, FrameInput, Viewport};
use crate::math::pointer_proximity;
use crate::surface::Surface;

pub use meteor::{Meteor, MeteorPhase};

const LINK_WIDTH: f32 = 0.6;
const LINK_ALPHA: f32 = 0.35;
/// Longest frame delta fed to the meteor timer.
const MAX_FRAME_DELTA_MS: f64 = 250.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleHue {
    Cyan,
    Violet,
    Pink,
}

impl ParticleHue {
    pub const ALL: [ParticleHue; 3] = [ParticleHue::Cyan, ParticleHue::Violet, ParticleHue::Pink];

    pub fn rgb(self) -> Rgb {
        match self {
            ParticleHue::Cyan => color::CYAN,
            ParticleHue::Violet => color::VIOLET,
            ParticleHue::Pink => color::PINK,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub opacity: f32,
    pub hue: ParticleHue,
}

impl Particle {
    fn random<R: Rng + ?Sized>(vp: Viewport, base_speed: f32, rng: &mut R) -> Self {
        Self {
            pos: Vec2::new(rng.gen::<f32>() * vp.width, rng.gen::<f32>() * vp.height),
            vel: Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * base_speed,
            radius: 0.5 + rng.gen::<f32>() * 1.5,
            opacity: 0.2 + rng.gen::<f32>() * 0.5,
            hue: ParticleHue::ALL[rng.gen_range(0..ParticleHue::ALL.len())],
        }
    }

    /// Toroidal wrap: leaving one edge re-enters at the opposite one.
    fn wrap(&mut self, vp: Viewport) {
        if self.pos.x < 0.0 {
            self.pos.x = vp.width;
        } else if self.pos.x > vp.width {
            self.pos.x = 0.0;
        }
        if self.pos.y < 0.0 {
            self.pos.y = vp.height;
        } else if self.pos.y > vp.height {
            self.pos.y = 0.0;
        }
    }
}

/// A link between two particles, indices into [`QuantumField::particles`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub alpha: f32,
    pub color: Rgb,
}

pub struct QuantumField {
    cfg: ParticleConfig,
    particles: Vec<Particle>,
    meteor: Meteor,
    backdrop: Backdrop,
    viewport: Viewport,
    last_timestamp_ms: Option<f64>,
    rng: StdRng,
}

impl QuantumField {
    pub fn new(cfg: ParticleConfig) -> Self {
        Self::with_rng(cfg, StdRng::from_entropy())
    }

    pub fn with_rng(cfg: ParticleConfig, rng: StdRng) -> Self {
        Self {
            meteor: Meteor::new(cfg.meteor.clone()),
            backdrop: Backdrop::new(cfg.grid_spacing, cfg.pointer_radius),
            particles: Vec::new(),
            viewport: Viewport::default(),
            last_timestamp_ms: None,
            cfg,
            rng,
        }
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.cfg
    }

    /// Replaces the tunables. A changed `count` takes effect on the next
    /// [`QuantumField::reseed`].
    pub fn set_config(&mut self, cfg: ParticleConfig) {
        self.meteor.set_config(cfg.meteor.clone());
        self.backdrop = Backdrop::new(cfg.grid_spacing, cfg.pointer_radius);
        self.cfg = cfg;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn set_particles(&mut self, particles: Vec<Particle>) {
        self.particles = particles;
    }

    pub fn meteor(&self) -> &Meteor {
        &self.meteor
    }

    /// Throws away the current particles and scatters a fresh set.
    pub fn reseed(&mut self) {
        let vp = self.viewport;
        let base_speed = self.cfg.base_speed;
        let rng = &mut self.rng;
        self.particles = (0..self.cfg.count)
            .map(|_| Particle::random(vp, base_speed, &mut *rng))
            .collect();
        tracing::debug!(count = self.particles.len(), "seeded particle field");
    }

    pub fn launch_meteor(&mut self) {
        self.meteor.launch(self.viewport, &mut self.rng);
    }

    /// Integrates one frame: meteor, forces, damping, wrap.
    ///
    /// Nothing moves while the viewport has no area, otherwise the wrap
    /// would pin every particle to a corner.
    pub fn step(&mut self, timestamp_ms: f64) {
        if self.viewport.is_empty() {
            self.last_timestamp_ms = None;
            return;
        }
        let dt = self
            .last_timestamp_ms
            .map(|last| (timestamp_ms - last).clamp(0.0, MAX_FRAME_DELTA_MS))
            .unwrap_or(0.0);
        self.last_timestamp_ms = Some(timestamp_ms);

        self.meteor.step(dt, self.viewport, &mut self.rng);

        let base = self.cfg.base_speed;
        let floor = base * self.cfg.min_speed_factor;
        let damping = self.cfg.damping.clamp(0.0, 1.0);
        for p in self.particles.iter_mut() {
            let pushed = self.meteor.apply_force(p);

            let speed = p.vel.length();
            if speed > base {
                p.vel *= (base + (speed - base) * damping) / speed;
            } else if pushed && speed < floor {
                p.vel = if speed > f32::EPSILON {
                    p.vel * (floor / speed)
                } else {
                    Vec2::new(floor, 0.0)
                };
            }

            p.pos += p.vel;
            p.wrap(self.viewport);
        }
    }

    /// Every close pair whose midpoint lies near the pointer.
    pub fn connections(&self, pointer: Option<Vec2>) -> Vec<Connection> {
        let Some(pointer) = pointer else {
            return Vec::new();
        };
        let max_dist = self.cfg.connection_distance;
        let reach = self.cfg.pointer_radius * self.cfg.link_radius_factor;
        if max_dist <= 0.0 || reach <= 0.0 {
            return Vec::new();
        }

        let mut out = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for (j, b) in self.particles.iter().enumerate().skip(i + 1) {
                let d = a.pos.distance(b.pos);
                if d >= max_dist {
                    continue;
                }
                let m = pointer.distance((a.pos + b.pos) * 0.5);
                if m >= reach {
                    continue;
                }
                out.push(Connection {
                    a: i,
                    b: j,
                    alpha: (1.0 - d / max_dist) * (1.0 - m / reach) * LINK_ALPHA,
                    color: a.hue.rgb(),
                });
            }
        }
        out
    }

    pub fn render(&self, input: &FrameInput, surface: &mut dyn Surface) {
        let vp = input.viewport;
        let t = input.timestamp_ms;
        surface.clear(vp.width, vp.height);

        self.backdrop.draw_grid(surface, vp, t, color::CYAN);
        self.backdrop.draw_scan_line(surface, vp, t, color::CYAN);
        self.backdrop.draw_halo(surface, input.pointer);

        let radius = self.cfg.pointer_radius;
        for p in &self.particles {
            let glow = pointer_proximity(input.pointer, p.pos, radius);
            surface.fill_circle(
                p.pos,
                p.radius + glow * 2.0,
                p.hue.rgb().alpha(p.opacity + glow * 0.6),
            );
            if glow > 0.3 {
                surface.fill_circle(p.pos, p.radius * 0.5, WHITE.alpha(glow * 0.5));
            }
        }

        for c in self.connections(input.pointer) {
            let (a, b) = (self.particles[c.a].pos, self.particles[c.b].pos);
            surface.stroke_line(a, b, LINK_WIDTH, c.color.alpha(c.alpha));
        }

        self.meteor.draw(surface);
    }
}

impl Effect for QuantumField {
    fn name(&self) -> &'static str {
        "quantum"
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if self.particles.is_empty() {
            self.reseed();
        }
    }

    fn frame(&mut self, input: &FrameInput, surface: &mut dyn Surface) {
        self.viewport = input.viewport;
        self.step(input.timestamp_ms);
        self.render(input, surface);
    }

    fn teardown(&mut self) {
        self.particles.clear();
        self.meteor = Meteor::new(self.cfg.meteor.clone());
        self.last_timestamp_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCmd, DrawList};

    fn field() -> QuantumField {
        QuantumField::with_rng(ParticleConfig::default(), StdRng::seed_from_u64(7))
    }

    fn still(pos: Vec2, hue: ParticleHue) -> Particle {
        Particle {
            pos,
            vel: Vec2::ZERO,
            radius: 1.0,
            opacity: 0.5,
            hue,
        }
    }

    fn input(t: f64, pointer: Option<Vec2>, vp: Viewport) -> FrameInput {
        FrameInput {
            timestamp_ms: t,
            pointer,
            viewport: vp,
        }
    }

    fn links(list: &DrawList) -> usize {
        list.polylines().filter(|(_, w, _)| *w == LINK_WIDTH).count()
    }

    #[test]
    fn particles_created_once_and_kept_across_resizes() {
        let mut f = field();
        f.resize(Viewport::new(800.0, 600.0));
        assert_eq!(f.particles().len(), 80);
        let first = f.particles()[0].pos;
        f.resize(Viewport::new(400.0, 300.0));
        assert_eq!(f.particles()[0].pos, first);
        f.teardown();
        assert!(f.particles().is_empty());
    }

    #[test]
    fn particles_stay_in_bounds_after_wrap() {
        let mut f = field();
        let vp = Viewport::new(640.0, 480.0);
        f.resize(vp);
        let mut list = DrawList::new();
        let mut t = 0.0;
        for _ in 0..2000 {
            f.frame(&input(t, None, vp), &mut list);
            list.clear_cmds();
            for p in f.particles() {
                assert!((0.0..=vp.width).contains(&p.pos.x), "x = {}", p.pos.x);
                assert!((0.0..=vp.height).contains(&p.pos.y), "y = {}", p.pos.y);
            }
            t += 16.0;
        }
    }

    #[test]
    fn wrap_moves_to_opposite_edge() {
        let vp = Viewport::new(100.0, 100.0);
        let mut p = still(Vec2::new(-0.5, 100.5), ParticleHue::Cyan);
        p.wrap(vp);
        assert_eq!(p.pos, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn link_follows_pointer() {
        let mut f = field();
        let vp = Viewport::new(800.0, 600.0);
        f.resize(vp);
        f.set_particles(vec![
            still(Vec2::new(100.0, 100.0), ParticleHue::Violet),
            still(Vec2::new(150.0, 100.0), ParticleHue::Cyan),
        ]);

        let conns = f.connections(Some(Vec2::new(125.0, 100.0)));
        assert_eq!(conns.len(), 1);
        let expected = (1.0 - 50.0 / 130.0) * 0.35;
        assert!((conns[0].alpha - expected).abs() < 1e-5);
        assert_eq!(conns[0].color, color::VIOLET);

        let mut list = DrawList::new();
        f.frame(&input(16.0, Some(Vec2::new(125.0, 100.0)), vp), &mut list);
        assert_eq!(links(&list), 1);

        let mut list = DrawList::new();
        f.frame(&input(32.0, Some(Vec2::new(1125.0, 100.0)), vp), &mut list);
        assert_eq!(links(&list), 0);
    }

    #[test]
    fn no_links_without_pointer() {
        let mut f = field();
        f.set_particles(vec![
            still(Vec2::new(10.0, 10.0), ParticleHue::Pink),
            still(Vec2::new(12.0, 10.0), ParticleHue::Pink),
        ]);
        assert!(f.connections(None).is_empty());
    }

    #[test]
    fn fast_particles_are_damped_toward_base_speed() {
        let mut f = field();
        f.resize(Viewport::new(800.0, 600.0));
        let mut fast = still(Vec2::new(400.0, 300.0), ParticleHue::Cyan);
        fast.vel = Vec2::new(5.0, 0.0);
        f.set_particles(vec![fast]);

        for i in 0..400 {
            f.step(i as f64 * 16.0);
        }
        let base = f.config().base_speed;
        let v = f.particles()[0].vel.length();
        assert!(v < base + 0.01, "still fast: {v}");
        assert!(v >= base - 1e-6, "damped below base: {v}");
    }

    #[test]
    fn speed_floor_only_applies_to_pushed_particles() {
        let mut cfg = ParticleConfig::default();
        cfg.meteor.strength = 1e-4;
        cfg.meteor.swirl = 0.0;
        let mut f = QuantumField::with_rng(cfg, StdRng::seed_from_u64(9));
        f.resize(Viewport::new(800.0, 600.0));
        f.launch_meteor();
        let head = f.meteor().pos + f.meteor().vel;
        f.set_particles(vec![
            still(head + Vec2::new(30.0, 0.0), ParticleHue::Cyan),
            still(head + Vec2::new(0.0, 400.0), ParticleHue::Pink),
        ]);

        f.step(0.0);
        let floor = f.config().base_speed * f.config().min_speed_factor;
        let pushed = f.particles()[0].vel.length();
        assert!((pushed - floor).abs() < 1e-5, "pushed speed {pushed}");
        assert_eq!(f.particles()[1].vel, Vec2::ZERO);
    }

    #[test]
    fn seeded_velocities_are_left_alone_without_a_meteor() {
        let mut cfg = ParticleConfig::default();
        cfg.meteor.enabled = false;
        let mut f = QuantumField::with_rng(cfg, StdRng::seed_from_u64(3));
        f.resize(Viewport::new(800.0, 600.0));
        let before: Vec<Vec2> = f.particles().iter().map(|p| p.vel).collect();
        for i in 0..50 {
            f.step(i as f64 * 16.0);
        }
        let after: Vec<Vec2> = f.particles().iter().map(|p| p.vel).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn minimize_and_restore_keeps_the_field_spread_out() {
        use crate::context::AnimationContext;
        use std::collections::HashSet;

        let vp = Viewport::new(800.0, 600.0);
        let mut ctx = AnimationContext::new(field());
        let mut list = DrawList::new();
        ctx.mount(vp);
        ctx.tick(0.0, &mut list);

        ctx.resized(Viewport::new(0.0, 0.0));
        ctx.tick(16.0, &mut list);
        ctx.resized(vp);
        ctx.tick(32.0, &mut list);

        let particles = ctx.effect().particles();
        assert_eq!(particles.len(), 80);
        let distinct: HashSet<(i32, i32)> = particles
            .iter()
            .map(|p| (p.pos.x as i32, p.pos.y as i32))
            .collect();
        assert!(distinct.len() > 40, "field collapsed to {} positions", distinct.len());
    }

    #[test]
    fn empty_viewport_freezes_the_field() {
        let mut f = field();
        f.resize(Viewport::new(800.0, 600.0));
        f.step(0.0);
        let before: Vec<Vec2> = f.particles().iter().map(|p| p.pos).collect();
        f.resize(Viewport::new(0.0, 0.0));
        f.step(16.0);
        let after: Vec<Vec2> = f.particles().iter().map(|p| p.pos).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn glowing_particles_get_a_white_core() {
        let mut f = field();
        let vp = Viewport::new(800.0, 600.0);
        f.resize(vp);
        f.set_particles(vec![still(Vec2::new(300.0, 300.0), ParticleHue::Pink)]);
        let mut list = DrawList::new();
        f.render(&input(0.0, Some(Vec2::new(300.0, 300.0)), vp), &mut list);
        let cores = list
            .circles()
            .filter(|(_, _, c)| c.rgb() == WHITE)
            .count();
        assert_eq!(cores, 1);
        assert!(matches!(list.cmds[0], DrawCmd::Clear { .. }));
    }

    #[test]
    fn launched_meteor_disturbs_the_field() {
        let mut f = field();
        let vp = Viewport::new(800.0, 600.0);
        f.resize(vp);
        f.launch_meteor();
        assert!(f.meteor().is_active());
        let mut list = DrawList::new();
        f.frame(&input(16.0, None, vp), &mut list);
        // trail dot, head glow and head
        assert!(list
            .cmds
            .iter()
            .any(|c| matches!(c, DrawCmd::RadialGlow { .. })));
    }
}
