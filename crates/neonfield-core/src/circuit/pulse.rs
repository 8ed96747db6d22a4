use rand::Rng;

use crate::circuit::layer::Layer;
use crate::color::{self, Rgb};

const SPEED_MIN: f32 = 0.002;
const SPEED_JITTER: f32 = 0.004;
const BRIGHTNESS_MIN: f32 = 0.7;
const BRIGHTNESS_JITTER: f32 = 0.3;
const TRAIL_MIN: f32 = 0.08;
const TRAIL_JITTER: f32 = 0.12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulseColor {
    Trace,
    Node,
    Pulse,
}

impl PulseColor {
    pub const ALL: [PulseColor; 3] = [PulseColor::Trace, PulseColor::Node, PulseColor::Pulse];

    pub fn rgb(self) -> Rgb {
        match self {
            PulseColor::Trace => color::TRACE,
            PulseColor::Node => color::NODE,
            PulseColor::Pulse => color::PULSE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pulse {
    pub id: u64,
    pub segment: usize,
    pub progress: f32,
    pub speed: f32,
    pub brightness: f32,
    pub color: PulseColor,
    pub trail: f32,
}

impl Pulse {
    pub fn is_expired(&self) -> bool {
        self.progress > 1.0 + self.trail
    }

    pub fn head_visible(&self) -> bool {
        (0.0..=1.0).contains(&self.progress)
    }
}

/// Advances every pulse by its speed and drops the ones past their trail.
pub fn advance_pulses(pulses: &mut Vec<Pulse>) {
    pulses.retain_mut(|p| {
        p.progress += p.speed;
        !p.is_expired()
    });
}

/// Global spawn cadence shared by all layers.
#[derive(Debug, Clone)]
pub struct PulseEmitter {
    interval_ms: f64,
    last_spawn_ms: f64,
    next_id: u64,
}

impl PulseEmitter {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(1.0),
            last_spawn_ms: 0.0,
            next_id: 0,
        }
    }

    pub fn set_interval(&mut self, interval_ms: f64) {
        self.interval_ms = interval_ms.max(1.0);
    }

    /// True once more than `interval` elapsed since the last spawn tick.
    pub fn due(&mut self, timestamp_ms: f64) -> bool {
        if timestamp_ms - self.last_spawn_ms > self.interval_ms {
            self.last_spawn_ms = timestamp_ms;
            true
        } else {
            false
        }
    }

    /// Spawns at most one pulse per layer if the cadence fired.
    /// Returns how many pulses were created.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        timestamp_ms: f64,
        layers: &mut [Layer],
        max_pulses: usize,
        rng: &mut R,
    ) -> usize {
        if !self.due(timestamp_ms) {
            return 0;
        }
        let mut spawned = 0;
        for layer in layers.iter_mut() {
            let segments = layer.circuit().segments.len();
            if layer.pulses().len() >= max_pulses || segments == 0 {
                continue;
            }
            let pulse = self.make_pulse(segments, layer.config.speed, rng);
            layer.push_pulse(pulse);
            spawned += 1;
        }
        spawned
    }

    fn make_pulse<R: Rng + ?Sized>(&mut self, segments: usize, speed_mult: f32, rng: &mut R) -> Pulse {
        let id = self.next_id;
        self.next_id += 1;
        Pulse {
            id,
            segment: rng.gen_range(0..segments),
            progress: 0.0,
            speed: (SPEED_MIN + rng.gen::<f32>() * SPEED_JITTER) * speed_mult,
            brightness: BRIGHTNESS_MIN + rng.gen::<f32>() * BRIGHTNESS_JITTER,
            color: PulseColor::ALL[rng.gen_range(0..PulseColor::ALL.len())],
            trail: TRAIL_MIN + rng.gen::<f32>() * TRAIL_JITTER,
        }
    }
}
