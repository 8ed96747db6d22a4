//! Multi-layer circuit-board background with travelling data pulses.

pub mod generator;
pub mod layer;
pub mod path;
pub mod pulse;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f32::consts::TAU;

use crate::backdrop::Backdrop;
use crate::color::{self, WHITE};
use crate::config::{CircuitConfig, LayerConfig};
use crate::context::{Effect, FrameInput, Viewport};
use crate::math::{pointer_proximity, smooth_toward};
use crate::surface::{GradientStop, Surface};

pub use generator::{Circuit, CircuitNode, CircuitSegment};
pub use layer::{Layer, LayerStack};
pub use path::point_on_path;
pub use pulse::{Pulse, PulseColor, PulseEmitter};

const SEGMENT_SMOOTHING: f32 = 0.08;
const NODE_SMOOTHING: f32 = 0.06;
const TRAIL_STEPS: usize = 8;
const PULSE_HEAD_RADIUS: f32 = 2.5;

pub struct CircuitField {
    cfg: CircuitConfig,
    layers: LayerStack,
    emitter: PulseEmitter,
    backdrop: Backdrop,
    rng: StdRng,
}

impl CircuitField {
    pub fn new(cfg: CircuitConfig) -> Self {
        Self::with_rng(cfg, StdRng::from_entropy())
    }

    pub fn with_rng(cfg: CircuitConfig, rng: StdRng) -> Self {
        Self {
            emitter: PulseEmitter::new(cfg.spawn_interval_ms),
            backdrop: Backdrop::new(cfg.grid_spacing, cfg.scanner_radius),
            layers: LayerStack::default(),
            cfg,
            rng,
        }
    }

    pub fn config(&self) -> &CircuitConfig {
        &self.cfg
    }

    /// Replaces the tunables. Generation-affecting changes show up on the
    /// next [`CircuitField::regenerate`].
    pub fn set_config(&mut self, cfg: CircuitConfig) {
        self.emitter.set_interval(cfg.spawn_interval_ms);
        self.backdrop = Backdrop::new(cfg.grid_spacing, cfg.scanner_radius);
        self.cfg = cfg;
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut LayerStack {
        &mut self.layers
    }

    pub fn regenerate(&mut self, viewport: Viewport) {
        self.layers.regenerate(
            viewport.width,
            viewport.height,
            viewport.is_compact(),
            &self.cfg,
            &mut self.rng,
        );
    }

    pub fn spawn_pulses(&mut self, timestamp_ms: f64) -> usize {
        self.emitter.tick(
            timestamp_ms,
            self.layers.layers_mut(),
            self.cfg.max_pulses,
            &mut self.rng,
        )
    }

    /// Smooths node/segment brightness toward pointer proximity and advances
    /// pulses.
    pub fn update(&mut self, pointer: Option<Vec2>) {
        let radius = self.cfg.scanner_radius;
        for layer in self.layers.layers_mut() {
            let circuit = layer.circuit_mut();

            for i in 0..circuit.segments.len() {
                let target = circuit.segments[i]
                    .path(&circuit.nodes)
                    .iter()
                    .map(|p| pointer_proximity(pointer, *p, radius))
                    .fold(0.0, f32::max);
                let seg = &mut circuit.segments[i];
                seg.brightness = smooth_toward(seg.brightness, target, SEGMENT_SMOOTHING);
            }

            for node in circuit.nodes.iter_mut() {
                let target = pointer_proximity(pointer, node.pos, radius);
                node.brightness = smooth_toward(node.brightness, target, NODE_SMOOTHING);
            }

            layer.advance();
        }
    }

    pub fn render(&self, input: &FrameInput, surface: &mut dyn Surface) {
        let Viewport { width, height } = input.viewport;
        let t = input.timestamp_ms;
        surface.clear(width, height);

        if self.cfg.backdrop {
            self.backdrop.draw_grid(surface, input.viewport, t, color::TRACE);
            self.backdrop.draw_scan_line(surface, input.viewport, t, color::TRACE);
        }

        for layer in self.layers.layers() {
            self.draw_segments(surface, layer);
            self.draw_nodes(surface, layer, t);
            draw_pulses(surface, layer);
        }

        if let Some(pointer) = input.pointer {
            self.draw_scanner(surface, pointer, t);
        }
    }

    fn draw_segments(&self, surface: &mut dyn Surface, layer: &Layer) {
        let LayerConfig {
            opacity,
            line_width,
            ..
        } = layer.config;
        let circuit = layer.circuit();
        for seg in &circuit.segments {
            let path = seg.path(&circuit.nodes);
            let b = seg.brightness;
            let alpha = (opacity + b * 0.4) * 0.6;
            surface.stroke_polyline(&path, line_width + b * 1.2, color::TRACE.alpha(alpha));
            if b > 0.1 {
                surface.stroke_polyline(&path, line_width + b * 4.0, color::TRACE.alpha(b * 0.15));
            }
        }
    }

    fn draw_nodes(&self, surface: &mut dyn Surface, layer: &Layer, t: f64) {
        let opacity = layer.config.opacity;
        for node in &layer.circuit().nodes {
            let b = node.brightness;
            let ambient = 0.3 + ((t * 0.001) as f32 + node.pulse_phase).sin() * 0.15;
            let alpha = opacity * (ambient + b * 0.7);
            let radius = self.cfg.node_base_radius + b * 2.0;

            if b > 0.15 || node.connections.len() > 1 {
                let glow = if node.connections.len() > 1 {
                    color::PULSE
                } else {
                    color::TRACE
                };
                surface.radial_glow(
                    node.pos,
                    self.cfg.node_glow_radius * (0.5 + b),
                    &[
                        GradientStop::new(0.0, glow.alpha(alpha * 0.5)),
                        GradientStop::new(1.0, glow.alpha(0.0)),
                    ],
                );
            }

            surface.fill_circle(node.pos, radius, color::NODE.alpha(alpha));

            if b > 0.3 {
                surface.fill_circle(node.pos, radius * 0.4, WHITE.alpha(b * 0.6));
            }
        }
    }

    fn draw_scanner(&self, surface: &mut dyn Surface, pointer: Vec2, t: f64) {
        let radius = self.cfg.scanner_radius;
        let ring_alpha = 0.12 + ((t * 0.003) as f32).sin() * 0.04;
        surface.stroke_circle(pointer, radius, 0.5, color::TRACE.alpha(ring_alpha));

        surface.radial_glow(
            pointer,
            radius,
            &[
                GradientStop::new(0.0, color::TRACE.alpha(0.06)),
                GradientStop::new(0.5, color::PULSE.alpha(0.03)),
                GradientStop::new(1.0, color::BACKGROUND.alpha(0.0)),
            ],
        );

        let angle = (t * 0.001) as f32;
        for i in 0..3 {
            let start = angle + i as f32 * TAU / 3.0;
            surface.stroke_arc(
                pointer,
                radius * 0.7,
                start,
                start + 0.4,
                1.0,
                color::TRACE.alpha(0.15 - i as f32 * 0.03),
            );
        }
    }
}

fn draw_pulses(surface: &mut dyn Surface, layer: &Layer) {
    let opacity = layer.config.opacity;
    let circuit = layer.circuit();
    for pulse in layer.pulses() {
        let Some(seg) = circuit.segments.get(pulse.segment) else {
            continue;
        };
        let path = seg.path(&circuit.nodes);
        let rgb = pulse.color.rgb();

        for step in 0..TRAIL_STEPS {
            let k = step as f32 / TRAIL_STEPS as f32;
            let sample = pulse.progress - k * pulse.trail;
            if !(0.0..=1.0).contains(&sample) {
                continue;
            }
            let pt = point_on_path(&path, sample);
            let alpha = (1.0 - k) * pulse.brightness * opacity * 2.0;
            let size = (1.0 - k) * 3.0 + 1.0;
            surface.radial_glow(
                pt,
                size * 3.0,
                &[
                    GradientStop::new(0.0, rgb.alpha(alpha)),
                    GradientStop::new(0.5, rgb.alpha(alpha * 0.3)),
                    GradientStop::new(1.0, rgb.alpha(0.0)),
                ],
            );
        }

        if pulse.head_visible() {
            let head = point_on_path(&path, pulse.progress);
            surface.fill_circle(head, PULSE_HEAD_RADIUS, WHITE.alpha(pulse.brightness * 0.9));
        }
    }
}

impl Effect for CircuitField {
    fn name(&self) -> &'static str {
        "circuit"
    }

    fn resize(&mut self, viewport: Viewport) {
        self.regenerate(viewport);
    }

    fn frame(&mut self, input: &FrameInput, surface: &mut dyn Surface) {
        self.spawn_pulses(input.timestamp_ms);
        self.update(input.pointer);
        self.render(input, surface);
    }

    fn teardown(&mut self) {
        self.layers.clear();
    }
}
