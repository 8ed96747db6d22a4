use rand::Rng;

use crate::circuit::generator::{generate, Circuit};
use crate::circuit::pulse::{advance_pulses, Pulse};
use crate::config::{CircuitConfig, LayerConfig};

/// Depth slice owning its graph and the pulses travelling on it.
///
/// Nodes, segments and pulses are only ever replaced together, so segment and
/// pulse indices always point into this layer's own collections.
#[derive(Debug, Clone)]
pub struct Layer {
    pub config: LayerConfig,
    circuit: Circuit,
    pulses: Vec<Pulse>,
    generation: u64,
}

impl Layer {
    pub fn from_circuit(config: LayerConfig, circuit: Circuit, generation: u64) -> Self {
        Self {
            config,
            circuit,
            pulses: Vec::new(),
            generation,
        }
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub(crate) fn circuit_mut(&mut self) -> &mut Circuit {
        &mut self.circuit
    }

    pub fn pulses(&self) -> &[Pulse] {
        &self.pulses
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn push_pulse(&mut self, pulse: Pulse) {
        if pulse.segment < self.circuit.segments.len() {
            self.pulses.push(pulse);
        }
    }

    pub fn advance(&mut self) {
        advance_pulses(&mut self.pulses);
    }
}

#[derive(Debug, Clone, Default)]
pub struct LayerStack {
    layers: Vec<Layer>,
    generation: u64,
}

impl LayerStack {
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn node_count(&self) -> usize {
        self.layers.iter().map(|l| l.circuit.nodes.len()).sum()
    }

    pub fn segment_count(&self) -> usize {
        self.layers.iter().map(|l| l.circuit.segments.len()).sum()
    }

    pub fn pulse_count(&self) -> usize {
        self.layers.iter().map(|l| l.pulses.len()).sum()
    }

    /// Rebuilds every layer for the given surface. The new set is built
    /// completely before it replaces the old one; in-flight pulses are dropped.
    pub fn regenerate<R: Rng + ?Sized>(
        &mut self,
        width: f32,
        height: f32,
        compact: bool,
        cfg: &CircuitConfig,
        rng: &mut R,
    ) {
        let generation = self.generation + 1;
        let fresh: Vec<Layer> = cfg
            .layers
            .iter()
            .map(|lc| {
                let circuit = generate(width, height, lc.scale, compact, cfg, rng);
                Layer::from_circuit(*lc, circuit, generation)
            })
            .collect();

        self.layers = fresh;
        self.generation = generation;

        tracing::debug!(
            generation,
            layers = self.layers.len(),
            nodes = self.node_count(),
            segments = self.segment_count(),
            width,
            height,
            compact,
            "regenerated circuit layers"
        );
    }

    pub fn clear(&mut self) {
        self.layers.clear();
    }
}
