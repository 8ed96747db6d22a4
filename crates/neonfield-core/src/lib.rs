pub mod backdrop;
pub mod circuit;
pub mod color;
pub mod config;
pub mod context;
pub mod horizon;
pub mod math;
pub mod orbit;
pub mod particles;
pub mod surface;

pub use circuit::CircuitField;
pub use config::{
    CircuitConfig, HorizonConfig, LayerConfig, MeteorConfig, OrbitConfig, ParticleConfig,
};
pub use context::{AnimationContext, Effect, FrameInput, Viewport};
pub use horizon::HorizonGrid;
pub use orbit::OrbitRing;
pub use particles::QuantumField;
pub use surface::{DrawCmd, DrawList, GradientStop, Surface};

pub use glam::Vec2;
