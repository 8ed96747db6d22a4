//! Per-effect animation state and the frame loop contract.
//!
//! An [`AnimationContext`] holds everything the frame callback reads between
//! frames: the last pointer position, the current viewport and whether a
//! next frame is requested. Input handlers and the frame callback run on the
//! same thread, so the most recent event simply overwrites the previous one.

use glam::Vec2;

use crate::surface::Surface;

/// Below this width generation switches to compact (reduced density) mode.
pub const COMPACT_BREAKPOINT: f32 = 769.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn is_compact(&self) -> bool {
        self.width < COMPACT_BREAKPOINT
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    /// Milliseconds since the animation clock started.
    pub timestamp_ms: f64,
    pub pointer: Option<Vec2>,
    pub viewport: Viewport,
}

pub trait Effect {
    fn name(&self) -> &'static str;

    /// Called on mount and on every viewport change.
    fn resize(&mut self, viewport: Viewport);

    /// One spawn -> update -> render step.
    fn frame(&mut self, input: &FrameInput, surface: &mut dyn Surface);

    fn teardown(&mut self) {}
}

pub struct AnimationContext<E> {
    effect: E,
    pointer: Option<Vec2>,
    viewport: Option<Viewport>,
    scheduled: bool,
    frames: u64,
}

impl<E: Effect> AnimationContext<E> {
    pub fn new(effect: E) -> Self {
        Self {
            effect,
            pointer: None,
            viewport: None,
            scheduled: false,
            frames: 0,
        }
    }

    pub fn mount(&mut self, viewport: Viewport) {
        self.resized(viewport);
        self.scheduled = true;
        tracing::info!(
            effect = self.effect.name(),
            width = viewport.width,
            height = viewport.height,
            "effect mounted"
        );
    }

    pub fn unmount(&mut self) {
        if !self.scheduled {
            return;
        }
        self.scheduled = false;
        self.pointer = None;
        self.effect.teardown();
        tracing::info!(effect = self.effect.name(), frames = self.frames, "effect unmounted");
    }

    pub fn is_running(&self) -> bool {
        self.scheduled
    }

    pub fn pointer_moved(&mut self, p: Vec2) {
        self.pointer = Some(p);
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Full synchronous regeneration; skipped when the size did not change.
    ///
    /// Zero-area viewports (a minimized window) are ignored and the last
    /// usable size is kept until a real one arrives.
    pub fn resized(&mut self, viewport: Viewport) {
        if viewport.is_empty() {
            tracing::debug!(effect = self.effect.name(), "ignoring empty viewport");
            return;
        }
        if self.viewport == Some(viewport) && self.scheduled {
            return;
        }
        self.viewport = Some(viewport);
        self.effect.resize(viewport);
    }

    /// Runs one frame. Returns whether the next frame is requested.
    pub fn tick(&mut self, timestamp_ms: f64, surface: &mut dyn Surface) -> bool {
        if !self.scheduled {
            return false;
        }
        let Some(viewport) = self.viewport else {
            return self.scheduled;
        };
        let input = FrameInput {
            timestamp_ms,
            pointer: self.pointer,
            viewport,
        };
        self.effect.frame(&input, surface);
        self.frames += 1;
        self.scheduled
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn effect(&self) -> &E {
        &self.effect
    }

    pub fn effect_mut(&mut self) -> &mut E {
        &mut self.effect
    }
}
