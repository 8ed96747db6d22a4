//! Drawing surface the effects render through.
//!
//! Effects never talk to a windowing toolkit directly: they emit primitive
//! calls on a [`Surface`]. The viewer maps them onto an egui painter; tests
//! and tools use the recording [`DrawList`].

use glam::Vec2;
use std::f32::consts::TAU;

use crate::color::Rgba;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// 0.0 = center (or top), 1.0 = rim (or bottom).
    pub offset: f32,
    pub color: Rgba,
}

impl GradientStop {
    pub fn new(offset: f32, color: Rgba) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            color,
        }
    }
}

pub trait Surface {
    fn clear(&mut self, width: f32, height: f32);

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Rgba);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Filled disc whose color is interpolated radially between `stops`.
    fn radial_glow(&mut self, center: Vec2, radius: f32, stops: &[GradientStop]);

    /// Arc from `start` to `end` (radians, clockwise in screen space).
    fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, width: f32, color: Rgba);

    /// Axis-aligned rectangle with a top-to-bottom gradient.
    fn fill_vertical_gradient(&mut self, min: Vec2, max: Vec2, stops: &[GradientStop]);

    fn stroke_line(&mut self, a: Vec2, b: Vec2, width: f32, color: Rgba) {
        self.stroke_polyline(&[a, b], width, color);
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Rgba) {
        self.stroke_arc(center, radius, 0.0, TAU, width, color);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear {
        width: f32,
        height: f32,
    },
    Polyline {
        points: Vec<Vec2>,
        width: f32,
        color: Rgba,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    RadialGlow {
        center: Vec2,
        radius: f32,
        stops: Vec<GradientStop>,
    },
    Arc {
        center: Vec2,
        radius: f32,
        start: f32,
        end: f32,
        width: f32,
        color: Rgba,
    },
    VerticalGradient {
        min: Vec2,
        max: Vec2,
        stops: Vec<GradientStop>,
    },
}

/// Recording surface.
#[derive(Debug, Default, Clone)]
pub struct DrawList {
    pub cmds: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn clear_cmds(&mut self) {
        self.cmds.clear();
    }

    pub fn polylines(&self) -> impl Iterator<Item = (&[Vec2], f32, Rgba)> + '_ {
        self.cmds.iter().filter_map(|c| match c {
            DrawCmd::Polyline {
                points,
                width,
                color,
            } => Some((points.as_slice(), *width, *color)),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32, Rgba)> + '_ {
        self.cmds.iter().filter_map(|c| match c {
            DrawCmd::Circle {
                center,
                radius,
                color,
            } => Some((*center, *radius, *color)),
            _ => None,
        })
    }

    pub fn arcs(&self) -> usize {
        self.cmds
            .iter()
            .filter(|c| matches!(c, DrawCmd::Arc { .. }))
            .count()
    }
}

impl Surface for DrawList {
    fn clear(&mut self, width: f32, height: f32) {
        self.cmds.push(DrawCmd::Clear { width, height });
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Rgba) {
        if points.len() < 2 {
            return;
        }
        self.cmds.push(DrawCmd::Polyline {
            points: points.to_vec(),
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.cmds.push(DrawCmd::Circle {
            center,
            radius,
            color,
        });
    }

    fn radial_glow(&mut self, center: Vec2, radius: f32, stops: &[GradientStop]) {
        self.cmds.push(DrawCmd::RadialGlow {
            center,
            radius,
            stops: stops.to_vec(),
        });
    }

    fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, width: f32, color: Rgba) {
        self.cmds.push(DrawCmd::Arc {
            center,
            radius,
            start,
            end,
            width,
            color,
        });
    }

    fn fill_vertical_gradient(&mut self, min: Vec2, max: Vec2, stops: &[GradientStop]) {
        self.cmds.push(DrawCmd::VerticalGradient {
            min,
            max,
            stops: stops.to_vec(),
        });
    }
}
