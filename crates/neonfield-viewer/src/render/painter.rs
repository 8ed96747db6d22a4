use bevy_egui::egui::{self, Color32, Mesh, Pos2, Shape, Stroke};
use neonfield_core::color::{Rgba, BACKGROUND};
use neonfield_core::{GradientStop, Surface, Vec2};
use std::f32::consts::TAU;

const GLOW_SEGMENTS: usize = 32;
const ARC_STEP: f32 = TAU / 64.0;

fn pos(p: Vec2) -> Pos2 {
    egui::pos2(p.x, p.y)
}

fn color32(c: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, (c.a * 255.0).round() as u8)
}

/// Concentric rings, one per stop, colored by vertex.
pub fn radial_mesh(center: Vec2, radius: f32, stops: &[GradientStop]) -> Mesh {
    let mut mesh = Mesh::default();
    let Some(first) = stops.first() else {
        return mesh;
    };
    if radius <= 0.0 {
        return mesh;
    }
    mesh.colored_vertex(pos(center), color32(first.color));

    let mut prev_ring: Option<u32> = None;
    for stop in stops.iter().filter(|s| s.offset > 0.0) {
        let base = mesh.vertices.len() as u32;
        let r = radius * stop.offset;
        let c = color32(stop.color);
        for i in 0..GLOW_SEGMENTS {
            let a = i as f32 / GLOW_SEGMENTS as f32 * TAU;
            mesh.colored_vertex(pos(center + Vec2::new(a.cos(), a.sin()) * r), c);
        }
        let n = GLOW_SEGMENTS as u32;
        for i in 0..n {
            let j = (i + 1) % n;
            match prev_ring {
                None => mesh.add_triangle(0, base + i, base + j),
                Some(prev) => {
                    mesh.add_triangle(prev + i, base + i, base + j);
                    mesh.add_triangle(prev + i, base + j, prev + j);
                }
            }
        }
        prev_ring = Some(base);
    }
    mesh
}

/// Horizontal bands between consecutive stops, top to bottom.
pub fn vertical_gradient_mesh(min: Vec2, max: Vec2, stops: &[GradientStop]) -> Mesh {
    let mut mesh = Mesh::default();
    if stops.len() < 2 || max.x <= min.x || max.y <= min.y {
        return mesh;
    }
    for stop in stops {
        let y = min.y + (max.y - min.y) * stop.offset;
        let c = color32(stop.color);
        mesh.colored_vertex(egui::pos2(min.x, y), c);
        mesh.colored_vertex(egui::pos2(max.x, y), c);
    }
    for k in 0..(stops.len() as u32 - 1) {
        let (tl, tr, bl, br) = (2 * k, 2 * k + 1, 2 * k + 2, 2 * k + 3);
        mesh.add_triangle(tl, tr, br);
        mesh.add_triangle(tl, br, bl);
    }
    mesh
}

pub fn arc_points(center: Vec2, radius: f32, start: f32, end: f32) -> Vec<Pos2> {
    let span = end - start;
    let steps = ((span.abs() / ARC_STEP).ceil() as usize).max(2);
    (0..=steps)
        .map(|i| {
            let a = start + span * i as f32 / steps as f32;
            pos(center + Vec2::new(a.cos(), a.sin()) * radius)
        })
        .collect()
}

/// [`Surface`] backed by an egui painter layer.
pub struct PainterSurface {
    painter: egui::Painter,
}

impl PainterSurface {
    pub fn new(painter: egui::Painter) -> Self {
        Self { painter }
    }
}

impl Surface for PainterSurface {
    fn clear(&mut self, width: f32, height: f32) {
        let rect = egui::Rect::from_min_size(Pos2::ZERO, egui::vec2(width, height));
        self.painter
            .rect_filled(rect, 0.0, color32(BACKGROUND.alpha(1.0)));
    }

    fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Rgba) {
        if points.len() < 2 || !color.is_visible() {
            return;
        }
        let pts = points.iter().copied().map(pos).collect();
        self.painter
            .add(Shape::line(pts, Stroke::new(width, color32(color))));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if !color.is_visible() {
            return;
        }
        self.painter.circle_filled(pos(center), radius, color32(color));
    }

    fn radial_glow(&mut self, center: Vec2, radius: f32, stops: &[GradientStop]) {
        let mesh = radial_mesh(center, radius, stops);
        if !mesh.is_empty() {
            self.painter.add(Shape::mesh(mesh));
        }
    }

    fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, width: f32, color: Rgba) {
        if !color.is_visible() {
            return;
        }
        let pts = arc_points(center, radius, start, end);
        self.painter
            .add(Shape::line(pts, Stroke::new(width, color32(color))));
    }

    fn fill_vertical_gradient(&mut self, min: Vec2, max: Vec2, stops: &[GradientStop]) {
        let mesh = vertical_gradient_mesh(min, max, stops);
        if !mesh.is_empty() {
            self.painter.add(Shape::mesh(mesh));
        }
    }
}
