use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn alpha(self, a: f32) -> Rgba {
        Rgba::new(self, a)
    }
}

/// Straight (non-premultiplied) color with a float alpha in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub fn new(rgb: Rgb, a: f32) -> Self {
        let a = if a.is_finite() { a.clamp(0.0, 1.0) } else { 0.0 };
        Self {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
            a,
        }
    }

    pub fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    pub fn is_visible(self) -> bool {
        self.a > 0.0
    }
}

pub const WHITE: Rgb = Rgb::new(255, 255, 255);

// Holo-motherboard palette (circuit background)
pub const TRACE: Rgb = Rgb::new(0, 255, 157);
pub const NODE: Rgb = WHITE;
pub const PULSE: Rgb = Rgb::new(0, 188, 212);

// Quantum palette (particle field)
pub const CYAN: Rgb = Rgb::new(0, 243, 255);
pub const VIOLET: Rgb = Rgb::new(188, 19, 254);
pub const PINK: Rgb = Rgb::new(255, 0, 128);

pub const BACKGROUND: Rgb = Rgb::new(5, 7, 14);
