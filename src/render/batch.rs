//! Tessellation of draw calls into a triangle list

use glam::Vec2;

use super::vertex::Vertex;
use super::{Color, Surface, TextStyle};
use crate::sim::Rect;

/// Text the GPU path does not rasterize; the host lays these out itself
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub pos: Vec2,
    pub style: TextStyle,
}

/// One frame's worth of geometry in playfield pixels
#[derive(Debug, Default)]
pub struct ShapeBatch {
    pub vertices: Vec<Vertex>,
    pub labels: Vec<Label>,
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for the next frame, keeping allocations
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.labels.clear();
    }

    /// Two triangles covering the quad a-b-c-d (in winding order)
    fn quad(&mut self, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: Color) {
        self.vertices.push(Vertex::new(a.x, a.y, color));
        self.vertices.push(Vertex::new(b.x, b.y, color));
        self.vertices.push(Vertex::new(c.x, c.y, color));

        self.vertices.push(Vertex::new(a.x, a.y, color));
        self.vertices.push(Vertex::new(c.x, c.y, color));
        self.vertices.push(Vertex::new(d.x, d.y, color));
    }
}

impl Surface for ShapeBatch {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let (l, t, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
        self.quad(
            Vec2::new(l, t),
            Vec2::new(r, t),
            Vec2::new(r, b),
            Vec2::new(l, b),
            color,
        );
    }

    /// Outline centered on the rectangle's edges
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32) {
        let (l, t, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
        let half = width / 2.0;
        // Horizontal edges span the corners, vertical edges fill between them
        self.fill_rect(Rect::new(l - half, t - half, rect.size.x + width, width), color);
        self.fill_rect(Rect::new(l - half, b - half, rect.size.x + width, width), color);
        self.fill_rect(Rect::new(l - half, t + half, width, rect.size.y - width), color);
        self.fill_rect(Rect::new(r - half, t + half, width, rect.size.y - width), color);
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        let dir = (to - from).normalize_or_zero();
        if dir == Vec2::ZERO {
            return;
        }
        // Perpendicular for width
        let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
        self.quad(from + perp, to + perp, to - perp, from - perp, color);
    }

    fn text(&mut self, text: &str, pos: Vec2, style: TextStyle) {
        self.labels.push(Label {
            text: text.to_string(),
            pos,
            style,
        });
    }
}
