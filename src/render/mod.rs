//! Rendering
//!
//! [`draw_scene`] composes a frame from engine state onto any [`Surface`].
//! The browser build tessellates into a [`ShapeBatch`] and presents it with
//! the WebGPU pipeline; text is handed back to the host as labels.

pub mod batch;
pub mod pipeline;
pub mod present;
pub mod vertex;

pub use batch::{Label, ShapeBatch};
pub use pipeline::{RenderInitError, RenderState};
pub use present::{FrameOutcome, Presenter, present_frame};
pub use vertex::Vertex;

use glam::Vec2;

use crate::sim::{GamePhase, GameState, Qubit, Rect, Track, obstacle_hitbox, qubit_hitbox};
use crate::tuning::Tuning;

/// Linear RGBA
pub type Color = [f32; 4];

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BACKGROUND: Color = [0.04, 0.04, 0.04, 1.0];
    pub const TRACK: Color = [0.1, 0.1, 0.1, 1.0];
    pub const WATERMARK: Color = [0.13, 0.13, 0.13, 1.0];
    pub const QUBIT_A: Color = [0.0, 1.0, 0.53, 1.0];
    pub const QUBIT_B: Color = [1.0, 0.4, 0.53, 1.0];
    pub const QUBIT_OUTLINE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const QUBIT_LABEL: Color = [0.0, 0.0, 0.0, 1.0];
    pub const LINK: Color = [1.0, 1.0, 1.0, 0.2];
    pub const OBSTACLE: Color = [1.0, 0.2, 0.2, 1.0];
    pub const OBSTACLE_OUTLINE: Color = [1.0, 0.4, 0.4, 1.0];
    pub const TEXT: Color = [1.0, 1.0, 1.0, 1.0];
    pub const MUTED: Color = [0.4, 0.4, 0.4, 1.0];
    pub const DIM: Color = [0.27, 0.27, 0.27, 1.0];
    pub const SUBTLE: Color = [0.53, 0.53, 0.53, 1.0];
    pub const OVERLAY: Color = [0.0, 0.0, 0.0, 0.85];
    pub const DANGER: Color = [1.0, 0.2, 0.2, 1.0];
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    pub color: Color,
    pub align: Align,
    pub bold: bool,
}

impl TextStyle {
    pub const fn new(size: f32, color: Color, align: Align, bold: bool) -> Self {
        Self {
            size,
            color,
            align,
            bold,
        }
    }
}

/// A 2D drawing target in playfield pixels (origin top-left, y down)
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f32);
    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);
    /// `pos` is the text baseline anchor
    fn text(&mut self, text: &str, pos: Vec2, style: TextStyle);
}

/// Draw one frame. `time_ms` only drives cosmetic pulsing.
pub fn draw_scene(surface: &mut impl Surface, state: &GameState, tuning: &Tuning, time_ms: f64) {
    let w = tuning.canvas_width;
    let h = tuning.canvas_height;

    surface.fill_rect(Rect::new(0.0, 0.0, w, h), colors::BACKGROUND);

    for floor in [tuning.floor_a(), tuning.floor_b()] {
        let y = floor + 5.0;
        surface.line(Vec2::new(0.0, y), Vec2::new(w, y), colors::TRACK, 2.0);
    }

    let watermark = TextStyle::new(80.0, colors::WATERMARK, Align::Center, true);
    surface.text("ENTANGLED", Vec2::new(w / 2.0, h / 2.0 - 20.0), watermark);
    surface.text("DASH", Vec2::new(w / 2.0, h / 2.0 + 60.0), watermark);

    draw_qubit(surface, &state.qubit_a, "A", colors::QUBIT_A, tuning, time_ms);
    draw_qubit(surface, &state.qubit_b, "B", colors::QUBIT_B, tuning, time_ms);

    // Entanglement link between the two runners
    let link_x = tuning.qubit_x + tuning.qubit_size / 2.0;
    surface.line(
        Vec2::new(link_x, state.qubit_a.y + tuning.qubit_size),
        Vec2::new(link_x, state.qubit_b.y),
        colors::LINK,
        1.0,
    );

    for obstacle in &state.obstacles {
        for track in [Track::A, Track::B] {
            if obstacle.kind.threatens(track) {
                let rect = obstacle_hitbox(obstacle, track, tuning);
                surface.fill_rect(rect, colors::OBSTACLE);
                surface.stroke_rect(rect, colors::OBSTACLE_OUTLINE, 2.0);
            }
        }
    }

    draw_hud(surface, state, tuning);

    match state.phase {
        GamePhase::Menu => draw_menu(surface, tuning),
        GamePhase::GameOver => draw_game_over(surface, state, tuning),
        GamePhase::Playing => {}
    }
}

fn draw_qubit(
    surface: &mut impl Surface,
    qubit: &Qubit,
    label: &str,
    color: Color,
    tuning: &Tuning,
    time_ms: f64,
) {
    let rect = qubit_sprite(qubit, tuning);
    surface.fill_rect(rect, color);
    surface.stroke_rect(rect, colors::QUBIT_OUTLINE, 2.0);

    let center = rect.center();
    surface.text(
        label,
        Vec2::new(center.x, center.y + 4.0),
        TextStyle::new(12.0, colors::QUBIT_LABEL, Align::Center, true),
    );

    let glow = 5.0 + (time_ms / 200.0).sin() as f32 * 2.0;
    surface.stroke_rect(rect.inflate(glow), color, 1.0);
}

/// Drawn box of a qubit. A ducking qubit is shown crouched on its track,
/// below the (top-anchored) hitbox it collides with.
pub fn qubit_sprite(qubit: &Qubit, tuning: &Tuning) -> Rect {
    let hitbox = qubit_hitbox(qubit, tuning);
    if qubit.is_ducking() {
        Rect {
            min: Vec2::new(hitbox.min.x, qubit.y + tuning.qubit_size - hitbox.size.y),
            ..hitbox
        }
    } else {
        hitbox
    }
}

fn draw_hud(surface: &mut impl Surface, state: &GameState, tuning: &Tuning) {
    let hud = TextStyle::new(20.0, colors::TEXT, Align::Left, true);
    surface.text(&format!("SCORE: {}", state.score), Vec2::new(20.0, 40.0), hud);
    surface.text(&format!("HIGH: {}", state.high_score), Vec2::new(20.0, 65.0), hud);
    surface.text(
        "QUANTUM ENTANGLEMENT",
        Vec2::new(tuning.canvas_width - 20.0, 40.0),
        TextStyle::new(14.0, colors::MUTED, Align::Right, false),
    );
}

fn draw_overlay(surface: &mut impl Surface, tuning: &Tuning) {
    surface.fill_rect(
        Rect::new(0.0, 0.0, tuning.canvas_width, tuning.canvas_height),
        colors::OVERLAY,
    );
}

fn draw_menu(surface: &mut impl Surface, tuning: &Tuning) {
    draw_overlay(surface, tuning);
    let cx = tuning.canvas_width / 2.0;
    let cy = tuning.canvas_height / 2.0;

    let lines: [(&str, f32, TextStyle); 6] = [
        ("ENTANGLED DASH", -80.0, TextStyle::new(48.0, colors::QUBIT_A, Align::Center, true)),
        (
            "Two qubits. One action. Infinite correlation.",
            -40.0,
            TextStyle::new(16.0, colors::QUBIT_B, Align::Center, false),
        ),
        ("Press SPACE to begin", 20.0, TextStyle::new(24.0, colors::TEXT, Align::Center, true)),
        (
            "SPACE = Qubit A jumps, Qubit B ducks (entangled!)",
            70.0,
            TextStyle::new(14.0, colors::MUTED, Align::Center, false),
        ),
        (
            "Avoid obstacles on BOTH tracks to survive",
            95.0,
            TextStyle::new(14.0, colors::MUTED, Align::Center, false),
        ),
        (
            "\"Spooky action at a distance\" - Einstein",
            140.0,
            TextStyle::new(12.0, colors::DIM, Align::Center, false),
        ),
    ];
    for (text, dy, style) in lines {
        surface.text(text, Vec2::new(cx, cy + dy), style);
    }
}

fn draw_game_over(surface: &mut impl Surface, state: &GameState, tuning: &Tuning) {
    draw_overlay(surface, tuning);
    let cx = tuning.canvas_width / 2.0;
    let cy = tuning.canvas_height / 2.0;

    surface.text(
        "DECOHERENCE",
        Vec2::new(cx, cy - 60.0),
        TextStyle::new(48.0, colors::DANGER, Align::Center, true),
    );
    surface.text(
        "The quantum state has collapsed",
        Vec2::new(cx, cy - 20.0),
        TextStyle::new(16.0, colors::SUBTLE, Align::Center, false),
    );
    surface.text(
        &format!("SCORE: {}", state.score),
        Vec2::new(cx, cy + 30.0),
        TextStyle::new(28.0, colors::TEXT, Align::Center, true),
    );
    if state.is_new_high_score() {
        surface.text(
            "NEW HIGH SCORE!",
            Vec2::new(cx, cy + 60.0),
            TextStyle::new(20.0, colors::QUBIT_A, Align::Center, true),
        );
    }
    surface.text(
        "Press SPACE to restart",
        Vec2::new(cx, cy + 100.0),
        TextStyle::new(20.0, colors::TEXT, Align::Center, true),
    );
}
