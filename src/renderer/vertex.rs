//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::state::palette;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.08, 0.16, 1.0];
    pub const PLAYER_PADDLE: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
    pub const OPPONENT_PADDLE: [f32; 4] = [1.0, 0.08, 0.58, 1.0];
    pub const PADDLE_CORE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const SUPERPOSITION_A: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
    pub const SUPERPOSITION_B: [f32; 4] = [1.0, 0.08, 0.58, 1.0];
    pub const BALL_ZERO: [f32; 4] = [0.0, 0.4, 1.0, 1.0];
    pub const BALL_ONE: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const BALL_CORE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const TOKEN_X: [f32; 4] = [1.0, 0.39, 0.39, 1.0];
    pub const TOKEN_Z: [f32; 4] = [1.0, 1.0, 0.39, 1.0];
    pub const TOKEN_H: [f32; 4] = [0.39, 1.0, 0.39, 1.0];
    pub const FLASH: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const HUD_TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const HUD_DIM: [f32; 4] = [0.59, 0.59, 0.59, 1.0];
    pub const HUD_ACCENT: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
}

/// Map a sim particle palette code to RGBA
pub fn particle_color(code: u32) -> [f32; 4] {
    match code {
        palette::CYAN => [0.0, 1.0, 1.0, 1.0],
        palette::WHITE => [1.0, 1.0, 1.0, 1.0],
        palette::YELLOW => [1.0, 1.0, 0.0, 1.0],
        palette::BLUE => [0.0, 0.4, 1.0, 1.0],
        palette::RED => [1.0, 0.0, 0.0, 1.0],
        palette::GREEN => [0.0, 1.0, 0.0, 1.0],
        palette::PURPLE => [0.5, 0.0, 0.5, 1.0],
        _ => [1.0, 1.0, 1.0, 1.0],
    }
}
