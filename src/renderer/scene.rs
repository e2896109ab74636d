//! Per-frame render snapshot
//!
//! [`build_scene`] turns the game state into colored triangle geometry and
//! text items. A presentation backend consumes the snapshot however it
//! likes; nothing here feeds back into the simulation.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors, particle_color};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::state::{BallBody, BallState, GameState, TRAIL_LENGTH};
use crate::sim::{Gate, Rect};

/// A text string to draw at a position
#[derive(Debug, Clone)]
pub struct TextItem {
    pub pos: Vec2,
    pub text: String,
    pub size: f32,
    pub color: [f32; 4],
}

/// One frame's draw data
#[derive(Debug, Default)]
pub struct Scene {
    pub vertices: Vec<Vertex>,
    pub texts: Vec<TextItem>,
}

impl Scene {
    fn push(&mut self, verts: Vec<Vertex>) {
        self.vertices.extend(verts);
    }

    fn text(&mut self, pos: Vec2, text: impl Into<String>, size: f32, color: [f32; 4]) {
        self.texts.push(TextItem {
            pos,
            text: text.into(),
            size,
            color,
        });
    }
}

fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// Build the draw snapshot for the current frame
pub fn build_scene(state: &GameState, settings: &Settings) -> Scene {
    let mut scene = Scene::default();

    scene.push(shapes::quad(
        &Rect::new(0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT),
        colors::BACKGROUND,
    ));

    // Trails for the visible trajectory only
    if settings.trails {
        let keep = ((TRAIL_LENGTH as f32) * settings.quality.trail_quality()).ceil() as usize;
        match state.ball_state {
            BallState::Superposition => {
                push_trail(&mut scene, &state.ball0, keep);
                if state.ball1_visible {
                    push_trail(&mut scene, &state.ball1, keep);
                }
            }
            _ => push_trail(&mut scene, state.active_ball(), keep),
        }
    }

    push_paddle(&mut scene, &state.player.rect, colors::PLAYER_PADDLE);
    push_paddle(&mut scene, &state.opponent.rect, colors::OPPONENT_PADDLE);

    // Balls
    match state.ball_state {
        BallState::Superposition => {
            push_quantum_ball(&mut scene, &state.ball0, false);
            if state.ball1_visible {
                push_quantum_ball(&mut scene, &state.ball1, true);
            }
        }
        BallState::Zero => push_classical_ball(&mut scene, state.active_ball(), "0", colors::BALL_ZERO),
        BallState::One => push_classical_ball(&mut scene, state.active_ball(), "1", colors::BALL_ONE),
    }

    // Tokens
    for token in &state.powerups {
        push_token(&mut scene, token.rect(), token.gate);
    }

    // Particles, newest first up to the configured cap
    let cap = settings.max_particles();
    for p in state.particles.iter().rev().take(cap) {
        let alpha = p.life as f32 / p.max_life.max(1) as f32;
        let color = with_alpha(particle_color(p.color), alpha);
        scene.push(shapes::circle(p.pos, p.size, color, 6));
    }

    // Collapse flash overlay
    if settings.effective_flash() && state.flash > 0.0 {
        scene.push(shapes::quad(
            &Rect::new(0.0, 0.0, ARENA_WIDTH, ARENA_HEIGHT),
            with_alpha(colors::FLASH, state.flash / 255.0),
        ));
    }

    push_hud(&mut scene, state);

    scene
}

fn push_trail(scene: &mut Scene, ball: &BallBody, keep: usize) {
    let points = &ball.trail.points;
    let count = keep.min(points.len());
    scene.push(shapes::ball_trail(&points[..count], BALL_RADIUS));
}

fn push_paddle(scene: &mut Scene, rect: &Rect, color: [f32; 4]) {
    // Glow halo, body, then the energy core
    scene.push(shapes::quad(&rect.inflate(6.0, 6.0), with_alpha(color, 0.2)));
    scene.push(shapes::quad(rect, color));
    let core = Rect::from_center(rect.center(), Vec2::new(4.0, 20.0));
    scene.push(shapes::quad(&core, colors::PADDLE_CORE));
}

fn push_quantum_ball(scene: &mut Scene, ball: &BallBody, is_ball1: bool) {
    let center = ball.center();
    let (outer, inner) = if is_ball1 {
        (colors::SUPERPOSITION_B, colors::SUPERPOSITION_A)
    } else {
        (colors::SUPERPOSITION_A, colors::SUPERPOSITION_B)
    };

    // Soft glow layers
    for i in 0..2u32 {
        let alpha = (80.0 - i as f32 * 30.0) / 255.0;
        let radius = BALL_RADIUS + i as f32 * 4.0;
        scene.push(shapes::circle(center, radius, with_alpha(outer, alpha), 16));
    }

    scene.push(shapes::circle(center, BALL_RADIUS, outer, 16));
    scene.push(shapes::circle(center, BALL_RADIUS - 3.0, inner, 16));
}

fn push_classical_ball(scene: &mut Scene, ball: &BallBody, label: &str, color: [f32; 4]) {
    let center = ball.center();
    scene.push(shapes::circle(center, BALL_RADIUS, color, 16));
    scene.push(shapes::circle(center, BALL_RADIUS - 3.0, colors::BALL_CORE, 16));
    scene.text(center + Vec2::new(-5.0, -8.0), label, 16.0, colors::HUD_TEXT);
}

fn push_token(scene: &mut Scene, rect: Rect, gate: Gate) {
    let tint = match gate {
        Gate::X => colors::TOKEN_X,
        Gate::Z => colors::TOKEN_Z,
        Gate::H => colors::TOKEN_H,
    };
    scene.push(shapes::quad(&rect, tint));
    scene.push(shapes::quad(&rect.inflate(-6.0, -6.0), with_alpha(tint, 0.4)));
    scene.text(
        rect.center() + Vec2::new(-6.0, -10.0),
        gate.label(),
        24.0,
        [0.0, 0.0, 0.0, 1.0],
    );
}

fn push_hud(scene: &mut Scene, state: &GameState) {
    scene.text(
        Vec2::new(ARENA_WIDTH / 2.0 - 100.0, 10.0),
        format!(
            "Player: {}  Opponent: {}",
            state.score.player, state.score.opponent
        ),
        24.0,
        colors::HUD_TEXT,
    );
    scene.text(
        Vec2::new(ARENA_WIDTH - 145.0, 10.0),
        format!("State: {}", state.ball_state.label()),
        24.0,
        colors::HUD_ACCENT,
    );
    scene.text(
        Vec2::new(10.0, ARENA_HEIGHT - 25.0),
        "Controls: Up/Down Move | X Z H Gates",
        16.0,
        colors::HUD_DIM,
    );

    if !state.messages.status.is_empty() {
        scene.text(
            Vec2::new(ARENA_WIDTH / 2.0, 45.0),
            state.messages.status.clone(),
            24.0,
            colors::HUD_TEXT,
        );
    }
    if !state.messages.gate_notice.is_empty() && state.frame < state.messages.gate_notice_expires {
        scene.text(
            Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT - 45.0),
            state.messages.gate_notice.clone(),
            24.0,
            colors::HUD_ACCENT,
        );
    }
}
