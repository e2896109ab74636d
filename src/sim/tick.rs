//! Per-frame simulation advance
//!
//! One call to [`tick`] is one 60 Hz frame. The in-frame order is fixed:
//! input and manual gates, opponent AI, power-up spawning, ball physics
//! with pickup and paddle collisions, measurement checks, scoring. A gate
//! applied this frame affects this frame's physics, and a collapse is
//! visible before the frame is drawn.

use glam::Vec2;
use rand::Rng;

use super::gates::{self, Gate, GateSource};
use super::powerup;
use super::state::{
    BallState, GameEvent, GameState, MeasurementCause, RoundPhase, Side, palette,
};
use crate::consts::*;

/// Input snapshot for a single frame (currently-held keys)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Move the player paddle up
    pub up: bool,
    /// Move the player paddle down
    pub down: bool,
    /// Apply an X gate
    pub gate_x: bool,
    /// Apply a Z gate
    pub gate_z: bool,
    /// Apply an H gate
    pub gate_h: bool,
    /// Demo mode: the player paddle tracks the active ball by itself
    pub idle_mode: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.frame += 1;

    // Flash decays every frame, including during the score pause
    state.flash = (state.flash - FLASH_DECAY).max(0.0);

    if let RoundPhase::ScorePause { frames_left } = state.phase {
        // Non-interactive: input is not applied until the next serve
        age_particles(state);
        if frames_left <= 1 {
            state.reset_round();
        } else {
            state.phase = RoundPhase::ScorePause {
                frames_left: frames_left - 1,
            };
        }
        return;
    }

    // Input handling and manual gates
    let mut input = *input;
    if input.idle_mode {
        synthesize_idle_input(state, &mut input);
    }
    if input.up {
        state.player.shift(-PLAYER_PADDLE_SPEED);
    }
    if input.down {
        state.player.shift(PLAYER_PADDLE_SPEED);
    }
    if input.gate_x {
        gates::apply_gate(state, Gate::X, GateSource::Manual);
    }
    if input.gate_z {
        gates::apply_gate(state, Gate::Z, GateSource::Manual);
    }
    if input.gate_h {
        gates::apply_gate(state, Gate::H, GateSource::Manual);
    }

    // Opponent AI tracks the active ball's vertical center at fixed speed
    let target_y = state.active_ball().center().y;
    let opponent_y = state.opponent.rect.center().y;
    if opponent_y < target_y {
        state.opponent.shift(AI_PADDLE_SPEED);
    } else if opponent_y > target_y {
        state.opponent.shift(-AI_PADDLE_SPEED);
    }

    // Power-up spawning and falling
    powerup::update(state);

    // Ball physics, pickups, paddle collisions, measurement, scoring
    match state.ball_state {
        BallState::Superposition => update_superposition(state),
        _ => update_classical(state),
    }

    age_particles(state);
}

fn update_superposition(state: &mut GameState) {
    let player_rect = state.player.rect;
    let opponent_rect = state.opponent.rect;

    // ball0 integrates unconditionally
    state.ball0.pos += state.ball0.vel;
    state.ball0.record_trail();

    let rect0 = state.ball0.rect();
    if rect0.top() <= 0.0 || rect0.bottom() >= ARENA_HEIGHT {
        state.ball0.vel.y = -state.ball0.vel.y;
        let center = state.ball0.center();
        state.spawn_burst(center, palette::CYAN, 8);
    }
    let rect0 = state.ball0.rect();
    if rect0.overlaps(&player_rect) || rect0.overlaps(&opponent_rect) {
        state.ball0.vel.x = -state.ball0.vel.x;
        let center = state.ball0.center();
        state.spawn_burst(center, palette::WHITE, 12);
    }

    // ball1 is simulated only once visible; until then the delay counter
    // runs down the visibility window
    if state.ball1_visible {
        state.ball1.pos += state.ball1.vel;
        state.ball1.record_trail();

        let rect1 = state.ball1.rect();
        if rect1.top() <= 0.0 || rect1.bottom() >= ARENA_HEIGHT {
            state.ball1.vel.y = -state.ball1.vel.y;
            let center = state.ball1.center();
            state.spawn_burst(center, palette::CYAN, 8);
        }
        let rect1 = state.ball1.rect();
        if rect1.overlaps(&player_rect) || rect1.overlaps(&opponent_rect) {
            state.ball1.vel.x = -state.ball1.vel.x;
            let center = state.ball1.center();
            state.spawn_burst(center, palette::WHITE, 12);
        }
    } else {
        state.clock.delay_counter += 1;
        if state.clock.delay_counter > SPLIT_DELAY_FRAMES {
            state.ball1_visible = true;
        }
    }

    // Pickups, each live ball independently
    let rect0 = state.ball0.rect();
    powerup::check_collision(state, rect0);
    if state.ball1_visible {
        let rect1 = state.ball1.rect();
        powerup::check_collision(state, rect1);
    }

    // Measurement: paddle contact collapses; past the timeout the outcome
    // is a fair coin flip
    state.clock.measurement_timer += 1;

    let rect0 = state.ball0.rect();
    let rect1 = state.ball1.rect();
    if rect0.overlaps(&player_rect) || rect0.overlaps(&opponent_rect) {
        gates::collapse(state, BallState::Zero, MeasurementCause::PaddleContact);
    } else if state.ball1_visible
        && (rect1.overlaps(&player_rect) || rect1.overlaps(&opponent_rect))
    {
        gates::collapse(state, BallState::One, MeasurementCause::PaddleContact);
    } else if state.clock.measurement_timer > MEASUREMENT_TIMEOUT_FRAMES {
        let outcome = if state.rng.random_bool(0.5) {
            BallState::Zero
        } else {
            BallState::One
        };
        gates::collapse(state, outcome, MeasurementCause::Timeout);
    }
}

fn update_classical(state: &mut GameState) {
    // Integrate the live body and record its trail
    {
        let ball = state.active_ball_mut();
        ball.pos += ball.vel;
        ball.record_trail();
    }

    // Pickups come before bounces in classical mode
    let rect = state.active_ball().rect();
    powerup::check_collision(state, rect);
    if state.ball_state == BallState::Superposition {
        // An H pickup re-split the ball; the classical frame ends here
        return;
    }

    let player_rect = state.player.rect;
    let opponent_rect = state.opponent.rect;

    // Wall and paddle bounces
    let rect = state.active_ball().rect();
    if rect.top() <= 0.0 || rect.bottom() >= ARENA_HEIGHT {
        let ball = state.active_ball_mut();
        ball.vel.y = -ball.vel.y;
        let center = ball.center();
        state.spawn_burst(center, palette::WHITE, 8);
    }
    let rect = state.active_ball().rect();
    if rect.overlaps(&player_rect) || rect.overlaps(&opponent_rect) {
        let ball = state.active_ball_mut();
        ball.vel.x = -ball.vel.x;
        let center = ball.center();
        state.spawn_burst(center, palette::YELLOW, 12);
    }

    // Speed re-derivation: a jerk window forces JERK_SPEED, otherwise the
    // clamped base speed; atan2 keeps the direction while the magnitude
    // changes
    let target_speed = if state.clock.jerk_timer > 0 {
        state.clock.jerk_timer -= 1;
        JERK_SPEED
    } else {
        state.ball_speed.clamp(BASE_SPEED, MAX_SPEED)
    };
    {
        let ball = state.active_ball_mut();
        ball.vel = renormalize(ball.vel, target_speed);
    }

    // Z-noise roll
    state.clock.z_noise_timer += 1;
    if state.clock.z_noise_timer > Z_NOISE_INTERVAL_FRAMES {
        if state.rng.random_bool(Z_NOISE_CHANCE) {
            let ball = state.active_ball_mut();
            ball.vel.y = -ball.vel.y;
            let center = ball.center();
            state.messages.status = "Z-noise: vertical flip!".to_string();
            state.spawn_burst(center, palette::PURPLE, 15);
            state.events.push(GameEvent::ZNoiseFlip);
            log::debug!("z-noise flip");
        }
        state.clock.z_noise_timer = 0;
    }

    // Scoring at the left/right boundaries
    let rect = state.active_ball().rect();
    if rect.right() >= ARENA_WIDTH {
        award_point(state, Side::Player);
    } else if rect.left() <= 0.0 {
        award_point(state, Side::Opponent);
    }
}

fn award_point(state: &mut GameState, side: Side) {
    let ball_y = state.active_ball().center().y;
    match side {
        Side::Player => {
            state.score.player += 1;
            state.messages.status = "You scored!".to_string();
            state.spawn_burst(Vec2::new(ARENA_WIDTH - 50.0, ball_y), palette::GREEN, 30);
        }
        Side::Opponent => {
            state.score.opponent += 1;
            state.messages.status = "You missed!".to_string();
            state.spawn_burst(Vec2::new(50.0, ball_y), palette::RED, 30);
        }
    }
    state.events.push(GameEvent::Scored { side });
    log::info!(
        "point for {:?}: player {} / opponent {}",
        side,
        state.score.player,
        state.score.opponent
    );
    state.phase = RoundPhase::ScorePause {
        frames_left: SCORE_PAUSE_FRAMES,
    };
}

/// Demo input: the player paddle tracks the active ball the same way the
/// opponent does, with a small dead zone against jitter
fn synthesize_idle_input(state: &GameState, input: &mut TickInput) {
    let target_y = state.active_ball().center().y;
    let player_y = state.player.rect.center().y;
    input.up = player_y > target_y + PLAYER_PADDLE_SPEED;
    input.down = player_y < target_y - PLAYER_PADDLE_SPEED;
}

/// Rescale a velocity to the target speed, preserving its direction
fn renormalize(vel: Vec2, speed: f32) -> Vec2 {
    let angle = vel.y.atan2(vel.x);
    Vec2::new(speed * angle.cos(), speed * angle.sin())
}

fn age_particles(state: &mut GameState) {
    for p in state.particles.iter_mut() {
        p.pos += p.vel;
        p.vel *= 0.98;
        p.life = p.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);
}


#[cfg(test)]
mod props {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn renormalize_preserves_direction(
            dx in -20.0f32..20.0,
            dy in -20.0f32..20.0,
            speed in 1.0f32..20.0,
        ) {
            prop_assume!(dx.abs() > 0.1 || dy.abs() > 0.1);
            let out = renormalize(Vec2::new(dx, dy), speed);
            prop_assert!((out.length() - speed).abs() < 1e-3);
            let before = dy.atan2(dx);
            let after = out.y.atan2(out.x);
            prop_assert!((before - after).abs() < 1e-3);
        }
    }
}
