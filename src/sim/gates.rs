//! Gate operations and collapse transitions
//!
//! X, Z, and H applied from manual input or power-up pickup, plus the
//! measurement transitions out of superposition. A gate that is not valid
//! in the current state is a silent no-op; that rule is load-bearing game
//! logic.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::clamp_to_arena;
use super::state::{BallState, GameEvent, GameState, MeasurementCause, palette};
use crate::consts::*;

/// The three gate operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gate {
    X,
    Z,
    H,
}

impl Gate {
    pub fn label(&self) -> &'static str {
        match self {
            Gate::X => "X",
            Gate::Z => "Z",
            Gate::H => "H",
        }
    }
}

/// Where a gate application came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateSource {
    Manual,
    PowerUp,
}

impl GateSource {
    fn describe(&self) -> &'static str {
        match self {
            GateSource::Manual => "manually applied",
            GateSource::PowerUp => "applied (Power-Up)",
        }
    }
}

/// Apply a gate. Returns whether it had an effect; contextually invalid
/// gates (X outside classical states, Z outside superposition) return false
/// and leave the state untouched.
pub fn apply_gate(state: &mut GameState, gate: Gate, source: GateSource) -> bool {
    let applied = match gate {
        Gate::X => apply_x(state),
        Gate::Z => apply_z(state),
        Gate::H => {
            apply_hadamard(state);
            true
        }
    };
    if applied {
        state.messages.gate_notice = format!("{}-gate {}", gate.label(), source.describe());
        state.messages.gate_notice_expires = state.frame + UI_MESSAGE_FRAMES;
        state.events.push(GameEvent::GateApplied { gate, source });
        log::debug!("{} gate applied ({:?})", gate.label(), source);
    }
    applied
}

/// Zero <-> One swap: the position carries over to the other body, the
/// horizontal velocity flips, and a jerk window starts
fn apply_x(state: &mut GameState) -> bool {
    match state.ball_state {
        BallState::Zero => {
            state.ball1.pos = state.ball0.pos;
            state.ball1.vel = Vec2::new(-state.ball0.vel.x, state.ball0.vel.y);
            state.ball_state = BallState::One;
        }
        BallState::One => {
            state.ball0.pos = state.ball1.pos;
            state.ball0.vel = Vec2::new(-state.ball1.vel.x, state.ball1.vel.y);
            state.ball_state = BallState::Zero;
        }
        BallState::Superposition => return false,
    }
    state.ball0.trail.clear();
    state.ball1.trail.clear();
    state.clock.jerk_timer = JERK_FRAMES;
    let center = state.active_ball().center();
    state.spawn_burst(center, palette::RED, 15);
    true
}

/// Phase flip: negates ball0's vertical velocity only. ball1's velocity is
/// only ever assigned by the H split.
fn apply_z(state: &mut GameState) -> bool {
    if state.ball_state != BallState::Superposition {
        return false;
    }
    state.ball0.vel.y = -state.ball0.vel.y;
    let center = state.ball0.center();
    state.spawn_burst(center, palette::CYAN, 12);
    true
}

/// Split into superposition. Always applicable; from superposition it
/// re-splits from ball0's current position.
fn apply_hadamard(state: &mut GameState) {
    let (origin, vel) = match state.ball_state {
        BallState::One => (state.ball1.pos, state.ball1.vel),
        _ => (state.ball0.pos, state.ball0.vel),
    };

    state.ball_state = BallState::Superposition;
    state.ball0.pos = origin;
    state.ball0.vel = vel;

    // Offset sign biases ball1 toward the board center, away from the
    // nearest edge; the result is clamped on-screen
    let dx = if origin.x < ARENA_WIDTH / 2.0 {
        SPLIT_OFFSET_X
    } else {
        -SPLIT_OFFSET_X
    };
    let dy = if origin.y < ARENA_HEIGHT / 2.0 {
        SPLIT_OFFSET_Y
    } else {
        -SPLIT_OFFSET_Y
    };
    let size = Vec2::splat(BALL_RADIUS * 2.0);
    state.ball1.pos = clamp_to_arena(
        origin + Vec2::new(dx, dy),
        size,
        ARENA_WIDTH,
        ARENA_HEIGHT,
    );
    state.ball1.vel = Vec2::new(vel.x, -vel.y);

    state.ball1_visible = false;
    state.clock.delay_counter = 0;
    state.clock.measurement_timer = 0;

    state.ball0.trail.clear();
    state.ball1.trail.clear();

    let burst_at = origin + Vec2::splat(BALL_RADIUS);
    state.spawn_burst(burst_at, palette::GREEN, 20);
}

/// Collapse out of superposition into a definite state
pub fn collapse(state: &mut GameState, outcome: BallState, cause: MeasurementCause) {
    debug_assert!(outcome.is_classical());
    if outcome == BallState::One {
        // The position carries over, and ball0 mirrors it so a later split
        // or swap reads the same point regardless of which body it starts
        // from
        state.ball0.pos = state.ball1.pos;
        state.ball0.trail.clear();
        let center = state.ball1.center();
        state.spawn_burst(center, palette::RED, 25);
    } else {
        state.ball1.trail.clear();
        let center = state.ball0.center();
        let (color, count) = match cause {
            MeasurementCause::PaddleContact => (palette::BLUE, 25),
            MeasurementCause::Timeout => (palette::PURPLE, 20),
        };
        state.spawn_burst(center, color, count);
    }
    state.ball_state = outcome;
    state.ball1_visible = false;
    state.clock.measurement_timer = 0;
    state.clock.jerk_timer = JERK_FRAMES;
    state.flash = 255.0;
    state.messages.status = match cause {
        MeasurementCause::PaddleContact => format!("Measured: collapsed to {}", outcome.label()),
        MeasurementCause::Timeout => format!("Auto-measured: collapsed to {}", outcome.label()),
    };
    state.events.push(GameEvent::Collapsed { outcome, cause });
    log::debug!("collapse to {} via {:?}", outcome.label(), cause);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classical_state(ball_state: BallState) -> GameState {
        let mut state = GameState::new(12345);
        collapse(&mut state, ball_state, MeasurementCause::Timeout);
        state.clock.jerk_timer = 0;
        state.flash = 0.0;
        state
    }

    #[test]
    fn test_x_toggles_state_and_negates_horizontal_velocity() {
        let mut state = classical_state(BallState::Zero);
        let pos = state.ball0.pos;
        let vel = state.ball0.vel;

        assert!(apply_gate(&mut state, Gate::X, GateSource::Manual));
        assert_eq!(state.ball_state, BallState::One);
        assert_eq!(state.ball1.pos, pos);
        assert_eq!(state.ball1.vel, Vec2::new(-vel.x, vel.y));
        assert_eq!(state.clock.jerk_timer, JERK_FRAMES);

        assert!(apply_gate(&mut state, Gate::X, GateSource::PowerUp));
        assert_eq!(state.ball_state, BallState::Zero);
        assert_eq!(state.ball0.vel, vel);
    }

    #[test]
    fn test_x_is_noop_in_superposition() {
        let mut state = GameState::new(9);
        let ball0 = (state.ball0.pos, state.ball0.vel);
        let ball1 = (state.ball1.pos, state.ball1.vel);

        assert!(!apply_gate(&mut state, Gate::X, GateSource::Manual));
        assert_eq!(state.ball_state, BallState::Superposition);
        assert_eq!((state.ball0.pos, state.ball0.vel), ball0);
        assert_eq!((state.ball1.pos, state.ball1.vel), ball1);
        assert!(state.events.is_empty());
        assert_eq!(state.clock.jerk_timer, 0);
    }

    #[test]
    fn test_z_negates_ball0_vertical_velocity_only() {
        let mut state = GameState::new(9);
        let vy0 = state.ball0.vel.y;
        let vy1 = state.ball1.vel.y;

        assert!(apply_gate(&mut state, Gate::Z, GateSource::PowerUp));
        assert_eq!(state.ball0.vel.y, -vy0);
        // ball1's velocity is untouched by Z, from either source
        assert_eq!(state.ball1.vel.y, vy1);
    }

    #[test]
    fn test_z_is_noop_in_classical_states() {
        let mut state = classical_state(BallState::Zero);
        let vel = state.ball0.vel;
        assert!(!apply_gate(&mut state, Gate::Z, GateSource::Manual));
        assert_eq!(state.ball0.vel, vel);
    }

    #[test]
    fn test_h_enters_superposition_with_hidden_ball1() {
        for source in [GateSource::Manual, GateSource::PowerUp] {
            let mut state = classical_state(BallState::Zero);
            state.clock.delay_counter = 50;
            assert!(apply_gate(&mut state, Gate::H, source));
            assert_eq!(state.ball_state, BallState::Superposition);
            assert!(!state.ball1_visible);
            assert_eq!(state.clock.delay_counter, 0);
            assert_eq!(state.clock.measurement_timer, 0);
            assert!(state.ball0.trail.is_empty());
            assert!(state.ball1.trail.is_empty());
        }
    }

    #[test]
    fn test_h_split_biases_toward_board_center() {
        let mut state = classical_state(BallState::Zero);
        // Top-left quadrant: both offsets point inward
        state.ball0.pos = Vec2::new(100.0, 100.0);
        apply_gate(&mut state, Gate::H, GateSource::Manual);
        assert_eq!(state.ball1.pos, Vec2::new(140.0, 130.0));
        assert_eq!(state.ball1.vel.y, -state.ball0.vel.y);

        // Bottom-right quadrant: both offsets flip sign
        let mut state = classical_state(BallState::Zero);
        state.ball0.pos = Vec2::new(700.0, 400.0);
        apply_gate(&mut state, Gate::H, GateSource::Manual);
        assert_eq!(state.ball1.pos, Vec2::new(660.0, 370.0));
    }

    #[test]
    fn test_h_splits_from_ball1_when_in_one() {
        let mut state = classical_state(BallState::One);
        state.ball1.pos = Vec2::new(600.0, 100.0);
        state.ball1.vel = Vec2::new(-7.0, 3.0);
        apply_gate(&mut state, Gate::H, GateSource::Manual);
        assert_eq!(state.ball0.pos, Vec2::new(600.0, 100.0));
        assert_eq!(state.ball0.vel, Vec2::new(-7.0, 3.0));
        assert_eq!(state.ball1.pos, Vec2::new(560.0, 130.0));
    }

    #[test]
    fn test_h_is_reentrant_in_superposition() {
        let mut state = GameState::new(5);
        state.ball0.pos = Vec2::new(200.0, 100.0);
        assert!(apply_gate(&mut state, Gate::H, GateSource::Manual));
        assert_eq!(state.ball_state, BallState::Superposition);
        assert_eq!(state.ball1.pos, Vec2::new(240.0, 130.0));
        assert!(!state.ball1_visible);
    }

    #[test]
    fn test_h_split_position_is_clamped_on_screen() {
        let mut state = classical_state(BallState::Zero);
        state.ball0.pos = Vec2::new(790.0, 470.0);
        apply_gate(&mut state, Gate::H, GateSource::Manual);
        let r = state.ball1.rect();
        assert!(r.left() >= 0.0 && r.right() <= ARENA_WIDTH);
        assert!(r.top() >= 0.0 && r.bottom() <= ARENA_HEIGHT);
    }

    #[test]
    fn test_collapse_to_one_mirrors_position_into_ball0() {
        let mut state = GameState::new(3);
        state.ball1_visible = true;
        state.ball1.pos = Vec2::new(555.0, 222.0);
        state.ball0.record_trail();
        state.ball1.record_trail();

        collapse(&mut state, BallState::One, MeasurementCause::PaddleContact);

        assert_eq!(state.ball_state, BallState::One);
        assert_eq!(state.ball0.pos, Vec2::new(555.0, 222.0));
        assert!(state.ball0.trail.is_empty());
        // ball1 keeps its trail: it still represents the visible trajectory
        assert!(!state.ball1.trail.is_empty());
        assert!(!state.ball1_visible);
        assert_eq!(state.flash, 255.0);
        assert_eq!(state.clock.jerk_timer, JERK_FRAMES);
    }

    #[test]
    fn test_collapse_to_zero_clears_ball1_trail() {
        let mut state = GameState::new(3);
        state.ball1_visible = true;
        state.ball0.record_trail();
        state.ball1.record_trail();

        collapse(&mut state, BallState::Zero, MeasurementCause::PaddleContact);

        assert_eq!(state.ball_state, BallState::Zero);
        assert!(state.ball1.trail.is_empty());
        assert!(!state.ball0.trail.is_empty());
        assert_eq!(state.clock.measurement_timer, 0);
    }
}
