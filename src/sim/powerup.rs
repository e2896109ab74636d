//! Falling gate tokens
//!
//! One token drops every GATE_DROP_INTERVAL_FRAMES at a random horizontal
//! position, bobbing as it falls. Balls collect tokens through an inflated
//! hit-box; the carried gate applies only when it would also be valid as a
//! manual gate.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::gates::{self, Gate, GateSource};
use super::rect::Rect;
use super::state::{GameEvent, GameState, palette};
use crate::consts::*;

/// A falling gate token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUpToken {
    pub id: u32,
    pub gate: Gate,
    /// Top-left corner; x is fixed at spawn, y advances by the fall speed
    pub pos: Vec2,
    /// Bob phase, advancing 0.2 per frame; displaces the drawn and
    /// hit-tested rect vertically by sin(phase) * 3
    pub bob_phase: f32,
}

impl PowerUpToken {
    /// Rect used for drawing and hit testing (includes the bob displacement)
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x,
            self.pos.y + self.bob_phase.sin() * 3.0,
            POWERUP_SIZE,
            POWERUP_SIZE,
        )
    }

    /// Inflated pickup hit-box
    pub fn hit_box(&self) -> Rect {
        self.rect().inflate(POWERUP_HIT_INFLATE, POWERUP_HIT_INFLATE)
    }
}

/// Advance the drop timer, spawn a token when due, then move and expire
/// falling tokens
pub fn update(state: &mut GameState) {
    state.clock.powerup_timer += 1;
    if state.clock.powerup_timer > GATE_DROP_INTERVAL_FRAMES {
        spawn(state);
        state.clock.powerup_timer = 0;
    }

    for token in state.powerups.iter_mut() {
        token.pos.y += POWERUP_FALL_SPEED;
        token.bob_phase += 0.2;
    }

    // A token despawns once its top edge passes the bottom of the play area
    state.powerups.retain(|t| t.rect().top() <= ARENA_HEIGHT);
}

fn spawn(state: &mut GameState) {
    let gate = match state.rng.random_range(0..3) {
        0 => Gate::X,
        1 => Gate::Z,
        _ => Gate::H,
    };
    let center_x = state.rng.random_range(100.0..ARENA_WIDTH - 100.0);
    let id = state.next_token_id();
    state.powerups.push(PowerUpToken {
        id,
        gate,
        pos: Vec2::new(center_x - POWERUP_SIZE / 2.0, -20.0 - POWERUP_SIZE / 2.0),
        bob_phase: 0.0,
    });
    state.events.push(GameEvent::PowerUpSpawned { gate });
    log::debug!("power-up drop: {} gate", gate.label());
}

/// Test one ball body against every token. On overlap the token is
/// destroyed and a burst fires unconditionally; the gate applies only when
/// contextually valid, mirroring manual-gate validity.
pub fn check_collision(state: &mut GameState, ball_rect: Rect) {
    let hits: Vec<(u32, Gate, Vec2)> = state
        .powerups
        .iter()
        .filter(|t| ball_rect.overlaps(&t.hit_box()))
        .map(|t| (t.id, t.gate, t.rect().center()))
        .collect();

    for (id, gate, center) in hits {
        state.powerups.retain(|t| t.id != id);
        state.spawn_burst(center, palette::YELLOW, 10);
        let applied = gates::apply_gate(state, gate, GateSource::PowerUp);
        state.events.push(GameEvent::PowerUpCollected { gate, applied });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::state::BallState;
    use super::super::state::MeasurementCause;

    #[test]
    fn test_spawn_cadence_and_placement() {
        let mut state = GameState::new(77);
        for _ in 0..GATE_DROP_INTERVAL_FRAMES {
            update(&mut state);
        }
        assert!(state.powerups.is_empty());

        update(&mut state);
        assert_eq!(state.powerups.len(), 1);
        assert_eq!(state.clock.powerup_timer, 0);

        let center_x = state.powerups[0].rect().center().x;
        assert!((100.0..=ARENA_WIDTH - 100.0).contains(&center_x));
        assert!(state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::PowerUpSpawned { .. })));
    }

    #[test]
    fn test_token_falls_and_despawns_below_arena() {
        let mut state = GameState::new(77);
        let id = state.next_token_id();
        state.powerups.push(PowerUpToken {
            id,
            gate: Gate::H,
            pos: Vec2::new(300.0, ARENA_HEIGHT - 4.0),
            bob_phase: 0.0,
        });

        update(&mut state);
        assert_eq!(state.powerups.len(), 1);
        assert_eq!(state.powerups[0].pos.y, ARENA_HEIGHT - 1.0);

        // A couple more frames push the top edge past the bottom
        for _ in 0..3 {
            update(&mut state);
        }
        assert!(state.powerups.is_empty());
    }

    #[test]
    fn test_pickup_destroys_token_and_respects_validity() {
        // X token collected in superposition: destroyed, but no gate effect
        let mut state = GameState::new(77);
        let id = state.next_token_id();
        state.powerups.push(PowerUpToken {
            id,
            gate: Gate::X,
            pos: Vec2::new(390.0, 150.0),
            bob_phase: 0.0,
        });
        let ball_rect = state.ball0.rect();
        check_collision(&mut state, ball_rect);

        assert!(state.powerups.is_empty());
        assert_eq!(state.ball_state, BallState::Superposition);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::PowerUpCollected { gate: Gate::X, applied: false }
        )));
    }

    #[test]
    fn test_pickup_applies_valid_gate() {
        let mut state = GameState::new(77);
        gates::collapse(&mut state, BallState::Zero, MeasurementCause::Timeout);
        let id = state.next_token_id();
        state.powerups.push(PowerUpToken {
            id,
            gate: Gate::H,
            pos: Vec2::new(state.ball0.pos.x, state.ball0.pos.y),
            bob_phase: 0.0,
        });
        let ball_rect = state.ball0.rect();
        check_collision(&mut state, ball_rect);

        assert!(state.powerups.is_empty());
        assert_eq!(state.ball_state, BallState::Superposition);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::PowerUpCollected { gate: Gate::H, applied: true }
        )));
    }

    #[test]
    fn test_hit_box_is_inflated() {
        let token = PowerUpToken {
            id: 1,
            gate: Gate::Z,
            pos: Vec2::new(100.0, 100.0),
            bob_phase: 0.0,
        };
        let hit = token.hit_box();
        let draw = token.rect();
        assert_eq!(hit.center(), draw.center());
        assert!((hit.size.x - (POWERUP_SIZE + POWERUP_HIT_INFLATE)).abs() < 1e-6);
    }
}
