//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick = one 60 Hz frame
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod gates;
pub mod powerup;
pub mod rect;
pub mod state;
pub mod tick;

pub use gates::{Gate, GateSource, apply_gate};
pub use powerup::PowerUpToken;
pub use rect::Rect;
pub use state::{
    BallBody, BallState, GameEvent, GameState, MeasurementCause, Paddle, RoundPhase, Score,
    Side, SimClock, Trail, TrailPoint,
};
pub use tick::{TickInput, tick};
