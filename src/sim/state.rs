//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in one owned [`GameState`];
//! update functions take it by `&mut` reference.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::gates::{Gate, GateSource};
use super::powerup::PowerUpToken;
use super::rect::Rect;
use crate::consts::*;

/// Quantum mode of the ball system. Exactly one is active at a time and it
/// fully determines which ball bodies are live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallState {
    /// Two ball bodies simulated at once, outcome undetermined
    Superposition,
    /// Classical |0>; ball0 is the live body
    Zero,
    /// Classical |1>; ball1 is the live body
    One,
}

impl BallState {
    /// True for Zero and One
    #[inline]
    pub fn is_classical(&self) -> bool {
        !matches!(self, BallState::Superposition)
    }

    /// HUD label
    pub fn label(&self) -> &'static str {
        match self {
            BallState::Superposition => "|+>",
            BallState::Zero => "|0>",
            BallState::One => "|1>",
        }
    }
}

/// Which side of the table scored or acted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Opponent,
}

/// Trail point for ball rendering
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub speed: f32,
}

/// Maximum number of trail points to store
pub const TRAIL_LENGTH: usize = 8;

/// Bounded position history for one ball (newest first)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trail {
    pub points: Vec<TrailPoint>,
}

impl Trail {
    /// Record a center position; the oldest point is evicted past the cap
    pub fn record(&mut self, pos: Vec2, speed: f32) {
        self.points.insert(0, TrailPoint { pos, speed });
        self.points.truncate(TRAIL_LENGTH);
    }

    /// Clear all trail positions (on every discrete state transition)
    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One ball body. Both bodies exist at all times; [`GameState::ball_state`]
/// decides which are live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallBody {
    /// Top-left corner of the bounding rect
    pub pos: Vec2,
    /// Velocity in pixels per frame
    pub vel: Vec2,
    /// Position history for rendering
    #[serde(skip)]
    pub trail: Trail,
}

impl BallBody {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            trail: Trail::default(),
        }
    }

    /// Bounding rect (2r x 2r)
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BALL_RADIUS * 2.0, BALL_RADIUS * 2.0)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(BALL_RADIUS)
    }

    /// Record current position to trail (call each tick while live)
    pub fn record_trail(&mut self) {
        let speed = self.vel.length();
        let center = self.center();
        self.trail.record(center, speed);
    }
}

/// A paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
}

impl Paddle {
    /// Paddle at the given x, vertically centered
    pub fn new(x: f32) -> Self {
        Self {
            rect: Rect::new(
                x,
                ARENA_HEIGHT / 2.0 - PADDLE_HEIGHT / 2.0,
                PADDLE_WIDTH,
                PADDLE_HEIGHT,
            ),
        }
    }

    /// Move vertically, clamped to the play area
    pub fn shift(&mut self, dy: f32) {
        self.rect.pos.y = (self.rect.pos.y + dy).clamp(0.0, ARENA_HEIGHT - PADDLE_HEIGHT);
    }
}

/// Independent frame counters driving the timed rules
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimClock {
    /// Frames since the last split; gates ball1 visibility
    pub delay_counter: u32,
    /// Frames spent in superposition since the last transition
    pub measurement_timer: u32,
    /// Frames since the last Z-noise roll (advances in classical mode only)
    pub z_noise_timer: u32,
    /// Remaining frames of forced JERK_SPEED
    pub jerk_timer: u32,
    /// Frames since the last power-up drop
    pub powerup_timer: u32,
}

/// Match score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player: u32,
    pub opponent: u32,
}

/// Particle palette codes, mapped to RGBA by the renderer
pub mod palette {
    pub const CYAN: u32 = 0;
    pub const WHITE: u32 = 1;
    pub const YELLOW: u32 = 2;
    pub const BLUE: u32 = 3;
    pub const RED: u32 = 4;
    pub const GREEN: u32 = 5;
    pub const PURPLE: u32 = 6;
}

/// A cosmetic particle (gameplay-inert)
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Palette code for color lookup
    pub color: u32,
    /// Remaining lifetime in frames
    pub life: u32,
    /// Initial lifetime, for alpha fade
    pub max_life: u32,
    pub size: f32,
}

/// Maximum particles; oldest are evicted first
pub const MAX_PARTICLES: usize = 256;

/// Round flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Normal play
    Playing,
    /// Non-interactive pause after a point, then round reset
    ScorePause { frames_left: u32 },
}

/// Why a collapse happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeasurementCause {
    PaddleContact,
    Timeout,
}

/// Structured gameplay events, drained once per frame by the embedding loop
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    GateApplied { gate: Gate, source: GateSource },
    Collapsed { outcome: BallState, cause: MeasurementCause },
    ZNoiseFlip,
    PowerUpSpawned { gate: Gate },
    PowerUpCollected { gate: Gate, applied: bool },
    Scored { side: Side },
    RoundReset,
}

/// HUD message lines
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Messages {
    /// Collapse / Z-noise / scoring line; persists until replaced
    pub status: String,
    /// Gate application line
    pub gate_notice: String,
    /// Frame at which the gate line expires
    pub gate_notice_expires: u64,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay RNG; advances only on gameplay draws
    pub rng: Pcg32,
    /// Simulation frame counter
    pub frame: u64,
    /// Round flow phase
    pub phase: RoundPhase,
    /// Quantum mode
    pub ball_state: BallState,
    /// Primary ball body (live in Superposition and Zero)
    pub ball0: BallBody,
    /// Secondary ball body (live in Superposition once visible, and in One)
    pub ball1: BallBody,
    /// Whether ball1 has materialized after the split delay
    pub ball1_visible: bool,
    /// Classical speed setting, clamped to [BASE_SPEED, MAX_SPEED]
    pub ball_speed: f32,
    /// Left paddle (human)
    pub player: Paddle,
    /// Right paddle (AI)
    pub opponent: Paddle,
    /// Frame counters
    pub clock: SimClock,
    /// Match score
    pub score: Score,
    /// Falling gate tokens
    pub powerups: Vec<PowerUpToken>,
    /// HUD messages
    pub messages: Messages,
    /// Collapse flash opacity (0-255, decays every frame)
    pub flash: f32,
    /// Cosmetic particles
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Events since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next token id
    next_id: u32,
}

impl GameState {
    /// Create a new game with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            frame: 0,
            phase: RoundPhase::Playing,
            ball_state: BallState::Superposition,
            ball0: BallBody::at(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 3.0),
            ball1: BallBody::at(ARENA_WIDTH / 2.0, 2.0 * ARENA_HEIGHT / 3.0),
            ball1_visible: false,
            ball_speed: BASE_SPEED,
            player: Paddle::new(20.0),
            opponent: Paddle::new(ARENA_WIDTH - 30.0),
            clock: SimClock::default(),
            score: Score::default(),
            powerups: Vec::new(),
            messages: Messages::default(),
            flash: 0.0,
            particles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };
        state.serve();
        state
    }

    /// Allocate a new token id
    pub fn next_token_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The body driving scoring, AI tracking, and classical physics.
    /// Keys off the state label: ball1 only while in One.
    pub fn active_ball(&self) -> &BallBody {
        match self.ball_state {
            BallState::One => &self.ball1,
            _ => &self.ball0,
        }
    }

    pub fn active_ball_mut(&mut self) -> &mut BallBody {
        match self.ball_state {
            BallState::One => &mut self.ball1,
            _ => &mut self.ball0,
        }
    }

    /// Randomize the serve velocity: horizontal direction is a coin flip,
    /// the vertical component comes from a shallow random angle
    pub(crate) fn serve(&mut self) {
        let angle = self.rng.random_range(-LAUNCH_ANGLE_RANGE..LAUNCH_ANGLE_RANGE);
        let dir = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.ball_speed = BASE_SPEED;
        self.ball0.vel = Vec2::new(BASE_SPEED * dir, BASE_SPEED * angle.sin());
        self.ball1.vel = Vec2::new(self.ball0.vel.x, -self.ball0.vel.y);
    }

    /// Reinitialize everything for a fresh round. Entities are never
    /// destroyed, only reset; the score survives.
    pub fn reset_round(&mut self) {
        self.ball_state = BallState::Superposition;
        self.ball0.pos = Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 3.0);
        self.ball1.pos = Vec2::new(ARENA_WIDTH / 2.0, 2.0 * ARENA_HEIGHT / 3.0);
        self.serve();
        self.ball1_visible = false;
        self.clock = SimClock::default();
        self.messages.status.clear();
        self.powerups.clear();
        self.ball0.trail.clear();
        self.ball1.trail.clear();
        self.phase = RoundPhase::Playing;
        self.events.push(GameEvent::RoundReset);
    }

    /// Take all events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Cosmetic particle burst. Spread comes from hash mixing keyed on the
    /// frame counter so bursts never consume gameplay RNG draws.
    pub fn spawn_burst(&mut self, pos: Vec2, color: u32, count: u32) {
        let seed = self.frame as u32;
        for i in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                self.particles.remove(0);
            }
            let hash = seed
                .wrapping_mul(2654435761)
                .wrapping_add(i.wrapping_mul(7919));
            let r1 = (hash % 1000) as f32 / 1000.0;
            let r2 = ((hash >> 10) % 1000) as f32 / 1000.0;
            let r3 = ((hash >> 20) % 1000) as f32 / 1000.0;
            let life = 20 + (r3 * 20.0) as u32;
            self.particles.push(Particle {
                pos,
                vel: Vec2::new((r1 - 0.5) * 6.0, (r2 - 0.5) * 6.0),
                color,
                life,
                max_life: life,
                size: 2.0 + r1 * 4.0,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_configuration() {
        let state = GameState::new(7);
        assert_eq!(state.ball_state, BallState::Superposition);
        assert!(!state.ball1_visible);
        assert_eq!(state.ball0.pos, Vec2::new(400.0, 160.0));
        assert_eq!(state.ball1.pos, Vec2::new(400.0, 320.0));
        assert_eq!(state.ball0.vel.x.abs(), BASE_SPEED);
        assert_eq!(state.ball1.vel.y, -state.ball0.vel.y);
        assert_eq!(state.score, Score::default());
    }

    #[test]
    fn test_reset_round_restores_initial_configuration() {
        let mut state = GameState::new(42);
        state.ball_state = BallState::One;
        state.ball0.pos = Vec2::new(10.0, 10.0);
        state.ball1_visible = true;
        state.clock.measurement_timer = 123;
        state.clock.jerk_timer = 5;
        state.ball0.record_trail();
        state.ball1.record_trail();
        state.powerups.push(PowerUpToken {
            id: 1,
            gate: Gate::X,
            pos: Vec2::new(100.0, 50.0),
            bob_phase: 0.0,
        });
        state.score.player = 3;

        state.reset_round();

        assert_eq!(state.ball_state, BallState::Superposition);
        assert_eq!(state.ball0.pos, Vec2::new(400.0, 160.0));
        assert_eq!(state.ball1.pos, Vec2::new(400.0, 320.0));
        assert!(!state.ball1_visible);
        assert_eq!(state.clock.measurement_timer, 0);
        assert_eq!(state.clock.jerk_timer, 0);
        assert_eq!(state.clock.powerup_timer, 0);
        assert!(state.ball0.trail.is_empty());
        assert!(state.ball1.trail.is_empty());
        assert!(state.powerups.is_empty());
        // Score survives round resets
        assert_eq!(state.score.player, 3);
        assert!(state.events.contains(&GameEvent::RoundReset));
    }

    #[test]
    fn test_trail_bounded_fifo() {
        let mut trail = Trail::default();
        for i in 0..12 {
            trail.record(Vec2::new(i as f32, 0.0), 1.0);
        }
        assert_eq!(trail.points.len(), TRAIL_LENGTH);
        // Newest first
        assert_eq!(trail.points[0].pos.x, 11.0);
        assert_eq!(trail.points[TRAIL_LENGTH - 1].pos.x, 4.0);
    }

    #[test]
    fn test_active_ball_keys_off_state_label() {
        let mut state = GameState::new(1);
        state.ball_state = BallState::Zero;
        assert_eq!(state.active_ball().pos, state.ball0.pos);
        state.ball_state = BallState::One;
        state.ball1.pos = Vec2::new(123.0, 45.0);
        assert_eq!(state.active_ball().pos, Vec2::new(123.0, 45.0));
        state.ball_state = BallState::Superposition;
        assert_eq!(state.active_ball().pos, state.ball0.pos);
    }

    #[test]
    fn test_burst_respects_particle_cap() {
        let mut state = GameState::new(1);
        for _ in 0..40 {
            state.spawn_burst(Vec2::new(100.0, 100.0), palette::CYAN, 10);
        }
        assert!(state.particles.len() <= MAX_PARTICLES);
    }
}
