//! Quantum Pong - a two-paddle arcade game with gate power-ups
//!
//! Core modules:
//! - `sim`: Deterministic simulation (quantum ball state machine, physics, power-ups)
//! - `renderer`: CPU-side render snapshot (vertex geometry + text items)
//! - `settings`: Player preferences and quality presets

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Simulation and render rate; one tick is one frame
    pub const FRAME_RATE: u32 = 60;

    /// Play area dimensions in pixels (top-left origin, y grows downward)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 480.0;

    /// Ball radius (bodies are 2r x 2r rects)
    pub const BALL_RADIUS: f32 = 10.0;

    /// Paddle geometry
    pub const PADDLE_WIDTH: f32 = 10.0;
    pub const PADDLE_HEIGHT: f32 = 80.0;
    /// Player paddle travel per held-key frame
    pub const PLAYER_PADDLE_SPEED: f32 = 6.0;
    /// Opponent paddle tracking speed
    pub const AI_PADDLE_SPEED: f32 = 4.0;

    /// Ball speed envelope in pixels per frame (classical mode)
    pub const BASE_SPEED: f32 = 7.0;
    pub const MAX_SPEED: f32 = 12.0;
    /// Forced speed during a jerk window
    pub const JERK_SPEED: f32 = 16.0;
    /// Jerk window length after any state-changing gate or collapse
    pub const JERK_FRAMES: u32 = 20;

    /// Frames before ball1 materializes after a split
    pub const SPLIT_DELAY_FRAMES: u32 = 60;
    /// Superposition frames before forced auto-measurement
    pub const MEASUREMENT_TIMEOUT_FRAMES: u32 = 360;
    /// Classical frames between Z-noise rolls
    pub const Z_NOISE_INTERVAL_FRAMES: u32 = 240;
    /// Probability of a vertical flip on a Z-noise roll
    pub const Z_NOISE_CHANCE: f64 = 0.3;

    /// Frames between power-up token drops
    pub const GATE_DROP_INTERVAL_FRAMES: u32 = 240;
    /// Token square side
    pub const POWERUP_SIZE: f32 = 48.0;
    /// Token fall speed in pixels per frame
    pub const POWERUP_FALL_SPEED: f32 = 3.0;
    /// Hit-box growth in each dimension for pickup tests
    pub const POWERUP_HIT_INFLATE: f32 = 10.0;

    /// H-gate split offsets; sign is chosen to bias toward board center
    pub const SPLIT_OFFSET_X: f32 = 40.0;
    pub const SPLIT_OFFSET_Y: f32 = 30.0;

    /// Serve angle range in radians
    pub const LAUNCH_ANGLE_RANGE: f32 = 0.6;

    /// Non-interactive pause after a point
    pub const SCORE_PAUSE_FRAMES: u32 = 60;

    /// Transient HUD message lifetime (2 seconds)
    pub const UI_MESSAGE_FRAMES: u64 = 120;

    /// Collapse flash decay per frame (opacity is 0-255)
    pub const FLASH_DECAY: f32 = 10.0;
}
