//! Quantum Pong entry point
//!
//! No windowing backend is wired natively, so the binary paces the
//! simulation at 60 Hz in idle (self-playing) mode and reports gameplay
//! events through the log. Usage: `quantum-pong [seed] [frames]`.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use quantum_pong::consts::*;
use quantum_pong::renderer::build_scene;
use quantum_pong::settings::Settings;
use quantum_pong::sim::{GameEvent, GameState, TickInput, tick};

fn main() {
    env_logger::init();

    let seed: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    let frames: u64 = std::env::args()
        .nth(2)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1800);

    let settings = Settings::load();
    log::info!(
        "Quantum Pong starting: seed {seed}, {frames} demo frames, quality {}",
        settings.quality.as_str()
    );

    let mut state = GameState::new(seed);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let frame_time = Duration::from_secs(1) / FRAME_RATE;
    for _ in 0..frames {
        let start = Instant::now();

        tick(&mut state, &input);

        for event in state.drain_events() {
            match event {
                GameEvent::Scored { side } => log::info!(
                    "{:?} scored ({} - {})",
                    side,
                    state.score.player,
                    state.score.opponent
                ),
                GameEvent::Collapsed { outcome, cause } => {
                    log::info!("collapsed to {} via {:?}", outcome.label(), cause)
                }
                other => log::debug!("{other:?}"),
            }
        }

        let scene = build_scene(&state, &settings);
        log::trace!(
            "frame {}: {} vertices, {} texts",
            state.frame,
            scene.vertices.len(),
            scene.texts.len()
        );

        if let Some(rest) = frame_time.checked_sub(start.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    println!(
        "Final score after {} frames: player {} / opponent {}",
        state.frame, state.score.player, state.score.opponent
    );
    settings.save();
}
