//! Wave Invaders entry point
//!
//! Headless shell: drives the simulation core with a scripted autopilot
//! so the loop can be exercised without a rendering collaborator
//! attached. A real frontend samples its keyboard into the same
//! `FrameInput` snapshot and drains the same event queue after every
//! tick.

use std::env;

use wave_invaders::consts::*;
use wave_invaders::sim::{FrameInput, GameEvent, GamePhase, GameState, tick};

fn main() {
    env_logger::init();

    let mut seed: u64 = 0x5eed;
    let mut frames: u64 = 3600;
    let mut dump = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                if let Some(value) = args.next().and_then(|v| v.parse().ok()) {
                    seed = value;
                }
            }
            "--frames" => {
                if let Some(value) = args.next().and_then(|v| v.parse().ok()) {
                    frames = value;
                }
            }
            "--dump" => dump = true,
            other => log::warn!("ignoring unknown argument {other:?}"),
        }
    }

    log::info!("Wave Invaders (headless) starting, seed {seed}");
    let mut state = GameState::new(seed);

    for frame in 0..frames {
        let input = autopilot(frame, &state);
        tick(&mut state, &input);

        // Stand-in for the rendering collaborator's event handling.
        for event in state.drain_events() {
            match event {
                GameEvent::Impact { pos } => {
                    log::debug!("[{frame}] puff at ({:.0}, {:.0})", pos.x, pos.y);
                }
                GameEvent::WaveStarted { wave } => {
                    log::debug!("[{frame}] wave {wave} populated");
                }
                GameEvent::WaveCleared { wave, bonus } => {
                    log::debug!("[{frame}] wave {wave} cleared, bonus {bonus}");
                }
                GameEvent::LifeLost { remaining } => {
                    log::debug!("[{frame}] ship lost, {remaining} lives left");
                }
                GameEvent::GameOver { score } => {
                    log::info!("[{frame}] game over, final score {score}");
                }
            }
        }
    }

    println!(
        "final: wave {}, score {}, lives {}, {} frames simulated",
        state.wave, state.score, state.lives, state.frame
    );
    if dump {
        if let Ok(json) = serde_json::to_string_pretty(&state) {
            println!("{json}");
        }
    }
}

/// Scripted stand-in for a player: sweep between two columns, toggle the
/// fire key so press edges keep occurring, and mash restart once a run
/// ends.
fn autopilot(frame: u64, state: &GameState) -> FrameInput {
    if state.phase == GamePhase::GameOver {
        return FrameInput {
            restart: frame % 2 == 0,
            ..FrameInput::default()
        };
    }

    let target = if (frame / 240) % 2 == 0 {
        150.0
    } else {
        PLAY_WIDTH - 150.0
    };
    let dx = target - state.ship.pos.x;
    FrameInput {
        left: dx < -PLAYER_SPEED,
        right: dx > PLAYER_SPEED,
        fire: frame % 2 == 0,
        restart: false,
    }
}
