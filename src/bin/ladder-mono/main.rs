//! ladder-mono - plays a short legato phrase through the default output
//!
//! Run with: cargo run -- [params.json]

mod player;

use std::fs;

use color_eyre::eyre::WrapErr;
use ladder_mono::synth::{message::SynthMessage, params::SynthParams};

use player::{Player, Step};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let params = match std::env::args().nth(1) {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .wrap_err_with(|| format!("failed to read parameters from {path}"))?;
            SynthParams::from_json(&json)?
        }
        None => SynthParams {
            portamento_time: 0.08,
            filter_q: 2.5,
            ..SynthParams::default()
        },
    };

    Player::new(params).run(&phrase())
}

/// Overlapping presses so the glide and note priority are audible.
fn phrase() -> Vec<Step> {
    let on = |note| SynthMessage::NoteOn { note, velocity: 100 };
    let off = |note| SynthMessage::NoteOff { note, velocity: 0 };

    vec![
        Step::new(on(48), 300),
        Step::new(on(55), 300),
        Step::new(on(60), 400),
        Step::new(off(60), 300), // back down to 55
        Step::new(off(55), 300), // back down to 48
        Step::new(SynthMessage::ControlChange { controller: 1, value: 90 }, 0),
        Step::new(on(63), 600),
        Step::new(SynthMessage::PitchBend { value: 16_383 }, 400),
        Step::new(SynthMessage::PitchBend { value: 8_192 }, 400),
        Step::new(SynthMessage::AllNotesOff, 0),
    ]
}
