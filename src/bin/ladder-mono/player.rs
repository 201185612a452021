//! Player - opens the audio device and feeds the synth from the main thread

use std::{thread, time::Duration};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::RingBuffer;

use ladder_mono::{
    synth::{message::SynthMessage, mono::MonoSynth, params::SynthParams},
    MAX_BLOCK_SIZE,
};

const QUEUE_SIZE: usize = 256;
/// Time left for the release tail after the last step.
const TAIL_MS: u64 = 2_500;

/// One scripted control message and how long to wait after sending it.
pub struct Step {
    message: SynthMessage,
    wait_ms: u64,
}

impl Step {
    pub fn new(message: SynthMessage, wait_ms: u64) -> Self {
        Self { message, wait_ms }
    }
}

pub struct Player {
    params: SynthParams,
}

impl Player {
    pub fn new(params: SynthParams) -> Self {
        Self { params }
    }

    /// Play the steps in order, then let the release ring out.
    pub fn run(self, steps: &[Step]) -> EyreResult<()> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        log::info!("sample rate: {sample_rate} Hz, channels: {channels}");

        // Control messages cross to the audio thread through a lock-free queue
        let (mut tx, rx) = RingBuffer::<SynthMessage>::new(QUEUE_SIZE);
        let mut synth = MonoSynth::new(sample_rate, self.params, rx)
            .wrap_err("failed to build the synth voice")?;

        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames_to_render];
                    synth.render_block(block);

                    // Copy to output (mono to all channels)
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                    }

                    frames_written += frames_to_render;
                }
            },
            |err| log::error!("audio stream error: {err}"),
            None,
        )?;

        stream.play()?;
        log::info!("playing {} steps", steps.len());

        for step in steps {
            if tx.push(step.message).is_err() {
                log::warn!("control queue full, dropped {:?}", step.message);
            }
            thread::sleep(Duration::from_millis(step.wait_ms));
        }

        thread::sleep(Duration::from_millis(TAIL_MS));
        log::info!("done");
        Ok(())
    }
}
