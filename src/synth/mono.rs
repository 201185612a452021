use crate::{
    error::SynthError,
    synth::{
        message::{MessageReceiver, SynthMessage},
        params::SynthParams,
        voice::MonoVoice,
    },
};

/// A [`MonoVoice`] fed from a single-producer message queue.
///
/// Every pending message is applied before the first sample of a block is
/// rendered, so all control changes made for block N are heard from the
/// start of block N. The producer side can live on any thread.
pub struct MonoSynth<R: MessageReceiver> {
    voice: MonoVoice,
    rx: R,
    frame_counter: u64,
}

impl<R: MessageReceiver> MonoSynth<R> {
    pub fn new(sample_rate: f32, params: SynthParams, rx: R) -> Result<Self, SynthError> {
        let voice = MonoVoice::new(sample_rate, params)?;
        Ok(Self {
            voice,
            rx,
            frame_counter: 0,
        })
    }

    pub fn render_block(&mut self, out: &mut [f32]) {
        // Process control messages
        while let Some(msg) = self.rx.pop() {
            self.handle(msg);
        }

        self.voice.render_block(out);
        self.frame_counter += out.len() as u64;
    }

    fn handle(&mut self, msg: SynthMessage) {
        match msg {
            SynthMessage::NoteOn { note, velocity } => self.voice.note_on(note, velocity),
            SynthMessage::NoteOff { note, .. } => self.voice.note_off(note),
            SynthMessage::PitchBend { value } => self.voice.pitch_wheel(value),
            SynthMessage::ControlChange { controller, value } => {
                self.voice.control_change(controller, value)
            }
            SynthMessage::Params(params) => self.voice.set_params(&params),
            SynthMessage::AllNotesOff => self.voice.all_notes_off(),
        }
    }

    pub fn voice(&self) -> &MonoVoice {
        &self.voice
    }

    /// Frames rendered since construction.
    pub fn frames(&self) -> u64 {
        self.frame_counter
    }
}
