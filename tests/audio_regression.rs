use ladder_mono::{
    synth::{
        controller::{calculate_frequency, pitch_wheel_semitones},
        message::SynthMessage,
        mono::MonoSynth,
        params::{EnvelopeParams, SynthParams},
        voice::MonoVoice,
    },
    SynthError, MAX_BLOCK_SIZE,
};

const SAMPLE_RATE: f32 = 48_000.0;

fn voice(params: SynthParams) -> MonoVoice {
    MonoVoice::new(SAMPLE_RATE, params).expect("valid voice")
}

fn render(voice: &mut MonoVoice, frames: usize) -> Vec<f32> {
    let mut out = vec![0.0; frames];
    for block in out.chunks_mut(MAX_BLOCK_SIZE) {
        voice.render_block(block);
    }
    out
}

fn seconds(s: f32) -> usize {
    (s * SAMPLE_RATE) as usize
}

#[test]
fn idle_voice_renders_exact_silence() {
    let mut voice = voice(SynthParams::default());
    let out = render(&mut voice, 1024);
    assert!(out.iter().all(|&s| s == 0.0));
    assert!(!voice.is_active());
}

#[test]
fn held_note_is_audible_and_bounded() {
    let mut voice = voice(SynthParams {
        filter_q: 4.0,
        filter_drive: 5.0,
        ..SynthParams::default()
    });
    voice.note_on(45, 100);

    let out = render(&mut voice, seconds(2.0));
    assert!(out.iter().all(|s| s.is_finite()));
    assert!(out.iter().all(|s| s.abs() <= 1.0));
    assert!(out.iter().any(|s| s.abs() > 0.01));
}

#[test]
fn release_ends_in_exact_zeros() {
    let params = SynthParams::default();
    let mut voice = voice(params);

    voice.note_on(60, 100);
    render(&mut voice, seconds(0.5));
    voice.note_off(60);
    assert!(voice.is_active());

    let release = seconds(params.amp_envelope.release);
    render(&mut voice, release - 1);
    assert!(voice.is_active());
    render(&mut voice, 2);
    assert!(!voice.is_active());

    let tail = render(&mut voice, 4096);
    assert!(tail.iter().all(|&s| s == 0.0));
}

#[test]
fn releasing_the_top_note_falls_back_to_the_one_below() {
    let mut voice = voice(SynthParams::default());

    voice.note_on(60, 100);
    voice.note_on(64, 100);
    voice.note_on(67, 100);
    render(&mut voice, 512);

    voice.note_off(67);
    assert_eq!(voice.controller().most_recent_note(), Some(64));
    assert_eq!(
        voice.controller().current_frequency(),
        calculate_frequency(64, 0.0)
    );

    // a buried note leaving changes nothing
    voice.note_off(60);
    assert_eq!(voice.controller().held_notes(), &[64]);
    assert_eq!(
        voice.controller().current_frequency(),
        calculate_frequency(64, 0.0)
    );

    // legato transitions keep the envelope going
    render(&mut voice, 512);
    assert!(voice.is_active());
    voice.note_off(64);
    assert!(voice.controller().held_notes().is_empty());
    assert!(voice.is_active()); // releasing, still sounding
}

#[test]
fn portamento_glides_exponentially_towards_the_new_note() {
    let glide = 0.05;
    let mut voice = voice(SynthParams {
        portamento_time: glide,
        ..SynthParams::default()
    });

    voice.note_on(60, 100);
    render(&mut voice, seconds(1.0));
    let low = calculate_frequency(60, 0.0);
    assert!((voice.controller().glide_frequency() - low).abs() < 1e-3);

    voice.note_on(72, 100);
    let high = calculate_frequency(72, 0.0);
    let mut last = voice.controller().glide_frequency();
    assert!((last - low).abs() < 1e-3);

    for _ in 0..seconds(glide) {
        render(&mut voice, 1);
        let f = voice.controller().glide_frequency();
        assert!(f >= last && f <= high);
        last = f;
    }

    // one time constant in
    let expected = high + (low - high) * (-1.0f32).exp();
    assert!((last - expected).abs() < 0.5, "{last} vs {expected}");
}

#[test]
fn pitch_wheel_retunes_the_sounding_note() {
    let mut voice = voice(SynthParams::default());
    voice.note_on(69, 100);
    voice.pitch_wheel(16_383);

    let expected = calculate_frequency(69, pitch_wheel_semitones(16_383));
    assert_eq!(voice.controller().current_frequency(), expected);
    // almost exactly two semitones up
    assert!((expected - 493.88).abs() < 0.1);

    // the bend carries over to the next key
    voice.note_on(57, 100);
    assert_eq!(
        voice.controller().current_frequency(),
        calculate_frequency(57, pitch_wheel_semitones(16_383))
    );
}

#[test]
fn mod_wheel_sets_vibrato_and_all_notes_off_releases() {
    let mut voice = voice(SynthParams::default());
    voice.note_on(60, 100);
    voice.control_change(1, 127);
    assert!((voice.vibrato_depth() - 0.05).abs() < 1e-6);

    let out = render(&mut voice, seconds(0.25));
    assert!(out.iter().all(|s| s.is_finite()));

    voice.control_change(123, 0);
    assert!(voice.controller().held_notes().is_empty());
    render(&mut voice, seconds(0.3));
    assert!(!voice.is_active());
}

#[test]
fn bad_sample_rates_are_rejected() {
    assert!(matches!(
        MonoVoice::new(0.0, SynthParams::default()),
        Err(SynthError::InvalidSampleRate(_))
    ));
    assert!(MonoVoice::new(f32::NAN, SynthParams::default()).is_err());
}

#[cfg(feature = "rtrb")]
#[test]
fn queued_messages_reach_the_voice_between_blocks() {
    let (mut tx, rx) = rtrb::RingBuffer::<SynthMessage>::new(16);
    let mut synth = MonoSynth::new(SAMPLE_RATE, SynthParams::default(), rx).expect("valid synth");
    let mut block = [0.0f32; 512];

    synth.render_block(&mut block);
    assert!(block.iter().all(|&s| s == 0.0));

    tx.push(SynthMessage::NoteOn { note: 48, velocity: 100 }).expect("queue has room");
    tx.push(SynthMessage::ControlChange { controller: 1, value: 64 }).expect("queue has room");
    synth.render_block(&mut block);
    assert!(synth.voice().is_active());
    assert!(block.iter().any(|&s| s != 0.0));
    assert!(synth.voice().vibrato_depth() > 0.0);

    let params = SynthParams {
        filter_q: 3.0,
        ..SynthParams::default()
    };
    tx.push(SynthMessage::Params(params)).expect("queue has room");
    tx.push(SynthMessage::NoteOff { note: 48, velocity: 0 }).expect("queue has room");
    synth.render_block(&mut block);
    assert_eq!(synth.voice().params().filter_q, 3.0);
    assert!(synth.voice().controller().held_notes().is_empty());

    assert_eq!(synth.frames(), 3 * 512);
}

#[cfg(feature = "serde")]
#[test]
fn json_patch_drives_a_voice() {
    let params = SynthParams::from_json(
        r#"{ "filter_cutoff": 400.0, "portamento_time": 0.2, "oscillator_modes": ["Square", "Saw", "Sine"] }"#,
    )
    .expect("valid patch");
    assert_eq!(params.filter_cutoff, 400.0);

    let mut voice = voice(params);
    voice.note_on(40, 100);
    let out = render(&mut voice, seconds(0.2));
    assert!(out.iter().all(|s| s.is_finite() && s.abs() <= 1.0));

    assert!(matches!(
        SynthParams::from_json(r#"{ "filter_q": 9.0 }"#),
        Err(SynthError::ParameterOutOfRange { name: "filter_q", .. })
    ));
}

#[test]
fn slow_panel_release_ends_on_time() {
    let params = SynthParams {
        amp_envelope: EnvelopeParams::new(0.1, 1.0, 0.6, 2.0),
        ..SynthParams::default()
    };
    let mut voice = voice(params);

    voice.note_on(52, 100);
    render(&mut voice, seconds(1.5));
    assert_eq!(voice.amp_envelope().level(), 0.6);

    voice.note_off(52);
    render(&mut voice, seconds(2.0) - 1);
    assert!(voice.is_active());
    render(&mut voice, 2);
    assert!(!voice.is_active());
}

#[test]
fn resonance_set_at_a_bright_cutoff_survives_the_filter_sweep() {
    // contour drives the cutoff above 10 kHz at the attack peak, then it falls back
    let params = SynthParams {
        filter_cutoff: 5_000.0,
        filter_contour: 5_000.0,
        filter_envelope: EnvelopeParams::new(0.001, 1.0, 0.0, 0.2),
        ..SynthParams::default()
    };
    let mut voice = voice(params);
    voice.note_on(45, 100);
    render(&mut voice, 48);
    assert!(voice.filter().cutoff() > 10_000.0);

    voice.set_params(&SynthParams {
        filter_q: 3.0,
        ..params
    });

    let out = render(&mut voice, seconds(1.5));
    let tail = &out[seconds(1.2)..];
    let min = tail.iter().copied().fold(f32::INFINITY, f32::min);
    let max = tail.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    assert!(max - min > 0.05, "output stuck between {min} and {max}");
}
