//! Voice pipeline integration tests
//!
//! Tests voice components without requiring audio hardware

use vesper::voice::{samples_to_wav, EndpointState, Endpointer, SAMPLE_RATE};

/// Generate sine wave audio samples
fn generate_sine_samples(frequency: f32, duration_secs: f32, amplitude: f32) -> Vec<f32> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let num_samples = (SAMPLE_RATE as f32 * duration_secs) as usize;
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            amplitude * (2.0 * std::f32::consts::PI * frequency * t).sin()
        })
        .collect()
}

/// Generate silence
fn generate_silence(duration_secs: f32) -> Vec<f32> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let num_samples = (SAMPLE_RATE as f32 * duration_secs) as usize;
    vec![0.0; num_samples]
}

#[test]
fn test_endpointer_starts_idle() {
    let endpointer = Endpointer::new();
    assert_eq!(endpointer.state(), EndpointState::Idle);
    assert!(!endpointer.is_speaking());
}

#[test]
fn test_silence_stays_idle() {
    let mut endpointer = Endpointer::new();
    let complete = endpointer.push(&generate_silence(2.0));
    assert!(!complete);
    assert_eq!(endpointer.state(), EndpointState::Idle);
}

#[test]
fn test_speech_enters_speaking_state() {
    let mut endpointer = Endpointer::new();
    let complete = endpointer.push(&generate_sine_samples(200.0, 1.0, 0.5));
    assert!(!complete, "utterance should not finish while speech continues");
    assert!(endpointer.is_speaking());
}

#[test]
fn test_speech_then_silence_completes_utterance() {
    let mut endpointer = Endpointer::new();
    endpointer.push(&generate_sine_samples(200.0, 1.0, 0.5));

    let complete = endpointer.push(&generate_silence(1.0));
    assert!(complete);

    let utterance = endpointer.take_utterance();
    assert!(!utterance.is_empty());
    // Endpointer is reusable after taking an utterance
    assert_eq!(endpointer.state(), EndpointState::Idle);
}

#[test]
fn test_quiet_audio_below_threshold_is_silence() {
    let mut endpointer = Endpointer::new();
    // Well below the energy threshold
    endpointer.push(&generate_sine_samples(200.0, 1.0, 0.005));
    assert!(!endpointer.is_speaking());
}

#[test]
fn test_reset_discards_partial_utterance() {
    let mut endpointer = Endpointer::new();
    endpointer.push(&generate_sine_samples(200.0, 1.0, 0.5));
    assert!(endpointer.is_speaking());

    endpointer.reset();
    assert_eq!(endpointer.state(), EndpointState::Idle);
    assert!(endpointer.take_utterance().is_empty());
}

#[test]
fn test_wav_encoding_produces_riff_header() {
    let samples = generate_sine_samples(440.0, 0.5, 0.5);
    let wav = samples_to_wav(&samples, SAMPLE_RATE).unwrap();

    assert_eq!(&wav[0..4], b"RIFF");
    assert_eq!(&wav[8..12], b"WAVE");
    // 16-bit mono PCM means two bytes per sample plus the 44-byte header
    assert!(wav.len() >= samples.len() * 2 + 44);
}

#[test]
fn test_wav_encoding_empty_input() {
    let wav = samples_to_wav(&[], SAMPLE_RATE).unwrap();
    // Header only
    assert_eq!(&wav[0..4], b"RIFF");
    assert!(wav.len() >= 44);
}

#[test]
fn test_wav_encoding_clamps_out_of_range_samples() {
    // Samples outside [-1, 1] must not wrap around when converted to i16
    let samples = vec![2.0_f32, -2.0, 0.0];
    let wav = samples_to_wav(&samples, SAMPLE_RATE).unwrap();
    assert_eq!(&wav[0..4], b"RIFF");
}
