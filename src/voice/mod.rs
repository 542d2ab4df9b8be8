//! Voice processing module
//!
//! Handles audio capture, utterance endpointing, cloud STT/TTS, and
//! playback. Every failure here degrades to console I/O in `assistant.rs`;
//! nothing in this module is load-bearing for the command interpreter.

mod capture;
mod endpoint;
mod playback;
mod stt;
mod tts;

pub use capture::{AudioCapture, SAMPLE_RATE, samples_to_wav};
pub use endpoint::{Endpointer, EndpointState};
pub use playback::{AudioPlayback, PLAYBACK_SAMPLE_RATE};
pub use stt::{SpeechToText, SttProvider};
pub use tts::{TextToSpeech, TtsProvider};
