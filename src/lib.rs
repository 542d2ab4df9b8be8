//! Vesper - Voice and text command assistant
//!
//! This library provides the core functionality for the Vesper assistant:
//! - Command interpretation (greetings, time, date, web search, exit)
//! - Voice capture and utterance endpointing
//! - STT/TTS via hosted providers, with typed-input fallback
//! - Browser launching for search commands
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    Input                             │
//! │      Microphone (STT)   │   Console (typed)         │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                 Interpreter                          │
//! │   Greeting │ Time │ Date │ Search │ Exit │ Unknown  │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │                    Output                            │
//! │      Speaker (TTS)  │  Console  │  Browser          │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod assistant;
pub mod browser;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod voice;

pub use assistant::{
    Assistant, FallbackReason, InputSource, Utterance, VoicePipeline, INTERRUPT_FAREWELL, WELCOME,
};
pub use config::Config;
pub use error::{Error, Result};
pub use interpreter::{Action, Intent, Interpreter, Reply, DEFAULT_SEARCH_URL, EXIT_WORDS};
pub use voice::{
    AudioCapture, AudioPlayback, Endpointer, SpeechToText, SttProvider, TextToSpeech, TtsProvider,
};
