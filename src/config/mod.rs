//! Configuration management for the vesper assistant
//!
//! Resolution order for every setting: environment variable, then the TOML
//! config file, then a built-in default.

pub mod file;

use crate::interpreter::DEFAULT_SEARCH_URL;

/// Default maximum seconds to wait for a spoken utterance
const DEFAULT_LISTEN_SECS: u64 = 8;

/// Resolved assistant configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Voice configuration
    pub voice: VoiceConfig,

    /// API keys
    pub api_keys: ApiKeys,

    /// Search endpoint the percent-encoded query is appended to
    pub search_url: String,
}

/// Voice processing configuration
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// Enable voice input/output
    pub enabled: bool,

    /// STT provider ("whisper" or "deepgram")
    pub stt_provider: String,

    /// STT model identifier
    pub stt_model: String,

    /// TTS provider ("openai" or "elevenlabs")
    pub tts_provider: String,

    /// TTS model identifier
    pub tts_model: String,

    /// TTS voice identifier
    pub tts_voice: String,

    /// TTS speed multiplier (0.25 to 4.0)
    pub tts_speed: f32,

    /// Maximum seconds to wait for an utterance before text fallback
    pub listen_secs: u64,
}

/// API keys for external services
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    /// `OpenAI` API key (Whisper STT and TTS)
    pub openai: Option<String>,

    /// `Deepgram` API key (optional STT)
    pub deepgram: Option<String>,

    /// `ElevenLabs` API key (optional TTS)
    pub elevenlabs: Option<String>,
}

impl Config {
    /// Load configuration (env > toml > default)
    #[must_use]
    pub fn load() -> Self {
        Self::load_with_options(false)
    }

    /// Load configuration with an explicit voice disable option
    #[must_use]
    pub fn load_with_options(disable_voice: bool) -> Self {
        let fc = file::load_config_file();

        let api_keys = ApiKeys {
            openai: std::env::var("OPENAI_API_KEY").ok().or(fc.api_keys.openai),
            deepgram: std::env::var("DEEPGRAM_API_KEY")
                .ok()
                .or(fc.api_keys.deepgram),
            elevenlabs: std::env::var("ELEVENLABS_API_KEY")
                .ok()
                .or(fc.api_keys.elevenlabs),
        };

        let enabled = if disable_voice {
            tracing::info!("voice explicitly disabled via --text-only");
            false
        } else {
            fc.voice.enabled.unwrap_or(true)
        };

        let voice = VoiceConfig {
            enabled,
            stt_provider: std::env::var("VESPER_STT_PROVIDER")
                .ok()
                .or(fc.voice.stt_provider)
                .unwrap_or_else(|| "whisper".to_string()),
            stt_model: std::env::var("VESPER_STT_MODEL")
                .ok()
                .or(fc.voice.stt_model)
                .unwrap_or_else(|| "whisper-1".to_string()),
            tts_provider: std::env::var("VESPER_TTS_PROVIDER")
                .ok()
                .or(fc.voice.tts_provider)
                .unwrap_or_else(|| "openai".to_string()),
            tts_model: std::env::var("VESPER_TTS_MODEL")
                .ok()
                .or(fc.voice.tts_model)
                .unwrap_or_else(|| "tts-1".to_string()),
            tts_voice: std::env::var("VESPER_TTS_VOICE")
                .ok()
                .or(fc.voice.tts_voice)
                .unwrap_or_else(|| "alloy".to_string()),
            tts_speed: std::env::var("VESPER_TTS_SPEED")
                .ok()
                .and_then(|s| s.parse().ok())
                .or(fc.voice.tts_speed)
                .unwrap_or(1.0),
            listen_secs: std::env::var("VESPER_LISTEN_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .or(fc.voice.listen_secs)
                .unwrap_or(DEFAULT_LISTEN_SECS),
        };

        let search_url = std::env::var("VESPER_SEARCH_URL")
            .ok()
            .or(fc.search.url)
            .unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string());

        Self {
            voice,
            api_keys,
            search_url,
        }
    }
}
