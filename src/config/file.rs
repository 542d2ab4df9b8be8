//! TOML configuration file loading
//!
//! Supports `~/.config/vesper/config.toml` as a persistent config source.
//! All fields are optional — the file is a partial overlay on top of defaults.

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct VesperConfigFile {
    /// Voice/audio configuration
    #[serde(default)]
    pub voice: VoiceFileConfig,

    /// API keys for external services
    #[serde(default)]
    pub api_keys: ApiKeysFileConfig,

    /// Web search configuration
    #[serde(default)]
    pub search: SearchFileConfig,
}

/// Voice processing configuration
#[derive(Debug, Default, Deserialize)]
pub struct VoiceFileConfig {
    /// Enable voice input/output
    pub enabled: Option<bool>,

    /// STT provider ("whisper" or "deepgram")
    pub stt_provider: Option<String>,

    /// STT model (e.g. "whisper-1", "nova-2")
    pub stt_model: Option<String>,

    /// TTS provider ("openai" or "elevenlabs")
    pub tts_provider: Option<String>,

    /// TTS model (e.g. "tts-1")
    pub tts_model: Option<String>,

    /// TTS voice identifier (e.g. "alloy")
    pub tts_voice: Option<String>,

    /// TTS speed multiplier
    pub tts_speed: Option<f32>,

    /// Maximum seconds to wait for an utterance
    pub listen_secs: Option<u64>,
}

/// API keys configuration
#[derive(Debug, Default, Deserialize)]
pub struct ApiKeysFileConfig {
    pub openai: Option<String>,
    pub deepgram: Option<String>,
    pub elevenlabs: Option<String>,
}

/// Web search configuration
#[derive(Debug, Default, Deserialize)]
pub struct SearchFileConfig {
    /// Search endpoint the query is appended to
    pub url: Option<String>,
}

/// Load the TOML config file from the standard path
///
/// Returns `VesperConfigFile::default()` if the file doesn't exist or can't
/// be parsed.
pub fn load_config_file() -> VesperConfigFile {
    let Some(path) = config_file_path() else {
        return VesperConfigFile::default();
    };

    if !path.exists() {
        return VesperConfigFile::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                VesperConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            VesperConfigFile::default()
        }
    }
}

/// Return the config file path: `~/.config/vesper/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("vesper").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_parses() {
        let parsed: VesperConfigFile = toml::from_str(
            r#"
            [voice]
            enabled = false
            tts_voice = "alloy"

            [search]
            url = "https://duckduckgo.com/?q="
            "#,
        )
        .unwrap();

        assert_eq!(parsed.voice.enabled, Some(false));
        assert_eq!(parsed.voice.tts_voice.as_deref(), Some("alloy"));
        assert!(parsed.voice.stt_model.is_none());
        assert_eq!(parsed.search.url.as_deref(), Some("https://duckduckgo.com/?q="));
    }

    #[test]
    fn test_empty_file_is_default() {
        let parsed: VesperConfigFile = toml::from_str("").unwrap();
        assert!(parsed.voice.enabled.is_none());
        assert!(parsed.api_keys.openai.is_none());
    }
}
