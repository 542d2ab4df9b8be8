//! Text-to-speech (TTS) processing
//!
//! Synthesis via configurable cloud providers (OpenAI, ElevenLabs). Both
//! return MP3 bytes; playback decodes them (see `playback.rs`).

use serde::Serialize;

use crate::{Error, Result};

/// TTS provider configuration
#[derive(Debug, Clone)]
pub enum TtsProvider {
    /// `OpenAI` speech API
    OpenAi {
        /// API key for `OpenAI`
        api_key: String,
        /// Model identifier (e.g. "tts-1")
        model: String,
        /// Voice identifier (e.g. "alloy")
        voice: String,
        /// Speed multiplier (0.25 to 4.0)
        speed: f32,
    },
    /// `ElevenLabs` speech API
    ElevenLabs {
        /// API key for `ElevenLabs`
        api_key: String,
        /// Model identifier (e.g. "eleven_monolingual_v1")
        model: String,
        /// Voice ID
        voice_id: String,
    },
}

/// Synthesizes speech from text
pub struct TextToSpeech {
    provider: TtsProvider,
    client: reqwest::Client,
}

impl TextToSpeech {
    /// Create a new TTS instance for the given provider
    ///
    /// # Errors
    ///
    /// Returns error if the API key is empty
    pub fn new(provider: TtsProvider) -> Result<Self> {
        let key = match &provider {
            TtsProvider::OpenAi { api_key, .. } | TtsProvider::ElevenLabs { api_key, .. } => {
                api_key
            }
        };
        if key.is_empty() {
            return Err(Error::Config("TTS API key required".to_string()));
        }

        Ok(Self {
            provider,
            client: reqwest::Client::new(),
        })
    }

    /// Synthesize text to MP3 bytes
    ///
    /// # Errors
    ///
    /// Returns error if synthesis fails
    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        match &self.provider {
            TtsProvider::OpenAi {
                api_key,
                model,
                voice,
                speed,
            } => self.synthesize_openai(api_key, model, voice, *speed, text).await,
            TtsProvider::ElevenLabs {
                api_key,
                model,
                voice_id,
            } => self.synthesize_elevenlabs(api_key, model, voice_id, text).await,
        }
    }

    /// Synthesize using OpenAI TTS
    async fn synthesize_openai(
        &self,
        api_key: &str,
        model: &str,
        voice: &str,
        speed: f32,
        text: &str,
    ) -> Result<Vec<u8>> {
        #[derive(Serialize)]
        struct SpeechRequest<'a> {
            model: &'a str,
            input: &'a str,
            voice: &'a str,
            speed: f32,
        }

        let request = SpeechRequest {
            model,
            input: text,
            voice,
            speed,
        };

        let response = self
            .client
            .post("https://api.openai.com/v1/audio/speech")
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Tts(format!("OpenAI TTS error {status}: {body}")));
        }

        let audio = response.bytes().await?;
        Ok(audio.to_vec())
    }

    /// Synthesize using ElevenLabs TTS
    async fn synthesize_elevenlabs(
        &self,
        api_key: &str,
        model: &str,
        voice_id: &str,
        text: &str,
    ) -> Result<Vec<u8>> {
        #[derive(Serialize)]
        struct ElevenLabsRequest<'a> {
            text: &'a str,
            model_id: &'a str,
        }

        let url = format!("https://api.elevenlabs.io/v1/text-to-speech/{voice_id}");

        let request = ElevenLabsRequest {
            text,
            model_id: model,
        };

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Tts(format!("ElevenLabs TTS error {status}: {body}")));
        }

        let audio = response.bytes().await?;
        Ok(audio.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        let result = TextToSpeech::new(TtsProvider::OpenAi {
            api_key: String::new(),
            model: "tts-1".to_string(),
            voice: "alloy".to_string(),
            speed: 1.0,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_new_elevenlabs() {
        let tts = TextToSpeech::new(TtsProvider::ElevenLabs {
            api_key: "test-key".to_string(),
            model: "eleven_monolingual_v1".to_string(),
            voice_id: "voice".to_string(),
        })
        .unwrap();
        assert!(matches!(tts.provider, TtsProvider::ElevenLabs { .. }));
    }
}
