//! Speech-to-text (STT) processing
//!
//! Transcription via configurable cloud providers (OpenAI Whisper, Deepgram).

use serde::Deserialize;

use crate::{Error, Result};

/// STT provider configuration
#[derive(Debug, Clone)]
pub enum SttProvider {
    /// `OpenAI` Whisper transcription API
    Whisper {
        /// API key for `OpenAI`
        api_key: String,
        /// Model identifier (e.g. "whisper-1")
        model: String,
    },
    /// Deepgram transcription API
    Deepgram {
        /// API key for Deepgram
        api_key: String,
        /// Model identifier (e.g. "nova-2")
        model: String,
    },
}

/// Transcribes speech to text
pub struct SpeechToText {
    provider: SttProvider,
    client: reqwest::Client,
}

/// Response from the Whisper transcription API
#[derive(Deserialize)]
struct WhisperResponse {
    text: String,
}

/// Response from the Deepgram transcription API
#[derive(Deserialize)]
struct DeepgramResponse {
    results: DeepgramResults,
}

#[derive(Deserialize)]
struct DeepgramResults {
    channels: Vec<DeepgramChannel>,
}

#[derive(Deserialize)]
struct DeepgramChannel {
    alternatives: Vec<DeepgramAlternative>,
}

#[derive(Deserialize)]
struct DeepgramAlternative {
    transcript: String,
}

impl SpeechToText {
    /// Create a new STT instance for the given provider
    ///
    /// # Errors
    ///
    /// Returns error if the API key is empty
    pub fn new(provider: SttProvider) -> Result<Self> {
        let key = match &provider {
            SttProvider::Whisper { api_key, .. } | SttProvider::Deepgram { api_key, .. } => api_key,
        };
        if key.is_empty() {
            return Err(Error::Config("STT API key required".to_string()));
        }

        Ok(Self {
            provider,
            client: reqwest::Client::new(),
        })
    }

    /// Transcribe WAV audio bytes to text
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response cannot be parsed
    pub async fn transcribe(&self, audio: &[u8]) -> Result<String> {
        match &self.provider {
            SttProvider::Whisper { api_key, model } => {
                self.transcribe_whisper(api_key, model, audio).await
            }
            SttProvider::Deepgram { api_key, model } => {
                self.transcribe_deepgram(api_key, model, audio).await
            }
        }
    }

    /// Transcribe using OpenAI Whisper
    async fn transcribe_whisper(&self, api_key: &str, model: &str, audio: &[u8]) -> Result<String> {
        tracing::debug!(audio_bytes = audio.len(), "starting Whisper transcription");

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio.to_vec())
                    .file_name("audio.wav")
                    .mime_str("audio/wav")
                    .map_err(|e| Error::Stt(e.to_string()))?,
            )
            .text("model", model.to_string());

        let response = self
            .client
            .post("https://api.openai.com/v1/audio/transcriptions")
            .header("Authorization", format!("Bearer {api_key}"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Stt(format!("Whisper API error {status}: {body}")));
        }

        let result: WhisperResponse = response.json().await?;
        tracing::info!(transcript = %result.text, "transcription complete");
        Ok(result.text)
    }

    /// Transcribe using Deepgram
    async fn transcribe_deepgram(
        &self,
        api_key: &str,
        model: &str,
        audio: &[u8],
    ) -> Result<String> {
        tracing::debug!(audio_bytes = audio.len(), "starting Deepgram transcription");

        let url = format!("https://api.deepgram.com/v1/listen?model={model}&punctuate=true");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Token {api_key}"))
            .header("Content-Type", "audio/wav")
            .body(audio.to_vec())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Stt(format!("Deepgram API error {status}: {body}")));
        }

        let result: DeepgramResponse = response.json().await?;
        let transcript = result
            .results
            .channels
            .first()
            .and_then(|c| c.alternatives.first())
            .map(|a| a.transcript.clone())
            .unwrap_or_default();

        tracing::info!(transcript = %transcript, "transcription complete");
        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        let result = SpeechToText::new(SttProvider::Whisper {
            api_key: String::new(),
            model: "whisper-1".to_string(),
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_new_deepgram() {
        let stt = SpeechToText::new(SttProvider::Deepgram {
            api_key: "test-key".to_string(),
            model: "nova-2".to_string(),
        })
        .unwrap();
        assert!(matches!(stt.provider, SttProvider::Deepgram { .. }));
    }
}
