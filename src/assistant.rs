//! Assistant loop and speech I/O adapter
//!
//! Owns the listen → interpret → speak cycle. Voice I/O is best-effort:
//! any capture, transcription, synthesis, or playback failure degrades to
//! the console and is recorded as a [`FallbackReason`] value — the command
//! interpreter never sees an error.

use std::io::Write as _;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::browser;
use crate::config::Config;
use crate::interpreter::{Action, Interpreter};
use crate::voice::{
    samples_to_wav, AudioCapture, AudioPlayback, Endpointer, SpeechToText, SttProvider,
    TextToSpeech, TtsProvider, SAMPLE_RATE,
};
use crate::Result;

/// Spoken once at startup
pub const WELCOME: &str = "Voice assistant starting. Say \"Hello\" or ask for the time or date. \
                           Say \"search\" followed by your query.";

/// Spoken when the loop is interrupted (Ctrl-C)
pub const INTERRUPT_FAREWELL: &str = "Exiting. Goodbye!";

/// Interval between capture buffer polls
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Where an utterance came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// Transcribed from the microphone
    Voice,
    /// Typed at the console
    Typed,
}

/// Why voice capture was skipped in favor of typed input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// Voice is disabled or unconfigured
    VoiceDisabled,
    /// The microphone could not be opened
    CaptureFailed,
    /// The listen window elapsed without speech
    NothingHeard,
    /// The STT request failed
    TranscriptionFailed,
}

impl FallbackReason {
    /// Console prompt shown when falling back to typed input
    #[must_use]
    pub const fn prompt(self) -> &'static str {
        match self {
            Self::VoiceDisabled => "Voice input unavailable. Type your command:",
            Self::CaptureFailed => "Microphone not available. Type your command:",
            Self::NothingHeard => "Listening timed out. Type your command:",
            Self::TranscriptionFailed => "Could not understand audio. Type your command:",
        }
    }
}

/// One captured utterance
#[derive(Debug, Clone)]
pub struct Utterance {
    /// The transcribed or typed text
    pub text: String,
    /// Where the text came from
    pub source: InputSource,
    /// Set when voice capture degraded to typed input
    pub fallback: Option<FallbackReason>,
}

/// Outcome of one voice capture attempt
enum CaptureFlow {
    /// Got a transcript
    Heard(String),
    /// Degrade to typed input
    Fallback(FallbackReason),
    /// Ctrl-C while listening
    Shutdown,
}

/// Microphone / STT / TTS / speaker bundle
pub struct VoicePipeline {
    capture: AudioCapture,
    playback: AudioPlayback,
    stt: SpeechToText,
    tts: TextToSpeech,
    listen_secs: u64,
}

impl VoicePipeline {
    /// Build the voice pipeline from configuration
    ///
    /// # Errors
    ///
    /// Returns error if audio devices are missing or the configured
    /// provider has no API key
    pub fn from_config(config: &Config) -> Result<Self> {
        let stt = match config.voice.stt_provider.as_str() {
            "deepgram" => SpeechToText::new(SttProvider::Deepgram {
                api_key: config.api_keys.deepgram.clone().unwrap_or_default(),
                model: config.voice.stt_model.clone(),
            })?,
            _ => SpeechToText::new(SttProvider::Whisper {
                api_key: config.api_keys.openai.clone().unwrap_or_default(),
                model: config.voice.stt_model.clone(),
            })?,
        };

        let tts = match config.voice.tts_provider.as_str() {
            "elevenlabs" => TextToSpeech::new(TtsProvider::ElevenLabs {
                api_key: config.api_keys.elevenlabs.clone().unwrap_or_default(),
                model: config.voice.tts_model.clone(),
                voice_id: config.voice.tts_voice.clone(),
            })?,
            _ => TextToSpeech::new(TtsProvider::OpenAi {
                api_key: config.api_keys.openai.clone().unwrap_or_default(),
                model: config.voice.tts_model.clone(),
                voice: config.voice.tts_voice.clone(),
                speed: config.voice.tts_speed,
            })?,
        };

        Ok(Self {
            capture: AudioCapture::new()?,
            playback: AudioPlayback::new()?,
            stt,
            tts,
            listen_secs: config.voice.listen_secs,
        })
    }
}

/// The assistant: interpreter plus optional voice I/O
pub struct Assistant {
    interpreter: Interpreter,
    voice: Option<VoicePipeline>,
}

impl Assistant {
    /// Create an assistant; `voice` is `None` for text-only operation
    #[must_use]
    pub fn new(interpreter: Interpreter, voice: Option<VoicePipeline>) -> Self {
        Self { interpreter, voice }
    }

    /// Run the listen → interpret → speak loop until an exit command or
    /// Ctrl-C. Runs on the caller's thread: cpal streams aren't Send.
    ///
    /// # Errors
    ///
    /// Currently infallible at runtime; the signature leaves room for
    /// fatal setup errors surfaced mid-loop
    #[allow(clippy::future_not_send)]
    pub async fn run(&mut self) -> Result<()> {
        // Ctrl-C is forwarded over a channel so listening can be
        // interrupted mid-capture
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = shutdown_tx.send(()).await;
            }
        });

        self.speak(WELCOME).await;

        loop {
            let Some(utterance) = self.listen(&mut shutdown_rx).await else {
                self.speak(INTERRUPT_FAREWELL).await;
                break;
            };

            if let Some(reason) = utterance.fallback {
                tracing::debug!(?reason, "voice capture fell back to typed input");
            }

            let reply = self.interpreter.interpret(&utterance.text);
            self.speak(&reply.text).await;

            match reply.action {
                Action::None => {}
                Action::OpenUrl(url) => {
                    if let Err(e) = browser::open_url(&url) {
                        tracing::warn!(error = %e, "browser launch failed");
                    }
                }
                Action::Exit => break,
            }
        }

        if let Some(voice) = self.voice.as_mut() {
            voice.capture.stop();
        }
        Ok(())
    }

    /// Capture one utterance, voice first with typed fallback.
    ///
    /// Returns `None` on shutdown (Ctrl-C).
    async fn listen(&mut self, shutdown_rx: &mut mpsc::Receiver<()>) -> Option<Utterance> {
        match self.capture_voice(shutdown_rx).await {
            CaptureFlow::Heard(text) => Some(Utterance {
                text,
                source: InputSource::Voice,
                fallback: None,
            }),
            CaptureFlow::Fallback(reason) => {
                let text = read_typed(reason.prompt(), shutdown_rx).await?;
                Some(Utterance {
                    text,
                    source: InputSource::Typed,
                    fallback: Some(reason),
                })
            }
            CaptureFlow::Shutdown => None,
        }
    }

    /// Record one utterance from the microphone and transcribe it
    async fn capture_voice(&mut self, shutdown_rx: &mut mpsc::Receiver<()>) -> CaptureFlow {
        let Some(voice) = self.voice.as_mut() else {
            return CaptureFlow::Fallback(FallbackReason::VoiceDisabled);
        };

        if let Err(e) = voice.capture.start() {
            tracing::warn!(error = %e, "microphone unavailable");
            return CaptureFlow::Fallback(FallbackReason::CaptureFailed);
        }
        voice.capture.clear_buffer();

        println!("Listening...");

        let mut endpointer = Endpointer::new();
        let deadline = Instant::now() + Duration::from_secs(voice.listen_secs);
        // Generous cap so an in-progress utterance can finish past the window
        let hard_deadline = Instant::now() + Duration::from_secs(voice.listen_secs * 3);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    voice.capture.stop();
                    return CaptureFlow::Shutdown;
                }
                () = tokio::time::sleep(POLL_INTERVAL) => {
                    let samples = voice.capture.take_buffer();

                    if endpointer.push(&samples) {
                        voice.capture.stop();
                        let utterance = endpointer.take_utterance();
                        tracing::debug!(samples = utterance.len(), "utterance complete");

                        let wav = match samples_to_wav(&utterance, SAMPLE_RATE) {
                            Ok(wav) => wav,
                            Err(e) => {
                                tracing::warn!(error = %e, "WAV encoding failed");
                                return CaptureFlow::Fallback(FallbackReason::TranscriptionFailed);
                            }
                        };

                        return match voice.stt.transcribe(&wav).await {
                            Ok(text) => CaptureFlow::Heard(text),
                            Err(e) => {
                                tracing::warn!(error = %e, "STT failed");
                                CaptureFlow::Fallback(FallbackReason::TranscriptionFailed)
                            }
                        };
                    }

                    let now = Instant::now();
                    if (now >= deadline && !endpointer.is_speaking()) || now >= hard_deadline {
                        voice.capture.stop();
                        return CaptureFlow::Fallback(FallbackReason::NothingHeard);
                    }
                }
            }
        }
    }

    /// Speak a response, printing it when TTS is unavailable or fails
    pub async fn speak(&mut self, text: &str) {
        tracing::info!(response = text, "responding");

        if let Some(voice) = self.voice.as_mut() {
            match voice.tts.synthesize(text).await {
                Ok(mp3) => match voice.playback.play_mp3(&mp3) {
                    Ok(()) => return,
                    Err(e) => tracing::warn!(error = %e, "playback failed"),
                },
                Err(e) => tracing::warn!(error = %e, "TTS failed"),
            }
        }

        println!("{text}");
    }
}

/// Read a line from stdin without blocking shutdown.
///
/// Returns `None` on Ctrl-C; EOF yields an empty utterance.
async fn read_typed(prompt: &str, shutdown_rx: &mut mpsc::Receiver<()>) -> Option<String> {
    println!("{prompt}");
    print!("> ");
    let _ = std::io::stdout().flush();

    let read = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        match std::io::stdin().read_line(&mut line) {
            Ok(_) => line,
            Err(_) => String::new(),
        }
    });

    tokio::select! {
        _ = shutdown_rx.recv() => None,
        line = read => Some(line.unwrap_or_default().trim_end_matches(['\r', '\n']).to_string()),
    }
}
