//! Utterance endpointing
//!
//! Decides when the user has started and finished speaking, using RMS
//! energy over the capture stream. The assistant has no wake word: every
//! loop iteration listens for exactly one utterance.

/// Minimum audio energy threshold to consider speech
const ENERGY_THRESHOLD: f32 = 0.03;

/// Minimum duration of speech to accept an utterance (samples at 16kHz)
const MIN_SPEECH_SAMPLES: usize = 4800; // 0.3 seconds

/// Trailing silence that ends an utterance (samples)
const SILENCE_SAMPLES: usize = 8000; // 0.5 seconds

/// State of the endpointer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointState {
    /// Waiting for speech
    Idle,
    /// Speech detected, accumulating the utterance
    Speaking,
}

/// Accumulates one utterance delimited by silence
pub struct Endpointer {
    state: EndpointState,
    speech_buffer: Vec<f32>,
    silence_counter: usize,
}

impl Default for Endpointer {
    fn default() -> Self {
        Self::new()
    }
}

impl Endpointer {
    /// Create an idle endpointer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: EndpointState::Idle,
            speech_buffer: Vec::new(),
            silence_counter: 0,
        }
    }

    /// Feed captured samples; returns true once the utterance is complete
    /// (enough speech followed by trailing silence)
    pub fn push(&mut self, samples: &[f32]) -> bool {
        let energy = calculate_energy(samples);
        let is_speech = energy > ENERGY_THRESHOLD;

        match self.state {
            EndpointState::Idle => {
                if is_speech {
                    self.state = EndpointState::Speaking;
                    self.speech_buffer.clear();
                    self.speech_buffer.extend_from_slice(samples);
                    self.silence_counter = 0;
                    tracing::trace!(energy, "speech started");
                }
                false
            }
            EndpointState::Speaking => {
                self.speech_buffer.extend_from_slice(samples);

                if is_speech {
                    self.silence_counter = 0;
                } else {
                    self.silence_counter += samples.len();
                }

                self.silence_counter > SILENCE_SAMPLES
                    && self.speech_buffer.len() > MIN_SPEECH_SAMPLES
            }
        }
    }

    /// Take the accumulated utterance, resetting to idle
    pub fn take_utterance(&mut self) -> Vec<f32> {
        self.state = EndpointState::Idle;
        self.silence_counter = 0;
        std::mem::take(&mut self.speech_buffer)
    }

    /// True while an utterance is being accumulated
    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.state == EndpointState::Speaking
    }

    /// Get current state
    #[must_use]
    pub const fn state(&self) -> EndpointState {
        self.state
    }

    /// Reset to idle, discarding any buffered speech
    pub fn reset(&mut self) {
        self.state = EndpointState::Idle;
        self.speech_buffer.clear();
        self.silence_counter = 0;
    }
}

/// Calculate RMS energy of audio samples
#[allow(clippy::cast_precision_loss)]
fn calculate_energy(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_energy_calculation() {
        let silence = vec![0.0f32; 100];
        assert!(calculate_energy(&silence) < 0.001);

        let loud = vec![0.5f32; 100];
        assert!(calculate_energy(&loud) > 0.4);
    }

    #[test]
    fn test_silence_never_completes() {
        let mut ep = Endpointer::new();
        for _ in 0..100 {
            assert!(!ep.push(&vec![0.0f32; 1600]));
        }
        assert_eq!(ep.state(), EndpointState::Idle);
    }

    #[test]
    fn test_speech_then_silence_completes() {
        let mut ep = Endpointer::new();

        // 0.5s of loud speech
        assert!(!ep.push(&vec![0.3f32; 8000]));
        assert!(ep.is_speaking());

        // 0.6s of trailing silence
        let complete = ep.push(&vec![0.0f32; 9600]);
        assert!(complete);

        let utterance = ep.take_utterance();
        assert_eq!(utterance.len(), 8000 + 9600);
        assert_eq!(ep.state(), EndpointState::Idle);
    }

    #[test]
    fn test_short_silence_does_not_complete() {
        let mut ep = Endpointer::new();

        ep.push(&vec![0.3f32; 8000]);
        // A pause shorter than the silence window keeps accumulating
        let complete = ep.push(&vec![0.0f32; 3200]);
        assert!(!complete);
        assert!(ep.is_speaking());
    }

    #[test]
    fn test_reset_discards_buffer() {
        let mut ep = Endpointer::new();
        ep.push(&vec![0.3f32; 8000]);
        ep.reset();
        assert_eq!(ep.state(), EndpointState::Idle);
        assert!(ep.take_utterance().is_empty());
    }
}
