use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vesper::voice::{AudioCapture, AudioPlayback, PLAYBACK_SAMPLE_RATE};
use vesper::{Assistant, Config, Interpreter, TextToSpeech, TtsProvider, VoicePipeline};

/// Vesper - Voice and text command assistant
#[derive(Parser)]
#[command(name = "vesper", version, about)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable voice I/O and run in typed-command mode
    #[arg(long, env = "VESPER_TEXT_ONLY")]
    text_only: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
#[allow(clippy::enum_variant_names)]
enum Command {
    /// Test microphone input
    TestMic {
        /// Duration in seconds
        #[arg(short, long, default_value = "5")]
        duration: u64,
    },
    /// Test speaker output
    TestSpeaker,
    /// Test TTS output
    TestTts {
        /// Text to speak
        #[arg(default_value = "Hello! This is a test of the text to speech system.")]
        text: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn,vesper=info",
        1 => "info,vesper=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}

#[allow(clippy::future_not_send)]
async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(cmd) = cli.command {
        return match cmd {
            Command::TestMic { duration } => test_mic(duration).await,
            Command::TestSpeaker => test_speaker(),
            Command::TestTts { text } => test_tts(&text).await,
        };
    }

    tracing::info!(text_only = cli.text_only, "starting vesper");

    let config = Config::load_with_options(cli.text_only);
    tracing::debug!(?config, "loaded configuration");

    // Voice is best-effort: missing hardware or keys drop us to typed input
    let voice = if config.voice.enabled {
        match VoicePipeline::from_config(&config) {
            Ok(pipeline) => Some(pipeline),
            Err(e) => {
                tracing::warn!(error = %e, "voice unavailable, using typed input");
                None
            }
        }
    } else {
        None
    };

    if voice.is_some() {
        tracing::info!("vesper ready - listening for commands");
    } else {
        tracing::info!("vesper ready (text-only mode)");
    }

    let interpreter = Interpreter::new(config.search_url.clone());
    let mut assistant = Assistant::new(interpreter, voice);
    assistant.run().await?;

    Ok(())
}

/// Test microphone input
#[allow(clippy::future_not_send)]
async fn test_mic(duration: u64) -> anyhow::Result<()> {
    println!("Testing microphone for {duration} seconds...");
    println!("Speak into your microphone!\n");

    let mut capture = AudioCapture::new()?;
    capture.start()?;
    capture.clear_buffer();

    for i in 0..duration {
        tokio::time::sleep(Duration::from_secs(1)).await;

        let samples = capture.take_buffer();
        let energy = calculate_rms(&samples);
        let peak = samples.iter().map(|s| s.abs()).fold(0.0f32, f32::max);

        // Visual meter
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let meter_len = (energy * 100.0).min(50.0) as usize;
        let meter: String = "█".repeat(meter_len) + &" ".repeat(50 - meter_len);

        println!(
            "[{:2}s] RMS: {:.4} | Peak: {:.4} | [{}]",
            i + 1,
            energy,
            peak,
            meter
        );
    }

    capture.stop();

    println!("\n---");
    println!("If you saw movement in the meter, your mic is working!");
    println!("If RMS stayed near 0, check:");
    println!("  1. Is your mic plugged in?");
    println!("  2. Run: pactl info | grep 'Default Source'");
    println!("  3. Run: arecord -l (to list devices)");

    Ok(())
}

/// Calculate RMS energy
#[allow(clippy::cast_precision_loss)]
fn calculate_rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f32 = samples.iter().map(|s| s * s).sum();
    (sum_squares / samples.len() as f32).sqrt()
}

/// Test speaker output with a sine wave
fn test_speaker() -> anyhow::Result<()> {
    println!("Testing speaker output...");
    println!("You should hear a 440Hz tone for 2 seconds\n");

    let playback = AudioPlayback::new()?;

    let frequency = 440.0_f32;
    let duration_secs = 2.0_f32;
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let num_samples = (PLAYBACK_SAMPLE_RATE as f32 * duration_secs) as usize;

    #[allow(clippy::cast_precision_loss)]
    let samples: Vec<f32> = (0..num_samples)
        .map(|i| {
            let t = i as f32 / PLAYBACK_SAMPLE_RATE as f32;
            (2.0 * std::f32::consts::PI * frequency * t).sin() * 0.3 // 30% volume
        })
        .collect();

    println!("Playing {} samples at {PLAYBACK_SAMPLE_RATE} Hz...", samples.len());

    playback.play_samples_blocking(samples)?;

    println!("\n---");
    println!("If you heard the tone, your speakers are working!");
    println!("If you didn't hear anything, check:");
    println!("  1. Run: pactl info | grep 'Default Sink'");
    println!("  2. Run: pactl list sinks short");

    Ok(())
}

/// Test TTS output
async fn test_tts(text: &str) -> anyhow::Result<()> {
    println!("Testing TTS with text: \"{text}\"\n");

    let config = Config::load_with_options(false);

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

    println!("Synthesizing speech...");
    let mp3_data = tts.synthesize(text).await?;
    println!("Got {} bytes of audio data", mp3_data.len());

    if mp3_data.len() > 3 {
        println!(
            "First 4 bytes: {:02x} {:02x} {:02x} {:02x}",
            mp3_data[0], mp3_data[1], mp3_data[2], mp3_data[3]
        );
    }

    println!("Playing audio...");
    let mut playback = AudioPlayback::new()?;
    playback.play_mp3(&mp3_data)?;

    println!("\n---");
    println!("If you heard the speech, TTS is working!");

    Ok(())
}
