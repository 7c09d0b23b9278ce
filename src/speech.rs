//! # Speech Recognition Module
//!
//! Voice-message transcription: an `ffmpeg` subprocess converts Telegram's
//! OGG Opus audio to 16 kHz mono PCM, which a locally loaded Whisper model
//! turns into Russian text.
//!
//! The engine is loaded once at startup from `WHISPER_MODEL_PATH` and
//! shared across handlers. Without a model the bot still runs; voice
//! messages then get a classified [`MediaError::ModelUnavailable`] reply.

use log::{debug, info};
use std::path::Path;
use std::process::{Command, Stdio};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::media::MediaError;

/// Whisper sample rate expected by the model.
const SAMPLE_RATE: &str = "16000";

/// Whisper transcription engine, shareable across handler tasks.
pub struct SpeechEngine {
    ctx: WhisperContext,
}

impl std::fmt::Debug for SpeechEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechEngine").finish_non_exhaustive()
    }
}

impl SpeechEngine {
    /// Load a Whisper model from a `.bin` file.
    pub fn load(model_path: &Path) -> Result<Self, MediaError> {
        info!("Loading Whisper model from {}", model_path.display());

        if !model_path.exists() {
            return Err(MediaError::Initialization(format!(
                "model file not found: {}",
                model_path.display()
            )));
        }

        let path = model_path
            .to_str()
            .ok_or_else(|| MediaError::Initialization("invalid model path".to_string()))?;
        let ctx = WhisperContext::new_with_params(path, WhisperContextParameters::default())
            .map_err(|e| MediaError::Initialization(format!("failed to load model: {e}")))?;

        info!("Whisper model loaded successfully");
        Ok(Self { ctx })
    }

    /// Transcribe an OGG Opus voice file to Russian text.
    pub fn transcribe(&self, ogg_path: &str) -> Result<String, MediaError> {
        let pcm_data = convert_ogg_to_pcm(ogg_path)?;
        debug!("Converted voice file to {} PCM samples", pcm_data.len());

        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| MediaError::Transcription(format!("failed to create state: {e}")))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(Some("ru"));
        params.set_translate(false);
        params.set_no_timestamps(true);
        params.set_single_segment(false);

        state
            .full(params, &pcm_data)
            .map_err(|e| MediaError::Transcription(format!("recognition failed: {e}")))?;

        let mut text = String::new();
        for segment in state.as_iter() {
            if let Ok(piece) = segment.to_str() {
                text.push_str(piece);
                text.push(' ');
            }
        }

        let text = text.trim().to_string();
        info!("Transcribed {} characters of speech", text.chars().count());
        Ok(text)
    }
}

/// Convert an OGG Opus file to 16 kHz mono f32 PCM samples via ffmpeg.
fn convert_ogg_to_pcm(ogg_path: &str) -> Result<Vec<f32>, MediaError> {
    let output = Command::new("ffmpeg")
        .args([
            "-i",
            ogg_path,
            "-ar",
            SAMPLE_RATE,
            "-ac",
            "1", // mono
            "-f",
            "s16le", // 16-bit signed little-endian PCM
            "-acodec",
            "pcm_s16le",
            "-y",
            "pipe:1",
        ])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| MediaError::Conversion(format!("failed to run ffmpeg: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(MediaError::Conversion(format!(
            "ffmpeg failed: {}",
            stderr.trim()
        )));
    }

    let samples = output
        .stdout
        .chunks_exact(2)
        .map(|bytes| i16::from_le_bytes([bytes[0], bytes[1]]) as f32 / 32768.0)
        .collect();

    Ok(samples)
}
