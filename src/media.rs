//! # Media Boundary Module
//!
//! Types crossing the boundary between the media collaborators (OCR,
//! speech recognition, video probing) and the core formatting step.
//!
//! The core only ever sees a [`MediaReport`]: either a successful payload
//! or an already-classified error description. Raw errors never reach the
//! formatter; every failure is classified into user-facing text first.

use std::fmt;

/// A classified media-analysis result, ready for formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaReport {
    /// Text extracted from a photo.
    PhotoText(String),
    /// Transcript of a voice message.
    VoiceTranscript(String),
    /// Duration of a video, in seconds.
    VideoDuration(f64),
    /// A classified, user-facing failure description.
    Error(String),
}

/// Failure modes of the media collaborators.
#[derive(Debug, Clone)]
pub enum MediaError {
    /// Fetching the file from the Bot API failed.
    Download(String),
    /// The image bytes are not a format the OCR engine accepts.
    UnsupportedFormat,
    /// An engine (Tesseract or Whisper) failed to start up.
    Initialization(String),
    /// OCR text extraction failed.
    Extraction(String),
    /// Audio conversion (OGG to PCM) failed.
    Conversion(String),
    /// Speech recognition failed.
    Transcription(String),
    /// No speech model is configured or loadable.
    ModelUnavailable,
    /// Reading the video container metadata failed.
    Probe(String),
}

impl MediaError {
    /// The user-facing Russian description of this failure.
    pub fn classify(&self) -> String {
        match self {
            MediaError::Download(msg) => {
                format!("Ошибка при загрузке файла: {msg}")
            }
            MediaError::UnsupportedFormat => {
                "Неподдерживаемый формат изображения.".to_string()
            }
            MediaError::Initialization(msg) => {
                format!("Ошибка инициализации распознавания: {msg}")
            }
            MediaError::Extraction(msg) => {
                format!("Ошибка при обработке изображения: {msg}")
            }
            MediaError::Conversion(msg) => {
                format!("Ошибка при конвертации аудио: {msg}")
            }
            MediaError::Transcription(msg) => {
                format!("Ошибка при распознавании аудио: {msg}")
            }
            MediaError::ModelUnavailable => {
                "Распознавание речи сейчас недоступно: модель не загружена.".to_string()
            }
            MediaError::Probe(msg) => {
                format!("Ошибка при обработке видео: {msg}")
            }
        }
    }
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::Download(msg) => write!(f, "download error: {msg}"),
            MediaError::UnsupportedFormat => write!(f, "unsupported image format"),
            MediaError::Initialization(msg) => write!(f, "initialization error: {msg}"),
            MediaError::Extraction(msg) => write!(f, "extraction error: {msg}"),
            MediaError::Conversion(msg) => write!(f, "audio conversion error: {msg}"),
            MediaError::Transcription(msg) => write!(f, "transcription error: {msg}"),
            MediaError::ModelUnavailable => write!(f, "speech model unavailable"),
            MediaError::Probe(msg) => write!(f, "probe error: {msg}"),
        }
    }
}

impl std::error::Error for MediaError {}

impl From<MediaError> for MediaReport {
    fn from(err: MediaError) -> Self {
        MediaReport::Error(err.classify())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_classify_into_reports() {
        let report: MediaReport = MediaError::ModelUnavailable.into();
        match report {
            MediaReport::Error(description) => {
                assert!(description.contains("модель не загружена"))
            }
            other => panic!("expected error report, got {other:?}"),
        }
    }

    #[test]
    fn test_classification_keeps_detail() {
        let report: MediaReport = MediaError::Download("timeout".to_string()).into();
        assert_eq!(
            report,
            MediaReport::Error("Ошибка при загрузке файла: timeout".to_string())
        );
    }
}
