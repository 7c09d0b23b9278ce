//! Runtime settings read from the environment once at startup and injected
//! into handlers through the dispatcher dependency map.

use log::{error, info, warn};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use crate::formatter::DEFAULT_MAX_REPLY_CHARS;
use crate::speech::SpeechEngine;

/// Bot-wide runtime settings.
pub struct Settings {
    /// Maximum reply length in characters before truncation.
    pub max_reply_chars: usize,
    /// Loaded speech engine, if `WHISPER_MODEL_PATH` pointed at a model.
    pub speech: Option<Arc<SpeechEngine>>,
}

impl Settings {
    /// Build settings from the environment.
    ///
    /// A malformed `MAX_REPLY_CHARS` falls back to the default; a missing
    /// or unloadable speech model leaves voice support disabled but never
    /// prevents startup.
    pub fn from_env() -> Self {
        let max_reply_chars = parse_max_reply_chars(env::var("MAX_REPLY_CHARS").ok());

        let speech = env::var("WHISPER_MODEL_PATH").ok().and_then(|path| {
            match SpeechEngine::load(&PathBuf::from(&path)) {
                Ok(engine) => Some(Arc::new(engine)),
                Err(e) => {
                    error!("Failed to load speech model from {path}: {e}");
                    None
                }
            }
        });
        if speech.is_none() {
            info!("No speech model loaded; voice messages get an error reply");
        }

        Self {
            max_reply_chars,
            speech,
        }
    }
}

fn parse_max_reply_chars(raw: Option<String>) -> usize {
    match raw {
        Some(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(
                    "Invalid MAX_REPLY_CHARS value '{raw}', using default {DEFAULT_MAX_REPLY_CHARS}"
                );
                DEFAULT_MAX_REPLY_CHARS
            }
        },
        None => DEFAULT_MAX_REPLY_CHARS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_reply_chars_parsing() {
        assert_eq!(parse_max_reply_chars(None), DEFAULT_MAX_REPLY_CHARS);
        assert_eq!(parse_max_reply_chars(Some("200".to_string())), 200);
        assert_eq!(
            parse_max_reply_chars(Some("huge".to_string())),
            DEFAULT_MAX_REPLY_CHARS
        );
    }
}
