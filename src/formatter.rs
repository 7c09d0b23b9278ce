//! # Response Formatter Module
//!
//! Pure string assembly for outgoing replies: rendering a knowledge entry
//! with its per-language snippets, bounding reply length, and templating
//! classified media-analysis results.

use crate::knowledge::{KnowledgeEntry, Language};
use crate::media::MediaReport;

/// Default reply length bound, overridable via `MAX_REPLY_CHARS`.
pub const DEFAULT_MAX_REPLY_CHARS: usize = 500;

/// The single-character truncation marker appended to over-long replies.
pub const ELLIPSIS: char = '…';

/// Bound a reply to `max_chars` characters.
///
/// Counts characters, not bytes: replies are mostly Cyrillic and the limit
/// is a visible-length limit. Text within the limit is returned unchanged;
/// anything longer becomes its first `max_chars` characters followed by a
/// single [`ELLIPSIS`], `max_chars + 1` characters in total.
pub fn truncate_reply(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars).collect();
    truncated.push(ELLIPSIS);
    truncated
}

/// Render a flat-taxonomy entry: description, then one snippet line per
/// language in the fixed Python, Java, Kotlin order, bounded by
/// [`truncate_reply`].
pub fn render_entry(entry: &KnowledgeEntry, max_chars: usize) -> String {
    let mut reply = entry.description.clone();
    reply.push_str("\n\n");
    for (i, language) in Language::ALL.iter().enumerate() {
        if i > 0 {
            reply.push('\n');
        }
        reply.push_str(language.as_str());
        reply.push_str(": ");
        reply.push_str(entry.snippet(*language).unwrap_or(""));
    }
    truncate_reply(&reply, max_chars)
}

/// Render a classified media-analysis result into its reply text.
///
/// One fixed template per kind; the payload is already classified by the
/// media collaborator, so no error inspection happens here.
pub fn format_media_result(report: &MediaReport) -> String {
    match report {
        MediaReport::PhotoText(text) => {
            format!("🖼️ Текст на изображении:\n\n{text}")
        }
        MediaReport::VoiceTranscript(text) => {
            format!("🎙️ Распознанная речь:\n{text}")
        }
        MediaReport::VideoDuration(seconds) => {
            format!("🎞️ Видео получено!\nДлительность: {seconds:.2} сек.")
        }
        MediaReport::Error(description) => {
            format!("⚠️ {description}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::default_knowledge_base;

    #[test]
    fn test_short_text_is_untouched() {
        assert_eq!(truncate_reply("привет", 500), "привет");
        assert_eq!(truncate_reply("", 500), "");
    }

    #[test]
    fn test_truncation_length_and_prefix() {
        let text = "а".repeat(600);
        let truncated = truncate_reply(&text, 500);
        assert_eq!(truncated.chars().count(), 501);
        assert!(truncated.ends_with(ELLIPSIS));
        let prefix: String = truncated.chars().take(500).collect();
        assert!(text.starts_with(&prefix));
    }

    #[test]
    fn test_truncation_at_exact_limit() {
        let text = "б".repeat(500);
        assert_eq!(truncate_reply(&text, 500), text);
        let over = "б".repeat(501);
        assert_eq!(truncate_reply(&over, 500).chars().count(), 501);
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        // Cyrillic characters are two bytes each; a byte-based cut would
        // fire here even though the text is within the character limit.
        let text = "ы".repeat(400);
        assert_eq!(truncate_reply(&text, 500), text);
    }

    #[test]
    fn test_render_entry_language_order() {
        let kb = default_knowledge_base().unwrap();
        let entry = kb.lookup_topic("циклы").unwrap();
        let reply = render_entry(entry, DEFAULT_MAX_REPLY_CHARS);

        assert!(reply.starts_with("Повторение действий.\n\n"));
        let python_at = reply.find("Python: ").unwrap();
        let java_at = reply.find("Java: ").unwrap();
        let kotlin_at = reply.find("Kotlin: ").unwrap();
        assert!(python_at < java_at && java_at < kotlin_at);
    }

    #[test]
    fn test_render_entry_respects_limit() {
        let kb = default_knowledge_base().unwrap();
        let entry = kb.lookup_topic("классы").unwrap();
        let reply = render_entry(entry, 40);
        assert_eq!(reply.chars().count(), 41);
        assert!(reply.ends_with(ELLIPSIS));
    }

    #[test]
    fn test_media_templates() {
        assert_eq!(
            format_media_result(&MediaReport::PhotoText("hello".to_string())),
            "🖼️ Текст на изображении:\n\nhello"
        );
        assert_eq!(
            format_media_result(&MediaReport::VoiceTranscript("привет".to_string())),
            "🎙️ Распознанная речь:\nпривет"
        );
        assert_eq!(
            format_media_result(&MediaReport::VideoDuration(12.5)),
            "🎞️ Видео получено!\nДлительность: 12.50 сек."
        );
        assert_eq!(
            format_media_result(&MediaReport::Error("что-то пошло не так".to_string())),
            "⚠️ что-то пошло не так"
        );
    }
}
