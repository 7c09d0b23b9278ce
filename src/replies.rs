//! Fixed user-facing reply strings.
//!
//! The bot speaks Russian only; every surface string lives here so handler
//! code stays free of literals and tests can assert exact replies.

use crate::knowledge::Language;

/// Greeting sent on `/start`, followed by the language keyboard.
pub const GREETING: &str = "👋 Привет! Я учебный бот.\n\n\
    Я умею:\n\
    💬 Отвечать на вопросы по Python, Java и Kotlin\n\
    🖼️ Читать текст с изображений\n\
    🎙️ Распознавать голосовые сообщения\n\
    🎞️ Узнавать длительность видео\n\n\
    Выбери язык для изучения с помощью кнопки ниже:";

/// Fallback when nothing in either taxonomy matched.
pub const FALLBACK: &str =
    "🤔 Не понял вопрос. Попробуй уточнить, например: 'списки в Python'.";

/// Sent when OCR finished but found no text on the photo.
pub const NO_TEXT_ON_PHOTO: &str = "😕 Не удалось распознать текст на фото.";

/// Prompt shown with a language's topic keyboard.
pub fn choose_topic(language: Language) -> String {
    format!("Выбери тему по {language}:")
}

/// Prompt when a language was recognized but no topic was.
pub fn clarification(language: Language) -> String {
    format!("🧠 Что именно ты хочешь узнать о {language}?")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_name_the_language() {
        assert_eq!(choose_topic(Language::Kotlin), "Выбери тему по Kotlin:");
        assert_eq!(
            clarification(Language::Python),
            "🧠 Что именно ты хочешь узнать о Python?"
        );
    }

    #[test]
    fn test_greeting_mentions_all_capabilities() {
        assert!(GREETING.contains("Python, Java и Kotlin"));
        assert!(GREETING.contains("изображений"));
        assert!(GREETING.contains("голосовые"));
        assert!(GREETING.contains("видео"));
    }
}
