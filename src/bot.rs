//! # Bot Handlers Module
//!
//! teloxide message handlers: routing of incoming text through the menu
//! state machine and the keyword matchers, and the download-and-process
//! flows for photo, voice and video messages.

use anyhow::Result;
use log::{error, info};
use std::io::Write;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{FileId, KeyboardButton, KeyboardMarkup};
use tempfile::{NamedTempFile, TempPath};

use crate::config::Settings;
use crate::dialogue::{menu_transition, MenuAction, MenuDialogue, MenuState};
use crate::formatter::{format_media_result, render_entry, truncate_reply};
use crate::knowledge::{KnowledgeBase, MenuIndex};
use crate::matcher::{match_menu, match_topic, MenuMatch};
use crate::media::{MediaError, MediaReport};
use crate::{ocr, replies, video};

/// Build a reply keyboard from button labels, two buttons per row.
fn reply_keyboard(labels: &[&str]) -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = labels
        .chunks(2)
        .map(|row| row.iter().map(|label| KeyboardButton::new(label.to_string())).collect())
        .collect();
    KeyboardMarkup::new(rows).resize_keyboard()
}

async fn send_text(bot: &Bot, chat_id: ChatId, text: &str) -> Result<()> {
    bot.send_message(chat_id, text).await?;
    Ok(())
}

async fn send_with_keyboard(
    bot: &Bot,
    chat_id: ChatId,
    text: &str,
    labels: &[&str],
) -> Result<()> {
    bot.send_message(chat_id, text)
        .reply_markup(reply_keyboard(labels))
        .await?;
    Ok(())
}

/// Download a Telegram file into a temp file.
///
/// The returned [`TempPath`] deletes the file when dropped, so cleanup is
/// guaranteed on every exit path of the caller.
async fn download_to_temp(bot: &Bot, file_id: FileId) -> Result<TempPath, MediaError> {
    let file = bot
        .get_file(file_id)
        .await
        .map_err(|e| MediaError::Download(e.to_string()))?;
    let url = format!(
        "https://api.telegram.org/file/bot{}/{}",
        bot.token(),
        file.path
    );

    let response = reqwest::get(&url)
        .await
        .map_err(|e| MediaError::Download(e.to_string()))?;
    let bytes = response
        .bytes()
        .await
        .map_err(|e| MediaError::Download(e.to_string()))?;

    let mut temp_file =
        NamedTempFile::new().map_err(|e| MediaError::Download(e.to_string()))?;
    temp_file
        .as_file_mut()
        .write_all(&bytes)
        .map_err(|e| MediaError::Download(e.to_string()))?;

    Ok(temp_file.into_temp_path())
}

/// Entry point for every incoming message.
pub async fn message_handler(
    bot: Bot,
    msg: Message,
    dialogue: MenuDialogue,
    kb: Arc<KnowledgeBase>,
    index: Arc<MenuIndex>,
    settings: Arc<Settings>,
) -> Result<()> {
    if msg.text().is_some() {
        handle_text_message(&bot, &msg, &dialogue, &kb, &index, &settings).await
    } else if msg.photo().is_some() {
        handle_photo_message(&bot, &msg).await
    } else if msg.voice().is_some() {
        handle_voice_message(&bot, &msg, &settings).await
    } else if msg.video().is_some() {
        handle_video_message(&bot, &msg).await
    } else {
        Ok(())
    }
}

async fn handle_text_message(
    bot: &Bot,
    msg: &Message,
    dialogue: &MenuDialogue,
    kb: &KnowledgeBase,
    index: &MenuIndex,
    settings: &Settings,
) -> Result<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let chat_id = msg.chat.id;
    info!("Received text message from user {chat_id}: {text}");

    if text == "/start" {
        dialogue.update(MenuState::Root).await?;
        let languages: Vec<&str> = index.languages().map(|language| language.as_str()).collect();
        return send_with_keyboard(bot, chat_id, replies::GREETING, &languages).await;
    }

    let state = dialogue.get().await?.unwrap_or_default();
    match menu_transition(index, &state, text) {
        MenuAction::ShowTopics(language) => {
            dialogue
                .update(MenuState::LanguageSelected { language })
                .await?;
            let topics = index.topics(language);
            send_with_keyboard(bot, chat_id, &replies::choose_topic(language), &topics).await
        }
        MenuAction::ShowAnswer(answer) => {
            dialogue.update(MenuState::Root).await?;
            send_text(bot, chat_id, &truncate_reply(answer, settings.max_reply_chars)).await
        }
        MenuAction::FallThrough => {
            handle_free_text(bot, chat_id, kb, index, settings, text).await
        }
    }
}

/// Free-text resolution: flat taxonomy first (it carries the richer
/// snippet replies), then the two-level taxonomy, then the fallback.
async fn handle_free_text(
    bot: &Bot,
    chat_id: ChatId,
    kb: &KnowledgeBase,
    index: &MenuIndex,
    settings: &Settings,
    text: &str,
) -> Result<()> {
    if let Some((topic, entry)) = match_topic(kb, text) {
        info!("Resolved text from user {chat_id} to topic '{topic}'");
        return send_text(bot, chat_id, &render_entry(entry, settings.max_reply_chars)).await;
    }

    match match_menu(index, text) {
        MenuMatch::Answer(answer) => {
            send_text(bot, chat_id, &truncate_reply(answer, settings.max_reply_chars)).await
        }
        MenuMatch::ClarificationNeeded(language) => {
            info!("Asking user {chat_id} to clarify their {language} question");
            send_text(bot, chat_id, &replies::clarification(language)).await
        }
        MenuMatch::NoMatch => {
            info!("No knowledge entry matched for user {chat_id}");
            send_text(bot, chat_id, replies::FALLBACK).await
        }
    }
}

async fn handle_photo_message(bot: &Bot, msg: &Message) -> Result<()> {
    let chat_id = msg.chat.id;
    let Some(largest_photo) = msg.photo().and_then(|photos| photos.last()) else {
        return Ok(());
    };
    info!("Received photo from user {chat_id}");

    let temp_path = match download_to_temp(bot, largest_photo.file.id.clone()).await {
        Ok(temp_path) => temp_path,
        Err(e) => {
            error!("Failed to download photo for user {chat_id}: {e}");
            return send_text(bot, chat_id, &format_media_result(&e.into())).await;
        }
    };
    let image_path = temp_path.to_string_lossy().to_string();

    if !ocr::is_supported_image_format(&image_path) {
        info!("Unsupported image format from user {chat_id}");
        let report: MediaReport = MediaError::UnsupportedFormat.into();
        return send_text(bot, chat_id, &format_media_result(&report)).await;
    }

    let extraction = tokio::task::spawn_blocking(move || {
        ocr::extract_text_from_image(&image_path)
    })
    .await?;

    match extraction {
        Ok(text) if text.is_empty() => {
            info!("No text found in photo from user {chat_id}");
            send_text(bot, chat_id, replies::NO_TEXT_ON_PHOTO).await
        }
        Ok(text) => {
            info!(
                "Extracted {} characters from photo of user {chat_id}",
                text.chars().count()
            );
            send_text(bot, chat_id, &format_media_result(&MediaReport::PhotoText(text))).await
        }
        Err(e) => {
            error!("OCR processing failed for user {chat_id}: {e}");
            send_text(bot, chat_id, &format_media_result(&e.into())).await
        }
    }
    // temp_path dropped here, removing the downloaded file
}

async fn handle_voice_message(bot: &Bot, msg: &Message, settings: &Settings) -> Result<()> {
    let chat_id = msg.chat.id;
    let Some(voice) = msg.voice() else {
        return Ok(());
    };
    info!("Received voice message from user {chat_id}");

    let Some(engine) = settings.speech.clone() else {
        let report: MediaReport = MediaError::ModelUnavailable.into();
        return send_text(bot, chat_id, &format_media_result(&report)).await;
    };

    let temp_path = match download_to_temp(bot, voice.file.id.clone()).await {
        Ok(temp_path) => temp_path,
        Err(e) => {
            error!("Failed to download voice file for user {chat_id}: {e}");
            return send_text(bot, chat_id, &format_media_result(&e.into())).await;
        }
    };
    let voice_path = temp_path.to_string_lossy().to_string();

    let transcription =
        tokio::task::spawn_blocking(move || engine.transcribe(&voice_path)).await?;

    match transcription {
        Ok(text) => {
            info!("Transcribed voice message from user {chat_id}");
            send_text(
                bot,
                chat_id,
                &format_media_result(&MediaReport::VoiceTranscript(text)),
            )
            .await
        }
        Err(e) => {
            error!("Voice transcription failed for user {chat_id}: {e}");
            send_text(bot, chat_id, &format_media_result(&e.into())).await
        }
    }
}

async fn handle_video_message(bot: &Bot, msg: &Message) -> Result<()> {
    let chat_id = msg.chat.id;
    let Some(video) = msg.video() else {
        return Ok(());
    };
    info!("Received video from user {chat_id}");

    let temp_path = match download_to_temp(bot, video.file.id.clone()).await {
        Ok(temp_path) => temp_path,
        Err(e) => {
            error!("Failed to download video for user {chat_id}: {e}");
            return send_text(bot, chat_id, &format_media_result(&e.into())).await;
        }
    };
    let video_path = temp_path.to_string_lossy().to_string();

    let probe = tokio::task::spawn_blocking(move || video::probe_duration(&video_path)).await?;

    match probe {
        Ok(duration) => {
            send_text(
                bot,
                chat_id,
                &format_media_result(&MediaReport::VideoDuration(duration)),
            )
            .await
        }
        Err(e) => {
            error!("Video probing failed for user {chat_id}: {e}");
            send_text(bot, chat_id, &format_media_result(&e.into())).await
        }
    }
}
