//! # Codetutor Telegram Bot
//!
//! A Telegram bot that answers programming-education questions about
//! Python, Java and Kotlin by keyword lookup over a built-in knowledge
//! base, offers a guided two-step menu over reply keyboards, and performs
//! light media analysis: text extraction from photos, voice transcription
//! and video duration probing.

pub mod bot;
pub mod config;
pub mod dialogue;
pub mod formatter;
pub mod knowledge;
pub mod matcher;
pub mod media;
pub mod ocr;
pub mod replies;
pub mod speech;
pub mod video;
