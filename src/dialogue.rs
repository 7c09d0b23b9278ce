//! Guided-menu dialogue module: per-conversation state for the two-step
//! language → topic navigation.
//!
//! The state machine itself is a pure function ([`menu_transition`]); the
//! transport holds the current state per chat in teloxide's in-memory
//! dialogue storage.

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

use crate::knowledge::{Language, MenuIndex};

/// Conversation state for the guided menu.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuState {
    /// The root menu: language buttons are offered.
    #[default]
    Root,
    /// A language was picked: its topic buttons are offered.
    LanguageSelected { language: Language },
}

/// Type alias for the guided-menu dialogue.
pub type MenuDialogue = Dialogue<MenuState, InMemStorage<MenuState>>;

/// What the bot should do with a text message, given the menu state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction<'a> {
    /// Enter `LanguageSelected` and show that language's topic keyboard.
    ShowTopics(Language),
    /// Send this answer verbatim and return to `Root`.
    ShowAnswer(&'a str),
    /// Not a menu interaction; hand the text to the free-text matchers.
    FallThrough,
}

/// Resolve a text message against the menu state machine.
///
/// Transitions fire only on exact, case-sensitive equality with a button
/// label. A language tag is accepted in any state (picking another language
/// from the keyboard always works); a topic label is accepted only while
/// its language is selected. Everything else falls through to the free-text
/// flow — unrecognized input is never a menu error.
pub fn menu_transition<'a>(
    index: &'a MenuIndex,
    state: &MenuState,
    input: &str,
) -> MenuAction<'a> {
    if let Some(language) = Language::from_exact(input) {
        return MenuAction::ShowTopics(language);
    }
    if let MenuState::LanguageSelected { language } = state {
        if let Some(answer) = index.answer(*language, input) {
            return MenuAction::ShowAnswer(answer);
        }
    }
    MenuAction::FallThrough
}
