//! # Keyword Matcher Module
//!
//! Resolves free-form message text to at most one knowledge entry by
//! literal substring containment over lowercased input.
//!
//! Resolution is strictly first-match-wins in taxonomy registration order,
//! never longest-match: a short keyword registered before a longer keyword
//! sharing its prefix will shadow it. That trade-off is part of the matching
//! contract and is pinned by tests.
//!
//! Both matchers are pure and total: any input, including empty strings,
//! yields a result without panicking, and identical inputs always yield
//! identical results.

use log::debug;

use crate::knowledge::{KnowledgeBase, KnowledgeEntry, Language, MenuIndex};

/// Outcome of matching free text against the two-level menu taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuMatch<'a> {
    /// A `(language, topic)` pair matched; the stored answer text.
    Answer(&'a str),
    /// A language was mentioned but none of its topics were; the user
    /// should be asked which topic they mean.
    ClarificationNeeded(Language),
    /// Nothing matched.
    NoMatch,
}

/// Match free text against the flat taxonomy.
///
/// Returns the first topic (in registration order) with an alias keyword
/// contained in the lowercased input, together with its entry.
pub fn match_topic<'a>(
    kb: &'a KnowledgeBase,
    input: &str,
) -> Option<(&'a str, &'a KnowledgeEntry)> {
    let text = input.to_lowercase();
    if text.is_empty() {
        return None;
    }
    for slot in kb.slots() {
        if slot.keywords.iter().any(|keyword| text.contains(keyword.as_str())) {
            debug!("Matched topic '{}' in free text", slot.key);
            return Some((slot.key.as_str(), &slot.entry));
        }
    }
    None
}

/// Match free text against the two-level menu taxonomy.
///
/// First pass: the first language whose name occurs in the input restricts
/// the search to that language's topics; a language hit without a topic hit
/// is a [`MenuMatch::ClarificationNeeded`]. Second pass (no language
/// mentioned): all `(language, topic)` pairs are scanned in registration
/// order and the first topic keyword found wins regardless of language.
pub fn match_menu<'a>(index: &'a MenuIndex, input: &str) -> MenuMatch<'a> {
    let text = input.to_lowercase();
    if text.is_empty() {
        return MenuMatch::NoMatch;
    }

    for (language, topics) in index.slots() {
        if text.contains(language.keyword()) {
            for topic in topics {
                if text.contains(topic.keyword.as_str()) {
                    debug!("Matched menu topic '{}' for {language}", topic.label);
                    return MenuMatch::Answer(topic.answer.as_str());
                }
            }
            debug!("Language {language} mentioned without a known topic");
            return MenuMatch::ClarificationNeeded(language);
        }
    }

    for (language, topics) in index.slots() {
        for topic in topics {
            if text.contains(topic.keyword.as_str()) {
                debug!("Matched menu topic '{}' ({language}) without language hint", topic.label);
                return MenuMatch::Answer(topic.answer.as_str());
            }
        }
    }

    MenuMatch::NoMatch
}
