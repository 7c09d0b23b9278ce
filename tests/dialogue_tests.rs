use anyhow::Result;

use codetutor::dialogue::{menu_transition, MenuAction, MenuState};
use codetutor::knowledge::{default_menu_index, Language};

/// Root → LanguageSelected on an exact language button press.
#[tokio::test]
async fn test_root_to_language_selected_transition() -> Result<()> {
    let index = default_menu_index()?;

    assert_eq!(
        menu_transition(&index, &MenuState::Root, "Python"),
        MenuAction::ShowTopics(Language::Python)
    );

    // The offered topic buttons are the language's topics in order.
    assert_eq!(
        index.topics(Language::Python),
        vec!["О языке", "Списки", "Декораторы"]
    );

    Ok(())
}

/// LanguageSelected → answer on an exact topic button press; unrecognized
/// input falls through to the free-text flow instead of erroring.
#[tokio::test]
async fn test_language_selected_transitions() -> Result<()> {
    let index = default_menu_index()?;
    let selected = MenuState::LanguageSelected {
        language: Language::Python,
    };

    match menu_transition(&index, &selected, "Декораторы") {
        MenuAction::ShowAnswer(answer) => {
            assert_eq!(
                answer,
                "Декораторы — это функции, изменяющие поведение других функций."
            );
        }
        other => panic!("expected answer, got {other:?}"),
    }

    assert_eq!(
        menu_transition(&index, &selected, "расскажи что-нибудь"),
        MenuAction::FallThrough
    );

    Ok(())
}

/// Menu state survives the serialization round-trip required by the
/// dialogue storage.
#[tokio::test]
async fn test_menu_state_serialization() -> Result<()> {
    let state = MenuState::LanguageSelected {
        language: Language::Kotlin,
    };

    let encoded = serde_json::to_string(&state)?;
    let decoded: MenuState = serde_json::from_str(&encoded)?;
    assert_eq!(decoded, state);

    let root: MenuState = serde_json::from_str(&serde_json::to_string(&MenuState::Root)?)?;
    assert_eq!(root, MenuState::Root);

    Ok(())
}
