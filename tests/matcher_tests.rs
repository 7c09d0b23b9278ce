#[cfg(test)]
mod tests {
    use codetutor::knowledge::{
        default_knowledge_base, default_menu_index, KnowledgeBase, KnowledgeEntry, Language,
    };
    use codetutor::matcher::{match_menu, match_topic, MenuMatch};

    #[test]
    fn test_reflexivity_over_all_default_topics() {
        // Every registered topic key, fed back as input, resolves to its
        // own entry.
        let kb = default_knowledge_base().unwrap();
        let topics: Vec<String> = kb.all_topics().map(str::to_string).collect();
        assert_eq!(topics.len(), 10);
        for topic in &topics {
            let (key, entry) = match_topic(&kb, topic).expect("topic should match itself");
            assert_eq!(key, topic);
            assert_eq!(Some(entry), kb.lookup_topic(topic));
        }
    }

    #[test]
    fn test_unregistered_text_never_matches() {
        let kb = default_knowledge_base().unwrap();
        for input in ["", "xyz", "привет", "расскажи анекдот", "rust traits"] {
            assert!(match_topic(&kb, input).is_none(), "matched: {input}");
        }
    }

    #[test]
    fn test_first_match_wins_is_order_based_not_length_based() {
        let mut kb = KnowledgeBase::new();
        kb.insert("класс", KnowledgeEntry::new("короткий ключ", "p", "j", "k"))
            .unwrap();
        kb.insert("классы", KnowledgeEntry::new("длинный ключ", "p", "j", "k"))
            .unwrap();

        // Input contains both keys; the one registered first wins even
        // though the longer key is the more specific match.
        let (key, entry) = match_topic(&kb, "расскажи про классы").unwrap();
        assert_eq!(key, "класс");
        assert_eq!(entry.description, "короткий ключ");
    }

    #[test]
    fn test_matching_is_pure_and_idempotent() {
        let kb = default_knowledge_base().unwrap();
        let index = default_menu_index().unwrap();
        for _ in 0..3 {
            let flat = match_topic(&kb, "циклы в паскале").map(|(key, _)| key.to_string());
            assert_eq!(flat.as_deref(), Some("циклы"));
            assert_eq!(
                match_menu(&index, "хочу учить Java"),
                MenuMatch::ClarificationNeeded(Language::Java)
            );
        }
    }

    #[test]
    fn test_menu_first_pass_restricts_to_the_mentioned_language() {
        let index = default_menu_index().unwrap();

        // Language and topic in one message resolve directly.
        match match_menu(&index, "о языке kotlin") {
            MenuMatch::Answer(answer) => assert!(answer.contains("Kotlin")),
            other => panic!("expected answer, got {other:?}"),
        }

        // Language mentioned with a topic belonging to another language:
        // the search stays inside the mentioned language.
        assert_eq!(
            match_menu(&index, "расскажи про null safety в java"),
            MenuMatch::ClarificationNeeded(Language::Java)
        );
    }

    #[test]
    fn test_menu_second_pass_scans_all_languages() {
        let index = default_menu_index().unwrap();
        match match_menu(&index, "что такое null safety?") {
            MenuMatch::Answer(answer) => assert!(answer.contains("NullPointerException")),
            other => panic!("expected answer, got {other:?}"),
        }
    }

    #[test]
    fn test_menu_no_match_for_unrelated_text() {
        let index = default_menu_index().unwrap();
        assert_eq!(match_menu(&index, "сколько времени?"), MenuMatch::NoMatch);
        assert_eq!(match_menu(&index, ""), MenuMatch::NoMatch);
    }
}
