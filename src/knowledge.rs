//! # Knowledge Base Module
//!
//! This module holds the bot's two knowledge taxonomies:
//!
//! - A flat taxonomy ([`KnowledgeBase`]) keyed by topic, where each entry
//!   carries a description plus one code snippet per language.
//! - A two-level taxonomy ([`MenuIndex`]) keyed by `(language, topic)`,
//!   used by the guided reply-keyboard flow.
//!
//! Both are built once at process start, never mutated afterwards, and are
//! freely shareable across handler tasks.

use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of programming languages the bot teaches.
///
/// The declaration order of [`Language::ALL`] is also the order snippets are
/// rendered in replies and languages are offered as menu buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Python,
    Java,
    Kotlin,
}

impl Language {
    /// All languages in their fixed presentation order.
    pub const ALL: [Language; 3] = [Language::Python, Language::Java, Language::Kotlin];

    /// Canonical capitalized tag, as shown on menu buttons.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::Java => "Java",
            Language::Kotlin => "Kotlin",
        }
    }

    /// Lowercase form used for free-text containment matching.
    pub fn keyword(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Java => "java",
            Language::Kotlin => "kotlin",
        }
    }

    /// Resolve an exact, case-sensitive language tag (menu button press).
    pub fn from_exact(text: &str) -> Option<Language> {
        Language::ALL.iter().copied().find(|lang| lang.as_str() == text)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors detected while assembling a knowledge taxonomy at startup.
///
/// These are fatal: a malformed dataset aborts the process before it starts
/// accepting traffic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The same normalized topic key was registered twice.
    DuplicateTopic(String),
    /// The same topic label was registered twice under one language.
    DuplicateMenuTopic { language: Language, topic: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::DuplicateTopic(key) => {
                write!(f, "duplicate topic key in knowledge base: {key}")
            }
            ConfigError::DuplicateMenuTopic { language, topic } => {
                write!(f, "duplicate menu topic for {language}: {topic}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// One flat-taxonomy entry: a description and a snippet per language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeEntry {
    /// Human-readable description of the topic.
    pub description: String,
    snippets: Vec<(Language, String)>,
}

impl KnowledgeEntry {
    /// Build an entry with one snippet per language, in presentation order.
    pub fn new(description: &str, python: &str, java: &str, kotlin: &str) -> Self {
        Self {
            description: description.to_string(),
            snippets: vec![
                (Language::Python, python.to_string()),
                (Language::Java, java.to_string()),
                (Language::Kotlin, kotlin.to_string()),
            ],
        }
    }

    /// The code snippet for one language, if present.
    pub fn snippet(&self, language: Language) -> Option<&str> {
        self.snippets
            .iter()
            .find(|(lang, _)| *lang == language)
            .map(|(_, code)| code.as_str())
    }
}

/// One registered topic: normalized key, its alias keywords, and the entry.
///
/// Keys may carry `/`-separated aliases (`"списки/массивы"`); each segment
/// is a keyword the matcher tries against incoming text.
#[derive(Debug, Clone)]
pub(crate) struct TopicSlot {
    pub(crate) key: String,
    pub(crate) keywords: Vec<String>,
    pub(crate) entry: KnowledgeEntry,
}

/// The flat topic → entry taxonomy, insertion-ordered.
///
/// Iteration order is the registration order; the matcher depends on it for
/// its first-match-wins semantics, so it must stay deterministic.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    slots: Vec<TopicSlot>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a topic. The key is normalized to lowercase; a duplicate
    /// normalized key is a [`ConfigError`].
    pub fn insert(&mut self, key: &str, entry: KnowledgeEntry) -> Result<(), ConfigError> {
        let normalized = key.to_lowercase();
        if self.slots.iter().any(|slot| slot.key == normalized) {
            return Err(ConfigError::DuplicateTopic(normalized));
        }
        let keywords = normalized
            .split('/')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();
        self.slots.push(TopicSlot {
            key: normalized,
            keywords,
            entry,
        });
        Ok(())
    }

    /// Case-insensitive lookup by exact topic key.
    pub fn lookup_topic(&self, key: &str) -> Option<&KnowledgeEntry> {
        let normalized = key.to_lowercase();
        self.slots
            .iter()
            .find(|slot| slot.key == normalized)
            .map(|slot| &slot.entry)
    }

    /// All topic keys in registration order.
    pub fn all_topics(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub(crate) fn slots(&self) -> impl Iterator<Item = &TopicSlot> {
        self.slots.iter()
    }
}

/// One guided-menu topic: the button label, its lowercase matching keyword,
/// and the answer text.
#[derive(Debug, Clone)]
pub(crate) struct MenuTopic {
    pub(crate) label: String,
    pub(crate) keyword: String,
    pub(crate) answer: String,
}

/// The two-level language → topic → answer taxonomy.
///
/// Every language of the closed set is present; topics within a language
/// keep their registration order, which drives both button layout and the
/// free-text matcher's scan order.
#[derive(Debug, Clone)]
pub struct MenuIndex {
    languages: Vec<(Language, Vec<MenuTopic>)>,
}

impl Default for MenuIndex {
    fn default() -> Self {
        Self {
            languages: Language::ALL.iter().map(|lang| (*lang, Vec::new())).collect(),
        }
    }
}

impl MenuIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a topic under a language. Duplicate labels (compared
    /// case-insensitively) within one language are a [`ConfigError`].
    pub fn insert(
        &mut self,
        language: Language,
        label: &str,
        answer: &str,
    ) -> Result<(), ConfigError> {
        let keyword = label.to_lowercase();
        let position = match self
            .languages
            .iter()
            .position(|(lang, _)| *lang == language)
        {
            Some(position) => position,
            None => {
                self.languages.push((language, Vec::new()));
                self.languages.len() - 1
            }
        };
        let topics = &mut self.languages[position].1;
        if topics.iter().any(|topic| topic.keyword == keyword) {
            return Err(ConfigError::DuplicateMenuTopic {
                language,
                topic: label.to_string(),
            });
        }
        topics.push(MenuTopic {
            label: label.to_string(),
            keyword,
            answer: answer.to_string(),
        });
        Ok(())
    }

    /// Languages in presentation order (the root menu buttons).
    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.languages.iter().map(|(lang, _)| *lang)
    }

    /// Topic button labels for one language, in registration order.
    pub fn topics(&self, language: Language) -> Vec<&str> {
        self.languages
            .iter()
            .find(|(lang, _)| *lang == language)
            .map(|(_, topics)| topics.iter().map(|topic| topic.label.as_str()).collect())
            .unwrap_or_default()
    }

    /// Exact, case-sensitive answer lookup (menu button press).
    pub fn answer(&self, language: Language, label: &str) -> Option<&str> {
        self.languages
            .iter()
            .find(|(lang, _)| *lang == language)
            .and_then(|(_, topics)| topics.iter().find(|topic| topic.label == label))
            .map(|topic| topic.answer.as_str())
    }

    pub(crate) fn slots(&self) -> impl Iterator<Item = (Language, &[MenuTopic])> {
        self.languages
            .iter()
            .map(|(lang, topics)| (*lang, topics.as_slice()))
    }
}

/// Build the default flat taxonomy (topic → description + snippets).
pub fn default_knowledge_base() -> Result<KnowledgeBase, ConfigError> {
    let mut kb = KnowledgeBase::new();

    kb.insert(
        "списки/массивы",
        KnowledgeEntry::new(
            "Коллекции элементов, упорядоченные и индексируемые.",
            "my_list = [1, 2, 3]",
            "int[] arr = {1, 2, 3};",
            "val list = listOf(1, 2, 3)",
        ),
    )?;
    kb.insert(
        "функции/методы",
        KnowledgeEntry::new(
            "Блоки кода, выполняющие определённую задачу.",
            "def greet(name):\n    return f'Hello, {name}'",
            "public String greet(String name) {\n    return \"Hello, \" + name;\n}",
            "fun greet(name: String) = \"Hello, $name\"",
        ),
    )?;
    kb.insert(
        "классы",
        KnowledgeEntry::new(
            "Шаблон для создания объектов с атрибутами и методами.",
            "class Car:\n    def __init__(self, model):\n        self.model = model",
            "public class Car {\n    private String model;\n    public Car(String model) { this.model = model; }\n}",
            "class Car(val model: String)",
        ),
    )?;
    kb.insert(
        "наследование/интерфейсы",
        KnowledgeEntry::new(
            "Создание подклассов и реализация контрактов.",
            "class ElectricCar(Car):\n    pass",
            "class ElectricCar extends Car implements Vehicle {}",
            "class ElectricCar: Car(), Vehicle",
        ),
    )?;
    kb.insert(
        "исключения",
        KnowledgeEntry::new(
            "Обработка ошибок во время выполнения программы.",
            "try:\n    1/0\nexcept ZeroDivisionError:\n    print('Ошибка')",
            "try {\n    int a = 1/0;\n} catch (ArithmeticException e) {\n    System.out.println(\"Ошибка\");\n}",
            "try {\n    val a = 1/0\n} catch (e: ArithmeticException) {\n    println(\"Ошибка\")\n}",
        ),
    )?;
    kb.insert(
        "циклы",
        KnowledgeEntry::new(
            "Повторение действий.",
            "for i in range(5):\n    print(i)",
            "for(int i=0; i<5; i++) {\n    System.out.println(i);\n}",
            "for(i in 0..4) {\n    println(i)\n}",
        ),
    )?;
    kb.insert(
        "словари/Map",
        KnowledgeEntry::new(
            "Коллекции ключ-значение.",
            "my_dict = {'a':1, 'b':2}",
            "Map<String,Integer> map = new HashMap<>(); map.put(\"a\",1);",
            "val map = mapOf(\"a\" to 1, \"b\" to 2)",
        ),
    )?;
    kb.insert(
        "лямбда/функциональные объекты",
        KnowledgeEntry::new(
            "Короткие функции, которые можно передавать как объекты.",
            "squared = lambda x: x**2",
            "Function<Integer,Integer> squared = x -> x*x;",
            "val squared: (Int) -> Int = { x -> x*x }",
        ),
    )?;
    kb.insert(
        "декораторы/аннотации",
        KnowledgeEntry::new(
            "Изменяют поведение функций/классов.",
            "@staticmethod\ndef hello():\n    pass",
            "@Override\npublic String toString() { return \"\"; }",
            "@Deprecated(\"Use newFunc\")\nfun oldFunc() {}",
        ),
    )?;
    kb.insert(
        "корутины/async",
        KnowledgeEntry::new(
            "Асинхронное выполнение задач.",
            "import asyncio\nasync def main():\n    await asyncio.sleep(1)",
            "CompletableFuture.runAsync(() -> doSomething());",
            "GlobalScope.launch {\n    delay(1000)\n}",
        ),
    )?;

    info!("Knowledge base loaded with {} topics", kb.len());
    Ok(kb)
}

/// Build the default two-level taxonomy for the guided menu.
pub fn default_menu_index() -> Result<MenuIndex, ConfigError> {
    let mut index = MenuIndex::new();

    index.insert(
        Language::Python,
        "О языке",
        "🐍 Python — это язык программирования высокого уровня с динамической типизацией и простой синтаксис.",
    )?;
    index.insert(
        Language::Python,
        "Списки",
        "Списки (list) — изменяемые коллекции данных. Пример: my_list = [1, 2, 3]",
    )?;
    index.insert(
        Language::Python,
        "Декораторы",
        "Декораторы — это функции, изменяющие поведение других функций.",
    )?;

    index.insert(
        Language::Java,
        "О языке",
        "☕ Java — объектно-ориентированный язык, широко используемый для Android и серверных приложений.",
    )?;
    index.insert(
        Language::Java,
        "Класс",
        "Класс — это шаблон, описывающий объекты. Пример: public class Example {}",
    )?;
    index.insert(
        Language::Java,
        "Интерфейс",
        "Интерфейс — контракт, который реализуют классы. Пример: interface Car { void drive(); }",
    )?;

    index.insert(
        Language::Kotlin,
        "О языке",
        "🚀 Kotlin — современный язык, официально поддерживаемый для Android.",
    )?;
    index.insert(
        Language::Kotlin,
        "Корутины",
        "Корутины — инструмент для асинхронного программирования в Kotlin.",
    )?;
    index.insert(
        Language::Kotlin,
        "Null safety",
        "Null-safety — защита от ошибок NullPointerException.",
    )?;

    info!(
        "Menu index loaded with {} languages",
        index.languages().count()
    );
    Ok(index)
}
