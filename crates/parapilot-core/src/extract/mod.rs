//! Natural-language capture extraction.
//!
//! Turns a single line of free text ("Finish proposal by Friday high
//! priority") into a structured [`Task`] using fixed phrase tables and one
//! duration regex. No network call is made; linking to an existing PARA item
//! goes through the [`ItemLookup`] collaborator.
//!
//! Every table is evaluated in a fixed order and the first hit wins. Phrases
//! are never combined ("tomorrow next week" resolves to tomorrow).

mod lookup;

pub use lookup::{InMemoryItemStore, ItemLookup, LinkedItem, StoredItem};

use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::task::{Priority, Task};

/// Relative date phrases, in match order, with their offset in days.
const DATE_PHRASES: &[(&str, i64)] = &[("tomorrow", 1), ("next week", 7), ("next month", 30)];

/// Priority phrases, in match order.
const PRIORITY_PHRASES: &[(&str, Priority)] = &[
    ("urgent", Priority::Urgent),
    ("asap", Priority::Urgent),
    ("high priority", Priority::High),
    ("important", Priority::High),
    ("low priority", Priority::Low),
];

/// Words never used as linking keywords.
const STOP_WORDS: &[&str] = &[
    // action verbs
    "schedule", "finish", "call", "review", "complete", "update", "send", "create",
    // articles and prepositions
    "the", "a", "an", "and", "or", "for", "to", "in", "on", "at", "by",
];

/// Connector words left dangling at either end of a title after cleanup.
const DANGLING_WORDS: &[&str] = &["for", "by", "at", "on", "in"];

static RE_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+)\s*(hour|hr|minute|min)s?").expect("duration pattern is valid")
});

static RE_WEEKDAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b")
        .expect("weekday pattern is valid")
});

static RE_BY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bby\b").expect("by pattern is valid"));

static RE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z]+").expect("word pattern is valid"));

/// Extraction tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Characters of raw input kept when cleanup leaves no title.
    #[serde(default = "default_title_fallback_chars")]
    pub title_fallback_chars: usize,
    /// Maximum number of keywords returned.
    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,
    /// Shortest keyword kept, in characters.
    #[serde(default = "default_min_keyword_len")]
    pub min_keyword_len: usize,
}

fn default_title_fallback_chars() -> usize {
    50
}
fn default_max_keywords() -> usize {
    5
}
fn default_min_keyword_len() -> usize {
    4
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            title_fallback_chars: default_title_fallback_chars(),
            max_keywords: default_max_keywords(),
            min_keyword_len: default_min_keyword_len(),
        }
    }
}

/// An extracted task plus the PARA item it was linked to, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedTask {
    pub task: Task,
    pub linked_item: Option<LinkedItem>,
}

impl ExtractedTask {
    /// Whether the capture carries enough scheduling signal to become a task
    /// record rather than a plain note.
    pub fn is_actionable(&self) -> bool {
        self.task.due_at.is_some()
            || self.task.duration_minutes.is_some()
            || matches!(self.task.priority, Priority::High | Priority::Urgent)
    }
}

/// Rule-based capture parser.
#[derive(Debug, Clone, Default)]
pub struct TaskExtractor {
    config: ExtractConfig,
}

impl TaskExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExtractConfig) -> Self {
        Self { config }
    }

    /// Extract a task relative to the current time.
    pub fn extract(&self, text: &str) -> Task {
        self.extract_at(text, Utc::now())
    }

    /// Extract a task relative to a fixed `now`.
    pub fn extract_at(&self, text: &str, now: DateTime<Utc>) -> Task {
        let lower = text.to_lowercase();

        let date_hit = DATE_PHRASES
            .iter()
            .find(|(phrase, _)| lower.contains(phrase));
        let priority_hit = PRIORITY_PHRASES
            .iter()
            .find(|(phrase, _)| lower.contains(phrase));
        let duration_hit = RE_DURATION.captures(text);

        let due_at = date_hit.map(|(_, days)| now + Duration::days(*days));
        let priority = priority_hit.map(|(_, p)| *p).unwrap_or_default();
        let duration_minutes = duration_hit.as_ref().and_then(|caps| {
            let amount: u32 = caps[1].parse().ok()?;
            let unit = caps[2].to_ascii_lowercase();
            let minutes = if unit.contains("hour") || unit == "hr" {
                amount.checked_mul(60)?
            } else {
                amount
            };
            (minutes > 0).then_some(minutes)
        });

        let mut cleaned = text.to_string();
        if let Some((phrase, _)) = date_hit {
            cleaned = strip_phrase(&cleaned, phrase);
        }
        if let Some((phrase, _)) = priority_hit {
            cleaned = strip_phrase(&cleaned, phrase);
        }
        if let Some(caps) = &duration_hit {
            cleaned = cleaned.replacen(&caps[0], " ", 1);
        }
        cleaned = RE_WEEKDAY.replace_all(&cleaned, " ").into_owned();
        cleaned = RE_BY.replace_all(&cleaned, " ").into_owned();

        let title = match tidy_title(&cleaned) {
            Some(title) => title,
            None => text
                .chars()
                .take(self.config.title_fallback_chars.max(1))
                .collect(),
        };
        let keywords = self.keywords(&title);

        tracing::debug!(
            title = %title,
            priority = %priority,
            due = ?due_at,
            duration = ?duration_minutes,
            keywords = ?keywords,
            "extracted task from capture"
        );

        Task {
            due_at,
            duration_minutes,
            priority,
            keywords,
            ..Task::new(title)
        }
    }

    /// Extract a task and link it to the first active item matching one of
    /// its keywords. Lookup failures are logged and treated as no match.
    pub fn extract_and_link(
        &self,
        text: &str,
        user_id: &str,
        lookup: &dyn ItemLookup,
        now: DateTime<Utc>,
    ) -> ExtractedTask {
        let task = self.extract_at(text, now);
        let linked_item = link_item(&task.keywords, user_id, lookup);
        ExtractedTask { task, linked_item }
    }

    /// Lowercase alphabetic words of `text`, minus stop words and short
    /// words, capped at `max_keywords`, in title order.
    pub fn keywords(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        RE_WORD
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|word| word.chars().count() >= self.config.min_keyword_len)
            .filter(|word| !STOP_WORDS.contains(word))
            .take(self.config.max_keywords)
            .map(str::to_string)
            .collect()
    }
}

/// Extract a task from free text with the default configuration.
pub fn extract_task(text: &str) -> Task {
    TaskExtractor::new().extract(text)
}

fn link_item(keywords: &[String], user_id: &str, lookup: &dyn ItemLookup) -> Option<LinkedItem> {
    for keyword in keywords {
        match lookup.find_item_by_keyword(user_id, keyword) {
            Ok(Some(item)) => {
                tracing::debug!(keyword = %keyword, item_id = %item.id, "linked capture to item");
                return Some(item);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(keyword = %keyword, error = %e, "item lookup failed");
            }
        }
    }
    None
}

/// Remove every word-bounded, case-insensitive occurrence of `phrase`.
fn strip_phrase(text: &str, phrase: &str) -> String {
    let pattern = phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    match Regex::new(&format!(r"(?i)\b{pattern}\b")) {
        Ok(re) => re.replace_all(text, " ").into_owned(),
        Err(_) => text.to_string(),
    }
}

/// Collapse whitespace and drop dangling connectors. `None` if nothing is left.
fn tidy_title(text: &str) -> Option<String> {
    let mut words: Vec<&str> = text.split_whitespace().collect();
    let is_dangling = |w: &str| DANGLING_WORDS.contains(&w.to_lowercase().as_str());

    while words.last().is_some_and(|w| is_dangling(*w)) {
        words.pop();
    }
    while words.first().is_some_and(|w| is_dangling(*w)) {
        words.remove(0);
    }

    (!words.is_empty()).then(|| words.join(" "))
}
