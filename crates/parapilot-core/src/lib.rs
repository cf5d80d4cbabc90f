//! # PARA Pilot Core Library
//!
//! Deterministic decision logic for the PARA Pilot productivity backend.
//! Everything here is a pure, synchronous function over in-memory data;
//! storage, HTTP, auth and LLM calls belong to the surrounding services.
//!
//! ## Architecture
//!
//! - **Extractor**: rule-based parsing of free-text capture into a [`Task`]
//!   (due date, priority, duration, title, keywords), with optional linking
//!   through an injected [`ItemLookup`]
//! - **Triage**: splits an overloaded due-soon list into keep/defer/reconsider,
//!   plus quick-win selection
//! - **Slots**: free-window search over busy intervals and half-open conflict
//!   detection
//! - **Rollover**: flags open tasks that are several days overdue
//! - **Suggest**: clock-driven suggestions (morning plan, end-of-day quick
//!   wins, Friday review) and completion histograms
//!
//! ## Key Components
//!
//! - [`TaskExtractor`]: capture parser
//! - [`triage()`]: reprioritization engine
//! - [`free_slots`]: interval subtraction
//! - [`Config`]: TOML-backed tunables for every component

pub mod config;
pub mod error;
pub mod extract;
pub mod rollover;
pub mod slots;
pub mod suggest;
pub mod task;
pub mod triage;

pub use config::Config;
pub use error::{ConfigError, CoreError, Result, ValidationError};
pub use extract::{
    extract_task, ExtractConfig, ExtractedTask, InMemoryItemStore, ItemLookup, LinkedItem,
    StoredItem, TaskExtractor,
};
pub use rollover::{detect_rollovers, RolloverCandidate, RolloverConfig};
pub use slots::{conflicts, find_conflicts, free_slots, Interval};
pub use suggest::{
    completion_stats, detect_context, due_today, morning_plan, suggest, time_until,
    CompletionStats, DayPeriod, SuggestConfig, Suggestion, SuggestionContext, SuggestionKind,
    Suggestions, TaskSummary, Urgency,
};
pub use task::{parse_tasks, Priority, Task};
pub use triage::{
    quick_wins, rank_tasks, select_due_soon, triage, QuickWinConfig, TriageConfig, TriageResult,
    TriageSuggestions,
};
