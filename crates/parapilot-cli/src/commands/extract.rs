use std::path::PathBuf;

use chrono::Utc;
use clap::Args;
use parapilot_core::{Config, InMemoryItemStore, StoredItem, TaskExtractor};
use serde::Serialize;

use super::print_json;

#[derive(Args)]
pub struct ExtractArgs {
    /// Free-text capture, e.g. "Finish proposal by Friday high priority"
    text: String,
    /// User whose PARA items are searched for a link
    #[arg(long, default_value = "local")]
    user: String,
    /// JSON file with PARA items to link against
    #[arg(long)]
    items: Option<PathBuf>,
}

#[derive(Serialize)]
struct ExtractOutput {
    #[serde(flatten)]
    extracted: parapilot_core::ExtractedTask,
    actionable: bool,
}

pub fn run(args: ExtractArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = match &args.items {
        Some(path) => {
            let items: Vec<StoredItem> = serde_json::from_str(&std::fs::read_to_string(path)?)?;
            InMemoryItemStore::from_items(items)
        }
        None => InMemoryItemStore::new(),
    };
    tracing::debug!(items = store.len(), "loaded item store");

    let extractor = TaskExtractor::with_config(config.extract);
    let extracted = extractor.extract_and_link(&args.text, &args.user, &store, Utc::now());
    let actionable = extracted.is_actionable();

    print_json(&ExtractOutput {
        extracted,
        actionable,
    })
}
