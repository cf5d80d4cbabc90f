use std::path::PathBuf;

use chrono::Utc;
use clap::Args;
use parapilot_core::{detect_rollovers, parse_tasks, Config};

use super::{print_json, read_input};

#[derive(Args)]
pub struct RolloverArgs {
    /// JSON task list (reads stdin if omitted)
    #[arg(long)]
    file: Option<PathBuf>,
}

pub fn run(args: RolloverArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let tasks = parse_tasks(&read_input(args.file.as_deref())?)?;

    print_json(&detect_rollovers(&tasks, Utc::now(), &config.rollover))
}
