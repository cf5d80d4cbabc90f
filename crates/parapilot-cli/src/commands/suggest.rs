use std::path::PathBuf;

use chrono::Local;
use clap::Args;
use parapilot_core::{completion_stats, parse_tasks, suggest, Config, SuggestionContext};

use super::{print_json, read_input};

#[derive(Args)]
pub struct SuggestArgs {
    /// JSON task list (reads stdin if omitted)
    #[arg(long)]
    file: Option<PathBuf>,
    /// friday, morning, end_of_day or general (detected from the clock if omitted)
    #[arg(long)]
    context: Option<SuggestionContext>,
}

#[derive(Args)]
pub struct StatsArgs {
    /// JSON task list (reads stdin if omitted)
    #[arg(long)]
    file: Option<PathBuf>,
}

pub fn run(args: SuggestArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let tasks = parse_tasks(&read_input(args.file.as_deref())?)?;

    print_json(&suggest(
        &tasks,
        &Local::now(),
        args.context,
        &config.suggest,
        &config.quick_wins,
    ))
}

pub fn run_stats(args: StatsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = parse_tasks(&read_input(args.file.as_deref())?)?;

    print_json(&completion_stats(&tasks, &Local))
}
