use std::path::PathBuf;

use chrono::Utc;
use clap::Args;
use parapilot_core::{parse_tasks, quick_wins, select_due_soon, triage, Config};

use super::{print_json, read_input};

#[derive(Args)]
pub struct TriageArgs {
    /// JSON task list (reads stdin if omitted)
    #[arg(long)]
    file: Option<PathBuf>,
    /// Only consider open tasks due within the configured horizon
    #[arg(long)]
    due_soon: bool,
}

#[derive(Args)]
pub struct QuickWinsArgs {
    /// JSON task list (reads stdin if omitted)
    #[arg(long)]
    file: Option<PathBuf>,
}

pub fn run(args: TriageArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut tasks = parse_tasks(&read_input(args.file.as_deref())?)?;
    if args.due_soon {
        tasks = select_due_soon(&tasks, Utc::now(), config.triage.horizon_hours);
    }

    print_json(&triage(&tasks, &config.triage))
}

pub fn run_quick_wins(args: QuickWinsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let tasks = parse_tasks(&read_input(args.file.as_deref())?)?;

    print_json(&quick_wins(&tasks, &config.quick_wins))
}
