use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "parapilot", version, about = "PARA Pilot decision engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse free-text capture into a structured task
    Extract(commands::extract::ExtractArgs),
    /// Split an overloaded task list into keep/defer/reconsider
    Triage(commands::triage::TriageArgs),
    /// Suggest short tasks to finish the day
    QuickWins(commands::triage::QuickWinsArgs),
    /// List tasks that keep rolling over
    Rollover(commands::rollover::RolloverArgs),
    /// Find free calendar slots
    Slots(commands::slots::SlotsArgs),
    /// Suggestions for the current moment of the day
    Suggest(commands::suggest::SuggestArgs),
    /// Completion counts by weekday and period of the day
    Stats(commands::suggest::StatsArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PARAPILOT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Extract(args) => commands::extract::run(args),
        Commands::Triage(args) => commands::triage::run(args),
        Commands::QuickWins(args) => commands::triage::run_quick_wins(args),
        Commands::Rollover(args) => commands::rollover::run(args),
        Commands::Slots(args) => commands::slots::run(args),
        Commands::Suggest(args) => commands::suggest::run(args),
        Commands::Stats(args) => commands::suggest::run_stats(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
