use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Args;
use parapilot_core::{free_slots, Interval, ValidationError};

use super::print_json;

#[derive(Args)]
pub struct SlotsArgs {
    /// Window start (RFC 3339, e.g. 2025-10-21T08:00:00Z)
    #[arg(long)]
    start: DateTime<Utc>,
    /// Window end (RFC 3339)
    #[arg(long)]
    end: DateTime<Utc>,
    /// Required slot length in minutes
    #[arg(long, allow_negative_numbers = true)]
    duration: i64,
    /// JSON file with busy intervals ([{"start": ..., "end": ...}])
    #[arg(long)]
    busy: Option<PathBuf>,
}

pub fn run(args: SlotsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let busy: Vec<Interval> = match &args.busy {
        Some(path) => {
            let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
            if !value.is_array() {
                return Err(ValidationError::MalformedInput(
                    "busy intervals must be a JSON array".into(),
                )
                .into());
            }
            serde_json::from_value(value)?
        }
        None => Vec::new(),
    };

    print_json(&free_slots(args.start, args.end, &busy, args.duration)?)
}
