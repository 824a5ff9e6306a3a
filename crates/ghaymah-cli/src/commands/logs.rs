use anyhow::Result;
use clap::builder::NonEmptyStringValueParser;
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{info, warn};
use crate::api::GhaymahApi;
use crate::errors::CliError;
use crate::types::{LogEntry, LogOptions};

#[derive(clap::Args, Debug)]
#[command(after_help = "Examples:\n  # View recent logs\n  ghaymah logs --name my-app\n\n  # View last 50 lines\n  ghaymah logs --name my-app --tail 50\n\n  # View logs since a specific time\n  ghaymah logs --name my-app --since 2024-01-23T00:00:00Z")]
pub struct LogsArgs {
    /// Application name
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub name: String,
    /// Follow log output in real-time (not supported yet)
    #[arg(short = 'f', long, default_value_t = false)]
    pub follow: bool,
    /// Number of lines to show from the end of the logs (0 = server default)
    #[arg(short = 'n', long, default_value_t = 100)]
    pub tail: u32,
    /// Show logs since timestamp (RFC3339 format)
    #[arg(short = 's', long, value_parser = parse_since)]
    pub since: Option<DateTime<Utc>>,
}

fn parse_since(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s).map(|d| d.with_timezone(&Utc)).map_err(|e| format!("invalid timestamp format: {e}"))
}

pub fn render_entry(entry: &LogEntry) -> String {
    format!("[{}] {}", entry.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true), entry.message)
}

pub async fn handle(args: LogsArgs, api: &GhaymahApi) -> Result<()> {
    println!("Retrieving logs for application {}...", args.name);
    let options = LogOptions { follow: args.follow, tail: args.tail, since: args.since };
    let logs = api.get_logs(&args.name, &options).await.map_err(CliError::from)?;
    info!(event="logs.fetched", app=%args.name, entries=logs.entries.len());
    if logs.entries.is_empty() {
        println!("No logs available for the application");
    }
    for entry in &logs.entries { println!("{}", render_entry(entry)); }
    if args.follow {
        warn!(event="logs.follow.unsupported", app=%args.name);
        eprintln!("note: following logs in real-time is not supported yet; showing the latest entries only");
    }
    Ok(())
}
