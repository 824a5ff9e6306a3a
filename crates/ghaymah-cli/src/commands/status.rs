use anyhow::Result;
use clap::builder::NonEmptyStringValueParser;
use tracing::info;
use crate::api::GhaymahApi;
use crate::errors::CliError;
use crate::types::StatusResponse;

#[derive(clap::Args, Debug)]
#[command(after_help = "Example:\n  ghaymah status --name my-app")]
pub struct StatusArgs {
    /// Application name
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub name: String,
}

pub fn render(status: &StatusResponse) -> String {
    format!(
        "Status: {}\nLast Deployment: {}\n\nResource Usage:\n  CPU: {:.2}%\n  Memory: {:.2}%\n  Storage: {:.2}%",
        status.state,
        status.last_deployment.format("%Y-%m-%d %H:%M:%S"),
        status.resources.cpu_usage,
        status.resources.memory_usage,
        status.resources.storage_usage,
    )
}

pub async fn handle(args: StatusArgs, api: &GhaymahApi) -> Result<()> {
    println!("Checking status for application {}...", args.name);
    let status = api.get_status(&args.name).await.map_err(CliError::from)?;
    info!(event="status.fetched", app=%args.name, state=%status.state);
    println!();
    println!("{}", render(&status));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crate::types::ResourceUsage;

    #[test]
    fn render_formats_time_and_percentages() {
        let s = StatusResponse {
            state: "running".into(),
            last_deployment: Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap(),
            resources: ResourceUsage { cpu_usage: 12.5, memory_usage: 50.0, storage_usage: 0.5 },
        };
        let out = render(&s);
        assert!(out.contains("Status: running"));
        assert!(out.contains("Last Deployment: 2024-02-03 04:05:06"));
        assert!(out.contains("CPU: 12.50%"));
        assert!(out.contains("Memory: 50.00%"));
        assert!(out.contains("Storage: 0.50%"));
    }
}
