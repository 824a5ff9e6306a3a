use anyhow::Result;
use clap::Parser;
use ghaymah_cli::api::GhaymahApi;
use ghaymah_cli::commands::{self, Cli, Commands};
use ghaymah_cli::config::{ApiSettings, API_TOKEN_ENV, API_URL_ENV};
use ghaymah_cli::errors::{CliError, CliErrorKind};
use ghaymah_cli::logging::init_logging;
use tracing::info;
use std::process;
use std::time::Instant;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let start = Instant::now();
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format)?;
    let exit_code = match dispatch(cli.command).await { Ok(())=>0, Err(e)=> classify_exit_code(&e) };
    info!(took_ms=%start.elapsed().as_millis(), event="cli.finished", exit_code=exit_code);
    if exit_code != 0 { process::exit(exit_code); }
    Ok(())
}

fn connect() -> Result<GhaymahApi> {
    let settings = ApiSettings::from_env().map_err(|e| {
        eprintln!("Please set the following environment variables:");
        eprintln!("  {API_URL_ENV}: The URL of the Ghaymah Cloud API");
        eprintln!("  {API_TOKEN_ENV}: Your Ghaymah Cloud API token");
        CliError::from(e)
    })?;
    let api = GhaymahApi::from_settings(&settings).map_err(|e| CliError::with_source(CliErrorKind::Config("failed to initialise API client".into()), e))?;
    Ok(api)
}

async fn dispatch(command: Commands) -> Result<()> {
    let start = Instant::now();
    let result = commands::run(command, connect).await;
    let took = start.elapsed().as_millis();
    match &result { Ok(_) => info!(event="cmd.finished", took_ms=%took), Err(e)=> { eprintln!("error: {e}"); info!(event="cmd.failed", took_ms=%took); } }
    result
}

fn classify_exit_code(e: &anyhow::Error) -> i32 {
    use std::error::Error;
    let mut cur: &dyn Error = e.as_ref();
    loop {
        if let Some(cli) = cur.downcast_ref::<CliError>() { tracing::debug!(?cli, code=cli.kind.code(), "classified_cli_error"); return cli.kind.code(); }
        if let Some(ioe) = cur.downcast_ref::<std::io::Error>() { eprintln!("io error: {ioe}"); return 30; }
        if let Some(src) = cur.source() { cur = src; } else { break; }
    }
    eprintln!("runtime error: {e}");
    20
}
