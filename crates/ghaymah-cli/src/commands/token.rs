use anyhow::Result;
use chrono::Utc;
use clap::Subcommand;
use tracing::info;
use crate::api::GhaymahApi;
use crate::errors::{CliError, CliErrorKind};
use crate::token::{ApiToken, TokenError};

/// Generate, list, and revoke API tokens for your Ghaymah account
#[derive(Subcommand, Debug)]
pub enum TokenCommand {
    /// Generate a new API token
    Generate {
        /// Token expiration in days
        #[arg(long, default_value_t = 30)]
        expiry_days: i64,
    },
    /// List all API tokens
    List {},
    /// Revoke an API token
    Revoke {
        /// Token value to revoke
        #[arg(long)]
        token: String,
    },
}

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub async fn handle(cmd: TokenCommand, api: &GhaymahApi) -> Result<()> {
    match cmd {
        TokenCommand::Generate { expiry_days } => {
            let token = ApiToken::generate(expiry_days).map_err(|e| match e {
                TokenError::Random(_) => CliError::with_source(CliErrorKind::Runtime("failed to generate token".into()), e),
                _ => CliError::with_source(CliErrorKind::Usage(e.to_string()), e),
            })?;
            api.register_token(&token).await.map_err(CliError::from)?;
            info!(event="token.generated", expires_at=%token.expires_at);
            println!("Generated new token: {}", token.value);
            println!("Expires at: {}", token.expires_at.format(DATE_FORMAT));
        }
        TokenCommand::List {} => {
            let tokens = api.list_tokens().await.map_err(CliError::from)?;
            if tokens.is_empty() { println!("No API tokens found"); return Ok(()); }
            let now = Utc::now();
            println!("API Tokens:");
            for (i, t) in tokens.iter().enumerate() {
                let state = if t.is_valid_at(now) { "expires" } else { "expired" };
                println!("{}. {} ({}: {})", i + 1, t.masked(), state, t.expires_at.format("%Y-%m-%d"));
            }
        }
        TokenCommand::Revoke { token } => {
            if token.is_empty() { return Err(CliError::new(CliErrorKind::Usage("token value is required".into())).into()); }
            api.revoke_token(&token).await.map_err(CliError::from)?;
            info!(event="token.revoked");
            println!("Successfully revoked token: {token}");
        }
    }
    Ok(())
}
