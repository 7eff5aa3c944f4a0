use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use tradier_rs::commands::CommandTable;
use tradier_rs::{Error, TradierClient};

/// Call a Tradier API action and print the result as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Action name, e.g. `quote` or `account_balances`; `list` shows them all
    action: String,

    /// Positional arguments for the action
    params: Vec<String>,

    /// Access token; takes precedence over the token file
    #[arg(long, env = "TRADIER_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// File holding the access token
    #[arg(long, default_value = "./token")]
    token_file: PathBuf,

    /// Endpoint name: prod, beta, sandbox or stream
    #[arg(short, long, default_value = "prod")]
    endpoint: String,

    /// Log filter, e.g. `debug` or `tradier_rs=debug`
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(&args.log_level)?;

    let table = CommandTable::standard();
    if args.action == "list" {
        for command in table.iter() {
            println!("{} {}", command.name(), command.usage());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = table.get(&args.action) else {
        println!("unknown action");
        return Ok(ExitCode::FAILURE);
    };

    let token = load_token(args.token.as_deref(), &args.token_file)?;
    let client = TradierClient::from_endpoint_name(token, &args.endpoint)
        .context("create client")?;
    debug!(action = %args.action, endpoint = %client.endpoint(), "running action");

    match command.call(&client, &args.params).await {
        Ok(payload) => {
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(Error::Api { status, body, .. }) => {
            eprintln!("HTTP {}", status);
            eprintln!("{}", serde_json::to_string_pretty(&body)?);
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err).with_context(|| format!("action `{}` failed", args.action)),
    }
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

/// Token from the flag or environment, else the token file with one trailing
/// newline removed. With neither, requests go out with an empty token.
fn load_token(explicit: Option<&str>, path: &PathBuf) -> Result<String> {
    if let Some(token) = explicit {
        return Ok(token.to_string());
    }
    if !path.exists() {
        warn!(path = %path.display(), "no token given and no token file found");
        return Ok(String::new());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read token file {}", path.display()))?;
    Ok(strip_newline(&raw).to_string())
}

fn strip_newline(raw: &str) -> &str {
    raw.strip_suffix('\n')
        .map(|s| s.strip_suffix('\r').unwrap_or(s))
        .unwrap_or(raw)
}
