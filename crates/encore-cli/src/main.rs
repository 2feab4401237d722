use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use encore_config::load as load_config;
use encore_genius::GeniusClient;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Batch artist lookup against the Genius API.
#[derive(Debug, Parser)]
#[command(name = "encore", version, about)]
struct Cli {
    /// Artist names to resolve, one lookup per name.
    #[arg(required = true)]
    artists: Vec<String>,

    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.telemetry.log_level);

    let Some(token) = config.genius.access_token else {
        bail!(
            "no Genius access token configured \
             (set ENCORE_GENIUS__ACCESS_TOKEN or genius.access_token in the config file)"
        );
    };

    let mut builder =
        GeniusClient::builder().timeout(Duration::from_secs(config.genius.timeout_secs));
    if let Some(base_url) = config.genius.base_url {
        builder = builder.base_url(base_url);
    }
    let client = builder.build(token)?;

    info!(target: "cli", "resolving {} artist name(s)", cli.artists.len());
    let table = client.resolve_artists(&cli.artists).await;
    print!("{table}");

    Ok(())
}

fn init_tracing(default_level: &str) {
    let fmt_layer = fmt::layer().with_target(true).with_level(true);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_cli_parses_artist_names() {
        let cli = Cli::try_parse_from(["encore", "Drake", "Rihanna"]).unwrap();
        assert_eq!(cli.artists, vec!["Drake", "Rihanna"]);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_accepts_config_path() {
        let cli = Cli::try_parse_from(["encore", "--config", "encore.toml", "Drake"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("encore.toml")));
        assert_eq!(cli.artists, vec!["Drake"]);
    }

    #[test]
    fn test_cli_requires_at_least_one_artist() {
        let err = Cli::try_parse_from(["encore"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }
}
