use std::str::FromStr;

use chrono_tz::Tz;
use clap::Parser;
use engine::Currency;
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// IANA name used to decide which month "now" falls in.
    pub timezone: String,
    pub currency: String,
    /// JSON file holding the persisted access token.
    pub state_path: String,
    pub log_file: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/".to_string(),
            timezone: "UTC".to_string(),
            currency: "USD".to_string(),
            state_path: "config/finboard_state.json".to_string(),
            log_file: "finboard_tui.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn timezone(&self) -> Result<Tz> {
        Tz::from_str(self.timezone.trim())
            .map_err(|_| AppError::Setting(format!("unknown timezone: {}", self.timezone)))
    }

    pub fn currency(&self) -> Result<Currency> {
        Currency::try_from(self.currency.as_str()).map_err(|err| AppError::Setting(err.to_string()))
    }
}

#[derive(Debug, Parser)]
#[command(name = "finboard_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override API base URL (e.g. http://127.0.0.1:8000/).
    #[arg(long)]
    base_url: Option<String>,
    /// Override timezone (IANA name).
    #[arg(long)]
    timezone: Option<String>,
    /// Override display currency (USD, EUR).
    #[arg(long)]
    currency: Option<String>,
    /// Override the token state file.
    #[arg(long)]
    state_path: Option<String>,
    /// Override the log file.
    #[arg(long)]
    log_file: Option<String>,
    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    from_args(Args::parse())
}

fn from_args(args: Args) -> Result<AppConfig> {
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("FINBOARD_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(timezone) = args.timezone {
        settings.timezone = timezone;
    }
    if let Some(currency) = args.currency {
        settings.currency = currency;
    }
    if let Some(state_path) = args.state_path {
        settings.state_path = state_path;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    // Fail at startup rather than on the first render.
    settings.timezone()?;
    settings.currency()?;

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["finboard_tui", "--config", "does/not/exist.toml"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn defaults_without_file() {
        let settings = from_args(args(&[])).unwrap();
        assert_eq!(settings.base_url, "http://127.0.0.1:8000/");
        assert_eq!(settings.currency().unwrap(), Currency::Usd);
        assert_eq!(settings.timezone().unwrap(), chrono_tz::UTC);
    }

    #[test]
    fn cli_overrides_win() {
        let settings = from_args(args(&[
            "--base-url",
            "http://finance.local/api/",
            "--timezone",
            "Europe/Rome",
            "--currency",
            "eur",
        ]))
        .unwrap();
        assert_eq!(settings.base_url, "http://finance.local/api/");
        assert_eq!(settings.timezone().unwrap(), chrono_tz::Europe::Rome);
        assert_eq!(settings.currency().unwrap(), Currency::Eur);
    }

    #[test]
    fn rejects_unknown_timezone() {
        let err = from_args(args(&["--timezone", "Mars/Olympus"])).unwrap_err();
        assert!(matches!(err, AppError::Setting(_)));
    }
}
