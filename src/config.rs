use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use cvpdf::ProfileLimits;

/// CLI defaults loaded from environment variables. Command-line flags win
/// over these.
#[derive(Debug, Clone)]
pub struct Config {
    pub output_dir: PathBuf,
    /// Fixed footer date; `None` means today.
    pub generated_on: Option<NaiveDate>,
    pub max_entries: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let generated_on = optional_env("CVPDF_GENERATED_ON")
            .map(|raw| parse_date(&raw).context("CVPDF_GENERATED_ON must be a YYYY-MM-DD date"))
            .transpose()?;

        let max_entries = match optional_env("CVPDF_MAX_ENTRIES") {
            Some(raw) => raw
                .parse::<usize>()
                .context("CVPDF_MAX_ENTRIES must be a positive integer")?,
            None => ProfileLimits::default().max_entries,
        };

        Ok(Config {
            output_dir: optional_env("CVPDF_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            generated_on,
            max_entries,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn limits(&self) -> ProfileLimits {
        ProfileLimits {
            max_entries: self.max_entries,
            ..ProfileLimits::default()
        }
    }
}

/// Unset and empty are the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").with_context(|| format!("invalid date '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_iso_date() {
        assert_eq!(parse_date(" 2026-03-09 ").unwrap(), NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
        assert!(parse_date("09/03/2026").is_err());
    }

    #[test]
    fn limits_keep_text_default() {
        let config = Config {
            output_dir: PathBuf::from("."),
            generated_on: None,
            max_entries: 10,
            rust_log: "info".to_string(),
        };
        let limits = config.limits();
        assert_eq!(limits.max_entries, 10);
        assert_eq!(limits.max_text_len, ProfileLimits::default().max_text_len);
    }
}
