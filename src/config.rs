//! Runtime configuration
//!
//! Everything is read from the environment once at startup:
//!
//! - `WIT_DEFAULT_BRANCH`: branch activated by `init` (defaults to `master`)
//! - `WIT_COMMIT_DATE`: fixed commit timestamp, either RFC 2822 or `%Y-%m-%d %H:%M:%S %z`
//! - `WIT_LOG`: tracing filter directive, logging is off when unset
//! - `NO_PAGER`: print `graph` output directly instead of through the pager

use anyhow::Context;
use chrono::{DateTime, FixedOffset};

pub const DEFAULT_BRANCH: &str = "master";

#[derive(Debug, Clone)]
pub struct Config {
    pub default_branch: String,
    pub commit_date: Option<DateTime<FixedOffset>>,
    pub log_filter: Option<String>,
    pub use_pager: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_branch: DEFAULT_BRANCH.to_string(),
            commit_date: None,
            log_filter: None,
            use_pager: false,
        }
    }
}

impl Config {
    pub fn load_from_env() -> anyhow::Result<Self> {
        let default_branch = std::env::var("WIT_DEFAULT_BRANCH")
            .ok()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string());

        let commit_date = match std::env::var("WIT_COMMIT_DATE") {
            Ok(raw) => Some(
                Self::parse_date(&raw)
                    .with_context(|| format!("WIT_COMMIT_DATE is not a valid date: {raw}"))?,
            ),
            Err(_) => None,
        };

        let log_filter = std::env::var("WIT_LOG").ok();
        let use_pager = std::env::var_os("NO_PAGER").is_none();

        Ok(Config {
            default_branch,
            commit_date,
            log_filter,
            use_pager,
        })
    }

    pub fn parse_date(raw: &str) -> anyhow::Result<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc2822(raw)
            .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z"))
            .map_err(anyhow::Error::from)
    }

    /// Timestamp for a new commit
    pub fn now(&self) -> DateTime<FixedOffset> {
        self.commit_date
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
    }
}
