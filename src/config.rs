//! Runtime configuration loaded from the environment (and `.env`, if present)

use crate::error::BotError;
use crate::Result;
use std::env;

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeConfig {
    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
    /// Pretty-print response JSON
    pub pretty: bool,
}

impl Default for InvokeConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            pretty: false,
        }
    }
}

impl InvokeConfig {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        Self::from_values(
            env::var("RUST_LOG").ok().as_deref(),
            env::var("INVOKE_PRETTY").ok().as_deref(),
        )
    }

    fn from_values(log_filter: Option<&str>, pretty: Option<&str>) -> Result<Self> {
        let log_filter = log_filter
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_LOG_FILTER)
            .to_string();

        let pretty = match pretty.map(|v| v.trim().to_lowercase()) {
            None => false,
            Some(v) => match v.as_str() {
                "" | "0" | "false" | "no" => false,
                "1" | "true" | "yes" => true,
                other => {
                    return Err(BotError::Config(format!(
                        "INVOKE_PRETTY must be a boolean, got '{}'",
                        other
                    )))
                }
            },
        };

        Ok(Self { log_filter, pretty })
    }
}
