use crate::error::{NotifierError, Result};
use crate::utils::branches::BranchFilter;
use log::warn;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DETAIL_TIMEOUT_MS: u64 = 3000;
pub const DEFAULT_PUSH_COLOR: u32 = 0x2ecc71;
pub const DEFAULT_USERNAME: &str = "Deploy Notifier";
pub const DEFAULT_SERVER_URL: &str = "https://github.com";
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Run configuration, built once at startup and passed down explicitly.
#[derive(Clone)]
pub struct Config {
    pub webhook_url: String,
    pub event_path: PathBuf,
    pub branches: BranchFilter,
    pub detail_timeout: Duration,
    pub embed_color: u32,
    pub verbose: bool,
    pub github_token: Option<String>,
    pub username: String,
    pub server_url: String,
    pub api_url: String,
    pub fallback_repository: Option<String>,
    pub fallback_ref: Option<String>,
    pub fallback_actor: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let webhook_url = get("DISCORD_WEBHOOK_URL").ok_or(NotifierError::MissingWebhook)?;

        let event_path = get("GITHUB_EVENT_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("event.json"));

        let branches = get("NOTIFY_BRANCHES")
            .map(|list| BranchFilter::parse(&list))
            .unwrap_or_default();

        let detail_timeout_ms = match get("DETAIL_TIMEOUT_MS") {
            Some(raw) => raw.trim().parse::<u64>().unwrap_or_else(|_| {
                warn!("Ignoring invalid DETAIL_TIMEOUT_MS '{}', using {}ms", raw, DEFAULT_DETAIL_TIMEOUT_MS);
                DEFAULT_DETAIL_TIMEOUT_MS
            }),
            None => DEFAULT_DETAIL_TIMEOUT_MS,
        };

        let embed_color = match get("EMBED_COLOR") {
            Some(raw) => parse_color(&raw).unwrap_or_else(|| {
                warn!("Ignoring invalid EMBED_COLOR '{}'", raw);
                DEFAULT_PUSH_COLOR
            }),
            None => DEFAULT_PUSH_COLOR,
        };

        Ok(Self {
            webhook_url,
            event_path,
            branches,
            detail_timeout: Duration::from_millis(detail_timeout_ms),
            embed_color,
            verbose: get("VERBOSE_LOGS").is_some_and(|v| parse_flag(&v)),
            github_token: get("GITHUB_TOKEN"),
            username: get("NOTIFY_USERNAME").unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            server_url: get("GITHUB_SERVER_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            api_url: get("GITHUB_API_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            fallback_repository: get("GITHUB_REPOSITORY"),
            fallback_ref: get("GITHUB_REF"),
            fallback_actor: get("GITHUB_ACTOR"),
        })
    }
}

// Secrets stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("webhook_url", &"<redacted>")
            .field("event_path", &self.event_path)
            .field("branches", &self.branches.branches())
            .field("detail_timeout", &self.detail_timeout)
            .field("embed_color", &format_args!("{:#08x}", self.embed_color))
            .field("verbose", &self.verbose)
            .field("github_token", &self.github_token.as_ref().map(|_| "<redacted>"))
            .field("username", &self.username)
            .field("server_url", &self.server_url)
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

pub fn parse_flag(value: &str) -> bool {
    matches!(value.trim(), "1" | "true")
}

/// Decimal, or hex with a `0x` prefix.
pub fn parse_color(value: &str) -> Option<u32> {
    let value = value.trim();
    let color = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => value.parse::<u32>().ok()?,
    };
    (color <= 0xFF_FF_FF).then_some(color)
}
