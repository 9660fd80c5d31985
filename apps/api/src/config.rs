use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_LLM_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4";
pub const DEFAULT_REMOTIVE_API_URL: &str = "https://remotive.com/api/remote-jobs";
pub const DEFAULT_WEWORKREMOTELY_URL: &str =
    "https://weworkremotely.com/categories/remote-programming-jobs";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a numeric one is malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub llm_api_url: String,
    pub llm_model: String,
    pub llm_timeout: Duration,
    pub remotive_api_url: String,
    pub weworkremotely_url: String,
    pub scraper_user_agent: String,
    pub fetch_timeout: Duration,
    /// Directory holding `match_prompt.txt` / `cold_email_prompt.txt` overrides.
    pub prompt_dir: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            llm_api_url: env_or("LLM_API_URL", DEFAULT_LLM_API_URL),
            llm_model: env_or("LLM_MODEL", DEFAULT_LLM_MODEL),
            llm_timeout: Duration::from_secs(parse_env("LLM_TIMEOUT_SECS", 120)?),
            remotive_api_url: env_or("REMOTIVE_API_URL", DEFAULT_REMOTIVE_API_URL),
            weworkremotely_url: env_or("WEWORKREMOTELY_URL", DEFAULT_WEWORKREMOTELY_URL),
            scraper_user_agent: env_or("SCRAPER_USER_AGENT", DEFAULT_USER_AGENT),
            fetch_timeout: Duration::from_secs(parse_env("FETCH_TIMEOUT_SECS", 30)?),
            prompt_dir: std::env::var("PROMPT_DIR").ok().map(PathBuf::from),
            port: parse_env("PORT", 8000)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
