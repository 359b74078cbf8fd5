use crate::models::PosterSizePolicy;
use anyhow::{anyhow, Context, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.themoviedb.org/3";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub api_base: String,
    pub poster_size: PosterSizePolicy,
    pub timeout: Duration,
}

impl Settings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            poster_size: PosterSizePolicy::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("TMDB_API_KEY")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| anyhow!("TMDB_API_KEY must be set"))?;
        let mut settings = Self::new(api_key.trim());

        if let Some(base) = lookup("TMDB_API_BASE").filter(|s| !s.trim().is_empty()) {
            settings.api_base = base.trim().trim_end_matches('/').to_string();
        }
        if let Some(policy) = lookup("FLICKS_POSTER_SIZE").filter(|s| !s.trim().is_empty()) {
            settings.poster_size = policy
                .parse()
                .with_context(|| format!("Invalid FLICKS_POSTER_SIZE '{}'", policy))?;
        }
        if let Some(secs) = lookup("HTTP_TIMEOUT_SECS").filter(|s| !s.trim().is_empty()) {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("Invalid HTTP_TIMEOUT_SECS '{}'", secs))?;
            if secs == 0 {
                return Err(anyhow!("HTTP_TIMEOUT_SECS must be greater than zero"));
            }
            settings.timeout = Duration::from_secs(secs);
        }
        Ok(settings)
    }
}
