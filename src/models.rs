use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;

pub const DEFAULT_POSTER_INDEX: usize = 3;
pub const FALLBACK_POSTER_SIZE: &str = "w342";
const BACKDROP_INDEX: usize = 1;
const FALLBACK_BACKDROP_SIZE: &str = "w780";

/// Image hosting settings returned by `/configuration`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    pub image_base_url: String,
    pub poster_size: String,
    pub backdrop_size: String,
}

/// How a poster size token is picked out of `images.poster_sizes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosterSizePolicy {
    Index(usize),
    Token(String),
}

impl Default for PosterSizePolicy {
    fn default() -> Self {
        PosterSizePolicy::Index(DEFAULT_POSTER_INDEX)
    }
}

impl FromStr for PosterSizePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(anyhow!("poster size policy must not be empty"));
        }
        if s.chars().all(|c| c.is_ascii_digit()) {
            let index = s.parse().context("poster size index out of range")?;
            return Ok(PosterSizePolicy::Index(index));
        }
        Ok(PosterSizePolicy::Token(s.to_string()))
    }
}

impl PosterSizePolicy {
    fn select(&self, sizes: &[String]) -> String {
        let picked = match self {
            PosterSizePolicy::Index(i) => sizes.get(*i),
            PosterSizePolicy::Token(t) => sizes.iter().find(|s| *s == t),
        };
        picked
            .cloned()
            .unwrap_or_else(|| FALLBACK_POSTER_SIZE.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct ConfigurationResponse {
    images: ImagesConfig,
}

#[derive(Debug, Deserialize)]
struct ImagesConfig {
    base_url: String,
    poster_sizes: Vec<String>,
    #[serde(default)]
    backdrop_sizes: Vec<String>,
}

impl Configuration {
    pub fn from_response(body: Value, policy: &PosterSizePolicy) -> Result<Self> {
        let parsed: ConfigurationResponse =
            serde_json::from_value(body).context("configuration JSON parse failed")?;
        let images = parsed.images;
        let poster_size = policy.select(&images.poster_sizes);
        let backdrop_size = images
            .backdrop_sizes
            .get(BACKDROP_INDEX)
            .cloned()
            .unwrap_or_else(|| FALLBACK_BACKDROP_SIZE.to_string());
        Ok(Self {
            image_base_url: images.base_url,
            poster_size,
            backdrop_size,
        })
    }

    pub fn image_url(&self, size: &str, path: &str) -> String {
        format!("{}{}{}", self.image_base_url, size, path)
    }
}

/// One entry of the now-playing `results` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl MovieRecord {
    pub fn from_json(value: &Value) -> Result<Self> {
        MovieRecord::deserialize(value).context("movie JSON parse failed")
    }

    pub fn poster_url(&self, config: &Configuration) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|p| config.image_url(&config.poster_size, p))
    }

    pub fn backdrop_url(&self, config: &Configuration) -> Option<String> {
        self.backdrop_path
            .as_deref()
            .map(|p| config.image_url(&config.backdrop_size, p))
    }
}

/// The now-playing envelope, with `results` left raw so each element can be
/// parsed (and appended) one at a time.
#[derive(Debug, Deserialize)]
pub struct NowPlayingPage {
    pub results: Vec<Value>,
    pub page: Option<i64>,
    pub total_pages: Option<i64>,
}

impl NowPlayingPage {
    pub fn from_response(body: Value) -> Result<Self> {
        serde_json::from_value(body).context("now playing JSON parse failed")
    }
}
