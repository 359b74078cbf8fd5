//! Fetch the TMDB configuration and first now-playing page and print what the
//! movie list would derive from them.
//! Usage:
//!   cargo run --bin tmdb_config
//!   cargo run --bin tmdb_config -- raw
//! Requires TMDB_API_KEY in the environment (.env supported).

use anyhow::{Context, Result};
use dotenvy::dotenv;
use flicks::config::Settings;
use flicks::models::{Configuration, MovieRecord, NowPlayingPage};
use flicks::tmdb::{TmdbApi, TmdbClient};
use serde_json::{json, Value};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let raw = env::args().nth(1).as_deref() == Some("raw");
    let settings = Settings::from_env()?;
    let tmdb = TmdbClient::new(&settings)?;

    let config_body = tmdb
        .fetch_configuration()
        .await
        .context("configuration request failed")?;
    let now_playing_body = tmdb
        .fetch_now_playing()
        .await
        .context("now playing request failed")?;

    if raw {
        let output = json!({
            "configuration": config_body,
            "now_playing": now_playing_body,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let config = Configuration::from_response(config_body, &settings.poster_size)?;
    let page = NowPlayingPage::from_response(now_playing_body)?;
    let movies: Vec<Value> = page
        .results
        .iter()
        .map(|raw| match MovieRecord::from_json(raw) {
            Ok(m) => json!({
                "id": m.id,
                "title": m.title,
                "poster": m.poster_url(&config),
                "backdrop": m.backdrop_url(&config),
            }),
            Err(e) => json!({ "error": format!("{:#}", e), "raw": raw }),
        })
        .collect();

    let output = json!({
        "configuration": config,
        "page": page.page,
        "total_pages": page.total_pages,
        "movies": movies,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
