use anyhow::Result;
use dotenvy::dotenv;
use flicks::app::MovieList;
use flicks::config::Settings;
use flicks::sink::ConsoleSink;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let loaded = dotenv();
    init_tracing();
    match loaded {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) => warn!("No .env file loaded ({}) - relying on environment", e),
    }

    let settings = Settings::from_env()?;
    info!("Using TMDB API at {}", settings.api_base);

    let list = MovieList::from_settings(&settings, Arc::new(ConsoleSink::new()))?;
    let list = list.spawn().await?;
    info!(
        "Movie list finished in state {:?} with {} movies",
        list.state(),
        list.movies().len()
    );
    Ok(())
}
