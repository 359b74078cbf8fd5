use crate::config::Settings;
use crate::models::{Configuration, MovieRecord, NowPlayingPage, PosterSizePolicy};
use crate::sink::PresentationSink;
use crate::tmdb::{TmdbApi, TmdbClient};
use anyhow::Result;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Start,
    FetchingConfig,
    ConfigFailed,
    ConfigLoaded,
    FetchingMovies,
    MoviesFailed,
    MoviesLoaded,
}

impl LoadState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LoadState::ConfigFailed | LoadState::MoviesFailed | LoadState::MoviesLoaded
        )
    }
}

/// The now-playing screen: loads configuration, then movies, and feeds the sink.
pub struct MovieList {
    tmdb: Arc<dyn TmdbApi>,
    sink: Arc<dyn PresentationSink>,
    poster_size: PosterSizePolicy,
    config: Option<Configuration>,
    movies: Vec<MovieRecord>,
    state: LoadState,
}

impl MovieList {
    pub fn new(
        tmdb: Arc<dyn TmdbApi>,
        sink: Arc<dyn PresentationSink>,
        poster_size: PosterSizePolicy,
    ) -> Self {
        Self {
            tmdb,
            sink,
            poster_size,
            config: None,
            movies: Vec::new(),
            state: LoadState::Start,
        }
    }

    pub fn from_settings(settings: &Settings, sink: Arc<dyn PresentationSink>) -> Result<Self> {
        let tmdb: Arc<dyn TmdbApi> = Arc::new(TmdbClient::new(settings)?);
        Ok(Self::new(tmdb, sink, settings.poster_size.clone()))
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn configuration(&self) -> Option<&Configuration> {
        self.config.as_ref()
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    /// Runs the whole load on the runtime; the handle yields the finished list.
    pub fn spawn(mut self) -> JoinHandle<Self> {
        tokio::spawn(async move {
            self.run().await;
            self
        })
    }

    pub async fn run(&mut self) {
        self.get_configuration().await;
    }

    /// Fetches `/configuration`. On success the configuration is published
    /// and the now-playing fetch is started.
    pub async fn get_configuration(&mut self) {
        self.transition(LoadState::FetchingConfig);
        let body = match self.tmdb.fetch_configuration().await {
            Ok(body) => body,
            Err(e) => {
                report_error(self.sink.as_ref(), "Failed getting configuration", &e, true);
                self.transition(LoadState::ConfigFailed);
                return;
            }
        };
        let config = match Configuration::from_response(body, &self.poster_size) {
            Ok(config) => config,
            Err(e) => {
                report_error(self.sink.as_ref(), "Failed parsing configuration", &e, true);
                self.transition(LoadState::ConfigFailed);
                return;
            }
        };
        info!(
            "Loaded configuration with image base url {} and poster size {}",
            config.image_base_url, config.poster_size
        );
        self.sink.on_configuration_loaded(&config);
        self.config = Some(config);
        self.transition(LoadState::ConfigLoaded);

        self.get_now_playing().await;
    }

    /// Fetches `/movie/now_playing` and appends each result in order.
    /// Expects a configuration to have been published already.
    pub async fn get_now_playing(&mut self) {
        self.transition(LoadState::FetchingMovies);
        let body = match self.tmdb.fetch_now_playing().await {
            Ok(body) => body,
            Err(e) => {
                report_error(
                    self.sink.as_ref(),
                    "Failed to get data from now playing endpoint",
                    &e,
                    true,
                );
                self.transition(LoadState::MoviesFailed);
                return;
            }
        };
        let page = match NowPlayingPage::from_response(body) {
            Ok(page) => page,
            Err(e) => {
                report_error(self.sink.as_ref(), "Failed to parse now playing", &e, true);
                self.transition(LoadState::MoviesFailed);
                return;
            }
        };

        // Records appended before a malformed element are kept.
        for (i, raw) in page.results.iter().enumerate() {
            let movie = match MovieRecord::from_json(raw) {
                Ok(movie) => movie,
                Err(e) => {
                    let e = e.context(format!("result {} of {}", i, page.results.len()));
                    report_error(self.sink.as_ref(), "Failed to parse now playing", &e, true);
                    self.transition(LoadState::MoviesFailed);
                    return;
                }
            };
            self.movies.push(movie);
            let index = self.movies.len() - 1;
            self.sink.on_movie_inserted(index, &self.movies[index]);
        }

        match (page.page, page.total_pages) {
            (Some(p), Some(total)) => info!(
                "Loaded {} movies (page {} of {})",
                page.results.len(),
                p,
                total
            ),
            _ => info!("Loaded {} movies", page.results.len()),
        }
        self.transition(LoadState::MoviesLoaded);
    }

    fn transition(&mut self, next: LoadState) {
        debug!("Movie list state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Logs the failure and, when `alert_user` is set, shows `message` to the user.
pub fn report_error(
    sink: &dyn PresentationSink,
    message: &str,
    cause: &anyhow::Error,
    alert_user: bool,
) {
    error!("{}: {:#}", message, cause);
    if alert_user {
        sink.on_error(message);
    }
}
