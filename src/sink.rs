use crate::models::{Configuration, MovieRecord};
use std::io::{self, Write};
use std::sync::Mutex;

/// Receives workflow output. Implementations render rows and notifications.
pub trait PresentationSink: Send + Sync {
    fn on_configuration_loaded(&self, config: &Configuration);
    fn on_movie_inserted(&self, index: usize, movie: &MovieRecord);
    fn on_error(&self, message: &str);
}

/// Terminal list view: one row per movie on stdout, notifications on stderr.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    config: Mutex<Option<Configuration>>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn format_row(&self, index: usize, movie: &MovieRecord) -> String {
        let poster = self
            .config
            .lock()
            .ok()
            .and_then(|c| c.as_ref().and_then(|c| movie.poster_url(c)))
            .unwrap_or_else(|| "-".to_string());
        let mut row = format!("{:>3}. {} [{}]", index + 1, movie.title, poster);
        if !movie.overview.is_empty() {
            row.push_str("\n     ");
            row.push_str(&movie.overview);
        }
        row
    }
}

impl PresentationSink for ConsoleSink {
    fn on_configuration_loaded(&self, config: &Configuration) {
        if let Ok(mut guard) = self.config.lock() {
            *guard = Some(config.clone());
        }
    }

    fn on_movie_inserted(&self, index: usize, movie: &MovieRecord) {
        let row = self.format_row(index, movie);
        let mut out = io::stdout().lock();
        let _ = writeln!(out, "{}", row);
    }

    fn on_error(&self, message: &str) {
        let mut err = io::stderr().lock();
        let _ = writeln!(err, "! {}", message);
    }
}
