#![allow(dead_code)]

use flicks::models::{Configuration, MovieRecord};
use flicks::sink::PresentationSink;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Config(Configuration),
    Inserted(usize, MovieRecord),
    Error(String),
}

#[derive(Default)]
pub struct RecordingSink {
    pub events: Mutex<Vec<Event>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Error(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn inserted(&self) -> Vec<(usize, String)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Inserted(i, m) => Some((i, m.title)),
                _ => None,
            })
            .collect()
    }

    pub fn configs(&self) -> Vec<Configuration> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Config(c) => Some(c),
                _ => None,
            })
            .collect()
    }
}

impl PresentationSink for RecordingSink {
    fn on_configuration_loaded(&self, config: &Configuration) {
        self.events.lock().unwrap().push(Event::Config(config.clone()));
    }

    fn on_movie_inserted(&self, index: usize, movie: &MovieRecord) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Inserted(index, movie.clone()));
    }

    fn on_error(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Event::Error(message.to_string()));
    }
}
