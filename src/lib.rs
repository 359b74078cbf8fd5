pub mod app;
pub mod config;
pub mod models;
pub mod sink;
pub mod tmdb;
