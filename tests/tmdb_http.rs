mod common;

use common::RecordingSink;
use flicks::app::{LoadState, MovieList};
use flicks::config::Settings;
use flicks::tmdb::{TmdbApi, TmdbClient};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-key";

fn settings_for(server: &MockServer) -> Settings {
    let mut settings = Settings::new(API_KEY);
    settings.api_base = format!("{}/3", server.uri());
    settings.poster_size = "w185".parse().unwrap();
    settings
}

async fn mount_configuration(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/3/configuration"))
        .and(query_param("api_key", API_KEY))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn client_sends_api_key_and_returns_body() {
    let server = MockServer::start().await;
    mount_configuration(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "images": { "base_url": "x" } })),
    )
    .await;

    let client = TmdbClient::new(&settings_for(&server)).unwrap();
    let body = client.fetch_configuration().await.unwrap();
    assert_eq!(body["images"]["base_url"], "x");
}

#[tokio::test]
async fn client_treats_error_status_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/now_playing"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let client = TmdbClient::new(&settings_for(&server)).unwrap();
    let err = client.fetch_now_playing().await.unwrap_err();
    assert!(format!("{:#}", err).contains("401"));
}

#[tokio::test]
async fn client_rejects_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/now_playing"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = TmdbClient::new(&settings_for(&server)).unwrap();
    assert!(client.fetch_now_playing().await.is_err());
}

#[tokio::test]
async fn full_load_over_http() {
    let server = MockServer::start().await;
    mount_configuration(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "images": {
                "base_url": "http://image.tmdb.org/t/p/",
                "poster_sizes": ["w92", "w185"]
            }
        })),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/3/movie/now_playing"))
        .and(query_param("api_key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "total_pages": 1,
            "results": [
                { "id": 1, "title": "A", "poster_path": "/a.jpg" },
                { "id": 2, "title": "B", "poster_path": null }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let mut list = MovieList::from_settings(&settings_for(&server), sink.clone()).unwrap();
    list.run().await;

    assert_eq!(list.state(), LoadState::MoviesLoaded);
    assert_eq!(
        sink.inserted(),
        vec![(0, "A".to_string()), (1, "B".to_string())]
    );
    let config = list.configuration().unwrap();
    assert_eq!(config.poster_size, "w185");
    assert_eq!(
        list.movies()[0].poster_url(config).as_deref(),
        Some("http://image.tmdb.org/t/p/w185/a.jpg")
    );
    assert_eq!(list.movies()[1].poster_url(config), None);
}

#[tokio::test]
async fn configuration_500_never_requests_movies() {
    let server = MockServer::start().await;
    mount_configuration(&server, ResponseTemplate::new(500)).await;
    Mock::given(method("GET"))
        .and(path("/3/movie/now_playing"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let mut list = MovieList::from_settings(&settings_for(&server), sink.clone()).unwrap();
    list.run().await;

    assert_eq!(list.state(), LoadState::ConfigFailed);
    assert_eq!(sink.errors(), vec!["Failed getting configuration".to_string()]);
    assert!(sink.inserted().is_empty());
}

#[tokio::test]
async fn connection_errors_do_not_expose_api_key() {
    let mut settings = Settings::new("SECRET-KEY-123");
    settings.api_base = "http://127.0.0.1:9/3".to_string();
    let client = TmdbClient::new(&settings).unwrap();

    let err = client.fetch_configuration().await.unwrap_err();
    let formatted = format!("{:#}", err);
    assert!(formatted.starts_with("request failed"));
    assert!(!formatted.contains("SECRET-KEY-123"));
    assert!(!format!("{:?}", err).contains("SECRET-KEY-123"));
}
