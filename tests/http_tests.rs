//! Tests for the http module and for how request headers are layered.

use stashget::downloader::DEFAULT_USER_AGENT;
use stashget::{create_http_client, DownloaderBuilder, HttpClientConfig};

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::helpers::*;

fn client_headers(agent: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(agent));
    headers
}

#[test]
fn test_default_config() {
    let config = HttpClientConfig::default();
    assert_eq!(config.retries, 0);
    assert!(config.proxy.is_none());
    assert!(config.headers.is_none());
}

#[test]
fn test_create_http_client_with_retries_and_headers() {
    let config = HttpClientConfig {
        retries: 3,
        proxy: None,
        headers: Some(client_headers("client-agent")),
    };
    assert!(create_http_client(config).is_ok());
}

#[tokio::test]
async fn test_default_user_agent_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ua.bin"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8; 8]))
        .expect(1)
        .mount(&server)
        .await;

    let dir = create_temp_dir();
    let downloader = test_downloader_builder().build().unwrap();
    downloader
        .fetch(&url(&server, "/ua.bin"), dir.path().join("ua.bin"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].headers[USER_AGENT], DEFAULT_USER_AGENT);
}

#[tokio::test]
async fn test_downloader_headers_win_over_client_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ua.bin"))
        .and(header("user-agent", TEST_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8; 8]))
        .expect(1)
        .mount(&server)
        .await;

    let dir = create_temp_dir();
    let downloader = test_downloader_builder()
        .http(HttpClientConfig {
            headers: Some(client_headers("client-agent")),
            ..HttpClientConfig::default()
        })
        .header(USER_AGENT, HeaderValue::from_static(TEST_USER_AGENT))
        .build()
        .unwrap();
    downloader
        .fetch(&url(&server, "/ua.bin"), dir.path().join("ua.bin"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_client_defaults_apply_without_downloader_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ua.bin"))
        .and(header("user-agent", "client-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8; 8]))
        .expect(1)
        .mount(&server)
        .await;

    let dir = create_temp_dir();
    let downloader = DownloaderBuilder::new()
        .clear_headers()
        .http(HttpClientConfig {
            headers: Some(client_headers("client-agent")),
            ..HttpClientConfig::default()
        })
        .build()
        .unwrap();
    downloader
        .fetch(&url(&server, "/ua.bin"), dir.path().join("ua.bin"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_injected_client_is_used() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/inj.bin"))
        .and(header("x-token", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![2u8; 4]))
        .expect(1)
        .mount(&server)
        .await;

    let mut headers = HeaderMap::new();
    headers.insert("x-token", HeaderValue::from_static("secret"));
    let client = create_http_client(HttpClientConfig {
        headers: Some(headers),
        ..HttpClientConfig::default()
    })
    .unwrap();

    let dir = create_temp_dir();
    let downloader = test_downloader_builder().client(client).build().unwrap();
    downloader
        .fetch(&url(&server, "/inj.bin"), dir.path().join("inj.bin"))
        .await
        .unwrap();
}
