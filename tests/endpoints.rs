//! End-to-end tests against a real listener.

use std::time::{Duration, Instant};

use httpdump::DumpConfig;
use reqwest::StatusCode;
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn get_reflects_request_over_the_wire() {
    let server = common::start_server(DumpConfig::default()).await;
    let res = common::client()
        .get(server.url("/get?x=1&x=2"))
        .header("User-Agent", "endpoints-test")
        .header("X-Forwarded-For", "2.2.2.2")
        .send()
        .await
        .expect("server unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["args"]["x"], json!(["1", "2"]));
    assert_eq!(body["headers"]["Host"], json!([server.addr.to_string()]));
    assert_eq!(body["headers"]["User-Agent"], json!(["endpoints-test"]));
    // the test client connects from loopback, so the proxy hop is dropped
    assert_eq!(body["origin"], "2.2.2.2");
    assert_eq!(body["url"], format!("http://{}/get?x=1&x=2", server.addr));
}

#[tokio::test]
async fn ip_reports_peer_address() {
    let server = common::start_server(DumpConfig::default()).await;
    let body: Value = common::client()
        .get(server.url("/ip"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"origin": "127.0.0.1"}));
}

#[tokio::test]
async fn stream_delivers_clamped_documents() {
    let server = common::start_server(DumpConfig::default()).await;
    let client = common::client();

    let reference: Value = client
        .get(server.url("/get"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let text = client
        .get(server.url("/stream/250"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let docs: Vec<Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(docs.len(), 100);
    for doc in &docs {
        assert_eq!(doc["args"], reference["args"]);
        assert_eq!(doc["origin"], reference["origin"]);
        assert_eq!(doc["headers"]["Host"], reference["headers"]["Host"]);
        assert_eq!(doc["url"], format!("http://{}/stream/250", server.addr));
    }
}

#[tokio::test]
async fn pretty_stream_stays_line_delimited() {
    let mut config = DumpConfig::default();
    config.output.pretty = true;
    let server = common::start_server(config).await;
    let text = common::client()
        .get(server.url("/stream/3"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    let docs: Vec<Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(docs.len(), 3);
}

#[tokio::test]
async fn status_codes_on_the_wire() {
    let server = common::start_server(DumpConfig::default()).await;
    let client = common::client();

    let res = client.get(server.url("/status/777")).send().await.unwrap();
    assert_eq!(res.status().as_u16(), 777);

    for path in ["/status/100", "/status/101"] {
        let res = client.get(server.url(path)).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{}", path);
        assert_eq!(
            res.text().await.unwrap(),
            "status code must be in range: 200 - 999\n"
        );
    }
}

#[tokio::test]
async fn bytes_exact_length() {
    let server = common::start_server(DumpConfig::default()).await;
    let client = common::client();

    let res = client.get(server.url("/bytes/102400")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.bytes().await.unwrap().len(), 102_400);

    let res = client.get(server.url("/bytes/102401")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn gzip_is_verifiably_compressed() {
    let server = common::start_server(DumpConfig::default()).await;
    // reqwest (gzip feature) advertises gzip and decodes transparently
    let body: Value = common::client()
        .get(server.url("/gzip"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["gzipped"], true);
}

#[tokio::test]
async fn redirect_is_not_followed() {
    let server = common::start_server(DumpConfig::default()).await;
    let res = common::client()
        .get(server.url("/redirect-to?url=http://example.com/"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()["location"], "http://example.com/");
}

#[tokio::test]
async fn basic_auth_with_client_credentials() {
    let server = common::start_server(DumpConfig::default()).await;
    let client = common::client();

    let res = client
        .get(server.url("/basic-auth/alice/secret"))
        .basic_auth("alice", Some("secret"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({"authenticated": true, "user": "alice"}));

    let res = client
        .get(server.url("/basic-auth/alice/secret"))
        .basic_auth("alice", Some("nope"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(server.url("/hidden-basic-auth/alice/secret"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delay_waits_then_reflects() {
    let server = common::start_server(DumpConfig::default()).await;
    let started = Instant::now();
    let res = common::client()
        .get(server.url("/delay/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(started.elapsed() >= Duration::from_secs(1));
    let body: Value = res.json().await.unwrap();
    assert!(body["headers"].is_object());
}

#[tokio::test]
async fn pretty_output_over_the_wire() {
    let mut config = DumpConfig::default();
    config.output.pretty = true;
    let server = common::start_server(config).await;
    let text = common::client()
        .get(server.url("/user-agent"))
        .header("User-Agent", "pretty")
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(text, "{\n\t\"user-agent\": \"pretty\"\n}");
}

#[tokio::test]
async fn preflight_from_browser_origin() {
    let server = common::start_server(DumpConfig::default()).await;
    let res = common::client()
        .request(reqwest::Method::OPTIONS, server.url("/status/500"))
        .header("Origin", "https://page.test")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["access-control-allow-origin"], "https://page.test");
    assert!(res.text().await.unwrap().is_empty());
}
