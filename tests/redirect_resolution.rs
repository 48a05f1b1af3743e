//! Integration tests for HEAD-based redirect resolution.

use httptest::{matchers::*, responders::*, Expectation, Server};

use phish_signals::initialization::init_client;
use phish_signals::{resolve_final_url, Config};

#[tokio::test]
async fn test_resolve_follows_redirect_chain() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("HEAD", "/short"))
            .respond_with(status_code(301).append_header("Location", "/mid")),
    );
    server.expect(
        Expectation::matching(request::method_path("HEAD", "/mid"))
            .respond_with(status_code(302).append_header("Location", "/final")),
    );
    server.expect(
        Expectation::matching(request::method_path("HEAD", "/final"))
            .respond_with(status_code(200)),
    );

    let client = init_client(&Config::default()).expect("client builds");
    let url = format!("http://{}/short", server.addr());
    let resolved = resolve_final_url(&client, &url).await;

    assert_eq!(
        resolved.as_deref(),
        Some(format!("http://{}/final", server.addr()).as_str())
    );
}

#[tokio::test]
async fn test_resolve_without_redirect_returns_same_url() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("HEAD", "/here"))
            .respond_with(status_code(200)),
    );

    let client = init_client(&Config::default()).expect("client builds");
    let url = format!("http://{}/here", server.addr());
    let resolved = resolve_final_url(&client, &url).await;

    assert_eq!(resolved.as_deref(), Some(url.as_str()));
}

#[tokio::test]
async fn test_resolve_network_failure_is_none() {
    let client = init_client(&Config::default()).expect("client builds");
    assert_eq!(resolve_final_url(&client, "http://127.0.0.1:1/").await, None);
}

#[tokio::test]
async fn test_resolve_malformed_url_is_none() {
    let client = init_client(&Config::default()).expect("client builds");
    assert_eq!(resolve_final_url(&client, "not a url").await, None);
}

#[tokio::test]
async fn test_resolve_returns_url_even_for_error_status() {
    // A 404 is still a terminal URL; only transport failures collapse to None
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("HEAD", "/missing"))
            .respond_with(status_code(404)),
    );

    let client = init_client(&Config::default()).expect("client builds");
    let url = format!("http://{}/missing", server.addr());
    assert_eq!(
        resolve_final_url(&client, &url).await.as_deref(),
        Some(url.as_str())
    );
}
