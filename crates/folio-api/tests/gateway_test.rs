#![allow(clippy::unwrap_used)]
// Integration tests for `Gateway` using wiremock: envelope
// classification, loader visibility, conflict handling, notifications.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use folio_api::{Error, Gateway, RequestOptions};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Gateway) {
    // A dedicated (non-pooled) server, so dropping it shuts the
    // listener down as the connection-refused test relies on.
    let server = MockServer::builder().start().await;
    let base_url = server.uri().parse().unwrap();
    let gateway = Gateway::from_reqwest(reqwest::Client::new(), base_url);
    (server, gateway)
}

fn ok_envelope(data: serde_json::Value) -> serde_json::Value {
    json!({ "code": "OK", "data": data })
}

// ── Envelope classification ─────────────────────────────────────────

#[tokio::test]
async fn ok_code_yields_payload() {
    let (server, gateway) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!(42))))
        .mount(&server)
        .await;

    let n: i64 = gateway.get("api/ping").await.unwrap();
    assert_eq!(n, 42);
}

#[tokio::test]
async fn missing_code_yields_payload() {
    let (server, gateway) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": "pong" })))
        .mount(&server)
        .await;

    let s: String = gateway.get("api/ping").await.unwrap();
    assert_eq!(s, "pong");
}

#[tokio::test]
async fn error_code_in_200_response_is_application_failure() {
    let (server, gateway) = setup().await;
    let mut notices = gateway.notices();

    Mock::given(method("GET"))
        .and(path("/api/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": "ERR", "detail": "bad", "data": null
        })))
        .mount(&server)
        .await;

    let result: Result<i64, Error> = gateway.get("api/ping").await;
    match result {
        Err(Error::Application { code, message }) => {
            assert_eq!(code, "ERR");
            assert_eq!(message, "bad");
        }
        other => panic!("expected Application error, got: {other:?}"),
    }

    // Application failures never hit the notification channel.
    assert!(notices.try_recv().is_err());
    assert!(!gateway.is_loading());
}

#[tokio::test]
async fn malformed_envelope_is_deserialization_failure() {
    let (server, gateway) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let result: Result<i64, Error> = gateway.get("api/ping").await;
    assert!(matches!(result, Err(Error::Deserialization { .. })));
    assert!(!gateway.is_loading());
}

// ── Transport failure side effects ──────────────────────────────────

#[tokio::test]
async fn transport_failure_notifies_once_and_clears_loader() {
    let (server, gateway) = setup().await;
    let mut notices = gateway.notices();

    Mock::given(method("GET"))
        .and(path("/api/ping"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let result: Result<i64, Error> = gateway.get("api/ping").await;
    match result {
        Err(Error::Http { status, ref message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }

    let notice = notices.try_recv().expect("one notification");
    assert!(notice.contains("boom"), "got: {notice}");
    assert!(notices.try_recv().is_err(), "exactly one notification");
    assert!(!gateway.is_loading());
}

#[tokio::test]
async fn connection_refused_is_transport_failure() {
    // Point at a server that has already shut down.
    let (server, gateway) = setup().await;
    let mut notices = gateway.notices();
    drop(server);

    let result: Result<i64, Error> = gateway.get("api/ping").await;
    assert!(matches!(result, Err(Error::Transport(_))));
    assert!(notices.try_recv().is_ok());
    assert!(!gateway.is_loading());
}

// ── Loader visibility ───────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn loader_is_visible_exactly_while_calls_are_in_flight() {
    let (server, gateway) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(json!(1)))
                .set_delay(Duration::from_millis(100)),
        )
        .mount(&server)
        .await;

    let mut rx = gateway.loader();
    assert!(!*rx.borrow_and_update());

    let g = gateway.clone();
    let handle = tokio::spawn(async move { g.get::<i64>("api/slow").await });

    rx.changed().await.unwrap();
    assert!(*rx.borrow_and_update(), "visible while in flight");

    rx.changed().await.unwrap();
    assert!(!*rx.borrow_and_update(), "hidden after arrival");

    handle.await.unwrap().unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn loader_stays_visible_across_overlapping_calls() {
    let (server, gateway) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/fast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(json!(1)))
                .set_delay(Duration::from_millis(50)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(json!(2)))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;

    let mut rx = gateway.loader();
    rx.borrow_and_update();

    let g1 = gateway.clone();
    let g2 = gateway.clone();
    let h1 = tokio::spawn(async move { g1.get::<i64>("api/fast").await });
    let h2 = tokio::spawn(async move { g2.get::<i64>("api/slow").await });

    // Record every transition until the loader hides. A flicker between
    // the two arrivals would show up as extra transitions.
    let mut transitions = Vec::new();
    loop {
        rx.changed().await.unwrap();
        let v = *rx.borrow_and_update();
        transitions.push(v);
        if !v {
            break;
        }
    }
    assert_eq!(transitions, vec![true, false]);

    h1.await.unwrap().unwrap();
    h2.await.unwrap().unwrap();
}

#[tokio::test]
async fn background_call_skips_the_loader() {
    let (server, gateway) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/quiet"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!(9))))
        .mount(&server)
        .await;

    let mut rx = gateway.loader();
    rx.borrow_and_update();

    let n: i64 = gateway
        .get_opts("api/quiet", RequestOptions::background())
        .await
        .unwrap();
    assert_eq!(n, 9);
    assert!(!rx.has_changed().unwrap(), "loader never toggled");
}

// ── Superseded duplicates ───────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn stale_duplicate_response_is_discarded() {
    let (server, gateway) = setup().await;

    // First request hits the delayed mock, the second the fast one.
    Mock::given(method("GET"))
        .and(path("/api/book"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_envelope(json!("old")))
                .set_delay(Duration::from_millis(300)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/book"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!("new"))))
        .mount(&server)
        .await;

    let g = gateway.clone();
    let first = tokio::spawn(async move { g.get::<String>("api/book").await });
    // Give the first request time to reach the server before superseding it.
    tokio::time::sleep(Duration::from_millis(100)).await;

    gateway.mark_conflicted("api/book");
    let second = gateway.get::<String>("api/book").await.unwrap();
    assert_eq!(second, "new");

    match first.await.unwrap() {
        Err(Error::Superseded { path }) => assert_eq!(path, "api/book"),
        other => panic!("expected Superseded, got: {other:?}"),
    }
    assert!(!gateway.is_loading(), "conflict purge left nothing behind");
}
