//! End-to-end forwarding tests: real sockets on both sides of the gateway.

use axum::http::{Method, StatusCode};
use inspiration_gateway::lifecycle::Shutdown;

mod common;
use common::Canned;

#[tokio::test]
async fn test_create_profile_end_to_end() {
    let (upstream, seen) =
        common::start_upstream(Canned::json(201, r#"{"id":"p1","name":"X"}"#)).await;
    let shutdown = Shutdown::new();
    let gateway =
        common::start_gateway(common::gateway_config(&format!("http://{}", upstream)), &shutdown).await;

    let res = common::http_client()
        .post(format!("{}/api/inspirations", gateway))
        .header("content-type", "application/json")
        .body(r#"{"name":"X"}"#)
        .send()
        .await
        .expect("Gateway unreachable");

    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(res.text().await.unwrap(), r#"{"id":"p1","name":"X"}"#);

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, Method::POST);
    assert_eq!(seen[0].path, "/profiles");
    assert_eq!(seen[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(&seen[0].body[..], br#"{"name":"X"}"#);

    shutdown.trigger();
}

#[tokio::test]
async fn test_feed_success_is_verbatim_and_no_store() {
    // Odd spacing and key order must survive untouched.
    let body = r#"{ "feed" : [ {"title":"b","id":"2"} ] }"#;
    let (upstream, seen) = common::start_upstream(Canned::json(200, body)).await;
    let shutdown = Shutdown::new();
    // Trailing slash on the configured origin.
    let gateway =
        common::start_gateway(common::gateway_config(&format!("http://{}/", upstream)), &shutdown).await;

    let res = common::http_client()
        .get(format!("{}/api/feed", gateway))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["cache-control"], "no-store");
    assert_eq!(res.text().await.unwrap(), body);

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen[0].method, Method::GET);
    assert_eq!(seen[0].path, "/feed");
    assert!(seen[0].body.is_empty());
    assert_eq!(seen[0].content_type, None);

    shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_failure_is_relayed_verbatim() {
    let (upstream, _) = common::start_upstream(Canned::text(404, "profile abc-123 not found")).await;
    let shutdown = Shutdown::new();
    let gateway =
        common::start_gateway(common::gateway_config(&format!("http://{}", upstream)), &shutdown).await;

    let res = common::http_client()
        .delete(format!("{}/api/inspirations/abc-123", gateway))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.unwrap(), "profile abc-123 not found");

    shutdown.trigger();
}

#[tokio::test]
async fn test_upstream_server_error_json_is_relayed() {
    let body = r#"{"detail":"analysis queue full"}"#;
    let (upstream, seen) = common::start_upstream(Canned::json(503, body)).await;
    let shutdown = Shutdown::new();
    let gateway =
        common::start_gateway(common::gateway_config(&format!("http://{}", upstream)), &shutdown).await;

    let res = common::http_client()
        .post(format!("{}/api/inspirations/abc-123/analyze", gateway))
        .body("ignored")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(res.text().await.unwrap(), body);

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1, "no retries");
    assert_eq!(seen[0].path, "/profiles/abc-123/analyze");
    assert!(seen[0].body.is_empty(), "analyze forwards no body");

    shutdown.trigger();
}

#[tokio::test]
async fn test_read_route_failure_is_still_no_store() {
    let (upstream, _) = common::start_upstream(Canned::text(500, "boom")).await;
    let shutdown = Shutdown::new();
    let gateway =
        common::start_gateway(common::gateway_config(&format!("http://{}", upstream)), &shutdown).await;

    let res = common::http_client()
        .get(format!("{}/api/inspirations", gateway))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.headers()["cache-control"], "no-store");
    assert_eq!(res.text().await.unwrap(), "boom");

    shutdown.trigger();
}

#[tokio::test]
async fn test_update_substitutes_path_param() {
    let (upstream, seen) =
        common::start_upstream(Canned::json(200, r#"{"id":"abc-123","name":"Y"}"#)).await;
    let shutdown = Shutdown::new();
    let gateway =
        common::start_gateway(common::gateway_config(&format!("http://{}", upstream)), &shutdown).await;

    let res = common::http_client()
        .put(format!("{}/api/inspirations/abc-123", gateway))
        .body(r#"{"name":"Y"}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get("cache-control").is_none());

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen[0].method, Method::PUT);
    assert_eq!(seen[0].path, "/profiles/abc-123");
    assert_eq!(seen[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(&seen[0].body[..], br#"{"name":"Y"}"#);

    shutdown.trigger();
}

#[tokio::test]
async fn test_generate_scripts_route() {
    let (upstream, seen) =
        common::start_upstream(Canned::json(200, r#"{"success":true,"scripts_generated":4}"#)).await;
    let shutdown = Shutdown::new();
    let gateway =
        common::start_gateway(common::gateway_config(&format!("http://{}", upstream)), &shutdown).await;

    let res = common::http_client()
        .post(format!("{}/api/documents/doc-7/generate-scripts", gateway))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen[0].method, Method::POST);
    assert_eq!(seen[0].path, "/generate-scripts/doc-7");

    shutdown.trigger();
}

#[tokio::test]
async fn test_transport_failure_is_bad_gateway() {
    let dead = common::closed_port().await;
    let shutdown = Shutdown::new();
    let gateway =
        common::start_gateway(common::gateway_config(&format!("http://{}", dead)), &shutdown).await;

    let res = common::http_client()
        .get(format!("{}/api/feed", gateway))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(res.headers()["cache-control"], "no-store");
    let body = res.text().await.unwrap();
    assert!(body.starts_with("Upstream error: "), "body was: {}", body);
    assert!(body.contains(&dead.to_string()), "error text should name the target: {}", body);

    shutdown.trigger();
}

#[tokio::test]
async fn test_non_json_success_body_is_bad_gateway() {
    let (upstream, _) = common::start_upstream(Canned::text(200, "<html>maintenance</html>")).await;
    let shutdown = Shutdown::new();
    let gateway =
        common::start_gateway(common::gateway_config(&format!("http://{}", upstream)), &shutdown).await;

    let res = common::http_client()
        .get(format!("{}/api/feed", gateway))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    assert!(res.text().await.unwrap().starts_with("Upstream error: "));

    shutdown.trigger();
}

#[tokio::test]
async fn test_request_id_is_propagated_upstream() {
    let (upstream, seen) = common::start_upstream(Canned::json(200, r#"{"profiles":[]}"#)).await;
    let shutdown = Shutdown::new();
    let gateway =
        common::start_gateway(common::gateway_config(&format!("http://{}", upstream)), &shutdown).await;

    let client = common::http_client();
    let res = client
        .get(format!("{}/api/inspirations", gateway))
        .header("x-request-id", "trace-me-1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-me-1");

    let res = client
        .get(format!("{}/api/inspirations", gateway))
        .send()
        .await
        .unwrap();
    let minted = res.headers()["x-request-id"].to_str().unwrap().to_string();

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen[0].request_id.as_deref(), Some("trace-me-1"));
    assert_eq!(seen[1].request_id.as_deref(), Some(minted.as_str()));

    shutdown.trigger();
}

#[tokio::test]
async fn test_delete_no_content_is_relayed() {
    let (upstream, seen) = common::start_upstream(Canned::text(204, "")).await;
    let shutdown = Shutdown::new();
    let gateway =
        common::start_gateway(common::gateway_config(&format!("http://{}", upstream)), &shutdown).await;

    let res = common::http_client()
        .delete(format!("{}/api/inspirations/p1", gateway))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.headers().get("content-type").is_none());
    assert!(res.headers().get("cache-control").is_none());
    assert!(res.bytes().await.unwrap().is_empty());

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, Method::DELETE);
    assert_eq!(seen[0].path, "/profiles/p1");

    shutdown.trigger();
}

#[tokio::test]
async fn test_analyze_success_is_relayed() {
    let (upstream, seen) =
        common::start_upstream(Canned::json(202, r#"{"status":"queued","profile_id":"p1"}"#)).await;
    let shutdown = Shutdown::new();
    let gateway =
        common::start_gateway(common::gateway_config(&format!("http://{}", upstream)), &shutdown).await;

    let res = common::http_client()
        .post(format!("{}/api/inspirations/p1/analyze", gateway))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::ACCEPTED);
    assert_eq!(res.headers()["content-type"], "application/json");
    assert_eq!(
        res.text().await.unwrap(),
        r#"{"status":"queued","profile_id":"p1"}"#
    );

    let seen = seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, Method::POST);
    assert_eq!(seen[0].path, "/profiles/p1/analyze");
    assert!(seen[0].body.is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_invalid_json_body_is_never_forwarded() {
    let (upstream, seen) = common::start_upstream(Canned::json(201, r#"{"id":"p1"}"#)).await;
    let shutdown = Shutdown::new();
    let gateway =
        common::start_gateway(common::gateway_config(&format!("http://{}", upstream)), &shutdown).await;

    let res = common::http_client()
        .post(format!("{}/api/inspirations", gateway))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_GATEWAY);
    assert!(res
        .text()
        .await
        .unwrap()
        .starts_with("Upstream error: invalid JSON body: "));
    assert!(seen.lock().unwrap().is_empty());

    shutdown.trigger();
}
