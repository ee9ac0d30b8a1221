//! Tests for the HTTP binding
use super::*;
use crate::domain::{AddressSpaceConfig, ErrorBody, HealthBody, PeerRecord, RegistryConfig};
use crate::ports::PeerRegistryApi;
use crate::service::RegistryService;
use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use std::collections::HashSet;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tower::ServiceExt;

fn service() -> Arc<RegistryService> {
    Arc::new(RegistryService::new(RegistryConfig::default()).unwrap())
}

/// Router that sees every request as coming from `ip:40000`.
fn app_from(service: &Arc<RegistryService>, ip: [u8; 4]) -> Router {
    let api: Arc<dyn PeerRegistryApi> = service.clone();
    router(api).layer(MockConnectInfo(SocketAddr::from((ip, 40000))))
}

async fn send(app: Router, method: Method, uri: &str, body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn join(
    service: &Arc<RegistryService>,
    ip: [u8; 4],
    node: &str,
    key: &str,
    port: u16,
) -> (StatusCode, String) {
    let body = serde_json::json!({ "node_id": node, "pubkey_b64": key, "udp_port": port });
    send(app_from(service, ip), Method::POST, "/join", &body.to_string()).await
}

fn find<'a>(roster: &'a [PeerRecord], node: &str) -> &'a PeerRecord {
    roster.iter().find(|p| p.node_id.as_str() == node).unwrap()
}

#[tokio::test]
async fn test_join_worked_scenario_over_http() {
    let service = service();

    let (status, body) = join(&service, [203, 0, 113, 5], "A", "pk1", 51820).await;
    assert_eq!(status, StatusCode::OK);
    let roster: Vec<PeerRecord> = serde_json::from_str(&body).unwrap();
    let a = find(&roster, "A");
    assert_eq!(a.endpoint.to_string(), "203.0.113.5:51820");
    assert_eq!(a.virtual_ip.to_string(), "10.0.0.2");

    let (_, body) = join(&service, [203, 0, 113, 9], "B", "pk2", 51821).await;
    let roster: Vec<PeerRecord> = serde_json::from_str(&body).unwrap();
    assert_eq!(find(&roster, "B").virtual_ip.to_string(), "10.0.0.3");
    assert_eq!(roster.len(), 2);

    let (_, body) = join(&service, [203, 0, 113, 5], "A", "pk1", 51830).await;
    let roster: Vec<PeerRecord> = serde_json::from_str(&body).unwrap();
    let a = find(&roster, "A");
    assert_eq!(a.virtual_ip.to_string(), "10.0.0.2");
    assert_eq!(a.endpoint.to_string(), "203.0.113.5:51830");
    assert_eq!(roster.len(), 2);
}

#[tokio::test]
async fn test_join_response_is_pretty_printed_json() {
    let service = service();
    let app = app_from(&service, [203, 0, 113, 5]);
    let request = Request::builder()
        .method(Method::POST)
        .uri("/join")
        .body(Body::from(
            r#"{"node_id":"A","pubkey_b64":"pk1","udp_port":51820}"#,
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    let expected = "[\n  {\n    \"node_id\": \"A\",\n    \"pubkey_b64\": \"pk1\",\n    \"endpoint\": \"203.0.113.5:51820\",\n    \"virtual_ip\": \"10.0.0.2\"\n  }\n]";
    assert_eq!(text, expected);
}

#[tokio::test]
async fn test_malformed_join_is_client_error_and_leaves_registry() {
    let service = service();
    join(&service, [203, 0, 113, 5], "A", "pk1", 51820).await;

    let bad_bodies = [
        "",
        "not json",
        "{\"node_id\": \"B\"}",
        "{\"node_id\": \"B\", \"pubkey_b64\": \"k\", \"udp_port\": \"x\"}",
        "{\"node_id\": \"B\", \"pubkey_b64\": \"k\", \"udp_port\": 65536}",
        "[1, 2, 3]",
    ];
    for bad in bad_bodies {
        let (status, body) = send(
            app_from(&service, [203, 0, 113, 9]),
            Method::POST,
            "/join",
            bad,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {:?}", bad);
        let error: ErrorBody = serde_json::from_str(&body).unwrap();
        assert_eq!(error.error, "malformed_request");
    }

    assert_eq!(service.peers().len(), 1);
    assert_eq!(service.stats().addresses_allocated, 1);
}

#[tokio::test]
async fn test_peers_returns_joined_set() {
    let service = service();
    let (status, body) = send(app_from(&service, [127, 0, 0, 1]), Method::GET, "/peers", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");

    for (i, node) in ["n1", "n2", "n3", "n2", "n1"].iter().enumerate() {
        join(&service, [198, 51, 100, i as u8], node, "k", 5000).await;
    }

    let (status, body) = send(app_from(&service, [127, 0, 0, 1]), Method::GET, "/peers", "").await;
    assert_eq!(status, StatusCode::OK);
    let roster: Vec<PeerRecord> = serde_json::from_str(&body).unwrap();
    let ids: HashSet<&str> = roster.iter().map(|p| p.node_id.as_str()).collect();
    assert_eq!(roster.len(), 3);
    assert_eq!(ids, HashSet::from(["n1", "n2", "n3"]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_http_joins_get_distinct_addresses() {
    const NODES: usize = 50;
    let service = service();

    let tasks: Vec<_> = (0..NODES)
        .map(|i| {
            let service = Arc::clone(&service);
            tokio::spawn(async move {
                let node = format!("node-{}", i);
                let (status, _) = join(&service, [203, 0, 113, i as u8], &node, "k", 51820).await;
                assert_eq!(status, StatusCode::OK);
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    let roster = service.peers();
    let addrs: HashSet<_> = roster.iter().map(|p| p.virtual_ip).collect();
    assert_eq!(roster.len(), NODES);
    assert_eq!(addrs.len(), NODES);
}

#[tokio::test]
async fn test_exhausted_space_returns_service_unavailable() {
    let config = RegistryConfig {
        address_space: AddressSpaceConfig {
            network: Ipv4Addr::new(10, 0, 0, 0),
            prefix_len: 30,
            first_host_offset: 2,
        },
    };
    let service = Arc::new(RegistryService::new(config).unwrap());

    let (status, _) = join(&service, [192, 0, 2, 1], "first", "k", 1).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = join(&service, [192, 0, 2, 2], "second", "k", 1).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let error: ErrorBody = serde_json::from_str(&body).unwrap();
    assert_eq!(error.error, "address_space_exhausted");

    // Existing node may still refresh
    let (status, _) = join(&service, [192, 0, 2, 3], "first", "k2", 2).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(service.peers().len(), 1);
}

#[tokio::test]
async fn test_wrong_methods_are_rejected() {
    let service = service();
    let (status, _) = send(app_from(&service, [127, 0, 0, 1]), Method::GET, "/join", "").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = send(app_from(&service, [127, 0, 0, 1]), Method::POST, "/peers", "{}").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = send(app_from(&service, [127, 0, 0, 1]), Method::GET, "/nope", "").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(service.peers().is_empty());
}

#[tokio::test]
async fn test_health_reports_counters() {
    let service = service();
    join(&service, [192, 0, 2, 1], "A", "k", 1).await;

    let (status, body) = send(app_from(&service, [127, 0, 0, 1]), Method::GET, "/health", "").await;
    assert_eq!(status, StatusCode::OK);
    let health: HealthBody = serde_json::from_str(&body).unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.service, "overlay-controller");
    assert_eq!(health.peers, 1);
    assert_eq!(health.addresses_allocated, 1);
    assert_eq!(health.addresses_remaining, 252);
}
