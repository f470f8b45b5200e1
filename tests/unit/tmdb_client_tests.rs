/*!
 * Tests for the TMDB client against a local stub HTTP server
 */

use std::sync::atomic::Ordering;

use dualsub::errors::MetadataError;
use dualsub::metadata::{Catalog, EntryKind, MetadataResolver, TmdbClient};

use crate::common::stub_server::{spawn_routed_stub_server, spawn_stub_server, StubRoute};

const PLACEHOLDER: &str = "No plot summary available.";

fn client_for(addr: std::net::SocketAddr) -> TmdbClient {
    TmdbClient::new("tmdb-key", format!("http://{}/3", addr), "en-US", 5)
}

#[tokio::test]
async fn test_search_withServerError_shouldReturnStatusError() {
    let (addr, hits) = spawn_stub_server("500 Internal Server Error", r#"{"status_message":"boom"}"#).await;

    let result = client_for(addr).search("Inception", EntryKind::Film).await;

    assert!(matches!(result, Err(MetadataError::Status { status_code: 500, .. })));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_details_withMalformedBody_shouldReturnParseError() {
    let (addr, _) = spawn_stub_server("200 OK", "not json").await;

    let result = client_for(addr).details(27205, EntryKind::Film).await;

    assert!(matches!(result, Err(MetadataError::Parse(_))));
}

#[tokio::test]
async fn test_search_withUnreachableServer_shouldReturnTransportError() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = client_for(addr).search("Inception", EntryKind::Film).await;

    assert!(matches!(result, Err(MetadataError::Transport(_))));
}

#[tokio::test]
async fn test_resolve_withOnlySeriesHit_shouldReturnSeriesOverview() {
    let (addr, hits) = spawn_routed_stub_server(vec![
        StubRoute {
            path_prefix: "/3/search/movie",
            status_line: "200 OK",
            body: r#"{"page":1,"results":[],"total_results":0}"#,
        },
        StubRoute {
            path_prefix: "/3/search/tv",
            status_line: "200 OK",
            body: r#"{"page":1,"results":[{"id":70523,"name":"Dark"}]}"#,
        },
        StubRoute {
            path_prefix: "/3/tv/70523",
            status_line: "200 OK",
            body: r#"{"id":70523,"name":"Dark","overview":"Four families in a German town."}"#,
        },
    ]).await;
    let resolver = MetadataResolver::new(Box::new(client_for(addr)), PLACEHOLDER);

    let entry = resolver.resolve("Dark").await.unwrap();

    assert_eq!(entry.kind, EntryKind::Series);
    assert_eq!(entry.title, "Dark");
    assert_eq!(entry.overview, "Four families in a German town.");
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_contextFor_withCatalogDown_shouldReturnPlaceholder() {
    let (addr, _) = spawn_stub_server("503 Service Unavailable", "").await;
    let resolver = MetadataResolver::new(Box::new(client_for(addr)), PLACEHOLDER);

    assert_eq!(resolver.context_for("Inception").await, PLACEHOLDER);
}
