use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use quadsweep::{
    CrawlConfig, CrawlError, MemorySink, PartitionScheduler, Query, Region, SearchFilters,
    SearchProvider,
};
use quadsweep_client::HttpSearchProvider;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

async fn serve(app: Router) -> anyhow::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(addr)
}

fn query() -> Query {
    Query::new(
        Region::new(0.0, 0.0, 2.0, 2.0).unwrap(),
        SearchFilters::default(),
    )
}

/// 4000 matches over the whole square, 800 in each quadrant. Items echo the
/// bounds the request asked for.
async fn fake_search(headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    if headers.get("x-client").and_then(|v| v.to_str().ok()) != Some("quadsweep-test") {
        return (StatusCode::FORBIDDEN, Json(json!({"error": "unknown client"})));
    }
    let bounds = &body["regionParameters"]["boundaries"];
    let width = bounds["eastLongitude"].as_f64().unwrap_or(0.0)
        - bounds["westLongitude"].as_f64().unwrap_or(0.0);
    let count = if width >= 2.0 { 4000 } else { 800 };
    (
        StatusCode::OK,
        Json(json!({
            "searchResultCounts": {"totalMatchingCount": count},
            "searchResults": {"listResults": [{"bounds": bounds, "page": body["paging"]["pageNumber"]}]}
        })),
    )
}

#[tokio::test]
async fn test_execute_parses_count_and_items() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let addr = serve(Router::new().route("/search", post(fake_search))).await?;

    let provider = HttpSearchProvider::builder(format!("http://{}/search", addr))
        .header("X-Client", "quadsweep-test")
        .build()?;

    let result = provider.execute(&query()).await?;
    assert_eq!(result.total_count, 4000);
    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0]["bounds"]["eastLongitude"], 2.0);
    assert_eq!(result.items[0]["page"], 1);
    Ok(())
}

#[tokio::test]
async fn test_client_error_status_is_provider_error() -> anyhow::Result<()> {
    let addr = serve(Router::new().route("/search", post(fake_search))).await?;

    // missing X-Client header
    let provider = HttpSearchProvider::builder(format!("http://{}/search", addr)).build()?;

    let err = provider.execute(&query()).await.unwrap_err();
    assert!(matches!(err, CrawlError::Provider(_)), "{err}");
    Ok(())
}

#[tokio::test]
async fn test_server_error_status_is_network_error() -> anyhow::Result<()> {
    let app = Router::new().route(
        "/search",
        post(|| async { (StatusCode::SERVICE_UNAVAILABLE, "try later") }),
    );
    let addr = serve(app).await?;
    let provider = HttpSearchProvider::builder(format!("http://{}/search", addr)).build()?;

    let err = provider.execute(&query()).await.unwrap_err();
    assert!(err.is_network(), "{err}");
    Ok(())
}

#[tokio::test]
async fn test_malformed_body_is_provider_error() -> anyhow::Result<()> {
    let app = Router::new().route(
        "/search",
        post(|| async { Json(json!({"searchResults": {"listResults": []}})) }),
    );
    let addr = serve(app).await?;
    let provider = HttpSearchProvider::builder(format!("http://{}/search", addr)).build()?;

    let err = provider.execute(&query()).await.unwrap_err();
    assert!(matches!(err, CrawlError::Provider(_)), "{err}");
    Ok(())
}

#[tokio::test]
async fn test_timeout_is_network_error() -> anyhow::Result<()> {
    let app = Router::new().route(
        "/search",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({"searchResultCounts": {"totalMatchingCount": 1}}))
        }),
    );
    let addr = serve(app).await?;
    let provider = HttpSearchProvider::builder(format!("http://{}/search", addr))
        .timeout(Duration::from_millis(100))
        .build()?;

    let err = provider.execute(&query()).await.unwrap_err();
    assert!(err.is_network(), "{err}");
    Ok(())
}

#[tokio::test]
async fn test_unreachable_endpoint_is_network_error() -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let provider = HttpSearchProvider::builder(format!("http://{}/search", addr)).build()?;
    let err = provider.execute(&query()).await.unwrap_err();
    assert!(err.is_network(), "{err}");
    Ok(())
}

#[tokio::test]
async fn test_scheduler_over_http() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let addr = serve(Router::new().route("/search", post(fake_search))).await?;

    let provider = HttpSearchProvider::builder(format!("http://{}/search", addr))
        .header("X-Client", "quadsweep-test")
        .build()?;
    let sink = Arc::new(MemorySink::new());
    let scheduler = PartitionScheduler::builder()
        .provider(Arc::new(provider))
        .sink(sink.clone())
        .config(CrawlConfig::default())
        .build()?;

    let summary = scheduler.run(query()).await;

    assert_eq!(summary.requests, 5);
    assert_eq!(summary.accepted, 4);
    assert_eq!(summary.failed, 0);

    // each child page was answered for the child's own bounds
    let mut wests: Vec<f64> = sink
        .pages()
        .iter()
        .map(|p| {
            let echoed = &p.items[0]["bounds"];
            assert_eq!(echoed["westLongitude"].as_f64(), Some(p.query.region().west()));
            assert_eq!(echoed["southLatitude"].as_f64(), Some(p.query.region().south()));
            p.query.region().west()
        })
        .collect();
    wests.sort_by(f64::total_cmp);
    assert_eq!(wests, vec![0.0, 0.0, 1.0, 1.0]);
    Ok(())
}
