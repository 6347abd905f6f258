//! Paginated fetch tests against a mock Graph API.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scholar_pubs::{ClientError, ScholarClient, config::Config};

const PAPERS_PATH: &str = "/graph/v1/author/1796400/papers";

fn papers(offset: usize, count: usize) -> Value {
    let data: Vec<Value> = (offset..offset + count)
        .map(|i| json!({"paperId": format!("p{i}"), "title": format!("Paper number {i}")}))
        .collect();
    json!({"offset": offset, "data": data})
}

async fn mount_page(server: &MockServer, offset: usize, count: usize) {
    Mock::given(method("GET"))
        .and(path(PAPERS_PATH))
        .and(query_param("offset", offset.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(papers(offset, count)))
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> ScholarClient {
    ScholarClient::new(Config::for_testing(&server.uri())).unwrap()
}

// =============================================================================
// Paging
// =============================================================================

#[tokio::test]
async fn test_fetch_all_pages_until_short_page() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 2).await;
    mount_page(&server, 2, 2).await;
    mount_page(&server, 4, 1).await;

    let report = client_for(&server).fetch_all_report("1796400", 2).await;

    assert_eq!(report.records.len(), 5);
    assert_eq!(report.pages, 3);
    assert!(!report.stopped_early);
    assert!(report.backoffs.is_empty());
    let ids: Vec<_> = report.records.iter().map(|r| r["paperId"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["p0", "p1", "p2", "p3", "p4"]);
}

#[tokio::test]
async fn test_fetch_stops_on_empty_page() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 2).await;
    mount_page(&server, 2, 0).await;

    let records = client_for(&server).fetch_all("1796400", 2).await;
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_fetch_author_without_papers() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 0).await;

    let report = client_for(&server).fetch_all_report("1796400", 50).await;
    assert!(report.records.is_empty());
    assert_eq!(report.pages, 0);
    assert!(!report.stopped_early);
}

#[tokio::test]
async fn test_fetch_requests_field_selection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PAPERS_PATH))
        .and(query_param("limit", "50"))
        .and(query_param(
            "fields",
            "paperId,title,authors,venue,year,citationCount,influentialCitationCount,\
             publicationVenue,publicationDate,abstract,externalIds,publicationTypes",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(papers(0, 1)))
        .expect(1)
        .mount(&server)
        .await;

    let records = client_for(&server).fetch_all("1796400", 50).await;
    assert_eq!(records.len(), 1);
}

// =============================================================================
// Retry and backoff
// =============================================================================

#[tokio::test]
async fn test_rate_limit_backs_off_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PAPERS_PATH))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    mount_page(&server, 0, 1).await;

    let start = Instant::now();
    let report = client_for(&server).fetch_all_report("1796400", 50).await;

    assert_eq!(report.records.len(), 1);
    assert!(!report.stopped_early);
    assert_eq!(report.backoffs, vec![Duration::from_millis(10), Duration::from_millis(20)]);
    assert!(start.elapsed() >= Duration::from_millis(30));
}

#[tokio::test]
async fn test_exhausted_retries_keep_partial_results() {
    let server = MockServer::start().await;
    mount_page(&server, 0, 2).await;
    Mock::given(method("GET"))
        .and(path(PAPERS_PATH))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let report = client_for(&server).fetch_all_report("1796400", 2).await;

    assert_eq!(report.records.len(), 2);
    assert!(report.stopped_early);
    assert_eq!(report.backoffs.len(), 2);
}

#[tokio::test]
async fn test_not_found_stops_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PAPERS_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_string("Author not found"))
        .expect(1)
        .mount(&server)
        .await;

    let report = client_for(&server).fetch_all_report("1796400", 50).await;

    assert!(report.records.is_empty());
    assert!(report.stopped_early);
    assert!(report.backoffs.is_empty());
}

#[tokio::test]
async fn test_malformed_page_body_stops_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PAPERS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let report = client_for(&server).fetch_all_report("1796400", 50).await;
    assert!(report.records.is_empty());
    assert!(report.stopped_early);
}

#[tokio::test]
async fn test_slow_page_times_out_and_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PAPERS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(papers(0, 1)).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let mut config = Config::for_testing(&server.uri());
    config.request_timeout = Duration::from_millis(50);
    let client = ScholarClient::new(config).unwrap();

    let report = client.fetch_all_report("1796400", 50).await;
    assert!(report.records.is_empty());
    assert!(report.stopped_early);
    assert_eq!(report.backoffs.len(), 2);

    let err = client.get_author_papers("1796400", 0, 50).await.unwrap_err();
    assert!(matches!(err, ClientError::Timeout(t) if t == Duration::from_millis(50)));
}

/// Serves a header promising more body than it sends, then hangs up.
async fn truncating_server(hits: Arc<AtomicU32>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            hits.fetch_add(1, Ordering::SeqCst);
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
                      Content-Length: 500\r\nConnection: close\r\n\r\n{\"data\": [",
                )
                .await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn test_broken_body_is_retried() {
    let hits = Arc::new(AtomicU32::new(0));
    let base_url = truncating_server(Arc::clone(&hits)).await;

    let report = ScholarClient::new(Config::for_testing(&base_url))
        .unwrap()
        .fetch_all_report("1796400", 50)
        .await;

    assert!(report.records.is_empty());
    assert!(report.stopped_early);
    assert_eq!(report.backoffs.len(), 2);
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

// =============================================================================
// Single requests
// =============================================================================

#[tokio::test]
async fn test_api_key_header_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PAPERS_PATH))
        .and(header("x-api-key", "secret-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(papers(0, 1)))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = Config::for_testing(&server.uri());
    config.api_key = Some("secret-key".to_string());
    let client = ScholarClient::new(config).unwrap();

    assert_eq!(client.fetch_all("1796400", 50).await.len(), 1);
}

#[tokio::test]
async fn test_get_author_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/graph/v1/author/1796400"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "authorId": "1796400",
            "name": "Iain M. Cheeseman",
            "affiliations": null,
            "paperCount": 180,
            "citationCount": 15000,
            "hIndex": 60
        })))
        .mount(&server)
        .await;

    let author = client_for(&server).get_author("1796400").await.unwrap();
    assert_eq!(author.name_or_default(), "Iain M. Cheeseman");
    assert_eq!(author.paper_count, Some(180));
    assert!(author.affiliations.is_empty());
}

#[tokio::test]
async fn test_get_author_rate_limited_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/graph/v1/author/1796400"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_author("1796400").await.unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(err.retry_after(), Some(Duration::from_secs(7)));
    assert!(matches!(err, ClientError::RateLimited { .. }));
}
