//! Integration tests for the search providers.
//!
//! These tests verify paging, clamping, early termination, and error
//! surfacing against mock HTTP servers.

use std::time::Duration;

use pdfgrab_core::{
    CustomSearchClient, Credentials, MAX_API_RESULTS, SearchError, SearchProvider, WebSearchClient,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_credentials() -> Credentials {
    Credentials {
        api_key: "test-key".to_string(),
        cx_id: "test-cx".to_string(),
    }
}

fn api_client(mock_server: &MockServer) -> CustomSearchClient {
    CustomSearchClient::with_base_url(test_credentials(), format!("{}/customsearch/v1", mock_server.uri()))
        .with_page_delay(Duration::ZERO)
}

/// Builds a Custom Search JSON body with the given PDF links.
fn items_body(links: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "items": links.iter().map(|link| serde_json::json!({"link": link})).collect::<Vec<_>>()
    })
}

#[tokio::test]
async fn test_api_search_returns_links_in_provider_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items_body(&[
            "https://example.com/first.pdf",
            "https://example.com/second.pdf",
            "https://example.com/third.pdf",
        ])))
        .mount(&mock_server)
        .await;

    let urls = api_client(&mock_server)
        .search("rust filetype:pdf", 3)
        .await
        .unwrap();

    assert_eq!(
        urls,
        vec![
            "https://example.com/first.pdf".to_string(),
            "https://example.com/second.pdf".to_string(),
            "https://example.com/third.pdf".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_api_search_filters_non_pdf_links() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items_body(&[
            "https://example.com/paper.pdf",
            "https://example.com/landing-page.html",
        ])))
        .mount(&mock_server)
        .await;

    let urls = api_client(&mock_server)
        .search("rust filetype:pdf", 10)
        .await
        .unwrap();

    assert_eq!(urls, vec!["https://example.com/paper.pdf".to_string()]);
}

#[tokio::test]
async fn test_api_search_pages_in_batches_of_ten() {
    let mock_server = MockServer::start().await;

    let page_one: Vec<String> = (1..=10)
        .map(|i| format!("https://example.com/p1_{i}.pdf"))
        .collect();
    let page_one_refs: Vec<&str> = page_one.iter().map(String::as_str).collect();

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("start", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items_body(&page_one_refs)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("start", "11"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(items_body(&["https://example.com/p2_1.pdf"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let urls = api_client(&mock_server)
        .search("rust filetype:pdf", 11)
        .await
        .unwrap();

    assert_eq!(urls.len(), 11);
    assert_eq!(urls[10], "https://example.com/p2_1.pdf");
}

#[tokio::test]
async fn test_api_search_pages_past_results_without_pdf_links() {
    let mock_server = MockServer::start().await;

    // A full page of items, none of them PDFs, must not end the paging:
    // only a page with no items at all means the provider ran dry.
    let html_page: Vec<String> = (1..=10)
        .map(|i| format!("https://example.com/{i}.html"))
        .collect();
    let html_refs: Vec<&str> = html_page.iter().map(String::as_str).collect();

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("start", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items_body(&html_refs)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("start", "11"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(items_body(&["https://example.com/real.pdf"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let urls = api_client(&mock_server)
        .search("rust filetype:pdf", 20)
        .await
        .unwrap();

    assert_eq!(urls, vec!["https://example.com/real.pdf".to_string()]);
}

#[tokio::test]
async fn test_api_search_stops_early_when_provider_runs_dry() {
    let mock_server = MockServer::start().await;

    // First page has results, second page has no items field at all.
    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("start", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items_body(&[
            "https://example.com/only.pdf",
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .and(query_param("start", "11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&mock_server)
        .await;

    let urls = api_client(&mock_server)
        .search("rust filetype:pdf", 30)
        .await
        .unwrap();

    assert_eq!(urls, vec!["https://example.com/only.pdf".to_string()]);
}

#[tokio::test]
async fn test_api_search_result_count_never_exceeds_request() {
    let mock_server = MockServer::start().await;

    let many: Vec<String> = (1..=10)
        .map(|i| format!("https://example.com/{i}.pdf"))
        .collect();
    let many_refs: Vec<&str> = many.iter().map(String::as_str).collect();

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items_body(&many_refs)))
        .mount(&mock_server)
        .await;

    let urls = api_client(&mock_server)
        .search("rust filetype:pdf", 4)
        .await
        .unwrap();

    assert_eq!(urls.len(), 4);
}

#[tokio::test]
async fn test_api_search_clamps_count_to_api_maximum() {
    let mock_server = MockServer::start().await;

    let page: Vec<String> = (1..=10)
        .map(|i| format!("https://example.com/{i}.pdf"))
        .collect();
    let page_refs: Vec<&str> = page.iter().map(String::as_str).collect();

    // Clamped to 100 results = at most 10 page requests even for a huge ask.
    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(items_body(&page_refs)))
        .expect(10)
        .mount(&mock_server)
        .await;

    let urls = api_client(&mock_server)
        .search("rust filetype:pdf", 5000)
        .await
        .unwrap();

    assert_eq!(urls.len(), MAX_API_RESULTS);
}

#[tokio::test]
async fn test_api_search_auth_rejection_surfaces() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let result = api_client(&mock_server).search("rust filetype:pdf", 5).await;
    assert!(matches!(
        result,
        Err(SearchError::AuthRejected { status: 403, .. })
    ));
}

#[tokio::test]
async fn test_api_search_quota_error_surfaces() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let result = api_client(&mock_server).search("rust filetype:pdf", 5).await;
    assert!(matches!(result, Err(SearchError::QuotaExceeded { .. })));
}

#[tokio::test]
async fn test_api_search_malformed_json_surfaces() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customsearch/v1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("this is not json"))
        .mount(&mock_server)
        .await;

    let result = api_client(&mock_server).search("rust filetype:pdf", 5).await;
    assert!(matches!(result, Err(SearchError::MalformedResponse { .. })));
}

#[tokio::test]
async fn test_web_search_extracts_pdf_links_from_results_page() {
    let mock_server = MockServer::start().await;

    let page = r#"
        <html><body>
          <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fone.pdf&amp;rut=a">One</a>
          <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Ftwo.pdf&amp;rut=b">Two</a>
          <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com%2Fignored.html&amp;rut=c">Ignored</a>
        </body></html>
    "#;

    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "text/html; charset=utf-8")
                .set_body_string(page),
        )
        .mount(&mock_server)
        .await;

    let client = WebSearchClient::with_base_url(format!("{}/html", mock_server.uri()));
    let urls = client.search("rust filetype:pdf", 10).await.unwrap();

    assert_eq!(
        urls,
        vec![
            "https://example.com/one.pdf".to_string(),
            "https://example.com/two.pdf".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_web_search_error_status_surfaces() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = WebSearchClient::with_base_url(format!("{}/html", mock_server.uri()));
    let result = client.search("rust filetype:pdf", 10).await;
    assert!(matches!(
        result,
        Err(SearchError::HttpStatus { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_providers_report_their_names() {
    let api = CustomSearchClient::with_base_url(test_credentials(), "http://localhost");
    let web = WebSearchClient::with_base_url("http://localhost");
    assert_eq!(api.name(), "custom-search");
    assert_eq!(web.name(), "web");
}
