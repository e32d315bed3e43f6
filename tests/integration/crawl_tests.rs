//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use async_trait::async_trait;
use email_harvester::config::{apply_overrides, resolve, Config, ConfigOverrides, CrawlConfig};
use email_harvester::crawler::{
    build_http_client, fetch_url, run_crawl, Coordinator, FetchedPage, Fetcher, HttpFetcher,
};
use email_harvester::output::{format_report, write_report};
use email_harvester::{ConfigError, FetchError, RunStatus, StopHandle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// An HTML response with the given body
fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html")
}

async fn mount_page(server: &MockServer, page: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page))
        .respond_with(html(body))
        .mount(server)
        .await;
}

fn crawl_config(base_url: &str, max_pages: usize, concurrency: usize) -> CrawlConfig {
    CrawlConfig::new(base_url, max_pages, concurrency)
        .expect("Failed to build crawl config")
        .with_page_timeout(Duration::from_secs(5))
        .expect("Failed to set timeout")
}

fn http_fetcher() -> Arc<HttpFetcher> {
    Arc::new(HttpFetcher::new("TestHarvester/1.0").expect("Failed to build HTTP client"))
}

#[tokio::test]
async fn test_full_crawl_single_site() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><body>
            <p>Write to info@example.com</p>
            <a href="/contact">Contact</a>
            <a href="/blog#latest">Blog</a>
            <a href="/brochure.pdf">Brochure</a>
            <a href="/gone">Old page</a>
            <a href="https://elsewhere.example.org/">Partner</a>
            <a href="mailto:ignored@example.com">Mail</a>
        </body></html>"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/contact",
        r#"<p>Sales: sales [at] example . com</p>
           <p>Support: support (at) example.com</p>
           <img src="logo@2x.png">"#,
    )
    .await;
    mount_page(
        &mock_server,
        "/blog",
        r#"<p>Press: press@example.com, again info@example.com</p><a href="/">Home</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/brochure.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"%PDF-1.4 pdf@example.com".to_vec(), "application/pdf"),
        )
        .mount(&mock_server)
        .await;

    let mut coordinator = Coordinator::new(crawl_config(&base_url, 50, 3), http_fetcher());
    let status = coordinator.run().await.expect("Crawl failed");

    assert_eq!(status, RunStatus::Completed);

    let emails: Vec<&str> = coordinator
        .state()
        .emails()
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(
        emails,
        vec![
            "ignored@example.com",
            "info@example.com",
            "press@example.com",
            "sales@example.com",
            "support@example.com",
        ]
    );

    // Seed, contact, blog, brochure and the 404 page; the external link is out of scope
    assert_eq!(coordinator.state().pages_crawled(), 5);
    assert!(coordinator.state().has_visited(&format!("{}/gone", base_url)));
    assert!(!coordinator
        .state()
        .visited()
        .iter()
        .any(|u| u.contains("elsewhere.example.org")));
}

#[tokio::test]
async fn test_priority_pages_crawled_first() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/blog">Blog</a>
           <a href="/our-team">Team</a>
           <a href="/news">News</a>
           <a href="/contact-us">Contact</a>"#,
    )
    .await;

    let mut coordinator = Coordinator::new(crawl_config(&base_url, 10, 1), http_fetcher());
    coordinator.run().await.expect("Crawl failed");

    let expected: Vec<String> = ["/", "/our-team", "/contact-us", "/blog", "/news"]
        .iter()
        .map(|p| format!("{}{}", base_url, p))
        .collect();
    assert_eq!(coordinator.state().visited(), expected.as_slice());
}

#[tokio::test]
async fn test_page_budget_respected() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/a">A</a><a href="/b">B</a><a href="/c">C</a>"#,
    )
    .await;
    for page in ["/a", "/b", "/c"] {
        mount_page(&mock_server, page, "nothing here").await;
    }

    let mut coordinator = Coordinator::new(crawl_config(&base_url, 2, 2), http_fetcher());
    let status = coordinator.run().await.expect("Crawl failed");

    assert_eq!(status, RunStatus::Completed);
    assert_eq!(coordinator.state().pages_crawled(), 2);

    let requests = mock_server
        .received_requests()
        .await
        .expect("Request recording is enabled");
    assert_eq!(requests.len(), 2);
}

#[tokio::test]
async fn test_slow_page_times_out_without_aborting() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/slow">Slow</a><a href="/fast">Fast</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(html("slow@example.com").set_delay(Duration::from_secs(3)))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/fast", "fast@example.com").await;

    let config = CrawlConfig::new(&base_url, 10, 2)
        .unwrap()
        .with_page_timeout(Duration::from_millis(300))
        .unwrap();
    let mut coordinator = Coordinator::new(config, http_fetcher());
    let status = coordinator.run().await.expect("Crawl failed");

    assert_eq!(status, RunStatus::Completed);
    assert_eq!(coordinator.state().pages_crawled(), 3);
    assert!(coordinator.state().emails().contains("fast@example.com"));
    assert!(!coordinator.state().emails().contains("slow@example.com"));
}

#[tokio::test]
async fn test_unreachable_site_completes_empty() {
    // Nothing listens on port 9 of localhost in the test environment
    let config = crawl_config("http://127.0.0.1:9/", 10, 2);
    let mut coordinator = Coordinator::new(config, http_fetcher());

    let status = coordinator.run().await.expect("Crawl failed");

    assert_eq!(status, RunStatus::Completed);
    assert_eq!(coordinator.state().pages_crawled(), 1);
    assert!(coordinator.state().emails().is_empty());
}

/// Raises the stop flag while serving one particular page
struct StoppingFetcher {
    stop: Mutex<Option<StopHandle>>,
}

#[async_trait]
impl Fetcher for StoppingFetcher {
    async fn fetch(&self, url: &Url, _timeout: Duration) -> Result<FetchedPage, FetchError> {
        let body = match url.path() {
            "/" => r#"<a href="/contact">C</a><a href="/blog">B</a> home@example.com"#,
            "/contact" => {
                if let Some(stop) = self.stop.lock().unwrap().as_ref() {
                    stop.stop();
                }
                r#"<a href="/team">T</a> contact@example.com"#
            }
            _ => "other@example.com",
        };
        Ok(FetchedPage::new(url.clone(), body))
    }
}

#[tokio::test]
async fn test_stop_mid_run_keeps_inflight_batch() {
    let fetcher = Arc::new(StoppingFetcher {
        stop: Mutex::new(None),
    });
    let mut coordinator =
        Coordinator::new(crawl_config("https://example.com/", 50, 2), fetcher.clone());
    *fetcher.stop.lock().unwrap() = Some(coordinator.stop_handle());

    let status = coordinator.run().await.expect("Crawl failed");

    assert_eq!(status, RunStatus::Stopped);
    // Batch 1 is the seed, batch 2 is /contact and /blog; /team is never fetched
    assert_eq!(coordinator.state().pages_crawled(), 3);
    assert!(!coordinator.state().has_visited("https://example.com/team"));

    let report = coordinator.report();
    assert_eq!(report.status, RunStatus::Stopped);
    assert!(report.emails.contains("contact@example.com"));
    assert!(report.emails.contains("other@example.com"));
}

#[tokio::test]
async fn test_config_error_before_any_fetch() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "info@example.com").await;

    let overrides = ConfigOverrides {
        base_url: Some(mock_server.uri()),
        concurrency: Some(0),
        ..Default::default()
    };
    let result = resolve(&apply_overrides(Config::default(), &overrides));
    assert!(matches!(result, Err(ConfigError::Validation(_))));

    let missing = resolve(&Config::default());
    assert!(matches!(missing, Err(ConfigError::MissingBaseUrl)));

    let requests = mock_server
        .received_requests()
        .await
        .expect("Request recording is enabled");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_run_crawl_writes_report() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<a href="/about">About</a> zoe@example.com"#,
    )
    .await;
    mount_page(&mock_server, "/about", "adam at example.com").await;

    let report = run_crawl(crawl_config(&base_url, 10, 2))
        .await
        .expect("Crawl failed");

    assert_eq!(report.status, RunStatus::Completed);
    assert_eq!(report.pages_crawled, 2);

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let report_path = dir.path().join("emails.txt");
    write_report(&report, &report_path).expect("Failed to write report");

    let written = std::fs::read_to_string(&report_path).expect("Failed to read report");
    assert_eq!(written, format_report(&report));
    assert!(written.starts_with("Email Extraction Results\nDate: "));
    assert!(written.contains("Total emails found: 2\nPages crawled: 2\n\nEmails:\n"));
    assert!(written.ends_with("adam@example.com\nzoe@example.com\n"));
}

#[tokio::test]
async fn test_same_site_redirect_resolves_links_from_target() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", r#"<a href="/old">Old docs</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/docs/"))
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/docs/",
        r#"<a href="people">People</a> docs@example.com"#,
    )
    .await;
    mount_page(&mock_server, "/docs/people", "people@example.com").await;

    let mut coordinator = Coordinator::new(crawl_config(&base_url, 10, 1), http_fetcher());
    coordinator.run().await.expect("Crawl failed");

    assert!(coordinator
        .state()
        .has_visited(&format!("{}/docs/people", base_url)));
    assert!(!coordinator.state().has_visited(&format!("{}/people", base_url)));
    assert!(coordinator.state().emails().contains("docs@example.com"));
    assert!(coordinator.state().emails().contains("people@example.com"));
}

#[tokio::test]
async fn test_off_site_redirect_is_not_followed() {
    let mock_server = MockServer::start().await;
    let other_server = MockServer::start().await;

    let target = format!("{}/contact", other_server.uri());
    Mock::given(method("GET"))
        .and(path("/away"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", target.as_str()))
        .mount(&mock_server)
        .await;
    mount_page(&other_server, "/contact", "foreign@example.com").await;

    let client = build_http_client("TestHarvester/1.0").expect("Failed to build HTTP client");
    let url = Url::parse(&format!("{}/away", mock_server.uri())).expect("Invalid URL");
    let result = fetch_url(&client, &url, Duration::from_secs(5)).await;

    match result {
        Err(FetchError::OffSiteRedirect { location, .. }) => assert_eq!(location, target),
        other => panic!("expected an off-site redirect, got {:?}", other),
    }

    let foreign_requests = other_server
        .received_requests()
        .await
        .expect("Request recording is enabled");
    assert!(foreign_requests.is_empty());
}
