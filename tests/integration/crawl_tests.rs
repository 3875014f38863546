//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and tempfile output
//! directories, and run the full mirror cycle end-to-end.

use site_mirror::config::Config;
use site_mirror::crawler::{run_crawl, Coordinator};
use site_mirror::UnitState;
use std::fs;
use tempfile::TempDir;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts a GET mock that must be hit exactly `times` times
async fn serve(server: &MockServer, at: &str, body: &str, mime: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_string(), mime))
        .expect(times)
        .mount(server)
        .await;
}

async fn serve_html(server: &MockServer, at: &str, body: &str) {
    serve(server, at, body, "text/html; charset=utf-8", 1).await;
}

fn create_test_config(root_url: &str, output: &TempDir) -> Config {
    Config::new(root_url, output.path().join("mirror"))
}

#[tokio::test]
async fn test_full_mirror_single_site() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    serve_html(
        &server,
        "/",
        r#"<html><body>
            <a href="/page2.html">Page 2</a>
            <img src="http://other.com/logo.png">
        </body></html>"#,
    )
    .await;
    serve_html(&server, "/page2.html", "<html><body>Second page</body></html>").await;

    let output = TempDir::new().unwrap();
    let config = create_test_config(&base_url, &output);
    let mirror = config.output_dir.clone();

    let summary = run_crawl(config).await.unwrap();

    assert_eq!(summary.visited, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.written, 2);
    assert!(summary.is_success());
    assert_eq!(summary.exit_code(), 0);
    assert_eq!(
        summary.visited_urls,
        vec![format!("{}/", base_url), format!("{}/page2.html", base_url)]
    );

    assert!(fs::read_to_string(mirror.join("index.html"))
        .unwrap()
        .contains("page2.html"));
    assert_eq!(
        fs::read_to_string(mirror.join("page2.html")).unwrap(),
        "<html><body>Second page</body></html>"
    );
}

#[tokio::test]
async fn test_download_missing_only_skips_existing() {
    let server = MockServer::start().await;
    serve(&server, "/", "<a href=\"/new.html\">n</a>", "text/html", 0).await;

    let output = TempDir::new().unwrap();
    let mut config = create_test_config(&server.uri(), &output);
    config.download_missing_only = true;
    fs::create_dir_all(&config.output_dir).unwrap();
    fs::write(config.output_dir.join("index.html"), "cached").unwrap();
    let mirror = config.output_dir.clone();

    let summary = run_crawl(config).await.unwrap();

    assert_eq!(summary.visited, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.written, 0);
    assert_eq!(fs::read_to_string(mirror.join("index.html")).unwrap(), "cached");
}

#[tokio::test]
async fn test_download_missing_only_fetches_missing_files() {
    let server = MockServer::start().await;
    serve_html(&server, "/", r#"<a href="/a.html">a</a><a href="/b.html">b</a>"#).await;
    serve(&server, "/a.html", "old", "text/html", 0).await;
    serve_html(&server, "/b.html", "fresh").await;

    let output = TempDir::new().unwrap();
    let mut config = create_test_config(&server.uri(), &output);
    config.download_missing_only = true;
    fs::create_dir_all(&config.output_dir).unwrap();
    fs::write(config.output_dir.join("a.html"), "kept").unwrap();
    let mirror = config.output_dir.clone();

    let summary = run_crawl(config).await.unwrap();

    assert_eq!(summary.visited, 3);
    assert_eq!(summary.skipped, 1);
    assert_eq!(fs::read_to_string(mirror.join("a.html")).unwrap(), "kept");
    assert_eq!(fs::read_to_string(mirror.join("b.html")).unwrap(), "fresh");
}

#[tokio::test]
async fn test_broken_link_marks_run_failed() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    serve_html(&server, "/", r#"<a href="/missing.html">gone</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/missing.html"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let output = TempDir::new().unwrap();
    let config = create_test_config(&base_url, &output);
    let mirror = config.output_dir.clone();

    let summary = run_crawl(config).await.unwrap();

    assert_eq!(summary.visited, 2);
    assert_eq!(summary.failed, 1);
    assert!(!summary.is_success());
    assert_eq!(summary.exit_code(), 1);
    assert_eq!(
        summary.failed_urls,
        vec![format!("{}/missing.html", base_url)]
    );
    assert!(!mirror.join("missing.html").exists());
    assert_eq!(
        summary.to_string(),
        "Done. Processed '2' URLs. Failed '1' URLs."
    );
}

#[tokio::test]
async fn test_unreachable_root_is_recorded_not_fatal() {
    let output = TempDir::new().unwrap();
    let config = create_test_config("http://127.0.0.1:1/", &output);

    let summary = run_crawl(config).await.unwrap();

    assert_eq!(summary.visited, 1);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.exit_code(), 1);
}

#[tokio::test]
async fn test_url_list_only_writes_nothing() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    serve_html(&server, "/", r#"<a href="/about/">About</a>"#).await;
    serve_html(&server, "/about/", "<p>about</p>").await;

    let output = TempDir::new().unwrap();
    let mut config = create_test_config(&base_url, &output);
    config.url_list_only = true;
    let mirror = config.output_dir.clone();

    let summary = run_crawl(config).await.unwrap();

    assert_eq!(summary.visited, 2);
    assert_eq!(summary.written, 0);
    assert!(!mirror.exists());
    assert_eq!(
        summary.url_list(),
        format!("{0}/\n{0}/about/\n", base_url)
    );
}

#[tokio::test]
async fn test_stylesheet_assets_followed() {
    let server = MockServer::start().await;

    serve_html(
        &server,
        "/",
        r#"<html><head>
            <link rel="stylesheet" href="/css/site.css">
            <link rel="icon" href="/favicon.ico">
            <script src="/js/app.js"></script>
        </head></html>"#,
    )
    .await;
    serve(
        &server,
        "/css/site.css",
        r#"body { background: url("../img/bg.png"); }"#,
        "text/css",
        1,
    )
    .await;
    serve(&server, "/img/bg.png", "PNG", "image/png", 1).await;
    serve(&server, "/favicon.ico", "ICO", "image/x-icon", 1).await;
    serve(&server, "/js/app.js", "var a = 1;", "application/javascript", 1).await;

    let output = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &output);
    let mirror = config.output_dir.clone();

    let summary = run_crawl(config).await.unwrap();

    assert_eq!(summary.visited, 5);
    assert_eq!(summary.failed, 0);
    assert!(mirror.join("css").join("site.css").is_file());
    assert_eq!(
        fs::read_to_string(mirror.join("img").join("bg.png")).unwrap(),
        "PNG"
    );
    assert!(mirror.join("favicon.ico").is_file());
    assert!(mirror.join("js").join("app.js").is_file());
}

#[tokio::test]
async fn test_concurrent_crawl_fetches_each_url_once() {
    let server = MockServer::start().await;

    let nav = r##"
        <a href="/">Home</a>
        <a href="/a.html">A</a>
        <a href="/b.html#section">B</a>
        <a href="/c/">C</a>
        <a href="/c/?">C again</a>
        <a href="#top">Top</a>
    "##;
    serve_html(&server, "/", nav).await;
    serve_html(&server, "/a.html", nav).await;
    serve_html(&server, "/b.html", nav).await;
    serve_html(&server, "/c/", nav).await;

    let output = TempDir::new().unwrap();
    let mut config = create_test_config(&server.uri(), &output);
    config.fetch.max_concurrent_fetches = 4;
    let mirror = config.output_dir.clone();

    let mut coordinator = Coordinator::new(config).unwrap();
    let summary = coordinator.run().await.unwrap();

    assert_eq!(summary.visited, 4);
    assert_eq!(summary.failed, 0);
    assert_eq!(coordinator.state().frontier_size(), 0);
    assert_eq!(coordinator.state().in_flight_count(), 0);

    let c = Url::parse(&format!("{}/c/", server.uri())).unwrap();
    assert_eq!(coordinator.state().state_of(&c), Some(UnitState::Persisted));
    assert!(mirror.join("c").join("index.html").is_file());
}

#[tokio::test]
async fn test_seeds_combined_below_root_path() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    serve_html(&server, "/docs/", "<p>docs home</p>").await;
    serve_html(&server, "/docs/orphan.html", "<p>not linked anywhere</p>").await;

    let output = TempDir::new().unwrap();
    let mut config = create_test_config(&format!("{}/docs", base_url), &output);
    config.seeds = vec!["/".to_string(), "/orphan.html".to_string()];
    let mirror = config.output_dir.clone();

    let summary = run_crawl(config).await.unwrap();

    assert_eq!(summary.visited, 2);
    assert_eq!(summary.failed, 0);
    assert!(mirror.join("index.html").is_file());
    assert!(mirror.join("orphan.html").is_file());
}

#[tokio::test]
async fn test_strict_scope_excludes_sibling_prefix() {
    let server = MockServer::start().await;

    serve_html(
        &server,
        "/docs/",
        r#"<a href="/docs/guide.html">Guide</a><a href="/docs-old/guide.html">Old</a>"#,
    )
    .await;
    serve_html(&server, "/docs/guide.html", "<p>guide</p>").await;
    serve(&server, "/docs-old/guide.html", "<p>old</p>", "text/html", 0).await;

    let output = TempDir::new().unwrap();
    let mut config = create_test_config(&format!("{}/docs", server.uri()), &output);
    config.strict_scope = true;

    let summary = run_crawl(config).await.unwrap();

    assert_eq!(summary.visited, 2);
    assert!(summary
        .visited_urls
        .iter()
        .all(|u| !u.contains("docs-old")));
}

#[tokio::test]
async fn test_prefix_scope_includes_sibling_prefix() {
    let server = MockServer::start().await;

    serve_html(
        &server,
        "/docs/",
        r#"<a href="/docs-old/guide.html">Old</a><a href="/blog/">Blog</a>"#,
    )
    .await;
    serve_html(&server, "/docs-old/guide.html", "<p>old</p>").await;
    serve(&server, "/blog/", "<p>blog</p>", "text/html", 0).await;

    let output = TempDir::new().unwrap();
    let config = create_test_config(&format!("{}/docs", server.uri()), &output);

    let summary = run_crawl(config).await.unwrap();

    assert_eq!(summary.visited, 2);
}

#[tokio::test]
async fn test_invalid_config_rejected_before_crawling() {
    let output = TempDir::new().unwrap();
    let mut config = create_test_config("http://127.0.0.1:1/", &output);
    config.fetch.max_concurrent_fetches = 0;

    assert!(Coordinator::new(config).is_err());
}
