//! Integration tests for the walker
//!
//! These tests use wiremock to serve listing pages and run the full
//! fetch, extract and follow cycle end-to-end over HTTP.

use futures::TryStreamExt;
use page_walker::config::{parse_config, HttpConfig, SelectorConfig, UserAgentConfig};
use page_walker::output::{run_walk, JsonLinesSink, MemorySink};
use page_walker::walker::{
    build_http_client, HttpFetcher, PageParser, PageWalker, Record, WalkLimits,
};
use page_walker::{RunError, WalkError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn http_fetcher() -> HttpFetcher {
    let user_agent = UserAgentConfig {
        crawler_name: "TestWalker".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
    };
    let http = HttpConfig {
        timeout_secs: 5,
        connect_timeout_secs: 2,
    };
    let client = build_http_client(&user_agent, &http).expect("Failed to build client");
    let parser = PageParser::new(&SelectorConfig::default()).expect("Failed to compile selectors");
    HttpFetcher::new(client, parser)
}

fn quote(text: &str, author: Option<&str>, tags: &[&str]) -> String {
    let author = author
        .map(|a| format!(r#"<span>by <small class="author">{}</small></span>"#, a))
        .unwrap_or_default();
    let tags: String = tags
        .iter()
        .map(|t| format!(r#"<a class="tag" href="/tag/{0}/page/1/">{0}</a>"#, t))
        .collect();
    format!(
        r#"<div class="quote"><span class="text">{}</span>{}<div class="tags">Tags: {}</div></div>"#,
        text, author, tags
    )
}

fn listing(quotes: &[String], next: Option<&str>) -> String {
    let pager = next
        .map(|href| {
            format!(
                r#"<nav><ul class="pager"><li class="next"><a href="{}">Next <span>&rarr;</span></a></li></ul></nav>"#,
                href
            )
        })
        .unwrap_or_default();
    format!(
        r#"<html><head><title>Quotes to Scrape</title></head><body><div class="container">{}{}</div></body></html>"#,
        quotes.concat(),
        pager
    )
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8")
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html(body))
        .expect(1)
        .mount(server)
        .await;
}

fn record(text: &str, author: Option<&str>, tags: &[&str]) -> Record {
    Record::new(
        Some(text),
        author,
        tags.iter().map(|t| t.to_string()).collect(),
    )
}

#[tokio::test]
async fn test_end_to_end_two_pages() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/page/1/",
        listing(
            &[
                quote("A", Some("X"), &["t1", "t2"]),
                quote("B", Some("Y"), &[]),
            ],
            Some("page/2/"),
        ),
    )
    .await;
    mount_page(
        &server,
        "/page/2/",
        listing(&[quote("C", None, &["t3"])], None),
    )
    .await;

    let walker = PageWalker::new(http_fetcher());
    let records: Vec<Record> = walker
        .walk(&format!("{}/page/1/", server.uri()))
        .expect("Seed should be valid")
        .try_collect()
        .await
        .expect("Walk failed");

    assert_eq!(
        records,
        vec![
            record("A", Some("X"), &["t1", "t2"]),
            record("B", Some("Y"), &[]),
            record("C", None, &["t3"]),
        ]
    );
}

#[tokio::test]
async fn test_root_relative_next_links() {
    let server = MockServer::start().await;

    for n in 1..=3 {
        let next = (n < 3).then(|| format!("/page/{}/", n + 1));
        mount_page(
            &server,
            &format!("/page/{}/", n),
            listing(&[quote(&format!("quote {}", n), Some("Author"), &[])], next.as_deref()),
        )
        .await;
    }

    let walker = PageWalker::new(http_fetcher());
    let mut sink = MemorySink::new();
    let summary = run_walk(&walker, &format!("{}/page/1/", server.uri()), &mut sink)
        .await
        .expect("Walk failed");

    assert_eq!(summary.pages_fetched, 3);
    assert_eq!(summary.records_emitted, 3);
    let texts: Vec<_> = sink
        .records()
        .iter()
        .map(|r| r.text.clone().unwrap())
        .collect();
    assert_eq!(texts, vec!["quote 1", "quote 2", "quote 3"]);
}

#[tokio::test]
async fn test_server_error_on_second_page_stops_walk() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/page/1/",
        listing(&[quote("first", Some("X"), &[])], Some("/page/2/")),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/page/2/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    // Must never be requested
    Mock::given(method("GET"))
        .and(path("/page/3/"))
        .respond_with(html(listing(&[quote("third", None, &[])], None)))
        .expect(0)
        .mount(&server)
        .await;

    let walker = PageWalker::new(http_fetcher());
    let mut sink = MemorySink::new();
    let err = run_walk(&walker, &format!("{}/page/1/", server.uri()), &mut sink)
        .await
        .expect_err("Walk should fail on page 2");

    match err {
        RunError::Walk(WalkError::Fetch { reference, cause }) => {
            assert_eq!(reference, format!("{}/page/2/", server.uri()));
            assert!(cause.contains("500"), "unexpected cause: {}", cause);
        }
        other => panic!("Expected fetch error, got {:?}", other),
    }
    assert_eq!(sink.records(), &[record("first", Some("X"), &[])]);
}

#[tokio::test]
async fn test_not_found_seed() {
    let server = MockServer::start().await;

    let walker = PageWalker::new(http_fetcher());
    let items: Vec<_> = futures::StreamExt::collect(
        walker
            .walk(&format!("{}/missing/", server.uri()))
            .expect("Seed should be valid"),
    )
    .await;

    assert_eq!(items.len(), 1);
    assert!(matches!(items[0], Err(WalkError::Fetch { .. })));
}

#[tokio::test]
async fn test_non_html_response_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/quotes"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"quotes":[]}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let walker = PageWalker::new(http_fetcher());
    let items: Vec<_> = futures::StreamExt::collect(
        walker
            .walk(&format!("{}/api/quotes", server.uri()))
            .expect("Seed should be valid"),
    )
    .await;

    assert_eq!(items.len(), 1);
    assert!(matches!(items[0], Err(WalkError::Parse { .. })));
}

#[tokio::test]
async fn test_connection_refused() {
    // Bind and drop a server so the port is closed
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let walker = PageWalker::new(http_fetcher());
    let items: Vec<_> = futures::StreamExt::collect(
        walker
            .walk(&format!("{}/page/1/", uri))
            .expect("Seed should be valid"),
    )
    .await;

    assert_eq!(items.len(), 1);
    assert!(matches!(items[0], Err(WalkError::Fetch { .. })));
}

#[tokio::test]
async fn test_invalid_seed_makes_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html(listing(&[], None)))
        .expect(0)
        .mount(&server)
        .await;

    let walker = PageWalker::new(http_fetcher());
    let err = walker.walk("page/1/").expect_err("Relative seed must be rejected");

    assert!(matches!(err, WalkError::InvalidReference { .. }));
}

#[tokio::test]
async fn test_page_ceiling_over_http() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/page/1/",
        listing(&[quote("one", None, &[])], Some("/page/2/")),
    )
    .await;
    mount_page(
        &server,
        "/page/2/",
        listing(&[quote("two", None, &[])], Some("/page/3/")),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/page/3/"))
        .respond_with(html(listing(&[], None)))
        .expect(0)
        .mount(&server)
        .await;

    let walker = PageWalker::with_limits(http_fetcher(), WalkLimits { max_pages: Some(2) });
    let mut sink = MemorySink::new();
    let summary = run_walk(&walker, &format!("{}/page/1/", server.uri()), &mut sink)
        .await
        .expect("Walk failed");

    assert_eq!(summary.pages_fetched, 2);
    assert_eq!(sink.records().len(), 2);
}

#[tokio::test]
async fn test_config_driven_walk_to_jsonl_file() {
    let server = MockServer::start().await;

    mount_page(
        &server,
        "/catalogue/page-1.html",
        r#"<html><body>
            <article class="product_pod"><h3><a>A Light in the Attic</a></h3>
                <p class="price_color">51.77</p></article>
            <article class="product_pod"><h3><a>Tipping the Velvet</a></h3></article>
            <ul class="pager"><li class="next"><a href="page-2.html">next</a></li></ul>
        </body></html>"#
            .to_string(),
    )
    .await;
    mount_page(
        &server,
        "/catalogue/page-2.html",
        r#"<html><body>
            <article class="product_pod"><h3><a>Soumission</a></h3>
                <p class="price_color">50.10</p></article>
        </body></html>"#
            .to_string(),
    )
    .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let output_path = dir.path().join("books.jsonl");

    let config = parse_config(&format!(
        r#"
[walker]
start-url = "{}/catalogue/page-1.html"

[selectors]
item = "article.product_pod"
text = "h3 a"
author = "p.price_color"
tags = "p.tag"
next = "li.next > a"

[user-agent]
crawler-name = "TestWalker"
crawler-version = "1.0.0"
contact-url = "https://example.com/contact"

[output]
path = "{}"
"#,
        server.uri(),
        output_path.display()
    ))
    .expect("Config should be valid");

    let client =
        build_http_client(&config.user_agent, &config.http).expect("Failed to build client");
    let parser = PageParser::new(&config.selectors).expect("Failed to compile selectors");
    let walker = PageWalker::new(HttpFetcher::new(client, parser));
    let mut sink = JsonLinesSink::create(std::path::Path::new(&config.output.path))
        .expect("Failed to create output");

    let summary = run_walk(&walker, &config.walker.start_url, &mut sink)
        .await
        .expect("Walk failed");
    assert_eq!(summary.records_emitted, 3);

    let content = std::fs::read_to_string(&output_path).expect("Failed to read output");
    let records: Vec<Record> = content
        .lines()
        .map(|line| serde_json::from_str(line).expect("Invalid JSON line"))
        .collect();

    assert_eq!(
        records,
        vec![
            record("A Light in the Attic", Some("51.77"), &[]),
            record("Tipping the Velvet", None, &[]),
            record("Soumission", Some("50.10"), &[]),
        ]
    );
}
