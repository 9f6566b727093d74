//! Integration tests for the path finder
//!
//! These tests use wiremock to serve a small article graph and run the
//! full fetch, extract and search cycle against it.

use wiki_pathfinder::config::Config;
use wiki_pathfinder::{PathFinder, PathResult};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds an article page whose narrative paragraph links to `links`
fn article(title: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|link| format!(r#"<a href="/wiki/{0}">{0}</a> "#, link))
        .collect();

    format!(
        r#"<html><head><title>{title}</title></head><body>
        <h1>{title}</h1>
        <div id="mw-content-text"><div class="mw-parser-output">
        <p>{title} is related to {anchors}</p>
        </div></div>
        </body></html>"#
    )
}

/// Serves `html` at `/wiki/{title}`, expecting exactly `calls` requests
async fn mount_article(server: &MockServer, title: &str, html: String, calls: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/wiki/{}", title)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html; charset=UTF-8"),
        )
        .expect(calls)
        .mount(server)
        .await;
}

fn create_test_config(max_depth: usize) -> Config {
    let mut config = Config::default();
    config.search.max_depth = max_depth;
    config.fetch.rate_limit = 50;
    config.fetch.timeout_secs = 5;
    config
}

fn article_url(server: &MockServer, title: &str) -> String {
    format!("{}/wiki/{}", server.uri(), title)
}

fn path_of(server: &MockServer, titles: &[&str]) -> PathResult {
    PathResult::Found(titles.iter().map(|t| article_url(server, t)).collect())
}

#[tokio::test]
async fn test_direct_link() {
    let server = MockServer::start().await;
    mount_article(&server, "A", article("A", &["B"]), 1).await;
    mount_article(&server, "B", article("B", &[]), 0).await;

    let finder = PathFinder::from_config(&create_test_config(5)).expect("finder");
    let result = finder
        .find_path(&article_url(&server, "A"), &article_url(&server, "B"))
        .await;

    assert_eq!(result, path_of(&server, &["A", "B"]));
}

#[tokio::test]
async fn test_two_hop_path() {
    let server = MockServer::start().await;
    mount_article(&server, "A", article("A", &["B"]), 1).await;
    mount_article(&server, "B", article("B", &["C"]), 1).await;

    let finder = PathFinder::from_config(&create_test_config(5)).expect("finder");
    let result = finder
        .find_path(&article_url(&server, "A"), &article_url(&server, "C"))
        .await;

    assert_eq!(result, path_of(&server, &["A", "B", "C"]));
}

#[tokio::test]
async fn test_shortest_path_is_preferred() {
    let server = MockServer::start().await;
    // A links both to a long detour and straight to the target's neighbour
    mount_article(&server, "A", article("A", &["Detour", "Near"]), 1).await;
    mount_article(&server, "Detour", article("Detour", &["Far"]), 1).await;
    mount_article(&server, "Near", article("Near", &["Target"]), 1).await;
    mount_article(&server, "Far", article("Far", &["Target"]), 0).await;

    let finder = PathFinder::from_config(&create_test_config(5)).expect("finder");
    let result = finder
        .find_path(&article_url(&server, "A"), &article_url(&server, "Target"))
        .await;

    assert_eq!(result, path_of(&server, &["A", "Near", "Target"]));
}

#[tokio::test]
async fn test_depth_bound_stops_expansion() {
    let server = MockServer::start().await;
    mount_article(&server, "A", article("A", &["B"]), 1).await;
    mount_article(&server, "B", article("B", &["C"]), 1).await;
    mount_article(&server, "C", article("C", &["D"]), 0).await;

    let finder = PathFinder::from_config(&create_test_config(2)).expect("finder");
    let result = finder
        .find_path(&article_url(&server, "A"), &article_url(&server, "D"))
        .await;

    assert_eq!(result, PathResult::NotFound { max_depth: 2 });
}

#[tokio::test]
async fn test_target_found_on_deepest_page() {
    let server = MockServer::start().await;
    mount_article(&server, "A", article("A", &["B"]), 1).await;
    mount_article(&server, "B", article("B", &["C"]), 1).await;

    // B is at the depth bound; its links are still checked against the target
    let finder = PathFinder::from_config(&create_test_config(2)).expect("finder");
    let result = finder
        .find_path(&article_url(&server, "A"), &article_url(&server, "C"))
        .await;

    assert_eq!(result, path_of(&server, &["A", "B", "C"]));
}

#[tokio::test]
async fn test_isolated_start() {
    let server = MockServer::start().await;
    mount_article(&server, "Stub", article("Stub", &[]), 1).await;

    let finder = PathFinder::from_config(&create_test_config(5)).expect("finder");
    let result = finder
        .find_path(&article_url(&server, "Stub"), &article_url(&server, "B"))
        .await;

    assert_eq!(result, PathResult::NotFound { max_depth: 5 });
}

#[tokio::test]
async fn test_failed_page_is_a_dead_end() {
    let server = MockServer::start().await;
    mount_article(&server, "A", article("A", &["Broken", "B"]), 1).await;
    mount_article(&server, "B", article("B", &["Target"]), 1).await;

    Mock::given(method("GET"))
        .and(path("/wiki/Broken"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let finder = PathFinder::from_config(&create_test_config(5)).expect("finder");
    let result = finder
        .find_path(&article_url(&server, "A"), &article_url(&server, "Target"))
        .await;

    assert_eq!(result, path_of(&server, &["A", "B", "Target"]));
    assert_eq!(finder.fetcher().stats().failures, 1);
}

#[tokio::test]
async fn test_cycle_fetches_each_page_once() {
    let server = MockServer::start().await;
    mount_article(&server, "A", article("A", &["B"]), 1).await;
    mount_article(&server, "B", article("B", &["A", "C"]), 1).await;
    mount_article(&server, "C", article("C", &["A", "B"]), 1).await;

    let finder = PathFinder::from_config(&create_test_config(10)).expect("finder");
    let result = finder
        .find_path(&article_url(&server, "A"), &article_url(&server, "Z"))
        .await;

    assert_eq!(result, PathResult::NotFound { max_depth: 10 });
    assert_eq!(finder.fetcher().stats().requests, 3);
}

#[tokio::test]
async fn test_navbox_links_are_not_followed() {
    let server = MockServer::start().await;
    let html = r#"<html><body>
        <div id="mw-content-text"><div class="mw-parser-output">
        <p>Nothing linked here.</p>
        <div class="navbox"><ul><li><a href="/wiki/B">B</a></li></ul></div>
        </div></div>
        </body></html>"#;
    mount_article(&server, "A", html.to_string(), 1).await;
    mount_article(&server, "B", article("B", &[]), 0).await;

    let finder = PathFinder::from_config(&create_test_config(5)).expect("finder");
    let result = finder
        .find_path(&article_url(&server, "A"), &article_url(&server, "B"))
        .await;

    assert_eq!(result, PathResult::NotFound { max_depth: 5 });
}

/// A page whose only article links sit outside text blocks, around the
/// references heading
fn references_page() -> String {
    r#"<html><body>
        <div id="mw-content-text"><div class="mw-parser-output">
        <p>No body links.</p>
        <div><a href="/wiki/Before">Before</a></div>
        <div class="mw-heading mw-heading2"><h2 id="References">References</h2></div>
        <div class="reflist"><cite><a href="/wiki/B">B</a></cite></div>
        <div class="mw-heading mw-heading2"><h2 id="External_links">External links</h2></div>
        <div><a href="/wiki/C">C</a></div>
        </div></div>
        </body></html>"#
        .to_string()
}

#[tokio::test]
async fn test_reference_links_are_followed() {
    let server = MockServer::start().await;
    mount_article(&server, "A", references_page(), 1).await;

    let finder = PathFinder::from_config(&create_test_config(5)).expect("finder");
    let result = finder
        .find_path(&article_url(&server, "A"), &article_url(&server, "B"))
        .await;

    assert_eq!(result, path_of(&server, &["A", "B"]));
}

#[tokio::test]
async fn test_references_section_ends_at_next_heading() {
    let server = MockServer::start().await;
    mount_article(&server, "A", references_page(), 1).await;
    mount_article(&server, "B", article("B", &[]), 1).await;
    mount_article(&server, "Before", article("Before", &[]), 0).await;
    mount_article(&server, "C", article("C", &[]), 0).await;

    let finder = PathFinder::from_config(&create_test_config(5)).expect("finder");
    let result = finder
        .find_path(&article_url(&server, "A"), &article_url(&server, "C"))
        .await;

    assert_eq!(result, PathResult::NotFound { max_depth: 5 });
}

#[tokio::test]
async fn test_endpoints_are_normalized() {
    let server = MockServer::start().await;
    mount_article(&server, "A", article("A", &["B"]), 1).await;

    let finder = PathFinder::from_config(&create_test_config(5)).expect("finder");
    let start = format!("{}?action=view#Top", article_url(&server, "A"));
    let target = format!("{}/", article_url(&server, "B"));
    let result = finder.find_path(&start, &target).await;

    assert_eq!(result, path_of(&server, &["A", "B"]));
}

#[tokio::test]
async fn test_bidirectional_search_shares_cache() {
    let server = MockServer::start().await;
    // A -> B -> C -> A
    mount_article(&server, "A", article("A", &["B"]), 1).await;
    mount_article(&server, "B", article("B", &["C"]), 1).await;
    mount_article(&server, "C", article("C", &["A"]), 1).await;

    let finder = PathFinder::from_config(&create_test_config(5)).expect("finder");
    let (forward, backward) = finder
        .find_bidirectional_path(&article_url(&server, "A"), &article_url(&server, "C"))
        .await;

    assert_eq!(forward, path_of(&server, &["A", "B", "C"]));
    assert_eq!(backward, path_of(&server, &["C", "A"]));

    let stats = finder.fetcher().stats();
    assert_eq!(stats.requests, 3);
    assert_eq!(stats.cached_pages, 3);
}

#[tokio::test]
async fn test_bidirectional_one_way_only() {
    let server = MockServer::start().await;
    mount_article(&server, "A", article("A", &["B"]), 1).await;
    mount_article(&server, "B", article("B", &[]), 1).await;

    let finder = PathFinder::from_config(&create_test_config(3)).expect("finder");
    let (forward, backward) = finder
        .find_bidirectional_path(&article_url(&server, "A"), &article_url(&server, "B"))
        .await;

    assert!(forward.is_found());
    assert_eq!(backward, PathResult::NotFound { max_depth: 3 });
}
