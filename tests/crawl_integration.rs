//! Integration tests for full crawls against a mock catalog.

mod support;
use support::socket_guard::start_mock_server_or_skip;

use std::path::Path;

use crawler_core::{CatalogSite, CrawlStats, Crawler, HttpClient, PolitenessDelays};
use tempfile::TempDir;
use wiremock::matchers::{any, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn listing_html(entries: &[&str]) -> String {
    let mut html = String::from("<html><body><table>");
    for entry in entries {
        html.push_str(&format!(
            r#"<tr><td onclick="mgame('{entry}', 'dendy')">{entry}</td></tr>"#
        ));
    }
    html.push_str("</table></body></html>");
    html
}

fn detail_html(files: &[(&str, &str)]) -> String {
    let mut html = String::from("<html><body><ul>");
    for (fid, name) in files {
        html.push_str(&format!(
            r#"<li><a href="/index.php?act=getmfl&amp;fid={fid}" rel="nofollow">{name}</a></li>"#
        ));
    }
    html.push_str("</ul></body></html>");
    html
}

async fn mount_page(mock_server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(mock_server)
        .await;
}

async fn mount_file(mock_server: &MockServer, fid: &str, status: u16, body: &'static [u8]) {
    Mock::given(method("GET"))
        .and(path("/index.php"))
        .and(query_param("act", "getmfl"))
        .and(query_param("fid", fid))
        .respond_with(ResponseTemplate::new(status).set_body_bytes(body))
        .mount(mock_server)
        .await;
}

async fn mount_redirect_to(mock_server: &MockServer, from: &str, to: &str) {
    Mock::given(method("GET"))
        .and(path(from))
        .respond_with(
            ResponseTemplate::new(302).insert_header("Location", format!("{}{to}", mock_server.uri())),
        )
        .mount(mock_server)
        .await;
}

async fn mount_not_found_fallback(mock_server: &MockServer) {
    Mock::given(any())
        .respond_with(ResponseTemplate::new(404))
        .with_priority(10)
        .mount(mock_server)
        .await;
}

/// Two entries on letter b: the first lists two files, the second one file.
/// Page 2 bounces back to page 1.
async fn mount_letter_b_catalog(mock_server: &MockServer) {
    mount_page(mock_server, "/roms/b", listing_html(&["/games/b/1", "/games/b/2"])).await;
    mount_redirect_to(mock_server, "/roms/b/2", "/roms/b").await;
    mount_page(
        mock_server,
        "/games/b/1",
        detail_html(&[("1", "Balloon Fight (U).nes"), ("2", "Balloon Fight (J).nes")]),
    )
    .await;
    mount_page(mock_server, "/games/b/2", detail_html(&[("3", "Battletoads.nes")])).await;
    mount_file(mock_server, "1", 200, b"usa").await;
    mount_file(mock_server, "2", 200, b"japan").await;
    mount_file(mock_server, "3", 200, b"toads").await;
    mount_not_found_fallback(mock_server).await;
}

fn crawler(mock_server: &MockServer, output_dir: &Path, letters: Vec<char>) -> Crawler {
    let site = CatalogSite::new(&mock_server.uri(), "/roms").unwrap();
    Crawler::new(HttpClient::with_defaults().unwrap(), site, output_dir)
        .with_letters(letters)
        .with_delays(PolitenessDelays::none())
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

async fn download_request_count(mock_server: &MockServer) -> usize {
    mock_server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|request| request.url.path() == "/index.php")
        .count()
}

fn assert_counts(stats: &CrawlStats, downloaded: usize, skipped: usize, failed: usize) {
    assert_eq!(stats.downloaded(), downloaded, "downloaded");
    assert_eq!(stats.skipped(), skipped, "skipped");
    assert_eq!(stats.failed(), failed, "failed");
}

#[tokio::test]
async fn test_crawl_two_entries_three_files_then_rerun_skips_all() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_letter_b_catalog(&mock_server).await;
    let temp_dir = TempDir::new().unwrap();

    let stats = crawler(&mock_server, temp_dir.path(), vec!['b']).run().await;

    assert_counts(&stats, 3, 0, 0);
    assert_eq!(stats.entries(), 2);
    assert_eq!(stats.listing_pages(), 2);
    assert_eq!(
        file_names(temp_dir.path()),
        vec![
            "Balloon Fight (J).nes",
            "Balloon Fight (U).nes",
            "Battletoads.nes"
        ]
    );
    assert_eq!(
        std::fs::read(temp_dir.path().join("Battletoads.nes")).unwrap(),
        b"toads"
    );
    assert_eq!(download_request_count(&mock_server).await, 3);

    let rerun = crawler(&mock_server, temp_dir.path(), vec!['b']).run().await;

    assert_counts(&rerun, 0, 3, 0);
    assert_eq!(download_request_count(&mock_server).await, 3);
    assert_eq!(file_names(temp_dir.path()).len(), 3);
}

#[tokio::test]
async fn test_crawl_requests_follow_document_order() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_letter_b_catalog(&mock_server).await;
    let temp_dir = TempDir::new().unwrap();

    crawler(&mock_server, temp_dir.path(), vec!['b']).run().await;

    let requested: Vec<String> = mock_server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| match request.url.query() {
            Some(query) => format!("{}?{query}", request.url.path()),
            None => request.url.path().to_string(),
        })
        .collect();

    assert_eq!(
        requested,
        vec![
            "/roms/b",
            "/games/b/1",
            "/index.php?act=getmfl&fid=1",
            "/index.php?act=getmfl&fid=2",
            "/games/b/2",
            "/index.php?act=getmfl&fid=3",
            "/roms/b/2",
            "/roms/b",
        ]
    );
}

#[tokio::test]
async fn test_crawl_stops_letter_on_empty_page_and_moves_on() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    // Letter a: page 1 missing entirely. Letter c: one entry, page 2 empty.
    mount_page(&mock_server, "/roms/c", listing_html(&["/games/c/1"])).await;
    mount_page(&mock_server, "/roms/c/2", listing_html(&[])).await;
    mount_page(&mock_server, "/games/c/1", detail_html(&[("9", "Contra.nes")])).await;
    mount_file(&mock_server, "9", 200, b"contra").await;
    mount_not_found_fallback(&mock_server).await;
    let temp_dir = TempDir::new().unwrap();

    let stats = crawler(&mock_server, temp_dir.path(), vec!['a', 'c']).run().await;

    assert_counts(&stats, 1, 0, 0);
    assert_eq!(stats.listing_pages(), 3);
    assert_eq!(stats.position(), Some(('c', 2)));
    assert_eq!(file_names(temp_dir.path()), vec!["Contra.nes"]);
}

#[tokio::test]
async fn test_crawl_isolates_failed_entry_and_failed_download() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_page(&mock_server, "/roms/d", listing_html(&["/games/d/1", "/games/d/2"])).await;
    Mock::given(method("GET"))
        .and(path("/games/d/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/games/d/2",
        detail_html(&[("4", "Double Dragon.nes"), ("5", "Duck Hunt.nes")]),
    )
    .await;
    mount_file(&mock_server, "4", 404, b"").await;
    mount_file(&mock_server, "5", 200, b"ducks").await;
    mount_not_found_fallback(&mock_server).await;
    let temp_dir = TempDir::new().unwrap();

    let stats = crawler(&mock_server, temp_dir.path(), vec!['d']).run().await;

    assert_counts(&stats, 1, 0, 1);
    assert_eq!(stats.entries(), 2);
    assert_eq!(stats.entry_failures(), 1);
    assert_eq!(file_names(temp_dir.path()), vec!["Duck Hunt.nes"]);
}

#[tokio::test]
async fn test_crawl_page_cap_bounds_a_never_ending_letter() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    // Every page of letter e serves the same single entry and never redirects.
    Mock::given(method("GET"))
        .and(wiremock::matchers::path_regex(r"^/roms/e(/\d+)?$"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(&["/games/e/1"])))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/games/e/1", detail_html(&[("7", "Excitebike.nes")])).await;
    mount_file(&mock_server, "7", 200, b"bike").await;
    mount_not_found_fallback(&mock_server).await;
    let temp_dir = TempDir::new().unwrap();

    let stats = crawler(&mock_server, temp_dir.path(), vec!['e'])
        .with_max_pages_per_letter(3)
        .run()
        .await;

    assert_eq!(stats.listing_pages(), 3);
    assert_counts(&stats, 1, 2, 0);
    assert_eq!(download_request_count(&mock_server).await, 1);
}

#[tokio::test]
async fn test_crawl_sanitizes_names_and_skips_unusable_ones() {
    let Some(mock_server) = start_mock_server_or_skip().await else {
        return;
    };
    mount_page(&mock_server, "/roms/f", listing_html(&["/games/f/1"])).await;
    mount_page(
        &mock_server,
        "/games/f/1",
        detail_html(&[("1", "Final Fantasy: Part 1/2?.nes"), ("2", "..")]),
    )
    .await;
    mount_file(&mock_server, "1", 200, b"ff").await;
    mount_file(&mock_server, "2", 200, b"escape").await;
    mount_not_found_fallback(&mock_server).await;
    let temp_dir = TempDir::new().unwrap();

    let stats = crawler(&mock_server, temp_dir.path(), vec!['f']).run().await;

    assert_counts(&stats, 1, 0, 1);
    assert_eq!(
        file_names(temp_dir.path()),
        vec!["Final Fantasy- Part 1-2-.nes"]
    );
    assert_eq!(download_request_count(&mock_server).await, 1);
}
