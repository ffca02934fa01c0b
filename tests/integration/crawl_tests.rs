//! Integration tests for the crawler
//!
//! These tests use wiremock to serve pre-rendered portal pages and drive the
//! full crawl cycle end-to-end through the HTTP backend and the filesystem store.

use borm_scraper::config::{Config, OutputConfig, PortalConfig, RenderBackend, RenderConfig};
use borm_scraper::crawler::{run_with, Coordinator, HttpFetcher};
use borm_scraper::state::DayStatus;
use borm_scraper::storage::FileStore;
use borm_scraper::{CrawlRange, FailureKind};
use chrono::NaiveDate;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock portal
fn create_test_config(base_url: &str, document_root: &str) -> Config {
    Config {
        portal: PortalConfig {
            base_url: format!("{}/", base_url),
            summary_path: "sumario/{date}".to_string(),
            link_title: "Ver anuncio".to_string(),
        },
        render: RenderConfig {
            backend: RenderBackend::Http,
            ..RenderConfig::default()
        },
        output: OutputConfig {
            document_root: document_root.to_string(),
        },
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

fn summary_page() -> String {
    r#"<html><body>
    <div class="titular"><h1 class="ng-binding">Boletín Nº 28, sábado 3 de febrero de 2024</h1></div>
    <div class="anuDer">
        <p><i class="ng-binding">Edicto</i></p>
        <p><i class="ng-binding">Anuncio</i></p>
    </div>
    <div class="row ng-scope"><a title="Ver anuncio" href="anuncio/700">ver</a></div>
    <div class="row ng-scope"><a title="Descargar PDF" href="pdf/700">pdf</a></div>
    <div class="row ng-scope"><a title="Ver anuncio" href="anuncio/701">ver</a></div>
    </body></html>"#
        .to_string()
}

fn document_page() -> String {
    r#"<html><body>
    <div class="container-fluid cabecera02 ng-scope">
        <h1 class="ng-binding">Edicto de notificación de la Región de Murcia</h1>
    </div>
    <div class="col-md-5 col-sm-6 col-xs-12">
        <h3 class="dato1">Nº de Publicación:</h3><p class="dato2 ng-binding">700</p>
        <h3 class="dato1">Sección:</h3><p class="dato2 ng-binding">IV. Administración Local</p>
    </div>
    <div class="col-md-5 col-sm-6 col-xs-12">
        <h3 class="dato1">Anunciante:</h3><p class="dato2 ng-binding">Ayuntamiento de Lorca</p>
    </div>
    <div class="cuerpoAnuncioHTML"><p>Se hace saber...</p></div>
    </body></html>"#
        .to_string()
}

async fn mount_portal(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/sumario/03-02-2024"))
        .respond_with(html(summary_page()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/anuncio/700"))
        .respond_with(html(document_page()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/anuncio/701"))
        .respond_with(ResponseTemplate::new(500))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_over_two_days() {
    let mock_server = MockServer::start().await;
    mount_portal(&mock_server).await;

    let root = TempDir::new().unwrap();
    let config = create_test_config(&mock_server.uri(), root.path().to_str().unwrap());

    let range = CrawlRange::new(date(2024, 2, 2), date(2024, 2, 3)).unwrap();
    let report = run_with(
        config,
        HttpFetcher::new().unwrap(),
        FileStore::new(root.path()),
        range,
    )
    .await
    .expect("crawl failed");

    assert_eq!(report.days_visited(), 2);

    // 02-02 has no bulletin on the mock portal
    let first = &report.days[0];
    assert_eq!(first.day, date(2024, 2, 2));
    assert!(matches!(
        first.status,
        DayStatus::SummaryFailed {
            kind: FailureKind::Fetch,
            ..
        }
    ));
    assert!(first.documents.is_empty());

    let second = &report.days[1];
    assert!(second.is_crawled());
    assert_eq!(second.documents.len(), 2);
    assert_eq!(second.documents[0].doc_type(), "Edicto");
    assert!(second.documents[0].is_saved());
    assert_eq!(second.documents[1].doc_type(), "Anuncio");
    assert_eq!(second.documents[1].failure_kind(), Some(FailureKind::Fetch));
    assert!(!report.has_systemic_failures());

    let dir = root.path().join("2024/02/03/28-03022024-700");
    assert_eq!(report.saved_paths(), vec![dir.as_path()]);

    let json = fs::read_to_string(dir.join("28-03022024-700.json")).unwrap();
    assert!(json.contains("Región de Murcia"));
    assert!(json.contains("\n    \"number\""));

    let record: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(record["number"], "28");
    assert_eq!(record["date"], "03-02-2024");
    assert_eq!(record["type"], "Edicto");
    assert_eq!(record["cve"], "700");
    assert_eq!(record["section"], "IV. Administración Local");
    assert_eq!(record["authority"], "Ayuntamiento de Lorca");
    assert_eq!(
        record["extract"],
        "Edicto de notificación de la Región de Murcia"
    );
    assert_eq!(record["url"], format!("{}/anuncio/700", mock_server.uri()));

    let body = fs::read_to_string(dir.join("28-03022024-700.xml")).unwrap();
    assert_eq!(body, "<texto><p>Se hace saber...</p></texto>");
}

#[tokio::test]
async fn test_unwritable_document_root_is_reported() {
    let mock_server = MockServer::start().await;
    mount_portal(&mock_server).await;

    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-directory");
    fs::write(&blocker, "").unwrap();
    let config = create_test_config(&mock_server.uri(), blocker.to_str().unwrap());

    let mut coordinator = Coordinator::new(
        config,
        HttpFetcher::new().unwrap(),
        FileStore::new(&blocker),
    )
    .unwrap();
    let report = coordinator
        .crawl_range(CrawlRange::single(date(2024, 2, 3)))
        .await;

    let failures = report.failures();
    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].failure_kind(), Some(FailureKind::Storage));
    assert!(report.has_systemic_failures());
}

#[tokio::test]
async fn test_unreachable_portal_visits_every_day() {
    let root = TempDir::new().unwrap();
    let config = create_test_config("http://127.0.0.1:9", root.path().to_str().unwrap());

    let range = CrawlRange::new(date(2024, 12, 30), date(2025, 1, 2)).unwrap();
    let report = run_with(
        config,
        HttpFetcher::new().unwrap(),
        FileStore::new(root.path()),
        range,
    )
    .await
    .unwrap();

    assert_eq!(report.days_visited(), 4);
    assert!(report.days.iter().all(|d| !d.is_crawled()));
    assert_eq!(
        report.days[3].summary_url,
        "http://127.0.0.1:9/sumario/02-01-2025"
    );
}
