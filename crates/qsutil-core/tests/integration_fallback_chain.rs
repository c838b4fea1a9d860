//! Integration test: archive lookup, fallback chain and storage over real
//! HTTP (curl) against a local provider/proxy stand-in.

mod common;

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use qsutil_core::batch::run_batch;
use qsutil_core::config::QsConfig;
use qsutil_core::fetch::Fetcher;
use qsutil_core::http::CurlTransport;
use qsutil_core::provider::{archive_url, collect_unique};
use qsutil_core::resolution::Resolution;
use qsutil_core::store::WallpaperStore;
use std::time::Duration;
use tempfile::tempdir;

const SIG: &str = "cVAe_1mC04F_AauBgAsFPicdh_DM1WaxLJmFkfnCJIA";

const ARCHIVE_BODY: &str = r#"{"images":[{
    "startdate": "20240101",
    "urlbase": "/th?id=ABC",
    "url": "/az/hprichbg/rb/XYZ_1920x1080.jpg",
    "title": "Test Scene"
}]}"#;

fn config_for(base_url: &str, output: &std::path::Path) -> QsConfig {
    QsConfig {
        provider_base_url: base_url.to_string(),
        proxy_base_url: base_url.to_string(),
        api_timeout_secs: 5,
        image_timeout_secs: 5,
        connect_timeout_secs: 2,
        output_dir: Some(output.to_path_buf()),
        ..QsConfig::default()
    }
}

fn archive_target(count: usize, region: &str) -> String {
    archive_url("", count, region)
}

#[test]
fn uhd_request_falls_back_to_discovered_resolution_and_saves() {
    let image: Vec<u8> = (0u8..=255).cycle().take(32 * 1024).collect();
    let archive = archive_target(1, "en-US");
    let server = common::image_server::start(vec![
        (archive.as_str(), 200, ARCHIVE_BODY.as_bytes().to_vec()),
        ("/th?id=ABC_1920x1080.jpg", 200, image.clone()),
    ]);
    let out_dir = tempdir().unwrap();
    let cfg = config_for(&server.base_url, out_dir.path());
    let transport = CurlTransport::new(Duration::from_secs(2));

    let descriptors =
        collect_unique(&transport, &cfg, 1, &["en-US".to_string()]).expect("one record");
    let store = WallpaperStore::open(cfg.wallpaper_dir().unwrap()).unwrap();
    let fetcher = Fetcher::new(&transport, &store, &cfg);
    let summary = run_batch(&fetcher, &descriptors, Resolution::Uhd, 1, |_| {});

    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.total, 1);
    assert_eq!(summary.reports[0].resolved_resolution, "1920x1080");

    let saved = out_dir
        .path()
        .join("bing_20240101_Test_Scene_en-US_1920x1080.jpg");
    assert_eq!(std::fs::read(&saved).unwrap(), image);

    let source = format!("{}/az/hprichbg/rb/XYZ_1920x1080.jpg", server.base_url);
    let proxy = format!(
        "/{}/w:3840/q:100/att:1/{}",
        SIG,
        URL_SAFE.encode(source.as_bytes())
    );
    assert_eq!(
        server.hits(),
        vec![
            archive.clone(),
            "/th?id=ABC_UHD.jpg".to_string(),
            proxy,
            "/th?id=ABC_1920x1080.jpg".to_string(),
        ]
    );

    // Second run: the saved file satisfies the request, no image requests.
    let again = run_batch(&fetcher, &descriptors, Resolution::Uhd, 1, |_| {});
    assert_eq!(again.succeeded, 1);
    assert!(again.reports[0].already_present);
    assert_eq!(server.hits().len(), 4);
}

#[test]
fn server_error_stops_chain() {
    let server = common::image_server::start(vec![
        ("/th?id=ABC_UHD.jpg", 500, Vec::new()),
        ("/th?id=ABC_1920x1080.jpg", 200, b"never".to_vec()),
    ]);
    let out_dir = tempdir().unwrap();
    let cfg = config_for(&server.base_url, out_dir.path());
    let transport = CurlTransport::new(Duration::from_secs(2));
    let store = WallpaperStore::open(out_dir.path()).unwrap();
    let fetcher = Fetcher::new(&transport, &store, &cfg);

    let d = qsutil_core::descriptor::ImageDescriptor::new(
        "/th?id=ABC",
        Some("/az/XYZ_1920x1080.jpg".to_string()),
        "Test Scene",
        "20240101",
        "en-US",
    );
    let outcome = fetcher.fetch(&d, Resolution::Uhd);

    assert!(!outcome.succeeded);
    assert!(outcome.diagnostic.contains("HTTP 500"));
    assert_eq!(server.hits(), vec!["/th?id=ABC_UHD.jpg".to_string()]);
    assert!(std::fs::read_dir(out_dir.path()).unwrap().next().is_none());
}

#[test]
fn unreachable_provider_is_provider_empty() {
    let out_dir = tempdir().unwrap();
    // Port 9 (discard) on localhost is expected to refuse connections.
    let cfg = config_for("http://127.0.0.1:9", out_dir.path());
    let transport = CurlTransport::new(Duration::from_secs(1));

    let err = collect_unique(&transport, &cfg, 8, &["en-US".to_string()]).unwrap_err();
    assert!(matches!(err, qsutil_core::error::FetchError::ProviderEmpty));
}
