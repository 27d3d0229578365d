//! Behavioral tests for the connectivity probe.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use fakenodo::probe::{
    test_fakenodo_connection, test_zenodo_connection, ConnectivityProbe, ErrorBanner, ERROR_TEXT,
};

mod common;

fn probe_with_banner(addr: std::net::SocketAddr) -> (ConnectivityProbe, Arc<ErrorBanner>) {
    let banner = Arc::new(ErrorBanner::new());
    let probe = ConnectivityProbe::new(format!("http://{}", addr), Some(banner.clone()));
    (probe, banner)
}

#[tokio::test]
async fn success_body_leaves_banner_hidden() {
    let addr = common::start_status_server(200, r#"{"success": true, "message": "ok"}"#).await;
    let (probe, banner) = probe_with_banner(addr);

    probe.run().await;

    assert_eq!(banner.display(), "none");
    assert_eq!(banner.text(), "");
}

#[tokio::test]
async fn reported_failure_shows_banner() {
    let addr = common::start_status_server(200, r#"{"success": false, "message": "down"}"#).await;
    let (probe, banner) = probe_with_banner(addr);

    probe.run().await;

    assert_eq!(banner.display(), "block");
    assert_eq!(banner.text(), ERROR_TEXT);
}

#[tokio::test]
async fn unparsable_body_is_logged_but_not_surfaced() {
    let addr = common::start_status_server(200, "not json").await;
    let (probe, banner) = probe_with_banner(addr);

    probe.run().await;

    assert_eq!(banner.display(), "none");
    assert_eq!(banner.text(), "");
}

#[tokio::test]
async fn http_error_shows_banner() {
    let addr = common::start_status_server(500, "boom").await;
    let (probe, banner) = probe_with_banner(addr);

    probe.run().await;

    assert_eq!(banner.display(), "block");
    assert_eq!(banner.text(), ERROR_TEXT);
}

#[tokio::test]
async fn transport_failure_shows_banner() {
    // Bind and immediately drop a listener so the port is free but closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (probe, banner) = probe_with_banner(addr);
    probe.run().await;

    assert_eq!(banner.display(), "block");
    assert_eq!(banner.text(), ERROR_TEXT);
}

#[tokio::test]
async fn invocations_are_independent() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let addr = common::start_programmable_status_server(move || {
        let counter = counter.clone();
        async move {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                (200, r#"{"success": true, "message": "ok"}"#.to_string())
            } else {
                (500, "boom".to_string())
            }
        }
    })
    .await;

    let (first_probe, first_banner) = probe_with_banner(addr);
    first_probe.run().await;

    let (second_probe, second_banner) = probe_with_banner(addr);
    second_probe.run().await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(first_banner.display(), "none");
    assert_eq!(second_banner.display(), "block");
}

#[tokio::test]
async fn legacy_alias_behaves_like_primary() {
    let addr = common::start_status_server(500, "boom").await;

    let (probe, banner) = probe_with_banner(addr);
    test_zenodo_connection(&probe).await;
    assert_eq!(banner.display(), "block");
    assert_eq!(banner.text(), ERROR_TEXT);

    let (probe, banner) = probe_with_banner(addr);
    test_fakenodo_connection(&probe).await;
    assert_eq!(banner.display(), "block");
    assert_eq!(banner.text(), ERROR_TEXT);
}

#[tokio::test]
async fn missing_banner_is_safe() {
    let addr = common::start_status_server(500, "boom").await;
    let probe = ConnectivityProbe::new(format!("http://{}", addr), None);

    // Must complete without panicking despite the failure path.
    probe.run().await;
}

#[tokio::test]
async fn probe_sends_json_content_type() {
    let (addr, requests) =
        common::start_recording_status_server(200, r#"{"success": true, "message": "ok"}"#).await;
    let (probe, _banner) = probe_with_banner(addr);

    probe.run().await;

    let recorded = requests.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    let head = recorded[0].to_lowercase();
    assert!(head.starts_with("get /fakenodo/test"));
    assert!(head.contains("content-type: application/json"));
}
