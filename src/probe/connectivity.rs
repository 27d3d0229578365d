//! One-shot connectivity probe against the service status endpoint.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::probe::banner::ErrorBanner;

/// Status endpoint probed relative to the base URL.
pub const STATUS_PATH: &str = "/fakenodo/test";

/// Literal text shown on the banner when the probe detects a failure.
pub const ERROR_TEXT: &str = "Error: Fakenodo service is not running correctly.";

/// Shape reported by the status endpoint. Parsed best-effort; anything
/// else counts as a parse failure.
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub success: bool,
    pub message: String,
}

/// Probe that checks the service once and flips the error banner on failure.
///
/// The client is built without a timeout: a hung request never reaches a
/// terminal outcome, matching the historical behavior callers rely on.
pub struct ConnectivityProbe {
    client: reqwest::Client,
    base_url: String,
    banner: Option<Arc<ErrorBanner>>,
}

impl ConnectivityProbe {
    /// Create a probe. `banner` may be absent; failure paths then only log.
    pub fn new(base_url: impl Into<String>, banner: Option<Arc<ErrorBanner>>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            banner,
        }
    }

    /// Run the probe once.
    ///
    /// Fire-and-forget: never returns an error. Outcomes:
    /// - 200 + parsable body: the message is logged; `success: false`
    ///   additionally shows the banner
    /// - 200 + unparsable body: logged at error level, banner untouched
    /// - any other status, or a transport failure: logged at error level
    ///   and the banner is shown
    pub async fn run(&self) {
        let url = format!("{}{}", self.base_url, STATUS_PATH);

        // Content-Type on a bodyless GET is meaningless but preserved for
        // compatibility with the endpoint's existing callers.
        let result = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, "Error connecting to fakenodo");
                self.show_error();
                return;
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            tracing::error!(status = status.as_u16(), "Error connecting to fakenodo");
            self.show_error();
            return;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(error = %e, "Error reading fakenodo status body");
                return;
            }
        };

        match serde_json::from_str::<HealthResponse>(&body) {
            Ok(health) => {
                tracing::info!(message = %health.message, "Fakenodo status");
                if !health.success {
                    self.show_error();
                }
            }
            Err(e) => {
                // Parse failures are logged but intentionally not surfaced
                // on the banner.
                tracing::error!(error = %e, "Error parsing JSON from fakenodo");
            }
        }
    }

    fn show_error(&self) {
        if let Some(banner) = &self.banner {
            banner.show(ERROR_TEXT);
        }
    }
}

/// Probe the fakenodo status endpoint once.
pub async fn test_fakenodo_connection(probe: &ConnectivityProbe) {
    probe.run().await;
}

/// Legacy name kept so existing callers keep working; forwards to
/// [`test_fakenodo_connection`] with no behavioral difference.
pub async fn test_zenodo_connection(probe: &ConnectivityProbe) {
    test_fakenodo_connection(probe).await;
}
