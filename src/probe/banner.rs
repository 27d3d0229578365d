//! Error indicator banner.
//!
//! The banner stands in for a page element owned by the embedding
//! application: the probe only ever flips it to the visible error state,
//! it never hides it again.

use std::sync::Mutex;

/// Identifier of the error indicator, kept for compatibility with
/// callers that still look the banner up under its historical name.
pub const BANNER_ID: &str = "test_zenodo_connection_error";

#[derive(Debug)]
struct BannerState {
    display: String,
    text: String,
}

/// Visibility/text state of the error indicator.
#[derive(Debug)]
pub struct ErrorBanner {
    id: &'static str,
    state: Mutex<BannerState>,
}

impl ErrorBanner {
    /// Create a hidden banner with empty text.
    pub fn new() -> Self {
        Self {
            id: BANNER_ID,
            state: Mutex::new(BannerState {
                display: "none".to_string(),
                text: String::new(),
            }),
        }
    }

    pub fn id(&self) -> &str {
        self.id
    }

    /// Make the banner visible with the given text.
    pub fn show(&self, text: &str) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.display = "block".to_string();
        state.text = text.to_string();
    }

    /// Current display style ("none" until shown, "block" afterwards).
    pub fn display(&self) -> String {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .display
            .clone()
    }

    /// Current banner text.
    pub fn text(&self) -> String {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .text
            .clone()
    }

    pub fn is_visible(&self) -> bool {
        self.display() == "block"
    }
}

impl Default for ErrorBanner {
    fn default() -> Self {
        Self::new()
    }
}
