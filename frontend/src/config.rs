use log::{warn, Level};
use serde::Deserialize;
use web_sys::Document;

use crate::error::PageError;

/// Id of the optional inline JSON block that overrides [`PageConfig`] defaults.
pub const CONFIG_ELEMENT_ID: &str = "page-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Chatty while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Selectors and tunables for the page interactions.
///
/// Every field has a default matching the shipped markup, so a page only
/// needs to spell out what it changes:
///
/// ```html
/// <script type="application/json" id="page-config">
///   { "ripple_ms": 400, "landmark_id": "menu" }
/// </script>
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub navbar_id: String,
    pub landmark_id: String,
    pub menu_toggle_id: String,
    pub menu_selector: String,
    pub nav_link_selector: String,
    pub section_selector: String,
    pub image_selector: String,
    pub story_selector: String,
    pub gallery_selector: String,
    pub social_selector: String,
    /// Distance above the landmark section at which the navbar turns solid.
    pub navbar_preroll: f64,
    /// Extra lead subtracted from each section band, on top of the navbar height.
    pub highlight_lead: f64,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub highlight_debounce_ms: u32,
    pub ripple_ms: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            navbar_id: "navbar".to_string(),
            landmark_id: "amenities".to_string(),
            menu_toggle_id: "mobile-menu".to_string(),
            menu_selector: ".navbar-menu".to_string(),
            nav_link_selector: ".navbar-menu a".to_string(),
            section_selector: ".section".to_string(),
            image_selector: "img".to_string(),
            story_selector: ".story-image-container".to_string(),
            gallery_selector: ".gallery-image-container".to_string(),
            social_selector: ".social-icon".to_string(),
            navbar_preroll: 100.0,
            highlight_lead: 100.0,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -100px 0px".to_string(),
            highlight_debounce_ms: 100,
            ripple_ms: 600,
        }
    }
}

impl PageConfig {
    pub fn from_json(raw: &str) -> Result<Self, PageError> {
        let config: Self = serde_json::from_str(raw)?;
        Ok(config.validated())
    }

    /// Swaps tunables the browser would reject for their defaults, so a bad
    /// override costs only itself.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            warn!("reveal_threshold {} outside 0..=1, using default", self.reveal_threshold);
            self.reveal_threshold = defaults.reveal_threshold;
        }
        if !is_root_margin(&self.reveal_root_margin) {
            warn!("reveal_root_margin {:?} is not a valid margin, using default", self.reveal_root_margin);
            self.reveal_root_margin = defaults.reveal_root_margin;
        }
        self
    }

    /// Reads the inline override block if the page has one. A broken block
    /// only costs the overrides, never the interactions.
    pub fn from_document(document: &Document) -> Self {
        let raw = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content());

        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw).unwrap_or_else(|e| {
                warn!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }),
            _ => Self::default(),
        }
    }
}

/// One to four `px` or `%` lengths, the shape `IntersectionObserver` accepts.
fn is_root_margin(raw: &str) -> bool {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    (1..=4).contains(&parts.len())
        && parts.iter().all(|part| {
            part.strip_suffix("px")
                .or_else(|| part.strip_suffix('%'))
                .map_or(false, |n| n.parse::<f64>().map_or(false, f64::is_finite))
        })
}
