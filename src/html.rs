//! Content-based indicators: server form handler, popup scripts, and the
//! external-link ratio. All three are pure functions over the parsed
//! document.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

use crate::config::REQUEST_URL_SAFE_PCT;
use crate::features::{NEUTRAL, SAFE, SUSPICIOUS};

// CSS selector strings
const FORM_SELECTOR_STR: &str = "form";
const SCRIPT_SELECTOR_STR: &str = "script";
const ANCHOR_SELECTOR_STR: &str = "a[href]";

static FORM_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(FORM_SELECTOR_STR).expect("Failed to parse form selector - this is a bug")
});

static SCRIPT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(SCRIPT_SELECTOR_STR).expect("Failed to parse script selector - this is a bug")
});

static ANCHOR_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(ANCHOR_SELECTOR_STR).expect("Failed to parse anchor selector - this is a bug")
});

static ALERT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"alert\(").expect("Failed to compile alert pattern - this is a bug")
});

/// Scores the server form handlers of a page.
///
/// A page with no forms scores safe. The first form whose `action` is empty,
/// missing, or an absolute `http(s)` URL scores the page suspicious —
/// legitimate login forms rarely post to a bare or foreign handler. A page
/// whose forms all use relative handlers scores neutral.
pub fn check_sfh(document: &Html) -> i8 {
    let mut saw_form = false;

    for form in document.select(&FORM_SELECTOR) {
        saw_form = true;
        let action = form.value().attr("action").unwrap_or("").trim();
        if action.is_empty() || action.starts_with("http://") || action.starts_with("https://") {
            return SUSPICIOUS;
        }
    }

    if saw_form {
        NEUTRAL
    } else {
        SAFE
    }
}

/// Scores inline popup scripts.
///
/// A `<script>` whose text raises an `alert(` and also touches
/// `document.forms` is the classic fake-credential-prompt pattern and scores
/// suspicious. Everything else scores safe.
pub fn check_popups(document: &Html) -> i8 {
    for script in document.select(&SCRIPT_SELECTOR) {
        let text: String = script.text().collect();
        if ALERT_PATTERN.is_match(&text) && text.contains("document.forms") {
            return SUSPICIOUS;
        }
    }
    SAFE
}

/// Scores the ratio of absolute (external-looking) anchor links.
///
/// Counts anchors carrying an `href`, and among them those whose `href`
/// starts with `http://` or `https://`. Below 22% external scores safe;
/// everything else, including a page with no links at all, scores neutral.
/// Ratios of 65% and above share the neutral branch: there is no suspicious
/// return from this indicator.
pub fn check_request_urls(document: &Html) -> i8 {
    let mut total = 0usize;
    let mut external = 0usize;

    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        total += 1;
        if href.starts_with("http://") || href.starts_with("https://") {
            external += 1;
        }
    }

    if total == 0 {
        return NEUTRAL;
    }

    let percentage = external as f64 / total as f64 * 100.0;
    if percentage < REQUEST_URL_SAFE_PCT {
        SAFE
    } else {
        NEUTRAL
    }
}
