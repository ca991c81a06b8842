//! Traffic attribution captured when the visitor lands.
//!
//! The snapshot is taken once from the landing URL and the document
//! referrer, then rides along unchanged on the inquiry submission.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

/// Captured attribution parameters, keyed by query parameter name.
pub type UtmMap = BTreeMap<String, String>;

/// Query parameters worth keeping for attribution.
const TRACKED_KEYS: [&str; 8] = [
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "gclid",
    "fbclid",
    "ref",
];

/// Attribution snapshot for one visit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTracking {
    params: UtmMap,
    landing_page: Option<String>,
    referrer: Option<String>,
}

impl PageTracking {
    /// Snapshot from the landing URL and the document referrer.
    ///
    /// Only the parameters in the tracked set are kept; empty values and
    /// an empty referrer are dropped.
    #[must_use]
    pub fn capture(url: &Url, referrer: Option<&str>) -> Self {
        let mut params = BTreeMap::new();
        for (key, value) in url.query_pairs() {
            if TRACKED_KEYS.contains(&key.as_ref()) && !value.is_empty() {
                params.insert(key.into_owned(), value.into_owned());
            }
        }
        Self {
            params,
            landing_page: Some(url.path().to_string()),
            referrer: referrer
                .filter(|r| !r.is_empty())
                .map(std::string::ToString::to_string),
        }
    }

    /// Captured parameters, or `None` when the visit carried none.
    #[must_use]
    pub fn to_map(&self) -> Option<UtmMap> {
        (!self.params.is_empty()).then(|| self.params.clone())
    }

    /// Path the visitor landed on.
    #[must_use]
    pub fn landing_page(&self) -> Option<&str> {
        self.landing_page.as_deref()
    }

    /// Document referrer, if any.
    #[must_use]
    pub fn referrer(&self) -> Option<&str> {
        self.referrer.as_deref()
    }

    /// Short label of where the visit came from.
    ///
    /// `utm_source` wins; click ids identify the ad network when no source
    /// is set; the referrer host is the last resort.
    #[must_use]
    pub fn traffic_source(&self) -> Option<String> {
        if let Some(source) = self.params.get("utm_source") {
            return Some(source.clone());
        }
        if self.params.contains_key("gclid") {
            return Some("google".to_string());
        }
        if self.params.contains_key("fbclid") {
            return Some("facebook".to_string());
        }
        if let Some(named) = self.params.get("ref") {
            return Some(named.clone());
        }
        self.referrer
            .as_deref()
            .and_then(|r| Url::parse(r).ok())
            .and_then(|u| u.host_str().map(str::to_string))
    }

    /// Human-readable description of the visit, in the wording the admin
    /// screen shows.
    #[must_use]
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(source) = self.params.get("utm_source") {
            parts.push(format!("流入元: {source}"));
        }
        if let Some(medium) = self.params.get("utm_medium") {
            parts.push(format!("メディア: {medium}"));
        }
        if let Some(campaign) = self.params.get("utm_campaign") {
            parts.push(format!("キャンペーン: {campaign}"));
        }
        if self.params.contains_key("gclid") {
            parts.push("Google広告経由".to_string());
        }
        if self.params.contains_key("fbclid") {
            parts.push("Facebook広告経由".to_string());
        }
        if parts.is_empty() {
            if let Some(named) = self.params.get("ref") {
                parts.push(format!("参照元: {named}"));
            } else if let Some(referrer) = &self.referrer {
                parts.push(format!("参照元: {referrer}"));
            }
        }
        if parts.is_empty() {
            return "直接訪問".to_string();
        }
        parts.join(" / ")
    }
}
