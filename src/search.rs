//! Authenticated access to the dating-site search API
//!
//! A session is one cookie-backed login reused for every page request.
//! Search results come back as a loosely typed array; this module only
//! peels the envelope and hands the raw records to the scanner.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::models::Coordinates;

const LOGIN_URL: &str = "https://www.lovoo.com/login_check";
const SEARCH_URL: &str = "https://www.lovoo.com/api_web.php/users";

/// Per-scan search filters, fixed after startup
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub min_age: u32,
    pub max_age: u32,
    pub coordinates: Coordinates,
    pub radius: String,
}

/// JSON envelope around one page of search results
#[derive(Debug, Deserialize, Default)]
struct SearchEnvelope {
    #[serde(default)]
    response: SearchPayload,
}

#[derive(Debug, Deserialize, Default)]
struct SearchPayload {
    #[serde(default)]
    result: Vec<Value>,
}

/// A logged-in API session
pub struct Session {
    client: reqwest::blocking::Client,
}

impl Session {
    /// Post credentials once; the session cookie covers all later calls
    pub fn login(username: &str, password: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .cookie_store(true)
            .build()
            .context("Failed to build session HTTP client")?;

        let response = client
            .post(LOGIN_URL)
            .form(&[
                ("_username", username),
                ("_password", password),
                ("_remember_me", "false"),
            ])
            .send()
            .context("Login request failed")?;

        log::info!("Login status: {}", response.status());

        Ok(Self { client })
    }

    /// Fetch one page of search results
    ///
    /// An empty list means the search is exhausted, not that something went
    /// wrong; the caller decides to stop.
    pub fn fetch_page(&self, query: &SearchQuery, page: u32) -> Result<Vec<Value>> {
        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[
                ("ageFrom", query.min_age.to_string()),
                ("ageTo", query.max_age.to_string()),
                ("gender", "2".to_string()),
                ("genderLooking", "1".to_string()),
                ("isOnline", "true".to_string()),
                ("latitude", query.coordinates.latitude.clone()),
                ("longitude", query.coordinates.longitude.clone()),
                ("orderBy", "distance".to_string()),
                ("radiusTo", query.radius.clone()),
                ("resultPage", page.to_string()),
                ("type", "env".to_string()),
                ("userQuality[0]", "pic".to_string()),
            ])
            .send()
            .with_context(|| format!("Search request for page {} failed", page))?;

        let envelope: SearchEnvelope = response
            .json()
            .with_context(|| format!("Failed to parse search response for page {}", page))?;

        Ok(envelope.response.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_results() {
        let raw = r#"{"response": {"result": [{"name": "jane"}, {"name": "lisa"}]}}"#;
        let envelope: SearchEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.response.result.len(), 2);
    }

    #[test]
    fn test_empty_result_list() {
        let raw = r#"{"response": {"result": []}}"#;
        let envelope: SearchEnvelope = serde_json::from_str(raw).unwrap();
        assert!(envelope.response.result.is_empty());
    }

    #[test]
    fn test_missing_envelope_fields_default_to_empty() {
        let envelope: SearchEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.response.result.is_empty());

        let envelope: SearchEnvelope = serde_json::from_str(r#"{"response": {}}"#).unwrap();
        assert!(envelope.response.result.is_empty());
    }
}
