//! Startup geocoding of the configured location
//!
//! The search API takes raw latitude/longitude, so the free-text location
//! from the CLI is resolved once, before login, via the Google Geocoding
//! API. The key comes from `GOOGLE_API_KEY`.

use anyhow::{Context, Result};

use crate::models::Coordinates;

const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Resolve a free-text location to coordinates
pub fn resolve(location: &str) -> Result<Coordinates> {
    let api_key = std::env::var("GOOGLE_API_KEY")
        .context("GOOGLE_API_KEY must be set to geocode the location")?;

    let client = reqwest::blocking::Client::new();
    let data: serde_json::Value = client
        .get(GEOCODE_URL)
        .query(&[("address", location), ("key", api_key.as_str())])
        .send()
        .context("Geocoding request failed")?
        .json()
        .context("Failed to parse geocoding response as JSON")?;

    // First result wins, matching the search API's own ranking
    let point = &data["results"][0]["geometry"]["location"];
    let latitude = point["lat"]
        .as_f64()
        .with_context(|| format!("No geocoding result for '{}'", location))?;
    let longitude = point["lng"]
        .as_f64()
        .with_context(|| format!("No geocoding result for '{}'", location))?;

    Ok(Coordinates {
        latitude: latitude.to_string(),
        longitude: longitude.to_string(),
    })
}
