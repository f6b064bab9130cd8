//! Core data models for Snapscan
//!
//! These structures carry configuration and per-profile state through the
//! sequential scan pipeline. Search results themselves stay loosely typed
//! (`serde_json::Value`); only the fields the pipeline actually branches on
//! are lifted into [`UserInfo`] via the accessors in [`crate::profile`].

use std::path::PathBuf;
use std::time::Duration;

/// Fully resolved scan configuration, assembled by the CLI layer
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Login username for the dating-site session
    pub username: String,
    /// Login password for the dating-site session
    pub password: String,
    /// Free-text location, geocoded once at startup
    pub location: String,
    /// Search radius from the start location, passed through verbatim
    pub radius: String,
    /// Snapcode format token forwarded to the derivation service (SVG, PNG, JPG)
    pub format: String,
    /// Snapcode size token forwarded to the derivation service
    pub size: String,
    /// Minimum profile age filter
    pub min_age: u32,
    /// Maximum profile age filter
    pub max_age: u32,
    /// Result page to start scanning from
    pub start_page: u32,
    /// Base directory for saved snapcodes
    pub output_dir: PathBuf,
    /// Fixed pause after each snapcode fetch
    pub delay: Duration,
}

/// Latitude/longitude pair resolved from the configured location
///
/// Kept as strings: the search API takes them verbatim as query parameters
/// and the scanner never does arithmetic on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    pub latitude: String,
    pub longitude: String,
}

/// Flat per-profile record derived from one search result
///
/// Every field is optional; a profile missing any of them is normal data,
/// not an error. Built per result and consumed immediately — only its side
/// effects (saved snapcodes) persist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInfo {
    pub username: Option<String>,
    pub age: Option<u32>,
    pub hometown: Option<String>,
    pub country: Option<String>,
    pub freetext: Option<String>,
    pub whazzup: Option<String>,
}

/// Explicit pagination state threaded through the scan loop
///
/// Increments monotonically and never resets; there is no resumption token
/// beyond the configured start page, so a restarted scan re-walks pages and
/// relies on the on-disk existence check to skip saved snapcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page: u32,
}

impl PageCursor {
    pub fn new(start_page: u32) -> Self {
        Self { page: start_page }
    }

    /// Current result page number
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Move to the next result page
    pub fn advance(&mut self) {
        self.page += 1;
    }
}
