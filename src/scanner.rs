//! Sequential scan driver
//!
//! One linear pipeline, strictly ordered: geocode the location, log in,
//! then walk result pages. Every record goes through the field accessors,
//! the handle extractor (freetext first, then whazzup), and — when a handle
//! turns up — the cache-guarded snapcode fetch, followed by a fixed delay.
//! Ctrl-C flips an atomic flag that is honored at record boundaries, so an
//! interrupted run stops cleanly after the in-flight item.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::extract::extract_handle;
use crate::fetch::{CodeSource, FetchOutcome, HttpSource, fetch_snapcode};
use crate::models::{PageCursor, ScanConfig};
use crate::output;
use crate::search::{SearchQuery, Session};
use crate::{geocode, profile};

/// Directory bucket for profiles whose location fields are absent
const UNKNOWN_PLACE: &str = "unknown";

/// Run a full scan with the given configuration
///
/// Returns `Ok` on normal exhaustion of the search results or on Ctrl-C;
/// returns an error when every snapcode endpoint is empty (the service is
/// assumed down) or on a transport failure.
pub fn run(config: ScanConfig) -> Result<()> {
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancelled);
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
        .context("Failed to install Ctrl-C handler")?;

    let coordinates = geocode::resolve(&config.location)?;
    output::info(&format!("Searching: {}", config.location));
    log::debug!(
        "Resolved '{}' to ({}, {})",
        config.location,
        coordinates.latitude,
        coordinates.longitude
    );

    let session = Session::login(&config.username, &config.password)?;
    let source = HttpSource::new()?;

    let query = SearchQuery {
        min_age: config.min_age,
        max_age: config.max_age,
        coordinates,
        radius: config.radius.clone(),
    };

    let mut cursor = PageCursor::new(config.start_page);

    'pages: loop {
        if cancelled.load(Ordering::SeqCst) {
            break 'pages;
        }

        let records = session.fetch_page(&query, cursor.page())?;
        if records.is_empty() {
            output::info("No more members.");
            break 'pages;
        }
        log::info!("Page {}: {} results", cursor.page(), records.len());

        for record in &records {
            if cancelled.load(Ordering::SeqCst) {
                break 'pages;
            }
            process_record(&config, &source, record)?;
        }

        cursor.advance();
        log::info!("Moving to page {}", cursor.page());
    }

    if cancelled.load(Ordering::SeqCst) {
        output::info("Snapscan exiting...");
    }

    Ok(())
}

/// Inspect one search result and fetch its snapcode if a handle is found
fn process_record(config: &ScanConfig, source: &dyn CodeSource, record: &Value) -> Result<()> {
    let info = profile::user_info(record);

    // Freetext is probed first; whazzup only when freetext had no handle
    let handle = extract_handle(info.freetext.as_deref())
        .or_else(|| extract_handle(info.whazzup.as_deref()));

    let Some(handle) = handle else {
        return Ok(());
    };

    output::success(&format!("Found {}!", handle));
    log::debug!(
        "Handle {} from profile {:?} (age {:?})",
        handle,
        info.username,
        info.age
    );

    let save_dir = save_dir(config, &info.country, &info.hometown);
    fs::create_dir_all(&save_dir)
        .with_context(|| format!("Failed to create {}", save_dir.display()))?;

    match fetch_snapcode(source, &handle, &save_dir, &config.format, &config.size)? {
        FetchOutcome::Saved(path) => {
            output::success(&format!("Saved {}", path.display()));
        }
        FetchOutcome::AlreadyPresent => {
            log::info!("Skipping {}, snapcode already saved", handle);
        }
        FetchOutcome::AllEndpointsExhausted => {
            // The service is assumed down, not transiently erroring; halt
            // the whole run instead of skipping the item
            bail!("all snapcode endpoints returned empty responses");
        }
    }

    // Crude fixed-rate limiting, constant regardless of server behavior
    thread::sleep(config.delay);

    Ok(())
}

/// `<base>/<country>/<hometown>`, with absent location fields bucketed
/// under "unknown"
fn save_dir(config: &ScanConfig, country: &Option<String>, hometown: &Option<String>) -> PathBuf {
    config
        .output_dir
        .join(country.as_deref().unwrap_or(UNKNOWN_PLACE))
        .join(hometown.as_deref().unwrap_or(UNKNOWN_PLACE))
}
