//! Snapscan: handle extraction and snapcode archival for dating-site profiles
//!
//! Snapscan pages through a dating-site search API, inspects the free-text
//! status fields of every returned profile for an embedded Snapchat handle,
//! and fetches the matching snapcode image from the (unofficial) snapcode
//! derivation endpoints. Fetched assets land on disk under
//! `<out>/<country>/<hometown>/<handle>.<ext>`; the presence of that file is
//! the only dedup index, so a restarted scan skips everything already saved.
//!
//! # Architecture
//!
//! - **Extractor**: pure regex recognizer for handles embedded in free text
//! - **Fetcher**: cache-guarded, multi-endpoint snapcode download
//! - **Scanner**: sequential driver (login, geocode, paginate, delay)
//!
//! # Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use snapscan::extract::extract_handle;
//! use snapscan::fetch::{fetch_snapcode, HttpSource};
//!
//! let handle = extract_handle(Some("add me 👻 snap: johnny_99")).unwrap();
//! let source = HttpSource::new().unwrap();
//! let outcome = fetch_snapcode(&source, &handle, Path::new("snapcodes"), "SVG", "400").unwrap();
//! println!("{:?}", outcome);
//! ```

pub mod cli;
pub mod extract;
pub mod fetch;
pub mod geocode;
pub mod models;
pub mod output;
pub mod profile;
pub mod scanner;
pub mod search;

// Re-export commonly used types
pub use extract::extract_handle;
pub use fetch::{CodeSource, FetchOutcome, HttpSource, fetch_snapcode};
pub use models::{Coordinates, PageCursor, ScanConfig, UserInfo};
pub use search::Session;
