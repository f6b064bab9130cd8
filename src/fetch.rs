//! Cache-guarded snapcode fetching
//!
//! A snapcode is fetched at most once per (directory, handle) pair: the
//! on-disk file is the only dedup index, so the existence check runs before
//! any network I/O. The derivation service is fronted by two equivalent
//! endpoints tried in fixed order; an empty body means "this endpoint has
//! nothing" and falls through to the next, while an empty body from every
//! endpoint is surfaced as [`FetchOutcome::AllEndpointsExhausted`] for the
//! driver to act on. Transport errors propagate as ordinary errors.
//!
//! The HTTP transport sits behind the [`CodeSource`] trait so the fetch
//! logic is testable without a network.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use reqwest::header::{
    ACCEPT_LANGUAGE, ACCESS_CONTROL_ALLOW_ORIGIN, HeaderMap, HeaderName, HeaderValue, USER_AGENT,
};

/// Derivation endpoints, tried in order; the first non-empty body wins
pub const SNAPCODE_ENDPOINTS: &[&str] = &[
    "https://feelinsonice-hrd.appspot.com/web/deeplink/snapcode",
    "https://feelinsonice.appspot.com/web/deeplink/snapcode",
];

/// Write granularity when persisting a fetched body
const CHUNK_SIZE: usize = 1024;

/// Result of one cache-guarded fetch attempt
///
/// `AllEndpointsExhausted` is an outcome rather than an error so the
/// orchestration layer alone decides whether to halt the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The asset was already on disk; no request was issued
    AlreadyPresent,
    /// The asset was fetched and written to the given path
    Saved(PathBuf),
    /// Every endpoint returned an empty body; nothing was written
    AllEndpointsExhausted,
}

/// Transport seam for the derivation service
pub trait CodeSource {
    /// Fetch the full raw body from one endpoint URL
    ///
    /// An empty body is the service's failure signal, not an error.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Live HTTP transport with the fixed spoofed client identity
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static("Snapchat/8.0.1.3 (Nexus 5; Android 21; gzip)"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-GB;q=1, en;q=0.9"));
        headers.insert(
            HeaderName::from_static("accept-locale"),
            HeaderValue::from_static("en"),
        );
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));

        let client = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build snapcode HTTP client")?;

        Ok(Self { client })
    }
}

impl CodeSource for HttpSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Snapcode request to {} failed", url))?;

        let body = response
            .bytes()
            .with_context(|| format!("Failed to read snapcode body from {}", url))?;

        Ok(body.to_vec())
    }
}

/// Target path for a handle's snapcode inside `dir`
///
/// The extension is appended, not substituted: handles may legally contain
/// dots and `Path::with_extension` would truncate them.
pub fn asset_path(dir: &Path, handle: &str, ext: &str) -> PathBuf {
    dir.join(format!("{}.{}", handle, ext))
}

/// Cache guard: has this snapcode already been saved?
///
/// Pure filesystem check, best-effort and non-atomic; the pipeline is
/// sequential so there is no competing writer.
pub fn asset_exists(dir: &Path, handle: &str, ext: &str) -> bool {
    asset_path(dir, handle, ext).exists()
}

/// Persist a body to `path` in chunks, skipping zero-length chunks
///
/// Zero-length chunks are transport keep-alive artifacts; the bytes on disk
/// must be identical to the data chunks alone.
pub fn persist_chunks<'a, I>(path: &Path, chunks: I) -> Result<()>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    for chunk in chunks {
        if chunk.is_empty() {
            continue;
        }
        file.write_all(chunk)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}

fn snapcode_url(endpoint: &str, handle: &str, format: &str, size: &str) -> String {
    format!("{}?username={}&type={}&size={}", endpoint, handle, format, size)
}

/// Fetch the snapcode for `handle` into `dir`, exactly once
///
/// `format` and `size` pass through to the service verbatim; invalid values
/// come back as an empty body, not a local error. `dir` must already exist.
/// The file extension is the lowercased format token.
pub fn fetch_snapcode(
    source: &dyn CodeSource,
    handle: &str,
    dir: &Path,
    format: &str,
    size: &str,
) -> Result<FetchOutcome> {
    let ext = format.to_ascii_lowercase();

    if asset_exists(dir, handle, &ext) {
        log::info!("Snapcode for {} already saved, skipping fetch", handle);
        return Ok(FetchOutcome::AlreadyPresent);
    }

    for endpoint in SNAPCODE_ENDPOINTS {
        let url = snapcode_url(endpoint, handle, format, size);
        let body = source.fetch(&url)?;

        if body.is_empty() {
            log::warn!("Unable to retrieve snapcode from {}", endpoint);
            continue;
        }

        let target = asset_path(dir, handle, &ext);
        log::info!("Saving {}", target.display());
        persist_chunks(&target, body.chunks(CHUNK_SIZE))?;
        return Ok(FetchOutcome::Saved(target));
    }

    Ok(FetchOutcome::AllEndpointsExhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Scripted transport: maps an endpoint-base substring to a fixed body
    /// and records every URL it is asked for.
    struct StubSource {
        bodies: Vec<(&'static str, Vec<u8>)>,
        calls: RefCell<Vec<String>>,
    }

    impl StubSource {
        fn new(bodies: Vec<(&'static str, Vec<u8>)>) -> Self {
            Self {
                bodies,
                calls: RefCell::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl CodeSource for StubSource {
        fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            self.calls.borrow_mut().push(url.to_string());
            for (fragment, body) in &self.bodies {
                if url.contains(fragment) {
                    return Ok(body.clone());
                }
            }
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_fetch_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let source = StubSource::new(vec![("feelinsonice-hrd", b"<svg/>".to_vec())]);

        let first = fetch_snapcode(&source, "johnny_99", dir.path(), "SVG", "400").unwrap();
        assert!(matches!(first, FetchOutcome::Saved(_)));
        assert_eq!(source.call_count(), 1);

        // Second call short-circuits on the existing file: no new request
        let second = fetch_snapcode(&source, "johnny_99", dir.path(), "SVG", "400").unwrap();
        assert_eq!(second, FetchOutcome::AlreadyPresent);
        assert_eq!(source.call_count(), 1);
    }

    #[test]
    fn test_fallback_endpoint_order() {
        let dir = TempDir::new().unwrap();
        // Primary endpoint is empty, fallback carries the body. The stub
        // matches "feelinsonice-hrd" first, so the plain host must be listed
        // with a fragment the primary URL does not contain.
        let source = StubSource::new(vec![
            ("feelinsonice-hrd", Vec::new()),
            ("feelinsonice.appspot", b"fallback-bytes".to_vec()),
        ]);

        let outcome = fetch_snapcode(&source, "cool-guy1", dir.path(), "SVG", "400").unwrap();
        let path = asset_path(dir.path(), "cool-guy1", "svg");
        assert_eq!(outcome, FetchOutcome::Saved(path.clone()));
        assert_eq!(source.call_count(), 2);
        assert_eq!(std::fs::read(&path).unwrap(), b"fallback-bytes");
    }

    #[test]
    fn test_all_endpoints_exhausted() {
        let dir = TempDir::new().unwrap();
        let source = StubSource::new(vec![]);

        let outcome = fetch_snapcode(&source, "ghost_town1", dir.path(), "SVG", "400").unwrap();
        assert_eq!(outcome, FetchOutcome::AllEndpointsExhausted);
        assert_eq!(source.call_count(), 2);

        // Nothing was created or partially written
        assert!(!asset_exists(dir.path(), "ghost_town1", "svg"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_persist_skips_empty_chunks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chunked.svg");

        let chunks: Vec<&[u8]> = vec![b"abc", b"", b"def", b"", b"", b"g"];
        persist_chunks(&path, chunks).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"abcdefg");
    }

    #[test]
    fn test_extension_follows_format() {
        let dir = TempDir::new().unwrap();
        let source = StubSource::new(vec![("feelinsonice-hrd", b"png-bytes".to_vec())]);

        let outcome = fetch_snapcode(&source, "johnny_99", dir.path(), "PNG", "400").unwrap();
        assert_eq!(
            outcome,
            FetchOutcome::Saved(asset_path(dir.path(), "johnny_99", "png"))
        );
        assert!(asset_exists(dir.path(), "johnny_99", "png"));
    }

    #[test]
    fn test_dotted_handle_keeps_its_dot() {
        let dir = TempDir::new().unwrap();
        let path = asset_path(dir.path(), "alice.b99", "svg");
        assert_eq!(path.file_name().unwrap(), "alice.b99.svg");
    }

    #[test]
    fn test_request_url_shape() {
        let url = snapcode_url(SNAPCODE_ENDPOINTS[0], "johnny_99", "SVG", "400");
        assert_eq!(
            url,
            "https://feelinsonice-hrd.appspot.com/web/deeplink/snapcode?username=johnny_99&type=SVG&size=400"
        );
    }
}
