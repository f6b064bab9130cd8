//! Handle extraction from free-text profile fields
//!
//! Profiles advertise Snapchat handles by convention, not by any structured
//! field, so recognition is a regex over free text. The grammar is the
//! system's entire signal-detection behavior and is fixed:
//!
//! - Trigger tokens (case-insensitive): `snapchat`, `snap` (optionally
//!   followed by `.me`), `sc`, or the ghost glyph `👻`. A word trigger may
//!   be preceded by the glyph and separated from the handle by any run of
//!   non-word characters. The bare glyph must touch the handle directly:
//!   `👻johnny99` counts, `👻 ghosted` does not.
//! - Handle shape: an ASCII letter, then 2–14 characters from letters,
//!   digits, `_`, `.`, `-`, ending in a letter or digit (4–16 total),
//!   followed by a word boundary.
//! - Leftmost match only; at most one handle per call.
//!
//! The extractor is pure and stateless. Absent input is treated as empty
//! text, and "no handle found" is an ordinary `None`, never an error.

use std::sync::OnceLock;

use regex::Regex;

/// Handle recognition grammar; see the module docs for the prose version.
const HANDLE_PATTERN: &str = r"(?i)(?:(?:👻\W*)?(?:snap(?:chat)?\b(?:.me)?|sc\b)\W*|👻)(?P<handle>[a-z][\w.\-]{2,14}[a-z0-9])\b(?:.?👻)?";

fn handle_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(HANDLE_PATTERN).expect("handle pattern is valid"))
}

/// Extract a Snapchat handle from a free-text field, if one is present
///
/// Returns the leftmost recognized handle. `None` input, text without a
/// trigger token, and triggers not followed by a syntactically valid handle
/// all yield `None`.
pub fn extract_handle(text: Option<&str>) -> Option<String> {
    let text = text.unwrap_or("");
    handle_regex()
        .captures(text)
        .and_then(|caps| caps.name("handle"))
        .map(|m| m.as_str().to_string())
}
