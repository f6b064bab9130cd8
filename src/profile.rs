//! Safe field accessors over loosely typed search results
//!
//! The search API returns profile records with no schema guarantees: any
//! field may be missing, null, or the wrong type. Each accessor walks its
//! key path and yields `None` on the first missing or malformed step, so
//! callers branch on presence instead of handling errors. Nothing here
//! touches the network or the filesystem.

use serde_json::Value;

use crate::models::UserInfo;

/// Profile display name (`name`)
pub fn username(record: &Value) -> Option<String> {
    record.get("name")?.as_str().map(str::to_string)
}

/// Free-text status field (`freetext`)
pub fn freetext(record: &Value) -> Option<String> {
    record.get("freetext")?.as_str().map(str::to_string)
}

/// Secondary "what's up" status field (`whazzup`)
pub fn whazzup(record: &Value) -> Option<String> {
    record.get("whazzup")?.as_str().map(str::to_string)
}

/// Home city (`locations.home.city`)
pub fn hometown(record: &Value) -> Option<String> {
    record
        .get("locations")?
        .get("home")?
        .get("city")?
        .as_str()
        .map(str::to_string)
}

/// Home country (`locations.home.country`)
pub fn country(record: &Value) -> Option<String> {
    record
        .get("locations")?
        .get("home")?
        .get("country")?
        .as_str()
        .map(str::to_string)
}

/// Profile age (`age`), coerced to an integer
///
/// The API serves this as either a number or a numeric string; anything
/// that does not coerce cleanly yields `None` rather than an error.
pub fn age(record: &Value) -> Option<u32> {
    match record.get("age")? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Assemble the flat per-profile record consumed by the scanner
pub fn user_info(record: &Value) -> UserInfo {
    UserInfo {
        username: username(record),
        age: age(record),
        hometown: hometown(record),
        country: country(record),
        freetext: freetext(record),
        whazzup: whazzup(record),
    }
}
