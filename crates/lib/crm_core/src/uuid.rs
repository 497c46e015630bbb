//! Token identifiers.
//!
//! Every issued JWT carries a `jti` so that two tokens minted in the same
//! second for the same subject are still distinct.

use uuid::Uuid;

/// A fresh `jti` value: a UUIDv7 rendered in hyphenated form.
///
/// IDs issued later sort after earlier ones, which keeps rotated tokens in
/// issue order when grepped out of logs.
pub fn token_id() -> String {
    Uuid::now_v7().hyphenated().to_string()
}
