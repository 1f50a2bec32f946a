//! Serde helpers for partial-update payloads

use serde::{Deserialize, Deserializer};

/// Distinguish an absent field from an explicit `null`.
///
/// Use together with `#[serde(default)]`:
/// - field missing → `None` (leave unchanged)
/// - `null`        → `Some(None)` (clear)
/// - value         → `Some(Some(value))`
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
