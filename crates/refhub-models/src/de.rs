//! Serde helpers for form-style inputs.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer};

/// Deserialize an optional value from a string, treating `""` as absent.
///
/// Browser forms and query strings send empty strings for unset selects.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(de::Error::custom),
    }
}
