//! Tri-state PATCH fields.
//!
//! `Option<Option<T>>` distinguishes "field absent" (leave unchanged) from
//! "field is null" (clear it). Plain serde collapses both to `None`; use
//! `#[serde(default, deserialize_with = "nullable::deserialize")]`.

use serde::{Deserialize, Deserializer};

/// Deserialize a present field (null or value) as `Some(..)`.
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
