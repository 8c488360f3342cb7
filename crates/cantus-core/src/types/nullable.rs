//! Serde helper for fields the service sends as `null` instead of omitting.

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as `T::default()`.
///
/// Pair with `#[serde(default)]` so a missing key is covered too.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
