use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

/// A field Canvas doesn't always send in the same shape.
///
/// Deserializing tries `T` first. Anything else is kept verbatim in
/// [`Loose::Unknown`] instead of failing the surrounding record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Loose<T> {
    Known(T),
    Unknown(Value),
}

impl<T> Loose<T> {
    /// The value, if it came in the expected shape.
    pub fn known(&self) -> Option<&T> {
        match self {
            Loose::Known(value) => Some(value),
            Loose::Unknown(_) => None,
        }
    }

    /// Like [`Loose::known()`], but takes ownership.
    pub fn into_known(self) -> Option<T> {
        match self {
            Loose::Known(value) => Some(value),
            Loose::Unknown(_) => None,
        }
    }

    /// Did Canvas send something other than a `T`?
    pub fn is_unknown(&self) -> bool { matches!(self, Loose::Unknown(_)) }
}

impl<T> From<T> for Loose<T> {
    fn from(value: T) -> Loose<T> { Loose::Known(value) }
}

/// Read an explicit `null` as `T::default()`, the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(
    deserializer: D,
) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    <Option<T> as serde::Deserialize>::deserialize(deserializer)
        .map(Option::unwrap_or_default)
}
