use serde::{Serialize, Serializer};

/// Three-state update for an optional field of a PATCH body.
///
/// - `NoChange`: the key is left out of the request
/// - `Set(value)`: the key carries the value
/// - `Clear`: the key is sent as `null`
///
/// Pair it with `#[serde(skip_serializing_if = "FieldUpdate::is_no_change")]`
/// on the containing struct field.
///
/// # Example
///
/// ```
/// use taskboard_domain::FieldUpdate;
///
/// let due: FieldUpdate<String> = None.into();
/// assert_eq!(due, FieldUpdate::Clear);
/// assert!(!due.is_no_change());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    NoChange,
    Set(T),
    Clear,
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::NoChange
    }
}

impl<T> FieldUpdate<T> {
    pub fn is_no_change(&self) -> bool {
        matches!(self, FieldUpdate::NoChange)
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        }
    }
}

impl<T: Serialize> Serialize for FieldUpdate<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldUpdate::Set(value) => value.serialize(serializer),
            FieldUpdate::NoChange | FieldUpdate::Clear => serializer.serialize_none(),
        }
    }
}
