use serde::{Serialize, Serializer};

/// A reading that may genuinely not exist on this host (no battery, no
/// processes visible). Distinct from a failed query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric<T> {
    Available(T),
    Unavailable,
}

impl<T> Metric<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Metric::Available(_))
    }

    pub fn available(self) -> Option<T> {
        match self {
            Metric::Available(value) => Some(value),
            Metric::Unavailable => None,
        }
    }

    /// Formats the value, or `N/A` when there is none.
    pub fn display_with<F: FnOnce(&T) -> String>(&self, f: F) -> String {
        match self {
            Metric::Available(value) => f(value),
            Metric::Unavailable => "N/A".to_string(),
        }
    }
}

impl<T> From<Option<T>> for Metric<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Metric::Available(value),
            None => Metric::Unavailable,
        }
    }
}

impl<T: Serialize> Serialize for Metric<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Metric::Available(value) => value.serialize(serializer),
            Metric::Unavailable => serializer.serialize_none(),
        }
    }
}
