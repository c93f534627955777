//! Stop identity types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a physical stop.
///
/// Several routes reuse the same id when they serve the same physical stop,
/// so all matching and indexing keys on this id rather than on the
/// (non-unique) display name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StopId(pub u32);

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Optional geographic position of a stop. Not used by planning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A bus stop as it appears in a route's stop list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

impl Stop {
    /// Create a stop without coordinates.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: StopId(id),
            name: name.into(),
            coordinates: None,
        }
    }

    /// Lowercased name, as used by the name index.
    pub fn search_name(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_debug() {
        let id = StopId(42);
        assert_eq!(id.to_string(), "42");
        assert_eq!(format!("{id:?}"), "StopId(42)");
    }

    #[test]
    fn ordering_is_numeric() {
        assert!(StopId(2) < StopId(10));
    }

    #[test]
    fn search_name_is_lowercased_and_trimmed() {
        let stop = Stop::new(1, "  GEC Circle ");
        assert_eq!(stop.search_name(), "gec circle");
    }

    #[test]
    fn deserializes_without_coordinates() {
        let stop: Stop = serde_json::from_str(r#"{"id": 7, "name": "Agrabad"}"#).unwrap();
        assert_eq!(stop.id, StopId(7));
        assert_eq!(stop.name, "Agrabad");
        assert!(stop.coordinates.is_none());
    }

    #[test]
    fn deserializes_with_coordinates() {
        let stop: Stop = serde_json::from_str(
            r#"{"id": 7, "name": "Agrabad", "coordinates": {"lat": 22.32, "lng": 91.81}}"#,
        )
        .unwrap();
        let coords = stop.coordinates.unwrap();
        assert_eq!(coords.lat, 22.32);
        assert_eq!(coords.lng, 91.81);
    }
}
