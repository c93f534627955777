//! Itinerary quality scores.

/// Raw inputs a score was computed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreFactors {
    /// Total travel time in minutes
    pub time: u32,
    /// Number of transfers
    pub transfers: usize,
    /// Total distance in km
    pub distance: f64,
    /// Walking time in minutes
    pub walking_time: u32,
    /// Number of legs
    pub route_count: usize,
    /// Confidence in [0.1, 1.0]
    pub confidence: f64,
}

/// Multi-factor quality score of an itinerary, out of 100.
///
/// Each sub-score is rounded to a whole number and capped at its `MAX_*`
/// constant. `total` is the rounded sum of the unrounded sub-scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteScore {
    pub total: u32,
    pub time: u32,
    pub transfer: u32,
    pub distance: u32,
    pub reliability: u32,
    pub comfort: u32,
    pub accessibility: u32,
    pub factors: ScoreFactors,
}

impl RouteScore {
    pub const MAX_TIME: u32 = 25;
    pub const MAX_TRANSFER: u32 = 25;
    pub const MAX_DISTANCE: u32 = 20;
    pub const MAX_RELIABILITY: u32 = 15;
    pub const MAX_COMFORT: u32 = 10;
    pub const MAX_ACCESSIBILITY: u32 = 5;
    pub const MAX_TOTAL: u32 = 100;
}
