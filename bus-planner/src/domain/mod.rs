//! Domain types for the bus trip planner.
//!
//! This module contains the core domain model types that represent
//! validated transit data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod dataset;
mod error;
mod itinerary;
mod leg;
mod plan;
mod route;
mod score;
mod stop;

pub use dataset::Dataset;
pub use error::{DatasetError, DomainError};
pub use itinerary::{ItineraryKey, RouteOption, RouteType, confidence};
pub use leg::{CostModel, RouteLeg};
pub use plan::RoutePlan;
pub use route::{BacktrackLimit, Route, RouteId, Span};
pub use score::{RouteScore, ScoreFactors};
pub use stop::{Coordinates, Stop, StopId};
