//! Web layer for the bus trip planner.
//!
//! Provides JSON endpoints for stop suggestions, popular routes, trip
//! planning and itinerary analysis.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
