//! Trip planner over a fixed bus network.
//!
//! This module answers: "which buses take me from this place to that
//! one?" Each query resolves both places to stops, then combines several
//! searches (direct rides, one-transfer rides through a shared stop,
//! bounded breadth-first search, bridging routes and informed search with
//! alternatives) before ranking and de-duplicating the itineraries found.

mod analysis;
mod assemble;
mod astar;
mod bfs;
mod config;
mod direct;
mod multi;
pub(crate) mod rank;
mod search;
mod transfer;

pub use analysis::{Priority, RouteAnalysis, UnknownPriority, analyze, recommend};
pub use config::PlannerConfig;
pub use rank::{compare_options, compare_scores, deduplicate, rank_options, score};
pub use search::{PlanError, Planner, find_routes};
