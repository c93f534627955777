//! Bus trip planner.
//!
//! Answers "which buses take me from here to there?" over a fixed network
//! of bus routes, and serves the answers over HTTP.

pub mod cache;
pub mod domain;
pub mod network;
pub mod planner;
pub mod web;
