//! Test fixtures for ev-route-planner.
//!
//! Provides realistic test data:
//! - Real Nepal city and highway-town coordinates
//! - Builders for vehicles and charging stations

pub mod nepal_locations;

pub use nepal_locations::*;
