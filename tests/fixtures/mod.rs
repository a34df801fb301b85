//! Test fixtures for route-planner.
//!
//! Provides:
//! - Real Las Vegas / Henderson service addresses (from OpenStreetMap)
//! - Deterministic travel estimators and stop builders

#![allow(dead_code)]

pub mod estimators;
pub mod service_area;

pub use estimators::*;
pub use service_area::*;
