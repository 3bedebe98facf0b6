//! `agrolytics-core` — shared building blocks for the analytics engine.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the error model, rounding and the explicit threshold
//! configuration every computation receives as an argument.

pub mod config;
pub mod error;
pub mod id;
pub mod rounding;
pub mod value_object;

pub use config::{AnalyticsConfig, HealthThresholds, VariancePolicy};
pub use error::{DomainError, DomainResult};
pub use id::{ParcelId, SimulationId};
pub use rounding::round2;
pub use value_object::ValueObject;
