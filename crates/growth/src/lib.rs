//! Growth projection module.
//!
//! Advances a population (herd size, yield units) year by year under
//! birth/sale/mortality rates. Stateless: persisting a projection is the
//! caller's business, [`SimulationRecord`] is only the value it would store.

pub mod record;
pub mod scenario;
pub mod simulate;

pub use record::SimulationRecord;
pub use scenario::{GrowthProjection, GrowthRates, GrowthScenario};
pub use simulate::simulate;
