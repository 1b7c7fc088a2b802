//! Species collections, flux solver plumbing, and scenario records.
//!
//! Data flows one way: a validated [`SpeciesCollection`] is filtered, paired
//! with a loss vector into a [`FluxProblem`], solved by an external model,
//! and the checked [`FluxMatrix`] is packaged into a [`Scenario`].

mod collection;
mod compare;
mod data;
mod flux;
mod scenario;

#[cfg(test)]
pub(super) mod test_support;

pub use collection::{CollectionError, Species, SpeciesCollection};
pub use compare::{FluxChange, compare_outgoing};
pub use data::FoodWebData;
pub use flux::{EfficiencyLevel, FluxError, FluxMatrix, FluxOptions, FluxProblem};
pub use scenario::{Scenario, ScenarioConfig, ScenarioError};
