//! Food web scenario models.
//!
//! This module provides a [`twine_core::Model`] that turns a
//! [`ScenarioConfig`] into an immutable [`Scenario`] for a fixed base
//! collection and flux solver. The computational core is in the internal
//! `core` module.

pub(crate) mod core;

pub use self::core::{
    CollectionError, EfficiencyLevel, FluxChange, FluxError, FluxMatrix, FluxOptions,
    FluxProblem, FoodWebData, Scenario, ScenarioConfig, ScenarioError, Species,
    SpeciesCollection, compare_outgoing,
};

use std::error::Error as StdError;

use ndarray::Array2;
use twine_core::Model;

/// Builds scenarios from configurations against one base collection.
///
/// Borrowing the base and the solver lets a single model evaluate many
/// configurations, such as a temperature sweep.
#[derive(Debug, Clone, Copy)]
pub struct ScenarioModel<'a, S> {
    base: &'a SpeciesCollection,
    solver: &'a S,
}

impl<'a, S> ScenarioModel<'a, S> {
    #[must_use]
    pub fn new(base: &'a SpeciesCollection, solver: &'a S) -> Self {
        Self { base, solver }
    }

    #[must_use]
    pub fn base(&self) -> &SpeciesCollection {
        self.base
    }
}

impl<S> Model for ScenarioModel<'_, S>
where
    S: Model<Input = FluxProblem, Output = Array2<f64>>,
    S::Error: StdError + Send + Sync + 'static,
{
    type Input = ScenarioConfig;
    type Output = Scenario;
    type Error = ScenarioError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        Scenario::from_config(self.base, input, self.solver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::foodweb::core::test_support::{ConsumptionSolver, lake};

    #[test]
    fn temperature_sweep_through_the_model() {
        let web = lake();
        let model = ScenarioModel::new(&web, &ConsumptionSolver);

        let totals: Vec<f64> = [0.0, 10.0, 20.0, 30.0]
            .into_iter()
            .map(|t| {
                let config = ScenarioConfig {
                    name: format!("{t} C"),
                    temperature_celsius: Some(t),
                    ..ScenarioConfig::default()
                };
                model.call(&config).unwrap().fluxes().total()
            })
            .collect();

        assert!(totals.windows(2).all(|pair| pair[1] > pair[0]));
        assert_eq!(model.base().len(), 5);
    }

    #[test]
    fn model_reports_configuration_errors() {
        let web = lake();
        let model = ScenarioModel::new(&web, &ConsumptionSolver);
        let config = ScenarioConfig {
            removed_species: vec!["otter".into()],
            ..ScenarioConfig::default()
        };
        assert!(matches!(model.call(&config), Err(ScenarioError::Shape(_))));
    }
}
