//! Immutable per-scenario records and the configuration that produces them.

use std::error::Error as StdError;

use log::{debug, info};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use twine_core::Model;
use uom::si::f64::ThermodynamicTemperature;

use crate::{
    models::metabolism::{LossModel, MassScaling, MetabolicLoss, TemperatureScaling},
    support::{
        error::{DomainError, ShapeError},
        units::celsius,
    },
};

use super::{CollectionError, FluxError, FluxMatrix, FluxOptions, FluxProblem, SpeciesCollection};

/// Errors that can occur while building a [`Scenario`].
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    /// The external flux solver failed.
    #[error("flux solver failed for scenario `{scenario}`")]
    Solver {
        scenario: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error(transparent)]
    Flux(#[from] FluxError),
}

impl From<CollectionError> for ScenarioError {
    fn from(err: CollectionError) -> Self {
        match err {
            CollectionError::Shape(err) => Self::Shape(err),
            CollectionError::Domain(err) => Self::Domain(err),
        }
    }
}

/// Declarative description of a scenario.
///
/// Every field has a default, so a configuration file only needs to state
/// what differs from the basal, unfiltered web:
///
/// ```
/// use foodweb_models::models::foodweb::ScenarioConfig;
///
/// let config = ScenarioConfig::from_toml_str(r#"
///     name = "warm"
///     temperature_celsius = 20.0
///     removed_species = ["pike"]
///
///     [flux]
///     efficiency_level = "consumer"
/// "#).unwrap();
///
/// assert_eq!(config.temperature_celsius, Some(20.0));
/// assert!(config.log_biomass_threshold.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    pub name: String,

    /// Selects temperature scaling when present, mass scaling otherwise.
    pub temperature_celsius: Option<f64>,

    /// Drops species whose `ln(biomass)` is below this value.
    pub log_biomass_threshold: Option<f64>,

    /// Species removed before any other step.
    pub removed_species: Vec<String>,

    pub flux: FluxOptions,
    pub mass_scaling: MassScaling,
    pub temperature_scaling: TemperatureScaling,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            name: "basal".to_owned(),
            temperature_celsius: None,
            log_biomass_threshold: None,
            removed_species: Vec::new(),
            flux: FluxOptions::default(),
            mass_scaling: MassScaling::default(),
            temperature_scaling: TemperatureScaling::default(),
        }
    }
}

impl ScenarioConfig {
    /// Parses a configuration from TOML.
    ///
    /// # Errors
    ///
    /// Returns a [`toml::de::Error`] on malformed input or unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Returns the loss model this configuration selects.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if the temperature is at or below absolute zero.
    pub fn loss_model(&self) -> Result<LossModel, DomainError> {
        match self.temperature_celsius {
            Some(t) => Ok(self.temperature_scaling.at(celsius(t))?.into()),
            None => Ok(self.mass_scaling.into()),
        }
    }

    /// Applies species removal, then the biomass threshold, to `base`.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::UnknownSpecies`] if a removed species is not in `base`.
    pub fn select(&self, base: &SpeciesCollection) -> Result<SpeciesCollection, ShapeError> {
        let web = base.remove_species(self.removed_species.as_slice())?;
        Ok(match self.log_biomass_threshold {
            Some(threshold) => web.filter_by_biomass_threshold(threshold),
            None => web,
        })
    }
}

/// A fully derived scenario: species, losses and equilibrium fluxes.
///
/// Scenarios are built once by [`Scenario::build`] or
/// [`Scenario::from_config`] and never modified.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    name: String,
    loss_model: LossModel,
    problem: FluxProblem,
    fluxes: FluxMatrix,
}

impl Scenario {
    /// Computes losses, solves for fluxes, and validates the solution.
    ///
    /// # Errors
    ///
    /// Returns a [`ScenarioError`] if the losses cannot be computed, the
    /// solver fails, or its solution is invalid.
    pub fn build<S>(
        name: impl Into<String>,
        collection: &SpeciesCollection,
        loss_model: LossModel,
        options: FluxOptions,
        solver: &S,
    ) -> Result<Self, ScenarioError>
    where
        S: Model<Input = FluxProblem, Output = Array2<f64>>,
        S::Error: StdError + Send + Sync + 'static,
    {
        let name = name.into();
        debug!(
            "scenario `{name}`: computing losses for {} species with {loss_model:?}",
            collection.len()
        );

        let losses = loss_model.loss_rates(collection.body_masses())?.to_vec();
        let problem = FluxProblem::new(collection, &losses, options)?;

        let solution = solver.call(&problem).map_err(|err| ScenarioError::Solver {
            scenario: name.clone(),
            source: Box::new(err),
        })?;
        let fluxes = FluxMatrix::from_solution(&problem, solution)?;

        info!(
            "scenario `{name}`: {} species, {} realized links, total flux {:.4e}",
            problem.len(),
            fluxes.realized_links(),
            fluxes.total()
        );

        Ok(Self {
            name,
            loss_model,
            problem,
            fluxes,
        })
    }

    /// Builds a scenario from a base collection and a configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ScenarioError`] if species selection fails or
    /// [`Scenario::build`] fails.
    pub fn from_config<S>(
        base: &SpeciesCollection,
        config: &ScenarioConfig,
        solver: &S,
    ) -> Result<Self, ScenarioError>
    where
        S: Model<Input = FluxProblem, Output = Array2<f64>>,
        S::Error: StdError + Send + Sync + 'static,
    {
        let web = config.select(base)?;
        let loss_model = config.loss_model()?;
        Self::build(config.name.clone(), &web, loss_model, config.flux, solver)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the scenario temperature, if its loss model uses one.
    #[must_use]
    pub fn temperature(&self) -> Option<ThermodynamicTemperature> {
        self.loss_model.temperature()
    }

    #[must_use]
    pub fn loss_model(&self) -> &LossModel {
        &self.loss_model
    }

    /// Returns the species in this scenario, with losses attached.
    #[must_use]
    pub fn collection(&self) -> &SpeciesCollection {
        self.problem.collection()
    }

    #[must_use]
    pub fn problem(&self) -> &FluxProblem {
        &self.problem
    }

    #[must_use]
    pub fn losses(&self) -> &[f64] {
        self.problem.losses().as_slice().unwrap_or_default()
    }

    #[must_use]
    pub fn fluxes(&self) -> &FluxMatrix {
        &self.fluxes
    }

    /// Pairs each species name with its total outgoing flux.
    #[must_use]
    pub fn outgoing_by_species(&self) -> Vec<(&str, f64)> {
        self.collection()
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.fluxes.outgoing())
            .collect()
    }
}
