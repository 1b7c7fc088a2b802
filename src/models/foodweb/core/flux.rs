//! Inputs to and validated outputs from an external equilibrium flux solver.
//!
//! The solver is any [`twine_core::Model`] with `Input = FluxProblem` and
//! `Output = Array2<f64>`. This crate never solves for fluxes itself; it
//! prepares index-aligned inputs and rejects solutions that are misshapen or
//! contain negative or non-finite values.

use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{CollectionError, SpeciesCollection};

/// Which side of a feeding link an assimilation efficiency belongs to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyLevel {
    /// Efficiency depends on the resource being eaten.
    #[default]
    Resource,
    /// Efficiency is a property of the consumer.
    Consumer,
}

/// Mode flags passed through to the flux solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FluxOptions {
    pub efficiency_level: EfficiencyLevel,

    /// Rescale feeding preferences by resource biomass.
    pub biomass_preferences: bool,

    /// Loss rates are per unit biomass and must be multiplied by biomass.
    pub biomass_losses: bool,
}

impl Default for FluxOptions {
    fn default() -> Self {
        Self {
            efficiency_level: EfficiencyLevel::Resource,
            biomass_preferences: true,
            biomass_losses: true,
        }
    }
}

/// Index-aligned input handed to an external flux solver.
#[derive(Debug, Clone, PartialEq)]
pub struct FluxProblem {
    web: SpeciesCollection,
    losses: Array1<f64>,
    options: FluxOptions,
}

impl FluxProblem {
    /// Pairs a collection with its loss vector and solver options.
    ///
    /// # Errors
    ///
    /// Returns a [`CollectionError`] if `losses` does not have one
    /// non-negative, finite entry per species.
    pub fn new(
        collection: &SpeciesCollection,
        losses: &[f64],
        options: FluxOptions,
    ) -> Result<Self, CollectionError> {
        let web = collection.with_losses(losses)?;
        Ok(Self {
            web,
            losses: Array1::from(losses.to_vec()),
            options,
        })
    }

    /// Returns the collection, with losses attached.
    #[must_use]
    pub fn collection(&self) -> &SpeciesCollection {
        &self.web
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.web.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.web.is_empty()
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        self.web.names()
    }

    #[must_use]
    pub fn matrix(&self) -> &Array2<f64> {
        self.web.matrix()
    }

    #[must_use]
    pub fn biomasses(&self) -> Array1<f64> {
        Array1::from(self.web.biomasses().to_vec())
    }

    #[must_use]
    pub fn efficiencies(&self) -> Array1<f64> {
        Array1::from(self.web.efficiencies().to_vec())
    }

    #[must_use]
    pub fn losses(&self) -> &Array1<f64> {
        &self.losses
    }

    #[must_use]
    pub fn options(&self) -> FluxOptions {
        self.options
    }

    /// Returns the total loss of each species population.
    ///
    /// Multiplies by biomass when [`FluxOptions::biomass_losses`] is set.
    #[must_use]
    pub fn absolute_losses(&self) -> Array1<f64> {
        if self.options.biomass_losses {
            &self.losses * &self.biomasses()
        } else {
            self.losses.clone()
        }
    }

    /// Returns diet preferences with each consumer column summing to one.
    ///
    /// When [`FluxOptions::biomass_preferences`] is set, row `i` is first
    /// weighted by the biomass of resource `i`. Columns of species that eat
    /// nothing stay zero.
    #[must_use]
    pub fn preferences(&self) -> Array2<f64> {
        let mut prefs = self.web.matrix().clone();
        if self.options.biomass_preferences {
            for (mut row, biomass) in prefs.rows_mut().into_iter().zip(self.web.biomasses()) {
                row *= *biomass;
            }
        }
        for mut column in prefs.columns_mut() {
            let total = column.sum();
            if total > 0.0 {
                column /= total;
            }
        }
        prefs
    }
}

/// Errors in a flux matrix returned by an external solver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FluxError {
    #[error("solver returned a {rows}x{cols} flux matrix, expected {expected}x{expected}")]
    Shape {
        rows: usize,
        cols: usize,
        expected: usize,
    },

    #[error("solver returned flux {value} from species {resource} to species {consumer}")]
    InvalidFlux {
        resource: usize,
        consumer: usize,
        value: f64,
    },
}

/// A validated equilibrium flux matrix.
///
/// Entry `(i, j)` is the energy flux from resource `i` to consumer `j`.
/// Every entry is finite and non-negative; zero means the link is not realized.
#[derive(Debug, Clone, PartialEq)]
pub struct FluxMatrix {
    values: Array2<f64>,
}

impl FluxMatrix {
    /// Validates a solver result against the problem it was solved for.
    ///
    /// # Errors
    ///
    /// - [`FluxError::Shape`] if the matrix is not `n×n` for `n` species.
    /// - [`FluxError::InvalidFlux`] for the first negative or non-finite entry.
    pub fn from_solution(problem: &FluxProblem, values: Array2<f64>) -> Result<Self, FluxError> {
        let expected = problem.len();
        let (rows, cols) = values.dim();
        if rows != expected || cols != expected {
            return Err(FluxError::Shape {
                rows,
                cols,
                expected,
            });
        }

        if let Some(((resource, consumer), &value)) = values
            .indexed_iter()
            .find(|(_, value)| !(value.is_finite() && **value >= 0.0))
        {
            return Err(FluxError::InvalidFlux {
                resource,
                consumer,
                value,
            });
        }

        Ok(Self { values })
    }

    #[must_use]
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Returns the number of species.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.nrows()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the flux from `resource` to `consumer`.
    #[must_use]
    pub fn get(&self, resource: usize, consumer: usize) -> Option<f64> {
        self.values.get((resource, consumer)).copied()
    }

    /// Row sums: total flux leaving each species as a resource.
    #[must_use]
    pub fn outgoing(&self) -> Array1<f64> {
        self.values.sum_axis(Axis(1))
    }

    /// Column sums: total flux entering each species as a consumer.
    #[must_use]
    pub fn incoming(&self) -> Array1<f64> {
        self.values.sum_axis(Axis(0))
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.values.sum()
    }

    /// Number of links carrying a strictly positive flux.
    #[must_use]
    pub fn realized_links(&self) -> usize {
        self.values.iter().filter(|&&flux| flux > 0.0).count()
    }
}
