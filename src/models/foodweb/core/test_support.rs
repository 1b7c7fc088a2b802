use std::convert::Infallible;

use ndarray::{Array2, array};
use thiserror::Error;
use twine_core::Model;

use super::{EfficiencyLevel, FluxProblem, SpeciesCollection};

/// A five-species lake web with two basal resources and a linear predator chain.
///
/// Matrix (rows eaten by columns): detritus and algae feed zooplankton,
/// zooplankton feeds perch, perch feeds pike.
pub(crate) fn lake() -> SpeciesCollection {
    SpeciesCollection::new(
        ["detritus", "algae", "zooplankton", "perch", "pike"]
            .map(String::from)
            .to_vec(),
        array![
            [0.0, 0.0, 0.3, 0.0, 0.0],
            [0.0, 0.0, 0.7, 0.0, 0.0],
            [0.0, 0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 0.0, 1.0],
            [0.0, 0.0, 0.0, 0.0, 0.0],
        ],
        vec![1000.0, 500.0, 50.0, 10.0, 2.0],
        vec![1.0, 1e-5, 0.01, 50.0, 1500.0],
        vec![0.158, 0.545, 0.906, 0.906, 0.906],
    )
    .unwrap()
}

/// Per-biomass loss rates for [`lake`], detritus first.
pub(crate) fn lake_losses() -> Vec<f64> {
    vec![0.0, 2.5, 0.8, 0.27, 0.11]
}

/// Each consumer eats exactly enough to replace its losses.
///
/// `F[i, j] = preference[i, j] * loss[j] / efficiency`, where the efficiency
/// is taken from the resource or the consumer according to the options.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConsumptionSolver;

impl Model for ConsumptionSolver {
    type Input = FluxProblem;
    type Output = Array2<f64>;
    type Error = Infallible;

    fn call(&self, problem: &FluxProblem) -> Result<Array2<f64>, Infallible> {
        let prefs = problem.preferences();
        let losses = problem.absolute_losses();
        let efficiencies = problem.efficiencies();
        let level = problem.options().efficiency_level;

        Ok(Array2::from_shape_fn(prefs.dim(), |(i, j)| {
            let efficiency = match level {
                EfficiencyLevel::Resource => efficiencies[i],
                EfficiencyLevel::Consumer => efficiencies[j],
            };
            prefs[[i, j]] * losses[j] / efficiency
        }))
    }
}

/// Returns a correctly sized matrix full of NaN.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NanSolver;

impl Model for NanSolver {
    type Input = FluxProblem;
    type Output = Array2<f64>;
    type Error = Infallible;

    fn call(&self, problem: &FluxProblem) -> Result<Array2<f64>, Infallible> {
        Ok(Array2::from_elem((problem.len(), problem.len()), f64::NAN))
    }
}

#[derive(Debug, Error)]
#[error("equilibrium iteration did not converge")]
pub(crate) struct NotConverged;

/// Always fails.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FailingSolver;

impl Model for FailingSolver {
    type Input = FluxProblem;
    type Output = Array2<f64>;
    type Error = NotConverged;

    fn call(&self, _problem: &FluxProblem) -> Result<Array2<f64>, NotConverged> {
        Err(NotConverged)
    }
}
