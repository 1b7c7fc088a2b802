//! Metabolic loss rate models.
//!
//! This module provides the two scaling laws used to derive per-species
//! metabolic loss rates, and a [`twine_core::Model`] adapter that maps a
//! [`SpeciesCollection`] to its loss vector. The computational core is in the
//! internal `core` module.
//!
//! Scenario code picks a law explicitly through [`LossModel`]:
//!
//! ```
//! use foodweb_models::models::{
//!     foodweb::SpeciesCollection,
//!     metabolism::{LossModel, TemperatureScaling},
//! };
//! use foodweb_models::support::units::celsius;
//! use ndarray::array;
//! use twine_core::Model;
//!
//! let web = SpeciesCollection::new(
//!     vec!["algae".into(), "daphnia".into()],
//!     array![[0.0, 1.0], [0.0, 0.0]],
//!     vec![120.0, 8.0],
//!     vec![1e-4, 0.02],
//!     vec![0.45, 0.85],
//! )
//! .unwrap();
//!
//! let warm = LossModel::from(TemperatureScaling::default().at(celsius(20.0)).unwrap());
//! let losses = warm.call(&web).unwrap();
//! assert_eq!(losses.len(), 2);
//! ```

mod core;

pub use self::core::{
    LossModel, MassScaling, MetabolicLoss, TemperatureScaling, ThermalLoss, mass_scaling_loss,
    temperature_scaling_loss,
};

use ndarray::Array1;
use twine_core::Model;

use crate::{models::foodweb::SpeciesCollection, support::error::DomainError};

/// Computes the loss vector for every species in a collection, in order.
impl Model for LossModel {
    type Input = SpeciesCollection;
    type Output = Array1<f64>;
    type Error = DomainError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.loss_rates(input.body_masses())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn model_adapter_follows_collection_order() {
        let web = SpeciesCollection::new(
            vec!["a".into(), "b".into(), "c".into()],
            array![[0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 0.0, 0.0]],
            vec![10.0, 5.0, 1.0],
            vec![16.0, 1.0, 81.0],
            vec![0.5, 0.9, 0.9],
        )
        .unwrap();

        let losses = LossModel::default().call(&web).unwrap();
        assert_relative_eq!(losses[0], 0.355, epsilon = 1e-12);
        assert_relative_eq!(losses[1], 0.71, epsilon = 1e-12);
        assert_relative_eq!(losses[2], 0.71 / 3.0, epsilon = 1e-12);
    }
}
