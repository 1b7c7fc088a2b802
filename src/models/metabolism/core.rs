//! Metabolic loss scaling laws.
//!
//! Two published relationships map individual body mass to a loss rate per
//! unit biomass:
//!
//! - [`MassScaling`]: `x = x0 · M^b` with `b = -0.25`.
//! - [`TemperatureScaling`]: `x = B0 · M^b · exp(-E / (k·T))` with `b = 0.75`.
//!
//! The exponents have opposite signs. Both forms are reproduced as published
//! and remain separate, independently selectable models.

mod loss_model;
mod mass_scaling;
mod temperature_scaling;

pub use loss_model::LossModel;
pub use mass_scaling::MassScaling;
pub use temperature_scaling::{TemperatureScaling, ThermalLoss};

use ndarray::Array1;
use uom::si::f64::ThermodynamicTemperature;

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    error::{Attribute, DomainError},
};

/// Computes a metabolic loss rate from body mass, given a configuration.
pub trait MetabolicLoss {
    /// Returns the loss rate per unit biomass for a single body mass.
    fn loss_rate(&self, body_mass: Constrained<f64, StrictlyPositive>) -> f64;

    /// Checks the model parameters.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Parameter`] if a parameter is unusable.
    fn check(&self) -> Result<(), DomainError> {
        Ok(())
    }

    /// Computes loss rates element-wise, preserving length and order.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if a parameter is invalid, if any body mass is
    /// not strictly positive, or if a computed rate is not finite.
    fn loss_rates(&self, body_masses: &[f64]) -> Result<Array1<f64>, DomainError> {
        self.check()?;
        body_masses
            .iter()
            .enumerate()
            .map(|(index, &mass)| {
                let mass =
                    DomainError::check_attribute::<StrictlyPositive>(Attribute::BodyMass, index, mass)?;
                let rate = self.loss_rate(mass);
                if rate.is_finite() {
                    Ok(rate)
                } else {
                    Err(DomainError::NonFinite {
                        attribute: Attribute::Loss,
                        index,
                        value: rate,
                    })
                }
            })
            .collect()
    }
}

/// Computes `normalization · M^exponent` for each body mass.
///
/// # Errors
///
/// Returns a [`DomainError`] if any mass is not strictly positive.
///
/// # Example
///
/// ```
/// use foodweb_models::models::metabolism::{MassScaling, mass_scaling_loss};
///
/// let losses = mass_scaling_loss(&[1.0, 16.0], &MassScaling::default()).unwrap();
/// assert!((losses[0] - 0.71).abs() < 1e-12);
/// assert!((losses[1] - 0.355).abs() < 1e-12);
/// ```
pub fn mass_scaling_loss(
    body_masses: &[f64],
    params: &MassScaling,
) -> Result<Array1<f64>, DomainError> {
    params.loss_rates(body_masses)
}

/// Computes `B0 · M^b · exp(-E / (k·T))` for each body mass at `temperature`.
///
/// # Errors
///
/// Returns a [`DomainError`] if the temperature is at or below absolute zero
/// or if any mass is not strictly positive.
pub fn temperature_scaling_loss(
    body_masses: &[f64],
    temperature: ThermodynamicTemperature,
    params: &TemperatureScaling,
) -> Result<Array1<f64>, DomainError> {
    params.at(temperature)?.loss_rates(body_masses)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::support::{constraint::ConstraintError, units::celsius};

    #[test]
    fn mass_scaling_reference_values() {
        let losses = mass_scaling_loss(&[1.0, 16.0], &MassScaling::default()).unwrap();
        assert_eq!(losses.len(), 2);
        assert_relative_eq!(losses[0], 0.71, epsilon = 1e-12);
        assert_relative_eq!(losses[1], 0.355, epsilon = 1e-12);
    }

    #[test]
    fn mass_scaling_matches_formula() {
        let masses = [0.003, 0.5, 2.0, 45.0, 1.2e4];
        let losses = mass_scaling_loss(&masses, &MassScaling::default()).unwrap();
        for (mass, loss) in masses.iter().zip(losses.iter()) {
            assert_relative_eq!(*loss, 0.71 * mass.powf(-0.25), max_relative = 1e-12);
        }
    }

    #[test]
    fn mass_scaling_rejects_non_positive_mass() {
        let err = mass_scaling_loss(&[1.0, 0.0, 3.0], &MassScaling::default()).unwrap_err();
        assert_eq!(
            err,
            DomainError::Attribute {
                attribute: Attribute::BodyMass,
                index: 1,
                value: 0.0,
                source: ConstraintError::Zero,
            }
        );
        assert!(mass_scaling_loss(&[-2.0], &MassScaling::default()).is_err());
        assert!(mass_scaling_loss(&[f64::NAN], &MassScaling::default()).is_err());
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let losses = mass_scaling_loss(&[], &MassScaling::default()).unwrap();
        assert!(losses.is_empty());
    }

    #[test]
    fn temperature_scaling_reference_value() {
        let params = TemperatureScaling::default();
        let losses = temperature_scaling_loss(&[1.0], celsius(4.0), &params).unwrap();
        let expected = 0.88 * (-0.63 / (8.617e-5 * 277.15_f64)).exp();
        assert_relative_eq!(losses[0], expected, max_relative = 1e-9);
        assert!(losses[0] > 3.0e-12 && losses[0] < 4.0e-12);
    }

    #[test]
    fn temperature_scaling_increases_with_temperature() {
        let params = TemperatureScaling::default();
        let mut previous = 0.0;
        for t in [-40.0, -1.5, 4.0, 12.0, 20.0, 35.0] {
            let loss = temperature_scaling_loss(&[2.5], celsius(t), &params).unwrap()[0];
            assert!(loss > 0.0);
            assert!(loss > previous, "loss should grow with temperature at {t} °C");
            previous = loss;
        }
    }

    #[test]
    fn temperature_scaling_increases_with_mass() {
        let params = TemperatureScaling::default();
        let masses = [0.01, 0.1, 1.0, 10.0, 100.0];
        let losses = temperature_scaling_loss(&masses, celsius(20.0), &params).unwrap();
        assert!(losses.windows(2).into_iter().all(|w| w[1] > w[0]));
    }

    #[test]
    fn temperature_scaling_rejects_absolute_zero() {
        let params = TemperatureScaling::default();
        assert!(matches!(
            temperature_scaling_loss(&[1.0], celsius(-273.15), &params),
            Err(DomainError::Temperature { .. })
        ));
        assert!(matches!(
            temperature_scaling_loss(&[0.0], celsius(10.0), &params),
            Err(DomainError::Attribute {
                attribute: Attribute::BodyMass,
                ..
            })
        ));
    }

    #[test]
    fn overflowing_rate_is_reported() {
        let params = MassScaling {
            normalization: 1.0,
            exponent: 400.0,
        };
        assert!(matches!(
            mass_scaling_loss(&[1e3], &params),
            Err(DomainError::NonFinite {
                attribute: Attribute::Loss,
                index: 0,
                ..
            })
        ));
    }
}
