use serde::{Deserialize, Serialize};
use uom::si::f64::ThermodynamicTemperature;

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    error::DomainError,
    units::{BOLTZMANN_EV_PER_K, absolute_kelvin},
};

use super::MetabolicLoss;

/// Temperature-corrected loss: `x = B0 · M^b · exp(-E / (k·T))`.
///
/// The allometric exponent is positive here (0.75), unlike [`MassScaling`].
/// The Boltzmann–Arrhenius factor is independent of mass.
///
/// A `TemperatureScaling` holds only parameters. Bind it to a temperature
/// with [`TemperatureScaling::at`] to get a [`ThermalLoss`] that computes rates.
///
/// [`MassScaling`]: super::MassScaling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemperatureScaling {
    /// Normalization constant `B0`.
    pub normalization: f64,

    /// Allometric exponent `b`.
    pub exponent: f64,

    /// Activation energy `E`, in electronvolts.
    pub activation_energy: f64,

    /// Boltzmann constant `k`, in electronvolts per kelvin.
    pub boltzmann: f64,
}

impl TemperatureScaling {
    pub const NORMALIZATION: f64 = 0.88;
    pub const EXPONENT: f64 = 0.75;
    pub const ACTIVATION_ENERGY: f64 = 0.63;

    /// Binds these parameters to a temperature.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Temperature`] if the temperature is at or below
    /// absolute zero, or [`DomainError::Parameter`] if a parameter is unusable.
    ///
    /// # Example
    ///
    /// ```
    /// use foodweb_models::models::metabolism::{MetabolicLoss, TemperatureScaling};
    /// use foodweb_models::support::units::celsius;
    ///
    /// let cold = TemperatureScaling::default().at(celsius(4.0)).unwrap();
    /// let warm = TemperatureScaling::default().at(celsius(20.0)).unwrap();
    /// let masses = [1.0, 8.0];
    /// let (cold, warm) = (cold.loss_rates(&masses).unwrap(), warm.loss_rates(&masses).unwrap());
    /// assert!(warm[0] > cold[0] && warm[1] > cold[1]);
    ///
    /// assert!(TemperatureScaling::default().at(celsius(-274.0)).is_err());
    /// ```
    pub fn at(self, temperature: ThermodynamicTemperature) -> Result<ThermalLoss, DomainError> {
        let kelvin = absolute_kelvin(temperature)?;
        let model = ThermalLoss {
            params: self,
            temperature,
            kelvin,
        };
        model.check()?;
        Ok(model)
    }
}

impl Default for TemperatureScaling {
    fn default() -> Self {
        Self {
            normalization: Self::NORMALIZATION,
            exponent: Self::EXPONENT,
            activation_energy: Self::ACTIVATION_ENERGY,
            boltzmann: BOLTZMANN_EV_PER_K,
        }
    }
}

/// [`TemperatureScaling`] evaluated at a fixed, validated temperature.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalLoss {
    params: TemperatureScaling,
    temperature: ThermodynamicTemperature,
    kelvin: Constrained<f64, StrictlyPositive>,
}

impl ThermalLoss {
    #[must_use]
    pub fn params(&self) -> &TemperatureScaling {
        &self.params
    }

    #[must_use]
    pub fn temperature(&self) -> ThermodynamicTemperature {
        self.temperature
    }

    /// Returns the mass-independent factor `exp(-E / (k·T))`.
    #[must_use]
    pub fn arrhenius_factor(&self) -> f64 {
        (-self.params.activation_energy / (self.params.boltzmann * self.kelvin.get())).exp()
    }
}

impl MetabolicLoss for ThermalLoss {
    fn loss_rate(&self, body_mass: Constrained<f64, StrictlyPositive>) -> f64 {
        self.params.normalization
            * body_mass.into_inner().powf(self.params.exponent)
            * self.arrhenius_factor()
    }

    fn check(&self) -> Result<(), DomainError> {
        let TemperatureScaling {
            normalization,
            exponent,
            activation_energy,
            boltzmann,
        } = self.params;

        if !(normalization.is_finite() && normalization >= 0.0) {
            return Err(DomainError::Parameter {
                name: "normalization",
                value: normalization,
            });
        }
        if !exponent.is_finite() {
            return Err(DomainError::Parameter {
                name: "exponent",
                value: exponent,
            });
        }
        if !activation_energy.is_finite() {
            return Err(DomainError::Parameter {
                name: "activation_energy",
                value: activation_energy,
            });
        }
        if !(boltzmann.is_finite() && boltzmann > 0.0) {
            return Err(DomainError::Parameter {
                name: "boltzmann",
                value: boltzmann,
            });
        }
        Ok(())
    }
}
