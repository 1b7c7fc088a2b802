//! Temperature helpers on top of [`uom`].
//!
//! Scenario temperatures are usually given in degrees Celsius while the
//! Arrhenius term needs absolute temperature. [`uom`] handles the offset; this
//! module adds the absolute-zero check.
//!
//! ```
//! use foodweb_models::support::units::{absolute_kelvin, celsius};
//!
//! let t = celsius(4.0);
//! assert!((absolute_kelvin(t).unwrap().into_inner() - 277.15).abs() < 1e-9);
//! ```

use uom::si::{
    f64::ThermodynamicTemperature,
    thermodynamic_temperature::{degree_celsius, kelvin},
};

use super::{
    constraint::{Constrained, StrictlyPositive},
    error::DomainError,
};

/// Boltzmann constant in electronvolts per kelvin.
pub const BOLTZMANN_EV_PER_K: f64 = 8.617e-5;

/// Creates a temperature from a value in degrees Celsius.
#[must_use]
pub fn celsius(value: f64) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<degree_celsius>(value)
}

/// Returns the temperature in kelvin, checked to be above absolute zero.
///
/// # Errors
///
/// Returns [`DomainError::Temperature`] if the temperature is at or below
/// 0 K, or is not a number.
pub fn absolute_kelvin(
    temperature: ThermodynamicTemperature,
) -> Result<Constrained<f64, StrictlyPositive>, DomainError> {
    let value = temperature.get::<kelvin>();
    StrictlyPositive::new(value).map_err(|_| DomainError::Temperature { kelvin: value })
}
