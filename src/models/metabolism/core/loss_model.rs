use uom::si::f64::ThermodynamicTemperature;

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    error::DomainError,
};

use super::{MassScaling, MetabolicLoss, ThermalLoss};

/// Selects which scaling law produces a scenario's loss vector.
///
/// # Example
///
/// ```
/// use foodweb_models::models::metabolism::{LossModel, MassScaling, MetabolicLoss, TemperatureScaling};
/// use foodweb_models::support::units::celsius;
///
/// let basal = LossModel::from(MassScaling::default());
/// let warm = LossModel::from(TemperatureScaling::default().at(celsius(20.0)).unwrap());
///
/// assert!(basal.temperature().is_none());
/// assert!(warm.temperature().is_some());
/// assert_eq!(basal.loss_rates(&[1.0]).unwrap()[0], 0.71);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LossModel {
    MassScaling(MassScaling),
    TemperatureScaling(ThermalLoss),
}

impl LossModel {
    /// Returns the temperature the model is evaluated at, if it has one.
    #[must_use]
    pub fn temperature(&self) -> Option<ThermodynamicTemperature> {
        match self {
            Self::MassScaling(_) => None,
            Self::TemperatureScaling(model) => Some(model.temperature()),
        }
    }
}

impl Default for LossModel {
    fn default() -> Self {
        Self::MassScaling(MassScaling::default())
    }
}

impl From<MassScaling> for LossModel {
    fn from(model: MassScaling) -> Self {
        Self::MassScaling(model)
    }
}

impl From<ThermalLoss> for LossModel {
    fn from(model: ThermalLoss) -> Self {
        Self::TemperatureScaling(model)
    }
}

impl MetabolicLoss for LossModel {
    fn loss_rate(&self, body_mass: Constrained<f64, StrictlyPositive>) -> f64 {
        match self {
            Self::MassScaling(model) => model.loss_rate(body_mass),
            Self::TemperatureScaling(model) => model.loss_rate(body_mass),
        }
    }

    fn check(&self) -> Result<(), DomainError> {
        match self {
            Self::MassScaling(model) => model.check(),
            Self::TemperatureScaling(model) => model.check(),
        }
    }
}
