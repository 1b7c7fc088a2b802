use serde::{Deserialize, Serialize};

use crate::support::{
    constraint::{Constrained, StrictlyPositive},
    error::DomainError,
};

use super::MetabolicLoss;

/// Basal allometric loss: `x = normalization · M^exponent`.
///
/// With the default exponent of `-0.25`, heavier species lose less energy per
/// unit biomass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MassScaling {
    /// Normalization constant `x0`.
    pub normalization: f64,

    /// Allometric exponent `b`.
    pub exponent: f64,
}

impl MassScaling {
    pub const NORMALIZATION: f64 = 0.71;
    pub const EXPONENT: f64 = -0.25;
}

impl Default for MassScaling {
    fn default() -> Self {
        Self {
            normalization: Self::NORMALIZATION,
            exponent: Self::EXPONENT,
        }
    }
}

impl MetabolicLoss for MassScaling {
    fn loss_rate(&self, body_mass: Constrained<f64, StrictlyPositive>) -> f64 {
        self.normalization * body_mass.into_inner().powf(self.exponent)
    }

    fn check(&self) -> Result<(), DomainError> {
        if !(self.normalization.is_finite() && self.normalization >= 0.0) {
            return Err(DomainError::Parameter {
                name: "normalization",
                value: self.normalization,
            });
        }
        if !self.exponent.is_finite() {
            return Err(DomainError::Parameter {
                name: "exponent",
                value: self.exponent,
            });
        }
        Ok(())
    }
}
