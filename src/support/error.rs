//! Error taxonomy shared by the metabolism and food web models.
//!
//! Two kinds of input problems are detected before any data reaches an
//! external flux solver:
//!
//! - [`DomainError`]: a value violates a physical precondition (a
//!   non-positive body mass, a temperature at or below absolute zero, an
//!   efficiency outside `(0, 1]`, ...).
//! - [`ShapeError`]: per-species vectors, masks, or the interaction matrix
//!   disagree about how many species there are.

use std::fmt;

use thiserror::Error;

use super::constraint::{Constrained, Constraint, ConstraintError};

/// A per-species attribute, used to locate input errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Name,
    BodyMass,
    Biomass,
    Efficiency,
    Loss,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::BodyMass => "body mass",
            Self::Biomass => "biomass",
            Self::Efficiency => "assimilation efficiency",
            Self::Loss => "loss rate",
        })
    }
}

/// A value violates a scaling-law or attribute precondition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A per-species value is outside its valid domain.
    #[error("{attribute} of species {index} is invalid ({value}): {source}")]
    Attribute {
        attribute: Attribute,
        /// Position of the offending species.
        index: usize,
        value: f64,
        #[source]
        source: ConstraintError,
    },

    /// An interaction matrix entry is negative or not a number.
    #[error("interaction weight ({resource}, {consumer}) is invalid ({value}): {source}")]
    Interaction {
        resource: usize,
        consumer: usize,
        value: f64,
        #[source]
        source: ConstraintError,
    },

    /// The absolute temperature is at or below zero kelvin.
    #[error("temperature must be above absolute zero, got {kelvin} K")]
    Temperature { kelvin: f64 },

    /// A computed or supplied value overflowed or is not finite.
    #[error("{attribute} of species {index} is not finite ({value})")]
    NonFinite {
        attribute: Attribute,
        index: usize,
        value: f64,
    },

    /// A scaling-law parameter is outside its valid range.
    #[error("scaling parameter `{name}` is invalid, got {value}")]
    Parameter { name: &'static str, value: f64 },
}

impl DomainError {
    /// Checks a finite per-species value against constraint `C`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::Attribute`] if the constraint is violated and
    /// [`DomainError::NonFinite`] if the value is infinite.
    pub(crate) fn check_attribute<C: Constraint<f64>>(
        attribute: Attribute,
        index: usize,
        value: f64,
    ) -> Result<Constrained<f64, C>, Self> {
        let checked = Constrained::<f64, C>::new(value).map_err(|source| Self::Attribute {
            attribute,
            index,
            value,
            source,
        })?;
        if value.is_infinite() {
            return Err(Self::NonFinite {
                attribute,
                index,
                value,
            });
        }
        Ok(checked)
    }
}

/// Per-species data disagrees about the number of species.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// An attribute vector has the wrong length.
    #[error("{attribute} vector has length {found}, expected {expected}")]
    Length {
        attribute: Attribute,
        expected: usize,
        found: usize,
    },

    /// The interaction matrix is not square with one row per species.
    #[error("interaction matrix is {rows}x{cols}, expected {expected}x{expected}")]
    Matrix {
        rows: usize,
        cols: usize,
        expected: usize,
    },

    /// A selection mask has the wrong length.
    #[error("selection mask has length {found}, expected {expected}")]
    Mask { expected: usize, found: usize },

    /// A species name appears more than once.
    #[error("species `{0}` appears more than once")]
    DuplicateSpecies(String),

    /// A species name does not exist in the collection.
    #[error("species `{0}` is not in the collection")]
    UnknownSpecies(String),
}

impl ShapeError {
    /// Checks that an attribute vector has one entry per species.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Length`] if `found != expected`.
    pub(crate) fn check_length(
        attribute: Attribute,
        expected: usize,
        found: usize,
    ) -> Result<(), Self> {
        if expected == found {
            Ok(())
        } else {
            Err(Self::Length {
                attribute,
                expected,
                found,
            })
        }
    }
}
