//! Index-aligned species attributes and their interaction matrix.

use std::collections::HashSet;

use log::{debug, warn};
use ndarray::Array2;
use thiserror::Error;

use crate::support::{
    constraint::{ConstraintError, NonNegative, StrictlyPositive, UnitIntervalLowerOpen},
    error::{Attribute, DomainError, ShapeError},
};

/// Errors that can occur while building or deriving a [`SpeciesCollection`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CollectionError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// A validated set of species and the interaction matrix linking them.
///
/// Rows of the matrix are resources and columns are consumers: entry
/// `(i, j)` is the feeding preference of species `j` on species `i`.
/// Every attribute vector is index-aligned with both matrix axes, and every
/// operation that drops species applies the same selection to all of them.
///
/// Collections are immutable. Filtering and attaching losses return new
/// collections.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesCollection {
    names: Vec<String>,
    matrix: Array2<f64>,
    biomasses: Vec<f64>,
    body_masses: Vec<f64>,
    efficiencies: Vec<f64>,
    losses: Option<Vec<f64>>,
}

/// A borrowed view of one species in a [`SpeciesCollection`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Species<'a> {
    pub index: usize,
    pub name: &'a str,
    pub body_mass: f64,
    pub biomass: f64,
    pub efficiency: f64,
    /// Derived loss rate, if losses have been attached.
    pub loss: Option<f64>,
}

impl SpeciesCollection {
    /// Builds a collection from index-aligned attribute vectors.
    ///
    /// Shapes are checked before values.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::Shape`] if a vector length or the matrix
    ///   dimension differs from the number of names, or a name repeats.
    /// - [`CollectionError::Domain`] if a biomass or body mass is not strictly
    ///   positive, an efficiency is outside `(0, 1]`, or a matrix entry is
    ///   negative or not finite.
    pub fn new(
        names: Vec<String>,
        matrix: Array2<f64>,
        biomasses: Vec<f64>,
        body_masses: Vec<f64>,
        efficiencies: Vec<f64>,
    ) -> Result<Self, CollectionError> {
        let n = names.len();
        ShapeError::check_length(Attribute::Biomass, n, biomasses.len())?;
        ShapeError::check_length(Attribute::BodyMass, n, body_masses.len())?;
        ShapeError::check_length(Attribute::Efficiency, n, efficiencies.len())?;

        let (rows, cols) = matrix.dim();
        if rows != n || cols != n {
            return Err(ShapeError::Matrix {
                rows,
                cols,
                expected: n,
            }
            .into());
        }

        let mut seen = HashSet::with_capacity(n);
        if let Some(name) = names.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(ShapeError::DuplicateSpecies(name.clone()).into());
        }

        for (index, &value) in biomasses.iter().enumerate() {
            DomainError::check_attribute::<StrictlyPositive>(Attribute::Biomass, index, value)?;
        }
        for (index, &value) in body_masses.iter().enumerate() {
            DomainError::check_attribute::<StrictlyPositive>(Attribute::BodyMass, index, value)?;
        }
        for (index, &value) in efficiencies.iter().enumerate() {
            DomainError::check_attribute::<UnitIntervalLowerOpen>(
                Attribute::Efficiency,
                index,
                value,
            )?;
        }
        for ((resource, consumer), &value) in matrix.indexed_iter() {
            let source = match NonNegative::new(value) {
                Ok(_) if value.is_finite() => continue,
                Ok(_) => ConstraintError::AboveMaximum,
                Err(source) => source,
            };
            return Err(DomainError::Interaction {
                resource,
                consumer,
                value,
                source,
            }
            .into());
        }

        Ok(Self {
            names,
            matrix,
            biomasses,
            body_masses,
            efficiencies,
            losses: None,
        })
    }

    /// Returns the number of species.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Returns the interaction matrix (rows are resources, columns consumers).
    #[must_use]
    pub fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    #[must_use]
    pub fn biomasses(&self) -> &[f64] {
        &self.biomasses
    }

    #[must_use]
    pub fn body_masses(&self) -> &[f64] {
        &self.body_masses
    }

    #[must_use]
    pub fn efficiencies(&self) -> &[f64] {
        &self.efficiencies
    }

    /// Returns the derived loss rates, if attached with [`Self::with_losses`].
    #[must_use]
    pub fn losses(&self) -> Option<&[f64]> {
        self.losses.as_deref()
    }

    /// Returns the index of the named species.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Returns a view of the species at `index`.
    #[must_use]
    pub fn species(&self, index: usize) -> Option<Species<'_>> {
        let name = self.names.get(index)?;
        Some(Species {
            index,
            name,
            body_mass: self.body_masses[index],
            biomass: self.biomasses[index],
            efficiency: self.efficiencies[index],
            loss: self.losses.as_ref().map(|losses| losses[index]),
        })
    }

    /// Iterates over species in collection order.
    pub fn iter(&self) -> impl Iterator<Item = Species<'_>> + '_ {
        (0..self.len()).filter_map(|index| self.species(index))
    }

    /// Returns a copy of this collection carrying a derived loss vector.
    ///
    /// # Errors
    ///
    /// - [`CollectionError::Shape`] if `losses` does not have one entry per species.
    /// - [`CollectionError::Domain`] if a loss is negative or not finite.
    pub fn with_losses(&self, losses: &[f64]) -> Result<Self, CollectionError> {
        ShapeError::check_length(Attribute::Loss, self.len(), losses.len())?;
        for (index, &value) in losses.iter().enumerate() {
            DomainError::check_attribute::<NonNegative>(Attribute::Loss, index, value)?;
        }
        Ok(Self {
            losses: Some(losses.to_vec()),
            ..self.clone()
        })
    }

    /// Keeps the species whose mask entry is `true`, preserving order.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Mask`] if the mask length differs from [`Self::len`].
    pub fn select(&self, mask: &[bool]) -> Result<Self, ShapeError> {
        if mask.len() != self.len() {
            return Err(ShapeError::Mask {
                expected: self.len(),
                found: mask.len(),
            });
        }
        let indices: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter_map(|(index, &keep)| keep.then_some(index))
            .collect();
        Ok(self.subset(&indices))
    }

    /// Keeps the species whose `ln(biomass)` is at least `log_threshold`.
    ///
    /// The matrix is reduced on both axes and every attribute vector with the
    /// same mask. A threshold that excludes every species gives an empty
    /// collection with a 0×0 matrix.
    ///
    /// # Example
    ///
    /// ```
    /// use foodweb_models::models::foodweb::SpeciesCollection;
    /// use ndarray::array;
    ///
    /// let web = SpeciesCollection::new(
    ///     vec!["rare".into(), "common".into()],
    ///     array![[0.0, 0.0], [0.0, 0.0]],
    ///     vec![0.5, 40.0],
    ///     vec![1.0, 1.0],
    ///     vec![0.5, 0.5],
    /// )
    /// .unwrap();
    ///
    /// let kept = web.filter_by_biomass_threshold(0.0);
    /// assert_eq!(kept.names(), ["common"]);
    /// assert_eq!(kept.matrix().dim(), (1, 1));
    /// ```
    #[must_use]
    pub fn filter_by_biomass_threshold(&self, log_threshold: f64) -> Self {
        let indices: Vec<usize> = self
            .biomasses
            .iter()
            .enumerate()
            .filter_map(|(index, biomass)| (biomass.ln() >= log_threshold).then_some(index))
            .collect();

        if indices.is_empty() && !self.is_empty() {
            warn!(
                "log-biomass threshold {log_threshold} removed all {} species",
                self.len()
            );
        } else {
            debug!(
                "log-biomass threshold {log_threshold} kept {} of {} species",
                indices.len(),
                self.len()
            );
        }

        self.subset(&indices)
    }

    /// Removes the named species.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::UnknownSpecies`] if a name is not in the collection.
    pub fn remove_species<S: AsRef<str>>(&self, names: &[S]) -> Result<Self, ShapeError> {
        let mut mask = vec![true; self.len()];
        for name in names {
            let name = name.as_ref();
            let index = self
                .position(name)
                .ok_or_else(|| ShapeError::UnknownSpecies(name.to_owned()))?;
            mask[index] = false;
        }
        debug!("removing {} species: {}", names.len(), join(names));
        self.select(&mask)
    }

    fn subset(&self, indices: &[usize]) -> Self {
        let pick = |values: &[f64]| indices.iter().map(|&i| values[i]).collect::<Vec<_>>();
        let k = indices.len();
        Self {
            names: indices.iter().map(|&i| self.names[i].clone()).collect(),
            matrix: Array2::from_shape_fn((k, k), |(r, c)| {
                self.matrix[[indices[r], indices[c]]]
            }),
            biomasses: pick(&self.biomasses),
            body_masses: pick(&self.body_masses),
            efficiencies: pick(&self.efficiencies),
            losses: self.losses.as_deref().map(pick),
        }
    }
}

fn join<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    use ndarray::array;

    use crate::models::foodweb::core::test_support::lake;

    #[test]
    fn builds_from_aligned_vectors() {
        let web = lake();
        assert_eq!(web.len(), 5);
        assert_eq!(web.matrix().dim(), (5, 5));
        assert_eq!(web.position("pike"), Some(4));
        assert!(web.losses().is_none());

        let perch = web.species(3).unwrap();
        assert_eq!(perch.name, "perch");
        assert_eq!(perch.biomass, web.biomasses()[3]);
        assert_eq!(web.iter().count(), 5);
    }

    #[test]
    fn mismatched_biomass_and_body_mass_lengths_are_shape_errors() {
        let err = SpeciesCollection::new(
            vec!["a".into(), "b".into()],
            Array2::zeros((2, 2)),
            vec![1.0, 2.0],
            vec![1.0],
            vec![0.5, 0.5],
        )
        .unwrap_err();
        assert_eq!(
            err,
            CollectionError::Shape(ShapeError::Length {
                attribute: Attribute::BodyMass,
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn non_square_matrix_is_a_shape_error() {
        let err = SpeciesCollection::new(
            vec!["a".into(), "b".into()],
            Array2::zeros((2, 3)),
            vec![1.0, 2.0],
            vec![1.0, 1.0],
            vec![0.5, 0.5],
        )
        .unwrap_err();
        assert_eq!(
            err,
            CollectionError::Shape(ShapeError::Matrix {
                rows: 2,
                cols: 3,
                expected: 2,
            })
        );
    }

    #[test]
    fn shape_is_checked_before_values() {
        let err = SpeciesCollection::new(
            vec!["a".into()],
            Array2::zeros((1, 1)),
            vec![-1.0],
            vec![1.0, 2.0],
            vec![0.5],
        )
        .unwrap_err();
        assert!(matches!(err, CollectionError::Shape(_)));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = SpeciesCollection::new(
            vec!["a".into(), "a".into()],
            Array2::zeros((2, 2)),
            vec![1.0, 2.0],
            vec![1.0, 1.0],
            vec![0.5, 0.5],
        )
        .unwrap_err();
        assert_eq!(
            err,
            CollectionError::Shape(ShapeError::DuplicateSpecies("a".into()))
        );
    }

    #[test]
    fn invalid_attributes_are_domain_errors() {
        let build = |biomass: f64, efficiency: f64, weight: f64| {
            SpeciesCollection::new(
                vec!["a".into()],
                array![[weight]],
                vec![biomass],
                vec![1.0],
                vec![efficiency],
            )
        };

        assert!(matches!(
            build(0.0, 0.5, 0.0),
            Err(CollectionError::Domain(DomainError::Attribute {
                attribute: Attribute::Biomass,
                ..
            }))
        ));
        assert!(matches!(
            build(1.0, 1.5, 0.0),
            Err(CollectionError::Domain(DomainError::Attribute {
                attribute: Attribute::Efficiency,
                ..
            }))
        ));
        assert!(matches!(
            build(1.0, 0.5, -0.1),
            Err(CollectionError::Domain(DomainError::Interaction { .. }))
        ));
        assert!(matches!(
            build(1.0, 0.5, f64::INFINITY),
            Err(CollectionError::Domain(DomainError::Interaction { .. }))
        ));
    }

    #[test]
    fn filter_subsets_matrix_and_attributes_together() {
        let web = lake().with_losses(&[0.0, 0.1, 0.2, 0.3, 0.4]).unwrap();

        // ln(biomass) for lake(): detritus 6.9, algae 6.2, zooplankton 3.9, perch 2.3, pike 0.7
        let kept = web.filter_by_biomass_threshold(2.0);
        assert_eq!(kept.names(), ["detritus", "algae", "zooplankton", "perch"]);
        assert_eq!(kept.matrix().dim(), (4, 4));
        assert_eq!(kept.losses(), Some(&[0.0, 0.1, 0.2, 0.3][..]));

        for (new, species) in kept.iter().enumerate() {
            let old = web.position(species.name).unwrap();
            assert_eq!(species.body_mass, web.body_masses()[old]);
            assert_eq!(species.efficiency, web.efficiencies()[old]);
            for (new_consumer, consumer) in kept.names().iter().enumerate() {
                let old_consumer = web.position(consumer).unwrap();
                assert_eq!(
                    kept.matrix()[[new, new_consumer]],
                    web.matrix()[[old, old_consumer]]
                );
            }
        }
    }

    #[test]
    fn filter_is_idempotent() {
        let once = lake().filter_by_biomass_threshold(3.0);
        let twice = once.filter_by_biomass_threshold(3.0);
        assert_eq!(once, twice);
        assert_eq!(
            once.len(),
            lake().biomasses().iter().filter(|b| b.ln() >= 3.0).count()
        );
    }

    #[test]
    fn filtering_everything_gives_an_empty_collection() {
        let empty = lake().filter_by_biomass_threshold(100.0);
        assert!(empty.is_empty());
        assert_eq!(empty.matrix().dim(), (0, 0));
        assert!(empty.biomasses().is_empty());
        assert!(empty.efficiencies().is_empty());
    }

    #[test]
    fn select_requires_a_full_mask() {
        let err = lake().select(&[true, false]).unwrap_err();
        assert_eq!(
            err,
            ShapeError::Mask {
                expected: 5,
                found: 2,
            }
        );
    }

    #[test]
    fn remove_species_drops_rows_and_columns() {
        let web = lake();
        let without = web.remove_species(&["zooplankton"]).unwrap();
        assert_eq!(without.names(), ["detritus", "algae", "perch", "pike"]);
        // perch only fed on zooplankton
        assert_eq!(without.matrix().column(2).sum(), 0.0);
        assert_eq!(without.matrix()[[2, 3]], web.matrix()[[3, 4]]);

        assert_eq!(
            web.remove_species(&["walrus"]).unwrap_err(),
            ShapeError::UnknownSpecies("walrus".into())
        );
    }

    #[test]
    fn losses_must_match_and_be_non_negative() {
        let web = lake();
        assert!(matches!(
            web.with_losses(&[0.1; 4]),
            Err(CollectionError::Shape(ShapeError::Length {
                attribute: Attribute::Loss,
                ..
            }))
        ));
        assert!(matches!(
            web.with_losses(&[0.1, 0.1, f64::NAN, 0.1, 0.1]),
            Err(CollectionError::Domain(DomainError::Attribute {
                attribute: Attribute::Loss,
                index: 2,
                ..
            }))
        ));
    }
}
