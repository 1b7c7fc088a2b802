//! Plain dataset records exchanged with data providers.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::support::error::ShapeError;

use super::{CollectionError, SpeciesCollection};

/// An unvalidated food web as supplied by a dataset provider.
///
/// `matrix` is given row by row; rows are resources and columns consumers.
/// Converting into a [`SpeciesCollection`] runs every shape and domain check.
///
/// # Example
///
/// ```
/// use foodweb_models::models::foodweb::{FoodWebData, SpeciesCollection};
///
/// let data: FoodWebData = serde_json::from_str(r#"{
///     "names": ["algae", "snail"],
///     "matrix": [[0.0, 1.0], [0.0, 0.0]],
///     "biomasses": [300.0, 12.0],
///     "body_masses": [1e-5, 0.4],
///     "efficiencies": [0.545, 0.906]
/// }"#).unwrap();
///
/// let web = SpeciesCollection::try_from(data).unwrap();
/// assert_eq!(web.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FoodWebData {
    pub names: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
    pub biomasses: Vec<f64>,
    pub body_masses: Vec<f64>,
    pub efficiencies: Vec<f64>,
}

impl TryFrom<FoodWebData> for SpeciesCollection {
    type Error = CollectionError;

    fn try_from(data: FoodWebData) -> Result<Self, Self::Error> {
        let rows = data.matrix.len();
        if let Some(row) = data.matrix.iter().find(|row| row.len() != rows) {
            return Err(ShapeError::Matrix {
                rows,
                cols: row.len(),
                expected: data.names.len(),
            }
            .into());
        }

        let matrix = Array2::from_shape_fn((rows, rows), |(r, c)| data.matrix[r][c]);
        SpeciesCollection::new(
            data.names,
            matrix,
            data.biomasses,
            data.body_masses,
            data.efficiencies,
        )
    }
}

impl From<&SpeciesCollection> for FoodWebData {
    fn from(web: &SpeciesCollection) -> Self {
        Self {
            names: web.names().to_vec(),
            matrix: web.matrix().rows().into_iter().map(|row| row.to_vec()).collect(),
            biomasses: web.biomasses().to_vec(),
            body_masses: web.body_masses().to_vec(),
            efficiencies: web.efficiencies().to_vec(),
        }
    }
}
