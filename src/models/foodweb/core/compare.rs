//! Per-species comparison of two scenarios.

use std::collections::HashMap;

use super::Scenario;

/// Outgoing flux of one species in a baseline and a compared scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct FluxChange {
    pub species: String,
    pub baseline: f64,
    pub scenario: f64,
}

impl FluxChange {
    /// Returns `scenario - baseline`.
    #[must_use]
    pub fn difference(&self) -> f64 {
        self.scenario - self.baseline
    }

    /// Returns `scenario / baseline`, or `None` when the baseline flux is zero.
    #[must_use]
    pub fn ratio(&self) -> Option<f64> {
        (self.baseline > 0.0).then(|| self.scenario / self.baseline)
    }
}

/// Compares total outgoing flux per species between two scenarios.
///
/// Species are matched by name and reported in baseline order. Species that
/// are missing from either scenario (removed, or below a biomass threshold)
/// are skipped.
#[must_use]
pub fn compare_outgoing(baseline: &Scenario, scenario: &Scenario) -> Vec<FluxChange> {
    let other: HashMap<&str, f64> = scenario.outgoing_by_species().into_iter().collect();

    baseline
        .outgoing_by_species()
        .into_iter()
        .filter_map(|(species, baseline)| {
            other.get(species).map(|&scenario| FluxChange {
                species: species.to_owned(),
                baseline,
                scenario,
            })
        })
        .collect()
}
