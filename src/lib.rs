//! # Foodweb Models
//!
//! Metabolic scaling laws and trophic flux scenario models built on
//! [Twine](https://github.com/isentropic-dev/twine).
//!
//! ## Crate layout
//!
//! - [`models`]: Metabolic loss models and food web scenario models, each
//!   exposed through [`twine_core::Model`] adapters.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Workflow
//!
//! A typical analysis loads a [`SpeciesCollection`](models::foodweb::SpeciesCollection)
//! from a dataset, optionally removes species or drops those below a biomass
//! threshold, computes a loss vector with one of the
//! [`metabolism`](models::metabolism) models, and hands the resulting
//! [`FluxProblem`](models::foodweb::FluxProblem) to an external equilibrium
//! flux solver. The solver is any [`twine_core::Model`] mapping a
//! `FluxProblem` to a square flux matrix; this crate validates what it returns
//! and packages everything into an immutable
//! [`Scenario`](models::foodweb::Scenario).
//!
//! The crate does not solve for equilibrium fluxes itself.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.

pub mod models;
pub mod support;
