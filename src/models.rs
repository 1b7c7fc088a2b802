//! Public food web models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Organization
//!
//! - [`metabolism`]: Allometric and temperature-dependent metabolic loss rates.
//! - [`foodweb`]: Species collections, flux solver inputs and outputs, and
//!   immutable scenarios.
//!
//! # Model structure
//!
//! Each model lives in its own module and contains an internal `core` submodule
//! where the actual computation lives. The [`twine_core::Model`] implementations
//! are thin adapters that delegate to that core API.

pub mod foodweb;
pub mod metabolism;
