//! Supporting utilities shared across models.
//!
//! - [`constraint`]: Type-level numeric constraints for species attributes.
//! - [`error`]: The domain and shape error taxonomy shared by all models.
//! - [`units`]: Temperature helpers on top of [`uom`].

pub mod constraint;
pub mod error;
pub mod units;
