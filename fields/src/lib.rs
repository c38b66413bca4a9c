//! Field-level validation for inbound payloads.
//!
//! Validators collect every violated constraint of a payload into a single
//! [`FieldErrors`] value so callers can report all problems at once instead
//! of failing on the first one.

pub mod error;
pub mod validation;

pub use error::{FieldsError, Result};
pub use validation::{FieldErrors, FieldValidator};
