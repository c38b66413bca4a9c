use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

use crate::{FieldsError, Result};

/// Validation messages grouped by field name.
///
/// Fields are kept in sorted order so the rendered output is stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields with at least one message.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Messages recorded for `field`, empty when the field passed.
    pub fn messages(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// `Ok(())` when nothing was recorded, otherwise a validation error.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(FieldsError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .fields
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect();
        write!(f, "{}", rendered.join("; "))
    }
}

/// Accumulating validator for a single payload.
///
/// Every check takes the value as an `Option` so absent fields can be
/// handled uniformly: only [`FieldValidator::not_blank`] and
/// [`FieldValidator::present`] reject `None`, the range checks skip it.
#[derive(Debug, Default)]
pub struct FieldValidator {
    errors: FieldErrors,
}

impl FieldValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject a missing value.
    pub fn present<T>(&mut self, field: &str, value: Option<&T>, message: &str) -> &mut Self {
        if value.is_none() {
            self.errors.add(field, message);
        }
        self
    }

    /// Reject a missing value or one made only of whitespace.
    pub fn not_blank(&mut self, field: &str, value: Option<&str>, message: &str) -> &mut Self {
        if value.map_or(true, |v| v.trim().is_empty()) {
            self.errors.add(field, message);
        }
        self
    }

    /// Character count of a present value must lie in `min..=max`.
    pub fn length(
        &mut self,
        field: &str,
        value: Option<&str>,
        min: usize,
        max: usize,
        message: &str,
    ) -> &mut Self {
        if let Some(value) = value {
            let count = value.chars().count();
            if count < min || count > max {
                self.errors.add(field, message);
            }
        }
        self
    }

    /// A present number must not be below `min`.
    pub fn min(&mut self, field: &str, value: Option<f64>, min: f64, message: &str) -> &mut Self {
        if let Some(value) = value {
            if value < min {
                self.errors.add(field, message);
            }
        }
        self
    }

    /// A present number must not exceed `max`.
    pub fn max(&mut self, field: &str, value: Option<f64>, max: f64, message: &str) -> &mut Self {
        if let Some(value) = value {
            if value > max {
                self.errors.add(field, message);
            }
        }
        self
    }

    /// A present value must look like an email address: one `@` with a
    /// non-empty local part and a dotted domain.
    pub fn email(&mut self, field: &str, value: Option<&str>, message: &str) -> &mut Self {
        if let Some(value) = value {
            if !looks_like_email(value) {
                self.errors.add(field, message);
            }
        }
        self
    }

    /// Finish validation, returning all collected messages as one error.
    pub fn finish(&mut self) -> Result<()> {
        let errors = std::mem::take(&mut self.errors);
        if !errors.is_empty() {
            debug!("Validation failed: {}", errors);
        }
        errors.into_result()
    }
}

fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
