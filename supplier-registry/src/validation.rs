//! Supplier form checks

use crate::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum company name length after trimming
pub const MIN_NAME_LENGTH: usize = 2;

/// Descriptive fields entered when adding or editing a supplier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierForm {
    pub name: String,
    pub country: String,
    pub category: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Country,
    Category,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl SupplierForm {
    pub fn new(
        name: impl Into<String>,
        country: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
            category: category.into(),
        }
    }

    /// Check every field and return all failures at once.
    pub fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        if name.is_empty() {
            errors.push(FieldError {
                field: FormField::Name,
                message: "Company name is required".to_string(),
            });
        } else if name.chars().count() < MIN_NAME_LENGTH {
            errors.push(FieldError {
                field: FormField::Name,
                message: format!("Company name must be at least {} characters", MIN_NAME_LENGTH),
            });
        }

        if self.country.trim().is_empty() {
            errors.push(FieldError {
                field: FormField::Country,
                message: "Country is required".to_string(),
            });
        }

        if self.category.trim().is_empty() {
            errors.push(FieldError {
                field: FormField::Category,
                message: "Category is required".to_string(),
            });
        }

        errors
    }

    /// Validate and return the form with surrounding whitespace removed
    pub fn validated(&self) -> Result<SupplierForm> {
        let errors = self.field_errors();
        if !errors.is_empty() {
            return Err(RegistryError::Validation(errors));
        }

        Ok(SupplierForm {
            name: self.name.trim().to_string(),
            country: self.country.trim().to_string(),
            category: self.category.trim().to_string(),
        })
    }
}
