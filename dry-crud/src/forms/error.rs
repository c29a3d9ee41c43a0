//! Form validation error types
//!
//! Errors are kept in the order they were added so that error
//! explanations list them the way the model reported them.

use inflector::Inflector;

/// Field name used for errors that concern the whole record
pub const BASE: &str = "base";

/// A single validation error for a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The error message
    pub message: String,
    /// Optional error code for programmatic handling
    pub code: Option<String>,
}

impl FieldError {
    /// Create a new field error with just a message
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    /// Create a field error with a message and code
    #[must_use]
    pub fn with_code(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: Some(code.into()),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Collection of validation errors keyed by field name
///
/// # Examples
///
/// ```rust
/// use dry_crud::forms::ValidationErrors;
///
/// let mut errors = ValidationErrors::new();
/// errors.add("name", "can't be blank");
/// errors.add("rating", "must be less than 10");
///
/// assert!(errors.has_errors());
/// assert_eq!(errors.full_messages(), ["Name can't be blank", "Rating must be less than 10"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<(String, Vec<FieldError>)>,
}

impl ValidationErrors {
    /// Create a new empty error collection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error for a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.push(field.into(), FieldError::new(message));
    }

    /// Add an error with a code for a field
    pub fn add_with_code(
        &mut self,
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) {
        self.push(field.into(), FieldError::with_code(message, code));
    }

    fn push(&mut self, field: String, error: FieldError) {
        if let Some((_, errors)) = self.errors.iter_mut().find(|(name, _)| *name == field) {
            errors.push(error);
        } else {
            self.errors.push((field, vec![error]));
        }
    }

    /// Check if there are any errors
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if a specific field has errors
    #[must_use]
    pub fn has_field_error(&self, field: &str) -> bool {
        !self.for_field(field).is_empty()
    }

    /// Get all errors for a specific field
    #[must_use]
    pub fn for_field(&self, field: &str) -> &[FieldError] {
        self.errors
            .iter()
            .find(|(name, _)| name == field)
            .map_or(&[], |(_, errors)| errors.as_slice())
    }

    /// Get all field names that have errors
    #[must_use]
    pub fn fields_with_errors(&self) -> Vec<&str> {
        self.errors.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Get the total number of errors
    #[must_use]
    pub fn count(&self) -> usize {
        self.errors.iter().map(|(_, errors)| errors.len()).sum()
    }

    /// Messages prefixed with the humanized field name
    ///
    /// Errors on [`BASE`] are listed without a prefix.
    #[must_use]
    pub fn full_messages(&self) -> Vec<String> {
        self.iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    if field == BASE {
                        error.message.clone()
                    } else {
                        format!("{} {}", field.to_sentence_case(), error.message)
                    }
                })
            })
            .collect()
    }

    /// Iterate over all errors
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FieldError])> {
        self.errors
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Convert from validator crate's `ValidationErrors`
///
/// Fields are sorted by name since the validator crate does not keep
/// declaration order.
impl From<validator::ValidationErrors> for ValidationErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut result = Self::new();
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        for (field, field_errors) in fields {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                result.add_with_code(field.to_string(), message, error.code.to_string());
            }
        }
        result
    }
}
