//! Form handling, building, and validation
//!
//! This module provides a builder-pattern API for creating forms with:
//! - Hidden `_method` and CSRF parameters
//! - Date and time selects in the `name(1i)` parameter convention
//! - Integration with the `validator` crate
//! - Error explanations and field error wrappers
//! - Model-bound CRUD forms ([`StandardForm`])
//!
//! # Quick Start
//!
//! ```rust
//! use dry_crud::forms::{FormBuilder, InputType};
//!
//! let form = FormBuilder::new("/people", "post")
//!     .csrf_token("abc123")
//!     .field("person[email]", InputType::Email)
//!         .label("Email Address")
//!         .done()
//!     .checkbox("person[newsletter]", false)
//!         .label("Newsletter")
//!         .done()
//!     .submit("Sign Up")
//!     .build();
//!
//! println!("{form}");
//! ```
//!
//! # Validation Errors
//!
//! ```rust
//! use dry_crud::forms::{FormBuilder, InputType, ValidationErrors};
//!
//! let mut errors = ValidationErrors::new();
//! errors.add("email", "is invalid");
//!
//! let form = FormBuilder::new("/people", "post")
//!     .errors(&errors)
//!     .field("person[email]", InputType::Email)
//!         .label("Email")
//!         .done()
//!     .build();
//!
//! assert!(form.as_str().contains(r#"<div id="error_explanation">"#));
//! assert!(form.as_str().contains(r#"<div class="field_with_errors"><input"#));
//! ```

mod builder;
mod error;
mod field;
mod render;
mod standard;

pub use builder::{FieldBuilder, FormBuilder};
pub use error::{FieldError, ValidationErrors, BASE};
pub use field::{sanitized_id, FieldKind, FormField, InputType, SelectOption};
pub use render::{FormRenderOptions, FormRenderer};
pub use standard::{FormOptions, StandardForm};
