//! dry-crud: View helpers and form generation for CRUD scaffolds
//!
//! Renders list tables, detail pages and edit forms of arbitrary models
//! with consistent formatting and minimal per-view code:
//! - **Formatting**: numbers, dates, booleans and text by column type
//! - **Tables**: alternating rows, attribute or custom columns
//! - **Forms**: field kinds inferred from reflected columns and associations
//! - **Translations**: keys inherited along the controller hierarchy
//!
//! # Design Principles
//!
//! 1. **Convention Over Configuration**: Rails-compatible markup by default
//! 2. **Escaped by Default**: every string is escaped unless it is a [`html::SafeString`]
//! 3. **No Database**: models expose themselves through the [`model::Model`] trait
//!
//! # Quick Start
//!
//! ```rust
//! use dry_crud::prelude::*;
//!
//! struct City {
//!     name: &'static str,
//!     inhabitants: i64,
//! }
//!
//! impl Model for City {
//!     fn model_name(&self) -> ModelName {
//!         ModelName::from_type_name("City")
//!     }
//!
//!     fn attribute(&self, name: &str) -> Option<Value> {
//!         match name {
//!             "name" => Some(Value::from(self.name)),
//!             "inhabitants" => Some(Value::from(self.inhabitants)),
//!             _ => None,
//!         }
//!     }
//!
//!     fn column_type(&self, name: &str) -> Option<ColumnType> {
//!         match name {
//!             "name" => Some(ColumnType::String),
//!             "inhabitants" => Some(ColumnType::Integer),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! fn main() -> dry_crud::error::Result<()> {
//!     let helper = StandardHelper::new(DryCrudConfig::default());
//!     let cities = [City { name: "Bern", inhabitants: 134_000 }];
//!
//!     let html = helper.table(&cities, &["name", "inhabitants"])?;
//!     assert!(html.as_str().contains("<td>134,000</td>"));
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `axum` - `IntoResponse` for [`html::SafeString`]

#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod format;
pub mod forms;
pub mod helpers;
pub mod html;
pub mod i18n;
pub mod model;
pub mod observability;

pub mod prelude {
    //! Convenience re-exports for common types and traits
    //!
    //! # Examples
    //!
    //! ```rust
    //! use dry_crud::prelude::*;
    //! ```

    // Helpers
    pub use crate::helpers::{StandardHelper, StandardTableBuilder};

    // Markup
    pub use crate::html::{IntoHtml, SafeString};

    // Models
    pub use crate::model::{AssociatedRecord, Association, ColumnType, Model, ModelName, Value};

    // Form handling
    pub use crate::forms::{
        FieldBuilder, FieldError, FormBuilder, FormOptions, InputType, StandardForm,
        ValidationErrors,
    };

    // Translations
    pub use crate::i18n::{ControllerScope, TranslationBackend, Translations};

    // Configuration and errors
    pub use crate::config::DryCrudConfig;
    pub use crate::error::DryCrudError;

    // Re-export key dependencies
    pub use validator;
}
