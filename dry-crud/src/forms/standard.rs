//! Forms bound to a model
//!
//! [`StandardForm`] turns a list of attribute names into a complete CRUD
//! form. The field kind of every attribute follows its reflected column
//! type; belongs-to associations become selects of their choices.
//!
//! # Examples
//!
//! ```rust
//! use dry_crud::config::FormSettings;
//! use dry_crud::forms::{FormOptions, StandardForm};
//! use dry_crud::model::{ColumnType, Model, ModelName, Value};
//!
//! struct Book;
//!
//! impl Model for Book {
//!     fn model_name(&self) -> ModelName {
//!         ModelName::from_type_name("Book")
//!     }
//!
//!     fn attribute(&self, name: &str) -> Option<Value> {
//!         (name == "title").then(|| Value::from("Dune"))
//!     }
//!
//!     fn column_type(&self, name: &str) -> Option<ColumnType> {
//!         (name == "title").then_some(ColumnType::String)
//!     }
//! }
//!
//! let settings = FormSettings::default();
//! let html = StandardForm::new(&Book, &settings)
//!     .attrs(["title"])
//!     .options(FormOptions::default().class("special"))
//!     .render();
//!
//! assert!(html.as_str().starts_with(
//!     r#"<form action="/books" class="special" id="new_book" method="post">"#
//! ));
//! ```

use std::collections::HashMap;

use super::builder::FormBuilder;
use super::field::{FieldKind, FormField, InputType, SelectOption};
use super::render::FormRenderOptions;
use crate::config::FormSettings;
use crate::format::captionize;
use crate::html::SafeString;
use crate::model::{Association, ColumnType, Model, Value};

/// Per-form overrides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormOptions {
    /// Form action; defaults to the collection or member route
    pub action: Option<String>,
    /// Form id; defaults to `new_<model>` or `edit_<model>_<id>`
    pub id: Option<String>,
    /// Form class; defaults to `new_<model>` or `edit_<model>`
    pub class: Option<String>,
    /// CSRF token rendered as a hidden field
    pub csrf_token: Option<String>,
    /// Target of a cancel link next to the submit button
    pub cancel_url: Option<String>,
}

impl FormOptions {
    /// Override the form action
    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Override the form id
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Override the form class
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Include a CSRF token
    #[must_use]
    pub fn csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    /// Add a cancel link
    #[must_use]
    pub fn cancel_url(mut self, url: impl Into<String>) -> Self {
        self.cancel_url = Some(url.into());
        self
    }
}

/// Looks up an association label such as `please_select` for one association
type AssociationLabel<'m> = Box<dyn Fn(&str, &Association) -> Option<String> + 'm>;

/// A CRUD form for a model
pub struct StandardForm<'m> {
    model: &'m dyn Model,
    settings: &'m FormSettings,
    attrs: Vec<String>,
    captions: HashMap<String, SafeString>,
    submit_label: String,
    cancel_label: String,
    please_select: String,
    none_available: String,
    association_label: Option<AssociationLabel<'m>>,
    error_header: Option<String>,
    options: FormOptions,
}

impl<'m> StandardForm<'m> {
    /// Create a form with labels taken from the settings
    #[must_use]
    pub fn new(model: &'m dyn Model, settings: &'m FormSettings) -> Self {
        Self {
            model,
            settings,
            attrs: Vec::new(),
            captions: HashMap::new(),
            submit_label: settings.submit_label.clone(),
            cancel_label: settings.cancel_label.clone(),
            please_select: settings.please_select.clone(),
            none_available: settings.none_available.clone(),
            association_label: None,
            error_header: None,
            options: FormOptions::default(),
        }
    }

    /// Attributes to edit, in order
    #[must_use]
    pub fn attrs<I, S>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attrs.extend(attrs.into_iter().map(Into::into));
        self
    }

    /// Caption of an attribute; defaults to [`captionize`]
    #[must_use]
    pub fn caption(mut self, attr: impl Into<String>, caption: SafeString) -> Self {
        self.captions.insert(attr.into(), caption);
        self
    }

    /// Submit button label
    #[must_use]
    pub fn submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }

    /// Cancel link label
    #[must_use]
    pub fn cancel_label(mut self, label: impl Into<String>) -> Self {
        self.cancel_label = label.into();
        self
    }

    /// Blank option of association selects
    #[must_use]
    pub fn please_select(mut self, label: impl Into<String>) -> Self {
        self.please_select = label.into();
        self
    }

    /// Text shown for associations without choices
    #[must_use]
    pub fn none_available(mut self, label: impl Into<String>) -> Self {
        self.none_available = label.into();
        self
    }

    /// Resolve `please_select` and `none_available` per association
    ///
    /// The closure receives the label key and the association. When it
    /// returns `None` the form-wide label applies.
    #[must_use]
    pub fn association_labels<F>(mut self, resolve: F) -> Self
    where
        F: Fn(&str, &Association) -> Option<String> + 'm,
    {
        self.association_label = Some(Box::new(resolve));
        self
    }

    /// Heading of the error explanation
    #[must_use]
    pub fn error_header(mut self, header: impl Into<String>) -> Self {
        self.error_header = Some(header.into());
        self
    }

    /// Per-form overrides
    #[must_use]
    pub fn options(mut self, options: FormOptions) -> Self {
        self.options = options;
        self
    }

    /// Render the form
    #[must_use]
    pub fn render(&self) -> SafeString {
        let name = self.model.model_name();
        let errors = self.model.errors();
        let id = self.model.id().filter(|_| self.model.is_persisted());

        let action = self.options.action.clone().unwrap_or_else(|| {
            id.map_or_else(|| name.collection_path(), |id| name.member_path(id))
        });
        let (default_id, default_class) = id.map_or_else(
            || (format!("new_{}", name.singular), format!("new_{}", name.singular)),
            |id| (format!("edit_{}_{id}", name.singular), format!("edit_{}", name.singular)),
        );

        tracing::debug!(
            model = %name.singular,
            persisted = id.is_some(),
            attrs = ?self.attrs,
            "rendering standard form"
        );

        let mut form = FormBuilder::new(action, "post")
            .id(self.options.id.clone().unwrap_or(default_id))
            .class(self.options.class.clone().unwrap_or(default_class))
            .options(FormRenderOptions::from(self.settings))
            .errors(&errors)
            .submit(self.submit_label.clone());

        if id.is_some() {
            form = form.method_override("put");
        }
        if let Some(ref token) = self.options.csrf_token {
            form = form.csrf_token(token.clone());
        }
        if let Some(ref url) = self.options.cancel_url {
            form = form.cancel(self.cancel_label.clone(), url.clone());
        }
        form = form.error_header(self.error_header.clone().unwrap_or_else(|| {
            let count = errors.count();
            let noun = if count == 1 { "error" } else { "errors" };
            format!(
                "{count} {noun} prohibited this {} from being saved",
                name.human.to_lowercase()
            )
        }));

        for attr in &self.attrs {
            form = form.add_field(self.field_for(&name.singular, attr));
        }
        form.build()
    }

    fn field_for(&self, object: &str, attr: &str) -> FormField {
        let caption = self
            .captions
            .get(attr)
            .cloned()
            .unwrap_or_else(|| captionize(attr));

        let mut field = self.model.association(attr).map_or_else(
            || self.column_field(object, attr),
            |assoc| self.association_field(object, &assoc),
        );
        field.label = Some(caption);
        field
    }

    fn association_text(&self, key: &str, assoc: &Association, fallback: &str) -> String {
        self.association_label
            .as_ref()
            .and_then(|resolve| resolve(key, assoc))
            .unwrap_or_else(|| fallback.to_string())
    }

    fn association_field(&self, object: &str, assoc: &Association) -> FormField {
        let param = format!("{object}[{}]", assoc.foreign_key);
        if assoc.choices.is_empty() {
            let text = self.association_text("none_available", assoc, &self.none_available);
            return FormField::static_content(param, SafeString::escape(&text));
        }

        let selected = assoc.record.as_ref().map_or_else(
            || {
                self.model
                    .attribute(&assoc.foreign_key)
                    .and_then(|v| v.to_param())
            },
            |record| Some(record.id.to_string()),
        );

        let mut field = FormField::select(param);
        field.kind = FieldKind::Select {
            options: assoc
                .choices
                .iter()
                .map(|choice| SelectOption::new(choice.id.to_string(), choice.label.clone()))
                .collect(),
            include_blank: Some(self.association_text("please_select", assoc, &self.please_select)),
        };
        field.value = selected;
        field
    }

    fn column_field(&self, object: &str, attr: &str) -> FormField {
        let param = format!("{object}[{attr}]");
        let value = self.model.attribute(attr).unwrap_or_default();
        let numeric = if self.settings.style.numeric_inputs() {
            InputType::Number
        } else {
            InputType::Text
        };

        let mut field = match self.model.column_type(attr) {
            Some(ColumnType::Text) => {
                let mut field = FormField::textarea(param);
                field.kind = FieldKind::Textarea {
                    rows: Some(self.settings.text_area_rows),
                    cols: Some(self.settings.text_area_cols),
                };
                field
            }
            Some(ColumnType::Boolean) => return FormField::checkbox(param, value.is_truthy()),
            Some(ColumnType::Integer) => FormField::input(param, numeric),
            Some(ColumnType::Float | ColumnType::Decimal) => {
                let mut field = FormField::input(param, numeric);
                if numeric == InputType::Number {
                    field.step = Some("any".to_string());
                }
                field
            }
            Some(ColumnType::Date) => return FormField::date_select(param, value.as_date()),
            Some(ColumnType::Time) => return FormField::time_select(param, value.as_time()),
            Some(ColumnType::DateTime) => {
                return FormField::datetime_select(param, value.as_datetime());
            }
            Some(ColumnType::String) | None => {
                let mut field = FormField::input(param, InputType::Text);
                field.max_length = self.model.column_limit(attr);
                field
            }
        };
        field.value = match value {
            Value::Nil => None,
            other => other.to_param(),
        };
        field
    }
}
