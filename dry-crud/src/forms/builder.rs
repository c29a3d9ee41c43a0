//! Form builder API with fluent interface

use super::error::ValidationErrors;
use super::field::{FieldKind, FormField, InputType, SelectOption};
use super::render::{FormRenderOptions, FormRenderer};
use crate::html::SafeString;

/// Builder for constructing HTML forms
///
/// # Examples
///
/// ```rust
/// use dry_crud::forms::{FormBuilder, InputType};
///
/// let html = FormBuilder::new("/people/1", "post")
///     .id("edit_person_1")
///     .method_override("put")
///     .csrf_token("abc123")
///     .field("person[name]", InputType::Text)
///         .label("Name")
///         .value("Jane")
///         .done()
///     .submit("Save")
///     .build();
///
/// assert!(html.as_str().contains(r#"<input name="_method" type="hidden" value="put" />"#));
/// ```
#[derive(Debug, Clone)]
pub struct FormBuilder<'a> {
    /// Form action URL
    pub(crate) action: String,
    /// HTTP method
    pub(crate) method: String,
    /// Method sent as `_method` for verbs browsers cannot submit
    pub(crate) method_override: Option<String>,
    /// Form ID
    pub(crate) id: Option<String>,
    /// CSS classes
    pub(crate) class: Option<String>,
    /// CSRF token
    pub(crate) csrf_token: Option<String>,
    /// Form fields
    pub(crate) fields: Vec<FormField>,
    /// Submit button text
    pub(crate) submit_text: Option<String>,
    /// Cancel link label and target
    pub(crate) cancel: Option<(String, String)>,
    /// Validation errors
    pub(crate) errors: Option<&'a ValidationErrors>,
    /// Heading of the error explanation
    pub(crate) error_header: Option<String>,
    /// Custom attributes
    pub(crate) custom_attrs: Vec<(String, String)>,
    /// Markup options
    pub(crate) options: FormRenderOptions,
}

impl<'a> FormBuilder<'a> {
    /// Create a new form builder with action and method
    #[must_use]
    pub fn new(action: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            method: method.into(),
            method_override: None,
            id: None,
            class: None,
            csrf_token: None,
            fields: Vec::new(),
            submit_text: None,
            cancel: None,
            errors: None,
            error_header: None,
            custom_attrs: Vec::new(),
            options: FormRenderOptions::default(),
        }
    }

    /// Set the form ID
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the form CSS class
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Send a hidden `_method` parameter, e.g. `put` for updates
    #[must_use]
    pub fn method_override(mut self, method: impl Into<String>) -> Self {
        self.method_override = Some(method.into());
        self
    }

    /// Set the CSRF token
    #[must_use]
    pub fn csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    /// Set the submit button text
    #[must_use]
    pub fn submit(mut self, text: impl Into<String>) -> Self {
        self.submit_text = Some(text.into());
        self
    }

    /// Add a cancel link next to the submit button
    #[must_use]
    pub fn cancel(mut self, label: impl Into<String>, url: impl Into<String>) -> Self {
        self.cancel = Some((label.into(), url.into()));
        self
    }

    /// Show validation errors
    #[must_use]
    pub const fn errors(mut self, errors: &'a ValidationErrors) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Set the heading of the error explanation
    #[must_use]
    pub fn error_header(mut self, header: impl Into<String>) -> Self {
        self.error_header = Some(header.into());
        self
    }

    /// Add a custom attribute to the form element
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_attrs.push((name.into(), value.into()));
        self
    }

    /// Set the markup options
    #[must_use]
    pub const fn options(mut self, options: FormRenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Start building an input field
    #[must_use]
    pub fn field(self, name: impl Into<String>, input_type: InputType) -> FieldBuilder<'a> {
        let field = FormField::input(name, input_type);
        FieldBuilder::new(self, field)
    }

    /// Start building a textarea
    #[must_use]
    pub fn textarea(self, name: impl Into<String>) -> FieldBuilder<'a> {
        let field = FormField::textarea(name);
        FieldBuilder::new(self, field)
    }

    /// Start building a select
    #[must_use]
    pub fn select(self, name: impl Into<String>) -> FieldBuilder<'a> {
        let field = FormField::select(name);
        FieldBuilder::new(self, field)
    }

    /// Start building a checkbox
    #[must_use]
    pub fn checkbox(self, name: impl Into<String>, checked: bool) -> FieldBuilder<'a> {
        let field = FormField::checkbox(name, checked);
        FieldBuilder::new(self, field)
    }

    /// Add a hidden field
    #[must_use]
    pub fn hidden(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut field = FormField::input(name, InputType::Hidden);
        field.value = Some(value.into());
        self.fields.push(field);
        self
    }

    /// Add a pre-built field
    #[must_use]
    pub fn add_field(mut self, field: FormField) -> Self {
        self.fields.push(field);
        self
    }

    /// Build the form HTML
    #[must_use]
    pub fn build(self) -> SafeString {
        FormRenderer::render(&self)
    }
}

/// Builder for a single field
pub struct FieldBuilder<'a> {
    form: FormBuilder<'a>,
    field: FormField,
}

impl<'a> FieldBuilder<'a> {
    const fn new(form: FormBuilder<'a>, field: FormField) -> Self {
        Self { form, field }
    }

    /// Set the field label, escaping it
    #[must_use]
    pub fn label(mut self, label: &str) -> Self {
        self.field.label = Some(SafeString::escape(label));
        self
    }

    /// Set the field label from markup
    #[must_use]
    pub fn label_html(mut self, label: SafeString) -> Self {
        self.field.label = Some(label);
        self
    }

    /// Set the current value
    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.field.value = Some(value.into());
        self
    }

    /// Set maximum length
    #[must_use]
    pub const fn max_length(mut self, len: usize) -> Self {
        self.field.max_length = Some(len);
        self
    }

    /// Set step value for number inputs
    #[must_use]
    pub fn step(mut self, value: impl Into<String>) -> Self {
        self.field.step = Some(value.into());
        self
    }

    /// Set textarea dimensions
    #[must_use]
    pub fn size(mut self, rows: u32, cols: u32) -> Self {
        if let FieldKind::Textarea {
            rows: ref mut r,
            cols: ref mut c,
        } = self.field.kind
        {
            *r = Some(rows);
            *c = Some(cols);
        }
        self
    }

    /// Add a select option
    #[must_use]
    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        if let FieldKind::Select { ref mut options, .. } = self.field.kind {
            options.push(SelectOption::new(value, label));
        }
        self
    }

    /// Add a leading select option with an empty value
    #[must_use]
    pub fn include_blank(mut self, label: impl Into<String>) -> Self {
        if let FieldKind::Select {
            ref mut include_blank,
            ..
        } = self.field.kind
        {
            *include_blank = Some(label.into());
        }
        self
    }

    /// Set CSS class
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.field.class = Some(class.into());
        self
    }

    /// Set element ID
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.field.id = Some(id.into());
        self
    }

    /// Add a custom attribute
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.field.custom_attrs.push((name.into(), value.into()));
        self
    }

    /// Finish building this field and return to form builder
    #[must_use]
    pub fn done(mut self) -> FormBuilder<'a> {
        self.form.fields.push(self.field);
        self.form
    }
}
