//! View helpers for CRUD pages
//!
//! [`StandardHelper`] is the per-view context behind list and detail
//! pages and generated forms. It combines the value formatter with
//! translations, custom attribute formatters and the alternating row
//! cycle of tables.
//!
//! # Examples
//!
//! ```rust
//! use dry_crud::config::DryCrudConfig;
//! use dry_crud::helpers::StandardHelper;
//!
//! let helper = StandardHelper::new(DryCrudConfig::default());
//!
//! assert_eq!(helper.f(10_000_000).as_str(), "10,000,000");
//! assert_eq!(helper.f(true).as_str(), "yes");
//! assert_eq!(helper.tr_alt("<td>1</td>").as_str(), r#"<tr class="even">&lt;td&gt;1&lt;/td&gt;</tr>"#);
//! assert_eq!(helper.captionize("camel_case").as_str(), "Camel Case");
//! ```

mod table;

pub use table::StandardTableBuilder;

use std::cell::Cell;
use std::collections::HashMap;

use crate::config::DryCrudConfig;
use crate::error::{DryCrudError, Result};
use crate::forms::{FormOptions, StandardForm};
use crate::format::{self, format_value};
use crate::html::{self, content_tag, link_to, IntoHtml, SafeString};
use crate::i18n::{association_keys, interpolate, resolve, ControllerScope, TranslationBackend, Translations};
use crate::model::{Association, ColumnType, Model, Value};

/// Custom formatter for an attribute
pub type Formatter = Box<dyn Fn(&StandardHelper, &dyn Model) -> Result<SafeString> + Send>;

const ROW_CLASSES: [&str; 2] = ["even", "odd"];

/// Per-view helper context
pub struct StandardHelper {
    config: DryCrudConfig,
    translations: Box<dyn TranslationBackend>,
    scope: Option<ControllerScope>,
    formatters: HashMap<String, Formatter>,
    model_formatters: HashMap<(String, String), Formatter>,
    cycle: Cell<usize>,
}

impl std::fmt::Debug for StandardHelper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardHelper")
            .field("config", &self.config)
            .field("scope", &self.scope)
            .field("formatters", &self.formatters.keys().collect::<Vec<_>>())
            .field("model_formatters", &self.model_formatters.keys().collect::<Vec<_>>())
            .field("cycle", &self.cycle)
            .finish_non_exhaustive()
    }
}

impl StandardHelper {
    /// Create a helper without translations
    #[must_use]
    pub fn new(config: DryCrudConfig) -> Self {
        Self {
            config,
            translations: Box::new(Translations::new()),
            scope: None,
            formatters: HashMap::new(),
            model_formatters: HashMap::new(),
            cycle: Cell::new(0),
        }
    }

    /// Create a helper and load the configured translation files
    ///
    /// # Errors
    ///
    /// Returns an error if a translation file cannot be read or parsed
    pub fn from_config(config: DryCrudConfig) -> Result<Self> {
        let translations = Translations::from_settings(&config.i18n)?;
        Ok(Self::new(config).with_translations(translations))
    }

    /// Use a translation backend
    #[must_use]
    pub fn with_translations(mut self, backend: impl TranslationBackend + 'static) -> Self {
        self.translations = Box::new(backend);
        self
    }

    /// Set the controller scope for inheritable translations
    #[must_use]
    pub fn with_scope(mut self, scope: ControllerScope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Register a formatter used for `attr` of every model
    pub fn register_formatter<F>(&mut self, attr: impl Into<String>, formatter: F)
    where
        F: Fn(&Self, &dyn Model) -> Result<SafeString> + Send + 'static,
    {
        self.formatters.insert(attr.into(), Box::new(formatter));
    }

    /// Register a formatter used for `attr` of one model, by singular name
    pub fn register_model_formatter<F>(
        &mut self,
        model: impl Into<String>,
        attr: impl Into<String>,
        formatter: F,
    ) where
        F: Fn(&Self, &dyn Model) -> Result<SafeString> + Send + 'static,
    {
        self.model_formatters
            .insert((model.into(), attr.into()), Box::new(formatter));
    }

    /// The active configuration
    #[must_use]
    pub const fn config(&self) -> &DryCrudConfig {
        &self.config
    }

    /// Format a value by its own type
    ///
    /// Booleans use the `global.yes` / `global.no` translations when present.
    #[must_use]
    pub fn f(&self, value: impl Into<Value>) -> SafeString {
        self.format_with_hint(&value.into(), None)
    }

    fn format_with_hint(&self, value: &Value, hint: Option<ColumnType>) -> SafeString {
        if let Value::Bool(b) = value {
            let key = if *b { "global.yes" } else { "global.no" };
            if let Some(label) = self.translations.lookup(key) {
                return SafeString::escape(&label);
            }
        }
        format_value(value, hint, &self.config.format)
    }

    /// Reflected column type of an attribute
    ///
    /// Associations are not columns, their foreign keys are.
    #[must_use]
    pub fn column_type(&self, model: &dyn Model, attr: &str) -> Option<ColumnType> {
        if model.association(attr).is_some_and(|assoc| assoc.name == attr) {
            return None;
        }
        model.column_type(attr)
    }

    /// Format an attribute according to its column type
    ///
    /// # Errors
    ///
    /// Returns [`DryCrudError::UnknownAttribute`] if the model has no such attribute
    pub fn format_type(&self, model: &dyn Model, attr: &str) -> Result<SafeString> {
        let value = model.attribute(attr).ok_or_else(|| {
            let name = model.model_name().singular;
            tracing::debug!(model = %name, attr, "unknown attribute");
            DryCrudError::unknown_attribute(name, attr)
        })?;
        Ok(self.format_with_hint(&value, self.column_type(model, attr)))
    }

    /// Format an attribute for display
    ///
    /// Tries, in order: a formatter registered for this model and
    /// attribute, one registered for the attribute, the belongs-to
    /// association of that name, and finally [`Self::format_type`].
    ///
    /// # Errors
    ///
    /// Returns [`DryCrudError::UnknownAttribute`] if nothing can format the attribute
    pub fn format_attr(&self, model: &dyn Model, attr: &str) -> Result<SafeString> {
        let singular = model.model_name().singular;
        if let Some(formatter) = self
            .model_formatters
            .get(&(singular.clone(), attr.to_string()))
        {
            tracing::trace!(model = %singular, attr, "model formatter");
            return formatter(self, model);
        }
        if let Some(formatter) = self.formatters.get(attr) {
            tracing::trace!(model = %singular, attr, "attribute formatter");
            return formatter(self, model);
        }
        if let Some(assoc) = model.association(attr).filter(|a| a.name == attr) {
            tracing::trace!(model = %singular, attr, "association");
            return Ok(self.format_assoc(&assoc));
        }
        self.format_type(model, attr)
    }

    /// Label of the associated record, linked to it when enabled
    ///
    /// Without a record the `no_entry` association translation is shown.
    #[must_use]
    pub fn format_assoc(&self, assoc: &Association) -> SafeString {
        match assoc.record {
            Some(ref record) if self.config.list.link_associations => {
                link_to(record.label.as_str(), &assoc.target.member_path(record.id))
            }
            Some(ref record) => SafeString::escape(&record.label),
            None => self
                .ta("no_entry", Some(assoc))
                .map_or_else(SafeString::nbsp, |text| SafeString::escape(&text)),
        }
    }

    /// Caption and value in a labeled block
    #[must_use]
    pub fn labeled(&self, label: impl IntoHtml, content: impl IntoHtml) -> SafeString {
        html::labeled(label, content)
    }

    /// Labeled block of a formatted attribute
    ///
    /// # Errors
    ///
    /// Returns [`DryCrudError::UnknownAttribute`] if the attribute cannot be formatted
    pub fn labeled_attr(&self, model: &dyn Model, attr: &str) -> Result<SafeString> {
        let content = self.format_attr(model, attr)?;
        Ok(self.labeled(self.human_attribute_name(model, attr), content))
    }

    /// Translated attribute name, else the captionized attribute
    #[must_use]
    pub fn human_attribute_name(&self, model: &dyn Model, attr: &str) -> SafeString {
        let singular = model.model_name().singular;
        let keys = [
            format!("activerecord.attributes.{singular}.{attr}"),
            format!("attributes.{singular}.{attr}"),
        ];
        resolve(self.translations.as_ref(), &keys)
            .map_or_else(|| self.captionize(attr), |name| SafeString::escape(&name))
    }

    /// Wrap content in a table row with alternating `even` / `odd` classes
    pub fn tr_alt(&self, content: impl IntoHtml) -> SafeString {
        let index = self.cycle.get();
        self.cycle.set(index.wrapping_add(1));
        content_tag("tr", &[("class", ROW_CLASSES[index % 2])], content)
    }

    /// Restart the row cycle at `even`
    pub fn reset_cycle(&self) {
        self.cycle.set(0);
    }

    /// Render a list of entries with one column per attribute
    ///
    /// # Errors
    ///
    /// Returns [`DryCrudError::UnknownAttribute`] if an attribute cannot be formatted
    pub fn table<'h, T: Model + 'h>(&'h self, entries: &[T], attrs: &[&str]) -> Result<SafeString> {
        self.table_with(entries, |t| {
            t.attrs(attrs);
        })
    }

    /// Render a list of entries with columns defined by `build`
    ///
    /// An empty list renders the `no_list_entries` message instead.
    ///
    /// # Errors
    ///
    /// Returns [`DryCrudError::UnknownAttribute`] if an attribute cannot be formatted
    pub fn table_with<'h, T, F>(&'h self, entries: &[T], build: F) -> Result<SafeString>
    where
        T: Model + 'h,
        F: FnOnce(&mut StandardTableBuilder<'h, T>),
    {
        if entries.is_empty() {
            let message = self
                .ti("no_list_entries")
                .unwrap_or_else(|| self.config.list.no_entries.clone());
            return Ok(content_tag(
                "div",
                &[("class", self.config.list.css_class.as_str())],
                message,
            ));
        }
        StandardTableBuilder::table(entries, self, build)
    }

    /// Title-cased, escaped caption of an identifier
    #[must_use]
    pub fn captionize(&self, key: &str) -> SafeString {
        format::captionize(key)
    }

    /// CRUD form for a model
    ///
    /// Captions, button labels and the error header are translated when
    /// translations exist.
    #[must_use]
    pub fn standard_form(&self, model: &dyn Model, attrs: &[&str], options: FormOptions) -> SafeString {
        let mut form = StandardForm::new(model, &self.config.forms)
            .attrs(attrs.iter().copied())
            .options(options);

        for attr in attrs {
            form = form.caption(*attr, self.human_attribute_name(model, attr));
        }
        if let Some(label) = self.ti("button.save") {
            form = form.submit_label(label);
        }
        if let Some(label) = self.ti("button.cancel") {
            form = form.cancel_label(label);
        }
        form = form.association_labels(|key, assoc| self.ta(key, Some(assoc)));

        let count = model.errors().count();
        if count > 0 {
            let human = model.model_name().human.to_lowercase();
            let header = self.ti_with("errors.header", &[
                ("count", &count.to_string()),
                ("model", &human),
            ]);
            if let Some(header) = header {
                form = form.error_header(header);
            }
        }
        form.render()
    }

    /// Translate a key inherited along the controller scope
    #[must_use]
    pub fn ti(&self, key: &str) -> Option<String> {
        self.ti_with(key, &[])
    }

    /// Translate an inheritable key and interpolate `%{name}` variables
    #[must_use]
    pub fn ti_with(&self, key: &str, variables: &[(&str, &str)]) -> Option<String> {
        let keys = self
            .scope
            .as_ref()
            .map_or_else(|| vec![format!("global.{key}")], |scope| scope.inheritable_keys(key));
        resolve(self.translations.as_ref(), &keys).map(|text| interpolate(&text, variables))
    }

    /// Translate a key specific to an association
    #[must_use]
    pub fn ta(&self, key: &str, assoc: Option<&Association>) -> Option<String> {
        resolve(self.translations.as_ref(), &association_keys(key, assoc))
    }
}
