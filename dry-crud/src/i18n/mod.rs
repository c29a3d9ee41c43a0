//! Translation lookup
//!
//! Helpers never read translations directly. They build an ordered list
//! of candidate keys and ask a [`TranslationBackend`] for the first one
//! that resolves. [`Translations`] is the bundled in-memory backend,
//! filled from nested TOML or JSON trees:
//!
//! ```toml
//! [global]
//! no_list_entries = "Nothing here yet."
//!
//! [crud_test_models.index]
//! title = "Test Models"
//! ```
//!
//! # Examples
//!
//! ```rust
//! use dry_crud::i18n::{resolve, ControllerScope, Translations};
//!
//! let translations = Translations::from_toml_str(r#"
//!     [crud.global]
//!     title = "Listing"
//! "#).unwrap();
//!
//! let scope = ControllerScope::new(["crud_test_models", "crud"], "index");
//! let keys = scope.inheritable_keys("title");
//! assert_eq!(resolve(&translations, &keys).as_deref(), Some("Listing"));
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::config::I18nSettings;
use crate::error::{DryCrudError, Result};
use crate::model::Association;

/// Source of translated strings
#[cfg_attr(test, mockall::automock)]
pub trait TranslationBackend: Send {
    /// Translation stored under a fully qualified dotted key
    fn lookup(&self, key: &str) -> Option<String>;
}

/// In-memory translation store keyed by dotted paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations {
    entries: BTreeMap<String, String>,
}

impl Translations {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML translation tree
    ///
    /// # Errors
    ///
    /// Returns [`DryCrudError::TranslationParse`] if the source is not valid TOML
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let mut translations = Self::new();
        translations.store(parse_toml(source, "<inline>")?);
        Ok(translations)
    }

    /// Build a store from the configured translation files
    ///
    /// # Errors
    ///
    /// Returns an error if any file cannot be read or parsed
    pub fn from_settings(settings: &I18nSettings) -> Result<Self> {
        let mut translations = Self::new();
        for path in &settings.translation_files {
            translations.load_file(path)?;
        }
        Ok(translations)
    }

    /// Merge a translation file into the store
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`DryCrudError::Io`] if the file cannot be read and
    /// [`DryCrudError::TranslationParse`] if it cannot be parsed
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let label = path.display().to_string();

        let tree = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&source).map_err(|e| DryCrudError::TranslationParse {
                path: label,
                message: e.to_string(),
            })?
        } else {
            parse_toml(&source, &label)?
        };

        let before = self.entries.len();
        self.store(tree);
        tracing::debug!(
            path = %path.display(),
            added = self.entries.len() - before,
            "loaded translations"
        );
        Ok(())
    }

    /// Merge a nested tree; later values win
    ///
    /// Nested objects become dotted keys. Scalars other than strings are
    /// stored in their display form; arrays and nulls are ignored.
    pub fn store(&mut self, tree: serde_json::Value) {
        flatten(&mut self.entries, String::new(), tree);
    }

    /// Store a single translation
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Builder form of [`Translations::insert`]
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Number of stored keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TranslationBackend for Translations {
    fn lookup(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

fn parse_toml(source: &str, label: &str) -> Result<serde_json::Value> {
    toml::from_str(source).map_err(|e| DryCrudError::TranslationParse {
        path: label.to_string(),
        message: e.to_string(),
    })
}

fn flatten(entries: &mut BTreeMap<String, String>, prefix: String, value: serde_json::Value) {
    let value = match value {
        serde_json::Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(entries, path, child);
            }
            return;
        }
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null | serde_json::Value::Array(_) => return,
    };
    if !prefix.is_empty() {
        entries.insert(prefix, value);
    }
}

/// First translation found for the candidate keys, in order
pub fn resolve<B>(backend: &B, keys: &[String]) -> Option<String>
where
    B: TranslationBackend + ?Sized,
{
    for key in keys {
        if let Some(text) = backend.lookup(key) {
            tracing::trace!(%key, "translation found");
            return Some(text);
        }
        tracing::trace!(%key, "translation missing");
    }
    tracing::debug!(candidates = keys.len(), first = ?keys.first(), "no translation found");
    None
}

/// Replace `%{name}` placeholders
///
/// ```rust
/// use dry_crud::i18n::interpolate;
///
/// assert_eq!(interpolate("Edit %{model}", &[("model", "Person")]), "Edit Person");
/// ```
#[must_use]
pub fn interpolate(template: &str, variables: &[(&str, &str)]) -> String {
    variables
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("%{{{name}}}"), value)
        })
}

/// Where a view is rendered from, for inheritable lookups
///
/// `controller_paths` lists the template folders from the most specific
/// controller up to the most generic one, e.g.
/// `["crud_test_models", "crud", "list"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerScope {
    /// Template folders, most specific first
    pub controller_paths: Vec<String>,
    /// Current action, e.g. `index`
    pub action: String,
    /// Partial being rendered, if any
    pub partial: Option<String>,
}

impl ControllerScope {
    /// Create a scope for an action
    pub fn new<I, S>(controller_paths: I, action: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            controller_paths: controller_paths.into_iter().map(Into::into).collect(),
            action: action.into(),
            partial: None,
        }
    }

    /// Restrict the scope to a partial
    #[must_use]
    pub fn with_partial(mut self, partial: impl Into<String>) -> Self {
        self.partial = Some(partial.into());
        self
    }

    /// Candidate keys for an inheritable translation
    ///
    /// For every folder: `<folder>.<action>.<partial>.<key>` (with a
    /// partial), `<folder>.<action>.<key>`, `<folder>.global.<key>`.
    /// Finally `global.<key>`.
    ///
    /// ```rust
    /// use dry_crud::i18n::ControllerScope;
    ///
    /// let scope = ControllerScope::new(["people", "crud"], "index");
    /// assert_eq!(scope.inheritable_keys("title"), [
    ///     "people.index.title",
    ///     "people.global.title",
    ///     "crud.index.title",
    ///     "crud.global.title",
    ///     "global.title",
    /// ]);
    /// ```
    #[must_use]
    pub fn inheritable_keys(&self, key: &str) -> Vec<String> {
        let mut keys = Vec::with_capacity(self.controller_paths.len() * 3 + 1);
        for folder in &self.controller_paths {
            if let Some(partial) = &self.partial {
                keys.push(format!("{folder}.{}.{partial}.{key}", self.action));
            }
            keys.push(format!("{folder}.{}.{key}", self.action));
            keys.push(format!("{folder}.global.{key}"));
        }
        keys.push(format!("global.{key}"));
        keys
    }
}

/// Candidate keys for an association translation
///
/// `activerecord.associations.models.<owner>.<assoc>.<key>`, then
/// `activerecord.associations.<target>.<key>`, then
/// `global.associations.<key>`. Without an association only the global
/// key remains.
#[must_use]
pub fn association_keys(key: &str, assoc: Option<&Association>) -> Vec<String> {
    let mut keys = Vec::with_capacity(3);
    if let Some(assoc) = assoc {
        keys.push(format!(
            "activerecord.associations.models.{}.{}.{key}",
            assoc.owner.singular, assoc.name
        ));
        keys.push(format!(
            "activerecord.associations.{}.{key}",
            assoc.target.singular
        ));
    }
    keys.push(format!("global.associations.{key}"));
    keys
}
