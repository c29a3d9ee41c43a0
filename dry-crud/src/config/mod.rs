//! Configuration management for dry-crud
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `DRY_CRUD_` prefix, `__` for nesting)
//! 2. `./dry_crud.toml` or an explicit file
//! 3. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # dry_crud.toml
//! [format]
//! true_label = "yes"
//! false_label = "no"
//! delimiter = ","
//! precision = 2
//!
//! [list]
//! no_entries = "No entries found."
//!
//! [forms]
//! style = "current"
//! submit_label = "Save"
//!
//! [i18n]
//! translation_files = ["./locales/en.toml"]
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use dry_crud::config::DryCrudConfig;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = DryCrudConfig::load()?;
//! let precision = config.format.precision;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE: &str = "dry_crud.toml";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "DRY_CRUD_";

/// Value formatting settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatSettings {
    /// Label for `true`
    pub true_label: String,

    /// Label for `false`
    pub false_label: String,

    /// Thousands delimiter for integers
    pub delimiter: String,

    /// Decimal separator for floats and decimals
    pub separator: String,

    /// Number of decimals for floats and decimals
    pub precision: u32,

    /// `strftime` pattern for dates
    pub date_format: String,

    /// `strftime` pattern for times
    pub time_format: String,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self {
            true_label: "yes".to_string(),
            false_label: "no".to_string(),
            delimiter: ",".to_string(),
            separator: ".".to_string(),
            precision: 2,
            date_format: "%Y-%m-%d".to_string(),
            time_format: "%H:%M".to_string(),
        }
    }
}

/// List and table settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListSettings {
    /// Message rendered for empty collections
    pub no_entries: String,

    /// CSS class of tables and the empty list marker
    pub css_class: String,

    /// Link associated records to their member path
    pub link_associations: bool,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            no_entries: "No entries found.".to_string(),
            css_class: "list".to_string(),
            link_associations: true,
        }
    }
}

/// Markup conventions for generated forms
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStyle {
    /// `error_explanation` id, `field_with_errors` wrapper, number inputs
    #[default]
    Current,
    /// `errorExplanation` class, `fieldWithErrors` wrapper, text inputs
    Legacy,
}

impl FormStyle {
    /// CSS class of the div wrapping inputs with errors
    #[must_use]
    pub const fn field_error_class(self) -> &'static str {
        match self {
            Self::Current => "field_with_errors",
            Self::Legacy => "fieldWithErrors",
        }
    }

    /// Attribute identifying the error explanation block
    #[must_use]
    pub const fn error_explanation_attr(self) -> (&'static str, &'static str) {
        match self {
            Self::Current => ("id", "error_explanation"),
            Self::Legacy => ("class", "errorExplanation"),
        }
    }

    /// Whether numeric columns get `type="number"` inputs
    #[must_use]
    pub const fn numeric_inputs(self) -> bool {
        matches!(self, Self::Current)
    }
}

/// Form generation settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
    /// Markup conventions
    pub style: FormStyle,

    /// Default submit button label
    pub submit_label: String,

    /// Default cancel link label
    pub cancel_label: String,

    /// Blank option of association selects
    pub please_select: String,

    /// Text rendered when an association has no choices
    pub none_available: String,

    /// Rows of text areas
    pub text_area_rows: u32,

    /// Columns of text areas
    pub text_area_cols: u32,

    /// Years shown before and after the selected year in date selects
    pub year_range: i32,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            style: FormStyle::Current,
            submit_label: "Save".to_string(),
            cancel_label: "Cancel".to_string(),
            please_select: "Please select".to_string(),
            none_available: "none available".to_string(),
            text_area_rows: 5,
            text_area_cols: 40,
            year_range: 5,
        }
    }
}

/// Translation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nSettings {
    /// TOML or JSON translation files, merged in order
    pub translation_files: Vec<PathBuf>,
}

/// Complete dry-crud configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DryCrudConfig {
    /// Value formatting
    #[serde(default)]
    pub format: FormatSettings,

    /// Lists and tables
    #[serde(default)]
    pub list: ListSettings,

    /// Forms
    #[serde(default)]
    pub forms: FormSettings,

    /// Translations
    #[serde(default)]
    pub i18n: I18nSettings,
}

impl DryCrudConfig {
    /// Load configuration from `./dry_crud.toml` and the environment
    ///
    /// A missing file is not an error; defaults apply.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load configuration from a specific file plus the environment
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use dry_crud::config::DryCrudConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = DryCrudConfig::load_from("./config/production.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading dry-crud configuration");
        let config = Self::figment(path).extract()?;
        Ok(config)
    }

    /// The layered provider used by [`DryCrudConfig::load_from`]
    #[must_use]
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DryCrudConfig::default();
        assert_eq!(config.format.true_label, "yes");
        assert_eq!(config.format.delimiter, ",");
        assert_eq!(config.format.precision, 2);
        assert_eq!(config.list.no_entries, "No entries found.");
        assert_eq!(config.forms.style, FormStyle::Current);
        assert_eq!(config.forms.submit_label, "Save");
    }

    #[test]
    fn test_form_style_markup() {
        assert_eq!(FormStyle::Current.field_error_class(), "field_with_errors");
        assert_eq!(FormStyle::Legacy.field_error_class(), "fieldWithErrors");
        assert_eq!(
            FormStyle::Current.error_explanation_attr(),
            ("id", "error_explanation")
        );
        assert!(!FormStyle::Legacy.numeric_inputs());
    }

    #[test]
    fn test_load_from_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
                [format]
                true_label = "ja"

                [forms]
                style = "legacy"
                "#,
            )?;

            let config = DryCrudConfig::load_from("custom.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.format.true_label, "ja");
            assert_eq!(config.format.false_label, "no");
            assert_eq!(config.forms.style, FormStyle::Legacy);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, "[list]\nno_entries = \"Nothing here\"\n")?;
            jail.set_env("DRY_CRUD_LIST__NO_ENTRIES", "Empty");

            let config = DryCrudConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config.list.no_entries, "Empty");
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        figment::Jail::expect_with(|_jail| {
            let config = DryCrudConfig::load().map_err(|e| e.to_string())?;
            assert_eq!(config, DryCrudConfig::default());
            Ok(())
        });
    }
}
