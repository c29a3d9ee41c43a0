//! Form field types and input configuration
//!
//! Field names are request parameter names such as
//! `crud_test_model[name]`; element ids are derived from them
//! (`crud_test_model_name`) unless set explicitly.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::html::SafeString;

/// HTML input types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputType {
    /// Text input (default)
    #[default]
    Text,
    /// Number input
    Number,
    /// Hidden input
    Hidden,
    /// Email input with validation
    Email,
}

impl InputType {
    /// Get the HTML type attribute value
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Hidden => "hidden",
            Self::Email => "email",
        }
    }
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Option for select dropdowns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Value attribute
    pub value: String,
    /// Display text
    pub label: String,
}

impl SelectOption {
    /// Create a new select option
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Kind of form field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Standard input field
    Input(InputType),
    /// Textarea for multi-line text
    Textarea {
        /// Number of visible text lines
        rows: Option<u32>,
        /// Visible width in average character widths
        cols: Option<u32>,
    },
    /// Select dropdown
    Select {
        /// Available options
        options: Vec<SelectOption>,
        /// Label of a leading option with an empty value
        include_blank: Option<String>,
    },
    /// Hidden `0` followed by a checkbox with value `1`
    Checkbox {
        /// Whether checkbox is checked
        checked: bool,
    },
    /// Year, month and day selects (`name(1i)`, `name(2i)`, `name(3i)`)
    DateSelect {
        /// Selected date; `None` adds blank options
        value: Option<NaiveDate>,
    },
    /// Hour and minute selects (`name(4i)`, `name(5i)`)
    TimeSelect {
        /// Selected time; `None` adds blank options
        value: Option<NaiveTime>,
    },
    /// Date selects followed by time selects
    DateTimeSelect {
        /// Selected timestamp; `None` adds blank options
        value: Option<NaiveDateTime>,
    },
    /// Pre-rendered markup shown in place of an input
    Static(SafeString),
}

impl Default for FieldKind {
    fn default() -> Self {
        Self::Input(InputType::default())
    }
}

/// A form field with all its attributes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormField {
    /// Parameter name
    pub name: String,
    /// Field type
    pub kind: FieldKind,
    /// Caption rendered in the label element
    pub label: Option<SafeString>,
    /// Current value; `None` omits the `value` attribute
    pub value: Option<String>,
    /// Maximum input length
    pub max_length: Option<usize>,
    /// Step for number inputs
    pub step: Option<String>,
    /// CSS class
    pub class: Option<String>,
    /// Element ID
    pub id: Option<String>,
    /// Custom attributes
    pub custom_attrs: Vec<(String, String)>,
}

impl FormField {
    /// Create a new input field
    #[must_use]
    pub fn input(name: impl Into<String>, input_type: InputType) -> Self {
        Self::new(name, FieldKind::Input(input_type))
    }

    /// Create a new textarea field
    #[must_use]
    pub fn textarea(name: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldKind::Textarea {
                rows: None,
                cols: None,
            },
        )
    }

    /// Create a new select field
    #[must_use]
    pub fn select(name: impl Into<String>) -> Self {
        Self::new(
            name,
            FieldKind::Select {
                options: Vec::new(),
                include_blank: None,
            },
        )
    }

    /// Create a new checkbox field
    #[must_use]
    pub fn checkbox(name: impl Into<String>, checked: bool) -> Self {
        Self::new(name, FieldKind::Checkbox { checked })
    }

    /// Create a new date select
    #[must_use]
    pub fn date_select(name: impl Into<String>, value: Option<NaiveDate>) -> Self {
        Self::new(name, FieldKind::DateSelect { value })
    }

    /// Create a new time select
    #[must_use]
    pub fn time_select(name: impl Into<String>, value: Option<NaiveTime>) -> Self {
        Self::new(name, FieldKind::TimeSelect { value })
    }

    /// Create a new datetime select
    #[must_use]
    pub fn datetime_select(name: impl Into<String>, value: Option<NaiveDateTime>) -> Self {
        Self::new(name, FieldKind::DateTimeSelect { value })
    }

    /// Show markup instead of an input
    #[must_use]
    pub fn static_content(name: impl Into<String>, content: SafeString) -> Self {
        Self::new(name, FieldKind::Static(content))
    }

    fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    /// Get the effective ID (custom or derived from the name)
    #[must_use]
    pub fn effective_id(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| sanitized_id(&self.name))
    }

    /// Parameter name of a date or time component, e.g. `person[born(1i)]`
    #[must_use]
    pub fn part_name(&self, part: u8) -> String {
        self.name.strip_suffix(']').map_or_else(
            || format!("{}({part}i)", self.name),
            |stem| format!("{stem}({part}i)]"),
        )
    }

    /// Attribute the field edits, e.g. `name` for `crud_test_model[name]`
    ///
    /// Validation errors are looked up under this key.
    #[must_use]
    pub fn attribute(&self) -> &str {
        self.name
            .rsplit_once('[')
            .map_or(self.name.as_str(), |(_, rest)| rest.trim_end_matches(']'))
    }

    /// Check if this is a hidden input
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        matches!(self.kind, FieldKind::Input(InputType::Hidden))
    }
}

/// Turn a parameter name into an element id
///
/// ```rust
/// use dry_crud::forms::sanitized_id;
///
/// assert_eq!(sanitized_id("crud_test_model[name]"), "crud_test_model_name");
/// assert_eq!(sanitized_id("person[born(1i)]"), "person_born_1i");
/// ```
#[must_use]
pub fn sanitized_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    for ch in name.chars() {
        match ch {
            ']' | ')' => {}
            c if c.is_ascii_alphanumeric() || c == '_' || c == '-' => id.push(c),
            _ => id.push('_'),
        }
    }
    id
}
