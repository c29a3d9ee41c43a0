//! Model reflection: column types, attribute values and associations
//!
//! The helpers never talk to a database. Anything that should be
//! rendered implements [`Model`], which exposes attribute values,
//! reflected column types, belongs-to associations and validation errors.
//!
//! # Column Types
//!
//! - `string` - short text column
//! - `text` - long text, rendered as paragraphs
//! - `integer` - whole numbers, rendered with thousands delimiters
//! - `float` / `decimal` - rendered with two decimals
//! - `date`, `time`, `datetime`
//! - `boolean` - rendered as yes/no
//!
//! Reflected SQL names (`varchar(255)`, `int8`, `timestamp`, `numeric`,
//! ...) parse into the same closed set.

mod value;

pub use value::Value;

use std::fmt;
use std::str::FromStr;

use inflector::Inflector;

use crate::forms::ValidationErrors;

/// Semantic type of a model column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// Short string (VARCHAR)
    String,
    /// Long text
    Text,
    /// Integer
    Integer,
    /// Floating point number
    Float,
    /// Fixed point decimal
    Decimal,
    /// Date without time
    Date,
    /// Time of day
    Time,
    /// Date and time
    DateTime,
    /// Boolean
    Boolean,
}

impl ColumnType {
    /// Get the tag name of this column type
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime",
            Self::Boolean => "boolean",
        }
    }

    /// Whether values of this type are numbers
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Decimal)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a reflected type name is not supported
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown column type: '{0}'")]
pub struct UnknownColumnType(pub String);

impl FromStr for ColumnType {
    type Err = UnknownColumnType;

    /// Parse a reflected column type name
    ///
    /// Length and precision suffixes such as `(255)` or `(19,4)` are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use dry_crud::model::ColumnType;
    ///
    /// assert_eq!("varchar(255)".parse(), Ok(ColumnType::String));
    /// assert_eq!("timestamp".parse(), Ok(ColumnType::DateTime));
    /// assert_eq!("numeric(19,4)".parse(), Ok(ColumnType::Decimal));
    /// ```
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_lowercase();
        let base = normalized
            .split('(')
            .next()
            .unwrap_or_default()
            .trim();

        match base {
            "string" | "varchar" | "character varying" | "char" | "character" | "citext"
            | "uuid" => Ok(Self::String),
            "text" | "clob" | "mediumtext" | "longtext" => Ok(Self::Text),
            "integer" | "int" | "int2" | "int4" | "int8" | "smallint" | "bigint" | "serial"
            | "bigserial" => Ok(Self::Integer),
            "float" | "real" | "double" | "double precision" | "float4" | "float8" => {
                Ok(Self::Float)
            }
            "decimal" | "numeric" | "money" => Ok(Self::Decimal),
            "date" => Ok(Self::Date),
            "time" | "time without time zone" => Ok(Self::Time),
            "datetime" | "timestamp" | "timestamptz" | "timestamp without time zone"
            | "timestamp with time zone" => Ok(Self::DateTime),
            "boolean" | "bool" => Ok(Self::Boolean),
            _ => Err(UnknownColumnType(input.to_string())),
        }
    }
}

/// Naming information for a model class
///
/// # Examples
///
/// ```
/// use dry_crud::model::ModelName;
///
/// let name = ModelName::from_type_name("CrudTestModel");
/// assert_eq!(name.singular, "crud_test_model");
/// assert_eq!(name.plural, "crud_test_models");
/// assert_eq!(name.human, "Crud test model");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelName {
    /// `snake_case` singular name, used for param keys and translation keys
    pub singular: String,
    /// `snake_case` plural name, used for routes and controller scopes
    pub plural: String,
    /// Human readable name
    pub human: String,
}

impl ModelName {
    /// Derive all names from a Rust type name such as `CrudTestModel`
    #[must_use]
    pub fn from_type_name(type_name: &str) -> Self {
        let singular = type_name.to_snake_case();
        Self {
            plural: singular.to_plural(),
            human: singular.to_sentence_case(),
            singular,
        }
    }

    /// Route path of the collection, e.g. `/crud_test_models`
    #[must_use]
    pub fn collection_path(&self) -> String {
        format!("/{}", self.plural)
    }

    /// Route path of a member, e.g. `/crud_test_models/1`
    #[must_use]
    pub fn member_path(&self, id: i64) -> String {
        format!("/{}/{id}", self.plural)
    }
}

/// A record on the other side of an association
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociatedRecord {
    /// Primary key
    pub id: i64,
    /// Display label
    pub label: String,
}

impl AssociatedRecord {
    /// Create a new associated record
    #[must_use]
    pub fn new(id: i64, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Reflection of a belongs-to association
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    /// Association name, e.g. `companion`
    pub name: String,
    /// Model declaring the association
    pub owner: ModelName,
    /// Associated model
    pub target: ModelName,
    /// Foreign key column, e.g. `companion_id`
    pub foreign_key: String,
    /// The currently associated record, if any
    pub record: Option<AssociatedRecord>,
    /// Records that may be selected in forms
    pub choices: Vec<AssociatedRecord>,
}

impl Association {
    /// Create a belongs-to association with the conventional foreign key
    #[must_use]
    pub fn belongs_to(name: impl Into<String>, owner: ModelName, target: ModelName) -> Self {
        let name = name.into();
        Self {
            foreign_key: format!("{name}_id"),
            name,
            owner,
            target,
            record: None,
            choices: Vec::new(),
        }
    }

    /// Set the currently associated record
    #[must_use]
    pub fn with_record(mut self, record: Option<AssociatedRecord>) -> Self {
        self.record = record;
        self
    }

    /// Set the selectable records
    #[must_use]
    pub fn with_choices(mut self, choices: Vec<AssociatedRecord>) -> Self {
        self.choices = choices;
        self
    }
}

/// An object whose attributes can be formatted and edited
///
/// `attribute` returns `None` when the model has no attribute of that
/// name; a present attribute without a value is `Some(Value::Nil)`.
pub trait Model {
    /// Naming information of the model class
    fn model_name(&self) -> ModelName;

    /// Primary key of a persisted record, `None` for new records
    fn id(&self) -> Option<i64> {
        None
    }

    /// Read an attribute
    fn attribute(&self, name: &str) -> Option<Value>;

    /// Reflected column type of an attribute
    ///
    /// Associations and computed attributes have no column type.
    fn column_type(&self, _name: &str) -> Option<ColumnType> {
        None
    }

    /// Maximum length of a string column
    fn column_limit(&self, _name: &str) -> Option<usize> {
        None
    }

    /// Belongs-to association reachable by its name or foreign key
    fn association(&self, _name: &str) -> Option<Association> {
        None
    }

    /// Validation errors of the last validation run
    fn errors(&self) -> ValidationErrors {
        ValidationErrors::new()
    }

    /// Whether the record has been persisted
    fn is_persisted(&self) -> bool {
        self.id().is_some()
    }
}
