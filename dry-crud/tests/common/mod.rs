//! Shared fixtures for integration tests

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use dry_crud::forms::ValidationErrors;
use dry_crud::model::{AssociatedRecord, Association, ColumnType, Model, ModelName, Value};
use rust_decimal::Decimal;

/// A record with one column of every type and a companion association
#[derive(Debug, Clone, PartialEq)]
pub struct CrudTestModel {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub children: Option<i64>,
    pub companion_id: Option<i64>,
    pub rating: Option<f64>,
    pub income: Option<Decimal>,
    pub birthdate: Option<NaiveDate>,
    pub gets_up_at: Option<NaiveTime>,
    pub last_seen: Option<NaiveDateTime>,
    pub human: bool,
    pub remarks: Option<String>,
}

impl CrudTestModel {
    /// The persisted `AAAAA` fixture
    pub fn aaaaa() -> Self {
        let birthdate = NaiveDate::from_ymd_opt(1910, 1, 1).unwrap();
        Self {
            id: Some(1),
            name: Some("AAAAA".to_string()),
            children: Some(9),
            companion_id: None,
            rating: Some(1.1),
            income: Some(Decimal::new(1_000_000_010, 2)),
            birthdate: Some(birthdate),
            gets_up_at: NaiveTime::from_hms_opt(1, 1, 0),
            last_seen: NaiveDate::from_ymd_opt(2010, 1, 1)
                .and_then(|d| d.and_hms_opt(11, 21, 0)),
            human: true,
            remarks: Some("AAAAA BBBBB CCCCC\nAAAAA BBBBB CCCCC\n".to_string()),
        }
    }

    /// A new, unsaved record without values
    pub fn new_record() -> Self {
        Self {
            id: None,
            name: None,
            children: None,
            companion_id: None,
            rating: None,
            income: None,
            birthdate: None,
            gets_up_at: None,
            last_seen: None,
            human: false,
            remarks: None,
        }
    }
}

impl Model for CrudTestModel {
    fn model_name(&self) -> ModelName {
        ModelName::from_type_name("CrudTestModel")
    }

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        let value = match name {
            "id" => Value::from(self.id),
            "name" => Value::from(self.name.clone()),
            "children" => Value::from(self.children),
            "companion_id" => Value::from(self.companion_id),
            "rating" => Value::from(self.rating),
            "income" => Value::from(self.income),
            "birthdate" => Value::from(self.birthdate),
            "gets_up_at" => Value::from(self.gets_up_at),
            "last_seen" => Value::from(self.last_seen),
            "human" => Value::from(self.human),
            "remarks" => Value::from(self.remarks.clone()),
            _ => return None,
        };
        Some(value)
    }

    fn column_type(&self, name: &str) -> Option<ColumnType> {
        match name {
            "name" => Some(ColumnType::String),
            "id" | "children" | "companion_id" => Some(ColumnType::Integer),
            "rating" => Some(ColumnType::Float),
            "income" => Some(ColumnType::Decimal),
            "birthdate" => Some(ColumnType::Date),
            "gets_up_at" => Some(ColumnType::Time),
            "last_seen" => Some(ColumnType::DateTime),
            "human" => Some(ColumnType::Boolean),
            "remarks" => Some(ColumnType::Text),
            _ => None,
        }
    }

    fn column_limit(&self, name: &str) -> Option<usize> {
        (name == "name").then_some(50)
    }

    fn association(&self, name: &str) -> Option<Association> {
        if name != "companion" && name != "companion_id" {
            return None;
        }
        let model = self.model_name();
        let record = self
            .companion_id
            .map(|id| AssociatedRecord::new(id, format!("Companion {id}")));
        Some(
            Association::belongs_to("companion", model.clone(), model)
                .with_record(record)
                .with_choices(vec![
                    AssociatedRecord::new(2, "BBBBB"),
                    AssociatedRecord::new(3, "CCCCC"),
                ]),
        )
    }

    fn errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if self.name.as_deref().map_or(true, str::is_empty) {
            errors.add("name", "can't be blank");
        }
        errors
    }
}

/// A plain word exposing a few computed attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word(pub &'static str);

impl Model for Word {
    fn model_name(&self) -> ModelName {
        ModelName::from_type_name("Word")
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "size" => Some(Value::from(self.0.len())),
            "upcase" => Some(Value::from(self.0.to_uppercase())),
            "to_f" => Some(Value::from(self.0.parse::<f64>().unwrap_or_default())),
            _ => None,
        }
    }
}
