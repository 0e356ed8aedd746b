//! Typed catalog query model.
//!
//! A [`Query`] is a record kind, a conjunction of [`Predicate`]s, an ordered
//! list of [`SortKey`]s and an optional limit. Stores receive queries as
//! values and may evaluate them however they like; [`Query::apply`] is the
//! reference evaluation over an in-memory record set.
//!
//! A record that lacks the field a predicate names never matches it, and
//! records lacking a sort field are ordered last whatever the direction.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::component::{Category, Record, RecordKind};

/// Queryable record attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Manufacturer,
    Price,
    Rating,
    Socket,
    Chipset,
    FormFactor,
    MemoryType,
    Cores,
    Threads,
    ClockFrequency,
    ThermalOutput,
    PowerDraw,
    MaxMemoryFrequency,
    Frequency,
    Modules,
    Capacity,
    Interface,
    VideoMemory,
    Length,
    CoolerType,
    Dissipation,
    Height,
    TransferRate,
    SpindleSpeed,
    Wattage,
    Certificate,
    Certified,
    MotherboardFormFactors,
    MaxGpuLength,
    CoolerClearance,
    LiquidCooling,
    OperatingSystem,
    GraphicsType,
    RamCapacity,
    SsdCapacity,
    HddCapacity,
}

/// Value of a record attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl FieldValue {
    fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => {
                a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase())
            }
            (FieldValue::Flag(a), FieldValue::Flag(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Anything that exposes attributes to the query model.
pub trait Queryable {
    fn field(&self, field: Field) -> Option<FieldValue>;
}

/// A single filter clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Predicate {
    /// Same type and value. Text compares ASCII case-insensitively.
    Equals { field: Field, value: FieldValue },
    /// Substring of a text field, or member of a list field.
    Contains { field: Field, needle: String },
    AtLeast { field: Field, bound: f64 },
    AtMost { field: Field, bound: f64 },
    /// Text field equal to one of `values`.
    OneOf { field: Field, values: Vec<String> },
    /// Text field equal to none of `values`.
    NotIn { field: Field, values: Vec<String> },
}

impl Predicate {
    pub fn equals(field: Field, value: impl Into<FieldValue>) -> Self {
        Predicate::Equals {
            field,
            value: value.into(),
        }
    }

    pub fn contains(field: Field, needle: impl Into<String>) -> Self {
        Predicate::Contains {
            field,
            needle: needle.into(),
        }
    }

    pub fn at_least(field: Field, bound: f64) -> Self {
        Predicate::AtLeast { field, bound }
    }

    pub fn at_most(field: Field, bound: f64) -> Self {
        Predicate::AtMost { field, bound }
    }

    pub fn one_of<I, S>(field: Field, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Predicate::OneOf {
            field,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn not_in<I, S>(field: Field, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Predicate::NotIn {
            field,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn field(&self) -> Field {
        match self {
            Predicate::Equals { field, .. }
            | Predicate::Contains { field, .. }
            | Predicate::AtLeast { field, .. }
            | Predicate::AtMost { field, .. }
            | Predicate::OneOf { field, .. }
            | Predicate::NotIn { field, .. } => *field,
        }
    }

    pub fn matches(&self, record: &impl Queryable) -> bool {
        let Some(actual) = record.field(self.field()) else {
            return false;
        };

        match self {
            Predicate::Equals { value, .. } => match (&actual, value) {
                (FieldValue::Text(a), FieldValue::Text(b)) => a.eq_ignore_ascii_case(b),
                (FieldValue::Number(a), FieldValue::Number(b)) => a == b,
                (FieldValue::Flag(a), FieldValue::Flag(b)) => a == b,
                _ => false,
            },
            Predicate::Contains { needle, .. } => match &actual {
                FieldValue::Text(text) => text
                    .to_ascii_lowercase()
                    .contains(&needle.to_ascii_lowercase()),
                FieldValue::List(items) => items.iter().any(|i| i.eq_ignore_ascii_case(needle)),
                _ => false,
            },
            Predicate::AtLeast { bound, .. } => actual.as_number().is_some_and(|n| n >= *bound),
            Predicate::AtMost { bound, .. } => actual.as_number().is_some_and(|n| n <= *bound),
            Predicate::OneOf { values, .. } => match &actual {
                FieldValue::Text(text) => values.iter().any(|v| v.eq_ignore_ascii_case(text)),
                _ => false,
            },
            Predicate::NotIn { values, .. } => match &actual {
                FieldValue::Text(text) => !values.iter().any(|v| v.eq_ignore_ascii_case(text)),
                _ => false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: Field,
    pub direction: Direction,
}

impl SortKey {
    fn compare(&self, a: &impl Queryable, b: &impl Queryable) -> Ordering {
        match (a.field(self.field), b.field(self.field)) {
            (Some(x), Some(y)) => match self.direction {
                Direction::Asc => x.compare(&y),
                Direction::Desc => y.compare(&x),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// A catalog query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub kind: RecordKind,
    pub predicates: Vec<Predicate>,
    pub order: Vec<SortKey>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            predicates: Vec::new(),
            order: Vec::new(),
            limit: None,
        }
    }

    pub fn components(category: Category) -> Self {
        Self::new(RecordKind::Component(category))
    }

    pub fn prebuilt() -> Self {
        Self::new(RecordKind::Prebuilt)
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn filter_opt(self, predicate: Option<Predicate>) -> Self {
        match predicate {
            Some(p) => self.filter(p),
            None => self,
        }
    }

    pub fn ascending(mut self, field: Field) -> Self {
        self.order.push(SortKey {
            field,
            direction: Direction::Asc,
        });
        self
    }

    pub fn descending(mut self, field: Field) -> Self {
        self.order.push(SortKey {
            field,
            direction: Direction::Desc,
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether `record` is of the queried kind and passes every predicate.
    pub fn matches(&self, record: &Record) -> bool {
        record.kind() == self.kind && self.predicates.iter().all(|p| p.matches(record))
    }

    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        self.order
            .iter()
            .map(|key| key.compare(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Filter, order and truncate `records`. Ties keep input order.
    pub fn apply<'a, I>(&self, records: I) -> Vec<Record>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut matched: Vec<&Record> = records.into_iter().filter(|r| self.matches(r)).collect();
        matched.sort_by(|a, b| self.compare(a, b));
        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }
        matched.into_iter().cloned().collect()
    }
}
