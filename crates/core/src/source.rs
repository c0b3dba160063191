#![forbid(unsafe_code)]

use crate::tree::Record;

/// Where records come from and which fields project into
/// `(key, parent_key, label)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceConfig {
    pub collection: String,
    pub key_field: String,
    pub parent_field: String,
    pub label_field: String,
    pub order_by: Option<OrderBy>,
    pub filters: Vec<Filter>,
}

impl SourceConfig {
    pub fn new(
        collection: impl Into<String>,
        key_field: impl Into<String>,
        parent_field: impl Into<String>,
        label_field: impl Into<String>,
    ) -> Self {
        Self {
            collection: collection.into(),
            key_field: key_field.into(),
            parent_field: parent_field.into(),
            label_field: label_field.into(),
            order_by: None,
            filters: Vec::new(),
        }
    }

    pub fn order_by(mut self, field: impl Into<String>, descending: bool) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            descending,
        });
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub descending: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
    IsNull,
    IsNotNull,
}

impl FilterOp {
    pub fn takes_value(self) -> bool {
        !matches!(self, Self::IsNull | Self::IsNotNull)
    }
}

/// Predicate on a single field. `value` is ignored by the null tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    pub field: String,
    pub op: FilterOp,
    pub value: Option<String>,
}

impl Filter {
    pub fn new(field: impl Into<String>, op: FilterOp, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op,
            value: Some(value.into()),
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, FilterOp::Eq, value)
    }

    pub fn is_null(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::IsNull,
            value: None,
        }
    }

    pub fn is_not_null(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: FilterOp::IsNotNull,
            value: None,
        }
    }
}

/// Record-fetch capability. Called once per render pass; retries, if any,
/// belong to the implementation.
pub trait RecordSource {
    type Error: std::error::Error;

    fn fetch(&mut self, config: &SourceConfig) -> Result<Vec<Record>, Self::Error>;
}

/// Fixed in-memory records, returned as-is regardless of the config.
#[derive(Clone, Debug, Default)]
pub struct StaticRecords(pub Vec<Record>);

impl RecordSource for StaticRecords {
    type Error = std::convert::Infallible;

    fn fetch(&mut self, _config: &SourceConfig) -> Result<Vec<Record>, Self::Error> {
        Ok(self.0.clone())
    }
}
