#![forbid(unsafe_code)]

use crate::StoreError;
use rdt_core::source::{FilterOp, SourceConfig};

/// Parameterized SELECT projecting `(key, parent, label)` in that column order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SelectQuery {
    pub(crate) sql: String,
    pub(crate) params: Vec<String>,
}

pub(crate) fn build_select(config: &SourceConfig) -> Result<SelectQuery, StoreError> {
    let table = quote_ident(&config.collection)?;
    let key = quote_ident(&config.key_field)?;
    let parent = quote_ident(&config.parent_field)?;
    let label = quote_ident(&config.label_field)?;

    let mut sql = format!("SELECT {key}, {parent}, {label} FROM {table}");
    let mut params = Vec::new();

    for (i, filter) in config.filters.iter().enumerate() {
        sql.push_str(if i == 0 { " WHERE " } else { " AND " });
        let field = quote_ident(&filter.field)?;
        if filter.op.takes_value() {
            let Some(value) = filter.value.as_ref() else {
                return Err(StoreError::InvalidInput("filter requires a value"));
            };
            params.push(value.clone());
            sql.push_str(&format!("{field} {} ?{}", op_sql(filter.op), params.len()));
        } else {
            sql.push_str(&format!("{field} {}", op_sql(filter.op)));
        }
    }

    // Without an explicit order the key column decides, so repeated passes
    // over unchanged data emit the same sequence.
    match config.order_by.as_ref() {
        Some(order) => {
            let field = quote_ident(&order.field)?;
            let direction = if order.descending { "DESC" } else { "ASC" };
            sql.push_str(&format!(" ORDER BY {field} {direction}, {key} ASC"));
        }
        None => sql.push_str(&format!(" ORDER BY {key} ASC")),
    }

    Ok(SelectQuery { sql, params })
}

fn op_sql(op: FilterOp) -> &'static str {
    match op {
        FilterOp::Eq => "=",
        FilterOp::Ne => "<>",
        FilterOp::Lt => "<",
        FilterOp::Le => "<=",
        FilterOp::Gt => ">",
        FilterOp::Ge => ">=",
        FilterOp::Like => "LIKE",
        FilterOp::IsNull => "IS NULL",
        FilterOp::IsNotNull => "IS NOT NULL",
    }
}

fn quote_ident(name: &str) -> Result<String, StoreError> {
    let mut chars = name.chars();
    let valid_first = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    if !valid_first || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') || name.len() > 128 {
        return Err(StoreError::InvalidIdentifier(name.to_string()));
    }
    Ok(format!("\"{name}\""))
}
