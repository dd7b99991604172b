//! Where-filter compiler for page queries
//!
//! Page queries accept a recursive `where` input object combining leaf
//! predicates with `_and` / `_or`. This module compiles such a tree into a
//! parameterized SQL fragment plus an ordered list of typed bind values.
//! Field names are validated against the target table's column list and
//! values are always bound, never interpolated.

use async_graphql::{Enum, InputObject};
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::Postgres;
use thiserror::Error;
use uuid::Uuid;

/// Errors produced while compiling a `where` tree
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("unknown filter column: {0}")]
    UnknownColumn(String),
    #[error("invalid filter: {0}")]
    Invalid(String),
}

/// Comparison operator for a leaf predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum FilterOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// Case-insensitive pattern match (text columns only)
    Ilike,
    /// Membership in a list of values
    In,
}

impl FilterOp {
    fn sql(self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Ne => "<>",
            FilterOp::Lt => "<",
            FilterOp::Le => "<=",
            FilterOp::Gt => ">",
            FilterOp::Ge => ">=",
            FilterOp::Ilike => "ILIKE",
            FilterOp::In => "= ANY",
        }
    }
}

/// Recursive predicate tree accepted by page queries
///
/// A node is either a combinator (`_and` / `_or` with child nodes) or a
/// leaf (`field` + `op` + `value`). Mixing both in one node is rejected.
#[derive(Debug, Clone, InputObject)]
pub struct WhereFilter {
    /// All child predicates must hold
    #[graphql(name = "_and")]
    pub and: Option<Vec<WhereFilter>>,
    /// At least one child predicate must hold
    #[graphql(name = "_or")]
    pub or: Option<Vec<WhereFilter>>,
    /// Column the leaf predicate applies to
    pub field: Option<String>,
    /// Leaf comparison operator
    pub op: Option<FilterOp>,
    /// Leaf comparison value; uuids and timestamps are passed as strings
    pub value: Option<Value>,
}

/// Typed value ready to be bound to a prepared statement
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Uuid(Uuid),
    Text(String),
    Bool(bool),
    Float(f64),
    Timestamp(DateTime<Utc>),
    UuidList(Vec<Uuid>),
    TextList(Vec<String>),
    FloatList(Vec<f64>),
}

/// Result of compiling a [`WhereFilter`]
#[derive(Debug)]
pub struct CompiledFilter {
    /// SQL fragment with `$n` placeholders, suitable after `WHERE`
    pub sql: String,
    /// Bind values in placeholder order
    pub binds: Vec<BindValue>,
}

/// Compile a filter tree against a column whitelist
///
/// `first_placeholder` is the number the first generated `$n` placeholder
/// should use, so the fragment can be appended after other bound
/// parameters.
pub fn compile(
    filter: &WhereFilter,
    columns: &'static str,
    first_placeholder: usize,
) -> Result<CompiledFilter, FilterError> {
    let mut binds = Vec::new();
    let sql = compile_node(filter, columns, first_placeholder, &mut binds)?;
    Ok(CompiledFilter { sql, binds })
}

fn compile_node(
    node: &WhereFilter,
    columns: &'static str,
    first_placeholder: usize,
    binds: &mut Vec<BindValue>,
) -> Result<String, FilterError> {
    let is_leaf = node.field.is_some() || node.op.is_some() || node.value.is_some();
    match (&node.and, &node.or) {
        (Some(_), Some(_)) => Err(FilterError::Invalid(
            "_and and _or cannot appear in the same node".into(),
        )),
        (Some(children), None) if !is_leaf => {
            compile_children(children, " AND ", columns, first_placeholder, binds)
        }
        (None, Some(children)) if !is_leaf => {
            compile_children(children, " OR ", columns, first_placeholder, binds)
        }
        (None, None) if is_leaf => compile_leaf(node, columns, first_placeholder, binds),
        _ => Err(FilterError::Invalid(
            "a node is either a combinator or a leaf, not both".into(),
        )),
    }
}

// `first_placeholder` flows through the recursion unchanged; only leaves
// consume placeholder numbers, as `first_placeholder + binds.len()`.
fn compile_children(
    children: &[WhereFilter],
    joiner: &str,
    columns: &'static str,
    first_placeholder: usize,
    binds: &mut Vec<BindValue>,
) -> Result<String, FilterError> {
    if children.is_empty() {
        return Err(FilterError::Invalid("empty combinator".into()));
    }
    let mut parts = Vec::with_capacity(children.len());
    for child in children {
        parts.push(compile_node(child, columns, first_placeholder, binds)?);
    }
    Ok(format!("({})", parts.join(joiner)))
}

fn compile_leaf(
    node: &WhereFilter,
    columns: &'static str,
    first_placeholder: usize,
    binds: &mut Vec<BindValue>,
) -> Result<String, FilterError> {
    let field = node
        .field
        .as_deref()
        .ok_or_else(|| FilterError::Invalid("leaf is missing field".into()))?;
    let op = node
        .op
        .ok_or_else(|| FilterError::Invalid("leaf is missing op".into()))?;
    let value = node
        .value
        .as_ref()
        .ok_or_else(|| FilterError::Invalid("leaf is missing value".into()))?;

    if !columns.split(',').any(|c| c.trim() == field) {
        return Err(FilterError::UnknownColumn(field.to_string()));
    }

    let bind = convert_value(op, value)?;
    let placeholder = first_placeholder + binds.len();
    binds.push(bind);

    let sql = match op {
        FilterOp::In => format!("{} = ANY(${})", field, placeholder),
        _ => format!("{} {} ${}", field, op.sql(), placeholder),
    };
    Ok(sql)
}

fn convert_value(op: FilterOp, value: &Value) -> Result<BindValue, FilterError> {
    match op {
        FilterOp::Ilike => match value {
            Value::String(s) => Ok(BindValue::Text(s.clone())),
            _ => Err(FilterError::Invalid("ILIKE requires a string pattern".into())),
        },
        FilterOp::In => match value {
            Value::Array(items) => convert_list(items),
            _ => Err(FilterError::Invalid("IN requires a list of values".into())),
        },
        _ => convert_scalar(value),
    }
}

fn convert_scalar(value: &Value) -> Result<BindValue, FilterError> {
    match value {
        Value::Bool(b) => Ok(BindValue::Bool(*b)),
        Value::Number(n) => n
            .as_f64()
            .map(BindValue::Float)
            .ok_or_else(|| FilterError::Invalid(format!("unrepresentable number: {}", n))),
        Value::String(s) => {
            // Uuids and RFC 3339 timestamps arrive as JSON strings
            if let Ok(id) = Uuid::parse_str(s) {
                Ok(BindValue::Uuid(id))
            } else if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
                Ok(BindValue::Timestamp(ts.with_timezone(&Utc)))
            } else {
                Ok(BindValue::Text(s.clone()))
            }
        }
        other => Err(FilterError::Invalid(format!(
            "unsupported filter value: {}",
            other
        ))),
    }
}

fn convert_list(items: &[Value]) -> Result<BindValue, FilterError> {
    if items.is_empty() {
        return Err(FilterError::Invalid("IN requires a non-empty list".into()));
    }
    let scalars = items
        .iter()
        .map(convert_scalar)
        .collect::<Result<Vec<_>, _>>()?;
    match &scalars[0] {
        BindValue::Uuid(_) => scalars
            .iter()
            .map(|v| match v {
                BindValue::Uuid(id) => Ok(*id),
                _ => Err(FilterError::Invalid("mixed types in IN list".into())),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(BindValue::UuidList),
        BindValue::Text(_) => scalars
            .iter()
            .map(|v| match v {
                BindValue::Text(s) => Ok(s.clone()),
                _ => Err(FilterError::Invalid("mixed types in IN list".into())),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(BindValue::TextList),
        BindValue::Float(_) => scalars
            .iter()
            .map(|v| match v {
                BindValue::Float(f) => Ok(*f),
                _ => Err(FilterError::Invalid("mixed types in IN list".into())),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(BindValue::FloatList),
        _ => Err(FilterError::Invalid(
            "IN lists support uuids, strings and numbers".into(),
        )),
    }
}

/// Append one [`BindValue`] to a prepared query
pub fn bind_one<'q, O>(
    q: QueryAs<'q, Postgres, O, PgArguments>,
    value: &BindValue,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    match value {
        BindValue::Uuid(v) => q.bind(*v),
        BindValue::Text(v) => q.bind(v.clone()),
        BindValue::Bool(v) => q.bind(*v),
        BindValue::Float(v) => q.bind(*v),
        BindValue::Timestamp(v) => q.bind(*v),
        BindValue::UuidList(v) => q.bind(v.clone()),
        BindValue::TextList(v) => q.bind(v.clone()),
        BindValue::FloatList(v) => q.bind(v.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    const COLUMNS: &str = "id, name, name_en, min_score, admission_id, lastchange";

    fn leaf(field: &str, op: FilterOp, value: Value) -> WhereFilter {
        WhereFilter {
            and: None,
            or: None,
            field: Some(field.to_string()),
            op: Some(op),
            value: Some(value),
        }
    }

    #[test]
    fn test_compile_leaf_eq_text() {
        let compiled = compile(&leaf("name", FilterOp::Eq, json!("fall intake")), COLUMNS, 1)
            .expect("compiles");
        assert_eq!(compiled.sql, "name = $1");
        assert_eq!(compiled.binds, vec![BindValue::Text("fall intake".into())]);
    }

    #[test]
    fn test_compile_leaf_uuid_recognized() {
        let id = Uuid::new_v4();
        let compiled = compile(
            &leaf("admission_id", FilterOp::Eq, json!(id.to_string())),
            COLUMNS,
            1,
        )
        .expect("compiles");
        assert_eq!(compiled.binds, vec![BindValue::Uuid(id)]);
    }

    #[test]
    fn test_compile_leaf_timestamp_recognized() {
        let compiled = compile(
            &leaf("lastchange", FilterOp::Gt, json!("2024-09-01T00:00:00Z")),
            COLUMNS,
            1,
        )
        .expect("compiles");
        assert_matches!(compiled.binds[0], BindValue::Timestamp(_));
        assert_eq!(compiled.sql, "lastchange > $1");
    }

    #[test]
    fn test_compile_and_or_nesting() {
        let filter = WhereFilter {
            and: Some(vec![
                leaf("min_score", FilterOp::Ge, json!(10.0)),
                WhereFilter {
                    and: None,
                    or: Some(vec![
                        leaf("name", FilterOp::Ilike, json!("math%")),
                        leaf("name_en", FilterOp::Ilike, json!("math%")),
                    ]),
                    field: None,
                    op: None,
                    value: None,
                },
            ]),
            or: None,
            field: None,
            op: None,
            value: None,
        };
        let compiled = compile(&filter, COLUMNS, 1).expect("compiles");
        assert_eq!(
            compiled.sql,
            "(min_score >= $1 AND (name ILIKE $2 OR name_en ILIKE $3))"
        );
        assert_eq!(compiled.binds.len(), 3);
    }

    #[test]
    fn test_nested_leaves_number_placeholders_sequentially() {
        // Placeholders must count leaves exactly once regardless of
        // nesting depth or the starting offset
        let filter = WhereFilter {
            and: Some(vec![
                leaf("min_score", FilterOp::Ge, json!(10.0)),
                WhereFilter {
                    and: None,
                    or: Some(vec![
                        leaf("name", FilterOp::Ilike, json!("oral%")),
                        WhereFilter {
                            and: Some(vec![
                                leaf("name_en", FilterOp::Ilike, json!("oral%")),
                                leaf("min_score", FilterOp::Lt, json!(50.0)),
                            ]),
                            or: None,
                            field: None,
                            op: None,
                            value: None,
                        },
                    ]),
                    field: None,
                    op: None,
                    value: None,
                },
            ]),
            or: None,
            field: None,
            op: None,
            value: None,
        };
        let compiled = compile(&filter, COLUMNS, 3).expect("compiles");
        assert_eq!(
            compiled.sql,
            "(min_score >= $3 AND (name ILIKE $4 OR (name_en ILIKE $5 AND min_score < $6)))"
        );
        assert_eq!(compiled.binds.len(), 4);
    }

    #[test]
    fn test_compile_respects_first_placeholder() {
        let compiled =
            compile(&leaf("name", FilterOp::Ne, json!("x")), COLUMNS, 4).expect("compiles");
        assert_eq!(compiled.sql, "name <> $4");
    }

    #[test]
    fn test_unknown_column_rejected() {
        let result = compile(
            &leaf("name; DROP TABLE examtypes", FilterOp::Eq, json!("x")),
            COLUMNS,
            1,
        );
        assert_matches!(result, Err(FilterError::UnknownColumn(_)));
    }

    #[test]
    fn test_in_list_of_uuids() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let compiled = compile(
            &leaf(
                "admission_id",
                FilterOp::In,
                json!([a.to_string(), b.to_string()]),
            ),
            COLUMNS,
            1,
        )
        .expect("compiles");
        assert_eq!(compiled.sql, "admission_id = ANY($1)");
        assert_eq!(compiled.binds, vec![BindValue::UuidList(vec![a, b])]);
    }

    #[test]
    fn test_mixed_in_list_rejected() {
        let result = compile(
            &leaf("name", FilterOp::In, json!(["a", 3.0])),
            COLUMNS,
            1,
        );
        assert_matches!(result, Err(FilterError::Invalid(_)));
    }

    #[test]
    fn test_combinator_and_leaf_in_same_node_rejected() {
        let filter = WhereFilter {
            and: Some(vec![leaf("name", FilterOp::Eq, json!("x"))]),
            or: None,
            field: Some("name".into()),
            op: Some(FilterOp::Eq),
            value: Some(json!("y")),
        };
        assert_matches!(compile(&filter, COLUMNS, 1), Err(FilterError::Invalid(_)));
    }

    #[test]
    fn test_ilike_requires_string() {
        let result = compile(&leaf("name", FilterOp::Ilike, json!(5)), COLUMNS, 1);
        assert_matches!(result, Err(FilterError::Invalid(_)));
    }
}
