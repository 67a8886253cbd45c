use sea_orm::Value;
use sea_orm::sea_query::{Expr, SimpleExpr};

/// A single comparison against a column.
///
/// The column may be qualified (`"persons.name"`), which matters when the
/// surrounding [`Where`](super::where_clause::Where) carries joins. No
/// database access happens until a repository consumes the condition.
#[derive(Debug, Clone)]
pub struct Condition {
    column: String,
    operator: Operator,
    value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Equal,
    Like,
    In,
}

impl Condition {
    /// `column = value`
    pub fn equal(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::build(column, Operator::Equal, value)
    }

    /// `column LIKE value`
    pub fn like(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::build(column, Operator::Like, value)
    }

    /// `column IN (values)`.
    ///
    /// A single string value containing commas is split into discrete values
    /// before binding (`"1,2,3"` binds three values). This is a convenience
    /// for callers holding delimited input, not validation; whitespace around
    /// the commas is preserved. Any other value binds as a one-element list.
    pub fn is_in(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::build(column, Operator::In, value)
    }

    fn build(column: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub(crate) fn to_expr(&self) -> SimpleExpr {
        match self.operator {
            Operator::Equal => Expr::cust_with_values(
                format!("{} = ?", self.column),
                [self.value.clone()],
            ),
            Operator::Like => Expr::cust_with_values(
                format!("{} LIKE ?", self.column),
                [self.value.clone()],
            ),
            Operator::In => {
                let values =
                    comma_separated(&self.value).unwrap_or_else(|| vec![self.value.clone()]);
                let placeholders = vec!["?"; values.len()].join(", ");
                Expr::cust_with_values(format!("{} IN ({})", self.column, placeholders), values)
            }
        }
    }
}

/// Splits a comma-delimited string value into discrete string values.
/// Returns `None` for anything that is not a string containing a comma.
fn comma_separated(value: &Value) -> Option<Vec<Value>> {
    match value {
        Value::String(Some(s)) if s.contains(',') => Some(
            s.split(',')
                .map(|part| Value::from(part.to_owned()))
                .collect(),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    use crate::query::testing::users;

    use super::*;

    fn sql_for(condition: Condition) -> String {
        users::Entity::find()
            .filter(condition.to_expr())
            .build(DbBackend::Postgres)
            .to_string()
    }

    const SELECT: &str =
        r#"SELECT "users"."id", "users"."username", "users"."password", "users"."person_id" FROM "users""#;

    #[test]
    fn equal_renders_binding() {
        assert_eq!(
            sql_for(Condition::equal("username", "jdoe")),
            format!("{SELECT} WHERE username = 'jdoe'")
        );
    }

    #[test]
    fn like_renders_binding() {
        assert_eq!(
            sql_for(Condition::like("username", "%do%")),
            format!("{SELECT} WHERE username LIKE '%do%'")
        );
    }

    #[test]
    fn in_splits_comma_delimited_string() {
        assert_eq!(
            sql_for(Condition::is_in("id", "1,2,3")),
            format!("{SELECT} WHERE id IN ('1', '2', '3')")
        );
    }

    #[test]
    fn in_preserves_whitespace_between_commas() {
        assert_eq!(
            sql_for(Condition::is_in("username", "one, two ")),
            format!("{SELECT} WHERE username IN ('one', ' two ')")
        );
    }

    #[test]
    fn in_binds_single_value_without_comma() {
        assert_eq!(
            sql_for(Condition::is_in("id", 7)),
            format!("{SELECT} WHERE id IN (7)")
        );
    }
}
