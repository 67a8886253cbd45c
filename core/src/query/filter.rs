use sea_orm::sea_query::Expr;
use sea_orm::{EntityTrait, QueryFilter, Select, Value};

use super::where_clause::Join;

/// An explicitly ordered list of filter fields, each a WHERE fragment with a
/// bound value and optional join clauses.
///
/// Fields are applied in insertion order, joins before fragments, and all
/// fragments combine with AND. A field whose value is SQL NULL or an empty
/// string is skipped entirely, so callers can feed optional request
/// parameters straight in:
///
/// ```ignore
/// let filter = Filter::new()
///     .field("users.enabled = ?", true)
///     .field_with_join(
///         "persons.name LIKE ?",
///         name, // Option<String>; None or "" leaves the field out
///         Join::inner("persons", "persons.id = users.person_id"),
///     );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Filter {
    fields: Vec<FilterField>,
}

#[derive(Debug, Clone)]
struct FilterField {
    fragment: String,
    value: Value,
    joins: Vec<Join>,
}

impl FilterField {
    fn is_skipped(&self) -> bool {
        is_null(&self.value) || matches!(&self.value, Value::String(Some(s)) if s.is_empty())
    }
}

/// SQL-NULL check over the plain `Value` variants. Feature-gated variants
/// (json, chrono, uuid, ...) are never produced by this crate's builders and
/// fall through as non-null.
fn is_null(value: &Value) -> bool {
    matches!(
        value,
        Value::Bool(None)
            | Value::TinyInt(None)
            | Value::SmallInt(None)
            | Value::Int(None)
            | Value::BigInt(None)
            | Value::TinyUnsigned(None)
            | Value::SmallUnsigned(None)
            | Value::Unsigned(None)
            | Value::BigUnsigned(None)
            | Value::Float(None)
            | Value::Double(None)
            | Value::Char(None)
            | Value::String(None)
            | Value::Bytes(None)
    )
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fragment with a bound value, e.g. `"username LIKE ?"`.
    pub fn field(mut self, fragment: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push(FilterField {
            fragment: fragment.into(),
            value: value.into(),
            joins: Vec::new(),
        });
        self
    }

    /// Appends a fragment whose column lives behind a join.
    pub fn field_with_join(
        mut self,
        fragment: impl Into<String>,
        value: impl Into<Value>,
        join: Join,
    ) -> Self {
        self.fields.push(FilterField {
            fragment: fragment.into(),
            value: value.into(),
            joins: vec![join],
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn apply<E: EntityTrait>(&self, mut select: Select<E>) -> Select<E> {
        for field in self.fields.iter().filter(|field| !field.is_skipped()) {
            for join in &field.joins {
                select = join.apply(select);
            }
            select = select.filter(Expr::cust_with_values(
                field.fragment.clone(),
                [field.value.clone()],
            ));
        }
        select
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, EntityTrait, QueryTrait};

    use crate::query::testing::users;

    use super::*;

    fn sql_for(filter: Filter) -> String {
        filter
            .apply(users::Entity::find())
            .build(DbBackend::Postgres)
            .to_string()
    }

    const SELECT: &str =
        r#"SELECT "users"."id", "users"."username", "users"."password", "users"."person_id" FROM "users""#;

    #[test]
    fn fields_apply_in_insertion_order() {
        let sql = sql_for(
            Filter::new()
                .field("username LIKE ?", "batch%")
                .field("password = ?", "123"),
        );
        assert_eq!(
            sql,
            format!("{SELECT} WHERE username LIKE 'batch%' AND password = '123'")
        );
    }

    #[test]
    fn empty_string_field_is_skipped() {
        let sql = sql_for(
            Filter::new()
                .field("username LIKE ?", "")
                .field_with_join(
                    "persons.name = ?",
                    "Jane Doe",
                    Join::inner("persons", "persons.id = users.person_id"),
                ),
        );
        assert_eq!(
            sql,
            format!(
                r#"{SELECT} INNER JOIN "persons" ON persons.id = users.person_id WHERE persons.name = 'Jane Doe'"#
            )
        );
    }

    #[test]
    fn none_value_is_skipped() {
        let sql = sql_for(Filter::new().field("username = ?", Option::<String>::None));
        assert_eq!(sql, SELECT);
    }

    #[test]
    fn typed_null_value_is_skipped() {
        let sql = sql_for(Filter::new().field("person_id = ?", Option::<i32>::None));
        assert_eq!(sql, SELECT);
    }

    #[test]
    fn zero_value_is_kept() {
        let sql = sql_for(Filter::new().field("person_id = ?", 0));
        assert_eq!(sql, format!("{SELECT} WHERE person_id = 0"));
    }

    #[test]
    fn skipped_field_drops_its_join() {
        let sql = sql_for(Filter::new().field_with_join(
            "persons.name = ?",
            "",
            Join::inner("persons", "persons.id = users.person_id"),
        ));
        assert_eq!(sql, SELECT);
    }
}
