use sea_orm::sea_query::{Alias, Expr, JoinType};
use sea_orm::{Condition as QueryCondition, EntityTrait, QueryFilter, QueryTrait, Select};

use super::condition::Condition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

impl From<JoinKind> for JoinType {
    fn from(kind: JoinKind) -> Self {
        match kind {
            JoinKind::Inner => JoinType::InnerJoin,
            JoinKind::Left => JoinType::LeftJoin,
        }
    }
}

/// An explicit join clause attached to a [`Where`] or a
/// [`Filter`](super::filter::Filter) field: the joined table plus the raw ON
/// fragment. The fragment is passed through to the query verbatim.
#[derive(Debug, Clone)]
pub struct Join {
    kind: JoinKind,
    table: String,
    on: String,
}

impl Join {
    pub fn inner(table: impl Into<String>, on: impl Into<String>) -> Self {
        Self {
            kind: JoinKind::Inner,
            table: table.into(),
            on: on.into(),
        }
    }

    pub fn left(table: impl Into<String>, on: impl Into<String>) -> Self {
        Self {
            kind: JoinKind::Left,
            table: table.into(),
            on: on.into(),
        }
    }

    pub(crate) fn apply<E: EntityTrait>(&self, mut select: Select<E>) -> Select<E> {
        QueryTrait::query(&mut select).join(
            self.kind.into(),
            Alias::new(self.table.as_str()),
            Expr::cust(self.on.as_str()),
        );
        select
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    And,
    Or,
}

/// An ordered set of conditions plus join clauses.
///
/// The first condition carries no combinator; every later one is appended
/// with [`Where::and`] or [`Where::or`]. The builder is consuming, so a bound
/// `Where` is immutable. Combinators fold left to right:
/// `a.or(b).and(c)` means `(a OR b) AND c`.
#[derive(Debug, Clone)]
pub struct Where {
    first: Condition,
    rest: Vec<(Combinator, Condition)>,
    joins: Vec<Join>,
}

impl Where {
    pub fn new(condition: Condition) -> Self {
        Self {
            first: condition,
            rest: Vec::new(),
            joins: Vec::new(),
        }
    }

    pub fn and(mut self, condition: Condition) -> Self {
        self.rest.push((Combinator::And, condition));
        self
    }

    pub fn or(mut self, condition: Condition) -> Self {
        self.rest.push((Combinator::Or, condition));
        self
    }

    pub fn join(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    pub fn has_joins(&self) -> bool {
        !self.joins.is_empty()
    }

    pub(crate) fn to_condition(&self) -> QueryCondition {
        let mut cond = QueryCondition::all().add(self.first.to_expr());
        let mut any_group = false;
        for (combinator, condition) in &self.rest {
            let expr = condition.to_expr();
            match combinator {
                Combinator::And if any_group => {
                    cond = QueryCondition::all().add(cond).add(expr);
                    any_group = false;
                }
                Combinator::And => cond = cond.add(expr),
                Combinator::Or if any_group => cond = cond.add(expr),
                Combinator::Or => {
                    cond = QueryCondition::any().add(cond).add(expr);
                    any_group = true;
                }
            }
        }
        cond
    }

    /// Applies joins first, then the folded conditions.
    pub(crate) fn apply<E: EntityTrait>(&self, mut select: Select<E>) -> Select<E> {
        for join in &self.joins {
            select = join.apply(select);
        }
        select.filter(self.to_condition())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, EntityTrait, QueryTrait};

    use crate::query::testing::users;

    use super::*;

    fn sql_for(where_clause: Where) -> String {
        where_clause
            .apply(users::Entity::find())
            .build(DbBackend::Postgres)
            .to_string()
    }

    const SELECT: &str =
        r#"SELECT "users"."id", "users"."username", "users"."password", "users"."person_id" FROM "users""#;

    #[test]
    fn single_condition() {
        let sql = sql_for(Where::new(Condition::equal("username", "jdoe")));
        assert_eq!(sql, format!("{SELECT} WHERE username = 'jdoe'"));
    }

    #[test]
    fn and_chains_conditions() {
        let sql = sql_for(
            Where::new(Condition::like("username", "batch%"))
                .and(Condition::is_in("id", "1,2,3")),
        );
        assert_eq!(
            sql,
            format!("{SELECT} WHERE username LIKE 'batch%' AND id IN ('1', '2', '3')")
        );
    }

    #[test]
    fn or_after_and_groups_left_to_right() {
        let sql = sql_for(
            Where::new(Condition::equal("password", "123"))
                .or(Condition::equal("password", "1234"))
                .and(Condition::equal("username", "jdoe")),
        );
        assert_eq!(
            sql,
            format!(
                "{SELECT} WHERE (password = '123' OR password = '1234') AND username = 'jdoe'"
            )
        );
    }

    #[test]
    fn join_applied_before_conditions() {
        let sql = sql_for(
            Where::new(Condition::equal("persons.name", "Jane Doe"))
                .join(Join::inner("persons", "persons.id = users.person_id")),
        );
        assert_eq!(
            sql,
            format!(
                r#"{SELECT} INNER JOIN "persons" ON persons.id = users.person_id WHERE persons.name = 'Jane Doe'"#
            )
        );
    }
}
