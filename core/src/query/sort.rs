use std::fmt;

use sea_orm::sea_query::Expr;
use sea_orm::{EntityTrait, QueryOrder, Select};

use crate::error::RepoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    /// Strict parse: case-insensitive `"asc"` or `"desc"`, anything else is
    /// rejected.
    pub fn parse(input: &str) -> Result<Self, RepoError> {
        if input.eq_ignore_ascii_case("asc") {
            Ok(Self::Ascending)
        } else if input.eq_ignore_ascii_case("desc") {
            Ok(Self::Descending)
        } else {
            Err(RepoError::InvalidSortDirection(input.to_owned()))
        }
    }

    /// Lenient parse for untrusted input: anything that is not
    /// case-insensitively `"desc"` sorts ascending.
    pub fn from_str_or_asc(input: &str) -> Self {
        if input.eq_ignore_ascii_case("desc") {
            Self::Descending
        } else {
            Self::Ascending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Direction> for sea_orm::Order {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Ascending => sea_orm::Order::Asc,
            Direction::Descending => sea_orm::Order::Desc,
        }
    }
}

/// A validated (column, direction) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    column: String,
    direction: Direction,
}

impl Order {
    pub fn new(column: impl Into<String>, direction: Direction) -> Result<Self, RepoError> {
        let column = column.into();
        if column.is_empty() {
            return Err(RepoError::EmptySortColumn);
        }
        Ok(Self { column, direction })
    }

    pub fn asc(column: impl Into<String>) -> Result<Self, RepoError> {
        Self::new(column, Direction::Ascending)
    }

    pub fn desc(column: impl Into<String>) -> Result<Self, RepoError> {
        Self::new(column, Direction::Descending)
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn apply<E: EntityTrait>(&self, select: Select<E>) -> Select<E> {
        select.order_by(Expr::cust(self.column.as_str()), self.direction.into())
    }
}

/// Sorting by `id` ascending, the ordering used by the default page request.
impl Default for Order {
    fn default() -> Self {
        Self {
            column: "id".to_owned(),
            direction: Direction::Ascending,
        }
    }
}
