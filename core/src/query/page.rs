use sea_orm::{EntityTrait, QuerySelect, Select};
use serde::Serialize;

use crate::error::RepoError;

use super::filter::Filter;
use super::sort::{Direction, Order};

/// Pagination, sorting and filtering for a single query.
///
/// Constructed once, immutable thereafter, consumed by one query execution.
/// Page numbers start at 1; page 0 is accepted and reads from the first row
/// as well.
#[derive(Debug, Clone)]
pub struct PageRequest {
    page_number: i64,
    page_size: i64,
    sort_orders: Vec<Order>,
    filter: Option<Filter>,
}

impl PageRequest {
    /// Validates `page_number >= 0`, `page_size >= 1` and
    /// `page_size >= page_number`. The last rule is inherited contract:
    /// callers rely on it, so it is enforced as-is.
    pub fn new(page_number: i64, page_size: i64) -> Result<Self, RepoError> {
        if page_number < 0 {
            return Err(RepoError::InvalidPageNumber(page_number));
        }
        if page_size < 1 {
            return Err(RepoError::InvalidPageSize(page_size));
        }
        if page_size < page_number {
            return Err(RepoError::PageSizeBelowPageNumber {
                page_number,
                page_size,
            });
        }
        Ok(Self {
            page_number,
            page_size,
            sort_orders: Vec::new(),
            filter: None,
        })
    }

    /// Appends a sort order, parsing the direction strictly
    /// (`"asc"`/`"desc"`, case-insensitive).
    pub fn with_sort_order(mut self, column: impl Into<String>, direction: &str) -> Result<Self, RepoError> {
        let order = Order::new(column, Direction::parse(direction)?)?;
        self.sort_orders.push(order);
        Ok(self)
    }

    /// Appends an already validated sort order.
    pub fn with_order(mut self, order: Order) -> Self {
        self.sort_orders.push(order);
        self
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn sort_orders(&self) -> &[Order] {
        &self.sort_orders
    }

    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    /// `(page_number - 1) * page_size`, clamped at zero for page 0 and
    /// saturating instead of overflowing for absurdly deep pages.
    pub fn offset(&self) -> u64 {
        (self.page_number - 1).max(0).saturating_mul(self.page_size) as u64
    }

    pub fn limit(&self) -> u64 {
        self.page_size as u64
    }

    /// Applies offset and limit, then the sort orders, then the filter.
    pub fn paginate<E: EntityTrait>(&self, select: Select<E>) -> Select<E> {
        let mut select = select.offset(self.offset()).limit(self.limit());
        for order in &self.sort_orders {
            select = order.apply(select);
        }
        self.apply_filter(select)
    }

    /// Applies only the filter; used for computing totals, which must ignore
    /// pagination limits and ordering.
    pub fn apply_filter<E: EntityTrait>(&self, select: Select<E>) -> Select<E> {
        match &self.filter {
            Some(filter) => filter.apply(select),
            None => select,
        }
    }
}

/// Page 1, ten elements, sorted by `id` ascending.
impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: 10,
            sort_orders: vec![Order::default()],
            filter: None,
        }
    }
}

/// One page of results: the total row count across all matches (ignoring
/// pagination) and the elements of the current page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub total: u64,
    pub elements: Vec<T>,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            total: 0,
            elements: Vec::new(),
        }
    }
}
