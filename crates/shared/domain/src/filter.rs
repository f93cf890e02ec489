//! Filter statement types for list queries.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ORDER_BY, MAX_PAGE_BOUND};
use crate::error::{DomainError, DomainResult};

/// Entity-specific filter parameters (parameter name -> textual value)
pub type FilterParams = BTreeMap<String, String>;

/// Sort direction for filter results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDirection::Asc => write!(f, "asc"),
            OrderDirection::Desc => write!(f, "desc"),
        }
    }
}

/// Pagination, ordering and filter parameters for a list query.
///
/// Built once per request and handed by value to the repository; the
/// builder methods consume and return a new statement.
///
/// ```
/// use domain::{FilterStatement, OrderDirection};
///
/// let statement = FilterStatement::default()
///     .with_limit(10)
///     .with_order_by("name", OrderDirection::Desc)
///     .with_param("query", "smith");
///
/// assert_eq!(statement.limit, Some(10));
/// assert_eq!(statement.order_by.as_deref(), Some("name"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterStatement {
    /// Rows to skip before returning results
    #[serde(default)]
    pub offset: Option<u64>,
    /// Maximum number of rows to return
    #[serde(default)]
    pub limit: Option<u64>,
    /// Column to sort on; `None` sorts by identity
    #[serde(default = "default_order_by")]
    pub order_by: Option<String>,
    /// Sort direction
    #[serde(default)]
    pub order_by_direction: OrderDirection,
    /// Entity-specific filter parameters
    #[serde(default)]
    pub extra: Option<FilterParams>,
}

fn default_order_by() -> Option<String> {
    Some(DEFAULT_ORDER_BY.to_string())
}

impl Default for FilterStatement {
    fn default() -> Self {
        Self {
            offset: None,
            limit: None,
            order_by: default_order_by(),
            order_by_direction: OrderDirection::default(),
            extra: None,
        }
    }
}

impl FilterStatement {
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_order_by(mut self, field: impl Into<String>, direction: OrderDirection) -> Self {
        self.order_by = Some(field.into());
        self.order_by_direction = direction;
        self
    }

    /// Add one entity-specific filter parameter
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra
            .get_or_insert_with(FilterParams::new)
            .insert(name.into(), value.into());
        self
    }

    /// Reject pagination values the database cannot bind.
    ///
    /// Offsets and limits travel as signed 64-bit integers, so anything
    /// above [`MAX_PAGE_BOUND`] is an invalid filter.
    pub fn check_bounds(&self) -> DomainResult<()> {
        for (field, value) in [("offset", self.offset), ("limit", self.limit)] {
            if let Some(value) = value.filter(|v| *v > MAX_PAGE_BOUND) {
                return Err(DomainError::invalid_filter(format!(
                    "{} {} exceeds the maximum of {}",
                    field, value, MAX_PAGE_BOUND
                )));
            }
        }
        Ok(())
    }
}
