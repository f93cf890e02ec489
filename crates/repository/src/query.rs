//! Query construction shared by every repository.
//!
//! These helpers turn a [`FilterStatement`] plus an entity's condition list
//! and load options into a sea-orm [`Select`].

use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, EntityName, EntityTrait, IdenStatic, Iterable, QueryFilter, QueryOrder,
    QuerySelect, Select,
};

use common::{RepoError, RepoResult};
use domain::{
    FilterParams, FilterStatement, OrderDirection, MAX_PAGE_BOUND, NEGATION_MARKER, QUERY_PARAM,
};

/// Eager-load hint: a transformation applied to every `read` and `filter`
/// select of an entity (joins, extra columns and the like).
pub type LoadOption<E> = fn(Select<E>) -> Select<E>;

/// Equality predicate with textual negation.
///
/// A value starting with `!` yields `column <> rest`, anything else
/// `column = value`. Only the first marker is stripped and the remainder is
/// compared verbatim, so there is no way to match a value that itself
/// begins with `!`.
pub fn binary_cond<C: ColumnTrait>(column: C, value: &str) -> SimpleExpr {
    match value.strip_prefix(NEGATION_MARKER) {
        Some(rest) => column.ne(rest),
        None => column.eq(value),
    }
}

/// Case-insensitive substring match on a name column, driven by the
/// `query` filter parameter. Returns `None` when the parameter is absent.
pub fn name_query_cond<E: EntityTrait>(
    column: E::Column,
    params: &FilterParams,
) -> Option<SimpleExpr> {
    let query = params.get(QUERY_PARAM)?;
    let pattern = format!("%{}%", query.to_lowercase());

    Some(Expr::expr(Func::lower(Expr::col((E::default(), column)))).like(pattern))
}

/// Table name of an entity, for errors and logs.
pub fn table_name<E: EntityName>() -> String {
    E::default().table_name().to_string()
}

/// Resolve the column to sort on. `None` means the identity column;
/// names are matched case-insensitively and unknown names are rejected.
pub fn order_column<E: EntityTrait>(
    field_name: Option<&str>,
    id_column: E::Column,
) -> RepoResult<E::Column> {
    let Some(name) = field_name else {
        return Ok(id_column);
    };

    let wanted = name.to_lowercase();
    E::Column::iter()
        .find(|column| column.as_str() == wanted)
        .ok_or_else(|| {
            RepoError::configuration(format!(
                "unknown order_by field '{}' for table {}",
                name,
                table_name::<E>()
            ))
        })
}

/// AND together a condition list.
pub fn all_of(conditions: Vec<SimpleExpr>) -> Condition {
    conditions
        .into_iter()
        .fold(Condition::all(), |condition, expr| condition.add(expr))
}

/// Apply load options in order.
pub fn apply_options<E: EntityTrait>(select: Select<E>, options: &[LoadOption<E>]) -> Select<E> {
    options.iter().fold(select, |select, option| option(select))
}

/// Build the list query for `statement`.
///
/// Composition order: ordering, conditions, load options, offset, limit.
/// An offset without a limit gets an unbounded limit, since SQLite rejects
/// a bare `OFFSET`.
pub fn compose_filter_select<E: EntityTrait>(
    statement: &FilterStatement,
    id_column: E::Column,
    conditions: Vec<SimpleExpr>,
    options: &[LoadOption<E>],
) -> RepoResult<Select<E>> {
    statement.check_bounds()?;
    let column = order_column::<E>(statement.order_by.as_deref(), id_column)?;

    let mut select = match statement.order_by_direction {
        OrderDirection::Asc => E::find().order_by_asc(column),
        OrderDirection::Desc => E::find().order_by_desc(column),
    };

    if !conditions.is_empty() {
        select = select.filter(all_of(conditions));
    }
    select = apply_options(select, options);
    if let Some(offset) = statement.offset {
        select = select.offset(offset);
    }
    match (statement.offset, statement.limit) {
        (_, Some(limit)) => select = select.limit(limit),
        (Some(_), None) => select = select.limit(MAX_PAGE_BOUND),
        (None, None) => {}
    }

    Ok(select)
}
