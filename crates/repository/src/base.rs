//! Generic repository contract.
//!
//! Implementing [`Repository`] for an entity supplies the entity contract
//! (identity column, input mapping, change application) and optionally the
//! two query extension points. Every CRUD operation then comes for free as a
//! default method.

use async_trait::async_trait;
use sea_orm::sea_query::SimpleExpr;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, EntityTrait, FromQueryResult,
    IntoActiveModel, PaginatorTrait, QueryFilter, QuerySelect, Select, Value,
};
use validator::Validate;

use crate::query::{self, LoadOption};
use crate::session::Session;
use common::{RepoError, RepoResult};
use domain::{DomainError, FilterParams, FilterStatement};

/// Column type of a repository's entity
pub type ColumnOf<R> = <<R as Repository>::Entity as EntityTrait>::Column;

/// CRUD, counting and filtered listing for one entity.
///
/// All operations borrow a caller-owned [`Session`]. Writes commit the
/// session's transaction before returning; reads leave it open.
#[async_trait]
pub trait Repository: Send + Sync {
    type Entity: EntityTrait<Model = Self::Model>;
    type Model: FromQueryResult + IntoActiveModel<Self::ActiveModel> + Clone + Send + Sync;
    type ActiveModel: ActiveModelTrait<Entity = Self::Entity> + ActiveModelBehavior + Send + 'static;
    /// Validated creation shape
    type Input: Validate + Send + 'static;
    /// Struct of optional fields; `None` leaves a column untouched
    type Changes: Send + 'static;

    // =========================================================================
    // Entity contract
    // =========================================================================

    /// Integer identity column
    fn id_column() -> ColumnOf<Self>;

    /// Build a new row from an input shape, field by field.
    fn from_input(input: Self::Input) -> Self::ActiveModel;

    /// Write every `Some` field of `changes` onto `model`.
    fn apply_changes(model: &mut Self::ActiveModel, changes: Self::Changes);

    // =========================================================================
    // Query extension points
    // =========================================================================

    /// Predicates derived from the `extra` parameters of a filter statement.
    fn cond_list(_params: &FilterParams) -> RepoResult<Vec<SimpleExpr>> {
        Ok(Vec::new())
    }

    /// Eager-load hints applied to `read` and `filter`.
    fn load_options() -> Vec<LoadOption<Self::Entity>> {
        Vec::new()
    }

    /// Build, without executing, the list query for `statement`.
    fn filter_select(&self, statement: &FilterStatement) -> RepoResult<Select<Self::Entity>> {
        let conditions = match &statement.extra {
            Some(params) => Self::cond_list(params)?,
            None => Vec::new(),
        };

        query::compose_filter_select(
            statement,
            Self::id_column(),
            conditions,
            &Self::load_options(),
        )
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Validate `input`, insert it with `extra` server-set fields overlaid,
    /// commit, and return the stored row with its identity.
    async fn create(
        &self,
        session: &mut Session,
        input: Self::Input,
        extra: Option<Self::Changes>,
    ) -> RepoResult<Self::Model> {
        input.validate().map_err(DomainError::from)?;

        let mut active = Self::from_input(input);
        if let Some(extra) = extra {
            Self::apply_changes(&mut active, extra);
        }

        let model = active.insert(session.transaction().await?).await?;
        session.commit().await?;

        tracing::debug!(table = %query::table_name::<Self::Entity>(), "Row created");
        Ok(model)
    }

    /// Look up the single row where `field` (identity by default) equals
    /// `value` and every extra condition holds.
    ///
    /// Returns `Ok(None)` when nothing matches and
    /// [`RepoError::MultipleResults`] when more than one row does.
    async fn read<V>(
        &self,
        session: &mut Session,
        value: V,
        field: Option<ColumnOf<Self>>,
        extra_conditions: Vec<SimpleExpr>,
    ) -> RepoResult<Option<Self::Model>>
    where
        V: Into<Value> + Send,
    {
        let column = field.unwrap_or_else(Self::id_column);

        let mut select = Self::Entity::find().filter(column.eq(value));
        if !extra_conditions.is_empty() {
            select = select.filter(query::all_of(extra_conditions));
        }
        let select = query::apply_options(select, &Self::load_options()).limit(2);

        let mut rows = select.all(session.transaction().await?).await?;
        if rows.len() > 1 {
            let table = query::table_name::<Self::Entity>();
            return Err(RepoError::multiple_results(table));
        }

        Ok(rows.pop())
    }

    /// Look up a row by identity.
    async fn get(&self, session: &mut Session, id: i32) -> RepoResult<Option<Self::Model>> {
        self.read(session, id, None, Vec::new()).await
    }

    /// Apply `changes` to the row with identity `id` and commit.
    ///
    /// `None` fields are skipped, so a field can never be cleared through
    /// this path. A change set with nothing to write returns the row as is.
    async fn update(
        &self,
        session: &mut Session,
        id: i32,
        changes: Self::Changes,
    ) -> RepoResult<Option<Self::Model>> {
        let Some(model) = self.get(session, id).await? else {
            return Ok(None);
        };

        let mut active: Self::ActiveModel = model.clone().into_active_model();
        Self::apply_changes(&mut active, changes);

        if !active.is_changed() {
            session.commit().await?;
            return Ok(Some(model));
        }

        let model = active.update(session.transaction().await?).await?;
        session.commit().await?;

        tracing::debug!(table = %query::table_name::<Self::Entity>(), id, "Row updated");
        Ok(Some(model))
    }

    /// Delete the row with identity `id`, commit, and return its last state.
    async fn delete(&self, session: &mut Session, id: i32) -> RepoResult<Option<Self::Model>> {
        let Some(model) = self.get(session, id).await? else {
            return Ok(None);
        };

        let active: Self::ActiveModel = model.clone().into_active_model();
        let result = active.delete(session.transaction().await?).await?;
        session.commit().await?;

        tracing::debug!(
            table = %query::table_name::<Self::Entity>(),
            id,
            rows_affected = result.rows_affected,
            "Row deleted"
        );
        Ok(Some(model))
    }

    /// Count all rows, unfiltered.
    async fn count(&self, session: &mut Session) -> RepoResult<u64> {
        let total = Self::Entity::find()
            .count(session.transaction().await?)
            .await?;
        Ok(total)
    }

    /// Run the list query for `statement` and materialize every row.
    async fn filter(
        &self,
        session: &mut Session,
        statement: FilterStatement,
    ) -> RepoResult<Vec<Self::Model>> {
        let select = self.filter_select(&statement)?;
        let rows = select.all(session.transaction().await?).await?;

        tracing::debug!(
            table = %query::table_name::<Self::Entity>(),
            order_by = ?statement.order_by,
            direction = %statement.order_by_direction,
            rows = rows.len(),
            "Rows listed"
        );
        Ok(rows)
    }
}
