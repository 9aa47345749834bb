//! PostgreSQL-backed creature repository.
//!
//! The list path builds one boxed query from the caller's filter, runs
//! the filtered count and the windowed fetch inside a single
//! transaction so both observe the same MVCC snapshot, and converts
//! rows back through the domain's validating constructor.

use async_trait::async_trait;
use chrono::Utc;
use diesel::dsl::sql;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Text};
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};
use pagination::PageRequest;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{CreaturePage, CreaturePersistenceError, CreatureRepository};
use crate::domain::{
    Creature, CreatureDraft, CreatureFilter, CreaturePatch, Sort, SortField, SortOrder,
};

use super::models::{CreatureChangeset, CreatureRow, NewCreatureRow};
use super::pool::{DbPool, PoolError};
use super::schema::creatures;

/// Partial unique index guarding non-null pokedex numbers; must match
/// the migration.
const POKEDEX_NUMBER_INDEX: &str = "creatures_pokedex_number_idx";

/// Diesel-backed implementation of the creature persistence port.
#[derive(Clone)]
pub struct DieselCreatureRepository {
    pool: DbPool,
}

impl DieselCreatureRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CreaturePersistenceError {
    CreaturePersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> CreaturePersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(%other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CreaturePersistenceError::connection("database connection error")
        }
        other => CreaturePersistenceError::query(other.to_string()),
    }
}

/// Insert-specific mapping: a unique violation on the pokedex index
/// becomes the dedicated duplicate variant carrying the offending
/// number.
fn map_insert_error(
    error: diesel::result::Error,
    pokedex_number: Option<i32>,
) -> CreaturePersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &error
        && info.constraint_name() == Some(POKEDEX_NUMBER_INDEX)
        && let Some(number) = pokedex_number
    {
        return CreaturePersistenceError::DuplicatePokedexNumber { number };
    }
    map_diesel_error(error)
}

fn row_to_creature(row: CreatureRow) -> Result<Creature, CreaturePersistenceError> {
    let draft = CreatureDraft {
        pokedex_number: row.pokedex_number,
        name: row.name,
        height: row.height,
        weight: row.weight,
        image_url: row.image_url,
        types: row.types,
        weaknesses: row.weaknesses,
        abilities: row.abilities,
        category: row.category,
        description: row.description,
    };
    Creature::from_store(row.id, draft, row.created_at, row.updated_at)
        .map_err(|err| CreaturePersistenceError::query(format!("stored row is invalid: {err}")))
}

type BoxedCreatureQuery = creatures::BoxedQuery<'static, Pg>;

/// Translate a filter into a boxed query over the creatures table.
///
/// Pure with respect to the connection, so the generated SQL can be
/// asserted with `diesel::debug_query` in unit tests.
fn filtered(filter: &CreatureFilter) -> BoxedCreatureQuery {
    let mut query = creatures::table.into_boxed();
    if let Some(name) = &filter.name {
        query = query.filter(creatures::name.ilike(format!("%{name}%")));
    }
    if let Some(min_height) = filter.min_height {
        query = query.filter(creatures::height.ge(min_height));
    }
    if let Some(max_height) = filter.max_height {
        query = query.filter(creatures::height.le(max_height));
    }
    if let Some(min_weight) = filter.min_weight {
        query = query.filter(creatures::weight.ge(min_weight));
    }
    if let Some(max_weight) = filter.max_weight {
        query = query.filter(creatures::weight.le(max_weight));
    }
    if let Some(kind) = &filter.kind {
        // Case-insensitive substring match against any element of the
        // types array; diesel has no native unnest support.
        query = query.filter(
            sql::<Bool>("EXISTS (SELECT 1 FROM unnest(types) AS t(value) WHERE t.value ILIKE ")
                .bind::<Text, _>(format!("%{kind}%"))
                .sql(")"),
        );
    }
    query
}

/// Apply the requested ordering with the primary key as tie-breaker so
/// paging stays stable across equal sort values.
fn sorted(query: BoxedCreatureQuery, sort: Sort) -> BoxedCreatureQuery {
    match (sort.field, sort.order) {
        (SortField::Name, SortOrder::Asc) => query.order_by(creatures::name.asc()),
        (SortField::Name, SortOrder::Desc) => query.order_by(creatures::name.desc()),
        (SortField::Height, SortOrder::Asc) => query.order_by(creatures::height.asc()),
        (SortField::Height, SortOrder::Desc) => query.order_by(creatures::height.desc()),
        (SortField::Weight, SortOrder::Asc) => query.order_by(creatures::weight.asc()),
        (SortField::Weight, SortOrder::Desc) => query.order_by(creatures::weight.desc()),
    }
    .then_order_by(creatures::id.asc())
}

#[async_trait]
impl CreatureRepository for DieselCreatureRepository {
    async fn list(
        &self,
        filter: &CreatureFilter,
        sort: Sort,
        page: PageRequest,
    ) -> Result<CreaturePage, CreaturePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (total, rows) = conn
            .transaction(|conn| {
                async move {
                    let total: i64 = filtered(filter).count().get_result(conn).await?;
                    let rows: Vec<CreatureRow> = sorted(filtered(filter), sort)
                        .select(CreatureRow::as_select())
                        .offset(page.offset())
                        .limit(page.limit())
                        .load(conn)
                        .await?;
                    Ok((total, rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let items = rows
            .into_iter()
            .map(row_to_creature)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CreaturePage {
            items,
            total_count: u64::try_from(total).unwrap_or(0),
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Creature>, CreaturePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CreatureRow> = creatures::table
            .filter(creatures::id.eq(id))
            .select(CreatureRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_creature).transpose()
    }

    async fn find_by_pokedex_number(
        &self,
        number: i32,
    ) -> Result<Option<Creature>, CreaturePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CreatureRow> = creatures::table
            .filter(creatures::pokedex_number.eq(number))
            .select(CreatureRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_creature).transpose()
    }

    async fn insert(&self, draft: CreatureDraft) -> Result<Creature, CreaturePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewCreatureRow {
            id: Uuid::new_v4(),
            pokedex_number: draft.pokedex_number,
            name: &draft.name,
            height: draft.height,
            weight: draft.weight,
            image_url: draft.image_url.as_deref(),
            types: &draft.types,
            weaknesses: &draft.weaknesses,
            abilities: &draft.abilities,
            category: draft.category.as_deref(),
            description: draft.description.as_deref(),
        };
        let inserted: CreatureRow = diesel::insert_into(creatures::table)
            .values(&new_row)
            .returning(CreatureRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_insert_error(err, draft.pokedex_number))?;
        row_to_creature(inserted)
    }

    async fn update(
        &self,
        id: Uuid,
        patch: CreaturePatch,
    ) -> Result<Option<Creature>, CreaturePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = CreatureChangeset {
            name: patch.name,
            height: patch.height,
            weight: patch.weight,
            image_url: patch.image_url,
            types: patch.types,
            weaknesses: patch.weaknesses,
            abilities: patch.abilities,
            category: patch.category,
            description: patch.description,
            updated_at: Utc::now(),
        };
        let updated: Option<CreatureRow> =
            diesel::update(creatures::table.filter(creatures::id.eq(id)))
                .set(&changeset)
                .returning(CreatureRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;
        updated.map(row_to_creature).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, CreaturePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(creatures::table.filter(creatures::id.eq(id)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    //! SQL generation coverage for the filter and sort builders; no
    //! database is required because the builders are connection-free.
    use super::*;
    use rstest::rstest;

    fn sql_for_filter(filter: &CreatureFilter) -> String {
        diesel::debug_query::<Pg, _>(&filtered(filter)).to_string()
    }

    fn sql_for_sort(sort: Sort) -> String {
        diesel::debug_query::<Pg, _>(&sorted(filtered(&CreatureFilter::default()), sort))
            .to_string()
    }

    #[rstest]
    fn unconstrained_filter_has_no_where_clause() {
        let sql = sql_for_filter(&CreatureFilter::default());
        assert!(!sql.contains("WHERE"), "unexpected predicate in: {sql}");
    }

    #[rstest]
    fn name_filter_is_a_case_insensitive_substring_match() {
        let filter = CreatureFilter {
            name: Some("pika".to_owned()),
            ..CreatureFilter::default()
        };
        let sql = sql_for_filter(&filter);
        assert!(sql.contains("\"creatures\".\"name\" ILIKE"), "missing ILIKE in: {sql}");
        assert!(sql.contains("%pika%"), "missing pattern bind in: {sql}");
    }

    #[rstest]
    fn height_and_weight_bounds_are_inclusive() {
        let filter = CreatureFilter {
            min_height: Some(10),
            max_height: Some(50),
            min_weight: Some(5),
            max_weight: Some(90),
            ..CreatureFilter::default()
        };
        let sql = sql_for_filter(&filter);
        assert!(sql.contains("\"creatures\".\"height\" >="), "missing height lower bound: {sql}");
        assert!(sql.contains("\"creatures\".\"height\" <="), "missing height upper bound: {sql}");
        assert!(sql.contains("\"creatures\".\"weight\" >="), "missing weight lower bound: {sql}");
        assert!(sql.contains("\"creatures\".\"weight\" <="), "missing weight upper bound: {sql}");
    }

    #[rstest]
    fn kind_filter_matches_any_element_of_the_types_array() {
        let filter = CreatureFilter {
            kind: Some("electric".to_owned()),
            ..CreatureFilter::default()
        };
        let sql = sql_for_filter(&filter);
        assert!(sql.contains("unnest(types)"), "missing unnest in: {sql}");
        assert!(sql.contains("%electric%"), "missing pattern bind in: {sql}");
    }

    #[rstest]
    fn combined_filters_are_conjoined() {
        let filter = CreatureFilter {
            name: Some("chu".to_owned()),
            min_height: Some(3),
            kind: Some("electric".to_owned()),
            ..CreatureFilter::default()
        };
        let sql = sql_for_filter(&filter);
        assert!(sql.contains(" AND "), "filters must be conjoined: {sql}");
    }

    #[rstest]
    #[case(SortField::Name, SortOrder::Asc, "\"creatures\".\"name\" ASC")]
    #[case(SortField::Name, SortOrder::Desc, "\"creatures\".\"name\" DESC")]
    #[case(SortField::Height, SortOrder::Asc, "\"creatures\".\"height\" ASC")]
    #[case(SortField::Height, SortOrder::Desc, "\"creatures\".\"height\" DESC")]
    #[case(SortField::Weight, SortOrder::Asc, "\"creatures\".\"weight\" ASC")]
    #[case(SortField::Weight, SortOrder::Desc, "\"creatures\".\"weight\" DESC")]
    fn sort_orders_by_the_requested_column(
        #[case] field: SortField,
        #[case] order: SortOrder,
        #[case] expected: &str,
    ) {
        let sql = sql_for_sort(Sort { field, order });
        assert!(sql.contains(expected), "missing `{expected}` in: {sql}");
        // Tie-breaker keeps windows disjoint across equal sort values.
        assert!(sql.contains("\"creatures\".\"id\" ASC"), "missing tie-breaker in: {sql}");
    }
}
