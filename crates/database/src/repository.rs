use crate::query::{ResultsQuery, ResultsSource, RESULTS_TABLE};
use crate::DbError;
use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::ResultRecord;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPool, Postgres};
use sqlx::{FromRow, QueryBuilder};

/// The `DbRepository` provides the PostgreSQL-backed view of `lifting_results`.
/// It encapsulates all SQL and row mapping.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

/// A row as stored. Every column except `id` and `name` is nullable.
#[derive(Debug, Clone, FromRow)]
struct DbResultRow {
    id: i64,
    name: String,
    meet: Option<String>,
    date: Option<NaiveDate>,
    body_weight: Option<Decimal>,
    snatch1: Option<Decimal>,
    snatch2: Option<Decimal>,
    snatch3: Option<Decimal>,
    cj1: Option<Decimal>,
    cj2: Option<Decimal>,
    cj3: Option<Decimal>,
    total: Option<Decimal>,
}

impl From<DbResultRow> for ResultRecord {
    fn from(row: DbResultRow) -> Self {
        // A NULL attempt means no attempt was recorded.
        ResultRecord {
            id: row.id,
            name: row.name,
            meet: row.meet.unwrap_or_default(),
            date: row.date,
            body_weight: row.body_weight,
            snatch1: row.snatch1.unwrap_or_default(),
            snatch2: row.snatch2.unwrap_or_default(),
            snatch3: row.snatch3.unwrap_or_default(),
            clean_jerk1: row.cj1.unwrap_or_default(),
            clean_jerk2: row.cj2.unwrap_or_default(),
            clean_jerk3: row.cj3.unwrap_or_default(),
            total: row.total,
        }
    }
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds the SQL for `query`. The name filter and limit are bound, never interpolated.
    fn build_select(query: &ResultsQuery) -> QueryBuilder<'_, Postgres> {
        let mut builder = QueryBuilder::new("SELECT ");
        builder.push(query.columns.join(", "));
        builder.push(" FROM ");
        builder.push(RESULTS_TABLE);

        if let Some(name) = &query.name_equals {
            builder.push(" WHERE name = ");
            builder.push_bind(name.as_str());
        }

        builder.push(" LIMIT ");
        builder.push_bind(i64::from(query.limit));
        builder
    }
}

#[async_trait]
impl ResultsSource for DbRepository {
    async fn select(&self, query: &ResultsQuery) -> Result<Vec<ResultRecord>, DbError> {
        let mut builder = Self::build_select(query);
        let rows = builder
            .build_query_as::<DbResultRow>()
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(rows = rows.len(), limit = query.limit, "Fetched lifting results.");
        Ok(rows.into_iter().map(ResultRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::RESULT_COLUMNS;
    use rust_decimal_macros::dec;

    #[test]
    fn select_without_filter_only_limits() {
        let query = ResultsQuery {
            columns: RESULT_COLUMNS,
            name_equals: None,
            limit: 100,
        };
        let builder = DbRepository::build_select(&query);
        assert_eq!(
            builder.sql(),
            "SELECT id, name, meet, date, body_weight, snatch1, snatch2, snatch3, cj1, cj2, cj3, total \
             FROM lifting_results LIMIT $1"
        );
    }

    #[test]
    fn select_with_filter_binds_the_name() {
        let query = ResultsQuery {
            columns: RESULT_COLUMNS,
            name_equals: Some("Jane Doe".to_string()),
            limit: 50,
        };
        let builder = DbRepository::build_select(&query);
        assert!(builder
            .sql()
            .ends_with("FROM lifting_results WHERE name = $1 LIMIT $2"));
        assert!(!builder.sql().contains("Jane Doe"));
    }

    #[test]
    fn null_columns_map_to_empty_attempts() {
        let row = DbResultRow {
            id: 3,
            name: "Jane Doe".to_string(),
            meet: None,
            date: None,
            body_weight: Some(dec!(63.5)),
            snatch1: Some(dec!(80)),
            snatch2: None,
            snatch3: Some(dec!(-85)),
            cj1: None,
            cj2: None,
            cj3: None,
            total: None,
        };
        let record = ResultRecord::from(row);
        assert_eq!(record.meet, "");
        assert_eq!(record.snatch1, dec!(80));
        assert_eq!(record.snatch2, Decimal::ZERO);
        assert_eq!(record.snatch3, dec!(-85));
        assert_eq!(record.clean_jerk1, Decimal::ZERO);
        assert_eq!(record.body_weight, Some(dec!(63.5)));
    }
}
