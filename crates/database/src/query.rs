use crate::error::DbError;
use async_trait::async_trait;
use core_types::{LiftColumn, QueryParameters, ResultRecord};

/// The collection every query reads from.
pub const RESULTS_TABLE: &str = "lifting_results";

/// Every column of `lifting_results`, in table order.
pub const RESULT_COLUMNS: &[&str] = &[
    "id",
    "name",
    "meet",
    "date",
    "body_weight",
    LiftColumn::Snatch1.column_name(),
    LiftColumn::Snatch2.column_name(),
    LiftColumn::Snatch3.column_name(),
    LiftColumn::CleanJerk1.column_name(),
    LiftColumn::CleanJerk2.column_name(),
    LiftColumn::CleanJerk3.column_name(),
    "total",
];

/// A `select` request against the results collection.
///
/// Equivalent to `SELECT <columns> FROM lifting_results [WHERE name = $1] LIMIT $n`.
/// Rows come back in whatever order the store returns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsQuery {
    pub columns: &'static [&'static str],
    /// Exact, case-sensitive match on `name`.
    pub name_equals: Option<String>,
    pub limit: u32,
}

impl ResultsQuery {
    /// Translates the user's search intent into a query.
    pub fn for_parameters(params: &QueryParameters) -> Self {
        Self {
            columns: RESULT_COLUMNS,
            name_equals: params.name().map(str::to_owned),
            limit: params.page_size().rows(),
        }
    }

    /// Whether a record satisfies the filter part of this query.
    pub fn matches(&self, record: &ResultRecord) -> bool {
        self.name_equals
            .as_deref()
            .is_none_or(|name| record.name == name)
    }
}

/// The remote data source capability the rest of the application depends on.
///
/// Implementations must be `Send + Sync` so a single source can be shared by
/// every fetch a session issues.
#[async_trait]
pub trait ResultsSource: Send + Sync {
    /// Runs `query` and returns the matching rows, at most `query.limit` of them.
    async fn select(&self, query: &ResultsQuery) -> Result<Vec<ResultRecord>, DbError>;
}
