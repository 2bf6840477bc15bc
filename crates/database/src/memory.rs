use crate::error::DbError;
use crate::query::{ResultsQuery, ResultsSource};
use async_trait::async_trait;
use core_types::ResultRecord;
use std::path::Path;

/// A `ResultsSource` over a fixed set of records.
///
/// Applies the same semantics as the database: exact name match, first
/// `limit` rows in stored order.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<ResultRecord>,
}

impl InMemorySource {
    pub fn new(records: Vec<ResultRecord>) -> Self {
        Self { records }
    }

    /// Parses a JSON array of result rows.
    pub fn from_json(json: &str) -> Result<Self, DbError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Loads a JSON fixture file (an array of result rows).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let source = Self::from_json(&json)?;
        tracing::info!(
            path = %path.as_ref().display(),
            records = source.records.len(),
            "Loaded results fixture."
        );
        Ok(source)
    }
}

#[async_trait]
impl ResultsSource for InMemorySource {
    async fn select(&self, query: &ResultsQuery) -> Result<Vec<ResultRecord>, DbError> {
        Ok(self
            .records
            .iter()
            .filter(|record| query.matches(record))
            .take(query.limit as usize)
            .cloned()
            .collect())
    }
}
