use crate::error::FetchError;
use core_types::{QueryParameters, ResultRecord};
use database::{ResultsQuery, ResultsSource};
use std::sync::Arc;

/// Runs one page of the results query against the injected source.
#[derive(Clone)]
pub struct ResultsFetcher {
    source: Arc<dyn ResultsSource>,
}

impl ResultsFetcher {
    pub fn new(source: Arc<dyn ResultsSource>) -> Self {
        Self { source }
    }

    /// Fetches the rows described by `params`, in the order the source returns them.
    ///
    /// Any source failure is logged and reported as `FetchError::load_failed()`.
    pub async fn fetch(&self, params: &QueryParameters) -> Result<Vec<ResultRecord>, FetchError> {
        let query = ResultsQuery::for_parameters(params);

        match self.source.select(&query).await {
            Ok(records) => {
                tracing::info!(
                    name_filter = params.name_filter(),
                    page_size = %params.page_size(),
                    rows = records.len(),
                    "Loaded lifting results."
                );
                Ok(records)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    name_filter = params.name_filter(),
                    page_size = %params.page_size(),
                    "Failed to load lifting results."
                );
                Err(FetchError::load_failed())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LOAD_FAILED_MESSAGE;
    use async_trait::async_trait;
    use core_types::PageSize;
    use database::{DbError, InMemorySource};
    use std::sync::Mutex;

    /// Records every query it receives and answers with nothing.
    #[derive(Default)]
    struct RecordingSource {
        queries: Mutex<Vec<ResultsQuery>>,
    }

    #[async_trait]
    impl ResultsSource for RecordingSource {
        async fn select(&self, query: &ResultsQuery) -> Result<Vec<ResultRecord>, DbError> {
            self.queries.lock().unwrap().push(query.clone());
            Ok(Vec::new())
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl ResultsSource for BrokenSource {
        async fn select(&self, _query: &ResultsQuery) -> Result<Vec<ResultRecord>, DbError> {
            Err(DbError::Unavailable("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn fetch_translates_parameters_into_a_query() {
        let source = Arc::new(RecordingSource::default());
        let fetcher = ResultsFetcher::new(source.clone());

        fetcher
            .fetch(&QueryParameters::new("Jane Doe", PageSize::FiveHundred))
            .await
            .unwrap();
        fetcher
            .fetch(&QueryParameters::new("", PageSize::Fifty))
            .await
            .unwrap();

        let queries = source.queries.lock().unwrap();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].name_equals.as_deref(), Some("Jane Doe"));
        assert_eq!(queries[0].limit, 500);
        assert_eq!(queries[1].name_equals, None);
        assert_eq!(queries[1].limit, 50);
    }

    #[tokio::test]
    async fn source_failure_becomes_a_user_facing_error() {
        let fetcher = ResultsFetcher::new(Arc::new(BrokenSource));
        let err = fetcher
            .fetch(&QueryParameters::default())
            .await
            .unwrap_err();
        assert_eq!(err.message, LOAD_FAILED_MESSAGE);
        assert!(!err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn fetch_keeps_source_order() {
        let source = InMemorySource::from_json(
            r#"[{"id": 9, "name": "B"}, {"id": 2, "name": "A"}, {"id": 5, "name": "C"}]"#,
        )
        .unwrap();
        let fetcher = ResultsFetcher::new(Arc::new(source));
        let ids: Vec<_> = fetcher
            .fetch(&QueryParameters::default())
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![9, 2, 5]);
    }
}
