use analytics::{AggregationEngine, SuccessRateReport};
use core_types::{LiftColumn, QueryParameters, ResultRecord};
use rust_decimal::Decimal;
use serde::Serialize;

/// What the results table is currently showing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewState {
    Loading,
    Loaded { records: Vec<ResultRecord> },
    Failed { message: String },
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    /// The loaded rows, or `None` while loading or after a failure.
    pub fn records(&self) -> Option<&[ResultRecord]> {
        match self {
            ViewState::Loaded { records } => Some(records),
            _ => None,
        }
    }
}

/// A consistent view of the session: the state together with the fetch it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSnapshot {
    /// Increments every time a fetch is issued.
    pub generation: u64,
    /// The parameters of the latest fetch; `None` before the first one.
    pub parameters: Option<QueryParameters>,
    pub state: ViewState,
}

impl ViewSnapshot {
    pub(crate) fn initial() -> Self {
        Self {
            generation: 0,
            parameters: None,
            state: ViewState::Loading,
        }
    }

    /// Success rates for every attempt column over the loaded rows.
    ///
    /// Recomputed on each call. `None` unless the state is `Loaded`.
    pub fn success_rates(&self) -> Option<SuccessRateReport> {
        self.state
            .records()
            .map(|records| AggregationEngine::new().report(records))
    }

    /// The success rate for one column; zero unless rows are loaded.
    pub fn success_rate(&self, column: LiftColumn) -> Decimal {
        self.state
            .records()
            .map(|records| AggregationEngine::new().success_rate(records, column))
            .unwrap_or(Decimal::ZERO)
    }
}
