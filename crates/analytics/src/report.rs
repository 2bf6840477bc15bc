use core_types::LiftColumn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The success rate of a single attempt column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftSuccessRate {
    pub column: LiftColumn,
    /// Rows with a positive weight in this column.
    pub successful: usize,
    /// Rows considered, including misses and empty attempts.
    pub total: usize,
    /// `successful / total` as a percentage in `[0, 100]`; `0` when `total` is zero.
    pub rate_pct: Decimal,
}

/// The "Successful Lift %" row: one entry per attempt column, in table order.
///
/// This is the output of `AggregationEngine::report` and is what the presentation
/// layer shows below the results table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessRateReport {
    pub lifts: Vec<LiftSuccessRate>,
}

impl SuccessRateReport {
    /// The rate for `column`, or zero if it was not part of the report.
    pub fn rate(&self, column: LiftColumn) -> Decimal {
        self.lifts
            .iter()
            .find(|lift| lift.column == column)
            .map(|lift| lift.rate_pct)
            .unwrap_or(Decimal::ZERO)
    }
}
