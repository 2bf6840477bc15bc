use crate::report::{LiftSuccessRate, SuccessRateReport};
use core_types::{LiftColumn, ResultRecord};
use rust_decimal::Decimal;

/// A stateless calculator for the success rates shown under the results table.
#[derive(Debug, Default)]
pub struct AggregationEngine {}

impl AggregationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The percentage of `records` with a made lift in `column`.
    ///
    /// Returns a value in `[0, 100]`. An empty slice yields `0` rather than a
    /// division by zero.
    pub fn success_rate(&self, records: &[ResultRecord], column: LiftColumn) -> Decimal {
        self.lift_rate(records, column).rate_pct
    }

    /// Computes the success rate for every attempt column at once.
    pub fn report(&self, records: &[ResultRecord]) -> SuccessRateReport {
        SuccessRateReport {
            lifts: LiftColumn::ALL
                .into_iter()
                .map(|column| self.lift_rate(records, column))
                .collect(),
        }
    }

    fn lift_rate(&self, records: &[ResultRecord], column: LiftColumn) -> LiftSuccessRate {
        let total = records.len();
        let successful = records
            .iter()
            .filter(|record| record.is_made(column))
            .count();

        let rate_pct = if total > 0 {
            (Decimal::from(successful) / Decimal::from(total)) * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        LiftSuccessRate {
            column,
            successful,
            total,
            rate_pct,
        }
    }
}
