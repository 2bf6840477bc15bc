use crate::enums::{LiftColumn, PageSize};
use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// One athlete's performance at one meet, as stored in `lifting_results`.
///
/// Each attempt is a signed weight: a positive value is a made lift, zero or a
/// negative value is a miss. A missing attempt is read as `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub meet: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub body_weight: Option<Decimal>,

    #[serde(default, deserialize_with = "attempt_or_zero")]
    pub snatch1: Decimal,
    #[serde(default, deserialize_with = "attempt_or_zero")]
    pub snatch2: Decimal,
    #[serde(default, deserialize_with = "attempt_or_zero")]
    pub snatch3: Decimal,
    #[serde(rename = "cj1", alias = "clean_jerk1", default, deserialize_with = "attempt_or_zero")]
    pub clean_jerk1: Decimal,
    #[serde(rename = "cj2", alias = "clean_jerk2", default, deserialize_with = "attempt_or_zero")]
    pub clean_jerk2: Decimal,
    #[serde(rename = "cj3", alias = "clean_jerk3", default, deserialize_with = "attempt_or_zero")]
    pub clean_jerk3: Decimal,

    /// Computed by the backend; never recomputed here.
    #[serde(default)]
    pub total: Option<Decimal>,
}

impl ResultRecord {
    /// Returns the recorded weight for one attempt column.
    pub fn attempt(&self, column: LiftColumn) -> Decimal {
        match column {
            LiftColumn::Snatch1 => self.snatch1,
            LiftColumn::Snatch2 => self.snatch2,
            LiftColumn::Snatch3 => self.snatch3,
            LiftColumn::CleanJerk1 => self.clean_jerk1,
            LiftColumn::CleanJerk2 => self.clean_jerk2,
            LiftColumn::CleanJerk3 => self.clean_jerk3,
        }
    }

    /// Whether the attempt in `column` was a made lift.
    pub fn is_made(&self, column: LiftColumn) -> bool {
        self.attempt(column) > Decimal::ZERO
    }
}

fn attempt_or_zero<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Decimal>::deserialize(deserializer)?.unwrap_or_default())
}

/// An immutable snapshot of what the user asked to see.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct QueryParameters {
    name_filter: String,
    page_size: PageSize,
}

impl QueryParameters {
    pub fn new(name_filter: impl Into<String>, page_size: PageSize) -> Self {
        Self {
            name_filter: name_filter.into(),
            page_size,
        }
    }

    /// Builds parameters from raw user input, rejecting unknown page sizes.
    pub fn parse(name_filter: &str, page_size: &str) -> Result<Self, CoreError> {
        Ok(Self::new(name_filter, page_size.parse()?))
    }

    /// The exact athlete name to match. Empty means no filter.
    pub fn name_filter(&self) -> &str {
        &self.name_filter
    }

    /// The name filter, or `None` when every athlete is wanted.
    pub fn name(&self) -> Option<&str> {
        if self.name_filter.is_empty() {
            None
        } else {
            Some(&self.name_filter)
        }
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn with_name_filter(&self, name_filter: impl Into<String>) -> Self {
        Self::new(name_filter, self.page_size)
    }

    pub fn with_page_size(&self, page_size: PageSize) -> Self {
        Self::new(self.name_filter.clone(), page_size)
    }
}
