use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The number of rows requested per page.
///
/// Only the four sizes offered by the rows-per-page selector are representable,
/// so an invalid page size can never reach a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageSize {
    Fifty,
    #[default]
    Hundred,
    FiveHundred,
    Thousand,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [
        PageSize::Fifty,
        PageSize::Hundred,
        PageSize::FiveHundred,
        PageSize::Thousand,
    ];

    /// The row limit this page size stands for.
    pub fn rows(&self) -> u32 {
        match self {
            PageSize::Fifty => 50,
            PageSize::Hundred => 100,
            PageSize::FiveHundred => 500,
            PageSize::Thousand => 1000,
        }
    }
}

impl TryFrom<u32> for PageSize {
    type Error = CoreError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        PageSize::ALL
            .into_iter()
            .find(|size| size.rows() == value)
            .ok_or_else(|| CoreError::invalid("page size", value))
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.rows()
    }
}

impl FromStr for PageSize {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .trim()
            .parse::<u32>()
            .map_err(|_| CoreError::invalid("page size", s))?;
        PageSize::try_from(rows)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rows())
    }
}

/// One of the six per-attempt columns of a result row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiftColumn {
    Snatch1,
    Snatch2,
    Snatch3,
    CleanJerk1,
    CleanJerk2,
    CleanJerk3,
}

impl LiftColumn {
    /// All attempt columns in table order.
    pub const ALL: [LiftColumn; 6] = [
        LiftColumn::Snatch1,
        LiftColumn::Snatch2,
        LiftColumn::Snatch3,
        LiftColumn::CleanJerk1,
        LiftColumn::CleanJerk2,
        LiftColumn::CleanJerk3,
    ];

    /// The column name in the `lifting_results` table.
    pub const fn column_name(&self) -> &'static str {
        match self {
            LiftColumn::Snatch1 => "snatch1",
            LiftColumn::Snatch2 => "snatch2",
            LiftColumn::Snatch3 => "snatch3",
            LiftColumn::CleanJerk1 => "cj1",
            LiftColumn::CleanJerk2 => "cj2",
            LiftColumn::CleanJerk3 => "cj3",
        }
    }

    /// The header shown above the column.
    pub fn label(&self) -> &'static str {
        match self {
            LiftColumn::Snatch1 => "Snatch 1",
            LiftColumn::Snatch2 => "Snatch 2",
            LiftColumn::Snatch3 => "Snatch 3",
            LiftColumn::CleanJerk1 => "C&J 1",
            LiftColumn::CleanJerk2 => "C&J 2",
            LiftColumn::CleanJerk3 => "C&J 3",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_accepts_only_the_offered_sizes() {
        for rows in [50, 100, 500, 1000] {
            assert_eq!(PageSize::try_from(rows).unwrap().rows(), rows);
        }
        for rows in [0, 1, 49, 99, 250, 1001, u32::MAX] {
            assert_eq!(
                PageSize::try_from(rows),
                Err(CoreError::InvalidParameter {
                    field: "page size",
                    value: rows.to_string(),
                })
            );
        }
    }

    #[test]
    fn page_size_parses_from_text() {
        assert_eq!("500".parse::<PageSize>().unwrap(), PageSize::FiveHundred);
        assert!("abc".parse::<PageSize>().is_err());
        assert!("-50".parse::<PageSize>().is_err());
    }

    #[test]
    fn page_size_defaults_to_one_hundred() {
        assert_eq!(PageSize::default().rows(), 100);
    }

    #[test]
    fn page_size_deserialization_is_validated() {
        let size: PageSize = serde_json::from_str("1000").unwrap();
        assert_eq!(size, PageSize::Thousand);
        assert!(serde_json::from_str::<PageSize>("75").is_err());
        assert_eq!(serde_json::to_string(&PageSize::Fifty).unwrap(), "50");
    }
}
