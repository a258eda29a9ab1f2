use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::TableError;

/// Canonical, locale-independent column identifiers, in display order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ColumnName {
    Query,
    FetchedRows,
    AffectedRows,
    ChangedRows,
    SuccessCount,
    SuccessMillisecondsAverage,
    SuccessMillisecondsTotal,
    ErrorCount,
    ErrorMillisecondsAverage,
    ErrorMillisecondsTotal,
}

impl ColumnName {
    /// Every column in the order cells are laid out in a row.
    pub const ALL: [ColumnName; 10] = [
        ColumnName::Query,
        ColumnName::FetchedRows,
        ColumnName::AffectedRows,
        ColumnName::ChangedRows,
        ColumnName::SuccessCount,
        ColumnName::SuccessMillisecondsAverage,
        ColumnName::SuccessMillisecondsTotal,
        ColumnName::ErrorCount,
        ColumnName::ErrorMillisecondsAverage,
        ColumnName::ErrorMillisecondsTotal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnName::Query => "query",
            ColumnName::FetchedRows => "fetchedRows",
            ColumnName::AffectedRows => "affectedRows",
            ColumnName::ChangedRows => "changedRows",
            ColumnName::SuccessCount => "successCount",
            ColumnName::SuccessMillisecondsAverage => "successMillisecondsAverage",
            ColumnName::SuccessMillisecondsTotal => "successMillisecondsTotal",
            ColumnName::ErrorCount => "errorCount",
            ColumnName::ErrorMillisecondsAverage => "errorMillisecondsAverage",
            ColumnName::ErrorMillisecondsTotal => "errorMillisecondsTotal",
        }
    }

    /// Everything except the query text can be sorted on.
    pub fn is_sortable(&self) -> bool {
        !matches!(self, ColumnName::Query)
    }
}

impl std::fmt::Display for ColumnName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnName {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnName::ALL
            .iter()
            .copied()
            .find(|column| column.as_str() == s)
            .ok_or_else(|| TableError::UnknownColumn(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "ASC"),
            SortDirection::Desc => write!(f, "DESC"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            other => Err(TableError::UnknownDirection(other.to_string())),
        }
    }
}

/// The active (column, direction) pair governing row order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SortState {
    pub column: ColumnName,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        SortState {
            column: ColumnName::FetchedRows,
            direction: SortDirection::Desc,
        }
    }
}

impl SortState {
    pub fn new(column: ColumnName, direction: SortDirection) -> Self {
        SortState { column, direction }
    }

    /// State a header click on `column` switches to: the active column flips
    /// direction, any other column starts out descending.
    pub fn after_click(&self, column: ColumnName) -> Self {
        if self.column == column {
            SortState::new(column, self.direction.toggled())
        } else {
            SortState::new(column, SortDirection::Desc)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_round_trip_through_from_str() {
        for column in ColumnName::ALL {
            assert_eq!(column.as_str().parse::<ColumnName>().unwrap(), column);
        }
        assert!(matches!(
            "rows".parse::<ColumnName>(),
            Err(TableError::UnknownColumn(name)) if name == "rows"
        ));
    }

    #[test]
    fn only_query_is_unsortable() {
        let unsortable: Vec<_> = ColumnName::ALL
            .iter()
            .filter(|c| !c.is_sortable())
            .collect();
        assert_eq!(unsortable, vec![&ColumnName::Query]);
    }

    #[test]
    fn header_click_flips_active_column_and_resets_others() {
        let state = SortState::default();
        assert_eq!(
            state.after_click(ColumnName::FetchedRows),
            SortState::new(ColumnName::FetchedRows, SortDirection::Asc)
        );

        let state = SortState::new(ColumnName::ErrorCount, SortDirection::Asc);
        assert_eq!(
            state.after_click(ColumnName::SuccessCount),
            SortState::new(ColumnName::SuccessCount, SortDirection::Desc)
        );
    }

    #[test]
    fn direction_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&SortDirection::Asc).unwrap(), "\"ASC\"");
        assert_eq!("DESC".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!("desc".parse::<SortDirection>().is_err());
    }
}
