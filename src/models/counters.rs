use serde::{Deserialize, Serialize};

use super::ColumnName;

/// Pre-computed performance counters for one distinct SQL query.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PerformanceCounters {
    pub success_count: u64,
    pub error_count: u64,
    pub success_milliseconds_total: f64,
    pub success_milliseconds_average: f64,
    pub error_milliseconds_total: f64,
    pub error_milliseconds_average: f64,
    pub fetched_rows: u64,
    pub affected_rows: u64,
    pub changed_rows: u64,
}

impl PerformanceCounters {
    /// Numeric value behind a column, used as the sort key.
    /// The query column carries no number and yields `None`.
    pub fn value(&self, column: ColumnName) -> Option<f64> {
        let value = match column {
            ColumnName::Query => return None,
            ColumnName::FetchedRows => self.fetched_rows as f64,
            ColumnName::AffectedRows => self.affected_rows as f64,
            ColumnName::ChangedRows => self.changed_rows as f64,
            ColumnName::SuccessCount => self.success_count as f64,
            ColumnName::SuccessMillisecondsAverage => self.success_milliseconds_average,
            ColumnName::SuccessMillisecondsTotal => self.success_milliseconds_total,
            ColumnName::ErrorCount => self.error_count as f64,
            ColumnName::ErrorMillisecondsAverage => self.error_milliseconds_average,
            ColumnName::ErrorMillisecondsTotal => self.error_milliseconds_total,
        };
        Some(value)
    }

    /// Exact value of an integer column; `None` for durations and the query.
    pub fn count(&self, column: ColumnName) -> Option<u64> {
        match column {
            ColumnName::FetchedRows => Some(self.fetched_rows),
            ColumnName::AffectedRows => Some(self.affected_rows),
            ColumnName::ChangedRows => Some(self.changed_rows),
            ColumnName::SuccessCount => Some(self.success_count),
            ColumnName::ErrorCount => Some(self.error_count),
            _ => None,
        }
    }

    /// Name of the first millisecond field that is negative, NaN or infinite.
    pub fn invalid_field(&self) -> Option<ColumnName> {
        [
            ColumnName::SuccessMillisecondsTotal,
            ColumnName::SuccessMillisecondsAverage,
            ColumnName::ErrorMillisecondsTotal,
            ColumnName::ErrorMillisecondsAverage,
        ]
        .into_iter()
        .find(|&column| {
            self.value(column)
                .map_or(false, |v| !v.is_finite() || v < 0.0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_and_defaults_missing_fields() {
        let counters: PerformanceCounters =
            serde_json::from_str(r#"{"fetchedRows": 7, "successMillisecondsAverage": 1.5}"#)
                .unwrap();

        assert_eq!(counters.fetched_rows, 7);
        assert_eq!(counters.success_milliseconds_average, 1.5);
        assert_eq!(counters.error_count, 0);
    }

    #[test]
    fn value_maps_every_numeric_column() {
        let counters = PerformanceCounters {
            changed_rows: 3,
            error_milliseconds_total: 250.0,
            ..Default::default()
        };

        assert_eq!(counters.value(ColumnName::ChangedRows), Some(3.0));
        assert_eq!(counters.value(ColumnName::ErrorMillisecondsTotal), Some(250.0));
        assert_eq!(counters.value(ColumnName::Query), None);
    }

    #[test]
    fn count_is_exact_for_integer_columns() {
        let counters = PerformanceCounters {
            success_count: u64::MAX,
            ..Default::default()
        };

        assert_eq!(counters.count(ColumnName::SuccessCount), Some(u64::MAX));
        assert_eq!(counters.count(ColumnName::SuccessMillisecondsTotal), None);
        assert_eq!(counters.count(ColumnName::Query), None);
    }

    #[test]
    fn negative_or_nan_durations_are_invalid() {
        let mut counters = PerformanceCounters::default();
        assert_eq!(counters.invalid_field(), None);

        counters.error_milliseconds_average = -1.0;
        assert_eq!(
            counters.invalid_field(),
            Some(ColumnName::ErrorMillisecondsAverage)
        );

        counters.error_milliseconds_average = 0.0;
        counters.success_milliseconds_total = f64::NAN;
        assert_eq!(
            counters.invalid_field(),
            Some(ColumnName::SuccessMillisecondsTotal)
        );
    }
}
