use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;

use crate::error::TableError;
use crate::models::ColumnName;

pub const DEFAULT_LOCALE: &str = "en";

/// Localized strings: one label per column plus unit labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Texts {
    pub query: String,
    pub fetched_rows: String,
    pub affected_rows: String,
    pub changed_rows: String,
    pub success_count: String,
    pub success_milliseconds_average: String,
    pub success_milliseconds_total: String,
    pub error_count: String,
    pub error_milliseconds_average: String,
    pub error_milliseconds_total: String,

    pub second: String,
    pub seconds: String,
    pub millisecond: String,
    pub milliseconds: String,
    pub second_short: String,
    pub seconds_short: String,
    pub millisecond_short: String,
    pub milliseconds_short: String,
}

impl Texts {
    pub fn english() -> Self {
        Texts {
            query: "SQL query".into(),
            fetched_rows: "Fetched rows".into(),
            affected_rows: "Affected rows".into(),
            changed_rows: "Changed rows".into(),
            success_count: "Success count".into(),
            success_milliseconds_average: "Success average duration".into(),
            success_milliseconds_total: "Total duration".into(),
            error_count: "No. of errors".into(),
            error_milliseconds_average: "Error average duration".into(),
            error_milliseconds_total: "Total error duration".into(),
            second: "second".into(),
            seconds: "seconds".into(),
            millisecond: "millisecond".into(),
            milliseconds: "milliseconds".into(),
            second_short: "sec".into(),
            seconds_short: "sec".into(),
            millisecond_short: "ms".into(),
            milliseconds_short: "ms".into(),
        }
    }

    pub fn romanian() -> Self {
        Texts {
            query: "Interogare".into(),
            fetched_rows: "Rânduri întoarse".into(),
            affected_rows: "Rânduri afectate".into(),
            changed_rows: "Rânduri schimbate".into(),
            success_count: "Nr. rulări cu succes".into(),
            success_milliseconds_average: "Medie rulare cu succes".into(),
            success_milliseconds_total: "Total rulări cu succes".into(),
            error_count: "Nr. erori".into(),
            error_milliseconds_average: "Medie rulare erori".into(),
            error_milliseconds_total: "Total rulare erori".into(),
            second: "secundă".into(),
            seconds: "secunde".into(),
            millisecond: "milisecundă".into(),
            milliseconds: "milisecunde".into(),
            second_short: "sec".into(),
            seconds_short: "sec".into(),
            millisecond_short: "ms".into(),
            milliseconds_short: "ms".into(),
        }
    }

    /// Header label shown for a column.
    pub fn column_label(&self, column: ColumnName) -> &str {
        match column {
            ColumnName::Query => &self.query,
            ColumnName::FetchedRows => &self.fetched_rows,
            ColumnName::AffectedRows => &self.affected_rows,
            ColumnName::ChangedRows => &self.changed_rows,
            ColumnName::SuccessCount => &self.success_count,
            ColumnName::SuccessMillisecondsAverage => &self.success_milliseconds_average,
            ColumnName::SuccessMillisecondsTotal => &self.success_milliseconds_total,
            ColumnName::ErrorCount => &self.error_count,
            ColumnName::ErrorMillisecondsAverage => &self.error_milliseconds_average,
            ColumnName::ErrorMillisecondsTotal => &self.error_milliseconds_total,
        }
    }
}

/// Translations keyed by locale code, with `en` always present.
#[derive(Debug, Clone)]
pub struct LocaleTable {
    texts: HashMap<String, Texts>,
}

impl Default for LocaleTable {
    fn default() -> Self {
        let mut table = LocaleTable {
            texts: HashMap::new(),
        };
        let english = Texts::english();
        let romanian = Texts::romanian();

        for code in ["en", "en-US", "en-UK"] {
            table.insert(code, english.clone());
        }
        for code in ["ro", "ro-RO", "ro-MD"] {
            table.insert(code, romanian.clone());
        }
        table
    }
}

impl LocaleTable {
    pub fn insert(&mut self, code: &str, texts: Texts) {
        self.texts.insert(code.to_string(), texts);
    }

    /// Registers a translation given as a JSON object of [`Texts`].
    pub fn insert_json(&mut self, code: &str, json: &str) -> Result<(), TableError> {
        let texts: Texts = serde_json::from_str(json)?;
        self.insert(code, texts);
        Ok(())
    }

    pub fn contains(&self, code: &str) -> bool {
        self.texts.contains_key(code)
    }

    /// Resolves a requested code to the code actually used:
    ///
    /// | step | lookup                                   |
    /// |------|------------------------------------------|
    /// | 1    | exact code (`ro-MD`)                     |
    /// | 2    | primary language subtag (`ro`)           |
    /// | 3    | [`DEFAULT_LOCALE`]                       |
    ///
    /// With no request, the process locale (`LC_ALL`, `LC_MESSAGES`, `LANG`)
    /// is tried before the default.
    pub fn resolve_code(&self, requested: Option<&str>) -> String {
        let requested = requested
            .map(normalize_code)
            .or_else(environment_locale);

        let Some(code) = requested else {
            return DEFAULT_LOCALE.to_string();
        };

        if self.contains(&code) {
            return code;
        }

        let primary = code.split('-').next().unwrap_or_default();
        if self.contains(primary) {
            return primary.to_string();
        }

        log::debug!("No translation for locale {}, using {}", code, DEFAULT_LOCALE);
        DEFAULT_LOCALE.to_string()
    }

    pub fn resolve(&self, requested: Option<&str>) -> Texts {
        let code = self.resolve_code(requested);
        self.texts
            .get(&code)
            .cloned()
            .unwrap_or_else(Texts::english)
    }
}

/// `ro_RO.UTF-8` -> `ro-RO`.
fn normalize_code(code: &str) -> String {
    let code = code.split(['.', '@']).next().unwrap_or_default();
    code.replace('_', "-")
}

fn environment_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| env::var(var).ok())
        .map(|value| normalize_code(&value))
        .find(|code| !code.is_empty() && code != "C" && code != "POSIX")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_wins() {
        let table = LocaleTable::default();
        assert_eq!(table.resolve_code(Some("ro-MD")), "ro-MD");
        assert_eq!(table.resolve(Some("ro")).query, "Interogare");
    }

    #[test]
    fn falls_back_to_primary_subtag() {
        let table = LocaleTable::default();
        assert_eq!(table.resolve_code(Some("en-AU")), "en");
        assert_eq!(table.resolve_code(Some("ro_RO.UTF-8")), "ro-RO");
    }

    #[test]
    fn unknown_locale_falls_back_to_default() {
        let table = LocaleTable::default();
        assert_eq!(table.resolve_code(Some("ja-JP")), DEFAULT_LOCALE);
        assert_eq!(table.resolve(Some("xx")), Texts::english());
    }

    #[test]
    fn custom_translations_can_be_loaded_from_json() {
        let mut table = LocaleTable::default();
        let mut french = serde_json::to_value(Texts::english()).unwrap();
        french["query"] = "Requête SQL".into();

        table
            .insert_json("fr", &french.to_string())
            .unwrap();

        assert_eq!(table.resolve(Some("fr-FR")).query, "Requête SQL");
        assert!(table.insert_json("de", r#"{"query": "Abfrage"}"#).is_err());
    }

    #[test]
    fn column_labels_follow_locale() {
        let texts = Texts::romanian();
        assert_eq!(texts.column_label(ColumnName::ErrorCount), "Nr. erori");
        assert_eq!(
            Texts::english().column_label(ColumnName::SuccessMillisecondsTotal),
            "Total duration"
        );
    }
}
