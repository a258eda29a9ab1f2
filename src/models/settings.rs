use serde::{Deserialize, Serialize};

use super::SortState;
use crate::error::TableError;

fn default_table_classes() -> Vec<String> {
    vec!["table".to_string(), "table-hover".to_string()]
}

fn default_format_indent() -> u8 {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableSettings {
    /// Requested locale code. When absent the process environment decides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Classes put on the root table node.
    #[serde(default = "default_table_classes")]
    pub table_classes: Vec<String>,
    /// Order applied until the first explicit sort.
    #[serde(default)]
    pub default_sort: SortState,
    /// Spaces per indent level in the formatted query view.
    #[serde(default = "default_format_indent")]
    pub format_indent: u8,
}

impl Default for TableSettings {
    fn default() -> Self {
        TableSettings {
            locale: None,
            table_classes: default_table_classes(),
            default_sort: SortState::default(),
            format_indent: default_format_indent(),
        }
    }
}

impl TableSettings {
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        Ok(serde_json::from_str(json)?)
    }
}
