use crate::models::ColumnName;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Table has been destroyed")]
    Destroyed,
    #[error("Column {0} is not sortable")]
    NotSortable(ColumnName),
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
    #[error("Unknown sort direction: {0}")]
    UnknownDirection(String),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TableError>;
