//! Live, sortable table of SQL query performance counters.
//!
//! Feed batches of per-query counters into a [`SqlPerformanceTable`]; it keeps
//! one row per distinct query text, updates cells in place and reorders
//! existing rows when the sort changes.

pub mod error;
pub mod host;
pub mod locale;
pub mod models;
pub mod sql;
pub mod state;
pub mod table;

pub use error::{Result, TableError};
pub use host::{HostTree, ListenerId, MemoryTree, NodeId};
pub use locale::{LocaleTable, Texts};
pub use models::{ColumnName, PerformanceCounters, SortDirection, SortState, TableSettings};
pub use sql::{QueryFormatter, SqlFormatter};
pub use table::{ClickAction, SqlPerformanceTable};

/// Installs `env_logger` at `Info`, overridable through `RUST_LOG`.
/// Later calls are ignored.
pub fn init_logging() {
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init();
}
