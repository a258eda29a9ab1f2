use std::collections::HashMap;

use crate::host::NodeId;
use crate::models::PerformanceCounters;
use crate::table::dispose::DisposeScope;

/// Everything the table knows about one query.
#[derive(Debug)]
pub struct RowState {
    /// Latest counters, replaced wholesale on every update
    pub counters: PerformanceCounters,
    /// The materialized row; stable for as long as the query is tracked
    pub row: NodeId,
    /// Order of first sighting, used to break sort ties
    pub seq: u64,
    /// Listeners owned by this row
    pub scope: DisposeScope,
}

/// Single authoritative mapping from query text to its row state.
#[derive(Debug, Default)]
pub struct QueryStore {
    rows: HashMap<String, RowState>,
    next_seq: u64,
}

impl QueryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, query: &str) -> Option<&RowState> {
        self.rows.get(query)
    }

    pub fn get_mut(&mut self, query: &str) -> Option<&mut RowState> {
        self.rows.get_mut(query)
    }

    /// Row handle for a query, if one is materialized
    pub fn row(&self, query: &str) -> Option<NodeId> {
        self.rows.get(query).map(|state| state.row)
    }

    /// Start tracking a newly seen query
    pub fn insert(
        &mut self,
        query: String,
        counters: PerformanceCounters,
        row: NodeId,
        scope: DisposeScope,
    ) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.rows.insert(
            query,
            RowState {
                counters,
                row,
                seq,
                scope,
            },
        );
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RowState)> {
        self.rows.iter()
    }

    /// Removes every tracked query, handing back their states for teardown
    pub fn drain(&mut self) -> Vec<(String, RowState)> {
        self.rows.drain().collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
