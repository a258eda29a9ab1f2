//! Row ordering.
//!
//! [`compute_order`] is pure and decides the display order; [`apply_order`]
//! moves existing rows into that order. A full pass is O(n log n) comparisons
//! plus O(n) tree moves, which suits tables of tens to a few hundred queries.

use crate::host::{HostTree, NodeId};
use crate::models::{PerformanceCounters, SortDirection, SortState};

/// Display order (top to bottom) of the given queries.
///
/// Descending puts the largest value first, ascending the smallest. Equal
/// values keep the order in which the queries were first seen.
pub fn compute_order<'a, I>(entries: I, sort: SortState) -> Vec<&'a str>
where
    I: IntoIterator<Item = (&'a str, &'a PerformanceCounters, u64)>,
{
    let mut keyed: Vec<(&str, f64, u64)> = Vec::new();

    for (query, counters, seq) in entries {
        match counters.value(sort.column) {
            Some(value) => keyed.push((query, value, seq)),
            None => log::error!(
                "Could not resolve {} for query {} when sorting",
                sort.column,
                query
            ),
        }
    }

    keyed.sort_by(|a, b| {
        let ord = a.1.total_cmp(&b.1);
        let ord = match sort.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };
        ord.then(a.2.cmp(&b.2))
    });

    keyed.into_iter().map(|(query, _, _)| query).collect()
}

/// Moves existing rows of `table` into `order` without recreating any.
///
/// Walks from the bottom up, placing each row immediately before the one
/// placed previously. Queries without a row are logged and skipped. Returns
/// the number of rows placed.
pub fn apply_order<F>(host: &mut dyn HostTree, table: NodeId, order: &[&str], row_of: F) -> usize
where
    F: Fn(&str) -> Option<NodeId>,
{
    let mut previous: Option<NodeId> = None;
    let mut placed = 0;

    for query in order.iter().rev() {
        let Some(row) = row_of(query) else {
            log::error!("Could not find table row for {} when sorting", query);
            continue;
        };

        if let Some(previous) = previous {
            host.insert_before(table, row, previous);
        }
        previous = Some(row);
        placed += 1;
    }

    placed
}
