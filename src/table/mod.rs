pub mod dispose;
pub mod render;
pub mod sort;

use std::collections::HashMap;

use crate::error::{Result, TableError};
use crate::host::{HostTree, MemoryTree, NodeId};
use crate::locale::{LocaleTable, Texts};
use crate::models::{ColumnName, PerformanceCounters, SortDirection, SortState, TableSettings};
use crate::sql::{QueryFormatter, SqlFormatter};
use crate::state::QueryStore;

use dispose::DisposeScope;

/// What a click on a listened-to node does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Header cell: toggle the sort on this column
    Sort(ColumnName),
    /// Query cell: swap raw and formatted views
    ToggleQuery { raw: NodeId, formatted: NodeId },
}

pub type Bindings = HashMap<NodeId, ClickAction>;

/// Live table of per-query performance counters.
///
/// Rows are created the first time a query is seen and then only updated and
/// moved, never rebuilt, until [`clear`](Self::clear) or
/// [`destroy`](Self::destroy).
pub struct SqlPerformanceTable<H: HostTree = MemoryTree> {
    host: H,
    root: NodeId,
    texts: Texts,
    formatter: Box<dyn QueryFormatter>,
    store: QueryStore,
    sort_state: SortState,
    bindings: Bindings,
    /// Header listeners
    scope: DisposeScope,
    destroyed: bool,
}

impl<H: HostTree> SqlPerformanceTable<H> {
    /// Creates a table with the built-in translations. Without a locale the
    /// process environment picks one, falling back to English.
    pub fn new(host: H, locale: Option<&str>) -> Self {
        let settings = TableSettings {
            locale: locale.map(str::to_string),
            ..Default::default()
        };
        let formatter = Box::new(SqlFormatter::new(settings.format_indent));
        Self::with_settings(host, &settings, &LocaleTable::default(), formatter)
    }

    pub fn with_settings(
        mut host: H,
        settings: &TableSettings,
        locales: &LocaleTable,
        formatter: Box<dyn QueryFormatter>,
    ) -> Self {
        let texts = locales.resolve(settings.locale.as_deref());

        let root = host.create_element("table");
        for class in &settings.table_classes {
            host.add_class(root, class);
        }

        let sort_state = if settings.default_sort.column.is_sortable() {
            settings.default_sort
        } else {
            log::warn!(
                "Default sort column {} is not sortable, using {}",
                settings.default_sort.column,
                SortState::default().column
            );
            SortState::default()
        };

        let mut scope = DisposeScope::default();
        let mut bindings = Bindings::new();
        render::render_header(&mut host, root, &texts, &mut scope, &mut bindings);

        SqlPerformanceTable {
            host,
            root,
            texts,
            formatter,
            store: QueryStore::new(),
            sort_state,
            bindings,
            scope,
            destroyed: false,
        }
    }

    fn ensure_live(&self) -> Result<()> {
        if self.destroyed {
            return Err(TableError::Destroyed);
        }
        Ok(())
    }

    /// Merges a batch of counters into the table.
    ///
    /// Queries in `records` overwrite what was held for them; queries not in
    /// `records` are left as they are. With `clear_existing` the table is
    /// cleared first, replacing the whole data set. Rows are then put back in
    /// the active sort order.
    pub fn update<I>(&mut self, records: I, clear_existing: bool) -> Result<()>
    where
        I: IntoIterator<Item = (String, PerformanceCounters)>,
    {
        self.ensure_live()?;

        if clear_existing {
            self.clear()?;
        }

        let mut created = 0;
        let mut refreshed = 0;

        for (query, counters) in records {
            if let Some(field) = counters.invalid_field() {
                log::warn!("Ignoring counters for {}: invalid value in {}", query, field);
                continue;
            }

            match self.store.get_mut(&query) {
                Some(state) => {
                    state.counters = counters;
                    render::refresh_row(&mut self.host, state.row, &counters, &self.texts);
                    refreshed += 1;
                }
                None => {
                    let (row, scope) = render::render_row(
                        &mut self.host,
                        self.root,
                        &query,
                        &counters,
                        &self.texts,
                        self.formatter.as_ref(),
                        &mut self.bindings,
                    );
                    self.store.insert(query, counters, row, scope);
                    created += 1;
                }
            }
        }

        log::debug!("Updated table: {} new rows, {} refreshed", created, refreshed);

        self.apply_sort();
        Ok(())
    }

    /// Like [`update`](Self::update), taking a JSON object that maps query
    /// text to counters. Queries are taken in document order. Nothing changes
    /// if the document fails to parse.
    pub fn update_json(&mut self, json: &str, clear_existing: bool) -> Result<()> {
        self.ensure_live()?;
        let document: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;
        let records = document
            .into_iter()
            .map(|(query, value)| -> Result<(String, PerformanceCounters)> {
                Ok((query, serde_json::from_value(value)?))
            })
            .collect::<Result<Vec<_>>>()?;
        self.update(records, clear_existing)
    }

    /// Orders rows by `column` in `direction`. Asking for the active order
    /// again does nothing.
    pub fn sort(&mut self, column: ColumnName, direction: SortDirection) -> Result<()> {
        self.ensure_live()?;

        if !column.is_sortable() {
            return Err(TableError::NotSortable(column));
        }

        let requested = SortState::new(column, direction);
        if requested == self.sort_state {
            return Ok(());
        }

        log::debug!("Sorting by {} {}", column, direction);
        self.sort_state = requested;
        self.apply_sort();
        Ok(())
    }

    /// Restores the default order, descending by fetched rows.
    pub fn sort_default(&mut self) -> Result<()> {
        let SortState { column, direction } = SortState::default();
        self.sort(column, direction)
    }

    fn apply_sort(&mut self) {
        let order = sort::compute_order(
            self.store
                .iter()
                .map(|(query, state)| (query.as_str(), &state.counters, state.seq)),
            self.sort_state,
        );
        sort::apply_order(&mut self.host, self.root, &order, |query| {
            self.store.row(query)
        });
    }

    /// Drops every data row and its listeners, keeping the header.
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_live()?;
        self.release_rows();

        loop {
            let rows = self.host.rows(self.root);
            if rows.len() <= 1 {
                break;
            }
            self.host.delete_row(self.root, rows.len() - 1);
            self.host.drop_subtree(rows[rows.len() - 1]);
        }
        Ok(())
    }

    fn release_rows(&mut self) {
        let rows = self.store.drain();
        let listeners: usize = rows.iter().map(|(_, state)| state.scope.len()).sum();
        log::debug!("Releasing {} rows with {} listeners", rows.len(), listeners);

        for (_, mut state) in rows {
            state.scope.teardown(&mut self.host, |node| {
                self.bindings.remove(&node);
            });
        }
    }

    /// Detaches the table from its parent and releases all listeners and
    /// state. Calling it again is a no-op; every other operation fails with
    /// [`TableError::Destroyed`] afterwards.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }

        if let Some(parent) = self.host.parent(self.root) {
            self.host.remove_child(parent, self.root);
        }

        self.release_rows();
        self.scope.teardown(&mut self.host, |_| {});
        self.bindings.clear();
        self.host.drop_subtree(self.root);
        self.destroyed = true;
    }

    /// Dispatches a click on `node`. Returns whether the node had a listener.
    pub fn click(&mut self, node: NodeId) -> Result<bool> {
        self.ensure_live()?;

        if !self.host.has_click_listener(node) {
            return Ok(false);
        }

        match self.bindings.get(&node).copied() {
            Some(ClickAction::Sort(column)) => {
                let next = self.sort_state.after_click(column);
                self.sort(next.column, next.direction)?;
                Ok(true)
            }
            Some(ClickAction::ToggleQuery { raw, formatted }) => {
                render::toggle_query(&mut self.host, raw, formatted);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// The table node, for attaching into the host layout.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn texts(&self) -> &Texts {
        &self.texts
    }

    pub fn sort_state(&self) -> SortState {
        self.sort_state
    }

    pub fn counters(&self, query: &str) -> Option<&PerformanceCounters> {
        self.store.get(query).map(|state| &state.counters)
    }

    pub fn row(&self, query: &str) -> Option<NodeId> {
        self.store.row(query)
    }

    /// Header row, the first child of the table node.
    pub fn header(&self) -> Option<NodeId> {
        self.host.rows(self.root).first().copied()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }
}
