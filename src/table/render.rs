use crate::host::{HostTree, NodeId};
use crate::locale::Texts;
use crate::models::{ColumnName, PerformanceCounters};
use crate::sql::QueryFormatter;

use super::dispose::DisposeScope;
use super::{Bindings, ClickAction};

/// Attribute holding a cell's canonical column name.
pub const COLUMN_ATTRIBUTE: &str = "title";

/// Displayed text of one cell.
pub fn format_value(column: ColumnName, counters: &PerformanceCounters, texts: &Texts) -> String {
    match column {
        ColumnName::SuccessMillisecondsTotal | ColumnName::ErrorMillisecondsTotal => {
            let milliseconds = counters.value(column).unwrap_or_default();
            let seconds = (milliseconds / 1000.0).trunc() as u64;
            let unit = if seconds == 1 {
                &texts.second_short
            } else {
                &texts.seconds_short
            };
            format!("{} {}", seconds, unit)
        }
        ColumnName::SuccessMillisecondsAverage | ColumnName::ErrorMillisecondsAverage => {
            let milliseconds = counters.value(column).unwrap_or_default();
            let unit = if milliseconds == 1.0 {
                &texts.millisecond_short
            } else {
                &texts.milliseconds_short
            };
            format!("{} {}", milliseconds, unit)
        }
        ColumnName::Query => String::new(),
        _ => counters
            .count(column)
            .map(|count| count.to_string())
            .unwrap_or_default(),
    }
}

fn listen(
    host: &mut dyn HostTree,
    scope: &mut DisposeScope,
    bindings: &mut Bindings,
    node: NodeId,
    action: ClickAction,
) {
    scope.listen(host, node);
    bindings.insert(node, action);
}

/// Builds the header row. Sortable headers get a click listener in `scope`.
pub fn render_header(
    host: &mut dyn HostTree,
    table: NodeId,
    texts: &Texts,
    scope: &mut DisposeScope,
    bindings: &mut Bindings,
) -> NodeId {
    let header = host.insert_row(table);

    for column in ColumnName::ALL {
        let cell = host.insert_cell(header);
        host.set_text(cell, texts.column_label(column));
        host.set_attribute(cell, COLUMN_ATTRIBUTE, column.as_str());
        host.set_style(cell, "font-weight", "bold");

        if column.is_sortable() {
            host.set_style(cell, "cursor", "pointer");
            listen(host, scope, bindings, cell, ClickAction::Sort(column));
        }
    }

    header
}

/// Appends a row for a newly seen query. Returns the row and the scope
/// owning its listeners.
pub fn render_row(
    host: &mut dyn HostTree,
    table: NodeId,
    query: &str,
    counters: &PerformanceCounters,
    texts: &Texts,
    formatter: &dyn QueryFormatter,
    bindings: &mut Bindings,
) -> (NodeId, DisposeScope) {
    let row = host.insert_row(table);
    let mut scope = DisposeScope::default();

    for column in ColumnName::ALL {
        let cell = host.insert_cell(row);

        if column == ColumnName::Query {
            render_query_cell(host, cell, query, formatter, &mut scope, bindings);
        } else {
            host.set_text(cell, &format_value(column, counters, texts));
            host.set_attribute(cell, COLUMN_ATTRIBUTE, column.as_str());
            host.set_style(cell, "text-align", "right");
            host.set_style(cell, "white-space", "pre");
        }
    }

    (row, scope)
}

fn render_query_cell(
    host: &mut dyn HostTree,
    cell: NodeId,
    query: &str,
    formatter: &dyn QueryFormatter,
    scope: &mut DisposeScope,
    bindings: &mut Bindings,
) {
    let raw = host.create_element("code");
    host.set_text(raw, query);

    let formatted = host.create_element("code");
    host.set_text(formatted, &formatter.format(query));
    host.set_style(formatted, "white-space", "pre-wrap");

    formatter.highlight(host, raw);
    formatter.highlight(host, formatted);

    host.append_child(cell, raw);
    host.append_child(cell, formatted);
    host.set_style(formatted, "display", "none");
    host.set_style(cell, "cursor", "pointer");

    let toggle = ClickAction::ToggleQuery { raw, formatted };
    listen(host, scope, bindings, raw, toggle);
    listen(host, scope, bindings, formatted, toggle);
}

/// Rewrites the value cells of an existing row. The query cell is left alone.
pub fn refresh_row(host: &mut dyn HostTree, row: NodeId, counters: &PerformanceCounters, texts: &Texts) {
    for cell in host.children(row) {
        let Some(name) = host.attribute(cell, COLUMN_ATTRIBUTE) else {
            continue;
        };
        match name.parse::<ColumnName>() {
            Ok(column) => host.set_text(cell, &format_value(column, counters, texts)),
            Err(e) => log::warn!("Skipping cell while refreshing row: {}", e),
        }
    }
}

/// Swaps which of the raw and formatted query views is visible.
pub fn toggle_query(host: &mut dyn HostTree, raw: NodeId, formatted: NodeId) {
    if host.style(formatted, "display").as_deref() == Some("none") {
        host.set_style(formatted, "display", "");
        host.set_style(raw, "display", "none");
    } else {
        host.set_style(formatted, "display", "none");
        host.set_style(raw, "display", "");
    }
}
