use sqlformat::{FormatOptions, Indent, QueryParams};

use crate::host::{HostTree, NodeId};

/// Pretty-printing and highlighting of query text.
pub trait QueryFormatter {
    fn format(&self, sql: &str) -> String;

    /// Decorates a node that already holds query text.
    fn highlight(&self, host: &mut dyn HostTree, node: NodeId);
}

/// Formats with `sqlformat` and marks nodes for the page's highlight stylesheet.
#[derive(Debug, Clone)]
pub struct SqlFormatter {
    indent: u8,
}

impl Default for SqlFormatter {
    fn default() -> Self {
        SqlFormatter { indent: 2 }
    }
}

impl SqlFormatter {
    pub fn new(indent: u8) -> Self {
        SqlFormatter { indent }
    }
}

impl QueryFormatter for SqlFormatter {
    fn format(&self, sql: &str) -> String {
        let options = FormatOptions {
            indent: Indent::Spaces(self.indent),
            ..Default::default()
        };
        sqlformat::format(sql, &QueryParams::None, &options)
    }

    fn highlight(&self, host: &mut dyn HostTree, node: NodeId) {
        host.add_class(node, "hljs");
        host.add_class(node, "language-sql");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryTree;

    #[test]
    fn format_breaks_clauses_onto_lines() {
        let formatted = SqlFormatter::default().format("SELECT id, name FROM users WHERE id = 1");

        assert!(formatted.lines().count() > 1);
        assert!(formatted.starts_with("SELECT"));
        assert!(formatted.contains("FROM"));
    }

    #[test]
    fn highlight_tags_the_node() {
        let mut tree = MemoryTree::new();
        let node = tree.create_element("code");
        SqlFormatter::default().highlight(&mut tree, node);

        assert!(tree.has_class(node, "hljs"));
        assert!(tree.has_class(node, "language-sql"));
    }
}
