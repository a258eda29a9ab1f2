//! The host node tree the table renders into.
//!
//! The table never owns a rendering engine. It drives whatever tree the host
//! hands it through [`HostTree`], addressing nodes by [`NodeId`].

pub mod memory;

pub use memory::MemoryTree;

/// Opaque handle to a node in the host tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Handle returned when a click listener is attached; detaching needs it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

pub trait HostTree {
    fn create_element(&mut self, tag: &str) -> NodeId;

    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Moves `node` so it sits immediately before `reference` under `parent`.
    /// A node that is already attached elsewhere is detached first.
    fn insert_before(&mut self, parent: NodeId, node: NodeId, reference: NodeId);

    fn remove_child(&mut self, parent: NodeId, child: NodeId);

    /// Detaches `node` and releases it with all its descendants and their
    /// listeners. The ids must not be used afterwards.
    fn drop_subtree(&mut self, node: NodeId);

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn children(&self, node: NodeId) -> Vec<NodeId>;

    /// Appends a new row to `table` and returns it.
    fn insert_row(&mut self, table: NodeId) -> NodeId {
        let row = self.create_element("tr");
        self.append_child(table, row);
        row
    }

    fn delete_row(&mut self, table: NodeId, index: usize) {
        if let Some(row) = self.rows(table).get(index).copied() {
            self.remove_child(table, row);
        }
    }

    fn rows(&self, table: NodeId) -> Vec<NodeId> {
        self.children(table)
    }

    /// Appends a new cell to `row` and returns it.
    fn insert_cell(&mut self, row: NodeId) -> NodeId {
        let cell = self.create_element("td");
        self.append_child(row, cell);
        cell
    }

    fn set_text(&mut self, node: NodeId, text: &str);

    fn text(&self, node: NodeId) -> String;

    /// Sets a visual style property; an empty value clears it.
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    fn style(&self, node: NodeId, property: &str) -> Option<String>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn add_class(&mut self, node: NodeId, class: &str);

    fn add_click_listener(&mut self, node: NodeId) -> ListenerId;

    /// Returns false if the listener was already gone.
    fn remove_click_listener(&mut self, listener: ListenerId) -> bool;

    fn has_click_listener(&self, node: NodeId) -> bool;
}
