use std::collections::{BTreeMap, HashMap};

use super::{HostTree, ListenerId, NodeId};

#[derive(Debug, Default)]
struct Node {
    tag: String,
    text: String,
    styles: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    freed: bool,
}

/// Arena-backed [`HostTree`] for headless hosts and tests.
///
/// Detached nodes stay allocated until [`HostTree::drop_subtree`] hands their
/// slots back; freed slots are reused by later `create_element` calls.
#[derive(Debug, Default)]
pub struct MemoryTree {
    nodes: Vec<Node>,
    free: Vec<usize>,
    listeners: HashMap<ListenerId, NodeId>,
    next_listener: u64,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.iter().any(|c| c == class)
    }

    /// Nodes allocated and not yet dropped, attached or not.
    pub fn live_node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Number of click listeners currently attached anywhere in the tree.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&child| child != node);
        }
    }
}

impl HostTree for MemoryTree {
    fn create_element(&mut self, tag: &str) -> NodeId {
        let node = Node {
            tag: tag.to_string(),
            ..Default::default()
        };
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = node;
                NodeId(index)
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    fn insert_before(&mut self, parent: NodeId, node: NodeId, reference: NodeId) {
        if node == reference {
            return;
        }
        self.detach(node);

        let children = &mut self.nodes[parent.0].children;
        let index = children
            .iter()
            .position(|&child| child == reference)
            .unwrap_or(children.len());
        children.insert(index, node);
        self.nodes[node.0].parent = Some(parent);
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if self.nodes[child.0].parent == Some(parent) {
            self.detach(child);
        }
    }

    fn drop_subtree(&mut self, node: NodeId) {
        if self.nodes[node.0].freed {
            return;
        }
        self.detach(node);

        let mut pending = vec![node];
        let mut dropped = Vec::new();
        while let Some(current) = pending.pop() {
            let n = std::mem::take(&mut self.nodes[current.0]);
            pending.extend(n.children);
            self.nodes[current.0].freed = true;
            self.free.push(current.0);
            dropped.push(current);
        }

        self.listeners.retain(|_, target| !dropped.contains(target));
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes[node.0].children.clone()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        for child in self.children(node) {
            self.drop_subtree(child);
        }
        self.nodes[node.0].text = text.to_string();
    }

    fn text(&self, node: NodeId) -> String {
        let n = &self.nodes[node.0];
        let mut text = n.text.clone();
        for &child in &n.children {
            text.push_str(&self.text(child));
        }
        text
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let styles = &mut self.nodes[node.0].styles;
        if value.is_empty() {
            styles.remove(property);
        } else {
            styles.insert(property.to_string(), value.to_string());
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.nodes[node.0].styles.get(property).cloned()
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        self.nodes[node.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.nodes[node.0].attributes.get(name).cloned()
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        let classes = &mut self.nodes[node.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn add_click_listener(&mut self, node: NodeId) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, node);
        id
    }

    fn remove_click_listener(&mut self, listener: ListenerId) -> bool {
        self.listeners.remove(&listener).is_some()
    }

    fn has_click_listener(&self, node: NodeId) -> bool {
        self.listeners.values().any(|&n| n == node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_before_moves_existing_child() {
        let mut tree = MemoryTree::new();
        let table = tree.create_element("table");
        let a = tree.insert_row(table);
        let b = tree.insert_row(table);
        let c = tree.insert_row(table);

        tree.insert_before(table, c, a);
        assert_eq!(tree.rows(table), vec![c, a, b]);

        tree.insert_before(table, b, a);
        assert_eq!(tree.rows(table), vec![c, b, a]);
    }

    #[test]
    fn delete_row_detaches_by_index() {
        let mut tree = MemoryTree::new();
        let table = tree.create_element("table");
        let a = tree.insert_row(table);
        let b = tree.insert_row(table);

        tree.delete_row(table, 1);
        assert_eq!(tree.rows(table), vec![a]);
        assert_eq!(tree.parent(b), None);

        // Out of range is ignored.
        tree.delete_row(table, 5);
        assert_eq!(tree.rows(table), vec![a]);
    }

    #[test]
    fn text_concatenates_descendants() {
        let mut tree = MemoryTree::new();
        let cell = tree.create_element("td");
        let first = tree.create_element("code");
        let second = tree.create_element("code");
        tree.set_text(first, "SELECT 1");
        tree.set_text(second, ";");
        tree.append_child(cell, first);
        tree.append_child(cell, second);

        assert_eq!(tree.text(cell), "SELECT 1;");

        tree.set_text(cell, "replaced");
        assert_eq!(tree.text(cell), "replaced");
        assert!(tree.children(cell).is_empty());
    }

    #[test]
    fn drop_subtree_reclaims_descendants_and_listeners() {
        let mut tree = MemoryTree::new();
        let table = tree.create_element("table");
        let row = tree.insert_row(table);
        let cell = tree.insert_cell(row);
        let code = tree.create_element("code");
        tree.append_child(cell, code);
        tree.add_click_listener(code);
        assert_eq!(tree.live_node_count(), 4);

        tree.drop_subtree(row);
        assert!(tree.rows(table).is_empty());
        assert_eq!(tree.live_node_count(), 1);
        assert_eq!(tree.listener_count(), 0);

        // Dropping twice is ignored.
        tree.drop_subtree(row);
        assert_eq!(tree.live_node_count(), 1);

        let reused = tree.create_element("tr");
        assert!(reused.0 < 4);
        assert_eq!(tree.live_node_count(), 2);
    }

    #[test]
    fn set_text_releases_replaced_children() {
        let mut tree = MemoryTree::new();
        let cell = tree.create_element("td");
        let code = tree.create_element("code");
        tree.append_child(cell, code);

        tree.set_text(cell, "plain");
        assert_eq!(tree.live_node_count(), 1);
    }

    #[test]
    fn empty_style_value_clears_property() {
        let mut tree = MemoryTree::new();
        let node = tree.create_element("code");
        tree.set_style(node, "display", "none");
        assert_eq!(tree.style(node, "display").as_deref(), Some("none"));

        tree.set_style(node, "display", "");
        assert_eq!(tree.style(node, "display"), None);
    }

    #[test]
    fn listeners_are_removed_once() {
        let mut tree = MemoryTree::new();
        let node = tree.create_element("td");
        let listener = tree.add_click_listener(node);
        assert!(tree.has_click_listener(node));

        assert!(tree.remove_click_listener(listener));
        assert!(!tree.remove_click_listener(listener));
        assert!(!tree.has_click_listener(node));
        assert_eq!(tree.listener_count(), 0);
    }
}
