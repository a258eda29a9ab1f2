use crate::host::{HostTree, ListenerId, NodeId};

/// Listeners attached on behalf of one owner (a row, or the table itself).
///
/// Each attach records its detach; [`DisposeScope::teardown`] drains the
/// list, so every listener is removed exactly once.
#[derive(Debug, Default)]
pub struct DisposeScope {
    listeners: Vec<(ListenerId, NodeId)>,
}

impl DisposeScope {
    pub fn listen(&mut self, host: &mut dyn HostTree, node: NodeId) -> ListenerId {
        let listener = host.add_click_listener(node);
        self.listeners.push((listener, node));
        listener
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Detaches every recorded listener, reporting each node to `on_detach`.
    pub fn teardown(&mut self, host: &mut dyn HostTree, mut on_detach: impl FnMut(NodeId)) {
        for (listener, node) in self.listeners.drain(..) {
            if !host.remove_click_listener(listener) {
                log::warn!("Click listener on node {:?} was already detached", node);
            }
            on_detach(node);
        }
    }
}
