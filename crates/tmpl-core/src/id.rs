use derive_more::Display;

use crate::ast::Node;

/// Stable per-node index. `0` is reserved for nodes that have not been numbered yet.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("#{_0}")]
pub struct NodeId(pub u32);

impl NodeId {
    pub const UNASSIGNED: NodeId = NodeId(0);

    pub fn is_assigned(self) -> bool {
        self != Self::UNASSIGNED
    }
}

#[derive(Clone, Debug)]
pub struct NodeIdGen {
    next_id: u32,
}

impl Default for NodeIdGen {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeIdGen {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Continue numbering after the largest id present in `root`.
    pub fn after(root: &Node) -> Self {
        let mut max = 0;
        root.for_each(&mut |node| max = max.max(node.id.0));
        Self { next_id: max + 1 }
    }

    pub fn new_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Renumber every node of `root` in pre-order.
    pub fn assign(&mut self, root: &mut Node) {
        root.id = self.new_id();
        for child in root.children_mut() {
            self.assign(child);
        }
    }
}
