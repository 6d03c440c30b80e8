//! Id index
//!
//!     Formats that carry ids sometimes need to ask where a node sits: which subtree an id
//!     names, and the position of its leftmost EDU in the global order. The index answers both
//!     without touching the tree. It borrows the tree, is built once, and is never updated, so
//!     it can not drift out of sync with the nodes it points at.

use std::collections::HashMap;

use super::node::{DiscourseNode, NodeId};

#[derive(Debug)]
pub struct NodeIndex<'a> {
    nodes: HashMap<NodeId, &'a DiscourseNode>,
    leftmost: HashMap<NodeId, usize>,
}

impl<'a> NodeIndex<'a> {
    pub fn build(root: &'a DiscourseNode) -> Self {
        let mut index = Self {
            nodes: HashMap::new(),
            leftmost: HashMap::new(),
        };
        let mut next_edu = 0;
        index.visit(root, &mut next_edu);
        index
    }

    fn visit(&mut self, node: &'a DiscourseNode, next_edu: &mut usize) {
        let first = *next_edu;
        match node {
            DiscourseNode::Leaf(_) => *next_edu += 1,
            DiscourseNode::Internal(internal) => {
                for child in &internal.children {
                    self.visit(child, next_edu);
                }
            }
        }
        if let Some(id) = node.id() {
            self.nodes.insert(id, node);
            if *next_edu > first {
                self.leftmost.insert(id, first);
            }
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&'a DiscourseNode> {
        self.nodes.get(&id).copied()
    }

    /// Index of the leftmost EDU covered by the node with this id.
    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.leftmost.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions() {
        let root = DiscourseNode::internal(
            "elaboration",
            vec![
                DiscourseNode::nucleus(DiscourseNode::leaf("eins").with_id(1)),
                DiscourseNode::satellite(
                    DiscourseNode::internal(
                        "joint",
                        vec![
                            DiscourseNode::nucleus(DiscourseNode::leaf("zwei").with_id(2)),
                            DiscourseNode::nucleus(DiscourseNode::leaf("drei").with_id(3)),
                        ],
                    )
                    .with_id(7),
                ),
            ],
        );
        let index = NodeIndex::build(&root);

        assert_eq!(index.len(), 4);
        assert_eq!(index.position(1), Some(0));
        assert_eq!(index.position(7), Some(1));
        assert_eq!(index.position(3), Some(2));
        assert_eq!(index.get(7).map(|n| n.label()), Some("joint"));
        assert!(index.get(42).is_none());
    }
}
