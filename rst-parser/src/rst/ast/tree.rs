//! Discourse tree
//!
//!     The rooted, ordered tree every conversion passes through. A tree is built once by a
//!     reader, handed to a writer, and dropped; nothing mutates it in between.
//!
//!     Canonical root shapes:
//!
//!         - the empty tree: an internal node with an empty label and no children
//!         - a single EDU: a nucleus role node wrapping one leaf, `(N "foo")`
//!         - anything larger: a relation node

use super::index::NodeIndex;
use super::node::{DiscourseNode, Edu, Internal, NodeId};

/// What sits at the top of a tree, with role wrappers looked through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootContent<'a> {
    Empty,
    Edu(&'a Edu),
    Relation(&'a Internal),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscourseTree {
    root: DiscourseNode,
}

impl DiscourseTree {
    pub fn new(root: DiscourseNode) -> Self {
        Self { root }
    }

    /// The tree without any EDU.
    pub fn empty() -> Self {
        Self::new(DiscourseNode::internal("", vec![]))
    }

    /// A tree holding a single EDU.
    pub fn single(text: impl Into<String>) -> Self {
        Self::new(DiscourseNode::nucleus(DiscourseNode::leaf(text)))
    }

    pub fn root(&self) -> &DiscourseNode {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.edu_count() == 0
    }

    /// EDU texts in their global left-to-right order.
    pub fn edus(&self) -> Vec<&str> {
        self.root.leaves()
    }

    pub fn content(&self) -> RootContent<'_> {
        let mut node = &self.root;
        loop {
            match node {
                DiscourseNode::Leaf(edu) => return RootContent::Edu(edu),
                DiscourseNode::Internal(internal) => {
                    if let Some(inner) = internal.role_content() {
                        node = inner;
                    } else if internal.children.is_empty() {
                        return RootContent::Empty;
                    } else {
                        return RootContent::Relation(internal);
                    }
                }
            }
        }
    }

    /// Build the read-only id index over this tree.
    pub fn index(&self) -> NodeIndex<'_> {
        NodeIndex::build(&self.root)
    }

    /// Look a node up by its format-assigned id.
    pub fn find(&self, id: NodeId) -> Option<&DiscourseNode> {
        self.root.pre_order().find(|node| node.id() == Some(id))
    }
}

impl From<DiscourseNode> for DiscourseTree {
    fn from(root: DiscourseNode) -> Self {
        Self::new(root)
    }
}
