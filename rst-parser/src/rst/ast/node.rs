//! Discourse node
//!
//!     A discourse node is either a leaf, holding the text of one Elementary Discourse Unit
//!     (EDU), or an internal node holding a label and an ordered list of children.
//!
//!     Internal nodes come in two flavours, told apart only by their label:
//!
//!         - relation nodes, labelled with the relation name (e.g. "circumstance", "joint")
//!         - role nodes, labelled "N" (nucleus) or "S" (satellite), wrapping exactly one
//!           subtree: either a leaf or another relation node
//!
//!     So a mononuclear relation reads:
//!
//!         circumstance
//!         ├── S ── "Although they didn't like it,"
//!         └── N ── "they accepted the offer."
//!
//!     and a multinuclear one:
//!
//!         joint
//!         ├── N ── "zwei"
//!         └── N ── "drei"
//!
//!     Equality is structural: two nodes are equal when their shapes and labels match. The
//!     optional identifier carried by formats with stable ids never takes part in it.

use std::fmt;

/// Identifier carried by formats that number their nodes (rs3 ids, dis leaf numbers).
pub type NodeId = u32;

/// Label of a nucleus role node.
pub const NUCLEUS: &str = "N";
/// Label of a satellite role node.
pub const SATELLITE: &str = "S";

/// An Elementary Discourse Unit: one raw text span.
#[derive(Debug, Clone)]
pub struct Edu {
    pub text: String,
    pub id: Option<NodeId>,
}

impl Edu {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            id: None,
        }
    }
}

impl PartialEq for Edu {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Edu {}

/// A relation or role node with its ordered children.
#[derive(Debug, Clone)]
pub struct Internal {
    pub label: String,
    pub children: Vec<DiscourseNode>,
    pub id: Option<NodeId>,
}

impl Internal {
    pub fn new(label: impl Into<String>, children: Vec<DiscourseNode>) -> Self {
        Self {
            label: label.into(),
            children,
            id: None,
        }
    }

    /// True for "N" and "S" nodes.
    pub fn is_role(&self) -> bool {
        self.label == NUCLEUS || self.label == SATELLITE
    }

    /// The wrapped subtree of a role node.
    pub fn role_content(&self) -> Option<&DiscourseNode> {
        match self.children.as_slice() {
            [only] if self.is_role() => Some(only),
            _ => None,
        }
    }
}

impl PartialEq for Internal {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && self.children == other.children
    }
}

impl Eq for Internal {}

/// A node of the canonical discourse tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscourseNode {
    Leaf(Edu),
    Internal(Internal),
}

impl DiscourseNode {
    /// A leaf holding one EDU.
    pub fn leaf(text: impl Into<String>) -> Self {
        DiscourseNode::Leaf(Edu::new(text))
    }

    /// An internal node; an empty child list is allowed (the empty tree uses it).
    pub fn internal(label: impl Into<String>, children: Vec<DiscourseNode>) -> Self {
        DiscourseNode::Internal(Internal::new(label, children))
    }

    /// Wrap a subtree in a nucleus role node.
    pub fn nucleus(content: DiscourseNode) -> Self {
        Self::internal(NUCLEUS, vec![content])
    }

    /// Wrap a subtree in a satellite role node.
    pub fn satellite(content: DiscourseNode) -> Self {
        Self::internal(SATELLITE, vec![content])
    }

    pub fn with_id(mut self, id: NodeId) -> Self {
        match &mut self {
            DiscourseNode::Leaf(edu) => edu.id = Some(id),
            DiscourseNode::Internal(node) => node.id = Some(id),
        }
        self
    }

    pub fn id(&self) -> Option<NodeId> {
        match self {
            DiscourseNode::Leaf(edu) => edu.id,
            DiscourseNode::Internal(node) => node.id,
        }
    }

    /// The relation name, role tag or leaf text.
    pub fn label(&self) -> &str {
        match self {
            DiscourseNode::Leaf(edu) => &edu.text,
            DiscourseNode::Internal(node) => &node.label,
        }
    }

    pub fn children(&self) -> &[DiscourseNode] {
        match self {
            DiscourseNode::Leaf(_) => &[],
            DiscourseNode::Internal(node) => &node.children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, DiscourseNode::Leaf(_))
    }

    pub fn as_internal(&self) -> Option<&Internal> {
        match self {
            DiscourseNode::Internal(node) => Some(node),
            DiscourseNode::Leaf(_) => None,
        }
    }

    /// True for a relation node: internal and not a role tag.
    pub fn is_relation(&self) -> bool {
        matches!(self, DiscourseNode::Internal(node) if !node.is_role() && !node.children.is_empty())
    }

    /// Pre-order traversal (parent before children), starting with this node.
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Post-order traversal (children before parent), ending with this node.
    pub fn post_order(&self) -> PostOrder<'_> {
        PostOrder {
            stack: vec![(self, false)],
        }
    }

    /// EDU texts from left to right.
    pub fn leaves(&self) -> Vec<&str> {
        self.pre_order()
            .filter_map(|node| match node {
                DiscourseNode::Leaf(edu) => Some(edu.text.as_str()),
                DiscourseNode::Internal(_) => None,
            })
            .collect()
    }

    /// Number of EDUs below (or at) this node.
    pub fn edu_count(&self) -> usize {
        self.pre_order().filter(|node| node.is_leaf()).count()
    }

    /// Length of the longest root-to-leaf path, counted in edges.
    pub fn height(&self) -> usize {
        self.children()
            .iter()
            .map(|child| child.height() + 1)
            .max()
            .unwrap_or(0)
    }
}

impl From<&str> for DiscourseNode {
    fn from(text: &str) -> Self {
        DiscourseNode::leaf(text)
    }
}

impl From<String> for DiscourseNode {
    fn from(text: String) -> Self {
        DiscourseNode::leaf(text)
    }
}

/// Bracketed one-line rendering, handy in assertion messages.
impl fmt::Display for DiscourseNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscourseNode::Leaf(edu) => write!(f, "{:?}", edu.text),
            DiscourseNode::Internal(node) => {
                write!(f, "({}", node.label)?;
                for child in &node.children {
                    write!(f, " {}", child)?;
                }
                write!(f, ")")
            }
        }
    }
}

pub struct PreOrder<'a> {
    stack: Vec<&'a DiscourseNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a DiscourseNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

pub struct PostOrder<'a> {
    stack: Vec<(&'a DiscourseNode, bool)>,
}

impl<'a> Iterator for PostOrder<'a> {
    type Item = &'a DiscourseNode;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, expanded) = self.stack.pop()?;
            if expanded || node.children().is_empty() {
                return Some(node);
            }
            self.stack.push((node, true));
            self.stack
                .extend(node.children().iter().rev().map(|child| (child, false)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DiscourseNode {
        DiscourseNode::internal(
            "elaboration",
            vec![
                DiscourseNode::nucleus("eins".into()),
                DiscourseNode::satellite(DiscourseNode::internal(
                    "joint",
                    vec![
                        DiscourseNode::nucleus("zwei".into()),
                        DiscourseNode::nucleus("drei".into()),
                    ],
                )),
            ],
        )
    }

    #[test]
    fn test_leaves_in_order() {
        assert_eq!(sample().leaves(), vec!["eins", "zwei", "drei"]);
        assert_eq!(sample().edu_count(), 3);
    }

    #[test]
    fn test_pre_order_labels() {
        let tree = sample();
        let labels: Vec<&str> = tree.pre_order().map(|n| n.label()).collect();
        assert_eq!(
            labels,
            vec!["elaboration", "N", "eins", "S", "joint", "N", "zwei", "N", "drei"]
        );
    }

    #[test]
    fn test_post_order_labels() {
        let tree = sample();
        let labels: Vec<&str> = tree.post_order().map(|n| n.label()).collect();
        assert_eq!(
            labels,
            vec!["eins", "N", "zwei", "N", "drei", "N", "joint", "S", "elaboration"]
        );
    }

    #[test]
    fn test_equality_ignores_ids() {
        let a = DiscourseNode::nucleus(DiscourseNode::leaf("foo").with_id(3));
        let b = DiscourseNode::nucleus(DiscourseNode::leaf("foo").with_id(17));
        assert_eq!(a, b);
        assert_ne!(a, DiscourseNode::satellite("foo".into()));
    }

    #[test]
    fn test_height_and_kinds() {
        let tree = sample();
        assert_eq!(tree.height(), 4);
        assert!(tree.is_relation());
        assert!(!tree.children()[0].is_relation());
        assert!(tree.children()[0].children()[0].is_leaf());
    }

    #[test]
    fn test_display() {
        let node = DiscourseNode::internal(
            "circumstance",
            vec![
                DiscourseNode::satellite("foo".into()),
                DiscourseNode::nucleus("bar".into()),
            ],
        );
        assert_eq!(node.to_string(), r#"(circumstance (S "foo") (N "bar"))"#);
    }
}
