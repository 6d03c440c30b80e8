//! Testing utilities
//!
//!     Discourse trees are deep and repetitive, and spelling them out with the plain
//!     constructors buries the shape under wrapper calls. The factories below read close to
//!     the bracket notation used in assertion messages:
//!
//!     ```rust,ignore
//!     use rst_parser::rst::testing::{rel, nuc, sat, edu};
//!
//!     // (circumstance (S "foo") (N "bar"))
//!     let tree = rel("circumstance", [sat(edu("foo")), nuc(edu("bar"))]);
//!     ```
//!
//!     [`samples`] holds a few verified trees covering every root shape and relation kind.
//!     Format tests should reach for those before inventing new fixtures.
//!
//!     [`assert_same_tree`] compares structurally (ids ignored) and prints both trees in
//!     bracket notation on mismatch.

use super::ast::{DiscourseNode, DiscourseTree};

/// A leaf.
pub fn edu(text: &str) -> DiscourseNode {
    DiscourseNode::leaf(text)
}

/// A nucleus role node.
pub fn nuc(content: DiscourseNode) -> DiscourseNode {
    DiscourseNode::nucleus(content)
}

/// A satellite role node.
pub fn sat(content: DiscourseNode) -> DiscourseNode {
    DiscourseNode::satellite(content)
}

/// A relation node over role children.
pub fn rel<I>(label: &str, children: I) -> DiscourseNode
where
    I: IntoIterator<Item = DiscourseNode>,
{
    DiscourseNode::internal(label, children.into_iter().collect())
}

/// A tree rooted at the given node.
pub fn tree(root: DiscourseNode) -> DiscourseTree {
    DiscourseTree::new(root)
}

#[track_caller]
pub fn assert_same_tree(actual: &DiscourseTree, expected: &DiscourseTree) {
    assert!(
        actual == expected,
        "trees differ\n  actual:   {}\n  expected: {}",
        actual.root(),
        expected.root()
    );
}

/// Verified sample trees.
pub mod samples {
    use super::*;

    pub fn empty() -> DiscourseTree {
        DiscourseTree::empty()
    }

    pub fn single() -> DiscourseTree {
        DiscourseTree::single("foo")
    }

    /// `(circumstance (S "sat first") (N "nuc second"))`
    pub fn sat_before_nuc() -> DiscourseTree {
        tree(rel(
            "circumstance",
            [sat(edu("sat first")), nuc(edu("nuc second"))],
        ))
    }

    /// `(circumstance (N "nuc first") (S "sat second"))`
    pub fn nuc_before_sat() -> DiscourseTree {
        tree(rel(
            "circumstance",
            [nuc(edu("nuc first")), sat(edu("sat second"))],
        ))
    }

    pub fn joint() -> DiscourseTree {
        tree(rel(
            "joint",
            [nuc(edu("nuc-1")), nuc(edu("nuc-2")), nuc(edu("nuc-3"))],
        ))
    }

    /// Four EDUs: a contrast satellite before a span whose nucleus carries an elaboration,
    /// and a multinuclear list nested below a satellite.
    pub fn nested() -> DiscourseTree {
        tree(rel(
            "elaboration",
            [
                nuc(rel(
                    "contrast",
                    [sat(edu("Although they disliked it,")), nuc(edu("they accepted"))],
                )),
                sat(rel(
                    "list",
                    [nuc(edu("because it was cheap")), nuc(edu("and it was near."))],
                )),
            ],
        ))
    }
}
