//! Shared strategies for the rst-babel integration tests.

#![allow(dead_code)]

use proptest::prelude::*;
use rst_parser::rst::ast::{DiscourseNode, DiscourseTree};
use rst_parser::rst::lexing::is_word;
use rst_parser::rst::testing::{edu, nuc, rel, sat, tree};

/// Mononuclear and multinuclear names are kept apart: rs3 declares each name with one type.
/// "volitional cause" is not a bracket word, so the dis writer refuses trees using it.
const MONONUCLEAR: [&str; 5] = [
    "cause",
    "elaboration",
    "Contrast",
    "background",
    "volitional cause",
];
const MULTINUCLEAR: [&str; 3] = ["joint", "list", "same-unit"];

pub fn edu_text() -> impl Strategy<Value = String> {
    "[A-Za-z][a-z]{0,7}( [a-z,.&<>'\"]{1,8}){0,3}"
}

pub fn subtree() -> impl Strategy<Value = DiscourseNode> {
    let leaf = edu_text().prop_map(|text| edu(&text));
    leaf.prop_recursive(5, 32, 4, |inner| {
        prop_oneof![
            (
                prop::sample::select(MONONUCLEAR.to_vec()),
                any::<bool>(),
                inner.clone(),
                inner.clone(),
            )
                .prop_map(|(name, satellite_first, a, b)| {
                    if satellite_first {
                        rel(name, [sat(a), nuc(b)])
                    } else {
                        rel(name, [nuc(a), sat(b)])
                    }
                }),
            (
                prop::sample::select(MULTINUCLEAR.to_vec()),
                prop::collection::vec(inner, 2..5),
            )
                .prop_map(|(name, nuclei)| rel(name, nuclei.into_iter().map(nuc))),
        ]
    })
}

/// Any canonical tree with at least one EDU.
pub fn discourse_tree() -> impl Strategy<Value = DiscourseTree> {
    subtree().prop_map(|root| {
        if root.is_leaf() {
            tree(nuc(root))
        } else {
            tree(root)
        }
    })
}

/// Whether every relation name in the tree can be written as a dis `rel2par` word.
pub fn dis_writable(tree: &DiscourseTree) -> bool {
    tree.root()
        .pre_order()
        .filter(|node| node.is_relation())
        .all(|node| is_word(node.label()))
}
