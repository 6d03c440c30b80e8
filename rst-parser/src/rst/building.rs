//! Tree building
//!
//!     The contract between bracket format readers and the canonical tree. A reader interprets
//!     its own bracket syntax into [`BracketNode`]s: each node knows its own role (if the format
//!     says), the relation it holds to its parent (if the format says), and either a text body
//!     or ordered children. [`build_tree`] does the rest:
//!
//!         1. classify each node's children with the shared relation classifier
//!         2. build the core: the lone span nucleus, or a multinuclear relation over the nuclei
//!         3. fold the satellites around the core (nearest innermost)
//!
//!     A node whose only child is a span nucleus collapses into that child. The root, if it
//!     turns out to be a single leaf, is wrapped in a nucleus role node.

use super::ast::{DiscourseNode, DiscourseTree};
use super::error::{ConversionError, ConversionResult};
use super::relations::{attach_satellites, classify, Nuclearity, Owner, RawChild};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BracketBody {
    Text(String),
    Children(Vec<BracketNode>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BracketNode {
    pub role: Option<Nuclearity>,
    pub relation: Option<String>,
    pub body: BracketBody,
    /// Byte offset in the source, for error messages.
    pub offset: usize,
}

impl BracketNode {
    pub fn text(
        role: Option<Nuclearity>,
        relation: Option<String>,
        text: impl Into<String>,
        offset: usize,
    ) -> Self {
        Self {
            role,
            relation,
            body: BracketBody::Text(text.into()),
            offset,
        }
    }

    pub fn children(
        role: Option<Nuclearity>,
        relation: Option<String>,
        children: Vec<BracketNode>,
        offset: usize,
    ) -> Self {
        Self {
            role,
            relation,
            body: BracketBody::Children(children),
            offset,
        }
    }

    fn raw(&self) -> RawChild<'_> {
        RawChild {
            role: self.role,
            relation: self.relation.as_deref(),
            declared: None,
        }
    }
}

/// Build the canonical tree from a reader's root node.
pub fn build_tree(root: BracketNode) -> ConversionResult<DiscourseTree> {
    let node = build_node(root)?;
    Ok(match node {
        leaf @ DiscourseNode::Leaf(_) => DiscourseTree::new(DiscourseNode::nucleus(leaf)),
        relation => DiscourseTree::new(relation),
    })
}

fn build_node(node: BracketNode) -> ConversionResult<DiscourseNode> {
    let offset = node.offset;
    let children = match node.body {
        BracketBody::Text(text) => return Ok(DiscourseNode::leaf(text)),
        BracketBody::Children(children) => children,
    };
    if children.is_empty() {
        return Err(ConversionError::malformed_at(
            "node has neither text nor children",
            offset,
        ));
    }

    let raw: Vec<RawChild<'_>> = children.iter().map(BracketNode::raw).collect();
    let classification =
        classify(Owner::Unspecified, &raw).map_err(|err| with_offset(err, offset))?;

    let built = children
        .into_iter()
        .map(build_node)
        .collect::<ConversionResult<Vec<_>>>()?;
    let placement = classification.place(built, classification.default_pivot());

    let core = match classification.multinuclear {
        Some(name) => DiscourseNode::internal(
            name,
            placement
                .nuclei
                .into_iter()
                .map(DiscourseNode::nucleus)
                .collect(),
        ),
        None => placement.nuclei.into_iter().next().ok_or_else(|| {
            ConversionError::malformed_at("node has no nucleus", offset)
        })?,
    };

    Ok(attach_satellites(core, placement.left, placement.right))
}

fn with_offset(err: ConversionError, offset: usize) -> ConversionError {
    match err {
        ConversionError::MalformedInput {
            message,
            offset: None,
        } => ConversionError::malformed_at(message, offset),
        other => other,
    }
}
