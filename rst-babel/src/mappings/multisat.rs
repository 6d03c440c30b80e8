//! Merges chains of mononuclear relations that share one nucleus.
//!
//! # The High-Level Concept
//!
//! The canonical tree is binary: a nucleus with three satellites is three nested relations.
//! Some notations (rst.sty's `\dirrel`) instead write "one nucleus, N satellites" as a single
//! block. This module finds such chains and flattens them back into slots.
//!
//! # The Algorithm
//!
//! 1. Start at a mononuclear relation. Record its satellite on the left or right side.
//! 2. If its nucleus is itself a mononuclear relation, descend into it and repeat.
//! 3. Stop at the first leaf or multinuclear nucleus: that is the shared nucleus.
//! 4. Left satellites were met outermost first, which is already textual order. Right
//!    satellites were met outermost first too, which is the reverse of textual order.
//!
//! The result lists every slot in its original left-to-right position.

use rst_parser::rst::ast::{DiscourseNode, Internal};
use rst_parser::rst::error::ConversionResult;
use rst_parser::rst::relations::{classify_node, NodeRelation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<'a> {
    Satellite {
        relation: &'a str,
        content: &'a DiscourseNode,
    },
    Nucleus(&'a DiscourseNode),
}

/// Merge the mononuclear chain starting at `node`.
///
/// Returns `None` when `node` is not a mononuclear relation.
pub fn merge_satellites(node: &Internal) -> ConversionResult<Option<Vec<Slot<'_>>>> {
    let mut link = match mononuclear(node)? {
        Some(link) => link,
        None => return Ok(None),
    };
    let mut left = Vec::new();
    let mut right = Vec::new();

    let nucleus = loop {
        let (relation, nucleus, satellite, satellite_first) = link;
        let slot = Slot::Satellite {
            relation,
            content: satellite,
        };
        if satellite_first {
            left.push(slot);
        } else {
            right.push(slot);
        }

        match nucleus.as_internal().filter(|inner| !inner.is_role()) {
            Some(inner) => match mononuclear(inner)? {
                Some(next) => link = next,
                None => break nucleus,
            },
            None => break nucleus,
        }
    };

    right.reverse();
    let mut slots = left;
    slots.push(Slot::Nucleus(nucleus));
    slots.extend(right);
    Ok(Some(slots))
}

type Link<'a> = (&'a str, &'a DiscourseNode, &'a DiscourseNode, bool);

fn mononuclear(node: &Internal) -> ConversionResult<Option<Link<'_>>> {
    Ok(match classify_node(node)? {
        NodeRelation::Mononuclear {
            relation,
            nucleus,
            satellite,
            satellite_first,
        } => Some((relation, nucleus, satellite, satellite_first)),
        NodeRelation::Multinuclear { .. } => None,
    })
}
