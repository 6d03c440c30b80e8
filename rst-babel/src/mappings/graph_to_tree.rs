//! Builds the canonical tree from a flat exchange graph.
//!
//! # The High-Level Concept
//!
//! The exchange format stores parent pointers, not ordered child lists, because the tools
//! producing it are graph editors. The one ordering fact it guarantees is the document order
//! of its segments: the EDU order. Child order is reconstructed from that alone, never from
//! record ids.
//!
//! Nuclearity follows the exchange format's conventions: a satellite points at the element
//! it is a satellite of (a segment or a group), a span group passes its nucleus through, and
//! a multinuclear group becomes a relation over its nuclei.
//!
//! # The Algorithm
//!
//! 1. **Indexing:**
//!    - Map record ids to records; duplicates are malformed
//!    - Number segments by their position in the document
//!
//! 2. **Linking:**
//!    - Build the parent → children map
//!    - A parent id naming no record is a disconnected graph
//!    - A parent chain longer than the record count is a cycle
//!
//! 3. **Ordering:**
//!    - Compute the leftmost EDU covered by every record
//!    - Sort every child list, and the roots, by it
//!
//! 4. **Materializing:**
//!    - Classify each record's children with the shared classifier
//!    - Build the core (leaf, span nucleus, or multinuclear relation)
//!    - Fold the satellites around it, nearest innermost
//!
//! 5. **Rooting:**
//!    - One root: its subtree (a lone leaf is wrapped as a nucleus)
//!    - Several roots: a synthetic multinuclear relation over them

use std::collections::HashMap;

use rst_parser::rst::ast::{DiscourseNode, DiscourseTree, NodeId};
use rst_parser::rst::error::{ConversionError, ConversionResult};
use rst_parser::rst::relations::{attach_satellites, classify, Owner, RawChild};
use tracing::{debug, warn};

use crate::ir::{FlatGraph, GroupType, RecordKind};

/// Label of the synthetic relation wrapping a forest.
pub const VIRTUAL_ROOT: &str = "virtual-root";

/// Reconstruct the canonical tree from a record set.
pub fn graph_to_tree(graph: &FlatGraph) -> ConversionResult<DiscourseTree> {
    if graph.is_empty() {
        return Ok(DiscourseTree::empty());
    }
    let tree = GraphBuilder::new(graph)?.build()?;
    debug!(
        records = graph.len(),
        edus = tree.edus().len(),
        "built discourse tree from flat graph"
    );
    Ok(tree)
}

struct GraphBuilder<'g> {
    graph: &'g FlatGraph,
    /// Record position → its own EDU index, for segments.
    edu_position: Vec<Option<usize>>,
    /// Record position → leftmost EDU index covered.
    leftmost: Vec<usize>,
    /// Parent id → child record positions, ordered.
    children: HashMap<NodeId, Vec<usize>>,
    /// Root record positions, ordered.
    roots: Vec<usize>,
}

impl<'g> GraphBuilder<'g> {
    fn new(graph: &'g FlatGraph) -> ConversionResult<Self> {
        let records = &graph.records;

        let mut index: HashMap<NodeId, usize> = HashMap::with_capacity(records.len());
        let mut edu_position = Vec::with_capacity(records.len());
        let mut next_edu = 0;
        for (position, record) in records.iter().enumerate() {
            if index.insert(record.id, position).is_some() {
                return Err(ConversionError::malformed(format!(
                    "duplicate record id {}",
                    record.id
                )));
            }
            if record.is_segment() {
                edu_position.push(Some(next_edu));
                next_edu += 1;
            } else {
                edu_position.push(None);
            }
        }

        let mut children: HashMap<NodeId, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();
        for (position, record) in records.iter().enumerate() {
            match record.parent {
                Some(parent) if !index.contains_key(&parent) => {
                    return Err(ConversionError::DisconnectedGraph {
                        node: record.id,
                        parent,
                    });
                }
                Some(parent) => children.entry(parent).or_default().push(position),
                None => roots.push(position),
            }
        }

        for record in records {
            let mut steps = 0;
            let mut current = record;
            while let Some(parent) = current.parent {
                steps += 1;
                if steps > records.len() {
                    return Err(ConversionError::CyclicGraph { node: record.id });
                }
                current = &records[index[&parent]];
            }
        }

        let mut builder = Self {
            graph,
            edu_position,
            leftmost: vec![usize::MAX; records.len()],
            children,
            roots,
        };
        for root in builder.roots.clone() {
            builder.compute_leftmost(root)?;
        }

        let leftmost = &builder.leftmost;
        for list in builder.children.values_mut() {
            list.sort_by_key(|&position| leftmost[position]);
        }
        builder.roots.sort_by_key(|&position| leftmost[position]);
        Ok(builder)
    }

    fn compute_leftmost(&mut self, position: usize) -> ConversionResult<usize> {
        let graph = self.graph;
        let record = &graph.records[position];
        let child_positions = self.children.get(&record.id).cloned().unwrap_or_default();

        let mut leftmost = self.edu_position[position];
        for child in child_positions {
            let child_leftmost = self.compute_leftmost(child)?;
            leftmost = Some(leftmost.map_or(child_leftmost, |l| l.min(child_leftmost)));
        }

        let leftmost = leftmost.ok_or_else(|| {
            ConversionError::malformed(format!("group {} covers no segment", record.id))
        })?;
        self.leftmost[position] = leftmost;
        Ok(leftmost)
    }

    fn build(&self) -> ConversionResult<DiscourseTree> {
        match self.roots.as_slice() {
            [] => Err(ConversionError::CyclicGraph {
                node: self.graph.records[0].id,
            }),
            [root] => {
                let node = self.build_node(*root)?;
                Ok(if node.is_leaf() {
                    DiscourseTree::new(DiscourseNode::nucleus(node))
                } else {
                    DiscourseTree::new(node)
                })
            }
            roots => {
                warn!(
                    roots = roots.len(),
                    "graph has several roots, wrapping them in '{}'", VIRTUAL_ROOT
                );
                let nuclei = roots
                    .iter()
                    .map(|&root| self.build_node(root).map(DiscourseNode::nucleus))
                    .collect::<ConversionResult<Vec<_>>>()?;
                Ok(DiscourseTree::new(DiscourseNode::internal(
                    VIRTUAL_ROOT,
                    nuclei,
                )))
            }
        }
    }

    fn build_node(&self, position: usize) -> ConversionResult<DiscourseNode> {
        let records = &self.graph.records;
        let record = &records[position];
        let children: &[usize] = self
            .children
            .get(&record.id)
            .map(Vec::as_slice)
            .unwrap_or(&[]);

        let owner = match record.kind {
            RecordKind::Segment { .. } => Owner::Segment,
            RecordKind::Group(GroupType::Span) => Owner::Span,
            RecordKind::Group(GroupType::Multinuc) => Owner::Multinuc,
        };
        let raw: Vec<RawChild<'_>> = children
            .iter()
            .map(|&child| {
                let relname = records[child].relname.as_deref();
                RawChild::record(relname, relname.and_then(|name| self.graph.relation_type(name)))
            })
            .collect();
        let classification =
            classify(owner, &raw).map_err(|err| in_record(err, record.id))?;

        let pivot = match self.edu_position[position] {
            Some(own) => children
                .iter()
                .filter(|&&child| self.leftmost[child] < own)
                .count(),
            None => classification.default_pivot(),
        };

        let built = children
            .iter()
            .map(|&child| self.build_node(child))
            .collect::<ConversionResult<Vec<_>>>()?;
        let placement = classification.place(built, pivot);

        let core = match (&record.kind, classification.multinuclear) {
            (RecordKind::Segment { text }, _) => {
                DiscourseNode::leaf(text.clone()).with_id(record.id)
            }
            (RecordKind::Group(_), Some(name)) => DiscourseNode::internal(
                name,
                placement
                    .nuclei
                    .into_iter()
                    .map(DiscourseNode::nucleus)
                    .collect(),
            )
            .with_id(record.id),
            (RecordKind::Group(_), None) => placement.nuclei.into_iter().next().ok_or_else(|| {
                ConversionError::malformed(format!("group {} has no nucleus", record.id))
            })?,
        };

        Ok(attach_satellites(core, placement.left, placement.right))
    }
}

fn in_record(err: ConversionError, id: NodeId) -> ConversionError {
    match err {
        ConversionError::MalformedInput { message, offset } => ConversionError::MalformedInput {
            message: format!("record {}: {}", id, message),
            offset,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Record;
    use rst_parser::rst::error::ErrorKind;
    use rst_parser::rst::relations::RelationType;
    use rst_parser::rst::testing::{edu, nuc, rel, sat, tree};

    fn contrast_graph() -> FlatGraph {
        let mut graph = FlatGraph::new();
        graph.declare("Contrast", RelationType::Mononuclear).unwrap();
        graph.push(Record::segment(3, "Although they didn't like it,").under(5, "Contrast"));
        graph.push(Record::segment(5, "they accepted the offer.").under(1, "span"));
        graph.push(Record::group(1, GroupType::Span));
        graph
    }

    #[test]
    fn test_satellite_attached_to_segment() {
        let built = graph_to_tree(&contrast_graph()).unwrap();
        let expected = tree(rel(
            "Contrast",
            [
                sat(edu("Although they didn't like it,")),
                nuc(edu("they accepted the offer.")),
            ],
        ));
        assert_eq!(built, expected);
        assert_eq!(built.find(3).map(|n| n.label()), Some("Although they didn't like it,"));
    }

    #[test]
    fn test_record_order_does_not_matter_for_groups() {
        let mut graph = contrast_graph();
        graph.records.rotate_right(1);
        let built = graph_to_tree(&graph).unwrap();
        assert_eq!(built, graph_to_tree(&contrast_graph()).unwrap());
    }

    #[test]
    fn test_multinuc_with_satellite_on_group() {
        let mut graph = FlatGraph::new();
        graph.declare("list", RelationType::Multinuclear).unwrap();
        graph.declare("elaboration", RelationType::Mononuclear).unwrap();
        graph.push(Record::segment(1, "a").under(4, "list"));
        graph.push(Record::segment(2, "b").under(4, "list"));
        graph.push(Record::segment(3, "c").under(4, "elaboration"));
        graph.push(Record::group(4, GroupType::Multinuc));

        let expected = tree(rel(
            "elaboration",
            [
                nuc(rel("list", [nuc(edu("a")), nuc(edu("b"))])),
                sat(edu("c")),
            ],
        ));
        assert_eq!(graph_to_tree(&graph).unwrap(), expected);
    }

    #[test]
    fn test_several_satellites_on_one_segment() {
        let mut graph = FlatGraph::new();
        graph.push(Record::segment(1, "s1").under(3, "background"));
        graph.push(Record::segment(2, "s2").under(3, "cause"));
        graph.push(Record::segment(3, "n"));
        graph.push(Record::segment(4, "s3").under(3, "result"));

        let expected = tree(rel(
            "result",
            [
                nuc(rel(
                    "background",
                    [
                        sat(edu("s1")),
                        nuc(rel("cause", [sat(edu("s2")), nuc(edu("n"))])),
                    ],
                )),
                sat(edu("s3")),
            ],
        ));
        assert_eq!(graph_to_tree(&graph).unwrap(), expected);
    }

    #[test]
    fn test_single_segment() {
        let mut graph = FlatGraph::new();
        graph.push(Record::segment(1, "foo"));
        assert_eq!(graph_to_tree(&graph).unwrap(), DiscourseTree::single("foo"));
    }

    #[test]
    fn test_empty_graph() {
        assert_eq!(graph_to_tree(&FlatGraph::new()).unwrap(), DiscourseTree::empty());
    }

    #[test]
    fn test_forest_gets_virtual_root() {
        let mut graph = FlatGraph::new();
        graph.push(Record::segment(7, "second"));
        graph.push(Record::segment(2, "first"));
        let built = graph_to_tree(&graph).unwrap();
        let expected = tree(rel(VIRTUAL_ROOT, [nuc(edu("second")), nuc(edu("first"))]));
        assert_eq!(built, expected);
    }

    #[test]
    fn test_missing_parent() {
        let mut graph = FlatGraph::new();
        graph.push(Record::segment(1, "a").under(9, "span"));
        let err = graph_to_tree(&graph).unwrap_err();
        assert_eq!(err, ConversionError::DisconnectedGraph { node: 1, parent: 9 });
    }

    #[test]
    fn test_cycle() {
        let mut graph = FlatGraph::new();
        graph.push(Record::segment(1, "a").under(2, "span"));
        graph.push(Record::group(2, GroupType::Span).under(3, "span"));
        graph.push(Record::group(3, GroupType::Span).under(2, "span"));
        let err = graph_to_tree(&graph).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CyclicGraph);
    }

    #[test]
    fn test_multinuc_with_one_child_is_rejected() {
        let mut graph = FlatGraph::new();
        graph.declare("joint", RelationType::Multinuclear).unwrap();
        graph.push(Record::segment(1, "a").under(2, "joint"));
        graph.push(Record::group(2, GroupType::Multinuc));
        let err = graph_to_tree(&graph).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err.to_string().contains("record 2"));
    }

    #[test]
    fn test_empty_group_is_rejected() {
        let mut graph = FlatGraph::new();
        graph.push(Record::segment(1, "a"));
        graph.push(Record::group(2, GroupType::Span));
        let err = graph_to_tree(&graph).unwrap_err();
        assert!(err.to_string().contains("group 2 covers no segment"));
    }

    #[test]
    fn test_duplicate_ids() {
        let mut graph = FlatGraph::new();
        graph.push(Record::segment(1, "a"));
        graph.push(Record::segment(1, "b"));
        assert!(graph_to_tree(&graph).is_err());
    }
}
