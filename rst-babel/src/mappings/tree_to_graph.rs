//! Converts a canonical tree into the flat exchange graph.
//!
//! # The High-Level Concept
//!
//! This is the inverse of `graph_to_tree`. Every bare node (leaf or relation; role wrappers
//! are skipped) becomes one record, numbered 1..n in pre-order, root first. The numbering is
//! deterministic, so writing the same tree twice yields the same bytes.
//!
//! # The Algorithm
//!
//! 1. **Leaves** become segments.
//!
//! 2. **Mononuclear relations** become a span group. The nucleus points at the group with
//!    relname "span"; the satellite points at the nucleus element with the relation name,
//!    the way annotation tools attach satellites.
//!
//! 3. **Multinuclear relations** become a multinuc group; every nucleus points at it with
//!    the relation name.
//!
//! 4. **Declarations:** every relation name used is declared once with its type. A name used
//!    both ways can not be declared and is reported as unsupported.
//!
//! Records are emitted segments first (in EDU order, which the reader relies on), then
//! groups.
//!
//! The empty tree yields an empty graph. A single EDU yields one parentless segment.

use rst_parser::rst::ast::{DiscourseNode, DiscourseTree, NodeId, RootContent};
use rst_parser::rst::error::{ConversionError, ConversionResult};
use rst_parser::rst::relations::{classify_node, NodeRelation, RelationType, SPAN};

use crate::ir::{FlatGraph, GroupType, Record};

/// Flatten a canonical tree into exchange records.
pub fn tree_to_graph(tree: &DiscourseTree) -> ConversionResult<FlatGraph> {
    let mut emitter = Emitter::default();
    match tree.content() {
        RootContent::Empty => {}
        RootContent::Edu(edu) => {
            let id = emitter.allocate();
            emitter.records.push(Record::segment(id, edu.text.clone()));
        }
        RootContent::Relation(_) => {
            emitter.emit(root_node(tree.root()), None)?;
        }
    }

    let mut graph = FlatGraph::new();
    for (name, relation_type) in emitter.relations {
        graph
            .declare(&name, relation_type)
            .map_err(|err| ConversionError::unsupported(err.to_string()))?;
    }
    let (segments, groups): (Vec<Record>, Vec<Record>) =
        emitter.records.into_iter().partition(Record::is_segment);
    graph.records = segments;
    graph.records.extend(groups);
    Ok(graph)
}

/// The root with role wrappers looked through.
fn root_node(mut node: &DiscourseNode) -> &DiscourseNode {
    while let Some(inner) = node.as_internal().and_then(|n| n.role_content()) {
        node = inner;
    }
    node
}

#[derive(Default)]
struct Emitter {
    /// Records in pre-order of the textual tree.
    records: Vec<Record>,
    relations: Vec<(String, RelationType)>,
    last_id: NodeId,
}

impl Emitter {
    fn allocate(&mut self) -> NodeId {
        self.last_id += 1;
        self.last_id
    }

    fn use_relation(&mut self, name: &str, relation_type: RelationType) -> ConversionResult<()> {
        match self.relations.iter().find(|(existing, _)| existing == name) {
            Some((_, existing_type)) if *existing_type != relation_type => {
                Err(ConversionError::unsupported(format!(
                    "relation '{}' is used both as {} and {}",
                    name, existing_type, relation_type
                )))
            }
            Some(_) => Ok(()),
            None => {
                self.relations.push((name.to_string(), relation_type));
                Ok(())
            }
        }
    }

    /// Emit `node` attached to `parent` (id, relname); returns the position of its record.
    fn emit(
        &mut self,
        node: &DiscourseNode,
        parent: Option<(NodeId, &str)>,
    ) -> ConversionResult<usize> {
        let id = self.allocate();
        let position = self.records.len();
        let attach = |record: Record| match parent {
            Some((parent, relname)) => record.under(parent, relname),
            None => record,
        };

        let internal = match node {
            DiscourseNode::Leaf(edu) => {
                self.records.push(attach(Record::segment(id, edu.text.clone())));
                return Ok(position);
            }
            DiscourseNode::Internal(internal) => internal,
        };

        match classify_node(internal)? {
            NodeRelation::Mononuclear {
                relation,
                nucleus,
                satellite,
                satellite_first,
            } => {
                self.use_relation(relation, RelationType::Mononuclear)?;
                self.records.push(attach(Record::group(id, GroupType::Span)));

                // textual order keeps the segments in EDU order; a leading satellite learns
                // its parent once the nucleus has an id
                if satellite_first {
                    let satellite_at = self.emit(satellite, None)?;
                    let nucleus_at = self.emit(nucleus, Some((id, SPAN)))?;
                    let nucleus_id = self.records[nucleus_at].id;
                    let record = &mut self.records[satellite_at];
                    record.parent = Some(nucleus_id);
                    record.relname = Some(relation.to_string());
                } else {
                    let nucleus_at = self.emit(nucleus, Some((id, SPAN)))?;
                    let nucleus_id = self.records[nucleus_at].id;
                    self.emit(satellite, Some((nucleus_id, relation)))?;
                }
            }
            NodeRelation::Multinuclear { relation, nuclei } => {
                self.use_relation(relation, RelationType::Multinuclear)?;
                self.records.push(attach(Record::group(id, GroupType::Multinuc)));
                for nucleus in nuclei {
                    self.emit(nucleus, Some((id, relation)))?;
                }
            }
        }
        Ok(position)
    }
}
