//! Defines the flat record set of the exchange format.

use std::collections::BTreeMap;

use rst_parser::rst::ast::NodeId;
use rst_parser::rst::error::{ConversionError, ConversionResult};
use rst_parser::rst::relations::{is_span, RelationType, SPAN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupType {
    Span,
    Multinuc,
}

impl GroupType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "span" => Some(GroupType::Span),
            "multinuc" => Some(GroupType::Multinuc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupType::Span => "span",
            GroupType::Multinuc => "multinuc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKind {
    /// A leaf: one EDU.
    Segment { text: String },
    /// An internal node.
    Group(GroupType),
}

/// One node of the exchange graph. Records point at their parent; children are implied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    /// Relation to the parent; `None` and `"span"` both mark a structural nucleus.
    pub relname: Option<String>,
    pub kind: RecordKind,
}

impl Record {
    pub fn segment(id: NodeId, text: impl Into<String>) -> Self {
        Self {
            id,
            parent: None,
            relname: None,
            kind: RecordKind::Segment { text: text.into() },
        }
    }

    pub fn group(id: NodeId, group_type: GroupType) -> Self {
        Self {
            id,
            parent: None,
            relname: None,
            kind: RecordKind::Group(group_type),
        }
    }

    /// Attach this record to a parent under the given relation.
    pub fn under(mut self, parent: NodeId, relname: impl Into<String>) -> Self {
        self.parent = Some(parent);
        self.relname = Some(relname.into());
        self
    }

    pub fn is_segment(&self) -> bool {
        matches!(self.kind, RecordKind::Segment { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            RecordKind::Segment { text } => Some(text),
            RecordKind::Group(_) => None,
        }
    }

    pub fn group_type(&self) -> Option<GroupType> {
        match self.kind {
            RecordKind::Group(group_type) => Some(group_type),
            RecordKind::Segment { .. } => None,
        }
    }
}

/// The exchange form: relation declarations plus an unordered set of records.
///
/// `records` keeps the order the records were read in. Segment order within it is the EDU
/// order; group positions carry no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatGraph {
    pub relations: BTreeMap<String, RelationType>,
    pub records: Vec<Record>,
}

impl FlatGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a relation name. Redeclaring with the same type is a no-op; "span" is reserved.
    pub fn declare(&mut self, name: &str, relation_type: RelationType) -> ConversionResult<()> {
        if is_span(Some(name)) {
            return Err(ConversionError::malformed(format!(
                "'{}' is reserved for structural nuclei and can not be declared as a relation",
                if name.is_empty() { SPAN } else { name }
            )));
        }
        match self.relations.get(name) {
            Some(existing) if *existing != relation_type => {
                Err(ConversionError::malformed(format!(
                    "relation '{}' is declared both {} and {}",
                    name, existing, relation_type
                )))
            }
            Some(_) => Ok(()),
            None => {
                self.relations.insert(name.to_string(), relation_type);
                Ok(())
            }
        }
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn relation_type(&self, name: &str) -> Option<RelationType> {
        self.relations.get(name).copied()
    }

    /// Segments in EDU order.
    pub fn segments(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(|record| record.is_segment())
    }

    pub fn groups(&self) -> impl Iterator<Item = &Record> {
        self.records.iter().filter(|record| !record.is_segment())
    }

    pub fn get(&self, id: NodeId) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
