//! Relation classifier
//!
//!     The one rule deciding which children of a node are nuclei, which are satellites, and
//!     where the relation name goes. Every reader runs its raw parse through [`classify`]
//!     before building canonical nodes, and every writer runs [`classify_node`] before
//!     serializing one, so formats can not drift apart on nuclearity.
//!
//! The Rule
//!
//!     Each child arrives with what its format knows about it: maybe an explicit role
//!     (bracket formats say Nucleus / Satellite), maybe a relation name, maybe the declared
//!     type of that name (the exchange format declares `rst` or `multinuc` per name).
//!
//!     | role      | relation        | declared   | owner     | attaches as           |
//!     |-----------|-----------------|------------|-----------|-----------------------|
//!     | nucleus   | empty or "span" |            |           | span nucleus          |
//!     | nucleus   | name            |            |           | multinuclear nucleus  |
//!     | satellite | name            |            |           | satellite             |
//!     | satellite | empty or "span" |            |           | error                 |
//!     | -         | empty or "span" |            |           | span nucleus          |
//!     | -         | name            | multinuc   |           | multinuclear nucleus  |
//!     | -         | name            | rst        |           | satellite             |
//!     | -         | name            | -          | multinuc  | multinuclear nucleus  |
//!     | -         | name            | -          | otherwise | satellite             |
//!
//!     "span" is reserved: it marks a purely structural nucleus and never names a relation.
//!
//!     Then per node: a segment owns satellites only; a span owner has exactly one span
//!     nucleus; a multinuclear relation has at least two nuclei sharing one name, and none of
//!     its satellites may sit between them.
//!
//! Satellite Placement
//!
//!     The canonical tree is binary for mononuclear relations. A core with several satellites
//!     is folded into nested relations by [`attach_satellites`]: the satellite nearest to the
//!     core binds innermost, left satellites before right ones. The relation name always
//!     lands on the relation node whose satellite child carries it, never on the nucleus.

use std::fmt;

use super::ast::{DiscourseNode, Internal, NUCLEUS};
use super::error::{ConversionError, ConversionResult};

/// The reserved nucleus marker.
pub const SPAN: &str = "span";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationType {
    Mononuclear,
    Multinuclear,
}

impl RelationType {
    /// Parse the type attribute of an rs3 relation declaration.
    pub fn from_rs3(value: &str) -> Option<Self> {
        match value {
            "rst" => Some(RelationType::Mononuclear),
            "multinuc" => Some(RelationType::Multinuclear),
            _ => None,
        }
    }

    pub fn as_rs3(&self) -> &'static str {
        match self {
            RelationType::Mononuclear => "rst",
            RelationType::Multinuclear => "multinuc",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationType::Mononuclear => f.write_str("mononuclear"),
            RelationType::Multinuclear => f.write_str("multinuclear"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nuclearity {
    Nucleus,
    Satellite,
}

/// What kind of node owns the children being classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    /// An EDU record; its children can only be satellites.
    Segment,
    /// A structural span group.
    Span,
    /// A multinuclear group.
    Multinuc,
    /// A bracket node; roles come with the children.
    Unspecified,
}

/// The raw fields of one child, as a reader found them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawChild<'a> {
    pub role: Option<Nuclearity>,
    pub relation: Option<&'a str>,
    pub declared: Option<RelationType>,
}

impl<'a> RawChild<'a> {
    pub fn nucleus(relation: Option<&'a str>) -> Self {
        Self {
            role: Some(Nuclearity::Nucleus),
            relation,
            declared: None,
        }
    }

    pub fn satellite(relation: &'a str) -> Self {
        Self {
            role: Some(Nuclearity::Satellite),
            relation: Some(relation),
            declared: None,
        }
    }

    /// A child known only by its relation field (exchange-format records).
    pub fn record(relation: Option<&'a str>, declared: Option<RelationType>) -> Self {
        Self {
            role: None,
            relation,
            declared,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SatelliteSlot {
    /// Position among the ordered children.
    pub index: usize,
    pub relation: String,
}

/// The outcome of classifying one node's ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Positions of the nucleus children; empty when the owner is itself the nucleus.
    pub nuclei: Vec<usize>,
    /// Name of the multinuclear relation formed by the nuclei, if there are several.
    pub multinuclear: Option<String>,
    pub satellites: Vec<SatelliteSlot>,
}

impl Classification {
    pub fn relation_type(&self) -> Option<RelationType> {
        if self.multinuclear.is_some() {
            Some(RelationType::Multinuclear)
        } else if !self.satellites.is_empty() {
            Some(RelationType::Mononuclear)
        } else {
            None
        }
    }

    /// The single nucleus of a span or mononuclear node.
    pub fn nucleus(&self) -> Option<usize> {
        match self.nuclei.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// The relation name this node expresses: the multinuclear name, or the name of a lone
    /// satellite.
    pub fn relation_name(&self) -> Option<&str> {
        match (&self.multinuclear, self.satellites.as_slice()) {
            (Some(name), _) => Some(name),
            (None, [only]) => Some(&only.relation),
            _ => None,
        }
    }

    pub fn satellite_indices(&self) -> Vec<usize> {
        self.satellites.iter().map(|slot| slot.index).collect()
    }

    /// Where satellites split into left and right when no other ordering fact is known: at
    /// the first nucleus.
    pub fn default_pivot(&self) -> usize {
        self.nuclei.first().copied().unwrap_or(0)
    }

    /// Sort already built children into nuclei and the satellites on either side of `pivot`.
    pub fn place<T>(&self, children: impl IntoIterator<Item = T>, pivot: usize) -> Placement<T> {
        let mut slots = self.satellites.iter().peekable();
        let mut placement = Placement {
            nuclei: Vec::new(),
            left: Vec::new(),
            right: Vec::new(),
        };
        for (index, child) in children.into_iter().enumerate() {
            match slots.next_if(|slot| slot.index == index) {
                Some(slot) if index < pivot => placement.left.push((slot.relation.clone(), child)),
                Some(slot) => placement.right.push((slot.relation.clone(), child)),
                None => placement.nuclei.push(child),
            }
        }
        placement
    }
}

/// Children of one node, sorted by where they attach. Satellites keep their textual order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement<T> {
    pub nuclei: Vec<T>,
    pub left: Vec<(String, T)>,
    pub right: Vec<(String, T)>,
}

/// True when a relation field marks a purely structural nucleus.
pub fn is_span(relation: Option<&str>) -> bool {
    match relation {
        None => true,
        Some(name) => name.is_empty() || name == SPAN,
    }
}

enum Attachment<'a> {
    SpanNucleus,
    MultiNucleus(&'a str),
    Satellite(&'a str),
}

fn attachment<'a>(owner: Owner, index: usize, child: &RawChild<'a>) -> ConversionResult<Attachment<'a>> {
    let relation = match child.relation {
        Some(name) if !is_span(Some(name)) => name,
        _ => {
            return match child.role {
                Some(Nuclearity::Satellite) => Err(ConversionError::malformed(format!(
                    "satellite child {} carries no relation name",
                    index
                ))),
                _ => Ok(Attachment::SpanNucleus),
            };
        }
    };

    Ok(match child.role {
        Some(Nuclearity::Nucleus) => Attachment::MultiNucleus(relation),
        Some(Nuclearity::Satellite) => Attachment::Satellite(relation),
        None => match child.declared {
            Some(RelationType::Multinuclear) => Attachment::MultiNucleus(relation),
            Some(RelationType::Mononuclear) => Attachment::Satellite(relation),
            None if owner == Owner::Multinuc => Attachment::MultiNucleus(relation),
            None => Attachment::Satellite(relation),
        },
    })
}

/// Classify the ordered children of a node.
pub fn classify(owner: Owner, children: &[RawChild<'_>]) -> ConversionResult<Classification> {
    let mut span_nuclei = Vec::new();
    let mut multi_nuclei: Vec<(usize, &str)> = Vec::new();
    let mut satellites = Vec::new();

    for (index, child) in children.iter().enumerate() {
        match attachment(owner, index, child)? {
            Attachment::SpanNucleus => span_nuclei.push(index),
            Attachment::MultiNucleus(name) => multi_nuclei.push((index, name)),
            Attachment::Satellite(name) => satellites.push(SatelliteSlot {
                index,
                relation: name.to_string(),
            }),
        }
    }

    match owner {
        Owner::Segment => {
            if !span_nuclei.is_empty() || !multi_nuclei.is_empty() {
                return Err(ConversionError::malformed(
                    "a segment can only have satellites attached to it",
                ));
            }
        }
        Owner::Span => {
            if !multi_nuclei.is_empty() {
                return Err(ConversionError::malformed(format!(
                    "span group has a multinuclear child ('{}')",
                    multi_nuclei[0].1
                )));
            }
            if span_nuclei.len() != 1 {
                return Err(ConversionError::malformed(format!(
                    "span group needs exactly one nucleus, found {}",
                    span_nuclei.len()
                )));
            }
        }
        Owner::Multinuc => {
            if !span_nuclei.is_empty() {
                return Err(ConversionError::malformed(
                    "multinuclear group has a span child",
                ));
            }
            if multi_nuclei.is_empty() {
                return Err(ConversionError::malformed(
                    "multinuclear group has no nuclei",
                ));
            }
        }
        Owner::Unspecified => {
            if !span_nuclei.is_empty() && !multi_nuclei.is_empty() {
                return Err(ConversionError::malformed(
                    "node mixes span and multinuclear nuclei",
                ));
            }
            if span_nuclei.len() > 1 {
                return Err(ConversionError::malformed(format!(
                    "node has {} span nuclei; a mononuclear relation has one",
                    span_nuclei.len()
                )));
            }
            if span_nuclei.is_empty() && multi_nuclei.is_empty() {
                return Err(ConversionError::malformed("node has no nucleus"));
            }
        }
    }

    if multi_nuclei.is_empty() {
        return Ok(Classification {
            nuclei: span_nuclei,
            multinuclear: None,
            satellites,
        });
    }

    let (_, name) = multi_nuclei[0];
    if multi_nuclei.len() < 2 {
        return Err(ConversionError::malformed(format!(
            "multinuclear relation '{}' needs at least two nuclei, found one",
            name
        )));
    }
    if let Some((_, other)) = multi_nuclei.iter().find(|(_, other)| *other != name) {
        return Err(ConversionError::malformed(format!(
            "nuclei disagree on the multinuclear relation: '{}' vs '{}'",
            name, other
        )));
    }
    let first = multi_nuclei[0].0;
    let last = multi_nuclei[multi_nuclei.len() - 1].0;
    if let Some(slot) = satellites
        .iter()
        .find(|slot| slot.index > first && slot.index < last)
    {
        return Err(ConversionError::malformed(format!(
            "satellite '{}' sits between the nuclei of '{}'",
            slot.relation, name
        )));
    }

    Ok(Classification {
        nuclei: multi_nuclei.iter().map(|(index, _)| *index).collect(),
        multinuclear: Some(name.to_string()),
        satellites,
    })
}

/// A canonical relation node, resolved into its nuclearity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRelation<'a> {
    Mononuclear {
        relation: &'a str,
        nucleus: &'a DiscourseNode,
        satellite: &'a DiscourseNode,
        satellite_first: bool,
    },
    Multinuclear {
        relation: &'a str,
        nuclei: Vec<&'a DiscourseNode>,
    },
}

impl<'a> NodeRelation<'a> {
    pub fn relation(&self) -> &'a str {
        match self {
            NodeRelation::Mononuclear { relation, .. } => relation,
            NodeRelation::Multinuclear { relation, .. } => relation,
        }
    }

    pub fn relation_type(&self) -> RelationType {
        match self {
            NodeRelation::Mononuclear { .. } => RelationType::Mononuclear,
            NodeRelation::Multinuclear { .. } => RelationType::Multinuclear,
        }
    }
}

/// Classify a canonical relation node before writing it.
///
/// Returns the role contents (the subtrees below the N/S wrappers). Trees that break the
/// canonical shape are reported as unsupported rather than malformed: they were built through
/// the API, not read from bytes.
pub fn classify_node(node: &Internal) -> ConversionResult<NodeRelation<'_>> {
    if node.is_role() {
        return Err(ConversionError::unsupported(format!(
            "role node '{}' found where a relation was expected",
            node.label
        )));
    }
    if is_span(Some(&node.label)) {
        return Err(ConversionError::unsupported(format!(
            "'{}' can not name a relation",
            node.label
        )));
    }

    let mut roles = Vec::with_capacity(node.children.len());
    let mut contents = Vec::with_capacity(node.children.len());
    for child in &node.children {
        let role_node = child.as_internal().filter(|c| c.is_role()).ok_or_else(|| {
            ConversionError::unsupported(format!(
                "child '{}' of relation '{}' is not a nucleus or satellite",
                child.label(),
                node.label
            ))
        })?;
        let content = role_node.role_content().ok_or_else(|| {
            ConversionError::unsupported(format!(
                "role node below '{}' must wrap exactly one subtree",
                node.label
            ))
        })?;
        roles.push(if role_node.label == NUCLEUS {
            Nuclearity::Nucleus
        } else {
            Nuclearity::Satellite
        });
        contents.push(content);
    }

    let all_nuclei = roles.iter().all(|role| *role == Nuclearity::Nucleus);
    let raw: Vec<RawChild<'_>> = roles
        .iter()
        .map(|role| match role {
            Nuclearity::Nucleus if all_nuclei => RawChild::nucleus(Some(&node.label)),
            Nuclearity::Nucleus => RawChild::nucleus(None),
            Nuclearity::Satellite => RawChild::satellite(&node.label),
        })
        .collect();

    let classification = classify(Owner::Unspecified, &raw).map_err(|err| match err {
        ConversionError::MalformedInput { message, .. } => ConversionError::unsupported(message),
        other => other,
    })?;

    match (classification.relation_type(), classification.nucleus()) {
        (Some(RelationType::Multinuclear), _) => Ok(NodeRelation::Multinuclear {
            relation: &node.label,
            nuclei: classification.nuclei.iter().map(|i| contents[*i]).collect(),
        }),
        (Some(RelationType::Mononuclear), Some(nucleus)) if classification.satellites.len() == 1 => {
            let satellite = classification.satellites[0].index;
            Ok(NodeRelation::Mononuclear {
                relation: &node.label,
                nucleus: contents[nucleus],
                satellite: contents[satellite],
                satellite_first: satellite < nucleus,
            })
        }
        (Some(RelationType::Mononuclear), _) => Err(ConversionError::unsupported(format!(
            "mononuclear relation '{}' has {} satellites; the canonical tree allows one",
            node.label,
            classification.satellites.len()
        ))),
        (None, _) => Err(ConversionError::unsupported(format!(
            "relation '{}' has a nucleus but no satellite",
            node.label
        ))),
    }
}

/// Fold satellites around a core into nested binary mononuclear relations.
///
/// `left` and `right` are in textual order. The nearest satellite binds innermost; left
/// satellites are attached before right ones.
pub fn attach_satellites(
    core: DiscourseNode,
    left: Vec<(String, DiscourseNode)>,
    right: Vec<(String, DiscourseNode)>,
) -> DiscourseNode {
    let mut node = core;
    for (relation, satellite) in left.into_iter().rev() {
        node = DiscourseNode::internal(
            relation,
            vec![
                DiscourseNode::satellite(satellite),
                DiscourseNode::nucleus(node),
            ],
        );
    }
    for (relation, satellite) in right {
        node = DiscourseNode::internal(
            relation,
            vec![
                DiscourseNode::nucleus(node),
                DiscourseNode::satellite(satellite),
            ],
        );
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rst::error::ErrorKind;

    #[test]
    fn test_span_and_satellite() {
        let children = [RawChild::satellite("Contrast"), RawChild::nucleus(Some("span"))];
        let c = classify(Owner::Unspecified, &children).unwrap();
        assert_eq!(c.nucleus(), Some(1));
        assert_eq!(c.satellite_indices(), vec![0]);
        assert_eq!(c.relation_name(), Some("Contrast"));
        assert_eq!(c.relation_type(), Some(RelationType::Mononuclear));
    }

    #[test]
    fn test_satellite_placement_independent_of_order() {
        for children in [
            [RawChild::satellite("Contrast"), RawChild::nucleus(None)],
            [RawChild::nucleus(None), RawChild::satellite("Contrast")],
        ] {
            let c = classify(Owner::Unspecified, &children).unwrap();
            let satellite = &c.satellites[0];
            assert_eq!(satellite.relation, "Contrast");
            assert_ne!(Some(satellite.index), c.nucleus());
        }
    }

    #[test]
    fn test_multinuclear() {
        let children = [
            RawChild::nucleus(Some("joint")),
            RawChild::nucleus(Some("joint")),
            RawChild::nucleus(Some("joint")),
        ];
        let c = classify(Owner::Unspecified, &children).unwrap();
        assert_eq!(c.nuclei, vec![0, 1, 2]);
        assert_eq!(c.relation_name(), Some("joint"));
        assert_eq!(c.relation_type(), Some(RelationType::Multinuclear));
    }

    #[test]
    fn test_multinuc_with_single_nucleus_is_rejected() {
        let children = [RawChild::record(Some("joint"), Some(RelationType::Multinuclear))];
        let err = classify(Owner::Multinuc, &children).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err.to_string().contains("at least two nuclei"));
    }

    #[test]
    fn test_record_children_use_declarations() {
        let children = [
            RawChild::record(Some("list"), Some(RelationType::Multinuclear)),
            RawChild::record(Some("list"), Some(RelationType::Multinuclear)),
            RawChild::record(Some("elaboration"), Some(RelationType::Mononuclear)),
        ];
        let c = classify(Owner::Multinuc, &children).unwrap();
        assert_eq!(c.nuclei, vec![0, 1]);
        assert_eq!(c.satellites.len(), 1);
        assert_eq!(c.satellites[0].relation, "elaboration");
    }

    #[test]
    fn test_undeclared_relation_depends_on_owner() {
        let children = [RawChild::record(Some("same-unit"), None), RawChild::record(Some("same-unit"), None)];
        let c = classify(Owner::Multinuc, &children).unwrap();
        assert_eq!(c.multinuclear.as_deref(), Some("same-unit"));

        let children = [RawChild::record(None, None), RawChild::record(Some("cause"), None)];
        let c = classify(Owner::Span, &children).unwrap();
        assert_eq!(c.nucleus(), Some(0));
        assert_eq!(c.satellites[0].relation, "cause");
    }

    #[test]
    fn test_segment_owns_only_satellites() {
        let children = [RawChild::record(Some("span"), None)];
        assert!(classify(Owner::Segment, &children).is_err());

        let children = [RawChild::record(Some("cause"), None), RawChild::record(Some("result"), None)];
        let c = classify(Owner::Segment, &children).unwrap();
        assert!(c.nuclei.is_empty());
        assert_eq!(c.satellites.len(), 2);
        assert_eq!(c.relation_name(), None);
    }

    #[test]
    fn test_satellite_marked_span_is_malformed() {
        let children = [RawChild::nucleus(None), RawChild::satellite("span")];
        assert!(classify(Owner::Unspecified, &children).is_err());
    }

    #[test]
    fn test_satellite_between_nuclei_is_malformed() {
        let children = [
            RawChild::nucleus(Some("list")),
            RawChild::satellite("elaboration"),
            RawChild::nucleus(Some("list")),
        ];
        assert!(classify(Owner::Unspecified, &children).is_err());
    }

    #[test]
    fn test_disagreeing_nuclei() {
        let children = [RawChild::nucleus(Some("list")), RawChild::nucleus(Some("joint"))];
        let err = classify(Owner::Unspecified, &children).unwrap_err();
        assert!(err.to_string().contains("'list' vs 'joint'"));
    }

    #[test]
    fn test_place_children() {
        let children = [
            RawChild::satellite("a"),
            RawChild::nucleus(None),
            RawChild::satellite("b"),
            RawChild::satellite("c"),
        ];
        let c = classify(Owner::Unspecified, &children).unwrap();
        assert_eq!(c.default_pivot(), 1);

        let placement = c.place(["sa", "core", "sb", "sc"], c.default_pivot());
        assert_eq!(placement.nuclei, vec!["core"]);
        assert_eq!(placement.left, vec![("a".to_string(), "sa")]);
        assert_eq!(
            placement.right,
            vec![("b".to_string(), "sb"), ("c".to_string(), "sc")]
        );
    }

    #[test]
    fn test_place_around_explicit_pivot() {
        // a segment owns satellites only; its own text sits between them
        let children = [RawChild::record(Some("a"), None), RawChild::record(Some("b"), None)];
        let c = classify(Owner::Segment, &children).unwrap();
        let placement = c.place([1, 2], 1);
        assert!(placement.nuclei.is_empty());
        assert_eq!(placement.left, vec![("a".to_string(), 1)]);
        assert_eq!(placement.right, vec![("b".to_string(), 2)]);
    }

    #[test]
    fn test_classify_node_mononuclear() {
        let node = Internal::new(
            "circumstance",
            vec![
                DiscourseNode::satellite("foo".into()),
                DiscourseNode::nucleus("bar".into()),
            ],
        );
        match classify_node(&node).unwrap() {
            NodeRelation::Mononuclear {
                relation,
                nucleus,
                satellite,
                satellite_first,
            } => {
                assert_eq!(relation, "circumstance");
                assert_eq!(nucleus.label(), "bar");
                assert_eq!(satellite.label(), "foo");
                assert!(satellite_first);
            }
            other => panic!("expected mononuclear, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_node_rejects_reserved_span() {
        let node = Internal::new(
            "span",
            vec![
                DiscourseNode::nucleus("a".into()),
                DiscourseNode::satellite("b".into()),
            ],
        );
        let err = classify_node(&node).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedConversion);
    }

    #[test]
    fn test_classify_node_rejects_single_nucleus() {
        let node = Internal::new("joint", vec![DiscourseNode::nucleus("a".into())]);
        let err = classify_node(&node).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedConversion);
    }

    #[test]
    fn test_classify_node_rejects_two_satellites() {
        let node = Internal::new(
            "cause",
            vec![
                DiscourseNode::satellite("a".into()),
                DiscourseNode::nucleus("b".into()),
                DiscourseNode::satellite("c".into()),
            ],
        );
        assert!(classify_node(&node).is_err());
    }

    #[test]
    fn test_attach_satellites_nests_nearest_first() {
        let tree = attach_satellites(
            DiscourseNode::leaf("nuc"),
            vec![
                ("sat-nuc-1".to_string(), DiscourseNode::leaf("sat-1")),
                ("sat-nuc-2".to_string(), DiscourseNode::leaf("sat-2")),
            ],
            vec![("nuc-sat-1".to_string(), DiscourseNode::leaf("sat-3"))],
        );
        assert_eq!(tree.leaves(), vec!["sat-1", "sat-2", "nuc", "sat-3"]);
        assert_eq!(tree.label(), "nuc-sat-1");
        let inner = tree.children()[0].children()[0].clone();
        assert_eq!(inner.label(), "sat-nuc-1");
        let innermost = &inner.children()[1].children()[0];
        assert_eq!(innermost.label(), "sat-nuc-2");
    }
}
