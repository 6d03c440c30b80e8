//! rs3 parsing (rs3 XML → flat graph)
//!
//! Reads the `<rst>` document with quick-xml's pull reader. Only three elements matter:
//! `<rel>` declarations, `<segment>` records (whose text is the EDU) and `<group>` records.
//! Everything else (`<header>`, `<body>`, signal annotations, ...) is walked through and
//! ignored. Segment document order is kept: it is the EDU order.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use rst_parser::rst::ast::NodeId;
use rst_parser::rst::error::{ConversionError, ConversionResult};
use rst_parser::rst::relations::RelationType;

use crate::ir::{FlatGraph, GroupType, Record, RecordKind};

/// Parse rs3 XML into its record set.
pub fn parse_rs3(source: &str) -> ConversionResult<FlatGraph> {
    let mut reader = Reader::from_str(source);
    let mut graph = FlatGraph::new();
    let mut open_segment: Option<(Record, String)> = None;
    let mut seen_root = false;
    let mut depth = 0usize;

    loop {
        let offset = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|err| {
            ConversionError::malformed_at(format!("invalid XML: {}", err), offset)
        })?;

        match event {
            Event::Start(element) => {
                depth += 1;
                if !seen_root {
                    expect_root(&element, offset)?;
                    seen_root = true;
                } else if element.name().as_ref() == b"segment" {
                    open_segment = Some((record(&element, offset, None)?, String::new()));
                } else {
                    read_element(&mut graph, &element, offset)?;
                }
            }
            Event::Empty(element) => {
                if !seen_root {
                    expect_root(&element, offset)?;
                    seen_root = true;
                } else if element.name().as_ref() == b"segment" {
                    graph.push(record(&element, offset, None)?);
                } else {
                    read_element(&mut graph, &element, offset)?;
                }
            }
            Event::Text(text) => {
                if let Some((_, buffer)) = open_segment.as_mut() {
                    let unescaped = text.unescape().map_err(|err| {
                        ConversionError::malformed_at(format!("invalid XML text: {}", err), offset)
                    })?;
                    buffer.push_str(&unescaped);
                }
            }
            Event::CData(data) => {
                if let Some((_, buffer)) = open_segment.as_mut() {
                    buffer.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(element) => {
                depth = depth.saturating_sub(1);
                if element.name().as_ref() == b"segment" {
                    if let Some((mut record, text)) = open_segment.take() {
                        record.kind = RecordKind::Segment { text };
                        graph.push(record);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(ConversionError::malformed("document has no <rst> element"));
    }
    if depth > 0 {
        return Err(ConversionError::malformed_at(
            "document ends inside an open element",
            source.len(),
        ));
    }
    Ok(graph)
}

fn expect_root(element: &BytesStart<'_>, offset: usize) -> ConversionResult<()> {
    if element.name().as_ref() == b"rst" {
        return Ok(());
    }
    Err(ConversionError::malformed_at(
        format!(
            "expected an <rst> document, found <{}>",
            String::from_utf8_lossy(element.name().as_ref())
        ),
        offset,
    ))
}

/// Declarations and groups; everything else is skipped.
fn read_element(
    graph: &mut FlatGraph,
    element: &BytesStart<'_>,
    offset: usize,
) -> ConversionResult<()> {
    match element.name().as_ref() {
        b"rel" => declare(graph, element, offset),
        b"group" => {
            let group_type = group_type(element, offset)?;
            graph.push(record(element, offset, Some(group_type))?);
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Attribute values of an element, unescaped.
struct Attributes {
    pairs: Vec<(Vec<u8>, String)>,
}

impl Attributes {
    fn read(element: &BytesStart<'_>, offset: usize) -> ConversionResult<Self> {
        let mut pairs = Vec::new();
        for attribute in element.attributes() {
            let attribute = attribute.map_err(|err| {
                ConversionError::malformed_at(format!("invalid attribute: {}", err), offset)
            })?;
            let value = attribute.unescape_value().map_err(|err| {
                ConversionError::malformed_at(format!("invalid attribute value: {}", err), offset)
            })?;
            pairs.push((attribute.key.as_ref().to_vec(), value.into_owned()));
        }
        Ok(Self { pairs })
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k.as_slice() == key.as_bytes())
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    fn id(&self, key: &str, offset: usize) -> ConversionResult<Option<NodeId>> {
        self.get(key)
            .map(|value| {
                value.trim().parse::<NodeId>().map_err(|_| {
                    ConversionError::malformed_at(
                        format!("attribute {}=\"{}\" is not a numeric id", key, value),
                        offset,
                    )
                })
            })
            .transpose()
    }
}

fn record(
    element: &BytesStart<'_>,
    offset: usize,
    group_type: Option<GroupType>,
) -> ConversionResult<Record> {
    let attributes = Attributes::read(element, offset)?;
    let id = attributes.id("id", offset)?.ok_or_else(|| {
        ConversionError::malformed_at("record without an id attribute", offset)
    })?;
    let kind = match group_type {
        Some(group_type) => RecordKind::Group(group_type),
        None => RecordKind::Segment {
            text: String::new(),
        },
    };
    Ok(Record {
        id,
        parent: attributes.id("parent", offset)?,
        relname: attributes.get("relname").map(str::to_string),
        kind,
    })
}

fn group_type(element: &BytesStart<'_>, offset: usize) -> ConversionResult<GroupType> {
    let attributes = Attributes::read(element, offset)?;
    let value = attributes.get("type").unwrap_or_default();
    GroupType::parse(value).ok_or_else(|| {
        ConversionError::malformed_at(format!("unknown group type '{}'", value), offset)
    })
}

fn declare(graph: &mut FlatGraph, element: &BytesStart<'_>, offset: usize) -> ConversionResult<()> {
    let attributes = Attributes::read(element, offset)?;
    let name = attributes.get("name").ok_or_else(|| {
        ConversionError::malformed_at("relation declaration without a name", offset)
    })?;
    let value = attributes.get("type").unwrap_or_default();
    let relation_type = RelationType::from_rs3(value).ok_or_else(|| {
        ConversionError::malformed_at(
            format!("relation '{}' has unknown type '{}'", name, value),
            offset,
        )
    })?;
    graph.declare(name, relation_type).map_err(|err| match err {
        ConversionError::MalformedInput { message, .. } => {
            ConversionError::malformed_at(message, offset)
        }
        other => other,
    })
}
