//! hs2015 format implementation (read only)
//!
//! Data Model:
//!
//!     The output of the Heilman/Sagae (2015) shift-reduce parser: s-expressions whose labels
//!     fold role and relation together.
//!
//!     ```text
//!     (ROOT
//!       (satellite:attribution (text _!Analysts said_!))
//!       (nucleus:span
//!         (nucleus:list (text _!sales rose_!))
//!         (nucleus:list (text _!and costs fell._!))))
//!     ```
//!
//!     | hs2015                 | Canonical tree                               |
//!     | ROOT                   | the root, no role                            |
//!     | nucleus:span           | the span nucleus of a mononuclear relation   |
//!     | nucleus:R              | a nucleus of multinuclear relation R         |
//!     | satellite:R            | the satellite of mononuclear relation R      |
//!     | (text _!..._!)         | makes its parent a leaf                      |

use rst_parser::rst::ast::DiscourseTree;
use rst_parser::rst::building::{build_tree, BracketNode};
use rst_parser::rst::error::{ConversionError, ConversionResult};
use rst_parser::rst::parsing::{parse_brackets, Bracket, BracketItem, Syntax};
use rst_parser::rst::relations::Nuclearity;

use crate::error::FormatError;
use crate::format::Format;

pub fn parse_hs2015(source: &str) -> ConversionResult<DiscourseTree> {
    let root = parse_brackets(source, Syntax::SExpression)?;
    if root.label != "ROOT" {
        return Err(ConversionError::malformed_at(
            format!("expected a ROOT node, found '{}'", root.label),
            root.offset,
        ));
    }
    build_tree(read_node(&root, None, None)?)
}

/// Splits `nucleus:elaboration` into its role and relation.
fn split_label(node: &Bracket) -> ConversionResult<(Nuclearity, &str)> {
    let (role, relation) = node.label.split_once(':').ok_or_else(|| {
        ConversionError::malformed_at(
            format!("unknown node type '{}'", node.label),
            node.offset,
        )
    })?;
    let role = match role {
        "nucleus" => Nuclearity::Nucleus,
        "satellite" => Nuclearity::Satellite,
        other => {
            return Err(ConversionError::malformed_at(
                format!("unknown nuclearity '{}'", other),
                node.offset,
            ))
        }
    };
    Ok((role, relation))
}

fn read_node(
    bracket: &Bracket,
    role: Option<Nuclearity>,
    relation: Option<&str>,
) -> ConversionResult<BracketNode> {
    let mut text = None;
    let mut children = Vec::new();

    for item in &bracket.items {
        match item {
            BracketItem::Node(node) if node.label == "text" => {
                let body = node.text().ok_or_else(|| {
                    ConversionError::malformed_at("text node without a _!..._! span", node.offset)
                })?;
                text = Some(body.to_string());
            }
            BracketItem::Node(node) => {
                let (role, relation) = split_label(node)?;
                children.push(read_node(node, Some(role), Some(relation))?);
            }
            other => {
                return Err(ConversionError::malformed_at(
                    format!("unexpected bare value in '{}'", bracket.label),
                    other.offset(),
                ))
            }
        }
    }

    let relation = relation.map(str::to_string);
    match text {
        Some(_) if !children.is_empty() => Err(ConversionError::malformed_at(
            format!("'{}' has both text and children", bracket.label),
            bracket.offset,
        )),
        Some(text) => Ok(BracketNode::text(role, relation, text, bracket.offset)),
        None => Ok(BracketNode::children(
            role,
            relation,
            children,
            bracket.offset,
        )),
    }
}

/// Format implementation for Heilman/Sagae 2015 parser output
pub struct Hs2015Format;

impl Format for Hs2015Format {
    fn name(&self) -> &str {
        "hs2015"
    }

    fn description(&self) -> &str {
        "Heilman/Sagae (2015) discourse parser output"
    }

    fn file_extensions(&self) -> &[&str] {
        &["hs2015"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<DiscourseTree, FormatError> {
        parse_hs2015(source).map_err(|err| FormatError::new(self.name(), err))
    }
}
