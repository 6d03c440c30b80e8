//! dis parsing
//!
//! The bracket layer hands back a generic [`Bracket`] tree; this module reads the RST-DT
//! vocabulary out of it:
//!
//! ```text
//! ( Root (span 1 2)
//!   ( Satellite (leaf 1) (rel2par Contrast) (text _!Although they didn't like it,_!) )
//!   ( Nucleus (leaf 2) (rel2par span) (text _!they accepted the offer._!) )
//! )
//! ```
//!
//! `span` and `leaf` only restate EDU positions, which the tree shape already fixes, so they
//! are checked for shape and otherwise ignored.

use rst_parser::rst::ast::DiscourseTree;
use rst_parser::rst::building::{build_tree, BracketNode};
use rst_parser::rst::error::{ConversionError, ConversionResult};
use rst_parser::rst::parsing::{parse_brackets, Bracket, BracketItem, Syntax};
use rst_parser::rst::relations::Nuclearity;

pub fn parse_dis(source: &str) -> ConversionResult<DiscourseTree> {
    let root = parse_brackets(source, Syntax::SExpression)?;
    if root.label != "Root" {
        return Err(ConversionError::malformed_at(
            format!("expected a Root node, found '{}'", root.label),
            root.offset,
        ));
    }
    build_tree(read_node(&root, None)?)
}

fn read_node(bracket: &Bracket, role: Option<Nuclearity>) -> ConversionResult<BracketNode> {
    let mut relation = None;
    let mut text = None;
    let mut children = Vec::new();

    for item in &bracket.items {
        let node = match item {
            BracketItem::Node(node) => node,
            BracketItem::Word(word, offset) => {
                return Err(ConversionError::malformed_at(
                    format!("unexpected word '{}' in {} node", word, bracket.label),
                    *offset,
                ))
            }
            BracketItem::Text(_, offset) => {
                return Err(ConversionError::malformed_at(
                    format!("text outside a (text ...) node in {} node", bracket.label),
                    *offset,
                ))
            }
        };

        match node.label.as_str() {
            "span" => expect_positions(node, 2)?,
            "leaf" => expect_positions(node, 1)?,
            "rel2par" => match node.words().as_slice() {
                [name] => relation = Some(name.to_string()),
                _ => {
                    return Err(ConversionError::malformed_at(
                        "(rel2par ...) expects one relation name",
                        node.offset,
                    ))
                }
            },
            "text" => {
                let body = node.text().ok_or_else(|| {
                    ConversionError::malformed_at("text node without a _!..._! span", node.offset)
                })?;
                text = Some(body.to_string());
            }
            "Nucleus" => children.push(read_node(node, Some(Nuclearity::Nucleus))?),
            "Satellite" => children.push(read_node(node, Some(Nuclearity::Satellite))?),
            other => {
                return Err(ConversionError::malformed_at(
                    format!("unknown node type '{}'", other),
                    node.offset,
                ))
            }
        }
    }

    match text {
        Some(_) if !children.is_empty() => Err(ConversionError::malformed_at(
            format!("{} node has both text and children", bracket.label),
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

/// `(span a b)` and `(leaf i)` hold EDU positions.
fn expect_positions(node: &Bracket, count: usize) -> ConversionResult<()> {
    let words = node.words();
    if words.len() == count && words.iter().all(|word| word.parse::<usize>().is_ok()) {
        return Ok(());
    }
    Err(ConversionError::malformed_at(
        format!("({} ...) expects {} EDU position(s)", node.label, count),
        node.offset,
    ))
}
