//! hilda format implementation (read only)
//!
//! Data Model:
//!
//!     HILDA (and the Feng/Hirst parser, which reuses its output) prints Python `ParseTree`
//!     objects: a label encoding the relation and the nuclearity of both children, and a list
//!     of exactly two children, each a quoted EDU or another `ParseTree`.
//!
//!     ```text
//!     ParseTree('Elaboration[N][S]', ["they accepted", ParseTree('List[N][N]', ['a', 'b'])])
//!     ```
//!
//!     | label        | Canonical tree                                       |
//!     | R[N][S]      | left nucleus, right satellite of mononuclear R       |
//!     | R[S][N]      | left satellite, right nucleus of mononuclear R       |
//!     | R[N][N]      | two nuclei of multinuclear R                         |
//!     | R[S][S]      | malformed: a relation needs a nucleus                |

use once_cell::sync::Lazy;
use regex::Regex;
use rst_parser::rst::ast::DiscourseTree;
use rst_parser::rst::building::{build_tree, BracketNode};
use rst_parser::rst::error::{ConversionError, ConversionResult};
use rst_parser::rst::parsing::{parse_brackets, Bracket, BracketItem, Syntax};
use rst_parser::rst::relations::Nuclearity;

use crate::error::FormatError;
use crate::format::Format;

static LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<relation>.+)\[(?P<left>[NS])\]\[(?P<right>[NS])\]$")
        .expect("valid hilda label regex")
});

const TREE: &str = "ParseTree";

pub fn parse_hilda(source: &str) -> ConversionResult<DiscourseTree> {
    let root = parse_brackets(source, Syntax::Call)?;
    build_tree(read_tree(&root, None, None)?)
}

fn nuclearity(flag: &str) -> Nuclearity {
    if flag == "N" {
        Nuclearity::Nucleus
    } else {
        Nuclearity::Satellite
    }
}

fn read_tree(
    bracket: &Bracket,
    role: Option<Nuclearity>,
    relation: Option<String>,
) -> ConversionResult<BracketNode> {
    if bracket.label != TREE {
        return Err(ConversionError::malformed_at(
            format!("expected {}(...), found '{}'", TREE, bracket.label),
            bracket.offset,
        ));
    }
    let (label, children) = match bracket.items.as_slice() {
        [BracketItem::Text(label, _), BracketItem::Node(list)] if list.label.is_empty() => {
            (label, list)
        }
        _ => {
            return Err(ConversionError::malformed_at(
                format!("{} takes a label and a list of children", TREE),
                bracket.offset,
            ))
        }
    };

    let captures = LABEL.captures(label).ok_or_else(|| {
        ConversionError::malformed_at(
            format!("label '{}' is not of the form Relation[N|S][N|S]", label),
            bracket.offset,
        )
    })?;
    let name = &captures["relation"];
    let left = nuclearity(&captures["left"]);
    let right = nuclearity(&captures["right"]);

    // The relation name goes on satellites and on multinuclear nuclei; a lone nucleus is "span".
    let relation_of = |own: Nuclearity, other: Nuclearity| match (own, other) {
        (Nuclearity::Nucleus, Nuclearity::Satellite) => None,
        _ => Some(name.to_string()),
    };

    let items = match children.items.as_slice() {
        [first, second] => [(first, left, right), (second, right, left)],
        items => {
            return Err(ConversionError::malformed_at(
                format!("'{}' needs exactly two children, found {}", label, items.len()),
                children.offset,
            ))
        }
    };

    let mut nodes = Vec::with_capacity(2);
    for (item, own, other) in items {
        let child_relation = relation_of(own, other);
        let node = match item {
            BracketItem::Text(text, offset) => {
                BracketNode::text(Some(own), child_relation, text.clone(), *offset)
            }
            BracketItem::Node(tree) => read_tree(tree, Some(own), child_relation)?,
            BracketItem::Word(word, offset) => {
                return Err(ConversionError::malformed_at(
                    format!("unexpected bare word '{}'", word),
                    *offset,
                ))
            }
        };
        nodes.push(node);
    }
    Ok(BracketNode::children(role, relation, nodes, bracket.offset))
}

/// Format implementation for HILDA / Feng-Hirst parser output
pub struct HildaFormat;

impl Format for HildaFormat {
    fn name(&self) -> &str {
        "hilda"
    }

    fn description(&self) -> &str {
        "HILDA and Feng/Hirst discourse parser output"
    }

    fn file_extensions(&self) -> &[&str] {
        &["hilda"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<DiscourseTree, FormatError> {
        parse_hilda(source).map_err(|err| FormatError::new(self.name(), err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rst_parser::rst::error::ErrorKind;
    use rst_parser::rst::testing::{assert_same_tree, edu, nuc, rel, sat, tree};

    #[test]
    fn test_satellite_first() {
        let parsed =
            parse_hilda("ParseTree('Contrast[S][N]', ['Although they disliked it,', 'they accepted'])")
                .unwrap();
        let expected = tree(rel(
            "Contrast",
            [sat(edu("Although they disliked it,")), nuc(edu("they accepted"))],
        ));
        assert_same_tree(&parsed, &expected);
    }

    #[test]
    fn test_nested_multinuclear() {
        let source = r#"ParseTree('Elaboration[N][S]', ["it's cheap",
            ParseTree('same-unit[N][N]', ['and near', 'enough.'])])"#;
        let expected = tree(rel(
            "Elaboration",
            [
                nuc(edu("it's cheap")),
                sat(rel("same-unit", [nuc(edu("and near")), nuc(edu("enough."))])),
            ],
        ));
        assert_same_tree(&parse_hilda(source).unwrap(), &expected);
    }

    #[test]
    fn test_two_satellites_is_malformed() {
        let err = parse_hilda("ParseTree('Contrast[S][S]', ['a', 'b'])").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn test_bad_label() {
        let err = parse_hilda("ParseTree('Contrast', ['a', 'b'])").unwrap_err();
        assert!(err.to_string().contains("not of the form"));
    }

    #[test]
    fn test_child_count() {
        let err = parse_hilda("ParseTree('List[N][N]', ['a', 'b', 'c'])").unwrap_err();
        assert!(err.to_string().contains("exactly two children"));
    }
}
