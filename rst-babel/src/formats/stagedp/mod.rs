//! stagedp format implementation (read only)
//!
//! Data Model:
//!
//!     The output of the two-stage StageDP parser (Wang/Li/Wang 2017). It uses the binary
//!     `NS-R` / `SN-R` / `NN-R` labels of DPLP, but writes the EDU text into the tree as
//!     `_!..._!` spans instead of pointing into a token table.
//!
//!     ```text
//!     (NS-Elaboration _!good food ,_! (NN-Joint _!cheap_! _!and near ._!))
//!     ```
//!
//!     A document of one EDU is that EDU's text span alone.

use rst_parser::rst::ast::DiscourseTree;
use rst_parser::rst::building::{build_tree, BracketNode};
use rst_parser::rst::error::{ConversionError, ConversionResult};
use rst_parser::rst::lexing::{tokenize, Token};
use rst_parser::rst::parsing::{parse_brackets, BracketItem, Syntax};

use super::dplp::read_labelled_tree;
use crate::error::FormatError;
use crate::format::Format;

pub fn parse_stagedp(source: &str) -> ConversionResult<DiscourseTree> {
    if let [(Token::Text(text), _)] = tokenize(source)?.as_slice() {
        return Ok(DiscourseTree::single(text.clone()));
    }

    let root = parse_brackets(source, Syntax::SExpression)?;
    let node = read_labelled_tree(&root, None, None, &mut |item: &BracketItem, role, relation| {
        match item {
            BracketItem::Text(text, offset) => {
                Ok(BracketNode::text(Some(role), relation, text.clone(), *offset))
            }
            other => Err(ConversionError::malformed_at(
                "expected an EDU text span _!..._!",
                other.offset(),
            )),
        }
    })?;
    build_tree(node)
}

/// Format implementation for StageDP parser output
pub struct StageDpFormat;

impl Format for StageDpFormat {
    fn name(&self) -> &str {
        "stagedp"
    }

    fn description(&self) -> &str {
        "StageDP discourse parser output"
    }

    fn file_extensions(&self) -> &[&str] {
        &["stagedp"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<DiscourseTree, FormatError> {
        parse_stagedp(source).map_err(|err| FormatError::new(self.name(), err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rst_parser::rst::error::ErrorKind;
    use rst_parser::rst::testing::{assert_same_tree, edu, nuc, rel, sat, tree};

    #[test]
    fn test_nested_tree() {
        let source = "(NS-Elaboration _!good food ,_!\n  (NN-Joint _!cheap_! _!and near ._!))\n";
        let expected = tree(rel(
            "Elaboration",
            [
                nuc(edu("good food ,")),
                sat(rel("Joint", [nuc(edu("cheap")), nuc(edu("and near ."))])),
            ],
        ));
        assert_same_tree(&parse_stagedp(source).unwrap(), &expected);
    }

    #[test]
    fn test_satellite_first() {
        let parsed = parse_stagedp("(SN-Attribution _!He said_! _!it works ._!)").unwrap();
        let expected = tree(rel(
            "Attribution",
            [sat(edu("He said")), nuc(edu("it works ."))],
        ));
        assert_same_tree(&parsed, &expected);
    }

    #[test]
    fn test_one_edu() {
        let parsed = parse_stagedp("_!good food ._!\n").unwrap();
        assert_same_tree(&parsed, &DiscourseTree::single("good food ."));
    }

    #[test]
    fn test_bare_word_leaf() {
        let err = parse_stagedp("(NN-Joint _!a_! b)").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!(err.to_string().contains("(at byte 16)"), "{}", err);
    }
}
