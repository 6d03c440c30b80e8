//! dplp format implementation (read only)
//!
//! Data Model:
//!
//!     The output of the DPLP parser (Ji/Eisenstein 2014): the discourse tree, whose leaves
//!     are EDU numbers, followed by the token table the parser worked on, which holds the
//!     EDU text (see [`table`]).
//!
//!     ```text
//!     (NS-elaboration (NN-same_unit 1 2) 3)
//!
//!     0	1	Good	good	JJ	amod	2	O	(ROOT (NP (JJ Good)	1
//!     ...
//!     ```
//!
//!     | dplp       | Canonical tree                                       |
//!     | NS-R       | left nucleus, right satellite of mononuclear R       |
//!     | SN-R       | left satellite, right nucleus of mononuclear R       |
//!     | NN-R       | two nuclei of multinuclear R                         |
//!     | SS-R       | malformed: a relation needs a nucleus                |
//!     | n          | leaf: the words of EDU n, joined by single spaces    |
//!
//!     The table starts at the first line holding a tab; tree lines never do. A document of
//!     one EDU has no tree: the tree block is empty or just `1`.
//!
//!     The same binary labels are used by StageDP, which reads its trees through
//!     [`read_labelled_tree`].

pub mod table;

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
    Regex::new(r"^(?P<left>[NS])(?P<right>[NS])-(?P<relation>.+)$").expect("valid dplp label regex")
});

pub fn parse_dplp(source: &str) -> ConversionResult<DiscourseTree> {
    let table_start: usize = source
        .split_inclusive('\n')
        .take_while(|line| !line.contains('\t'))
        .map(str::len)
        .sum();
    let (tree_block, table_block) = source.split_at(table_start);

    let edus = table::read_edus(table_block, table_start)?;
    if edus.is_empty() {
        return Err(ConversionError::malformed_at(
            "the token table holds no EDU",
            table_start,
        ));
    }

    if matches!(tree_block.trim(), "" | "1") {
        return match edus.as_slice() {
            [only] => Ok(DiscourseTree::single(only.clone())),
            _ => Err(ConversionError::malformed(format!(
                "no tree over the {} EDUs of the token table",
                edus.len()
            ))),
        };
    }

    let root = parse_brackets(tree_block, Syntax::SExpression)?;
    let mut leaves = Leaves { edus: &edus, used: 0 };
    let node = read_labelled_tree(&root, None, None, &mut |item: &BracketItem, role, relation| {
        leaves.take(item, role, relation)
    })?;
    leaves.finish()?;
    build_tree(node)
}

/// Hands out EDUs to the tree leaves, which must name them in order.
struct Leaves<'a> {
    edus: &'a [String],
    used: usize,
}

impl Leaves<'_> {
    fn take(
        &mut self,
        item: &BracketItem,
        role: Nuclearity,
        relation: Option<String>,
    ) -> ConversionResult<BracketNode> {
        let (word, offset) = match item {
            BracketItem::Word(word, offset) => (word, *offset),
            other => {
                return Err(ConversionError::malformed_at(
                    "expected an EDU number",
                    other.offset(),
                ))
            }
        };
        let number: usize = word.parse().map_err(|_| {
            ConversionError::malformed_at(format!("leaf '{}' is not an EDU number", word), offset)
        })?;
        if number != self.used + 1 {
            return Err(ConversionError::malformed_at(
                format!("expected EDU {}, found EDU {}", self.used + 1, number),
                offset,
            ));
        }
        let text = self.edus.get(self.used).ok_or_else(|| {
            ConversionError::malformed_at(
                format!("EDU {} is not in the token table", number),
                offset,
            )
        })?;
        self.used += 1;
        Ok(BracketNode::text(Some(role), relation, text.clone(), offset))
    }

    fn finish(&self) -> ConversionResult<()> {
        if self.used == self.edus.len() {
            Ok(())
        } else {
            Err(ConversionError::malformed(format!(
                "the tree covers {} of the {} EDUs in the token table",
                self.used,
                self.edus.len()
            )))
        }
    }
}

fn nuclearity(flag: &str) -> Nuclearity {
    if flag == "N" {
        Nuclearity::Nucleus
    } else {
        Nuclearity::Satellite
    }
}

/// Reads a binary tree labelled `NS-R`, `SN-R` or `NN-R`. Items that are not nodes go to
/// `leaf`, along with the role and relation they hold.
pub(crate) fn read_labelled_tree<F>(
    bracket: &Bracket,
    role: Option<Nuclearity>,
    relation: Option<String>,
    leaf: &mut F,
) -> ConversionResult<BracketNode>
where
    F: FnMut(&BracketItem, Nuclearity, Option<String>) -> ConversionResult<BracketNode>,
{
    let captures = LABEL.captures(&bracket.label).ok_or_else(|| {
        ConversionError::malformed_at(
            format!("label '{}' is not of the form NS-Relation", bracket.label),
            bracket.offset,
        )
    })?;
    let name = &captures["relation"];
    let left = nuclearity(&captures["left"]);
    let right = nuclearity(&captures["right"]);

    let items = match bracket.items.as_slice() {
        [first, second] => [(first, left, right), (second, right, left)],
        items => {
            return Err(ConversionError::malformed_at(
                format!(
                    "'{}' needs exactly two children, found {}",
                    bracket.label,
                    items.len()
                ),
                bracket.offset,
            ))
        }
    };

    let mut children = Vec::with_capacity(2);
    for (item, own, other) in items {
        // the relation name goes on satellites and multinuclear nuclei
        let child_relation = match (own, other) {
            (Nuclearity::Nucleus, Nuclearity::Satellite) => None,
            _ => Some(name.to_string()),
        };
        let child = match item {
            BracketItem::Node(node) => read_labelled_tree(node, Some(own), child_relation, leaf)?,
            other => leaf(other, own, child_relation)?,
        };
        children.push(child);
    }
    Ok(BracketNode::children(role, relation, children, bracket.offset))
}

/// Format implementation for DPLP parser output
pub struct DplpFormat;

impl Format for DplpFormat {
    fn name(&self) -> &str {
        "dplp"
    }

    fn description(&self) -> &str {
        "DPLP discourse parser output (tree and token table)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["dplp"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<DiscourseTree, FormatError> {
        parse_dplp(source).map_err(|err| FormatError::new(self.name(), err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rst_parser::rst::error::ErrorKind;
    use rst_parser::rst::testing::{assert_same_tree, edu, nuc, rel, sat, tree};

    fn token(edu: usize, word: &str) -> String {
        format!("0\t1\t{}\t{}\tNN\tdep\t0\tO\t(NN {})\t{}\n", word, word, word, edu)
    }

    fn document(tree_block: &str, edus: &[&[&str]]) -> String {
        let mut source = format!("{}\n\n", tree_block);
        for (index, words) in edus.iter().enumerate() {
            for word in *words {
                source.push_str(&token(index + 1, word));
            }
        }
        source
    }

    #[test]
    fn test_nested_tree() {
        let source = document(
            "(NS-elaboration (SN-contrast 1 2) (NN-same_unit 3 4))",
            &[
                &["Although", "they", "disliked", "it", ","],
                &["they", "accepted"],
                &["because", "it", "was", "cheap"],
                &["and", "near", "."],
            ],
        );
        let expected = tree(rel(
            "elaboration",
            [
                nuc(rel(
                    "contrast",
                    [
                        sat(edu("Although they disliked it ,")),
                        nuc(edu("they accepted")),
                    ],
                )),
                sat(rel(
                    "same_unit",
                    [nuc(edu("because it was cheap")), nuc(edu("and near ."))],
                )),
            ],
        ));
        assert_same_tree(&parse_dplp(&source).unwrap(), &expected);
    }

    #[test]
    fn test_one_edu() {
        let expected = DiscourseTree::single("good food .");
        for tree_block in ["", "1"] {
            let source = document(tree_block, &[&["good", "food", "."]]);
            assert_same_tree(&parse_dplp(&source).unwrap(), &expected);
        }
    }

    #[test]
    fn test_leaves_must_follow_the_table() {
        let source = document("(NN-list 2 1)", &[&["a"], &["b"]]);
        let err = parse_dplp(&source).unwrap_err();
        assert!(err.to_string().contains("expected EDU 1, found EDU 2"));

        let source = document("(NN-list 1 2)", &[&["a"], &["b"], &["c"]]);
        let err = parse_dplp(&source).unwrap_err();
        assert!(err.to_string().contains("covers 2 of the 3 EDUs"));
    }

    #[test]
    fn test_bad_labels() {
        let err = parse_dplp(&document("(elaboration 1 2)", &[&["a"], &["b"]])).unwrap_err();
        assert!(err.to_string().contains("not of the form NS-Relation"));

        let err = parse_dplp(&document("(SS-contrast 1 2)", &[&["a"], &["b"]])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn test_missing_table() {
        let err = parse_dplp("(NS-elaboration 1 2)\n").unwrap_err();
        assert!(err.to_string().contains("holds no EDU"));
    }
}
