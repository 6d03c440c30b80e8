//! dis serialization
//!
//! Leaves are numbered 1..n left to right. Every relation child states the EDU range it covers
//! (`span a b`) or its own position (`leaf i`), and its relation to the parent (`rel2par`):
//! the relation name for satellites and multinuclear nuclei, `span` for the nucleus of a
//! mononuclear relation. The root carries no `rel2par`.
//!
//! Nesting is indented two spaces per level, the way RST-DT files are laid out.
//!
//! A relation name must be a single bare word to be read back, so names with spaces or
//! bracket punctuation are refused rather than written.

use rst_parser::rst::ast::{DiscourseNode, DiscourseTree, RootContent};
use rst_parser::rst::error::{ConversionError, ConversionResult};
use rst_parser::rst::lexing::{is_word, TEXT_MARKER};
use rst_parser::rst::relations::{classify_node, NodeRelation, SPAN};

const INDENT: &str = "  ";

pub fn serialize_dis(tree: &DiscourseTree) -> ConversionResult<String> {
    let mut serializer = DisSerializer::default();
    match tree.content() {
        RootContent::Empty => {
            return Err(ConversionError::unsupported(
                "dis can not represent an empty tree",
            ))
        }
        RootContent::Edu(edu) => {
            serializer.output.push_str(&format!(
                "( Root (leaf 1) (text {}) )\n",
                text_span(&edu.text)?
            ));
        }
        RootContent::Relation(_) => {
            let root = bare(tree.root());
            serializer.serialize_relation(root, "Root", None)?;
        }
    }
    Ok(serializer.output)
}

/// Looks through role wrappers down to the bare subtree.
fn bare(mut node: &DiscourseNode) -> &DiscourseNode {
    while let Some(inner) = node.as_internal().and_then(|n| n.role_content()) {
        node = inner;
    }
    node
}

fn text_span(text: &str) -> ConversionResult<String> {
    if text.contains(TEXT_MARKER) {
        return Err(ConversionError::unsupported(format!(
            "EDU text contains the dis text marker '{}': {:?}",
            TEXT_MARKER, text
        )));
    }
    Ok(format!("{}{}{}", TEXT_MARKER, text, TEXT_MARKER))
}

#[derive(Default)]
struct DisSerializer {
    output: String,
    indent_level: usize,
    /// Number of the last leaf written.
    leaves: usize,
}

impl DisSerializer {
    fn push_indent(&mut self, s: &str) {
        self.output.push_str(&INDENT.repeat(self.indent_level));
        self.output.push_str(s);
    }

    fn rel2par(relation: Option<&str>) -> ConversionResult<String> {
        match relation {
            Some(name) if !is_word(name) => Err(ConversionError::unsupported(format!(
                "relation name {:?} is not a single dis word",
                name
            ))),
            Some(name) => Ok(format!(" (rel2par {})", name)),
            None => Ok(String::new()),
        }
    }

    /// Writes one child of a relation (or the root) as `( Role ... )`.
    fn serialize_child(
        &mut self,
        node: &DiscourseNode,
        role: &str,
        relation: &str,
    ) -> ConversionResult<()> {
        match node {
            DiscourseNode::Leaf(edu) => {
                self.leaves += 1;
                let line = format!(
                    "( {} (leaf {}){} (text {}) )\n",
                    role,
                    self.leaves,
                    Self::rel2par(Some(relation))?,
                    text_span(&edu.text)?
                );
                self.push_indent(&line);
                Ok(())
            }
            DiscourseNode::Internal(_) => self.serialize_relation(node, role, Some(relation)),
        }
    }

    fn serialize_relation(
        &mut self,
        node: &DiscourseNode,
        role: &str,
        relation: Option<&str>,
    ) -> ConversionResult<()> {
        let internal = match node.as_internal() {
            Some(internal) => internal,
            None => return self.serialize_child(node, role, relation.unwrap_or(SPAN)),
        };

        let first = self.leaves + 1;
        let last = self.leaves + node.edu_count();
        let header = format!(
            "( {} (span {} {}){}\n",
            role,
            first,
            last,
            Self::rel2par(relation)?
        );
        self.push_indent(&header);
        self.indent_level += 1;

        match classify_node(internal)? {
            NodeRelation::Mononuclear {
                relation,
                nucleus,
                satellite,
                satellite_first,
            } => {
                if satellite_first {
                    self.serialize_child(satellite, "Satellite", relation)?;
                    self.serialize_child(nucleus, "Nucleus", SPAN)?;
                } else {
                    self.serialize_child(nucleus, "Nucleus", SPAN)?;
                    self.serialize_child(satellite, "Satellite", relation)?;
                }
            }
            NodeRelation::Multinuclear { relation, nuclei } => {
                for nucleus in nuclei {
                    self.serialize_child(nucleus, "Nucleus", relation)?;
                }
            }
        }

        self.indent_level -= 1;
        self.push_indent(")\n");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rst_parser::rst::error::ErrorKind;
    use rst_parser::rst::testing::{edu, nuc, rel, sat, samples, tree};

    #[test]
    fn test_contrast() {
        let contrast = tree(rel(
            "Contrast",
            [
                sat(edu("Although they didn't like it,")),
                nuc(edu("they accepted the offer.")),
            ],
        ));
        let expected = "( Root (span 1 2)
  ( Satellite (leaf 1) (rel2par Contrast) (text _!Although they didn't like it,_!) )
  ( Nucleus (leaf 2) (rel2par span) (text _!they accepted the offer._!) )
)
";
        assert_eq!(serialize_dis(&contrast).unwrap(), expected);
    }

    #[test]
    fn test_nested_spans() {
        let output = serialize_dis(&samples::nested()).unwrap();
        let expected = "( Root (span 1 4)
  ( Nucleus (span 1 2) (rel2par span)
    ( Satellite (leaf 1) (rel2par contrast) (text _!Although they disliked it,_!) )
    ( Nucleus (leaf 2) (rel2par span) (text _!they accepted_!) )
  )
  ( Satellite (span 3 4) (rel2par elaboration)
    ( Nucleus (leaf 3) (rel2par list) (text _!because it was cheap_!) )
    ( Nucleus (leaf 4) (rel2par list) (text _!and it was near._!) )
  )
)
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_single_edu() {
        assert_eq!(
            serialize_dis(&samples::single()).unwrap(),
            "( Root (leaf 1) (text _!foo_!) )\n"
        );
    }

    #[test]
    fn test_empty_tree_is_unsupported() {
        let err = serialize_dis(&samples::empty()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedConversion);
    }

    #[test]
    fn test_relation_names_must_be_words() {
        for name in ["same unit", "Contrast!", "cause (volitional)"] {
            let multinuclear = tree(rel(name, [nuc(edu("a")), nuc(edu("b"))]));
            let err = serialize_dis(&multinuclear).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnsupportedConversion, "{}", name);

            let mononuclear = tree(rel(name, [sat(edu("a")), nuc(edu("b"))]));
            let err = serialize_dis(&mononuclear).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnsupportedConversion, "{}", name);
        }
    }

    #[test]
    fn test_text_marker_is_unsupported() {
        let bad = tree(rel("joint", [nuc(edu("a _! b")), nuc(edu("c"))]));
        let err = serialize_dis(&bad).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedConversion);
    }
}
