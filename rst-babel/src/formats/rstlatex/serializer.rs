//! rst.sty serialization
//!
//! ```text
//! \dirrel
//!     {circumstance}{\rstsegment{sat first}}
//!     {}{\rstsegment{nuc second}}
//! ```
//!
//! One `\dirrel` block per merged mononuclear chain (see [`merge_satellites`]), one
//! `\multirel` block per multinuclear relation. A nested block is written inline in its slot,
//! every line after its first indented one more tab.

use rst_parser::rst::ast::{DiscourseNode, DiscourseTree, RootContent};
use rst_parser::rst::error::ConversionResult;
use rst_parser::rst::relations::{classify_node, NodeRelation};

use crate::mappings::{merge_satellites, Slot};

pub fn serialize_rstlatex(tree: &DiscourseTree) -> ConversionResult<String> {
    let body = match tree.content() {
        RootContent::Empty => return Ok(String::new()),
        RootContent::Edu(edu) => segment(&edu.text),
        RootContent::Relation(_) => render(tree.root())?,
    };
    Ok(format!("{}\n", body))
}

fn segment(text: &str) -> String {
    format!("\\rstsegment{{{}}}", escape_latex(text))
}

/// Renders a subtree; lines after the first are indented relative to the caller's slot.
fn render(node: &DiscourseNode) -> ConversionResult<String> {
    let internal = match node {
        DiscourseNode::Leaf(edu) => return Ok(segment(&edu.text)),
        DiscourseNode::Internal(internal) => internal,
    };
    if let Some(content) = internal.role_content() {
        return render(content);
    }

    let mut output = String::new();
    match merge_satellites(internal)? {
        Some(slots) => {
            output.push_str("\\dirrel");
            for slot in slots {
                let (relation, content) = match slot {
                    Slot::Satellite { relation, content } => (relation, content),
                    Slot::Nucleus(content) => ("", content),
                };
                output.push_str(&format!(
                    "\n\t{{{}}}{{{}}}",
                    escape_latex(relation),
                    nested(content)?
                ));
            }
        }
        None => {
            if let NodeRelation::Multinuclear { relation, nuclei } = classify_node(internal)? {
                output.push_str(&format!("\\multirel{{{}}}", escape_latex(relation)));
                for nucleus in nuclei {
                    output.push_str(&format!("\n\t{{{}}}", nested(nucleus)?));
                }
            }
        }
    }
    Ok(output)
}

fn nested(node: &DiscourseNode) -> ConversionResult<String> {
    Ok(render(node)?.replace('\n', "\n\t"))
}

/// Escapes the characters LaTeX treats specially in running text.
fn escape_latex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\textbackslash{}"),
            '~' => escaped.push_str("\\textasciitilde{}"),
            '^' => escaped.push_str("\\textasciicircum{}"),
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rst_parser::rst::testing::{edu, nuc, rel, sat, samples, tree};

    #[test]
    fn test_nucsat() {
        assert_eq!(
            serialize_rstlatex(&samples::sat_before_nuc()).unwrap(),
            "\\dirrel\n\t{circumstance}{\\rstsegment{sat first}}\n\t{}{\\rstsegment{nuc second}}\n"
        );
        assert_eq!(
            serialize_rstlatex(&samples::nuc_before_sat()).unwrap(),
            "\\dirrel\n\t{}{\\rstsegment{nuc first}}\n\t{circumstance}{\\rstsegment{sat second}}\n"
        );
    }

    #[test]
    fn test_multinuc() {
        assert_eq!(
            serialize_rstlatex(&samples::joint()).unwrap(),
            "\\multirel{joint}\n\t{\\rstsegment{nuc-1}}\n\t{\\rstsegment{nuc-2}}\n\t{\\rstsegment{nuc-3}}\n"
        );
    }

    #[test]
    fn test_nested_block_is_indented() {
        let list = rel("list", [nuc(edu("a")), nuc(edu("b"))]);
        let output = serialize_rstlatex(&tree(rel("cause", [nuc(list), sat(edu("c"))]))).unwrap();
        assert_eq!(
            output,
            "\\dirrel\n\t{}{\\multirel{list}\n\t\t{\\rstsegment{a}}\n\t\t{\\rstsegment{b}}}\n\t{cause}{\\rstsegment{c}}\n"
        );
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(serialize_rstlatex(&samples::empty()).unwrap(), "");
        assert_eq!(
            serialize_rstlatex(&samples::single()).unwrap(),
            "\\rstsegment{foo}\n"
        );
    }

    #[test]
    fn test_escapes_specials() {
        assert_eq!(escape_latex("50% of $x_1 & {y}"), "50\\% of \\$x\\_1 \\& \\{y\\}");
        assert_eq!(escape_latex("a\\b~c^"), "a\\textbackslash{}b\\textasciitilde{}c\\textasciicircum{}");
    }
}
