//! Satellite merging in the rst.sty writer
//!
//! A nucleus with several satellites is a chain of nested binary relations in the canonical
//! tree and must come out as one `\dirrel` block, each satellite keeping its relation name
//! and its side of the nucleus.

use rst_babel::formats::RstLatexFormat;
use rst_babel::{Format, RenderOptions};
use rst_parser::rst::ast::DiscourseNode;
use rst_parser::rst::relations::attach_satellites;
use rst_parser::rst::testing::{edu, tree};
use rstest::rstest;

/// `left` satellites are numbered `sat-nuc-i`, `right` ones `nuc-sat-i`, as in rst.sty docs.
fn nucleus_with(left: usize, right: usize) -> DiscourseNode {
    let left = (1..=left)
        .map(|i| (format!("sat-nuc-{}", i), edu(&format!("sat-{}", i))))
        .collect();
    let right = (1..=right)
        .map(|i| (format!("nuc-sat-{}", i), edu(&format!("sat-{}", i))))
        .collect();
    attach_satellites(edu("nuc"), left, right)
}

fn render(node: DiscourseNode) -> String {
    RstLatexFormat
        .serialize(&tree(node), &RenderOptions::default())
        .unwrap()
}

#[rstest]
#[case::s_n(1, 0, "\\dirrel\n\t{sat-nuc-1}{\\rstsegment{sat-1}}\n\t{}{\\rstsegment{nuc}}\n")]
#[case::n_s(0, 1, "\\dirrel\n\t{}{\\rstsegment{nuc}}\n\t{nuc-sat-1}{\\rstsegment{sat-1}}\n")]
#[case::s_n_s(
    1,
    1,
    "\\dirrel\n\t{sat-nuc-1}{\\rstsegment{sat-1}}\n\t{}{\\rstsegment{nuc}}\n\t{nuc-sat-1}{\\rstsegment{sat-1}}\n"
)]
#[case::s_s_n(
    2,
    0,
    "\\dirrel\n\t{sat-nuc-1}{\\rstsegment{sat-1}}\n\t{sat-nuc-2}{\\rstsegment{sat-2}}\n\t{}{\\rstsegment{nuc}}\n"
)]
#[case::n_s_s(
    0,
    2,
    "\\dirrel\n\t{}{\\rstsegment{nuc}}\n\t{nuc-sat-1}{\\rstsegment{sat-1}}\n\t{nuc-sat-2}{\\rstsegment{sat-2}}\n"
)]
#[case::s_n_s_s(
    1,
    2,
    "\\dirrel\n\t{sat-nuc-1}{\\rstsegment{sat-1}}\n\t{}{\\rstsegment{nuc}}\n\t{nuc-sat-1}{\\rstsegment{sat-1}}\n\t{nuc-sat-2}{\\rstsegment{sat-2}}\n"
)]
#[case::s_s_n_s(
    2,
    1,
    "\\dirrel\n\t{sat-nuc-1}{\\rstsegment{sat-1}}\n\t{sat-nuc-2}{\\rstsegment{sat-2}}\n\t{}{\\rstsegment{nuc}}\n\t{nuc-sat-1}{\\rstsegment{sat-1}}\n"
)]
#[case::s_s_s_n_s(
    3,
    1,
    "\\dirrel\n\t{sat-nuc-1}{\\rstsegment{sat-1}}\n\t{sat-nuc-2}{\\rstsegment{sat-2}}\n\t{sat-nuc-3}{\\rstsegment{sat-3}}\n\t{}{\\rstsegment{nuc}}\n\t{nuc-sat-1}{\\rstsegment{sat-1}}\n"
)]
#[case::s_n_s_s_s(
    1,
    3,
    "\\dirrel\n\t{sat-nuc-1}{\\rstsegment{sat-1}}\n\t{}{\\rstsegment{nuc}}\n\t{nuc-sat-1}{\\rstsegment{sat-1}}\n\t{nuc-sat-2}{\\rstsegment{sat-2}}\n\t{nuc-sat-3}{\\rstsegment{sat-3}}\n"
)]
#[case::s_s_s_n_s_s_s(
    3,
    3,
    "\\dirrel\n\t{sat-nuc-1}{\\rstsegment{sat-1}}\n\t{sat-nuc-2}{\\rstsegment{sat-2}}\n\t{sat-nuc-3}{\\rstsegment{sat-3}}\n\t{}{\\rstsegment{nuc}}\n\t{nuc-sat-1}{\\rstsegment{sat-1}}\n\t{nuc-sat-2}{\\rstsegment{sat-2}}\n\t{nuc-sat-3}{\\rstsegment{sat-3}}\n"
)]
fn test_merged_chain(#[case] left: usize, #[case] right: usize, #[case] expected: &str) {
    assert_eq!(render(nucleus_with(left, right)), expected);
}

#[test]
fn test_chain_read_from_rs3_is_merged() {
    // rstWeb style: two satellites point straight at one segment
    let source = r#"<rst>
  <header>
    <relations>
      <rel name="background" type="rst"/>
      <rel name="result" type="rst"/>
    </relations>
  </header>
  <body>
    <segment id="1" parent="2" relname="background">Prices fell.</segment>
    <segment id="2">Sales rose</segment>
    <segment id="3" parent="2" relname="result">and profits followed.</segment>
  </body>
</rst>"#;
    let registry = rst_babel::FormatRegistry::with_defaults().unwrap();
    let output = registry.convert(source, "rs3", "rstlatex").unwrap();
    assert_eq!(
        output,
        "\\dirrel\n\t{background}{\\rstsegment{Prices fell.}}\n\t{}{\\rstsegment{Sales rose}}\n\t{result}{\\rstsegment{and profits followed.}}\n"
    );
}
