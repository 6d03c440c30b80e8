//! rs3 serialization (flat graph → rs3 XML)
//!
//! Writes by hand: the document shape is fixed and small, and hand-writing keeps attribute
//! order and indentation byte-stable across runs.
//!
//! ## Example
//!
//! ```text
//! <?xml version="1.0" encoding="utf-8"?>
//! <rst>
//!     <header>
//!         <relations>
//!             <rel name="circumstance" type="rst"/>
//!         </relations>
//!     </header>
//!     <body>
//!         <segment id="2" parent="3" relname="circumstance">sat first</segment>
//!         <segment id="3" parent="1" relname="span">nuc second</segment>
//!         <group id="1" type="span"/>
//!     </body>
//! </rst>
//! ```

use crate::format::RenderOptions;
use crate::ir::{FlatGraph, Record, RecordKind};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;

struct Rs3Serializer {
    output: String,
    indent_width: usize,
    indent_level: usize,
}

impl Rs3Serializer {
    fn new(indent_width: usize) -> Self {
        Self {
            output: String::new(),
            indent_width,
            indent_level: 0,
        }
    }

    fn push_line(&mut self, s: &str) {
        self.output
            .push_str(&" ".repeat(self.indent_width * self.indent_level));
        self.output.push_str(s);
        self.output.push('\n');
    }

    /// Opens `tag` and runs `body` one level deeper, or self-closes it when `is_empty`.
    fn container(&mut self, tag: &str, is_empty: bool, body: impl FnOnce(&mut Self)) {
        if is_empty {
            self.push_line(&format!("<{}/>", tag));
            return;
        }
        self.push_line(&format!("<{}>", tag));
        self.indent_level += 1;
        body(self);
        self.indent_level -= 1;
        self.push_line(&format!("</{}>", tag));
    }

    fn serialize_graph(&mut self, graph: &FlatGraph) {
        self.container("rst", false, |s| {
            s.container("header", false, |s| {
                s.container("relations", graph.relations.is_empty(), |s| {
                    for (name, relation_type) in &graph.relations {
                        s.push_line(&format!(
                            r#"<rel name="{}" type="{}"/>"#,
                            escape_xml(name),
                            relation_type.as_rs3()
                        ));
                    }
                });
            });
            s.container("body", graph.records.is_empty(), |s| {
                for record in &graph.records {
                    s.serialize_record(record);
                }
            });
        });
    }

    fn serialize_record(&mut self, record: &Record) {
        let mut attributes = format!(r#"id="{}""#, record.id);
        if let Some(parent) = record.parent {
            attributes.push_str(&format!(r#" parent="{}""#, parent));
        }
        if let Some(relname) = &record.relname {
            attributes.push_str(&format!(r#" relname="{}""#, escape_xml(relname)));
        }

        match &record.kind {
            RecordKind::Segment { text } => {
                self.push_line(&format!(
                    "<segment {}>{}</segment>",
                    attributes,
                    escape_xml(text)
                ));
            }
            RecordKind::Group(group_type) => {
                self.push_line(&format!(
                    r#"<group {} type="{}"/>"#,
                    attributes,
                    group_type.as_str()
                ));
            }
        }
    }
}

/// Render a flat graph as an rs3 document.
pub fn serialize_rs3(graph: &FlatGraph, options: &RenderOptions) -> String {
    let mut serializer = Rs3Serializer::new(options.indent_width);
    if options.xml_declaration {
        serializer.output.push_str(XML_DECLARATION);
        serializer.output.push('\n');
    }
    serializer.serialize_graph(graph);
    serializer.output
}

/// Escape XML special characters
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\"', "&quot;")
        .replace('\'', "&apos;")
}
