//! dis format implementation
//!
//! Data Model:
//!
//!     The bracket format of the RST Discourse Treebank. Each node is an s-expression whose
//!     head is its role (`Root`, `Nucleus`, `Satellite`) followed by property nodes:
//!
//!     | dis                        | Canonical tree                                   |
//!     | (text _!..._!)             | leaf                                             |
//!     | (rel2par span)             | the span nucleus of a mononuclear relation       |
//!     | Nucleus (rel2par R)        | a nucleus of multinuclear relation R             |
//!     | Satellite (rel2par R)      | the satellite of mononuclear relation R          |
//!     | (span a b) / (leaf i)      | EDU positions, recomputed on write               |
//!
//!     Children carry explicit roles, so the reader hands its nodes to the shared tree builder
//!     with an unspecified owner. The writer is the exact inverse and round-trips any tree it
//!     accepts.

pub mod parser;
pub mod serializer;

use rst_parser::rst::ast::DiscourseTree;

use crate::error::FormatError;
use crate::format::{Format, RenderOptions};

pub use parser::parse_dis;
pub use serializer::serialize_dis;

/// Format implementation for RST-DT dis trees
pub struct DisFormat;

impl Format for DisFormat {
    fn name(&self) -> &str {
        "dis"
    }

    fn description(&self) -> &str {
        "RST Discourse Treebank bracket format"
    }

    fn file_extensions(&self) -> &[&str] {
        &["dis"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<DiscourseTree, FormatError> {
        parse_dis(source).map_err(|err| FormatError::new(self.name(), err))
    }

    fn serialize(
        &self,
        tree: &DiscourseTree,
        _options: &RenderOptions,
    ) -> Result<String, FormatError> {
        serialize_dis(tree).map_err(|err| FormatError::new(self.name(), err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rst_parser::rst::testing::{assert_same_tree, samples};

    #[test]
    fn test_round_trip_samples() {
        let options = RenderOptions::default();
        for sample in [
            samples::single(),
            samples::sat_before_nuc(),
            samples::nuc_before_sat(),
            samples::joint(),
            samples::nested(),
        ] {
            let written = DisFormat.serialize(&sample, &options).unwrap();
            let read = DisFormat.parse(&written).unwrap();
            assert_same_tree(&read, &sample);
        }
    }

    #[test]
    fn test_errors_carry_format_name() {
        let err = DisFormat.serialize(&samples::empty(), &RenderOptions::default());
        assert_eq!(err.unwrap_err().format, "dis");
    }
}
