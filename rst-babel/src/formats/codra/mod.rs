//! codra format implementation (read only)
//!
//! Data Model:
//!
//!     CODRA (Joty/Carenini/Ng 2015) writes its trees in the RST-DT bracket layout, so they
//!     are read by the dis reader. The format has its own identifier because CODRA output is
//!     only ever an input: nothing is written back as codra.

use rst_parser::rst::ast::DiscourseTree;

use super::dis::parse_dis;
use crate::error::FormatError;
use crate::format::Format;

/// Format implementation for CODRA parser output
pub struct CodraFormat;

impl Format for CodraFormat {
    fn name(&self) -> &str {
        "codra"
    }

    fn description(&self) -> &str {
        "CODRA discourse parser output (RST-DT bracket layout)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["codra"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<DiscourseTree, FormatError> {
        parse_dis(source).map_err(|err| FormatError::new(self.name(), err))
    }
}
