//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the canonical discourse tree and the file formats of annotation tools and parsers.

pub mod codra;
pub mod dis;
pub mod dplp;
pub mod hilda;
pub mod hs2015;
pub mod rs3;
pub mod rstlatex;
pub mod stagedp;

pub use codra::CodraFormat;
pub use dis::DisFormat;
pub use dplp::DplpFormat;
pub use hilda::HildaFormat;
pub use hs2015::Hs2015Format;
pub use rs3::Rs3Format;
pub use rstlatex::RstLatexFormat;
pub use stagedp::StageDpFormat;
