//! # rst-parser
//!
//! The canonical discourse tree for Rhetorical Structure Theory annotations, and the pieces
//! every bracket format reader shares.
//!
//! File Layout
//!
//! src/rst
//!   ├── ast         Canonical tree: nodes, root shapes, id index
//!   ├── relations   Relation classifier: nuclei, satellites and relation names
//!   ├── lexing      Bracket tokenizer (logos)
//!   ├── parsing     Generic bracket parser (s-expressions and call syntax)
//!   ├── building    Reader contract: bracket nodes → canonical tree
//!   ├── error       Conversion error taxonomy
//!   └── testing     Tree factories and verified samples
//!
//! Concrete formats (rs3, dis, hilda, hs2015, rstlatex) live in `rst-babel`, which depends on
//! this crate. Every format reads into and writes from [`rst::DiscourseTree`].

pub mod rst;
