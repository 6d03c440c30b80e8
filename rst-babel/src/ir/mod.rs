//! Intermediate Representation (IR) for the exchange format.
//!
//! The exchange format (rs3) does not store a tree. It stores a flat set of records, each
//! pointing at its parent, plus a block of relation declarations. This module holds that flat
//! form so the XML layer and the graph ↔ tree mappings can be written and tested apart.
//!
//! # Information Loss
//!
//! Record ids are assigned by whatever tool wrote the file and carry no order. Reading keeps
//! them on the canonical nodes (for lookups), but equality and writing ignore them: the
//! serializer renumbers from scratch.
//!
//! # Modules
//!
//! - [`records`]: records, group types and the declaration table

pub mod records;

pub use records::{FlatGraph, GroupType, Record, RecordKind};
