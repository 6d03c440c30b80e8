//! Multi-format interoperability for RST discourse trees
//!
//!     This crate provides a uniform interface for converting between the canonical discourse
//!     tree (see rst-parser) and the file formats of annotation tools and discourse parsers
//!     (rs3, dis, hilda, hs2015, codra, dplp, stagedp, rstlatex).
//!
//! Architecture
//!
//!     - Format trait: Uniform interface for all formats (parsing and/or serialization)
//!     - FormatRegistry: closed table of formats, keyed by FormatId, validated on creation
//!     - Format implementations: Concrete implementations for each supported format
//!
//!     Every conversion goes through the canonical tree: bytes → reader → tree → writer →
//!     bytes. No format converts directly to another.
//!
//!     This is a pure lib: it powers rst-cli but is shell agnostic, that is no code here may
//!     suppose a shell environment, be it std printing, env vars or exit codes. Errors come
//!     back as a FormatError whose kind the caller maps to its own presentation.
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # FormatError: kind, message, format, file
//!     ├── format.rs               # Format trait and RenderOptions
//!     ├── registry.rs             # FormatId and FormatRegistry
//!     ├── ir
//!     │   └── records.rs          # flat record set of the exchange format
//!     ├── mappings
//!     │   ├── graph_to_tree.rs    # records → canonical tree
//!     │   ├── tree_to_graph.rs    # canonical tree → records
//!     │   └── multisat.rs         # merging satellite chains for \dirrel
//!     ├── formats
//!     │   ├── <format>
//!     │   │   ├── parser.rs       # Parser implementation
//!     │   │   ├── serializer.rs   # Serializer implementation
//!     │   │   └── mod.rs
//!     ├── lib.rs
//!
//! Testing
//!
//!     Unit tests live beside each module. Cross-format properties (round trips, record order
//!     independence) and satellite-merge cases live in tests/.
//!
//! The Exchange Format
//!
//!     rs3 is the one format that stores a graph instead of a tree, so it is the one that needs
//!     real mapping work. That work is split from the XML: the rs3 reader only produces a
//!     [`ir::FlatGraph`], and [`mappings::graph_to_tree`] rebuilds the ordered tree from it.
//!     The bracket formats share rst-parser's tokenizer, bracket parser and tree builder, so
//!     each of them only maps its own vocabulary.

pub mod error;
pub mod format;
pub mod formats;
pub mod registry;

pub mod ir;
pub mod mappings;

pub use error::FormatError;
pub use format::{Format, RenderOptions};
pub use registry::{FormatId, FormatRegistry};
