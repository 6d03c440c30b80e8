//! Canonical discourse tree
//!
//!     Every conversion goes bytes → reader → canonical tree → writer → bytes. No format ever
//!     talks to another one directly, so this module is the single meeting point of all the
//!     readers and writers.
//!
//! Ordering
//!
//!     EDUs have one global left-to-right order, and it is the only ordering fact every format
//!     preserves. Sibling subtrees are ordered by the position of their own leftmost EDU, which
//!     is why the children of a node are a plain ordered Vec.
//!
//! Modules
//!
//!     - `node` - the two-case node type (leaf | internal) and its traversals
//!     - `tree` - the rooted tree and its canonical root shapes
//!     - `index` - read-only id → node lookup built once from a finished tree

pub mod index;
pub mod node;
pub mod tree;

pub use index::NodeIndex;
pub use node::{DiscourseNode, Edu, Internal, NodeId, PostOrder, PreOrder, NUCLEUS, SATELLITE};
pub use tree::{DiscourseTree, RootContent};
