//! Contains logic for mapping between the canonical tree and other representations.

pub mod graph_to_tree;
pub mod multisat;
pub mod tree_to_graph;

pub use graph_to_tree::{graph_to_tree, VIRTUAL_ROOT};
pub use multisat::{merge_satellites, Slot};
pub use tree_to_graph::tree_to_graph;
