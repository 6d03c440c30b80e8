//! Discourse trees and the shared bracket reader

pub mod ast;
pub mod building;
pub mod error;
pub mod lexing;
pub mod parsing;
pub mod relations;
pub mod testing;

pub use ast::{DiscourseNode, DiscourseTree, Edu, Internal, NodeId};
pub use error::{ConversionError, ConversionResult, ErrorKind};
