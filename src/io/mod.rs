//! Edge file input and rank output

pub mod reader;
pub mod writer;

pub use reader::{EdgeFile, EdgeReader, EdgeSource, InMemoryEdges};
pub use writer::{format_rank, write_ranks};
