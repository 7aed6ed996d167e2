//! danker: PageRank on Wikipedia/Wikidata link graphs
//!
//! Computes PageRank-style centrality over directed link graphs given as
//! tab-separated edge files, one `source<TAB>target` pair per line.
//!
//! # Strategies
//!
//! - **In-memory** ("bigmem"): index the source-sorted file once, keeping
//!   predecessor lists, and iterate entirely in memory.
//! - **Streaming** ("smallmem"): keep only out-degrees and ranks, and scan a
//!   second copy of the edges sorted by target once per iteration.
//!
//! Both produce the same ranks for the same `(damping, iterations,
//! start_value)`. Rank mass reaching nodes without outgoing links is not
//! redistributed, and there is no convergence check: exactly `iterations`
//! rounds run.
//!
//! ## Example Usage
//!
//! ```rust
//! use danker::{rank_in_memory, InMemoryEdges, NodeId, RankConfig};
//!
//! // A -> B -> C -> A, sorted by source
//! let left = InMemoryEdges::new("cycle.links", "A\tB\nB\tC\nC\tA\n");
//! let ranks = rank_in_memory(&left, &RankConfig::new(0.85, 50, 0.1)).unwrap();
//!
//! let a = ranks.get(&NodeId::from("A")).unwrap();
//! assert!((a - 1.0).abs() < 1e-3);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod error;
pub mod graph;
pub mod index;
pub mod io;
pub mod run;

// Re-export main types for convenience
pub use algo::{converge, InMemoryIterator, IterationState, RankIterator, Ranks, StreamingIterator};
pub use config::{Mode, RankConfig, RunConfig, Strategy};
pub use error::{DankerError, DankerResult};
pub use graph::{Adjacency, Edge, IdKind, Layout, NodeId, NodeTable, RankBuffers};
pub use index::EdgeIndexer;
pub use io::{format_rank, write_ranks, EdgeFile, EdgeReader, EdgeSource, InMemoryEdges};
pub use run::{compute, rank_in_memory, rank_streaming};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
