pub mod common;
pub mod pagerank;
pub mod stats;

pub use common::{GraphView, NodeKey};
pub use pagerank::{page_rank, PageRankConfig};
pub use stats::pearson;
