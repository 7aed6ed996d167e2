//! Reference PageRank by power iteration
//!
//! Normalised formulation: ranks sum to one, the mass of nodes without
//! outgoing edges is spread uniformly, and iteration stops once the L1
//! change drops below `len * tolerance`.

use super::common::{GraphView, NodeKey};
use std::collections::HashMap;

/// PageRank configuration
pub struct PageRankConfig {
    /// Damping factor (usually 0.85)
    pub damping_factor: f64,
    /// Maximum number of iterations
    pub iterations: usize,
    /// Per-node tolerance for convergence
    pub tolerance: f64,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.85,
            iterations: 100,
            tolerance: 1e-8,
        }
    }
}

/// Calculate PageRank for the graph view
pub fn page_rank(view: &GraphView, config: PageRankConfig) -> HashMap<NodeKey, f64> {
    let n = view.len();
    if n == 0 {
        return HashMap::new();
    }

    let d = config.damping_factor;
    let uniform = 1.0 / n as f64;
    let dangling: Vec<usize> = (0..n).filter(|&v| view.out_degree(v) == 0).collect();
    let mut ranks = vec![uniform; n];
    let mut next = vec![0.0; n];

    for _ in 0..config.iterations {
        let leaked: f64 = dangling.iter().map(|&v| ranks[v]).sum();
        let teleport = (1.0 - d + d * leaked) * uniform;

        for (v, slot) in next.iter_mut().enumerate() {
            let inflow: f64 = view
                .predecessors(v)
                .iter()
                .map(|&p| ranks[p] / view.out_degree(p) as f64)
                .sum();
            *slot = teleport + d * inflow;
        }

        let change: f64 = next.iter().zip(&ranks).map(|(a, b)| (a - b).abs()).sum();
        std::mem::swap(&mut ranks, &mut next);
        if change < n as f64 * config.tolerance {
            break;
        }
    }

    ranks
        .into_iter()
        .enumerate()
        .map(|(v, rank)| (view.key(v).to_string(), rank))
        .collect()
}
