//! In-memory ("bigmem") iteration over stored predecessor lists

use super::RankIterator;
use crate::error::{DankerError, DankerResult};
use crate::graph::table::TableParts;
use crate::graph::{Layout, NodeTable};

/// Pulls predecessor ranks directly from the node table's adjacency.
///
/// Needs O(V + E) memory but reads the edge file only once, while indexing.
#[derive(Debug, Clone)]
pub struct InMemoryIterator {
    damping: f64,
    /// Edge file the adjacency came from, for error messages
    source_name: String,
}

impl InMemoryIterator {
    pub fn new(damping: f64, source_name: impl Into<String>) -> Self {
        Self {
            damping,
            source_name: source_name.into(),
        }
    }
}

impl RankIterator for InMemoryIterator {
    fn name(&self) -> &'static str {
        "in-memory"
    }

    fn prepare(&mut self, table: &NodeTable) -> DankerResult<()> {
        match table.adjacency() {
            Some(adjacency) if adjacency.node_count() == table.len() => Ok(()),
            _ => Err(DankerError::InvalidArgument(
                "in-memory iteration needs a table indexed with adjacency lists".to_string(),
            )),
        }
    }

    fn round(
        &mut self,
        table: &mut NodeTable,
        _iteration: usize,
        read: usize,
    ) -> DankerResult<()> {
        let damping = self.damping;
        let base = 1.0 - damping;

        let outcome = {
            let TableParts {
                out_degree,
                ranks,
                layout,
                ..
            } = table.parts_mut();
            let adjacency = match &*layout {
                Layout::InMemory(adjacency) => adjacency,
                Layout::Streaming(_) => {
                    return Err(DankerError::InvalidArgument(
                        "node table has no adjacency lists".to_string(),
                    ))
                }
            };
            let (previous, next) = ranks.split(read);
            pull_all(
                adjacency.predecessors_by_node(),
                out_degree,
                previous,
                next,
                damping,
                base,
            )
        };

        outcome.map_err(|slot| DankerError::MissingPredecessor {
            file: self.source_name.clone(),
            id: table
                .id(slot)
                .map(ToString::to_string)
                .unwrap_or_else(|| format!("#{}", slot)),
        })
    }
}

/// Compute every node's new rank. On failure returns the slot of a
/// predecessor that has no outgoing edges recorded.
fn pull_all<'a>(
    predecessors: impl Iterator<Item = &'a [u32]>,
    out_degree: &[u32],
    previous: &[f64],
    next: &mut [f64],
    damping: f64,
    base: f64,
) -> Result<(), usize> {
    for (node, sources) in predecessors.enumerate() {
        let mut rank = base;
        for &source in sources {
            let source = source as usize;
            let degree = out_degree[source];
            if degree == 0 {
                return Err(source);
            }
            rank += damping * previous[source] / degree as f64;
        }
        next[node] = rank;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::converge;
    use crate::config::Strategy;
    use crate::graph::NodeId;
    use crate::index::EdgeIndexer;
    use crate::io::InMemoryEdges;

    fn run(text: &str, damping: f64, iterations: usize, start: f64) -> crate::algo::Ranks {
        let left = InMemoryEdges::new("test.links", text);
        let table = EdgeIndexer::new(Strategy::InMemory, start).index(&left).unwrap();
        converge(table, &mut InMemoryIterator::new(damping, "test.links"), iterations).unwrap()
    }

    #[test]
    fn test_cycle_converges_to_one_third() {
        let ranks = run("A\tB\nB\tC\nC\tA\n", 0.85, 50, 0.1);
        assert_eq!(ranks.len(), 3);
        for (_, rank) in ranks.iter() {
            assert!((rank - 1.0).abs() < 1e-3, "rank {}", rank);
        }
        for share in ranks.normalized() {
            assert!((share - 1.0 / 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_single_edge() {
        let s = 0.3;
        let one = run("A\tB\n", 0.85, 1, s);
        assert_eq!(one.get(&NodeId::from("A")), Some(1.0 - 0.85));
        assert_eq!(one.get(&NodeId::from("B")), Some((1.0 - 0.85) + 0.85 * s / 1.0));

        let many = run("A\tB\n", 0.85, 7, s);
        assert_eq!(many.get(&NodeId::from("A")), Some(1.0 - 0.85));
        assert_eq!(many.get(&NodeId::from("B")), Some((1.0 - 0.85) + 0.85 * (1.0 - 0.85)));
    }

    #[test]
    fn test_parallel_edges_count_twice() {
        // 1 -> 2 twice, 1 -> 3 once: node 2 receives two thirds of 1's rank
        let ranks = run("1\t2\n1\t2\n1\t3\n", 0.5, 1, 0.9);
        let r2 = ranks.get(&NodeId::Integer(2)).unwrap();
        let r3 = ranks.get(&NodeId::Integer(3)).unwrap();
        assert!((r2 - (0.5 + 0.5 * 0.9 * 2.0 / 3.0)).abs() < 1e-15);
        assert!((r3 - (0.5 + 0.5 * 0.9 / 3.0)).abs() < 1e-15);
    }

    #[test]
    fn test_rejects_streaming_table() {
        let left = InMemoryEdges::new("test.links", "1\t2\n");
        let table = EdgeIndexer::new(Strategy::Streaming, 0.1).index(&left).unwrap();
        let result = converge(table, &mut InMemoryIterator::new(0.85, "test.links"), 3);
        assert!(matches!(result, Err(DankerError::InvalidArgument(_))));
    }
}
