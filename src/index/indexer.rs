//! Build the node table from the left-sorted edge file
//!
//! One sequential pass. Consecutive lines sharing a source form a run whose
//! length is that source's out-degree; a source id change commits the run.

use crate::config::Strategy;
use crate::error::{DankerError, DankerResult};
use crate::graph::{Adjacency, NodeId, NodeTable};
use crate::io::{EdgeReader, EdgeSource};
use std::io::BufRead;
use tracing::info;

/// Single-pass indexer over a source-sorted edge stream
#[derive(Debug, Clone, Copy)]
pub struct EdgeIndexer {
    strategy: Strategy,
    start_value: f64,
}

/// The run of lines sharing one source
struct SourceRun {
    id: NodeId,
    slot: usize,
    count: u32,
}

impl SourceRun {
    /// Count one more line of this run; out-degrees are stored as u32.
    fn add_edge(&mut self, file: &str) -> DankerResult<()> {
        self.count = self.count.checked_add(1).ok_or_else(|| {
            DankerError::InvalidArgument(format!(
                "node {} in \"{}\" has more than {} outgoing links",
                self.id,
                file,
                u32::MAX
            ))
        })?;
        Ok(())
    }
}

impl EdgeIndexer {
    pub fn new(strategy: Strategy, start_value: f64) -> Self {
        Self {
            strategy,
            start_value,
        }
    }

    /// Sniff the id kind, then index the whole source.
    pub fn index<S: EdgeSource>(&self, source: &S) -> DankerResult<NodeTable> {
        let kind = source.sniff_kind()?;
        info!("Indexing {} ({:?} ids, {:?})", source.name(), kind, self.strategy);
        self.index_reader(source.open(kind)?)
    }

    /// Index an already opened reader.
    ///
    /// Fails with [`DankerError::OrderingViolation`] at the first source id
    /// that is smaller than the run before it.
    pub fn index_reader<R: BufRead>(&self, mut reader: EdgeReader<R>) -> DankerResult<NodeTable> {
        let kind = reader.kind();
        let mut table = match self.strategy {
            Strategy::InMemory => NodeTable::in_memory(kind, self.start_value),
            Strategy::Streaming => NodeTable::streaming(kind, self.start_value),
        };
        let mut predecessors: Vec<Vec<u32>> = Vec::new();
        let mut run: Option<SourceRun> = None;
        let mut edges = 0u64;

        while let Some(edge) = reader.next_edge()? {
            edges += 1;

            let source = if let Some(current) = run.as_mut().filter(|r| r.id == edge.source) {
                current.add_edge(reader.name())?;
                current.slot
            } else {
                if let Some(previous) = run.take() {
                    if edge.source < previous.id {
                        return Err(DankerError::OrderingViolation {
                            file: reader.name().to_string(),
                            key: edge.source.to_string(),
                            previous: previous.id.to_string(),
                        });
                    }
                    table.set_out_degree(previous.slot, previous.count);
                }
                let slot = table.insert(edge.source.clone())?;
                run = Some(SourceRun {
                    id: edge.source,
                    slot,
                    count: 1,
                });
                slot
            };

            let target = table.insert(edge.target)?;
            if self.strategy == Strategy::InMemory {
                if predecessors.len() < table.len() {
                    predecessors.resize_with(table.len(), Vec::new);
                }
                predecessors[target].push(source as u32);
            }
        }

        if let Some(last) = run {
            table.set_out_degree(last.slot, last.count);
        }
        if self.strategy == Strategy::InMemory {
            predecessors.resize_with(table.len(), Vec::new);
            table.attach_adjacency(Adjacency::from_lists(predecessors));
        }

        let dangling = table.out_degrees().iter().filter(|&&d| d == 0).count();
        info!(
            "Indexed {} nodes, {} edges ({} without outgoing links)",
            table.len(),
            edges,
            dangling
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{IdKind, Layout};
    use crate::io::InMemoryEdges;

    fn left(text: &str) -> InMemoryEdges {
        InMemoryEdges::new("test.links", text)
    }

    fn id(i: i64) -> NodeId {
        NodeId::Integer(i)
    }

    #[test]
    fn test_out_degrees_and_dangling() {
        let indexer = EdgeIndexer::new(Strategy::Streaming, 0.1);
        let table = indexer.index(&left("1\t2\n1\t3\n2\t3\n4\t1\n")).unwrap();

        assert_eq!(table.kind(), IdKind::Integer);
        assert_eq!(table.len(), 4);
        let degree = |i| table.out_degree(table.slot(&id(i)).unwrap());
        assert_eq!(degree(1), 2);
        assert_eq!(degree(2), 1);
        assert_eq!(degree(3), 0);
        assert_eq!(degree(4), 1);
        assert!(table.adjacency().is_none());
        assert_eq!(table.layout(), &Layout::Streaming(vec![false; 4]));
    }

    #[test]
    fn test_adjacency_lists_predecessors() {
        let indexer = EdgeIndexer::new(Strategy::InMemory, 0.1);
        let table = indexer.index(&left("A\tC\nB\tC\nB\tC\nC\tA\n")).unwrap();

        assert_eq!(table.kind(), IdKind::Text);
        let slot = |s: &str| table.slot(&NodeId::from(s)).unwrap();
        let adjacency = table.adjacency().unwrap();
        let names = |target: &str| -> Vec<String> {
            adjacency
                .predecessors(slot(target))
                .iter()
                .map(|&p| table.id(p as usize).unwrap().to_string())
                .collect()
        };
        assert_eq!(names("C"), vec!["A", "B", "B"]);
        assert_eq!(names("A"), vec!["C"]);
        assert!(names("B").is_empty());
        assert_eq!(table.out_degree(slot("B")), 2);
        assert_eq!(adjacency.edge_count(), 4);
    }

    #[test]
    fn test_seeds_start_value() {
        let table = EdgeIndexer::new(Strategy::InMemory, 0.25)
            .index(&left("1\t2\n"))
            .unwrap();
        assert_eq!(table.ranks().slot(0), &[0.25, 0.25]);
        assert_eq!(table.ranks().slot(1), &[0.25, 0.25]);
    }

    #[test]
    fn test_rejects_decreasing_source() {
        let result = EdgeIndexer::new(Strategy::InMemory, 0.1).index(&left("1\t2\n3\t1\n2\t3\n"));
        match result {
            Err(DankerError::OrderingViolation { file, key, previous }) => {
                assert_eq!(file, "test.links");
                assert_eq!(key, "2");
                assert_eq!(previous, "3");
            }
            other => panic!("expected OrderingViolation, got {:?}", other.map(|t| t.len())),
        }
    }

    #[test]
    fn test_numeric_not_lexicographic_order() {
        // 9 < 10 numerically, so this is correctly sorted for an integer run
        let table = EdgeIndexer::new(Strategy::Streaming, 0.1)
            .index(&left("9\t10\n10\t9\n"))
            .unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_out_degree_overflow_is_rejected() {
        let mut run = SourceRun {
            id: id(7),
            slot: 0,
            count: u32::MAX - 1,
        };
        run.add_edge("test.links").unwrap();
        assert_eq!(run.count, u32::MAX);

        match run.add_edge("test.links") {
            Err(DankerError::InvalidArgument(reason)) => {
                assert!(reason.contains("node 7"));
                assert!(reason.contains("test.links"));
            }
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
        assert_eq!(run.count, u32::MAX);
    }

    #[test]
    fn test_text_run_with_numeric_first_line() {
        let table = EdgeIndexer::new(Strategy::InMemory, 0.1)
            .index(&left("1984\t2001\n2001\tBerlin\nBerlin\t1984\n"))
            .unwrap();
        assert_eq!(table.kind(), IdKind::Text);
        assert_eq!(table.len(), 3);
        assert!(table.slot(&NodeId::from("1984")).is_some());
        assert!(table.slot(&NodeId::Integer(1984)).is_none());
    }

    #[test]
    fn test_empty_input() {
        let table = EdgeIndexer::new(Strategy::InMemory, 0.1).index(&left("")).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.adjacency().unwrap().node_count(), 0);
    }

    #[test]
    fn test_indexing_is_idempotent() {
        let source = left("1\t2\n1\t1\n2\t3\n3\t1\n3\t2\n");
        let indexer = EdgeIndexer::new(Strategy::InMemory, 0.1);
        let first = indexer.index(&source).unwrap();
        let second = indexer.index(&source).unwrap();

        assert_eq!(first.ids().collect::<Vec<_>>(), second.ids().collect::<Vec<_>>());
        assert_eq!(first.out_degrees(), second.out_degrees());
        assert_eq!(first.adjacency(), second.adjacency());
    }
}
