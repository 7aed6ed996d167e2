//! Streaming ("smallmem") iteration over the target-sorted edge file
//!
//! No adjacency is stored. Each round re-opens the target-sorted file and
//! aggregates contiguous groups of rows sharing a target, which is the same
//! pull recurrence as the in-memory iterator in a different traversal order.

use super::RankIterator;
use crate::error::{DankerError, DankerResult};
use crate::graph::table::TableParts;
use crate::graph::{Layout, NodeId, NodeTable};
use crate::io::EdgeSource;
use tracing::debug;

/// Re-scans a target-sorted [`EdgeSource`] once per round.
#[derive(Debug, Clone)]
pub struct StreamingIterator<S> {
    source: S,
    damping: f64,
}

/// The group of rows sharing one target
struct TargetGroup {
    id: NodeId,
    slot: usize,
    rank: f64,
}

impl<S: EdgeSource> StreamingIterator<S> {
    pub fn new(source: S, damping: f64) -> Self {
        Self { source, damping }
    }
}

impl<S: EdgeSource> RankIterator for StreamingIterator<S> {
    fn name(&self) -> &'static str {
        "streaming"
    }

    fn prepare(&mut self, table: &NodeTable) -> DankerResult<()> {
        match table.layout() {
            Layout::Streaming(touched) if touched.len() == table.len() => Ok(()),
            _ => Err(DankerError::InvalidArgument(
                "streaming iteration needs a table indexed without adjacency lists".to_string(),
            )),
        }
    }

    fn round(
        &mut self,
        table: &mut NodeTable,
        iteration: usize,
        read: usize,
    ) -> DankerResult<()> {
        let damping = self.damping;
        let base = 1.0 - damping;
        let file = self.source.name().to_string();
        // Dropped (and the file closed) when the round ends, on success or error
        let mut reader = self.source.open(table.kind())?;
        debug!("Scanning {} for iteration {}", file, iteration + 1);

        let TableParts {
            ids,
            out_degree,
            ranks,
            layout,
        } = table.parts_mut();
        let touched = match layout {
            Layout::Streaming(touched) => touched,
            Layout::InMemory(_) => {
                return Err(DankerError::InvalidArgument(
                    "node table is not laid out for streaming".to_string(),
                ))
            }
        };

        let first_round = iteration == 0;
        let (previous, next) = ranks.split(read);
        let mut group: Option<TargetGroup> = None;

        while let Some(edge) = reader.next_edge()? {
            if group.as_ref().map_or(true, |g| g.id != edge.target) {
                if let Some(done) = group.take() {
                    if edge.target < done.id {
                        return Err(DankerError::OrderingViolation {
                            file,
                            key: edge.target.to_string(),
                            previous: done.id.to_string(),
                        });
                    }
                    next[done.slot] = done.rank;
                }
                let slot = ids
                    .get_index_of(&edge.target)
                    .ok_or_else(|| DankerError::UnknownTarget {
                        file: file.clone(),
                        id: edge.target.to_string(),
                    })?;
                if first_round {
                    touched[slot] = true;
                }
                group = Some(TargetGroup {
                    id: edge.target,
                    slot,
                    rank: base,
                });
            }

            let source = ids
                .get_index_of(&edge.source)
                .filter(|&slot| out_degree[slot] > 0)
                .ok_or_else(|| DankerError::MissingPredecessor {
                    file: file.clone(),
                    id: edge.source.to_string(),
                })?;
            if let Some(current) = group.as_mut() {
                current.rank += damping * previous[source] / out_degree[source] as f64;
            }
        }
        if let Some(done) = group {
            next[done.slot] = done.rank;
        }

        // Nodes that are never a target keep (1 - d) from here on; settle both
        // buffers once instead of revisiting them every round.
        if first_round {
            let mut settled = 0usize;
            for (slot, flag) in touched.iter_mut().enumerate() {
                if !*flag {
                    ranks.settle(slot, base);
                    *flag = true;
                    settled += 1;
                }
            }
            debug!("Settled {} nodes without inbound links", settled);
        }
        Ok(())
    }
}
