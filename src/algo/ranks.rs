//! Final ranks of a completed run

use crate::graph::table::SlotIndex;
use crate::graph::{NodeId, NodeTable, RankBuffers};
use crate::io::write_ranks;
use std::io::{self, Write};

/// Ranks read from slot `iterations % 2` once every round has completed.
///
/// Iteration order is the node table's slot order, which is the order ids
/// were first encountered in the left-sorted file.
#[derive(Debug, Clone)]
pub struct Ranks {
    ids: SlotIndex,
    values: Vec<f64>,
    iterations: usize,
}

impl Ranks {
    pub(crate) fn from_table(table: NodeTable, iterations: usize) -> Self {
        let (ids, values) = table.into_ranks(RankBuffers::final_slot(iterations));
        Self {
            ids,
            values,
            iterations,
        }
    }

    /// Rank of one node
    pub fn get(&self, id: &NodeId) -> Option<f64> {
        self.ids.get_index_of(id).map(|slot| self.values[slot])
    }

    /// `(id, rank)` pairs in table order
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, f64)> + '_ {
        self.ids.iter().zip(self.values.iter().copied())
    }

    /// Rank values in table order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Ranks scaled to sum to one, in table order.
    ///
    /// Mass lost at nodes without outgoing links is not redistributed, so this
    /// is only a probability distribution up to that loss.
    pub fn normalized(&self) -> Vec<f64> {
        let total: f64 = self.values.iter().sum();
        if total == 0.0 {
            return self.values.clone();
        }
        self.values.iter().map(|v| v / total).collect()
    }

    /// Number of completed rounds
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Write `<id>\t<rank>` lines
    pub fn write_tsv<W: Write>(&self, out: W) -> io::Result<()> {
        write_ranks(out, self.iter())
    }
}
