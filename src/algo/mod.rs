//! Rank iteration
//!
//! Both strategies compute the same pull recurrence
//!
//! ```text
//! rank'(v) = (1 - d) + d * sum(rank(p) / out_degree(p) for every edge p -> v)
//! ```
//!
//! for a fixed number of rounds. They differ only in where the edges come
//! from: stored predecessor lists ([`InMemoryIterator`]) or one scan of the
//! target-sorted file per round ([`StreamingIterator`]).

pub mod in_memory;
pub mod ranks;
pub mod streaming;

pub use in_memory::InMemoryIterator;
pub use ranks::Ranks;
pub use streaming::StreamingIterator;

use crate::error::DankerResult;
use crate::graph::{NodeTable, RankBuffers};
use tracing::{debug, info};

/// One strategy for computing a round of the recurrence.
pub trait RankIterator {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Check the table carries the layout this iterator needs.
    fn prepare(&mut self, table: &NodeTable) -> DankerResult<()>;

    /// Read every rank from buffer `read` and write the new ranks into the
    /// other buffer.
    ///
    /// A failing round may leave the write buffer partially updated; the
    /// driver then drops the whole table.
    fn round(&mut self, table: &mut NodeTable, iteration: usize, read: usize) -> DankerResult<()>;
}

/// Progress of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterationState {
    Unstarted,
    /// Round `n` is scanning its input
    Reading(usize),
    /// Round `n` completed; its write slot becomes the next read slot
    Swapping(usize),
    Done,
}

impl IterationState {
    /// The state after the work of `self` has completed.
    pub fn advance(self, iterations: usize) -> Self {
        match self {
            IterationState::Unstarted if iterations == 0 => IterationState::Done,
            IterationState::Unstarted => IterationState::Reading(0),
            IterationState::Reading(iteration) => IterationState::Swapping(iteration),
            IterationState::Swapping(iteration) if iteration + 1 >= iterations => IterationState::Done,
            IterationState::Swapping(iteration) => IterationState::Reading(iteration + 1),
            IterationState::Done => IterationState::Done,
        }
    }
}

/// Run `iterations` rounds over `table` and return the final ranks.
///
/// The table is consumed: if any round fails, it is dropped along with its
/// half-written buffer and only the error comes back.
pub fn converge<I: RankIterator>(
    mut table: NodeTable,
    iterator: &mut I,
    iterations: usize,
) -> DankerResult<Ranks> {
    let mut state = IterationState::Unstarted;

    loop {
        match state {
            IterationState::Unstarted => {
                iterator.prepare(&table)?;
                info!(
                    "Running {} iterations ({}) over {} nodes",
                    iterations,
                    iterator.name(),
                    table.len()
                );
            }
            IterationState::Reading(iteration) => {
                let read = RankBuffers::read_slot(iteration);
                debug!(
                    "iteration {}: read slot {}, write slot {}",
                    iteration + 1,
                    read,
                    RankBuffers::write_slot(iteration)
                );
                iterator.round(&mut table, iteration, read)?;
            }
            IterationState::Swapping(iteration) => {
                info!(iteration = iteration + 1, of = iterations, "iteration complete");
            }
            IterationState::Done => break,
        }
        state = state.advance(iterations);
        debug!("state -> {:?}", state);
    }

    Ok(Ranks::from_table(table, iterations))
}
