//! End-to-end computation: validate, index, iterate

use crate::algo::{converge, InMemoryIterator, Ranks, StreamingIterator};
use crate::config::{Mode, RankConfig, RunConfig, Strategy};
use crate::error::DankerResult;
use crate::index::EdgeIndexer;
use crate::io::{EdgeFile, EdgeSource};

/// Compute ranks for a configured run.
///
/// Streaming mode is selected by the presence of `right_sorted`.
pub fn compute(config: &RunConfig) -> DankerResult<Ranks> {
    config.validate()?;
    let left = EdgeFile::new(&config.left_sorted);

    match config.mode() {
        Mode::InMemory => rank_in_memory(&left, &config.rank),
        Mode::Streaming { right_sorted } => {
            rank_streaming(&left, EdgeFile::new(right_sorted), &config.rank)
        }
    }
}

/// In-memory ("bigmem") ranks from a source-sorted edge source.
pub fn rank_in_memory<L: EdgeSource>(left: &L, rank: &RankConfig) -> DankerResult<Ranks> {
    rank.validate()?;
    let table = EdgeIndexer::new(Strategy::InMemory, rank.start_value).index(left)?;
    let mut iterator = InMemoryIterator::new(rank.damping, left.name());
    converge(table, &mut iterator, rank.iterations)
}

/// Streaming ("smallmem") ranks from a source-sorted and a target-sorted
/// source holding the same edges.
pub fn rank_streaming<L: EdgeSource, R: EdgeSource>(
    left: &L,
    right: R,
    rank: &RankConfig,
) -> DankerResult<Ranks> {
    rank.validate()?;
    let table = EdgeIndexer::new(Strategy::Streaming, rank.start_value).index(left)?;
    let mut iterator = StreamingIterator::new(right, rank.damping);
    converge(table, &mut iterator, rank.iterations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DankerError;
    use crate::io::InMemoryEdges;

    #[test]
    fn test_invalid_rank_config_rejected_before_indexing() {
        // Not sorted either: the config error must win
        let left = InMemoryEdges::new("l", "2\t1\n1\t2\n");
        let result = rank_in_memory(&left, &RankConfig::new(1.5, 10, 0.1));
        assert!(matches!(result, Err(DankerError::InvalidArgument(_))));
    }

    #[test]
    fn test_both_modes_agree() {
        let left = InMemoryEdges::new("l", "1\t2\n1\t3\n2\t3\n3\t1\n4\t3\n");
        let right = InMemoryEdges::new("r", "3\t1\n1\t2\n1\t3\n2\t3\n4\t3\n");
        let rank = RankConfig::new(0.85, 30, 0.1);

        let big = rank_in_memory(&left, &rank).unwrap();
        let small = rank_streaming(&left, right, &rank).unwrap();
        assert_eq!(big.len(), small.len());
        for (id, value) in big.iter() {
            let other = small.get(id).unwrap();
            assert!((value - other).abs() < 1e-12, "{}: {} vs {}", id, value, other);
        }
    }
}
