//! Contiguous partitioning of phase-space cells across workers.

use std::ops::Range;

use super::config::ConfigError;

/// The chunk of cells owned by one worker.
///
/// Chunks are equal-sized, hold whole space cells, and are laid out in rank
/// order, so concatenating the chunks of ranks `0..n_partitions` reproduces
/// the global cell order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partition {
    rank: usize,
    n_partitions: usize,
    chunk_cells: usize,
}

impl Partition {
    /// Partition `n_cells` cells into `n_partitions` chunks and select `rank`.
    ///
    /// Every chunk must cover whole space cells of `size_v` velocity cells.
    pub fn new(
        n_cells: usize,
        size_v: usize,
        rank: usize,
        n_partitions: usize,
    ) -> Result<Self, ConfigError> {
        if n_partitions == 0 || n_cells % n_partitions != 0 {
            return Err(ConfigError::UnevenPartition {
                n_cells,
                n_partitions,
            });
        }
        let chunk_cells = n_cells / n_partitions;
        if size_v == 0 || chunk_cells % size_v != 0 {
            return Err(ConfigError::MisalignedPartition {
                chunk_cells,
                size_v,
            });
        }
        if rank >= n_partitions {
            return Err(ConfigError::InvalidRank { rank, n_partitions });
        }
        Ok(Self {
            rank,
            n_partitions,
            chunk_cells,
        })
    }

    /// The whole domain as a single partition.
    pub fn whole(n_cells: usize) -> Self {
        Self {
            rank: 0,
            n_partitions: 1,
            chunk_cells: n_cells,
        }
    }

    /// This worker's rank.
    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Number of workers.
    #[inline]
    pub fn n_partitions(&self) -> usize {
        self.n_partitions
    }

    /// Cells per chunk.
    #[inline]
    pub fn chunk_cells(&self) -> usize {
        self.chunk_cells
    }

    /// Global cell range owned by this worker.
    #[inline]
    pub fn cell_range(&self) -> Range<usize> {
        let start = self.rank * self.chunk_cells;
        start..start + self.chunk_cells
    }
}
