//! State exchange between partitions after each RK stage.
//!
//! Every worker owns a contiguous chunk of cells. After a stage the chunks are
//! gathered on the coordinator (rank 0) in rank order, the assembled state is
//! broadcast back, and all workers meet at a barrier before the next stage.
//! The exchange is all-or-nothing: on error `full` is left untouched.

use std::sync::{Arc, Barrier};

use crossbeam_channel::{Receiver, Sender, unbounded};
use thiserror::Error;

use crate::solver::DGCoefficients;

/// Synchronization failures. All of them are fatal to the run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExchangeError {
    /// The other end of a channel is gone.
    #[error("partition {rank} disconnected during exchange")]
    Disconnected { rank: usize },

    /// A payload does not hold exactly one chunk of coefficients.
    #[error("payload from partition {rank} holds {actual} values, expected {expected}")]
    PayloadSize {
        rank: usize,
        expected: usize,
        actual: usize,
    },

    /// A payload arrived on another partition's channel.
    #[error("payload tagged as partition {actual} arrived on channel of partition {expected}")]
    RankMismatch { expected: usize, actual: usize },

    /// The full state cannot be split into equal chunks.
    #[error("state of {len} values cannot be split across {n_partitions} partitions")]
    UnevenState { len: usize, n_partitions: usize },
}

/// Ordered, complete all-gather of partition chunks.
pub trait StateExchange {
    /// This worker's rank.
    fn rank(&self) -> usize;

    /// Number of cooperating workers.
    fn n_partitions(&self) -> usize;

    /// Replace `full` with the concatenation of every worker's `local` chunk.
    ///
    /// Blocks until every worker has contributed and received the result.
    fn all_gather(&self, local: &[f64], full: &mut DGCoefficients) -> Result<(), ExchangeError>;
}

/// Length of one chunk of `full` when split across `n_partitions`.
fn chunk_len(full: &DGCoefficients, n_partitions: usize) -> Result<usize, ExchangeError> {
    let len = full.data.len();
    if n_partitions == 0 || len % n_partitions != 0 {
        return Err(ExchangeError::UnevenState { len, n_partitions });
    }
    Ok(len / n_partitions)
}

fn check_payload(rank: usize, expected: usize, payload: &[f64]) -> Result<(), ExchangeError> {
    if payload.len() != expected {
        return Err(ExchangeError::PayloadSize {
            rank,
            expected,
            actual: payload.len(),
        });
    }
    Ok(())
}

/// Exchange for a single partition that owns every cell.
#[derive(Clone, Copy, Debug, Default)]
pub struct SerialExchange;

impl StateExchange for SerialExchange {
    fn rank(&self) -> usize {
        0
    }

    fn n_partitions(&self) -> usize {
        1
    }

    fn all_gather(&self, local: &[f64], full: &mut DGCoefficients) -> Result<(), ExchangeError> {
        check_payload(0, full.data.len(), local)?;
        full.data.copy_from_slice(local);
        Ok(())
    }
}

/// A chunk on its way to the coordinator.
#[derive(Debug)]
struct Payload {
    rank: usize,
    data: Vec<f64>,
}

#[derive(Debug)]
enum Role {
    Coordinator {
        /// One receiver per peer, indexed by `rank - 1`
        gather: Vec<Receiver<Payload>>,
        broadcast: Vec<Sender<Arc<Vec<f64>>>>,
    },
    Peer {
        gather: Sender<Payload>,
        broadcast: Receiver<Arc<Vec<f64>>>,
    },
}

/// In-process exchange between worker threads.
///
/// Each peer has its own channel pair to the coordinator, so a worker that
/// goes away shows up as [`ExchangeError::Disconnected`] on the other side
/// instead of stalling the gather.
#[derive(Debug)]
pub struct ChannelExchange {
    rank: usize,
    n_partitions: usize,
    role: Role,
    barrier: Arc<Barrier>,
}

impl ChannelExchange {
    /// Create connected endpoints for `n_partitions` workers, in rank order.
    ///
    /// # Panics
    ///
    /// Panics if `n_partitions` is zero.
    pub fn group(n_partitions: usize) -> Vec<ChannelExchange> {
        assert!(n_partitions > 0, "an exchange group needs at least one partition");
        let barrier = Arc::new(Barrier::new(n_partitions));

        let mut coordinator_gather = Vec::with_capacity(n_partitions - 1);
        let mut coordinator_broadcast = Vec::with_capacity(n_partitions - 1);
        let mut peers = Vec::with_capacity(n_partitions - 1);
        for rank in 1..n_partitions {
            let (gather_tx, gather_rx) = unbounded();
            let (broadcast_tx, broadcast_rx) = unbounded();
            coordinator_gather.push(gather_rx);
            coordinator_broadcast.push(broadcast_tx);
            peers.push(ChannelExchange {
                rank,
                n_partitions,
                role: Role::Peer {
                    gather: gather_tx,
                    broadcast: broadcast_rx,
                },
                barrier: Arc::clone(&barrier),
            });
        }

        let mut group = Vec::with_capacity(n_partitions);
        group.push(ChannelExchange {
            rank: 0,
            n_partitions,
            role: Role::Coordinator {
                gather: coordinator_gather,
                broadcast: coordinator_broadcast,
            },
            barrier,
        });
        group.extend(peers);
        group
    }

    fn coordinate(
        &self,
        gather: &[Receiver<Payload>],
        broadcast: &[Sender<Arc<Vec<f64>>>],
        local: &[f64],
        full: &mut DGCoefficients,
    ) -> Result<(), ExchangeError> {
        let chunk = chunk_len(full, self.n_partitions)?;
        check_payload(0, chunk, local)?;

        let mut assembled = Vec::with_capacity(full.data.len());
        assembled.extend_from_slice(local);
        for (offset, rx) in gather.iter().enumerate() {
            let rank = offset + 1;
            let payload = rx
                .recv()
                .map_err(|_| ExchangeError::Disconnected { rank })?;
            if payload.rank != rank {
                return Err(ExchangeError::RankMismatch {
                    expected: rank,
                    actual: payload.rank,
                });
            }
            check_payload(rank, chunk, &payload.data)?;
            assembled.extend_from_slice(&payload.data);
        }

        let assembled = Arc::new(assembled);
        for (offset, tx) in broadcast.iter().enumerate() {
            tx.send(Arc::clone(&assembled))
                .map_err(|_| ExchangeError::Disconnected { rank: offset + 1 })?;
        }

        full.data.copy_from_slice(&assembled);
        self.barrier.wait();
        Ok(())
    }

    fn follow(
        &self,
        gather: &Sender<Payload>,
        broadcast: &Receiver<Arc<Vec<f64>>>,
        local: &[f64],
        full: &mut DGCoefficients,
    ) -> Result<(), ExchangeError> {
        // The coordinator validates sizes, so always deliver.
        gather
            .send(Payload {
                rank: self.rank,
                data: local.to_vec(),
            })
            .map_err(|_| ExchangeError::Disconnected { rank: 0 })?;

        let assembled = broadcast
            .recv()
            .map_err(|_| ExchangeError::Disconnected { rank: 0 })?;
        self.barrier.wait();

        check_payload(0, full.data.len(), &assembled)?;
        full.data.copy_from_slice(&assembled);
        Ok(())
    }
}

impl StateExchange for ChannelExchange {
    fn rank(&self) -> usize {
        self.rank
    }

    fn n_partitions(&self) -> usize {
        self.n_partitions
    }

    fn all_gather(&self, local: &[f64], full: &mut DGCoefficients) -> Result<(), ExchangeError> {
        match &self.role {
            Role::Coordinator { gather, broadcast } => {
                self.coordinate(gather, broadcast, local, full)
            }
            Role::Peer { gather, broadcast } => self.follow(gather, broadcast, local, full),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_serial_exchange_copies_local() {
        let mut full = DGCoefficients::new(2);
        let local: Vec<f64> = (0..12).map(|m| m as f64).collect();
        SerialExchange.all_gather(&local, &mut full).unwrap();
        assert_eq!(full.data, local);

        assert!(matches!(
            SerialExchange.all_gather(&local[..6], &mut full),
            Err(ExchangeError::PayloadSize { .. })
        ));
    }

    #[test]
    fn test_group_ranks_in_order() {
        let group = ChannelExchange::group(3);
        let ranks: Vec<usize> = group.iter().map(|x| x.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2]);
        assert!(group.iter().all(|x| x.n_partitions() == 3));
    }

    #[test]
    fn test_gather_concatenates_in_rank_order() {
        let n = 4;
        let group = ChannelExchange::group(n);
        let results: Vec<Vec<f64>> = thread::scope(|s| {
            let handles: Vec<_> = group
                .iter()
                .map(|exchange| {
                    s.spawn(move || {
                        let rank = exchange.rank();
                        let local = vec![rank as f64; 6];
                        let mut full = DGCoefficients::new(n);
                        exchange.all_gather(&local, &mut full).unwrap();
                        full.data
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let expected: Vec<f64> = (0..n).flat_map(|r| vec![r as f64; 6]).collect();
        for full in results {
            assert_eq!(full, expected);
        }
    }

    #[test]
    fn test_dropped_peer_is_reported() {
        let mut group = ChannelExchange::group(2);
        let peer = group.pop().unwrap();
        drop(peer);
        let coordinator = group.pop().unwrap();

        let mut full = DGCoefficients::new(2);
        let before = full.clone();
        let err = coordinator.all_gather(&[1.0; 6], &mut full).unwrap_err();
        assert_eq!(err, ExchangeError::Disconnected { rank: 1 });
        assert_eq!(full, before);
    }

    #[test]
    fn test_short_payload_is_rejected() {
        let group = ChannelExchange::group(2);
        thread::scope(|s| {
            let mut it = group.into_iter();
            let coordinator = it.next().unwrap();
            let peer = it.next().unwrap();

            let peer_handle = s.spawn(move || {
                let mut full = DGCoefficients::new(2);
                peer.all_gather(&[2.0; 4], &mut full)
            });

            let mut full = DGCoefficients::new(2);
            let err = coordinator.all_gather(&[1.0; 6], &mut full).unwrap_err();
            assert_eq!(
                err,
                ExchangeError::PayloadSize {
                    rank: 1,
                    expected: 6,
                    actual: 4
                }
            );
            assert!(full.data.iter().all(|&v| v == 0.0));
            // Dropping the coordinator releases the waiting peer.
            drop(coordinator);
            assert_eq!(
                peer_handle.join().unwrap(),
                Err(ExchangeError::Disconnected { rank: 0 })
            );
        });
    }
}
