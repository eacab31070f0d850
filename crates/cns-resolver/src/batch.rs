//! Batched reads
//!
//! A batch settles every slot concurrently and reports results in the
//! order the slots were supplied. One slot failing never aborts its
//! siblings; the first failed slot in supply order decides the shape of
//! the aggregate error.

use cns_subgraph::GraphFault;
use futures::future::BoxFuture;

use crate::{Error, Result};

/// Outcome of one settled batch slot.
#[derive(Debug)]
pub(crate) enum SlotOutcome<T> {
    /// The read completed
    Ok(T),
    /// The index faulted; on-chain data gathered before the fault is kept
    Degraded {
        /// Partial slot value, if any
        partial: Option<T>,
        /// Fault records reported by the index
        faults: Vec<GraphFault>,
    },
    /// The read failed outright
    Fatal(Error),
}

impl<T> SlotOutcome<T> {
    /// Collapses the outcome for reads that never carry partial data.
    pub(crate) fn into_result(self) -> Result<T> {
        match self {
            SlotOutcome::Ok(value) => Ok(value),
            SlotOutcome::Degraded { faults, .. } => Err(Error::Subgraph {
                partial: (),
                faults,
            }),
            SlotOutcome::Fatal(error) => Err(error),
        }
    }
}

/// A prepared read, occupying one slot of a batch.
///
/// Produced by the `*_batch` methods on [`crate::CnsClient`] and consumed
/// by [`execute`].
pub struct BatchRequest<'a, T> {
    future: BoxFuture<'a, SlotOutcome<T>>,
}

impl<'a, T> BatchRequest<'a, T> {
    pub(crate) fn new(future: BoxFuture<'a, SlotOutcome<T>>) -> Self {
        Self { future }
    }
}

/// Aggregate failure of a batch.
#[derive(Debug, thiserror::Error)]
pub enum BatchError<P> {
    /// A slot failed outright; its error propagates unchanged
    #[error(transparent)]
    Call(Error),
    /// A slot hit an index fault; settled data from every slot is kept
    #[error("Subgraph returned {} fault(s)", .faults.len())]
    Subgraph {
        /// Per-slot partial results in supply order
        data: P,
        /// Fault records from the first faulted slot
        faults: Vec<GraphFault>,
    },
}

/// A tuple of batch requests settled as one unit.
///
/// Implemented for tuples of [`BatchRequest`] with one to eight slots.
/// Output and partial tuples preserve supply order.
pub trait BatchSet<'a> {
    /// Tuple of slot result types
    type Output;
    /// Tuple of per-slot optional partials
    type Partial;

    /// Settles every slot and folds the outcomes into one result.
    fn settle(
        self,
    ) -> BoxFuture<'a, std::result::Result<Self::Output, BatchError<Self::Partial>>>;
}

/// Settles a batch of prepared requests.
///
/// Every slot runs to completion even when a sibling fails. A batch of
/// one settles to the same value the plain read would return.
pub async fn execute<'a, B: BatchSet<'a>>(
    requests: B,
) -> std::result::Result<B::Output, BatchError<B::Partial>> {
    requests.settle().await
}

enum FirstFailure {
    Fatal(Error),
    Faults(Vec<GraphFault>),
}

macro_rules! impl_batch_set {
    ($($T:ident => $idx:tt),+) => {
        impl<'a, $($T: Send + 'a),+> BatchSet<'a> for ($(BatchRequest<'a, $T>,)+) {
            type Output = ($($T,)+);
            type Partial = ($(Option<$T>,)+);

            #[allow(non_snake_case)]
            fn settle(
                self,
            ) -> BoxFuture<'a, std::result::Result<Self::Output, BatchError<Self::Partial>>> {
                Box::pin(async move {
                    let ($($T,)+) = tokio::join!($(self.$idx.future),+);
                    match ($($T,)+) {
                        ($(SlotOutcome::Ok($T),)+) => Ok(($($T,)+)),
                        ($($T,)+) => {
                            let mut first: Option<FirstFailure> = None;
                            let data = ($(
                                match $T {
                                    SlotOutcome::Ok(value) => Some(value),
                                    SlotOutcome::Degraded { partial, faults } => {
                                        first.get_or_insert(FirstFailure::Faults(faults));
                                        partial
                                    }
                                    SlotOutcome::Fatal(error) => {
                                        first.get_or_insert(FirstFailure::Fatal(error));
                                        None
                                    }
                                },
                            )+);
                            match first {
                                Some(FirstFailure::Fatal(error)) => Err(BatchError::Call(error)),
                                Some(FirstFailure::Faults(faults)) => {
                                    Err(BatchError::Subgraph { data, faults })
                                }
                                // this arm only matches when some slot is not Ok
                                None => unreachable!("batch arm entered without a failed slot"),
                            }
                        }
                    }
                })
            }
        }
    };
}

impl_batch_set!(T1 => 0);
impl_batch_set!(T1 => 0, T2 => 1);
impl_batch_set!(T1 => 0, T2 => 1, T3 => 2);
impl_batch_set!(T1 => 0, T2 => 1, T3 => 2, T4 => 3);
impl_batch_set!(T1 => 0, T2 => 1, T3 => 2, T4 => 3, T5 => 4);
impl_batch_set!(T1 => 0, T2 => 1, T3 => 2, T4 => 3, T5 => 4, T6 => 5);
impl_batch_set!(T1 => 0, T2 => 1, T3 => 2, T4 => 3, T5 => 4, T6 => 5, T7 => 6);
impl_batch_set!(T1 => 0, T2 => 1, T3 => 2, T4 => 3, T5 => 4, T6 => 5, T7 => 6, T8 => 7);
