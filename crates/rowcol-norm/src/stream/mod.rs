//! Input and Output stream abstractions.
//!
//! The kernel's only contact with the outside world is through two
//! collaborators: a [`MatrixSource`] producing matrix elements in row-major
//! order and a [`MatrixSink`] consuming them in row-major order. Both are
//! single-pass, in-order, and blocking-on-unavailable; neither exposes
//! seeking or re-reading. Bus widths, burst lengths, and transaction depths
//! all live behind these traits.
//!
//! # Adapters
//!
//! | Adapter | Backing | Blocking behavior |
//! |---------|---------|-------------------|
//! | [`SliceSource`] | borrowed slice | never blocks; exhausts at the end |
//! | [`VecSink`] | owned `Vec` | never blocks |
//! | [`ChannelSource`] | `crossbeam_channel::Receiver` | blocks on `recv` |
//! | [`ChannelSink`] | `crossbeam_channel::Sender` | blocks on `send` (back-pressure with a bounded channel) |

use crossbeam_channel::{Receiver, Sender};

use crate::types::Element;

/// Producer side of the kernel: a finite, ordered sequence of R×C elements
/// in row-major order.
pub trait MatrixSource<E: Element> {
    /// Pull the next element, blocking until one is available.
    ///
    /// Returns `None` once the stream is exhausted (or its producer has
    /// disconnected); the kernel treats a premature `None` as fatal.
    fn pull(&mut self) -> Option<E>;
}

/// The consumer side of a sink vanished (e.g. the receiving half of a
/// channel was dropped). Carries no payload; the pipeline attaches the
/// element counts when surfacing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Disconnected;

/// Consumer side of the kernel: accepts exactly R×C elements in row-major
/// order.
pub trait MatrixSink<E: Element> {
    /// Push one element, blocking while the consumer is unable to accept it.
    ///
    /// Blocking is back-pressure, not failure; an `Err` means the consumer
    /// is gone and no further element can ever be delivered.
    fn push(&mut self, value: E) -> Result<(), Disconnected>;
}

/// Source over a borrowed row-major slice.
pub struct SliceSource<'a, E> {
    iter: std::slice::Iter<'a, E>,
}

impl<'a, E> SliceSource<'a, E> {
    pub fn new(data: &'a [E]) -> Self {
        Self { iter: data.iter() }
    }
}

impl<E: Element> MatrixSource<E> for SliceSource<'_, E> {
    #[inline]
    fn pull(&mut self) -> Option<E> {
        self.iter.next().copied()
    }
}

/// Sink that collects the output matrix into an owned `Vec`.
#[derive(Default)]
pub struct VecSink<E> {
    data: Vec<E>,
}

impl<E: Element> VecSink<E> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Pre-allocate for a known element count.
    pub fn with_capacity(len: usize) -> Self {
        Self {
            data: Vec::with_capacity(len),
        }
    }

    /// Consume the sink, yielding the collected row-major output.
    pub fn into_inner(self) -> Vec<E> {
        self.data
    }
}

impl<E: Element> MatrixSink<E> for VecSink<E> {
    #[inline]
    fn push(&mut self, value: E) -> Result<(), Disconnected> {
        self.data.push(value);
        Ok(())
    }
}

/// Source fed by another thread through a channel.
///
/// A blocked `recv` models the input bus stalling; a disconnected sender
/// before R×C elements have arrived surfaces as input exhaustion.
pub struct ChannelSource<E> {
    rx: Receiver<E>,
}

impl<E> From<Receiver<E>> for ChannelSource<E> {
    fn from(rx: Receiver<E>) -> Self {
        Self { rx }
    }
}

impl<E: Element> MatrixSource<E> for ChannelSource<E> {
    #[inline]
    fn pull(&mut self) -> Option<E> {
        self.rx.recv().ok()
    }
}

/// Sink writing into a channel.
///
/// Use a bounded channel to get real back-pressure: `send` blocks the
/// Writer until the consumer drains, exactly the stall semantics of a full
/// output bus.
pub struct ChannelSink<E> {
    tx: Sender<E>,
}

impl<E> From<Sender<E>> for ChannelSink<E> {
    fn from(tx: Sender<E>) -> Self {
        Self { tx }
    }
}

impl<E: Element> MatrixSink<E> for ChannelSink<E> {
    #[inline]
    fn push(&mut self, value: E) -> Result<(), Disconnected> {
        self.tx.send(value).map_err(|_| Disconnected)
    }
}
