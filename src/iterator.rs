//! Streaming iteration over sets.
//!
//! Sets can be enumerated by a background producer thread that hands each
//! element to the consumer through an unbuffered (rendezvous) channel. Two
//! flavours exist:
//!
//! - `iter()` returns a bare [`Receiver`]. The producer runs until every
//!   element is delivered or the receiver is dropped.
//! - `iterator()` returns a [`SetIterator`], which can additionally be
//!   stopped early with [`SetIterator::stop`].
//!
//! # Cancellation
//!
//! Stopping is cooperative. The producer checks the stop signal before each
//! element and races it against the hand-off, so at most one element that
//! the producer had already committed to may still arrive. `stop` drains
//! whatever is in flight and joins the producer thread, so once it returns
//! the producer is gone and any lock it held has been released.
//!
//! Dropping a [`SetIterator`] stops it.
//!
//! # Examples
//!
//! ```rust
//! use mapset::{Set, new_set};
//!
//! let set = new_set(0..100);
//! let mut iterator = set.iterator();
//!
//! let first = iterator.next();
//! assert!(first.is_some());
//!
//! iterator.stop();
//! assert_eq!(iterator.next(), None);
//!
//! // The producer released its read lock, so writers proceed.
//! set.clear();
//! assert!(set.is_empty());
//! ```

use std::cell::Cell;
use std::fmt;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, TryRecvError, bounded, never, select};

/// Lifecycle of a [`SetIterator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IteratorState {
    /// The producer may still deliver elements.
    Producing,
    /// The iterator was stopped before the stream was drained.
    Stopped,
    /// Every element was delivered and the stream is closed.
    Exhausted,
}

/// A cancellable, single-pass stream over the elements of a set.
///
/// Elements are produced lazily by a background thread. Iterate it with
/// [`Iterator::next`] or read the underlying channel through
/// [`receiver`](Self::receiver).
///
/// A `SetIterator` obtained from a thread-safe set keeps that set's read
/// lock held until the stream is drained, stopped or dropped.
pub struct SetIterator<T> {
    receiver: Receiver<T>,
    stop: Option<Sender<()>>,
    producer: Option<JoinHandle<bool>>,
    state: IteratorState,
}

impl<T> SetIterator<T> {
    /// Returns the channel the producer delivers elements on.
    ///
    /// The channel is closed once the set is exhausted or the iterator is
    /// stopped.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<T> {
        &self.receiver
    }

    /// Returns the current lifecycle state.
    #[inline]
    pub const fn state(&self) -> IteratorState {
        self.state
    }

    /// Stops the iterator.
    ///
    /// No further elements are returned by [`Iterator::next`]. Elements the
    /// producer already committed to are drained and discarded, and the
    /// producer thread is joined before this returns.
    ///
    /// Calling `stop` more than once is harmless. If every element had
    /// already been received, for example through
    /// [`receiver`](Self::receiver), the state becomes
    /// [`Exhausted`](IteratorState::Exhausted) rather than
    /// [`Stopped`](IteratorState::Stopped).
    pub fn stop(&mut self) {
        let Some(stop) = self.stop.take() else {
            return;
        };
        drop(stop);

        let discarded = self.receiver.iter().count();
        let completed = self.reap();

        if self.state == IteratorState::Producing {
            if completed && discarded == 0 {
                self.state = IteratorState::Exhausted;
            } else {
                self.state = IteratorState::Stopped;
                tracing::debug!(discarded, "set iterator stopped early");
            }
        }
    }

    // Joins the producer; `true` if it delivered its whole stream.
    fn reap(&mut self) -> bool {
        let Some(producer) = self.producer.take() else {
            return false;
        };
        producer.join().unwrap_or_else(|_| {
            tracing::warn!("set iterator producer panicked");
            false
        })
    }
}

impl<T> Iterator for SetIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state != IteratorState::Producing {
            return None;
        }
        if let Ok(element) = self.receiver.recv() {
            Some(element)
        } else {
            self.state = IteratorState::Exhausted;
            self.stop = None;
            self.reap();
            None
        }
    }
}

impl<T> Drop for SetIterator<T> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<T> fmt::Debug for SetIterator<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SetIterator")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Producer side
// =============================================================================

/// The producer's end of a stream.
pub(crate) struct Emitter<T> {
    items: Sender<T>,
    stop: Receiver<()>,
    delivered: Cell<usize>,
    cut_short: Cell<bool>,
}

impl<T> Emitter<T> {
    const fn new(items: Sender<T>, stop: Receiver<()>) -> Self {
        Self {
            items,
            stop,
            delivered: Cell::new(0),
            cut_short: Cell::new(false),
        }
    }

    /// Hands one element to the consumer.
    ///
    /// Returns `false` once the producer should give up: the stream was
    /// stopped or the consumer went away.
    pub(crate) fn emit(&self, element: T) -> bool {
        if matches!(self.stop.try_recv(), Err(TryRecvError::Disconnected)) {
            self.cut_short.set(true);
            return false;
        }
        let sent = select! {
            recv(self.stop) -> _ => false,
            send(self.items, element) -> result => result.is_ok(),
        };
        if sent {
            self.delivered.set(self.delivered.get() + 1);
        } else {
            self.cut_short.set(true);
        }
        sent
    }
}

// Returns `true` if the stream ran to completion.
fn run_producer<T, F>(produce: F, emitter: Emitter<T>) -> bool
where
    F: FnOnce(&Emitter<T>),
{
    tracing::trace!("set producer started");
    produce(&emitter);
    let completed = !emitter.cut_short.get();
    tracing::trace!(
        delivered = emitter.delivered.get(),
        completed,
        "set producer finished"
    );
    completed
}

/// Spawns a producer whose stream can only end by exhaustion or by the
/// consumer dropping the receiver.
pub(crate) fn spawn_stream<T, F>(produce: F) -> Receiver<T>
where
    T: Send + 'static,
    F: FnOnce(&Emitter<T>) + Send + 'static,
{
    let (items, receiver) = bounded(0);
    let emitter = Emitter::new(items, never());
    thread::spawn(move || run_producer(produce, emitter));
    receiver
}

/// Spawns a producer wrapped in a stoppable [`SetIterator`].
pub(crate) fn spawn_iterator<T, F>(produce: F) -> SetIterator<T>
where
    T: Send + 'static,
    F: FnOnce(&Emitter<T>) + Send + 'static,
{
    let (items, receiver) = bounded(0);
    let (stop, stop_signal) = bounded(0);
    let emitter = Emitter::new(items, stop_signal);
    let producer = thread::spawn(move || run_producer(produce, emitter));
    SetIterator {
        receiver,
        stop: Some(stop),
        producer: Some(producer),
        state: IteratorState::Producing,
    }
}

/// Streams `elements` until exhaustion or cancellation.
pub(crate) fn emit_all<T, I>(emitter: &Emitter<T>, elements: I)
where
    I: IntoIterator<Item = T>,
{
    for element in elements {
        if !emitter.emit(element) {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[rstest]
    fn test_iterator_delivers_every_element() {
        let iterator = spawn_iterator(|emitter| emit_all(emitter, 0..10));
        let mut collected: Vec<i32> = iterator.collect();
        collected.sort_unstable();
        assert_eq!(collected, (0..10).collect::<Vec<_>>());
    }

    #[rstest]
    fn test_iterator_reaches_exhausted_state() {
        let mut iterator = spawn_iterator(|emitter| emit_all(emitter, [1, 2]));
        assert_eq!(iterator.state(), IteratorState::Producing);
        while iterator.next().is_some() {}
        assert_eq!(iterator.state(), IteratorState::Exhausted);
        iterator.stop();
        assert_eq!(iterator.state(), IteratorState::Exhausted);
    }

    #[rstest]
    fn test_stop_is_idempotent() {
        let mut iterator = spawn_iterator(|emitter| emit_all(emitter, 0..1000));
        iterator.stop();
        iterator.stop();
        assert_eq!(iterator.state(), IteratorState::Stopped);
        assert_eq!(iterator.next(), None);
    }

    #[rstest]
    fn test_stop_after_draining_receiver_reports_exhausted() {
        let mut iterator = spawn_iterator(|emitter| emit_all(emitter, 0..5));
        let received: Vec<i32> = iterator.receiver().iter().collect();
        assert_eq!(received.len(), 5);
        iterator.stop();
        assert_eq!(iterator.state(), IteratorState::Exhausted);
        assert_eq!(iterator.next(), None);
    }

    #[rstest]
    fn test_stop_after_partial_receiver_read_reports_stopped() {
        let mut iterator = spawn_iterator(|emitter| emit_all(emitter, 0..5));
        assert_eq!(iterator.receiver().recv().ok(), Some(0));
        iterator.stop();
        assert_eq!(iterator.state(), IteratorState::Stopped);
    }

    #[rstest]
    fn test_panicked_producer_reports_stopped() {
        let mut iterator = spawn_iterator(|emitter: &Emitter<i32>| {
            emitter.emit(1);
            panic!("producer failure");
        });
        assert_eq!(iterator.next(), Some(1));
        iterator.stop();
        assert_eq!(iterator.state(), IteratorState::Stopped);
    }

    #[rstest]
    fn test_stop_joins_producer() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&finished);
        let mut iterator = spawn_iterator(move |emitter| {
            emit_all(emitter, 0..1_000_000);
            flag.store(true, Ordering::SeqCst);
        });
        assert!(iterator.next().is_some());
        iterator.stop();
        assert!(finished.load(Ordering::SeqCst));
    }

    #[rstest]
    fn test_stream_producer_exits_when_receiver_dropped() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&finished);
        let (done_sender, done) = bounded(1);
        let receiver = spawn_stream(move |emitter| {
            emit_all(emitter, 0..1_000_000);
            flag.store(true, Ordering::SeqCst);
            let _ = done_sender.send(());
        });
        assert_eq!(receiver.recv().ok(), Some(0));
        drop(receiver);
        done.recv().expect("producer should finish");
        assert!(finished.load(Ordering::SeqCst));
    }

    #[rstest]
    fn test_receiver_is_closed_after_exhaustion() {
        let iterator = spawn_iterator(|emitter| emit_all(emitter, ["only"]));
        assert_eq!(iterator.receiver().recv().ok(), Some("only"));
        assert!(iterator.receiver().recv().is_err());
    }
}
