//! Multicast hot sequence.
//!
//! A [`Subject`] is fed from outside with `push`, `raise_error` and `complete`.
//! Any number of consumers may [`attach`](Subject::attach); each one receives every
//! notice pushed after it attached, in push order, buffered in its own unbounded
//! queue until it is pulled.

use async_stream::stream;
use futures::channel::oneshot;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::config::SubjectConfig;
use crate::cursor::{Advance, Cursor, Step};
use crate::error::{SeqError, SeqResult};
use crate::source::{IntoSource, Source};

#[derive(Debug, Clone)]
enum Notice<T> {
    Value(T),
    Error(SeqError),
    Complete,
}

impl<T> Notice<T> {
    fn terminal(&self) -> Option<Terminal> {
        match self {
            Notice::Value(_) => None,
            Notice::Error(err) => Some(Terminal::Error(err.clone())),
            Notice::Complete => Some(Terminal::Complete),
        }
    }
}

#[derive(Debug, Clone)]
enum Terminal {
    Error(SeqError),
    Complete,
}

impl Terminal {
    fn report<T>(&self) -> Advance<T> {
        match self {
            Terminal::Error(err) => Err(err.clone()),
            Terminal::Complete => Ok(Step::Done(())),
        }
    }
}

/// Per-consumer queue plus the single-slot waiter of a suspended advance
struct Slot<T> {
    queue: VecDeque<Notice<T>>,
    waiter: Option<oneshot::Sender<()>>,
    terminal: Option<Terminal>,
}

struct Consumer<T> {
    id: u64,
    slot: Mutex<Slot<T>>,
    /// Serializes advances: a fair mutex, so they settle in call order
    turn: tokio::sync::Mutex<()>,
    subject: Weak<SubjectCore<T>>,
}

impl<T> Consumer<T> {
    fn slot(&self) -> MutexGuard<'_, Slot<T>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn deliver(&self, notice: Notice<T>) {
        let waiter = {
            let mut slot = self.slot();
            slot.queue.push_back(notice);
            slot.waiter.take()
        };
        if let Some(waiter) = waiter {
            // A dropped receiver means the advance was cancelled; the queue keeps the notice.
            let _ = waiter.send(());
        }
    }

    fn detach(&self) {
        if let Some(core) = self.subject.upgrade() {
            core.detach(self.id);
        }
    }
}

impl<T> Drop for Consumer<T> {
    fn drop(&mut self) {
        self.detach();
    }
}

struct SubjectState<T> {
    consumers: HashMap<u64, Weak<Consumer<T>>>,
    terminal: Option<Terminal>,
    next_id: u64,
    pushed: u64,
}

struct SubjectCore<T> {
    state: Mutex<SubjectState<T>>,
    config: SubjectConfig,
}

impl<T> SubjectCore<T> {
    fn state(&self) -> MutexGuard<'_, SubjectState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn detach(&self, id: u64) {
        let removed = self.state().consumers.remove(&id).is_some();
        if removed {
            log::debug!("{}: consumer {} detached", self.config.label(), id);
        }
    }
}

/// Multicast hot sequence
pub struct Subject<T> {
    core: Arc<SubjectCore<T>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Subject {
            core: Arc::clone(&self.core),
        }
    }
}

impl<T> Default for Subject<T>
where
    T: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Subject<T>
where
    T: Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self::with_config(SubjectConfig::default())
    }

    pub fn with_config(config: SubjectConfig) -> Self {
        Subject {
            core: Arc::new(SubjectCore {
                state: Mutex::new(SubjectState {
                    consumers: HashMap::new(),
                    terminal: None,
                    next_id: 0,
                    pushed: 0,
                }),
                config,
            }),
        }
    }

    /// Attach a new consumer.
    ///
    /// The consumer sees every notice pushed from now on. Attaching to a closed
    /// subject yields a cursor that reports the subject's terminal immediately.
    pub fn attach(&self) -> SubjectCursor<T> {
        let mut state = self.core.state();
        let id = state.next_id;
        state.next_id += 1;

        let consumer = Arc::new(Consumer {
            id,
            slot: Mutex::new(Slot {
                queue: VecDeque::with_capacity(self.core.config.queue_capacity()),
                waiter: None,
                terminal: state.terminal.clone(),
            }),
            turn: tokio::sync::Mutex::new(()),
            subject: Arc::downgrade(&self.core),
        });

        if state.terminal.is_none() {
            state.consumers.insert(id, Arc::downgrade(&consumer));
            log::debug!(
                "{}: consumer {} attached ({} total)",
                self.core.config.label(),
                id,
                state.consumers.len()
            );
        }

        SubjectCursor { consumer }
    }

    /// Enqueue a value for every attached consumer
    pub fn push(&self, value: T) -> SeqResult<()> {
        let mut state = self.open_state("push")?;
        state.pushed += 1;
        let consumers = live_consumers(&mut state);

        log::trace!(
            "{}: push to {} consumers",
            self.core.config.label(),
            consumers.len()
        );
        // Still under the state lock: no terminal can be queued ahead of this value
        for consumer in &consumers {
            consumer.deliver(Notice::Value(value.clone()));
        }
        drop(state);
        Ok(())
    }

    /// Deliver an error to every attached consumer and close the subject
    pub fn raise_error(&self, err: SeqError) -> SeqResult<()> {
        log::debug!("{}: raising error: {}", self.core.config.label(), err);
        self.close(Notice::Error(err), "raise_error")
    }

    /// Deliver completion to every attached consumer and close the subject
    pub fn complete(&self) -> SeqResult<()> {
        log::debug!("{}: completing", self.core.config.label());
        self.close(Notice::Complete, "complete")
    }

    fn close(&self, notice: Notice<T>, op: &str) -> SeqResult<()> {
        let mut state = self.open_state(op)?;
        state.terminal = notice.terminal();
        let consumers = live_consumers(&mut state);
        state.consumers.clear();

        for consumer in &consumers {
            consumer.deliver(notice.clone());
        }
        drop(state);
        Ok(())
    }

    fn open_state(&self, op: &str) -> SeqResult<MutexGuard<'_, SubjectState<T>>> {
        let state = self.core.state();
        if state.terminal.is_some() {
            log::warn!(
                "{}: {} rejected, subject is disposed",
                self.core.config.label(),
                op
            );
            return Err(SeqError::Disposed);
        }
        Ok(state)
    }
}

impl<T> Subject<T> {
    pub fn is_closed(&self) -> bool {
        self.core.state().terminal.is_some()
    }

    /// Number of consumers currently attached
    pub fn consumer_count(&self) -> usize {
        self.core
            .state()
            .consumers
            .values()
            .filter(|c| c.strong_count() > 0)
            .count()
    }

    /// Get subject statistics for monitoring
    pub fn stats(&self) -> SubjectStats {
        let state = self.core.state();
        SubjectStats {
            name: self.core.config.name.clone(),
            consumers: state
                .consumers
                .values()
                .filter(|c| c.strong_count() > 0)
                .count(),
            pushed: state.pushed,
            is_closed: state.terminal.is_some(),
        }
    }

    pub fn config(&self) -> &SubjectConfig {
        &self.core.config
    }
}

/// Upgrade the live consumers and prune dropped ones.
///
/// Lock order is state, then slot. The returned handles must be released only
/// after the state lock, since dropping the last one detaches.
fn live_consumers<T>(state: &mut SubjectState<T>) -> Vec<Arc<Consumer<T>>> {
    state.consumers.retain(|_, c| c.strong_count() > 0);
    state.consumers.values().filter_map(Weak::upgrade).collect()
}

impl<T> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        f.debug_struct("Subject")
            .field("name", &self.core.config.label())
            .field("consumers", &stats.consumers)
            .field("pushed", &stats.pushed)
            .field("is_closed", &stats.is_closed)
            .finish()
    }
}

/// One consumer's cursor over a [`Subject`].
///
/// Clones share the same queue. `advance` may be called concurrently; calls are
/// serialized and settle in the order they were made.
pub struct SubjectCursor<T> {
    consumer: Arc<Consumer<T>>,
}

impl<T> Clone for SubjectCursor<T> {
    fn clone(&self) -> Self {
        SubjectCursor {
            consumer: Arc::clone(&self.consumer),
        }
    }
}

impl<T> SubjectCursor<T>
where
    T: Send + 'static,
{
    /// Pull the next notice, suspending while the queue is empty
    pub async fn advance(&self) -> Advance<T> {
        let _turn = self.consumer.turn.lock().await;

        loop {
            let wakeup = {
                let mut slot = self.consumer.slot();
                match slot.queue.pop_front() {
                    Some(Notice::Value(item)) => return Ok(Step::Yield(item)),
                    Some(notice) => {
                        let terminal = notice.terminal();
                        slot.terminal = terminal.clone();
                        drop(slot);
                        self.consumer.detach();
                        return match terminal {
                            Some(terminal) => terminal.report(),
                            None => Err(SeqError::Exhausted),
                        };
                    }
                    None => {}
                }
                if let Some(terminal) = &slot.terminal {
                    return terminal.report();
                }

                let (tx, rx) = oneshot::channel();
                slot.waiter = Some(tx);
                rx
            };

            // Cancellation only happens if the slot drops the sender; the queue is
            // re-checked either way.
            let _ = wakeup.await;
        }
    }

    /// Number of notices buffered and not yet pulled
    pub fn buffered(&self) -> usize {
        self.consumer.slot().queue.len()
    }
}

impl<T> fmt::Debug for SubjectCursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubjectCursor")
            .field("id", &self.consumer.id)
            .finish()
    }
}

impl<T> From<SubjectCursor<T>> for Cursor<T>
where
    T: Send + 'static,
{
    fn from(cursor: SubjectCursor<T>) -> Self {
        Cursor::new(stream! {
            loop {
                match cursor.advance().await {
                    Ok(Step::Yield(item)) => yield Ok(Step::Yield(item)),
                    terminal => {
                        yield terminal;
                        break;
                    }
                }
            }
        })
    }
}

impl<T> IntoSource for Subject<T>
where
    T: Clone + Send + 'static,
{
    type Item = T;
    type Return = ();

    /// Every cursor requested from the source attaches a new consumer
    fn into_source(self) -> Source<T> {
        Source::shared(move || Cursor::from(self.attach()))
    }
}

impl<T> IntoSource for SubjectCursor<T>
where
    T: Send + 'static,
{
    type Item = T;
    type Return = ();

    fn into_source(self) -> Source<T> {
        Source::single(Cursor::from(self))
    }
}

/// Subject statistics for monitoring and debugging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectStats {
    pub name: Option<String>,
    pub consumers: usize,
    pub pushed: u64,
    pub is_closed: bool,
}

impl fmt::Display for SubjectStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Subject({}, {} consumers, {} pushed{})",
            self.name.as_deref().unwrap_or("subject"),
            self.consumers,
            self.pushed,
            if self.is_closed { ", closed" } else { "" }
        )
    }
}
