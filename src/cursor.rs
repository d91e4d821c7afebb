//! Cursors: the stateful handle used to pull values out of a sequence.
//!
//! A [`Cursor`] yields a succession of [`Step`]s. `Step::Yield` carries the next
//! value, `Step::Done` ends the succession and carries the cursor's return value
//! (`()` for most operators). Every operator in this crate produces a `Cursor`.

use futures_core::Stream;
use futures_util::stream::{self, BoxStream, StreamExt};
use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::error::{SeqError, SeqResult};

/// One result of advancing a cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step<T, R = ()> {
    /// The next value of the sequence
    Yield(T),
    /// The sequence ended, carrying its return value
    Done(R),
}

impl<T, R> Step<T, R> {
    pub fn is_done(&self) -> bool {
        matches!(self, Step::Done(_))
    }

    /// The yielded value, or `None` for `Done`
    pub fn into_value(self) -> Option<T> {
        match self {
            Step::Yield(item) => Some(item),
            Step::Done(_) => None,
        }
    }

    /// The return value, or `None` for `Yield`
    pub fn into_return(self) -> Option<R> {
        match self {
            Step::Yield(_) => None,
            Step::Done(ret) => Some(ret),
        }
    }

    pub fn map<U, F>(self, f: F) -> Step<U, R>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Step::Yield(item) => Step::Yield(f(item)),
            Step::Done(ret) => Step::Done(ret),
        }
    }
}

/// Result of a single advance
pub type Advance<T, R = ()> = SeqResult<Step<T, R>>;

/// An owned, single-use cursor over a sequence.
///
/// `advance` takes `&mut self`, so at most one advance can be in flight. Once a
/// terminal (`Done` or an error) has been reported, every further advance
/// returns [`SeqError::Exhausted`].
pub struct Cursor<T, R = ()> {
    steps: BoxStream<'static, Advance<T, R>>,
    finished: bool,
}

impl<T, R> Cursor<T, R>
where
    T: Send + 'static,
    R: Send + 'static,
{
    /// Build a cursor from a stream of steps.
    ///
    /// The stream should end with a `Done` step or an error. A stream that simply
    /// runs dry is reported as [`SeqError::Exhausted`].
    pub fn new<S>(steps: S) -> Self
    where
        S: Stream<Item = Advance<T, R>> + Send + 'static,
    {
        Cursor {
            steps: steps.boxed(),
            finished: false,
        }
    }

    /// A cursor that has already reported its terminal
    pub fn exhausted() -> Self {
        Cursor {
            steps: stream::empty().boxed(),
            finished: true,
        }
    }

    /// Pull the next step
    pub async fn advance(&mut self) -> Advance<T, R> {
        if self.finished {
            return Err(SeqError::Exhausted);
        }

        match self.steps.next().await {
            Some(Ok(Step::Yield(item))) => Ok(Step::Yield(item)),
            Some(terminal) => {
                self.finished = true;
                terminal
            }
            None => {
                self.finished = true;
                Err(SeqError::Exhausted)
            }
        }
    }

    /// Pull the next value, discarding the return value on `Done`
    pub async fn pull(&mut self) -> SeqResult<Option<T>> {
        self.advance().await.map(Step::into_value)
    }
}

impl<T, R> Cursor<T, R> {
    /// Whether a terminal has already been reported
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Cursors are also plain `futures` streams of `SeqResult<T>`. The return value
/// carried by `Done` is dropped.
impl<T, R> Stream for Cursor<T, R> {
    type Item = SeqResult<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.finished {
            return Poll::Ready(None);
        }

        match self.steps.poll_next_unpin(cx) {
            Poll::Ready(Some(Ok(Step::Yield(item)))) => Poll::Ready(Some(Ok(item))),
            Poll::Ready(Some(Ok(Step::Done(_)))) | Poll::Ready(None) => {
                self.finished = true;
                Poll::Ready(None)
            }
            Poll::Ready(Some(Err(err))) => {
                self.finished = true;
                Poll::Ready(Some(Err(err)))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T, R> fmt::Debug for Cursor<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("finished", &self.finished)
            .finish()
    }
}
