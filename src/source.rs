//! Sequence normalization and source constructors.
//!
//! Operators accept anything implementing [`IntoSource`]. Normalizing it gives a
//! [`Source`], which is either shared (every `cursor()` call hands out a fresh,
//! independent cursor) or single (one underlying cursor, handed out once).

use async_stream::stream;
use futures_core::Stream;
use futures_util::pin_mut;
use futures_util::stream::StreamExt;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::cursor::{Cursor, Step};
use crate::error::{SeqError, SeqResult};

type CursorFactory<T, R> = Arc<dyn Fn() -> Cursor<T, R> + Send + Sync + 'static>;

enum SourceKind<T, R> {
    Shared(CursorFactory<T, R>),
    Single(Option<Cursor<T, R>>),
}

/// The normalized, multi-consumer form of a sequence
pub struct Source<T, R = ()> {
    kind: SourceKind<T, R>,
}

impl<T, R> Source<T, R>
where
    T: Send + 'static,
    R: Send + 'static,
{
    /// A source that creates an independent cursor on every request
    pub fn shared<F>(factory: F) -> Self
    where
        F: Fn() -> Cursor<T, R> + Send + Sync + 'static,
    {
        Source {
            kind: SourceKind::Shared(Arc::new(factory)),
        }
    }

    /// Lift a single cursor into a source.
    ///
    /// The first `cursor()` call returns the wrapped cursor. Later calls return an
    /// exhausted cursor; a single cursor cannot be consumed twice.
    pub fn single(cursor: Cursor<T, R>) -> Self {
        Source {
            kind: SourceKind::Single(Some(cursor)),
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self.kind, SourceKind::Shared(_))
    }

    /// Request a cursor
    pub fn cursor(&mut self) -> Cursor<T, R> {
        match &mut self.kind {
            SourceKind::Shared(factory) => factory(),
            SourceKind::Single(slot) => slot.take().unwrap_or_else(Cursor::exhausted),
        }
    }
}

impl<T, R> fmt::Debug for Source<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SourceKind::Shared(_) => f.write_str("Source::Shared"),
            SourceKind::Single(slot) => f
                .debug_struct("Source::Single")
                .field("taken", &slot.is_none())
                .finish(),
        }
    }
}

/// Sequence capability: anything that can be normalized into a [`Source`].
pub trait IntoSource {
    type Item: Send + 'static;
    type Return: Send + 'static;

    fn into_source(self) -> Source<Self::Item, Self::Return>;

    /// Normalize and request the one cursor an operator consumes
    fn into_cursor(self) -> Cursor<Self::Item, Self::Return>
    where
        Self: Sized,
    {
        self.into_source().cursor()
    }
}

impl<T, R> IntoSource for Source<T, R>
where
    T: Send + 'static,
    R: Send + 'static,
{
    type Item = T;
    type Return = R;

    fn into_source(self) -> Source<T, R> {
        self
    }
}

impl<T, R> IntoSource for Cursor<T, R>
where
    T: Send + 'static,
    R: Send + 'static,
{
    type Item = T;
    type Return = R;

    fn into_source(self) -> Source<T, R> {
        Source::single(self)
    }

    fn into_cursor(self) -> Cursor<T, R> {
        self
    }
}

/// Vectors are restartable: each cursor replays the items from the start.
impl<T> IntoSource for Vec<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Item = T;
    type Return = ();

    fn into_source(self) -> Source<T> {
        let items = Arc::new(self);
        Source::shared(move || {
            let items = Arc::clone(&items);
            Cursor::new(stream! {
                for item in items.iter() {
                    yield Ok(Step::Yield(item.clone()));
                }
                yield Ok(Step::Done(()));
            })
        })
    }
}

// ================================
// Cursor Constructors
// ================================

/// Create a cursor that completes immediately
pub fn empty<T>() -> Cursor<T>
where
    T: Send + 'static,
{
    Cursor::new(futures_util::stream::once(async { Ok(Step::Done(())) }))
}

/// Emit a single element
pub fn once<T>(item: T) -> Cursor<T>
where
    T: Send + 'static,
{
    from_iter(std::iter::once(item))
}

/// Create a cursor that fails on its first advance
pub fn fail<T>(err: SeqError) -> Cursor<T>
where
    T: Send + 'static,
{
    Cursor::new(futures_util::stream::once(async move { Err(err) }))
}

/// Create a cursor over an iterator
pub fn from_iter<I>(iter: I) -> Cursor<I::Item>
where
    I: IntoIterator + Send + 'static,
    I::IntoIter: Send,
    I::Item: Send + 'static,
{
    Cursor::new(stream! {
        for item in iter {
            yield Ok(Step::Yield(item));
        }
        yield Ok(Step::Done(()));
    })
}

/// Adapt a `futures` stream
pub fn from_stream<S>(s: S) -> Cursor<S::Item>
where
    S: Stream + Send + 'static,
    S::Item: Send + 'static,
{
    Cursor::new(stream! {
        pin_mut!(s);
        while let Some(item) = s.next().await {
            yield Ok(Step::Yield(item));
        }
        yield Ok(Step::Done(()));
    })
}

/// Adapt a fallible `futures` stream; the first error ends the cursor
pub fn from_try_stream<T, S>(s: S) -> Cursor<T>
where
    S: Stream<Item = SeqResult<T>> + Send + 'static,
    T: Send + 'static,
{
    Cursor::new(stream! {
        pin_mut!(s);
        while let Some(item) = s.next().await {
            match item {
                Ok(item) => yield Ok(Step::Yield(item)),
                Err(err) => {
                    yield Err(err);
                    return;
                }
            }
        }
        yield Ok(Step::Done(()));
    })
}

/// Evaluate a future and yield its output as the only element
pub fn from_future<F>(fut: F) -> Cursor<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    from_try_future(async move { Ok(fut.await) })
}

/// Evaluate a fallible future; an error is delivered on the first advance
pub fn from_try_future<T, F>(fut: F) -> Cursor<T>
where
    F: Future<Output = SeqResult<T>> + Send + 'static,
    T: Send + 'static,
{
    Cursor::new(stream! {
        match fut.await {
            Ok(item) => {
                yield Ok(Step::Yield(item));
                yield Ok(Step::Done(()));
            }
            Err(err) => yield Err(err),
        }
    })
}
