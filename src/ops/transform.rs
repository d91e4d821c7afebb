//! Element-wise transformation operators.
//!
//! Each operator requests its upstream cursor when it is called and returns a
//! new [`Cursor`] that pulls from upstream lazily. Upstream errors and callback
//! failures are delivered on the next advance and end the cursor.

use async_stream::stream;
use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::cursor::{Cursor, Step};
use crate::error::SeqResult;
use crate::source::IntoSource;

/// An element paired with its position, as produced by [`enumerate`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indexed<T> {
    pub index: usize,
    pub item: T,
}

/// Map each element with a function
///
/// # Examples
/// ```
/// use rs2_seq::*;
///
/// # async fn example() {
/// let doubled = map(|x: i32| x * 2, vec![1, 2, 3]);
/// assert_eq!(to_vec(doubled).await, Ok(vec![2, 4, 6]));
/// # }
/// ```
pub fn map<S, U, F>(mut f: F, src: S) -> Cursor<U>
where
    S: IntoSource,
    F: FnMut(S::Item) -> U + Send + 'static,
    U: Send + 'static,
{
    let mut upstream = src.into_cursor();
    Cursor::new(stream! {
        loop {
            match upstream.pull().await {
                Ok(Some(item)) => yield Ok(Step::Yield(f(item))),
                Ok(None) => break,
                Err(err) => {
                    yield Err(err);
                    return;
                }
            }
        }
        yield Ok(Step::Done(()));
    })
}

/// Map each element with an async function; its result is awaited before yielding
pub fn map_async<S, U, F, Fut>(mut f: F, src: S) -> Cursor<U>
where
    S: IntoSource,
    F: FnMut(S::Item) -> Fut + Send + 'static,
    Fut: Future<Output = U> + Send + 'static,
    U: Send + 'static,
{
    let mut upstream = src.into_cursor();
    Cursor::new(stream! {
        loop {
            match upstream.pull().await {
                Ok(Some(item)) => yield Ok(Step::Yield(f(item).await)),
                Ok(None) => break,
                Err(err) => {
                    yield Err(err);
                    return;
                }
            }
        }
        yield Ok(Step::Done(()));
    })
}

/// Map each element with a fallible function. The first failure is delivered to
/// the consumer and ends the cursor.
pub fn try_map<S, U, F>(mut f: F, src: S) -> Cursor<U>
where
    S: IntoSource,
    F: FnMut(S::Item) -> SeqResult<U> + Send + 'static,
    U: Send + 'static,
{
    let mut upstream = src.into_cursor();
    Cursor::new(stream! {
        loop {
            match upstream.pull().await.and_then(|item| item.map(&mut f).transpose()) {
                Ok(Some(mapped)) => yield Ok(Step::Yield(mapped)),
                Ok(None) => break,
                Err(err) => {
                    yield Err(err);
                    return;
                }
            }
        }
        yield Ok(Step::Done(()));
    })
}

/// Map and drop in one pass: elements for which `f` returns `None` are skipped
pub fn filter_map<S, U, F>(mut f: F, src: S) -> Cursor<U>
where
    S: IntoSource,
    F: FnMut(S::Item) -> Option<U> + Send + 'static,
    U: Send + 'static,
{
    let mut upstream = src.into_cursor();
    Cursor::new(stream! {
        loop {
            match upstream.pull().await {
                Ok(Some(item)) => {
                    if let Some(mapped) = f(item) {
                        yield Ok(Step::Yield(mapped));
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    yield Err(err);
                    return;
                }
            }
        }
        yield Ok(Step::Done(()));
    })
}

/// Async variant of [`filter_map`]
pub fn filter_map_async<S, U, F, Fut>(mut f: F, src: S) -> Cursor<U>
where
    S: IntoSource,
    F: FnMut(S::Item) -> Fut + Send + 'static,
    Fut: Future<Output = Option<U>> + Send + 'static,
    U: Send + 'static,
{
    let mut upstream = src.into_cursor();
    Cursor::new(stream! {
        loop {
            match upstream.pull().await {
                Ok(Some(item)) => {
                    if let Some(mapped) = f(item).await {
                        yield Ok(Step::Yield(mapped));
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    yield Err(err);
                    return;
                }
            }
        }
        yield Ok(Step::Done(()));
    })
}

/// Map each element to a nested sequence and yield all of its items before
/// moving on to the next element
pub fn flat_map<S, I, F>(mut f: F, src: S) -> Cursor<I::Item>
where
    S: IntoSource,
    I: IntoSource,
    F: FnMut(S::Item) -> I + Send + 'static,
{
    let mut upstream = src.into_cursor();
    Cursor::new(stream! {
        loop {
            let mut inner = match upstream.pull().await {
                Ok(Some(item)) => f(item).into_cursor(),
                Ok(None) => break,
                Err(err) => {
                    yield Err(err);
                    return;
                }
            };
            loop {
                match inner.pull().await {
                    Ok(Some(item)) => yield Ok(Step::Yield(item)),
                    Ok(None) => break,
                    Err(err) => {
                        yield Err(err);
                        return;
                    }
                }
            }
        }
        yield Ok(Step::Done(()));
    })
}

/// Concatenate nested sequences in outer order
pub fn flatten<S>(src: S) -> Cursor<<S::Item as IntoSource>::Item>
where
    S: IntoSource,
    S::Item: IntoSource,
{
    flat_map(|inner| inner, src)
}

/// Keep the elements matching a predicate
pub fn filter<S, F>(mut predicate: F, src: S) -> Cursor<S::Item>
where
    S: IntoSource,
    F: FnMut(&S::Item) -> bool + Send + 'static,
{
    let mut upstream = src.into_cursor();
    Cursor::new(stream! {
        loop {
            match upstream.pull().await {
                Ok(Some(item)) => {
                    if predicate(&item) {
                        yield Ok(Step::Yield(item));
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    yield Err(err);
                    return;
                }
            }
        }
        yield Ok(Step::Done(()));
    })
}

/// Keep the elements matching an async predicate
pub fn filter_async<S, F, Fut>(mut predicate: F, src: S) -> Cursor<S::Item>
where
    S: IntoSource,
    F: FnMut(&S::Item) -> Fut + Send + 'static,
    Fut: Future<Output = bool> + Send + 'static,
{
    let mut upstream = src.into_cursor();
    Cursor::new(stream! {
        loop {
            match upstream.pull().await {
                Ok(Some(item)) => {
                    if predicate(&item).await {
                        yield Ok(Step::Yield(item));
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    yield Err(err);
                    return;
                }
            }
        }
        yield Ok(Step::Done(()));
    })
}

/// Like `fold`, but yields every intermediate accumulator.
///
/// The cursor's return value is the final accumulator, which is `init` for an
/// empty input.
///
/// # Examples
/// ```
/// use rs2_seq::*;
///
/// # async fn example() {
/// let mut sums = scan(0, |acc, x| acc + x, vec![1, 2, 3]);
/// assert_eq!(sums.advance().await, Ok(Step::Yield(1)));
/// assert_eq!(sums.advance().await, Ok(Step::Yield(3)));
/// assert_eq!(sums.advance().await, Ok(Step::Yield(6)));
/// assert_eq!(sums.advance().await, Ok(Step::Done(6)));
/// # }
/// ```
pub fn scan<S, A, F>(init: A, mut f: F, src: S) -> Cursor<A, A>
where
    S: IntoSource,
    F: FnMut(A, S::Item) -> A + Send + 'static,
    A: Clone + Send + 'static,
{
    let mut upstream = src.into_cursor();
    Cursor::new(stream! {
        let mut acc = init;
        loop {
            match upstream.pull().await {
                Ok(Some(item)) => {
                    acc = f(acc, item);
                    yield Ok(Step::Yield(acc.clone()));
                }
                Ok(None) => break,
                Err(err) => {
                    yield Err(err);
                    return;
                }
            }
        }
        yield Ok(Step::Done(acc));
    })
}

/// Pair every element with its index, counting from zero
pub fn enumerate<S>(src: S) -> Cursor<Indexed<S::Item>>
where
    S: IntoSource,
{
    let mut index = 0;
    map(
        move |item| {
            let indexed = Indexed { index, item };
            index += 1;
            indexed
        },
        src,
    )
}

/// Drop elements while the predicate holds, then yield the rest
pub fn skip_while<S, F>(mut predicate: F, src: S) -> Cursor<S::Item>
where
    S: IntoSource,
    F: FnMut(&S::Item) -> bool + Send + 'static,
{
    let mut upstream = src.into_cursor();
    Cursor::new(stream! {
        let mut skipping = true;
        loop {
            match upstream.pull().await {
                Ok(Some(item)) => {
                    if skipping && predicate(&item) {
                        continue;
                    }
                    skipping = false;
                    yield Ok(Step::Yield(item));
                }
                Ok(None) => break,
                Err(err) => {
                    yield Err(err);
                    return;
                }
            }
        }
        yield Ok(Step::Done(()));
    })
}

/// Yield elements while the predicate holds; the first failing element ends the
/// cursor and is not yielded
pub fn take_while<S, F>(mut predicate: F, src: S) -> Cursor<S::Item>
where
    S: IntoSource,
    F: FnMut(&S::Item) -> bool + Send + 'static,
{
    let mut upstream = src.into_cursor();
    Cursor::new(stream! {
        loop {
            match upstream.pull().await {
                Ok(Some(item)) if predicate(&item) => yield Ok(Step::Yield(item)),
                Ok(_) => break,
                Err(err) => {
                    yield Err(err);
                    return;
                }
            }
        }
        yield Ok(Step::Done(()));
    })
}
