//! Terminal operations: consume a sequence into a single eventual result.
//!
//! The upstream cursor is requested when the operation is called; pulling starts
//! when the returned future is first polled.

use std::future::Future;

use crate::error::SeqResult;
use crate::source::IntoSource;

/// Fold operation that accumulates a value over a sequence.
///
/// Returns `init` unchanged for an empty sequence.
///
/// # Examples
/// ```
/// use rs2_seq::*;
///
/// # async fn example() {
/// assert_eq!(fold(0, |sum, x| sum + x, vec![1, 2, 3]).await, Ok(6));
/// assert_eq!(fold(0, |sum, x: i32| sum + x, Vec::new()).await, Ok(0));
/// # }
/// ```
pub fn fold<S, A, F>(init: A, mut f: F, src: S) -> impl Future<Output = SeqResult<A>>
where
    S: IntoSource,
    F: FnMut(A, S::Item) -> A + Send + 'static,
    A: Send + 'static,
{
    let mut upstream = src.into_cursor();
    async move {
        let mut acc = init;
        while let Some(item) = upstream.pull().await? {
            acc = f(acc, item);
        }
        Ok(acc)
    }
}

/// Fold with an async combiner
pub fn fold_async<S, A, F, Fut>(init: A, mut f: F, src: S) -> impl Future<Output = SeqResult<A>>
where
    S: IntoSource,
    F: FnMut(A, S::Item) -> Fut + Send + 'static,
    Fut: Future<Output = A> + Send + 'static,
    A: Send + 'static,
{
    let mut upstream = src.into_cursor();
    async move {
        let mut acc = init;
        while let Some(item) = upstream.pull().await? {
            acc = f(acc, item).await;
        }
        Ok(acc)
    }
}

/// `true` if every element matches; stops at the first mismatch
pub fn all<S, F>(mut predicate: F, src: S) -> impl Future<Output = SeqResult<bool>>
where
    S: IntoSource,
    F: FnMut(&S::Item) -> bool + Send + 'static,
{
    let mut upstream = src.into_cursor();
    async move {
        while let Some(item) = upstream.pull().await? {
            if !predicate(&item) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// `true` if some element matches; stops at the first match
pub fn any<S, F>(mut predicate: F, src: S) -> impl Future<Output = SeqResult<bool>>
where
    S: IntoSource,
    F: FnMut(&S::Item) -> bool + Send + 'static,
{
    let mut upstream = src.into_cursor();
    async move {
        while let Some(item) = upstream.pull().await? {
            if predicate(&item) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// The first matching element, or `None`; stops pulling once found
pub fn find<S, F>(mut predicate: F, src: S) -> impl Future<Output = SeqResult<Option<S::Item>>>
where
    S: IntoSource,
    F: FnMut(&S::Item) -> bool + Send + 'static,
{
    let mut upstream = src.into_cursor();
    async move {
        while let Some(item) = upstream.pull().await? {
            if predicate(&item) {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }
}

/// The first element, or `None` for an empty sequence
pub fn first<S>(src: S) -> impl Future<Output = SeqResult<Option<S::Item>>>
where
    S: IntoSource,
{
    let mut upstream = src.into_cursor();
    async move { upstream.pull().await }
}

/// The last element, or `None` for an empty sequence. Consumes the whole sequence.
pub fn last<S>(src: S) -> impl Future<Output = SeqResult<Option<S::Item>>>
where
    S: IntoSource,
{
    let mut upstream = src.into_cursor();
    async move {
        let mut last = None;
        while let Some(item) = upstream.pull().await? {
            last = Some(item);
        }
        Ok(last)
    }
}

/// Split into (matching, not matching), keeping relative order within each group
pub fn partition<S, F>(
    mut predicate: F,
    src: S,
) -> impl Future<Output = SeqResult<(Vec<S::Item>, Vec<S::Item>)>>
where
    S: IntoSource,
    F: FnMut(&S::Item) -> bool + Send + 'static,
{
    let mut upstream = src.into_cursor();
    async move {
        let mut matched = Vec::new();
        let mut rest = Vec::new();
        while let Some(item) = upstream.pull().await? {
            if predicate(&item) {
                matched.push(item);
            } else {
                rest.push(item);
            }
        }
        Ok((matched, rest))
    }
}

/// Count the elements
pub fn count<S>(src: S) -> impl Future<Output = SeqResult<usize>>
where
    S: IntoSource,
{
    fold(0, |n, _| n + 1, src)
}

/// Run an async action for every element, in order
pub fn for_each<S, F, Fut>(mut f: F, src: S) -> impl Future<Output = SeqResult<()>>
where
    S: IntoSource,
    F: FnMut(S::Item) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let mut upstream = src.into_cursor();
    async move {
        while let Some(item) = upstream.pull().await? {
            f(item).await;
        }
        Ok(())
    }
}

/// Materialize a sequence into a `Vec`
pub fn to_vec<S>(src: S) -> impl Future<Output = SeqResult<Vec<S::Item>>>
where
    S: IntoSource,
{
    let mut upstream = src.into_cursor();
    async move {
        let mut items = Vec::new();
        while let Some(item) = upstream.pull().await? {
            items.push(item);
        }
        Ok(items)
    }
}
