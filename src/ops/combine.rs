//! Slicing and multi-sequence combinators

use async_stream::stream;
use futures_util::{future, pin_mut};
use serde::{Deserialize, Serialize};

use crate::cursor::{Cursor, Step};
use crate::source::{empty, IntoSource};

/// Which side of a [`zip`] ran out first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZipEnd {
    Left,
    Right,
}

/// How a [`take_until`] cursor ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UntilEnd<N, NR = ()> {
    /// The notifier produced its first step (a value or its own terminal) first
    Notified(Step<N, NR>),
    /// The source ended before the notifier produced anything
    SourceEnded,
}

/// Pair up elements of two sequences, advancing both in lockstep.
///
/// Pairing stops as soon as either side ends; the return value names that side.
/// When both end on the same advance, `Left` is reported.
pub fn zip<A, B>(left: A, right: B) -> Cursor<(A::Item, B::Item), ZipEnd>
where
    A: IntoSource,
    B: IntoSource,
{
    let mut left = left.into_cursor();
    let mut right = right.into_cursor();
    Cursor::new(stream! {
        loop {
            match future::join(left.advance(), right.advance()).await {
                (Err(err), _) | (_, Err(err)) => {
                    yield Err(err);
                    return;
                }
                (Ok(Step::Done(_)), _) => {
                    yield Ok(Step::Done(ZipEnd::Left));
                    return;
                }
                (_, Ok(Step::Done(_))) => {
                    yield Ok(Step::Done(ZipEnd::Right));
                    return;
                }
                (Ok(Step::Yield(a)), Ok(Step::Yield(b))) => yield Ok(Step::Yield((a, b))),
            }
        }
    })
}

/// Yield at most `n` leading elements.
///
/// With `n == 0` the source is dropped without being pulled.
pub fn take<S>(n: usize, src: S) -> Cursor<S::Item>
where
    S: IntoSource,
{
    if n == 0 {
        return empty();
    }

    let mut upstream = src.into_cursor();
    Cursor::new(stream! {
        let mut remaining = n;
        while remaining > 0 {
            match upstream.pull().await {
                Ok(Some(item)) => {
                    remaining -= 1;
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

/// Drop the first `n` elements
pub fn skip<S>(n: usize, src: S) -> Cursor<S::Item>
where
    S: IntoSource,
{
    let mut upstream = src.into_cursor();
    Cursor::new(stream! {
        let mut remaining = n;
        loop {
            match upstream.pull().await {
                Ok(Some(_)) if remaining > 0 => remaining -= 1,
                Ok(Some(item)) => yield Ok(Step::Yield(item)),
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

/// Yield elements of `src` until `notifier` produces its first step.
///
/// The notifier is advanced once, concurrently with the source. On every advance
/// the notifier is checked first, so a notification that is ready at the same
/// time as the next element wins and that element is not yielded.
pub fn take_until<N, S>(notifier: N, src: S) -> Cursor<S::Item, UntilEnd<N::Item, N::Return>>
where
    N: IntoSource,
    S: IntoSource,
{
    let mut signal = notifier.into_cursor();
    let mut upstream = src.into_cursor();
    Cursor::new(stream! {
        let notified = async move { signal.advance().await };
        pin_mut!(notified);

        loop {
            tokio::select! {
                biased;
                outcome = &mut notified => {
                    match outcome {
                        Ok(step) => yield Ok(Step::Done(UntilEnd::Notified(step))),
                        Err(err) => yield Err(err),
                    }
                    return;
                },

                next = upstream.pull() => {
                    match next {
                        Ok(Some(item)) => yield Ok(Step::Yield(item)),
                        Ok(None) => {
                            yield Ok(Step::Done(UntilEnd::SourceEnded));
                            return;
                        }
                        Err(err) => {
                            yield Err(err);
                            return;
                        }
                    }
                },
            }
        }
    })
}
