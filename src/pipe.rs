//! Partial application of operators.
//!
//! A [`Pipe`] is an operator with its leading arguments already bound: a
//! function from a cursor to a new cursor (or to an eventual result). The
//! functions in this module mirror the operators in [`ops`](crate::ops) minus
//! their final source argument.
//!
//! [`collect_by`] and [`collect_record_by`] also accept a trailing options value.
//! Their [`CollectBy::apply`] decides by the type of its argument whether it was
//! given the sequence (full call) or the options (partial call).

use futures_util::FutureExt;
use std::collections::{BTreeMap, HashMap};
use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use crate::cursor::Cursor;
use crate::error::SeqResult;
use crate::ops::{self, CollectOptions, Eventual, Indexed, Keyed, UntilEnd, ZipEnd};
use crate::source::IntoSource;

/// A reusable operator from `I` to `O`
pub struct Pipe<I, O> {
    f: Arc<dyn Fn(I) -> O + Send + Sync + 'static>,
}

impl<I, O> Clone for Pipe<I, O> {
    fn clone(&self) -> Self {
        Pipe {
            f: Arc::clone(&self.f),
        }
    }
}

impl<I, O> Pipe<I, O> {
    /// Create a new pipe from a function
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(I) -> O + Send + Sync + 'static,
    {
        Pipe { f: Arc::new(f) }
    }

    /// Apply this pipe to its input
    pub fn apply(&self, input: I) -> O {
        (self.f)(input)
    }
}

impl<T, R, O> Pipe<Cursor<T, R>, O>
where
    T: Send + 'static,
    R: Send + 'static,
{
    /// Apply this pipe to anything with sequence capability
    pub fn run<S>(&self, src: S) -> O
    where
        S: IntoSource<Item = T, Return = R>,
    {
        self.apply(src.into_cursor())
    }
}

/// Bind the first argument of a two-argument operator
///
/// # Examples
/// ```
/// use rs2_seq::*;
/// use rs2_seq::pipe::{partial, Pipe};
///
/// # async fn example() {
/// let first_two: Pipe<Cursor<i32>, Cursor<i32>> = partial(2, |n, src: Cursor<i32>| take(n, src));
/// assert_eq!(to_vec(first_two.run(vec![1, 2, 3])).await, Ok(vec![1, 2]));
/// assert_eq!(to_vec(first_two.run(vec![7])).await, Ok(vec![7]));
/// # }
/// ```
pub fn partial<A, B, O, F>(arg: A, op: F) -> Pipe<B, O>
where
    A: Clone + Send + Sync + 'static,
    F: Fn(A, B) -> O + Send + Sync + 'static,
{
    Pipe::new(move |input| op(arg.clone(), input))
}

/// Compose two pipes together
pub fn compose<I, M, O>(p1: Pipe<I, M>, p2: Pipe<M, O>) -> Pipe<I, O>
where
    I: 'static,
    M: 'static,
    O: 'static,
{
    Pipe::new(move |input| p2.apply(p1.apply(input)))
}

/// Identity pipe that hands its input through unchanged
pub fn identity<I>() -> Pipe<I, I>
where
    I: 'static,
{
    Pipe::new(|input| input)
}

/// Extension trait for pipes
pub trait PipeExt<I, M> {
    /// Compose this pipe with another pipe
    fn compose<O>(self, other: Pipe<M, O>) -> Pipe<I, O>
    where
        O: 'static;
}

impl<I, M> PipeExt<I, M> for Pipe<I, M>
where
    I: 'static,
    M: 'static,
{
    fn compose<O>(self, other: Pipe<M, O>) -> Pipe<I, O>
    where
        O: 'static,
    {
        compose(self, other)
    }
}

// ================================
// Transformations
// ================================

pub fn map<T, R, U, F>(f: F) -> Pipe<Cursor<T, R>, Cursor<U>>
where
    T: Send + 'static,
    R: Send + 'static,
    U: Send + 'static,
    F: FnMut(T) -> U + Clone + Send + Sync + 'static,
{
    partial(f, |f: F, src: Cursor<T, R>| ops::map(f, src))
}

pub fn map_async<T, R, U, F, Fut>(f: F) -> Pipe<Cursor<T, R>, Cursor<U>>
where
    T: Send + 'static,
    R: Send + 'static,
    U: Send + 'static,
    F: FnMut(T) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = U> + Send + 'static,
{
    partial(f, |f: F, src: Cursor<T, R>| ops::map_async(f, src))
}

pub fn try_map<T, R, U, F>(f: F) -> Pipe<Cursor<T, R>, Cursor<U>>
where
    T: Send + 'static,
    R: Send + 'static,
    U: Send + 'static,
    F: FnMut(T) -> SeqResult<U> + Clone + Send + Sync + 'static,
{
    partial(f, |f: F, src: Cursor<T, R>| ops::try_map(f, src))
}

pub fn filter_map<T, R, U, F>(f: F) -> Pipe<Cursor<T, R>, Cursor<U>>
where
    T: Send + 'static,
    R: Send + 'static,
    U: Send + 'static,
    F: FnMut(T) -> Option<U> + Clone + Send + Sync + 'static,
{
    partial(f, |f: F, src: Cursor<T, R>| ops::filter_map(f, src))
}

pub fn filter_map_async<T, R, U, F, Fut>(f: F) -> Pipe<Cursor<T, R>, Cursor<U>>
where
    T: Send + 'static,
    R: Send + 'static,
    U: Send + 'static,
    F: FnMut(T) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Option<U>> + Send + 'static,
{
    partial(f, |f: F, src: Cursor<T, R>| ops::filter_map_async(f, src))
}

pub fn flat_map<T, R, I, F>(f: F) -> Pipe<Cursor<T, R>, Cursor<I::Item>>
where
    T: Send + 'static,
    R: Send + 'static,
    I: IntoSource,
    F: FnMut(T) -> I + Clone + Send + Sync + 'static,
{
    partial(f, |f: F, src: Cursor<T, R>| ops::flat_map(f, src))
}

pub fn flatten<T, R>() -> Pipe<Cursor<T, R>, Cursor<T::Item>>
where
    T: IntoSource + Send + 'static,
    R: Send + 'static,
{
    Pipe::new(ops::flatten)
}

pub fn filter<T, R, F>(predicate: F) -> Pipe<Cursor<T, R>, Cursor<T>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnMut(&T) -> bool + Clone + Send + Sync + 'static,
{
    partial(predicate, |p: F, src: Cursor<T, R>| ops::filter(p, src))
}

pub fn filter_async<T, R, F, Fut>(predicate: F) -> Pipe<Cursor<T, R>, Cursor<T>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnMut(&T) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = bool> + Send + 'static,
{
    partial(predicate, |p: F, src: Cursor<T, R>| ops::filter_async(p, src))
}

pub fn scan<T, R, A, F>(init: A, f: F) -> Pipe<Cursor<T, R>, Cursor<A, A>>
where
    T: Send + 'static,
    R: Send + 'static,
    A: Clone + Send + Sync + 'static,
    F: FnMut(A, T) -> A + Clone + Send + Sync + 'static,
{
    partial((init, f), |(init, f): (A, F), src: Cursor<T, R>| {
        ops::scan(init, f, src)
    })
}

pub fn enumerate<T, R>() -> Pipe<Cursor<T, R>, Cursor<Indexed<T>>>
where
    T: Send + 'static,
    R: Send + 'static,
{
    Pipe::new(ops::enumerate)
}

pub fn skip_while<T, R, F>(predicate: F) -> Pipe<Cursor<T, R>, Cursor<T>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnMut(&T) -> bool + Clone + Send + Sync + 'static,
{
    partial(predicate, |p: F, src: Cursor<T, R>| ops::skip_while(p, src))
}

pub fn take_while<T, R, F>(predicate: F) -> Pipe<Cursor<T, R>, Cursor<T>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnMut(&T) -> bool + Clone + Send + Sync + 'static,
{
    partial(predicate, |p: F, src: Cursor<T, R>| ops::take_while(p, src))
}

// ================================
// Slicing, combining, rate
// ================================

pub fn take<T, R>(n: usize) -> Pipe<Cursor<T, R>, Cursor<T>>
where
    T: Send + 'static,
    R: Send + 'static,
{
    partial(n, |n, src: Cursor<T, R>| ops::take(n, src))
}

pub fn skip<T, R>(n: usize) -> Pipe<Cursor<T, R>, Cursor<T>>
where
    T: Send + 'static,
    R: Send + 'static,
{
    partial(n, |n, src: Cursor<T, R>| ops::skip(n, src))
}

/// Bind the left side of a zip. Each application requests a fresh cursor from a
/// clone of `left`, so `left` should be a restartable source such as a `Vec` or a
/// `Subject`.
pub fn zip<A, T, R>(left: A) -> Pipe<Cursor<T, R>, Cursor<(A::Item, T), ZipEnd>>
where
    A: IntoSource + Clone + Send + Sync + 'static,
    T: Send + 'static,
    R: Send + 'static,
{
    partial(left, |left: A, right: Cursor<T, R>| ops::zip(left, right))
}

/// Bind the notifier of a take_until; see [`zip`] for the restartability caveat
pub fn take_until<N, T, R>(
    notifier: N,
) -> Pipe<Cursor<T, R>, Cursor<T, UntilEnd<N::Item, N::Return>>>
where
    N: IntoSource + Clone + Send + Sync + 'static,
    T: Send + 'static,
    R: Send + 'static,
{
    partial(notifier, |notifier: N, src: Cursor<T, R>| {
        ops::take_until(notifier, src)
    })
}

pub fn throttle<T, R>(duration: Duration) -> Pipe<Cursor<T, R>, Cursor<T>>
where
    T: Send + 'static,
    R: Send + 'static,
{
    partial(duration, |d, src: Cursor<T, R>| ops::throttle(d, src))
}

// ================================
// Terminal operations
// ================================

pub fn fold<T, R, A, F>(init: A, f: F) -> Pipe<Cursor<T, R>, Eventual<A>>
where
    T: Send + 'static,
    R: Send + 'static,
    A: Clone + Send + Sync + 'static,
    F: FnMut(A, T) -> A + Clone + Send + Sync + 'static,
{
    partial((init, f), |(init, f): (A, F), src: Cursor<T, R>| {
        ops::fold(init, f, src).boxed()
    })
}

pub fn fold_async<T, R, A, F, Fut>(init: A, f: F) -> Pipe<Cursor<T, R>, Eventual<A>>
where
    T: Send + 'static,
    R: Send + 'static,
    A: Clone + Send + Sync + 'static,
    F: FnMut(A, T) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = A> + Send + 'static,
{
    partial((init, f), |(init, f): (A, F), src: Cursor<T, R>| {
        ops::fold_async(init, f, src).boxed()
    })
}

pub fn all<T, R, F>(predicate: F) -> Pipe<Cursor<T, R>, Eventual<bool>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnMut(&T) -> bool + Clone + Send + Sync + 'static,
{
    partial(predicate, |p: F, src: Cursor<T, R>| ops::all(p, src).boxed())
}

pub fn any<T, R, F>(predicate: F) -> Pipe<Cursor<T, R>, Eventual<bool>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnMut(&T) -> bool + Clone + Send + Sync + 'static,
{
    partial(predicate, |p: F, src: Cursor<T, R>| ops::any(p, src).boxed())
}

pub fn find<T, R, F>(predicate: F) -> Pipe<Cursor<T, R>, Eventual<Option<T>>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnMut(&T) -> bool + Clone + Send + Sync + 'static,
{
    partial(predicate, |p: F, src: Cursor<T, R>| ops::find(p, src).boxed())
}

pub fn partition<T, R, F>(predicate: F) -> Pipe<Cursor<T, R>, Eventual<(Vec<T>, Vec<T>)>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnMut(&T) -> bool + Clone + Send + Sync + 'static,
{
    partial(predicate, |p: F, src: Cursor<T, R>| {
        ops::partition(p, src).boxed()
    })
}

pub fn first<T, R>() -> Pipe<Cursor<T, R>, Eventual<Option<T>>>
where
    T: Send + 'static,
    R: Send + 'static,
{
    Pipe::new(|src: Cursor<T, R>| ops::first(src).boxed())
}

pub fn last<T, R>() -> Pipe<Cursor<T, R>, Eventual<Option<T>>>
where
    T: Send + 'static,
    R: Send + 'static,
{
    Pipe::new(|src: Cursor<T, R>| ops::last(src).boxed())
}

pub fn count<T, R>() -> Pipe<Cursor<T, R>, Eventual<usize>>
where
    T: Send + 'static,
    R: Send + 'static,
{
    Pipe::new(|src: Cursor<T, R>| ops::count(src).boxed())
}

pub fn for_each<T, R, F, Fut>(f: F) -> Pipe<Cursor<T, R>, Eventual<()>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: FnMut(T) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    partial(f, |f: F, src: Cursor<T, R>| ops::for_each(f, src).boxed())
}

pub fn to_vec<T, R>() -> Pipe<Cursor<T, R>, Eventual<Vec<T>>>
where
    T: Send + 'static,
    R: Send + 'static,
{
    Pipe::new(|src: Cursor<T, R>| ops::to_vec(src).boxed())
}

// ================================
// Collect with trailing options
// ================================

/// `collect` with only its key function bound
pub struct CollectBy<F, C> {
    f: F,
    _target: PhantomData<fn() -> C>,
}

/// Start a `collect` into a `HashMap`
///
/// # Examples
/// ```
/// use rs2_seq::*;
/// use rs2_seq::pipe::collect_by;
///
/// # async fn example() {
/// let parity = |x: i32| (x % 2, 1);
///
/// // Second argument is a sequence: full call.
/// let counts = collect_by(parity).apply(vec![1, 2, 3]).await.unwrap();
/// assert_eq!(counts[&1], 1);
///
/// // Second argument is options: a pipe waiting for the sequence.
/// let summing = collect_by(parity).apply(CollectOptions::new().merge(|a: i32, b: i32, _k: &i32| a + b));
/// let counts = summing.run(vec![1, 2, 3]).await.unwrap();
/// assert_eq!(counts[&1], 2);
/// # }
/// ```
pub fn collect_by<F, K, V>(f: F) -> CollectBy<F, HashMap<K, V>> {
    CollectBy {
        f,
        _target: PhantomData,
    }
}

/// Start a `collect_record` into a string-keyed `BTreeMap`
pub fn collect_record_by<F, V>(f: F) -> CollectBy<F, BTreeMap<String, V>> {
    CollectBy {
        f,
        _target: PhantomData,
    }
}

impl<F, C> CollectBy<F, C>
where
    C: Keyed + Send + 'static,
    C::Key: Send + 'static,
    C::Value: Send + 'static,
{
    /// The `(sequence, options?)` shape
    pub fn call<S>(self, src: S, options: Option<CollectOptions<C::Key, C::Value>>) -> Eventual<C>
    where
        S: IntoSource + 'static,
        F: FnMut(S::Item) -> (C::Key, C::Value) + Send + 'static,
    {
        ops::collect_into::<C, S, F>(self.f, src, options.unwrap_or_default()).boxed()
    }

    /// The two-argument shape. A sequence argument runs the collection; a
    /// [`CollectOptions`] argument returns a [`Pipe`] waiting for the sequence.
    pub fn apply<A, T, R>(self, arg: A) -> A::Output
    where
        A: CollectArg<F, C, T, R>,
    {
        arg.dispatch(self)
    }
}

/// The second positional argument of a [`CollectBy`]: either a sequence or options.
///
/// Implemented for every [`IntoSource`] type and for [`CollectOptions`]. Options
/// never have sequence capability, so they cannot be mistaken for a sequence.
pub trait CollectArg<F, C, T, R> {
    type Output;

    fn dispatch(self, op: CollectBy<F, C>) -> Self::Output;
}

impl<S, F, C> CollectArg<F, C, S::Item, S::Return> for S
where
    S: IntoSource + 'static,
    C: Keyed + Send + 'static,
    C::Key: Send + 'static,
    C::Value: Send + 'static,
    F: FnMut(S::Item) -> (C::Key, C::Value) + Send + 'static,
{
    type Output = Eventual<C>;

    fn dispatch(self, op: CollectBy<F, C>) -> Eventual<C> {
        op.call(self, None)
    }
}

impl<F, C, K, V, T, R> CollectArg<F, C, T, R> for CollectOptions<K, V>
where
    C: Keyed<Key = K, Value = V> + Send + 'static,
    K: Send + 'static,
    V: Send + 'static,
    T: Send + 'static,
    R: Send + 'static,
    F: FnMut(T) -> (K, V) + Clone + Send + Sync + 'static,
{
    type Output = Pipe<Cursor<T, R>, Eventual<C>>;

    fn dispatch(self, op: CollectBy<F, C>) -> Self::Output {
        let f = op.f;
        Pipe::new(move |src: Cursor<T, R>| {
            ops::collect_into::<C, Cursor<T, R>, F>(f.clone(), src, self.clone()).boxed()
        })
    }
}
