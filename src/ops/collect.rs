//! Keyed collection of a sequence into a map.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use crate::error::SeqResult;
use crate::source::IntoSource;

/// A key-value container that [`collect_into`] can fill
pub trait Keyed: Default {
    type Key;
    type Value;

    fn take_entry(&mut self, key: &Self::Key) -> Option<Self::Value>;
    fn put_entry(&mut self, key: Self::Key, value: Self::Value);
}

impl<K, V> Keyed for HashMap<K, V>
where
    K: Eq + Hash,
{
    type Key = K;
    type Value = V;

    fn take_entry(&mut self, key: &K) -> Option<V> {
        self.remove(key)
    }

    fn put_entry(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

/// String-keyed records
impl<V> Keyed for BTreeMap<String, V> {
    type Key = String;
    type Value = V;

    fn take_entry(&mut self, key: &String) -> Option<V> {
        self.remove(key)
    }

    fn put_entry(&mut self, key: String, value: V) {
        self.insert(key, value);
    }
}

type MergeFn<K, V> = Arc<dyn Fn(V, V, &K) -> V + Send + Sync + 'static>;

/// Options for [`collect`] and [`collect_record`]
pub struct CollectOptions<K, V> {
    merge: Option<MergeFn<K, V>>,
}

impl<K, V> CollectOptions<K, V> {
    pub fn new() -> Self {
        CollectOptions { merge: None }
    }

    /// Resolve duplicate keys with `merge(current, new, key)` instead of
    /// overwriting the current value
    pub fn merge<F>(mut self, merge: F) -> Self
    where
        F: Fn(V, V, &K) -> V + Send + Sync + 'static,
    {
        self.merge = Some(Arc::new(merge));
        self
    }

    pub fn has_merge(&self) -> bool {
        self.merge.is_some()
    }
}

impl<K, V> Default for CollectOptions<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for CollectOptions<K, V> {
    fn clone(&self) -> Self {
        CollectOptions {
            merge: self.merge.clone(),
        }
    }
}

impl<K, V> fmt::Debug for CollectOptions<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectOptions")
            .field("merge", &self.merge.is_some())
            .finish()
    }
}

/// Collect `(key, value)` pairs produced by `f` into any [`Keyed`] container.
///
/// A later duplicate key overwrites the earlier value unless a merge function
/// is configured.
pub fn collect_into<C, S, F>(
    mut f: F,
    src: S,
    options: CollectOptions<C::Key, C::Value>,
) -> impl Future<Output = SeqResult<C>>
where
    C: Keyed + Send + 'static,
    C::Key: Send + 'static,
    C::Value: Send + 'static,
    S: IntoSource,
    F: FnMut(S::Item) -> (C::Key, C::Value) + Send + 'static,
{
    let mut upstream = src.into_cursor();
    async move {
        let mut out = C::default();
        while let Some(item) = upstream.pull().await? {
            let (key, value) = f(item);
            let value = match &options.merge {
                Some(merge) => match out.take_entry(&key) {
                    Some(current) => merge(current, value, &key),
                    None => value,
                },
                None => value,
            };
            out.put_entry(key, value);
        }
        Ok(out)
    }
}

/// Collect into a `HashMap`
///
/// # Examples
/// ```
/// use rs2_seq::*;
///
/// # async fn example() {
/// let options = CollectOptions::new().merge(|mut a: Vec<i32>, b: Vec<i32>, _key: &&str| {
///     a.extend(b);
///     a
/// });
/// let groups = collect(
///     |x: i32| (if x % 2 == 0 { "even" } else { "odd" }, vec![x]),
///     vec![1, 2, 3],
///     options,
/// )
/// .await
/// .unwrap();
/// assert_eq!(groups["odd"], vec![1, 3]);
/// assert_eq!(groups["even"], vec![2]);
/// # }
/// ```
pub fn collect<S, K, V, F>(
    f: F,
    src: S,
    options: CollectOptions<K, V>,
) -> impl Future<Output = SeqResult<HashMap<K, V>>>
where
    S: IntoSource,
    K: Eq + Hash + Send + 'static,
    V: Send + 'static,
    F: FnMut(S::Item) -> (K, V) + Send + 'static,
{
    collect_into::<HashMap<K, V>, S, F>(f, src, options)
}

/// Collect into a string-keyed record
pub fn collect_record<S, V, F>(
    f: F,
    src: S,
    options: CollectOptions<String, V>,
) -> impl Future<Output = SeqResult<BTreeMap<String, V>>>
where
    S: IntoSource,
    V: Send + 'static,
    F: FnMut(S::Item) -> (String, V) + Send + 'static,
{
    collect_into::<BTreeMap<String, V>, S, F>(f, src, options)
}
