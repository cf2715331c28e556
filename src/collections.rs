//! Terminal operations that drain a stream to completion

use futures_core::Stream;
use futures_util::pin_mut;
use futures_util::stream::StreamExt;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::hash::Hash;

/// Fold operation that accumulates a value over a stream
pub fn fold<S, A, F, Fut>(s: S, init: A, mut f: F) -> impl Future<Output = A>
where
    S: Stream,
    F: FnMut(A, S::Item) -> Fut,
    Fut: Future<Output = A>,
{
    async move {
        let mut acc = init;
        pin_mut!(s);
        while let Some(item) = s.next().await {
            acc = f(acc, item).await;
        }
        acc
    }
}

/// Reduce operation that combines all elements in a stream using a binary operation
///
/// The first element seeds the accumulator; an empty stream reduces to `None`.
pub fn reduce<S, F, Fut>(s: S, mut f: F) -> impl Future<Output = Option<S::Item>>
where
    S: Stream,
    F: FnMut(S::Item, S::Item) -> Fut,
    Fut: Future<Output = S::Item>,
{
    async move {
        pin_mut!(s);
        let mut acc = s.next().await?;
        while let Some(item) = s.next().await {
            acc = f(acc, item).await;
        }
        Some(acc)
    }
}

/// Collect every element into a `Vec`, in order
pub async fn to_vec<S>(s: S) -> Vec<S::Item>
where
    S: Stream,
{
    s.collect().await
}

/// Collect every element into a `HashSet`
pub async fn to_set<S>(s: S) -> HashSet<S::Item>
where
    S: Stream,
    S::Item: Eq + Hash,
{
    s.collect().await
}

/// Collect key/value pairs into a `HashMap`; later values win for duplicate keys
pub async fn to_map<S, K, V>(s: S) -> HashMap<K, V>
where
    S: Stream<Item = (K, V)>,
    K: Eq + Hash,
{
    s.collect().await
}

/// Group elements by an async key selector
///
/// Elements keep their stream order within each group.
///
/// # Examples
/// ```
/// use aiter_stream::*;
///
/// # async fn example() {
/// let groups = group_by(from_iter(vec![1, 2, 3, 4, 5]), |x| {
///     let even = x % 2 == 0;
///     async move { even }
/// })
/// .await;
/// assert_eq!(groups[&true], vec![2, 4]);
/// assert_eq!(groups[&false], vec![1, 3, 5]);
/// # }
/// ```
pub async fn group_by<S, K, F, Fut>(s: S, mut key_fn: F) -> HashMap<K, Vec<S::Item>>
where
    S: Stream,
    K: Eq + Hash,
    F: FnMut(&S::Item) -> Fut,
    Fut: Future<Output = K>,
{
    pin_mut!(s);
    let mut groups: HashMap<K, Vec<S::Item>> = HashMap::new();
    while let Some(item) = s.next().await {
        let key = key_fn(&item).await;
        groups.entry(key).or_default().push(item);
    }
    groups
}
