//! aiter-stream - async iterator algebra over Rust streams
//!
//! This module provides the uniform stream type, the adapters that produce it
//! from synchronous iterators and arbitrary streams, and the single-pass
//! transforms (mapping, filtering, slicing, deduplication, concatenation).
//! Every transform pulls its upstream on demand only, and stops pulling as
//! soon as its own termination condition is met.

use async_stream::stream;
use futures_core::Stream;
use futures_util::pin_mut;
use futures_util::stream::{self, BoxStream, StreamExt};
use std::collections::{HashSet, VecDeque};
use std::future::Future;
use std::hash::Hash;

/// A boxed, heap-allocated stream; the shape every combinator accepts and returns
pub type AiterStream<O> = BoxStream<'static, O>;

// ================================
// Sequence Adapters
// ================================

/// Create a stream from an iterator
///
/// The resulting stream never suspends, and has exactly the elements of `iter`
/// in order, finite or not.
pub fn from_iter<I, O>(iter: I) -> AiterStream<O>
where
    I: IntoIterator<Item = O> + Send + 'static,
    <I as IntoIterator>::IntoIter: Send,
    O: Send + 'static,
{
    stream::iter(iter).boxed()
}

/// Box any stream into an `AiterStream` without buffering or transforming it
pub fn from_stream<S>(s: S) -> AiterStream<S::Item>
where
    S: Stream + Send + 'static,
{
    s.boxed()
}

/// Box a fallible stream, making its first error terminal
///
/// See [`stop_after_error`].
pub fn from_try_stream<S, T, E>(s: S) -> AiterStream<Result<T, E>>
where
    S: Stream<Item = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    stop_after_error(s)
}

/// Create an empty stream that completes immediately
pub fn empty<O>() -> AiterStream<O>
where
    O: Send + 'static,
{
    stream::empty().boxed()
}

// ================================
// Stream Transformations
// ================================

/// Yield items up to and including the first error, then end
///
/// The upstream is never polled again once it has produced an error, so a
/// failed source stays failed.
pub fn stop_after_error<S, T, E>(s: S) -> AiterStream<Result<T, E>>
where
    S: Stream<Item = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    stream! {
        pin_mut!(s);
        while let Some(item) = s.next().await {
            let failed = item.is_err();
            yield item;
            if failed {
                log::debug!("stop_after_error: upstream failed, ending stream");
                break;
            }
        }
    }
    .boxed()
}

/// Map each element together with its zero-based index
///
/// # Examples
/// ```
/// use aiter_stream::*;
/// use futures_util::stream::StreamExt;
///
/// # async fn example() {
/// let result = map(from_iter(vec!["a", "b"]), |s, i| format!("{}{}", s, i))
///     .collect::<Vec<_>>()
///     .await;
/// assert_eq!(result, vec!["a0".to_string(), "b1".to_string()]);
/// # }
/// ```
pub fn map<S, U, F>(s: S, mut f: F) -> AiterStream<U>
where
    S: Stream + Send + 'static,
    F: FnMut(S::Item, usize) -> U + Send + 'static,
    U: Send + 'static,
{
    s.enumerate().map(move |(i, item)| f(item, i)).boxed()
}

/// Map each element with an async function that also receives the element's index
pub fn map_async<S, U, F, Fut>(s: S, mut f: F) -> AiterStream<U>
where
    S: Stream + Send + 'static,
    F: FnMut(S::Item, usize) -> Fut + Send + 'static,
    Fut: Future<Output = U> + Send + 'static,
    U: Send + 'static,
{
    s.enumerate().then(move |(i, item)| f(item, i)).boxed()
}

/// Combine two streams element-by-element
///
/// `s1` is pulled before `s2` on every step; once `s1` is exhausted `s2` is
/// not pulled again. Stops when either stream ends.
pub fn zip_map<S1, S2, O, F>(s1: S1, s2: S2, mut f: F) -> AiterStream<O>
where
    S1: Stream + Send + 'static,
    S2: Stream + Send + 'static,
    F: FnMut(S1::Item, S2::Item, usize) -> O + Send + 'static,
    S1::Item: Send + 'static,
    S2::Item: Send + 'static,
    O: Send + 'static,
{
    stream! {
        pin_mut!(s1);
        pin_mut!(s2);

        let mut index = 0;
        loop {
            let a = match s1.next().await {
                Some(a) => a,
                None => break,
            };
            let b = match s2.next().await {
                Some(b) => b,
                None => break,
            };
            yield f(a, b, index);
            index += 1;
        }
    }
    .boxed()
}

/// Combine any number of same-typed streams element-by-element
///
/// Each step pulls the streams in order and hands `f` one element from each,
/// plus the step index. Stops at the first exhausted stream without pulling
/// the ones after it. No streams means no output.
///
/// # Examples
/// ```
/// use aiter_stream::*;
/// use futures_util::stream::StreamExt;
///
/// # async fn example() {
/// let sums = zip_map_all(
///     vec![from_iter(vec![1, 2, 3]), from_iter(vec![10, 20]), from_iter(vec![100, 200, 300])],
///     |row, _| row.iter().sum::<i32>(),
/// )
/// .collect::<Vec<_>>()
/// .await;
/// assert_eq!(sums, vec![111, 222]);
/// # }
/// ```
pub fn zip_map_all<S, O, F>(streams: Vec<S>, mut f: F) -> AiterStream<O>
where
    S: Stream + Send + 'static,
    S::Item: Send + 'static,
    F: FnMut(Vec<S::Item>, usize) -> O + Send + 'static,
    O: Send + 'static,
{
    if streams.is_empty() {
        return empty();
    }

    let mut streams: Vec<AiterStream<S::Item>> = streams.into_iter().map(from_stream).collect();
    stream! {
        let mut index = 0;
        loop {
            let mut row = Vec::with_capacity(streams.len());
            for i in 0..streams.len() {
                match streams[i].next().await {
                    Some(item) => row.push(item),
                    None => break,
                }
            }
            if row.len() < streams.len() {
                break;
            }
            yield f(row, index);
            index += 1;
        }
    }
    .boxed()
}

/// Keep the elements for which `predicate(&element, index)` holds
pub fn filter<S, F>(s: S, mut predicate: F) -> AiterStream<S::Item>
where
    S: Stream + Send + 'static,
    S::Item: Send + 'static,
    F: FnMut(&S::Item, usize) -> bool + Send + 'static,
{
    stream! {
        pin_mut!(s);
        let mut index = 0;
        while let Some(item) = s.next().await {
            let keep = predicate(&item, index);
            index += 1;
            if keep {
                yield item;
            }
        }
    }
    .boxed()
}

/// Keep the elements for which an async predicate holds
pub fn filter_async<S, F, Fut>(s: S, mut predicate: F) -> AiterStream<S::Item>
where
    S: Stream + Send + 'static,
    S::Item: Send + 'static,
    F: FnMut(&S::Item, usize) -> Fut + Send + 'static,
    Fut: Future<Output = bool> + Send + 'static,
{
    stream! {
        pin_mut!(s);
        let mut index = 0;
        while let Some(item) = s.next().await {
            let keep = predicate(&item, index).await;
            index += 1;
            if keep {
                yield item;
            }
        }
    }
    .boxed()
}

/// Slice: take first n items
///
/// The upstream is never pulled for an item past the `n`-th.
pub fn take<S>(s: S, n: usize) -> AiterStream<S::Item>
where
    S: Stream + Send + 'static,
{
    s.take(n).boxed()
}

/// Take elements from a stream while a predicate returns true
///
/// This combinator yields elements from the stream as long as the predicate returns true.
/// It stops (and does not yield) the first element where the predicate returns false.
///
/// # Examples
/// ```
/// use aiter_stream::*;
/// use futures_util::stream::StreamExt;
///
/// # async fn example() {
/// let stream = from_iter(vec![1, 2, 3, 4, 5]);
/// let result = take_while(stream, |&x, _| async move { x < 4 }).collect::<Vec<_>>().await;
/// assert_eq!(result, vec![1, 2, 3]);
/// # }
/// ```
pub fn take_while<S, F, Fut>(s: S, mut predicate: F) -> AiterStream<S::Item>
where
    S: Stream + Send + 'static,
    S::Item: Send + 'static,
    F: FnMut(&S::Item, usize) -> Fut + Send + 'static,
    Fut: Future<Output = bool> + Send + 'static,
{
    stream! {
        pin_mut!(s);
        let mut index = 0;
        while let Some(item) = s.next().await {
            if predicate(&item, index).await {
                index += 1;
                yield item;
            } else {
                break;
            }
        }
    }
    .boxed()
}

/// Keep only the last `n` items
///
/// At most `n` items are buffered; nothing is yielded until upstream ends.
pub fn take_end<S>(s: S, n: usize) -> AiterStream<S::Item>
where
    S: Stream + Send + 'static,
    S::Item: Send + 'static,
{
    if n == 0 {
        return empty();
    }

    stream! {
        pin_mut!(s);
        let mut window = VecDeque::with_capacity(n);
        while let Some(item) = s.next().await {
            if window.len() == n {
                window.pop_front();
            }
            window.push_back(item);
        }
        for item in window {
            yield item;
        }
    }
    .boxed()
}

/// Slice: drop first n items
pub fn drop<S>(s: S, n: usize) -> AiterStream<S::Item>
where
    S: Stream + Send + 'static,
{
    s.skip(n).boxed()
}

/// Skip elements from a stream while a predicate returns true
///
/// This combinator skips elements from the stream as long as the predicate returns true.
/// Once the predicate returns false, it yields that element and all remaining elements
/// without consulting the predicate again.
///
/// # Examples
/// ```
/// use aiter_stream::*;
/// use futures_util::stream::StreamExt;
///
/// # async fn example() {
/// let stream = from_iter(vec![1, 2, 3, 4, 1]);
/// let result = drop_while(stream, |&x, _| async move { x < 3 }).collect::<Vec<_>>().await;
/// assert_eq!(result, vec![3, 4, 1]);
/// # }
/// ```
pub fn drop_while<S, F, Fut>(s: S, mut predicate: F) -> AiterStream<S::Item>
where
    S: Stream + Send + 'static,
    S::Item: Send + 'static,
    F: FnMut(&S::Item, usize) -> Fut + Send + 'static,
    Fut: Future<Output = bool> + Send + 'static,
{
    stream! {
        pin_mut!(s);

        let mut index = 0;
        let mut found_false = false;
        while let Some(item) = s.next().await {
            if !found_false {
                let skip = predicate(&item, index).await;
                index += 1;
                if skip {
                    continue;
                }
                found_false = true;
            }
            yield item;
        }
    }
    .boxed()
}

/// Drop the last `n` items
///
/// Items are delayed by `n` positions: at most `n` are buffered at a time.
pub fn drop_end<S>(s: S, n: usize) -> AiterStream<S::Item>
where
    S: Stream + Send + 'static,
    S::Item: Send + 'static,
{
    if n == 0 {
        return from_stream(s);
    }

    stream! {
        pin_mut!(s);
        let mut delay = VecDeque::with_capacity(n);
        while let Some(item) = s.next().await {
            delay.push_back(item);
            if delay.len() > n {
                if let Some(oldest) = delay.pop_front() {
                    yield oldest;
                }
            }
        }
    }
    .boxed()
}

/// Yield each distinct element the first time it is seen
pub fn unique<S>(s: S) -> AiterStream<S::Item>
where
    S: Stream + Send + 'static,
    S::Item: Eq + Hash + Clone + Send + 'static,
{
    unique_by(s, |item| item.clone())
}

/// Yield each element whose key has not been seen before
pub fn unique_by<S, K, F>(s: S, mut key_fn: F) -> AiterStream<S::Item>
where
    S: Stream + Send + 'static,
    S::Item: Send + 'static,
    K: Eq + Hash + Send + 'static,
    F: FnMut(&S::Item) -> K + Send + 'static,
{
    stream! {
        pin_mut!(s);
        let mut seen = HashSet::new();
        while let Some(item) = s.next().await {
            if seen.insert(key_fn(&item)) {
                yield item;
            }
        }
    }
    .boxed()
}

/// Concatenate multiple streams sequentially
///
/// Each stream is pulled only after the previous one is exhausted.
pub fn concat<O, S>(streams: Vec<S>) -> AiterStream<O>
where
    S: Stream<Item = O> + Send + 'static,
    O: Send + 'static,
{
    stream! {
        for s in streams {
            pin_mut!(s);
            while let Some(item) = s.next().await {
                yield item;
            }
        }
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_iter_preserves_order() {
        let result = from_iter(vec![3, 1, 2]).collect::<Vec<_>>().await;
        assert_eq!(result, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_stop_after_error_is_terminal() {
        let result = stop_after_error(from_iter(vec![Ok(1), Err("e"), Ok(2), Err("f")]))
            .collect::<Vec<_>>()
            .await;
        assert_eq!(result, vec![Ok(1), Err("e")]);
    }

    #[tokio::test]
    async fn test_take_end_shorter_than_n() {
        let result = take_end(from_iter(vec![1, 2]), 5).collect::<Vec<_>>().await;
        assert_eq!(result, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_drop_end_zero_is_identity() {
        let result = drop_end(from_iter(vec![1, 2, 3]), 0).collect::<Vec<_>>().await;
        assert_eq!(result, vec![1, 2, 3]);
    }
}
