//! Infinite (or optionally bounded) generators

use async_stream::stream;
use futures_core::Stream;
use futures_util::pin_mut;
use futures_util::stream::{self, StreamExt};
use std::ops::Add;

use crate::aiter::{empty, AiterStream};

/// Count up from `start` by `step`, forever
///
/// # Examples
/// ```
/// use aiter_stream::*;
/// use futures_util::stream::StreamExt;
///
/// # async fn example() {
/// let evens = count(0, 2).take(4).collect::<Vec<_>>().await;
/// assert_eq!(evens, vec![0, 2, 4, 6]);
/// # }
/// ```
pub fn count<T>(start: T, step: T) -> AiterStream<T>
where
    T: Add<Output = T> + Copy + Send + 'static,
{
    stream! {
        let mut current = start;
        loop {
            yield current;
            // Advance only once the next element is requested
            current = current + step;
        }
    }
    .boxed()
}

/// Yield the elements of `s`, then replay them forever
///
/// Elements are remembered as they are first yielded, so `s` itself is only
/// traversed once. An empty `s` yields an empty stream.
pub fn cycle<S>(s: S) -> AiterStream<S::Item>
where
    S: Stream + Send + 'static,
    S::Item: Clone + Send + 'static,
{
    stream! {
        pin_mut!(s);
        let mut saved = Vec::new();
        while let Some(item) = s.next().await {
            saved.push(item.clone());
            yield item;
        }

        if !saved.is_empty() {
            loop {
                for i in 0..saved.len() {
                    let item = saved[i].clone();
                    yield item;
                }
            }
        }
    }
    .boxed()
}

/// Repeat a value, forever when `times` is `None`
pub fn repeat<O>(item: O, times: Option<usize>) -> AiterStream<O>
where
    O: Clone + Send + 'static,
{
    match times {
        None => stream::repeat(item).boxed(),
        Some(0) => empty(),
        Some(n) => stream::repeat(item).take(n).boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aiter::from_iter;

    #[tokio::test]
    async fn test_count_floats() {
        let result = count(0.5, 0.25).take(3).collect::<Vec<_>>().await;
        assert_eq!(result, vec![0.5, 0.75, 1.0]);
    }

    #[tokio::test]
    async fn test_cycle_replays() {
        let result = cycle(from_iter(vec![1, 2, 3])).take(7).collect::<Vec<_>>().await;
        assert_eq!(result, vec![1, 2, 3, 1, 2, 3, 1]);
    }

    #[tokio::test]
    async fn test_cycle_empty() {
        let result = cycle(from_iter(Vec::<i32>::new())).collect::<Vec<_>>().await;
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_repeat_bounded_and_unbounded() {
        assert_eq!(repeat('a', Some(3)).collect::<String>().await, "aaa");
        assert_eq!(repeat('a', Some(0)).collect::<String>().await, "");
        assert_eq!(repeat(7, None).take(2).collect::<Vec<_>>().await, vec![7, 7]);
    }
}
