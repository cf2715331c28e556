//! Assertions over stream contents, for use in tests

use futures_core::Stream;
use futures_util::pin_mut;
use futures_util::stream::StreamExt;
use std::fmt::Debug;

/// Drain `actual` and assert it yielded exactly `expected`
///
/// # Panics
///
/// Panics if the drained elements differ from `expected`.
pub async fn assert_streams<S>(actual: S, expected: &[S::Item])
where
    S: Stream,
    S::Item: PartialEq + Debug,
{
    let elements: Vec<S::Item> = actual.collect().await;
    assert_eq!(
        elements.as_slice(),
        expected,
        "stream yielded {} elements, expected {}",
        elements.len(),
        expected.len()
    );
}

/// Assert that `actual` starts with `expected`
///
/// Pulls at most `expected.len()` elements, so it is safe on infinite streams.
///
/// # Panics
///
/// Panics if the stream ends early or its prefix differs from `expected`.
pub async fn assert_stream_starts_with<S>(actual: S, expected: &[S::Item])
where
    S: Stream,
    S::Item: PartialEq + Debug,
{
    pin_mut!(actual);
    let mut elements = Vec::with_capacity(expected.len());
    while elements.len() < expected.len() {
        match actual.next().await {
            Some(item) => elements.push(item),
            None => break,
        }
    }
    assert_eq!(
        elements.as_slice(),
        expected,
        "stream prefix differs from the expected {} elements",
        expected.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aiter::from_iter;
    use crate::infinite::count;

    #[tokio::test]
    async fn test_assert_streams_passes() {
        assert_streams(from_iter(vec![1, 9, 8, 4]), &[1, 9, 8, 4]).await;
        assert_streams(from_iter(Vec::<&str>::new()), &[]).await;
    }

    #[tokio::test]
    #[should_panic]
    async fn test_assert_streams_fails_on_mismatch() {
        assert_streams(from_iter(vec![1, 9, 8, 7]), &[1, 9, 8, 4]).await;
    }

    #[tokio::test]
    async fn test_starts_with_infinite() {
        assert_stream_starts_with(count(0u64, 1), &[0, 1, 2, 3]).await;
    }

    #[tokio::test]
    #[should_panic]
    async fn test_starts_with_short_stream() {
        assert_stream_starts_with(from_iter(vec![1]), &[1, 2]).await;
    }
}
