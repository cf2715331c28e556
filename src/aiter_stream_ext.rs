use futures_core::Stream;
use std::collections::HashSet;
use std::future::Future;
use std::hash::Hash;

use crate::aiter::{
    drop_end, drop_while, filter, map, take_end, take_while, unique, unique_by, AiterStream,
};
use crate::collections::{to_set, to_vec};
use crate::infinite::cycle;
use crate::stream_configuration::TeeConfig;
use crate::error::StreamResult;
use crate::tee::{tee, tee_with_config};

/// Extension trait providing aiter combinators on Streams
pub trait AiterStreamExt: Stream + Sized + Unpin + Send + 'static {
    /// Split this stream into `n` independent streams that each yield every element
    ///
    /// The stream is pulled once per element regardless of `n`. See [`tee`].
    fn tee_aiter(self, n: usize) -> Vec<AiterStream<Self::Item>>
    where
        Self::Item: Clone + Send + 'static,
    {
        tee(self, n)
    }

    /// Split this stream according to a validated [`TeeConfig`]
    fn tee_with_config_aiter(self, config: &TeeConfig) -> StreamResult<Vec<AiterStream<Self::Item>>>
    where
        Self::Item: Clone + Send + 'static,
    {
        tee_with_config(self, config)
    }

    /// Map elements together with their index
    fn map_indexed_aiter<U, F>(self, f: F) -> AiterStream<U>
    where
        F: FnMut(Self::Item, usize) -> U + Send + 'static,
        U: Send + 'static,
    {
        map(self, f)
    }

    /// Keep elements for which `predicate(&element, index)` holds
    fn filter_indexed_aiter<F>(self, predicate: F) -> AiterStream<Self::Item>
    where
        F: FnMut(&Self::Item, usize) -> bool + Send + 'static,
        Self::Item: Send + 'static,
    {
        filter(self, predicate)
    }

    /// Take elements while an async predicate holds
    fn take_while_aiter<F, Fut>(self, predicate: F) -> AiterStream<Self::Item>
    where
        F: FnMut(&Self::Item, usize) -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
        Self::Item: Send + 'static,
    {
        take_while(self, predicate)
    }

    /// Skip elements while an async predicate holds
    fn drop_while_aiter<F, Fut>(self, predicate: F) -> AiterStream<Self::Item>
    where
        F: FnMut(&Self::Item, usize) -> Fut + Send + 'static,
        Fut: Future<Output = bool> + Send + 'static,
        Self::Item: Send + 'static,
    {
        drop_while(self, predicate)
    }

    /// Keep only the last `n` elements
    fn take_end_aiter(self, n: usize) -> AiterStream<Self::Item>
    where
        Self::Item: Send + 'static,
    {
        take_end(self, n)
    }

    /// Drop the last `n` elements
    fn drop_end_aiter(self, n: usize) -> AiterStream<Self::Item>
    where
        Self::Item: Send + 'static,
    {
        drop_end(self, n)
    }

    /// Yield each distinct element once
    fn unique_aiter(self) -> AiterStream<Self::Item>
    where
        Self::Item: Eq + Hash + Clone + Send + 'static,
    {
        unique(self)
    }

    /// Yield each element whose key is new
    fn unique_by_aiter<K, F>(self, key_fn: F) -> AiterStream<Self::Item>
    where
        K: Eq + Hash + Send + 'static,
        F: FnMut(&Self::Item) -> K + Send + 'static,
        Self::Item: Send + 'static,
    {
        unique_by(self, key_fn)
    }

    /// Replay this stream's elements forever
    fn cycle_aiter(self) -> AiterStream<Self::Item>
    where
        Self::Item: Clone + Send + 'static,
    {
        cycle(self)
    }

    /// Collect all elements into a `Vec`
    fn to_vec_aiter(self) -> impl Future<Output = Vec<Self::Item>> + Send
    where
        Self::Item: Send,
    {
        to_vec(self)
    }

    /// Collect all elements into a `HashSet`
    fn to_set_aiter(self) -> impl Future<Output = HashSet<Self::Item>> + Send
    where
        Self::Item: Eq + Hash + Send,
    {
        to_set(self)
    }
}

// Implement for all types that satisfy the bounds
impl<S> AiterStreamExt for S where S: Stream + Sized + Unpin + Send + 'static {}
