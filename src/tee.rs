//! Broadcast (tee) core
//!
//! `tee` splits one single-pass stream into `n` independent streams. Every
//! output yields the full upstream sequence in upstream order, while the
//! upstream itself is pulled exactly once per element no matter how many
//! outputs there are or how unevenly they are consumed.
//!
//! Each output owns a [`TeeQueue`] holding the elements it has not consumed
//! yet. An output with an empty queue polls the shared upstream itself, under
//! the group lock, and a ready element is appended to every live queue. The
//! in-flight pull belongs to the group rather than to the output that started
//! it: upstream is always polled with a waker that wakes every waiting output,
//! so any of them can finish the pull, and an output that stops polling midway
//! never stalls its siblings.
//!
//! If upstream panics while being polled, the group is poisoned: elements
//! already queued are still delivered, but any output that needs a new
//! element panics instead of pulling upstream again.
//!
//! Queues are unbounded: an output that lags far behind the others buffers
//! the whole gap. Dropping an output releases its queue and the publisher
//! stops feeding it; the remaining outputs are unaffected.

use futures_core::Stream;
use futures_util::stream::StreamExt;
use futures_util::task::{waker_ref, ArcWake};
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::task::{Context, Poll, Waker};

use crate::aiter::{from_stream, from_try_stream, AiterStream};
use crate::error::StreamResult;
use crate::queue::TeeQueue;
use crate::stream_configuration::TeeConfig;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Wakers of the outputs currently waiting on upstream
struct Notifier {
    wakers: Mutex<Vec<Option<Waker>>>,
}

impl Notifier {
    fn register(&self, output: usize, waker: &Waker) {
        let mut wakers = lock(&self.wakers);
        let slot = &mut wakers[output];
        if !slot.as_ref().is_some_and(|w| w.will_wake(waker)) {
            *slot = Some(waker.clone());
        }
    }

    fn unregister(&self, output: usize) {
        lock(&self.wakers)[output] = None;
    }

    fn wake_all(&self) {
        let wakers: Vec<Waker> = lock(&self.wakers).iter_mut().filter_map(Option::take).collect();
        for waker in wakers {
            waker.wake();
        }
    }
}

impl ArcWake for Notifier {
    fn wake_by_ref(arc_self: &Arc<Self>) {
        arc_self.wake_all();
    }
}

struct Publisher<T> {
    source: AiterStream<T>,
    queues: Vec<Weak<TeeQueue<T>>>,
    exhausted: bool,
    pulls: u64,
}

impl<T: Clone> Publisher<T> {
    /// Append `item` to every queue whose output is still alive
    fn broadcast(&mut self, item: T) {
        let live: Vec<Arc<TeeQueue<T>>> = self.queues.iter().filter_map(Weak::upgrade).collect();
        if let Some((last, rest)) = live.split_last() {
            for queue in rest {
                queue.push(item.clone());
            }
            last.push(item);
        }
    }
}

/// Wakes every waiting output if upstream panics mid-pull
struct WakeOnUnwind<'a>(&'a Notifier);

impl Drop for WakeOnUnwind<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.wake_all();
        }
    }
}

struct Broadcast<T> {
    publisher: Mutex<Publisher<T>>,
    notifier: Arc<Notifier>,
}

impl<T: Clone> Broadcast<T> {
    /// Deliver the next element for `queue`'s output, pulling upstream if needed
    fn poll_publish(&self, queue: &TeeQueue<T>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        let (mut publisher, failed) = match self.publisher.lock() {
            Ok(publisher) => (publisher, false),
            Err(poisoned) => (poisoned.into_inner(), true),
        };

        // Another output may have published while we waited for the lock.
        if let Some(item) = queue.pop() {
            return Poll::Ready(Some(item));
        }

        // A panicked upstream is never pulled again; every output that
        // needs a new element observes the failure.
        if failed {
            drop(publisher);
            log::error!("tee: output {} cannot continue, upstream panicked", queue.output());
            panic!("tee: upstream panicked during an earlier pull");
        }
        if publisher.exhausted {
            return Poll::Ready(None);
        }

        let output = queue.output();
        self.notifier.register(output, cx.waker());
        let waker = waker_ref(&self.notifier);
        let mut shared_cx = Context::from_waker(&waker);

        let unwind = WakeOnUnwind(&self.notifier);
        let polled = publisher.source.poll_next_unpin(&mut shared_cx);
        drop(unwind);

        match polled {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Some(item)) => {
                publisher.pulls += 1;
                log::trace!("tee: output {} published pull #{}", output, publisher.pulls);
                publisher.broadcast(item);
                drop(publisher);

                // Siblings waiting on this pull now have the element queued.
                self.notifier.unregister(output);
                self.notifier.wake_all();
                Poll::Ready(queue.pop())
            }
            Poll::Ready(None) => {
                publisher.pulls += 1;
                publisher.exhausted = true;
                log::debug!("tee: upstream exhausted after {} pulls", publisher.pulls);
                drop(publisher);

                self.notifier.unregister(output);
                self.notifier.wake_all();
                Poll::Ready(None)
            }
        }
    }
}

/// One of the `n` streams returned by [`tee`]
struct TeeOutput<T> {
    queue: Arc<TeeQueue<T>>,
    group: Arc<Broadcast<T>>,
}

impl<T: Clone> Stream for TeeOutput<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        let this = self.get_mut();
        if let Some(item) = this.queue.pop() {
            return Poll::Ready(Some(item));
        }
        this.group.poll_publish(&this.queue, cx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), None)
    }
}

impl<T> Drop for TeeOutput<T> {
    fn drop(&mut self) {
        log::trace!("tee: output {} dropped", self.queue.output());
        self.group.notifier.unregister(self.queue.output());
    }
}

fn broadcast<T>(source: AiterStream<T>, config: &TeeConfig) -> Vec<AiterStream<T>>
where
    T: Clone + Send + 'static,
{
    let queues: Vec<Arc<TeeQueue<T>>> = (0..config.outputs)
        .map(|output| {
            Arc::new(TeeQueue::new(
                output,
                config.initial_queue_capacity,
                config.queue_high_watermark,
            ))
        })
        .collect();

    let group = Arc::new(Broadcast {
        publisher: Mutex::new(Publisher {
            source,
            queues: queues.iter().map(Arc::downgrade).collect(),
            exhausted: false,
            pulls: 0,
        }),
        notifier: Arc::new(Notifier {
            wakers: Mutex::new(vec![None; config.outputs]),
        }),
    });

    log::debug!("tee: created broadcast group with {} outputs", config.outputs);

    queues
        .into_iter()
        .map(|queue| {
            TeeOutput {
                queue,
                group: Arc::clone(&group),
            }
            .boxed()
        })
        .collect()
}

/// Duplicate a stream into `n` independent streams
///
/// All outputs yield the same elements in the same order as `source`, and
/// `source` is pulled only once per element. Outputs may be consumed at
/// different speeds, from different tasks, or abandoned early. `n == 0`
/// returns no outputs without touching `source`; `n == 1` returns `source`
/// itself, unbuffered.
///
/// # Examples
/// ```
/// use aiter_stream::*;
/// use futures_util::stream::StreamExt;
///
/// # async fn example() {
/// let mut outputs = tee(from_iter(vec![1, 2, 3]), 3);
/// let c = outputs.pop().unwrap();
/// let b = outputs.pop().unwrap();
/// let a = outputs.pop().unwrap();
///
/// assert_eq!(a.collect::<Vec<_>>().await, vec![1, 2, 3]);
/// assert_eq!(b.collect::<Vec<_>>().await, vec![1, 2, 3]);
/// assert_eq!(c.collect::<Vec<_>>().await, vec![1, 2, 3]);
/// # }
/// ```
pub fn tee<S>(source: S, n: usize) -> Vec<AiterStream<S::Item>>
where
    S: Stream + Send + 'static,
    S::Item: Clone + Send + 'static,
{
    match n {
        0 => Vec::new(),
        1 => vec![from_stream(source)],
        _ => broadcast(from_stream(source), &TeeConfig::default().outputs(n)),
    }
}

/// Duplicate a stream according to a [`TeeConfig`]
///
/// The configuration is validated before `source` is touched; an invalid
/// configuration is returned as an error and `source` is dropped unpolled.
pub fn tee_with_config<S>(source: S, config: &TeeConfig) -> StreamResult<Vec<AiterStream<S::Item>>>
where
    S: Stream + Send + 'static,
    S::Item: Clone + Send + 'static,
{
    config.validate()?;

    Ok(match config.outputs {
        0 => Vec::new(),
        1 => vec![from_stream(source)],
        _ => broadcast(from_stream(source), config),
    })
}

/// Duplicate a fallible stream into `n` independent streams
///
/// Upstream is treated as permanently failed after its first error: every
/// output yields the elements produced before the failure, then the same
/// error once, then ends. Upstream is never pulled again after it fails.
///
/// # Examples
/// ```
/// use aiter_stream::*;
/// use futures_util::stream::StreamExt;
///
/// # async fn example() {
/// let source = from_iter(vec![Ok(1), Ok(2), Err("boom"), Ok(3)]);
/// for output in try_tee(source, 2) {
///     assert_eq!(output.collect::<Vec<_>>().await, vec![Ok(1), Ok(2), Err("boom")]);
/// }
/// # }
/// ```
pub fn try_tee<S, T, E>(source: S, n: usize) -> Vec<AiterStream<Result<T, E>>>
where
    S: Stream<Item = Result<T, E>> + Send + 'static,
    T: Clone + Send + 'static,
    E: Clone + Send + 'static,
{
    match n {
        0 => Vec::new(),
        1 => vec![from_try_stream(source)],
        _ => broadcast(from_try_stream(source), &TeeConfig::default().outputs(n)),
    }
}
