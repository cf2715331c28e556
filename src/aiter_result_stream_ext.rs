use futures_core::Stream;

use crate::aiter::{stop_after_error, AiterStream};
use crate::tee::try_tee;

/// Extension trait for streams containing Result types
pub trait AiterResultStreamExt<T: Send + 'static, E: Send + 'static>:
    Stream<Item = Result<T, E>> + Sized + Unpin + Send + 'static
{
    /// Split into `n` streams; the first error is delivered to every output and ends them all
    fn try_tee_aiter(self, n: usize) -> Vec<AiterStream<Result<T, E>>>
    where
        T: Clone,
        E: Clone,
    {
        try_tee(self, n)
    }

    /// End the stream right after its first error
    fn stop_after_error_aiter(self) -> AiterStream<Result<T, E>> {
        stop_after_error(self)
    }
}

// Implement for all types that satisfy the bounds
impl<S, T, E> AiterResultStreamExt<T, E> for S
where
    S: Stream<Item = Result<T, E>> + Sized + Unpin + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
}
