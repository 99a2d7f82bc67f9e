use std::task::Poll;

use futures::future;

/// Number of loop iterations between two voluntary yields in long-running
/// calculus primitives.
pub const YIELD_INTERVAL: usize = 1000;

/// Hands control back to the executor once.
///
/// The future is pending on its first poll and wakes itself, so any executor
/// polls it again straight away.
///
/// # Example
/// ```
/// use std::{pin::pin, task::{Context, Poll}};
///
/// use formulaic::interpreter::evaluator::yield_now::yield_now;
/// use futures::task::noop_waker_ref;
///
/// let mut cx = Context::from_waker(noop_waker_ref());
/// let mut future = pin!(yield_now());
/// assert!(future.as_mut().poll(&mut cx).is_pending());
/// assert_eq!(future.as_mut().poll(&mut cx), Poll::Ready(()));
/// ```
pub async fn yield_now() {
    let mut yielded = false;
    future::poll_fn(|cx| {
        if yielded {
            return Poll::Ready(());
        }

        yielded = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }).await;
}

/// Yields after every [`YIELD_INTERVAL`] completed iterations.
///
/// `completed` is the number of iterations finished so far.
pub async fn yield_periodically(completed: usize) {
    if completed > 0 && completed % YIELD_INTERVAL == 0 {
        log::trace!("yielding after {completed} iterations");
        yield_now().await;
    }
}
