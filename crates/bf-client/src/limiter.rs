//! Hook for an externally owned request budget.

use futures::future::BoxFuture;

/// A shared rate limiter consulted before every attempt.
///
/// `acquire` resolves once the caller may send the request identified by
/// `tag` (for example `bigfix_computer_list`). Retries call it again, so
/// backoff sleeps and limiter waits add up rather than overlap.
pub trait RateLimiter: Send + Sync {
    fn acquire<'a>(&'a self, tag: &'a str) -> BoxFuture<'a, ()>;
}
