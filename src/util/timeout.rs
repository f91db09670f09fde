//! Optional deadline for an in-flight backend request.

use std::future::Future;
use std::time::Duration;

use crate::error::FormError;

/// Await `request`, giving up after `limit` if one is set.
///
/// With no limit the request may stay in flight indefinitely. An elapsed
/// deadline counts as "no response obtained" and surfaces as
/// [`FormError::Timeout`], which renders as the connectivity message.
pub async fn within<T>(
    limit: Option<Duration>,
    request: impl Future<Output = Result<T, FormError>>,
) -> Result<T, FormError> {
    let Some(limit) = limit else {
        return request.await;
    };
    tokio::time::timeout(limit, request)
        .await
        .unwrap_or_else(|_| Err(FormError::Timeout(limit.as_millis() as u64)))
}
