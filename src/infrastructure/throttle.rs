//! 请求限流
//!
//! 用 Semaphore 包装任意 `PortalTransport`，限制同时进行的请求数。

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Semaphore;
use url::Url;

use super::{PortalTransport, RawResponse};
use crate::error::TransportError;

pub struct ThrottledTransport<T> {
    inner: T,
    permits: Arc<Semaphore>,
}

impl<T: PortalTransport> ThrottledTransport<T> {
    /// `max_concurrent` 为 0 时不限制
    pub fn new(inner: T, max_concurrent: usize) -> Self {
        let permits = if max_concurrent == 0 {
            Semaphore::MAX_PERMITS
        } else {
            max_concurrent
        };
        Self {
            inner,
            permits: Arc::new(Semaphore::new(permits)),
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

#[async_trait]
impl<T: PortalTransport> PortalTransport for ThrottledTransport<T> {
    async fn post_form(&self, url: &Url, body: String) -> Result<RawResponse, TransportError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| TransportError::request_failed(url.as_str(), e))?;
        self.inner.post_form(url, body).await
    }

    async fn get(&self, url: &Url, cookie_header: &str) -> Result<RawResponse, TransportError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| TransportError::request_failed(url.as_str(), e))?;
        self.inner.get(url, cookie_header).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct SlowTransport {
        active: AtomicUsize,
        peak: AtomicUsize,
    }

    impl SlowTransport {
        async fn hit(&self) -> Result<RawResponse, TransportError> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.active.fetch_sub(1, Ordering::SeqCst);
            Ok(RawResponse {
                status: 200,
                ..Default::default()
            })
        }
    }

    #[async_trait]
    impl PortalTransport for SlowTransport {
        async fn post_form(&self, _: &Url, _: String) -> Result<RawResponse, TransportError> {
            self.hit().await
        }

        async fn get(&self, _: &Url, _: &str) -> Result<RawResponse, TransportError> {
            self.hit().await
        }
    }

    async fn peak_with_limit(limit: usize) -> usize {
        let transport = Arc::new(ThrottledTransport::new(SlowTransport::default(), limit));
        let url = Url::parse("https://school.example/portfolio.php").unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let transport = transport.clone();
                let url = url.clone();
                tokio::spawn(async move { transport.get(&url, "").await })
            })
            .collect();
        for handle in handles {
            tokio_test::assert_ok!(handle.await.unwrap());
        }

        transport.inner().peak.load(Ordering::SeqCst)
    }

    #[tokio::test]
    async fn test_limits_concurrent_requests() {
        assert!(peak_with_limit(2).await <= 2);
    }

    #[tokio::test]
    async fn test_zero_means_unbounded() {
        assert!(peak_with_limit(0).await >= 1);
    }
}
