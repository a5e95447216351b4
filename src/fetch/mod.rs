//! Retrieves the university's pages as raw bytes.
//! `HttpFetcher` goes over the network; tests swap in `FixtureFetcher`, which serves local files.
#[cfg(test)]
mod fixture;
mod site;

use std::{future::Future, num::NonZeroU32, time::Duration};

use governor::{DefaultDirectRateLimiter, Jitter, Quota, RateLimiter};
use reqwest::Client;
use tracing::{instrument, Level};

use crate::{decode::euc_kr_to_utf8, error::Context, Result};

#[cfg(test)]
pub use fixture::FixtureFetcher;
pub use site::{Site, YearMonth, SKHU_URL};

pub const TIMEOUT: Duration = Duration::from_secs(5);

const RATE_LIMIT: NonZeroU32 = match NonZeroU32::new(10) {
    Some(n) => n,
    None => panic!("rate limit must be non-zero"),
};
const DELAY_JITTER: Duration = Duration::from_millis(250);

/// Anything that can turn a URL into the bytes behind it.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

pub fn make_client() -> Result<Client> {
    Client::builder()
        .timeout(TIMEOUT)
        .gzip(true)
        .build()
        .map_err(From::from)
}

pub struct HttpFetcher {
    client: Client,
    limiter: DefaultDirectRateLimiter,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: make_client()?,
            limiter: RateLimiter::direct(Quota::per_second(RATE_LIMIT)),
        })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(skip(self), level = Level::TRACE)]
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.limiter
            .until_ready_with_jitter(Jitter::up_to(DELAY_JITTER))
            .await;
        let start = std::time::Instant::now();
        let res = self.client.get(url).send().await?.error_for_status()?;
        let body = res.bytes().await?;
        log::debug!("fetched {url} ({} bytes) in {:?}", body.len(), start.elapsed());
        Ok(body.to_vec())
    }
}

/// Fetches `url` and decodes it from EUC-KR, labelling any failure with `label`.
pub async fn fetch_text<F: Fetch>(fetcher: &F, url: &str, label: &'static str) -> Result<String> {
    let bytes = fetcher.fetch(url).await.context(label)?;
    euc_kr_to_utf8(&bytes).context(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn test_fetch_text_decodes() {
        let fetcher = FixtureFetcher::new([(
            "http://skhu.ac.kr/test",
            "./src/parse/html_examples/mock/mock.html",
        )]);
        let text = fetch_text(&fetcher, "http://skhu.ac.kr/test", "mock")
            .await
            .unwrap();
        assert_eq!(text, "Hello, Mock!\n");
    }

    #[tokio::test]
    async fn test_fetch_text_labels_network_failure() {
        let fetcher = FixtureFetcher::default();
        let err = fetch_text(&fetcher, "http://skhu.ac.kr/nowhere", "board list")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.to_string().starts_with("board list error: "));
    }

    #[tokio::test]
    async fn test_fetch_text_labels_encoding_failure() {
        let fetcher = FixtureFetcher::new([(
            "http://skhu.ac.kr/broken",
            "./src/parse/html_examples/mock/malformed.html",
        )]);
        let err = fetch_text(&fetcher, "http://skhu.ac.kr/broken", "meal table processing")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Encoding);
    }
}
