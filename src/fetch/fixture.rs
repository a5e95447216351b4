use std::{collections::HashMap, path::PathBuf};

use super::Fetch;
use crate::{error::Error, Result};

/// Serves local files for exact URLs, so the scraping pipeline can run without a network.
#[derive(Debug, Default)]
pub struct FixtureFetcher {
    url_to_file: HashMap<String, PathBuf>,
}

impl FixtureFetcher {
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            url_to_file: entries
                .into_iter()
                .map(|(url, path)| (url.to_owned(), PathBuf::from(path)))
                .collect(),
        }
    }

    pub fn with(mut self, url: impl Into<String>, path: &str) -> Self {
        self.url_to_file.insert(url.into(), PathBuf::from(path));
        self
    }
}

impl Fetch for FixtureFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let Some(path) = self.url_to_file.get(url) else {
            return Err(Error::network(format!("unknown test address: {url}"))
                .context("fixture request"));
        };
        std::fs::read(path)
            .map_err(|e| Error::network(format!("{}: {e}", path.display())).context("fixture request"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const TEST_PATH: &str = "http://skhu.ac.kr/test";

    #[tokio::test]
    async fn test_serves_mapped_file() {
        let fetcher = FixtureFetcher::new([(TEST_PATH, "./src/parse/html_examples/mock/mock.html")]);
        let body = fetcher.fetch(TEST_PATH).await.unwrap();
        assert_eq!(body, b"Hello, Mock!\n");
    }

    #[tokio::test]
    async fn test_unknown_address() {
        let fetcher = FixtureFetcher::default();
        let err = fetcher.fetch(TEST_PATH).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(
            err.to_string(),
            "fixture request error: network error: unknown test address: http://skhu.ac.kr/test"
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_network_failure() {
        let fetcher = FixtureFetcher::default().with(TEST_PATH, "./src/parse/html_examples/mock/gone.html");
        let err = fetcher.fetch(TEST_PATH).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }
}
