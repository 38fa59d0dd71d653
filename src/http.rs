use async_trait::async_trait;
use url::Url;

use crate::error::{RemoteError, RemoteResult};

/// Fetches the body of a GET request
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: Url) -> RemoteResult<String>;
}

#[derive(Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> RemoteResult<HttpTransport> {
        let client = reqwest::Client::builder().build()?;
        Ok(HttpTransport { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: Url) -> RemoteResult<String> {
        log::debug!("Requesting {}", redacted(&url));
        let response = self.client.get(url).send().await?;

        let status = response.status();
        let data_str = response.text().await?;
        log::trace!("Response: {}", data_str);

        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16(), data_str));
        }
        Ok(data_str)
    }
}

/// The URL with the `key` parameter blanked, for logging
pub fn redacted(url: &Url) -> Url {
    let mut url = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "key" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    if !pairs.is_empty() {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
    url
}
