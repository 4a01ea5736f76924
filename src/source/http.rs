//! Log objects served over plain HTTP(S).
//!
//! Works against any endpoint that speaks the S3 REST API path-style:
//! `GET {endpoint}/{bucket}?list-type=2&prefix=...` to list and
//! `GET {endpoint}/{bucket}/{key}` to download. Requests are unsigned, so
//! the bucket must be readable anonymously or sit behind a signing proxy.

use super::{LogSource, SourceBlob};
use crate::utils::config::DEFAULT_HTTP_TIMEOUT;
use crate::utils::error::SourceError;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;

static LIST_KEY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<Key>([^<]*)</Key>").expect("Valid listing key pattern"));

static LIST_TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<NextContinuationToken>([^<]*)</NextContinuationToken>")
        .expect("Valid continuation token pattern")
});

/// One page of a ListObjectsV2 response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    /// Object keys on this page, in response order
    pub keys: Vec<String>,

    /// Token for the next page, absent on the last one
    pub next_token: Option<String>,
}

/// Blocking HTTP client for the log objects under a prefix
pub struct HttpObjectSource {
    client: Client,
    endpoint: String,
    bucket: String,
    prefix: String,
    keys: Vec<String>,
}

impl HttpObjectSource {
    /// Create a new HTTP source that lists the bucket by prefix
    ///
    /// # Arguments
    /// * `endpoint` - Base URL, e.g. `https://s3.us-west-1.amazonaws.com`
    /// * `bucket` - Bucket holding the access logs
    /// * `prefix` - Only keys starting with this prefix are fetched
    pub fn new(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(SourceError::RequestFailed)?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            bucket: bucket.into(),
            prefix: prefix.into(),
            keys: Vec::new(),
        })
    }

    /// Fetch these keys instead of listing the bucket
    ///
    /// The prefix still applies. An empty list restores listing.
    pub fn with_keys(mut self, keys: Vec<String>) -> Self {
        self.keys = keys;
        self
    }

    /// URL of a single object
    pub fn object_url(&self, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.endpoint,
            self.bucket,
            key.trim_start_matches('/')
        )
    }

    /// Every key under the prefix, either listed or taken from the override
    pub fn selected_keys(&self) -> Result<Vec<String>, SourceError> {
        if self.keys.is_empty() {
            return self.list_keys();
        }

        Ok(self
            .keys
            .iter()
            .filter(|key| key.starts_with(&self.prefix))
            .cloned()
            .collect())
    }

    /// Page through ListObjectsV2 until no continuation token comes back
    ///
    /// **Private** - internal helper for selected_keys
    fn list_keys(&self) -> Result<Vec<String>, SourceError> {
        let url = format!("{}/{}", self.endpoint, self.bucket);
        let mut keys = Vec::new();
        let mut token: Option<String> = None;

        loop {
            let mut query = vec![("list-type", "2"), ("prefix", self.prefix.as_str())];
            if let Some(token) = &token {
                query.push(("continuation-token", token.as_str()));
            }

            debug!("LIST {} {:?}", url, query);
            let body = self.get_text(self.client.get(&url).query(&query), &url)?;
            let page = parse_list_page(&body);
            keys.extend(page.keys);

            match page.next_token {
                Some(next) if token.as_deref() == Some(next.as_str()) => {
                    warn!("Listing returned the same continuation token twice; stopping");
                    break;
                }
                Some(next) => token = Some(next),
                None => break,
            }
        }

        debug!("Listed {} object(s) under '{}'", keys.len(), self.prefix);
        Ok(keys)
    }

    /// Send a request and read the body as text
    ///
    /// **Private** - shared by listing and object downloads
    fn get_text(
        &self,
        request: reqwest::blocking::RequestBuilder,
        url: &str,
    ) -> Result<String, SourceError> {
        let response = request.send().map_err(SourceError::RequestFailed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().map_err(SourceError::RequestFailed)?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

impl LogSource for HttpObjectSource {
    fn describe(&self) -> String {
        format!("bucket {} at {} (prefix '{}')", self.bucket, self.endpoint, self.prefix)
    }

    fn fetch_blobs(&self) -> Result<Vec<SourceBlob>, SourceError> {
        info!(
            "Reading from bucket {} with prefix: {}",
            self.bucket, self.prefix
        );

        let mut blobs = Vec::new();
        for key in self.selected_keys()? {
            let url = self.object_url(&key);
            debug!("GET {}", url);
            let contents = self.get_text(self.client.get(&url), &url)?;
            blobs.push(SourceBlob::new(key, contents));
        }

        if blobs.is_empty() {
            info!("No log objects matched prefix '{}'", self.prefix);
        }

        Ok(blobs)
    }
}

/// Pull the keys and continuation token out of a ListObjectsV2 body
///
/// Only `<Key>` inside `<Contents>` carries a key in this response, so the
/// elements are matched directly.
pub fn parse_list_page(xml: &str) -> ListPage {
    let keys = LIST_KEY_REGEX
        .captures_iter(xml)
        .map(|caps| unescape_xml(&caps[1]))
        .collect();

    let next_token = LIST_TOKEN_REGEX
        .captures(xml)
        .map(|caps| unescape_xml(&caps[1]))
        .filter(|token| !token.is_empty());

    ListPage { keys, next_token }
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
