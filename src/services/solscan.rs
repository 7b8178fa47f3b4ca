use std::fmt;
use std::time::Duration;

use anyhow::Context;
use hyper::ext::ReasonPhrase;
use log::debug;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::SolscanConfig;

const TRANSACTIONS_PATH: &str = "v2/account/transactions";

/// Page size sent with every transactions request
pub const PAGE_LIMIT: u32 = 100;

/// Characters left as-is by JavaScript's `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Reason phrase of an upstream status; renders as ` - <text>` or nothing when empty
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusText(pub String);

impl StatusText {
    /// Prefer the phrase the upstream actually sent over the canonical one
    pub fn resolve(status: StatusCode, phrase: Option<&ReasonPhrase>) -> Self {
        let text = match phrase {
            Some(phrase) => String::from_utf8_lossy(phrase.as_bytes()).into_owned(),
            None => status.canonical_reason().unwrap_or_default().to_string(),
        };
        StatusText(text)
    }
}

impl From<&str> for StatusText {
    fn from(text: &str) -> Self {
        StatusText(text.to_string())
    }
}

impl fmt::Display for StatusText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            Ok(())
        } else {
            write!(f, " - {}", self.0)
        }
    }
}

#[derive(Debug, Error)]
pub enum SolscanError {
    #[error("{0}")]
    Request(reqwest::Error),

    #[error("Solscan API error: {status}{reason}")]
    Status { status: u16, reason: StatusText },

    #[error("{0}")]
    Decode(reqwest::Error),

    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Thin client over the Solscan account transactions endpoint
#[derive(Debug, Clone)]
pub struct SolscanClient {
    client: Client,
    base_url: Url,
}

impl SolscanClient {
    pub fn new(config: &SolscanConfig) -> anyhow::Result<Self> {
        config.validate()?;

        // A trailing slash keeps `join` from replacing the last path segment
        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .with_context(|| format!("Invalid Solscan base URL '{}'", config.base_url))?;

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .context("Failed to build Solscan HTTP client")?;

        Ok(Self { client, base_url })
    }

    /// Build the transactions URL for `address`
    ///
    /// # Arguments
    /// * `address` - Wallet address, percent-encoded like `encodeURIComponent`
    ///
    /// # Returns
    /// `{base}/v2/account/transactions?address=<address>&limit=100`
    pub fn transactions_url(&self, address: &str) -> Result<Url, url::ParseError> {
        let mut url = self.base_url.join(TRANSACTIONS_PATH)?;
        // `url` still escapes `'` in http(s) queries
        url.set_query(Some(&format!(
            "address={}&limit={}",
            utf8_percent_encode(address, URI_COMPONENT),
            PAGE_LIMIT
        )));
        Ok(url)
    }

    /// Fetch the latest transactions of a wallet
    ///
    /// Issues exactly one GET; the parsed body is returned as-is.
    ///
    /// # Arguments
    /// * `address` - Wallet address
    /// * `api_key` - Provider key, sent as a bearer token
    ///
    /// # Returns
    /// * `Ok(Value)` - JSON payload from Solscan
    /// * `Err(SolscanError)` - Network failure, non-success status or malformed JSON
    pub async fn fetch_transactions(
        &self,
        address: &str,
        api_key: &str,
    ) -> Result<Value, SolscanError> {
        let url = self.transactions_url(address)?;
        debug!("Requesting {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(SolscanError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SolscanError::Status {
                status: status.as_u16(),
                reason: StatusText::resolve(
                    status,
                    response.extensions().get::<ReasonPhrase>(),
                ),
            });
        }

        response.json::<Value>().await.map_err(SolscanError::Decode)
    }
}
