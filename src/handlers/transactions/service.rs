use log::debug;
use url::form_urlencoded;

use crate::{config::SolscanConfig, errors::ApiError};

/// Service layer for the transaction proxy
pub struct TransactionService;

impl TransactionService {
    /// Extract the wallet address from a raw query string
    ///
    /// A repeated `address` is kept and its values are joined with `,`. The address
    /// counts as missing only when no value is non-empty.
    ///
    /// # Arguments
    /// * `query_string` - Raw query string of the inbound request
    ///
    /// # Returns
    /// * `Ok(String)` - The address, verbatim
    /// * `Err(ApiError::MissingParameter)` - No usable address
    pub fn require_address(query_string: &str) -> Result<String, ApiError> {
        let values: Vec<String> = form_urlencoded::parse(query_string.as_bytes())
            .filter(|(key, _)| key == "address")
            .map(|(_, value)| value.into_owned())
            .collect();

        if values.len() > 1 {
            debug!("Query carries {} address values", values.len());
        }

        if values.iter().all(|value| value.is_empty()) {
            return Err(ApiError::MissingParameter(
                "Wallet address is required".to_string(),
            ));
        }

        Ok(values.join(","))
    }

    /// Resolve the provider API key for this request
    ///
    /// # Returns
    /// * `Ok(String)` - Configured key
    /// * `Err(ApiError::Misconfiguration)` - Key absent or empty
    pub fn require_api_key(config: &SolscanConfig) -> Result<String, ApiError> {
        config.resolve_api_key().ok_or_else(|| {
            ApiError::Misconfiguration("Solscan API key is not configured".to_string())
        })
    }
}
