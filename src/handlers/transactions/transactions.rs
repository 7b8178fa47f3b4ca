use std::sync::Arc;

use actix_web::{http::header, http::Method, web, HttpRequest, HttpResponse};
use log::info;

use crate::{
    config::Config, errors::ApiError, handlers::transactions::service::TransactionService,
    services::SolscanClient,
};

/// ANY /solscan - Proxies a wallet transaction query to Solscan
///
/// Only GET is served; every other method yields 405. The checks run in a fixed
/// order: method, `address`, then the provider API key.
///
/// # Arguments
/// * `req` - Inbound request (method and query string)
/// * `config` - Shared configuration holding the Solscan settings
/// * `client` - Shared Solscan client
///
/// # Returns
/// The upstream JSON payload, unmodified, with `Access-Control-Allow-Origin: *`
pub async fn get_transactions_handler(
    req: HttpRequest,
    config: web::Data<Arc<Config>>,
    client: web::Data<SolscanClient>,
) -> Result<HttpResponse, ApiError> {
    if *req.method() != Method::GET {
        info!("Rejecting {} /solscan request", req.method());
        return Err(ApiError::MethodNotAllowed);
    }

    let address = TransactionService::require_address(req.query_string())?;
    info!("Handling GET /solscan request for address: {}", address);

    let api_key = TransactionService::require_api_key(&config.solscan)?;

    // Failures are logged as they convert into `ApiError`
    let payload = client.fetch_transactions(&address, &api_key).await?;

    info!("Successfully retrieved transactions for address: {}", address);
    Ok(HttpResponse::Ok()
        .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .json(payload))
}
