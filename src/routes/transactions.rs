use actix_web::web;

use crate::handlers::transactions::get_transactions_handler;

pub fn configure_transaction_routes(cfg: &mut web::ServiceConfig) {
    // Every method reaches the handler so non-GET requests get the JSON 405 body
    cfg.route("/solscan", web::route().to(get_transactions_handler));
}
