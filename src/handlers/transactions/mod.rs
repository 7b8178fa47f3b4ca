pub mod service;
pub mod transactions;

pub use transactions::get_transactions_handler;
