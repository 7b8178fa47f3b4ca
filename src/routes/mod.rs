pub mod routes;
pub mod transactions;

pub use routes::*;
