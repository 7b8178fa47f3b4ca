pub mod solscan;

pub use solscan::{SolscanClient, SolscanError};
