pub mod services;
pub mod transaction_store;
pub mod utils;

pub use transaction_store::{TransactionStore, SCHEMA_VERSION, STORAGE_KEY};
