pub mod asset_reader;
pub mod transaction_reader;
