use super::asset::Asset;
use super::transaction::Transaction;
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Asset lookup by code.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn store(&self, asset: Asset) -> Result<()>;
    async fn get(&self, code: &str) -> Result<Option<Asset>>;
}

/// Transaction lookup by id or by asset.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn store(&self, tx: Transaction) -> Result<()>;
    async fn get(&self, id: Uuid) -> Result<Option<Transaction>>;
    /// All transactions for `asset_code`, oldest first.
    async fn for_asset(&self, asset_code: &str) -> Result<Vec<Transaction>>;
}

pub type AssetStoreBox = Box<dyn AssetStore>;
pub type TransactionStoreBox = Box<dyn TransactionStore>;
