use crate::domain::asset::Asset;
use crate::domain::ports::{AssetStore, TransactionStore};
use crate::domain::transaction::Transaction;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A thread-safe in-memory store for asset metadata, keyed by code.
#[derive(Default, Clone)]
pub struct InMemoryAssetStore {
    assets: Arc<RwLock<HashMap<String, Asset>>>,
}

impl InMemoryAssetStore {
    /// Creates a new, empty in-memory asset store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssetStore for InMemoryAssetStore {
    async fn store(&self, asset: Asset) -> Result<()> {
        asset.check()?;
        let mut assets = self.assets.write().await;
        assets.insert(asset.code.clone(), asset);
        Ok(())
    }

    async fn get(&self, code: &str) -> Result<Option<Asset>> {
        let assets = self.assets.read().await;
        Ok(assets.get(code).cloned())
    }
}

#[derive(Default)]
struct Transactions {
    by_id: HashMap<Uuid, Transaction>,
    /// Insertion order, for stable listing.
    order: Vec<Uuid>,
}

/// A thread-safe in-memory store for transactions.
///
/// Listing preserves the order transactions were first stored in.
#[derive(Default, Clone)]
pub struct InMemoryTransactionStore {
    transactions: Arc<RwLock<Transactions>>,
}

impl InMemoryTransactionStore {
    /// Creates a new, empty in-memory transaction store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn store(&self, tx: Transaction) -> Result<()> {
        let mut transactions = self.transactions.write().await;
        if transactions.by_id.insert(tx.id, tx.clone()).is_none() {
            transactions.order.push(tx.id);
        }
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Transaction>> {
        let transactions = self.transactions.read().await;
        Ok(transactions.by_id.get(&id).cloned())
    }

    async fn for_asset(&self, asset_code: &str) -> Result<Vec<Transaction>> {
        let transactions = self.transactions.read().await;
        Ok(transactions
            .order
            .iter()
            .filter_map(|id| transactions.by_id.get(id))
            .filter(|tx| tx.asset_code == asset_code)
            .cloned()
            .collect())
    }
}
