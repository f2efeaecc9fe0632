use super::forms::{Cleaned, TransactionForm};
use super::presenter::{Representation, TransactionPresenter};
use crate::domain::asset::Asset;
use crate::domain::ports::{AssetStoreBox, TransactionStoreBox};
use crate::error::{AnchorError, Result};
use rust_decimal::Decimal;
use tracing::{debug, warn};
use uuid::Uuid;

/// Resolves assets and transactions from storage and hands them to the
/// validators and the presenter.
pub struct AnchorService {
    asset_store: AssetStoreBox,
    transaction_store: TransactionStoreBox,
    presenter: TransactionPresenter,
}

impl AnchorService {
    /// Creates a new `AnchorService`.
    ///
    /// # Arguments
    ///
    /// * `asset_store` - Asset metadata lookup.
    /// * `transaction_store` - Transaction lookup.
    /// * `presenter` - Presenter carrying the request context for URLs.
    pub fn new(
        asset_store: AssetStoreBox,
        transaction_store: TransactionStoreBox,
        presenter: TransactionPresenter,
    ) -> Self {
        Self {
            asset_store,
            transaction_store,
            presenter,
        }
    }

    async fn asset(&self, code: &str) -> Result<Asset> {
        let asset = self
            .asset_store
            .get(code)
            .await?
            .ok_or_else(|| AnchorError::AssetNotFound(code.to_string()))?;
        debug!(asset = %asset.code, decimals = asset.significant_decimals, "resolved asset");
        Ok(asset)
    }

    /// Cleans a submitted amount for the asset named by `asset_code`.
    ///
    /// An unknown code leaves the form without an asset, which surfaces as
    /// [`AnchorError::MissingAssetContext`].
    pub async fn validate_amount(&self, asset_code: &str, raw: &str) -> Cleaned<Decimal> {
        let asset = self.asset_store.get(asset_code).await?;
        if asset.is_none() {
            warn!(asset = asset_code, "amount submitted for unknown asset");
        }
        let cleaned = TransactionForm::new(asset, raw).clean()?;
        if let Err(errors) = &cleaned {
            debug!(asset = asset_code, %errors, "amount rejected");
        }
        Ok(cleaned)
    }

    /// Looks up one transaction and renders it with its own asset.
    pub async fn transaction(&self, id: Uuid) -> Result<Representation> {
        let tx = self
            .transaction_store
            .get(id)
            .await?
            .ok_or(AnchorError::TransactionNotFound(id))?;
        let asset = self.asset(&tx.asset_code).await?;
        self.presenter.render(&tx, &asset)
    }

    /// Renders every transaction of one asset with a single asset lookup.
    pub async fn transactions_for_asset(&self, asset_code: &str) -> Result<Vec<Representation>> {
        let asset = self.asset(asset_code).await?;
        let transactions = self.transaction_store.for_asset(asset_code).await?;
        debug!(asset = asset_code, count = transactions.len(), "rendering shared-asset batch");
        self.presenter.render_shared(&transactions, &asset)
    }

    /// Renders `ids` in order, resolving each transaction's asset separately.
    pub async fn transactions(&self, ids: &[Uuid]) -> Result<Vec<Representation>> {
        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            out.push(self.transaction(*id).await?);
        }
        Ok(out)
    }
}
