use super::context::RenderContext;
use crate::domain::asset::Asset;
use crate::domain::transaction::{Transaction, TransactionKind};
use crate::error::{AnchorError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Client-facing form of a [`Transaction`].
///
/// Keys serialize in the order declared here. Amounts are decimal strings with
/// exactly the asset's `significant_decimals` fractional digits and are left
/// out entirely when the stored value is null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Representation {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub status: String,
    pub status_eta: Option<i64>,
    #[serde(
        serialize_with = "rust_decimal::serde::str_option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount_in: Option<Decimal>,
    #[serde(
        serialize_with = "rust_decimal::serde::str_option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount_out: Option<Decimal>,
    #[serde(
        serialize_with = "rust_decimal::serde::str_option::serialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount_fee: Option<Decimal>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub stellar_transaction_id: Option<String>,
    pub external_transaction_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub external_extra: Option<String>,
    pub external_extra_text: Option<String>,
    #[serde(flatten)]
    pub kind_fields: KindFields,
    pub more_info_url: String,
    pub refunded: bool,
    pub message: Option<String>,
}

/// Memo and account fields valid for the transaction's kind.
///
/// A deposit can only carry the deposit pair and a withdrawal only the
/// withdrawal triple, so the other kind's keys never reach the output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum KindFields {
    Deposit {
        deposit_memo: Option<String>,
        deposit_memo_type: Option<String>,
    },
    Withdrawal {
        withdraw_anchor_account: Option<String>,
        withdraw_memo: Option<String>,
        withdraw_memo_type: Option<String>,
    },
}

impl KindFields {
    fn of(tx: &Transaction) -> Self {
        match tx.kind {
            TransactionKind::Deposit => Self::Deposit {
                deposit_memo: tx.deposit_memo.clone(),
                deposit_memo_type: tx.deposit_memo_type.clone(),
            },
            TransactionKind::Withdrawal => Self::Withdrawal {
                withdraw_anchor_account: tx.withdraw_anchor_account.clone(),
                withdraw_memo: tx.withdraw_memo.clone(),
                withdraw_memo_type: tx.withdraw_memo_type.clone(),
            },
        }
    }
}

/// Builds [`Representation`]s.
///
/// The context is optional so that a presenter created without request data
/// fails at render time with [`AnchorError::MissingRenderContext`].
#[derive(Debug, Clone, Default)]
pub struct TransactionPresenter {
    context: Option<RenderContext>,
}

impl TransactionPresenter {
    pub fn new(context: Option<RenderContext>) -> Self {
        Self { context }
    }

    pub fn with_context(context: RenderContext) -> Self {
        Self::new(Some(context))
    }

    /// Renders one transaction with the asset it references.
    ///
    /// Fails with [`AnchorError::AssetMismatch`] if `asset` is not the
    /// transaction's asset.
    pub fn render(&self, tx: &Transaction, asset: &Asset) -> Result<Representation> {
        check_asset(tx, asset)?;
        self.build(tx, asset)
    }

    /// Renders each transaction with its own resolved asset.
    pub fn render_batch<'a, I>(&self, items: I) -> Result<Vec<Representation>>
    where
        I: IntoIterator<Item = (&'a Transaction, &'a Asset)>,
    {
        items
            .into_iter()
            .map(|(tx, asset)| self.render(tx, asset))
            .collect()
    }

    /// Renders many transactions against one shared asset.
    ///
    /// Every transaction must reference `asset`; the whole batch is checked
    /// before anything is rendered and the first stranger is reported.
    pub fn render_shared(
        &self,
        transactions: &[Transaction],
        asset: &Asset,
    ) -> Result<Vec<Representation>> {
        if let Some(stranger) = transactions.iter().find(|tx| !asset.same_asset(&tx.asset_code)) {
            return Err(mismatch(stranger, asset));
        }
        transactions.iter().map(|tx| self.build(tx, asset)).collect()
    }

    fn build(&self, tx: &Transaction, asset: &Asset) -> Result<Representation> {
        let context = self
            .context
            .as_ref()
            .ok_or(AnchorError::MissingRenderContext)?;
        let round = |amount: Option<Decimal>| amount.map(|value| asset.round(value)).transpose();

        Ok(Representation {
            id: tx.id,
            kind: tx.kind,
            status: tx.status.clone(),
            status_eta: tx.status_eta,
            amount_in: round(tx.amount_in)?,
            amount_out: round(tx.amount_out)?,
            amount_fee: round(tx.amount_fee)?,
            started_at: tx.started_at,
            completed_at: tx.completed_at,
            stellar_transaction_id: tx.stellar_transaction_id.clone(),
            external_transaction_id: tx.external_transaction_id.clone(),
            from: tx.from_address.clone(),
            to: tx.to_address.clone(),
            external_extra: tx.external_extra.clone(),
            external_extra_text: tx.external_extra_text.clone(),
            kind_fields: KindFields::of(tx),
            more_info_url: context.more_info_url(tx.id),
            refunded: tx.refunded,
            message: tx.message.clone(),
        })
    }
}

fn check_asset(tx: &Transaction, asset: &Asset) -> Result<()> {
    if asset.same_asset(&tx.asset_code) {
        Ok(())
    } else {
        Err(mismatch(tx, asset))
    }
}

fn mismatch(tx: &Transaction, asset: &Asset) -> AnchorError {
    AnchorError::AssetMismatch {
        expected: asset.code.clone(),
        found: tx.asset_code.clone(),
        transaction: tx.id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::Value;

    fn usd() -> Asset {
        Asset::new("USD", 2, dec!(10), dec!(1000)).unwrap()
    }

    fn presenter() -> TransactionPresenter {
        TransactionPresenter::with_context(
            RenderContext::new("https://anchor.example.com", "/transaction/more_info").unwrap(),
        )
    }

    fn deposit() -> Transaction {
        let mut tx = Transaction::new(TransactionKind::Deposit, "USD");
        tx.amount_in = Some(dec!(100.125));
        tx.amount_out = Some(dec!(99.135));
        tx.amount_fee = Some(dec!(1));
        tx.from_address = Some("GSENDER".to_string());
        tx.to_address = Some("GRECEIVER".to_string());
        tx.deposit_memo = Some("12345".to_string());
        tx.deposit_memo_type = Some("id".to_string());
        tx.withdraw_memo = Some("leaked".to_string());
        tx.withdraw_anchor_account = Some("GANCHOR".to_string());
        tx
    }

    fn to_json(rep: &Representation) -> Value {
        serde_json::to_value(rep).unwrap()
    }

    #[test]
    fn test_deposit_drops_withdrawal_fields() {
        let json = to_json(&presenter().render(&deposit(), &usd()).unwrap());
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("withdraw_memo"));
        assert!(!obj.contains_key("withdraw_memo_type"));
        assert!(!obj.contains_key("withdraw_anchor_account"));
        assert_eq!(obj["deposit_memo"], "12345");
        assert_eq!(obj["deposit_memo_type"], "id");
    }

    #[test]
    fn test_withdrawal_drops_deposit_fields() {
        let mut tx = deposit();
        tx.kind = TransactionKind::Withdrawal;
        let json = to_json(&presenter().render(&tx, &usd()).unwrap());
        let obj = json.as_object().unwrap();
        assert!(!obj.contains_key("deposit_memo"));
        assert!(!obj.contains_key("deposit_memo_type"));
        assert_eq!(obj["withdraw_memo"], "leaked");
        assert_eq!(obj["withdraw_anchor_account"], "GANCHOR");
        assert!(obj["withdraw_memo_type"].is_null());
    }

    #[test]
    fn test_amounts_rounded_as_strings() {
        let json = to_json(&presenter().render(&deposit(), &usd()).unwrap());
        assert_eq!(json["amount_in"], "100.12");
        assert_eq!(json["amount_out"], "99.14");
        assert_eq!(json["amount_fee"], "1.00");
    }

    #[test]
    fn test_null_amount_is_omitted() {
        let mut tx = deposit();
        tx.amount_fee = None;
        let json = to_json(&presenter().render(&tx, &usd()).unwrap());
        assert!(!json.as_object().unwrap().contains_key("amount_fee"));
        assert_eq!(json["amount_in"], "100.12");
    }

    #[test]
    fn test_zero_amount_is_kept() {
        let mut tx = deposit();
        tx.amount_fee = Some(dec!(0));
        let json = to_json(&presenter().render(&tx, &usd()).unwrap());
        assert_eq!(json["amount_fee"], "0.00");
    }

    #[test]
    fn test_unrepresentable_amount_fails() {
        let asset = Asset::new("USD", 7, dec!(0), dec!(1000)).unwrap();
        let mut tx = deposit();
        tx.amount_in = Some(dec!(12345678901234567890123));
        let result = presenter().render(&tx, &asset);
        assert!(matches!(
            result,
            Err(AnchorError::PrecisionOverflow { decimals: 7, .. })
        ));
    }

    #[test]
    fn test_addresses_renamed() {
        let json = to_json(&presenter().render(&deposit(), &usd()).unwrap());
        let obj = json.as_object().unwrap();
        assert_eq!(obj["from"], "GSENDER");
        assert_eq!(obj["to"], "GRECEIVER");
        assert!(!obj.contains_key("from_address"));
        assert!(!obj.contains_key("to_address"));
        assert!(!obj.contains_key("asset_code"));
    }

    #[test]
    fn test_key_order() {
        let tx = deposit();
        let body = serde_json::to_string(&presenter().render(&tx, &usd()).unwrap()).unwrap();
        let keys = [
            "\"id\"",
            "\"kind\"",
            "\"status\"",
            "\"status_eta\"",
            "\"amount_in\"",
            "\"amount_out\"",
            "\"amount_fee\"",
            "\"started_at\"",
            "\"completed_at\"",
            "\"stellar_transaction_id\"",
            "\"external_transaction_id\"",
            "\"from\"",
            "\"to\"",
            "\"external_extra\"",
            "\"external_extra_text\"",
            "\"deposit_memo\"",
            "\"deposit_memo_type\"",
            "\"more_info_url\"",
            "\"refunded\"",
            "\"message\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| body.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{body}");
    }

    #[test]
    fn test_more_info_url() {
        let tx = deposit();
        let rep = presenter().render(&tx, &usd()).unwrap();
        assert_eq!(
            rep.more_info_url,
            format!("https://anchor.example.com/transaction/more_info?id={}", tx.id)
        );
    }

    #[test]
    fn test_missing_context() {
        let result = TransactionPresenter::default().render(&deposit(), &usd());
        assert!(matches!(result, Err(AnchorError::MissingRenderContext)));
    }

    #[test]
    fn test_render_is_deterministic() {
        let tx = deposit();
        let p = presenter();
        let first = serde_json::to_string(&p.render(&tx, &usd()).unwrap()).unwrap();
        let second = serde_json::to_string(&p.render(&tx, &usd()).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_shared_matches_per_transaction() {
        let txs: Vec<Transaction> = (0..5)
            .map(|i| {
                let mut tx = deposit();
                tx.amount_in = Some(Decimal::new(10_005 + i, 3));
                tx
            })
            .collect();
        let asset = usd();
        let p = presenter();

        let shared = p.render_shared(&txs, &asset).unwrap();
        let assets: Vec<Asset> = txs.iter().map(|_| usd()).collect();
        let each = p.render_batch(txs.iter().zip(assets.iter())).unwrap();
        assert_eq!(
            serde_json::to_string(&shared).unwrap(),
            serde_json::to_string(&each).unwrap()
        );
    }

    #[test]
    fn test_shared_rejects_mixed_assets() {
        let mut txs = vec![deposit(), deposit()];
        txs[1].asset_code = "EUR".to_string();
        let stranger = txs[1].id;

        let result = presenter().render_shared(&txs, &usd());
        match result {
            Err(AnchorError::AssetMismatch {
                expected,
                found,
                transaction,
            }) => {
                assert_eq!(expected, "USD");
                assert_eq!(found, "EUR");
                assert_eq!(transaction, stranger);
            }
            other => panic!("expected asset mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_render_rejects_foreign_asset() {
        let eur = Asset::new("EUR", 2, dec!(0), dec!(10)).unwrap();
        let result = presenter().render(&deposit(), &eur);
        assert!(matches!(result, Err(AnchorError::AssetMismatch { .. })));
    }
}
