use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

/// A stored anchor transaction, read-only to this crate.
///
/// Amounts are kept at storage precision; rounding happens at render time.
/// `status`, memo types and the external fields are passed through as-is.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    /// Code of the [`Asset`](super::asset::Asset) this transaction moves.
    pub asset_code: String,
    pub status: String,
    pub status_eta: Option<i64>,
    pub amount_in: Option<Decimal>,
    pub amount_out: Option<Decimal>,
    pub amount_fee: Option<Decimal>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub stellar_transaction_id: Option<String>,
    pub external_transaction_id: Option<String>,
    pub from_address: Option<String>,
    pub to_address: Option<String>,
    pub external_extra: Option<String>,
    pub external_extra_text: Option<String>,
    pub deposit_memo: Option<String>,
    pub deposit_memo_type: Option<String>,
    pub withdraw_anchor_account: Option<String>,
    pub withdraw_memo: Option<String>,
    pub withdraw_memo_type: Option<String>,
    /// A missing column or an empty cell both read as `false`.
    #[serde(default, deserialize_with = "empty_as_false")]
    pub refunded: bool,
    pub message: Option<String>,
}

fn empty_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

impl Transaction {
    /// A bare transaction with every optional field empty.
    pub fn new(kind: TransactionKind, asset_code: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            asset_code: asset_code.into(),
            status: "pending_user_transfer_start".to_string(),
            status_eta: None,
            amount_in: None,
            amount_out: None,
            amount_fee: None,
            started_at: Utc::now(),
            completed_at: None,
            stellar_transaction_id: None,
            external_transaction_id: None,
            from_address: None,
            to_address: None,
            external_extra: None,
            external_extra_text: None,
            deposit_memo: None,
            deposit_memo_type: None,
            withdraw_anchor_account: None,
            withdraw_memo: None,
            withdraw_memo_type: None,
            refunded: false,
            message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_transaction_deserialization() {
        let csv = "id,kind,asset_code,status,status_eta,amount_in,amount_out,amount_fee,started_at,completed_at,stellar_transaction_id,external_transaction_id,from_address,to_address,external_extra,external_extra_text,deposit_memo,deposit_memo_type,withdraw_anchor_account,withdraw_memo,withdraw_memo_type,refunded,message\n\
            5f0c1e7a-3b6e-4a59-9d53-8f0be1c2a9d4,deposit,USD,completed,,100.1234,99.1234,1,2024-01-02T03:04:05Z,,,,,GABC,,,memo,text,,,,false,";
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(csv.as_bytes());
        let mut iter = reader.deserialize();

        let result: Transaction = iter
            .next()
            .unwrap()
            .expect("Failed to deserialize transaction");
        assert_eq!(result.kind, TransactionKind::Deposit);
        assert_eq!(result.asset_code, "USD");
        assert_eq!(result.amount_in, Some(dec!(100.1234)));
        assert_eq!(result.status_eta, None);
        assert_eq!(result.to_address.as_deref(), Some("GABC"));
        assert_eq!(result.deposit_memo.as_deref(), Some("memo"));
        assert_eq!(result.message, None);
        assert!(!result.refunded);
    }

    #[test]
    fn test_empty_refunded_reads_false() {
        let csv = "id,kind,asset_code,status,started_at,refunded\n\
            5f0c1e7a-3b6e-4a59-9d53-8f0be1c2a9d4,withdrawal,USD,completed,2024-01-02T03:04:05Z,\n\
            6a1d2f8b-4c7f-4b6a-8e64-9a1cf2d3b0e5,withdrawal,USD,refunded,2024-01-02T03:04:05Z,true";
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(csv.as_bytes());
        let rows: Vec<Transaction> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .expect("Failed to deserialize transactions");

        assert!(!rows[0].refunded);
        assert!(rows[1].refunded);
        assert_eq!(rows[0].amount_in, None);
    }

    #[test]
    fn test_kind_rejects_unknown() {
        let parsed: Result<TransactionKind, _> = serde_json::from_str("\"dispute\"");
        assert!(parsed.is_err());
    }
}
