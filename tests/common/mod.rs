use std::io::Write;
use tempfile::NamedTempFile;

pub const TRANSACTION_HEADER: &str = "id,kind,asset_code,status,status_eta,amount_in,amount_out,amount_fee,started_at,completed_at,stellar_transaction_id,external_transaction_id,from_address,to_address,external_extra,external_extra_text,deposit_memo,deposit_memo_type,withdraw_anchor_account,withdraw_memo,withdraw_memo_type,refunded,message";

pub fn csv_file(header: &str, rows: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{header}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}

/// A deposit row for `asset` with only the id and amount_in filled in.
pub fn deposit_row(id: &str, asset: &str, amount_in: &str) -> String {
    format!("{id},deposit,{asset},completed,,{amount_in},,,2024-01-01T00:00:00Z,,,,,,,,,,,,,false,")
}

pub fn parse_lines(stdout: &[u8]) -> Vec<serde_json::Value> {
    String::from_utf8(stdout.to_vec())
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}
