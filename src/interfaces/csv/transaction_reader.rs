use crate::domain::transaction::Transaction;
use crate::error::{AnchorError, Result};
use std::io::Read;

/// Streams stored transaction records out of a CSV export.
///
/// The header row names the [`Transaction`] fields; columns may come in any
/// order and optional ones may be left out. Cells are trimmed, and an empty
/// cell is a null value.
pub struct TransactionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> TransactionReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// One item per data row. A row that fails to parse yields an
    /// [`AnchorError::CsvError`] and does not stop the rows after it.
    pub fn transactions(self) -> impl Iterator<Item = Result<Transaction>> {
        self.reader
            .into_deserialize()
            .map(|row| row.map_err(AnchorError::from))
    }
}
