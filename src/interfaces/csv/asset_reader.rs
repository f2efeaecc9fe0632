use crate::domain::asset::Asset;
use crate::error::{AnchorError, Result};
use std::io::Read;

/// Reads asset metadata from CSV.
///
/// Columns: `code, issuer, significant_decimals, deposit_min_amount,
/// deposit_max_amount`. Each record is checked with [`Asset::check`].
pub struct AssetReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> AssetReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    pub fn assets(self) -> impl Iterator<Item = Result<Asset>> {
        self.reader.into_deserialize().map(|result| -> Result<Asset> {
            let asset: Asset = result.map_err(AnchorError::from)?;
            asset.check()?;
            Ok(asset)
        })
    }
}
