use {
    crate::{
        config::{DASHBOARD, DF},
        domain::LoadKey,
        models::{PriceRecord, PriceSeries},
        utils::AppInstant,
    },
    anyhow::{Context, Result, anyhow},
    std::{
        collections::HashMap,
        path::{Path, PathBuf},
        sync::Arc,
        time::Duration,
    },
};

pub const CSV_HEADERS: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

/// UTF-8 CSV with a header row and no index column.
pub fn encode_csv(series: &PriceSeries) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;
    for record in series.records() {
        writer.serialize(record)?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV buffer: {}", e.error()))
}

pub fn decode_csv(bytes: &[u8]) -> Result<Vec<PriceRecord>> {
    let mut reader = csv::Reader::from_reader(bytes);
    reader
        .deserialize()
        .enumerate()
        .map(|(i, row)| row.with_context(|| format!("Failed to parse CSV row {}", i + 1)))
        .collect()
}

struct CsvEntry {
    bytes: Arc<[u8]>,
    encoded_at: AppInstant,
}

/// Caches encoded exports per load key for a fixed time-to-live.
pub struct CsvExporter {
    ttl: Duration,
    entries: HashMap<LoadKey, CsvEntry>,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::with_ttl(DASHBOARD.csv_ttl)
    }
}

impl CsvExporter {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn export(&mut self, key: &LoadKey, series: &PriceSeries) -> Result<Arc<[u8]>> {
        self.export_at(key, series, AppInstant::now())
    }

    pub(crate) fn export_at(
        &mut self,
        key: &LoadKey,
        series: &PriceSeries,
        now: AppInstant,
    ) -> Result<Arc<[u8]>> {
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.encoded_at) < ttl);

        if let Some(entry) = self.entries.get(key) {
            if DF.log_cache {
                log::info!("CSV cache hit for {}", key);
            }
            return Ok(Arc::clone(&entry.bytes));
        }

        let bytes: Arc<[u8]> = encode_csv(series)
            .with_context(|| format!("Failed to encode CSV for {}", key))?
            .into();
        self.entries.insert(
            *key,
            CsvEntry {
                bytes: Arc::clone(&bytes),
                encoded_at: now,
            },
        );
        Ok(bytes)
    }

    /// Writes the (possibly cached) export to `<dir>/<symbol>.csv`.
    pub fn save(&mut self, dir: &Path, key: &LoadKey, series: &PriceSeries) -> Result<PathBuf> {
        let bytes = self.export(key, series)?;
        let path = dir.join(key.symbol.csv_filename());
        std::fs::write(&path, &*bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{BaseVol, ClosePrice, HighPrice, LowPrice, OpenPrice},
        domain::Symbol,
    };
    use chrono::NaiveDate;

    fn sample_series() -> (LoadKey, PriceSeries) {
        let start = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
        let key = LoadKey::new(Symbol::BtcUsd, start, start + chrono::Duration::days(2));
        let closes = [13_657.2, 14_982.1, 15_201.000_000_1];
        let series = PriceSeries::from_records(
            Symbol::BtcUsd,
            closes.iter().enumerate().map(|(i, &c)| PriceRecord {
                date: start + chrono::Duration::days(i as i64),
                open: OpenPrice::new(c - 100.0),
                high: HighPrice::new(c + 250.5),
                low: LowPrice::new(c - 300.25),
                close: ClosePrice::new(c),
                volume: BaseVol::new(1_234.5678 * (i + 1) as f64),
            }),
        );
        (key, series)
    }

    #[test]
    fn csv_has_header_and_no_index_column() {
        let (_, series) = sample_series();
        let text = String::from_utf8(encode_csv(&series).unwrap()).unwrap();
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some("Date,Open,High,Low,Close,Volume"));
        let first = lines.next().unwrap();
        assert!(first.starts_with("2018-01-01,"));
        assert_eq!(first.split(',').count(), 6);
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn decoding_reconstructs_the_table() {
        let (_, series) = sample_series();
        let decoded = decode_csv(&encode_csv(&series).unwrap()).unwrap();

        assert_eq!(decoded.len(), series.len());
        assert_eq!(PriceSeries::from_records(Symbol::BtcUsd, decoded), series);
    }

    #[test]
    fn empty_series_still_has_headers() {
        let bytes = encode_csv(&PriceSeries::empty(Symbol::EthUsd)).unwrap();
        assert_eq!(bytes, b"Date,Open,High,Low,Close,Volume\n");
        assert!(decode_csv(&bytes).unwrap().is_empty());
    }

    #[test]
    fn exports_are_reused_within_the_ttl() {
        let (key, series) = sample_series();
        let mut exporter = CsvExporter::with_ttl(Duration::from_secs(60));
        let t0 = AppInstant::now();

        let first = exporter.export_at(&key, &series, t0).unwrap();
        let again = exporter
            .export_at(&key, &series, t0 + Duration::from_secs(59))
            .unwrap();

        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(exporter.len(), 1);
    }

    #[test]
    fn expired_exports_are_re_encoded() {
        let (key, series) = sample_series();
        let mut exporter = CsvExporter::with_ttl(Duration::from_secs(60));
        let t0 = AppInstant::now();

        let first = exporter.export_at(&key, &series, t0).unwrap();
        let later = exporter
            .export_at(&key, &series, t0 + Duration::from_secs(61))
            .unwrap();

        assert!(!Arc::ptr_eq(&first, &later));
        assert_eq!(first, later);
    }

    #[test]
    fn save_writes_symbol_named_file() {
        let (key, series) = sample_series();
        let dir = std::env::temp_dir().join(format!("csv_export_test_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let mut exporter = CsvExporter::default();

        let path = exporter.save(&dir, &key, &series).unwrap();

        assert_eq!(path, dir.join("BTC-USD.csv"));
        let written = std::fs::read(&path).unwrap();
        assert_eq!(decode_csv(&written).unwrap().len(), 3);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let (key, series) = sample_series();
        let dir = std::env::temp_dir().join("csv_export_test_missing").join("nested");
        assert!(CsvExporter::default().save(&dir, &key, &series).is_err());
    }

    #[test]
    fn default_ttl_is_one_day() {
        assert_eq!(CsvExporter::default().ttl, Duration::from_secs(86_400));
    }
}
