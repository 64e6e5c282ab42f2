use crate::cleaner::clean;
use crate::error::{DashboardError, Result};
use crate::types::{Metric, Record, Table, REGION_COLUMN};
use csv::ReaderBuilder;
use encoding_rs::SHIFT_JIS;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub parse_errors: usize,
    pub kept_rows: usize,
}

/// Column positions resolved from the trimmed header row.
struct ColumnIndex {
    region: usize,
    metrics: Vec<(Metric, usize)>,
}

impl ColumnIndex {
    fn resolve(headers: &[String]) -> Result<Self> {
        let find = |label: &str| {
            headers
                .iter()
                .position(|h| h == label)
                .ok_or_else(|| DashboardError::MissingColumn(label.to_string()))
        };
        let region = find(REGION_COLUMN)?;
        let metrics = Metric::ALL
            .iter()
            .map(|m| find(m.label()).map(|idx| (*m, idx)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { region, metrics })
    }
}

/// Read the export at `path` into a raw `Table`.
///
/// The file is CP932 (Shift_JIS) encoded; header labels are trimmed because
/// the export pads them inconsistently. Region names and cells are left as-is
/// for the cleaner and coercer.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<(Table, LoadReport)> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(DashboardError::MissingFile(path.to_path_buf()));
    }
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DashboardError::MissingFile(path.to_path_buf()),
        _ => DashboardError::Io(e),
    })?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    parse_table(&bytes)
}

/// Decode and parse an in-memory export.
pub fn parse_table(bytes: &[u8]) -> Result<(Table, LoadReport)> {
    let (text, encoding, had_errors) = SHIFT_JIS.decode(bytes);
    if had_errors {
        warn!(
            "input contained byte sequences invalid in {}; replaced with U+FFFD",
            encoding.name()
        );
    }

    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let columns = ColumnIndex::resolve(&headers)?;

    let mut total_rows = 0usize;
    let mut parse_errors = 0usize;
    let mut records = Vec::new();

    for result in rdr.records() {
        total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping malformed row {}: {}", total_rows, e);
                parse_errors += 1;
                continue;
            }
        };
        let region = row.get(columns.region).unwrap_or_default().to_string();
        let cells: BTreeMap<Metric, String> = columns
            .metrics
            .iter()
            .map(|(m, idx)| (*m, row.get(*idx).unwrap_or_default().to_string()))
            .collect();
        records.push(Record { region, cells });
    }

    let report = LoadReport {
        total_rows,
        parse_errors,
        kept_rows: records.len(),
    };
    Ok((Table::new(records), report))
}

/// Load the export and strip the aggregate row in one step.
pub fn load_and_clean<P: AsRef<Path>>(path: P) -> Result<(Table, LoadReport)> {
    let (raw, mut report) = load_table(path)?;
    let table = clean(&raw);
    report.kept_rows = table.len();
    info!(
        "loaded {} rows ({} kept, {} malformed)",
        report.total_rows, report.kept_rows, report.parse_errors
    );
    Ok((table, report))
}
