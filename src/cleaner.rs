use crate::types::{Record, Table, AGGREGATE_MARKER};
use log::{debug, warn};
use std::collections::HashSet;

/// Trim region names and drop the aggregate row and nameless rows.
///
/// The marker is compared after trimming, so a padded ` 合計 ` row is removed
/// too. Must run before any filtering: the grand total would otherwise win
/// every max comparison.
pub fn clean(table: &Table) -> Table {
    let mut aggregate_rows = 0usize;
    let mut blank_rows = 0usize;
    let mut seen: HashSet<&str> = HashSet::new();
    let mut records = Vec::with_capacity(table.len());

    for rec in table.records() {
        let region = rec.region.trim();
        if region == AGGREGATE_MARKER {
            aggregate_rows += 1;
            continue;
        }
        if region.is_empty() {
            blank_rows += 1;
            continue;
        }
        if !seen.insert(region) {
            warn!("duplicate region `{}` in table; keeping every row", region);
        }
        records.push(Record {
            region: region.to_string(),
            cells: rec.cells.clone(),
        });
    }

    debug!(
        "cleaner dropped {} aggregate row(s) and {} blank row(s)",
        aggregate_rows, blank_rows
    );
    Table::new(records)
}
