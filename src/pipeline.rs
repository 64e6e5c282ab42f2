// Selection-driven derivation: filter → coerce → sort → unit → summary.
//
// Each run is a pure function of `(Table, Selection)`; the menu loop calls it
// again from scratch whenever the selection changes.
use crate::error::{DashboardError, Result};
use crate::loader::load_and_clean;
use crate::reports::{resolve_unit, summarize};
use crate::selection::Selection;
use crate::types::{FilteredView, Metric, MetricRow, Outcome, PipelineOutput, Record, Table};
use crate::util::parse_f64_safe;
use log::{debug, warn};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::path::Path;

/// Records whose region is in `regions`, in their original order.
pub fn filter_regions(records: &[Record], regions: &BTreeSet<String>) -> Vec<Record> {
    records
        .iter()
        .filter(|r| regions.contains(&r.region))
        .cloned()
        .collect()
}

/// Pair every record with its parsed value for `metric`. Unparseable cells
/// become `None`; no other column is read.
pub fn coerce_metric(records: Vec<Record>, metric: Metric) -> Vec<MetricRow> {
    records
        .into_iter()
        .map(|record| {
            let value = parse_f64_safe(record.cell(metric));
            if value.is_none() {
                debug!(
                    "{}: `{}` is not numeric for {}",
                    record.region,
                    record.cell(metric).unwrap_or_default(),
                    metric
                );
            }
            MetricRow { record, value }
        })
        .collect()
}

fn descending_missing_last(a: &Option<f64>, b: &Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.partial_cmp(x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable descending sort; missing values go to the end.
pub fn sort_descending(rows: &mut [MetricRow]) {
    rows.sort_by(|a, b| descending_missing_last(&a.value, &b.value));
}

/// Filter, coerce and sort in one go.
pub fn build_view(records: &[Record], selection: &Selection) -> FilteredView {
    let filtered = filter_regions(records, &selection.regions);
    let mut rows = coerce_metric(filtered, selection.metric);
    sort_descending(&mut rows);
    FilteredView {
        metric: selection.metric,
        rows,
    }
}

/// Run the derivation over an already cleaned table.
///
/// An empty selection result short-circuits to `Outcome::NoData` before the
/// summary is attempted.
pub fn run(table: &Table, selection: &Selection) -> Result<Outcome> {
    let view = build_view(table.records(), selection);
    if view.is_empty() {
        warn!(
            "selection of {} region(s) matched no rows",
            selection.regions.len()
        );
        return Ok(Outcome::NoData);
    }

    let unit = resolve_unit(selection.metric);
    let summary = match summarize(&view) {
        Ok(s) => Some(s),
        Err(DashboardError::NoNumericValues(m)) => {
            warn!("no numeric values for {} in the selected regions", m);
            None
        }
        Err(e) => return Err(e),
    };
    debug!(
        "view has {} row(s) for {} (unit {})",
        view.len(),
        selection.metric,
        unit.label()
    );
    Ok(Outcome::Ready(PipelineOutput {
        view,
        unit,
        summary,
    }))
}

/// Load, clean and run. A missing file stops here with `MissingFile`.
pub fn run_from_path<P: AsRef<Path>>(path: P, selection: &Selection) -> Result<Outcome> {
    let (table, _) = load_and_clean(path)?;
    run(&table, selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::tests::{sample_csv, write_cp932};
    use crate::types::Unit;
    use std::collections::BTreeMap;

    fn rec(name: &str, total: &str) -> Record {
        let mut cells = BTreeMap::new();
        cells.insert(Metric::PopulationTotal, total.to_string());
        cells.insert(Metric::Households, "10".to_string());
        Record {
            region: name.to_string(),
            cells,
        }
    }

    fn regions(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn names(view: &FilteredView) -> Vec<&str> {
        view.rows.iter().map(|r| r.record.region.as_str()).collect()
    }

    #[test]
    fn filter_preserves_table_order() {
        let records = vec![rec("C", "1"), rec("A", "2"), rec("B", "3")];
        let out = filter_regions(&records, &regions(&["B", "C"]));
        let got: Vec<&str> = out.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(got, vec!["C", "B"]);
    }

    #[test]
    fn filter_without_overlap_is_empty() {
        let records = vec![rec("A", "1")];
        assert!(filter_regions(&records, &regions(&["Z"])).is_empty());
        assert!(filter_regions(&records, &BTreeSet::new()).is_empty());
    }

    #[test]
    fn coercion_turns_junk_into_missing_and_leaves_other_cells() {
        let records = vec![rec("A", "x"), rec("B", " 1,200 "), rec("C", "")];
        let rows = coerce_metric(records.clone(), Metric::PopulationTotal);
        let values: Vec<Option<f64>> = rows.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![None, Some(1200.0), None]);
        for (row, original) in rows.iter().zip(&records) {
            assert_eq!(&row.record, original);
        }
    }

    #[test]
    fn sort_is_descending_stable_and_missing_last() {
        let records = vec![
            rec("A", "100"),
            rec("N1", "-"),
            rec("B", "300"),
            rec("C", "300"),
            rec("N2", ""),
            rec("D", "50"),
        ];
        let sel = Selection::new(["A", "B", "C", "D", "N1", "N2"], Metric::PopulationTotal);
        let view = build_view(&records, &sel);

        assert_eq!(names(&view), vec!["B", "C", "A", "D", "N1", "N2"]);
        let present: Vec<f64> = view.rows.iter().filter_map(|r| r.value).collect();
        assert!(present.windows(2).all(|w| w[0] >= w[1]));
        let first_missing = view.rows.iter().position(|r| r.value.is_none()).unwrap();
        assert!(view.rows[first_missing..].iter().all(|r| r.value.is_none()));
    }

    #[test]
    fn rebuilding_a_view_from_its_own_rows_is_identity() {
        let records = vec![rec("A", "7"), rec("B", "junk"), rec("C", "9"), rec("D", "7")];
        let sel = Selection::new(["A", "B", "C", "D"], Metric::PopulationTotal);
        let once = build_view(&records, &sel);
        let records_in_view: Vec<Record> = once.rows.iter().map(|r| r.record.clone()).collect();
        let twice = build_view(&records_in_view, &sel);
        assert_eq!(once, twice);
    }

    #[test]
    fn end_to_end_two_regions() {
        let table = Table::new(vec![rec("A", "50"), rec("B", "80")]);
        let sel = Selection::new(["A", "B"], Metric::PopulationTotal);
        let Outcome::Ready(out) = run(&table, &sel).unwrap() else {
            panic!("expected data");
        };
        assert_eq!(names(&out.view), vec!["B", "A"]);
        assert_eq!(out.view.rows[0].value, Some(80.0));
        assert_eq!(out.unit, Unit::People);
        assert_eq!(out.unit.label(), "人口（人）");
        let summary = out.summary.unwrap();
        assert_eq!((summary.max.region.as_str(), summary.max.value), ("B", 80.0));
        assert_eq!((summary.min.region.as_str(), summary.min.value), ("A", 50.0));
    }

    #[test]
    fn household_metric_uses_household_unit() {
        let table = Table::new(vec![rec("A", "50")]);
        let sel = Selection::new(["A"], Metric::Households);
        let Outcome::Ready(out) = run(&table, &sel).unwrap() else {
            panic!("expected data");
        };
        assert_eq!(out.unit, Unit::Households);
        assert_eq!(out.summary.unwrap().max.value, 10.0);
    }

    #[test]
    fn empty_selection_is_no_data() {
        let table = Table::new(vec![rec("A", "50"), rec("B", "80")]);
        let sel = Selection::new(["Z"], Metric::PopulationTotal);
        assert_eq!(run(&table, &sel).unwrap(), Outcome::NoData);
    }

    #[test]
    fn all_missing_values_keep_the_view_but_drop_the_summary() {
        let table = Table::new(vec![rec("A", "…"), rec("B", "")]);
        let sel = Selection::new(["A", "B"], Metric::PopulationTotal);
        let Outcome::Ready(out) = run(&table, &sel).unwrap() else {
            panic!("expected data");
        };
        assert_eq!(out.view.len(), 2);
        assert!(out.summary.is_none());
    }

    #[test]
    fn missing_file_stops_the_pipeline() {
        let err = run_from_path("no/such/2501stjin.csv", &Selection::default()).unwrap_err();
        assert!(matches!(err, DashboardError::MissingFile(_)));
    }

    #[test]
    fn run_from_path_excludes_the_grand_total() {
        let file = write_cp932(&sample_csv(&[
            ("合計", "124000000"),
            ("東京都", "14000000"),
            ("大阪府", "8800000"),
            ("京都府", "2500000"),
        ]));
        let sel = Selection::new(["東京都", "大阪府", "合計"], Metric::PopulationTotal);
        let Outcome::Ready(out) = run_from_path(file.path(), &sel).unwrap() else {
            panic!("expected data");
        };
        assert_eq!(names(&out.view), vec!["東京都", "大阪府"]);
        let summary = out.summary.unwrap();
        assert_eq!(summary.max.region, "東京都");
        assert_eq!(summary.min.region, "大阪府");
    }
}
