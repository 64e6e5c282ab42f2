use crate::error::{DashboardError, Result};
use crate::types::{Extreme, FilteredView, Metric, Summary, Unit};

/// Axis/legend unit for a metric: household counts get their own label,
/// everything else is a head count.
pub fn resolve_unit(metric: Metric) -> Unit {
    match metric {
        Metric::Households => Unit::Households,
        Metric::PopulationMale
        | Metric::PopulationFemale
        | Metric::PopulationTotal
        | Metric::InMigrationDomestic
        | Metric::InMigrationInternational
        | Metric::InMigrationTotal
        | Metric::Births
        | Metric::OutMigrationDomestic
        | Metric::OutMigrationInternational
        | Metric::OutMigrationTotal
        | Metric::Deaths => Unit::People,
    }
}

/// Max and min of the view's metric, each with the first region (in view
/// order) that holds it. Missing values are ignored.
///
/// Callers must not pass an empty view; that is reported as `EmptyView`
/// rather than defaulted.
pub fn summarize(view: &FilteredView) -> Result<Summary> {
    if view.is_empty() {
        return Err(DashboardError::EmptyView);
    }

    let mut max: Option<Extreme> = None;
    let mut min: Option<Extreme> = None;
    for row in &view.rows {
        let Some(v) = row.value else { continue };
        // Strict comparisons keep the first occurrence on ties.
        if max.as_ref().map_or(true, |m| v > m.value) {
            max = Some(Extreme {
                region: row.record.region.clone(),
                value: v,
            });
        }
        if min.as_ref().map_or(true, |m| v < m.value) {
            min = Some(Extreme {
                region: row.record.region.clone(),
                value: v,
            });
        }
    }

    match (max, min) {
        (Some(max), Some(min)) => Ok(Summary {
            metric: view.metric,
            max,
            min,
        }),
        _ => Err(DashboardError::NoNumericValues(view.metric)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MetricRow, Record};
    use std::collections::BTreeMap;

    fn view(rows: &[(&str, Option<f64>)]) -> FilteredView {
        FilteredView {
            metric: Metric::PopulationTotal,
            rows: rows
                .iter()
                .map(|(name, value)| MetricRow {
                    record: Record {
                        region: name.to_string(),
                        cells: BTreeMap::new(),
                    },
                    value: *value,
                })
                .collect(),
        }
    }

    #[test]
    fn households_is_the_only_household_unit() {
        for m in Metric::ALL {
            let expected = if m.label().contains("世帯数") {
                Unit::Households
            } else {
                Unit::People
            };
            assert_eq!(resolve_unit(m), expected, "{m}");
        }
        assert_eq!(resolve_unit(Metric::Households).label(), "世帯数（世帯）");
        assert_eq!(resolve_unit(Metric::Deaths).label(), "人口（人）");
    }

    #[test]
    fn ties_pick_the_first_row_in_view_order() {
        // Already sorted: (B,300), (C,300), (A,100).
        let v = view(&[("B", Some(300.0)), ("C", Some(300.0)), ("A", Some(100.0))]);
        let s = summarize(&v).unwrap();
        assert_eq!(s.max.region, "B");
        assert_eq!(s.max.value, 300.0);
        assert_eq!(s.min.region, "A");
        assert_eq!(s.min.value, 100.0);
    }

    #[test]
    fn min_tie_also_picks_the_first() {
        let v = view(&[("X", Some(9.0)), ("Y", Some(1.0)), ("Z", Some(1.0))]);
        let s = summarize(&v).unwrap();
        assert_eq!(s.min.region, "Y");
    }

    #[test]
    fn missing_values_are_ignored() {
        let v = view(&[("A", Some(5.0)), ("B", Some(2.0)), ("C", None)]);
        let s = summarize(&v).unwrap();
        assert_eq!(s.max.region, "A");
        assert_eq!(s.min.region, "B");
    }

    #[test]
    fn single_row_is_both_max_and_min() {
        let s = summarize(&view(&[("A", Some(0.0))])).unwrap();
        assert_eq!(s.max, s.min);
    }

    #[test]
    fn empty_view_is_an_error() {
        assert!(matches!(summarize(&view(&[])), Err(DashboardError::EmptyView)));
    }

    #[test]
    fn all_missing_is_an_error() {
        let v = view(&[("A", None), ("B", None)]);
        assert!(matches!(
            summarize(&v),
            Err(DashboardError::NoNumericValues(Metric::PopulationTotal))
        ));
    }
}
