use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tabled::Tabled;

/// Header of the region identifier column.
pub const REGION_COLUMN: &str = "都道府県名";

/// Region name of the grand-total row emitted by the statistics export.
pub const AGGREGATE_MARKER: &str = "合計";

/// The twelve statistics columns of the population table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Metric {
    #[serde(rename = "2025年人口（男）")]
    PopulationMale,
    #[serde(rename = "2025年人口（女）")]
    PopulationFemale,
    #[serde(rename = "2025年人口（計）")]
    PopulationTotal,
    #[serde(rename = "2025年世帯数")]
    Households,
    #[serde(rename = "2024年転入者数（国内）")]
    InMigrationDomestic,
    #[serde(rename = "2024年転入者数（国外）")]
    InMigrationInternational,
    #[serde(rename = "2024年転入者数（計）")]
    InMigrationTotal,
    #[serde(rename = "2024年出生者数")]
    Births,
    #[serde(rename = "2024年転出者数（国内）")]
    OutMigrationDomestic,
    #[serde(rename = "2024年転出者数（国外）")]
    OutMigrationInternational,
    #[serde(rename = "2024年転出者数（計）")]
    OutMigrationTotal,
    #[serde(rename = "2024年死亡者数")]
    Deaths,
}

static METRIC_BY_LABEL: Lazy<HashMap<&'static str, Metric>> =
    Lazy::new(|| Metric::ALL.iter().map(|m| (m.label(), *m)).collect());

impl Metric {
    /// Display order used by the metric picker.
    pub const ALL: [Metric; 12] = [
        Metric::PopulationMale,
        Metric::PopulationFemale,
        Metric::PopulationTotal,
        Metric::Households,
        Metric::InMigrationDomestic,
        Metric::InMigrationInternational,
        Metric::InMigrationTotal,
        Metric::Births,
        Metric::OutMigrationDomestic,
        Metric::OutMigrationInternational,
        Metric::OutMigrationTotal,
        Metric::Deaths,
    ];

    /// Column header exactly as it appears in the export (after trimming).
    pub fn label(self) -> &'static str {
        match self {
            Metric::PopulationMale => "2025年人口（男）",
            Metric::PopulationFemale => "2025年人口（女）",
            Metric::PopulationTotal => "2025年人口（計）",
            Metric::Households => "2025年世帯数",
            Metric::InMigrationDomestic => "2024年転入者数（国内）",
            Metric::InMigrationInternational => "2024年転入者数（国外）",
            Metric::InMigrationTotal => "2024年転入者数（計）",
            Metric::Births => "2024年出生者数",
            Metric::OutMigrationDomestic => "2024年転出者数（国内）",
            Metric::OutMigrationInternational => "2024年転出者数（国外）",
            Metric::OutMigrationTotal => "2024年転出者数（計）",
            Metric::Deaths => "2024年死亡者数",
        }
    }

    pub fn from_label(label: &str) -> Option<Metric> {
        METRIC_BY_LABEL.get(label.trim()).copied()
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the export: the region name and the raw text of each metric
/// cell. Cells stay textual until a metric is selected and coerced.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub region: String,
    pub cells: BTreeMap<Metric, String>,
}

impl Record {
    pub fn cell(&self, metric: Metric) -> Option<&str> {
        self.cells.get(&metric).map(String::as_str)
    }
}

/// The loaded table. Never mutated once built; every stage returns a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted, de-duplicated region names for the region picker.
    pub fn region_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.records.iter().map(|r| r.region.clone()).collect();
        names.sort();
        names.dedup();
        names
    }
}

/// A filtered record paired with its coerced value for the selected metric.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub record: Record,
    pub value: Option<f64>,
}

/// Filtered, coerced and sorted rows for one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    pub metric: Metric,
    pub rows: Vec<MetricRow>,
}

impl FilteredView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Unit {
    #[serde(rename = "世帯数（世帯）")]
    Households,
    #[serde(rename = "人口（人）")]
    People,
}

impl Unit {
    pub fn label(self) -> &'static str {
        match self {
            Unit::Households => "世帯数（世帯）",
            Unit::People => "人口（人）",
        }
    }

    /// Counter word printed after a value in running text.
    pub fn suffix(self) -> &'static str {
        match self {
            Unit::Households => "世帯",
            Unit::People => "人",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extreme {
    pub region: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub metric: Metric,
    pub max: Extreme,
    pub min: Extreme,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub view: FilteredView,
    pub unit: Unit,
    /// `None` when every selected region's value is missing.
    pub summary: Option<Summary>,
}

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Ready(PipelineOutput),
    /// The selection matched no region; charts and summary are skipped.
    NoData,
}

/// Row shape for the console table.
#[derive(Debug, Tabled, Clone)]
pub struct ViewTableRow {
    #[tabled(rename = "順位")]
    pub rank: usize,
    #[tabled(rename = "都道府県")]
    pub region: String,
    #[tabled(rename = "値")]
    pub value: String,
}

/// JSON document handed to external chart renderers.
#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub metric: Metric,
    pub unit: Unit,
    pub unit_label: &'static str,
    pub rows: Vec<ExportRow<'a>>,
    pub summary: Option<&'a Summary>,
}

#[derive(Debug, Serialize)]
pub struct ExportRow<'a> {
    pub region: &'a str,
    pub value: Option<f64>,
}
