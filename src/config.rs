// Fixed application settings. The dashboard takes no flags or config file;
// these defaults are what the first run shows before the user changes anything.
use crate::types::Metric;
use std::path::PathBuf;

pub const DEFAULT_CSV_PATH: &str = "2501stjin.csv";
pub const DEFAULT_REGIONS: [&str; 2] = ["東京都", "大阪府"];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub csv_path: PathBuf,
    pub default_regions: Vec<String>,
    pub default_metric: Metric,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            default_regions: DEFAULT_REGIONS.iter().map(|s| s.to_string()).collect(),
            default_metric: Metric::PopulationTotal,
        }
    }
}
