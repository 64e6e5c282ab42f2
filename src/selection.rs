use crate::config::AppConfig;
use crate::types::Metric;
use std::collections::BTreeSet;

/// User input for one pipeline run. Built fresh by the menu loop and passed
/// by reference; the pipeline never stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub regions: BTreeSet<String>,
    pub metric: Metric,
}

impl Selection {
    pub fn new<I, S>(regions: I, metric: Metric) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            regions: regions.into_iter().map(Into::into).collect(),
            metric,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.default_regions.iter().cloned(), config.default_metric)
    }

    pub fn with_regions<I, S>(&self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(regions, self.metric)
    }

    pub fn with_metric(&self, metric: Metric) -> Self {
        Self {
            regions: self.regions.clone(),
            metric,
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}
