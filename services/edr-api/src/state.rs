//! Application state for the EDR API.

use anyhow::{Context, Result};
use edr_protocol::Catalog;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;

use crate::config::EdrConfig;
use crate::dataset::Dataset;

/// Shared application state. Read-only after startup.
pub struct AppState {
    /// Collections and the queries/formats they expose.
    pub catalog: Catalog,

    /// Records served by data queries.
    pub dataset: Dataset,

    /// Base URL for building links.
    pub base_url: String,

    /// Renders `/metrics`; absent when no recorder is installed.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Create state from a catalogue and dataset, validating the dataset.
    pub fn new(catalog: Catalog, dataset: Dataset, base_url: impl Into<String>) -> Result<Self> {
        dataset.validate()?;

        let base_url = base_url.into();
        Ok(Self {
            catalog,
            dataset,
            base_url: base_url.trim_end_matches('/').to_string(),
            prometheus: None,
        })
    }

    /// Load the catalogue from `config_dir` and serve the simulated dataset.
    pub fn from_config_dir(config_dir: impl AsRef<Path>, base_url: impl Into<String>) -> Result<Self> {
        let config_dir = config_dir.as_ref();
        let catalog = EdrConfig::load_from_dir(config_dir)?
            .to_catalog()
            .with_context(|| format!("Failed to build catalogue from {}", config_dir.display()))?;

        tracing::info!(collections = catalog.len(), "EDR catalogue loaded");

        Self::new(catalog, Dataset::simulated(), base_url)
    }

    /// Attach the Prometheus handle used by the metrics endpoint.
    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }
}
