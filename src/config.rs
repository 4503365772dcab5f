use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::{AnalysisCatalog, DEFAULT_EXTENSIONS, ExtensionFilter, FileInformation};
use crate::error::Result;

/// Settings read from the optional JSON configuration file.
///
/// ```json
/// {
///   "extensions": [".pot", ".gdf", ".cfg"],
///   "analysis_types": { "wamit": { "bem_subdirectory": "wamit_run" } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseConfig {
    /// Template extensions copied into the case directory.
    pub extensions: Vec<String>,
    /// Layout of each analysis type.
    pub analysis_types: BTreeMap<String, FileInformation>,
}

impl Default for CaseConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            analysis_types: BTreeMap::new(),
        }
    }
}

impl CaseConfig {
    pub fn catalog(&self) -> AnalysisCatalog {
        AnalysisCatalog::new(self.analysis_types.clone())
    }

    pub fn extension_filter(&self) -> ExtensionFilter {
        ExtensionFilter::new(&self.extensions)
    }
}

/// Loads a configuration file. Missing fields fall back to their defaults.
pub fn load(path: &Path) -> Result<CaseConfig> {
    let source = fs::read_to_string(path)?;
    let config: CaseConfig = serde_json::from_str(&source)?;
    info!(
        path = %path.display(),
        analysis_types = config.analysis_types.len(),
        "loaded configuration"
    );
    Ok(config)
}
