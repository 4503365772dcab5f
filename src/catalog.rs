use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CaseGenError, Result};

/// Input file extensions accepted by the BEM solver (WAMIT user manual,
/// chapter 4).
pub const DEFAULT_EXTENSIONS: [&str; 12] = [
    "pot", "gdf", "frc", "spl", "wam", "cfg", "ms2", "csf", "bpi", "rao", "dmp", "txt",
];

/// File layout details attached to an analysis type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInformation {
    /// Directory, relative to the run directory, that receives the BEM input
    /// files. `None` writes them directly into the run directory.
    #[serde(default)]
    pub bem_subdirectory: Option<PathBuf>,
}

/// Resolves the file layout for an analysis type.
pub trait FileCatalog {
    fn file_information(&self, analysis_type: &str) -> Result<FileInformation>;
}

/// Catalog backed by an in-memory table, usually loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisCatalog {
    entries: BTreeMap<String, FileInformation>,
}

impl AnalysisCatalog {
    pub fn new(entries: BTreeMap<String, FileInformation>) -> Self {
        Self { entries }
    }

    /// Registers or replaces the layout of an analysis type.
    pub fn insert(&mut self, analysis_type: impl Into<String>, information: FileInformation) {
        self.entries.insert(analysis_type.into(), information);
    }
}

impl FileCatalog for AnalysisCatalog {
    /// The empty analysis type always resolves to the run directory itself.
    fn file_information(&self, analysis_type: &str) -> Result<FileInformation> {
        match self.entries.get(analysis_type) {
            Some(information) => Ok(information.clone()),
            None if analysis_type.is_empty() => Ok(FileInformation::default()),
            None => Err(CaseGenError::UnknownAnalysisType(analysis_type.to_string())),
        }
    }
}

/// Allow-list of template file extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    extensions: BTreeSet<String>,
}

impl ExtensionFilter {
    /// Builds a filter from extensions written with or without a leading dot.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|extension| extension.as_ref().trim_start_matches('.').to_string())
                .filter(|extension| !extension.is_empty())
                .collect(),
        }
    }

    /// Case-sensitive match on the final extension of `path`.
    pub fn allows(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| self.extensions.contains(extension))
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}
