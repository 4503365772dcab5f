use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::catalog::{AnalysisCatalog, ExtensionFilter, FileCatalog};
use crate::error::Result;
use crate::model::VariableSource;
use crate::substitute::{contains_marker, substitute_line};

/// One template file together with its substituted contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFile {
    /// File name without its directory, kept byte for byte.
    pub file_name: OsString,
    /// Template lines, each keeping its line terminator.
    pub original: Vec<String>,
    /// Lines after substitution, aligned with `original`.
    pub substituted: Vec<String>,
}

impl CaseFile {
    /// Substituted file contents, ready to be written.
    pub fn contents(&self) -> String {
        self.substituted.concat()
    }
}

/// Reads a template file and substitutes every line carrying a marker.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub fn change_case_file(path: &Path, variables: &VariableSource) -> Result<CaseFile> {
    let text = fs::read_to_string(path)?;
    let display_name = path.display().to_string();
    let original: Vec<String> = text.split_inclusive('\n').map(str::to_string).collect();

    let substituted = original
        .iter()
        .enumerate()
        .map(|(index, line)| {
            if contains_marker(line) {
                substitute_line(line, variables, &display_name, index + 1)
            } else {
                Ok(line.clone())
            }
        })
        .collect::<Result<Vec<_>>>()?;

    let file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| OsString::from(display_name));

    Ok(CaseFile {
        file_name,
        original,
        substituted,
    })
}

/// Returns the substituted contents of a single template file.
pub fn render_file(path: &Path, variables: &VariableSource) -> Result<String> {
    change_case_file(path, variables).map(|case| case.contents())
}

/// Writes a substituted copy of every allow-listed template into `target_dir`.
///
/// Templates are processed in file-name order. The first failing template
/// aborts the pass; files written before it are left in place.
#[instrument(
    level = "info",
    skip_all,
    fields(template_dir = %template_dir.display(), target_dir = %target_dir.display())
)]
pub fn write_case_files(
    template_dir: &Path,
    target_dir: &Path,
    variables: &VariableSource,
    filter: &ExtensionFilter,
) -> Result<Vec<PathBuf>> {
    let mut templates = Vec::new();
    for entry in fs::read_dir(template_dir)? {
        let path = entry?.path();
        // Follows symlinks so linked shared templates are picked up.
        if !path.is_file() {
            continue;
        }
        if filter.allows(&path) {
            templates.push(path);
        } else {
            debug!(path = %path.display(), "skipping file outside the extension allow-list");
        }
    }
    templates.sort();

    fs::create_dir_all(target_dir)?;

    let mut written = Vec::with_capacity(templates.len());
    for template in &templates {
        let case = change_case_file(template, variables)?;
        let destination = target_dir.join(&case.file_name);
        fs::write(&destination, case.contents())?;
        debug!(path = %destination.display(), "wrote case file");
        written.push(destination);
    }

    info!(file_count = written.len(), "case files written");
    Ok(written)
}

/// Generates case files for one analysis type.
///
/// The catalog decides whether files land in `base_dir` itself or in its BEM
/// subdirectory. The process working directory is never touched.
#[derive(Debug, Clone, Default)]
pub struct CaseGenerator<C = AnalysisCatalog> {
    catalog: C,
    filter: ExtensionFilter,
}

impl<C: FileCatalog> CaseGenerator<C> {
    pub fn new(catalog: C, filter: ExtensionFilter) -> Self {
        Self { catalog, filter }
    }

    /// Directory receiving the case files of `analysis_type` under `base_dir`.
    pub fn target_dir(&self, base_dir: &Path, analysis_type: &str) -> Result<PathBuf> {
        let information = self.catalog.file_information(analysis_type)?;
        Ok(match information.bem_subdirectory {
            Some(subdirectory) => base_dir.join(subdirectory),
            None => base_dir.to_path_buf(),
        })
    }

    #[instrument(
        level = "info",
        skip_all,
        fields(
            template_dir = %template_dir.display(),
            base_dir = %base_dir.display(),
            analysis_type
        )
    )]
    pub fn generate(
        &self,
        template_dir: &Path,
        base_dir: &Path,
        variables: &VariableSource,
        analysis_type: &str,
    ) -> Result<Vec<PathBuf>> {
        let target_dir = self.target_dir(base_dir, analysis_type)?;
        info!(
            target_dir = %target_dir.display(),
            variable_count = variables.len(),
            "generating case files"
        );
        write_case_files(template_dir, &target_dir, variables, &self.filter)
    }
}
