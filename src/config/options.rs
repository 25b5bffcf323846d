// src/config/options.rs
use std::path::{Path, PathBuf};

use super::consts::*;

/// Everything one pipeline run needs. Built by the caller (CLI, GUI, tests)
/// and handed to `pipeline::run`; nothing here is read from globals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineOptions {
    pub input: InputSource,
    pub output: OutputPaths,
    pub format: ExportFormat,
    pub date_policy: DatePolicy,
    /// Remove player files in `players_dir` that this run did not produce.
    pub prune_stale: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            input: InputSource::parse(DEFAULT_INPUT_PATTERN),
            output: OutputPaths::default(),
            format: ExportFormat::Csv,
            date_policy: DatePolicy::Drop,
            prune_stale: false,
        }
    }
}

impl PipelineOptions {
    /// Switch output format, keeping a default-named table file in step.
    pub fn set_format(&mut self, fmt: ExportFormat) {
        let table = &mut self.output.table_file;
        let is_default_stem = table
            .file_stem()
            .map(|s| s == DEFAULT_TABLE_FILE)
            .unwrap_or(false);
        if is_default_stem {
            table.set_extension(fmt.ext());
        }
        self.format = fmt;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputSource {
    Path(PathBuf),
    /// `*` / `?` wildcards in the file-name component only.
    Pattern(String),
}

impl InputSource {
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let name = Path::new(text)
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if name.contains('*') || name.contains('?') {
            InputSource::Pattern(s!(text))
        } else {
            InputSource::Path(PathBuf::from(text))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            InputSource::Path(p) => p.display().to_string(),
            InputSource::Pattern(p) => p.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPaths {
    pub table_file: PathBuf,
    pub players_dir: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self::under(Path::new(DEFAULT_OUT_DIR), ExportFormat::Csv)
    }
}

impl OutputPaths {
    pub fn under(dir: &Path, fmt: ExportFormat) -> Self {
        Self {
            table_file: dir.join(join!(DEFAULT_TABLE_FILE, ".", fmt.ext())),
            players_dir: dir.join(DEFAULT_PLAYERS_SUBDIR),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> u8 {
        match self { ExportFormat::Csv => b',', ExportFormat::Tsv => b'\t' }
    }
    pub fn from_ext(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "tsv" => Some(ExportFormat::Tsv),
            _ => None,
        }
    }
}

/// What to do with a row whose date does not parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DatePolicy {
    /// Drop the row and count it.
    #[default]
    Drop,
    /// Fail the transform stage.
    Abort,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_in_file_name_means_pattern() {
        assert_eq!(
            InputSource::parse("data/raw/2025_*.csv"),
            InputSource::Pattern(s!("data/raw/2025_*.csv"))
        );
        assert_eq!(
            InputSource::parse("data/raw/2025.csv"),
            InputSource::Path(PathBuf::from("data/raw/2025.csv"))
        );
    }

    #[test]
    fn set_format_renames_default_table_only() {
        let mut opts = PipelineOptions::default();
        opts.set_format(ExportFormat::Tsv);
        assert!(opts.output.table_file.to_string_lossy().ends_with("cleaned_data.tsv"));

        let mut opts = PipelineOptions::default();
        opts.output.table_file = PathBuf::from("out/custom.data");
        opts.set_format(ExportFormat::Tsv);
        assert!(opts.output.table_file.to_string_lossy().ends_with("custom.data"));
    }
}
