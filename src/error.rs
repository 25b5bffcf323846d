// src/error.rs
use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Pipeline stage a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extract,
    Transform,
    Persist,
    Load,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Extract => write!(f, "extract"),
            Stage::Transform => write!(f, "transform"),
            Stage::Persist => write!(f, "persist"),
            Stage::Load => write!(f, "load"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{stage}: {path}: {source}")]
    Io {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{stage}: {path}: {source}")]
    Csv {
        stage: Stage,
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("extract: {path}: missing required column(s): {}", .columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },

    #[error("extract: no files match {pattern}")]
    NoInput { pattern: String },

    #[error("transform: {}: unparseable date {value:?}", location(.path, .line))]
    BadDate { path: Option<PathBuf>, line: usize, value: String },

    #[error("persist: path exists but is not a directory: {0}")]
    NotADirectory(PathBuf),
}

impl Error {
    pub fn io(stage: Stage, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io { stage, path: path.into(), source }
    }

    pub fn csv(stage: Stage, path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Error::Csv { stage, path: path.into(), source }
    }

    pub fn stage(&self) -> Stage {
        match self {
            Error::Io { stage, .. } | Error::Csv { stage, .. } => *stage,
            Error::MissingColumns { .. } | Error::NoInput { .. } => Stage::Extract,
            Error::BadDate { .. } => Stage::Transform,
            Error::NotADirectory(_) => Stage::Persist,
        }
    }
}

/// "file.csv:7", or "line 7" for rows read from memory.
fn location(path: &Option<PathBuf>, line: &usize) -> String {
    match path {
        Some(p) => format!("{}:{line}", p.display()),
        None => format!("line {line}"),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
