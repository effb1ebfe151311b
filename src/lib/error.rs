use std::{io, path::PathBuf};

use thiserror::Error;

use crate::config::ReportKind;

/// Failures that abort the whole run before any report is written.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to load catalog {}: {source}", .path.display())]
    Catalog {
        path: PathBuf,
        source: csv::Error,
    },

    #[error("failed to create output directory {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        source: io::Error,
    },
}

/// A malformed sales file or line. Recorded and skipped, never fatal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("error reading {}", .file.display())]
    Unreadable { file: PathBuf },

    #[error("{}: empty", .file.display())]
    EmptyFile { file: PathBuf },

    #[error("{}: invalid header", .file.display())]
    InvalidHeader { file: PathBuf },

    #[error("{}: line {line} invalid", .file.display())]
    InvalidLine { file: PathBuf, line: u64 },

    #[error("{}: invalid quantity at line {line}", .file.display())]
    InvalidQuantity { file: PathBuf, line: u64 },

    #[error("{}: quantity <=0 at line {line}", .file.display())]
    NonPositiveQuantity { file: PathBuf, line: u64 },

    #[error("{}: product does not exist {product} line {line}", .file.display())]
    UnknownProduct {
        file: PathBuf,
        product: String,
        line: u64,
    },

    #[error("{}: amount overflow at line {line}", .file.display())]
    AmountOverflow { file: PathBuf, line: u64 },
}

/// One report that could not be written. The other reports are unaffected.
#[derive(Debug, Error)]
#[error("failed to write {report} to {}: {source}", .path.display())]
pub struct ReportFailure {
    pub report: ReportKind,
    pub path: PathBuf,
    pub source: io::Error,
}
