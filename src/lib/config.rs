use std::{
    ffi::OsString,
    fmt,
    path::{Path, PathBuf},
};

const DEFAULT_INPUT_DIR: &str = "input";
const DEFAULT_OUTPUT_DIR: &str = "output";

const PRODUCTS_FILE: &str = "products.csv";
const SALESMEN_FILE: &str = "salesmen_info.csv";
const SALES_DIR: &str = "sales";
const SELLERS_REPORT: &str = "sellers_report.csv";
const PRODUCTS_REPORT: &str = "products_by_quantity.csv";
const ERROR_LOG: &str = "processing_errors.log";

/// Where a run reads its inputs and writes its reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR)
    }
}

impl Config {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    /// `[INPUT_DIR] [OUTPUT_DIR]`, both optional.
    pub fn from_args<I: IntoIterator<Item = OsString>>(args: I) -> Self {
        let mut args = args.into_iter();
        let input_dir = args
            .next()
            .map_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR), PathBuf::from);
        let output_dir = args
            .next()
            .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), PathBuf::from);
        Self {
            input_dir,
            output_dir,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn products_file(&self) -> PathBuf {
        self.input_dir.join(PRODUCTS_FILE)
    }

    pub fn salesmen_file(&self) -> PathBuf {
        self.input_dir.join(SALESMEN_FILE)
    }

    pub fn sales_dir(&self) -> PathBuf {
        self.input_dir.join(SALES_DIR)
    }

    pub fn report_path(&self, report: ReportKind) -> PathBuf {
        self.output_dir.join(report.file_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Sellers,
    Products,
    ErrorLog,
}

impl ReportKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            ReportKind::Sellers => SELLERS_REPORT,
            ReportKind::Products => PRODUCTS_REPORT,
            ReportKind::ErrorLog => ERROR_LOG,
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportKind::Sellers => "sellers report",
            ReportKind::Products => "products report",
            ReportKind::ErrorLog => "error log",
        };
        f.write_str(name)
    }
}
