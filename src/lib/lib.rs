mod aggregator;
mod catalog;
mod config;
mod error;
mod io;
mod ranking;
mod scanner;
mod types;
mod utils;

use std::fs;

use log::info;

use aggregator::Aggregates;
use catalog::Catalog;
use io::output_reports;
use ranking::{rank_products, rank_sellers};
use scanner::scan_sales_dir;

pub use config::{Config, ReportKind};
pub use error::{EngineError, RecordError, ReportFailure};

/// Outcome of a run that got as far as writing reports.
#[derive(Debug)]
pub struct RunSummary {
    pub sellers_written: usize,
    pub products_written: usize,
    pub errors: Vec<RecordError>,
    pub failed_reports: Vec<ReportFailure>,
}

impl RunSummary {
    pub fn all_reports_written(&self) -> bool {
        self.failed_reports.is_empty()
    }
}

pub fn process_sales(config: &Config) -> Result<RunSummary, EngineError> {
    fs::create_dir_all(config.output_dir()).map_err(|source| EngineError::OutputDir {
        path: config.output_dir().to_path_buf(),
        source,
    })?;

    let catalog = Catalog::load(&config.products_file(), &config.salesmen_file())?;

    let mut aggregates = Aggregates::default();
    let mut errors = Vec::new();
    scan_sales_dir(&config.sales_dir(), &catalog, &mut aggregates, &mut errors);

    let sellers = rank_sellers(&aggregates, &catalog);
    let products = rank_products(&aggregates, &catalog);
    let failed_reports = output_reports(config, &sellers, &products, &errors);

    info!(
        "{} sellers, {} products, {} malformed records",
        sellers.len(),
        products.len(),
        errors.len()
    );
    Ok(RunSummary {
        sellers_written: sellers.len(),
        products_written: products.len(),
        errors,
        failed_reports,
    })
}
