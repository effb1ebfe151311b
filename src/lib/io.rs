use std::{
    fs::{self, File},
    io::{self, BufRead, BufReader, BufWriter, Lines, Write},
    path::Path,
};

use ::serde::{Serialize, Serializer};
use log::{debug, error};

use crate::{
    config::{Config, ReportKind},
    error::{RecordError, ReportFailure},
    ranking::{ProductLine, SellerLine},
    types::MonetaryAmount,
};

const DELIMITER: u8 = b';';

/// Reader for the `;`-separated input files: no header row, no quoting, ragged rows allowed.
pub fn semicolon_reader(path: &Path) -> csv::Result<csv::Reader<File>> {
    csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_path(path)
}

/// Raw lines of a sales file. Unlike `semicolon_reader` blank lines are kept, since they count
/// towards line numbers and are reported as invalid.
pub fn line_reader(path: &Path) -> io::Result<Lines<BufReader<File>>> {
    File::open(path).map(|file| BufReader::new(file).lines())
}

fn semicolon_writer<W: Write>(out: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out)
}

fn two_decimals<S: Serializer>(x: &MonetaryAmount, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&x.to_report_string())
}

#[derive(Debug, Serialize)]
struct SellerRowEntity<'a> {
    name: &'a str,
    #[serde(serialize_with = "two_decimals")]
    revenue: MonetaryAmount,
}

impl<'a> SellerRowEntity<'a> {
    fn from_line(line: &'a SellerLine) -> Self {
        Self {
            name: &line.name,
            revenue: line.revenue,
        }
    }
}

#[derive(Debug, Serialize)]
struct ProductRowEntity<'a> {
    name: &'a str,
    #[serde(serialize_with = "two_decimals")]
    price: MonetaryAmount,
    quantity: u64,
}

impl<'a> ProductRowEntity<'a> {
    fn from_line(line: &'a ProductLine) -> Self {
        Self {
            name: &line.name,
            price: line.price,
            quantity: line.quantity.value(),
        }
    }
}

pub fn output_sellers<W: Write>(out: W, sellers: &[SellerLine]) -> io::Result<()> {
    let mut wtr = semicolon_writer(out);
    for seller in sellers {
        wtr.serialize(SellerRowEntity::from_line(seller))?;
    }
    wtr.flush()
}

pub fn output_products<W: Write>(out: W, products: &[ProductLine]) -> io::Result<()> {
    let mut wtr = semicolon_writer(out);
    for product in products {
        wtr.serialize(ProductRowEntity::from_line(product))?;
    }
    wtr.flush()
}

pub fn output_errors<W: Write>(out: W, errors: &[RecordError]) -> io::Result<()> {
    let mut wtr = BufWriter::new(out);
    for err in errors {
        writeln!(wtr, "{}", err)?;
    }
    wtr.flush()
}

fn write_file<F>(path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(File) -> io::Result<()>,
{
    let file = File::create(path)?;
    write(file)
}

fn remove_stale(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Writes every report independently and returns the ones that failed.
///
/// The error log is only written when there is something in it. A log left over from an
/// earlier run is removed otherwise, so that its absence still means a clean run.
pub fn output_reports(
    config: &Config,
    sellers: &[SellerLine],
    products: &[ProductLine],
    errors: &[RecordError],
) -> Vec<ReportFailure> {
    let outcomes = [
        (
            ReportKind::Sellers,
            write_file(&config.report_path(ReportKind::Sellers), |f| {
                output_sellers(f, sellers)
            }),
        ),
        (
            ReportKind::Products,
            write_file(&config.report_path(ReportKind::Products), |f| {
                output_products(f, products)
            }),
        ),
        (
            ReportKind::ErrorLog,
            if errors.is_empty() {
                remove_stale(&config.report_path(ReportKind::ErrorLog))
            } else {
                write_file(&config.report_path(ReportKind::ErrorLog), |f| {
                    output_errors(f, errors)
                })
            },
        ),
    ];

    outcomes
        .into_iter()
        .filter_map(|(report, outcome)| match outcome {
            Ok(()) => {
                debug!("wrote {}", report);
                None
            }
            Err(source) => {
                let failure = ReportFailure {
                    report,
                    path: config.report_path(report),
                    source,
                };
                error!("{}", failure);
                Some(failure)
            }
        })
        .collect()
}
