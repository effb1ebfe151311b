use std::{fs, io, path::Path};

use csv::StringRecord;
use log::{debug, info, warn};

use crate::{
    aggregator::Aggregates,
    catalog::Catalog,
    error::RecordError,
    io::line_reader,
    types::{Product, Quantity, QuantityError, SellerKey},
    utils::{field, field_count, split_line},
};

const HEADER_FIELDS: usize = 2;
const ITEM_FIELDS: usize = 2;

/// Scans every regular file directly inside `dir`.
///
/// A missing directory holds no sales. Enumeration order is whatever the platform returns, so
/// only the order of `errors` depends on it; the totals do not.
pub fn scan_sales_dir(
    dir: &Path,
    catalog: &Catalog,
    aggregates: &mut Aggregates,
    errors: &mut Vec<RecordError>,
) {
    if !dir.is_dir() {
        info!("no sales directory at {}", dir.display());
        return;
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("cannot list {}: {}", dir.display(), e);
            errors.push(RecordError::Unreadable {
                file: dir.to_path_buf(),
            });
            return;
        }
    };

    for entry in entries {
        match entry {
            Ok(entry) => {
                let path = entry.path();
                if path.is_file() {
                    scan_sales_file(&path, catalog, aggregates, errors);
                }
            }
            Err(e) => {
                warn!("cannot inspect entry of {}: {}", dir.display(), e);
                errors.push(RecordError::Unreadable {
                    file: dir.to_path_buf(),
                });
            }
        }
    }
}

/// Folds one sales file into `aggregates`. Malformed lines become records in `errors`;
/// the rest of the file is still processed.
pub fn scan_sales_file(
    path: &Path,
    catalog: &Catalog,
    aggregates: &mut Aggregates,
    errors: &mut Vec<RecordError>,
) {
    let unreadable = |e: io::Error| {
        warn!("cannot read {}: {}", path.display(), e);
        RecordError::Unreadable {
            file: path.to_path_buf(),
        }
    };

    let mut lines = match line_reader(path) {
        Ok(lines) => lines,
        Err(e) => {
            errors.push(unreadable(e));
            return;
        }
    };

    // the first line is the header even when it is blank
    let header = match lines.next() {
        Some(Ok(header)) => split_line(&header),
        Some(Err(e)) => {
            errors.push(unreadable(e));
            return;
        }
        None => {
            errors.push(RecordError::EmptyFile {
                file: path.to_path_buf(),
            });
            return;
        }
    };
    if field_count(&header) < HEADER_FIELDS {
        errors.push(RecordError::InvalidHeader {
            file: path.to_path_buf(),
        });
        return;
    }
    let seller = SellerKey::new(field(&header, 0), field(&header, 1));
    aggregates.open_seller(&seller);
    debug!("scanning {} for {}", path.display(), seller);

    for (idx, raw) in lines.enumerate() {
        let raw = match raw {
            Ok(raw) => raw,
            Err(e) => {
                errors.push(unreadable(e));
                return;
            }
        };
        // the header is line 1
        let line = idx as u64 + 2;
        let record = split_line(&raw);
        let outcome = parse_line_item(&record, path, line, catalog).and_then(|(product, qty)| {
            aggregates
                .record_item(&seller, product, qty)
                .map_err(|_| RecordError::AmountOverflow {
                    file: path.to_path_buf(),
                    line,
                })
        });
        if let Err(err) = outcome {
            debug!("{}", err);
            errors.push(err);
        }
    }
}

fn parse_line_item<'c>(
    record: &StringRecord,
    file: &Path,
    line: u64,
    catalog: &'c Catalog,
) -> Result<(&'c Product, Quantity), RecordError> {
    if field_count(record) < ITEM_FIELDS {
        return Err(RecordError::InvalidLine {
            file: file.to_path_buf(),
            line,
        });
    }
    let quantity = Quantity::parse(field(record, 1)).map_err(|e| match e {
        QuantityError::NotANumber => RecordError::InvalidQuantity {
            file: file.to_path_buf(),
            line,
        },
        QuantityError::NotPositive => RecordError::NonPositiveQuantity {
            file: file.to_path_buf(),
            line,
        },
    })?;
    let product_id = field(record, 0);
    let product = catalog
        .product(product_id)
        .ok_or_else(|| RecordError::UnknownProduct {
            file: file.to_path_buf(),
            product: product_id.to_string(),
            line,
        })?;
    Ok((product, quantity))
}
