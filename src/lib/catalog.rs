use std::path::Path;

use csv::StringRecord;
use im::HashMap;
use log::{info, warn};

use crate::{
    error::EngineError,
    io::semicolon_reader,
    types::{MonetaryAmount, Product, ProductId, Salesperson, SellerKey},
    utils::{field, field_count},
};

const PRODUCT_FIELDS: usize = 3;
const SALESPERSON_FIELDS: usize = 4;

/// Reference data shared by every sales file: products by id, salespeople by composite key.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    products: HashMap<ProductId, Product>,
    salesmen: HashMap<SellerKey, Salesperson>,
}

impl Catalog {
    pub fn new(
        products: HashMap<ProductId, Product>,
        salesmen: HashMap<SellerKey, Salesperson>,
    ) -> Self {
        Self { products, salesmen }
    }

    pub fn load(products_path: &Path, salesmen_path: &Path) -> Result<Self, EngineError> {
        let products = load_products(products_path)?;
        let salesmen = load_salesmen(salesmen_path)?;
        info!(
            "catalog loaded: {} products, {} salespeople",
            products.len(),
            salesmen.len()
        );
        Ok(Self::new(products, salesmen))
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }

    pub fn salesperson(&self, key: &SellerKey) -> Option<&Salesperson> {
        self.salesmen.get(key)
    }
}

fn parse_product(record: &StringRecord) -> Option<Product> {
    if field_count(record) < PRODUCT_FIELDS {
        return None;
    }
    let price = MonetaryAmount::parse(field(record, 2))?;
    if price.is_negative() {
        return None;
    }
    Some(Product {
        id: ProductId::new(field(record, 0)),
        name: field(record, 1).to_string(),
        price,
    })
}

fn parse_salesperson(record: &StringRecord) -> Option<Salesperson> {
    if field_count(record) < SALESPERSON_FIELDS {
        return None;
    }
    Some(Salesperson {
        doc_type: field(record, 0).to_string(),
        doc_number: field(record, 1).to_string(),
        first_names: field(record, 2).to_string(),
        last_names: field(record, 3).to_string(),
    })
}

/// Reads a whole catalog file, keeping the rows `parse` accepts. Later rows replace earlier
/// ones with the same key. Only failing to read the file is an error.
fn load_table<K, V, P, F>(path: &Path, parse: P, key_of: F) -> Result<HashMap<K, V>, EngineError>
where
    K: std::hash::Hash + Eq + Clone,
    V: Clone,
    P: Fn(&StringRecord) -> Option<V>,
    F: Fn(&V) -> K,
{
    let fatal = |source| EngineError::Catalog {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = semicolon_reader(path).map_err(fatal)?;

    let mut table = HashMap::new();
    for row in reader.records() {
        let record = row.map_err(fatal)?;
        match parse(&record) {
            Some(value) => {
                table.insert(key_of(&value), value);
            }
            None => warn!(
                "{}: skipping {:?}",
                path.display(),
                record.iter().collect::<Vec<_>>().join(";")
            ),
        }
    }
    Ok(table)
}

pub fn load_products(path: &Path) -> Result<HashMap<ProductId, Product>, EngineError> {
    load_table(path, parse_product, |p: &Product| p.id.clone())
}

pub fn load_salesmen(path: &Path) -> Result<HashMap<SellerKey, Salesperson>, EngineError> {
    load_table(path, parse_salesperson, Salesperson::key)
}
