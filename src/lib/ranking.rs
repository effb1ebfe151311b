use std::cmp::Ordering;

use crate::{
    aggregator::Aggregates,
    catalog::Catalog,
    types::{MonetaryAmount, Quantity, Salesperson},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellerLine {
    pub name: String,
    pub revenue: MonetaryAmount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductLine {
    pub name: String,
    pub price: MonetaryAmount,
    pub quantity: Quantity,
}

/// Larger values first, then names in plain byte order.
fn descending_then_name<T: Ord>(a: (&T, &str), b: (&T, &str)) -> Ordering {
    b.0.cmp(a.0).then_with(|| a.1.cmp(b.1))
}

/// Every revenue bucket, highest revenue first. Keys missing from the roster are shown under
/// a synthesized name and sorted by it like any other.
pub fn rank_sellers(aggregates: &Aggregates, catalog: &Catalog) -> Vec<SellerLine> {
    let mut lines: Vec<SellerLine> = aggregates
        .money_by_seller
        .iter()
        .map(|(key, revenue)| {
            let name = match catalog.salesperson(key) {
                Some(salesperson) => salesperson.full_name(),
                None => Salesperson::synthesized(key).full_name(),
            };
            SellerLine {
                name,
                revenue: *revenue,
            }
        })
        .collect();

    lines.sort_by(|a, b| {
        descending_then_name((&a.revenue, a.name.as_str()), (&b.revenue, b.name.as_str()))
    });
    lines
}

/// Every product with units sold, most units first.
///
/// A product id the catalog does not know is sorted under its raw id but never emitted, since
/// its line would have no price. The scanner already rejects such ids, so this only guards
/// against the two maps disagreeing.
pub fn rank_products(aggregates: &Aggregates, catalog: &Catalog) -> Vec<ProductLine> {
    let mut ranked: Vec<(&str, Quantity, Option<MonetaryAmount>)> = aggregates
        .quantity_by_product
        .iter()
        .map(|(id, quantity)| match catalog.product(id.value()) {
            Some(product) => (product.name.as_str(), *quantity, Some(product.price)),
            None => (id.value(), *quantity, None),
        })
        .collect();

    ranked.sort_by(|a, b| descending_then_name((&a.1, a.0), (&b.1, b.0)));
    ranked
        .into_iter()
        .filter_map(|(name, quantity, price)| {
            price.map(|price| ProductLine {
                name: name.to_string(),
                price,
                quantity,
            })
        })
        .collect()
}
