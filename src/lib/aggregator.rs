use im::HashMap;
use thiserror::Error;

use crate::{
    types::{MonetaryAmount, Product, ProductId, Quantity, SellerKey},
    utils::OrDefault,
};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("revenue does not fit in a decimal")]
pub struct AmountOverflow;

/// Running totals for one run: revenue per salesperson and units per product.
#[derive(Debug, Default, Clone)]
pub struct Aggregates {
    pub(crate) money_by_seller: HashMap<SellerKey, MonetaryAmount>,
    pub(crate) quantity_by_product: HashMap<ProductId, Quantity>,
}

impl Aggregates {
    /// Creates a zero revenue bucket for `seller` unless one already exists.
    pub fn open_seller(&mut self, seller: &SellerKey) {
        if !self.money_by_seller.contains_key(seller) {
            self.money_by_seller
                .insert(seller.clone(), MonetaryAmount::default());
        }
    }

    /// Adds one accepted line item to both totals. Nothing changes if the revenue overflows.
    pub fn record_item(
        &mut self,
        seller: &SellerKey,
        product: &Product,
        quantity: Quantity,
    ) -> Result<(), AmountOverflow> {
        let revenue = self
            .money_by_seller
            .get_or_default(seller)
            .checked_add(product.price.checked_times(quantity).ok_or(AmountOverflow)?)
            .ok_or(AmountOverflow)?;
        let units = self
            .quantity_by_product
            .get_or_default(&product.id)
            .saturating_add(quantity);

        self.money_by_seller.insert(seller.clone(), revenue);
        self.quantity_by_product.insert(product.id.clone(), units);
        Ok(())
    }

    // Used for testing
    #[cfg(test)]
    pub fn revenue(&self, seller: &SellerKey) -> Option<MonetaryAmount> {
        self.money_by_seller.get(seller).copied()
    }

    #[cfg(test)]
    pub fn quantity(&self, product: &str) -> Option<Quantity> {
        self.quantity_by_product.get(product).copied()
    }
}
