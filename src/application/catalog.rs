//! Server-side product catalog.
//!
//! Prices live here and nowhere else. The frontend names a product id and
//! a quantity; it never gets to say how much to charge.

/// A purchasable product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    /// Unit price in minor units.
    pub unit_price: i64,
    pub currency: &'static str,
}

/// Everything currently for sale.
pub const PRODUCTS: &[Product] = &[
    Product { id: "prod_starter", name: "Starter Pack", unit_price: 2999, currency: "usd" },
    Product { id: "prod_pro", name: "Pro Pack", unit_price: 7999, currency: "usd" },
];

/// Look up a product by id.
pub fn find(product_id: &str) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.id == product_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_known_products() {
        let starter = find("prod_starter").unwrap();
        assert_eq!(starter.name, "Starter Pack");
        assert_eq!(starter.unit_price, 2999);

        assert!(find("prod_pro").is_some());
    }

    #[test]
    fn unknown_product_is_none() {
        assert!(find("prod_enterprise").is_none());
        assert!(find("").is_none());
    }
}
