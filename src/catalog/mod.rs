//! Presentational helpers shared by the product grid commands

use clap::ValueEnum;

use crate::models::Product;

/// Placeholder shown for products without an uploaded image.
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.png";

/// Price sort direction for product listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Cheapest first
    PriceAsc,
    /// Most expensive first
    PriceDesc,
}

/// Sort a product list by price. Stable, so products with equal prices
/// keep the order the backend returned them in.
pub fn sort_by_price(products: &mut [Product], order: SortOrder) {
    match order {
        SortOrder::PriceAsc => products.sort_by_key(|p| p.price),
        SortOrder::PriceDesc => products.sort_by_key(|p| std::cmp::Reverse(p.price)),
    }
}

/// Web link to a category page on the storefront.
pub fn category_url(base: &str, slug: &str) -> String {
    format!("{}/category/{}", base.trim_end_matches('/'), slug)
}

/// Web link to a seller page on the storefront.
pub fn seller_url(base: &str, seller_id: &str) -> String {
    format!("{}/seller/{}", base.trim_end_matches('/'), seller_id)
}

/// Image path for a product, falling back to the placeholder.
pub fn image_or_placeholder(product: &Product) -> &str {
    product
        .image
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(PLACEHOLDER_IMAGE)
}

/// Render a minor-unit price for display. Negative amounts (refunds,
/// adjustments) carry a leading sign.
pub fn format_price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!("{}${}.{:02}", sign, cents / 100, cents % 100)
}
