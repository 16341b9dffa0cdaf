//! Product grid endpoints (category and seller listings)

use anyhow::{Context, Result};
use serde::Deserialize;

use super::client::StorefrontClient;
use crate::catalog::{
    category_url, format_price, image_or_placeholder, seller_url, sort_by_price, SortOrder,
};
use crate::models::{Product, Seller};

#[derive(Debug, Deserialize)]
struct ProductsResponse {
    products: Option<Vec<Product>>,
    seller: Option<Seller>,
}

/// Fetch and display the product grid for a category.
pub async fn category_products(
    client: &StorefrontClient,
    slug: &str,
    sort: Option<SortOrder>,
    limit: usize,
) -> Result<()> {
    let resp = client
        .get(&format!("/categories/{}/products", slug))
        .await?;
    let data: ProductsResponse = resp
        .json()
        .await
        .context("Failed to parse category products response")?;

    let mut products = data.products.unwrap_or_default();
    if let Some(order) = sort {
        sort_by_price(&mut products, order);
    }
    products.truncate(limit);

    println!("\nCategory: {}", slug);
    println!("  {}", category_url(client.base(), slug));
    print_grid(&products);
    Ok(())
}

/// Fetch and display the product grid for a seller.
pub async fn seller_products(
    client: &StorefrontClient,
    seller_id: &str,
    sort: Option<SortOrder>,
    limit: usize,
) -> Result<()> {
    let resp = client
        .get(&format!("/sellers/{}/products", seller_id))
        .await?;
    let data: ProductsResponse = resp
        .json()
        .await
        .context("Failed to parse seller products response")?;

    let name = data
        .seller
        .as_ref()
        .and_then(|s| s.name.clone())
        .unwrap_or_else(|| seller_id.to_string());

    let mut products = data.products.unwrap_or_default();
    if let Some(order) = sort {
        sort_by_price(&mut products, order);
    }
    products.truncate(limit);

    println!("\nSeller: {}", name);
    println!("  {}", seller_url(client.base(), seller_id));
    print_grid(&products);
    Ok(())
}

fn print_grid(products: &[Product]) {
    println!("{:-<60}", "");

    if products.is_empty() {
        println!("  (no products found)");
        return;
    }

    for product in products {
        println!("{:>10}  {}", format_price(product.price), product.title);
        println!("  image: {}", image_or_placeholder(product));
        if let Some(ref seller) = product.seller_name {
            println!("  seller: {}", seller);
        }
        println!("  ID: {}", product.id);
    }
}
