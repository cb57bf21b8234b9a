//! Read-only Shopify Admin REST adapter: typed product/order records, the
//! lookup client, and the human-readable product summary fed to the
//! completion API.

pub mod client;
pub mod records;
pub mod summary;

pub use client::{CatalogClient, CatalogError};
pub use records::{Order, Product, ProductOption, ProductVariant};
pub use summary::product_summary;
