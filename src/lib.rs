//! Storefront
//!
//! Shopping cart state with durable snapshots, plus the catalog and pricing
//! primitives shared by the order service and HTTP API.

pub mod cart;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod uuids;
