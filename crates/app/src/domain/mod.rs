//! Storefront Domain Concerns

pub mod errors;
pub mod orders;
pub mod pagination;
pub mod products;
