//! Storefront catalog, orders, and sessions backed by `PostgreSQL`.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;
