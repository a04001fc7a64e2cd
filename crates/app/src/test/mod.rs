//! Test support

mod db;

pub use context::{TestContext, address, new_order};
pub use db::TestDb;
