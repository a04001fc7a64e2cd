//! Receipt
//!
//! Tabular rendering of a cart for terminal output.

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    pricing::{PricingError, format_amount},
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// An amount could not be formatted in the requested currency.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Writing to the output failed.
    #[error("failed to write receipt")]
    Io(#[from] io::Error),
}

/// Write `cart` as a table of lines followed by the cart total.
///
/// # Errors
///
/// Returns a [`ReceiptError`] if `currency` is unknown or `out` fails.
pub fn write_receipt(
    mut out: impl io::Write,
    cart: &Cart,
    currency: &str,
) -> Result<(), ReceiptError> {
    if cart.is_empty() {
        writeln!(out, "cart is empty")?;

        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(["Product", "Name", "Unit Price", "Quantity", "Line Total"]);

    for line in cart.lines() {
        builder.push_record([
            line.product.uuid.to_string(),
            line.product.name.clone(),
            format_amount(line.product.price, currency)?,
            line.quantity.to_string(),
            format_amount(line.total(), currency)?,
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..5), Alignment::right());
    table.modify(Rows::first(), Alignment::left());

    writeln!(out, "{table}")?;
    writeln!(
        out,
        "Items: {}  Total: {}",
        cart.item_count(),
        format_amount(cart.total(), currency)?
    )?;

    Ok(())
}
