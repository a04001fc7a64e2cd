//! Products Data

use rust_decimal::Decimal;

use crate::domain::{
    pagination::PageRequest,
    products::{errors::ProductValidationError, records::ProductUuid},
};

/// Stock assigned to new products when none is given.
pub const DEFAULT_STOCK: u32 = 10;

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub images: Vec<String>,
    pub stock: Option<u32>,
}

impl NewProduct {
    pub(crate) fn validate(&self) -> Result<(), ProductValidationError> {
        validate_fields(
            Some(&self.name),
            Some(&self.description),
            Some(self.price),
            Some(&self.category),
        )
    }
}

/// Product Update Data
///
/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub images: Option<Vec<String>>,
    pub stock: Option<u32>,
}

impl ProductUpdate {
    pub(crate) fn validate(&self) -> Result<(), ProductValidationError> {
        validate_fields(
            self.name.as_deref(),
            self.description.as_deref(),
            self.price,
            self.category.as_deref(),
        )
    }
}

fn validate_fields(
    name: Option<&str>,
    description: Option<&str>,
    price: Option<Decimal>,
    category: Option<&str>,
) -> Result<(), ProductValidationError> {
    if name.is_some_and(|name| name.trim().is_empty()) {
        return Err(ProductValidationError::BlankName);
    }

    if description.is_some_and(|description| description.trim().is_empty()) {
        return Err(ProductValidationError::BlankDescription);
    }

    if category.is_some_and(|category| category.trim().is_empty()) {
        return Err(ProductValidationError::BlankCategory);
    }

    if price.is_some_and(|price| price.is_sign_negative() && !price.is_zero()) {
        return Err(ProductValidationError::NegativePrice);
    }

    Ok(())
}

/// Column products are ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    #[default]
    Name,
    Price,
    CreatedAt,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Catalog listing filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductsQuery {
    /// Exact category match
    pub category: Option<String>,

    /// Case-insensitive substring of name or description
    pub search: Option<String>,

    pub sort: ProductSort,
    pub direction: SortDirection,
    pub page: PageRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product() -> NewProduct {
        NewProduct {
            uuid: ProductUuid::new(),
            name: "Kente Scarf".to_string(),
            description: "Handwoven".to_string(),
            price: Decimal::new(4500, 2),
            category: "accessories".to_string(),
            images: Vec::new(),
            stock: None,
        }
    }

    #[test]
    fn valid_product_passes() {
        assert_eq!(new_product().validate(), Ok(()));
    }

    #[test]
    fn zero_price_is_allowed() {
        let product = NewProduct {
            price: Decimal::ZERO,
            ..new_product()
        };

        assert_eq!(product.validate(), Ok(()));
    }

    #[test]
    fn blank_fields_and_negative_prices_are_rejected() {
        let blank_name = NewProduct {
            name: "  ".to_string(),
            ..new_product()
        };
        let negative = NewProduct {
            price: Decimal::new(-1, 0),
            ..new_product()
        };
        let blank_category = NewProduct {
            category: String::new(),
            ..new_product()
        };

        assert_eq!(blank_name.validate(), Err(ProductValidationError::BlankName));
        assert_eq!(negative.validate(), Err(ProductValidationError::NegativePrice));
        assert_eq!(
            blank_category.validate(),
            Err(ProductValidationError::BlankCategory)
        );
    }

    #[test]
    fn empty_update_is_valid() {
        assert_eq!(ProductUpdate::default().validate(), Ok(()));
    }
}
