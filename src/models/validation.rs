use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{CreateProductRequest, UpdateProductRequest, ValidationError, ValidationResult};

/// Trait for validating input models
pub trait Validate {
    fn validate(&self) -> ValidationResult<()>;
}

/// Validation constants
pub const MAX_PRODUCT_NAME_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;
pub const MAX_CATEGORY_LENGTH: usize = 50;
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";

impl Validate for CreateProductRequest {
    fn validate(&self) -> ValidationResult<()> {
        validate_product_name(&self.name)?;
        validate_description(self.description.as_deref())?;
        validate_price(&self.price)?;
        validate_category(self.category.as_deref())?;
        validate_stock(self.stock)?;
        Ok(())
    }
}

impl Validate for UpdateProductRequest {
    fn validate(&self) -> ValidationResult<()> {
        if let Some(name) = &self.name {
            validate_product_name(name)?;
        }
        if let Some(description) = &self.description {
            validate_description(description.as_deref())?;
        }
        if let Some(price) = &self.price {
            validate_price(price)?;
        }
        if let Some(category) = &self.category {
            validate_category(category.as_deref())?;
        }
        if let Some(stock) = self.stock {
            validate_stock(stock)?;
        }
        Ok(())
    }
}

/// Validate product name: 1 to 100 characters of any kind
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "name".to_string(),
        });
    }

    check_max_length("name", name, MAX_PRODUCT_NAME_LENGTH)
}

pub fn validate_description(description: Option<&str>) -> ValidationResult<()> {
    match description {
        Some(description) => check_max_length("description", description, MAX_DESCRIPTION_LENGTH),
        None => Ok(()),
    }
}

pub fn validate_category(category: Option<&str>) -> ValidationResult<()> {
    match category {
        Some(category) => check_max_length("category", category, MAX_CATEGORY_LENGTH),
        None => Ok(()),
    }
}

/// Validate product price: strictly positive
pub fn validate_price(price: &Decimal) -> ValidationResult<()> {
    if *price <= Decimal::ZERO {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: "> 0".to_string(),
            value: price.to_string(),
        });
    }

    Ok(())
}

pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: "0".to_string(),
            value: stock.to_string(),
        });
    }

    Ok(())
}

/// Treat an empty argument the same as an absent one
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Parse a `YYYY-MM-DD` report date
pub fn parse_report_date(field: &str, value: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), REPORT_DATE_FORMAT).map_err(|_| {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            expected: "YYYY-MM-DD".to_string(),
        }
    })
}

// Lengths count characters, not bytes.
fn check_max_length(field: &str, value: &str, max_length: usize) -> ValidationResult<()> {
    let actual_length = value.chars().count();
    if actual_length > max_length {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max_length,
            actual_length,
        });
    }

    Ok(())
}
