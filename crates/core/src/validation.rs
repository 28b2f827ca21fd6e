//! Custom validation rules for catalog DTOs and helpers for reporting
//! validation failures.
//!
//! The DTOs in `catalog_db` carry `validator` derives; length limits live on
//! the fields themselves, the price rule lives here. The HTTP layer turns the
//! resulting errors into a field map via [`field_messages`].

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors};

/* --------------------------------------------------------------------------
Named constants
-------------------------------------------------------------------------- */

/// Lowest accepted product price.
pub const MIN_PRICE: Decimal = Decimal::ONE;

/// Highest accepted product price.
pub const MAX_PRICE: Decimal = Decimal::ONE_THOUSAND;

/* --------------------------------------------------------------------------
Custom rules
-------------------------------------------------------------------------- */

/// Price must lie within [`MIN_PRICE`, `MAX_PRICE`] inclusive.
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < MIN_PRICE || *price > MAX_PRICE {
        let mut err = ValidationError::new("range");
        err.message = Some(format!("price must be between {MIN_PRICE} and {MAX_PRICE}").into());
        err.add_param("value".into(), &price.to_string());
        return Err(err);
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Reporting
-------------------------------------------------------------------------- */

/// Flatten validation errors into `{ wireFieldName: [messages] }`.
///
/// Rust field names are converted to the camelCase names used on the wire.
/// Errors without a message fall back to their rule code.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("failed '{}' check", e.code),
                })
                .collect();
            (to_camel_case(&field), messages)
        })
        .collect()
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}
