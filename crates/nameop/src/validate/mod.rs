//! Validation of name operations before they are encoded.
//!
//! These are the basic length and shape checks a wallet applies before
//! broadcasting an update. Consensus rules beyond these (identifier policy
//! of individual chains) are not checked here.

use serde_json::Value;

use crate::error::ValidationError;
use crate::limits::{MAX_IDENTIFIER_LEN, MAX_VALUE_LEN};
use crate::model::NameOp;

/// Validates the identifier and value of a name operation.
pub fn validate_name_op(op: &NameOp) -> Result<(), ValidationError> {
    validate_identifier_length(&op.identifier)?;
    validate_value(&op.value)
}

/// Checks that an identifier does not exceed [`MAX_IDENTIFIER_LEN`] bytes.
pub fn validate_identifier_length(identifier: &[u8]) -> Result<(), ValidationError> {
    if identifier.len() > MAX_IDENTIFIER_LEN {
        return Err(ValidationError::IdentifierTooLong {
            len: identifier.len(),
            max: MAX_IDENTIFIER_LEN,
        });
    }
    Ok(())
}

/// Checks that a value is a JSON object of at most [`MAX_VALUE_LEN`] bytes.
///
/// An empty value is accepted: it is the placeholder used when building the
/// index script for an identifier, even though it is not a valid value on
/// its own.
pub fn validate_value(value: &[u8]) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }

    if value.len() > MAX_VALUE_LEN {
        return Err(ValidationError::ValueTooLong {
            len: value.len(),
            max: MAX_VALUE_LEN,
        });
    }

    let parsed: Value = serde_json::from_slice(value).map_err(|_| ValidationError::ValueNotJson {
        value: String::from_utf8_lossy(value).into_owned(),
    })?;

    if !parsed.is_object() {
        return Err(ValidationError::ValueNotObject {
            value: String::from_utf8_lossy(value).into_owned(),
        });
    }

    Ok(())
}
