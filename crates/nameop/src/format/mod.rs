//! Human-readable presentation of name operations.
//!
//! Nothing here affects encoding; it is what a wallet shows in a
//! transaction list or detail view.

use std::fmt;

use serde_json::{Map, Value};
use unicode_general_category::{GeneralCategory, get_general_category};

use crate::error::EncodeError;
use crate::model::{NameOp, NameOpKind, split_identifier};

const NON_STANDARD: &str = "Non-standard name";

/// An identifier split for display into a category and the specific label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedIdentifier {
    pub category: String,
    pub specifics: String,
}

impl FormattedIdentifier {
    fn new(category: &str, specifics: impl Into<String>) -> Self {
        Self {
            category: category.to_string(),
            specifics: specifics.into(),
        }
    }

    fn hex(bytes: &[u8]) -> Self {
        Self::new(NON_STANDARD, format!("0x{}", hex::encode(bytes)))
    }
}

impl fmt::Display for FormattedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.category, self.specifics)
    }
}

/// Returns true if no character is a control, format, surrogate,
/// private-use, unassigned or separator code point. The ASCII space is
/// allowed.
fn is_printable(text: &str) -> bool {
    text.chars().all(|c| c == ' ' || is_printable_char(c))
}

fn is_printable_char(c: char) -> bool {
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
            | GeneralCategory::SpaceSeparator
    )
}

/// Splits an identifier into a display category and label.
///
/// `p/` and `g/` identifiers are shown as players and games; anything else is
/// a non-standard name, quoted if printable and hex-encoded otherwise.
pub fn format_identifier_split(identifier: &[u8]) -> FormattedIdentifier {
    let Ok(text) = std::str::from_utf8(identifier) else {
        return FormattedIdentifier::hex(identifier);
    };

    match split_identifier(identifier) {
        Some(("p", label)) => return FormattedIdentifier::new("Player", label),
        Some(("g", label)) => return FormattedIdentifier::new("Game", label),
        _ => {}
    }

    if is_printable(text) {
        FormattedIdentifier::new(NON_STANDARD, format!("'{text}'"))
    } else {
        FormattedIdentifier::hex(identifier)
    }
}

/// Formats an identifier as `"<category> <specifics>"`.
pub fn format_identifier(identifier: &[u8]) -> String {
    format_identifier_split(identifier).to_string()
}

/// Formats a value as `"JSON <value>"` if it is printable ASCII, otherwise
/// as `0x`-prefixed hex.
pub fn format_value(value: &[u8]) -> String {
    match std::str::from_utf8(value) {
        Ok(text) if value.is_ascii() && is_printable(text) => format!("JSON {text}"),
        _ => format!("0x{}", hex::encode(value)),
    }
}

/// Formats a name operation for a transaction detail view.
pub fn format_name_op(op: &NameOp) -> String {
    let heading = match op.kind {
        NameOpKind::Register => "Registration",
        NameOpKind::Update => "Update",
    };
    format!(
        "\t{heading}\n\t\tName = {}\n\t\tData = {}",
        format_identifier(&op.identifier),
        format_value(&op.value)
    )
}

// =============================================================================
// JSON FORM
// =============================================================================

const HEX_ENCODING: &str = "hex";

/// Converts a name operation to its JSON form, with identifier and value
/// hex-encoded.
pub fn name_op_to_json(op: &NameOp) -> Value {
    let mut object = Map::new();
    object.insert("op".into(), op.kind.json_name().into());
    object.insert("name".into(), hex::encode(&op.identifier).into());
    object.insert("value".into(), hex::encode(&op.value).into());
    object.insert("name_encoding".into(), HEX_ENCODING.into());
    object.insert("value_encoding".into(), HEX_ENCODING.into());
    Value::Object(object)
}

/// Parses the JSON form produced by [`name_op_to_json`].
///
/// The `*_encoding` fields may be omitted but, if present, must be `"hex"`.
pub fn name_op_from_json(json: &Value) -> Result<NameOp, EncodeError> {
    let object = json.as_object().ok_or(EncodeError::MalformedNameOp {
        context: "expected a JSON object",
    })?;

    let op = object
        .get("op")
        .and_then(Value::as_str)
        .ok_or(EncodeError::MalformedNameOp {
            context: "missing op",
        })?;
    let kind = NameOpKind::from_json_name(op).ok_or_else(|| EncodeError::UnknownOperationName {
        name: op.to_string(),
    })?;

    Ok(NameOp {
        kind,
        identifier: hex_field(object, "name", "name_encoding")?,
        value: hex_field(object, "value", "value_encoding")?,
    })
}

fn hex_field(
    object: &Map<String, Value>,
    field: &'static str,
    encoding_field: &'static str,
) -> Result<Vec<u8>, EncodeError> {
    if let Some(encoding) = object.get(encoding_field) {
        if encoding.as_str() != Some(HEX_ENCODING) {
            return Err(EncodeError::MalformedNameOp {
                context: "unsupported encoding",
            });
        }
    }

    let text = object
        .get(field)
        .and_then(Value::as_str)
        .ok_or(EncodeError::MalformedNameOp {
            context: "missing name or value",
        })?;
    hex::decode(text).map_err(|_| EncodeError::InvalidHex { field })
}
