//! Error types for name scripts, value validation and domain records.
//!
//! Decoding never fails: malformed input is reported through `Option`s and
//! residual values. Only validation and encoding return these errors.

use thiserror::Error;

/// A name operation violates the identifier/value constraints.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("identifier length {len} exceeds limit of {max}")]
    IdentifierTooLong { len: usize, max: usize },

    #[error("value length {len} exceeds limit of {max}")]
    ValueTooLong { len: usize, max: usize },

    #[error("value is invalid JSON: {value}")]
    ValueNotJson { value: String },

    #[error("value is not a JSON object: {value}")]
    ValueNotObject { value: String },
}

/// Error while encoding a name operation to a script (or from its JSON form).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("unknown name op: opcode 0x{opcode:02x}")]
    UnknownOperation { opcode: u8 },

    #[error("unknown name op: {name:?}")]
    UnknownOperationName { name: String },

    #[error("{field} is not valid hex")]
    InvalidHex { field: &'static str },

    #[error("malformed name op: {context}")]
    MalformedNameOp { context: &'static str },
}

/// Error while splitting a script into opcodes.
///
/// Internal to the script codec; callers of `decode_name_script` only see
/// whether the script was malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("unexpected end of script while reading {context}")]
    UnexpectedEof { context: &'static str },
}

/// Error while adding a resource record to a domain value, or while parsing
/// a record from its tuple form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("base domain mismatch: {domain:?} is not within {base_domain:?}")]
    BaseDomainMismatch { domain: String, base_domain: String },

    #[error("multiple {field} records for one domain")]
    DuplicateRecord { field: &'static str },

    #[error("unknown record type: {record_type:?}")]
    UnknownRecordType { record_type: String },

    #[error("unknown address type: {address_type:?}")]
    UnknownAddressType { address_type: String },

    #[error("malformed record: {context}")]
    MalformedRecord { context: &'static str },

    #[error("existing {field} value has an incompatible shape")]
    AccumulatorConflict { field: String },
}
