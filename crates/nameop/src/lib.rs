//! Name operations in output scripts, and the domain record encoding of
//! name values.
//!
//! A name output script prefixes an ordinary payment script with a name
//! operation that registers or updates an identifier (`d/example`,
//! `id/alice`, ...) with a JSON value. This crate extracts and builds those
//! prefixes, validates them, and, for `d/` names, translates the JSON value
//! to and from typed DNS-like resource records.
//!
//! # Quick Start
//!
//! ```rust
//! use nameop::{NameOp, decode_name_script, encode_name_script};
//! use nameop::codec::decode_domain_records;
//!
//! let op = NameOp::update(b"d/example".to_vec(), br#"{"ip":"1.2.3.4"}"#.to_vec());
//! let script = encode_name_script(&op).unwrap();
//!
//! let split = decode_name_script(&script);
//! assert_eq!(split.name_op.as_ref(), Some(&op));
//!
//! let decoded = decode_domain_records("example.bit", op.value.as_slice());
//! assert_eq!(decoded.records.len(), 1);
//! assert!(decoded.is_fully_resolved());
//! ```
//!
//! # Modules
//!
//! - [`model`]: Core data types (NameOp, Namespace, ResourceRecord)
//! - [`codec`]: Script and domain value encoding/decoding
//! - [`validate`]: Identifier and value checks applied before encoding
//! - [`format`]: Human-readable presentation
//! - [`error`]: Error types
//! - [`limits`]: Size limits and opcodes
//!
//! # Untrusted Input
//!
//! Scripts and values come straight from the chain. Decoding never fails:
//! malformed scripts yield no name operation, and anything in a domain value
//! that is not understood is handed back as a residual instead of an error.
//! `map` nesting is bounded by [`codec::DecodeOptions::max_depth`].

pub mod codec;
pub mod error;
pub mod format;
pub mod limits;
pub mod model;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{
    DecodeOptions, DecodedDomain, DomainValue, ScriptSplit, add_domain_record,
    decode_domain_records, decode_name_script, encode_domain_records, encode_name_script,
    name_identifier_to_script, name_identifier_to_scripthash, name_op_from_script,
};
pub use error::{EncodeError, RecordError, ValidationError};
pub use format::{
    FormattedIdentifier, format_identifier, format_identifier_split, format_name_op,
    format_value, name_op_from_json, name_op_to_json,
};
pub use model::{
    AddressKind, NameOp, NameOpKind, Namespace, RecordData, RecordType, ResourceRecord, classify,
    split_identifier,
};
pub use validate::validate_name_op;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
