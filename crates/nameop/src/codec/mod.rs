//! Encoding/decoding of name scripts and domain values.
//!
//! - [`primitives`]: opcode-level script reading and writing
//! - [`script`]: name operations inside output scripts
//! - [`domain`]: domain values to and from resource records

pub mod domain;
pub mod primitives;
pub mod script;

pub use domain::{
    DecodeOptions, DecodedDomain, DomainObject, DomainValue, add_domain_record,
    decode_domain_records, decode_domain_records_with_options, encode_domain_records,
    recognized_keys,
};
pub use primitives::{Reader, ScriptOp, Writer, parse_script};
pub use script::{
    ScriptSplit, decode_name_script, encode_name_script, name_identifier_to_script,
    name_identifier_to_scripthash, name_op_from_script,
};
