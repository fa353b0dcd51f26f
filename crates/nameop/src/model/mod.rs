//! Data model types.
//!
//! - Name operations (what a name script carries)
//! - Namespaces (how identifiers are classified)
//! - Resource records (what a domain value resolves to)

pub mod name_op;
pub mod namespace;
pub mod record;

pub use name_op::{NameOp, NameOpKind};
pub use namespace::{
    Namespace, classify, is_valid_domain_label, is_valid_identity_label, split_identifier,
};
pub use record::{AddressKind, RecordData, RecordType, ResourceRecord};
