//! Name operations carried by transaction outputs.

use crate::error::EncodeError;
use crate::limits::{OP_NAME_REGISTER, OP_NAME_UPDATE};

/// The kind of a name operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NameOpKind {
    /// First registration of an identifier.
    Register = OP_NAME_REGISTER,
    /// Update (or transfer) of an existing identifier.
    Update = OP_NAME_UPDATE,
}

impl NameOpKind {
    /// Creates a kind from its opcode.
    pub fn from_opcode(opcode: u8) -> Option<NameOpKind> {
        match opcode {
            OP_NAME_REGISTER => Some(NameOpKind::Register),
            OP_NAME_UPDATE => Some(NameOpKind::Update),
            _ => None,
        }
    }

    /// Returns the opcode that introduces this operation in a script.
    pub fn opcode(self) -> u8 {
        self as u8
    }

    /// Returns the JSON name of this operation (`name_register` / `name_update`).
    pub fn json_name(self) -> &'static str {
        match self {
            NameOpKind::Register => "name_register",
            NameOpKind::Update => "name_update",
        }
    }

    /// Parses the JSON name of an operation.
    pub fn from_json_name(name: &str) -> Option<NameOpKind> {
        match name {
            "name_register" => Some(NameOpKind::Register),
            "name_update" => Some(NameOpKind::Update),
            _ => None,
        }
    }
}

impl TryFrom<u8> for NameOpKind {
    type Error = EncodeError;

    fn try_from(opcode: u8) -> Result<Self, Self::Error> {
        NameOpKind::from_opcode(opcode).ok_or(EncodeError::UnknownOperation { opcode })
    }
}

/// A name operation: an identifier and the value it is set to.
///
/// Both fields are raw bytes. The value is normally a JSON object; an empty
/// value is a placeholder used when building index scripts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NameOp {
    pub kind: NameOpKind,
    pub identifier: Vec<u8>,
    pub value: Vec<u8>,
}

impl NameOp {
    /// Creates a registration of `identifier` with `value`.
    pub fn register(identifier: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: NameOpKind::Register,
            identifier: identifier.into(),
            value: value.into(),
        }
    }

    /// Creates an update of `identifier` to `value`.
    pub fn update(identifier: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: NameOpKind::Update,
            identifier: identifier.into(),
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_opcodes() {
        assert_eq!(NameOpKind::Register.opcode(), 0x51);
        assert_eq!(NameOpKind::Update.opcode(), 0x52);
        assert_eq!(NameOpKind::from_opcode(0x51), Some(NameOpKind::Register));
        assert_eq!(NameOpKind::from_opcode(0x52), Some(NameOpKind::Update));
        assert_eq!(NameOpKind::from_opcode(0x53), None);
    }

    #[test]
    fn test_unknown_opcode_rejected() {
        let result = NameOpKind::try_from(0x00u8);
        assert_eq!(result, Err(EncodeError::UnknownOperation { opcode: 0x00 }));
    }

    #[test]
    fn test_json_names() {
        for kind in [NameOpKind::Register, NameOpKind::Update] {
            assert_eq!(NameOpKind::from_json_name(kind.json_name()), Some(kind));
        }
        assert_eq!(NameOpKind::from_json_name("name_new"), None);
    }
}
