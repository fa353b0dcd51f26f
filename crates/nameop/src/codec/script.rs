//! Name operation encoding/decoding for output scripts.
//!
//! A name output script is a name prefix followed by an ordinary payment
//! script:
//!
//! ```text
//! NAME_REGISTER <identifier> <value> OP_2DROP OP_DROP <payment script>
//! NAME_UPDATE   <identifier> <value> OP_2DROP OP_DROP <payment script>
//! ```

use sha2::{Digest, Sha256};

use crate::codec::primitives::{ScriptOp, Writer, parse_script};
use crate::error::EncodeError;
use crate::limits::{OP_2DROP, OP_DROP, OP_NAME_REGISTER, OP_NAME_UPDATE, OP_RETURN};
use crate::model::{NameOp, NameOpKind};
use crate::validate::validate_name_op;

/// Number of script elements in the name prefix.
const NAME_PREFIX_OPS: usize = 5;

/// Templates tried in order. `None` marks a push of any length.
const TEMPLATES: [[Option<u8>; NAME_PREFIX_OPS]; 2] = [
    [Some(OP_NAME_REGISTER), None, None, Some(OP_2DROP), Some(OP_DROP)],
    [Some(OP_NAME_UPDATE), None, None, Some(OP_2DROP), Some(OP_DROP)],
];

/// A script split into its name operation and the payment script after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSplit<'a> {
    /// The name operation, if the script starts with a name prefix.
    pub name_op: Option<NameOp>,
    /// The payment script: the bytes after the name prefix, or the whole
    /// script when there is no name prefix. `None` if the script is malformed.
    pub remainder: Option<&'a [u8]>,
}

// =============================================================================
// DECODING
// =============================================================================

/// Splits an output script into its name operation and payment script.
///
/// Never fails: a malformed script yields `(None, None)` and a script
/// without a name prefix yields `(None, Some(script))`.
pub fn decode_name_script(script: &[u8]) -> ScriptSplit<'_> {
    let ops = match parse_script(script) {
        Ok(ops) => ops,
        Err(err) => {
            tracing::debug!(error = %err, "malformed output script");
            return ScriptSplit {
                name_op: None,
                remainder: None,
            };
        }
    };

    for template in &TEMPLATES {
        if let Some(name_op) = match_template(&ops, template) {
            let remainder = match ops.get(NAME_PREFIX_OPS) {
                Some(op) => &script[op.offset..],
                None => &script[script.len()..],
            };
            return ScriptSplit {
                name_op: Some(name_op),
                remainder: Some(remainder),
            };
        }
    }

    tracing::debug!(len = script.len(), "script has no name prefix");
    ScriptSplit {
        name_op: None,
        remainder: Some(script),
    }
}

/// Returns the name operation of an output script, if it has one.
pub fn name_op_from_script(script: &[u8]) -> Option<NameOp> {
    decode_name_script(script).name_op
}

fn match_template(ops: &[ScriptOp<'_>], template: &[Option<u8>; NAME_PREFIX_OPS]) -> Option<NameOp> {
    let prefix = ops.get(..NAME_PREFIX_OPS)?;

    let matches = prefix.iter().zip(template).all(|(op, expected)| match expected {
        Some(opcode) => op.opcode == *opcode,
        None => op.is_push(),
    });
    if !matches {
        return None;
    }

    let kind = NameOpKind::from_opcode(prefix[0].opcode)?;
    Some(NameOp {
        kind,
        identifier: prefix[1].data?.to_vec(),
        value: prefix[2].data?.to_vec(),
    })
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes the name prefix of an output script.
///
/// The operation is validated first. The payment script is not included;
/// callers append it.
pub fn encode_name_script(op: &NameOp) -> Result<Vec<u8>, EncodeError> {
    validate_name_op(op)?;

    let mut writer = Writer::with_capacity(op.identifier.len() + op.value.len() + 16);
    writer.write_opcode(op.kind.opcode());
    writer.write_push(&op.identifier);
    writer.write_push(&op.value);
    writer.write_opcode(OP_2DROP);
    writer.write_opcode(OP_DROP);

    Ok(writer.into_bytes())
}

/// Builds the script an index server files every operation on `identifier`
/// under: an update with an empty value, terminated by `OP_RETURN`.
pub fn name_identifier_to_script(identifier: &[u8]) -> Result<Vec<u8>, EncodeError> {
    let mut script = encode_name_script(&NameOp::update(identifier, Vec::new()))?;
    script.push(OP_RETURN);
    Ok(script)
}

/// Returns the index script hash for `identifier`: the SHA-256 of
/// [`name_identifier_to_script`], byte-reversed, as lowercase hex.
pub fn name_identifier_to_scripthash(identifier: &[u8]) -> Result<String, EncodeError> {
    let script = name_identifier_to_script(identifier)?;
    let mut hash = Sha256::digest(&script);
    hash.reverse();
    Ok(hex::encode(hash))
}
