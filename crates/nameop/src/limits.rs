//! Size limits, opcodes and defaults shared by the codecs.

/// Maximum identifier length in bytes.
pub const MAX_IDENTIFIER_LEN: usize = 256;

/// Maximum value length in bytes. Empty values bypass this check.
pub const MAX_VALUE_LEN: usize = 2048;

/// Maximum label length for the `d/` namespace (one DNS label).
pub const MAX_DOMAIN_LABEL_LEN: usize = 63;

/// Default bound on `map` nesting when decoding a domain value.
pub const DEFAULT_MAX_MAP_DEPTH: usize = 32;

// =============================================================================
// OPCODES
// =============================================================================

/// Push opcodes below this value carry their own length.
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
/// `OP_1`, reused as `OP_NAME_REGISTER`.
pub const OP_NAME_REGISTER: u8 = 0x51;
/// `OP_2`, reused as `OP_NAME_UPDATE`.
pub const OP_NAME_UPDATE: u8 = 0x52;
pub const OP_RETURN: u8 = 0x6a;
pub const OP_2DROP: u8 = 0x6d;
pub const OP_DROP: u8 = 0x75;
