//! Opcode-level reading and writing of output scripts.
//!
//! Implements push-data framing: direct pushes (`0x00..=0x4b`) and the
//! `OP_PUSHDATA1/2/4` forms with little-endian length prefixes.

use crate::error::ScriptError;
use crate::limits::{OP_PUSHDATA1, OP_PUSHDATA2, OP_PUSHDATA4};

/// One parsed script element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptOp<'a> {
    /// The opcode byte.
    pub opcode: u8,
    /// Pushed bytes, for push opcodes.
    pub data: Option<&'a [u8]>,
    /// Offset of the opcode within the script.
    pub offset: usize,
}

impl ScriptOp<'_> {
    /// Returns true if this opcode pushes data (any opcode up to `OP_PUSHDATA4`).
    pub fn is_push(&self) -> bool {
        self.opcode <= OP_PUSHDATA4
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Reader that walks a script one opcode at a time.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader over a script.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current position in the script.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns true if the whole script has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    #[inline]
    fn read_byte(&mut self, context: &'static str) -> Result<u8, ScriptError> {
        let byte = *self
            .data
            .get(self.pos)
            .ok_or(ScriptError::UnexpectedEof { context })?;
        self.pos += 1;
        Ok(byte)
    }

    #[inline]
    fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], ScriptError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.data.len())
            .ok_or(ScriptError::UnexpectedEof { context })?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    fn read_le_length<const N: usize>(&mut self, context: &'static str) -> Result<usize, ScriptError> {
        let bytes = self.read_bytes(N, context)?;
        let mut buf = [0u8; 4];
        buf[..N].copy_from_slice(bytes);
        Ok(u32::from_le_bytes(buf) as usize)
    }

    /// Reads the next opcode and, for pushes, its data.
    pub fn read_op(&mut self) -> Result<ScriptOp<'a>, ScriptError> {
        let offset = self.pos;
        let opcode = self.read_byte("opcode")?;

        if opcode > OP_PUSHDATA4 {
            return Ok(ScriptOp {
                opcode,
                data: None,
                offset,
            });
        }

        let len = match opcode {
            OP_PUSHDATA1 => self.read_le_length::<1>("pushdata1 length")?,
            OP_PUSHDATA2 => self.read_le_length::<2>("pushdata2 length")?,
            OP_PUSHDATA4 => self.read_le_length::<4>("pushdata4 length")?,
            direct => direct as usize,
        };
        let data = self.read_bytes(len, "push data")?;

        Ok(ScriptOp {
            opcode,
            data: Some(data),
            offset,
        })
    }
}

/// Splits a whole script into opcodes.
///
/// Fails if any push runs past the end of the script.
pub fn parse_script(script: &[u8]) -> Result<Vec<ScriptOp<'_>>, ScriptError> {
    let mut reader = Reader::new(script);
    let mut ops = Vec::new();
    while !reader.is_empty() {
        ops.push(reader.read_op()?);
    }
    Ok(ops)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for building scripts.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Writes a bare opcode.
    #[inline]
    pub fn write_opcode(&mut self, opcode: u8) {
        self.buf.push(opcode);
    }

    /// Writes a length-prefixed push of `data`, using the shortest prefix.
    ///
    /// Small values are never folded into `OP_1..OP_16`, so every push reads
    /// back as a push.
    pub fn write_push(&mut self, data: &[u8]) {
        let len = data.len();
        if len < OP_PUSHDATA1 as usize {
            self.buf.push(len as u8);
        } else if len <= 0xff {
            self.buf.push(OP_PUSHDATA1);
            self.buf.push(len as u8);
        } else if len <= 0xffff {
            self.buf.push(OP_PUSHDATA2);
            self.buf.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.buf.push(OP_PUSHDATA4);
            self.buf.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.buf.extend_from_slice(data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_prefixes() {
        let cases: [(usize, &[u8]); 5] = [
            (0, &[0x00]),
            (0x4b, &[0x4b]),
            (0x4c, &[OP_PUSHDATA1, 0x4c]),
            (0x100, &[OP_PUSHDATA2, 0x00, 0x01]),
            (0x10000, &[OP_PUSHDATA4, 0x00, 0x00, 0x01, 0x00]),
        ];

        for (len, prefix) in cases {
            let mut writer = Writer::new();
            writer.write_push(&vec![0xab; len]);
            let bytes = writer.into_bytes();
            assert_eq!(&bytes[..prefix.len()], prefix, "prefix for len {}", len);
            assert_eq!(bytes.len(), prefix.len() + len);
        }
    }

    #[test]
    fn test_push_roundtrip() {
        for len in [0usize, 1, 75, 76, 255, 256, 2048, 70000] {
            let data: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let mut writer = Writer::new();
            writer.write_push(&data);
            writer.write_opcode(0x75);

            let ops = parse_script(writer.as_bytes()).unwrap();
            assert_eq!(ops.len(), 2);
            assert!(ops[0].is_push());
            assert_eq!(ops[0].data, Some(&data[..]));
            assert_eq!(ops[1].opcode, 0x75);
            assert_eq!(ops[1].data, None);
            assert!(!ops[1].is_push());
        }
    }

    #[test]
    fn test_offsets() {
        let script = [0x51, 0x02, 0xaa, 0xbb, 0x6d];
        let ops = parse_script(&script).unwrap();
        let offsets: Vec<usize> = ops.iter().map(|op| op.offset).collect();
        assert_eq!(offsets, vec![0, 1, 4]);
    }

    #[test]
    fn test_truncated_push() {
        assert!(matches!(
            parse_script(&[0x05, 0x01, 0x02]),
            Err(ScriptError::UnexpectedEof { context: "push data" })
        ));
        assert!(matches!(
            parse_script(&[OP_PUSHDATA2, 0x01]),
            Err(ScriptError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_empty_script() {
        assert_eq!(parse_script(&[]).unwrap(), vec![]);
    }
}
