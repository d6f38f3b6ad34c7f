//! Byte-to-printable-character mapping for byte-level BPE.
//!
//! Every raw byte is represented by exactly one visible character so that
//! vocabulary entries can be stored as ordinary strings. Printable ASCII and
//! Latin-1 bytes map to themselves; the remaining 68 bytes (control
//! characters, space, DEL, the C1 range, NBSP and the soft hyphen) are moved
//! to consecutive codepoints starting at U+0100, in ascending byte order.
//!
//! ```text
//! b' '  (0x20) -> 'Ġ' (U+0120)
//! b'\n' (0x0A) -> 'Ċ' (U+010A)
//! b'a'  (0x61) -> 'a'
//! ```

use ahash::AHashMap;

/// First codepoint handed out to a byte that is not printable on its own.
const OVERFLOW_BASE: u32 = 256;

/// Whether a byte is rendered as itself in vocabulary strings.
#[inline]
fn is_printable(byte: u8) -> bool {
    matches!(byte, b'!'..=b'~' | 0xA1..=0xAC | 0xAE..=0xFF)
}

/// Bijective mapping between raw bytes and printable characters.
///
/// The table is deterministic: the serialized vocabulary was built against
/// exactly this layout, so any change here invalidates every vocabulary file.
#[derive(Debug, Clone)]
pub struct ByteCodec {
    /// Byte to unicode mapping
    byte_encoder: [char; 256],
    /// Unicode to byte mapping for decoding
    byte_decoder: AHashMap<char, u8>,
}

impl ByteCodec {
    /// Build the byte/character tables.
    pub fn new() -> Self {
        let mut byte_encoder = ['\0'; 256];
        let mut byte_decoder = AHashMap::with_capacity(256);
        let mut next_overflow = OVERFLOW_BASE;

        for byte in 0..=u8::MAX {
            let ch = if is_printable(byte) {
                char::from(byte)
            } else {
                // U+0100..U+0143, always valid scalar values
                let ch = char::from_u32(next_overflow).unwrap_or(char::REPLACEMENT_CHARACTER);
                next_overflow += 1;
                ch
            };
            byte_encoder[byte as usize] = ch;
            byte_decoder.insert(ch, byte);
        }

        Self {
            byte_encoder,
            byte_decoder,
        }
    }

    /// Map a raw byte to its printable character.
    #[inline]
    pub fn encode_byte(&self, byte: u8) -> char {
        self.byte_encoder[byte as usize]
    }

    /// Map a printable character back to its raw byte.
    ///
    /// Returns `None` for characters outside the codec's image.
    #[inline]
    pub fn decode_char(&self, ch: char) -> Option<u8> {
        self.byte_decoder.get(&ch).copied()
    }

    /// Remap every byte of `bytes`, appending the characters to `out`.
    pub fn encode_into(&self, bytes: &[u8], out: &mut String) {
        out.reserve(bytes.len() * 2);
        out.extend(bytes.iter().map(|&b| self.encode_byte(b)));
    }

    /// Remap every byte of `bytes` into a new string.
    pub fn encode_bytes(&self, bytes: &[u8]) -> String {
        let mut out = String::new();
        self.encode_into(bytes, &mut out);
        out
    }
}

impl Default for ByteCodec {
    fn default() -> Self {
        Self::new()
    }
}
