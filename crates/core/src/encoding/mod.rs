//! Byte-level representation used by the vocabulary.
//!
//! Token strings are sequences of remapped bytes, one printable character per
//! raw byte. This module owns that mapping.

pub mod byte_level;

pub use byte_level::ByteCodec;
