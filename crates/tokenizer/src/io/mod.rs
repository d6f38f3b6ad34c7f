//! Loading of vocabulary and merge tables from disk.

pub mod load;

pub use load::{TokenizerLoader, FILE_LAYOUTS};
