//! Error types that can be emitted from this library
//!

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// A field runs past the end of the buffer
    #[error("truncated input at offset {offset}: needed {needed} bytes, {available} available")]
    TruncatedInput {
        /// Where the field starts
        offset: u64,
        /// Bytes the field needs
        needed: u64,
        /// Bytes left in the buffer
        available: u64,
    },

    /// A string or list is too long for its 32-bit length field
    #[error("{field} of length {len} does not fit a 32-bit length field")]
    FieldTooLarge {
        /// What was being written
        field: &'static str,
        /// Its length
        len: usize,
    },

    /// The metadata value for a numeric key is not a number
    #[error("metadata {key:?} has non-numeric value {value:?}")]
    MetadataParse {
        /// The metadata key
        key: String,
        /// The offending value
        value: String,
    },

    /// The magic bytes of a mod file differ from the known constant
    #[error("unexpected mod file magic {found:02X?}, expected {expected:02X?}")]
    UnexpectedMagic {
        /// The constant that was checked against
        expected: [u8; 8],
        /// The bytes found in the file
        found: [u8; 8],
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
