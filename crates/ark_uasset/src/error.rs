//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent warpper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// the container signature or version is not supported
    #[error(transparent)]
    FormatVersion(#[from] FormatVersionError),

    /// the chunk table does not add up to the declared totals
    #[error(transparent)]
    Inconsistency(#[from] InconsistencyError),

    /// a chunk could not be restored
    #[error(transparent)]
    Decompression(#[from] DecompressionError),

    /// chunk size {0} cannot be used for compression
    #[error("chunk size {0} cannot be used for compression")]
    InvalidChunkSize(u64),

    /// sidecar does not hold a decimal size
    #[error("sidecar does not hold a decimal size: {text:?}")]
    InvalidSidecar {
        /// The sidecar contents
        text: String,
        /// The underlying parse failure
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Problems with the fixed prefix of a container
#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum FormatVersionError {
    /// unrecognised magic
    #[error("unrecognised magic {found:02X?}, expected {expected:02X?}")]
    UnrecognisedMagic {
        /// The signature the decoder was configured with
        expected: [u8; 4],
        /// The signature found in the stream
        found: [u8; 4],
    },

    /// unknown version {0}
    #[error("unknown version {0}")]
    UnknownVersion(u32),

    /// the stream ended inside the main header
    #[error("the stream ended inside the main header")]
    TruncatedHeader,
}

/// The running totals of the chunk table failed to reach zero together
#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum InconsistencyError {
    /// uncompressed data unaccounted for
    #[error("uncompressed data unaccounted for ({remaining} bytes left after the chunk table)")]
    UncompressedUnaccounted {
        /// What was left of the uncompressed total, negative when over-subtracted
        remaining: i128,
    },

    /// excess compressed data
    #[error("excess compressed data ({remaining} bytes left after the chunk table)")]
    ExcessCompressed {
        /// What was left of the compressed total, negative when over-subtracted
        remaining: i128,
    },

    /// the stream ended before chunk header {index}
    #[error("the stream ended before chunk header {index}")]
    MissingChunkHeader {
        /// Position of the missing header in the chunk table
        index: usize,
    },
}

/// Failures while inflating a single chunk
#[derive(Error, Diagnostic, Debug)]
pub enum DecompressionError {
    /// truncated chunk
    #[error("truncated chunk {index}: expected {expected} bytes, read {actual}")]
    TruncatedChunk {
        /// Chunk position
        index: usize,
        /// Compressed size from the chunk header
        expected: u64,
        /// Bytes actually available
        actual: u64,
    },

    /// zlib chunk decompression error
    #[error("zlib chunk decompression error in chunk {index}")]
    CorruptChunk {
        /// Chunk position
        index: usize,
        /// The inflate failure
        #[source]
        source: std::io::Error,
    },

    /// uncompressed size of chunk does not match chunk header
    #[error("uncompressed size of chunk {index} does not match chunk header: expected {expected}, got {actual}")]
    SizeMismatch {
        /// Chunk position
        index: usize,
        /// Uncompressed size from the chunk header
        expected: u64,
        /// Size produced by inflating, capped one past `expected`
        actual: u64,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
