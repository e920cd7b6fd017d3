//! Chunk compression and decompression handling.
//!
//! Every chunk is a standalone zlib stream, no dictionary or state is shared between chunks.

use std::io::{self, Read, Write};

use flate2::{read::ZlibDecoder, write::ZlibEncoder, Compression};
use tracing::{instrument, trace};

use crate::error::{DecompressionError, Result};

/// Upper bound for buffers sized from untrusted headers
const MAX_PREALLOCATION: usize = 1 << 20;

/// Compress one block into its own zlib run
#[instrument(skip_all, fields(size = data.len()), err)]
pub(crate) fn compress_chunk(data: &[u8], level: Compression) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2), level);
    encoder.write_all(data)?;
    let compressed = encoder.finish()?;

    trace!(compressed = compressed.len(), "compressed chunk");
    Ok(compressed)
}

/// Inflate one zlib run and verify it produces exactly `expected` bytes
#[instrument(skip(data), fields(size = data.len()), err)]
pub(crate) fn decompress_chunk(index: usize, data: &[u8], expected: u64) -> Result<Vec<u8>> {
    let capacity = usize::try_from(expected)
        .unwrap_or(MAX_PREALLOCATION)
        .min(MAX_PREALLOCATION);
    let mut chunk = Vec::with_capacity(capacity);

    // One byte past the header's size is enough to tell a mismatch apart
    ZlibDecoder::new(data)
        .take(expected.saturating_add(1))
        .read_to_end(&mut chunk)
        .map_err(|source| DecompressionError::CorruptChunk { index, source })?;

    if chunk.len() as u64 != expected {
        return Err(DecompressionError::SizeMismatch {
            index,
            expected,
            actual: chunk.len() as u64,
        }
        .into());
    }

    Ok(chunk)
}
