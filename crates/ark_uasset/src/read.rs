//! Types for reading compressed uasset containers
//!

use binrw::BinRead;
use bon::Builder;
use std::io::{self, Cursor, Read, Write};
use tracing::{debug, instrument, trace};

use crate::{
    compression::decompress_chunk,
    error::{DecompressionError, Error, FormatVersionError, InconsistencyError, Result},
    types::{
        ChunkHeader, ContainerHeader, ContainerInfo, CHUNK_HEADER_SIZE, FORMAT_VERSION,
        HEADER_SIZE, UNREAL_MAGIC,
    },
};

/// Options for how a container should be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct DecompressOptions {
    /// The signature a container has to start with
    #[builder(default = UNREAL_MAGIC)]
    pub magic: [u8; 4],
}

impl Default for DecompressOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Compressed container reader
///
/// Opening the reader consumes the main header and the chunk table, the payload is then inflated one chunk at a
/// time in table order. Anything in the stream after the last chunk is left unread.
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn restore(reader: impl Read, writer: impl Write) -> ark_uasset::error::Result<()> {
///     let mut container = ark_uasset::ContainerReader::new(reader, &Default::default())?;
///     println!("{} chunks", container.info().len());
///     container.decompress_to(writer)?;
///     Ok(())
/// }
/// ```
pub struct ContainerReader<R> {
    reader: R,
    info: ContainerInfo,
    next_chunk: usize,
}

impl<R> ContainerReader<R> {
    /// The main header
    pub fn header(&self) -> &ContainerHeader {
        &self.info.header
    }

    /// The main header and chunk table
    pub fn info(&self) -> &ContainerInfo {
        &self.info
    }

    /// Number of chunks not yet read
    pub fn remaining(&self) -> usize {
        self.info.chunks.len() - self.next_chunk
    }

    /// Unwrap and return the inner reader object
    ///
    /// The reader is positioned after the last chunk read.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> ContainerReader<R> {
    /// Read the main header and chunk table of a container.
    #[instrument(skip_all, err)]
    pub fn new(mut reader: R, options: &DecompressOptions) -> Result<ContainerReader<R>> {
        let header = read_header(&mut reader, options)?;
        let chunks = read_chunk_table(&mut reader, &header)?;

        Ok(ContainerReader {
            reader,
            info: ContainerInfo { header, chunks },
            next_chunk: 0,
        })
    }

    /// Inflate the next chunk, or return `None` once every chunk has been read
    pub fn read_chunk(&mut self) -> Result<Option<Vec<u8>>> {
        let index = self.next_chunk;
        let Some(chunk) = self.info.chunks.get(index).copied() else {
            return Ok(None);
        };

        let mut compressed = Vec::new();
        self.reader
            .by_ref()
            .take(chunk.compressed_size)
            .read_to_end(&mut compressed)?;

        if compressed.len() as u64 != chunk.compressed_size {
            return Err(DecompressionError::TruncatedChunk {
                index,
                expected: chunk.compressed_size,
                actual: compressed.len() as u64,
            }
            .into());
        }

        let data = decompress_chunk(index, &compressed, chunk.uncompressed_size)?;
        trace!(index, compressed = compressed.len(), uncompressed = data.len(), "read chunk");

        self.next_chunk += 1;
        Ok(Some(data))
    }

    /// Inflate every remaining chunk into `writer`, returning the number of bytes written
    #[instrument(skip_all, err)]
    pub fn decompress_to<W: Write>(&mut self, mut writer: W) -> Result<u64> {
        let mut written = 0u64;
        while let Some(data) = self.read_chunk()? {
            writer.write_all(&data)?;
            written += data.len() as u64;
        }

        debug!(written, "decompressed container");
        Ok(written)
    }
}

/// Read and validate the 32 byte main header
#[instrument(skip_all, err)]
pub fn read_header<R: Read>(
    reader: &mut R,
    options: &DecompressOptions,
) -> Result<ContainerHeader> {
    let mut raw = [0u8; HEADER_SIZE];
    reader.read_exact(&mut raw).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => Error::from(FormatVersionError::TruncatedHeader),
        _ => Error::from(e),
    })?;

    let header = ContainerHeader::read(&mut Cursor::new(&raw))?;
    if header.magic != options.magic {
        return Err(FormatVersionError::UnrecognisedMagic {
            expected: options.magic,
            found: header.magic,
        }
        .into());
    }
    if header.version != FORMAT_VERSION {
        return Err(FormatVersionError::UnknownVersion(header.version).into());
    }

    debug!(?header, "read container header");
    Ok(header)
}

/// Read chunk headers until the totals of `header` are used up
///
/// Both running totals have to reach zero together, this is the only integrity check the format has.
#[instrument(skip_all, err)]
pub fn read_chunk_table<R: Read>(
    reader: &mut R,
    header: &ContainerHeader,
) -> Result<Vec<ChunkHeader>> {
    let mut compressed_left = i128::from(header.compressed_total);
    let mut uncompressed_left = i128::from(header.uncompressed_total);

    let mut chunks = Vec::new();
    while compressed_left > 0 || uncompressed_left > 0 {
        let mut raw = [0u8; CHUNK_HEADER_SIZE];
        reader.read_exact(&mut raw).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => Error::from(InconsistencyError::MissingChunkHeader {
                index: chunks.len(),
            }),
            _ => Error::from(e),
        })?;

        let chunk = ChunkHeader::read(&mut Cursor::new(&raw))?;
        compressed_left -= i128::from(chunk.compressed_size);
        uncompressed_left -= i128::from(chunk.uncompressed_size);
        chunks.push(chunk);
    }

    if uncompressed_left != 0 {
        return Err(InconsistencyError::UncompressedUnaccounted {
            remaining: uncompressed_left,
        }
        .into());
    }
    if compressed_left != 0 {
        return Err(InconsistencyError::ExcessCompressed {
            remaining: compressed_left,
        }
        .into());
    }

    debug!(chunks = chunks.len(), "read chunk table");
    Ok(chunks)
}

/// Read the main header and chunk table without touching the payload
pub fn inspect<R: Read>(reader: R, options: &DecompressOptions) -> Result<ContainerInfo> {
    Ok(ContainerReader::new(reader, options)?.info)
}

/// Decompress a whole container from `reader` into `writer`
pub fn decompress<R: Read, W: Write>(
    reader: R,
    writer: W,
    options: &DecompressOptions,
) -> Result<ContainerInfo> {
    let mut container = ContainerReader::new(reader, options)?;
    container.decompress_to(writer)?;
    Ok(container.info)
}

/// Decompress a container held in memory
pub fn decompress_bytes(data: &[u8], options: &DecompressOptions) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    decompress(data, &mut output, options)?;
    Ok(output)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::error::{DecompressionError, Error, FormatVersionError, InconsistencyError, Result};
    use crate::read::{decompress_bytes, inspect, ContainerReader, DecompressOptions};
    use crate::types::ChunkHeader;

    const HELLO_WORLD: [u8; 11] = [
        0x48, 0x65, 0x6C, 0x6C, 0x6F, 0x20, 0x57, 0x6F, 0x72, 0x6C, 0x64,
    ];

    #[rustfmt::skip]
    const HELLO_WORLD_CONTAINER: [u8; 67] = [
        // Header (32)
        0xC1, 0x83, 0x2A, 0x9E,
        0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x13, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x0B, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        // Chunks (16)
        0x13, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x0B, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        // Data (19)
        0x78, 0x9C,
        0xF3, 0x48, 0xCD, 0xC9, 0xC9, 0x57, 0x08, 0xCF, 0x2F, 0xCA, 0x49, 0x01, 0x00,
        0x18, 0x0B, 0x04, 0x1D,
    ];

    #[rustfmt::skip]
    const EMPTY_CONTAINER: [u8; 32] = [
        0xC1, 0x83, 0x2A, 0x9E,
        0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn read_single_chunk() -> Result<()> {
        let actual = decompress_bytes(&HELLO_WORLD_CONTAINER, &Default::default())?;
        assert_eq!(actual, HELLO_WORLD);

        Ok(())
    }

    #[test]
    fn read_empty_container() -> Result<()> {
        let info = inspect(&EMPTY_CONTAINER[..], &Default::default())?;
        assert!(info.is_empty());
        assert_eq!(decompress_bytes(&EMPTY_CONTAINER, &Default::default())?, b"");

        Ok(())
    }

    #[test]
    fn read_ignores_trailing_bytes() -> Result<()> {
        let mut input = HELLO_WORLD_CONTAINER.to_vec();
        input.extend_from_slice(b"trailing garbage");

        let actual = decompress_bytes(&input, &Default::default())?;
        assert_eq!(actual, HELLO_WORLD);

        Ok(())
    }

    #[test]
    fn read_chunk_by_chunk() -> Result<()> {
        let mut reader = ContainerReader::new(&HELLO_WORLD_CONTAINER[..], &Default::default())?;
        assert_eq!(
            reader.info().chunks,
            vec![ChunkHeader {
                compressed_size: 19,
                uncompressed_size: 11
            }]
        );
        assert_eq!(reader.remaining(), 1);

        assert_eq!(reader.read_chunk()?, Some(HELLO_WORLD.to_vec()));
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.read_chunk()?, None);

        Ok(())
    }

    #[test]
    fn read_invalid_magic() {
        let mut input = HELLO_WORLD_CONTAINER;
        input[0] = 0x40;

        let result = decompress_bytes(&input, &Default::default());
        assert!(matches!(
            result,
            Err(Error::FormatVersion(
                FormatVersionError::UnrecognisedMagic {
                    found: [0x40, 0x83, 0x2A, 0x9E],
                    ..
                }
            ))
        ));
    }

    #[test]
    fn read_with_substituted_magic() -> Result<()> {
        let mut input = HELLO_WORLD_CONTAINER;
        input[..4].copy_from_slice(b"TEST");

        let options = DecompressOptions::builder().magic(*b"TEST").build();
        assert_eq!(decompress_bytes(&input, &options)?, HELLO_WORLD);

        Ok(())
    }

    #[test]
    fn read_unknown_version() {
        let mut input = HELLO_WORLD_CONTAINER;
        input[4] = 0x01;

        let result = decompress_bytes(&input, &Default::default());
        assert!(matches!(
            result,
            Err(Error::FormatVersion(FormatVersionError::UnknownVersion(1)))
        ));
    }

    #[test]
    fn read_truncated_header() {
        for len in [0, 4, 8, 20, 31] {
            let result = decompress_bytes(&HELLO_WORLD_CONTAINER[..len], &Default::default());
            assert!(
                matches!(
                    result,
                    Err(Error::FormatVersion(FormatVersionError::TruncatedHeader))
                ),
                "length {len}"
            );
        }
    }

    #[test]
    fn read_truncated_chunk_table() {
        for len in [32, 40, 47] {
            let result = decompress_bytes(&HELLO_WORLD_CONTAINER[..len], &Default::default());
            assert!(
                matches!(
                    result,
                    Err(Error::Inconsistency(
                        InconsistencyError::MissingChunkHeader { index: 0 }
                    ))
                ),
                "length {len}"
            );
        }
    }

    #[test]
    fn read_totals_that_do_not_reconcile() {
        // Claims 20 compressed bytes while the only chunk has 19
        let mut input = HELLO_WORLD_CONTAINER;
        input[16] = 0x14;

        let result = decompress_bytes(&input[..48], &Default::default());
        assert!(matches!(
            result,
            Err(Error::Inconsistency(InconsistencyError::MissingChunkHeader {
                index: 1
            }))
        ));

        // Claims 10 uncompressed bytes, the chunk header over-subtracts
        let mut input = HELLO_WORLD_CONTAINER;
        input[24] = 0x0A;

        let result = decompress_bytes(&input, &Default::default());
        assert!(matches!(
            result,
            Err(Error::Inconsistency(
                InconsistencyError::UncompressedUnaccounted { remaining: -1 }
            ))
        ));

        // Claims 18 compressed bytes, the chunk header over-subtracts
        let mut input = HELLO_WORLD_CONTAINER;
        input[16] = 0x12;

        let result = decompress_bytes(&input, &Default::default());
        assert!(matches!(
            result,
            Err(Error::Inconsistency(InconsistencyError::ExcessCompressed {
                remaining: -1
            }))
        ));
    }

    #[test]
    fn read_truncated_payload() {
        let result = decompress_bytes(&HELLO_WORLD_CONTAINER[..60], &Default::default());
        assert!(matches!(
            result,
            Err(Error::Decompression(DecompressionError::TruncatedChunk {
                index: 0,
                expected: 19,
                actual: 12
            }))
        ));
    }

    #[test]
    fn read_chunk_size_is_advisory() -> Result<()> {
        let mut input = HELLO_WORLD_CONTAINER;
        input[8..16].copy_from_slice(&1u64.to_le_bytes());

        assert_eq!(decompress_bytes(&input, &Default::default())?, HELLO_WORLD);

        Ok(())
    }
}
