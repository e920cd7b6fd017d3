//! Types for writing compressed uasset containers
//!

use binrw::BinWrite;
use bon::Builder;
use flate2::Compression;
use std::io::{self, Cursor, Read, Write};
use tracing::{debug, instrument, Level};

use crate::compression::compress_chunk;
use crate::error::{Error, Result};
use crate::types::{
    ChunkHeader, ContainerHeader, ContainerInfo, DEFAULT_CHUNK_SIZE, FORMAT_VERSION, UNREAL_MAGIC,
};

/// Options for how the container should be written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder)]
pub struct CompressOptions {
    /// Size of the blocks the input is split into
    #[builder(default = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: u64,

    /// The signature written at the start of the container
    #[builder(default = UNREAL_MAGIC)]
    pub magic: [u8; 4],

    /// The zlib level used for every chunk
    #[builder(default)]
    pub level: Compression,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Compressed container generator
///
/// Input is cut into blocks of `chunk_size` bytes, each compressed on its own. Only the last block may be short,
/// and an input that is an exact multiple of the chunk size does not get a trailing empty chunk.
///
/// ```
/// # fn doit() -> ark_uasset::error::Result<()>
/// # {
/// use std::io::Write;
/// use ark_uasset::{CompressOptions, ContainerWriter};
///
/// let mut container = ContainerWriter::new(Vec::new(), CompressOptions::builder()
///            .chunk_size(4)
///            .build())?;
///
/// container.write_all(b"Hello, World!")?;
///
/// let (data, info) = container.finish_with_info()?;
/// assert_eq!(info.chunks.len(), 4);
/// assert_eq!(data.len() as u64, info.payload_start() + info.header.compressed_total);
///
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
pub struct ContainerWriter<W: Write> {
    inner: W,
    options: CompressOptions,
    block_size: usize,
    block: Vec<u8>,
    payload: Vec<u8>,
    header: ContainerHeader,
    chunks: Vec<ChunkHeader>,
}

impl<W: Write> ContainerWriter<W> {
    /// Initializes the container.
    ///
    /// Nothing reaches `inner` until [`ContainerWriter::finish`], since the header has to carry the totals.
    pub fn new(inner: W, options: CompressOptions) -> Result<ContainerWriter<W>> {
        let block_size = usize::try_from(options.chunk_size)
            .ok()
            .filter(|size| *size > 0)
            .ok_or(Error::InvalidChunkSize(options.chunk_size))?;

        Ok(ContainerWriter {
            inner,
            options,
            block_size,
            block: Vec::with_capacity(block_size.min(DEFAULT_CHUNK_SIZE as usize)),
            payload: Vec::new(),
            header: ContainerHeader {
                magic: options.magic,
                version: FORMAT_VERSION,
                chunk_size: options.chunk_size,
                ..Default::default()
            },
            chunks: Vec::new(),
        })
    }

    #[instrument(skip(self), fields(index = self.chunks.len()), err)]
    fn finish_block(&mut self) -> io::Result<()> {
        let compressed = compress_chunk(&self.block, self.options.level)?;

        let chunk = ChunkHeader {
            compressed_size: compressed.len() as u64,
            uncompressed_size: self.block.len() as u64,
        };
        self.header.compressed_total += chunk.compressed_size;
        self.header.uncompressed_total += chunk.uncompressed_size;

        self.chunks.push(chunk);
        self.payload.extend_from_slice(&compressed);
        self.block.clear();

        Ok(())
    }

    /// Compress any pending block and write the container to the inner writer
    pub fn finish(self) -> Result<W> {
        self.finish_with_info().map(|(inner, _)| inner)
    }

    /// Same as [`ContainerWriter::finish`], also returning the header and chunk table that were written
    #[instrument(skip(self), err)]
    pub fn finish_with_info(mut self) -> Result<(W, ContainerInfo)> {
        if !self.block.is_empty() {
            self.finish_block()?;
        }

        let mut tables = Cursor::new(Vec::new());
        self.header.write(&mut tables)?;
        for chunk in &self.chunks {
            chunk.write(&mut tables)?;
        }

        self.inner.write_all(tables.get_ref())?;
        self.inner.write_all(&self.payload)?;
        self.inner.flush()?;

        debug!(
            chunks = self.chunks.len(),
            compressed = self.header.compressed_total,
            uncompressed = self.header.uncompressed_total,
            "wrote container"
        );

        Ok((
            self.inner,
            ContainerInfo {
                header: self.header,
                chunks: self.chunks,
            },
        ))
    }
}

impl<W: Write> Write for ContainerWriter<W> {
    #[instrument(skip_all, err, ret(level = Level::TRACE), fields(size = buf.len()))]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let accepted = buf.len().min(self.block_size - self.block.len());
        self.block.extend_from_slice(&buf[..accepted]);

        if self.block.len() == self.block_size {
            self.finish_block()?;
        }

        Ok(accepted)
    }

    /// Blocks are only compressed once full, so this has nothing to push out
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Compress everything `reader` yields into a container on `writer`
#[instrument(skip_all, err)]
pub fn compress<R: Read, W: Write>(
    mut reader: R,
    writer: W,
    options: &CompressOptions,
) -> Result<ContainerInfo> {
    let mut container = ContainerWriter::new(writer, *options)?;
    io::copy(&mut reader, &mut container)?;

    let (_, info) = container.finish_with_info()?;
    Ok(info)
}

/// Compress a slice into an in-memory container
pub fn compress_bytes(data: &[u8], options: &CompressOptions) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    compress(data, &mut output, options)?;
    Ok(output)
}
