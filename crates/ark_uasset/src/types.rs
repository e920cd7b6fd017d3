//! Base types for structure of a compressed uasset container.

use binrw::{BinRead, BinWrite};

/// The "unreal signature" `0x9E2A83C1`, stored little endian
pub const UNREAL_MAGIC: [u8; 4] = [0xC1, 0x83, 0x2A, 0x9E];

/// The only container version in circulation
pub const FORMAT_VERSION: u32 = 0;

/// Chunk size used by every ARK mod seen so far
pub const DEFAULT_CHUNK_SIZE: u64 = 0x20000;

/// Size in bytes of [`ContainerHeader`] on disk
pub const HEADER_SIZE: usize = 32;

/// Size in bytes of [`ChunkHeader`] on disk
pub const CHUNK_HEADER_SIZE: usize = 16;

/// Container main header
///
/// Starts with the signature and version, followed by the nominal chunk size and the totals the chunk table
/// has to add up to. All data is stored in little endian format
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct ContainerHeader {
    /// The container signature, see [`UNREAL_MAGIC`]
    pub magic: [u8; 4],

    /// The container version, see [`FORMAT_VERSION`]
    pub version: u32,

    /// The block size used while compressing
    ///
    /// Only advisory, decoding relies on the sizes in each [`ChunkHeader`]
    pub chunk_size: u64,

    /// Sum of the compressed size of every chunk
    pub compressed_total: u64,

    /// Sum of the uncompressed size of every chunk
    pub uncompressed_total: u64,
}

impl Default for ContainerHeader {
    fn default() -> Self {
        Self {
            magic: UNREAL_MAGIC,
            version: FORMAT_VERSION,
            chunk_size: DEFAULT_CHUNK_SIZE,
            compressed_total: Default::default(),
            uncompressed_total: Default::default(),
        }
    }
}

/// Container chunk header
///
/// Describes one independently compressed zlib run in the payload area
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct ChunkHeader {
    /// The size of this chunk's zlib run
    pub compressed_size: u64,

    /// The size of this chunk once inflated
    pub uncompressed_size: u64,
}

/// Everything in a container except the payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerInfo {
    /// The main header
    pub header: ContainerHeader,

    /// The chunk table, in payload order
    pub chunks: Vec<ChunkHeader>,
}

impl ContainerInfo {
    /// Number of chunks in the container
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the container holds no chunks
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Offset of the first payload byte from the start of the container
    pub fn payload_start(&self) -> u64 {
        (HEADER_SIZE + CHUNK_HEADER_SIZE * self.chunks.len()) as u64
    }
}
