//! This library handles reading from and creating the compressed **uasset** containers used by
//! *ARK: Survival Evolved* mods.
//!
//! # Container Format Documentation
//!
//! Mod assets are shipped compressed inside a small framing layer over zlib. These files are typically
//! identified with the `.z` extension (`Dino.uasset.z`) and come with a `.uncompressed_size` sidecar, see
//! [`sidecar`].
//!
//! ## File Structure
//!
//! A container consists of a main header, a table of chunk headers, and the chunk payloads.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: 0x9E2A83C1, the "unreal signature"                |
//! | 0x0004         | Version                | 4 bytes: Fixed value 0x00000000                            |
//! | 0x0008         | Chunk Size             | 8 bytes: Block size used while compressing                 |
//! | 0x0010         | Compressed Total       | 8 bytes: Sum of all compressed chunk sizes                 |
//! | 0x0018         | Uncompressed Total     | 8 bytes: Sum of all uncompressed chunk sizes               |
//!
//! ### Chunk Table
//!
//! Directly after the main header follow 16 byte chunk headers. There is no count, headers are read until the
//! sizes read so far account for both totals exactly.
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Compressed Size        | 8 bytes: Size of the chunk's zlib run                   |
//! | 0x0008         | Uncompressed Size      | 8 bytes: Size of the chunk once inflated                |
//!
//! - **Chunk Size**: Every chunk but the last one holds this many uncompressed bytes. Readers do not rely on it.
//! - If the totals are over-subtracted the chunk table is corrupt and reading stops.
//!
//! ### Payload
//!
//! The zlib runs follow the chunk table back to back, in table order, with no padding. Each run is an independent
//! zlib stream. There is no checksum over the container, the total reconciliation and the per chunk length check
//! are all the validation available.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.z`
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Compression**: zlib, one stream per chunk
//!

mod compression;
pub mod error;
pub mod read;
pub mod sidecar;
pub mod types;
pub mod write;

pub use read::{decompress, decompress_bytes, inspect, ContainerReader, DecompressOptions};
pub use types::{ChunkHeader, ContainerHeader, ContainerInfo};
pub use write::{compress, compress_bytes, CompressOptions, ContainerWriter};
