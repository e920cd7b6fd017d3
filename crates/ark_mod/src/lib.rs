//! This library handles reading from and creating the mod description files used by *ARK: Survival Evolved*.
//!
//! # Mod File Format Documentation
//!
//! A mod downloaded from the workshop ships two small description files next to its content, `mod.info` and
//! optionally `modmeta.info`. Before the game server will load the mod it needs a registration file named
//! `<modid>.mod` next to the mod's directory. This crate decodes the description files and generates the
//! registration file from them.
//!
//! ## Primitives
//!
//! All three files are built from the same three primitives.
//!
//! | Primitive      | Layout                                                                              |
//! |----------------|-------------------------------------------------------------------------------------|
//! | String         | 4 bytes: Length `L`, including the terminator, then `L - 1` bytes, then a null byte |
//! | String Array   | 4 bytes: Count `N`, then `N` strings                                                |
//! | Metadata       | 4 bytes: Count `N`, then `N` pairs of key string and value string                   |
//!
//! - **String**: The terminator is written but not checked when reading, the last of the `L` bytes is dropped
//!   whatever it holds. A length of zero reads as an empty string. Contents are opaque bytes, usually UTF-8.
//! - **Metadata**: Keys may repeat, lookups take the last entry.
//!
//! ## mod.info
//!
//! | Field                  | Description                                             |
//! |------------------------|---------------------------------------------------------|
//! | Mod Name               | String: Display name of the mod                         |
//! | Map Filenames          | String Array: Maps shipped by the mod                   |
//! | Trailer                | 8 bytes: Unknown, not carried into the `.mod` file      |
//!
//! ## modmeta.info
//!
//! | Field                  | Description                                             |
//! |------------------------|---------------------------------------------------------|
//! | Entries                | Metadata: Usually holds at least `ModType`              |
//!
//! ## \<modid\>.mod
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Mod Id                 | 8 bytes: Workshop id of the mod                            |
//! | 0x0008         | Mod Name               | String: Copied from `mod.info`                             |
//! | variable       | Mod Path               | String: Content path, see below                            |
//! | variable       | Map Filenames          | String Array: Copied from `mod.info`                       |
//! | variable       | Magic                  | 8 bytes: `33 FF 22 FF 02 00 00 00`                         |
//! | variable       | Mod Type               | 1 byte: Numeric value of the `ModType` metadata entry      |
//! | variable       | Metadata               | Metadata: Copied from `modmeta.info`                       |
//!
//! - **Mod Path**: `../../../ShooterGame/Content/Mods/<modid>`, relative to the server binaries.
//! - **Mod Type**: Without `modmeta.info` the metadata is `ModType = 1`. If the entry is missing it is appended
//!   with the value `1`.
//!
//! ## Additional Information
//!
//! - **Endianness**: Little-endian for all multi-byte integers
//!

pub mod error;
pub mod generate;
pub mod read;
#[cfg(feature = "serde")]
mod serde;
pub mod types;
pub mod write;

pub use generate::{build_modfile, generate_modfile, GeneratorOptions};
pub use read::{decode_string, Decode, RecordReader};
pub use types::{ArkString, Metadata, ModFile, ModInfo, ModMetaInfo, StringArray, MODFILE_MAGIC};
pub use write::{encode_string, Encode, WriteRecordExt};
