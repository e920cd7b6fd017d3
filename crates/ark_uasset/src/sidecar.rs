//! Helpers for the `.uncompressed_size` files that ship next to each compressed asset.
//!
//! The sidecar holds the inflated length as plain decimal text. Decompression never reads it, the container's
//! own chunk table is authoritative.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::instrument;

use crate::error::{Error, Result};

/// Extension of compressed asset files
pub const COMPRESSED_EXTENSION: &str = "z";

/// Extension appended to a compressed file's name for its sidecar
pub const SIDECAR_EXTENSION: &str = "uncompressed_size";

/// Whether `path` names a compressed asset (`*.z`)
pub fn is_compressed_path(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == COMPRESSED_EXTENSION)
}

/// Whether `path` names a sidecar (`*.uncompressed_size`)
pub fn is_sidecar_path(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == SIDECAR_EXTENSION)
}

/// The sidecar path for a compressed asset, `foo.uasset.z` becomes `foo.uasset.z.uncompressed_size`
pub fn sidecar_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(SIDECAR_EXTENSION);
    PathBuf::from(name)
}

/// Where a compressed asset decompresses to, `foo.uasset.z` becomes `foo.uasset`
pub fn decompressed_path(path: &Path) -> Option<PathBuf> {
    is_compressed_path(path).then(|| path.with_extension(""))
}

/// Render a sidecar body
pub fn format_sidecar(uncompressed_size: u64) -> String {
    uncompressed_size.to_string()
}

/// Parse a sidecar body, surrounding whitespace is ignored
pub fn parse_sidecar(text: &str) -> Result<u64> {
    text.trim()
        .parse()
        .map_err(|source| Error::InvalidSidecar {
            text: text.to_owned(),
            source,
        })
}

/// Write the sidecar for the compressed asset at `path`
#[instrument(err)]
pub fn write_sidecar(path: &Path, uncompressed_size: u64) -> Result<PathBuf> {
    let sidecar = sidecar_path(path);
    std::fs::write(&sidecar, format_sidecar(uncompressed_size))?;
    Ok(sidecar)
}

/// Read the sidecar for the compressed asset at `path`
#[instrument(err)]
pub fn read_sidecar(path: &Path) -> Result<u64> {
    parse_sidecar(&std::fs::read_to_string(sidecar_path(path))?)
}
