use ark_uasset::{decompress, ContainerInfo, DecompressOptions};
use miette::{IntoDiagnostic, Report, Result};
use std::{
    io::{Read, Write},
    path::Path,
};
use tracing::warn;

pub mod compress;
pub mod decompress;
pub mod info;
pub mod unpack;

#[derive(clap::Subcommand)]
pub enum UassetzCommands {
    /// Compress a file into a container
    #[command(visible_alias = "c")]
    Compress(compress::CompressArgs),
    /// Decompress a container
    #[command(visible_alias = "x")]
    Decompress(decompress::DecompressArgs),
    /// Show the header and chunk table of a container
    #[command(visible_alias = "t")]
    Info(info::InfoArgs),
    /// Decompress every container in a directory tree in place
    Unpack(unpack::UnpackArgs),
}

impl UassetzCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            UassetzCommands::Compress(compress) => compress.handle(),
            UassetzCommands::Decompress(decompress) => decompress.handle(),
            UassetzCommands::Info(info) => info.handle(),
            UassetzCommands::Unpack(unpack) => unpack.handle(),
        }
    }
}

/// Decompress `input` into `output`, removing the file at `path` again if that fails part way
pub(crate) fn decompress_or_discard<R: Read, W: Write>(
    input: R,
    mut output: W,
    path: Option<&Path>,
) -> Result<ContainerInfo> {
    let result = decompress(input, &mut output, &DecompressOptions::default())
        .map_err(Report::from)
        .and_then(|container| {
            output.flush().into_diagnostic()?;
            Ok(container)
        });
    drop(output);

    if let (Err(_), Some(path)) = (&result, path) {
        if let Err(e) = std::fs::remove_file(path) {
            warn!("unable to remove {}: {}", path.display(), e);
        }
    }
    result
}

#[cfg(test)]
pub(crate) fn corrupt_container() -> Vec<u8> {
    use ark_uasset::{compress_bytes, inspect, CompressOptions};

    let data = (0..0x400u32).map(|i| (i * 7 % 251) as u8).collect::<Vec<_>>();
    let options = CompressOptions::builder().chunk_size(0x100).build();
    let mut container = compress_bytes(&data, &options).unwrap();

    // The first chunk stays intact, the second is not a zlib stream
    let info = inspect(container.as_slice(), &DecompressOptions::default()).unwrap();
    let start = (info.payload_start() + info.chunks[0].compressed_size) as usize;
    let end = start + info.chunks[1].compressed_size as usize;
    container[start..end].fill(0xFF);
    container
}
