use ark_uasset::{inspect, ContainerInfo, DecompressOptions};
use clap::Args;
use itertools::Itertools;
use miette::{Context, Result};
use owo_colors::{OwoColorize, Stream::Stdout};
use std::path::PathBuf;

use crate::commands::open_input;

/// File offset of each chunk's zlib run, clamped at `u64::MAX` for tables that claim more
fn chunk_offsets(container: &ContainerInfo) -> Vec<u64> {
    container
        .chunks
        .iter()
        .scan(container.payload_start(), |offset, chunk| {
            let start = *offset;
            *offset = offset.saturating_add(chunk.compressed_size);
            Some(start)
        })
        .collect()
}

#[derive(Args)]
pub struct InfoArgs {
    /// An input container, stdin if omitted
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let input = open_input(self.input.as_deref())?;
        let container =
            inspect(input, &DecompressOptions::default()).context("reading chunk table")?;
        let header = &container.header;

        println!(
            "{}",
            "header".if_supports_color(Stdout, |text| text.bold())
        );
        println!("  magic:        {:02X?}", header.magic);
        println!("  version:      {}", header.version);
        println!("  chunk size:   {:#X}", header.chunk_size);
        println!("  compressed:   {}", header.compressed_total);
        println!("  uncompressed: {}", header.uncompressed_total);

        println!(
            "{} ({})",
            "chunks".if_supports_color(Stdout, |text| text.bold()),
            container.len()
        );
        println!(
            "{}",
            container
                .chunks
                .iter()
                .zip(chunk_offsets(&container))
                .enumerate()
                .map(|(index, (chunk, offset))| format!(
                    "  {index:>4}  @{offset:#010X}  {:>8} -> {:>8}",
                    chunk.compressed_size, chunk.uncompressed_size
                ))
                .join("\n")
        );

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use ark_uasset::{ChunkHeader, ContainerHeader, ContainerInfo};
    use pretty_assertions::assert_eq;

    use crate::commands::uassetz::info::chunk_offsets;

    fn chunk(compressed_size: u64) -> ChunkHeader {
        ChunkHeader {
            compressed_size,
            uncompressed_size: 1,
        }
    }

    #[test]
    fn offsets_follow_the_chunk_table() {
        let container = ContainerInfo {
            header: ContainerHeader::default(),
            chunks: vec![chunk(10), chunk(20), chunk(5)],
        };

        assert_eq!(chunk_offsets(&container), [80, 90, 110]);
    }

    #[test]
    fn offsets_saturate_on_huge_tables() {
        let container = ContainerInfo {
            header: ContainerHeader::default(),
            chunks: vec![chunk(u64::MAX - 8), chunk(u64::MAX), chunk(1)],
        };

        assert_eq!(chunk_offsets(&container), [80, u64::MAX, u64::MAX]);
    }
}
