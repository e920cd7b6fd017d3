use ark_uasset::{compress, sidecar::write_sidecar, types::DEFAULT_CHUNK_SIZE, CompressOptions};
use clap::Args;
use miette::{miette, Context, IntoDiagnostic, Result};
use std::{io::Write, path::PathBuf};
use tracing::info;

use crate::commands::{create_output, open_input};

#[derive(Args)]
pub struct CompressArgs {
    /// An input file, stdin if omitted
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// A target container, stdout if omitted
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Size of the blocks compressed independently
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: u64,

    /// Also write `<output>.uncompressed_size`
    #[arg(long, default_value_t = false, requires = "output")]
    sidecar: bool,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl CompressArgs {
    pub fn handle(&self) -> Result<()> {
        let input = open_input(self.input.as_deref())?;
        let mut output = create_output(self.output.as_deref(), self.overwrite)?;

        let options = CompressOptions::builder().chunk_size(self.chunk_size).build();
        let container = compress(input, &mut output, &options).context("compressing")?;
        output.flush().into_diagnostic()?;

        info!(
            chunks = container.len(),
            compressed = container.header.compressed_total,
            uncompressed = container.header.uncompressed_total,
            "compressed"
        );

        if self.sidecar {
            let path = self
                .output
                .as_deref()
                .ok_or(miette!("a sidecar needs an output file"))?;
            let sidecar = write_sidecar(path, container.header.uncompressed_total)?;
            info!("writing {}", sidecar.display());
        }

        Ok(())
    }
}
