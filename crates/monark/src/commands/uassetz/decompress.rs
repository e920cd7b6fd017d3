use clap::Args;
use miette::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::commands::{create_output, open_input, uassetz::decompress_or_discard};

#[derive(Args)]
pub struct DecompressArgs {
    /// An input container, stdin if omitted
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// A target file, stdout if omitted
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl DecompressArgs {
    pub fn handle(&self) -> Result<()> {
        let input = open_input(self.input.as_deref())?;
        let output = create_output(self.output.as_deref(), self.overwrite)?;

        let container = decompress_or_discard(input, output, self.output.as_deref())
            .context("decompressing")?;

        info!(
            chunks = container.len(),
            uncompressed = container.header.uncompressed_total,
            "decompressed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use ark_uasset::{compress_bytes, CompressOptions};
    use miette::{IntoDiagnostic, Result};
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use crate::commands::uassetz::{corrupt_container, decompress::DecompressArgs};

    #[traced_test]
    #[test]
    fn failed_decompression_removes_output() -> Result<()> {
        let dir = tempfile::tempdir().into_diagnostic()?;
        let input = dir.path().join("a.uasset.z");
        let output = dir.path().join("a.uasset");
        std::fs::write(&input, corrupt_container()).into_diagnostic()?;

        let args = DecompressArgs {
            input: Some(input.clone()),
            output: Some(output.clone()),
            overwrite: false,
        };
        assert!(args.handle().is_err());
        assert!(!output.exists());

        // A retry without --overwrite is not blocked by leftovers
        let container = compress_bytes(b"Hello World", &CompressOptions::default())?;
        std::fs::write(&input, container).into_diagnostic()?;
        args.handle()?;
        assert_eq!(std::fs::read(&output).into_diagnostic()?, b"Hello World");

        Ok(())
    }
}
