use ark_uasset::sidecar::{decompressed_path, is_compressed_path};
use clap::Args;
use miette::{miette, Context, IntoDiagnostic, Result};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};
use tracing::{error, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::commands::uassetz::decompress_or_discard;

#[derive(Args)]
pub struct UnpackArgs {
    /// A mod directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// Keep the compressed files
    #[arg(long, default_value_t = false)]
    keep: bool,
}

impl UnpackArgs {
    fn unpack_file(&self, source: &Path, target: &Path) -> Result<()> {
        info!("writing {}", target.display());

        let input = File::open(source)
            .into_diagnostic()
            .context(format!("path: {}", source.display()))?;
        let output = File::create(target)
            .into_diagnostic()
            .context(format!("creating {}", target.display()))?;

        decompress_or_discard(BufReader::new(input), BufWriter::new(output), Some(target))
            .context(format!("decompressing {}", source.display()))?;

        if !self.keep {
            std::fs::remove_file(source)
                .into_diagnostic()
                .context(format!("removing {}", source.display()))?;
        }
        Ok(())
    }

    /// Containers below the directory, and how many entries could not be read
    fn find_containers(&self) -> (Vec<DirEntry>, usize) {
        let mut files = Vec::new();
        let mut unreadable = 0;

        for entry in WalkDir::new(&self.directory) {
            match entry {
                Ok(e) if !e.file_type().is_dir() && is_compressed_path(e.path()) => files.push(e),
                Ok(_) => {}
                Err(e) => {
                    warn!("skipping: {}", e);
                    unreadable += 1;
                }
            }
        }

        (files, unreadable)
    }

    pub fn handle(&self) -> Result<()> {
        let (files, unreadable) = self.find_containers();

        let mut failed = unreadable;
        for file in &files {
            let Some(target) = decompressed_path(file.path()) else {
                continue;
            };

            if let Err(report) = self.unpack_file(file.path(), &target) {
                error!("{:?}", report);
                failed += 1;
            }
        }

        if failed > 0 {
            return Err(miette!(
                "{failed} of {} entries could not be unpacked",
                files.len() + unreadable
            ));
        }

        info!("unpacked {} containers", files.len());
        Ok(())
    }
}
