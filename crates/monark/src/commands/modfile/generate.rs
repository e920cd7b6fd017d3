use ark_mod::{generate::DEFAULT_MOD_PATH_TEMPLATE, generate_modfile, GeneratorOptions};
use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::{io::Write, path::PathBuf};
use tracing::info;

use crate::commands::create_file;

#[derive(Args)]
pub struct GenerateArgs {
    /// The workshop id of the mod
    #[arg(long, value_name = "ID")]
    id: u64,

    /// The mod's `mod.info` file
    #[arg(long, value_name = "FILE")]
    info: PathBuf,

    /// The mod's `modmeta.info` file, if it has one
    #[arg(long, value_name = "FILE")]
    meta: Option<PathBuf>,

    /// Where the game finds the mod's content, `{modid}` is replaced with the id
    #[arg(long, value_name = "TEMPLATE", default_value = DEFAULT_MOD_PATH_TEMPLATE)]
    path_template: String,

    /// A target `.mod` file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl GenerateArgs {
    pub fn handle(&self) -> Result<()> {
        let mod_info = std::fs::read(&self.info)
            .into_diagnostic()
            .context(format!("path: {}", &self.info.display()))?;

        let mod_meta = match &self.meta {
            Some(path) => Some(
                std::fs::read(path)
                    .into_diagnostic()
                    .context(format!("path: {}", path.display()))?,
            ),
            None => None,
        };

        let options = GeneratorOptions::builder()
            .path_template(self.path_template.clone())
            .build();
        let modfile = generate_modfile(self.id, &mod_info, mod_meta.as_deref(), &options)
            .context(format!("generating {}.mod", self.id))?;

        info!("writing {}", &self.output.display());
        let mut out = create_file(&self.output, self.overwrite)?;
        out.write_all(&modfile)
            .into_diagnostic()
            .context(format!("writing {}", &self.output.display()))?;

        Ok(())
    }
}
