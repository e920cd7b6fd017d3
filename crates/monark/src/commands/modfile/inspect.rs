use ark_mod::{Decode, ModFile, ModInfo, ModMetaInfo, MODFILE_MAGIC};
use clap::{Args, ValueEnum};
use miette::{miette, Context, IntoDiagnostic, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Kind {
    /// `mod.info`
    Info,
    /// `modmeta.info`
    Meta,
    /// `<modid>.mod`
    Mod,
}

impl Kind {
    fn from_path(path: &Path) -> Option<Kind> {
        match path.file_name()?.to_str()? {
            "mod.info" => Some(Kind::Info),
            "modmeta.info" => Some(Kind::Meta),
            name if name.ends_with(".mod") => Some(Kind::Mod),
            _ => None,
        }
    }
}

#[derive(Args)]
pub struct InspectArgs {
    /// An input file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// The kind of record, guessed from the file name if omitted
    #[arg(short, long, value_enum)]
    kind: Option<Kind>,
}

impl InspectArgs {
    pub fn handle(&self) -> Result<()> {
        let kind = self
            .kind
            .or_else(|| Kind::from_path(&self.file))
            .ok_or(miette!(
                "unable to tell the kind of {}, pass --kind",
                self.file.display()
            ))?;

        let data = std::fs::read(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;

        let json = match kind {
            Kind::Info => serde_json::to_string_pretty(&ModInfo::from_bytes(&data)?),
            Kind::Meta => serde_json::to_string_pretty(&ModMetaInfo::from_bytes(&data)?),
            Kind::Mod => {
                let modfile = ModFile::from_bytes(&data)?;
                if let Err(mismatch) = modfile.check_magic(&MODFILE_MAGIC) {
                    warn!("{}", mismatch);
                }
                serde_json::to_string_pretty(&modfile)
            }
        }
        .into_diagnostic()?;

        println!("{}", json);
        Ok(())
    }
}
