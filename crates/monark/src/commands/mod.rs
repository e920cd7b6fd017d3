use std::{
    fs::File,
    io::{self, Read, Write},
    path::Path,
};

use miette::{Context, IntoDiagnostic, Result};

pub mod modfile;
pub mod uassetz;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle compressed uasset containers
    Uassetz {
        #[command(subcommand)]
        command: uassetz::UassetzCommands,
    },
    /// Handle mod description and registration files
    Mod {
        #[command(subcommand)]
        command: modfile::ModCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Uassetz { command } => command.handle(),
            Commands::Mod { command } => command.handle(),
        }
    }
}

/// Open `path` for reading, or stdin when there is none
pub(crate) fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
    match path {
        Some(path) => {
            let f = File::open(path)
                .into_diagnostic()
                .context(format!("path: {}", path.display()))?;
            Ok(Box::new(f))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Create `path` for writing, or stdout when there is none
pub(crate) fn create_output(path: Option<&Path>, overwrite: bool) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(create_file(path, overwrite)?)),
        None => Ok(Box::new(io::stdout().lock())),
    }
}

pub(crate) fn create_file(path: &Path, overwrite: bool) -> Result<File> {
    if !overwrite {
        File::create_new(path)
            .into_diagnostic()
            .context(format!("creating {}", path.display()))
    } else {
        File::create(path)
            .into_diagnostic()
            .context(format!("creating {}", path.display()))
    }
}
