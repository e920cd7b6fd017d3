pub mod generate;
pub mod inspect;

#[derive(clap::Subcommand)]
pub enum ModCommands {
    /// Generate a `<modid>.mod` file from a mod's description files
    Generate(generate::GenerateArgs),
    /// Print a mod description or registration file as JSON
    Inspect(inspect::InspectArgs),
}

impl ModCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            ModCommands::Generate(generate) => generate.handle(),
            ModCommands::Inspect(inspect) => inspect.handle(),
        }
    }
}
