//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `show`: Compose the manifest and print it to stdout
//! - `generate`: Compose, refresh the base locale, inject all locales and write the target
//! - `init`: Initialize the configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Show(cmd)) => cmd.common.verbose,
            Some(Command::Generate(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project root directory, where the config file search starts
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// package.json path (overrides config file)
    #[arg(long)]
    pub package_file: Option<PathBuf>,

    /// Baseline app manifest path (overrides config file)
    #[arg(long)]
    pub app_file: Option<PathBuf>,

    /// Trigger source file (overrides config file)
    #[arg(long)]
    pub trigger_file: Option<PathBuf>,

    /// Action source file (overrides config file)
    #[arg(long)]
    pub action_file: Option<PathBuf>,

    /// Drivers directory (overrides config file)
    #[arg(long)]
    pub drivers_root: Option<PathBuf>,

    /// Locales directory (overrides config file)
    #[arg(long)]
    pub locales_root: Option<PathBuf>,

    /// Base locale (overrides config file)
    #[arg(long)]
    pub primary_locale: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print the manifest on a single line
    #[arg(long)]
    pub minify: bool,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Write the manifest on a single line
    #[arg(long)]
    pub minify: bool,

    /// Output manifest path (overrides config file)
    #[arg(long)]
    pub target: Option<PathBuf>,

    /// Exit with status 1 when an entry had to be skipped
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compose the app manifest and print it
    Show(ShowArgs),
    /// Compose the app manifest, update locales and write the target file
    Generate(GenerateArgs),
    /// Initialize a new .homeycomposerc.json configuration file
    Init,
}
