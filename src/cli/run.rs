/// Dispatches to the appropriate command handler based on the parsed arguments.
///
/// # Returns
/// - `Ok(CommandResult)` with error/warning counts and exit behavior
/// - `Err` if the command fails (e.g., invalid config, unreadable or unparsable input)
use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, generate::generate, init::init, show::show},
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Show(args)) => show(args),
        Some(Command::Generate(args)) => generate(args),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
