use anyhow::Result;

use super::{CommandResult, CommandSummary, ShowSummary, helper::finish};
use crate::{
    cli::args::ShowArgs,
    core::{ComposeContext, parsers::json::to_json_string},
};

/// Compose the canonical manifest without touching any file.
pub fn show(args: ShowArgs) -> Result<CommandResult> {
    let ctx = ComposeContext::new(&args.common)?;
    let composition = ctx.compose()?;

    let minify = args.minify || ctx.config.minify;
    let manifest = to_json_string(&composition.app, minify)?;

    Ok(finish(
        CommandSummary::Show(ShowSummary { manifest }),
        composition.issues,
        composition.source_files,
        0,
        false,
    ))
}
