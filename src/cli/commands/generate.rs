use anyhow::Result;
use tracing::info;

use super::{CommandResult, CommandSummary, GenerateSummary, helper::finish};
use crate::{
    cli::args::GenerateArgs,
    core::{ComposeContext, parsers::json::write_json},
};

/// Compose the manifest, refresh the base locale, inject every locale and write the
/// target file.
pub fn generate(args: GenerateArgs) -> Result<CommandResult> {
    let mut ctx = ComposeContext::new(&args.common)?;
    if let Some(target) = &args.target {
        ctx.config.target = target.to_string_lossy().to_string();
    }

    let composition = ctx.compose()?;
    let mut app = composition.app;
    let mut issues = composition.issues;

    let localization = ctx.localize(&mut app)?;
    issues.extend(localization.issues);

    let target = ctx.resolve(&ctx.config.target);
    write_json(&target, &app, args.minify || ctx.config.minify)?;
    info!("Wrote {}", target.display());

    let summary = GenerateSummary {
        target,
        base_locale: localization.base_path,
        trigger_count: app.flow.triggers.len(),
        action_count: app.flow.actions.len(),
        driver_count: app.drivers.len(),
    };
    Ok(finish(
        CommandSummary::Generate(summary),
        issues,
        composition.source_files,
        localization.locale_files,
        args.strict,
    ))
}
