//! Report formatting and printing utilities.
//!
//! Issues are printed in cargo-style format to stderr so that `show` output on stdout
//! stays a clean JSON document. Separate from core logic to allow the engine to be used
//! as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary, GenerateSummary, InitSummary};
use crate::config::CONFIG_FILE_NAME;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to stderr.
pub fn report(issues: &[Issue]) {
    report_to(issues, &mut io::stderr().lock());
}

/// Print issues to a custom writer.
///
/// Useful for testing or redirecting output.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort_by(compare_issues);

    for issue in &sorted {
        print_issue(issue, writer);
    }

    print_summary(&sorted, writer);
}

pub fn print(result: &CommandResult) {
    match &result.summary {
        CommandSummary::Show(summary) => {
            report(&result.issues);
            println!("{}", summary.manifest);
        }
        CommandSummary::Generate(summary) => {
            report(&result.issues);
            print_generate_to(summary, result, &mut io::stderr().lock());
        }
        CommandSummary::Init(summary) => {
            print_init(summary);
        }
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    let _ = writeln!(
        writer,
        "  {} {}",
        "-->".blue(),
        location_label(&issue.location())
    );

    if let Some(details) = issue.details() {
        let _ = writeln!(writer, "  {} {} {}", "=".blue(), "note:".bold(), details);
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(writer, "  {} {} {}", "=".blue(), "hint:".bold().cyan(), hint);
    }

    let _ = writeln!(writer); // Empty line between issues
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

fn print_generate_to<W: Write>(summary: &GenerateSummary, result: &CommandResult, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Wrote {} ({} triggers, {} actions, {} drivers from {} source {})",
            summary.target.display(),
            summary.trigger_count,
            summary.action_count,
            summary.driver_count,
            result.source_files,
            if result.source_files == 1 { "file" } else { "files" }
        )
        .green()
    );
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Updated {} ({} locale {})",
            summary.base_locale.display(),
            result.locale_files,
            if result.locale_files == 1 { "file" } else { "files" }
        )
        .green()
    );
}

fn print_init(summary: &InitSummary) {
    if let Some(error) = &summary.error {
        eprintln!("{} {}", "error:".bold().red(), error);
    } else if summary.created {
        println!(
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
}

fn location_label(loc: &ReportLocation<'_>) -> String {
    match loc {
        ReportLocation::Source(source) => format!("{}:{}", source.file_path, source.line),
        ReportLocation::File { path } => path.to_string(),
        ReportLocation::Locale { code } => format!("locale '{}'", code),
    }
}

/// Sort key: source issues first by path and line, then whole files, then locales.
fn sort_key<'a>(loc: &ReportLocation<'a>) -> (u8, &'a str, usize) {
    match *loc {
        ReportLocation::Source(source) => (0, source.file_path.as_str(), source.line),
        ReportLocation::File { path } => (1, path, 0),
        ReportLocation::Locale { code } => (2, code, 0),
    }
}

fn compare_issues(a: &Issue, b: &Issue) -> std::cmp::Ordering {
    sort_key(&a.location()).cmp(&sort_key(&b.location()))
}
