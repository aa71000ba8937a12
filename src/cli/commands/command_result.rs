use std::path::PathBuf;

use crate::issues::Issue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Show,
    Generate,
    Init,
}

#[derive(Debug)]
pub enum CommandSummary {
    Show(ShowSummary),
    Generate(GenerateSummary),
    Init(InitSummary),
}

impl CommandSummary {
    pub fn kind(&self) -> CommandKind {
        match self {
            CommandSummary::Show(_) => CommandKind::Show,
            CommandSummary::Generate(_) => CommandKind::Generate,
            CommandSummary::Init(_) => CommandKind::Init,
        }
    }
}

#[derive(Debug)]
pub struct ShowSummary {
    /// Serialized manifest, printed to stdout.
    pub manifest: String,
}

#[derive(Debug)]
pub struct GenerateSummary {
    pub target: PathBuf,
    pub base_locale: PathBuf,
    pub trigger_count: usize,
    pub action_count: usize,
    pub driver_count: usize,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

/// Result of running a command
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    /// If false, always exit 0 (issues are reported but do not fail the run).
    pub exit_on_errors: bool,
    /// All issues found while composing.
    pub issues: Vec<Issue>,
    /// Number of TypeScript source files that were read.
    pub source_files: usize,
    /// Number of locale files that were processed.
    /// 0 if localization was not performed.
    pub locale_files: usize,
}
