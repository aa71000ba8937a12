//! Issue types produced while composing the manifest and merging locales.
//!
//! Builders and locale engines never print. Every entry they drop and every string
//! they cannot translate is returned as an issue, and the CLI decides how to report
//! them. Each issue is self-contained with all information needed by the reporter.

use enum_dispatch::enum_dispatch;

use crate::core::error::ComposeError;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    SkippedEntry,
    NoEntries,
    MissingExample,
    MissingLocaleEntry,
    MissingTranslation,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::SkippedEntry => write!(f, "skipped-entry"),
            Rule::NoEntries => write!(f, "no-entries"),
            Rule::MissingExample => write!(f, "missing-example"),
            Rule::MissingLocaleEntry => write!(f, "missing-locale-entry"),
            Rule::MissingTranslation => write!(f, "missing-translation"),
        }
    }
}

/// Kind of manifest entry an issue refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Action,
    Trigger,
    Driver,
}

impl EntryKind {
    /// Plural section name, as used in locale stores.
    pub fn section(self) -> &'static str {
        match self {
            EntryKind::Action => "actions",
            EntryKind::Trigger => "triggers",
            EntryKind::Driver => "drivers",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Action => write!(f, "action"),
            EntryKind::Trigger => write!(f, "trigger"),
            EntryKind::Driver => write!(f, "driver"),
        }
    }
}

/// A position in a TypeScript source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file_path: String,
    pub line: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
        }
    }
}

// ============================================================
// Issue Types - Source files
// ============================================================

/// An entry that failed to build and was dropped from the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntryIssue {
    pub location: SourceLocation,
    pub kind: EntryKind,
    pub name: String,
    /// Display text of the underlying error.
    pub reason: String,
}

impl SkippedEntryIssue {
    pub fn new(location: SourceLocation, kind: EntryKind, name: &str, err: &ComposeError) -> Self {
        Self {
            location,
            kind,
            name: name.to_string(),
            reason: err.to_string(),
        }
    }

    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::SkippedEntry
    }
}

/// A source file that yielded no entries at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoEntriesIssue {
    pub file_path: String,
    pub kind: EntryKind,
}

impl NoEntriesIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::NoEntries
    }
}

// ============================================================
// Issue Types - Locale stores
// ============================================================

/// A text token or argument without an example; a placeholder was written instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingExampleIssue {
    pub locale: String,
    pub kind: EntryKind,
    pub entry_id: String,
    pub field: String,
}

impl MissingExampleIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingExample
    }
}

/// A locale store section lacks an entry of the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingLocaleEntryIssue {
    pub locale: String,
    pub kind: EntryKind,
    pub entry_id: String,
}

impl MissingLocaleEntryIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingLocaleEntry
    }
}

/// A manifest string with no value in a locale store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTranslationIssue {
    pub locale: String,
    /// Dotted path of the owning entry, e.g. `triggers.TooCold.zone`.
    pub path: String,
    /// `title`, `example`, `name` or `label`.
    pub field: String,
}

impl MissingTranslationIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingTranslation
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// An issue found while composing.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    SkippedEntry(SkippedEntryIssue),
    NoEntries(NoEntriesIssue),
    MissingExample(MissingExampleIssue),
    MissingLocaleEntry(MissingLocaleEntryIssue),
    MissingTranslation(MissingTranslationIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::SkippedEntry(_) => SkippedEntryIssue::severity(),
            Issue::NoEntries(_) => NoEntriesIssue::severity(),
            Issue::MissingExample(_) => MissingExampleIssue::severity(),
            Issue::MissingLocaleEntry(_) => MissingLocaleEntryIssue::severity(),
            Issue::MissingTranslation(_) => MissingTranslationIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::SkippedEntry(_) => SkippedEntryIssue::rule(),
            Issue::NoEntries(_) => NoEntriesIssue::rule(),
            Issue::MissingExample(_) => MissingExampleIssue::rule(),
            Issue::MissingLocaleEntry(_) => MissingLocaleEntryIssue::rule(),
            Issue::MissingTranslation(_) => MissingTranslationIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Declaration in a source file.
    Source(&'a SourceLocation),
    /// Source file as a whole.
    File { path: &'a str },
    /// Locale store of a language.
    Locale { code: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types; `enum_dispatch` forwards the calls on `Issue`.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for SkippedEntryIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.location)
    }

    fn message(&self) -> String {
        format!("{} '{}' skipped", self.kind, self.name)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(self.reason.clone())
    }
}

impl Report for NoEntriesIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        format!("no {} found", self.kind.section())
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("document the members of an interface or class with a /** */ comment")
    }
}

impl Report for MissingExampleIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Locale { code: &self.locale }
    }

    fn message(&self) -> String {
        format!(
            "{} '{}' has no example for '{}'",
            self.kind, self.entry_id, self.field
        )
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn hint(&self) -> Option<&str> {
        Some("add #sample:<value> to the parameter description")
    }
}

impl Report for MissingLocaleEntryIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Locale { code: &self.locale }
    }

    fn message(&self) -> String {
        format!("missing {} entry '{}'", self.kind, self.entry_id)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for MissingTranslationIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Locale { code: &self.locale }
    }

    fn message(&self) -> String {
        ComposeError::MissingTranslation {
            locale: self.locale.clone(),
            path: self.path.clone(),
            field: self.field.clone(),
        }
        .to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}
