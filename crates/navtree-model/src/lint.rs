//! Structural validation of navigation documents.
//!
//! Rules are identified by [`LintRule`] and run at configurable
//! [`LintLevel`]s. [`validate`] collects diagnostics for a document;
//! deciding whether they fail a run is left to the caller.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::anchor::AnchorRef;
use crate::doc::NavTreeData;

/// Level a lint rule runs at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LintLevel {
    /// Rule disabled.
    Off,
    /// Violations reported without failing validation.
    Warn,
    /// Violations fail validation.
    Error,
}

/// Error produced when parsing a lint level name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown lint level: {0}")]
pub struct UnknownLintLevel(pub String);

impl FromStr for LintLevel {
    type Err = UnknownLintLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(UnknownLintLevel(s.to_owned())),
        }
    }
}

impl fmt::Display for LintLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Off => "off",
            Self::Warn => "warn",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Identifier of a validation rule.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum LintRule {
    /// The tree holds exactly one top-level entry.
    SingleRoot,
    /// Every index entry has the `<file>.html[#<anchor>]` form.
    AnchorSyntax,
    /// No node has a blank label.
    EmptyLabel,
    /// Index entries are in ascending order.
    SortedIndex,
    /// No index entry appears twice.
    DuplicateIndex,
    /// The document carries a license header.
    LicenseHeader,
}

/// Error produced when parsing a lint rule name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown lint rule: {0}")]
pub struct UnknownLintRule(pub String);

impl LintRule {
    /// All rules, in reporting order.
    pub const ALL: [Self; 6] = [
        Self::SingleRoot,
        Self::AnchorSyntax,
        Self::EmptyLabel,
        Self::SortedIndex,
        Self::DuplicateIndex,
        Self::LicenseHeader,
    ];

    /// Rule name as used in configuration and diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SingleRoot => "single-root",
            Self::AnchorSyntax => "anchor-syntax",
            Self::EmptyLabel => "empty-label",
            Self::SortedIndex => "sorted-index",
            Self::DuplicateIndex => "duplicate-index",
            Self::LicenseHeader => "license-header",
        }
    }

    /// Level the rule runs at when configuration does not override it.
    #[must_use]
    pub fn default_level(self) -> LintLevel {
        match self {
            Self::SingleRoot | Self::AnchorSyntax => LintLevel::Error,
            Self::EmptyLabel | Self::SortedIndex | Self::DuplicateIndex => LintLevel::Warn,
            Self::LicenseHeader => LintLevel::Off,
        }
    }
}

impl FromStr for LintRule {
    type Err = UnknownLintRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|rule| rule.name() == s)
            .ok_or_else(|| UnknownLintRule(s.to_owned()))
    }
}

impl fmt::Display for LintRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-rule level overrides.
///
/// Rules without an override run at [`LintRule::default_level`].
#[derive(Clone, Debug, Default)]
pub struct LintConfig {
    levels: HashMap<LintRule, LintLevel>,
}

impl LintConfig {
    /// Create a configuration using only default levels.
    #[must_use]
    pub fn new() -> Self {
        Self {
            levels: HashMap::new(),
        }
    }

    /// Override the level of a rule.
    pub fn set(&mut self, rule: LintRule, level: LintLevel) {
        self.levels.insert(rule, level);
    }

    /// Effective level of a rule.
    #[must_use]
    pub fn level(&self, rule: LintRule) -> LintLevel {
        self.levels
            .get(&rule)
            .copied()
            .unwrap_or_else(|| rule.default_level())
    }
}

/// One reported rule violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Rule that fired.
    pub rule: LintRule,
    /// Level the rule ran at (never [`LintLevel::Off`]).
    pub level: LintLevel,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = if self.level == LintLevel::Error {
            "error"
        } else {
            "warning"
        };
        write!(f, "{prefix}[{}]: {}", self.rule, self.message)
    }
}

/// Validate a document against the configured rules.
///
/// Returns all violations of rules that are not [`LintLevel::Off`], in
/// rule order. An empty result means the document passed.
#[must_use]
pub fn validate(data: &NavTreeData, config: &LintConfig) -> Vec<Diagnostic> {
    let mut report = Report {
        config,
        diagnostics: Vec::new(),
    };

    check_single_root(data, &mut report);
    check_anchor_syntax(data, &mut report);
    check_empty_label(data, &mut report);
    check_sorted_index(data, &mut report);
    check_duplicate_index(data, &mut report);
    check_license_header(data, &mut report);

    report.diagnostics
}

/// Diagnostics under construction for one validation run.
struct Report<'a> {
    config: &'a LintConfig,
    diagnostics: Vec<Diagnostic>,
}

impl Report<'_> {
    /// Record a violation unless the rule is disabled.
    fn push(&mut self, rule: LintRule, message: String) {
        let level = self.config.level(rule);
        if level != LintLevel::Off {
            self.diagnostics.push(Diagnostic {
                rule,
                level,
                message,
            });
        }
    }

    /// True if the rule is disabled and its check can be skipped.
    fn skip(&self, rule: LintRule) -> bool {
        self.config.level(rule) == LintLevel::Off
    }
}

fn check_single_root(data: &NavTreeData, report: &mut Report<'_>) {
    let roots = data.tree.roots().len();
    if roots != 1 {
        report.push(
            LintRule::SingleRoot,
            format!("expected a single top-level entry, found {roots}"),
        );
    }
}

fn check_anchor_syntax(data: &NavTreeData, report: &mut Report<'_>) {
    if report.skip(LintRule::AnchorSyntax) {
        return;
    }
    for (i, entry) in data.index.entries().iter().enumerate() {
        if let Err(err) = entry.to_string().parse::<AnchorRef>() {
            report.push(LintRule::AnchorSyntax, format!("index entry {i}: {err}"));
        }
    }
}

fn check_empty_label(data: &NavTreeData, report: &mut Report<'_>) {
    if report.skip(LintRule::EmptyLabel) {
        return;
    }
    for (_, idx, node) in data.tree.walk() {
        if node.label.trim().is_empty() {
            report.push(LintRule::EmptyLabel, format!("node {idx} has a blank label"));
        }
    }
}

fn check_sorted_index(data: &NavTreeData, report: &mut Report<'_>) {
    if report.skip(LintRule::SortedIndex) {
        return;
    }
    if let Some(pos) = data.index.first_unsorted_at() {
        let entry = &data.index.entries()[pos];
        report.push(
            LintRule::SortedIndex,
            format!("index entry {pos} ({entry}) breaks ascending order"),
        );
    }
}

fn check_duplicate_index(data: &NavTreeData, report: &mut Report<'_>) {
    if report.skip(LintRule::DuplicateIndex) {
        return;
    }
    let mut seen: HashMap<&AnchorRef, usize> = HashMap::new();
    for (i, entry) in data.index.entries().iter().enumerate() {
        if let Some(&first) = seen.get(entry) {
            report.push(
                LintRule::DuplicateIndex,
                format!("index entry {i} ({entry}) duplicates entry {first}"),
            );
        } else {
            seen.insert(entry, i);
        }
    }
}

fn check_license_header(data: &NavTreeData, report: &mut Report<'_>) {
    if data.license.is_none() {
        report.push(
            LintRule::LicenseHeader,
            "document has no license header".to_owned(),
        );
    }
}
