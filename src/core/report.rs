//! Run report - outcome bookkeeping and status lines.
//!
//! Every unit of work ends in exactly one [`Outcome`], recorded under the
//! phase that was active at the time. Recording prints the operator-facing
//! status line and emits a tracing event; the totals are printed once the
//! run finishes.

use crate::errors::Error;
use std::fmt::Write;
use tracing::{info, warn};

/// How a single unit of work ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The API accepted the call
    Passed,
    /// The API answered 409 Conflict; nothing new was created
    AlreadyExists,
    /// Transport error, non-2xx status, or a malformed body
    Failed,
    /// A dependency (token, id) was missing so the call was never made
    Skipped,
}

impl Outcome {
    /// Status marker shown before the message.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Passed => "✅",
            Self::AlreadyExists => "⚠️",
            Self::Failed => "❌",
            Self::Skipped => "⏭️",
        }
    }
}

/// Formats an operator-facing status line like `✅ Donation created`.
#[must_use]
pub fn format_status_line(outcome: Outcome, message: &str) -> String {
    format!("{} {message}", outcome.marker())
}

/// Outcome counts for one phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhaseSummary {
    /// Phase title as announced
    pub name: String,
    pub passed: usize,
    pub already_exists: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl PhaseSummary {
    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    fn bump(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Passed => self.passed += 1,
            Outcome::AlreadyExists => self.already_exists += 1,
            Outcome::Failed => self.failed += 1,
            Outcome::Skipped => self.skipped += 1,
        }
    }

    /// Total units of work recorded.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed + self.already_exists + self.failed + self.skipped
    }
}

/// One recorded outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Phase the outcome belongs to
    pub phase: String,
    pub outcome: Outcome,
    pub message: String,
}

/// Accumulated outcomes for a run, grouped by phase in announcement order.
#[derive(Debug, Clone)]
pub struct RunReport {
    phases: Vec<PhaseSummary>,
    entries: Vec<Entry>,
    echo: bool,
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

impl RunReport {
    /// A report that prints status lines to stdout as they are recorded.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phases: Vec::new(),
            entries: Vec::new(),
            echo: true,
        }
    }

    /// A report that only records and traces, without printing.
    #[must_use]
    pub const fn silent() -> Self {
        Self {
            phases: Vec::new(),
            entries: Vec::new(),
            echo: false,
        }
    }

    /// Starts a new phase; later outcomes are counted under it.
    pub fn begin_phase(&mut self, title: &str) {
        if self.echo {
            println!("\n=== {title} ===");
        }
        info!(phase = title, "Starting phase");
        self.phases.push(PhaseSummary::named(title));
    }

    /// Records an outcome under the current phase.
    pub fn record(&mut self, outcome: Outcome, message: impl Into<String>) {
        let message = message.into();
        if self.echo {
            println!("{}", format_status_line(outcome, &message));
        }

        if self.phases.is_empty() {
            self.phases.push(PhaseSummary::named("General"));
        }
        // Non-empty per the push above.
        let phase = self.phases.len() - 1;
        let current = &mut self.phases[phase];
        current.bump(outcome);

        match outcome {
            Outcome::Passed => info!(phase = %current.name, "{message}"),
            Outcome::AlreadyExists | Outcome::Skipped | Outcome::Failed => {
                warn!(phase = %current.name, outcome = ?outcome, "{message}");
            }
        }

        self.entries.push(Entry {
            phase: current.name.clone(),
            outcome,
            message,
        });
    }

    pub fn pass(&mut self, message: impl Into<String>) {
        self.record(Outcome::Passed, message);
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.record(Outcome::Failed, message);
    }

    pub fn skip(&mut self, message: impl Into<String>) {
        self.record(Outcome::Skipped, message);
    }

    /// Records an API error, separating 409 Conflict from real failures.
    pub fn record_error(&mut self, context: &str, error: &Error) {
        if error.is_conflict() {
            self.record(Outcome::AlreadyExists, format!("{context}: already exists"));
        } else {
            self.record(Outcome::Failed, format!("{context}: {error}"));
        }
    }

    /// Phase summaries in announcement order.
    #[must_use]
    pub fn phases(&self) -> &[PhaseSummary] {
        &self.phases
    }

    /// Every recorded outcome in order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Summary of the first phase with the given title.
    #[must_use]
    pub fn phase(&self, name: &str) -> Option<&PhaseSummary> {
        self.phases.iter().find(|phase| phase.name == name)
    }

    /// Counts across all phases.
    #[must_use]
    pub fn totals(&self) -> PhaseSummary {
        self.phases
            .iter()
            .fold(PhaseSummary::named("Total"), |mut acc, phase| {
                acc.passed += phase.passed;
                acc.already_exists += phase.already_exists;
                acc.failed += phase.failed;
                acc.skipped += phase.skipped;
                acc
            })
    }

    /// Number of entries recorded with the given outcome.
    #[must_use]
    pub fn count(&self, outcome: Outcome) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.outcome == outcome)
            .count()
    }

    /// Renders the per-phase table printed at the end of a run.
    #[must_use]
    pub fn render_summary(&self) -> String {
        let mut out = String::new();
        for phase in self.phases.iter().chain(std::iter::once(&self.totals())) {
            // Writing to a String cannot fail.
            let _ = writeln!(
                out,
                "{:<40} {:>4} ok {:>4} existing {:>4} failed {:>4} skipped",
                phase.name, phase.passed, phase.already_exists, phase.failed, phase.skipped
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_format_status_line() {
        assert_eq!(
            format_status_line(Outcome::Passed, "Donation created"),
            "✅ Donation created"
        );
        assert_eq!(
            format_status_line(Outcome::Failed, "Login error"),
            "❌ Login error"
        );
    }

    #[test]
    fn test_outcomes_counted_under_current_phase() {
        let mut report = RunReport::silent();
        report.begin_phase("Creating donations");
        report.pass("one");
        report.fail("two");
        report.begin_phase("Creating ratings");
        report.skip("three");

        let donations = report.phase("Creating donations").unwrap();
        assert_eq!(donations.passed, 1);
        assert_eq!(donations.failed, 1);
        assert_eq!(report.phase("Creating ratings").unwrap().skipped, 1);
        assert_eq!(report.totals().total(), 3);
    }

    #[test]
    fn test_outcome_before_any_phase_goes_to_general() {
        let mut report = RunReport::silent();
        report.pass("probe");

        assert_eq!(report.phases()[0].name, "General");
        assert_eq!(report.entries()[0].phase, "General");
    }

    #[test]
    fn test_conflict_is_recorded_as_already_exists() {
        let mut report = RunReport::silent();
        let conflict = Error::Status {
            status: StatusCode::CONFLICT,
            body: "This item is already in favorites".to_string(),
        };
        let forbidden = Error::Status {
            status: StatusCode::FORBIDDEN,
            body: "Forbidden".to_string(),
        };

        report.record_error("Error adding favorite", &conflict);
        report.record_error("Error adding favorite", &forbidden);

        assert_eq!(report.count(Outcome::AlreadyExists), 1);
        assert_eq!(report.count(Outcome::Failed), 1);
        assert_eq!(
            report.entries()[1].message,
            "Error adding favorite: 403 Forbidden - Forbidden"
        );
    }

    #[test]
    fn test_render_summary_ends_with_totals() {
        let mut report = RunReport::silent();
        report.begin_phase("Creating users");
        report.pass("a");
        report.pass("b");

        let summary = report.render_summary();
        let last = summary.lines().last().unwrap();
        assert!(last.starts_with("Total"));
        assert!(last.contains("2 ok"));
    }
}
