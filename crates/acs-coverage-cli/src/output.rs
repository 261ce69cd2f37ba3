//! Output formatting
//!
//! Text renderers return `String`s so handlers stay testable; [`Reporter`]
//! decides where they go and whether they are colored.

use acs_coverage::{Condominium, CoverageResult, CoverageStatus, ParseOutcome, TeamMetrics};
use console::{style, Term};
use std::fmt::Write as _;

/// Width of the text progress bar
const BAR_WIDTH: usize = 30;

/// Writes results and diagnostics to the terminal
#[derive(Debug)]
pub struct Reporter {
    out: Term,
    err: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(false, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print a result block on stdout.
    ///
    /// Results are printed even in quiet mode; quiet only silences notes.
    pub fn result(&self, text: &str) -> std::io::Result<()> {
        self.out.write_line(text.trim_end_matches('\n'))
    }

    /// Print a success note on stderr
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "OK".to_string()
        };
        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Print a warning on stderr
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };
        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Color a status label
    #[must_use]
    pub fn status_label(&self, status: CoverageStatus) -> String {
        let label = status.to_string();
        if !self.use_color {
            return label;
        }
        match status {
            CoverageStatus::Complete => style(label).green().bold().to_string(),
            CoverageStatus::Partial => style(label).yellow().bold().to_string(),
            CoverageStatus::Uncovered => style(label).red().bold().to_string(),
        }
    }
}

/// `[#########---------------------]` for a percentage
#[must_use]
pub fn progress_bar(percentage: u8) -> String {
    let filled = (usize::from(percentage.min(100)) * BAR_WIDTH + 50) / 100;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}

/// "1 block" / "3 blocks"
#[must_use]
pub fn blocks(count: u64) -> String {
    if count == 1 {
        "1 block".to_string()
    } else {
        format!("{count} blocks")
    }
}

/// Text summary of one coverage result
#[must_use]
pub fn render_coverage(result: &CoverageResult, status_label: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Coverage: {}% {}", result.percentage, progress_bar(result.percentage));
    let _ = writeln!(
        out,
        "  Covered:   {} ({}%)",
        blocks(result.covered_count),
        result.percentage
    );
    let _ = writeln!(
        out,
        "  Uncovered: {} ({}%)",
        blocks(result.uncovered_count),
        result.uncovered_percentage()
    );
    let _ = writeln!(out, "  Total:     {}", blocks(result.total_units));
    if !result.covered_units.is_empty() {
        let _ = writeln!(out, "  Units:     {}", result.covered_units);
    }
    let _ = writeln!(out, "  Status:    {status_label}");
    out
}

/// Text list of the skipped tokens
#[must_use]
pub fn render_skipped(outcome: &ParseOutcome) -> String {
    let mut out = String::new();
    if outcome.skipped.is_empty() {
        let _ = writeln!(out, "No tokens skipped ({} read)", outcome.token_count);
        return out;
    }
    let _ = writeln!(
        out,
        "Skipped {} of {} tokens:",
        outcome.skipped.len(),
        outcome.token_count
    );
    for skipped in &outcome.skipped {
        let _ = writeln!(out, "  '{}': {}", skipped.token, skipped.reason);
    }
    out
}

/// Text summary of team metrics
#[must_use]
pub fn render_metrics(metrics: &TeamMetrics, count: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Team metrics ({count} condominiums):");
    let _ = writeln!(out, "  Residents:         {}", metrics.total_moradores);
    let _ = writeln!(out, "  Hypertensive:      {}", metrics.total_hipertensos);
    let _ = writeln!(out, "  Diabetic:          {}", metrics.total_diabeticos);
    let _ = writeln!(out, "  Pregnant:          {}", metrics.total_gestantes);
    let _ = writeln!(out, "  Average coverage:  {:.1}%", metrics.cobertura_geral);
    out
}

/// One line per condominium
#[must_use]
pub fn render_listing(records: &[&Condominium]) -> String {
    let mut out = String::new();
    for c in records {
        let _ = writeln!(
            out,
            "  #{:<4} {:<32} {:>3}% {:<10} {}",
            c.id,
            c.nome,
            c.cobertura,
            c.status_cobertura.as_wire(),
            c.acs_responsavel.as_deref().unwrap_or("-")
        );
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use acs_coverage::{parse_detailed, CoverageSpec};

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0), format!("[{}]", "-".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(100), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(50).matches('#').count(), 15);
    }

    #[test]
    fn test_blocks_pluralization() {
        assert_eq!(blocks(1), "1 block");
        assert_eq!(blocks(0), "0 blocks");
        assert_eq!(blocks(7), "7 blocks");
    }

    #[test]
    fn test_render_coverage() {
        let result = CoverageSpec::new(23, "1-13,15,20-22").evaluate();
        let text = render_coverage(&result, "complete");
        assert!(text.contains("Coverage: 74%"));
        assert!(text.contains("Covered:   17 blocks (74%)"));
        assert!(text.contains("Uncovered: 6 blocks (26%)"));
        assert!(text.contains("Units:     1-13,15,20-22"));
        assert!(text.contains("Status:    complete"));
    }

    #[test]
    fn test_render_skipped() {
        let text = render_skipped(&parse_detailed("1-3, abc, 50", 10));
        assert!(text.contains("Skipped 2 of 3 tokens"));
        assert!(text.contains("'abc': malformed"));
        assert!(text.contains("'50': out of bounds"));
    }

    #[test]
    fn test_render_skipped_none() {
        let text = render_skipped(&parse_detailed("1-3", 10));
        assert!(text.contains("No tokens skipped"));
    }

    #[test]
    fn test_status_label_without_color() {
        let reporter = Reporter::new(false, false);
        assert_eq!(reporter.status_label(CoverageStatus::Partial), "partial");
    }

    #[test]
    fn test_render_metrics() {
        let metrics = TeamMetrics {
            total_moradores: 1610,
            cobertura_geral: 57.0,
            ..TeamMetrics::default()
        };
        let text = render_metrics(&metrics, 1);
        assert!(text.contains("1 condominiums"));
        assert!(text.contains("1610"));
        assert!(text.contains("57.0%"));
    }
}
