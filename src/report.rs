//! Rendering comparison reports as a table.

use std::io::{self, Write};

use crate::diff::{ComparisonReport, EntryStatus};

const ORANGE: &str = "\x1b[38;2;255;137;79m";
const PINK: &str = "\x1b[38;2;234;91;111m";
const CYAN: &str = "\x1b[38;2;10;186;181m";
const RESET: &str = "\x1b[38;2;169;178;195m";

const MOVE_WIDTH: usize = 8;
const MIN_COUNT_WIDTH: usize = 10;

/// How a report is drawn.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub color: bool,
    pub subject_label: String,
    pub oracle_label: String,
}

impl RenderConfig {
    #[must_use]
    pub fn new(color: bool) -> Self {
        RenderConfig {
            color,
            subject_label: "Subject".to_string(),
            oracle_label: "Oracle".to_string(),
        }
    }

    /// Use the given column headers instead of `Subject` and `Oracle`.
    #[must_use]
    pub fn with_labels(mut self, subject: &str, oracle: &str) -> Self {
        self.subject_label = subject.to_string();
        self.oracle_label = oracle.to_string();
        self
    }

    fn paint(&self, status: EntryStatus) -> Option<&'static str> {
        if !self.color {
            return None;
        }
        match status {
            EntryStatus::Match => None,
            EntryStatus::Mismatch => Some(ORANGE),
            EntryStatus::MissingInSubject => Some(PINK),
            EntryStatus::MissingInOracle => Some(CYAN),
        }
    }
}

/// Print the position being compared.
pub fn write_query_header<W: Write>(
    out: &mut W,
    fen: &str,
    moves: &[String],
    depth: u32,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- Running Perft ---")?;
    writeln!(out, "FEN: {fen}")?;
    if moves.is_empty() {
        writeln!(out, "Moves: (none)")?;
    } else {
        writeln!(out, "Moves: {}", moves.join(" "))?;
    }
    writeln!(out, "Depth: {depth}")?;
    writeln!(out)
}

/// Print the per-move table, the totals and a one-line verdict.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &ComparisonReport,
    config: &RenderConfig,
) -> io::Result<()> {
    let width = report
        .entries
        .values()
        .flat_map(|e| [e.subject, e.oracle])
        .flatten()
        .map(|n| n.to_string().len())
        .max()
        .unwrap_or(0)
        .max(MIN_COUNT_WIDTH);

    writeln!(
        out,
        "{:<MOVE_WIDTH$}{:>width$}{:>w1$}",
        "Move",
        config.subject_label,
        config.oracle_label,
        w1 = width + 1
    )?;
    writeln!(
        out,
        "{:<MOVE_WIDTH$}{:>width$}{:>w1$}",
        "-".repeat(MOVE_WIDTH - 1),
        "-".repeat(width),
        "-".repeat(width),
        w1 = width + 1
    )?;

    for (mv, entry) in &report.entries {
        let paint = config.paint(entry.status());
        if let Some(code) = paint {
            write!(out, "{code}")?;
        }
        write!(
            out,
            "{:<MOVE_WIDTH$}{:>width$}{:>w1$}",
            mv,
            cell(entry.subject),
            cell(entry.oracle),
            w1 = width + 1
        )?;
        if paint.is_some() {
            write!(out, "{RESET}")?;
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    let total_paint = (config.color && !report.totals_match()).then_some(ORANGE);
    if let Some(code) = total_paint {
        write!(out, "{code}")?;
    }
    write!(
        out,
        "Total    {}\t{}",
        report.subject_total, report.oracle_total
    )?;
    if total_paint.is_some() {
        write!(out, "{RESET}")?;
    }
    writeln!(out)?;

    write_verdict(out, report)
}

fn write_verdict<W: Write>(out: &mut W, report: &ComparisonReport) -> io::Result<()> {
    match report.first_divergence() {
        Some((mv, status)) => {
            let reason = match status {
                EntryStatus::Mismatch => "node counts differ",
                EntryStatus::MissingInSubject => "move not generated by subject",
                EntryStatus::MissingInOracle => "move not generated by oracle",
                EntryStatus::Match => "match",
            };
            writeln!(out, "First divergence: {mv} ({reason})")
        }
        None if !report.totals_match() => {
            writeln!(out, "Per-move counts agree but totals differ")
        }
        None => writeln!(out, "All counts match"),
    }
}

fn cell(count: Option<u64>) -> String {
    count.map_or_else(|| "-".to_string(), |n| n.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::compare;
    use crate::engine::NodeCountResult;

    fn result(total: u64, moves: &[(&str, u64)]) -> NodeCountResult {
        let mut r = NodeCountResult::new();
        r.total = total;
        for &(mv, count) in moves {
            r.record_move(mv, count);
        }
        r
    }

    fn render(report: &ComparisonReport, color: bool) -> String {
        let mut out = Vec::new();
        write_report(&mut out, report, &RenderConfig::new(color)).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plain_table_layout() {
        let report = compare(
            &result(20, &[("e2e4", 20)]),
            &result(28, &[("e2e4", 20), ("g1f3", 8)]),
        );
        let text = render(&report, false);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Move       Subject     Oracle");
        assert_eq!(lines[1], "------- ---------- ----------");
        assert_eq!(lines[2], "e2e4            20         20");
        assert_eq!(lines[3], "g1f3             -          8");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "Total    20\t28");
        assert_eq!(lines[6], "First divergence: g1f3 (move not generated by subject)");
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_custom_labels_in_header() {
        let side = result(20, &[("e2e4", 20)]);
        let config = RenderConfig::new(false).with_labels("mine", "stockfish");
        let mut out = Vec::new();
        write_report(&mut out, &compare(&side, &side), &config).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().next(), Some("Move          mine  stockfish"));
    }

    #[test]
    fn test_wide_counts_widen_columns() {
        let report = compare(
            &result(0, &[("e2e4", 123_456_789_012)]),
            &result(0, &[("e2e4", 123_456_789_012)]),
        );
        let text = render(&report, false);
        let row = text.lines().nth(2).unwrap();
        assert_eq!(row, "e2e4    123456789012 123456789012");
    }

    #[test]
    fn test_colors_only_on_differences() {
        let report = compare(
            &result(41, &[("a2a3", 1), ("b2b3", 2), ("c2c3", 3)]),
            &result(40, &[("a2a3", 1), ("b2b3", 5), ("d2d3", 4)]),
        );
        let text = render(&report, true);
        let lines: Vec<&str> = text.lines().collect();
        assert!(!lines[2].contains('\x1b'));
        assert!(lines[3].starts_with(ORANGE));
        assert!(lines[4].starts_with(CYAN));
        assert!(lines[5].starts_with(PINK));
        assert!(lines[5].ends_with(RESET));
        assert!(text.contains(&format!("{ORANGE}Total    41\t40{RESET}")));
    }

    #[test]
    fn test_total_only_verdict() {
        let report = compare(
            &result(41, &[("e2e4", 20), ("d2d4", 20)]),
            &result(40, &[("e2e4", 20), ("d2d4", 20)]),
        );
        let text = render(&report, false);
        assert!(text.contains("Per-move counts agree but totals differ"));
    }

    #[test]
    fn test_clean_verdict() {
        let side = result(20, &[("e2e4", 20)]);
        let text = render(&compare(&side, &side), false);
        assert!(text.ends_with("All counts match\n"));
    }

    #[test]
    fn test_query_header() {
        let mut out = Vec::new();
        write_query_header(&mut out, "fen", &[], 3).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("FEN: fen\n"));
        assert!(text.contains("Moves: (none)\n"));
        assert!(text.contains("Depth: 3\n"));

        let mut out = Vec::new();
        write_query_header(&mut out, "fen", &["e2e4".to_string(), "e7e5".to_string()], 1).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Moves: e2e4 e7e5\n"));
    }
}
