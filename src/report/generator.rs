//! Text and JSON renderers

use crate::models::{Diagnostic, LintReport};
use anyhow::{Context, Result};
use colored::{ColoredString, Colorize};
use std::path::PathBuf;

fn paint(text: &str, color: bool, style: fn(&str) -> ColoredString) -> String {
    if color {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

/// Render diagnostics grouped by file, followed by a summary line
pub fn generate_text_report(report: &LintReport, color: bool) -> String {
    let mut out = String::new();
    let mut current: Option<&PathBuf> = None;

    for diagnostic in &report.diagnostics {
        if current != Some(&diagnostic.path) {
            if current.is_some() {
                out.push('\n');
            }
            out.push_str(&paint(&diagnostic.path.display().to_string(), color, |s| s.underline()));
            out.push('\n');
            current = Some(&diagnostic.path);
        }
        out.push_str(&format_diagnostic(diagnostic, color));
        out.push('\n');
    }

    for error in &report.errors {
        out.push_str(&format!(
            "{} {}: {}\n",
            paint("error", color, |s| s.red().bold()),
            error.path.display(),
            error.message
        ));
    }

    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&summary_line(report, color));
    out.push('\n');
    out
}

fn format_diagnostic(diagnostic: &Diagnostic, color: bool) -> String {
    format!(
        "  {:<8} {}  {}  {}",
        diagnostic.location.to_string(),
        paint("error", color, |s| s.red()),
        diagnostic.message,
        paint(diagnostic.rule, color, |s| s.dimmed())
    )
}

fn summary_line(report: &LintReport, color: bool) -> String {
    let problems = report.diagnostics.len();
    let files = report.files_checked;
    if problems == 0 && report.errors.is_empty() {
        return paint(
            &format!("✔ No unrestored mocks ({} {} checked)", files, plural(files, "file")),
            color,
            |s| s.green(),
        );
    }
    let mut line = format!(
        "✖ {} {} in {} {} checked",
        problems,
        plural(problems, "problem"),
        files,
        plural(files, "file")
    );
    if !report.errors.is_empty() {
        line.push_str(&format!(
            ", {} {} could not be linted",
            report.errors.len(),
            plural(report.errors.len(), "file")
        ));
    }
    paint(&line, color, |s| s.red().bold())
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

pub fn generate_json_report(report: &LintReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize lint report")
}
