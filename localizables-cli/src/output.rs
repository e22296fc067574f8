//! Human-readable command output.
//!
//! Successful updates go to stdout; warnings and failures go to stderr.

use std::fmt::Display;

use crossterm::style::{StyledContent, Stylize};
use crossterm::tty::IsTty;
use localizables::{ApplySummary, MergeReport, PairFailure};

const SEPARATOR_WIDTH: usize = 32;

#[derive(Debug, Clone, Copy)]
pub struct Output {
    color: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    /// Colors are used when stdout is a terminal and `NO_COLOR` is unset.
    pub fn new() -> Self {
        Output {
            color: std::io::stdout().is_tty() && std::env::var_os("NO_COLOR").is_none(),
        }
    }

    fn paint<D: Display>(&self, styled: StyledContent<D>) -> String {
        if self.color {
            styled.to_string()
        } else {
            styled.content().to_string()
        }
    }

    fn separator() -> String {
        format!("\n{}", "-".repeat(SEPARATOR_WIDTH))
    }

    pub fn report(&self, report: &MergeReport) {
        let verb = if report.written { "Updated" } else { "Checked" };
        println!("{}", Self::separator());
        println!(
            "{}",
            self.paint(
                format!(
                    "{} {} with {}",
                    verb,
                    report.destination.display(),
                    report.update.display()
                )
                .green()
            )
        );
        println!(
            "found {} keys on destination, {} on update",
            report.destination_keys, report.update_keys
        );

        self.duplicates(&report.destination_duplicates, "destination", report.destination_keys);
        self.duplicates(&report.update_duplicates, "update", report.update_keys);
        self.missing(&report.missing_keys);
    }

    fn duplicates(&self, keys: &[String], name: &str, unique: usize) {
        if keys.is_empty() {
            return;
        }
        eprintln!(
            "{}",
            self.paint(
                format!(
                    "\nwarning found {} duplicated keys on {}, unique keys count: {}",
                    keys.len(),
                    name,
                    unique
                )
                .yellow()
            )
        );
        for key in keys {
            eprintln!("   {}", key);
        }
    }

    fn missing(&self, keys: &[String]) {
        if keys.is_empty() {
            return;
        }
        eprintln!(
            "{}",
            self.paint(format!("\nwarning found {} missing keys", keys.len()).yellow())
        );
        for key in keys {
            eprintln!("   {}", key);
        }
    }

    pub fn failure(&self, failure: &PairFailure) {
        eprintln!("{}", Self::separator());
        eprintln!(
            "{}",
            self.paint(format!("Failed to update {}", failure.destination.display()).red())
        );
        eprintln!("{}", failure.error);
    }

    pub fn summary(&self, summary: &ApplySummary, dry_run: bool) {
        let (succeeded, failed) = summary.counts();
        if failed == 0 {
            let message = if dry_run {
                format!("✅ Checked {} files, no files were written", succeeded)
            } else {
                format!("✅ Updated {} files successfully", succeeded)
            };
            println!("\n{}", self.paint(message.green()));
        }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{}", self.paint(format!("❌ {}", message).red()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_without_color_drops_escape_codes() {
        let output = Output { color: false };
        assert_eq!(output.paint("Updated".green()), "Updated");
    }

    #[test]
    fn test_paint_with_color_wraps_content() {
        crossterm::style::force_color_output(true);
        let output = Output { color: true };
        let painted = output.paint("Failed".red());
        assert!(painted.contains("Failed"));
        assert!(painted.starts_with("\u{1b}["));
    }
}
