//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output, including colored
//! status lines, the sorting progress spinner, and the per-category summary
//! table printed at the end of a run.

use crate::file_category::Category;
use crate::report::SortReport;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates the spinner ticked once per sorted file.
    pub fn create_spinner() -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {pos} files sorted")
                .expect("Invalid progress bar template"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Prints the per-category summary table for a finished run.
    pub fn summary_table(report: &SortReport) {
        Self::header("SUMMARY");

        let max_category_len = Category::ALL
            .iter()
            .map(|category| category.dir_name().len())
            .max()
            .unwrap_or(0)
            .max(8); // At least "Category" width

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Files".bold(),
            width = max_category_len
        );
        println!("{}", "-".repeat(max_category_len + 10));

        for (category, count) in report.category_counts() {
            let file_word = if count == 1 { "file" } else { "files" };
            println!(
                "{:<width$} | {} {}",
                category.dir_name(),
                count.to_string().green(),
                file_word,
                width = max_category_len
            );
        }

        println!("{}", "-".repeat(max_category_len + 10));
        let total = report.total_sorted();
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total.to_string().green().bold(),
            if total == 1 { "file" } else { "files" },
            width = max_category_len
        );
    }
}
