//! Run summary rendering

use console::Style;

use crate::orchestrator::RunSummary;

/// Summary lines for a finished run, without trailing newline
pub fn format_summary(summary: &RunSummary) -> String {
    let bold = Style::new().bold();
    let heading = if summary.published {
        format!(
            "{} {} branch(es) of {} to {}",
            Style::new().green().bold().apply_to("Vendored"),
            summary.branches.len(),
            bold.apply_to(&summary.project),
            summary.clone_url
        )
    } else {
        format!(
            "{} {} branch(es) of {} would be pushed to {}",
            Style::new().yellow().bold().apply_to("Dry run:"),
            summary.branches.len(),
            bold.apply_to(&summary.project),
            summary.clone_url
        )
    };

    let mut lines = vec![heading];
    lines.extend(
        summary
            .branches
            .iter()
            .map(|branch| format!("  {}", Style::new().cyan().apply_to(branch))),
    );
    lines.join("\n")
}

/// Print the summary to stdout
pub fn print_summary(summary: &RunSummary) {
    println!("{}", format_summary(summary));
}
