//! Report writing and console output

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use colored::*;
use tracing::info;

use expansion_oracle::client::truncate;
use expansion_proposal::{EnrichmentStatus, ExpansionReport, GuardrailStatus};

use crate::error::{CliError, CliResult};

const SUMMARY_DESCRIPTION_CHARS: usize = 80;
const SUMMARY_WARNINGS: usize = 3;

/// Where the two report files go for an `--output` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub markdown: PathBuf,
}

impl ReportPaths {
    /// A trailing `.json` is stripped before both extensions are added.
    pub fn from_output(output: &str) -> Self {
        let stem = output.strip_suffix(".json").unwrap_or(output);
        Self {
            json: PathBuf::from(format!("{}.json", stem)),
            markdown: PathBuf::from(format!("{}.md", stem)),
        }
    }
}

/// Write the JSON and Markdown reports.
pub fn write_reports(report: &ExpansionReport, paths: &ReportPaths) -> CliResult<()> {
    let json = serde_json::to_string_pretty(report)?;
    write_file(&paths.json, &json)?;
    info!(path = %paths.json.display(), "Saved JSON report");

    write_file(&paths.markdown, &render_markdown(report))?;
    info!(path = %paths.markdown.display(), "Saved Markdown report");
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> CliResult<()> {
    std::fs::write(path, contents).map_err(|e| CliError::io(path, e))
}

// ── Markdown ───────────────────────────────────────────────────────────

/// Render the report as a Markdown document.
pub fn render_markdown(report: &ExpansionReport) -> String {
    let mut md = String::new();
    // Writing into a String cannot fail.
    let _ = write_markdown(&mut md, report);
    md
}

fn write_markdown(md: &mut String, report: &ExpansionReport) -> std::fmt::Result {
    let meta = &report.metadata;

    writeln!(md, "# Intent Expansion Analysis Report\n")?;
    writeln!(md, "**Generated:** {}", meta.generated_at.to_rfc3339())?;
    writeln!(md, "**Run ID:** `{}`", meta.run_id)?;
    writeln!(md, "**Messages Analyzed:** {}", meta.total_messages_analyzed)?;
    writeln!(md, "**Themes Identified:** {}", meta.themes_identified)?;
    writeln!(md, "**Proposals Generated:** {}", meta.proposals_generated)?;
    writeln!(md, "**Guardrail Status:** {}\n", report.status())?;

    writeln!(md, "---\n\n## Theme Analysis\n")?;
    for (theme, data) in &report.theme_analysis {
        writeln!(md, "### {}", theme.title())?;
        writeln!(md, "- **Count:** {} messages ({}%)", data.count, data.percentage)?;
        writeln!(md, "- **Keywords:** {}", data.keywords.join(", "))?;
        writeln!(md, "- **Samples:**")?;
        for sample in &data.sample_messages {
            writeln!(md, "  - \"{}\"", sample)?;
        }
        md.push('\n');
    }

    writeln!(md, "---\n\n## Proposed Intents\n")?;
    if report.proposed_intents.is_empty() {
        writeln!(md, "_No clusters met the admission thresholds._\n")?;
    }
    for p in &report.proposed_intents {
        let parent = p
            .parent_intent
            .as_ref()
            .map(|id| format!("`{}`", id))
            .unwrap_or_else(|| "none".into());
        let action = match &p.original_intent {
            Some(origin) => format!("{} from `{}`", p.action, origin),
            None => p.action.to_string(),
        };

        writeln!(md, "### {}\n", p.name)?;
        writeln!(md, "| Property | Value |")?;
        writeln!(md, "|----------|-------|")?;
        writeln!(md, "| **Level** | {} |", p.level)?;
        writeln!(md, "| **ID** | `{}` |", p.id)?;
        writeln!(md, "| **Parent Intent** | {} |", parent)?;
        writeln!(md, "| **Action** | {} |", action)?;
        writeln!(md, "| **Confidence** | {} |", p.confidence_score)?;
        writeln!(md, "| **Evidence Count** | {} |\n", p.evidence_count)?;
        writeln!(md, "**Description:** {}\n", p.description)?;
        writeln!(md, "**Rationale:** {}\n", p.rationale)?;
        writeln!(md, "**Example Messages:**")?;
        for example in &p.example_messages {
            writeln!(md, "- \"{}\"", example)?;
        }
        md.push('\n');
    }

    if !report.screened_clusters.is_empty() {
        writeln!(md, "---\n\n## Screened Clusters\n")?;
        writeln!(md, "| Theme | Count | Share | Reason |")?;
        writeln!(md, "|-------|-------|-------|--------|")?;
        for s in &report.screened_clusters {
            writeln!(
                md,
                "| `{}` | {} | {:.2}% | {} |",
                s.theme, s.count, s.percentage, s.reason
            )?;
        }
        md.push('\n');
    }

    if !report.guardrails.warnings.is_empty() {
        writeln!(md, "---\n\n## Guardrail Warnings\n")?;
        for warning in &report.guardrails.warnings {
            writeln!(md, "⚠️ {}", warning)?;
        }
        md.push('\n');
    }

    if let Some(enrichment) = &report.enrichment {
        writeln!(md, "---\n\n## Advisory Themes ({})\n", enrichment.provider)?;
        writeln!(md, "**Status:** {}", enrichment_status(enrichment.status))?;
        if let Some(detail) = &enrichment.detail {
            writeln!(md, "**Detail:** {}", detail)?;
        }
        md.push('\n');
        for review in &enrichment.candidates {
            let c = &review.candidate;
            writeln!(md, "### {}\n", c.name)?;
            writeln!(md, "{}\n", c.description)?;
            if !c.distinction.is_empty() {
                writeln!(md, "**Distinction:** {}\n", c.distinction)?;
            }
            for example in &c.examples {
                writeln!(md, "- \"{}\"", example)?;
            }
            for issue in &review.issues {
                writeln!(md, "⚠️ {}", issue)?;
            }
            md.push('\n');
        }
    }

    Ok(())
}

fn enrichment_status(status: EnrichmentStatus) -> &'static str {
    match status {
        EnrichmentStatus::Completed => "completed",
        EnrichmentStatus::Unavailable => "unavailable",
        EnrichmentStatus::Failed => "failed",
    }
}

// ── Console ────────────────────────────────────────────────────────────

/// Print the run summary to stdout.
pub fn print_summary(report: &ExpansionReport, paths: &ReportPaths) {
    let rule = "=".repeat(60);
    println!("\n{}", rule);
    println!("{}", "INTENT EXPANSION ANALYSIS SUMMARY".bold());
    println!("{}", rule);

    let meta = &report.metadata;
    println!("\nMessages Analyzed: {}", meta.total_messages_analyzed);
    println!("Themes Identified: {}", meta.themes_identified);
    println!("Proposals Generated: {}", meta.proposals_generated);

    if !report.proposed_intents.is_empty() {
        println!("\nProposed New Intents:");
        for p in &report.proposed_intents {
            println!(
                "  • {} (confidence: {})",
                p.name.green(),
                p.confidence_score
            );
            println!(
                "    └─ {}",
                truncate(&p.description, SUMMARY_DESCRIPTION_CHARS).dimmed()
            );
        }
    }

    let warnings = &report.guardrails.warnings;
    if !warnings.is_empty() {
        print_warning(&format!("Guardrail Warnings: {}", warnings.len()));
        for warning in warnings.iter().take(SUMMARY_WARNINGS) {
            println!("  - {}", warning);
        }
    }

    if let Some(enrichment) = &report.enrichment {
        let line = format!(
            "Enrichment ({}): {}, {} advisory themes",
            enrichment.provider,
            enrichment_status(enrichment.status),
            enrichment.candidates.len()
        );
        match enrichment.status {
            EnrichmentStatus::Completed => print_info(&line),
            _ => print_warning(&line),
        }
    }

    match report.status() {
        GuardrailStatus::Passed => print_success("Guardrails passed"),
        GuardrailStatus::ReviewNeeded => print_warning("Review needed before adopting proposals"),
    }

    println!("\nFull reports saved to:");
    println!("  - {}", paths.json.display());
    println!("  - {}", paths.markdown.display());
    println!("{}", rule);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}
