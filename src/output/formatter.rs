//! Output formatters: console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::AnalysisReport;
use crate::processing::analyzer::MatchBand;
use crate::processing::skills::SkillSet;
use colored::{Color, Colorize};
use std::fmt::Write as _;
use std::path::Path;

/// Trait for rendering analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for structured consumers
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saved reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "▓".blue().bold(), title.blue().bold())
        } else {
            format!("\n== {}\n", title)
        }
    }

    fn format_band_badge(&self, band: MatchBand) -> String {
        let (label, color) = match band {
            MatchBand::Strong => ("STRONG", Color::Green),
            MatchBand::Moderate => ("MODERATE", Color::Yellow),
            MatchBand::Weak => ("WEAK", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", label.color(color).bold())
        } else {
            format!("[{}]", label)
        }
    }

    fn format_skills(&self, skills: &SkillSet, color: Color) -> String {
        if skills.is_empty() {
            return "  (none)\n".to_string();
        }
        skills
            .iter()
            .map(|s| format!("  • {}\n", self.colorize(s, color)))
            .collect()
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME ALIGNMENT"));
        output.push_str(&format!(
            "Match Score: {:.2}% {}\n",
            result.score,
            self.format_band_badge(report.band)
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(report.verdict(), Color::Cyan)));

        output.push_str(&self.format_header("Matching Skills"));
        output.push_str(&self.format_skills(&result.matching_skills, Color::Green));

        output.push_str(&self.format_header("Missing Skills"));
        output.push_str(&self.format_skills(&result.missing_skills, Color::Red));

        output.push_str(&self.format_header("Keywords"));
        output.push_str(&format!(
            "Shared with job description: {}\n",
            result.matching_keyword_count
        ));
        if !result.missing_keywords.is_empty() {
            output.push_str(&format!("Missing: {}\n", result.missing_keywords.join(", ")));
        }

        if let Some(feedback) = &report.feedback {
            output.push_str(&self.format_header("Feedback"));
            output.push_str(feedback);
            output.push('\n');
        }

        if self.detailed {
            let meta = &report.metadata;
            output.push_str(&self.format_header("Inputs"));
            for (label, source) in [("Resume", &meta.resume), ("Job", &meta.job)] {
                output.push_str(&format!(
                    "{}: {} ({} characters)\n  {}\n",
                    label,
                    source.origin,
                    source.characters,
                    self.colorize(&source.preview, Color::BrightBlack)
                ));
            }
            output.push_str(&format!(
                "\nGenerated: {} | skillgap {} | {} vocabulary skills\n",
                meta.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                meta.version,
                meta.vocabulary_size
            ));
        }

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn skill_list(out: &mut String, skills: &SkillSet) {
        if skills.is_empty() {
            out.push_str("_None_\n");
        }
        for skill in skills.iter() {
            let _ = writeln!(out, "- {}", skill);
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut md = String::new();

        md.push_str("# Resume Alignment Report\n\n");
        let _ = writeln!(md, "**Match score:** {:.2}% ({})\n", result.score, report.band);
        let _ = writeln!(md, "> {}\n", report.verdict());

        md.push_str("## Matching Skills\n\n");
        Self::skill_list(&mut md, &result.matching_skills);

        md.push_str("\n## Missing Skills\n\n");
        Self::skill_list(&mut md, &result.missing_skills);

        md.push_str("\n## Keywords\n\n");
        let _ = writeln!(md, "- Shared keywords: {}", result.matching_keyword_count);
        if !result.missing_keywords.is_empty() {
            let quoted: Vec<String> = result
                .missing_keywords
                .iter()
                .map(|k| format!("`{}`", k))
                .collect();
            let _ = writeln!(md, "- Missing keywords: {}", quoted.join(", "));
        }

        if let Some(feedback) = &report.feedback {
            md.push_str("\n## Feedback\n\n");
            md.push_str(feedback.trim());
            md.push('\n');
        }

        if self.include_metadata {
            let meta = &report.metadata;
            md.push_str("\n---\n\n");
            let _ = writeln!(
                md,
                "_Generated {} by skillgap {} from `{}` and `{}`._",
                meta.generated_at.format("%Y-%m-%d %H:%M UTC"),
                meta.version,
                meta.resume.origin,
                meta.job.origin
            );
        }

        Ok(md)
    }
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(detailed),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}
