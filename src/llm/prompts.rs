//! Prompt template for resume feedback

use crate::llm::feedback::FeedbackRequest;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Prompt templates with `{resume}`, `{job}` and `{score}` placeholders
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub system: String,
    pub feedback: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            system: SYSTEM_PROMPT.to_string(),
            feedback: FEEDBACK_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Fill the placeholders of the feedback template in one pass; text
    /// substituted into the template is never scanned again.
    pub fn render_feedback(&self, request: &FeedbackRequest<'_>) -> String {
        let score = format!("{:.2}", request.score);
        placeholder_regex()
            .replace_all(&self.feedback, |caps: &Captures| match &caps[1] {
                "score" => score.clone(),
                "job" => request.job_text.to_string(),
                _ => request.resume_text.to_string(),
            })
            .into_owned()
    }
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{(score|job|resume)\}").expect("Invalid placeholder regex")
    })
}

const SYSTEM_PROMPT: &str =
    "You are an experienced technical recruiter who gives candid, specific resume advice.";

const FEEDBACK_TEMPLATE: &str = r#"A keyword-based matcher scored this resume {score}/100 against the job posting below.

<RESUME>
{resume}
</RESUME>

<JOB POSTING>
{job}
</JOB POSTING>

Give feedback in three short sections:
1. STRENGTHS: what already fits the role.
2. GAPS: requirements in the posting the resume does not demonstrate.
3. EDITS: up to five concrete changes to the resume, quoting the line to change where possible.

Do not invent experience the candidate does not list."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_all_placeholders() {
        let request = FeedbackRequest {
            resume_text: "Rust developer",
            job_text: "Go developer wanted",
            score: 41.5,
        };
        let prompt = PromptTemplates::default().render_feedback(&request);

        assert!(prompt.contains("41.50/100"));
        assert!(prompt.contains("<RESUME>\nRust developer\n</RESUME>"));
        assert!(prompt.contains("Go developer wanted"));
        assert!(!prompt.contains("{resume}"));
        assert!(!prompt.contains("{job}"));
    }

    #[test]
    fn test_placeholders_inside_inputs_survive() {
        let request = FeedbackRequest {
            resume_text: "templating with {score} and {job}",
            job_text: "job",
            score: 10.0,
        };
        let prompt = PromptTemplates::default().render_feedback(&request);
        assert!(prompt.contains("templating with {score} and {job}"));
    }

    #[test]
    fn test_placeholders_inside_job_text_survive() {
        let request = FeedbackRequest {
            resume_text: "Jane Doe, Rust",
            job_text: "Send your {resume} and quote {score}",
            score: 55.0,
        };
        let prompt = PromptTemplates::default().render_feedback(&request);

        assert!(prompt.contains("Send your {resume} and quote {score}"));
        assert_eq!(prompt.matches("Jane Doe, Rust").count(), 1);
        assert!(prompt.contains("55.00/100"));
    }
}
