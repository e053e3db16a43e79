//! Document builder.
//!
//! Turns a completed answer set into Markdown and appends backend responses
//! as labeled sections. Every function here is pure.

use std::fmt;

use super::catalog::DocumentType;

/// Heading used for a successful backend response.
pub const SUMMARY_HEADING: &str = "Ticket Summary";

/// Heading used when the backend call failed.
pub const ERROR_HEADING: &str = "Error";

/// Separator placed between the questionnaire and an appended result.
const RESULT_SEPARATOR: &str = "\n---\n\n";

/// One numbered question and its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// 1-based position within the document.
    pub number: usize,
    pub question: String,
    /// Trimmed answer; empty when the question was skipped.
    pub answer: String,
}

/// Structured form of an assembled questionnaire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub sections: Vec<Section>,
}

impl Document {
    /// Pairs each question of `doc_type` with its answer.
    ///
    /// Missing answers are treated as skipped, so the section count always
    /// equals the question count.
    #[must_use]
    pub fn new(doc_type: &DocumentType, answers: &[String]) -> Self {
        let sections = doc_type
            .questions
            .iter()
            .enumerate()
            .map(|(i, question)| Section {
                number: i + 1,
                question: (*question).to_string(),
                answer: answers.get(i).map(|a| a.trim().to_string()).unwrap_or_default(),
            })
            .collect();

        Self {
            title: doc_type.name.to_string(),
            sections,
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "# {}\n\n", self.title)?;
        for section in &self.sections {
            write!(f, "## {}. {}\n\n", section.number, section.question)?;
            if !section.answer.is_empty() {
                write!(f, "{}\n\n", section.answer)?;
            }
        }
        Ok(())
    }
}

/// Builds the Markdown text for a questionnaire.
#[must_use]
pub fn build(doc_type: &DocumentType, answers: &[String]) -> String {
    Document::new(doc_type, answers).to_string()
}

/// Returns `document` followed by a separator and a `heading` section holding `body`.
#[must_use]
pub fn append_result(document: &str, heading: &str, body: &str) -> String {
    format!("{document}{RESULT_SEPARATOR}## {heading}\n\n{body}\n")
}

/// Placeholder shown while a request is in flight.
#[must_use]
pub fn processing_placeholder(backend_name: &str) -> String {
    format!("## Processing with {backend_name}\n\nGenerating summary...")
}

/// Body of the error section for a failed request.
#[must_use]
pub fn failure_body(backend_name: &str, error: &str) -> String {
    format!(
        "Failed to get response from {backend_name}: {error}\n\nCheck the log file for details."
    )
}
