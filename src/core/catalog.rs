//! Fixed catalog of document types.
//!
//! Each entry pairs an ordered list of questions with the instruction that is
//! prepended to the assembled document when it is sent to a backend.

/// A questionnaire template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentType {
    /// Display name, also used as the document title.
    pub name: &'static str,
    /// Questions in the order they are asked.
    pub questions: &'static [&'static str],
    /// Generation instruction sent ahead of the document.
    pub instruction: &'static str,
}

impl DocumentType {
    /// Number of questions in this template.
    #[must_use]
    pub const fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Combines the generation instruction with an assembled document.
    #[must_use]
    pub fn prompt_for(&self, document: &str) -> String {
        format!("{}\n\n{document}", self.instruction)
    }
}

const INCIDENT_RESPONSE: DocumentType = DocumentType {
    name: "Incident Response",
    questions: &[
        "What happened?",
        "What did you do?",
        "Why did you do it?",
        "Did it work? If not, what was the result?",
        "What did you learn?",
    ],
    instruction: "Using the following text, craft an informative and detailed incident \
        response summary. The output of your response should be a between 2 sentences and \
        several paragraphs, depending on the amount of context offered. It does not need to \
        restate the rubric questions. Ensure clarity and conciseness, without referring \
        explicitly to 'the incident response form'.",
};

const PULL_REQUEST: DocumentType = DocumentType {
    name: "Pull Request/Commit Message",
    questions: &[
        "What did you do?",
        "Why did you do it?",
        "What did you learn?",
    ],
    instruction: "Using the following text, craft an informative and detailed pull request \
        description or commit message. The output of your response should be a between 2 \
        sentences and several paragraphs, depending on the amount of context offered. It does \
        not need to restate the rubric questions. Ensure clarity and conciseness, without \
        referring explicitly to 'the pull request form'.",
};

const SERVICE_REQUEST: DocumentType = DocumentType {
    name: "Service Request",
    questions: &[
        "What do you want?",
        "Why do you want it?",
        "How do you want it?",
        "What will you do with it?",
    ],
    instruction: "Using the following text, craft an informative and detailed service \
        request. The output of your response should be a between 2 sentences and several \
        paragraphs, depending on the amount of context offered. It does not need to restate \
        the rubric questions. Ensure clarity and conciseness, without referring explicitly to \
        'the service request form'.",
};

const DEVELOPMENT_TICKET: DocumentType = DocumentType {
    name: "Development ticket",
    questions: &[
        "Is this a feature, bug, or chore?",
        "What is the current behavior?",
        "How do you want to change, modify, or add behavior?",
        "Why do you want this change? What are the benefits?",
        "What are the acceptance criteria for this change?",
    ],
    instruction: "Your task is to use the following text to create a detailed and \
        informative ticket for a development task. The ticket should describe the type of \
        work, the current behavior, the desired change, its benefits, and clear acceptance \
        criteria. The output of your response should be a between 2 sentences and several \
        paragraphs, depending on the amount of context offered. It does not need to restate \
        the rubric questions. Ensure clarity and conciseness, without referring explicitly to \
        'the development ticket form'.",
};

static CATALOG: [DocumentType; 4] = [
    INCIDENT_RESPONSE,
    PULL_REQUEST,
    SERVICE_REQUEST,
    DEVELOPMENT_TICKET,
];

/// Returns every document type in display order.
#[must_use]
pub fn all() -> &'static [DocumentType] {
    &CATALOG
}

/// Looks up a document type by its display name.
#[must_use]
pub fn find(name: &str) -> Option<&'static DocumentType> {
    CATALOG.iter().find(|doc_type| doc_type.name == name)
}
