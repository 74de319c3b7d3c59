//! Chat intent classification.
//!
//! Decides whether a free-text question is career/resume-related and
//! picks a canned response for the common intents before the caller
//! falls back to the backend. Pure functions over a fixed keyword set;
//! no match is an answer, never an error.

pub mod responses;

use std::sync::OnceLock;

use regex::Regex;

/// Keywords that mark a question as career/resume-related.
const CAREER_KEYWORDS: [&str; 22] = [
    "resume",
    "cv",
    "job",
    "career",
    "skill",
    "experience",
    "education",
    "work",
    "employment",
    "interview",
    "position",
    "role",
    "salary",
    "qualification",
    "certification",
    "degree",
    "professional",
    "industry",
    "company",
    "employer",
    "recruitment",
    "hire",
];

/// Questions about the tool itself are always in scope.
const META_PHRASES: [&str; 5] = [
    "what is this",
    "what can you do",
    "how to use",
    "help me",
    "features",
];

/// Canned-response intents, checked in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatIntent {
    /// Salutation at the start of the question.
    Greeting,
    /// "What is this tool" style questions.
    About,
    /// Capability listings.
    Features,
    /// Requests for assistance.
    Help,
    /// Getting-started questions.
    HowToUse,
}

impl ChatIntent {
    /// The fixed response for this intent.
    #[must_use]
    pub const fn response(self) -> &'static str {
        match self {
            Self::Greeting => responses::GREETING,
            Self::About => responses::ABOUT,
            Self::Features => responses::FEATURES,
            Self::Help => responses::HELP,
            Self::HowToUse => responses::HOW_TO_USE,
        }
    }
}

#[allow(clippy::expect_used)]
fn greeting_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(hi|hello|hey|greetings|good\s*(morning|afternoon|evening))")
            .expect("greeting pattern is valid")
    })
}

/// Returns true when the question is career/resume-related, or asks
/// about the tool itself.
#[must_use]
pub fn is_in_scope(question: &str) -> bool {
    let question = question.to_lowercase();

    if META_PHRASES.iter().any(|phrase| question.contains(phrase)) {
        return true;
    }

    CAREER_KEYWORDS
        .iter()
        .any(|keyword| question.contains(keyword))
}

/// Classifies the question into one of the canned intents, if any.
#[must_use]
pub fn classify(question: &str) -> Option<ChatIntent> {
    let question = question.to_lowercase();
    let contains_any = |phrases: &[&str]| phrases.iter().any(|phrase| question.contains(phrase));

    if greeting_pattern().is_match(question.trim_start()) {
        return Some(ChatIntent::Greeting);
    }

    if contains_any(&[
        "what is this",
        "what are you",
        "who are you",
        "what do you do",
        "what's this",
    ]) {
        return Some(ChatIntent::About);
    }

    if contains_any(&[
        "what can you do",
        "features",
        "capabilities",
        "show me what you can do",
    ]) {
        return Some(ChatIntent::Features);
    }

    // "help" is checked before "how to use" so that "help me use this"
    // resolves to Help.
    if contains_any(&[
        "help",
        "assist",
        "guide",
        "support",
        "what should i",
        "how should i",
        "what can i",
    ]) {
        return Some(ChatIntent::Help);
    }

    if contains_any(&[
        "how to use",
        "how do i use",
        "how to start",
        "getting started",
        "begin",
        "tutorial",
    ]) {
        return Some(ChatIntent::HowToUse);
    }

    None
}

/// Returns the canned response for the question, if one of the fixed
/// intents matches.
#[must_use]
pub fn canned_response(question: &str) -> Option<&'static str> {
    classify(question).map(ChatIntent::response)
}
