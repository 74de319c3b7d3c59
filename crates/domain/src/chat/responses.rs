//! Fixed canned-response texts.
//!
//! These are constants on purpose: tests and callers rely on exact
//! equality, and the classifier must never synthesize reply text.

/// Reply to a salutation.
pub const GREETING: &str = "\
Welcome to the Vitae resume assistant.

I can help with:
- Resume analysis and optimization
- Career guidance and planning
- Job matching and recommendations
- Skills assessment and development

Try asking about uploading your resume, the available features, or your
extracted skills.";

/// Reply to "what is this" style questions.
pub const ABOUT: &str = "\
Vitae is an AI-assisted resume analysis tool.

It parses uploaded resumes, extracts and categorizes skills, scores
experience and education, and answers career questions about the
results. Upload a resume to get started, or ask \"what features do you
offer?\".";

/// Reply to capability questions.
pub const FEATURES: &str = "\
Available features:

- Resume analysis: PDF/DOC/DOCX parsing, skill extraction and
  categorization, experience and education assessment
- Career development: personalized job recommendations and skills gap
  analysis
- Search and filtering: multi-criteria matching on skills, education
  level, and years of experience
- Interactive support: career questions answered against your uploaded
  resumes

Ask about any of these to learn more.";

/// Reply to requests for assistance.
pub const HELP: &str = "\
Things you can ask:

- \"Analyze my resume\" or \"What skills should I highlight?\"
- \"What jobs match my profile?\"
- \"What skills are in demand?\"
- \"Recommend certifications\"

Pick a topic or ask a specific question.";

/// Reply to getting-started questions.
pub const HOW_TO_USE: &str = "\
Quick start:

1. Upload a resume (PDF, DOC, or DOCX).
2. Review the extracted skills and analysis.
3. Explore job recommendations and the skills distribution.
4. Ask questions about any uploaded resume.

Need help with a specific step? Just ask.";

/// Reply when the question is outside the career domain.
pub const OUT_OF_SCOPE: &str = "\
I can only help with resume and career topics: resume analysis and
optimization, career guidance, job search strategies, skills assessment,
and interview preparation.

Please ask something related to your professional development.";

/// Reply when the backend call itself fails.
pub const REQUEST_ERROR: &str = "\
I couldn't process that request. Try rephrasing your question, or type
'help' to see what I can do.";
