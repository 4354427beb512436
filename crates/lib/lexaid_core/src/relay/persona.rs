//! Fixed assistant persona and the follow-up actions offered with every reply.

/// System instruction sent with every upstream request.
pub const SYSTEM_PROMPT: &str = "You are an AI Legal Assistant, specialized in:
1. Providing legal advice
2. Case status tracking and updates
3. Legal document and contract review
4. Court date reminders and scheduling
5. Lawyer contact and communication

Your primary features include:
- Transcription and analysis of police encounters
- Sending transcriptions to trusted contacts
- Reviewing and summarizing legal documents

Provide concise, accurate legal information. If relevant, include:
- Actionable legal advice
- Important deadlines
- Safety considerations in legal situations
- Clear next steps for legal processes
";

/// Suggested follow-up actions, in display order.
pub const SUGGESTED_ACTIONS: [&str; 8] = [
    "Get free legal advice",
    "Check eligibility for legal aid",
    "Find a legal aid clinic",
    "Connect with a pro bono lawyer",
    "Review legal documents",
    "Understand your legal rights",
    "Prepare for a court date",
    "Access legal forms and resources",
];

/// Owned copy of [`SUGGESTED_ACTIONS`] for a response body.
pub fn suggested_actions() -> Vec<String> {
    SUGGESTED_ACTIONS.iter().map(|s| s.to_string()).collect()
}
