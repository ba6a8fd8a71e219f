use crate::chat::deepseek::{ChatMessage, CompletionBackend};
use thiserror::Error;
use tracing::debug;

/// Token the model is instructed to return when the user's message is
/// not a property search.
pub const REJECTION_TOKEN: &str = "CANNOT_PARSE";

/// Some models prefix their answer despite instructions; this prefix
/// is the one accepted form.
pub const REFINED_PREFIX: &str = "Refined query:";

/// Outcome of parsing a completion reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refinement {
    /// The reply carried a usable search term.
    Refined(String),
    /// The model explicitly declined to produce one.
    Rejected,
}

#[derive(Debug, Error)]
pub enum RefineError {
    #[error("The assistant could not turn that message into a property search")]
    Rejected,
    #[error("Chat completion failed: {0}")]
    Transport(#[from] anyhow::Error),
}

/// Parse a completion reply into a refined term or an explicit
/// rejection. The grammar is deliberately narrow:
///
/// - an empty reply, or one whose first line equals the rejection
///   token (case-insensitive), is a rejection;
/// - a first line starting with `Refined query:` yields the remainder
///   of that line;
/// - anything else is taken whole, trimmed, as the term.
pub fn parse_reply(reply: &str) -> Refinement {
    let trimmed = reply.trim();
    if trimmed.is_empty() {
        return Refinement::Rejected;
    }

    let first_line = trimmed.lines().next().unwrap_or("").trim();
    if first_line.eq_ignore_ascii_case(REJECTION_TOKEN) {
        return Refinement::Rejected;
    }

    if let Some(rest) = first_line.strip_prefix(REFINED_PREFIX) {
        let term = rest.trim();
        if term.is_empty() {
            return Refinement::Rejected;
        }
        return Refinement::Refined(term.to_string());
    }

    Refinement::Refined(trimmed.to_string())
}

/// Build the fixed instruction for one user message. The user text is
/// embedded in the system message, matching the completion contract
/// the parser above expects.
pub fn refinement_messages(user_text: &str) -> Vec<ChatMessage> {
    let instruction = format!(
        "You're a property search assistant.\n\
         User: {user_text}\n\n\
         Return a concise query capturing the property search. Follow these guidelines:\n\
         1. For multiple locations, separate them with commas (e.g., \"dublin, galway\")\n\
         2. Include both cities and regions mentioned\n\
         3. Format should be like \"house under 300k 3 bed dublin, athlone\"\n\
         4. If a location is mentioned in relation to another (e.g., \"near\", \"close to\"), include both\n\
         5. Reply with the refined query only, no extra text.\n\
         6. If the message is not about finding a property, reply with exactly {REJECTION_TOKEN}."
    );

    vec![ChatMessage {
        role: "system".to_string(),
        content: instruction,
    }]
}

/// Send one user message through the completion backend and extract
/// the refined search term.
pub async fn refine_query(
    backend: &dyn CompletionBackend,
    user_text: &str,
) -> Result<String, RefineError> {
    let messages = refinement_messages(user_text);
    let reply = backend.complete(&messages).await?;

    debug!("Completion reply: {:?}", reply);

    match parse_reply(&reply) {
        Refinement::Refined(term) => Ok(term),
        Refinement::Rejected => Err(RefineError::Rejected),
    }
}
