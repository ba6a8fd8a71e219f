/// Greeting shown when the assistant opens.
pub const GREETING: &str =
    "Hi there! I'm your property assistant. How can I help you find your dream home today?";

/// Fallback when a message could not be turned into a search.
pub const FALLBACK: &str = "I'm not sure I understand. Please ask about properties using \
                            terms like 'location', 'price', 'house type', etc.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

/// The chat transcript plus the single-outstanding-request guard:
/// user input is always appended, but only one refinement may be in
/// flight at a time.
#[derive(Debug)]
pub struct Transcript {
    messages: Vec<Message>,
    pending: bool,
}

impl Transcript {
    pub fn new() -> Self {
        Self {
            messages: vec![Message {
                sender: Sender::Bot,
                text: GREETING.to_string(),
            }],
            pending: false,
        }
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(Message {
            sender: Sender::User,
            text: text.into(),
        });
    }

    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.messages.push(Message {
            sender: Sender::Bot,
            text: text.into(),
        });
    }

    /// Claim the send slot. Returns false if a request is already in
    /// flight, in which case the caller must not issue another.
    pub fn begin_send(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn finish_send(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

/// Bot confirmation for a successful refinement. When the refined term
/// names several locations (comma-separated, per the prompt contract)
/// the confirmation calls them out.
pub fn confirmation(refined: &str) -> String {
    let locations = refined_locations(refined);
    if locations.len() > 1 {
        format!(
            "I'll look for properties in {} with: \"{}\"",
            locations.join(" and "),
            refined
        )
    } else {
        format!("Sure! Let me filter properties using: \"{refined}\"")
    }
}

/// Locations named by a refined term. The prompt contract puts extra
/// locations after commas, with the first location as the last word of
/// the first segment ("house under 300k 3 bed dublin, athlone").
fn refined_locations(refined: &str) -> Vec<&str> {
    let mut segments = refined.split(',').map(str::trim);
    let first = match segments.next() {
        Some(s) => s,
        None => return vec![],
    };

    let rest: Vec<&str> = segments.filter(|s| !s.is_empty()).collect();
    if rest.is_empty() {
        return vec![];
    }

    let mut locations = Vec::with_capacity(rest.len() + 1);
    if let Some(last_word) = first.split_whitespace().last() {
        locations.push(last_word);
    }
    locations.extend(rest);
    locations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_greeting() {
        let transcript = Transcript::new();
        assert_eq!(transcript.messages().len(), 1);
        assert_eq!(transcript.messages()[0].sender, Sender::Bot);
        assert_eq!(transcript.messages()[0].text, GREETING);
    }

    #[test]
    fn only_one_send_in_flight() {
        let mut transcript = Transcript::new();
        assert!(transcript.begin_send());
        assert!(!transcript.begin_send());
        transcript.finish_send();
        assert!(transcript.begin_send());
    }

    #[test]
    fn input_accepted_while_pending() {
        let mut transcript = Transcript::new();
        assert!(transcript.begin_send());
        transcript.push_user("also check cork");
        assert_eq!(transcript.messages().len(), 2);
        assert!(transcript.is_pending());
    }

    #[test]
    fn single_location_confirmation() {
        assert_eq!(
            confirmation("3 bed house dublin"),
            "Sure! Let me filter properties using: \"3 bed house dublin\""
        );
    }

    #[test]
    fn multi_location_confirmation() {
        assert_eq!(
            confirmation("house under 300k 3 bed dublin, athlone"),
            "I'll look for properties in dublin and athlone with: \
             \"house under 300k 3 bed dublin, athlone\""
        );
    }
}
