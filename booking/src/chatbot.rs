//! Scripted planning assistant.
//!
//! The assistant carries no state beyond the visible transcript: replies come
//! from an ordered rule table of keyword substrings, evaluated in a single
//! deterministic pass. The first rule with a matching keyword wins; anything
//! else gets the standing fallback reply.

use serde::{Deserialize, Serialize};

/// One reply rule: keyword substrings mapped to a canned response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Lowercase substrings that trigger this rule
    pub keywords: Vec<String>,
    /// The canned reply
    pub reply: String,
}

impl Rule {
    /// Creates a rule from keyword substrings and a reply
    pub fn new<K, S>(keywords: K, reply: impl Into<String>) -> Self
    where
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_lowercase())
                .collect(),
            reply: reply.into(),
        }
    }

    fn matches(&self, input: &str) -> bool {
        self.keywords.iter().any(|keyword| input.contains(keyword))
    }
}

/// Ordered rule table with a fallback reply
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleBook {
    rules: Vec<Rule>,
    fallback: String,
}

impl RuleBook {
    /// Creates a rule book
    pub fn new(rules: Vec<Rule>, fallback: impl Into<String>) -> Self {
        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    /// The standard planning-assistant script
    #[must_use]
    pub fn standard() -> Self {
        Self::new(
            vec![
                Rule::new(
                    ["theme"],
                    "For weddings, we offer Classic Elegance, Rustic Romance, Garden Bliss, \
                     Modern Minimalist, and Fairytale Fantasy themes. Each can be customized \
                     to your preferences!",
                ),
                Rule::new(
                    ["catering", "food", "menu"],
                    "Our catering services include gourmet multi-course meals, buffet-style \
                     dining, cocktail reception packages, and dietary-specific options. We \
                     work with top local chefs!",
                ),
                Rule::new(
                    ["advance", "how far", "when should"],
                    "We recommend booking 6-12 months in advance for weddings, 3-6 months for \
                     large corporate events, and 1-3 months for birthdays and smaller \
                     gatherings.",
                ),
                Rule::new(
                    ["package", "included", "include"],
                    "Our packages include venue decoration, catering, event coordination, \
                     photography/videography, entertainment options, and guest accommodation \
                     arrangements. We can create custom packages too!",
                ),
            ],
            "Thanks for your question! Our team specializes in creating memorable events \
             tailored to your preferences.",
        )
    }

    /// The reply for one input, chosen in a single deterministic pass
    #[must_use]
    pub fn reply(&self, input: &str) -> &str {
        let normalized = input.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&normalized))
            .map_or(self.fallback.as_str(), |rule| rule.reply.as_str())
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        Self::standard()
    }
}

/// One transcript entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message text
    pub body: String,
    /// Whether the assistant wrote it
    pub from_bot: bool,
}

/// The visible conversation, the assistant's only state
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

/// The standing greeting that opens every conversation
pub const GREETING: &str =
    "\u{1f44b} Hi there! I'm your event planning assistant. How can I help you today?";

/// Prompt suggestions offered alongside the greeting
pub const SUGGESTIONS: [&str; 4] = [
    "What themes do you offer for weddings?",
    "Tell me about your catering services",
    "How far in advance should I book?",
    "What's included in your packages?",
];

impl Transcript {
    /// Opens a conversation with the standing greeting
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                body: GREETING.to_string(),
                from_bot: true,
            }],
        }
    }

    /// Records the user's message and the assistant's scripted reply
    pub fn ask(&mut self, input: impl Into<String>, book: &RuleBook) {
        let input = input.into();
        if input.trim().is_empty() {
            return;
        }
        let reply = book.reply(&input).to_string();
        self.messages.push(ChatMessage {
            body: input,
            from_bot: false,
        });
        self.messages.push(ChatMessage {
            body: reply,
            from_bot: true,
        });
    }

    /// The conversation so far, in order
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}
