use std::collections::HashMap;

const DEFAULT_REPLIES: &[(&str, &str)] = &[
    ("hello", "Hi, how can I help you today?"),
    ("hi", "Hello there! How’s it going?"),
    ("hey", "Hey! What’s up?"),
    ("good morning", "Good morning! Hope your day starts bright ☀️"),
    ("good afternoon", "Good afternoon! How’s your day going?"),
    ("good evening", "Good evening! How was your day?"),
    ("good night", "Good night 🌙 Sweet dreams!"),
    (
        "how are you",
        "I'm just a bot, but I'm doing great! What about you?",
    ),
    ("thank you", "You’re welcome! Always happy to help 😇"),
    ("bye", "Goodbye! Take care and have a great day 👋"),
    (
        "what is python",
        "Python is a high-level programming language known for its simplicity and versatility.",
    ),
    (
        "what is ai",
        "Artificial Intelligence enables machines to learn and solve problems like humans.",
    ),
    (
        "tell me a joke",
        "Why do programmers prefer dark mode? Because light attracts bugs! 🐛",
    ),
    (
        "help",
        "I can chat, explain coding, answer GK questions, and tell jokes! Try me 😄",
    ),
    ("version", "I’m ChatBot v2.1 — smarter, faster, and friendlier 🧠✨"),
];

/// Strips surrounding whitespace and byte-order marks, which browsers and
/// pasted text like to leave at the front of a message.
pub fn trim_phrase(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Lower-cases and trims a phrase the way lookup keys are stored.
pub fn normalize(text: &str) -> String {
    trim_phrase(&text.to_lowercase()).to_string()
}

/// Read-only phrase → reply table. Built once at startup and shared.
#[derive(Debug, Clone)]
pub struct CannedReplies {
    replies: HashMap<String, String>,
}

impl CannedReplies {
    pub fn builtin() -> Self {
        let replies = DEFAULT_REPLIES
            .iter()
            .map(|(phrase, reply)| (phrase.to_string(), reply.to_string()))
            .collect();
        Self { replies }
    }

    /// Builtin table plus `extra`, where `extra` wins on key collisions.
    /// Keys are normalized so configured phrases match the same inputs.
    pub fn with_overrides<I, K, V>(extra: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut table = Self::builtin();
        for (phrase, reply) in extra {
            let key = normalize(phrase.as_ref());
            if key.is_empty() {
                tracing::warn!("Ignoring canned reply with blank phrase");
                continue;
            }
            table.replies.insert(key, reply.into());
        }
        table
    }

    pub fn lookup(&self, text: &str) -> Option<&str> {
        self.replies.get(&normalize(text)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.replies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replies.is_empty()
    }
}

impl Default for CannedReplies {
    fn default() -> Self {
        Self::builtin()
    }
}
