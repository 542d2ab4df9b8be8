//! Command interpreter
//!
//! Maps a single utterance to a classified intent and a response. The
//! interpreter is pure: it never performs side effects itself and never
//! fails. Side effects (opening a browser, exiting the loop) are returned
//! as an [`Action`] for the caller to execute.

use chrono::{DateTime, Local};

/// Default web search endpoint; the query is appended percent-encoded
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search?q=";

/// Utterances that end the session (exact match after trim/lowercase)
pub const EXIT_WORDS: [&str; 4] = ["exit", "quit", "bye", "goodbye"];

/// Classified purpose of an utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Nothing was heard (empty or whitespace input)
    Empty,
    /// A greeting ("hello", "hi ...")
    Greeting,
    /// Current time request
    Time,
    /// Current date request
    Date,
    /// Web search with the extracted query (may be empty)
    Search(String),
    /// Session end request
    Exit,
    /// Anything else
    Unknown,
}

/// Side effect requested by a reply, at most one per utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No side effect
    None,
    /// Open the given URL in the system browser
    OpenUrl(String),
    /// End the assistant loop
    Exit,
}

/// Response to one utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Text to speak or print
    pub text: String,
    /// Side effect for the caller to execute
    pub action: Action,
}

impl Reply {
    fn say(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: Action::None,
        }
    }
}

/// Interprets utterances against the fixed intent set
#[derive(Debug, Clone)]
pub struct Interpreter {
    search_url: String,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_URL.to_string())
    }
}

impl Interpreter {
    /// Create an interpreter with the given search endpoint
    #[must_use]
    pub const fn new(search_url: String) -> Self {
        Self { search_url }
    }

    /// Classify an utterance.
    ///
    /// Checks run in a fixed order and the first match wins, so e.g.
    /// "search for the time" is a [`Intent::Time`] request — the time and
    /// date checks deliberately precede the search prefix checks.
    #[must_use]
    pub fn classify(&self, input: &str) -> Intent {
        let cmd = input.trim().to_lowercase();

        if cmd.is_empty() {
            return Intent::Empty;
        }
        if cmd.contains("hello") || cmd.starts_with("hi") {
            return Intent::Greeting;
        }
        if cmd.contains("time") {
            return Intent::Time;
        }
        if cmd.contains("date") {
            return Intent::Date;
        }
        if cmd.starts_with("search") || cmd.starts_with("find") || cmd.contains("search for") {
            return Intent::Search(extract_query(&cmd));
        }
        if EXIT_WORDS.contains(&cmd.as_str()) {
            return Intent::Exit;
        }
        Intent::Unknown
    }

    /// Produce the reply for an utterance using the current local time
    #[must_use]
    pub fn interpret(&self, input: &str) -> Reply {
        self.interpret_at(input, Local::now())
    }

    /// Produce the reply for an utterance at an explicit timestamp
    #[must_use]
    pub fn interpret_at(&self, input: &str, now: DateTime<Local>) -> Reply {
        match self.classify(input) {
            Intent::Empty => Reply::say("I didn't hear anything."),
            Intent::Greeting => Reply::say("Hello! How can I help you?"),
            Intent::Time => Reply::say(format!("The time is {}", now.format("%I:%M %p"))),
            Intent::Date => Reply::say(format!("Today is {}", now.format("%B %d, %Y"))),
            Intent::Search(query) => self.search_reply(&query),
            Intent::Exit => Reply {
                text: "Goodbye!".to_string(),
                action: Action::Exit,
            },
            Intent::Unknown => Reply::say("Sorry, I don't know how to help with that."),
        }
    }

    /// Build the search reply, prompting when the query is empty
    fn search_reply(&self, query: &str) -> Reply {
        if query.is_empty() {
            return Reply::say("What would you like me to search for?");
        }
        let url = format!("{}{}", self.search_url, urlencoding::encode(query));
        Reply {
            text: format!("Searching the web for {query}"),
            action: Action::OpenUrl(url),
        }
    }
}

/// Extract the search query from a normalized command.
///
/// Text after the first "search for" wins; otherwise everything after the
/// first space ("search cats", "find rust tutorials").
fn extract_query(cmd: &str) -> String {
    if let Some((_, rest)) = cmd.split_once("search for") {
        return rest.trim().to_string();
    }
    cmd.split_once(' ')
        .map(|(_, rest)| rest.trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpreter() -> Interpreter {
        Interpreter::default()
    }

    #[test]
    fn test_empty_input() {
        let reply = interpreter().interpret("   ");
        assert_eq!(reply.text, "I didn't hear anything.");
        assert_eq!(reply.action, Action::None);
    }

    #[test]
    fn test_greeting_anywhere_in_input() {
        let it = interpreter();
        assert_eq!(it.classify("hello there"), Intent::Greeting);
        assert_eq!(it.classify("well hello to you"), Intent::Greeting);
        assert_eq!(it.classify("hi"), Intent::Greeting);
    }

    #[test]
    fn test_greeting_beats_later_rules() {
        // "hello, search for cats" still greets: first match wins
        assert_eq!(
            interpreter().classify("hello, search for cats"),
            Intent::Greeting
        );
    }

    #[test]
    fn test_search_for_time_is_time() {
        // Pre-existing precedence quirk: the time check runs first
        assert_eq!(interpreter().classify("search for the time"), Intent::Time);
    }

    #[test]
    fn test_query_extraction_search_for() {
        assert_eq!(
            interpreter().classify("search for cats"),
            Intent::Search("cats".to_string())
        );
    }

    #[test]
    fn test_query_extraction_first_space() {
        assert_eq!(
            interpreter().classify("find rust tutorials"),
            Intent::Search("rust tutorials".to_string())
        );
    }

    #[test]
    fn test_bare_search_prompts() {
        let reply = interpreter().interpret("search");
        assert_eq!(reply.text, "What would you like me to search for?");
        assert_eq!(reply.action, Action::None);
    }

    #[test]
    fn test_search_url_is_encoded() {
        let reply = interpreter().interpret("search for rust & wasm");
        match reply.action {
            Action::OpenUrl(url) => {
                assert!(url.starts_with(DEFAULT_SEARCH_URL));
                assert!(url.contains("rust%20%26%20wasm"));
            }
            other => panic!("expected OpenUrl, got {other:?}"),
        }
    }

    #[test]
    fn test_exit_words_exact_only() {
        let it = interpreter();
        for word in ["exit", "quit", "bye", "goodbye", "  QUIT  "] {
            assert_eq!(it.classify(word), Intent::Exit, "word: {word}");
        }
        // Substring is not enough — must match exactly after normalization
        assert_eq!(it.classify("please exit now"), Intent::Unknown);
    }

    #[test]
    fn test_unknown_fallback() {
        let reply = interpreter().interpret("make me a sandwich");
        assert_eq!(reply.text, "Sorry, I don't know how to help with that.");
        assert_eq!(reply.action, Action::None);
    }

    #[test]
    fn test_time_format_at_fixed_instant() {
        use chrono::TimeZone;
        let now = Local.with_ymd_and_hms(2024, 3, 7, 15, 5, 0).unwrap();
        let reply = interpreter().interpret_at("what time is it", now);
        assert_eq!(reply.text, "The time is 03:05 PM");
    }

    #[test]
    fn test_date_format_at_fixed_instant() {
        use chrono::TimeZone;
        let now = Local.with_ymd_and_hms(2024, 3, 7, 15, 5, 0).unwrap();
        let reply = interpreter().interpret_at("what's the date", now);
        assert_eq!(reply.text, "Today is March 07, 2024");
    }
}
