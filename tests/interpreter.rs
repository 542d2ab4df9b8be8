//! Command interpretation integration tests
//!
//! Exercises the full classify → reply path the way utterances arrive
//! from either input source: raw, unnormalized text.

use regex::Regex;
use vesper::{Action, Intent, Interpreter, DEFAULT_SEARCH_URL, EXIT_WORDS};

fn interpreter() -> Interpreter {
    Interpreter::default()
}

#[test]
fn test_greeting_reply() {
    let reply = interpreter().interpret("Hello there");
    assert_eq!(reply.text, "Hello! How can I help you?");
    assert_eq!(reply.action, Action::None);
}

#[test]
fn test_greeting_prefix_and_substring() {
    // "hello" counts anywhere; "hi" only at the start
    assert_eq!(interpreter().classify("hi vesper"), Intent::Greeting);
    assert_eq!(interpreter().classify("well hello there"), Intent::Greeting);
    assert_ne!(interpreter().classify("this is fine"), Intent::Greeting);
}

#[test]
fn test_time_reply_format() {
    let reply = interpreter().interpret("what time is it");
    let pattern = Regex::new(r"^The time is \d{2}:\d{2} (AM|PM)$").unwrap();
    assert!(
        pattern.is_match(&reply.text),
        "unexpected time reply: {}",
        reply.text
    );
    assert_eq!(reply.action, Action::None);
}

#[test]
fn test_date_reply_format() {
    let reply = interpreter().interpret("what's the date today");
    let pattern = Regex::new(r"^Today is [A-Z][a-z]+ \d{2}, \d{4}$").unwrap();
    assert!(
        pattern.is_match(&reply.text),
        "unexpected date reply: {}",
        reply.text
    );
}

#[test]
fn test_search_opens_encoded_url() {
    let reply = interpreter().interpret("search for rust programming");
    assert_eq!(reply.text, "Searching the web for rust programming");
    assert_eq!(
        reply.action,
        Action::OpenUrl(format!("{DEFAULT_SEARCH_URL}rust%20programming"))
    );
}

#[test]
fn test_search_special_characters_are_encoded() {
    let reply = interpreter().interpret("search c++ & rust?");
    match reply.action {
        Action::OpenUrl(url) => {
            let query = url.strip_prefix(DEFAULT_SEARCH_URL).unwrap();
            assert!(!query.contains(' '));
            assert!(!query.contains('&'));
            assert!(!query.contains('?'));
        }
        other => panic!("expected OpenUrl, got {other:?}"),
    }
}

#[test]
fn test_find_is_a_search_trigger() {
    let reply = interpreter().interpret("find cheap flights");
    assert_eq!(reply.text, "Searching the web for cheap flights");
}

#[test]
fn test_bare_search_asks_for_query() {
    let reply = interpreter().interpret("search");
    assert_eq!(reply.text, "What would you like me to search for?");
    assert_eq!(reply.action, Action::None);
}

#[test]
fn test_exit_words_end_the_session() {
    for word in EXIT_WORDS {
        let reply = interpreter().interpret(word);
        assert_eq!(reply.text, "Goodbye!", "word: {word}");
        assert_eq!(reply.action, Action::Exit, "word: {word}");
    }
}

#[test]
fn test_exit_requires_exact_match() {
    // exit words only count as the whole utterance
    let reply = interpreter().interpret("goodbye everyone");
    assert_ne!(reply.action, Action::Exit);
}

#[test]
fn test_exit_word_with_whitespace_and_case() {
    let reply = interpreter().interpret("  QUIT  \n");
    assert_eq!(reply.action, Action::Exit);
}

#[test]
fn test_empty_input() {
    let reply = interpreter().interpret("   ");
    assert_eq!(reply.text, "I didn't hear anything.");
    assert_eq!(reply.action, Action::None);
}

#[test]
fn test_unknown_input_falls_back() {
    let reply = interpreter().interpret("make me a sandwich");
    assert_eq!(reply.text, "Sorry, I don't know how to help with that.");
    assert_eq!(reply.action, Action::None);
}

#[test]
fn test_time_wins_over_search() {
    // classification order is fixed, so a search mentioning "time" is
    // answered as a time query
    assert_eq!(interpreter().classify("search for the time"), Intent::Time);
}

#[test]
fn test_greeting_wins_over_time() {
    assert_eq!(interpreter().classify("hello what time is it"), Intent::Greeting);
}

#[test]
fn test_custom_search_url() {
    let interpreter = Interpreter::new("https://duckduckgo.com/?q=".to_string());
    let reply = interpreter.interpret("search for rust");
    assert_eq!(
        reply.action,
        Action::OpenUrl("https://duckduckgo.com/?q=rust".to_string())
    );
}
