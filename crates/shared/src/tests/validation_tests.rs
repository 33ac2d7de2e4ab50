use super::*;
use crate::domain::MAX_SEARCH_TERM_CHARS;

fn rejection(raw: &str) -> Option<Rejection> {
    match validate(raw) {
        ValidationResult::Accepted(_) => None,
        ValidationResult::Rejected(reason) => Some(reason),
    }
}

#[test]
fn accepts_plain_letters_digits_and_spaces() {
    for raw in ["hello world", "a", "Rust 2021", "   ", "42", "ABC def 123"] {
        let ValidationResult::Accepted(term) = validate(raw) else {
            panic!("expected {raw:?} to be accepted");
        };
        assert_eq!(term.as_str(), raw);
    }
}

#[test]
fn accepted_term_is_the_raw_input_unchanged() {
    let term = validate("  padded  ").into_result().expect("accepted");
    assert_eq!(term.into_inner(), "  padded  ");
}

#[test]
fn rejects_sql_metacharacters() {
    for raw in ["it's", "say \"hi\"", "a;b", "a--b", "a#b", "/* x", "x */", "--"] {
        assert_eq!(
            rejection(raw),
            Some(Rejection::SqlInjectionSuspected),
            "{raw:?}"
        );
    }
}

#[test]
fn rejects_whole_word_keywords_in_any_case() {
    for raw in [
        "1=1 OR 1=1",
        "cats and dogs",
        "Select name",
        "insert x",
        "UPDATE",
        "delete me",
        "drop table",
        "union",
        "wHeRe",
        "and-x",
        "x.or.y",
    ] {
        assert_eq!(
            rejection(raw),
            Some(Rejection::SqlInjectionSuspected),
            "{raw:?}"
        );
    }
}

#[test]
fn keywords_inside_words_do_not_trip_the_heuristic() {
    for raw in [
        "android",
        "Andrew",
        "order by",
        "selection",
        "updates",
        "dropbox",
        "reunion",
        "nowhere",
        "AND5",
        "5OR",
    ] {
        assert!(!is_sql_injection(raw), "{raw:?}");
        assert_eq!(rejection(raw), None, "{raw:?}");
    }
}

#[test]
fn word_boundaries_treat_unicode_letters_and_underscore_as_word_chars() {
    assert!(!is_sql_injection("éAND"));
    assert!(!is_sql_injection("x_and"));
    assert_eq!(rejection("éAND"), Some(Rejection::InvalidCharacters));
    assert_eq!(rejection("x_and"), Some(Rejection::InvalidCharacters));
}

#[test]
fn combining_mark_after_keyword_is_a_word_character() {
    assert!(!is_sql_injection("AND\u{301}"));
    assert!(!is_sql_injection("x OR\u{301} y"));
    assert_eq!(rejection("AND\u{301}"), Some(Rejection::InvalidCharacters));
}

#[test]
fn injection_message_takes_precedence_over_allow_list() {
    assert_eq!(rejection("drop!"), Some(Rejection::SqlInjectionSuspected));
    let long_with_keyword = format!("{} OR", "a".repeat(MAX_SEARCH_TERM_CHARS));
    assert_eq!(
        rejection(&long_with_keyword),
        Some(Rejection::SqlInjectionSuspected)
    );
}

#[test]
fn rejects_characters_outside_the_allow_list() {
    for raw in ["héllo!", "tab\there", "hello\n", "a-b", "50%", "<script>", "x@y"] {
        assert_eq!(rejection(raw), Some(Rejection::InvalidCharacters), "{raw:?}");
    }
}

#[test]
fn enforces_length_bounds() {
    assert_eq!(rejection(""), Some(Rejection::InvalidCharacters));
    assert_eq!(rejection(&"a".repeat(MAX_SEARCH_TERM_CHARS)), None);
    assert_eq!(
        rejection(&"a".repeat(MAX_SEARCH_TERM_CHARS + 1)),
        Some(Rejection::InvalidCharacters)
    );
}

#[test]
fn rejection_messages_are_user_facing() {
    assert_eq!(
        Rejection::SqlInjectionSuspected.to_string(),
        "SQL injection patterns are not allowed."
    );
    assert_eq!(
        Rejection::InvalidCharacters.to_string(),
        "Invalid input. Only letters, numbers, and spaces are allowed."
    );
}

#[test]
fn validation_is_deterministic() {
    for raw in ["hello world", "1=1 OR 1=1", "héllo!", ""] {
        assert_eq!(validate(raw), validate(raw));
    }
}
