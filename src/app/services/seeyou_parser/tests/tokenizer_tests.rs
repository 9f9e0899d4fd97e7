//! Tests for quote-aware record tokenization

use crate::app::services::seeyou_parser::record_parser::RejectReason;
use crate::app::services::seeyou_parser::tokenizer::{FieldTokenizer, tokenize};

#[test]
fn test_plain_split() {
    let record = tokenize("a,b,c", '"', 20).unwrap();
    assert_eq!(record.tokens, vec!["a", "b", "c"]);
    assert!(!record.is_truncated());
}

#[test]
fn test_quoted_comma_is_kept() {
    let record = tokenize(r#""a,b",c"#, '"', 20).unwrap();
    assert_eq!(record.tokens, vec!["a,b", "c"]);
}

#[test]
fn test_fields_are_trimmed() {
    let record = tokenize("  Alpha , A1 ,US  ", '"', 20).unwrap();
    assert_eq!(record.tokens, vec!["Alpha", "A1", "US"]);
}

#[test]
fn test_empty_fields_are_preserved() {
    let record = tokenize("a,,c,", '"', 20).unwrap();
    assert_eq!(record.tokens, vec!["a", "", "c", ""]);
    assert_eq!(record.get(1), Some(""));
    assert_eq!(record.get(4), None);
}

#[test]
fn test_unbalanced_quote_runs_to_end() {
    let record = tokenize(r#"a,"b,c"#, '"', 20).unwrap();
    assert_eq!(record.tokens, vec!["a", "b,c"]);
}

#[test]
fn test_custom_quote_char() {
    let record = tokenize("'x,y',z", '\'', 20).unwrap();
    assert_eq!(record.tokens, vec!["x,y", "z"]);

    // The default quote is an ordinary character here
    let record = tokenize(r#""x,y""#, '\'', 20).unwrap();
    assert_eq!(record.tokens, vec![r#""x"#, r#"y""#]);
}

#[test]
fn test_token_limit_counts_overflow() {
    let record = tokenize("a,b,c,d,e", '"', 3).unwrap();
    assert_eq!(record.tokens, vec!["a", "b", "c"]);
    assert_eq!(record.overflow, 2);
    assert!(record.is_truncated());
}

#[test]
fn test_line_length_bound() {
    let tokenizer = FieldTokenizer {
        max_line_length: 10,
        ..FieldTokenizer::default()
    };

    assert!(tokenizer.tokenize("123456789").is_ok());
    assert_eq!(
        tokenizer.tokenize("1234567890"),
        Err(RejectReason::LineTooLong)
    );
}

#[test]
fn test_default_line_length_is_255() {
    let short = "x".repeat(254);
    let long = "x".repeat(255);
    assert!(tokenize(&short, '"', 20).is_ok());
    assert_eq!(tokenize(&long, '"', 20), Err(RejectReason::LineTooLong));
}

#[test]
fn test_length_counts_characters() {
    let tokenizer = FieldTokenizer {
        max_line_length: 5,
        ..FieldTokenizer::default()
    };
    // Four characters, eight bytes
    assert!(tokenizer.tokenize("äöüß").is_ok());
}
