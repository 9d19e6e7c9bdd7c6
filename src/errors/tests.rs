//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        Position::new(1, 10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert!(error.is_lexical());
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnknownSymbol {
            symbol: "x".to_string(),
        },
        Position::new(42, 7),
    );

    assert_eq!(error.get_position(), Position::new(42, 7));
    assert!(!error.is_lexical());
}

#[test]
fn test_unexpected_token_messages() {
    let after = Error::new(
        ErrorImpl::UnexpectedTokenAfter {
            token: ")".to_string(),
            previous: "+".to_string(),
            production: "expression".to_string(),
        },
        Position::new(1, 1),
    );
    let eof = Error::new(
        ErrorImpl::UnexpectedEndOfFile {
            production: "statement block".to_string(),
        },
        Position::new(1, 1),
    );

    assert_eq!(after.get_error_name(), "UnexpectedToken");
    assert_eq!(
        after.get_impl().to_string(),
        "cannot parse token \")\" after token \"+\" in expression"
    );
    assert_eq!(
        eof.get_impl().to_string(),
        "unexpected end of file in statement block"
    );
}

#[test]
fn test_type_mismatch_error() {
    let error = Error::new(
        ErrorImpl::TypeMatchError {
            expected: "bool".to_string(),
            received: "int".to_string(),
        },
        Position::new(3, 5),
    );

    assert_eq!(error.get_error_name(), "TypeMatchError");
    assert_eq!(
        error.to_string(),
        "3:5 attempting to assign a 'int' to a variable of type 'bool'"
    );
}

#[test]
fn test_argument_count_mismatch() {
    let error = Error::new(
        ErrorImpl::ArgumentCountMismatch {
            function: "add".to_string(),
            expected: 2,
            received: 1,
        },
        Position::new(1, 1),
    );

    assert_eq!(
        error.get_impl().to_string(),
        "function 'add' requires 2 arguments, but 1 supplied"
    );
}

#[test]
fn test_error_tip() {
    let error = Error::new(ErrorImpl::BreakOutsideLoop, Position::new(1, 1));

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("while")),
        ErrorTip::None => panic!("expected a suggestion"),
    }

    let error = Error::new(
        ErrorImpl::UnknownType {
            type_: "foo".to_string(),
        },
        Position::new(1, 1),
    );
    assert!(matches!(error.get_tip(), ErrorTip::None));
}
