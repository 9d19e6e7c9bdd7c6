use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// A diagnostic: what went wrong and where.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> Position {
        self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn is_lexical(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::UnrecognisedToken { .. }
                | ErrorImpl::InvalidNumberSuffix { .. }
                | ErrorImpl::NumberParseError { .. }
                | ErrorImpl::UnterminatedString
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::InvalidNumberSuffix { .. } => "InvalidNumberSuffix",
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenAfter { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::UnexpectedEndOfFile { .. } => "UnexpectedEndOfFile",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::InvalidType { .. } => "InvalidType",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::FunctionAlreadyDeclared { .. } => "FunctionAlreadyDeclared",
            ErrorImpl::ParameterAlreadyDeclared { .. } => "ParameterAlreadyDeclared",
            ErrorImpl::ReturnValueAlreadyDeclared { .. } => "ReturnValueAlreadyDeclared",
            ErrorImpl::BreakOutsideLoop => "BreakOutsideLoop",
            ErrorImpl::UnknownSymbol { .. } => "UnknownSymbol",
            ErrorImpl::UsedBeforeDeclaration { .. } => "UsedBeforeDeclaration",
            ErrorImpl::UsedInOwnDefinition { .. } => "UsedInOwnDefinition",
            ErrorImpl::FunctionUsedAsVariable { .. } => "FunctionUsedAsVariable",
            ErrorImpl::NotAFunction { .. } => "NotAFunction",
            ErrorImpl::OperandTypeError { .. } => "OperandTypeError",
            ErrorImpl::UnsupportedOperation { .. } => "UnsupportedOperation",
            ErrorImpl::ArgumentCountMismatch { .. } => "ArgumentCountMismatch",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::ConditionTypeError { .. } => "ConditionTypeError",
            ErrorImpl::ReturnTypeMismatch { .. } => "ReturnTypeMismatch",
            ErrorImpl::MissingReturnValue { .. } => "MissingReturnValue",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::InvalidNumberSuffix { .. } => ErrorTip::Suggestion(String::from(
                "separate the number from the following name",
            )),
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("add the closing `\"`"))
            }
            ErrorImpl::UnexpectedToken { .. } | ErrorImpl::UnexpectedTokenAfter { .. } => {
                ErrorTip::Suggestion(String::from("did you miss a semicolon or a bracket?"))
            }
            ErrorImpl::UnexpectedEndOfFile { .. } => {
                ErrorTip::Suggestion(String::from("the program ends in the middle of a construct"))
            }
            ErrorImpl::NumberParseError { .. } => {
                ErrorTip::Suggestion(String::from("is it above the integer limit?"))
            }
            ErrorImpl::InvalidType { .. } => ErrorTip::Suggestion(String::from(
                "`void` can only be used as a return type",
            )),
            ErrorImpl::BreakOutsideLoop => {
                ErrorTip::Suggestion(String::from("`break` may only appear inside a `while` body"))
            }
            ErrorImpl::UsedBeforeDeclaration { .. } => {
                ErrorTip::Suggestion(String::from("move the declaration above its first use"))
            }
            ErrorImpl::FunctionUsedAsVariable { .. } => {
                ErrorTip::Suggestion(String::from("did you mean to call it?"))
            }
            ErrorImpl::MissingReturnValue { expected } => {
                ErrorTip::Suggestion(format!("return a value of type `{}`", expected))
            }
            _ => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.position, self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexical
    #[error("unknown token found during lexing: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("invalid integral suffix: {suffix:?}")]
    InvalidNumberSuffix { suffix: char },
    #[error("unterminated string literal")]
    UnterminatedString,

    // Syntactic
    #[error("cannot parse token {token:?} in {production}")]
    UnexpectedToken { token: String, production: String },
    #[error("cannot parse token {token:?} after token {previous:?} in {production}")]
    UnexpectedTokenAfter {
        token: String,
        previous: String,
        production: String,
    },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("unexpected end of file in {production}")]
    UnexpectedEndOfFile { production: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },

    // Declarations
    #[error("unknown type: {type_}")]
    UnknownType { type_: String },
    #[error("bad type: {type_}")]
    InvalidType { type_: String },
    #[error("variable name already in use: {variable}")]
    VariableAlreadyDeclared { variable: String },
    #[error("function name already in use: {function}")]
    FunctionAlreadyDeclared { function: String },
    #[error("parameter name {parameter} already in use in function {function}")]
    ParameterAlreadyDeclared { parameter: String, function: String },
    #[error("name for return value already in use in function {function}")]
    ReturnValueAlreadyDeclared { function: String },
    #[error("invalid break statement")]
    BreakOutsideLoop,

    // References
    #[error("unknown symbol '{symbol}'")]
    UnknownSymbol { symbol: String },
    #[error("symbol '{symbol}' used before its declaration in line {line}")]
    UsedBeforeDeclaration { symbol: String, line: u32 },
    #[error("symbol '{symbol}' is used in its definition")]
    UsedInOwnDefinition { symbol: String },
    #[error("symbol '{symbol}' is a function, but used like a variable")]
    FunctionUsedAsVariable { symbol: String },
    #[error("symbol '{symbol}' is not a function, but used as one")]
    NotAFunction { symbol: String },

    // Types
    #[error("type mismatch: expected {expected} but found {received} in operation '{operation}'")]
    OperandTypeError {
        operation: String,
        expected: String,
        received: String,
    },
    #[error("operation '{operation}' is not supported on type '{type_}'")]
    UnsupportedOperation { operation: String, type_: String },
    #[error("function '{function}' requires {expected} arguments, but {received} supplied")]
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("argument {index} is of type '{received}' but must be of type '{expected}'")]
    ArgumentTypeMatchError {
        index: usize,
        expected: String,
        received: String,
    },
    #[error("attempting to assign a '{received}' to a variable of type '{expected}'")]
    TypeMatchError { expected: String, received: String },
    #[error("result type of {statement}-condition must be 'bool' but is '{received}'")]
    ConditionTypeError { statement: String, received: String },
    #[error("expected return value of type '{expected}' but found '{received}'")]
    ReturnTypeMismatch { expected: String, received: String },
    #[error("expected return value of type '{expected}'")]
    MissingReturnValue { expected: String },
}
