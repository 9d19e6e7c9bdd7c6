//! Error types and error handling for the compiler.
//!
//! Every stage reports failures as an [`errors::Error`]: an [`errors::ErrorImpl`]
//! variant carrying the details, plus the 1-based source position it refers to.
//! Lexical and committed syntax errors stop the pipeline immediately; semantic
//! errors accumulate per pass.

pub mod errors;

#[cfg(test)]
mod tests;
