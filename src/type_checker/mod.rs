//! Semantic analysis.
//!
//! Runs in two passes over the parsed program:
//!
//! - The first pass builds the scope tree, registers every declaration as a
//!   symbol and resolves every written type against the [`type_table::TypeTable`].
//! - The second pass binds every name to a symbol and checks the type of every
//!   expression and statement.
//!
//! Each pass collects all of its errors; a pass that reports anything stops
//! the pipeline before the next one.

pub mod first_pass;
pub mod scope;
pub mod second_pass;
pub mod type_table;
