//! Cross-cutting concerns shared by the lexer and parser

mod error;
pub mod logging;

pub use error::*;
pub use logging::*;
