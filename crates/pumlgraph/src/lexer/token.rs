//! Token model for the PlantUML class-diagram subset
//!
//! A token is an immutable pair of kind and matched text. The kind set is
//! closed; anything the lexer cannot classify is a lexical error, never a
//! catch-all token.

use std::fmt;

/// Which diagram element a keyword token introduces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Class,
    AbstractClass,
    Interface,
    Package,
}

impl ElementKind {
    /// The keyword as it appears in source
    pub fn keyword(self) -> &'static str {
        match self {
            ElementKind::Class => "class",
            ElementKind::AbstractClass => "abstract class",
            ElementKind::Interface => "interface",
            ElementKind::Package => "package",
        }
    }
}

/// Closed set of token kinds produced by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `@startuml`
    Start,
    /// `@enduml`, and the idempotent end-of-input token
    End,
    /// `class`, `abstract class`, `interface`, `package`
    Element(ElementKind),
    /// A bare word or quoted string naming an entity or package
    ElementValue,
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `extends`
    Extends,
    /// `implements`
    Implements,
    /// An arrow run pointing left, e.g. `<|--`, `<|up..`, `o--`
    LeftArrow,
    /// An arrow run pointing right, e.g. `..|>`, `-down-|>`, `-->`
    RightArrow,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Start => "start marker",
            TokenKind::End => "end marker",
            TokenKind::Element(kind) => kind.keyword(),
            TokenKind::ElementValue => "element value",
            TokenKind::OpenBrace => "open brace",
            TokenKind::CloseBrace => "close brace",
            TokenKind::Extends => "extends",
            TokenKind::Implements => "implements",
            TokenKind::LeftArrow => "left arrow",
            TokenKind::RightArrow => "right arrow",
        };
        write!(f, "{}", name)
    }
}

/// One lexed token: kind plus the exact matched text
///
/// Tokens are produced once by the lexer and never mutated. Quoted element
/// values store the inner text without the surrounding quotes; the
/// synthesized end-of-input token has empty text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// The end-of-input token returned once the source is exhausted
    pub fn end_of_input() -> Self {
        Self::new(TokenKind::End, "")
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::End
    }
}
