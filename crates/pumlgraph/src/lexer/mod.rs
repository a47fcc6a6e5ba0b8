//! Lexer for the PlantUML class-diagram subset
//!
//! Scans an in-memory source buffer in one forward pass and produces typed
//! tokens. The parser needs exactly one token of hindsight to recover the
//! left-hand operand of an arrow or keyword relation, so the lexer keeps a
//! two-slot history instead of supporting stream rewinding.

mod token;

pub use token::{ElementKind, Token, TokenKind};

use tracing::trace;

use crate::core::PumlError;

const DIRECTIONS: [&str; 4] = ["up", "down", "left", "right"];

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_arrow_char(c: char) -> bool {
    matches!(c, '<' | '>' | '|' | '-' | '.' | 'o' | '*')
}

/// Tokenizer over a complete source text
///
/// `next_token` keeps returning the end token once input is exhausted, so the
/// parser's main loop needs no separate EOF handling.
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    current: Option<Token>,
    prev: Option<Token>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            current: None,
            prev: None,
        }
    }

    /// Consume and return the next token
    pub fn next_token(&mut self) -> Result<Token, PumlError> {
        let token = self.scan_token()?;
        trace!(kind = %token.kind, text = %token.text, "lexed token");
        self.prev = std::mem::replace(&mut self.current, Some(token.clone()));
        Ok(token)
    }

    /// The token immediately before the most recently returned one
    ///
    /// This is a read of lexer history; the forward cursor is unaffected.
    pub fn prev_token(&self) -> Option<&Token> {
        self.prev.as_ref()
    }

    /// Consume the next token, requiring it to be an element value
    pub fn next_element_value(&mut self) -> Result<Token, PumlError> {
        let token = self.next_token()?;
        if token.kind != TokenKind::ElementValue {
            return Err(PumlError::unexpected(
                "element value",
                format!("{} ({})", token.kind, token.text),
            ));
        }
        Ok(token)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn scan_token(&mut self) -> Result<Token, PumlError> {
        self.skip_whitespace();

        let c = match self.peek() {
            Some(c) => c,
            None => return Ok(Token::end_of_input()),
        };

        match c {
            '@' => self.scan_marker(),
            '{' => {
                self.advance();
                Ok(Token::new(TokenKind::OpenBrace, "{"))
            }
            '}' => {
                self.advance();
                Ok(Token::new(TokenKind::CloseBrace, "}"))
            }
            '"' => self.scan_quoted(),
            '<' | '>' | '|' | '-' | '.' => self.scan_arrow(),
            // `o` and `*` open aggregation/composition arrows only when glued
            // to a line character; a lone `o` is an ordinary bare word.
            'o' | '*' if matches!(self.peek_at(1), Some('-') | Some('.')) => self.scan_arrow(),
            _ if is_word_char(c) => self.scan_word(),
            _ => Err(PumlError::lex(c.to_string(), self.line, self.column)),
        }
    }

    fn scan_marker(&mut self) -> Result<Token, PumlError> {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();
        text.push(self.advance().expect("marker starts at '@'"));
        while matches!(self.peek(), Some(c) if is_word_char(c)) {
            text.push(self.advance().expect("peeked"));
        }
        match text.as_str() {
            "@startuml" => Ok(Token::new(TokenKind::Start, text)),
            "@enduml" => Ok(Token::new(TokenKind::End, text)),
            _ => Err(PumlError::lex(text, line, column)),
        }
    }

    fn scan_quoted(&mut self) -> Result<Token, PumlError> {
        let (line, column) = (self.line, self.column);
        self.advance(); // opening quote
        let mut text = String::new();
        loop {
            match self.advance() {
                Some('"') => return Ok(Token::new(TokenKind::ElementValue, text)),
                Some(c) => text.push(c),
                None => {
                    return Err(PumlError::lex(format!("\"{}", text), line, column));
                }
            }
        }
    }

    fn scan_word(&mut self) -> Result<Token, PumlError> {
        let (line, column) = (self.line, self.column);
        let word = self.take_word();
        if word == "abstract" {
            // `abstract class` lexes as a single element keyword
            self.skip_whitespace();
            let next = self.take_word();
            if next != "class" {
                return Err(PumlError::lex(format!("abstract {}", next), line, column));
            }
            return Ok(Token::new(
                TokenKind::Element(ElementKind::AbstractClass),
                "abstract class",
            ));
        }
        let kind = match word.as_str() {
            "class" => TokenKind::Element(ElementKind::Class),
            "interface" => TokenKind::Element(ElementKind::Interface),
            "package" => TokenKind::Element(ElementKind::Package),
            "extends" => TokenKind::Extends,
            "implements" => TokenKind::Implements,
            _ => TokenKind::ElementValue,
        };
        Ok(Token::new(kind, word))
    }

    fn take_word(&mut self) -> String {
        let mut word = String::new();
        while matches!(self.peek(), Some(c) if is_word_char(c)) {
            word.push(self.advance().expect("peeked"));
        }
        word
    }

    /// Greedy, longest-match scan of one arrow run
    ///
    /// A run is a maximal sequence of arrow characters, optionally carrying
    /// embedded direction words (`up`, `down`, `left`, `right`) when they are
    /// followed by more arrow characters, so `<|up--` is one token.
    fn scan_arrow(&mut self) -> Result<Token, PumlError> {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();
        loop {
            match self.peek() {
                Some(c) if is_arrow_char(c) => {
                    text.push(self.advance().expect("peeked"));
                }
                Some(c) if c.is_ascii_alphabetic() && !text.is_empty() => {
                    match self.direction_ahead() {
                        Some(dir) => {
                            for _ in 0..dir.len() {
                                self.advance();
                            }
                            text.push_str(dir);
                        }
                        None => break,
                    }
                }
                _ => break,
            }
        }

        let first = text.chars().next().expect("arrow scan entered on arrow char");
        let last = text.chars().last().expect("arrow scan entered on arrow char");
        let kind = if first == '<' || first == 'o' || first == '*' {
            TokenKind::LeftArrow
        } else if last == '>' || last == 'o' || last == '*' {
            TokenKind::RightArrow
        } else if text.chars().all(|c| c == '-' || c == '.') {
            // bare link (`--`, `..`): pointed right, rejected by the parser
            TokenKind::RightArrow
        } else {
            return Err(PumlError::lex(text, line, column));
        };
        Ok(Token::new(kind, text))
    }

    /// The direction word starting at the cursor, if the character after it
    /// continues the arrow run
    fn direction_ahead(&self) -> Option<&'static str> {
        DIRECTIONS.iter().copied().find(|dir| {
            dir.chars()
                .enumerate()
                .all(|(i, c)| self.peek_at(i) == Some(c))
                && matches!(self.peek_at(dir.len()), Some(c) if is_arrow_char(c))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_texts(source: &str) -> Vec<(TokenKind, String)> {
        let mut lexer = Lexer::new(source);
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token().unwrap();
            let done = token.is_end();
            out.push((token.kind, token.text));
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn test_lex_declarations_and_arrows() {
        let source = "class Class\n\
                      abstract class AbstractClass\n\
                      interface Interface\n\
                      AbstractClass <|-- Class\n\
                      AbstractClass ..|> Interface\n\
                      package Package {\n\
                          class ClassInPackage\n\
                      }\n";
        let tokens = kinds_and_texts(source);
        let expected: Vec<(TokenKind, &str)> = vec![
            (TokenKind::Element(ElementKind::Class), "class"),
            (TokenKind::ElementValue, "Class"),
            (TokenKind::Element(ElementKind::AbstractClass), "abstract class"),
            (TokenKind::ElementValue, "AbstractClass"),
            (TokenKind::Element(ElementKind::Interface), "interface"),
            (TokenKind::ElementValue, "Interface"),
            (TokenKind::ElementValue, "AbstractClass"),
            (TokenKind::LeftArrow, "<|--"),
            (TokenKind::ElementValue, "Class"),
            (TokenKind::ElementValue, "AbstractClass"),
            (TokenKind::RightArrow, "..|>"),
            (TokenKind::ElementValue, "Interface"),
            (TokenKind::Element(ElementKind::Package), "package"),
            (TokenKind::ElementValue, "Package"),
            (TokenKind::OpenBrace, "{"),
            (TokenKind::Element(ElementKind::Class), "class"),
            (TokenKind::ElementValue, "ClassInPackage"),
            (TokenKind::CloseBrace, "}"),
            (TokenKind::End, ""),
        ];
        let expected: Vec<(TokenKind, String)> = expected
            .into_iter()
            .map(|(k, t)| (k, t.to_string()))
            .collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_lex_start_and_end_markers() {
        let tokens = kinds_and_texts("@startuml\n@enduml");
        assert_eq!(tokens[0], (TokenKind::Start, "@startuml".to_string()));
        assert_eq!(tokens[1], (TokenKind::End, "@enduml".to_string()));
    }

    #[test]
    fn test_end_token_is_idempotent() {
        let mut lexer = Lexer::new("class A");
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        for _ in 0..3 {
            assert!(lexer.next_token().unwrap().is_end());
        }
    }

    #[test]
    fn test_prev_token_is_one_step_of_history() {
        let mut lexer = Lexer::new("A <|-- B");
        assert!(lexer.prev_token().is_none());
        lexer.next_token().unwrap(); // A
        let arrow = lexer.next_token().unwrap();
        assert_eq!(arrow.kind, TokenKind::LeftArrow);
        assert_eq!(lexer.prev_token().unwrap().text, "A");
        lexer.next_token().unwrap(); // B
        assert_eq!(lexer.prev_token().unwrap().text, "<|--");
    }

    #[test]
    fn test_quoted_element_value_strips_quotes() {
        let tokens = kinds_and_texts("class \"Fancy Name\"");
        assert_eq!(tokens[1], (TokenKind::ElementValue, "Fancy Name".to_string()));
    }

    #[test]
    fn test_unterminated_quote_fails() {
        let mut lexer = Lexer::new("class \"oops");
        lexer.next_token().unwrap();
        assert!(matches!(
            lexer.next_token(),
            Err(PumlError::Lex { .. })
        ));
    }

    #[test]
    fn test_direction_infix_is_one_token() {
        for arrow in ["<|up--", "<|down--", "<|left..", "<|right-", "-up-|>", ".down.|>"] {
            let source = format!("A {} B", arrow);
            let tokens = kinds_and_texts(&source);
            assert_eq!(tokens[1].1, arrow, "arrow {} split apart", arrow);
        }
    }

    #[test]
    fn test_aggregation_and_composition_runs() {
        assert_eq!(
            kinds_and_texts("A o-- B")[1],
            (TokenKind::LeftArrow, "o--".to_string())
        );
        assert_eq!(
            kinds_and_texts("A *-- B")[1],
            (TokenKind::LeftArrow, "*--".to_string())
        );
        assert_eq!(
            kinds_and_texts("A --o B")[1],
            (TokenKind::RightArrow, "--o".to_string())
        );
        assert_eq!(
            kinds_and_texts("A --* B")[1],
            (TokenKind::RightArrow, "--*".to_string())
        );
    }

    #[test]
    fn test_bare_link_lexes_as_right_arrow() {
        assert_eq!(
            kinds_and_texts("A -- B")[1],
            (TokenKind::RightArrow, "--".to_string())
        );
        assert_eq!(
            kinds_and_texts("A .. B")[1],
            (TokenKind::RightArrow, "..".to_string())
        );
    }

    #[test]
    fn test_word_starting_with_o_is_a_value() {
        let tokens = kinds_and_texts("class order");
        assert_eq!(tokens[1], (TokenKind::ElementValue, "order".to_string()));
    }

    #[test]
    fn test_next_element_value_rejects_other_kinds() {
        let mut lexer = Lexer::new("{");
        assert!(matches!(
            lexer.next_element_value(),
            Err(PumlError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn test_unknown_marker_fails_with_position() {
        let mut lexer = Lexer::new("\n@startfoo");
        match lexer.next_token() {
            Err(PumlError::Lex { found, line, .. }) => {
                assert_eq!(found, "@startfoo");
                assert_eq!(line, 2);
            }
            other => panic!("expected lexical error, got {:?}", other),
        }
    }

    #[test]
    fn test_unclassifiable_character_fails() {
        let mut lexer = Lexer::new("class A\n  $");
        lexer.next_token().unwrap();
        lexer.next_token().unwrap();
        assert!(matches!(lexer.next_token(), Err(PumlError::Lex { .. })));
    }

    #[test]
    fn test_abstract_without_class_fails() {
        let mut lexer = Lexer::new("abstract interface A");
        assert!(matches!(lexer.next_token(), Err(PumlError::Lex { .. })));
    }
}
