//! Recursive-descent parser for the class-diagram subset
//!
//! Drives the lexer token by token, building the entity registry as it goes.
//! Name resolution happens against the registry snapshot at the moment a
//! relation token is processed; nothing is deferred or retried, and every
//! failure aborts the whole parse.

use tracing::{debug, span, trace, Level};

use crate::core::PumlError;
use crate::lexer::{ElementKind, Lexer, Token, TokenKind};
use crate::node::{ClassKind, ClassLike, NodeId, Nodes};

const DIRECTIONS: [&str; 4] = ["up", "down", "left", "right"];

/// The two canonical relation kinds every supported arrow spelling
/// normalizes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Relation {
    Extends,
    Implements,
}

/// Strip cosmetic direction infixes from an arrow's matched text
///
/// `up`/`down`/`left`/`right` are layout hints only and must not affect
/// relation kind or orientation.
fn strip_direction(arrow: &str) -> String {
    let mut glyph = arrow.to_string();
    for dir in DIRECTIONS {
        glyph = glyph.replace(dir, "");
    }
    glyph
}

/// Parser for the PlantUML class-diagram subset
///
/// Stateless between invocations: each [`parse`](PumlParser::parse) call
/// creates a fresh lexer and registry and returns the registry as the final
/// artifact.
pub struct PumlParser;

impl PumlParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a complete diagram source into its entity registry
    pub fn parse(&self, input: &str) -> Result<Nodes, PumlError> {
        let parse_span = span!(Level::INFO, "parse_puml", input_len = input.len());
        let _enter = parse_span.enter();

        let mut lexer = Lexer::new(input);
        let mut nodes = Nodes::new();
        // Open package segments plus the brace depth each one opened at
        let mut packages: Vec<(String, usize)> = Vec::new();
        let mut depth: usize = 0;

        loop {
            let token = lexer.next_token()?;
            trace!(kind = %token.kind, "dispatch");
            match token.kind {
                TokenKind::Start => {}
                TokenKind::End => break,
                TokenKind::Element(ElementKind::Package) => {
                    let name = lexer.next_element_value()?;
                    let open = lexer.next_token()?;
                    if open.kind != TokenKind::OpenBrace {
                        return Err(PumlError::unexpected("open brace", open.text));
                    }
                    depth += 1;
                    packages.push((name.text, depth));
                }
                TokenKind::Element(element) => {
                    let name = lexer.next_element_value()?;
                    let kind = class_kind(element);
                    let package = package_path(&packages);
                    debug!(name = %name.text, kind = %kind, package = %package, "declared entity");
                    nodes.add(ClassLike::new(name.text, package, kind));
                }
                TokenKind::Extends => {
                    self.keyword_relation(&mut lexer, &mut nodes, Relation::Extends)?;
                }
                TokenKind::Implements => {
                    self.keyword_relation(&mut lexer, &mut nodes, Relation::Implements)?;
                }
                TokenKind::LeftArrow => {
                    self.left_arrow(&mut lexer, &mut nodes, &token)?;
                }
                TokenKind::RightArrow => {
                    self.right_arrow(&mut lexer, &mut nodes, &token)?;
                }
                TokenKind::OpenBrace => depth += 1,
                TokenKind::CloseBrace => {
                    if matches!(packages.last(), Some((_, open_depth)) if *open_depth == depth) {
                        packages.pop();
                    }
                    depth = depth.saturating_sub(1);
                }
                // a bare name is the left operand of a relation still to come
                TokenKind::ElementValue => {}
            }
        }

        debug!(entities = nodes.len(), "parse completed");
        Ok(nodes)
    }

    /// `A extends B` / `A implements B`: left operand recovered through
    /// lexer lookback, right operand is the next element value
    fn keyword_relation(
        &self,
        lexer: &mut Lexer,
        nodes: &mut Nodes,
        relation: Relation,
    ) -> Result<(), PumlError> {
        let left = self.resolve_prev(lexer, nodes)?;
        let right = self.resolve_next(lexer, nodes)?;
        self.record(nodes, relation, left, right);
        Ok(())
    }

    /// Left-pointing arrows reverse the orientation: the name before the
    /// arrow is the parent/interface, the name after it is the child
    fn left_arrow(
        &self,
        lexer: &mut Lexer,
        nodes: &mut Nodes,
        token: &Token,
    ) -> Result<(), PumlError> {
        let glyph = strip_direction(&token.text);
        let relation = if glyph.starts_with("<|.") {
            Relation::Implements
        } else if glyph.starts_with("<|-") {
            Relation::Extends
        } else {
            // association, dependency, aggregation, composition
            return Err(PumlError::unsupported(token.text.clone()));
        };

        let target = self.resolve_prev(lexer, nodes)?;
        let child = self.resolve_next(lexer, nodes)?;
        self.record(nodes, relation, child, target);
        Ok(())
    }

    /// Right-pointing arrows keep source orientation: the name before the
    /// arrow is the child
    fn right_arrow(
        &self,
        lexer: &mut Lexer,
        nodes: &mut Nodes,
        token: &Token,
    ) -> Result<(), PumlError> {
        let glyph = strip_direction(&token.text);
        let relation = if glyph.ends_with(".|>") {
            Relation::Implements
        } else if glyph.ends_with("-|>") {
            Relation::Extends
        } else {
            return Err(PumlError::unsupported(token.text.clone()));
        };

        let child = self.resolve_prev(lexer, nodes)?;
        let target = self.resolve_next(lexer, nodes)?;
        self.record(nodes, relation, child, target);
        Ok(())
    }

    /// Resolve the element value immediately preceding the relation token
    fn resolve_prev(&self, lexer: &Lexer, nodes: &Nodes) -> Result<NodeId, PumlError> {
        let prev = match lexer.prev_token() {
            Some(token) if token.kind == TokenKind::ElementValue => token,
            Some(token) => {
                return Err(PumlError::unexpected(
                    "element value before relation",
                    token.text.clone(),
                ));
            }
            None => {
                return Err(PumlError::unexpected(
                    "element value before relation",
                    "start of input",
                ));
            }
        };
        nodes
            .search_by_name(&prev.text)
            .ok_or_else(|| PumlError::unresolved(prev.text.clone()))
    }

    /// Resolve the element value immediately following the relation token
    fn resolve_next(&self, lexer: &mut Lexer, nodes: &mut Nodes) -> Result<NodeId, PumlError> {
        let token = lexer.next_element_value()?;
        nodes
            .search_by_name(&token.text)
            .ok_or_else(|| PumlError::unresolved(token.text))
    }

    fn record(&self, nodes: &mut Nodes, relation: Relation, child: NodeId, target: NodeId) {
        match relation {
            Relation::Extends => {
                nodes.extends(child, target);
            }
            Relation::Implements => {
                nodes.implements(child, target);
            }
        }
    }
}

impl Default for PumlParser {
    fn default() -> Self {
        Self::new()
    }
}

fn class_kind(element: ElementKind) -> ClassKind {
    match element {
        ElementKind::Class => ClassKind::Class,
        ElementKind::AbstractClass => ClassKind::AbstractClass,
        ElementKind::Interface => ClassKind::Interface,
        // the package keyword never reaches entity construction
        ElementKind::Package => unreachable!("package handled before dispatch"),
    }
}

fn package_path(packages: &[(String, usize)]) -> String {
    packages
        .iter()
        .map(|(name, _)| name.as_str())
        .collect::<Vec<_>>()
        .join("/")
}
