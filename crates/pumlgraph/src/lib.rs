//! Pumlgraph - Parse PlantUML class diagrams into an entity graph
//!
//! A library for parsing a restricted subset of the PlantUML class-diagram
//! grammar (classes, abstract classes, interfaces, packages, extends and
//! implements relations) into an insertion-ordered registry of entities,
//! with a nested-tree JSON export.
//!
//! # Quick Start
//!
//! ```rust
//! use pumlgraph::parse;
//!
//! let input = "interface I\nclass A implements I";
//! let nodes = parse(input).unwrap();
//! assert_eq!(nodes.len(), 2);
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use pumlgraph::prelude::*;
//!
//! let input = "@startuml
//! package Shapes {
//!   interface Drawable
//!   class Circle implements Drawable
//! }
//! @enduml";
//!
//! let parser = PumlParser::new();
//! let nodes = parser.parse(input).unwrap();
//!
//! let circle = nodes.get(nodes.search_by_name("Circle").unwrap());
//! assert_eq!(circle.package, "Shapes");
//! assert_eq!(circle.interfaces.len(), 1);
//!
//! // Self-contained nested-tree export
//! let tree = nodes.to_value().unwrap();
//! assert_eq!(tree[1]["class"]["Name"], "Circle");
//! ```

pub mod core;
pub mod lexer;
pub mod node;
pub mod parser;

pub use crate::core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::PumlError;
    pub use crate::lexer::{ElementKind, Lexer, Token, TokenKind};
    pub use crate::node::{ClassKind, ClassLike, NodeId, Nodes};
    pub use crate::parser::PumlParser;
}

use crate::node::Nodes;
use crate::parser::PumlParser;

/// Parse PlantUML class-diagram source into its entity registry
///
/// This is the simplest way to turn diagram text into a graph. The registry
/// iterates in declaration order and owns every entity.
///
/// # Example
/// ```rust
/// use pumlgraph::parse;
///
/// let nodes = parse("class A\nclass B\nB extends A").unwrap();
/// let b = nodes.get(nodes.search_by_name("B").unwrap());
/// assert_eq!(b.parents.len(), 1);
/// ```
pub fn parse(input: &str) -> Result<Nodes, PumlError> {
    PumlParser::new().parse(input)
}

/// Parse diagram source straight to its nested-tree JSON value
///
/// Each entity becomes one record in declaration order, with parent and
/// interface subtrees expanded inline.
///
/// # Example
/// ```rust
/// use pumlgraph::parse_to_value;
///
/// let tree = parse_to_value("interface I\nclass A implements I").unwrap();
/// assert_eq!(tree[1]["class"]["Interfaces"][0]["interface"]["Name"], "I");
/// ```
pub fn parse_to_value(input: &str) -> Result<serde_json::Value, PumlError> {
    parse(input)?.to_value()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_diagram() {
        let nodes = parse("class A\nclass B").unwrap();
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn test_parse_with_markers() {
        let nodes = parse("@startuml\nclass A\n@enduml").unwrap();
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_parse_to_value_shape() {
        let tree = parse_to_value("abstract class Base").unwrap();
        let record = &tree[0]["abstract class"];
        assert_eq!(record["Name"], "Base");
        assert_eq!(record["Package"], "");
        assert!(record["Parents"].as_array().unwrap().is_empty());
        assert!(record["Interfaces"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_parse_error_propagates() {
        assert!(parse("class A\nA extends Missing").is_err());
    }
}
