//! Class-like entities and the insertion-ordered registry
//!
//! The registry is a flat arena: it owns every entity, and parent/interface
//! edges are indices back into the same arena. That keeps relations as plain
//! back-references and rules out ownership cycles by construction.

use std::fmt;

use serde_json::{Map, Value};

use crate::core::PumlError;

/// Subtree expansion stops here; deeper nesting means a relation cycle.
const MAX_EXPANSION_DEPTH: usize = 64;

/// Which kind of class-like entity was declared
///
/// Behavior differences between the three kinds are limited to the serialized
/// tag, so this is a plain tag rather than a dispatch seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    AbstractClass,
    Interface,
}

impl ClassKind {
    /// The tag used as the record key in the nested-tree export
    pub fn tag(self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::AbstractClass => "abstract class",
            ClassKind::Interface => "interface",
        }
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Stable index of an entity within its registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One declared class, abstract class, or interface
///
/// `package` is the `/`-joined path of enclosing packages, empty at top
/// level. `parents` and `interfaces` are ordered edge lists; the model does
/// not enforce single inheritance and does not deduplicate repeated edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLike {
    pub name: String,
    pub package: String,
    pub kind: ClassKind,
    pub parents: Vec<NodeId>,
    pub interfaces: Vec<NodeId>,
}

impl ClassLike {
    pub fn new(name: impl Into<String>, package: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            kind,
            parents: Vec::new(),
            interfaces: Vec::new(),
        }
    }
}

/// Insertion-ordered registry of class-like entities
///
/// Iteration order always equals declaration order, and name lookup returns
/// the first match in that order. Duplicate names are permitted; the first
/// declaration wins every subsequent lookup.
#[derive(Debug, Default)]
pub struct Nodes {
    items: Vec<ClassLike>,
}

impl Nodes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity; no uniqueness check
    pub fn add(&mut self, entity: ClassLike) -> NodeId {
        self.items.push(entity);
        NodeId(self.items.len() - 1)
    }

    /// First entity in insertion order with a matching name
    pub fn search_by_name(&self, name: &str) -> Option<NodeId> {
        self.items
            .iter()
            .position(|entity| entity.name == name)
            .map(NodeId)
    }

    /// Most recently added entity
    pub fn last(&self) -> Option<NodeId> {
        self.items.len().checked_sub(1).map(NodeId)
    }

    pub fn get(&self, id: NodeId) -> &ClassLike {
        &self.items[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassLike> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Record an extends edge: `child` gains `parent`
    ///
    /// Repeated calls append repeated edges; returns the mutated child.
    pub fn extends(&mut self, child: NodeId, parent: NodeId) -> &mut ClassLike {
        self.items[child.0].parents.push(parent);
        &mut self.items[child.0]
    }

    /// Record an implements edge: `child` gains `interface`
    pub fn implements(&mut self, child: NodeId, interface: NodeId) -> &mut ClassLike {
        self.items[child.0].interfaces.push(interface);
        &mut self.items[child.0]
    }

    /// Nested-tree export
    ///
    /// One record per entity in declaration order, each shaped
    /// `{"<kind>": {"Name": …, "Package": …, "Parents": […], "Interfaces": […]}}`.
    /// Parent and interface subtrees are re-expanded inline rather than
    /// referenced, so the output is self-contained. Expansion is bounded:
    /// a relation cycle fails with [`PumlError::ExpansionDepth`] instead of
    /// recursing forever.
    pub fn to_value(&self) -> Result<Value, PumlError> {
        let records = (0..self.items.len())
            .map(|i| self.entity_value(NodeId(i), 0))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::Array(records))
    }

    fn entity_value(&self, id: NodeId, depth: usize) -> Result<Value, PumlError> {
        let entity = &self.items[id.0];
        if depth > MAX_EXPANSION_DEPTH {
            return Err(PumlError::ExpansionDepth {
                name: entity.name.clone(),
            });
        }

        let parents = entity
            .parents
            .iter()
            .map(|&parent| self.entity_value(parent, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;
        let interfaces = entity
            .interfaces
            .iter()
            .map(|&interface| self.entity_value(interface, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;

        let mut body = Map::new();
        body.insert("Name".to_string(), Value::String(entity.name.clone()));
        body.insert("Package".to_string(), Value::String(entity.package.clone()));
        body.insert("Parents".to_string(), Value::Array(parents));
        body.insert("Interfaces".to_string(), Value::Array(interfaces));

        let mut record = Map::new();
        record.insert(entity.kind.tag().to_string(), Value::Object(body));
        Ok(Value::Object(record))
    }
}
