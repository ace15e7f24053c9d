//! Flattened archive nodes.
//!
//! An [`ArchiveNode`] is one expression node in wire form: an ordered list
//! of typed properties, each naming an atom and carrying one unsigned
//! value (a boolean, a plain integer, an atom reference or a node
//! reference). A node also caches the live expression it was built from
//! or last reconstructed into; a node without the cache is "raw", one
//! with it is "materialized".

use std::cell::RefCell;

use garnet_core::Expr;

/// Index into an archive's atom table.
pub type AtomId = usize;

/// Index into an archive's node table.
pub type NodeId = usize;

/// The wire type of a property value, stored in the low 3 bits of the
/// packed tag word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PropertyKind {
    /// A boolean, encoded as 0 or 1.
    Bool = 0,
    /// A plain unsigned integer.
    Unsigned = 1,
    /// A reference into the atom table.
    String = 2,
    /// A reference to another archive node.
    Node = 3,
}

impl PropertyKind {
    /// Decodes a wire tag, if it names a defined property type.
    #[must_use]
    pub fn from_tag(tag: u64) -> Option<Self> {
        match tag {
            0 => Some(Self::Bool),
            1 => Some(Self::Unsigned),
            2 => Some(Self::String),
            3 => Some(Self::Node),
            _ => None,
        }
    }

    /// Returns the 3-bit wire tag.
    #[must_use]
    pub fn tag(self) -> u64 {
        self as u64
    }
}

/// One typed, named property of an archive node.
#[derive(Clone, Debug)]
pub struct Property {
    /// The property type.
    pub kind: PropertyKind,
    /// Atom id of the property name.
    pub name: AtomId,
    /// The value: 0/1 for booleans, the integer itself, an atom id, or a
    /// node id, depending on `kind`.
    pub value: u64,
}

/// A flattened expression node plus its materialization cache.
#[derive(Debug, Default)]
pub struct ArchiveNode {
    props: Vec<Property>,
    cache: RefCell<Option<Expr>>,
}

impl ArchiveNode {
    /// Creates a raw node from decoded properties.
    #[must_use]
    pub(crate) fn from_props(props: Vec<Property>) -> Self {
        Self {
            props,
            cache: RefCell::new(None),
        }
    }

    /// Creates a materialized node from properties and the live
    /// expression they were derived from.
    #[must_use]
    pub(crate) fn with_expr(props: Vec<Property>, expr: Expr) -> Self {
        Self {
            props,
            cache: RefCell::new(Some(expr)),
        }
    }

    /// Returns the properties in wire order.
    #[must_use]
    pub fn props(&self) -> &[Property] {
        &self.props
    }

    /// Returns true if the node holds a cached expression.
    #[must_use]
    pub fn is_materialized(&self) -> bool {
        self.cache.borrow().is_some()
    }

    /// Returns the cached expression, if materialized.
    #[must_use]
    pub fn cached(&self) -> Option<Expr> {
        self.cache.borrow().clone()
    }

    /// Fills the materialization cache.
    pub(crate) fn fill_cache(&self, expr: &Expr) {
        *self.cache.borrow_mut() = Some(expr.clone());
    }

    /// Drops the cached expression, resetting the node to raw.
    pub fn forget(&self) {
        *self.cache.borrow_mut() = None;
    }

    /// Returns true if this node was built from the same live node
    /// instance as `expr` (identity, not structural equality).
    #[must_use]
    pub(crate) fn same_expr_as(&self, expr: &Expr) -> bool {
        self.cache
            .borrow()
            .as_ref()
            .is_some_and(|cached| Expr::ptr_eq(cached, expr))
    }

    /// Finds the `nth` property with the given kind and name atom.
    #[must_use]
    pub fn find(&self, kind: PropertyKind, name: AtomId, nth: usize) -> Option<u64> {
        self.props
            .iter()
            .filter(|p| p.kind == kind && p.name == name)
            .nth(nth)
            .map(|p| p.value)
    }

    pub(crate) fn push(&mut self, kind: PropertyKind, name: AtomId, value: u64) {
        self.props.push(Property { kind, name, value });
    }
}
