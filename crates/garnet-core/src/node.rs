//! Expression node types.
//!
//! An [`ExprNode`] is one tagged node of the expression DAG: a payload
//! variant plus two derived caches (the lazily computed structural hash and
//! a small status-flag byte). The caches are recomputable metadata and never
//! participate in equality; two structurally equal nodes may disagree on
//! them only in recomputation cost.

use std::cell::Cell;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;
use smallvec::SmallVec;

use crate::handle::Expr;
use crate::numeric::Numeric;
use crate::terms::TermSeq;

/// Node is in canonical (evaluated) form.
pub const FLAG_CANONICAL: u8 = 1 << 0;

/// The payload of an expression node.
#[derive(Debug)]
pub enum NodeData {
    /// An exact numeric literal.
    Number(Numeric),
    /// A symbolic variable, identified by name.
    Symbol(String),
    /// A sum in canonical term-sequence form.
    Add(TermSeq),
    /// A product in canonical term-sequence form.
    Mul(TermSeq),
    /// A power expression: base^exp.
    Power {
        /// The base of the power.
        base: Expr,
        /// The exponent.
        exp: Expr,
    },
    /// A function application: f(arg1, arg2, ...).
    ///
    /// The name string is the stable identifier; evaluation rules for
    /// concrete functions live outside this kernel.
    Function {
        /// The function name.
        name: String,
        /// The arguments.
        args: SmallVec<[Expr; 2]>,
    },
    /// A rows x cols matrix of expressions, row-major.
    Matrix {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
        /// The elements, `rows * cols` of them.
        elems: Vec<Expr>,
    },
}

/// The variant tag of a node.
///
/// The declaration order defines the rank used as the first key of the
/// structural total order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    /// Numeric literal.
    Number,
    /// Symbolic variable.
    Symbol,
    /// Sum.
    Add,
    /// Product.
    Mul,
    /// Power.
    Power,
    /// Function application.
    Function,
    /// Matrix.
    Matrix,
}

/// An expression node: payload plus derived caches.
#[derive(Debug)]
pub struct ExprNode {
    data: NodeData,
    hash: Cell<Option<u64>>,
    flags: Cell<u8>,
}

impl ExprNode {
    /// Creates a node with empty caches.
    #[must_use]
    pub fn new(data: NodeData) -> Self {
        Self {
            data,
            hash: Cell::new(None),
            flags: Cell::new(0),
        }
    }

    /// Returns the payload.
    #[must_use]
    pub fn data(&self) -> &NodeData {
        &self.data
    }

    /// Returns the variant tag.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match &self.data {
            NodeData::Number(_) => NodeKind::Number,
            NodeData::Symbol(_) => NodeKind::Symbol,
            NodeData::Add(_) => NodeKind::Add,
            NodeData::Mul(_) => NodeKind::Mul,
            NodeData::Power { .. } => NodeKind::Power,
            NodeData::Function { .. } => NodeKind::Function,
            NodeData::Matrix { .. } => NodeKind::Matrix,
        }
    }

    /// Returns true if this node is an atom (no children).
    #[must_use]
    pub fn is_atom(&self) -> bool {
        matches!(self.data, NodeData::Number(_) | NodeData::Symbol(_))
    }

    /// Returns true if this node is a numeric literal.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self.data, NodeData::Number(_))
    }

    /// Returns the numeric value if this is a literal.
    #[must_use]
    pub fn as_number(&self) -> Option<&Numeric> {
        match &self.data {
            NodeData::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the children of this node.
    ///
    /// For sums and products the term pairs are recombined into plain
    /// expressions, with the overall coefficient appended last when it is
    /// not the neutral element.
    #[must_use]
    pub fn children(&self) -> SmallVec<[Expr; 4]> {
        match &self.data {
            NodeData::Number(_) | NodeData::Symbol(_) => SmallVec::new(),
            NodeData::Add(seq) | NodeData::Mul(seq) => {
                seq.recombined_children().into_iter().collect()
            }
            NodeData::Power { base, exp } => {
                smallvec::smallvec![base.clone(), exp.clone()]
            }
            NodeData::Function { args, .. } => args.iter().cloned().collect(),
            NodeData::Matrix { elems, .. } => elems.iter().cloned().collect(),
        }
    }

    /// Returns the structural hash, computing and caching it on first use.
    ///
    /// Structurally equal nodes always hash equal; the cache is safe to
    /// recompute redundantly.
    #[must_use]
    pub fn structural_hash(&self) -> u64 {
        if let Some(h) = self.hash.get() {
            return h;
        }
        let mut hasher = FxHasher::default();
        (self.kind() as u8).hash(&mut hasher);
        match &self.data {
            NodeData::Number(n) => n.hash(&mut hasher),
            NodeData::Symbol(name) => name.hash(&mut hasher),
            NodeData::Add(seq) | NodeData::Mul(seq) => {
                for term in seq.terms() {
                    hasher.write_u64(term.rest.structural_hash());
                    term.coeff.hash(&mut hasher);
                }
                seq.coeff().hash(&mut hasher);
            }
            NodeData::Power { base, exp } => {
                hasher.write_u64(base.structural_hash());
                hasher.write_u64(exp.structural_hash());
            }
            NodeData::Function { name, args } => {
                name.hash(&mut hasher);
                for arg in args {
                    hasher.write_u64(arg.structural_hash());
                }
            }
            NodeData::Matrix { rows, cols, elems } => {
                rows.hash(&mut hasher);
                cols.hash(&mut hasher);
                for e in elems {
                    hasher.write_u64(e.structural_hash());
                }
            }
        }
        let h = hasher.finish();
        self.hash.set(Some(h));
        h
    }

    /// Returns true if the node is marked as being in canonical form.
    #[must_use]
    pub fn in_canonical_form(&self) -> bool {
        self.flags.get() & FLAG_CANONICAL != 0
    }

    pub(crate) fn mark_canonical(&self) {
        self.flags.set(self.flags.get() | FLAG_CANONICAL);
    }
}
