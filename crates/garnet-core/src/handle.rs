//! Shared expression handles.
//!
//! An [`Expr`] is a reference-counted handle to exactly one [`ExprNode`];
//! it is the unit of structural sharing across the expression DAG. Cloning
//! a handle shares the node, dropping the last handle frees it. The DAG is
//! built bottom-up and never mutated to add a back-edge, so plain
//! reference counting suffices and no cycle collector is needed.
//!
//! Handles are deliberately not `Send` or `Sync`: reference counts and the
//! per-node caches are non-atomic and require single-threaded confinement.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use num_traits::{One, Zero};
use smallvec::SmallVec;

use crate::node::{ExprNode, NodeData, NodeKind};
use crate::numeric::Numeric;
use crate::order;
use crate::terms::Term;

thread_local! {
    // Shared canonical zero, so default handles alias one node.
    static ZERO: Expr = Expr::from_node(canonical_number(Numeric::zero()));
}

fn canonical_number(n: Numeric) -> ExprNode {
    let node = ExprNode::new(NodeData::Number(n));
    node.mark_canonical();
    node
}

/// A shared, reference-counted expression handle.
///
/// Value semantics over shared storage: all operations are pure and return
/// new handles. The default handle denotes the canonical zero value.
#[derive(Clone)]
pub struct Expr(Rc<ExprNode>);

impl Expr {
    /// Wraps a node in a fresh handle.
    pub(crate) fn from_node(node: ExprNode) -> Self {
        Self(Rc::new(node))
    }

    /// Creates a numeric literal expression.
    #[must_use]
    pub fn number(value: Numeric) -> Self {
        if value.is_zero() {
            return Self::default();
        }
        Self::from_node(canonical_number(value))
    }

    /// Creates a symbol expression.
    ///
    /// Symbols compare by name; two separately created symbols with the
    /// same name are structurally equal but not physically shared.
    #[must_use]
    pub fn symbol(name: impl Into<String>) -> Self {
        let node = ExprNode::new(NodeData::Symbol(name.into()));
        node.mark_canonical();
        Self::from_node(node)
    }

    /// Creates a function application.
    #[must_use]
    pub fn function(name: impl Into<String>, args: impl IntoIterator<Item = Expr>) -> Self {
        let node = ExprNode::new(NodeData::Function {
            name: name.into(),
            args: args.into_iter().collect(),
        });
        node.mark_canonical();
        Self::from_node(node)
    }

    /// Creates a matrix expression from row-major elements.
    ///
    /// # Panics
    ///
    /// Panics if `elems.len() != rows * cols`.
    #[must_use]
    pub fn matrix(rows: usize, cols: usize, elems: Vec<Expr>) -> Self {
        assert_eq!(elems.len(), rows * cols, "matrix element count mismatch");
        let node = ExprNode::new(NodeData::Matrix { rows, cols, elems });
        node.mark_canonical();
        Self::from_node(node)
    }

    /// The canonical zero value.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// The canonical one value.
    #[must_use]
    pub fn one() -> Self {
        Self::number(Numeric::one())
    }

    /// Returns the underlying node.
    #[must_use]
    pub fn node(&self) -> &ExprNode {
        &self.0
    }

    /// Returns the node payload.
    #[must_use]
    pub fn data(&self) -> &NodeData {
        self.0.data()
    }

    /// Returns the variant tag.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.0.kind()
    }

    /// Returns true if both handles reference the same node instance.
    #[must_use]
    pub fn ptr_eq(a: &Expr, b: &Expr) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Compares two expressions under the fixed structural total order.
    ///
    /// Short-circuits to `Equal` in O(1) when both handles reference the
    /// same node instance, independent of subexpression size.
    #[must_use]
    pub fn compare(&self, other: &Expr) -> Ordering {
        if Expr::ptr_eq(self, other) {
            return Ordering::Equal;
        }
        order::cmp_node(self.node(), other.node())
    }

    /// Returns true if the two expressions are structurally equal.
    #[must_use]
    pub fn is_equal(&self, other: &Expr) -> bool {
        self.compare(other) == Ordering::Equal
    }

    /// Returns the structural hash of the expression.
    #[must_use]
    pub fn structural_hash(&self) -> u64 {
        self.0.structural_hash()
    }

    /// Returns true if this is the numeric zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.as_number().is_some_and(Zero::is_zero)
    }

    /// Returns true if this is the numeric one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.0.as_number().is_some_and(One::is_one)
    }

    /// Returns true if this is a numeric literal.
    #[must_use]
    pub fn is_number(&self) -> bool {
        self.0.is_number()
    }

    /// Returns the numeric value if this is a literal.
    #[must_use]
    pub fn as_number(&self) -> Option<&Numeric> {
        self.0.as_number()
    }

    /// Returns the children of this expression.
    #[must_use]
    pub fn children(&self) -> SmallVec<[Expr; 4]> {
        self.0.children()
    }

    /// Returns the canonical term pairs if this is a sum or product.
    #[must_use]
    pub fn terms(&self) -> Option<&[Term]> {
        match self.data() {
            NodeData::Add(seq) | NodeData::Mul(seq) => Some(seq.terms()),
            _ => None,
        }
    }

    /// Returns the overall coefficient if this is a sum or product.
    ///
    /// The coefficient is additive for sums and multiplicative for
    /// products.
    #[must_use]
    pub fn overall_coeff(&self) -> Option<&Numeric> {
        match self.data() {
            NodeData::Add(seq) | NodeData::Mul(seq) => Some(seq.coeff()),
            _ => None,
        }
    }
}

impl Default for Expr {
    fn default() -> Self {
        ZERO.with(Expr::clone)
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::number(Numeric::from_i64(value))
    }
}

impl From<Numeric> for Expr {
    fn from(value: Numeric) -> Self {
        Self::number(value)
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.is_equal(other)
    }
}

impl Eq for Expr {}

impl PartialOrd for Expr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for Expr {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl Hash for Expr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.structural_hash());
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.data().fmt(f)
    }
}
