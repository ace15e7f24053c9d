//! The fixed structural total order on expressions.
//!
//! Every sorted term sequence uses this one order, so structurally equal
//! sequences always come out in identical orderings. Comparison looks at
//! the variant tag rank first, then recurses into the variant's fields;
//! the first difference decides. Identical node instances compare equal in
//! O(1) via the handle's pointer short-circuit.

use std::cmp::Ordering;

use crate::handle::Expr;
use crate::node::{ExprNode, NodeData};
use crate::terms::TermSeq;

/// Compares two expressions, with the identity short-circuit.
#[must_use]
pub fn cmp_expr(a: &Expr, b: &Expr) -> Ordering {
    if Expr::ptr_eq(a, b) {
        return Ordering::Equal;
    }
    cmp_node(a.node(), b.node())
}

/// Compares two nodes structurally.
#[must_use]
pub fn cmp_node(a: &ExprNode, b: &ExprNode) -> Ordering {
    a.kind().cmp(&b.kind()).then_with(|| cmp_data(a.data(), b.data()))
}

fn cmp_data(a: &NodeData, b: &NodeData) -> Ordering {
    match (a, b) {
        (NodeData::Number(x), NodeData::Number(y)) => x.cmp(y),
        (NodeData::Symbol(x), NodeData::Symbol(y)) => x.cmp(y),
        (NodeData::Add(x), NodeData::Add(y)) | (NodeData::Mul(x), NodeData::Mul(y)) => {
            cmp_seq(x, y)
        }
        (
            NodeData::Power { base: ab, exp: ae },
            NodeData::Power { base: bb, exp: be },
        ) => cmp_expr(ab, bb).then_with(|| cmp_expr(ae, be)),
        (
            NodeData::Function { name: an, args: aa },
            NodeData::Function { name: bn, args: ba },
        ) => an.cmp(bn).then_with(|| cmp_exprs(aa, ba)),
        (
            NodeData::Matrix { rows: ar, cols: ac, elems: ae },
            NodeData::Matrix { rows: br, cols: bc, elems: be },
        ) => ar.cmp(br).then_with(|| ac.cmp(bc)).then_with(|| cmp_exprs(ae, be)),
        // Kinds already matched; mixed variants are unreachable here.
        _ => unreachable!("cmp_data called with mismatched node kinds"),
    }
}

/// Compares two expression slices pairwise, left to right.
#[must_use]
pub fn cmp_exprs(a: &[Expr], b: &[Expr]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        let ord = cmp_expr(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.len().cmp(&b.len())
}

/// Compares two canonical term sequences: pairs first (rest, then
/// coefficient), then length, then overall coefficient.
#[must_use]
pub fn cmp_seq(a: &TermSeq, b: &TermSeq) -> Ordering {
    for (x, y) in a.terms().iter().zip(b.terms().iter()) {
        let ord = cmp_expr(&x.rest, &y.rest).then_with(|| x.coeff.cmp(&y.coeff));
        if ord != Ordering::Equal {
            return ord;
        }
    }
    a.terms()
        .len()
        .cmp(&b.terms().len())
        .then_with(|| a.coeff().cmp(b.coeff()))
}
