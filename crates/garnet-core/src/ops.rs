//! Arithmetic construction of expressions.
//!
//! Operators build new expressions by constructing canonical term
//! sequences from existing handles; all transforms are pure. Combining
//! two sequences of the matching kind takes the linear binary-merge path,
//! everything else goes through flatten-and-combine.

use std::ops::{Add, Mul, Neg, Sub};

use num_traits::{One, Zero};

use crate::handle::Expr;
use crate::node::{ExprNode, NodeData};
use crate::terms::{SeqKind, TermSeq};

/// Adds two expressions, returning the canonical sum.
#[must_use]
pub fn add(a: &Expr, b: &Expr) -> Expr {
    if let (NodeData::Add(sa), NodeData::Add(sb)) = (a.data(), b.data()) {
        return TermSeq::merge(sa, sb).into_expr();
    }
    TermSeq::from_children(SeqKind::Add, &[a.clone(), b.clone()]).into_expr()
}

/// Multiplies two expressions, returning the canonical product.
#[must_use]
pub fn mul(a: &Expr, b: &Expr) -> Expr {
    if let (NodeData::Mul(sa), NodeData::Mul(sb)) = (a.data(), b.data()) {
        return TermSeq::merge(sa, sb).into_expr();
    }
    TermSeq::from_children(SeqKind::Mul, &[a.clone(), b.clone()]).into_expr()
}

/// Negates an expression.
#[must_use]
pub fn neg(e: &Expr) -> Expr {
    mul(&Expr::from(-1), e)
}

/// Subtracts `b` from `a`.
#[must_use]
pub fn sub(a: &Expr, b: &Expr) -> Expr {
    add(a, &neg(b))
}

/// Raises `base` to `exp`.
///
/// Performs only the trivial canonicalizations: an exponent of 0 or 1
/// collapses, and integer powers of exact numerics are evaluated.
/// Everything else, including a zero base with a negative exponent, stays
/// an unevaluated power node.
#[must_use]
pub fn pow(base: &Expr, exp: &Expr) -> Expr {
    if let NodeData::Number(e) = exp.data() {
        if e.is_zero() {
            return Expr::one();
        }
        if e.is_one() {
            return base.clone();
        }
        if let NodeData::Number(b) = base.data() {
            if let Some(k) = e.to_i64() {
                if !(b.is_zero() && k < 0) {
                    return Expr::number(b.pow(k));
                }
            }
        }
    }
    let node = ExprNode::new(NodeData::Power {
        base: base.clone(),
        exp: exp.clone(),
    });
    node.mark_canonical();
    Expr::from_node(node)
}

impl Expr {
    /// Raises this expression to a power.
    #[must_use]
    pub fn pow(&self, exp: &Expr) -> Expr {
        pow(self, exp)
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $func:path) => {
        impl $trait for &Expr {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                $func(self, rhs)
            }
        }

        impl $trait for Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                $func(&self, &rhs)
            }
        }

        impl $trait<&Expr> for Expr {
            type Output = Expr;

            fn $method(self, rhs: &Expr) -> Expr {
                $func(&self, rhs)
            }
        }

        impl $trait<Expr> for &Expr {
            type Output = Expr;

            fn $method(self, rhs: Expr) -> Expr {
                $func(self, &rhs)
            }
        }
    };
}

forward_binop!(Add, add, self::add);
forward_binop!(Sub, sub, self::sub);
forward_binop!(Mul, mul, self::mul);

impl Neg for &Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        self::neg(self)
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        self::neg(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;
    use crate::numeric::Numeric;

    #[test]
    fn x_plus_x() {
        let x = Expr::symbol("x");
        let sum = &x + &x;
        assert_eq!(sum.kind(), NodeKind::Mul);
        assert!(sum.is_equal(&(Expr::from(2) * &x)));
    }

    #[test]
    fn x_minus_x_is_zero() {
        let x = Expr::symbol("x");
        assert!((&x - &x).is_zero());
    }

    #[test]
    fn two_x_plus_three_x() {
        let x = Expr::symbol("x");
        let e = Expr::from(2) * &x + Expr::from(3) * &x;
        assert!(e.is_equal(&(Expr::from(5) * &x)));
    }

    #[test]
    fn merge_fast_path_matches_flatten() {
        let (x, y, z) = (Expr::symbol("x"), Expr::symbol("y"), Expr::symbol("z"));
        let a = &x + &y;
        let b = &y + &z;
        // a and b are both sums, so this goes through the binary merge.
        let merged = &a + &b;
        let flattened = &x + &(Expr::from(2) * &y) + &z;
        assert!(merged.is_equal(&flattened));
    }

    #[test]
    fn product_to_power() {
        let x = Expr::symbol("x");
        let sq = &x * &x;
        assert_eq!(sq.kind(), NodeKind::Power);
        assert!(sq.is_equal(&x.pow(&Expr::from(2))));
        // The base handle is physically shared with the operand.
        if let NodeData::Power { base, .. } = sq.data() {
            assert!(Expr::ptr_eq(base, &x));
        } else {
            unreachable!();
        }
    }

    #[test]
    fn numeric_arithmetic_folds() {
        let e = Expr::from(2) + Expr::from(3);
        assert_eq!(e.as_number(), Some(&Numeric::from_i64(5)));
        let e = Expr::from(2) * Expr::from(3) * Expr::symbol("x");
        assert_eq!(e.overall_coeff(), Some(&Numeric::from_i64(6)));
    }

    #[test]
    fn zero_factor_annihilates() {
        let x = Expr::symbol("x");
        assert!((Expr::zero() * &x).is_zero());
        assert!((Expr::from(0) * (&x + Expr::from(3))).is_zero());
    }

    #[test]
    fn pow_trivial_cases() {
        let x = Expr::symbol("x");
        assert!(x.pow(&Expr::from(0)).is_one());
        assert!(Expr::ptr_eq(&x.pow(&Expr::from(1)), &x));
        assert_eq!(
            Expr::from(2).pow(&Expr::from(10)).as_number(),
            Some(&Numeric::from_i64(1024))
        );
    }

    #[test]
    fn pow_stays_symbolic() {
        let (x, y) = (Expr::symbol("x"), Expr::symbol("y"));
        let e = (&x + &y).pow(&Expr::from(5));
        assert_eq!(e.kind(), NodeKind::Power);
        // Symbolic exponent too.
        assert_eq!(x.pow(&y).kind(), NodeKind::Power);
        // 0^-1 has no exact value; it stays unevaluated.
        assert_eq!(Expr::zero().pow(&Expr::from(-1)).kind(), NodeKind::Power);
    }

    #[test]
    fn neg_distributes_nothing() {
        let x = Expr::symbol("x");
        let e = -&x;
        assert_eq!(e.kind(), NodeKind::Mul);
        assert_eq!(e.overall_coeff(), Some(&Numeric::from_i64(-1)));
    }

    #[test]
    fn construction_order_is_irrelevant() {
        let (x, y, z) = (Expr::symbol("x"), Expr::symbol("y"), Expr::symbol("z"));
        let a = &(&x + &y) + &z;
        let b = &z + &(&y + &x);
        assert!(a.is_equal(&b));
        assert_eq!(a.structural_hash(), b.structural_hash());
    }
}
