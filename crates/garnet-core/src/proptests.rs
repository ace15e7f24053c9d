//! Property-based tests for canonicalization.

use proptest::prelude::*;

use crate::handle::Expr;
use crate::numeric::Numeric;
use crate::terms::{SeqKind, TermSeq};

// A term over a small symbol alphabet with a small integer coefficient.
fn small_term() -> impl Strategy<Value = (u8, i64)> {
    (0u8..6, -5i64..6)
}

fn build_sum(terms: &[(u8, i64)]) -> Expr {
    let mut acc = Expr::zero();
    for &(sym, coeff) in terms {
        let name = format!("v{sym}");
        acc = acc + Expr::from(coeff) * Expr::symbol(name);
    }
    acc
}

fn build_product(terms: &[(u8, i64)]) -> Expr {
    let mut acc = Expr::one();
    for &(sym, exp) in terms {
        let name = format!("v{sym}");
        acc = acc * Expr::symbol(name).pow(&Expr::from(exp));
    }
    acc
}

proptest! {
    #[test]
    fn sum_construction_order_irrelevant(terms in prop::collection::vec(small_term(), 0..12)) {
        let forward = build_sum(&terms);
        let mut reversed = terms.clone();
        reversed.reverse();
        let backward = build_sum(&reversed);
        prop_assert!(forward.is_equal(&backward));
        prop_assert_eq!(forward.structural_hash(), backward.structural_hash());
    }

    #[test]
    fn product_construction_order_irrelevant(terms in prop::collection::vec(small_term(), 0..10)) {
        let forward = build_product(&terms);
        let mut reversed = terms.clone();
        reversed.reverse();
        let backward = build_product(&reversed);
        prop_assert!(forward.is_equal(&backward));
        prop_assert_eq!(forward.structural_hash(), backward.structural_hash());
    }

    #[test]
    fn left_and_right_folds_agree(terms in prop::collection::vec(small_term(), 2..10)) {
        // ((a + b) + c) versus (a + (b + c)) built pairwise from the right.
        let left = build_sum(&terms);
        let mut right = Expr::zero();
        for &(sym, coeff) in terms.iter().rev() {
            let term = Expr::from(coeff) * Expr::symbol(format!("v{sym}"));
            right = term + right;
        }
        prop_assert!(left.is_equal(&right));
    }

    #[test]
    fn canonicalization_is_idempotent(terms in prop::collection::vec(small_term(), 0..12)) {
        let e = build_sum(&terms);
        if let Some(seq_terms) = e.terms() {
            let rebuilt = TermSeq::from_children(
                SeqKind::Add,
                &seq_terms
                    .iter()
                    .map(|t| TermSeq::recombine(SeqKind::Add, t))
                    .chain(e.overall_coeff().map(|c| Expr::number(c.clone())))
                    .collect::<Vec<_>>(),
            );
            prop_assert!(rebuilt.is_canonical());
            prop_assert!(rebuilt.into_expr().is_equal(&e));
        }
    }

    #[test]
    fn compare_is_a_total_order(a in prop::collection::vec(small_term(), 0..6),
                                b in prop::collection::vec(small_term(), 0..6)) {
        let ea = build_sum(&a);
        let eb = build_sum(&b);
        let ab = ea.compare(&eb);
        let ba = eb.compare(&ea);
        prop_assert_eq!(ab, ba.reverse());
        if ab == std::cmp::Ordering::Equal {
            prop_assert_eq!(ea.structural_hash(), eb.structural_hash());
        }
    }

    #[test]
    fn sum_of_term_and_negation_cancels(sym in 0u8..4, coeff in 1i64..20) {
        let x = Expr::symbol(format!("v{sym}"));
        let t = Expr::from(coeff) * &x;
        let nt = Expr::from(-coeff) * &x;
        prop_assert!((t + nt).is_zero());
    }

    #[test]
    fn numeric_display_round_trips(n in -10_000i64..10_000, d in 1i64..1000) {
        let q = Numeric::new(n, d);
        prop_assert_eq!(q.to_string().parse::<Numeric>().unwrap(), q);
    }
}
