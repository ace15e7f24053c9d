//! Randomized archive round-trip checks.

use garnet_core::{pow, Expr, Numeric};
use proptest::prelude::*;

use crate::archive::{Archive, SymbolTable};
use crate::varint::{read_unsigned, write_unsigned};

fn leaf() -> impl Strategy<Value = Expr> {
    prop_oneof![
        prop::sample::select(vec!["x", "y", "z", "t"]).prop_map(Expr::symbol),
        (-20i64..21).prop_map(Expr::from),
        (-9i64..10, 1i64..10).prop_map(|(n, d)| Expr::number(Numeric::new(n, d))),
    ]
}

fn expr() -> impl Strategy<Value = Expr> {
    leaf().prop_recursive(4, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 2..5)
                .prop_map(|es| es.into_iter().fold(Expr::zero(), |acc, e| acc + e)),
            prop::collection::vec(inner.clone(), 2..4)
                .prop_map(|es| es.into_iter().fold(Expr::one(), |acc, e| acc * e)),
            (inner.clone(), 2i64..5).prop_map(|(b, e)| pow(&b, &Expr::from(e))),
            prop::collection::vec(inner, 1..4)
                .prop_map(|args| Expr::function("f", args)),
        ]
    })
}

proptest! {
    #[test]
    fn varints_round_trip(val in any::<u64>()) {
        let mut bytes = Vec::new();
        write_unsigned(&mut bytes, val).unwrap();
        prop_assert!(bytes.len() <= 10);
        prop_assert_eq!(read_unsigned(&mut &bytes[..]).unwrap(), val);
    }

    #[test]
    fn expressions_survive_binary_round_trip(e in expr()) {
        let mut archive = Archive::new();
        archive.archive_ex(&e, "e");
        let bytes = archive.to_bytes().unwrap();

        let decoded = Archive::from_bytes(&bytes).unwrap();
        let mut syms = SymbolTable::new();
        let back = decoded.unarchive_ex(&mut syms, "e").unwrap();
        prop_assert_eq!(&back, &e);
        prop_assert_eq!(back.structural_hash(), e.structural_hash());
    }

    #[test]
    fn permuted_sums_serialize_identically(
        terms in prop::collection::vec((0u8..6, -5i64..6), 1..10),
    ) {
        let build = |order: &[(u8, i64)]| {
            let sum = order.iter().fold(Expr::zero(), |acc, &(s, c)| {
                acc + Expr::from(c) * Expr::symbol(format!("v{s}"))
            });
            let mut archive = Archive::new();
            archive.archive_ex(&sum, "e");
            archive.to_bytes().unwrap()
        };
        let mut reversed = terms.clone();
        reversed.reverse();
        prop_assert_eq!(build(&terms), build(&reversed));
    }

    #[test]
    fn reencoding_is_stable(e in expr()) {
        let mut archive = Archive::new();
        archive.archive_ex(&e, "e");
        let first = archive.to_bytes().unwrap();
        let second = Archive::from_bytes(&first).unwrap().to_bytes().unwrap();
        prop_assert_eq!(second, first);
    }
}
