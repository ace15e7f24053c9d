//! Canonical term sequences backing sums and products.
//!
//! A [`TermSeq`] is an ordered list of `(rest, coeff)` pairs plus one
//! overall coefficient. Handling pairs is much faster than handling a list
//! of full products or powers, so this representation backs the two most
//! frequently constructed and compared node kinds.
//!
//! Canonical-form invariants, true after every constructor returns:
//! 1. no two pairs share the same `rest` (merged by adding coefficients);
//! 2. no pair's coefficient is zero, the neutral element of pair
//!    combination (such pairs are dropped);
//! 3. pairs are sorted by the fixed structural total order;
//! 4. purely numeric subterms are absorbed into the overall coefficient
//!    and never survive as a pair.

use hashbrown::HashMap;
use num_traits::{One, Zero};
use smallvec::SmallVec;

use crate::handle::Expr;
use crate::node::{ExprNode, NodeData};
use crate::numeric::Numeric;
use crate::{ops, order};

/// Above this many flattened pairs, combination goes through the hash
/// bucket strategy instead of the plain sort-merge.
pub(crate) const HASH_COMBINE_THRESHOLD: usize = 32;

/// The combination semantics of a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeqKind {
    /// Additive: pairs are `coeff * rest`, the overall coefficient is an
    /// added constant.
    Add,
    /// Multiplicative: pairs are `rest ^ coeff`, the overall coefficient
    /// is a numeric factor.
    Mul,
}

impl SeqKind {
    /// The neutral overall coefficient: 0 for sums, 1 for products.
    #[must_use]
    pub fn neutral_coeff(self) -> Numeric {
        match self {
            SeqKind::Add => Numeric::zero(),
            SeqKind::Mul => Numeric::one(),
        }
    }

    fn combine_overall(self, acc: Numeric, n: Numeric) -> Numeric {
        match self {
            SeqKind::Add => acc + n,
            SeqKind::Mul => acc * n,
        }
    }
}

/// One canonical pair: a non-numeric `rest` and its numeric coefficient.
///
/// The coefficient is additive for sum terms and a power exponent for
/// product terms. Pair coefficients are always numeric: invariant 4 means
/// a purely numeric pair can never survive construction, and symbolic
/// exponents stay inside `rest` as a power with coefficient 1.
#[derive(Clone, Debug)]
pub struct Term {
    /// The non-numeric part of the term.
    pub rest: Expr,
    /// The numeric coefficient (exponent, for products).
    pub coeff: Numeric,
}

/// A canonical sequence of term pairs plus an overall coefficient.
#[derive(Clone, Debug)]
pub struct TermSeq {
    kind: SeqKind,
    terms: Vec<Term>,
    coeff: Numeric,
}

impl TermSeq {
    /// Builds a canonical sequence from an arbitrary list of children.
    ///
    /// Children of the same combination kind are inlined (a sum of sums
    /// collapses, a product of products collapses), purely numeric
    /// children are absorbed into the overall coefficient, and the
    /// remaining pairs are combined, sorted and stripped of neutral
    /// coefficients. Pure: always returns a sequence satisfying the
    /// canonical-form invariants, whatever the input order.
    #[must_use]
    pub fn from_children(kind: SeqKind, children: &[Expr]) -> Self {
        let mut coeff = kind.neutral_coeff();
        let mut pairs = Vec::with_capacity(children.len());
        for child in children {
            match (kind, child.data()) {
                (_, NodeData::Number(n)) => {
                    coeff = kind.combine_overall(coeff, n.clone());
                }
                (SeqKind::Add, NodeData::Add(seq)) => {
                    coeff = coeff + seq.coeff.clone();
                    pairs.extend(seq.terms.iter().cloned());
                }
                (SeqKind::Mul, NodeData::Mul(seq)) => {
                    coeff = coeff * seq.coeff.clone();
                    pairs.extend(seq.terms.iter().cloned());
                }
                _ => pairs.push(Self::split(kind, child)),
            }
        }
        let terms = Self::combine(pairs);
        let seq = Self { kind, terms, coeff };
        debug_assert!(seq.is_canonical());
        seq
    }

    /// Merges two already-canonical sequences of the same kind in one
    /// linear pass, like the merge step of mergesort.
    ///
    /// # Panics
    ///
    /// Debug-asserts that both sequences have the same kind.
    #[must_use]
    pub fn merge(a: &TermSeq, b: &TermSeq) -> Self {
        debug_assert_eq!(a.kind, b.kind);
        let kind = a.kind;
        let coeff = kind.combine_overall(a.coeff.clone(), b.coeff.clone());
        let mut terms = Vec::with_capacity(a.terms.len() + b.terms.len());
        let (mut i, mut j) = (0, 0);
        while i < a.terms.len() && j < b.terms.len() {
            let (ta, tb) = (&a.terms[i], &b.terms[j]);
            match order::cmp_expr(&ta.rest, &tb.rest) {
                std::cmp::Ordering::Less => {
                    terms.push(ta.clone());
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    terms.push(tb.clone());
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    let c = ta.coeff.clone() + tb.coeff.clone();
                    if !c.is_zero() {
                        terms.push(Term { rest: ta.rest.clone(), coeff: c });
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        terms.extend(a.terms[i..].iter().cloned());
        terms.extend(b.terms[j..].iter().cloned());
        let seq = Self { kind, terms, coeff };
        debug_assert!(seq.is_canonical());
        seq
    }

    /// Returns the combination kind.
    #[must_use]
    pub fn kind(&self) -> SeqKind {
        self.kind
    }

    /// Returns the canonical pairs, in sorted order.
    #[must_use]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Returns the overall coefficient.
    #[must_use]
    pub fn coeff(&self) -> &Numeric {
        &self.coeff
    }

    /// Returns the number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if there are no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Converts the sequence into an expression, collapsing degenerate
    /// shapes: an empty sequence becomes its overall coefficient, a single
    /// pair with a neutral overall coefficient becomes the recombined
    /// term, anything else becomes a sum or product node.
    #[must_use]
    pub fn into_expr(self) -> Expr {
        debug_assert!(self.is_canonical());
        if self.kind == SeqKind::Mul && self.coeff.is_zero() {
            // A zero factor annihilates the whole product.
            return Expr::zero();
        }
        if self.terms.is_empty() {
            return Expr::number(self.coeff);
        }
        if self.terms.len() == 1 && self.coeff == self.kind.neutral_coeff() {
            return Self::recombine(self.kind, &self.terms[0]);
        }
        let data = match self.kind {
            SeqKind::Add => NodeData::Add(self),
            SeqKind::Mul => NodeData::Mul(self),
        };
        let node = ExprNode::new(data);
        node.mark_canonical();
        Expr::from_node(node)
    }

    /// Splits an expression into a canonical pair.
    ///
    /// For sums, a product with a non-unit numeric factor contributes
    /// `(product without the factor, factor)`. For products, a power with
    /// a numeric exponent over a non-numeric base contributes
    /// `(base, exponent)`. Everything else pairs with coefficient 1.
    #[must_use]
    pub(crate) fn split(kind: SeqKind, e: &Expr) -> Term {
        match kind {
            SeqKind::Add => {
                if let NodeData::Mul(seq) = e.data() {
                    if !seq.coeff.is_one() {
                        let stripped = Self {
                            kind: SeqKind::Mul,
                            terms: seq.terms.clone(),
                            coeff: Numeric::one(),
                        }
                        .into_expr();
                        return Term { rest: stripped, coeff: seq.coeff.clone() };
                    }
                }
            }
            SeqKind::Mul => {
                if let NodeData::Power { base, exp } = e.data() {
                    if let NodeData::Number(n) = exp.data() {
                        if !base.is_number() {
                            return Term { rest: base.clone(), coeff: n.clone() };
                        }
                    }
                }
            }
        }
        Term { rest: e.clone(), coeff: Numeric::one() }
    }

    /// Rebuilds the plain expression a pair stands for: `coeff * rest`
    /// for sums, `rest ^ coeff` for products.
    #[must_use]
    pub fn recombine(kind: SeqKind, term: &Term) -> Expr {
        if term.coeff.is_one() {
            return term.rest.clone();
        }
        match kind {
            SeqKind::Add => {
                if let NodeData::Mul(seq) = term.rest.data() {
                    // Fold the coefficient into the existing product.
                    return Self {
                        kind: SeqKind::Mul,
                        terms: seq.terms.clone(),
                        coeff: seq.coeff.clone() * term.coeff.clone(),
                    }
                    .into_expr();
                }
                Self {
                    kind: SeqKind::Mul,
                    terms: vec![Term { rest: term.rest.clone(), coeff: Numeric::one() }],
                    coeff: term.coeff.clone(),
                }
                .into_expr()
            }
            SeqKind::Mul => ops::pow(&term.rest, &Expr::number(term.coeff.clone())),
        }
    }

    /// Returns the pairs recombined into plain expressions, with the
    /// overall coefficient appended last when not neutral.
    #[must_use]
    pub fn recombined_children(&self) -> Vec<Expr> {
        let mut out: Vec<Expr> = self
            .terms
            .iter()
            .map(|t| Self::recombine(self.kind, t))
            .collect();
        if self.coeff != self.kind.neutral_coeff() {
            out.push(Expr::number(self.coeff.clone()));
        }
        out
    }

    /// Verifies the canonical-form invariants (debug checks only).
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        let sorted = self
            .terms
            .windows(2)
            .all(|w| order::cmp_expr(&w[0].rest, &w[1].rest) == std::cmp::Ordering::Less);
        sorted
            && self
                .terms
                .iter()
                .all(|t| !t.coeff.is_zero() && !t.rest.is_number())
    }

    /// Combines raw pairs into canonical sorted form, selecting the
    /// strategy by size.
    fn combine(pairs: Vec<Term>) -> Vec<Term> {
        if pairs.len() > HASH_COMBINE_THRESHOLD {
            Self::hash_combine(pairs)
        } else {
            Self::sort_combine(pairs)
        }
    }

    /// Sort, then merge adjacent equal rests and drop neutral
    /// coefficients.
    pub(crate) fn sort_combine(mut pairs: Vec<Term>) -> Vec<Term> {
        pairs.sort_by(|a, b| order::cmp_expr(&a.rest, &b.rest));
        let mut out: Vec<Term> = Vec::with_capacity(pairs.len());
        for p in pairs {
            match out.last_mut() {
                Some(last) if last.rest.is_equal(&p.rest) => {
                    last.coeff = last.coeff.clone() + p.coeff;
                    if last.coeff.is_zero() {
                        out.pop();
                    }
                }
                _ => {
                    if !p.coeff.is_zero() {
                        out.push(p);
                    }
                }
            }
        }
        out
    }

    /// Bucket pairs by the structural hash of `rest` and merge equal
    /// rests inside each bucket, avoiding a comparison sort over
    /// duplicates; the merged result is then sorted into canonical order.
    pub(crate) fn hash_combine(pairs: Vec<Term>) -> Vec<Term> {
        let mut merged: Vec<Term> = Vec::with_capacity(pairs.len());
        let mut buckets: HashMap<u64, SmallVec<[usize; 2]>> =
            HashMap::with_capacity(pairs.len());
        for p in pairs {
            let h = p.rest.structural_hash();
            let slot = buckets.entry(h).or_default();
            let hit = slot
                .iter()
                .copied()
                .find(|&i| merged[i].rest.is_equal(&p.rest));
            match hit {
                Some(i) => merged[i].coeff = merged[i].coeff.clone() + p.coeff,
                None => {
                    slot.push(merged.len());
                    merged.push(p);
                }
            }
        }
        let mut out: Vec<Term> = merged.into_iter().filter(|t| !t.coeff.is_zero()).collect();
        out.sort_by(|a, b| order::cmp_expr(&a.rest, &b.rest));
        out
    }
}
